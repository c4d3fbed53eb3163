// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Global style, per-node overrides, and the style cascade.
//!
//! ## Merge rules
//!
//! [`resolve`] merges a node's optional [`NodeStyle`] over the defaults
//! derived from [`GlobalStyle`], one field at a time:
//!
//! | field | override applies when |
//! |---|---|
//! | `font` | present and non-empty |
//! | `padding` | present and not the number `0`; a number expands to all four sides |
//! | `borderWidth` | present, including `0` |
//! | `radius` | present, including `0` |
//! | `width`, `height` | taken from the override only, never defaulted |
//!
//! Colors are not part of the cascade; they come from the depth palette at
//! layout time ([`GlobalStyle::colors_for_depth`]).

use serde::Deserialize;

/// Font used when neither the node nor the global style names one.
pub const DEFAULT_FONT: &str = "20px TimesNewRoman";

/// Corner radius used when the global style does not set one.
pub const DEFAULT_RADIUS: f64 = 5.0;

/// Four-sided padding.
#[derive(Copy, Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Padding {
    /// Top inset.
    pub top: f64,
    /// Right inset.
    pub right: f64,
    /// Bottom inset.
    pub bottom: f64,
    /// Left inset.
    pub left: f64,
}

impl Padding {
    /// Zero on every side.
    pub const ZERO: Self = Self::uniform(0.0);

    /// The same inset on every side.
    pub const fn uniform(v: f64) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    /// `left + right`.
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// `top + bottom`.
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }

    pub(crate) fn is_finite_non_negative(&self) -> bool {
        [self.top, self.right, self.bottom, self.left]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }
}

/// Padding as written in diagram data: a single number or four sides.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PaddingSpec {
    /// Same inset on all sides.
    Uniform(f64),
    /// Explicit sides; missing sides are zero.
    Sides(Padding),
}

impl PaddingSpec {
    /// Expand to four sides.
    pub fn to_padding(self) -> Padding {
        match self {
            Self::Uniform(v) => Padding::uniform(v),
            Self::Sides(p) => p,
        }
    }

    /// Whether this value counts as an override. The number `0` does not.
    pub fn is_set(&self) -> bool {
        match self {
            Self::Uniform(v) => *v != 0.0 && !v.is_nan(),
            Self::Sides(_) => true,
        }
    }
}

impl From<Padding> for PaddingSpec {
    fn from(p: Padding) -> Self {
        Self::Sides(p)
    }
}

/// Normalize optional padding data: absent is zero on all sides.
pub fn normalize_padding(spec: Option<PaddingSpec>) -> Padding {
    spec.map(PaddingSpec::to_padding).unwrap_or(Padding::ZERO)
}

/// Stroke used for parent→child curves.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConnectionStyle {
    /// Stroke color.
    pub color: String,
    /// Stroke width.
    pub width: f64,
}

impl Default for ConnectionStyle {
    fn default() -> Self {
        Self {
            color: "#1e1e1e".into(),
            width: 1.0,
        }
    }
}

impl ConnectionStyle {
    /// Lay the fields present in `over` on top of `self`.
    pub fn merged(&self, over: Option<&PartialConnectionStyle>) -> Self {
        let Some(over) = over else {
            return self.clone();
        };
        Self {
            color: over.color.clone().unwrap_or_else(|| self.color.clone()),
            width: over.width.unwrap_or(self.width),
        }
    }
}

/// Per-node connection override.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct PartialConnectionStyle {
    /// Stroke color override.
    pub color: Option<String>,
    /// Stroke width override.
    pub width: Option<f64>,
}

/// Colors applied to every node at one depth.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColorDefinition {
    /// Body border.
    pub border: String,
    /// Body fill.
    pub background: String,
    /// Title band fill.
    pub title_background: String,
    /// Curves to this node's children.
    pub child_connection_color: ConnectionStyle,
    /// Content and title text.
    pub text_color: String,
    /// Link text.
    pub link_color: String,
}

impl Default for ColorDefinition {
    fn default() -> Self {
        Self {
            border: "#1e1e1e".into(),
            background: "#ffffff".into(),
            title_background: "#e8e8e8".into(),
            child_connection_color: ConnectionStyle::default(),
            text_color: "#000000".into(),
            link_color: "#1a5fb4".into(),
        }
    }
}

/// Outline drawn around the hovered node.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct HoverBorder {
    /// Outline width.
    pub width: f64,
    /// Outline color.
    pub color: String,
}

impl Default for HoverBorder {
    fn default() -> Self {
        Self {
            width: 3.0,
            color: "#3584e4".into(),
        }
    }
}

/// Look of the expand/collapse button next to nodes with children.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExpandButton {
    /// Button fill.
    pub background: String,
    /// Button border color.
    pub border_color: String,
    /// Button border width.
    pub border_width: f64,
    /// Side length of the square button.
    pub length: f64,
    /// Corner radius.
    pub radius: f64,
    /// Glyph color.
    pub text_color: String,
    /// Glyph font.
    pub font: String,
}

impl Default for ExpandButton {
    fn default() -> Self {
        Self {
            background: "#ffffff".into(),
            border_color: "#1e1e1e".into(),
            border_width: 1.0,
            length: 14.0,
            radius: 7.0,
            text_color: "#1e1e1e".into(),
            font: "12px sans-serif".into(),
        }
    }
}

/// Diagram-wide style. Immutable once a diagram is loaded.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GlobalStyle {
    /// Colors per depth; index 0 is the root.
    pub predefined_colors: Vec<ColorDefinition>,
    /// Colors for depths beyond the palette.
    pub default_color: ColorDefinition,
    /// Default border width.
    pub border_width: f64,
    /// Expand/collapse button; no buttons are drawn when absent.
    pub expand_button: Option<ExpandButton>,
    /// Default font.
    pub font: Option<String>,
    /// Default padding.
    pub padding: Option<PaddingSpec>,
    /// Default corner radius.
    pub radius: Option<f64>,
    /// Hover outline.
    pub hover_border: HoverBorder,
    /// Maximum text width before wrapping, padding included.
    pub max_width: f64,
}

impl Default for GlobalStyle {
    fn default() -> Self {
        Self {
            predefined_colors: Vec::new(),
            default_color: ColorDefinition::default(),
            border_width: 1.0,
            expand_button: None,
            font: None,
            padding: None,
            radius: None,
            hover_border: HoverBorder::default(),
            max_width: f64::INFINITY,
        }
    }
}

impl GlobalStyle {
    /// The fully populated defaults every node style inherits from.
    pub fn base_style(&self) -> ResolvedStyle {
        ResolvedStyle {
            font: self
                .font
                .clone()
                .filter(|f| !f.is_empty())
                .unwrap_or_else(|| DEFAULT_FONT.into()),
            padding: normalize_padding(self.padding),
            border_width: self.border_width,
            radius: self.radius.unwrap_or(DEFAULT_RADIUS),
            width: None,
            height: None,
        }
    }

    /// Palette entry for `depth`, or [`default_color`](Self::default_color)
    /// past the end of the palette.
    pub fn colors_for_depth(&self, depth: usize) -> &ColorDefinition {
        self.predefined_colors
            .get(depth)
            .unwrap_or(&self.default_color)
    }
}

/// Per-node style override as written in diagram data.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStyle {
    /// Font override.
    pub font: Option<String>,
    /// Padding override.
    pub padding: Option<PaddingSpec>,
    /// Border width override.
    pub border_width: Option<f64>,
    /// Corner radius override.
    pub radius: Option<f64>,
    /// Fixed box height; disables vertical auto-sizing.
    pub height: Option<f64>,
    /// Fixed box width; disables horizontal auto-sizing.
    pub width: Option<f64>,
}

/// Fully populated style of one node.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedStyle {
    /// Font for content, title, and link text.
    pub font: String,
    /// Inner padding.
    pub padding: Padding,
    /// Border width.
    pub border_width: f64,
    /// Corner radius.
    pub radius: f64,
    /// Fixed width, `None` to auto-size.
    pub width: Option<f64>,
    /// Fixed height, `None` to auto-size.
    pub height: Option<f64>,
}

/// Merge an optional override over `defaults`. See the module docs for the rules.
pub fn resolve(over: Option<&NodeStyle>, defaults: &ResolvedStyle) -> ResolvedStyle {
    let Some(over) = over else {
        return ResolvedStyle {
            width: None,
            height: None,
            ..defaults.clone()
        };
    };
    ResolvedStyle {
        font: match &over.font {
            Some(f) if !f.is_empty() => f.clone(),
            _ => defaults.font.clone(),
        },
        padding: match over.padding {
            Some(p) if p.is_set() => p.to_padding(),
            _ => defaults.padding,
        },
        border_width: over.border_width.unwrap_or(defaults.border_width),
        radius: over.radius.unwrap_or(defaults.radius),
        width: over.width,
        height: over.height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> ResolvedStyle {
        GlobalStyle {
            padding: Some(PaddingSpec::Uniform(5.0)),
            radius: Some(10.0),
            border_width: 2.0,
            ..GlobalStyle::default()
        }
        .base_style()
    }

    #[test]
    fn absent_override_inherits_everything() {
        let d = defaults();
        let r = resolve(None, &d);
        assert_eq!(r, d);
        assert_eq!(r.font, DEFAULT_FONT);
        assert_eq!(r.padding, Padding::uniform(5.0));
    }

    #[test]
    fn explicit_zero_border_and_radius_are_honored() {
        let over = NodeStyle {
            border_width: Some(0.0),
            radius: Some(0.0),
            ..NodeStyle::default()
        };
        let r = resolve(Some(&over), &defaults());
        assert_eq!(r.border_width, 0.0, "zero border is an override, not absence");
        assert_eq!(r.radius, 0.0);
    }

    #[test]
    fn numeric_padding_expands_and_zero_padding_inherits() {
        let d = defaults();
        let over = NodeStyle {
            padding: Some(PaddingSpec::Uniform(8.0)),
            ..NodeStyle::default()
        };
        assert_eq!(resolve(Some(&over), &d).padding, Padding::uniform(8.0));

        let zero = NodeStyle {
            padding: Some(PaddingSpec::Uniform(0.0)),
            ..NodeStyle::default()
        };
        assert_eq!(resolve(Some(&zero), &d).padding, Padding::uniform(5.0));

        let sides = NodeStyle {
            padding: Some(PaddingSpec::Sides(Padding::ZERO)),
            ..NodeStyle::default()
        };
        assert_eq!(resolve(Some(&sides), &d).padding, Padding::ZERO);
    }

    #[test]
    fn width_and_height_are_never_defaulted() {
        let d = ResolvedStyle {
            width: Some(99.0),
            ..defaults()
        };
        assert_eq!(resolve(None, &d).width, None);
        let over = NodeStyle {
            height: Some(40.0),
            ..NodeStyle::default()
        };
        let r = resolve(Some(&over), &d);
        assert_eq!(r.width, None);
        assert_eq!(r.height, Some(40.0));
    }

    #[test]
    fn empty_font_inherits() {
        let over = NodeStyle {
            font: Some(String::new()),
            ..NodeStyle::default()
        };
        assert_eq!(resolve(Some(&over), &defaults()).font, DEFAULT_FONT);
    }

    #[test]
    fn palette_falls_back_past_its_end() {
        let first = ColorDefinition {
            background: "#ff0000".into(),
            ..ColorDefinition::default()
        };
        let g = GlobalStyle {
            predefined_colors: vec![first.clone()],
            ..GlobalStyle::default()
        };
        assert_eq!(g.colors_for_depth(0), &first);
        assert_eq!(g.colors_for_depth(1), &g.default_color);
        assert_eq!(g.colors_for_depth(7), &g.default_color);
    }

    #[test]
    fn connection_override_is_field_wise() {
        let base = ConnectionStyle {
            color: "#111".into(),
            width: 2.0,
        };
        let over = PartialConnectionStyle {
            color: None,
            width: Some(4.0),
        };
        let merged = base.merged(Some(&over));
        assert_eq!(merged.color, "#111");
        assert_eq!(merged.width, 4.0);
        assert_eq!(base.merged(None), base);
    }

    #[test]
    fn padding_spec_accepts_number_or_object() {
        let n: PaddingSpec = serde_json::from_str("8").unwrap();
        assert_eq!(n.to_padding(), Padding::uniform(8.0));
        let o: PaddingSpec = serde_json::from_str(r#"{"top": 1, "left": 2}"#).unwrap();
        assert_eq!(
            o.to_padding(),
            Padding {
                top: 1.0,
                right: 0.0,
                bottom: 0.0,
                left: 2.0
            }
        );
        assert_eq!(normalize_padding(None), Padding::ZERO);
    }
}
