// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Diagram input: the serializable record produced by external loaders.
//!
//! The JSON shape is
//! `{ "globalStyle": {..}, "xPadding": 150, "yPadding": 10, "images": {..}, "node": {..} }`;
//! every field except `node` is optional.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};
use understory_regions::{Action, LinkType, TriggerType};

use crate::error::{Error, Result};
use crate::sizer::ImageExtent;
use crate::style::{GlobalStyle, NodeStyle, PaddingSpec, PartialConnectionStyle, normalize_padding};
use crate::surface::ImageResource;

/// Default horizontal gap between a parent's right edge and its children.
pub const DEFAULT_X_PADDING: f64 = 150.0;

/// Default vertical gap between stacked siblings.
pub const DEFAULT_Y_PADDING: f64 = 10.0;

/// A complete diagram as supplied by a loader.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagram {
    /// Diagram-wide style.
    #[serde(default)]
    pub global_style: GlobalStyle,
    /// Horizontal gap between a parent and its children.
    #[serde(default = "default_x_padding")]
    pub x_padding: f64,
    /// Vertical gap added below every node.
    #[serde(default = "default_y_padding")]
    pub y_padding: f64,
    /// Image table keyed by image id.
    #[serde(default)]
    pub images: BTreeMap<String, ImageSpec>,
    /// Root of the tree.
    pub node: Node,
}

fn default_x_padding() -> f64 {
    DEFAULT_X_PADDING
}

fn default_y_padding() -> f64 {
    DEFAULT_Y_PADDING
}

impl Diagram {
    /// A diagram with default style and spacing around `root`.
    pub fn new(root: Node) -> Self {
        Self {
            global_style: GlobalStyle::default(),
            x_padding: DEFAULT_X_PADDING,
            y_padding: DEFAULT_Y_PADDING,
            images: BTreeMap::new(),
            node: root,
        }
    }

    /// Parse a diagram from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check the preconditions layout relies on.
    ///
    /// Layout does not repair malformed input; its behavior on data that fails
    /// this check is unspecified.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("xPadding", self.x_padding),
            ("yPadding", self.y_padding),
            ("borderWidth", self.global_style.border_width),
            ("hoverBorder.width", self.global_style.hover_border.width),
        ] {
            check_setting(field, value)?;
        }
        // Unbounded by default.
        let max_width = self.global_style.max_width;
        if max_width.is_nan() || max_width < 0.0 {
            return Err(Error::InvalidSetting {
                field: "maxWidth",
                value: max_width,
            });
        }
        if let Some(radius) = self.global_style.radius {
            check_setting("radius", radius)?;
        }
        if !normalize_padding(self.global_style.padding).is_finite_non_negative() {
            return Err(Error::InvalidSetting {
                field: "padding",
                value: first_bad_side(self.global_style.padding),
            });
        }
        for (id, image) in &self.images {
            image.validate(id)?;
        }
        self.validate_node(&self.node, "0")
    }

    fn validate_node(&self, node: &Node, node_id: &str) -> Result<()> {
        if let Some(image) = &node.image
            && !self.images.contains_key(image)
        {
            return Err(Error::UnknownImage {
                node_id: node_id.to_owned(),
                image: image.clone(),
            });
        }
        if let Some(style) = &node.style {
            let sizes = [
                ("width", style.width),
                ("height", style.height),
                ("borderWidth", style.border_width),
                ("radius", style.radius),
            ];
            for (field, value) in sizes {
                if let Some(v) = value
                    && !(v.is_finite() && v >= 0.0)
                {
                    return Err(Error::InvalidStyle {
                        node_id: node_id.to_owned(),
                        field,
                        value: v,
                    });
                }
            }
            if let Some(p) = style.padding
                && !p.to_padding().is_finite_non_negative()
            {
                return Err(Error::InvalidStyle {
                    node_id: node_id.to_owned(),
                    field: "padding",
                    value: first_bad_side(Some(p)),
                });
            }
        }
        for (i, child) in node.children.iter().enumerate() {
            self.validate_node(child, &format!("{node_id}-{i}"))?;
        }
        Ok(())
    }
}

fn check_setting(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidSetting { field, value })
    }
}

fn first_bad_side(spec: Option<PaddingSpec>) -> f64 {
    let p = normalize_padding(spec);
    [p.top, p.right, p.bottom, p.left]
        .into_iter()
        .find(|v| !(v.is_finite() && *v >= 0.0))
        .unwrap_or(f64::NAN)
}

/// One node of the input tree.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Body text; `\n` separates lines.
    #[serde(default)]
    pub content: String,
    /// Title shown in a band above the body.
    pub title: Option<String>,
    /// Link shown below the body.
    pub link: Option<LinkSpec>,
    /// Image id into [`Diagram::images`]; numbers are accepted and stringified.
    #[serde(default, deserialize_with = "image_key")]
    pub image: Option<String>,
    /// Style override.
    pub style: Option<NodeStyle>,
    /// Override for the curves to this node's children.
    pub connection_style: Option<PartialConnectionStyle>,
    /// Custom activation region covering the node body.
    pub hot_spot: Option<HotSpotSpec>,
    /// Start with the children hidden.
    #[serde(default)]
    pub collapse_children: bool,
    /// Ordered children.
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Node {
    /// A node with the given body text.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// Append a child.
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Set the style override.
    pub fn with_style(mut self, style: NodeStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the link.
    pub fn with_link(mut self, link: LinkSpec) -> Self {
        self.link = Some(link);
        self
    }

    /// Set the image id.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Set the custom hot spot.
    pub fn with_hot_spot(mut self, hot_spot: HotSpotSpec) -> Self {
        self.hot_spot = Some(hot_spot);
        self
    }
}

fn image_key<'de, D: Deserializer<'de>>(d: D) -> core::result::Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Key {
        Index(u64),
        Name(String),
    }
    Ok(Option::<Key>::deserialize(d)?.map(|k| match k {
        Key::Index(i) => i.to_string(),
        Key::Name(s) => s,
    }))
}

/// A navigation target attached to a node.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSpec {
    /// Target URL or editor location.
    pub src: String,
    /// Text shown for the link; the target itself when empty.
    #[serde(default)]
    pub title: String,
    /// How the target should be opened.
    #[serde(default)]
    pub link_type: Option<LinkType>,
}

impl LinkSpec {
    /// A URL link labelled `title`.
    pub fn url(src: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            title: title.into(),
            link_type: Some(LinkType::Url),
        }
    }

    /// Text drawn for the link.
    pub fn label(&self) -> &str {
        if self.title.is_empty() {
            &self.src
        } else {
            &self.title
        }
    }
}

/// Custom activation descriptor merged over a node-triggered default.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotSpotSpec {
    /// Trigger kind; `node` when absent.
    #[serde(default)]
    pub trigger_type: Option<TriggerType>,
    /// Action to run.
    pub action: Action,
    /// How to open `link`.
    #[serde(default)]
    pub link_type: Option<LinkType>,
    /// Navigation target.
    #[serde(default)]
    pub link: Option<String>,
    /// Image to show enlarged.
    #[serde(default)]
    pub img_src: Option<String>,
}

impl HotSpotSpec {
    /// A descriptor with only an action.
    pub fn new(action: Action) -> Self {
        Self {
            trigger_type: None,
            action,
            link_type: None,
            link: None,
            img_src: None,
        }
    }
}

/// Image table entry as written in diagram data.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ImageSpec {
    /// Image source.
    pub src: String,
    /// Drawn width.
    pub width: f64,
    /// Drawn height.
    pub height: f64,
    /// Space around the image; a number or four sides, zero when absent.
    #[serde(default)]
    pub padding: Option<PaddingSpec>,
}

impl ImageSpec {
    /// Drawn size with normalized padding.
    pub fn extent(&self) -> ImageExtent {
        ImageExtent {
            width: self.width,
            height: self.height,
            padding: normalize_padding(self.padding),
        }
    }

    /// Attach a loaded bitmap handle, normalizing the padding.
    pub fn to_resource<H>(&self, handle: H) -> ImageResource<H> {
        ImageResource {
            src: self.src.clone(),
            extent: self.extent(),
            handle,
        }
    }

    fn validate(&self, id: &str) -> Result<()> {
        let bad = |field: &'static str, value: f64| Error::InvalidImage {
            image: id.to_owned(),
            field,
            value,
        };
        for (field, value) in [("width", self.width), ("height", self.height)] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(bad(field, value));
            }
        }
        if !self.extent().padding.is_finite_non_negative() {
            return Err(bad("padding", first_bad_side(self.padding)));
        }
        Ok(())
    }
}
