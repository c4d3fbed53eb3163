// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node box sizing from measured text, image, and resolved style.

use crate::style::{Padding, ResolvedStyle};
use crate::text::TextMeasure;

/// Extra vertical room added to every auto-sized box below its content.
pub const BOX_SLACK: f64 = 2.0;

/// Size and padding of an image placed in a node.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ImageExtent {
    /// Drawn width.
    pub width: f64,
    /// Drawn height.
    pub height: f64,
    /// Space around the image inside the node.
    pub padding: Padding,
}

/// Measured parts of a node that contribute to its size.
#[derive(Copy, Clone, Debug)]
pub struct NodeContent<'a> {
    /// Body text.
    pub content: &'a TextMeasure,
    /// Title band text.
    pub title: Option<&'a TextMeasure>,
    /// Link text.
    pub link: Option<&'a TextMeasure>,
    /// Image, if one is present and loaded.
    pub image: Option<ImageExtent>,
}

/// Computed box of a node.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NodeSize {
    /// Box width.
    pub width: f64,
    /// Box height including the sibling gap.
    pub height: f64,
    /// Line height of the body text.
    pub text_height: f64,
}

/// Size a node.
///
/// A non-zero `style.width` or `style.height` is used as is for that axis.
/// Otherwise the width is `2 * border + max(space)` over the body, title, and
/// link text (each widened by the horizontal padding) and the image (widened
/// by its own padding), and the height stacks body, image, title, and link
/// blocks with their padding, `2 * border`, and [`BOX_SLACK`].
///
/// `sibling_gap` is added to every height, overridden or not; it separates
/// stacked siblings and is subtracted again wherever the drawn box is needed.
pub fn size_node(style: &ResolvedStyle, parts: &NodeContent<'_>, sibling_gap: f64) -> NodeSize {
    let pad = style.padding;
    let bw = style.border_width;

    let width = match style.width {
        Some(w) if w != 0.0 => w,
        _ => {
            let text_space = |m: &TextMeasure| m.width + pad.horizontal();
            let mut widest = text_space(parts.content);
            if let Some(img) = parts.image {
                widest = widest.max(img.padding.horizontal() + img.width);
            }
            if let Some(link) = parts.link {
                widest = widest.max(text_space(link));
            }
            if let Some(title) = parts.title {
                widest = widest.max(text_space(title));
            }
            2.0 * bw + widest
        }
    };

    let height = match style.height {
        Some(h) if h != 0.0 => h,
        _ => {
            let mut h = parts.content.total_height + pad.vertical();
            if let Some(img) = parts.image {
                h += img.height + img.padding.vertical();
            }
            if let Some(title) = parts.title {
                h += title.total_height + pad.vertical();
            }
            if let Some(link) = parts.link {
                h += link.total_height + pad.top;
            }
            h + 2.0 * bw + BOX_SLACK
        }
    };

    NodeSize {
        width,
        height: height + sibling_gap,
        text_height: parts.content.text_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> ResolvedStyle {
        ResolvedStyle {
            font: "f".into(),
            padding: Padding::uniform(5.0),
            border_width: 1.0,
            radius: 0.0,
            width: None,
            height: None,
        }
    }

    fn text(width: f64, lines: f64) -> TextMeasure {
        TextMeasure {
            width,
            text_height: 15.0,
            total_height: 15.0 * lines,
        }
    }

    #[test]
    fn plain_text_box() {
        let content = text(40.0, 1.0);
        let parts = NodeContent {
            content: &content,
            title: None,
            link: None,
            image: None,
        };
        let s = size_node(&style(), &parts, 10.0);
        assert_eq!(s.width, 2.0 + 40.0 + 10.0);
        assert_eq!(s.height, 15.0 + 10.0 + 2.0 + 2.0 + 10.0);
        assert_eq!(s.text_height, 15.0);
    }

    #[test]
    fn widest_part_wins_and_blocks_stack() {
        let content = text(40.0, 2.0);
        let title = text(70.0, 1.0);
        let link = text(20.0, 1.0);
        let parts = NodeContent {
            content: &content,
            title: Some(&title),
            link: Some(&link),
            image: Some(ImageExtent {
                width: 100.0,
                height: 50.0,
                padding: Padding::uniform(8.0),
            }),
        };
        let s = size_node(&style(), &parts, 0.0);
        assert_eq!(s.width, 2.0 + 116.0, "image plus its own padding is widest");
        let expected = (30.0 + 10.0) + (50.0 + 16.0) + (15.0 + 10.0) + (15.0 + 5.0) + 2.0 + 2.0;
        assert_eq!(s.height, expected);
    }

    #[test]
    fn width_override_ignores_content() {
        let content = text(400.0, 1.0);
        let title = text(900.0, 1.0);
        let parts = NodeContent {
            content: &content,
            title: Some(&title),
            link: None,
            image: None,
        };
        let fixed = ResolvedStyle {
            width: Some(120.0),
            height: Some(33.0),
            ..style()
        };
        let s = size_node(&fixed, &parts, 10.0);
        assert_eq!(s.width, 120.0);
        assert_eq!(s.height, 43.0, "the sibling gap is still added");
    }

    #[test]
    fn zero_override_means_auto() {
        let content = text(40.0, 1.0);
        let parts = NodeContent {
            content: &content,
            title: None,
            link: None,
            image: None,
        };
        let zero = ResolvedStyle {
            width: Some(0.0),
            ..style()
        };
        assert_eq!(size_node(&zero, &parts, 0.0).width, 52.0);
    }
}
