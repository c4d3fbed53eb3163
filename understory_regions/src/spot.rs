// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hot spots (activation targets) and hover spots (highlight targets).

use serde::Deserialize;

use crate::rect::RealRect;

/// What kind of drawn element produced a [`HotSpot`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TriggerType {
    /// An image drawn inside a node.
    Image,
    /// A node's link text.
    Link,
    /// A node body carrying a custom hot spot descriptor.
    Node,
    /// A caller-defined region.
    Custom,
    /// The expand/collapse button next to a node with children.
    ExpandCollapse,
}

/// What activating a [`HotSpot`] should do.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    /// Navigate to [`HotSpot::link`].
    LinkTo,
    /// Redraw the diagram (for example after toggling a subtree).
    Draw,
    /// Show [`HotSpot::img_src`] enlarged.
    BigImage,
}

/// How a link target should be opened.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LinkType {
    /// An external URL.
    Url,
    /// A location inside the host editor.
    Editor,
}

/// A clickable region tied to an action.
#[derive(Clone, Debug, PartialEq)]
pub struct HotSpot {
    /// Region in real coordinates.
    pub rect: RealRect,
    /// Element kind that produced the region.
    pub trigger_type: TriggerType,
    /// Action to run on activation.
    pub action: Action,
    /// How to open [`link`](Self::link), when present.
    pub link_type: Option<LinkType>,
    /// Owning node id, or link id for link regions.
    pub node_id: Option<String>,
    /// Navigation target.
    pub link: Option<String>,
    /// Image source for [`Action::BigImage`].
    pub img_src: Option<String>,
    /// Text content of the owning node, for node-triggered spots.
    pub node_content: Option<String>,
}

impl HotSpot {
    /// A hot spot with no payload.
    pub fn new(rect: RealRect, trigger_type: TriggerType, action: Action) -> Self {
        Self {
            rect,
            trigger_type,
            action,
            link_type: None,
            node_id: None,
            link: None,
            img_src: None,
            node_content: None,
        }
    }
}

/// A region used only for hover highlighting.
#[derive(Clone, Debug, PartialEq)]
pub struct HoverSpot {
    /// Owning node id or link id.
    pub id: String,
    /// Region in real coordinates.
    pub rect: RealRect,
}

/// Common view over registered regions.
pub trait Region {
    /// Region bounds in real coordinates.
    fn rect(&self) -> &RealRect;

    /// Rank among overlapping candidates; `0` means not preferred.
    ///
    /// Link regions sit inside node bodies and outrank them. The expand
    /// button straddles the node's right edge, where wide link text can reach
    /// under it, so it outranks links.
    fn precedence(&self) -> u8;

    /// Whether this region wins over unranked candidates.
    fn is_preferred(&self) -> bool {
        self.precedence() > 0
    }
}

impl Region for HotSpot {
    fn rect(&self) -> &RealRect {
        &self.rect
    }

    fn precedence(&self) -> u8 {
        match self.trigger_type {
            TriggerType::ExpandCollapse => 2,
            TriggerType::Link => 1,
            TriggerType::Image | TriggerType::Node | TriggerType::Custom => 0,
        }
    }
}

impl Region for HoverSpot {
    fn rect(&self) -> &RealRect {
        &self.rect
    }

    fn precedence(&self) -> u8 {
        u8::from(self.id.contains("link"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    fn unit() -> RealRect {
        RealRect::new(Point::ZERO, Point::new(1.0, 1.0))
    }

    #[test]
    fn link_hotspots_are_preferred() {
        let link = HotSpot::new(unit(), TriggerType::Link, Action::LinkTo);
        let node = HotSpot::new(unit(), TriggerType::Node, Action::Draw);
        assert!(link.is_preferred());
        assert!(!node.is_preferred());
    }

    #[test]
    fn expand_button_outranks_link() {
        let button = HotSpot::new(unit(), TriggerType::ExpandCollapse, Action::Draw);
        let link = HotSpot::new(unit(), TriggerType::Link, Action::LinkTo);
        assert!(button.precedence() > link.precedence());
        assert!(button.is_preferred());
    }

    #[test]
    fn hover_preference_follows_id() {
        let link = HoverSpot {
            id: "link-3".into(),
            rect: unit(),
        };
        let node = HoverSpot {
            id: "0-1".into(),
            rect: unit(),
        };
        assert!(link.is_preferred());
        assert!(!node.is_preferred());
    }

    #[test]
    fn trigger_names_match_wire_format() {
        let t: TriggerType = serde_json::from_str("\"expandCollapse\"").unwrap();
        assert_eq!(t, TriggerType::ExpandCollapse);
        let a: Action = serde_json::from_str("\"bigImage\"").unwrap();
        assert_eq!(a, Action::BigImage);
        let l: LinkType = serde_json::from_str("\"editor\"").unwrap();
        assert_eq!(l, LinkType::Editor);
    }
}
