// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Preparation pass: raw [`Diagram`] to read-only [`PreparedDiagram`].
//!
//! Runs once per diagram. Assigns path ids and link ids, resolves every node's
//! style, and wraps and measures its text. Layout reads the result and never
//! measures text again.

use std::collections::BTreeSet;

use understory_regions::LinkType;

use crate::diagram::{Diagram, HotSpotSpec, Node};
use crate::style::{ConnectionStyle, GlobalStyle, PartialConnectionStyle, ResolvedStyle, resolve};
use crate::text::{ShapedText, TextMeasurer};

/// Id of the root node.
pub const ROOT_ID: &str = "0";

/// Prefix of link ids. Node ids never contain it.
pub const LINK_ID_PREFIX: &str = "link-";

/// A diagram ready for layout.
#[derive(Clone, Debug)]
pub struct PreparedDiagram {
    /// Diagram-wide style.
    pub global: GlobalStyle,
    /// Horizontal parent→child gap.
    pub x_padding: f64,
    /// Vertical gap below every node.
    pub y_padding: f64,
    /// Root of the prepared tree.
    pub root: PreparedNode,
    /// Number of nodes in the tree.
    pub node_count: usize,
    /// Number of links in the tree.
    pub link_count: usize,
}

/// A node with its id, style, and text measurements fixed.
#[derive(Clone, Debug)]
pub struct PreparedNode {
    /// Path id: `"0"`, `"0-1"`, `"0-1-0"`, ...
    pub id: String,
    /// Body text.
    pub content: ShapedText,
    /// Title text.
    pub title: Option<ShapedText>,
    /// Link and its text.
    pub link: Option<PreparedLink>,
    /// Image id.
    pub image: Option<String>,
    /// Resolved style.
    pub style: ResolvedStyle,
    /// Override for the curves to this node's children.
    pub connection_style: Option<PartialConnectionStyle>,
    /// Custom activation region.
    pub hot_spot: Option<HotSpotSpec>,
    /// Whether the children start hidden.
    pub collapse_children: bool,
    /// Children in order.
    pub children: Vec<PreparedNode>,
}

/// A node's link with its id and wrapped label.
#[derive(Clone, Debug)]
pub struct PreparedLink {
    /// `"link-<n>"`, numbered in preorder.
    pub id: String,
    /// Target.
    pub src: String,
    /// How the target opens.
    pub link_type: LinkType,
    /// Wrapped label.
    pub text: ShapedText,
}

impl PreparedNode {
    /// Whether `target` names this node or its link.
    pub fn is_target(&self, target: &str) -> bool {
        self.id == target || self.link.as_ref().is_some_and(|l| l.id == target)
    }

    /// Curve style for this node's children at `depth`.
    pub fn child_connection_style(&self, global: &GlobalStyle, depth: usize) -> ConnectionStyle {
        global
            .colors_for_depth(depth)
            .child_connection_color
            .merged(self.connection_style.as_ref())
    }
}

impl PreparedDiagram {
    /// Run the preparation pass.
    ///
    /// The diagram should have passed [`Diagram::validate`]; invalid sizes are
    /// carried through unchanged.
    pub fn prepare(diagram: &Diagram, measurer: &impl TextMeasurer) -> Self {
        let base = diagram.global_style.base_style();
        let mut ctx = Prep {
            measurer,
            max_width: diagram.global_style.max_width,
            base: &base,
            nodes: 0,
            links: 0,
        };
        let root = ctx.node(&diagram.node, ROOT_ID.to_owned());
        tracing::debug!(nodes = ctx.nodes, links = ctx.links, "prepared diagram");
        Self {
            global: diagram.global_style.clone(),
            x_padding: diagram.x_padding,
            y_padding: diagram.y_padding,
            root,
            node_count: ctx.nodes,
            link_count: ctx.links,
        }
    }

    /// Find a node by path id.
    pub fn find(&self, id: &str) -> Option<&PreparedNode> {
        let mut parts = id.split('-');
        if parts.next() != Some(ROOT_ID) {
            return None;
        }
        parts.try_fold(&self.root, |node, part| {
            let index: usize = part.parse().ok()?;
            node.children.get(index)
        })
    }

    /// Ids of nodes whose children start hidden.
    pub fn initially_collapsed(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            if node.collapse_children && !node.children.is_empty() {
                out.insert(node.id.clone());
            }
            stack.extend(node.children.iter());
        }
        out
    }
}

struct Prep<'a, M> {
    measurer: &'a M,
    max_width: f64,
    base: &'a ResolvedStyle,
    nodes: usize,
    links: usize,
}

impl<M: TextMeasurer> Prep<'_, M> {
    fn node(&mut self, node: &Node, id: String) -> PreparedNode {
        self.nodes += 1;
        let style = resolve(node.style.as_ref(), self.base);
        let wrap_at = self.max_width - style.padding.horizontal();
        let measurer = self.measurer;
        let shape = |text: &str| ShapedText::shape(text, &style.font, wrap_at, measurer);

        let content = shape(&node.content);
        let title = node.title.as_deref().map(shape);
        let link = node.link.as_ref().map(|spec| {
            let link_id = format!("{LINK_ID_PREFIX}{}", self.links);
            self.links += 1;
            PreparedLink {
                id: link_id,
                src: spec.src.clone(),
                link_type: spec.link_type.unwrap_or(LinkType::Url),
                text: shape(spec.label()),
            }
        });
        tracing::trace!(id = %id, lines = content.lines.len(), "prepared node");

        let children = node
            .children
            .iter()
            .enumerate()
            .map(|(i, child)| self.node(child, format!("{id}-{i}")))
            .collect();

        PreparedNode {
            id,
            content,
            title,
            link,
            image: node.image.clone(),
            style,
            connection_style: node.connection_style.clone(),
            hot_spot: node.hot_spot.clone(),
            collapse_children: node.collapse_children,
            children,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::LinkSpec;
    use crate::style::{NodeStyle, PaddingSpec};
    use crate::text::FixedAdvanceMeasurer;

    fn tree() -> Diagram {
        Diagram::new(
            Node::new("root")
                .with_link(LinkSpec::url("https://a", "a"))
                .with_child(
                    Node::new("c0")
                        .with_child(Node::new("c00").with_link(LinkSpec::url("https://b", ""))),
                )
                .with_child(Node::new("c1").with_child(Node::new("c10"))),
        )
    }

    fn ids(node: &PreparedNode, out: &mut Vec<String>) {
        out.push(node.id.clone());
        for c in &node.children {
            ids(c, out);
        }
    }

    #[test]
    fn ids_follow_child_index_paths() {
        let p = PreparedDiagram::prepare(&tree(), &FixedAdvanceMeasurer::default());
        let mut all = Vec::new();
        ids(&p.root, &mut all);
        assert_eq!(all, ["0", "0-0", "0-0-0", "0-1", "0-1-0"]);
        assert_eq!(p.node_count, 5);
        assert_eq!(p.find("0-1-0").map(|n| n.content.text.as_str()), Some("c10"));
        assert!(p.find("0-2").is_none());
        assert!(p.find("1").is_none());
        assert!(p.find("0-x").is_none());
    }

    #[test]
    fn links_are_numbered_in_preorder() {
        let p = PreparedDiagram::prepare(&tree(), &FixedAdvanceMeasurer::default());
        assert_eq!(p.link_count, 2);
        assert_eq!(p.root.link.as_ref().unwrap().id, "link-0");
        let deep = p.find("0-0-0").unwrap().link.as_ref().unwrap();
        assert_eq!(deep.id, "link-1");
        assert_eq!(deep.text.text, "https://b", "empty title shows the target");
        assert!(p.root.is_target("link-0"));
        assert!(p.root.is_target("0"));
        assert!(!p.root.is_target("0-0"));
    }

    #[test]
    fn wrap_width_subtracts_padding() {
        let mut d = Diagram::new(Node::new("abcdefgh").with_style(NodeStyle {
            padding: Some(PaddingSpec::Uniform(10.0)),
            ..NodeStyle::default()
        }));
        d.global_style.max_width = 60.0;
        let p = PreparedDiagram::prepare(&d, &FixedAdvanceMeasurer::default());
        assert_eq!(p.root.content.lines, ["abcd", "efgh"]);
    }

    #[test]
    fn collapsed_leaves_are_ignored() {
        let mut d = tree();
        d.node.collapse_children = true;
        d.node.children[1].children[0].collapse_children = true;
        let p = PreparedDiagram::prepare(&d, &FixedAdvanceMeasurer::default());
        let c = p.initially_collapsed();
        assert_eq!(c.into_iter().collect::<Vec<_>>(), ["0"]);
    }
}
