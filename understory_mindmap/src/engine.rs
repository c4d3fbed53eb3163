// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recursive tree layout: positions, draw calls, and regions.
//!
//! A subtree is laid out children first. Each child is placed to the right of
//! its parent at the running height, and the parent is centred on the span its
//! children consumed. Only then is the parent drawn, so its box covers the
//! origin of the curves to its children.
//!
//! Every call returns the regions it registered together with those of its
//! children, children first. A pass shares no mutable state beyond the
//! surface it draws into.

use std::collections::BTreeSet;

use kurbo::{Point, Rect, RoundedRect, Vec2};
use understory_regions::{Action, HotSpot, HoverSpot, RealRect, TriggerType};

use crate::connection::route;
use crate::prepare::{PreparedDiagram, PreparedNode};
use crate::sizer::{NodeContent, NodeSize, size_node};
use crate::style::{ColorDefinition, ExpandButton, Padding};
use crate::surface::{BoxPaint, DrawingSurface, ImageCache, ImageResource, StrokeStyle, TextRun};

/// Logical distance of the root from the origin on both axes, before offset.
pub const ROOT_MARGIN: f64 = 50.0;

/// Horizontal inset of the expand button glyph, as a fraction of its length.
const GLYPH_INSET: f64 = 0.3;
/// Baseline of the expand button glyph, as a fraction of its length.
const GLYPH_BASELINE: f64 = 0.8;

bitflags::bitflags! {
    /// Render state of a laid-out node.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// The node or its link is the hover target.
        const HOVERED      = 0b0000_0001;
        /// The node's children are hidden.
        const COLLAPSED    = 0b0000_0010;
        /// The node has children, shown or not.
        const HAS_CHILDREN = 0b0000_0100;
    }
}

/// Viewport and interaction state a pass is laid out for.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
    /// Zoom factor applied to regions.
    pub scale: f64,
    /// Pan offset added to the root position.
    pub offset: Vec2,
    /// Hovered node or link id.
    pub hover: Option<String>,
    /// Ids of nodes whose children are hidden.
    pub collapsed: BTreeSet<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Vec2::ZERO,
            hover: None,
            collapsed: BTreeSet::new(),
        }
    }
}

impl ViewState {
    /// Unit scale, no offset, no hover, and the diagram's initial collapse state.
    pub fn new(diagram: &PreparedDiagram) -> Self {
        Self {
            collapsed: diagram.initially_collapsed(),
            ..Self::default()
        }
    }

    /// Logical position of the root node.
    pub fn origin(&self) -> Point {
        Point::new(ROOT_MARGIN + self.offset.x, ROOT_MARGIN + self.offset.y)
    }

    /// Flip the collapse state of `id`. Returns whether it is now collapsed.
    pub fn toggle_collapsed(&mut self, id: &str) -> bool {
        if self.collapsed.remove(id) {
            false
        } else {
            self.collapsed.insert(id.to_owned());
            true
        }
    }
}

/// Logical body box of a drawn node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeBox {
    /// Node id.
    pub id: String,
    /// Body rectangle in logical coordinates, sibling gap excluded.
    pub rect: Rect,
    /// Depth in the tree; the root is 0.
    pub depth: usize,
    /// Render state.
    pub flags: NodeFlags,
}

/// Outcome of laying out one subtree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutResult {
    /// Height consumed by the children, the last child's own box excluded.
    /// Zero for leaves and collapsed nodes.
    pub tree_height: f64,
    /// Height of the subtree root's box, sibling gap included.
    pub self_height: f64,
    /// Y at which the parent's curve should end.
    pub connect_point: f64,
    /// Horizontal extent from the subtree root's left edge.
    pub width: f64,
    /// Activation regions, children before parents.
    pub hot_spots: Vec<HotSpot>,
    /// Hover regions, children before parents.
    pub hover_spots: Vec<HoverSpot>,
    /// Every drawn node, children before parents.
    pub boxes: Vec<NodeBox>,
}

impl LayoutResult {
    fn absorb(&mut self, child: Self) {
        self.hot_spots.extend(child.hot_spots);
        self.hover_spots.extend(child.hover_spots);
        self.boxes.extend(child.boxes);
    }
}

/// Lays out a [`PreparedDiagram`] onto a [`DrawingSurface`].
#[derive(Debug)]
pub struct LayoutEngine<'a, C> {
    diagram: &'a PreparedDiagram,
    images: &'a C,
}

impl<'a, C: ImageCache> LayoutEngine<'a, C> {
    /// Create an engine over a prepared diagram and an image source.
    pub fn new(diagram: &'a PreparedDiagram, images: &'a C) -> Self {
        Self { diagram, images }
    }

    /// Lay out the whole diagram with the root at [`ViewState::origin`].
    ///
    /// Draws into `surface` without clearing it first. Calling this twice
    /// with the same arguments produces the same draw calls and regions.
    pub fn layout<S>(&self, surface: &mut S, view: &ViewState) -> LayoutResult
    where
        S: DrawingSurface<Image = C::Handle>,
    {
        let origin = view.origin();
        let result = self.layout_node(surface, &self.diagram.root, origin, 0, view);
        tracing::debug!(
            scale = view.scale,
            offset_x = view.offset.x,
            offset_y = view.offset.y,
            hover = view.hover.as_deref().unwrap_or(""),
            hot_spots = result.hot_spots.len(),
            hover_spots = result.hover_spots.len(),
            "laid out diagram"
        );
        result
    }

    /// Lay out `node` and its subtree with its top-left at `base`.
    ///
    /// `depth` selects the color palette entry.
    pub fn layout_node<S>(
        &self,
        surface: &mut S,
        node: &PreparedNode,
        base: Point,
        depth: usize,
        view: &ViewState,
    ) -> LayoutResult
    where
        S: DrawingSurface<Image = C::Handle>,
    {
        let global = &self.diagram.global;
        let gap = self.diagram.y_padding;
        let colors = global.colors_for_depth(depth);
        let image = node
            .image
            .as_deref()
            .and_then(|id| self.images.resolve(id));
        let parts = NodeContent {
            content: &node.content.measure,
            title: node.title.as_ref().map(|t| &t.measure),
            link: node.link.as_ref().map(|l| &l.text.measure),
            image: image.map(|i| i.extent),
        };
        let size = size_node(&node.style, &parts, gap);

        let mut out = LayoutResult::default();
        let has_children = !node.children.is_empty();
        let collapsed = has_children && view.collapsed.contains(&node.id);
        let child_x = base.x + size.width + self.diagram.x_padding;
        let mut running = 0.0;
        let mut connect_points = Vec::new();
        let mut widest_child = None::<f64>;

        if !collapsed {
            let mut last_self = 0.0;
            for child in &node.children {
                let at = Point::new(child_x, base.y + running);
                let r = self.layout_node(surface, child, at, depth + 1, view);
                running += r.tree_height + r.self_height;
                last_self = r.self_height;
                connect_points.push(r.connect_point);
                widest_child = Some(widest_child.map_or(r.width, |w| w.max(r.width)));
                out.absorb(r);
            }
            running -= last_self;
        }

        let top_left = Point::new(base.x, base.y + running / 2.0);
        let connect_y = top_left.y + size.height / 2.0 - gap / 2.0;

        if !connect_points.is_empty() {
            let stroke = node.child_connection_style(global, depth);
            let from = Point::new(base.x + size.width, connect_y);
            for y in connect_points {
                surface.stroke_bezier(route(from, Point::new(child_x - 1.0, y)), &stroke);
            }
        }

        let hovered = view.hover.as_deref().is_some_and(|h| node.is_target(h));
        tracing::trace!(id = %node.id, depth, hovered, "laying out node");

        let bw = node.style.border_width;
        let body = RealRect::from_logical(
            top_left,
            size.width + bw / 2.0,
            size.height - gap + bw,
            view.scale,
        );
        // The body spot encloses the image, link, and button spots of the same
        // node, so it goes first: the last match is the outermost region.
        if let Some(spec) = &node.hot_spot {
            let mut spot = HotSpot::new(
                body,
                spec.trigger_type.unwrap_or(TriggerType::Node),
                spec.action,
            );
            spot.link_type = spec.link_type;
            spot.node_id = Some(node.id.clone());
            spot.link = spec.link.clone();
            spot.img_src = spec.img_src.clone();
            spot.node_content = Some(node.content.text.clone());
            out.hot_spots.push(spot);
        }
        self.draw_node(surface, node, top_left, size, colors, image, hovered, view.scale, &mut out);
        out.hover_spots.push(HoverSpot {
            id: node.id.clone(),
            rect: body,
        });

        if has_children && let Some(button) = &global.expand_button {
            let center = Point::new(base.x + size.width, connect_y);
            self.draw_button(surface, node, button, center, collapsed, view.scale, &mut out);
        }

        let mut flags = NodeFlags::empty();
        flags.set(NodeFlags::HOVERED, hovered);
        flags.set(NodeFlags::COLLAPSED, collapsed);
        flags.set(NodeFlags::HAS_CHILDREN, has_children);
        out.boxes.push(NodeBox {
            id: node.id.clone(),
            rect: Rect::new(
                top_left.x,
                top_left.y,
                top_left.x + size.width,
                top_left.y + size.height - gap,
            ),
            depth,
            flags,
        });

        out.tree_height = running;
        out.self_height = size.height;
        out.connect_point = connect_y;
        out.width = match widest_child {
            Some(w) => size.width + self.diagram.x_padding + w,
            None => size.width,
        };
        out
    }

    fn draw_node<S>(
        &self,
        surface: &mut S,
        node: &PreparedNode,
        at: Point,
        size: NodeSize,
        colors: &ColorDefinition,
        image: Option<&ImageResource<C::Handle>>,
        hovered: bool,
        scale: f64,
        out: &mut LayoutResult,
    ) where
        S: DrawingSurface<Image = C::Handle>,
    {
        let style = &node.style;
        let gap = self.diagram.y_padding;
        let bw = style.border_width;
        let pad = style.padding;
        let right = at.x + size.width;

        let body = RoundedRect::new(
            at.x + bw / 2.0,
            at.y + bw / 2.0,
            right,
            at.y + size.height - gap,
            style.radius,
        );
        surface.stroke_rounded_rect(
            body,
            &BoxPaint {
                fill: Some(&colors.background),
                stroke: Some(StrokeStyle {
                    color: &colors.border,
                    width: bw,
                }),
            },
        );

        if hovered {
            let hover = &self.diagram.global.hover_border;
            let hw = hover.width;
            let outline = Rect::from_origin_size(
                (at.x - hw / 2.0, at.y - hw / 2.0),
                (
                    size.width + bw / 2.0 + hw,
                    size.height + bw / 2.0 - gap + hw,
                ),
            );
            surface.stroke_rounded_rect(
                RoundedRect::from_rect(outline, style.radius + hw + bw / 2.0),
                &BoxPaint {
                    fill: None,
                    stroke: Some(StrokeStyle {
                        color: &hover.color,
                        width: hw,
                    }),
                },
            );
        }

        let inner_x = at.x + bw;
        let mut cursor = at.y + bw;

        if let Some(title) = &node.title {
            let band_height = title.measure.total_height + pad.vertical();
            let band = Rect::new(inner_x, cursor, right - bw / 2.0, cursor + band_height);
            surface.stroke_rounded_rect(
                RoundedRect::from_rect(band, 0.0),
                &BoxPaint {
                    fill: Some(&colors.title_background),
                    stroke: None,
                },
            );
            surface.fill_text(&TextRun {
                lines: &title.lines,
                origin: Point::new(inner_x, cursor),
                line_height: title.measure.text_height,
                padding: pad,
                font: &style.font,
                color: &colors.text_color,
            });
            cursor += band_height;
        }

        surface.fill_text(&TextRun {
            lines: &node.content.lines,
            origin: Point::new(inner_x, cursor),
            line_height: size.text_height,
            padding: pad,
            font: &style.font,
            color: &colors.text_color,
        });
        cursor += node.content.measure.total_height + pad.vertical();

        if let Some(img) = image {
            let ext = img.extent;
            let origin = Point::new(inner_x + ext.padding.left, cursor + ext.padding.top);
            surface.draw_image(
                &img.handle,
                Rect::from_origin_size(origin, (ext.width, ext.height)),
            );
            let mut spot = HotSpot::new(
                RealRect::from_logical(origin, ext.width, ext.height, scale),
                TriggerType::Image,
                Action::BigImage,
            );
            spot.node_id = Some(node.id.clone());
            spot.img_src = Some(img.src.clone());
            out.hot_spots.push(spot);
            cursor += ext.height + ext.padding.vertical();
        }

        if let Some(link) = &node.link {
            let measure = link.text.measure;
            surface.fill_text(&TextRun {
                lines: &link.text.lines,
                origin: Point::new(inner_x, cursor),
                line_height: measure.text_height,
                padding: Padding {
                    bottom: 0.0,
                    ..pad
                },
                font: &style.font,
                color: &colors.link_color,
            });
            let rect = RealRect::from_logical(
                Point::new(inner_x + pad.left, cursor + pad.top),
                measure.width,
                measure.total_height,
                scale,
            );
            let mut spot = HotSpot::new(rect, TriggerType::Link, Action::LinkTo);
            spot.link_type = Some(link.link_type);
            spot.node_id = Some(link.id.clone());
            spot.link = Some(link.src.clone());
            out.hot_spots.push(spot);
            out.hover_spots.push(HoverSpot {
                id: link.id.clone(),
                rect,
            });
        }
    }

    fn draw_button<S>(
        &self,
        surface: &mut S,
        node: &PreparedNode,
        button: &ExpandButton,
        center: Point,
        collapsed: bool,
        scale: f64,
        out: &mut LayoutResult,
    ) where
        S: DrawingSurface<Image = C::Handle>,
    {
        let len = button.length;
        let rect = Rect::from_center_size(center, (len, len));
        surface.stroke_rounded_rect(
            RoundedRect::from_rect(rect, button.radius),
            &BoxPaint {
                fill: Some(&button.background),
                stroke: Some(StrokeStyle {
                    color: &button.border_color,
                    width: button.border_width,
                }),
            },
        );
        let glyph = [String::from(if collapsed { "+" } else { "-" })];
        surface.fill_text(&TextRun {
            lines: &glyph,
            origin: rect.origin(),
            line_height: len * GLYPH_BASELINE,
            padding: Padding {
                left: len * GLYPH_INSET,
                ..Padding::ZERO
            },
            font: &button.font,
            color: &button.text_color,
        });
        let mut spot = HotSpot::new(
            RealRect::from_logical(rect.origin(), len, len, scale),
            TriggerType::ExpandCollapse,
            Action::Draw,
        );
        spot.node_id = Some(node.id.clone());
        out.hot_spots.push(spot);
    }
}
