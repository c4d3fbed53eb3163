// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interaction controller: owns the view state and the current regions.
//!
//! The controller is *idle* between calls: its [`Registry`] holds exactly the
//! regions of the last layout pass. Anything that changes what is drawn (a new
//! hover target, pan or zoom, a collapsed subtree, freshly loaded images)
//! clears the surface, lays the diagram out again, and replaces the registry
//! as a unit before the call returns. Queries are answered against the last
//! completed pass only.

use kurbo::{Point, Vec2};
use understory_mindmap::{
    DrawingSurface, ImageCache, LayoutEngine, LayoutResult, PreparedDiagram, ViewState,
};
use understory_regions::{HotSpot, HoverSpot, Registry, TieBreak, TriggerType};

use crate::hover::{HoverEvent, HoverState};

/// Drives layout passes for one diagram on one surface.
#[derive(Debug)]
pub struct Controller<C, S> {
    diagram: PreparedDiagram,
    images: C,
    surface: S,
    view: ViewState,
    hover: HoverState<String>,
    registry: Registry,
    last: LayoutResult,
}

impl<C, S> Controller<C, S>
where
    C: ImageCache,
    S: DrawingSurface<Image = C::Handle>,
{
    /// Create a controller. Nothing is drawn until the first
    /// [`layout`](Self::layout); until then every query misses.
    pub fn new(diagram: PreparedDiagram, images: C, surface: S) -> Self {
        let view = ViewState::new(&diagram);
        Self {
            diagram,
            images,
            surface,
            view,
            hover: HoverState::new(),
            registry: Registry::new(),
            last: LayoutResult::default(),
        }
    }

    /// Use `tie_break` for overlapping regions of equal preference.
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.registry.set_tie_break(tie_break);
        self
    }

    /// Lay out at the given zoom and pan with the given hover target.
    pub fn layout(
        &mut self,
        scale: f64,
        x_offset: f64,
        y_offset: f64,
        hover: Option<&str>,
    ) -> &LayoutResult {
        self.view.scale = scale;
        self.view.offset = Vec2::new(x_offset, y_offset);
        let _ = self.hover.update(hover.map(str::to_owned));
        self.relayout()
    }

    /// Lay out again with the current view state.
    pub fn relayout(&mut self) -> &LayoutResult {
        self.view.hover = self.hover.current().cloned();
        self.surface.clear();
        let result =
            LayoutEngine::new(&self.diagram, &self.images).layout(&mut self.surface, &self.view);
        self.registry
            .replace(result.hot_spots.clone(), result.hover_spots.clone());
        self.last = result;
        tracing::debug!(
            generation = self.registry.generation(),
            hover = self.view.hover.as_deref().unwrap_or(""),
            "regions replaced"
        );
        &self.last
    }

    /// Activation region under `point`, in real coordinates.
    pub fn hit_test(&self, point: Point) -> Option<&HotSpot> {
        self.registry.query_hot_spot(point)
    }

    /// Hover region under `point`, in real coordinates.
    pub fn hover_test(&self, point: Point) -> Option<&HoverSpot> {
        self.registry.query_hover_spot(point)
    }

    /// Change the hover target, laying out again if it differs from the
    /// current one. Returns the transitions; empty means nothing was redrawn.
    pub fn set_hover(&mut self, target: Option<&str>) -> Vec<HoverEvent<String>> {
        let events = self.hover.update(target.map(str::to_owned));
        if !events.is_empty() {
            tracing::debug!(target = target.unwrap_or(""), "hover changed");
            self.relayout();
        }
        events
    }

    /// Hover whatever lies under `point`, or nothing.
    pub fn pointer_moved(&mut self, point: Point) -> Vec<HoverEvent<String>> {
        let target = self.hover_test(point).map(|h| h.id.clone());
        self.set_hover(target.as_deref())
    }

    /// Activate the region under `point`.
    ///
    /// An expand/collapse button toggles its node and lays out again; every
    /// other action is returned for the caller to run.
    pub fn activate(&mut self, point: Point) -> Option<HotSpot> {
        let spot = self.hit_test(point)?.clone();
        if spot.trigger_type == TriggerType::ExpandCollapse
            && let Some(id) = spot.node_id.as_deref()
        {
            self.toggle_collapsed(id);
        }
        Some(spot)
    }

    /// Show or hide the children of node `id` and lay out again. Returns
    /// whether the node is now collapsed.
    pub fn toggle_collapsed(&mut self, id: &str) -> bool {
        let collapsed = self.view.toggle_collapsed(id);
        tracing::debug!(id, collapsed, "toggled subtree");
        self.relayout();
        collapsed
    }

    /// Pan and zoom, then lay out again.
    pub fn set_viewport(&mut self, scale: f64, offset: Vec2) -> &LayoutResult {
        self.view.scale = scale;
        self.view.offset = offset;
        self.relayout()
    }

    /// Current hover target.
    pub fn hover_target(&self) -> Option<&str> {
        self.hover.current().map(String::as_str)
    }

    /// View state used by the last pass.
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Result of the last pass.
    pub fn last_layout(&self) -> &LayoutResult {
        &self.last
    }

    /// Regions of the last pass.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The prepared diagram.
    pub fn diagram(&self) -> &PreparedDiagram {
        &self.diagram
    }

    /// The drawing surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the image source, for example after a load
    /// completes. Call [`relayout`](Self::relayout) afterwards.
    pub fn images_mut(&mut self) -> &mut C {
        &mut self.images
    }

    /// Take the surface back.
    pub fn into_surface(self) -> S {
        self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use understory_mindmap::{
        Diagram, DrawCommand, ExpandButton, FixedAdvanceMeasurer, HotSpotSpec, ImageSpec,
        ImageTable, LinkSpec, Node, Recorder,
    };
    use understory_regions::Action;

    type Ctl = Controller<ImageTable<()>, Recorder>;

    fn controller(diagram: &Diagram) -> Ctl {
        let prepared = PreparedDiagram::prepare(diagram, &FixedAdvanceMeasurer::default());
        Controller::new(
            prepared,
            ImageTable::placeholders(&diagram.images),
            Recorder::new(),
        )
    }

    fn sample() -> Diagram {
        Diagram::new(
            Node::new("root")
                .with_child(Node::new("a").with_link(LinkSpec::url("https://a", "go")))
                .with_child(Node::new("b").with_hot_spot(HotSpotSpec::new(Action::Draw))),
        )
    }

    fn center_of(ctl: &Ctl, id: &str) -> Point {
        let spot = ctl
            .registry()
            .hover_spots()
            .iter()
            .find(|h| h.id == id)
            .unwrap();
        spot.rect.top_left.midpoint(spot.rect.bottom_right)
    }

    #[test]
    fn queries_miss_before_first_layout() {
        let ctl = controller(&sample());
        assert!(ctl.hover_test(Point::new(60.0, 60.0)).is_none());
        assert!(ctl.hit_test(Point::new(60.0, 60.0)).is_none());
    }

    #[test]
    fn layout_fills_registry() {
        let mut ctl = controller(&sample());
        let hover_count = ctl.layout(1.0, 0.0, 0.0, None).hover_spots.len();
        assert_eq!(hover_count, 4, "three nodes and one link");
        assert_eq!(ctl.registry().hover_spots().len(), 4);
        assert_eq!(ctl.registry().hot_spots().len(), 2);
        let root = center_of(&ctl, "0");
        assert_eq!(ctl.hover_test(root).unwrap().id, "0");
    }

    #[test]
    fn hover_change_relayouts_at_same_viewport() {
        let mut ctl = controller(&sample());
        ctl.layout(2.0, 10.0, 5.0, None);
        let before = ctl.registry().generation();
        let b = center_of(&ctl, "0-1");

        let events = ctl.pointer_moved(b);
        assert_eq!(events, vec![HoverEvent::Enter("0-1".to_owned())]);
        assert_eq!(ctl.hover_target(), Some("0-1"));
        assert_eq!(ctl.registry().generation(), before + 1);
        assert_eq!(ctl.view().scale, 2.0);
        assert_eq!(ctl.view().offset, Vec2::new(10.0, 5.0));
        assert!(
            ctl.surface().commands.first() == Some(&DrawCommand::Clear),
            "surface is cleared before redrawing"
        );

        // Same target again: nothing redrawn.
        assert!(ctl.pointer_moved(b).is_empty());
        assert_eq!(ctl.registry().generation(), before + 1);
    }

    #[test]
    fn moving_to_empty_space_clears_hover() {
        let mut ctl = controller(&sample());
        ctl.layout(1.0, 0.0, 0.0, Some("0"));
        assert_eq!(ctl.hover_target(), Some("0"));
        let events = ctl.pointer_moved(Point::new(-100.0, -100.0));
        assert_eq!(events, vec![HoverEvent::Leave("0".to_owned())]);
        assert!(ctl.view().hover.is_none());
    }

    #[test]
    fn relayout_is_idempotent() {
        let mut ctl = controller(&sample());
        let first = ctl.layout(1.5, 3.0, 4.0, Some("link-0")).clone();
        let drawn = ctl.surface().clone();
        assert_eq!(ctl.relayout(), &first);
        assert_eq!(ctl.surface(), &drawn);
    }

    #[test]
    fn activate_returns_link_over_node() {
        let mut d = sample();
        d.node.children[0].hot_spot = Some(HotSpotSpec::new(Action::Draw));
        let mut ctl = controller(&d);
        ctl.layout(1.0, 0.0, 0.0, None);
        let link = center_of(&ctl, "link-0");
        let spot = ctl.activate(link).unwrap();
        assert_eq!(spot.trigger_type, TriggerType::Link);
        assert_eq!(spot.link.as_deref(), Some("https://a"));
    }

    fn button_center(ctl: &Ctl) -> Point {
        let rect = ctl
            .registry()
            .hot_spots()
            .iter()
            .find(|s| s.trigger_type == TriggerType::ExpandCollapse)
            .unwrap()
            .rect;
        rect.top_left.midpoint(rect.bottom_right)
    }

    #[test]
    fn activate_button_toggles_subtree() {
        let mut d = sample();
        d.global_style.expand_button = Some(ExpandButton::default());
        let mut ctl = controller(&d);
        ctl.layout(1.0, 0.0, 0.0, None);

        let spot = ctl.activate(button_center(&ctl)).unwrap();
        assert_eq!(spot.node_id.as_deref(), Some("0"));
        assert!(ctl.view().collapsed.contains("0"));
        assert_eq!(ctl.registry().hover_spots().len(), 1, "children are hidden");

        // The collapsed root moves up, and its button with it.
        ctl.activate(button_center(&ctl));
        assert!(!ctl.view().collapsed.contains("0"));
        assert_eq!(ctl.registry().hover_spots().len(), 4);
    }

    #[test]
    fn button_under_wide_link_still_toggles() {
        let mut d = Diagram::new(
            Node::new("A")
                .with_link(LinkSpec::url("https://a", "link text"))
                .with_child(Node::new("b")),
        );
        d.global_style.expand_button = Some(ExpandButton::default());
        let mut ctl = controller(&d);
        ctl.layout(1.0, 0.0, 0.0, None);

        let spots = ctl.registry().hot_spots();
        let link = spots
            .iter()
            .find(|s| s.trigger_type == TriggerType::Link)
            .unwrap()
            .rect;
        let button = button_center(&ctl);
        // Lower-left corner of the button, inside the link text block.
        let at = Point::new(button.x - 6.0, button.y + 6.0);
        assert!(link.contains(at));

        let spot = ctl.activate(at).unwrap();
        assert_eq!(spot.trigger_type, TriggerType::ExpandCollapse);
        assert!(ctl.view().collapsed.contains("0"));
    }

    #[test]
    fn viewport_change_rescales_regions() {
        let mut ctl = controller(&sample());
        ctl.layout(1.0, 0.0, 0.0, None);
        let one = center_of(&ctl, "0");
        ctl.set_viewport(2.0, Vec2::ZERO);
        let two = center_of(&ctl, "0");
        assert_eq!(two.x, 2.0 * one.x);
        assert_eq!(two.y, 2.0 * one.y);
    }

    #[test]
    fn strict_tie_break_is_selectable() {
        let mut d = sample();
        // The image sits inside a body with a custom hot spot; neither is a link.
        d.images.insert(
            "i".into(),
            ImageSpec {
                src: "i.png".into(),
                width: 10.0,
                height: 10.0,
                padding: None,
            },
        );
        d.node.children[1].image = Some("i".into());
        let mut ctl = controller(&d).with_tie_break(TieBreak::Strict);
        ctl.layout(1.0, 0.0, 0.0, None);
        let image = ctl
            .registry()
            .hot_spots()
            .iter()
            .find(|s| s.trigger_type == TriggerType::Image)
            .unwrap()
            .rect;
        let at = image.top_left.midpoint(image.bottom_right);
        assert_eq!(ctl.registry().hot_spots().matches(at).count(), 2);
        assert!(ctl.hit_test(at).is_none(), "strict policy refuses to guess");
    }
}
