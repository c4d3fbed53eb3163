// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Interaction: hover tracking and re-layout for mind maps.
//!
//! ## Overview
//!
//! [`Controller`] owns a prepared diagram, its images, a drawing surface, and
//! the hit-region [`Registry`](understory_regions::Registry) of the last
//! layout pass. It is a two-state machine:
//!
//! - *Idle*: the registry matches what is drawn; queries are answered.
//! - *Relayouting*: entered when the hover target, viewport, or collapse state
//!   changes. The surface is cleared, the diagram is laid out again at the
//!   current scale and offset, and the registry is replaced as a unit.
//!
//! Everything is synchronous, so relayouting always finishes inside the call
//! that triggered it and no query sees a partial pass.
//!
//! [`HoverState`](hover::HoverState) reports enter/leave transitions for the
//! single hovered target (a node id like `"0-1"` or a link id like `"link-0"`).
//!
//! ## Workflow
//!
//! 1) Prepare a diagram once and hand it to [`Controller::new`].
//! 2) Call [`Controller::layout`] with the initial scale and offset.
//! 3) Feed pointer moves to [`Controller::pointer_moved`]; it re-lays out only
//!    when the hovered target changes.
//! 4) Feed clicks to [`Controller::activate`] and run the returned action.
//!
//! ```
//! use kurbo::Point;
//! use understory_interaction::Controller;
//! use understory_mindmap::{Diagram, FixedAdvanceMeasurer, ImageTable, Node, PreparedDiagram, Recorder};
//!
//! let diagram = Diagram::new(Node::new("root").with_child(Node::new("child")));
//! let prepared = PreparedDiagram::prepare(&diagram, &FixedAdvanceMeasurer::default());
//! let mut ctl = Controller::new(prepared, ImageTable::<()>::new(), Recorder::new());
//! ctl.layout(1.0, 0.0, 0.0, None);
//!
//! let events = ctl.pointer_moved(Point::new(55.0, 70.0));
//! assert_eq!(ctl.hover_target(), Some("0"));
//! assert_eq!(events.len(), 1);
//! ```

pub mod controller;
pub mod hover;

pub use controller::Controller;
pub use hover::{HoverEvent, HoverState};
