// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Mindmap: layout for mind-map style trees of boxes.
//!
//! Each node is a box holding text and optionally a title, an image, and a
//! link. Children stack vertically to the right of their parent, the parent is
//! centred on its children, and cubic curves join them. A layout pass draws
//! through a host [`DrawingSurface`] and returns the hit and hover regions of
//! everything it drew, in zoom-scaled coordinates ready for
//! [`understory_regions::Registry`].
//!
//! ## Pipeline
//!
//! 1. [`Diagram`]: the input record, usually loaded with [`Diagram::from_json`]
//!    and checked with [`Diagram::validate`].
//! 2. [`PreparedDiagram::prepare`]: assigns path ids (`"0"`, `"0-1"`, ...) and
//!    link ids (`"link-0"`, ...), resolves styles ([`style::resolve`]), and
//!    wraps and measures text once through a host [`TextMeasurer`].
//! 3. [`LayoutEngine::layout`]: sizes nodes ([`sizer::size_node`]), positions
//!    them, routes curves ([`connection::route`]), and emits draw calls and
//!    regions for one [`ViewState`] (scale, offset, hover target, collapsed
//!    nodes).
//!
//! Layout is deterministic: the same prepared diagram, images, and view state
//! produce the same draw calls and regions.
//!
//! ## Host seams
//!
//! - [`TextMeasurer`]: text width and vertical metrics for a font.
//! - [`DrawingSurface`]: rounded rects, text, curves, and images in logical
//!   coordinates.
//! - [`ImageCache`]: image sizes and bitmap handles by id. Unresolved ids lay
//!   out as "no image".
//!
//! [`FixedAdvanceMeasurer`], [`Recorder`], and [`ImageTable`] are headless
//! implementations for tests and tools.
//!
//! # Example
//!
//! ```rust
//! use understory_mindmap::{
//!     Diagram, FixedAdvanceMeasurer, ImageTable, LayoutEngine, PreparedDiagram, Recorder,
//!     ViewState,
//! };
//!
//! let diagram = Diagram::from_json(
//!     r#"{ "node": { "content": "root", "children": [
//!         { "content": "left" },
//!         { "content": "right" }
//!     ] } }"#,
//! )
//! .unwrap();
//! diagram.validate().unwrap();
//!
//! let prepared = PreparedDiagram::prepare(&diagram, &FixedAdvanceMeasurer::default());
//! let images = ImageTable::placeholders(&diagram.images);
//! let mut surface = Recorder::new();
//! let result = LayoutEngine::new(&prepared, &images).layout(&mut surface, &ViewState::new(&prepared));
//!
//! // Two leaves of equal height: the root spans the first one.
//! assert_eq!(result.tree_height, result.boxes[0].rect.height() + 10.0);
//! assert_eq!(result.hover_spots.len(), 3);
//! assert_eq!(surface.curve_count(), 2);
//! ```

pub mod connection;
pub mod diagram;
pub mod engine;
pub mod error;
pub mod prepare;
pub mod sizer;
pub mod style;
pub mod surface;
pub mod text;

pub use diagram::{Diagram, HotSpotSpec, ImageSpec, LinkSpec, Node};
pub use engine::{LayoutEngine, LayoutResult, NodeBox, NodeFlags, ViewState};
pub use error::{Error, Result};
pub use prepare::{PreparedDiagram, PreparedLink, PreparedNode};
pub use sizer::{ImageExtent, NodeSize};
pub use style::{
    ColorDefinition, ConnectionStyle, ExpandButton, GlobalStyle, HoverBorder, NodeStyle, Padding,
    PaddingSpec, PartialConnectionStyle, ResolvedStyle,
};
pub use surface::{
    BoxPaint, DrawCommand, DrawingSurface, ImageCache, ImageResource, ImageTable, Recorder,
    StrokeStyle, TextRun,
};
pub use text::{FixedAdvanceMeasurer, ShapedText, TextMeasure, TextMeasurer, TextMetrics};
