// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host seams: where the engine draws and where it looks up images.
//!
//! Layout never touches pixels. Every primitive goes through a
//! [`DrawingSurface`] in logical coordinates, and image sizes come from an
//! [`ImageCache`]. [`Recorder`] and [`ImageTable`] are the in-memory
//! implementations used for headless layout and tests.

use std::collections::BTreeMap;

use kurbo::{CubicBez, Point, Rect, RoundedRect};

use crate::diagram::ImageSpec;
use crate::sizer::ImageExtent;
use crate::style::{ConnectionStyle, Padding};

/// Outline color and width.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StrokeStyle<'a> {
    /// Stroke color.
    pub color: &'a str,
    /// Stroke width.
    pub width: f64,
}

/// How a rounded box is painted. Either part may be absent.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoxPaint<'a> {
    /// Fill color.
    pub fill: Option<&'a str>,
    /// Outline.
    pub stroke: Option<StrokeStyle<'a>>,
}

/// A block of text lines.
///
/// Line `i` sits at `origin.x + padding.left` with its baseline at
/// `origin.y + padding.top + (i + 1) * line_height`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TextRun<'a> {
    /// Lines, top to bottom.
    pub lines: &'a [String],
    /// Top-left corner of the block before padding.
    pub origin: Point,
    /// Distance between baselines.
    pub line_height: f64,
    /// Inset from `origin`.
    pub padding: Padding,
    /// Font description.
    pub font: &'a str,
    /// Fill color.
    pub color: &'a str,
}

impl TextRun<'_> {
    /// Baseline position of line `index`.
    pub fn baseline(&self, index: usize) -> Point {
        #[allow(
            clippy::cast_precision_loss,
            reason = "line indices are far below 2^52."
        )]
        let n = (index + 1) as f64;
        Point::new(
            self.origin.x + self.padding.left,
            self.origin.y + self.padding.top + n * self.line_height,
        )
    }
}

/// Drawing primitives the layout engine emits, in logical coordinates.
pub trait DrawingSurface {
    /// Opaque bitmap handle passed through from the [`ImageCache`].
    type Image;

    /// Wipe everything drawn so far.
    fn clear(&mut self);

    /// Draw a rounded rectangle.
    fn stroke_rounded_rect(&mut self, rect: RoundedRect, paint: &BoxPaint<'_>);

    /// Draw a block of text.
    fn fill_text(&mut self, run: &TextRun<'_>);

    /// Stroke a connection curve.
    fn stroke_bezier(&mut self, curve: CubicBez, style: &ConnectionStyle);

    /// Blit an image into `rect`.
    fn draw_image(&mut self, image: &Self::Image, rect: Rect);
}

/// A loaded image and its placement metrics.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageResource<H> {
    /// Image source.
    pub src: String,
    /// Drawn size and normalized padding.
    pub extent: ImageExtent,
    /// Host bitmap handle.
    pub handle: H,
}

/// Image lookup by id.
///
/// An id that does not resolve is treated as "no image": the node is laid out
/// without one. Readiness is the caller's concern; lay out again once images
/// finish loading.
pub trait ImageCache {
    /// Bitmap handle type.
    type Handle;

    /// Look up a loaded image.
    fn resolve(&self, id: &str) -> Option<&ImageResource<Self::Handle>>;
}

/// In-memory [`ImageCache`] keyed by image id.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageTable<H> {
    entries: BTreeMap<String, ImageResource<H>>,
}

impl<H> Default for ImageTable<H> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<H> ImageTable<H> {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from diagram image entries.
    ///
    /// `load` returns the handle for an entry, or `None` when the image is not
    /// available yet; such entries are left out.
    pub fn load<'a, I, F>(specs: I, mut load: F) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a ImageSpec)>,
        F: FnMut(&str, &ImageSpec) -> Option<H>,
    {
        let entries = specs
            .into_iter()
            .filter_map(|(id, spec)| {
                load(id, spec).map(|handle| (id.clone(), spec.to_resource(handle)))
            })
            .collect();
        Self { entries }
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, id: impl Into<String>, resource: ImageResource<H>) {
        self.entries.insert(id.into(), resource);
    }

    /// Drop an entry.
    pub fn remove(&mut self, id: &str) -> Option<ImageResource<H>> {
        self.entries.remove(id)
    }

    /// Number of loaded images.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no images are loaded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ImageTable<()> {
    /// Every entry as loaded, with a unit handle. For headless layout.
    pub fn placeholders<'a, I>(specs: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a ImageSpec)>,
    {
        Self::load(specs, |_, _| Some(()))
    }
}

impl<H> ImageCache for ImageTable<H> {
    type Handle = H;

    fn resolve(&self, id: &str) -> Option<&ImageResource<H>> {
        self.entries.get(id)
    }
}

/// One primitive captured by a [`Recorder`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// [`DrawingSurface::clear`].
    Clear,
    /// [`DrawingSurface::stroke_rounded_rect`].
    RoundedRect {
        /// Geometry.
        rect: RoundedRect,
        /// Fill color.
        fill: Option<String>,
        /// Stroke color and width.
        stroke: Option<(String, f64)>,
    },
    /// [`DrawingSurface::fill_text`], one entry per line.
    Text {
        /// Line text.
        text: String,
        /// Baseline start.
        at: Point,
        /// Font.
        font: String,
        /// Color.
        color: String,
    },
    /// [`DrawingSurface::stroke_bezier`].
    Bezier {
        /// Curve.
        curve: CubicBez,
        /// Stroke.
        style: ConnectionStyle,
    },
    /// [`DrawingSurface::draw_image`].
    Image {
        /// Destination.
        rect: Rect,
    },
}

/// Surface that records commands instead of drawing.
///
/// `clear` empties the log, so after a layout pass it holds exactly that
/// pass's output.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Recorder {
    /// Commands since the last clear.
    pub commands: Vec<DrawCommand>,
}

impl Recorder {
    /// An empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of every recorded line, in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Number of recorded curves.
    pub fn curve_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Bezier { .. }))
            .count()
    }
}

impl DrawingSurface for Recorder {
    type Image = ();

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn stroke_rounded_rect(&mut self, rect: RoundedRect, paint: &BoxPaint<'_>) {
        self.commands.push(DrawCommand::RoundedRect {
            rect,
            fill: paint.fill.map(str::to_owned),
            stroke: paint.stroke.map(|s| (s.color.to_owned(), s.width)),
        });
    }

    fn fill_text(&mut self, run: &TextRun<'_>) {
        for (i, line) in run.lines.iter().enumerate() {
            self.commands.push(DrawCommand::Text {
                text: line.clone(),
                at: run.baseline(i),
                font: run.font.to_owned(),
                color: run.color.to_owned(),
            });
        }
    }

    fn stroke_bezier(&mut self, curve: CubicBez, style: &ConnectionStyle) {
        self.commands.push(DrawCommand::Bezier {
            curve,
            style: style.clone(),
        });
    }

    fn draw_image(&mut self, _image: &(), rect: Rect) {
        self.commands.push(DrawCommand::Image { rect });
    }
}
