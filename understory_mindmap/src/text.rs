// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text wrapping and block measurement on top of a [`TextMeasurer`].

/// Multiplier applied to a line's `ascent - descent` to get its line height.
pub const LINE_SPACING: f64 = 1.5;

/// Raw metrics for a single run of text.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TextMetrics {
    /// Advance width.
    pub width: f64,
    /// Distance from the baseline to the top of the ink box.
    pub ascent: f64,
    /// Distance from the baseline to the bottom of the ink box, signed as the
    /// host reports it.
    pub descent: f64,
}

impl TextMetrics {
    /// `ascent - descent`.
    pub fn vertical_extent(&self) -> f64 {
        self.ascent - self.descent
    }
}

/// Font metrics provider supplied by the host (canvas, font rasterizer, ...).
pub trait TextMeasurer {
    /// Measure `text` set in `font`.
    fn measure(&self, text: &str, font: &str) -> TextMetrics;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, text: &str, font: &str) -> TextMetrics {
        (**self).measure(text, font)
    }
}

/// Deterministic measurer: every character advances by the same amount.
///
/// Useful for headless layout and tests; ignores the font.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FixedAdvanceMeasurer {
    /// Width of every character.
    pub advance: f64,
    /// Reported ascent.
    pub ascent: f64,
    /// Reported descent.
    pub descent: f64,
}

impl FixedAdvanceMeasurer {
    /// Create a measurer with the given advance and vertical metrics.
    pub const fn new(advance: f64, ascent: f64, descent: f64) -> Self {
        Self {
            advance,
            ascent,
            descent,
        }
    }
}

impl Default for FixedAdvanceMeasurer {
    fn default() -> Self {
        Self::new(10.0, 16.0, 0.0)
    }
}

impl TextMeasurer for FixedAdvanceMeasurer {
    fn measure(&self, text: &str, _font: &str) -> TextMetrics {
        #[allow(
            clippy::cast_precision_loss,
            reason = "character counts are far below 2^52."
        )]
        let chars = text.chars().count() as f64;
        TextMetrics {
            width: chars * self.advance,
            ascent: self.ascent,
            descent: self.descent,
        }
    }
}

/// Measured block of (possibly multi-line) text.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TextMeasure {
    /// Widest line.
    pub width: f64,
    /// Height of one line.
    pub text_height: f64,
    /// `text_height * line_count`.
    pub total_height: f64,
}

/// Wrap `text` so no line is wider than `max_width`.
///
/// Existing line breaks are kept. A line that is too wide is filled greedily
/// character by character and broken before the character that would
/// overflow; the trailing partial line is kept. A single character wider than
/// the limit gets a line of its own. Wrapping is idempotent.
pub fn wrap(text: &str, font: &str, max_width: f64, measurer: &impl TextMeasurer) -> String {
    let mut out: Vec<String> = Vec::new();
    for line in text.split('\n') {
        if measurer.measure(line, font).width <= max_width {
            out.push(line.to_owned());
            continue;
        }
        let mut working = String::new();
        for ch in line.chars() {
            let was_empty = working.is_empty();
            working.push(ch);
            if !was_empty && measurer.measure(&working, font).width > max_width {
                working.pop();
                out.push(core::mem::take(&mut working));
                working.push(ch);
            }
        }
        out.push(working);
    }
    out.join("\n")
}

/// Measure a block of text: widest line, line height, total height.
pub fn measure(text: &str, font: &str, measurer: &impl TextMeasurer) -> TextMeasure {
    let mut width = 0.0_f64;
    let mut lines = 0_u32;
    for line in text.split('\n') {
        width = width.max(measurer.measure(line, font).width);
        lines += 1;
    }
    let text_height = measurer.measure(text, font).vertical_extent() * LINE_SPACING;
    TextMeasure {
        width,
        text_height,
        total_height: text_height * f64::from(lines),
    }
}

/// Wrapped text together with its measurement.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShapedText {
    /// Wrapped text, lines separated by `\n`.
    pub text: String,
    /// The wrapped lines.
    pub lines: Vec<String>,
    /// Measurement of the wrapped block.
    pub measure: TextMeasure,
}

impl ShapedText {
    /// Wrap and measure `text` once.
    pub fn shape(text: &str, font: &str, max_width: f64, measurer: &impl TextMeasurer) -> Self {
        let wrapped = wrap(text, font, max_width, measurer);
        let measure = measure(&wrapped, font, measurer);
        let lines = wrapped.split('\n').map(str::to_owned).collect();
        Self {
            text: wrapped,
            lines,
            measure,
        }
    }
}
