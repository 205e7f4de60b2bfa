//! The drawing surface seen by slides and items.
//!
//! A [`Canvas`] receives draw commands and answers text-measurement
//! queries. The core ships a monospace metric model and a canvas that only
//! records what it was asked to draw, which is enough for headless layout.

use crate::geometry::Rect;
use crate::style::{Color, Font};

/// Measured extent of a single line of text.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextMetrics {
    pub width: f32,
    pub ascent: f32,
    pub descent: f32,
}

impl TextMetrics {
    /// Total line height.
    pub fn height(&self) -> f32 {
        self.ascent + self.descent
    }
}

/// Text measurement services of a rendering surface.
pub trait TextMeasure {
    /// Measure `text` laid out on a single line in `font`.
    fn measure(&self, text: &str, font: &Font) -> TextMetrics;
}

/// An opaque 2D surface that items draw into.
pub trait Canvas: TextMeasure {
    /// Draw `text` with its baseline starting at `(x, y)`.
    fn draw_text(&mut self, x: i32, y: i32, text: &str, font: &Font, color: Color);

    /// Draw the named image scaled into `dest`.
    fn draw_image(&mut self, name: &str, dest: Rect);
}

/// Fixed-pitch metrics: every character advances by 0.6em.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonospaceMetrics;

impl MonospaceMetrics {
    const ADVANCE: f32 = 0.6;
    const ASCENT: f32 = 0.8;
    const DESCENT: f32 = 0.2;
}

impl TextMeasure for MonospaceMetrics {
    fn measure(&self, text: &str, font: &Font) -> TextMetrics {
        TextMetrics {
            width: text.chars().count() as f32 * font.size * Self::ADVANCE,
            ascent: font.size * Self::ASCENT,
            descent: font.size * Self::DESCENT,
        }
    }
}

/// A single recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Text {
        x: i32,
        y: i32,
        text: String,
        font: Font,
        color: Color,
    },
    Image {
        name: String,
        dest: Rect,
    },
}

/// A canvas that records draw calls instead of rasterizing them.
#[derive(Debug, Default)]
pub struct RecordingCanvas<M = MonospaceMetrics> {
    metrics: M,
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas<MonospaceMetrics> {
    /// Create a recording canvas using monospace metrics.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: TextMeasure> RecordingCanvas<M> {
    /// Create a recording canvas with custom text metrics.
    pub fn with_metrics(metrics: M) -> Self {
        Self {
            metrics,
            commands: Vec::new(),
        }
    }

    /// Commands recorded so far, in drawing order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the canvas empty.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl<M: TextMeasure> TextMeasure for RecordingCanvas<M> {
    fn measure(&self, text: &str, font: &Font) -> TextMetrics {
        self.metrics.measure(text, font)
    }
}

impl<M: TextMeasure> Canvas for RecordingCanvas<M> {
    fn draw_text(&mut self, x: i32, y: i32, text: &str, font: &Font, color: Color) {
        self.commands.push(DrawCommand::Text {
            x,
            y,
            text: text.to_string(),
            font: font.clone(),
            color,
        });
    }

    fn draw_image(&mut self, name: &str, dest: Rect) {
        self.commands.push(DrawCommand::Image {
            name: name.to_string(),
            dest,
        });
    }
}
