//! Slide items: the text lines and images that make up a slide.

use std::cell::Cell;
use std::fmt;

use crate::geometry::{scaled, Rect};
use crate::images::{ImageHandle, ImageLoader};
use crate::render::{Canvas, TextMeasure, TextMetrics};
use crate::slide::REFERENCE_WIDTH;
use crate::style::Style;

/// What an item is, as far as persistence is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind<'a> {
    /// A text line with its content.
    Text(&'a str),
    /// An image with the name it is loaded by.
    Bitmap(&'a str),
    /// Anything that has no representation in a show file.
    Unknown,
}

/// A single piece of slide content tagged with a nesting level.
pub trait SlideItem: fmt::Debug + Send {
    /// Nesting level; selects the style at render time.
    fn level(&self) -> u32;

    /// Kind and payload of this item.
    fn kind(&self) -> ItemKind<'_>;

    /// Box the item occupies when drawn at `scale` with `style`.
    ///
    /// `x` is the scaled indent and `y` is always zero; the caller stacks
    /// items by advancing its own cursor by `height`.
    fn bounding_box(
        &self,
        measure: &dyn TextMeasure,
        images: &dyn ImageLoader,
        scale: f32,
        style: &Style,
    ) -> Rect;

    /// Draw the item with its top-left corner at `(x, y)`.
    fn draw(
        &self,
        x: i32,
        y: i32,
        scale: f32,
        canvas: &mut dyn Canvas,
        style: &Style,
        images: &dyn ImageLoader,
    );
}

/// A line of plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextItem {
    level: u32,
    text: String,
}

impl TextItem {
    pub fn new(level: u32, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Break the text into lines no wider than the space left after the
    /// indent, measured in the scaled font.
    ///
    /// Lines break only between words and keep the spacing as written;
    /// trailing spaces stay on the line they follow but add no width.
    fn layout<M: TextMeasure + ?Sized>(
        &self,
        measure: &M,
        scale: f32,
        style: &Style,
    ) -> Vec<(String, TextMetrics)> {
        let font = style.font(scale);
        let wrap_width = (REFERENCE_WIDTH - style.indent) as f32 * scale;

        let mut lines = Vec::new();
        let mut current = String::new();
        for segment in word_segments(&self.text) {
            if !current.is_empty() {
                let candidate = format!("{}{}", current, segment);
                if measure.measure(candidate.trim_end(), &font).width > wrap_width {
                    lines.push(std::mem::take(&mut current));
                }
            }
            current.push_str(segment);
        }
        if !current.is_empty() {
            lines.push(current);
        }

        lines
            .into_iter()
            .map(|line| {
                let mut metrics = measure.measure(&line, &font);
                metrics.width = measure.measure(line.trim_end(), &font).width;
                (line, metrics)
            })
            .collect()
    }
}

/// Split text wherever a word starts after whitespace. Each run keeps the
/// whitespace that follows it, so joining the runs gives back the text.
fn word_segments(text: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut after_space = false;
    for (index, c) in text.char_indices() {
        if after_space && !c.is_whitespace() && index > start {
            segments.push(&text[start..index]);
            start = index;
        }
        after_space = c.is_whitespace();
    }
    if start < text.len() {
        segments.push(&text[start..]);
    }
    segments
}

impl SlideItem for TextItem {
    fn level(&self) -> u32 {
        self.level
    }

    fn kind(&self) -> ItemKind<'_> {
        ItemKind::Text(&self.text)
    }

    fn bounding_box(
        &self,
        measure: &dyn TextMeasure,
        _images: &dyn ImageLoader,
        scale: f32,
        style: &Style,
    ) -> Rect {
        let x = scaled(style.indent, scale);
        let lines = self.layout(measure, scale, style);
        if lines.is_empty() {
            return Rect::new(x, 0, 0, 0);
        }

        let mut width = 0.0_f32;
        let mut height = style.leading as f32 * scale;
        for (_, metrics) in &lines {
            width = width.max(metrics.width);
            height += metrics.height();
        }
        Rect::new(x, 0, width as i32, height as i32)
    }

    fn draw(
        &self,
        x: i32,
        y: i32,
        scale: f32,
        canvas: &mut dyn Canvas,
        style: &Style,
        _images: &dyn ImageLoader,
    ) {
        let lines = self.layout(&*canvas, scale, style);
        if lines.is_empty() {
            return;
        }

        let font = style.font(scale);
        let pen_x = x + scaled(style.indent, scale);
        let mut pen_y = y as f32 + style.leading as f32 * scale;
        for (line, metrics) in &lines {
            pen_y += metrics.ascent;
            canvas.draw_text(pen_x, pen_y as i32, line, &font, style.color);
            pen_y += metrics.descent;
        }
    }
}

/// An image loaded lazily by name.
///
/// The first settled load result is cached on the item, so a missing file is
/// reported once and the item keeps a zero-sized box afterwards.
#[derive(Debug)]
pub struct BitmapItem {
    level: u32,
    name: String,
    image: Cell<Option<ImageHandle>>,
}

impl BitmapItem {
    pub fn new(level: u32, name: impl Into<String>) -> Self {
        Self {
            level,
            name: name.into(),
            image: Cell::new(None),
        }
    }

    /// Name of the image, as stored in the show file.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn image(&self, images: &dyn ImageLoader) -> ImageHandle {
        if let Some(handle) = self.image.get() {
            return handle;
        }
        let handle = images.request_load(&self.name);
        if handle.is_settled() {
            self.image.set(Some(handle));
        }
        handle
    }
}

impl Clone for BitmapItem {
    fn clone(&self) -> Self {
        Self {
            level: self.level,
            name: self.name.clone(),
            image: Cell::new(self.image.get()),
        }
    }
}

impl SlideItem for BitmapItem {
    fn level(&self) -> u32 {
        self.level
    }

    fn kind(&self) -> ItemKind<'_> {
        ItemKind::Bitmap(&self.name)
    }

    fn bounding_box(
        &self,
        _measure: &dyn TextMeasure,
        images: &dyn ImageLoader,
        scale: f32,
        style: &Style,
    ) -> Rect {
        let x = scaled(style.indent, scale);
        match self.image(images).dimensions() {
            Some((width, height)) => Rect::new(
                x,
                0,
                (width as f32 * scale) as i32,
                scaled(style.leading, scale) + (height as f32 * scale) as i32,
            ),
            None => Rect::new(x, 0, 0, 0),
        }
    }

    fn draw(
        &self,
        x: i32,
        y: i32,
        scale: f32,
        canvas: &mut dyn Canvas,
        style: &Style,
        images: &dyn ImageLoader,
    ) {
        let (width, height) = match self.image(images) {
            ImageHandle::Ready { width, height } => (width, height),
            ImageHandle::Pending => {
                log::warn!("Image {} is still loading, skipping", self.name);
                return;
            }
            // The loader has already reported why.
            ImageHandle::Failed => {
                log::debug!("Image {} failed to load, skipping", self.name);
                return;
            }
        };
        let dest = Rect::new(
            x + scaled(style.indent, scale),
            y + scaled(style.leading, scale),
            (width as f32 * scale) as i32,
            (height as f32 * scale) as i32,
        );
        canvas.draw_image(&self.name, dest);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::images::NoImages;
    use crate::render::{DrawCommand, MonospaceMetrics, RecordingCanvas};
    use crate::style::Color;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Serves fixed dimensions and counts requests.
    #[derive(Default)]
    pub(crate) struct FixedImages {
        pub sizes: HashMap<String, (u32, u32)>,
        pub requests: RefCell<usize>,
    }

    impl FixedImages {
        pub fn with(name: &str, width: u32, height: u32) -> Self {
            let mut images = Self::default();
            images.sizes.insert(name.to_string(), (width, height));
            images
        }
    }

    impl ImageLoader for FixedImages {
        fn request_load(&self, name: &str) -> ImageHandle {
            *self.requests.borrow_mut() += 1;
            match self.sizes.get(name) {
                Some(&(width, height)) => ImageHandle::Ready { width, height },
                None => ImageHandle::Failed,
            }
        }
    }

    struct AlwaysPending;

    impl ImageLoader for AlwaysPending {
        fn request_load(&self, _name: &str) -> ImageHandle {
            ImageHandle::Pending
        }
    }

    fn style() -> Style {
        Style::new(20, Color::BLUE, 10.0, 10)
    }

    #[test]
    fn test_text_item_kind_and_level() {
        let item = TextItem::new(2, "Hello");
        assert_eq!(item.level(), 2);
        assert_eq!(item.kind(), ItemKind::Text("Hello"));
    }

    #[test]
    fn test_text_bounding_box() {
        let item = TextItem::new(1, "Hello");
        let bbox = item.bounding_box(&MonospaceMetrics, &NoImages, 1.0, &style());
        // 5 chars * 6px wide; leading 10 + one 10px line.
        assert_eq!(bbox, Rect::new(20, 0, 30, 20));
    }

    #[test]
    fn test_text_bounding_box_scales() {
        let item = TextItem::new(1, "Hello");
        let bbox = item.bounding_box(&MonospaceMetrics, &NoImages, 0.5, &style());
        assert_eq!(bbox, Rect::new(10, 0, 15, 10));
    }

    #[test]
    fn test_empty_text_has_zero_box() {
        let item = TextItem::new(1, "");
        let bbox = item.bounding_box(&MonospaceMetrics, &NoImages, 1.0, &style());
        assert_eq!(bbox.width, 0);
        assert_eq!(bbox.height, 0);

        let mut canvas = RecordingCanvas::new();
        item.draw(0, 0, 1.0, &mut canvas, &style(), &NoImages);
        assert!(canvas.commands().is_empty());
    }

    #[test]
    fn test_long_text_wraps() {
        // 1180px available at 10pt / 6px per char is 196 chars per line.
        let word = "x".repeat(100);
        let item = TextItem::new(1, format!("{} {} {}", word, word, word));
        let bbox = item.bounding_box(&MonospaceMetrics, &NoImages, 1.0, &style());
        assert_eq!(bbox.height, 10 + 3 * 10);
        assert_eq!(bbox.width, 600);
    }

    #[test]
    fn test_whitespace_only_text_takes_one_line() {
        let item = TextItem::new(1, " ");
        let bbox = item.bounding_box(&MonospaceMetrics, &NoImages, 1.0, &style());
        // leading 10 + one 10px line, no visible width
        assert_eq!(bbox.height, 10 + 10);
        assert_eq!(bbox.width, 0);
    }

    #[test]
    fn test_spacing_is_kept_when_drawing() {
        let item = TextItem::new(1, "a   b");
        let mut canvas = RecordingCanvas::new();
        item.draw(0, 0, 1.0, &mut canvas, &style(), &NoImages);

        assert_eq!(canvas.commands().len(), 1);
        assert!(matches!(&canvas.commands()[0], DrawCommand::Text { text, .. } if text == "a   b"));
    }

    #[test]
    fn test_word_segments() {
        assert_eq!(word_segments("a   b c"), vec!["a   ", "b ", "c"]);
        assert_eq!(word_segments(" "), vec![" "]);
        assert_eq!(word_segments("  x "), vec!["  ", "x "]);
        assert!(word_segments("").is_empty());
        assert_eq!(word_segments("a  b").concat(), "a  b");
    }

    #[test]
    fn test_text_draw_position() {
        let item = TextItem::new(1, "Hi");
        let mut canvas = RecordingCanvas::new();
        item.draw(5, 100, 1.0, &mut canvas, &style(), &NoImages);

        match &canvas.commands()[0] {
            DrawCommand::Text {
                x, y, text, color, ..
            } => {
                assert_eq!(*x, 25);
                // top + leading + ascent
                assert_eq!(*y, 118);
                assert_eq!(text, "Hi");
                assert_eq!(*color, Color::BLUE);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_bitmap_bounding_box() {
        let images = FixedImages::with("logo.png", 200, 100);
        let item = BitmapItem::new(1, "logo.png");
        assert_eq!(item.kind(), ItemKind::Bitmap("logo.png"));

        let bbox = item.bounding_box(&MonospaceMetrics, &images, 0.5, &style());
        assert_eq!(bbox, Rect::new(10, 0, 100, 55));
    }

    #[test]
    fn test_bitmap_draw() {
        let images = FixedImages::with("logo.png", 200, 100);
        let item = BitmapItem::new(1, "logo.png");
        let mut canvas = RecordingCanvas::new();
        item.draw(0, 50, 1.0, &mut canvas, &style(), &images);

        assert_eq!(
            canvas.commands(),
            &[DrawCommand::Image {
                name: "logo.png".to_string(),
                dest: Rect::new(20, 60, 200, 100),
            }]
        );
    }

    #[test]
    fn test_missing_bitmap_is_degenerate() {
        let images = FixedImages::default();
        let item = BitmapItem::new(1, "gone.png");
        let bbox = item.bounding_box(&MonospaceMetrics, &images, 1.0, &style());
        assert_eq!((bbox.width, bbox.height), (0, 0));

        let mut canvas = RecordingCanvas::new();
        item.draw(0, 0, 1.0, &mut canvas, &style(), &images);
        assert!(canvas.commands().is_empty());
    }

    #[test]
    fn test_bitmap_load_is_cached() {
        let images = FixedImages::default();
        let item = BitmapItem::new(1, "gone.png");
        item.bounding_box(&MonospaceMetrics, &images, 1.0, &style());
        item.bounding_box(&MonospaceMetrics, &images, 1.0, &style());
        assert_eq!(*images.requests.borrow(), 1);
    }

    #[test]
    fn test_pending_bitmap_is_not_cached() {
        let item = BitmapItem::new(1, "slow.png");
        let bbox = item.bounding_box(&MonospaceMetrics, &AlwaysPending, 1.0, &style());
        assert_eq!(bbox.height, 0);

        let images = FixedImages::with("slow.png", 10, 10);
        let bbox = item.bounding_box(&MonospaceMetrics, &images, 1.0, &style());
        assert_eq!(bbox.height, 20);
    }

    #[test]
    fn test_pending_bitmap_draws_nothing() {
        let item = BitmapItem::new(1, "slow.png");
        let mut canvas = RecordingCanvas::new();
        item.draw(0, 0, 1.0, &mut canvas, &style(), &AlwaysPending);
        assert!(canvas.commands().is_empty());
    }
}
