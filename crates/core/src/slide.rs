//! A slide: a title plus an ordered stack of items.

use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::images::ImageLoader;
use crate::item::{SlideItem, TextItem};
use crate::render::Canvas;
use crate::style::StyleTable;

/// Width of the design canvas that slides are laid out on.
pub const REFERENCE_WIDTH: i32 = 1200;

/// Height of the design canvas that slides are laid out on.
pub const REFERENCE_HEIGHT: i32 = 800;

/// One screen of content.
#[derive(Debug, Default)]
pub struct Slide {
    title: String,
    items: Vec<Box<dyn SlideItem>>,
}

impl Slide {
    /// Create an empty slide with an empty title.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty slide with the given title.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Add an item to the bottom of the slide.
    pub fn append(&mut self, item: impl SlideItem + 'static) {
        self.items.push(Box::new(item));
    }

    /// Add a boxed item to the bottom of the slide.
    pub fn append_boxed(&mut self, item: Box<dyn SlideItem>) {
        self.items.push(item);
    }

    /// Add a text line at `level`.
    pub fn append_text(&mut self, level: u32, text: impl Into<String>) {
        self.append(TextItem::new(level, text));
    }

    /// The item at `index`, in display order.
    pub fn slide_item(&self, index: usize) -> Result<&dyn SlideItem> {
        self.items
            .get(index)
            .map(|item| item.as_ref())
            .ok_or(Error::ItemOutOfRange {
                index,
                len: self.items.len(),
            })
    }

    /// All items in display order.
    pub fn items(&self) -> impl Iterator<Item = &dyn SlideItem> + '_ {
        self.items.iter().map(|item| item.as_ref())
    }

    /// Number of items, not counting the title.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Uniform factor mapping the design canvas onto `area` without
    /// distorting it.
    pub fn scale(area: Rect) -> f32 {
        let x_scale = area.width as f32 / REFERENCE_WIDTH as f32;
        let y_scale = area.height as f32 / REFERENCE_HEIGHT as f32;
        x_scale.min(y_scale)
    }

    /// Draw the title and then every item into `area`, stacking downwards.
    ///
    /// The title is drawn as a level 0 text line. Each item starts where the
    /// previous one's box ended. Items that cannot render (a missing image,
    /// say) take no space and do not stop the rest of the slide.
    pub fn draw<C: Canvas>(
        &self,
        canvas: &mut C,
        area: Rect,
        styles: &StyleTable,
        images: &dyn ImageLoader,
    ) {
        let scale = Self::scale(area);
        let title = TextItem::new(0, self.title.as_str());

        let mut y = area.y;
        y += draw_item(&title, area.x, y, scale, canvas, styles, images);
        for item in self.items() {
            y += draw_item(item, area.x, y, scale, canvas, styles, images);
        }
    }
}

/// Draw one item at `(x, y)` and return the height it took.
fn draw_item<C: Canvas>(
    item: &dyn SlideItem,
    x: i32,
    y: i32,
    scale: f32,
    canvas: &mut C,
    styles: &StyleTable,
    images: &dyn ImageLoader,
) -> i32 {
    let style = styles.style_for(item.level());
    item.draw(x, y, scale, &mut *canvas, style, images);
    item.bounding_box(&*canvas, images, scale, style).height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::tests::FixedImages;
    use crate::item::{BitmapItem, ItemKind};
    use crate::render::{DrawCommand, RecordingCanvas};

    #[test]
    fn test_scale() {
        assert_eq!(Slide::scale(Rect::from_size(600, 400)), 0.5);
        assert_eq!(Slide::scale(Rect::from_size(1200, 1000)), 1.0);
        assert_eq!(Slide::scale(Rect::from_size(2400, 800)), 1.0);
        assert_eq!(Slide::scale(Rect::new(50, 50, 2400, 1600)), 2.0);
    }

    #[test]
    fn test_append_preserves_order() {
        let mut slide = Slide::with_title("Intro");
        slide.append_text(1, "first");
        slide.append(BitmapItem::new(2, "pic.png"));
        slide.append_text(1, "third");

        assert_eq!(slide.len(), 3);
        let kinds: Vec<_> = slide.items().map(|item| item.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                ItemKind::Text("first"),
                ItemKind::Bitmap("pic.png"),
                ItemKind::Text("third"),
            ]
        );
    }

    #[test]
    fn test_slide_item_out_of_range() {
        let mut slide = Slide::new();
        slide.append_text(1, "only");
        assert_eq!(slide.slide_item(0).unwrap().level(), 1);
        assert!(matches!(
            slide.slide_item(1),
            Err(Error::ItemOutOfRange { index: 1, len: 1 })
        ));
    }

    #[test]
    fn test_new_slide_has_empty_title() {
        assert_eq!(Slide::new().title(), "");
        assert!(Slide::new().is_empty());
    }

    #[test]
    fn test_draw_stacks_items() {
        let mut slide = Slide::with_title("Title");
        slide.append_text(1, "One");
        slide.append_text(1, "Two");

        let mut canvas = RecordingCanvas::new();
        let styles = StyleTable::default();
        slide.draw(&mut canvas, Rect::from_size(1200, 800), &styles, &FixedImages::default());

        let ys: Vec<i32> = canvas
            .commands()
            .iter()
            .map(|command| match command {
                DrawCommand::Text { y, .. } => *y,
                DrawCommand::Image { dest, .. } => dest.y,
            })
            .collect();
        // Title: leading 20 + ascent 38.4, box 20 + 48 = 68.
        // Level 1: leading 10 + ascent 32, box 10 + 40 = 50.
        assert_eq!(ys, vec![58, 68 + 42, 68 + 50 + 42]);
    }

    #[test]
    fn test_draw_continues_past_missing_image() {
        let mut slide = Slide::with_title("Pictures");
        slide.append(BitmapItem::new(1, "missing.png"));
        slide.append(BitmapItem::new(1, "logo.png"));
        slide.append_text(1, "after");

        let images = FixedImages::with("logo.png", 100, 50);
        let mut canvas = RecordingCanvas::new();
        slide.draw(
            &mut canvas,
            Rect::from_size(1200, 800),
            &StyleTable::default(),
            &images,
        );

        let commands = canvas.commands();
        assert_eq!(commands.len(), 3);
        match &commands[1] {
            DrawCommand::Image { name, dest } => {
                assert_eq!(name, "logo.png");
                // Title box is 68 high; the missing image adds nothing.
                assert_eq!(*dest, Rect::new(20, 78, 100, 50));
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert!(matches!(&commands[2], DrawCommand::Text { text, .. } if text == "after"));
    }

    #[test]
    fn test_draw_honours_area_origin_and_scale() {
        let slide = Slide::with_title("Half");
        let mut canvas = RecordingCanvas::new();
        slide.draw(
            &mut canvas,
            Rect::new(100, 200, 600, 400),
            &StyleTable::default(),
            &FixedImages::default(),
        );

        match &canvas.commands()[0] {
            DrawCommand::Text { x, y, font, .. } => {
                assert_eq!(*x, 100);
                // 200 + leading 10 + ascent 19.2
                assert_eq!(*y, 229);
                assert_eq!(font.size, 24.0);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
