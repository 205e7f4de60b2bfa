//! Core document model for slide shows: presentations made of slides made
//! of leveled items, the level-to-style mapping used when drawing, and the
//! layout that stacks items onto a scaled canvas.

pub mod accessor;
pub mod error;
pub mod geometry;
pub mod images;
pub mod item;
pub mod presentation;
pub mod render;
pub mod slide;
pub mod style;

pub use accessor::{Accessor, DemoAccessor};
pub use error::{Error, Result};
pub use geometry::Rect;
pub use images::{FsImageLoader, ImageHandle, ImageLoader, NoImages};
pub use item::{BitmapItem, ItemKind, SlideItem, TextItem};
pub use presentation::Presentation;
pub use render::{Canvas, DrawCommand, MonospaceMetrics, RecordingCanvas, TextMeasure, TextMetrics};
pub use slide::{Slide, REFERENCE_HEIGHT, REFERENCE_WIDTH};
pub use style::{Color, Font, Style, StyleTable};
