//! Loading and saving presentations.

use std::path::Path;

use crate::error::{Error, Result};
use crate::item::BitmapItem;
use crate::presentation::Presentation;
use crate::slide::Slide;

/// Moves a [`Presentation`] to and from some storage.
///
/// Accessors keep no state between calls. `load_file` appends to whatever
/// the presentation already holds; callers clear it first for a fresh load.
/// On failure a load may leave the presentation partially filled.
pub trait Accessor {
    /// Read the show at `path` into `presentation`.
    fn load_file(&self, presentation: &mut Presentation, path: &Path) -> Result<()>;

    /// Write `presentation` to `path`.
    fn save_file(&self, presentation: &Presentation, path: &Path) -> Result<()>;
}

/// Image shown on the last demo slide.
pub const DEMO_IMAGE: &str = "JabberPoint.jpg";

/// Built-in demonstration show, used when no file is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoAccessor;

impl DemoAccessor {
    pub fn new() -> Self {
        Self
    }

    /// Fill `presentation` with the demo slides.
    pub fn populate(&self, presentation: &mut Presentation) {
        presentation.set_title("Demo Presentation");

        let mut slide = Slide::with_title("JabberPoint");
        slide.append_text(1, "The primitive slide show tool");
        slide.append_text(2, "Slides, levels and styles");
        slide.append_text(4, "Starting without a file name");
        slide.append_text(4, "shows this presentation");
        slide.append_text(1, "Navigation:");
        slide.append_text(3, "Next slide: PgDn or Enter");
        slide.append_text(3, "Previous slide: PgUp or up-arrow");
        slide.append_text(3, "Quit: q or Q");
        presentation.append(slide);

        let mut slide = Slide::with_title("Demonstration of levels and styles");
        slide.append_text(1, "Level 1");
        slide.append_text(2, "Level 2");
        slide.append_text(1, "Again level 1");
        slide.append_text(1, "Level 1 has style number 1");
        slide.append_text(2, "Level 2 has style number 2");
        slide.append_text(3, "This is how level 3 looks");
        slide.append_text(4, "And this is level 4");
        presentation.append(slide);

        let mut slide = Slide::with_title("The third slide");
        slide.append_text(1, "To open a new presentation,");
        slide.append_text(2, "use File->Open from the menu.");
        slide.append_text(1, " ");
        slide.append_text(1, "This is the end of the presentation.");
        slide.append(BitmapItem::new(1, DEMO_IMAGE));
        presentation.append(slide);
    }
}

impl Accessor for DemoAccessor {
    fn load_file(&self, presentation: &mut Presentation, path: &Path) -> Result<()> {
        log::debug!("Loading demo presentation (ignoring {})", path.display());
        self.populate(presentation);
        Ok(())
    }

    fn save_file(&self, _presentation: &Presentation, path: &Path) -> Result<()> {
        Err(Error::Unsupported(format!(
            "the demo presentation cannot be saved to {}",
            path.display()
        )))
    }
}
