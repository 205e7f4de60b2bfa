//! Reading and writing slide shows as XML.
//!
//! ```text
//! <presentation>
//!   <showtitle>...</showtitle>
//!   <slide>
//!     <title>...</title>
//!     <item kind="text" level="1">...</item>
//!     <item kind="image" level="2">picture.jpg</item>
//!   </slide>
//! </presentation>
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use jabber_core::{
    Accessor, BitmapItem, Error, ItemKind, Presentation, Result, Slide, SlideItem, TextItem,
};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::tree::{self, Element};

/// Tag and attribute names of the show format.
mod names {
    pub const PRESENTATION: &str = "presentation";
    pub const SHOWTITLE: &str = "showtitle";
    pub const SLIDE: &str = "slide";
    pub const SLIDETITLE: &str = "title";
    pub const ITEM: &str = "item";
    pub const LEVEL: &str = "level";
    pub const KIND: &str = "kind";
    pub const TEXT: &str = "text";
    pub const IMAGE: &str = "image";
}

/// Level given to items whose `level` attribute is missing or not a number.
pub const DEFAULT_LEVEL: u32 = 1;

/// Document type declaration written at the top of saved files.
const DOCTYPE: &str = r#"presentation SYSTEM "jabberpoint.dtd""#;

/// Loads and saves presentations in the XML show format.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlAccessor;

impl XmlAccessor {
    /// Create a new XML accessor.
    pub fn new() -> Self {
        Self
    }

    /// Read a show from an in-memory document into `presentation`.
    ///
    /// Bad levels and unknown item kinds are logged and recovered; only
    /// document-level problems are returned.
    pub fn load_str(&self, presentation: &mut Presentation, content: &str) -> Result<()> {
        let root = tree::parse(content)?;
        if root.name != names::PRESENTATION {
            return Err(Error::InvalidDocument(format!(
                "expected <{}> as root element, found <{}>",
                names::PRESENTATION,
                root.name
            )));
        }

        match root.first_descendant(names::SHOWTITLE) {
            Some(title) => presentation.set_title(title.text_content()),
            None => log::debug!("Show has no <{}>", names::SHOWTITLE),
        }

        for xml_slide in root.descendants(names::SLIDE) {
            let mut slide = Slide::new();
            if let Some(title) = xml_slide.first_descendant(names::SLIDETITLE) {
                slide.set_title(title.text_content());
            }
            for xml_item in xml_slide.descendants(names::ITEM) {
                if let Some(item) = read_item(xml_item) {
                    slide.append_boxed(item);
                }
            }
            presentation.append(slide);
        }

        log::debug!("Loaded {} slides", presentation.len());
        Ok(())
    }

    /// Write `presentation` as an XML document to `out`.
    ///
    /// Items that have no XML representation are skipped with a warning.
    pub fn write_to<W: Write>(&self, presentation: &Presentation, out: W) -> Result<()> {
        let mut writer = Writer::new_with_indent(out, b' ', 2);

        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", None, None)))
            .map_err(write_error)?;
        writer
            .write_event(Event::DocType(BytesText::from_escaped(DOCTYPE)))
            .map_err(write_error)?;
        start(&mut writer, BytesStart::new(names::PRESENTATION))?;
        text_element(
            &mut writer,
            names::SHOWTITLE,
            presentation.title().unwrap_or_default(),
        )?;

        for slide in presentation.slides() {
            start(&mut writer, BytesStart::new(names::SLIDE))?;
            text_element(&mut writer, names::SLIDETITLE, slide.title())?;
            for item in slide.items() {
                write_item(&mut writer, item)?;
            }
            end(&mut writer, names::SLIDE)?;
        }

        end(&mut writer, names::PRESENTATION)?;
        writer.get_mut().write_all(b"\n")?;
        Ok(())
    }

    /// Render `presentation` as an XML string.
    pub fn to_string(&self, presentation: &Presentation) -> Result<String> {
        let mut buf = Vec::new();
        self.write_to(presentation, &mut buf)?;
        String::from_utf8(buf).map_err(|e| Error::XmlError(e.to_string()))
    }
}

impl Accessor for XmlAccessor {
    fn load_file(&self, presentation: &mut Presentation, path: &Path) -> Result<()> {
        log::debug!("Loading {}", path.display());
        let content = std::fs::read_to_string(path)?;
        self.load_str(presentation, &content)
    }

    fn save_file(&self, presentation: &Presentation, path: &Path) -> Result<()> {
        log::debug!("Saving {} slides to {}", presentation.len(), path.display());
        let mut out = BufWriter::new(File::create(path)?);
        self.write_to(presentation, &mut out)?;
        out.flush()?;
        Ok(())
    }
}

/// Build an item from an `<item>` element, or `None` if its kind is unknown.
fn read_item(element: &Element) -> Option<Box<dyn SlideItem>> {
    let level = read_level(element);
    let content = element.text_content();
    match element.attribute(names::KIND) {
        Some(names::TEXT) => Some(Box::new(TextItem::new(level, content))),
        Some(names::IMAGE) => Some(Box::new(BitmapItem::new(level, content))),
        Some(other) => {
            log::warn!("Unknown item kind {:?}, skipping item", other);
            None
        }
        None => {
            log::warn!("Item without {} attribute, skipping item", names::KIND);
            None
        }
    }
}

fn read_level(element: &Element) -> u32 {
    let Some(text) = element.attribute(names::LEVEL) else {
        log::warn!("Item without {}, using {}", names::LEVEL, DEFAULT_LEVEL);
        return DEFAULT_LEVEL;
    };
    text.trim().parse().unwrap_or_else(|e| {
        log::warn!(
            "Invalid {} {:?} ({}), using {}",
            names::LEVEL,
            text,
            e,
            DEFAULT_LEVEL
        );
        DEFAULT_LEVEL
    })
}

fn write_item<W: Write>(writer: &mut Writer<W>, item: &dyn SlideItem) -> Result<()> {
    let (kind, content) = match item.kind() {
        ItemKind::Text(text) => (names::TEXT, text),
        ItemKind::Bitmap(name) => (names::IMAGE, name),
        ItemKind::Unknown => {
            log::warn!("Ignoring {:?}: no XML representation", item);
            return Ok(());
        }
    };
    let level = item.level().to_string();
    let element = BytesStart::new(names::ITEM)
        .with_attributes([(names::KIND, kind), (names::LEVEL, level.as_str())]);
    start(writer, element)?;
    write_text(writer, content)?;
    end(writer, names::ITEM)
}

fn text_element<W: Write>(writer: &mut Writer<W>, name: &str, content: &str) -> Result<()> {
    start(writer, BytesStart::new(name))?;
    write_text(writer, content)?;
    end(writer, name)
}

fn start<W: Write>(writer: &mut Writer<W>, element: BytesStart) -> Result<()> {
    writer
        .write_event(Event::Start(element))
        .map_err(write_error)
}

fn write_text<W: Write>(writer: &mut Writer<W>, content: &str) -> Result<()> {
    writer
        .write_event(Event::Text(BytesText::new(content)))
        .map_err(write_error)
}

fn end<W: Write>(writer: &mut Writer<W>, name: &str) -> Result<()> {
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(write_error)
}

fn write_error(e: quick_xml::Error) -> Error {
    match e {
        quick_xml::Error::Io(io) => Error::IoError(std::io::Error::new(io.kind(), io.to_string())),
        other => Error::XmlError(other.to_string()),
    }
}
