//! CLI tool for inspecting, rendering and converting slide shows.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jabber_core::{
    Accessor, DemoAccessor, DrawCommand, FsImageLoader, ItemKind, Presentation,
    RecordingCanvas, Rect, StyleTable, REFERENCE_HEIGHT, REFERENCE_WIDTH,
};
use jabber_xml::XmlAccessor;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Inspect, render and convert XML slide shows.
#[derive(Parser, Debug)]
#[command(name = "jabber")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the slides and items of a show (the demo show if no file is given)
    Outline {
        /// Show file (.xml)
        input: Option<PathBuf>,

        /// Print the outline as JSON
        #[arg(long)]
        json: bool,
    },

    /// Lay out one slide and print the resulting draw commands
    Render {
        /// Show file (.xml)
        input: Option<PathBuf>,

        /// 1-based slide number; out-of-range numbers go to the nearest slide
        #[arg(short, long, default_value = "1")]
        slide: usize,

        /// Width of the drawing area in pixels
        #[arg(long, default_value_t = REFERENCE_WIDTH)]
        width: i32,

        /// Height of the drawing area in pixels
        #[arg(long, default_value_t = REFERENCE_HEIGHT)]
        height: i32,

        /// JSON file with one style per level, replacing the built-in table
        #[arg(long)]
        styles: Option<PathBuf>,
    },

    /// Load a show and write it back out
    Save {
        /// Show file to read
        input: PathBuf,

        /// File to write
        output: PathBuf,
    },

    /// Write the built-in demo show as XML
    Demo {
        /// File to write
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    match &args.command {
        Command::Outline { input, json } => {
            let presentation = open(input.as_deref())?;
            let outline = Outline::from(&presentation);
            if *json {
                println!("{}", serde_json::to_string_pretty(&outline)?);
            } else {
                print!("{}", outline.to_text());
            }
        }
        Command::Render {
            input,
            slide,
            width,
            height,
            styles,
        } => {
            let styles = load_styles(styles.as_deref())?;
            let mut presentation = open(input.as_deref())?;
            let images = match input {
                Some(path) => FsImageLoader::for_show_file(path),
                None => FsImageLoader::new("."),
            };
            let area = Rect::from_size(*width, *height);
            print!("{}", render(&mut presentation, *slide, area, &styles, &images));
        }
        Command::Save { input, output } => {
            let presentation = open(Some(input.as_path()))?;
            XmlAccessor::new()
                .save_file(&presentation, output)
                .with_context(|| format!("Failed to save {}", output.display()))?;
            if args.verbose {
                eprintln!("Written to: {}", output.display());
            }
        }
        Command::Demo { output } => {
            let mut presentation = Presentation::new();
            DemoAccessor::new().populate(&mut presentation);
            XmlAccessor::new()
                .save_file(&presentation, output)
                .with_context(|| format!("Failed to save {}", output.display()))?;
        }
    }

    Ok(())
}

/// Load a show file, or the demo show when no file is given.
fn open(input: Option<&Path>) -> Result<Presentation> {
    let mut presentation = Presentation::new();
    match input {
        Some(path) => XmlAccessor::new()
            .load_file(&mut presentation, path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => DemoAccessor::new().load_file(&mut presentation, Path::new(""))?,
    }
    presentation.set_slide_number(0);

    log::debug!("Opened show with {} slides", presentation.len());
    Ok(presentation)
}

/// Read a style table from JSON, or use the built-in one.
fn load_styles(path: Option<&Path>) -> Result<StyleTable> {
    let Some(path) = path else {
        return Ok(StyleTable::default());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid style table in {}", path.display()))
}

/// Draw the given page of the show and describe every draw command.
fn render(
    presentation: &mut Presentation,
    page: usize,
    area: Rect,
    styles: &StyleTable,
    images: &FsImageLoader,
) -> String {
    let number = presentation.go_to_page(page);
    let Some(slide) = presentation.current_slide() else {
        return "No slides\n".to_string();
    };

    let mut canvas = RecordingCanvas::new();
    slide.draw(&mut canvas, area, styles, images);

    let mut output = format!("Slide {} of {}\n", number + 1, presentation.len());
    for command in canvas.commands() {
        let line = match command {
            DrawCommand::Text {
                x,
                y,
                text,
                font,
                color,
            } => format!(
                "text  {:>5} {:>5}  {} {:.1}pt #{:02x}{:02x}{:02x}  {}",
                x, y, font.family, font.size, color.r, color.g, color.b, text
            ),
            DrawCommand::Image { name, dest } => format!(
                "image {:>5} {:>5}  {}x{}  {}",
                dest.x, dest.y, dest.width, dest.height, name
            ),
        };
        output.push_str(&line);
        output.push('\n');
    }
    output
}

/// Deeper levels are printed at this depth.
const MAX_OUTLINE_DEPTH: u32 = 16;

/// Serializable summary of a show.
#[derive(Debug, Serialize)]
struct Outline {
    title: Option<String>,
    slides: Vec<OutlineSlide>,
}

#[derive(Debug, Serialize)]
struct OutlineSlide {
    title: String,
    items: Vec<OutlineItem>,
}

#[derive(Debug, Serialize)]
struct OutlineItem {
    kind: &'static str,
    level: u32,
    content: String,
}

impl From<&Presentation> for Outline {
    fn from(presentation: &Presentation) -> Self {
        let slides = presentation
            .slides()
            .iter()
            .map(|slide| OutlineSlide {
                title: slide.title().to_string(),
                items: slide
                    .items()
                    .filter_map(|item| {
                        let (kind, content) = match item.kind() {
                            ItemKind::Text(text) => ("text", text),
                            ItemKind::Bitmap(name) => ("image", name),
                            ItemKind::Unknown => return None,
                        };
                        Some(OutlineItem {
                            kind,
                            level: item.level(),
                            content: content.to_string(),
                        })
                    })
                    .collect(),
            })
            .collect();

        Self {
            title: presentation.title().map(str::to_string),
            slides,
        }
    }
}

impl Outline {
    fn to_text(&self) -> String {
        let mut output = String::new();
        if let Some(title) = &self.title {
            output.push_str(&format!("{}\n", title));
        }
        for (number, slide) in self.slides.iter().enumerate() {
            output.push_str(&format!("\n{}. {}\n", number + 1, slide.title));
            for item in &slide.items {
                let indent = "  ".repeat(item.level.min(MAX_OUTLINE_DEPTH) as usize + 1);
                match item.kind {
                    "image" => output.push_str(&format!("{}[image] {}\n", indent, item.content)),
                    _ => output.push_str(&format!("{}{}\n", indent, item.content)),
                }
            }
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo() -> Presentation {
        open(None).unwrap()
    }

    #[test]
    fn test_outline_text() {
        let text = Outline::from(&demo()).to_text();
        assert!(text.starts_with("Demo Presentation\n"));
        assert!(text.contains("\n1. JabberPoint\n"));
        assert!(text.contains("    Level 1\n"));
        assert!(text.contains("[image] JabberPoint.jpg"));
    }

    #[test]
    fn test_outline_json() {
        let json = serde_json::to_value(Outline::from(&demo())).unwrap();
        assert_eq!(json["slides"].as_array().unwrap().len(), 3);
        assert_eq!(json["slides"][1]["items"][0]["kind"], "text");
        assert_eq!(json["slides"][1]["items"][0]["level"], 1);
    }

    #[test]
    fn test_render_clamps_page() {
        let mut presentation = demo();
        let output = render(
            &mut presentation,
            42,
            Rect::from_size(600, 400),
            &StyleTable::default(),
            &FsImageLoader::new("does-not-exist"),
        );
        assert!(output.starts_with("Slide 3 of 3\n"));
        assert!(output.contains("The third slide"));
        // The demo image is missing, so only text is drawn.
        assert!(!output.contains("image "));
    }

    #[test]
    fn test_render_empty_show() {
        let mut presentation = Presentation::new();
        let output = render(
            &mut presentation,
            1,
            Rect::from_size(1200, 800),
            &StyleTable::default(),
            &FsImageLoader::new("."),
        );
        assert_eq!(output, "No slides\n");
    }

    #[test]
    fn test_load_styles_from_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("styles.json");
        std::fs::write(
            &path,
            r#"[{"indent": 0, "color": {"r": 1, "g": 2, "b": 3}, "font_size": 12.0, "leading": 4}]"#,
        )
        .unwrap();

        let styles = load_styles(Some(&path)).unwrap();
        assert_eq!(styles.len(), 1);
        assert_eq!(styles.style_for(3).font_size, 12.0);
        assert_eq!(styles.style_for(0).font_family, "Helvetica");

        std::fs::write(&path, "[]").unwrap();
        assert!(load_styles(Some(&path)).is_err());
    }

    #[test]
    fn test_outline_indent_is_capped() {
        let mut presentation = Presentation::new();
        let mut slide = jabber_core::Slide::with_title("Deep");
        slide.append_text(u32::MAX, "bottom");
        presentation.append(slide);

        let text = Outline::from(&presentation).to_text();
        let indent = "  ".repeat(MAX_OUTLINE_DEPTH as usize + 1);
        assert!(text.contains(&format!("\n{}bottom\n", indent)));
    }
}
