//! The whole show: slides, a title and the slide being shown.

use crate::error::{Error, Result};
use crate::slide::Slide;

/// An ordered list of slides plus a cursor on the current one.
///
/// The cursor always points at an existing slide when there are any, and
/// is 0 otherwise. Every operation that changes the slide list re-clamps it.
#[derive(Debug, Default)]
pub struct Presentation {
    title: Option<String>,
    slides: Vec<Slide>,
    current: usize,
}

impl Presentation {
    /// Create an empty presentation.
    pub fn new() -> Self {
        Self::default()
    }

    /// The show title, if one has been set.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Drop all slides, unset the title and reset the cursor.
    pub fn clear(&mut self) {
        self.title = None;
        self.slides.clear();
        self.current = 0;
    }

    /// Add a slide after the last one.
    pub fn append(&mut self, slide: Slide) {
        self.slides.push(slide);
        self.clamp_cursor();
    }

    /// Remove and return the slide at `index`.
    pub fn remove_slide(&mut self, index: usize) -> Result<Slide> {
        if index >= self.slides.len() {
            return Err(self.out_of_range(index));
        }
        let slide = self.slides.remove(index);
        self.clamp_cursor();
        Ok(slide)
    }

    pub fn slide(&self, index: usize) -> Result<&Slide> {
        self.slides.get(index).ok_or(self.out_of_range(index))
    }

    pub fn slide_mut(&mut self, index: usize) -> Result<&mut Slide> {
        let err = self.out_of_range(index);
        self.slides.get_mut(index).ok_or(err)
    }

    /// All slides in show order.
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Number of slides.
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Index of the slide being shown.
    pub fn slide_number(&self) -> usize {
        self.current
    }

    /// The slide being shown, if there is one.
    pub fn current_slide(&self) -> Option<&Slide> {
        self.slides.get(self.current)
    }

    /// Move the cursor to `number`, saturating at the first and last slide.
    /// Returns the new cursor.
    pub fn set_slide_number(&mut self, number: usize) -> usize {
        self.current = number;
        self.clamp_cursor();
        log::debug!("Showing slide {} of {}", self.current + 1, self.len());
        self.current
    }

    /// Advance to the next slide; stays put on the last one.
    pub fn next_slide(&mut self) -> usize {
        self.set_slide_number(self.current.saturating_add(1))
    }

    /// Go back to the previous slide; stays put on the first one.
    pub fn prev_slide(&mut self) -> usize {
        self.set_slide_number(self.current.saturating_sub(1))
    }

    /// Jump to a 1-based page number as typed by a user. Page 0 goes to the
    /// first slide and pages past the end go to the last.
    pub fn go_to_page(&mut self, page: usize) -> usize {
        self.set_slide_number(page.saturating_sub(1))
    }

    fn clamp_cursor(&mut self) {
        self.current = self.current.min(self.slides.len().saturating_sub(1));
    }

    fn out_of_range(&self, index: usize) -> Error {
        Error::SlideOutOfRange {
            index,
            len: self.slides.len(),
        }
    }
}
