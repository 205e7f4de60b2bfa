//! XML backend for slide shows.
//!
//! Loads a show file into a [`jabber_core::Presentation`] and writes one
//! back out. Loading is best effort per item: bad levels fall back to a
//! default and unknown item kinds are skipped, while unreadable or
//! malformed files are reported to the caller.

pub mod accessor;
pub mod tree;

pub use accessor::{XmlAccessor, DEFAULT_LEVEL};
