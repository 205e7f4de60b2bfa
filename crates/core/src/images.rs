//! Two-phase image loading for bitmap items.
//!
//! An [`ImageLoader`] is asked for an image by name and hands back an
//! [`ImageHandle`] describing how far the load has got. Synchronous loaders
//! settle immediately; an asynchronous one may answer `Pending` until the
//! pixels arrive.

use std::path::{Path, PathBuf};

/// State of a requested image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageHandle {
    /// The load has been requested but has not finished.
    Pending,
    /// The image is available with the given intrinsic size in pixels.
    Ready { width: u32, height: u32 },
    /// The image could not be loaded.
    Failed,
}

impl ImageHandle {
    pub fn is_ready(&self) -> bool {
        matches!(self, ImageHandle::Ready { .. })
    }

    /// True once the load has either succeeded or failed.
    pub fn is_settled(&self) -> bool {
        !matches!(self, ImageHandle::Pending)
    }

    /// Intrinsic `(width, height)`, if the image is ready.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        match *self {
            ImageHandle::Ready { width, height } => Some((width, height)),
            _ => None,
        }
    }
}

/// Resolves image names from a show file to loaded images.
pub trait ImageLoader {
    /// Start (or finish) loading the image called `name`.
    fn request_load(&self, name: &str) -> ImageHandle;
}

/// Loads images from disk, resolving relative names against a base directory.
#[derive(Debug, Clone, Default)]
pub struct FsImageLoader {
    base_dir: PathBuf,
}

impl FsImageLoader {
    /// Create a loader resolving names relative to `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Create a loader for images referenced from the show file at `path`.
    pub fn for_show_file(path: &Path) -> Self {
        Self::new(path.parent().unwrap_or_else(|| Path::new("")))
    }

    fn resolve(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }
}

impl ImageLoader for FsImageLoader {
    fn request_load(&self, name: &str) -> ImageHandle {
        let path = self.resolve(name);
        match image::image_dimensions(&path) {
            Ok((width, height)) => {
                log::debug!("Loaded image {} ({}x{})", path.display(), width, height);
                ImageHandle::Ready { width, height }
            }
            Err(e) => {
                log::warn!("Cannot load image {}: {}", path.display(), e);
                ImageHandle::Failed
            }
        }
    }
}

/// A loader that never finds any image.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoImages;

impl ImageLoader for NoImages {
    fn request_load(&self, name: &str) -> ImageHandle {
        log::debug!("Image loading disabled, skipping {}", name);
        ImageHandle::Failed
    }
}
