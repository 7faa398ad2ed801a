//! Decorative background image cache
//!
//! The image is loaded off the render path and may arrive at any time, or never. The
//! renderer reads the slot every frame and falls back to a gradient while it is empty.
//! Filling is idempotent: the first image wins and later fills are ignored.

use std::fmt::Display;
use std::sync::{Arc, OnceLock};
use std::thread;

/// A loaded background image, identified by the source the host resolves when drawing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundImage {
    pub source: String,
}

/// Shared, fill-once slot for the background image
#[derive(Debug, Clone, Default)]
pub struct BackgroundSlot {
    image: Arc<OnceLock<BackgroundImage>>,
}

impl BackgroundSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<&BackgroundImage> {
        self.image.get()
    }

    pub fn is_ready(&self) -> bool {
        self.image.get().is_some()
    }

    /// Store `image` unless the slot is already filled. Returns whether it was stored.
    pub fn fill(&self, image: BackgroundImage) -> bool {
        let stored = self.image.set(image).is_ok();
        if stored {
            log::debug!("background image ready");
        }
        stored
    }

    /// Run `loader` on a background thread and fill the slot with its result.
    ///
    /// Loader errors are logged and dropped; the slot simply stays empty.
    pub fn load_with<F, E>(&self, loader: F) -> thread::JoinHandle<()>
    where
        F: FnOnce() -> Result<BackgroundImage, E> + Send + 'static,
        E: Display,
    {
        let slot = self.clone();
        thread::spawn(move || match loader() {
            Ok(image) => {
                slot.fill(image);
            }
            Err(e) => log::debug!("background image unavailable, using gradient: {}", e),
        })
    }
}
