//! Skin texture lookup.
//!
//! A skin is a directory of textures named by key (`inputoverlay-key.png`,
//! optionally `@2x`). Lookups return the texture key the renderer registers;
//! a missing file is not an error, the widget simply draws without it.

use log::debug;
use std::path::{Path, PathBuf};

const TEXTURE_EXTENSIONS: [&str; 2] = ["png", "jpg"];

#[derive(Debug, Clone, Default)]
pub struct Skin {
    root: Option<PathBuf>,
}

impl Skin {
    /// Skin without textures; every lookup misses.
    pub const fn none() -> Self {
        Self { root: None }
    }

    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        if dir.as_os_str().is_empty() {
            return Self::none();
        }
        Self {
            root: Some(dir.to_path_buf()),
        }
    }

    /// Resolves `key` to a file in the skin, preferring the high-resolution
    /// variant.
    pub fn texture_path(&self, key: &str) -> Option<PathBuf> {
        let root = self.root.as_ref()?;
        for suffix in ["@2x", ""] {
            for ext in TEXTURE_EXTENSIONS {
                let candidate = root.join(format!("{key}{suffix}.{ext}"));
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
        }
        debug!("Skin texture '{key}' not found under {}", root.display());
        None
    }

    /// Texture key to draw with, if the skin provides one.
    pub fn texture(&self, key: &str) -> Option<String> {
        self.texture_path(key)
            .map(|p| p.to_string_lossy().into_owned())
    }
}
