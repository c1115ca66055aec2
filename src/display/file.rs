use super::DisplaySink;
use anyhow::{Context, Result};
use image::RgbImage;
use std::fs;
use std::path::{Path, PathBuf};

/// Headless display sink that saves frames as numbered PNG files
///
/// Frames land in the configured directory as `NN-window-title.png` in the
/// order they are shown, so a run without a graphical environment still
/// produces every intermediate view.
pub struct DirectorySink {
    dir: PathBuf,
    frame_index: usize,
}

impl DirectorySink {
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

        Ok(Self {
            dir,
            frame_index: 0,
        })
    }

    fn slug(window: &str) -> String {
        window
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_lowercase()
                } else {
                    '-'
                }
            })
            .collect()
    }
}

impl DisplaySink for DirectorySink {
    fn show(&mut self, window: &str, frame: &RgbImage) -> Result<()> {
        self.frame_index += 1;
        let path = self
            .dir
            .join(format!("{:02}-{}.png", self.frame_index, Self::slug(window)));

        frame
            .save(&path)
            .with_context(|| format!("Failed to save frame to {}", path.display()))?;

        tracing::debug!("Saved '{}' to {}", window, path.display());
        Ok(())
    }

    fn wait_for_key(&mut self) -> Result<()> {
        // Nothing to wait on without a window
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_window_titles() {
        assert_eq!(DirectorySink::slug("Definite Background"), "definite-background");
        assert_eq!(DirectorySink::slug("GrabCut Mask"), "grabcut-mask");
        assert_eq!(DirectorySink::slug("Input"), "input");
    }
}
