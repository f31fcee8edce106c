use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;

use super::Source;
use crate::image::{parse_images_json, Image};
use crate::notifier::Notifier;

/// Reads a pre-serialized JSON image list, from stdin or from a file.
///
/// The expected shape is the engine API's image list: an array of objects with
/// `Id`, `ParentId`, `RepoTags`, `VirtualSize`, `Size` and `Created`.
pub struct SnapshotSource {
    path: Option<PathBuf>,
}

impl SnapshotSource {
    pub fn stdin() -> Self {
        Self { path: None }
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Reads the whole of `reader` and parses it as an image list.
    pub fn read_from<R: Read>(mut reader: R) -> Result<Vec<Image>> {
        let mut raw = Vec::new();
        reader
            .read_to_end(&mut raw)
            .context("Error reading all input")?;

        Ok(parse_images_json(&raw)?)
    }
}

impl Source for SnapshotSource {
    fn name(&self) -> &str {
        match self.path {
            Some(_) => "file",
            None => "stdin",
        }
    }

    fn list_images(&self, notifier: &Notifier) -> Result<Vec<Image>> {
        let images = match &self.path {
            Some(path) => {
                notifier.info(&format!("Reading image snapshot from {}...", path.display()));
                if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                    notifier.warn(&format!(
                        "{} does not have a .json extension, parsing it anyway",
                        path.display()
                    ));
                }
                let file = File::open(path)
                    .with_context(|| format!("Failed to open snapshot {}", path.display()))?;
                Self::read_from(file)
                    .with_context(|| format!("Invalid snapshot {}", path.display()))?
            }
            None => {
                notifier.info("Reading image snapshot from stdin...");
                Self::read_from(io::stdin().lock())?
            }
        };

        notifier.debug(&format!("Snapshot holds {} images", images.len()));
        Ok(images)
    }
}
