use anyhow::Result;

use super::engine::EngineCli;
use super::Source;
use crate::image::Image;
use crate::notifier::Notifier;

/// Docker implementation of the Source trait
pub struct DockerSource {
    cli: EngineCli,
}

impl DockerSource {
    pub fn new() -> Result<Self> {
        Ok(Self {
            cli: EngineCli::new("docker"),
        })
    }
}

impl Source for DockerSource {
    fn name(&self) -> &str {
        self.cli.binary()
    }

    fn list_images(&self, notifier: &Notifier) -> Result<Vec<Image>> {
        self.cli.list_images(notifier)
    }
}
