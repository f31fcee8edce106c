use anyhow::Result;

use super::engine::EngineCli;
use super::Source;
use crate::image::Image;
use crate::notifier::Notifier;

pub struct NerdctlSource {
    cli: EngineCli,
}

impl NerdctlSource {
    /// Fails early when `nerdctl` is not installed.
    pub fn new() -> Result<Self> {
        let cli = EngineCli::new("nerdctl");
        cli.probe()?;
        Ok(Self { cli })
    }
}

impl Source for NerdctlSource {
    fn name(&self) -> &str {
        self.cli.binary()
    }

    fn list_images(&self, notifier: &Notifier) -> Result<Vec<Image>> {
        self.cli.list_images(notifier)
    }
}
