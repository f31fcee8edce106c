use anyhow::Result;

use crate::image::Image;
use crate::notifier::Notifier;

/// Source trait for obtaining the full image list to visualize
pub trait Source {
    /// Returns the name of the source for identification purposes
    fn name(&self) -> &str;

    /// Returns every image the source knows about, intermediate layers included,
    /// in the order the source reports them. That order drives sibling order in
    /// the tree view.
    fn list_images(&self, notifier: &Notifier) -> Result<Vec<Image>>;
}
