pub mod error;
pub mod format;
pub mod hierarchy;
pub mod image;
pub mod notifier;
pub mod render;
pub mod resolver;
pub mod sources;

// Re-exports for easy access
pub use error::VizError;
pub use hierarchy::Hierarchy;
pub use image::{parse_images_json, Image, UNTAGGED};
pub use notifier::Notifier;
pub use render::{render, RenderMode, RenderOptions};
pub use sources::{DockerSource, NerdctlSource, SnapshotSource, Source};
