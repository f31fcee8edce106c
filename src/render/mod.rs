//! Output formats for an image list.
//!
//! Exactly one renderer runs per invocation:
//! - [`RenderMode::Tree`] — ASCII lineage tree, optionally rooted at one image ([`tree`]).
//! - [`RenderMode::Dot`] — Graphviz `digraph` description ([`dot`]).
//! - [`RenderMode::Short`] — `repository: tag, tag` summary ([`short`]).
//!
//! Every renderer returns the whole output as a `String`; nothing is written
//! until rendering has succeeded.

pub mod dot;
pub mod short;
pub mod tree;

use crate::error::VizError;
use crate::hierarchy::Hierarchy;
use crate::image::Image;
use crate::resolver;
use log::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderMode {
    Dot,
    /// Tree view, starting at the image named by the selector when one is given.
    Tree { root: Option<String> },
    Short,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Show full ids instead of 12-character prefixes in the tree.
    pub no_trunc: bool,
    /// Show each layer's own size instead of the cumulative virtual size in the tree.
    pub incremental: bool,
}

pub fn render(
    mode: &RenderMode,
    images: &[Image],
    options: RenderOptions,
) -> Result<String, VizError> {
    debug!("Rendering {} images as {:?}", images.len(), mode);

    match mode {
        RenderMode::Dot => Ok(dot::render_dot(images)),
        RenderMode::Short => Ok(short::render_short(images)),
        RenderMode::Tree { root } => {
            let start = resolver::resolve_root(root.as_deref(), images)?;
            let hierarchy = Hierarchy::build(images);
            match start {
                Some(image) => tree::render_tree(&[image], &hierarchy, options),
                None => {
                    if let Some(first) = hierarchy.detached().first() {
                        return Err(VizError::ParentCycle {
                            id: first.id.clone(),
                            count: hierarchy.detached().len(),
                        });
                    }
                    tree::render_tree(hierarchy.roots(), &hierarchy, options)
                }
            }
        }
    }
}
