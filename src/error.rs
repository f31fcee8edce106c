use thiserror::Error;

/// Failures raised by the rendering core.
///
/// Input acquisition (reading stdin, running the engine CLI) reports through
/// `anyhow` instead; these variants are the domain errors a caller may want
/// to match on.
#[derive(Debug, Error)]
pub enum VizError {
    #[error("Error reading JSON: {0}")]
    InvalidInput(#[from] serde_json::Error),

    #[error("Unable to find image {selector}.")]
    RootNotFound { selector: String },

    #[error("Please specify either --dot, --tree, or --short")]
    NoRenderMode,

    #[error("Image lineage below {id} is deeper than {depth} levels")]
    LineageTooDeep { id: String, depth: usize },

    #[error("{count} images have no root image; the parent links above {id} form a cycle")]
    ParentCycle { id: String, count: usize },
}

impl VizError {
    /// Usage errors come from how the tool was invoked rather than from its input.
    pub fn is_usage(&self) -> bool {
        matches!(self, VizError::RootNotFound { .. } | VizError::NoRenderMode)
    }
}
