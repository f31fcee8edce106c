//! Where the image list comes from.
//!
//! - [`SnapshotSource`] — a JSON image list piped on stdin or stored in a file.
//! - [`DockerSource`] / [`NerdctlSource`] — a live listing through the engine CLI.
//!
//! [`select_source`] picks one the same way the command line does: an explicit
//! file wins, then piped stdin, then the engine.

mod docker;
mod engine;
mod nerdctl;
mod snapshot;
mod source;

pub use docker::DockerSource;
pub use engine::EngineCli;
pub use nerdctl::NerdctlSource;
pub use snapshot::SnapshotSource;
pub use source::Source;

use anyhow::Result;
use std::path::PathBuf;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EngineKind {
    Docker,
    Nerdctl,
}

/// Chooses the image source for one run.
///
/// `stdin_is_terminal` is passed in rather than probed so callers (and tests)
/// decide what counts as piped input.
pub fn select_source(
    input: Option<PathBuf>,
    stdin_is_terminal: bool,
    engine: EngineKind,
) -> Result<Box<dyn Source>> {
    if let Some(path) = input {
        return Ok(Box::new(SnapshotSource::file(path)));
    }

    if !stdin_is_terminal {
        return Ok(Box::new(SnapshotSource::stdin()));
    }

    let source: Box<dyn Source> = match engine {
        EngineKind::Docker => Box::new(DockerSource::new()?),
        EngineKind::Nerdctl => Box::new(NerdctlSource::new()?),
    };
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_file_wins() {
        let source =
            select_source(Some(PathBuf::from("images.json")), true, EngineKind::Docker).unwrap();
        assert_eq!(source.name(), "file");
    }

    #[test]
    fn test_piped_stdin_is_a_snapshot() {
        let source = select_source(None, false, EngineKind::Docker).unwrap();
        assert_eq!(source.name(), "stdin");
    }

    #[test]
    fn test_terminal_falls_back_to_engine() {
        let source = select_source(None, true, EngineKind::Docker).unwrap();
        assert_eq!(source.name(), "docker");
    }
}
