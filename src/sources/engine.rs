//! Image listing through a container engine's command line.
//!
//! Docker and nerdctl share the same two-step flow:
//! 1. `<engine> image ls --all --quiet --no-trunc` for every image id,
//!    intermediate layers included;
//! 2. `<engine> image inspect <ids…>` (batched) for parent links, tags, sizes
//!    and creation time.
//!
//! Inspect output is translated field-for-field into [`Image`] records. Ids lose
//! their `sha256:` prefix so shortened ids show digest characters, and an engine
//! that no longer reports `VirtualSize` falls back to `Size`.

use anyhow::{anyhow, Context, Result};
use chrono::DateTime;
use log::{debug, trace, warn};
use serde::Deserialize;
use std::collections::HashSet;
use std::process::Command;

use crate::image::Image;
use crate::notifier::Notifier;

/// Ids passed to a single `image inspect` call.
const INSPECT_BATCH: usize = 200;

/// Hint shown when the tool itself runs in a container without the engine socket.
const IN_DOCKER_HINT: &str = "Unable to access Docker socket, please run like this:\n  docker run --rm -v /var/run/docker.sock:/var/run/docker.sock <image> [OPTIONS]\nFor more help, run with --help";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InspectedImage {
    id: String,
    #[serde(default)]
    parent: Option<String>,
    #[serde(default)]
    repo_tags: Option<Vec<String>>,
    #[serde(default)]
    size: u64,
    #[serde(default)]
    virtual_size: Option<u64>,
    #[serde(default)]
    created: Option<String>,
}

impl From<InspectedImage> for Image {
    fn from(inspected: InspectedImage) -> Self {
        let created = inspected
            .created
            .as_deref()
            .map(parse_created)
            .unwrap_or_default();
        let parent = inspected.parent.unwrap_or_default();

        Image::new(strip_digest_prefix(&inspected.id), strip_digest_prefix(&parent))
            .with_tags(inspected.repo_tags.unwrap_or_default())
            .with_sizes(
                inspected.virtual_size.unwrap_or(inspected.size),
                inspected.size,
            )
            .with_created(created)
    }
}

/// A container engine CLI (`docker`, `nerdctl`, …) reachable on `PATH`.
pub struct EngineCli {
    binary: &'static str,
}

impl EngineCli {
    pub fn new(binary: &'static str) -> Self {
        Self { binary }
    }

    pub fn binary(&self) -> &str {
        self.binary
    }

    /// Checks that the binary runs at all.
    pub fn probe(&self) -> Result<()> {
        let output = Command::new(self.binary)
            .arg("--version")
            .output()
            .with_context(|| {
                format!(
                    "Failed to execute {0} command. Is {0} installed?",
                    self.binary
                )
            })?;

        if !output.status.success() {
            return Err(anyhow!("{} is not available", self.binary));
        }

        Ok(())
    }

    pub fn list_images(&self, notifier: &Notifier) -> Result<Vec<Image>> {
        notifier.info(&format!("Listing images with {}...", self.binary));
        let listing = self
            .run_command(&["image", "ls", "--all", "--quiet", "--no-trunc"])
            .map_err(connection_error)?;

        let ids = unique_ids(&listing);
        debug!("{} reported {} images", self.binary, ids.len());
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut images = Vec::with_capacity(ids.len());
        for (batch_index, batch) in ids.chunks(INSPECT_BATCH).enumerate() {
            notifier.info(&format!(
                "Inspecting images {}/{}...",
                (batch_index * INSPECT_BATCH + batch.len()),
                ids.len()
            ));

            let mut args = vec!["image", "inspect"];
            args.extend(batch.iter().copied());
            let raw = self.run_command(&args).map_err(connection_error)?;

            images.extend(parse_inspect_output(&raw)?);
        }

        Ok(images)
    }

    fn run_command(&self, args: &[&str]) -> Result<String> {
        trace!("Running {} {:?}", self.binary, args);
        let output = Command::new(self.binary)
            .args(args)
            .output()
            .with_context(|| format!("Failed to execute {} command: {:?}", self.binary, args))?;

        if !output.status.success() {
            let error = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("{} command failed: {}", self.binary, error.trim()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

fn connection_error(err: anyhow::Error) -> anyhow::Error {
    if std::env::var_os("IN_DOCKER").is_some_and(|value| !value.is_empty()) {
        anyhow!(IN_DOCKER_HINT)
    } else {
        anyhow!("Unable to connect: {:#}\nFor help, run with --help", err)
    }
}

/// Image ids from `image ls --quiet` output, first occurrence kept.
///
/// The same id shows up once per tag, so duplicates are expected.
fn unique_ids(listing: &str) -> Vec<&str> {
    let mut seen = HashSet::new();
    listing
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|id| seen.insert(*id))
        .collect()
}

fn parse_inspect_output(raw: &str) -> Result<Vec<Image>> {
    let inspected: Vec<InspectedImage> =
        serde_json::from_str(raw).context("Failed to parse image inspect output")?;
    Ok(inspected.into_iter().map(Image::from).collect())
}

fn parse_created(created: &str) -> i64 {
    match DateTime::parse_from_rfc3339(created) {
        Ok(timestamp) => timestamp.timestamp(),
        Err(e) => {
            warn!("Unparseable image creation time {:?}: {}", created, e);
            0
        }
    }
}

fn strip_digest_prefix(id: &str) -> &str {
    id.strip_prefix("sha256:").unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::UNTAGGED;

    const INSPECT_OUTPUT: &str = r#"[
        {
            "Id": "sha256:8dbd9e392a964056420e5d58ca5cc376ef18e2de93b5cc90e868a1bbc8318c1c",
            "RepoTags": ["nginx:latest", "nginx:1.25"],
            "Parent": "sha256:27cf784147099545f9e6a8b12ac6b2b2c7d1e7a10df1a6f0c1b2f1a2b3c4d5e6",
            "Created": "2023-10-25T17:01:46.383494474Z",
            "Size": 187000000,
            "VirtualSize": 187500000,
            "Architecture": "amd64"
        },
        {
            "Id": "sha256:27cf784147099545f9e6a8b12ac6b2b2c7d1e7a10df1a6f0c1b2f1a2b3c4d5e6",
            "RepoTags": [],
            "Parent": "",
            "Created": "2023-10-20T00:00:00Z",
            "Size": 500000
        }
    ]"#;

    #[test]
    fn test_parse_inspect_output() {
        let images = parse_inspect_output(INSPECT_OUTPUT).unwrap();
        assert_eq!(images.len(), 2);

        let nginx = &images[0];
        assert_eq!(
            nginx.id,
            "8dbd9e392a964056420e5d58ca5cc376ef18e2de93b5cc90e868a1bbc8318c1c"
        );
        assert_eq!(nginx.short_parent_id(), "27cf78414709");
        assert_eq!(nginx.repo_tags, vec!["nginx:latest", "nginx:1.25"]);
        assert_eq!(nginx.virtual_size, 187500000);
        assert_eq!(nginx.size, 187000000);
        assert_eq!(nginx.created, 1698253306);

        let base = &images[1];
        assert!(base.is_root());
        assert_eq!(base.repo_tags, vec![UNTAGGED]);
        assert_eq!(base.virtual_size, 500000);
        assert_eq!(base.created, 1697760000);
    }

    #[test]
    fn test_unparseable_inspect_output() {
        assert!(parse_inspect_output("Error: no such image").is_err());
    }

    #[test]
    fn test_unique_ids_keeps_first_occurrence() {
        let listing = "sha256:aaa\nsha256:bbb\n\nsha256:aaa\n  sha256:ccc  \n";
        assert_eq!(
            unique_ids(listing),
            vec!["sha256:aaa", "sha256:bbb", "sha256:ccc"]
        );
    }

    #[test]
    fn test_parse_created() {
        assert_eq!(parse_created("1970-01-01T00:01:00Z"), 60);
        assert_eq!(parse_created("2023-10-20T02:00:00+02:00"), 1697760000);
        assert_eq!(parse_created("yesterday"), 0);
    }

    #[test]
    fn test_strip_digest_prefix() {
        assert_eq!(strip_digest_prefix("sha256:abc"), "abc");
        assert_eq!(strip_digest_prefix("abc"), "abc");
        assert_eq!(strip_digest_prefix(""), "");
    }

    #[test]
    fn test_missing_binary_fails_probe() {
        let cli = EngineCli::new("definitely-not-an-engine-binary");
        assert!(cli.probe().is_err());
        assert_eq!(cli.binary(), "definitely-not-an-engine-binary");
    }
}
