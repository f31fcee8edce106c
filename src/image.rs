//! Image records as reported by a container engine's image listing.
//!
//! [`Image`] mirrors the engine's JSON field names (`Id`, `ParentId`, `RepoTags`,
//! `VirtualSize`, `Size`, `Created`) so a snapshot produced by the engine API can
//! be fed straight into [`parse_images_json`].
//!
//! "No tags" is never an empty list: an untagged image carries exactly one
//! [`UNTAGGED`] entry, and every tag check looks at the first entry for it.
//! Deserialization enforces this for missing, `null` or empty `RepoTags`.

use crate::error::VizError;
use crate::format;
use serde::{Deserialize, Deserializer};

/// Sentinel tag the engine reports for images without a repository:tag.
pub const UNTAGGED: &str = "<none>:<none>";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Image {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(default, rename = "ParentId", deserialize_with = "null_as_empty")]
    pub parent_id: String,
    #[serde(
        default = "untagged",
        rename = "RepoTags",
        deserialize_with = "tags_or_untagged"
    )]
    pub repo_tags: Vec<String>,
    #[serde(default, rename = "VirtualSize")]
    pub virtual_size: u64,
    #[serde(default, rename = "Size")]
    pub size: u64,
    #[serde(default, rename = "Created")]
    pub created: i64,
}

fn untagged() -> Vec<String> {
    vec![UNTAGGED.to_string()]
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn tags_or_untagged<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Vec<String>>::deserialize(deserializer)? {
        Some(tags) if !tags.is_empty() => Ok(tags),
        _ => Ok(untagged()),
    }
}

impl Image {
    /// Creates an untagged, zero-sized record. Use the `with_*` methods to fill in the rest.
    pub fn new(id: impl Into<String>, parent_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent_id: parent_id.into(),
            repo_tags: untagged(),
            virtual_size: 0,
            size: 0,
            created: 0,
        }
    }

    /// Replaces the tag list. An empty list keeps the image untagged.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags: Vec<String> = tags.into_iter().map(Into::into).collect();
        self.repo_tags = if tags.is_empty() { untagged() } else { tags };
        self
    }

    pub fn with_sizes(mut self, virtual_size: u64, size: u64) -> Self {
        self.virtual_size = virtual_size;
        self.size = size;
        self
    }

    pub fn with_created(mut self, created: i64) -> Self {
        self.created = created;
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_empty()
    }

    /// True when the image carries at least one real repository:tag.
    pub fn is_tagged(&self) -> bool {
        self.repo_tags
            .first()
            .is_some_and(|first| first.as_str() != UNTAGGED)
    }

    pub fn short_id(&self) -> &str {
        format::truncate_id(&self.id)
    }

    pub fn short_parent_id(&self) -> &str {
        format::truncate_id(&self.parent_id)
    }

    /// The id as it should be displayed: full with `no_trunc`, shortened otherwise.
    pub fn display_id(&self, no_trunc: bool) -> &str {
        if no_trunc {
            &self.id
        } else {
            self.short_id()
        }
    }
}

/// Parses a JSON array of image records, e.g. the body of the engine's
/// `GET /images/json?all=1` response.
pub fn parse_images_json(raw: &[u8]) -> Result<Vec<Image>, VizError> {
    let images: Vec<Image> = serde_json::from_slice(raw)?;
    Ok(images)
}

/// Splits `repository:tag` at the last colon.
///
/// Registry hosts may carry a port (`registry:5000/app:1.0`), so only the final
/// colon separates the tag. Returns `None` when there is no colon at all.
pub fn split_repo_tag(repo_tag: &str) -> Option<(&str, &str)> {
    repo_tag
        .rfind(':')
        .map(|idx| (&repo_tag[..idx], &repo_tag[idx + 1..]))
}
