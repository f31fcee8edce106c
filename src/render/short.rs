use crate::image::{split_repo_tag, Image, UNTAGGED};
use log::warn;
use std::collections::BTreeMap;

/// Groups every tag by repository: one `repository: tag, tag` line per repository.
///
/// Repositories come out sorted by name; tags keep the order they were found in.
pub fn render_short(images: &[Image]) -> String {
    let mut by_repo: BTreeMap<&str, Vec<&str>> = BTreeMap::new();

    for image in images {
        for repo_tag in image.repo_tags.iter().filter(|tag| tag.as_str() != UNTAGGED) {
            match split_repo_tag(repo_tag) {
                Some((repo, tag)) => by_repo.entry(repo).or_default().push(tag),
                None => warn!("Skipping tag without a colon on image {}: {}", image.id, repo_tag),
            }
        }
    }

    let mut out = String::new();
    for (repo, tags) in &by_repo {
        out.push_str(&format!("{}: {}\n", repo, tags.join(", ")));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(out: &str) -> Vec<&str> {
        out.lines().collect()
    }

    #[test]
    fn test_groups_tags_by_repository() {
        let images = vec![Image::new("aaaaaaaaaaaa0000", "").with_tags([
            "myrepo:1.0",
            "myrepo:latest",
            "other:2.0",
        ])];

        let out = render_short(&images);
        let lines = lines(&out);
        assert_eq!(lines.len(), 2);
        assert!(lines.contains(&"myrepo: 1.0, latest"));
        assert!(lines.contains(&"other: 2.0"));
    }

    #[test]
    fn test_tags_collected_across_images() {
        let images = vec![
            Image::new("aaaaaaaaaaaa0000", "").with_tags(["app:1"]),
            Image::new("bbbbbbbbbbbb0000", ""),
            Image::new("cccccccccccc0000", "").with_tags(["app:2", "registry:5000/app:1"]),
        ];

        let out = render_short(&images);
        let lines = lines(&out);
        assert!(lines.contains(&"app: 1, 2"));
        assert!(lines.contains(&"registry:5000/app: 1"));
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_untagged_and_malformed_entries_skipped() {
        let images = vec![
            Image::new("aaaaaaaaaaaa0000", ""),
            Image::new("bbbbbbbbbbbb0000", "").with_tags(["no-colon", "ok:1"]),
        ];
        assert_eq!(render_short(&images), "ok: 1\n");
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(render_short(&[]), "");
    }
}
