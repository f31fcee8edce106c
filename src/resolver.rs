use crate::error::VizError;
use crate::image::Image;
use log::debug;

/// Finds the image a tree render should start from.
///
/// An empty selector means "no particular root" and yields `Ok(None)`. Otherwise
/// the first image in list order that matches wins. A selector matches when it is
/// a prefix of the image id (full and 12-character ids included), or when it names
/// one of the image's tags. A selector without a tag gets `:latest` appended
/// before tags are compared, so `nginx` finds `nginx:latest`.
pub fn resolve_root<'a>(
    selector: Option<&str>,
    images: &'a [Image],
) -> Result<Option<&'a Image>, VizError> {
    let selector = match selector {
        Some(selector) if !selector.is_empty() => selector,
        _ => return Ok(None),
    };

    let repo_tag = with_default_tag(selector);
    debug!("Resolving root {} (as tag: {})", selector, repo_tag);

    images
        .iter()
        .find(|image| matches_image(image, selector, &repo_tag))
        .map(Some)
        .ok_or_else(|| VizError::RootNotFound {
            selector: selector.to_string(),
        })
}

fn matches_image(image: &Image, selector: &str, repo_tag: &str) -> bool {
    if image.id.starts_with(selector) {
        return true;
    }

    image.is_tagged() && image.repo_tags.iter().any(|tag| tag == repo_tag)
}

/// Appends `:latest` when the selector's last path segment carries no tag.
/// `registry:5000/app` counts as untagged; the port is not a tag.
fn with_default_tag(selector: &str) -> String {
    let last_segment = selector.rsplit('/').next().unwrap_or(selector);
    if last_segment.contains(':') {
        selector.to_string()
    } else {
        format!("{}:latest", selector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NGINX_ID: &str = "8dbd9e392a964056420e5d58ca5cc376ef18e2de93b5cc90e868a1bbc8318c1c";
    const BASE_ID: &str = "27cf784147099545f9e6a8b12ac6b2b2c7d1e7a10df1a6f0c1b2f1a2b3c4d5e6";
    const APP_ID: &str = "f00dbabe0000111122223333444455556666777788889999aaaabbbbccccdddd";

    fn images() -> Vec<Image> {
        vec![
            Image::new(BASE_ID, ""),
            Image::new(NGINX_ID, BASE_ID).with_tags(["nginx:latest", "nginx:1.25"]),
            Image::new(APP_ID, NGINX_ID).with_tags(["registry:5000/app:latest"]),
        ]
    }

    #[test]
    fn test_empty_selector_resolves_to_no_root() {
        let images = images();
        assert!(resolve_root(None, &images).unwrap().is_none());
        assert!(resolve_root(Some(""), &images).unwrap().is_none());
    }

    #[test]
    fn test_id_forms_resolve_to_same_image() {
        let images = images();
        for selector in [NGINX_ID, &NGINX_ID[..12], "8dbd", "nginx", "nginx:latest", "nginx:1.25"] {
            let found = resolve_root(Some(selector), &images).unwrap().unwrap();
            assert_eq!(found.id, NGINX_ID, "selector {}", selector);
        }
    }

    #[test]
    fn test_registry_port_is_not_a_tag() {
        let images = images();
        let found = resolve_root(Some("registry:5000/app"), &images)
            .unwrap()
            .unwrap();
        assert_eq!(found.id, APP_ID);
    }

    #[test]
    fn test_first_match_in_list_order_wins() {
        let images = vec![
            Image::new("abc111111111aaaa", ""),
            Image::new("abc222222222bbbb", ""),
        ];
        let found = resolve_root(Some("abc"), &images).unwrap().unwrap();
        assert_eq!(found.id, "abc111111111aaaa");
    }

    #[test]
    fn test_untagged_images_never_match_by_tag() {
        let images = vec![Image::new("aaaaaaaaaaaaaaaa", "")];
        let err = resolve_root(Some("<none>:<none>"), &images).unwrap_err();
        assert!(matches!(err, VizError::RootNotFound { .. }));
    }

    #[test]
    fn test_unknown_selector_names_selector() {
        let images = images();
        let err = resolve_root(Some("postgres"), &images).unwrap_err();
        match err {
            VizError::RootNotFound { selector } => assert_eq!(selector, "postgres"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_with_default_tag() {
        assert_eq!(with_default_tag("nginx"), "nginx:latest");
        assert_eq!(with_default_tag("nginx:1.25"), "nginx:1.25");
        assert_eq!(with_default_tag("localhost:5000/app"), "localhost:5000/app:latest");
        assert_eq!(with_default_tag("localhost:5000/app:2"), "localhost:5000/app:2");
    }
}
