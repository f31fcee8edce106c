//! Parent/child index over a flat image list.
//!
//! The engine only records each image's parent. [`Hierarchy::build`] turns that
//! into the two things the tree walk needs: the images to start from and, for each
//! parent id, its direct children. Both keep the input order, which is what fixes
//! sibling order in the rendered tree.
//!
//! Images that no root leads to are kept aside as detached. With every parent
//! present in the list, that only happens when their parent links loop.

use crate::image::Image;
use log::trace;
use std::collections::{HashMap, HashSet};

#[derive(Debug)]
pub struct Hierarchy<'a> {
    roots: Vec<&'a Image>,
    children: HashMap<&'a str, Vec<&'a Image>>,
    detached: Vec<&'a Image>,
}

impl<'a> Hierarchy<'a> {
    /// Indexes `images` by parent id.
    ///
    /// Roots are images without a parent, plus orphans whose parent id names no
    /// image in the list. Both appear in their original positions.
    pub fn build(images: &'a [Image]) -> Self {
        let known: HashSet<&str> = images.iter().map(|image| image.id.as_str()).collect();

        let mut roots = Vec::new();
        let mut children: HashMap<&'a str, Vec<&'a Image>> = HashMap::new();

        for image in images {
            if image.is_root() {
                roots.push(image);
                continue;
            }

            if !known.contains(image.parent_id.as_str()) {
                trace!(
                    "Parent {} of image {} is not in the list, treating it as a root",
                    image.parent_id,
                    image.id
                );
                roots.push(image);
            }

            children
                .entry(image.parent_id.as_str())
                .or_default()
                .push(image);
        }

        let reachable = reachable_ids(&roots, &children);
        let detached: Vec<&'a Image> = images
            .iter()
            .filter(|image| !reachable.contains(image.id.as_str()))
            .collect();
        if !detached.is_empty() {
            trace!("{} images are not reachable from any root", detached.len());
        }

        Self {
            roots,
            children,
            detached,
        }
    }

    pub fn roots(&self) -> &[&'a Image] {
        &self.roots
    }

    /// Direct children of `id` in input order; empty for leaves.
    pub fn children_of(&self, id: &str) -> &[&'a Image] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Images no root leads to, in input order. They sit on or below a parent cycle.
    pub fn detached(&self) -> &[&'a Image] {
        &self.detached
    }
}

fn reachable_ids<'a>(
    roots: &[&'a Image],
    children: &HashMap<&'a str, Vec<&'a Image>>,
) -> HashSet<&'a str> {
    let mut seen = HashSet::new();
    let mut pending: Vec<&'a Image> = roots.to_vec();

    while let Some(image) = pending.pop() {
        if !seen.insert(image.id.as_str()) {
            continue;
        }
        if let Some(kids) = children.get(image.id.as_str()) {
            pending.extend(kids.iter().copied());
        }
    }

    seen
}
