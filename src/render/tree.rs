use super::RenderOptions;
use crate::error::VizError;
use crate::format::human_size;
use crate::hierarchy::Hierarchy;
use crate::image::Image;

/// Deepest lineage the tree walk will follow before giving up.
///
/// Real images stay far below this. Starting the walk inside a parent cycle hits it.
pub const MAX_TREE_DEPTH: usize = 1024;

const BRANCH: &str = "├─";
const LAST_BRANCH: &str = "└─";
const GUIDE: &str = "│ ";
const NO_GUIDE: &str = "  ";

struct Frame<'a> {
    image: &'a Image,
    indent: String,
    is_last: bool,
    depth: usize,
}

/// Renders `start` and everything below it as a box-drawing tree.
///
/// The walk is depth-first and pre-order. Siblings keep the order the hierarchy
/// gives them; the last one is drawn with `└─` and its subtree loses the `│` guide.
pub fn render_tree(
    start: &[&Image],
    hierarchy: &Hierarchy<'_>,
    options: RenderOptions,
) -> Result<String, VizError> {
    let mut out = String::new();
    let mut stack: Vec<Frame<'_>> = Vec::new();
    push_siblings(&mut stack, start, "", 0);

    while let Some(frame) = stack.pop() {
        let (connector, guide) = if frame.is_last {
            (LAST_BRANCH, NO_GUIDE)
        } else {
            (BRANCH, GUIDE)
        };

        out.push_str(&frame.indent);
        out.push_str(connector);
        write_node(&mut out, frame.image, options);

        let children = hierarchy.children_of(&frame.image.id);
        if children.is_empty() {
            continue;
        }
        if frame.depth + 1 >= MAX_TREE_DEPTH {
            return Err(VizError::LineageTooDeep {
                id: frame.image.id.clone(),
                depth: MAX_TREE_DEPTH,
            });
        }

        let indent = format!("{}{}", frame.indent, guide);
        push_siblings(&mut stack, children, &indent, frame.depth + 1);
    }

    Ok(out)
}

// Pushed in reverse so the first sibling is popped first.
fn push_siblings<'a>(
    stack: &mut Vec<Frame<'a>>,
    siblings: &[&'a Image],
    indent: &str,
    depth: usize,
) {
    let count = siblings.len();
    for (index, image) in siblings.iter().enumerate().rev() {
        stack.push(Frame {
            image: *image,
            indent: indent.to_string(),
            is_last: index + 1 == count,
            depth,
        });
    }
}

fn write_node(out: &mut String, image: &Image, options: RenderOptions) {
    let (label, size) = if options.incremental {
        ("Size", image.size)
    } else {
        ("Virtual Size", image.virtual_size)
    };

    out.push_str(&format!(
        "{} {}: {}",
        image.display_id(options.no_trunc),
        label,
        human_size(size)
    ));

    if image.is_tagged() {
        out.push_str(&format!(" Tags: {}\n", image.repo_tags.join(", ")));
    } else {
        out.push('\n');
    }
}
