use crate::image::Image;

const TAGGED_NODE_STYLE: &str = "shape=box,fillcolor=\"paleturquoise\",style=\"filled,rounded\"";

/// Renders the image list as a Graphviz `digraph`.
///
/// Roots hang off an invisible `base` node so the whole list lays out as one
/// graph. Tagged images get a labelled, filled box; untagged intermediate layers
/// keep Graphviz's default node style. Lines follow the input order.
pub fn render_dot(images: &[Image]) -> String {
    let mut out = String::from("digraph docker {\n");

    for image in images {
        if image.is_root() {
            out.push_str(&format!(" base -> \"{}\" [style=invis]\n", image.short_id()));
        } else {
            out.push_str(&format!(
                " \"{}\" -> \"{}\"\n",
                image.short_parent_id(),
                image.short_id()
            ));
        }

        if image.is_tagged() {
            out.push_str(&format!(
                " \"{}\" [label=\"{}\\n{}\",{}];\n",
                image.short_id(),
                image.short_id(),
                image.repo_tags.join("\\n"),
                TAGGED_NODE_STYLE
            ));
        }
    }

    out.push_str(" base [style=invisible]\n}\n");
    out
}
