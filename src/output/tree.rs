//! Indented site-map rendering
//!
//! Each node prints as `[<depth>] <url>` with the URL left-justified in a
//! fixed-width column, one column per depth level. The first child of a
//! node continues on the same line; later siblings start a new line padded
//! out to their column.

use crate::crawler::Page;
use std::fmt::Write;
use std::sync::Arc;

/// Renders one seed's page tree to a string
///
/// # Arguments
///
/// * `page` - The seed root to render
/// * `indent` - Column width per depth level
pub fn render_tree(page: &Arc<Page>, indent: usize) -> String {
    let mut out = String::new();
    render_into(page, indent, &mut out);
    out
}

/// Prints one seed's page tree to stdout
pub fn print_tree(page: &Arc<Page>, indent: usize) {
    print!("{}", render_tree(page, indent));
}

fn render_into(page: &Arc<Page>, indent: usize, out: &mut String) {
    if page.depth == 0 {
        out.push_str("\n\n");
    }

    let _ = write!(out, "[{}] {:<width$}", page.depth, page.url, width = indent);

    let children = page.children();
    for (i, child) in children.iter().enumerate() {
        if i != 0 {
            out.push('\n');
            let _ = write!(
                out,
                "{:width$}",
                "",
                width = indent * (page.depth as usize + 1)
            );
        }
        render_into(child, indent, out);
    }
}
