//! Output rendering for completed crawl sessions

mod tree;

pub use tree::{print_tree, render_tree};
