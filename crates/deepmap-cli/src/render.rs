//! Text rendering of change trees and records.

use colored::{ColoredString, Colorize};
use deepmap_diff::{ChangeKind, ChangeNode, ChangeRecord, LeafChange};

fn kind_label(kind: ChangeKind) -> ColoredString {
    match kind {
        ChangeKind::Created => "+ created".green(),
        ChangeKind::Updated => "~ updated".yellow(),
        ChangeKind::Deleted => "- deleted".red(),
        ChangeKind::Unchanged => "  unchanged".dimmed(),
    }
}

fn leaf_line(leaf: &LeafChange) -> String {
    format!("{} {}", kind_label(leaf.kind), leaf.data)
}

/// Render a change tree, one line per leaf, containers indented.
pub fn tree(node: &ChangeNode) -> String {
    let mut out = String::new();
    match node {
        ChangeNode::Leaf(leaf) => {
            out.push_str(&leaf_line(leaf));
            out.push('\n');
        }
        ChangeNode::Container(_) => write_entries(node, 0, &mut out),
    }
    out
}

fn write_entries(node: &ChangeNode, depth: usize, out: &mut String) {
    let Some(entries) = node.entries() else {
        return;
    };
    let indent = "  ".repeat(depth);
    for (key, child) in entries {
        match child {
            ChangeNode::Leaf(leaf) => {
                out.push_str(&format!("{indent}{}: {}\n", key.to_string().bold(), leaf_line(leaf)));
            }
            ChangeNode::Container(_) => {
                out.push_str(&format!("{indent}{}:\n", key.to_string().bold()));
                write_entries(child, depth + 1, out);
            }
        }
    }
}

/// Render changed paths, one per line.
pub fn records(records: &[ChangeRecord]) -> String {
    records
        .iter()
        .map(|r| format!("{} {} {}\n", kind_label(r.kind), r.path.to_string().cyan(), r.data))
        .collect()
}
