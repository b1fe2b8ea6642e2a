//! Tree rendering.
//!
//! Renders a node and its descendants the way the `tree` command renders
//! directories. Read-only: rendering never ticks a node.

use std::fmt::{self, Write};

use crate::{Node, NodeKind};

/// Renders the subtree rooted at `root`.
///
/// ```text
/// Fallback
/// ├── Sequence
/// │   ├── Conditional: door open
/// │   └── Task: walk through
/// └── Task: knock
/// ```
pub fn render(root: &dyn Node) -> String {
    TreeDisplay(root).to_string()
}

/// [`fmt::Display`] adapter over a node.
pub struct TreeDisplay<'a>(pub &'a dyn Node);

impl fmt::Display for TreeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", node_label(self.0))?;
        write_children(f, self.0, "")
    }
}

fn write_children(f: &mut fmt::Formatter<'_>, node: &dyn Node, prefix: &str) -> fmt::Result {
    let children = node.children();
    for (i, child) in children.iter().enumerate() {
        let last = i + 1 == children.len();
        let (branch, indent) = if last {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };

        writeln!(f, "{prefix}{branch}{}", node_label(child.as_ref()))?;

        let mut nested = String::with_capacity(prefix.len() + indent.len());
        nested.push_str(prefix);
        nested.push_str(indent);
        write_children(f, child.as_ref(), &nested)?;
    }
    Ok(())
}

fn node_label(node: &dyn Node) -> String {
    let mut label = match node.kind() {
        NodeKind::Task => String::from("Task"),
        NodeKind::Conditional => String::from("Conditional"),
        NodeKind::Sequence => String::from("Sequence"),
        NodeKind::Fallback => String::from("Fallback"),
        NodeKind::Parallel { threshold } => format!("Parallel({threshold})"),
        NodeKind::Decorator { transforms: true } => String::from("Decorator"),
        NodeKind::Decorator { transforms: false } => String::from("Label"),
        NodeKind::Dynamic => String::from("Dynamic"),
    };

    if let Some(name) = node.name() {
        let _ = write!(label, ": {name}");
    }

    label
}
