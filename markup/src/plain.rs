//! Reader for descriptions that are not written in markup.
//!
//! Every non-blank line becomes one trimmed `Text` node; a run of blank
//! lines between two text lines becomes a single `Break`.

use crate::node::{NodeId, NodeKind, Tree};

/// Reads `text` into a new, detached `Group` of `tree`.
///
/// # Examples
///
/// ```
/// use mango_markup::{NodeKind, Tree, read_plain};
///
/// let mut tree = Tree::new();
/// let root = read_plain(&mut tree, "*not* bold\n\n1) not a list");
/// let kinds: Vec<_> = tree.children(root).iter().map(|&id| tree.kind(id)).collect();
/// assert_eq!(kinds, [NodeKind::Text, NodeKind::Break, NodeKind::Text]);
/// ```
pub fn read_plain(tree: &mut Tree, text: &str) -> NodeId {
    let group = tree.alloc(NodeKind::Group, "");
    let mut after_blank = false;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            after_blank = true;
            continue;
        }
        if after_blank && !tree.children(group).is_empty() {
            let brk = tree.alloc(NodeKind::Break, "");
            tree.attach(group, brk);
        }
        after_blank = false;

        let node = tree.alloc(NodeKind::Text, line);
        tree.attach(group, node);
    }

    group
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_are_trimmed_text() {
        let mut tree = Tree::new();
        let root = read_plain(&mut tree, "  first \n\tsecond");
        let texts: Vec<_> = tree.children(root).iter().map(|&id| tree.text(id)).collect();
        assert_eq!(texts, ["first", "second"]);
    }

    #[test]
    fn test_blank_runs_collapse_to_one_break() {
        let mut tree = Tree::new();
        let root = read_plain(&mut tree, "\n\na\n\n\n   \nb\n\n");
        assert_eq!(
            tree.outline(root).to_string(),
            "Group\n  Text \"a\"\n  Break\n  Text \"b\"\n"
        );
    }

    #[test]
    fn test_empty_input() {
        let mut tree = Tree::new();
        let root = read_plain(&mut tree, "");
        assert!(tree.children(root).is_empty());
        assert!(tree.is_root(root));
    }
}
