//! Document tree stored in an arena.
//!
//! Nodes own their children by index; the parent link is a plain
//! [`NodeId`] used to climb the tree while parsing and never owns anything.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Group,
    Block,
    Section,
    Text,
    TextBold,
    TextUnderline,
    List,
    ListItem,
    Space,
    Break,
}

impl NodeKind {
    /// Text-bearing kinds are joined with a [`NodeKind::Space`] across lines.
    pub fn is_text(self) -> bool {
        matches!(
            self,
            NodeKind::Text | NodeKind::TextBold | NodeKind::TextUnderline
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NodeKind::Group => "Group",
            NodeKind::Block => "Block",
            NodeKind::Section => "Section",
            NodeKind::Text => "Text",
            NodeKind::TextBold => "TextBold",
            NodeKind::TextUnderline => "TextUnderline",
            NodeKind::List => "List",
            NodeKind::ListItem => "ListItem",
            NodeKind::Space => "Space",
            NodeKind::Break => "Break",
        };
        f.write_str(label)
    }
}

/// Index of a node inside its [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
pub struct Node {
    kind: NodeKind,
    text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

#[derive(Debug, Clone, Default)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a node that is not attached to any parent yet.
    pub fn alloc(&mut self, kind: NodeKind, text: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            text: text.into(),
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Appends `child` as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `child` already has a parent.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        assert!(
            self.nodes[child.0].parent.is_none(),
            "node {child:?} is already attached"
        );
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.nodes[id.0].kind
    }

    pub fn text(&self, id: NodeId) -> &str {
        &self.nodes[id.0].text
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].children.last().copied()
    }

    /// A node without a parent is the root of its (sub)tree.
    pub fn is_root(&self, id: NodeId) -> bool {
        self.nodes[id.0].parent.is_none()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Borrowing view of `id` that prints an outline of its subtree.
    pub fn outline(&self, id: NodeId) -> Outline<'_> {
        Outline { tree: self, id }
    }

    fn write_outline(&self, f: &mut fmt::Formatter<'_>, id: NodeId) -> fmt::Result {
        let mut stack = vec![(id, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            let node = self.node(id);
            write!(f, "{:indent$}{}", "", node.kind, indent = depth * 2)?;
            if !node.text.is_empty() {
                write!(f, " {:?}", node.text)?;
            }
            writeln!(f)?;
            stack.extend(node.children.iter().rev().map(|&child| (child, depth + 1)));
        }
        Ok(())
    }
}

/// Indented text outline of a subtree, one node per line.
pub struct Outline<'a> {
    tree: &'a Tree,
    id: NodeId,
}

impl fmt::Display for Outline<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.tree.write_outline(f, self.id)
    }
}
