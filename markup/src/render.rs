//! Tree walk dispatching node kinds to an output backend.

use crate::node::{NodeId, NodeKind, Tree};

/// Output backend driven by [`render`].
///
/// Composite kinds get a start/end pair around their children; leaf kinds get
/// a single call. `list_start`, `list_end` and `space` default to no output.
pub trait Renderer {
    /// `is_root` is true for the document root, which is never wrapped.
    fn group_start(&mut self, is_root: bool);
    fn group_end(&mut self, is_root: bool);

    fn block_start(&mut self);
    fn block_end(&mut self);

    fn list_start(&mut self) {}
    fn list_end(&mut self) {}

    /// `label` is the item's word or `*`.
    fn list_item(&mut self, label: &str);

    fn section(&mut self, title: &str);
    fn text(&mut self, text: &str);
    fn text_bold(&mut self, text: &str);
    fn text_underline(&mut self, text: &str);

    fn space(&mut self) {}

    fn paragraph_break(&mut self);
}

/// One pending step of the walk.
enum Step {
    Enter(NodeId),
    Leave(NodeId),
}

/// Renders `id` and its subtree.
pub fn render<R: Renderer + ?Sized>(renderer: &mut R, tree: &Tree, id: NodeId) {
    walk(renderer, tree, vec![Step::Enter(id)]);
}

/// Renders the children of `id` in order, without `id` itself.
pub fn render_children<R: Renderer + ?Sized>(renderer: &mut R, tree: &Tree, id: NodeId) {
    let steps = tree.children(id).iter().rev().map(|&child| Step::Enter(child));
    walk(renderer, tree, steps.collect());
}

// Nesting depth follows the input's indentation, so the walk keeps its own
// stack instead of recursing.
fn walk<R: Renderer + ?Sized>(renderer: &mut R, tree: &Tree, mut stack: Vec<Step>) {
    while let Some(step) = stack.pop() {
        let id = match step {
            Step::Enter(id) => id,
            Step::Leave(id) => {
                leave(renderer, tree, id);
                continue;
            }
        };

        let text = tree.text(id);
        let composite = match tree.kind(id) {
            NodeKind::Group => {
                renderer.group_start(tree.is_root(id));
                true
            }
            NodeKind::Block => {
                renderer.block_start();
                true
            }
            NodeKind::List => {
                renderer.list_start();
                true
            }
            NodeKind::ListItem => {
                renderer.list_item(text);
                true
            }
            NodeKind::Section => {
                renderer.section(text);
                true
            }
            NodeKind::Text => {
                renderer.text(text);
                false
            }
            NodeKind::TextBold => {
                renderer.text_bold(text);
                false
            }
            NodeKind::TextUnderline => {
                renderer.text_underline(text);
                false
            }
            NodeKind::Space => {
                renderer.space();
                false
            }
            NodeKind::Break => {
                renderer.paragraph_break();
                false
            }
        };

        if composite {
            stack.push(Step::Leave(id));
            stack.extend(tree.children(id).iter().rev().map(|&child| Step::Enter(child)));
        }
    }
}

fn leave<R: Renderer + ?Sized>(renderer: &mut R, tree: &Tree, id: NodeId) {
    match tree.kind(id) {
        NodeKind::Group => renderer.group_end(tree.is_root(id)),
        NodeKind::Block => renderer.block_end(),
        NodeKind::List => renderer.list_end(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Parser, Tokenizer};

    /// Records every call as a short event string.
    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl Renderer for Recorder {
        fn group_start(&mut self, is_root: bool) {
            self.events.push(format!("group({is_root})"));
        }
        fn group_end(&mut self, is_root: bool) {
            self.events.push(format!("/group({is_root})"));
        }
        fn block_start(&mut self) {
            self.events.push("block".into());
        }
        fn block_end(&mut self) {
            self.events.push("/block".into());
        }
        fn list_item(&mut self, label: &str) {
            self.events.push(format!("item {label}"));
        }
        fn section(&mut self, title: &str) {
            self.events.push(format!("section {title}"));
        }
        fn text(&mut self, text: &str) {
            self.events.push(format!("text {text:?}"));
        }
        fn text_bold(&mut self, text: &str) {
            self.events.push(format!("bold {text:?}"));
        }
        fn text_underline(&mut self, text: &str) {
            self.events.push(format!("underline {text:?}"));
        }
        fn space(&mut self) {
            self.events.push("space".into());
        }
        fn paragraph_break(&mut self) {
            self.events.push("break".into());
        }
    }

    fn events(input: &str) -> Vec<String> {
        let tokens = Tokenizer::new().tokenize_str(input);
        let mut parser = Parser::new();
        let root = parser.parse(&tokens).unwrap();
        let mut recorder = Recorder::default();
        render(&mut recorder, parser.tree(), root);
        recorder.events
    }

    #[test]
    fn test_plain_sentence_renders_one_text() {
        assert_eq!(
            events("A plain sentence."),
            vec!["group(true)", "text \"A plain sentence.\"", "/group(true)"]
        );
    }

    #[test]
    fn test_composites_wrap_children() {
        assert_eq!(
            events("*) one\n\n> code"),
            vec![
                "group(true)",
                "item *",
                "text \"one\"",
                "break",
                "block",
                "text \"code\"",
                "/block",
                "/group(true)",
            ]
        );
    }

    #[test]
    fn test_section_children_follow_heading() {
        assert_eq!(
            events("Usage\n-----\nrun _it_\nnow"),
            vec![
                "group(true)",
                "section Usage",
                "text \"run \"",
                "underline \"it\"",
                "space",
                "text \"now\"",
                "/group(true)",
            ]
        );
    }

    #[test]
    fn test_nested_group_is_not_root() {
        let events = events("top\n    > inner");
        assert!(events.contains(&"group(false)".to_string()));
        assert!(events.contains(&"/group(false)".to_string()));
    }

    #[test]
    fn test_render_children_skips_parent() {
        let tokens = Tokenizer::new().tokenize_str("1) a");
        let mut parser = Parser::new();
        let root = parser.parse(&tokens).unwrap();
        let mut recorder = Recorder::default();
        render_children(&mut recorder, parser.tree(), root);
        assert_eq!(recorder.events, vec!["item 1", "text \"a\""]);
    }

    #[test]
    fn test_deep_indentation_renders_balanced() {
        let input = format!("{}x", "\t".repeat(100_000));
        let events = events(&input);

        let opened = events.iter().filter(|e| *e == "group(false)").count();
        let closed = events.iter().filter(|e| *e == "/group(false)").count();
        assert_eq!(opened, 100_000);
        assert_eq!(closed, 100_000);
        assert_eq!(events.last().map(String::as_str), Some("/group(true)"));
    }

    #[test]
    fn test_list_start_and_end_bracket_items() {
        #[derive(Default)]
        struct Lists(Vec<&'static str>);

        impl Renderer for Lists {
            fn group_start(&mut self, _: bool) {}
            fn group_end(&mut self, _: bool) {}
            fn block_start(&mut self) {}
            fn block_end(&mut self) {}
            fn list_start(&mut self) {
                self.0.push("list");
            }
            fn list_end(&mut self) {
                self.0.push("/list");
            }
            fn list_item(&mut self, _: &str) {
                self.0.push("item");
            }
            fn section(&mut self, _: &str) {}
            fn text(&mut self, _: &str) {}
            fn text_bold(&mut self, _: &str) {}
            fn text_underline(&mut self, _: &str) {}
            fn paragraph_break(&mut self) {}
        }

        let tokens = Tokenizer::new().tokenize_str("1) a\n2) b");
        let mut parser = Parser::new();
        let root = parser.parse(&tokens).unwrap();
        let mut lists = Lists::default();
        render(&mut lists, parser.tree(), root);
        assert_eq!(lists.0, vec!["list", "item", "item", "/list"]);
    }
}
