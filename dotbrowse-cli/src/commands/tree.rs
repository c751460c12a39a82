use std::path::Path;

use dotbrowse::TreeNode;

use crate::{app::GlobalOptions, commands::common::load_tree, output::print_output};

/// Keep only the namespace node `namespace`, then cut below `depth` levels.
fn select(tree: &TreeNode, namespace: Option<&str>, depth: Option<usize>) -> TreeNode {
    let selected = match namespace {
        Some(namespace) => {
            let label = format!("namespace {namespace}");
            tree.retain_children(|node| node.label() == label)
        }
        None => tree.clone(),
    };

    match depth {
        Some(depth) => selected.pruned(depth),
        None => selected,
    }
}

pub fn run(
    path: &Path,
    namespace: Option<&str>,
    depth: Option<usize>,
    opts: &GlobalOptions,
) -> anyhow::Result<()> {
    let tree = load_tree(path)?;
    let output = select(&tree, namespace, depth);

    if let Some(namespace) = namespace {
        if output.children().is_empty() {
            log::warn!("No namespace {} in {}", namespace, path.display());
        }
    }

    print_output(&output, opts, |out| {
        print!("{out}");
        println!("\n{} node(s) shown.", out.count() - 1);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TreeNode {
        let mut root = TreeNode::new("Root");
        let demo = root.push(TreeNode::new("namespace Demo"));
        demo.push(TreeNode::new("public class Widget"))
            .push(TreeNode::new("public Int32 Size"));
        root.push(TreeNode::new("namespace System"))
            .push(TreeNode::new("public class String"));
        root
    }

    #[test]
    fn whole_tree() {
        assert_eq!(select(&sample(), None, None), sample());
    }

    #[test]
    fn namespace_and_depth() {
        let selected = select(&sample(), Some("Demo"), Some(2));
        assert_eq!(
            selected.to_string(),
            "Root\n  namespace Demo\n    public class Widget\n"
        );

        let missing = select(&sample(), Some("Other"), None);
        assert!(missing.children().is_empty());
    }
}
