use super::Tree;
use crate::libs::phylo::error::TreeError;
use crate::libs::phylo::node::NodeId;
use anyhow::Context;
use std::io::Read;

/// Read the Newick tree held in a file ("stdin" for standard input).
pub fn from_file(infile: &str) -> anyhow::Result<Tree> {
    let mut reader = intspan::reader(infile);
    let mut newick = String::new();
    reader
        .read_to_string(&mut newick)
        .with_context(|| format!("Read error: {}", infile))?;
    if newick.trim().is_empty() {
        return Err(TreeError::Empty).with_context(|| infile.to_string());
    }
    Tree::from_newick(newick.as_str()).with_context(|| format!("Invalid tree file: {}", infile))
}

/// Serialize tree to Newick string.
pub fn to_newick(tree: &Tree) -> String {
    match tree.get_root() {
        Some(root) => {
            let mut s = String::new();
            write_clade(tree, root, true, &mut s);
            s.push(';');
            s
        }
        None => ";".to_string(),
    }
}

/// Serialize the subtree below `root` as a standalone tree.
/// The length of the edge above `root` is not part of the subtree and is dropped.
pub fn to_newick_subtree(tree: &Tree, root: NodeId) -> String {
    let mut s = String::new();
    write_clade(tree, root, false, &mut s);
    s.push(';');
    s
}

fn write_clade(tree: &Tree, node_id: NodeId, with_length: bool, s: &mut String) {
    let node = match tree.get_node(node_id) {
        Some(n) => n,
        None => return,
    };

    if !node.children.is_empty() {
        s.push('(');
        for (i, &child) in node.children.iter().enumerate() {
            if i > 0 {
                s.push(',');
            }
            write_clade(tree, child, true, s);
        }
        s.push(')');
    }

    if let Some(name) = &node.name {
        s.push_str(&quote_label(name));
    }

    if with_length {
        if let Some(len) = node.length {
            s.push_str(&format!(":{}", len));
        }
    }

    if let Some(props) = node.properties.as_ref().filter(|p| !p.is_empty()) {
        s.push_str("[&&NHX");
        for (k, v) in props {
            if v.is_empty() {
                s.push_str(&format!(":{}", k));
            } else {
                s.push_str(&format!(":{}={}", k, v));
            }
        }
        s.push(']');
    }
}

fn quote_label(label: &str) -> String {
    let needs_quote = label.chars().any(|c| "(),:;[] \t\n".contains(c));
    if needs_quote {
        format!("'{}'", label.replace('\'', "''"))
    } else {
        label.to_string()
    }
}
