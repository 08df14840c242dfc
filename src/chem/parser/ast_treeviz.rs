//! Treeviz formatter for expression trees

use crate::chem::parser::ast::ExpressionNode;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

pub fn to_treeviz_str(root: &ExpressionNode) -> String {
    let mut result = String::new();
    append_children(&mut result, &root.children, "");
    result
}

fn append_node(result: &mut String, node: &ExpressionNode, role: &str, prefix: &str, is_last: bool) {
    let connector = if is_last { "└─" } else { "├─" };
    let display_label = truncate(&node.display_label(), 30);

    result.push_str(&format!(
        "{}{} {}{}: {}\n",
        prefix, connector, role, node.kind, display_label
    ));

    let new_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });

    let mut entries: Vec<(&str, &ExpressionNode)> =
        node.children.iter().map(|child| ("", child)).collect();
    if let Some(sub) = node.subscript.as_deref() {
        entries.push(("_ ", sub));
    }
    if let Some(sup) = node.superscript.as_deref() {
        entries.push(("^ ", sup));
    }

    for (i, (role, child)) in entries.iter().enumerate() {
        append_node(result, child, role, &new_prefix, i == entries.len() - 1);
    }
}

fn append_children(result: &mut String, children: &[ExpressionNode], prefix: &str) {
    for (i, child) in children.iter().enumerate() {
        let is_last = i == children.len() - 1;
        append_node(result, child, "", prefix, is_last);
    }
}
