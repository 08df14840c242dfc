//! Expression tree for chemistry markup
//!
//! One node type covers everything: the `kind` tag says how the renderer reads
//! the remaining fields. Scripts are owned optional children, so a node is
//! complete once the parser has finished attaching its trailing markers.

use serde::Serialize;
use std::fmt;

/// The kinds of nodes the parser produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    Root,
    Group,
    Element,
    Number,
    Symbol,
    Operator,
    ParenLeft,
    ParenRight,
    Char,
    Command,
    Isotope,
    /// Reserved for input no other kind describes; rendered as its value
    Unknown,
}

impl NodeKind {
    /// Only these kinds may carry sub- or superscripts
    pub fn is_script_capable(self) -> bool {
        matches!(
            self,
            NodeKind::Element
                | NodeKind::Number
                | NodeKind::Symbol
                | NodeKind::Char
                | NodeKind::Isotope
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Root => "root",
            NodeKind::Group => "group",
            NodeKind::Element => "element",
            NodeKind::Number => "number",
            NodeKind::Symbol => "symbol",
            NodeKind::Operator => "operator",
            NodeKind::ParenLeft => "parenLeft",
            NodeKind::ParenRight => "parenRight",
            NodeKind::Char => "char",
            NodeKind::Command => "command",
            NodeKind::Isotope => "isotope",
            NodeKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpressionNode {
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value: String,
    /// Raw command arguments, parsed lazily by the renderer
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ExpressionNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscript: Option<Box<ExpressionNode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub superscript: Option<Box<ExpressionNode>>,
}

impl ExpressionNode {
    fn new(kind: NodeKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            args: Vec::new(),
            optional: None,
            children: Vec::new(),
            subscript: None,
            superscript: None,
        }
    }

    pub fn root(children: Vec<ExpressionNode>) -> Self {
        Self {
            children,
            ..Self::new(NodeKind::Root, "")
        }
    }

    pub fn group(children: Vec<ExpressionNode>) -> Self {
        Self {
            children,
            ..Self::new(NodeKind::Group, "")
        }
    }

    pub fn leaf(kind: NodeKind, value: impl Into<String>) -> Self {
        Self::new(kind, value)
    }

    /// The empty base a dangling script attaches to
    pub fn empty_char() -> Self {
        Self::new(NodeKind::Char, "")
    }

    pub fn command(name: impl Into<String>, optional: Option<String>, args: Vec<String>) -> Self {
        Self {
            args,
            optional,
            ..Self::new(NodeKind::Command, name)
        }
    }

    pub fn isotope(symbol: impl Into<String>, subscript: Self, superscript: Self) -> Self {
        Self {
            subscript: Some(Box::new(subscript)),
            superscript: Some(Box::new(superscript)),
            ..Self::new(NodeKind::Isotope, symbol)
        }
    }

    pub fn with_subscript(mut self, script: ExpressionNode) -> Self {
        self.subscript = Some(Box::new(script));
        self
    }

    pub fn with_superscript(mut self, script: ExpressionNode) -> Self {
        self.superscript = Some(Box::new(script));
        self
    }

    pub fn has_scripts(&self) -> bool {
        self.subscript.is_some() || self.superscript.is_some()
    }

    pub fn is_script_capable(&self) -> bool {
        self.kind.is_script_capable()
    }

    /// Short label used by the tree visualizer
    pub fn display_label(&self) -> String {
        match self.kind {
            NodeKind::Root | NodeKind::Group => format!("{} items", self.children.len()),
            NodeKind::Command => {
                let mut label = format!("\\{}", self.value);
                if let Some(optional) = &self.optional {
                    label.push_str(&format!("[{}]", optional));
                }
                for arg in &self.args {
                    label.push_str(&format!("{{{}}}", arg));
                }
                label
            }
            _ if self.value.is_empty() => "(empty)".to_string(),
            _ => self.value.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_capable_kinds() {
        assert!(NodeKind::Element.is_script_capable());
        assert!(NodeKind::Isotope.is_script_capable());
        assert!(!NodeKind::Group.is_script_capable());
        assert!(!NodeKind::Operator.is_script_capable());
        assert!(!NodeKind::Command.is_script_capable());
    }

    #[test]
    fn test_serializes_camel_case_kinds() {
        let node = ExpressionNode::leaf(NodeKind::ParenLeft, "(");
        let json = serde_json::to_string(&node).unwrap();
        assert_eq!(json, r#"{"kind":"parenLeft","value":"("}"#);
    }

    #[test]
    fn test_display_label() {
        let frac = ExpressionNode::command("frac", None, vec!["1".into(), "2".into()]);
        assert_eq!(frac.display_label(), r"\frac{1}{2}");
        assert_eq!(ExpressionNode::empty_char().display_label(), "(empty)");
    }
}
