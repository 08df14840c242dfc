//! Word-equation rendering of expression trees
//!
//! Output follows the linear equation syntax word processors accept:
//! `_x ` for a subscript, `^(x) ` for a superscript, `〖..〗` around
//! multi-letter symbols and `(_a^b)X` for isotope prefixes.

use super::commands::render_command;
use crate::chem::parser::{ExpressionNode, NodeKind};

/// Rendering state threaded through the tree walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    /// How many scripts deep the current node sits
    pub script_depth: usize,
    /// Wrap multi-letter element symbols in `〖..〗`
    pub bracket_multi_letter: bool,
    /// Groups and command arguments entered so far, shared with the parser's
    /// nesting limit
    pub nesting: usize,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self {
            script_depth: 0,
            bracket_multi_letter: true,
            nesting: 0,
        }
    }
}

impl RenderContext {
    pub fn new(bracket_multi_letter: bool) -> Self {
        Self {
            bracket_multi_letter,
            ..Self::default()
        }
    }

    pub fn in_script(&self) -> bool {
        self.script_depth > 0
    }

    fn enter_script(self) -> Self {
        Self {
            script_depth: self.script_depth + 1,
            ..self
        }
    }

    pub(crate) fn enter_nested(self) -> Self {
        Self {
            nesting: self.nesting + 1,
            ..self
        }
    }
}

/// Render a node and everything below it
pub fn render(node: &ExpressionNode, ctx: RenderContext) -> String {
    match node.kind {
        NodeKind::Root => render_sequence(&node.children, ctx),
        NodeKind::Group => {
            let inner = render_sequence(&node.children, ctx.enter_nested());
            if ctx.in_script() {
                inner
            } else {
                format!("({})", inner)
            }
        }
        NodeKind::Element => {
            let base = element_symbol(&node.value, ctx);
            with_scripts(base, node, ctx)
        }
        NodeKind::Isotope => {
            let base = element_symbol(&node.value, ctx);
            format!("{}{}", isotope_prefix(node, ctx), base)
        }
        NodeKind::Number | NodeKind::Symbol | NodeKind::Char | NodeKind::Unknown => {
            with_scripts(node.value.clone(), node, ctx)
        }
        NodeKind::Operator => {
            if ctx.in_script() {
                node.value.clone()
            } else {
                format!(" {} ", node.value)
            }
        }
        NodeKind::ParenLeft | NodeKind::ParenRight => node.value.clone(),
        NodeKind::Command => render_command(node, ctx),
    }
}

/// Concatenate siblings. An element carrying both scripts right after
/// another element is part of a formula, so its superscript is the charge of
/// the whole species (`SO_{4}^{2-}`) rather than an isotope mass.
fn render_sequence(children: &[ExpressionNode], ctx: RenderContext) -> String {
    let mut out = String::new();
    let mut previous: Option<&ExpressionNode> = None;

    for child in children {
        let follows_atom = previous.is_some_and(|p| p.kind == NodeKind::Element);
        let carries_charge = child.kind == NodeKind::Element
            && child.subscript.is_some()
            && child.superscript.is_some();

        if follows_atom && carries_charge {
            let base = element_symbol(&child.value, ctx);
            out.push_str(&suffix_scripts(base, child, ctx));
        } else {
            out.push_str(&render(child, ctx));
        }
        previous = Some(child);
    }
    out
}

fn element_symbol(symbol: &str, ctx: RenderContext) -> String {
    if ctx.bracket_multi_letter && symbol.chars().count() > 1 {
        format!("〖{}〗", symbol)
    } else {
        symbol.to_string()
    }
}

/// Both scripts go in front, everything else trails
fn with_scripts(base: String, node: &ExpressionNode, ctx: RenderContext) -> String {
    if node.subscript.is_some() && node.superscript.is_some() {
        format!("{}{}", isotope_prefix(node, ctx), base)
    } else {
        suffix_scripts(base, node, ctx)
    }
}

/// `(_<sub>^<sup>)`, subscript first whatever the source order was
fn isotope_prefix(node: &ExpressionNode, ctx: RenderContext) -> String {
    let sub = node
        .subscript
        .as_deref()
        .map(|s| script_body(s, ctx))
        .unwrap_or_default();
    let sup = node
        .superscript
        .as_deref()
        .map(|s| script_body(s, ctx))
        .unwrap_or_default();
    format!("(_{}^{})", sub, sup)
}

fn suffix_scripts(mut base: String, node: &ExpressionNode, ctx: RenderContext) -> String {
    if let Some(sub) = node.subscript.as_deref() {
        let body = script_body(sub, ctx);
        if needs_script_parens(&body) {
            base.push_str(&format!("_({}) ", body));
        } else {
            base.push_str(&format!("_{} ", body));
        }
    }
    if let Some(sup) = node.superscript.as_deref() {
        base.push_str(&format!("^({}) ", script_body(sup, ctx)));
    }
    base
}

fn script_body(script: &ExpressionNode, ctx: RenderContext) -> String {
    render(script, ctx.enter_script()).trim().to_string()
}

/// A subscript longer than one char binds as a unit unless it is a plain count
fn needs_script_parens(body: &str) -> bool {
    body.chars().count() > 1 && !body.chars().all(|c| c.is_ascii_digit())
}
