//! Recursive-descent parser from tokens to an expression tree
//!
//! Grammar, informally:
//!
//! ```text
//! sequence   := expression*
//! expression := prefixed | group scripts? | leaf scripts*
//! prefixed   := marker argument (other-marker argument)? element?
//! group      := '{' sequence '}'?
//! argument   := group | leaf | <nothing>
//! ```
//!
//! The parser never fails. It is fed whatever the user has typed so far, so
//! every irregularity has a fallback: a missing `}` closes at the end of
//! input, a stray `}` is dropped, and a marker with nothing to attach to
//! hangs its scripts on an empty `char` node.

use super::ast::{ExpressionNode, NodeKind};
use crate::chem::lexer::Token;

/// Deepest nesting of groups and re-parsed command arguments. Deeper braces
/// are kept as flat characters.
pub const MAX_NESTING: usize = 64;

/// Parse a token sequence into a `root` node
pub fn parse(tokens: &[Token]) -> ExpressionNode {
    parse_at_depth(tokens, 0)
}

/// Parse tokens that already sit `depth` levels deep, such as a command
/// argument re-parsed by the renderer
pub fn parse_at_depth(tokens: &[Token], depth: usize) -> ExpressionNode {
    let mut parser = Parser::new(tokens, depth);
    let mut children = Vec::new();

    while !parser.at_end() {
        if parser.check(|t| matches!(t, Token::BraceClose)) {
            log::trace!("dropping stray closing brace at {}", parser.pos);
            parser.advance();
            continue;
        }
        children.push(parser.parse_expression());
    }

    ExpressionNode::root(children)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token], depth: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            depth,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn peek_at(&self, offset: usize) -> Option<&'a Token> {
        self.tokens.get(self.pos + offset)
    }

    fn check(&self, predicate: impl Fn(&Token) -> bool) -> bool {
        self.peek().is_some_and(predicate)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn parse_expression(&mut self) -> ExpressionNode {
        match self.peek() {
            Some(Token::Subscript) | Some(Token::Superscript) => self.parse_prefixed(),
            Some(Token::BraceOpen) => {
                let group = self.parse_group();
                match self.unwrap_scriptable(group) {
                    Ok(leaf) => self.attach_scripts(leaf),
                    Err(group) => group,
                }
            }
            _ => {
                let leaf = self.parse_leaf();
                if leaf.is_script_capable() {
                    self.attach_scripts(leaf)
                } else {
                    leaf
                }
            }
        }
    }

    /// `{...}` up to the matching close brace, or to the end of input
    fn parse_group(&mut self) -> ExpressionNode {
        self.advance();
        if self.depth >= MAX_NESTING {
            log::trace!("nesting limit reached at {}, flattening group", self.pos);
            return ExpressionNode::group(self.flat_group_body());
        }

        self.depth += 1;
        let mut children = Vec::new();
        loop {
            match self.peek() {
                None => break,
                Some(Token::BraceClose) => {
                    self.advance();
                    break;
                }
                Some(_) => children.push(self.parse_expression()),
            }
        }
        self.depth -= 1;
        ExpressionNode::group(children)
    }

    /// The rest of a group as unscripted leaves, braces included, up to its
    /// matching `}`
    fn flat_group_body(&mut self) -> Vec<ExpressionNode> {
        let mut open = 0usize;
        let mut children = Vec::new();
        while let Some(token) = self.peek() {
            match token {
                Token::BraceClose if open == 0 => {
                    self.advance();
                    break;
                }
                Token::BraceClose => open -= 1,
                Token::BraceOpen => open += 1,
                _ => {}
            }
            children.push(self.parse_leaf());
        }
        children
    }

    /// `{Ca}_2` scripts the element, not the group. Only a group holding a
    /// single bare script-capable child that is followed by a marker unwraps.
    fn unwrap_scriptable(&self, group: ExpressionNode) -> Result<ExpressionNode, ExpressionNode> {
        let followed_by_marker = self.check(Token::is_script_marker);
        let single_bare = group.children.len() == 1
            && group.children[0].is_script_capable()
            && !group.children[0].has_scripts();

        if followed_by_marker && single_bare {
            let mut group = group;
            Ok(group.children.remove(0))
        } else {
            Err(group)
        }
    }

    fn parse_leaf(&mut self) -> ExpressionNode {
        let Some(token) = self.advance() else {
            return ExpressionNode::empty_char();
        };

        match token {
            Token::Command(command) => ExpressionNode::command(
                command.name.clone(),
                command.optional.clone(),
                command.args.clone(),
            ),
            Token::Element(symbol) => ExpressionNode::leaf(NodeKind::Element, symbol.clone()),
            Token::Number(digits) => ExpressionNode::leaf(NodeKind::Number, digits.clone()),
            Token::Symbol(c) => ExpressionNode::leaf(NodeKind::Symbol, c.to_string()),
            Token::Char(c) => ExpressionNode::leaf(NodeKind::Char, c.to_string()),
            Token::Plus => ExpressionNode::leaf(NodeKind::Operator, "+"),
            Token::ParenOpen => ExpressionNode::leaf(NodeKind::ParenLeft, "("),
            Token::ParenClose => ExpressionNode::leaf(NodeKind::ParenRight, ")"),
            // Structural tokens only reach here as script arguments
            Token::BraceOpen => ExpressionNode::leaf(NodeKind::Char, "{"),
            Token::BraceClose => ExpressionNode::leaf(NodeKind::Char, "}"),
            Token::Subscript => ExpressionNode::leaf(NodeKind::Char, "_"),
            Token::Superscript => ExpressionNode::leaf(NodeKind::Char, "^"),
        }
    }

    /// Attach a chain of trailing markers. A repeated marker replaces the
    /// earlier one of the same kind.
    fn attach_scripts(&mut self, mut node: ExpressionNode) -> ExpressionNode {
        while let Some(marker) = self.peek() {
            match marker {
                Token::Subscript => {
                    self.advance();
                    node.subscript = Some(Box::new(self.parse_script_argument()));
                }
                Token::Superscript => {
                    self.advance();
                    node.superscript = Some(Box::new(self.parse_script_argument()));
                }
                _ => break,
            }
        }
        node
    }

    /// The operand of `_` or `^`: a whole group, or a single unscripted leaf
    fn parse_script_argument(&mut self) -> ExpressionNode {
        match self.peek() {
            Some(Token::BraceOpen) => self.parse_group(),
            Some(Token::BraceClose) | Some(Token::Subscript) | Some(Token::Superscript) | None => {
                ExpressionNode::empty_char()
            }
            Some(_) => self.parse_leaf(),
        }
    }

    /// An expression that opens with a script marker: isotope notation when
    /// both scripts and an element are present, otherwise scripts on an empty
    /// base.
    fn parse_prefixed(&mut self) -> ExpressionNode {
        let mut subscript = None;
        let mut superscript = None;

        let first_is_sub = matches!(self.advance(), Some(Token::Subscript));
        let first = self.parse_script_argument();
        if first_is_sub {
            subscript = Some(first);
        } else {
            superscript = Some(first);
        }

        let complementary = if first_is_sub {
            self.check(|t| matches!(t, Token::Superscript))
        } else {
            self.check(|t| matches!(t, Token::Subscript))
        };
        if complementary {
            self.advance();
            let second = self.parse_script_argument();
            if first_is_sub {
                superscript = Some(second);
            } else {
                subscript = Some(second);
            }
        }

        match (subscript, superscript) {
            (Some(sub), Some(sup)) => match self.take_isotope_element() {
                Some(symbol) => ExpressionNode::isotope(symbol, sub, sup),
                None => {
                    log::trace!("scripts at {} have no element, keeping them on an empty base", self.pos);
                    ExpressionNode::empty_char()
                        .with_subscript(sub)
                        .with_superscript(sup)
                }
            },
            (Some(sub), None) => ExpressionNode::empty_char().with_subscript(sub),
            (None, Some(sup)) => ExpressionNode::empty_char().with_superscript(sup),
            (None, None) => ExpressionNode::empty_char(),
        }
    }

    /// A bare `Element` or `{Element}`. Consumes nothing when neither is next.
    fn take_isotope_element(&mut self) -> Option<String> {
        match (self.peek(), self.peek_at(1), self.peek_at(2)) {
            (Some(Token::Element(symbol)), _, _) => {
                self.pos += 1;
                Some(symbol.clone())
            }
            (Some(Token::BraceOpen), Some(Token::Element(symbol)), Some(Token::BraceClose)) => {
                self.pos += 3;
                Some(symbol.clone())
            }
            _ => None,
        }
    }
}
