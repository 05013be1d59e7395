//! Recovering JSON parser that preserves source positions.
//!
//! [`parse`] turns raw document text into a [`SyntaxNode`] tree in which
//! every node carries its exact byte span, together with the list of
//! [`ParseError`]s encountered. Syntax errors never abort the parse: the
//! parser records the error and resynchronizes on the next structural token,
//! so partially-edited documents still yield a usable tree.
//!
//! The tree is used only for locating values; the plain data value for
//! validation comes from the strict `serde_json` parse of the same text.

use serde::Serialize;

use super::scanner::{self, Token, TokenKind};

/// Nesting depth past which the parser gives up instead of recursing.
const MAX_DEPTH: usize = 512;

/// Syntactic kind of a parse tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
    /// An object member: carries the decoded key in [`SyntaxNode::name`] and
    /// the value (when one parsed) as its only child.
    Property,
}

/// One JSON value's syntactic span.
///
/// `offset` and `length` bound the token span of the value itself, excluding
/// surrounding insignificant whitespace. Children of objects and arrays
/// appear in source order, and every child span nests within its parent's.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub offset: usize,
    pub length: usize,
    /// Decoded property key; present on [`NodeKind::Property`] nodes only.
    pub name: Option<String>,
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    fn leaf(kind: NodeKind, token: &Token) -> Self {
        Self {
            kind,
            offset: token.offset,
            length: token.length,
            name: None,
            children: Vec::new(),
        }
    }

    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    /// Value node of the member with the given key, for object nodes.
    /// The first matching member wins when keys are duplicated.
    pub fn member(&self, key: &str) -> Option<&SyntaxNode> {
        if self.kind != NodeKind::Object {
            return None;
        }
        self.children
            .iter()
            .find(|p| p.kind == NodeKind::Property && p.name.as_deref() == Some(key))
            .and_then(|p| p.children.first())
    }

    /// Element node at the given index, for array nodes.
    pub fn element(&self, index: usize) -> Option<&SyntaxNode> {
        if self.kind != NodeKind::Array {
            return None;
        }
        self.children.get(index)
    }
}

/// One recoverable syntax error with its byte span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseError {
    pub offset: usize,
    pub length: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(offset: usize, length: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            length,
            message: message.into(),
        }
    }
}

/// Result of one tolerant parse.
///
/// A non-empty `errors` list means the text is not valid JSON and any data
/// derived from it is unreliable; the tree may still be present and partially
/// usable for location lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome {
    pub root: Option<SyntaxNode>,
    pub errors: Vec<ParseError>,
}

impl ParseOutcome {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parse `text` into a position-annotated tree, tolerating syntax errors.
pub fn parse(text: &str) -> ParseOutcome {
    let mut errors = Vec::new();
    let tokens = scanner::scan(text, &mut errors);
    let mut parser = Parser {
        text,
        tokens,
        pos: 0,
        errors,
    };

    let root = parser.parse_value(0);
    if parser.current().kind != TokenKind::Eof {
        let tok = *parser.current();
        parser
            .errors
            .push(ParseError::new(tok.offset, tok.length, "End of file expected"));
    }

    ParseOutcome {
        root,
        errors: parser.errors,
    }
}

struct Parser<'a> {
    text: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let tok = *self.current();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        tok
    }

    fn error_at(&mut self, token: &Token, message: &str) {
        self.errors
            .push(ParseError::new(token.offset, token.length, message));
    }

    fn token_text(&self, token: &Token) -> &'a str {
        &self.text[token.offset..token.offset + token.length]
    }

    /// Parse one value. On failure the offending token is reported and, when
    /// it is not structural, consumed, so the caller's loop always advances.
    fn parse_value(&mut self, depth: usize) -> Option<SyntaxNode> {
        if depth > MAX_DEPTH {
            let tok = *self.current();
            self.error_at(&tok, "Maximum nesting depth exceeded");
            self.pos = self.tokens.len() - 1;
            return None;
        }

        let tok = *self.current();
        match tok.kind {
            TokenKind::OpenBrace => Some(self.parse_object(depth)),
            TokenKind::OpenBracket => Some(self.parse_array(depth)),
            TokenKind::String => {
                self.advance();
                Some(SyntaxNode::leaf(NodeKind::String, &tok))
            }
            TokenKind::Number => {
                self.advance();
                Some(SyntaxNode::leaf(NodeKind::Number, &tok))
            }
            TokenKind::True | TokenKind::False => {
                self.advance();
                Some(SyntaxNode::leaf(NodeKind::Boolean, &tok))
            }
            TokenKind::Null => {
                self.advance();
                Some(SyntaxNode::leaf(NodeKind::Null, &tok))
            }
            TokenKind::Unknown => {
                self.error_at(&tok, "Invalid symbol");
                self.advance();
                None
            }
            _ => {
                self.error_at(&tok, "Value expected");
                // Structural tokens belong to the enclosing construct; leave
                // them for the caller to resynchronize on.
                None
            }
        }
    }

    fn parse_object(&mut self, depth: usize) -> SyntaxNode {
        let open = self.advance();
        let mut node = SyntaxNode {
            kind: NodeKind::Object,
            offset: open.offset,
            length: open.length,
            name: None,
            children: Vec::new(),
        };
        let mut expect_comma = false;

        loop {
            let tok = *self.current();
            match tok.kind {
                TokenKind::CloseBrace => {
                    self.advance();
                    node.length = tok.end() - node.offset;
                    return node;
                }
                TokenKind::Eof => {
                    self.error_at(&tok, "Unexpected end of file");
                    node.length = tok.offset - node.offset;
                    return node;
                }
                TokenKind::Comma => {
                    if !expect_comma {
                        self.error_at(&tok, "Property name expected");
                    }
                    self.advance();
                    if self.current().kind == TokenKind::CloseBrace {
                        let close = *self.current();
                        self.error_at(&close, "Trailing comma");
                    }
                    expect_comma = false;
                }
                TokenKind::String => {
                    if expect_comma {
                        self.error_at(&tok, "Comma expected");
                    }
                    let property = self.parse_property(depth);
                    node.children.push(property);
                    expect_comma = true;
                }
                _ => {
                    self.error_at(&tok, "Property name expected");
                    if matches!(tok.kind, TokenKind::CloseBracket | TokenKind::Colon) {
                        self.advance();
                    } else if self.parse_value(depth + 1).is_none()
                        && self.current().kind == tok.kind
                        && self.current().offset == tok.offset
                    {
                        // Nothing consumed; force progress.
                        self.advance();
                    }
                }
            }
        }
    }

    fn parse_property(&mut self, depth: usize) -> SyntaxNode {
        let key = self.advance();
        let name = scanner::decode_string(self.token_text(&key));
        let mut property = SyntaxNode {
            kind: NodeKind::Property,
            offset: key.offset,
            length: key.length,
            name: Some(name),
            children: Vec::new(),
        };

        let tok = *self.current();
        if tok.kind == TokenKind::Colon {
            self.advance();
        } else {
            self.error_at(&tok, "Colon expected");
            // A bare key before a comma or brace has no value at all; give up
            // on this member rather than swallowing the next token.
            if matches!(
                tok.kind,
                TokenKind::Comma | TokenKind::CloseBrace | TokenKind::Eof
            ) {
                return property;
            }
        }

        if let Some(value) = self.parse_value(depth + 1) {
            property.length = value.end() - property.offset;
            property.children.push(value);
        }
        property
    }

    fn parse_array(&mut self, depth: usize) -> SyntaxNode {
        let open = self.advance();
        let mut node = SyntaxNode {
            kind: NodeKind::Array,
            offset: open.offset,
            length: open.length,
            name: None,
            children: Vec::new(),
        };
        let mut expect_comma = false;

        loop {
            let tok = *self.current();
            match tok.kind {
                TokenKind::CloseBracket => {
                    self.advance();
                    node.length = tok.end() - node.offset;
                    return node;
                }
                TokenKind::Eof => {
                    self.error_at(&tok, "Unexpected end of file");
                    node.length = tok.offset - node.offset;
                    return node;
                }
                TokenKind::Comma => {
                    if !expect_comma {
                        self.error_at(&tok, "Value expected");
                    }
                    self.advance();
                    if self.current().kind == TokenKind::CloseBracket {
                        let close = *self.current();
                        self.error_at(&close, "Trailing comma");
                    }
                    expect_comma = false;
                }
                TokenKind::CloseBrace | TokenKind::Colon => {
                    self.error_at(&tok, "Value expected");
                    self.advance();
                }
                _ => {
                    if expect_comma {
                        self.error_at(&tok, "Comma expected");
                    }
                    if let Some(value) = self.parse_value(depth + 1) {
                        node.children.push(value);
                        expect_comma = true;
                    }
                }
            }
        }
    }
}
