/*
    gcn_dasm
    Copyright 2022-2025 Daniel Balsom
    https://github.com/dbalsom/gcn_dasm

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the “Software”),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.
*/

//! Token capture for disassembly output.
use std::fmt::{Display, Formatter, Result as FmtResult};

use super::FormatterOutput;

/// Marker trait for all tokens; requires Display for rendering to text.
pub trait Token: Display {}

/// Tokens with semantic meaning (mnemonic, register, immediate, label, modifier, error, comment)
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SemanticToken {
    Mnemonic(String),
    Register(String),
    Immediate(String),
    Label(String),
    Modifier(String),
    Error(String),
    Comment(String),
}

impl Display for SemanticToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            SemanticToken::Mnemonic(s)
            | SemanticToken::Register(s)
            | SemanticToken::Immediate(s)
            | SemanticToken::Label(s)
            | SemanticToken::Modifier(s)
            | SemanticToken::Error(s)
            | SemanticToken::Comment(s) => f.write_str(s),
        }
    }
}
impl Token for SemanticToken {}

/// Tokens describing presentation/decoration (punctuation, whitespace, raw text, numbers)
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecoratorToken {
    OpenBracket,
    CloseBracket,
    Minus,
    Pipe,
    Comma,
    Colon,
    Whitespace(String),
    Text(String),
    Number(String),
}

impl Display for DecoratorToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DecoratorToken::OpenBracket => f.write_str("["),
            DecoratorToken::CloseBracket => f.write_str("]"),
            DecoratorToken::Minus => f.write_str("-"),
            DecoratorToken::Pipe => f.write_str("|"),
            DecoratorToken::Comma => f.write_str(","),
            DecoratorToken::Colon => f.write_str(":"),
            DecoratorToken::Whitespace(s) => f.write_str(s),
            DecoratorToken::Text(s) => f.write_str(s),
            DecoratorToken::Number(s) => f.write_str(s),
        }
    }
}
impl Token for DecoratorToken {}

/// Unified token stream item
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenItem {
    Semantic(SemanticToken),
    Decorator(DecoratorToken),
}

impl Display for TokenItem {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            TokenItem::Semantic(t) => Display::fmt(t, f),
            TokenItem::Decorator(t) => Display::fmt(t, f),
        }
    }
}
impl Token for TokenItem {}

/// A simple collector of tokens that can also be rendered to a flat string
#[derive(Clone, Default, Debug)]
pub struct TokenStream {
    pub tokens: Vec<TokenItem>,
}

impl TokenStream {
    pub fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Iterate over collected tokens
    pub fn iter(&self) -> impl Iterator<Item = &TokenItem> {
        self.tokens.iter()
    }

    /// Render collected tokens into a single String
    pub fn to_string_flat(&self) -> String {
        let mut s = String::new();
        for t in &self.tokens {
            s.push_str(&t.to_string());
        }
        s
    }

    /// The first mnemonic token, if any.
    pub fn mnemonic(&self) -> Option<&str> {
        self.tokens.iter().find_map(|t| match t {
            TokenItem::Semantic(SemanticToken::Mnemonic(s)) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Helper to push a whitespace token
    pub fn ws(&mut self) {
        self.tokens.push(TokenItem::Decorator(DecoratorToken::Whitespace(" ".into())));
    }

    fn push_semantic(&mut self, token: SemanticToken) {
        self.tokens.push(TokenItem::Semantic(token));
    }

    fn push_decorator(&mut self, token: DecoratorToken) {
        self.tokens.push(TokenItem::Decorator(token));
    }
}

impl FormatterOutput for TokenStream {
    fn write_text(&mut self, s: &str) {
        self.push_decorator(DecoratorToken::Text(s.to_string()));
    }

    fn write_mnemonic(&mut self, s: &str) {
        self.push_semantic(SemanticToken::Mnemonic(s.to_string()));
    }

    fn write_register(&mut self, s: &str) {
        self.push_semantic(SemanticToken::Register(s.to_string()));
    }

    fn write_immediate(&mut self, s: &str) {
        self.push_semantic(SemanticToken::Immediate(s.to_string()));
    }

    fn write_label(&mut self, s: &str) {
        self.push_semantic(SemanticToken::Label(s.to_string()));
    }

    fn write_modifier(&mut self, s: &str) {
        self.push_semantic(SemanticToken::Modifier(s.to_string()));
    }

    fn write_separator(&mut self, s: &str) {
        // Heuristic mapping of separators to decorator tokens
        match s {
            "[" => self.push_decorator(DecoratorToken::OpenBracket),
            "]" => self.push_decorator(DecoratorToken::CloseBracket),
            "," => self.push_decorator(DecoratorToken::Comma),
            ":" => self.push_decorator(DecoratorToken::Colon),
            ", " => {
                self.push_decorator(DecoratorToken::Comma);
                self.ws();
            }
            ws if ws.trim().is_empty() => self.push_decorator(DecoratorToken::Whitespace(ws.to_string())),
            other if other.chars().all(|c| c.is_ascii_digit()) => {
                self.push_decorator(DecoratorToken::Number(other.to_string()))
            }
            other => self.push_decorator(DecoratorToken::Text(other.to_string())),
        }
    }

    fn write_symbol(&mut self, s: &str) {
        match s {
            "-" => self.push_decorator(DecoratorToken::Minus),
            "|" => self.push_decorator(DecoratorToken::Pipe),
            other => self.push_decorator(DecoratorToken::Text(other.to_string())),
        }
    }

    fn write_error(&mut self, s: &str) {
        self.push_semantic(SemanticToken::Error(s.to_string()));
    }

    fn write_comment(&mut self, s: &str) {
        self.push_semantic(SemanticToken::Comment(s.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separators_map_to_decorators() {
        let mut ts = TokenStream::new();
        ts.write_mnemonic("v_add_f32");
        ts.write_separator(" ");
        ts.write_register("v0");
        ts.write_separator(", ");
        ts.write_symbol("|");
        ts.write_register("v1");
        ts.write_symbol("|");
        assert_eq!(ts.to_string_flat(), "v_add_f32 v0, |v1|");
        assert_eq!(ts.mnemonic(), Some("v_add_f32"));
        assert!(ts.iter().any(|t| *t == TokenItem::Decorator(DecoratorToken::Comma)));
        assert!(ts.iter().any(|t| *t == TokenItem::Decorator(DecoratorToken::Pipe)));
    }
}
