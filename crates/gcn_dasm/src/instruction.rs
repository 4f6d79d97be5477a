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

use std::fmt::{Display, Formatter};

use crate::{
    encoding::EncodingKind,
    formatter::{SemanticToken, TokenItem, TokenStream},
};

#[derive(Clone, Debug)]
pub struct Instruction {
    /// False if decoding produced any inline complaint, such as `(invalid opcode)`.
    pub is_valid: bool,
    /// Dword offset of the instruction within the program.
    pub offset: u32,
    /// Dwords consumed, including literals and extension dwords.
    pub size: u32,
    pub words: Vec<u32>,
    /// Matched encoding, or `None` for `(invalid instruction)`.
    pub encoding: Option<EncodingKind>,
    pub tokens: TokenStream,
    pub text: String,
}

impl Instruction {
    pub(crate) fn new(offset: u32, size: u32, words: &[u32], encoding: Option<EncodingKind>, tokens: TokenStream) -> Self {
        let is_valid = encoding.is_some()
            && !tokens
                .iter()
                .any(|t| matches!(t, TokenItem::Semantic(SemanticToken::Error(_))));
        let text = tokens.to_string_flat();
        Self {
            is_valid,
            offset,
            size,
            words: words.to_vec(),
            encoding,
            tokens,
            text,
        }
    }

    pub fn mnemonic(&self) -> Option<&str> {
        self.tokens.mnemonic()
    }

    /// Number of trailing dwords beyond the encoding's first dword.
    pub fn extra_words(&self) -> u32 {
        self.size.saturating_sub(1)
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}
