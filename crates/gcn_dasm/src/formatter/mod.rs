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

pub mod tokens;

use std::fmt::{Display, LowerHex};

use num_traits::PrimInt;
/// Re-export token types at the formatter module root for convenient access
pub use tokens::{DecoratorToken, SemanticToken, Token, TokenItem, TokenStream};

use crate::instruction::Instruction;

/// Options controlling listing output
#[derive(Copy, Clone, Debug)]
pub struct FormatOptions {
    /// If true, render mnemonics in uppercase; otherwise lowercase.
    pub uppercase_mnemonic: bool,
    /// Column the `;` of the hex dump is aligned to, counted from the start of the instruction text.
    pub comment_column: usize,
    /// If true, follow each instruction with `;` and its raw dwords.
    pub hex_dump: bool,
    /// If true, runs of identical instructions print once followed by a repeat count.
    pub collapse_repeats: bool,
    /// If true, append the program's constant data after the code.
    pub constant_data: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            uppercase_mnemonic: false,
            comment_column: 60,
            hex_dump: true,
            collapse_repeats: true,
            constant_data: true,
        }
    }
}

/// Output sink for formatting tokens. Implement this to capture rich tokens
/// (e.g., for colorizing) or to accumulate plain text.
pub trait FormatterOutput {
    /// Fallback text writer for any token type
    fn write_text(&mut self, s: &str);

    fn write_mnemonic(&mut self, s: &str) {
        self.write_text(s)
    }
    fn write_register(&mut self, s: &str) {
        self.write_text(s)
    }
    fn write_immediate(&mut self, s: &str) {
        self.write_text(s)
    }

    /// Branch targets and block markers.
    fn write_label(&mut self, s: &str) {
        self.write_text(s)
    }

    /// Trailing instruction modifiers such as `glc` or `offset:16`.
    fn write_modifier(&mut self, s: &str) {
        self.write_text(s)
    }
    fn write_separator(&mut self, s: &str) {
        self.write_text(s)
    }

    /// Operand decoration: `-`, `|`, `(` and `)`.
    fn write_symbol(&mut self, s: &str) {
        self.write_text(s)
    }

    fn write_error(&mut self, s: &str) {
        self.write_text(s)
    }

    /// Hex dumps, repeat counts and other listing annotations.
    fn write_comment(&mut self, s: &str) {
        self.write_text(s)
    }
}

/// Provide a basic String sink implementation
impl FormatterOutput for String {
    fn write_text(&mut self, s: &str) {
        self.push_str(s);
    }
}

/// Counts the characters written through it, so the driver can align the hex dump.
pub(crate) struct ColumnCounter<'a> {
    pub inner: &'a mut dyn FormatterOutput,
    pub written: usize,
}

impl<'a> ColumnCounter<'a> {
    pub fn new(inner: &'a mut dyn FormatterOutput) -> Self {
        Self { inner, written: 0 }
    }
}

macro_rules! counted {
    ($($method:ident),*) => {
        $(
            fn $method(&mut self, s: &str) {
                self.written += s.chars().count();
                self.inner.$method(s);
            }
        )*
    };
}

impl FormatterOutput for ColumnCounter<'_> {
    counted!(
        write_text,
        write_mnemonic,
        write_register,
        write_immediate,
        write_label,
        write_modifier,
        write_separator,
        write_symbol,
        write_error,
        write_comment
    );
}

/// Replay a captured token stream into an output sink, applying the mnemonic case option.
pub fn emit_tokens(tokens: &TokenStream, opts: &FormatOptions, out: &mut dyn FormatterOutput) {
    for item in tokens.iter() {
        match item {
            TokenItem::Semantic(SemanticToken::Mnemonic(s)) => {
                if opts.uppercase_mnemonic {
                    out.write_mnemonic(&s.to_uppercase())
                }
                else {
                    out.write_mnemonic(s)
                }
            }
            TokenItem::Semantic(SemanticToken::Register(s)) => out.write_register(s),
            TokenItem::Semantic(SemanticToken::Immediate(s)) => out.write_immediate(s),
            TokenItem::Semantic(SemanticToken::Label(s)) => out.write_label(s),
            TokenItem::Semantic(SemanticToken::Modifier(s)) => out.write_modifier(s),
            TokenItem::Semantic(SemanticToken::Error(s)) => out.write_error(s),
            TokenItem::Semantic(SemanticToken::Comment(s)) => out.write_comment(s),
            TokenItem::Decorator(d @ (DecoratorToken::Minus | DecoratorToken::Pipe)) => {
                out.write_symbol(&d.to_string())
            }
            TokenItem::Decorator(DecoratorToken::Text(s)) => out.write_text(s),
            TokenItem::Decorator(d) => out.write_separator(&d.to_string()),
        }
    }
}

/// Render a decoded instruction as plain text.
pub fn format_instruction(inst: &Instruction, opts: &FormatOptions) -> String {
    let mut s = String::new();
    emit_tokens(&inst.tokens, opts, &mut s);
    s
}

/// `0x` prefixed lowercase hex.
pub fn format_hex<T: PrimInt + LowerHex>(value: T) -> String {
    format!("0x{:x}", value)
}

/// Decimal up to and including `threshold`, hex above it.
pub fn format_hex_or_decimal<T: PrimInt + LowerHex + Display>(value: T, threshold: T) -> String {
    if value > threshold {
        format_hex(value)
    }
    else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::{DisasmOptions, Disassembler};
    use gcn_isadb::GfxLevel;

    fn decode(words: &[u32]) -> Instruction {
        let dasm = Disassembler::new(DisasmOptions {
            gfx: GfxLevel::Gfx9,
            ..Default::default()
        })
        .expect("disassembler ok");
        dasm.decode_one(words, 0)
    }

    #[test]
    fn format_sopp_lowercase() {
        // s_endpgm
        let inst = decode(&[0xbf81_0000]);
        assert_eq!(format_instruction(&inst, &FormatOptions::default()), "s_endpgm");
    }

    #[test]
    fn format_sopp_uppercase() {
        let inst = decode(&[0xbf81_0000]);
        let s = format_instruction(
            &inst,
            &FormatOptions {
                uppercase_mnemonic: true,
                ..Default::default()
            },
        );
        assert_eq!(s, "S_ENDPGM");
    }

    #[test]
    fn uppercase_leaves_operands_alone() {
        // s_mov_b32 s1, s2
        let inst = decode(&[0xbe81_0002]);
        let s = format_instruction(
            &inst,
            &FormatOptions {
                uppercase_mnemonic: true,
                ..Default::default()
            },
        );
        assert_eq!(s, "S_MOV_B32 s1, s2");
    }

    #[test]
    fn column_counter_counts_every_token_kind() {
        let mut s = String::new();
        let mut counter = ColumnCounter::new(&mut s);
        counter.write_mnemonic("s_nop");
        counter.write_separator(" ");
        counter.write_immediate("0x1");
        assert_eq!(counter.written, 9);
        assert_eq!(s, "s_nop 0x1");
    }

    #[test]
    fn hex_helpers() {
        assert_eq!(format_hex(0x3f80_0000u32), "0x3f800000");
        assert_eq!(format_hex_or_decimal(64u32, 64), "64");
        assert_eq!(format_hex_or_decimal(65u32, 64), "0x41");
    }
}
