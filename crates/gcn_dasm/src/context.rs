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

//! Per-instruction decode state shared by the format printers.

use std::collections::HashMap;

use gcn_isadb::{Format, GfxLevel, IsaRecord};

use crate::{
    bits,
    encoding::EncodingEntry,
    formatter::FormatterOutput,
    layout::Field,
    tables::GenerationTables,
};

pub struct InstrContext<'a, 'o> {
    pub tables: &'a GenerationTables<'a>,
    pub out: &'o mut dyn FormatterOutput,
    pub words: &'a [u32],
    /// Dword offset of the instruction within the program.
    pub offset: u32,
    pub entry: EncodingEntry,
    pub block_offsets: &'a HashMap<u32, usize>,
    pub wave_size: u32,

    pub record: Option<&'a IsaRecord>,
    /// Format of the resolved opcode.
    pub format: Option<Format>,
    /// Format the operand layout follows; differs from `format` for promoted VOP3 opcodes.
    pub encoded_format: Option<Format>,
    pub printed_operand: bool,
    pub has_def: bool,
    pub has_sdwa: bool,
    pub has_dpp8: bool,
    pub has_dpp8_fi: bool,
    pub has_dpp16: bool,
    pub has_literal: bool,
    /// Dwords consumed so far, starting at the encoding's base size.
    pub total_size: u32,
}

impl<'a, 'o> InstrContext<'a, 'o> {
    pub fn new(
        tables: &'a GenerationTables<'a>,
        out: &'o mut dyn FormatterOutput,
        words: &'a [u32],
        offset: u32,
        entry: EncodingEntry,
        block_offsets: &'a HashMap<u32, usize>,
        wave_size: u32,
    ) -> Self {
        Self {
            tables,
            out,
            words,
            offset,
            entry,
            block_offsets,
            wave_size,
            record: None,
            format: None,
            encoded_format: None,
            printed_operand: false,
            has_def: false,
            has_sdwa: false,
            has_dpp8: false,
            has_dpp8_fi: false,
            has_dpp16: false,
            has_literal: false,
            total_size: entry.size,
        }
    }

    #[inline]
    pub fn gfx(&self) -> GfxLevel {
        self.tables.gfx()
    }

    #[inline]
    pub fn field(&self, field: Field) -> u32 {
        field.extract(self.words)
    }

    #[inline]
    pub fn bit(&self, field: Field) -> bool {
        field.is_set(self.words)
    }

    #[inline]
    pub fn word(&self, index: u32) -> u32 {
        bits::word_at(self.words, index as usize)
    }

    /// Base encoding size in dwords; extension fields start after it.
    #[inline]
    pub fn base_size(&self) -> u32 {
        self.entry.size
    }

    /// True if the resolved opcode has database name `name`.
    pub fn is(&self, name: &str) -> bool {
        self.record.is_some_and(|r| r.name == name)
    }

    pub fn has_dpp(&self) -> bool {
        self.has_dpp8 || self.has_dpp8_fi || self.has_dpp16
    }

    /// Flag the VOP src0 sentinels that announce an SDWA or DPP extension dword.
    pub fn detect_suffix(&mut self, src0: u32) {
        match src0 {
            crate::reg::SRC_SDWA => self.has_sdwa = true,
            crate::reg::SRC_DPP8 => self.has_dpp8 = true,
            crate::reg::SRC_DPP8_FI => self.has_dpp8_fi = true,
            crate::reg::SRC_DPP16 => self.has_dpp16 = true,
            _ => {}
        }
    }

    /// Print ` text` as a modifier.
    pub fn modifier(&mut self, text: &str) {
        self.out.write_separator(" ");
        self.out.write_modifier(text);
    }

    /// Print ` name` if the single bit `field` is set.
    pub fn flag(&mut self, name: &str, field: Field) -> bool {
        let set = self.bit(field);
        if set {
            self.modifier(name);
        }
        set
    }

    /// Print the inline complaint for a field that must hold a fixed value.
    pub fn require_eq(&mut self, name: &str, field: Field, expected: u32) {
        let value = self.field(field);
        if value != expected {
            self.out
                .write_error(&format!(" (invalid {} value {}, expected {})", name, value, expected));
        }
    }

    /// Resolve and print the mnemonic of `opcode` in `format`.
    pub fn print_opcode(&mut self, format: Format, opcode: u32) -> bool {
        match self.tables.lookup(format, opcode) {
            Some(index) => {
                self.print_record(index, format);
                true
            }
            None => {
                self.print_invalid_opcode();
                false
            }
        }
    }

    pub fn print_invalid_opcode(&mut self) {
        self.record = None;
        self.format = None;
        self.encoded_format = None;
        self.has_def = false;
        self.out.write_error("(invalid opcode)");
    }

    /// Print the mnemonic of a resolved record, with the suffix naming its encoding.
    pub fn print_record(&mut self, index: usize, format: Format) {
        let record = self.tables.record(index);
        self.record = Some(record);
        self.format = Some(record.format);
        self.encoded_format = Some(record.format);
        self.has_def = record.has_definition();

        let mut mnemonic = self.tables.display_name(index).to_string();
        if self.has_dpp() {
            if self.entry.size == 2 {
                mnemonic.push_str("_e64");
            }
            mnemonic.push_str("_dpp");
            self.total_size += 1;
        }
        else if self.has_sdwa {
            if self.gfx() > GfxLevel::Gfx8 || format != Format::VOPC {
                mnemonic.push_str("_sdwa");
            }
            self.total_size += 1;
        }
        else if matches!(format, Format::VOP1 | Format::VOP2 | Format::VOPC | Format::VINTRP)
            && record.flags.has_e64()
        {
            mnemonic.push_str(&format!("_e{}", self.entry.size * 32));
        }

        log::trace!("{:05}: {} as {}", self.offset, record, self.entry.kind);
        self.out.write_mnemonic(&mnemonic);
    }

    /// Write an operand separator: `, ` after an earlier operand, else a single space.
    pub fn separator(&mut self, after_operand: bool) {
        if after_operand {
            self.out.write_separator(", ");
        }
        else {
            self.out.write_separator(" ");
        }
    }
}
