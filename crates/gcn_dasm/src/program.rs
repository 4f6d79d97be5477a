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

//! Whole-program disassembly.
//!
//! A [`Disassembler`] is bound to one GPU generation and wave size. It walks the executable
//! region of a program one instruction at a time, printing block markers for blocks that are
//! branched to, collapsing runs of identical instructions, and appending a hex dump of each
//! instruction's dwords. The program's constant data is dumped after the code.

use std::collections::HashMap;

use gcn_isadb::{GfxLevel, IsaDB};

use crate::{
    context::InstrContext,
    encoding::EncodingTable,
    error::DisasmError,
    formatter::{emit_tokens, ColumnCounter, FormatOptions, FormatterOutput, TokenStream},
    instruction::Instruction,
    printers::print_instruction,
    tables::GenerationTables,
};

/// A basic block of the program being disassembled.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Block {
    /// Dword offset of the block's first instruction.
    pub offset: u32,
    /// Indices of the blocks control may continue to.
    pub linear_succs: Vec<u32>,
}

impl Block {
    pub fn new(offset: u32, linear_succs: &[u32]) -> Self {
        Self {
            offset,
            linear_succs: linear_succs.to_vec(),
        }
    }
}

/// The program description handed to the disassembler along with the code words.
#[derive(Clone, Debug)]
pub struct Program {
    pub gfx: GfxLevel,
    pub wave_size: u32,
    /// Blocks in program order.
    pub blocks: Vec<Block>,
    pub constant_data: Vec<u8>,
}

impl Program {
    /// A single-block program.
    pub fn new(gfx: GfxLevel, wave_size: u32) -> Self {
        Self {
            gfx,
            wave_size,
            blocks: vec![Block::default()],
            constant_data: Vec::new(),
        }
    }
}

/// Options controlling decoding behavior
#[derive(Copy, Clone, Debug)]
pub struct DisasmOptions {
    pub gfx: GfxLevel,
    pub wave_size: u32,
}

impl Default for DisasmOptions {
    fn default() -> Self {
        Self {
            gfx: GfxLevel::Gfx6,
            wave_size: 64,
        }
    }
}

/// Result of disassembling a program.
#[derive(Clone, Debug, Default)]
pub struct Disassembly {
    pub text: String,
    /// True if any instruction failed to decode cleanly.
    pub had_invalid: bool,
}

pub struct Disassembler {
    db: IsaDB,
    encodings: EncodingTable,
    opts: DisasmOptions,
}

impl Disassembler {
    /// Create a disassembler using the built-in opcode database.
    pub fn new(opts: DisasmOptions) -> Result<Self, DisasmError> {
        Self::with_database(IsaDB::new()?, opts)
    }

    pub fn with_database(db: IsaDB, opts: DisasmOptions) -> Result<Self, DisasmError> {
        let wave_ok = match opts.wave_size {
            64 => true,
            32 => opts.gfx.supports_wave32(),
            _ => false,
        };
        if !wave_ok {
            return Err(DisasmError::InvalidWaveSize {
                wave_size: opts.wave_size,
                gfx: opts.gfx,
            });
        }

        let encodings = EncodingTable::new(opts.gfx);
        log::debug!(
            "disassembler for {} wave{}: {} encodings, {} opcodes",
            opts.gfx,
            opts.wave_size,
            encodings.entries().len(),
            db.len()
        );
        Ok(Self { db, encodings, opts })
    }

    pub fn options(&self) -> DisasmOptions {
        self.opts
    }

    pub fn database(&self) -> &IsaDB {
        &self.db
    }

    pub fn encodings(&self) -> &EncodingTable {
        &self.encodings
    }

    /// Build the per-generation opcode tables once for a run of decodes.
    pub fn decoder(&self) -> Decoder<'_> {
        Decoder {
            encodings: &self.encodings,
            tables: GenerationTables::build(&self.db, self.opts.gfx),
            wave_size: self.opts.wave_size,
            block_offsets: HashMap::new(),
        }
    }

    /// Decode the instruction starting at `words[0]`. Branch targets print as raw immediates.
    pub fn decode_one(&self, words: &[u32], offset: u32) -> Instruction {
        self.decoder().decode(words, offset)
    }

    /// Disassemble `words[..exec_size]` of `program` into a string.
    pub fn disassemble(
        &self,
        program: &Program,
        words: &[u32],
        exec_size: u32,
        opts: &FormatOptions,
    ) -> Result<Disassembly, DisasmError> {
        let mut text = String::new();
        let had_invalid = self.disassemble_to(program, words, exec_size, opts, &mut text)?;
        Ok(Disassembly { text, had_invalid })
    }

    /// Disassemble into any output sink. Returns true if any instruction was invalid.
    pub fn disassemble_to(
        &self,
        program: &Program,
        words: &[u32],
        exec_size: u32,
        opts: &FormatOptions,
        out: &mut dyn FormatterOutput,
    ) -> Result<bool, DisasmError> {
        self.validate(program, words, exec_size)?;

        let mut decoder = self.decoder();
        let referenced = referenced_blocks(&program.blocks);
        decoder.block_offsets = block_offsets(&program.blocks, &referenced);

        let exec_size = exec_size as usize;
        let mut pos = 0usize;
        let mut invalid = false;
        let mut next_block = 0usize;
        let mut prev_size = 0usize;
        let mut prev_pos = 0usize;
        let mut repeat_count = 0u32;

        while pos <= exec_size {
            let new_block = program
                .blocks
                .get(next_block)
                .is_some_and(|b| b.offset as usize == pos);

            if opts.collapse_repeats
                && pos + prev_size <= exec_size
                && prev_pos != pos
                && !new_block
                && words[prev_pos..prev_pos + prev_size] == words[pos..pos + prev_size]
            {
                repeat_count += 1;
                pos += prev_size;
                continue;
            }
            if repeat_count > 0 {
                out.write_text("\t");
                out.write_comment(&format!("(then repeated {} times)", repeat_count));
                out.write_text("\n");
                repeat_count = 0;
            }

            print_block_markers(&program.blocks, &referenced, &mut next_block, pos, out);

            // An empty last block only gets its marker.
            if pos == exec_size {
                break;
            }

            let inst = decoder.decode(&words[pos..], pos as u32);
            out.write_text("\t");
            let mut counter = ColumnCounter::new(out);
            emit_tokens(&inst.tokens, opts, &mut counter);
            let written = counter.written;

            if opts.hex_dump {
                let pad = opts.comment_column.saturating_sub(written).max(1);
                out.write_text(&" ".repeat(pad));
                out.write_comment(";");
                for word in &inst.words {
                    out.write_comment(&format!(" {:08x}", word));
                }
            }
            out.write_text("\n");

            invalid |= !inst.is_valid;
            prev_size = inst.size as usize;
            prev_pos = pos;
            pos += inst.size as usize;
        }

        if next_block != program.blocks.len() {
            log::warn!(
                "{} of {} blocks start inside an instruction or out of order",
                program.blocks.len() - next_block,
                program.blocks.len()
            );
        }

        if opts.constant_data {
            print_constant_data(&program.constant_data, out);
        }
        Ok(invalid)
    }

    fn validate(&self, program: &Program, words: &[u32], exec_size: u32) -> Result<(), DisasmError> {
        if program.gfx != self.opts.gfx {
            return Err(DisasmError::GenerationMismatch {
                program: program.gfx,
                disassembler: self.opts.gfx,
            });
        }
        if program.wave_size != self.opts.wave_size {
            return Err(DisasmError::InvalidWaveSize {
                wave_size: program.wave_size,
                gfx: program.gfx,
            });
        }
        if exec_size as usize > words.len() {
            return Err(DisasmError::ExecSizeOutOfRange {
                exec_size,
                len: words.len(),
            });
        }
        for (index, block) in program.blocks.iter().enumerate() {
            if block.offset > exec_size {
                return Err(DisasmError::BlockOffsetOutOfRange {
                    block: index,
                    offset: block.offset,
                });
            }
            if let Some(&succ) = block.linear_succs.iter().find(|&&s| s as usize >= program.blocks.len()) {
                return Err(DisasmError::UnknownBlock { block: index, succ });
            }
        }
        Ok(())
    }
}

/// Decodes instructions against tables built once for a generation.
pub struct Decoder<'a> {
    encodings: &'a EncodingTable,
    tables: GenerationTables<'a>,
    wave_size: u32,
    block_offsets: HashMap<u32, usize>,
}

impl Decoder<'_> {
    pub fn decode(&self, words: &[u32], offset: u32) -> Instruction {
        let mut tokens = TokenStream::new();
        let first = words.first().copied().unwrap_or_else(|| {
            log::warn!("decode at {} with no words", offset);
            0
        });

        let Some(entry) = self.encodings.lookup(first)
        else {
            log::warn!("{:05}: no encoding matches {:08x}", offset, first);
            tokens.write_error("(invalid instruction)");
            return Instruction::new(offset, 1, clamp(words, 1), None, tokens);
        };

        let mut ctx = InstrContext::new(
            &self.tables,
            &mut tokens,
            words,
            offset,
            *entry,
            &self.block_offsets,
            self.wave_size,
        );
        let size = print_instruction(&mut ctx);
        log::trace!("{:05}: {} instruction of {} dwords", offset, entry.kind, size);

        Instruction::new(offset, size, clamp(words, size), Some(entry.kind), tokens)
    }
}

fn clamp(words: &[u32], size: u32) -> &[u32] {
    &words[..words.len().min(size as usize)]
}

/// Block 0 and every successor of any block are branched to and get a marker.
fn referenced_blocks(blocks: &[Block]) -> Vec<bool> {
    let mut referenced = vec![false; blocks.len()];
    if let Some(first) = referenced.first_mut() {
        *first = true;
    }
    for succ in blocks.iter().flat_map(|b| b.linear_succs.iter()) {
        if let Some(r) = referenced.get_mut(*succ as usize) {
            *r = true;
        }
    }
    referenced
}

/// Map each offset to the first referenced block starting there.
fn block_offsets(blocks: &[Block], referenced: &[bool]) -> HashMap<u32, usize> {
    let mut offsets = HashMap::new();
    for (index, block) in blocks.iter().enumerate() {
        if referenced[index] {
            offsets.entry(block.offset).or_insert(index);
        }
    }
    offsets
}

fn print_block_markers(
    blocks: &[Block],
    referenced: &[bool],
    next_block: &mut usize,
    pos: usize,
    out: &mut dyn FormatterOutput,
) {
    while let Some(block) = blocks.get(*next_block) {
        if block.offset as usize != pos {
            break;
        }
        if referenced[*next_block] {
            out.write_label(&format!("BB{}", *next_block));
            out.write_text(":\n");
        }
        *next_block += 1;
    }
}

fn print_constant_data(data: &[u8], out: &mut dyn FormatterOutput) {
    if data.is_empty() {
        return;
    }
    out.write_comment("\n/* constant data */\n");
    for (line, chunk) in data.chunks(32).enumerate() {
        out.write_comment(&format!("[{:06}]", line * 32));
        for dword in chunk.chunks(4) {
            let mut bytes = [0u8; 4];
            bytes[..dword.len()].copy_from_slice(dword);
            out.write_comment(&format!(" {:08x}", u32::from_le_bytes(bytes)));
        }
        out.write_text("\n");
    }
}

/// Convenience helper to disassemble a program with default formatting.
pub fn disassemble_program(program: &Program, words: &[u32], exec_size: u32) -> Result<Disassembly, DisasmError> {
    let dasm = Disassembler::new(DisasmOptions {
        gfx: program.gfx,
        wave_size: program.wave_size,
    })?;
    dasm.disassemble(program, words, exec_size, &FormatOptions::default())
}
