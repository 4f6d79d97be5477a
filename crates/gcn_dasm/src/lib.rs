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

//! Disassembler for AMD GCN and RDNA (GFX6 through GFX12) shader binaries.
//!
//! Instruction words are matched against the encoding table of the target generation, the
//! opcode is resolved through [`gcn_isadb`], and the operands are printed in the syntax of the
//! LLVM AMDGPU assembler. Whole programs are listed with block labels, repeat collapsing and a
//! hex dump of every instruction.

pub mod bits;
mod context;
pub mod encoding;
pub mod error;
pub mod formatter;
pub mod instruction;
pub mod layout;
mod operand;
mod printers;
pub mod program;
pub mod reg;
pub mod tables;

pub use error::DisasmError;
pub use gcn_isadb::{Format, GfxLevel};
pub use instruction::Instruction;
pub use program::{disassemble_program, Block, Decoder, DisasmOptions, Disassembler, Disassembly, Program};

pub mod prelude {
    pub use crate::{
        encoding::{EncodingKind, EncodingTable},
        formatter::{
            format_instruction,
            DecoratorToken,
            FormatOptions,
            FormatterOutput,
            SemanticToken,
            TokenItem,
            TokenStream,
        },
        instruction::Instruction,
        program::{disassemble_program, Block, Decoder, DisasmOptions, Disassembler, Disassembly, Program},
        DisasmError,
        Format,
        GfxLevel,
    };
}
