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

use gcn_isadb::{GfxLevel, IsaDbError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DisasmError {
    #[error("exec_size {exec_size} exceeds the {len} dwords supplied")]
    ExecSizeOutOfRange { exec_size: u32, len: usize },
    #[error("block {block} starts at dword {offset}, past the end of the program")]
    BlockOffsetOutOfRange { block: usize, offset: u32 },
    #[error("block {block} names unknown successor {succ}")]
    UnknownBlock { block: usize, succ: u32 },
    #[error("wave size {wave_size} is not supported on {gfx}")]
    InvalidWaveSize { wave_size: u32, gfx: GfxLevel },
    #[error("program targets {program} but the disassembler was built for {disassembler}")]
    GenerationMismatch { program: GfxLevel, disassembler: GfxLevel },
    #[error("Opcode database error: {0}")]
    IsaDb(#[from] IsaDbError),
}
