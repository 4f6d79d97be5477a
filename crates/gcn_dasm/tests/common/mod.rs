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

#![allow(dead_code)]

use std::sync::Once;

use gcn_dasm::prelude::*;

static INIT: Once = Once::new();

pub fn init_tests() {
    INIT.call_once(|| {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
            .is_test(true)
            .init();
    });
}

pub fn disassembler(gfx: GfxLevel, wave_size: u32) -> Disassembler {
    Disassembler::new(DisasmOptions { gfx, wave_size }).expect("disassembler ok")
}

/// Decode a single instruction and render it in lowercase.
pub fn decode_text(gfx: GfxLevel, words: &[u32]) -> String {
    let inst = disassembler(gfx, 64).decode_one(words, 0);
    format_instruction(&inst, &FormatOptions::default())
}

/// Disassemble a single-block program with default formatting.
pub fn listing(gfx: GfxLevel, words: &[u32]) -> Disassembly {
    let program = Program::new(gfx, 64);
    disassembler(gfx, 64)
        .disassemble(&program, words, words.len() as u32, &FormatOptions::default())
        .expect("disassembly ok")
}

/// One listing line: tab, text padded to column 60, then the hex dump.
pub fn line(text: &str, words: &[u32]) -> String {
    let pad = 60usize.saturating_sub(text.len()).max(1);
    let mut s = format!("\t{}{};", text, " ".repeat(pad));
    for w in words {
        s.push_str(&format!(" {:08x}", w));
    }
    s.push('\n');
    s
}
