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
mod common;

use gcn_dasm::prelude::*;

use crate::common::{disassembler, init_tests, line, listing};

const S_NOP_0: u32 = 0xbf80_0000;
const S_ENDPGM: u32 = 0xbf81_0000;
// s_branch with a +1 dword offset
const S_BRANCH_1: u32 = 0xbf82_0001;

#[test]
fn single_block_listing() {
    init_tests();
    let out = listing(GfxLevel::Gfx9, &[0x8000_0000, S_ENDPGM]);

    let expected = format!(
        "BB0:\n{}{}",
        line("s_add_u32 s0, s0, s0", &[0x8000_0000]),
        line("s_endpgm", &[S_ENDPGM])
    );
    assert_eq!(out.text, expected);
    assert!(!out.had_invalid);
}

#[test]
fn branch_targets_print_block_labels() -> Result<(), Box<dyn std::error::Error>> {
    init_tests();
    let words = [S_BRANCH_1, S_NOP_0, S_ENDPGM];
    let program = Program {
        gfx: GfxLevel::Gfx9,
        wave_size: 64,
        blocks: vec![Block::new(0, &[1]), Block::new(2, &[])],
        constant_data: Vec::new(),
    };
    let out = disassembler(GfxLevel::Gfx9, 64).disassemble(&program, &words, 3, &FormatOptions::default())?;

    let expected = format!(
        "BB0:\n{}{}BB1:\n{}",
        line("s_branch BB1", &[S_BRANCH_1]),
        line("s_nop 0", &[S_NOP_0]),
        line("s_endpgm", &[S_ENDPGM])
    );
    assert_eq!(out.text, expected);
    Ok(())
}

#[test]
fn unreferenced_blocks_have_no_marker() -> Result<(), Box<dyn std::error::Error>> {
    init_tests();
    let words = [S_NOP_0, S_ENDPGM];
    let program = Program {
        gfx: GfxLevel::Gfx9,
        wave_size: 64,
        blocks: vec![Block::new(0, &[]), Block::new(1, &[])],
        constant_data: Vec::new(),
    };
    let out = disassembler(GfxLevel::Gfx9, 64).disassemble(&program, &words, 2, &FormatOptions::default())?;
    assert_eq!(out.text, format!("BB0:\n{}{}", line("s_nop 0", &[S_NOP_0]), line("s_endpgm", &[S_ENDPGM])));
    Ok(())
}

#[test]
fn repeated_instructions_collapse() {
    init_tests();
    let out = listing(GfxLevel::Gfx9, &[S_NOP_0, S_NOP_0, S_NOP_0, S_NOP_0, S_ENDPGM]);

    let expected = format!(
        "BB0:\n{}\t(then repeated 3 times)\n{}",
        line("s_nop 0", &[S_NOP_0]),
        line("s_endpgm", &[S_ENDPGM])
    );
    assert_eq!(out.text, expected);
}

#[test]
fn repeats_do_not_cross_block_starts() -> Result<(), Box<dyn std::error::Error>> {
    init_tests();
    let words = [S_NOP_0; 4];
    let program = Program {
        gfx: GfxLevel::Gfx9,
        wave_size: 64,
        blocks: vec![Block::new(0, &[1]), Block::new(2, &[])],
        constant_data: Vec::new(),
    };
    let out = disassembler(GfxLevel::Gfx9, 64).disassemble(&program, &words, 4, &FormatOptions::default())?;

    let nop = line("s_nop 0", &[S_NOP_0]);
    let expected = format!(
        "BB0:\n{nop}\t(then repeated 1 times)\nBB1:\n{nop}\t(then repeated 1 times)\n"
    );
    assert_eq!(out.text, expected);
    Ok(())
}

#[test]
fn repeats_can_be_disabled() -> Result<(), Box<dyn std::error::Error>> {
    init_tests();
    let words = [S_NOP_0, S_NOP_0];
    let program = Program::new(GfxLevel::Gfx9, 64);
    let opts = FormatOptions {
        collapse_repeats: false,
        ..Default::default()
    };
    let out = disassembler(GfxLevel::Gfx9, 64).disassemble(&program, &words, 2, &opts)?;
    let nop = line("s_nop 0", &[S_NOP_0]);
    assert_eq!(out.text, format!("BB0:\n{nop}{nop}"));
    Ok(())
}

#[test]
fn unknown_encoding_is_reported_inline() {
    init_tests();
    let out = listing(GfxLevel::Gfx9, &[0xffff_ffff, S_ENDPGM]);

    let expected = format!(
        "BB0:\n{}{}",
        line("(invalid instruction)", &[0xffff_ffff]),
        line("s_endpgm", &[S_ENDPGM])
    );
    assert_eq!(out.text, expected);
    assert!(out.had_invalid);
}

#[test]
fn literal_dword_is_dumped_once() {
    init_tests();
    // v_fmaak_f32 v0, v2, v1, 1.0
    let words = [0x5a00_0302, 0x3f80_0000, S_ENDPGM];
    let out = listing(GfxLevel::Gfx10, &words);

    let expected = format!(
        "BB0:\n{}{}",
        line("v_fmaak_f32 v0, v2, v1, 0x3f800000", &words[..2]),
        line("s_endpgm", &[S_ENDPGM])
    );
    assert_eq!(out.text, expected);
}

#[test]
fn literal_source_and_constant_share_one_dword() {
    init_tests();
    // v_madak_f32 and v_madmk_f32 with src0 reading the literal
    let madak = [0x3000_02ff, 0x3f80_0000];
    let madmk = [0x2e00_02ff, 0x3f80_0000];
    let words = [madak[0], madak[1], madmk[0], madmk[1], S_ENDPGM];
    let out = listing(GfxLevel::Gfx9, &words);

    let expected = format!(
        "BB0:\n{}{}{}",
        line("v_madak_f32 v0, 0x3f800000, v1", &madak),
        line("v_madmk_f32 v0, 0x3f800000, v1", &madmk),
        line("s_endpgm", &[S_ENDPGM])
    );
    assert_eq!(out.text, expected);
    assert_eq!(out.text.matches(", 0x3f800000").count(), 2);
    assert!(!out.had_invalid);

    let inst = disassembler(GfxLevel::Gfx9, 64).decode_one(&madak, 0);
    assert_eq!(inst.size, 2);
    assert_eq!(inst.text.matches(", 0x3f800000").count(), 1);
}

#[test]
fn constant_data_follows_code() -> Result<(), Box<dyn std::error::Error>> {
    init_tests();
    let mut program = Program::new(GfxLevel::Gfx9, 64);
    program.constant_data = (0u8..36).collect();

    let out = disassembler(GfxLevel::Gfx9, 64).disassemble(&program, &[S_ENDPGM], 1, &FormatOptions::default())?;
    let expected = format!(
        "BB0:\n{}\n/* constant data */\n\
         [000000] 03020100 07060504 0b0a0908 0f0e0d0c 13121110 17161514 1b1a1918 1f1e1d1c\n\
         [000032] 23222120\n",
        line("s_endpgm", &[S_ENDPGM])
    );
    assert_eq!(out.text, expected);
    Ok(())
}

#[test]
fn empty_program_prints_only_the_marker() -> Result<(), Box<dyn std::error::Error>> {
    init_tests();
    let program = Program::new(GfxLevel::Gfx10, 32);
    let out = disassembler(GfxLevel::Gfx10, 32).disassemble(&program, &[], 0, &FormatOptions::default())?;
    assert_eq!(out.text, "BB0:\n");
    assert!(!out.had_invalid);
    Ok(())
}

#[test]
fn words_past_exec_size_are_not_listed() -> Result<(), Box<dyn std::error::Error>> {
    init_tests();
    let program = Program::new(GfxLevel::Gfx9, 64);
    let out = disassembler(GfxLevel::Gfx9, 64).disassemble(&program, &[S_ENDPGM, S_NOP_0], 1, &FormatOptions::default())?;
    assert_eq!(out.text, format!("BB0:\n{}", line("s_endpgm", &[S_ENDPGM])));
    Ok(())
}

#[test]
fn format_options_shape_the_listing() -> Result<(), Box<dyn std::error::Error>> {
    init_tests();
    let program = Program::new(GfxLevel::Gfx9, 64);
    let opts = FormatOptions {
        uppercase_mnemonic: true,
        hex_dump: false,
        ..Default::default()
    };
    let out = disassembler(GfxLevel::Gfx9, 64).disassemble(&program, &[0xbe81_0002, S_ENDPGM], 2, &opts)?;
    assert_eq!(out.text, "BB0:\n\tS_MOV_B32 s1, s2\n\tS_ENDPGM\n");
    Ok(())
}

#[test]
fn program_description_is_validated() {
    init_tests();
    let dasm = disassembler(GfxLevel::Gfx9, 64);
    let opts = FormatOptions::default();
    let words = [S_ENDPGM];

    let program = Program::new(GfxLevel::Gfx9, 64);
    assert!(matches!(
        dasm.disassemble(&program, &words, 2, &opts),
        Err(DisasmError::ExecSizeOutOfRange { exec_size: 2, len: 1 })
    ));

    let mut program = Program::new(GfxLevel::Gfx9, 64);
    program.blocks.push(Block::new(5, &[]));
    assert!(matches!(
        dasm.disassemble(&program, &words, 1, &opts),
        Err(DisasmError::BlockOffsetOutOfRange { block: 1, offset: 5 })
    ));

    let mut program = Program::new(GfxLevel::Gfx9, 64);
    program.blocks[0].linear_succs.push(3);
    assert!(matches!(
        dasm.disassemble(&program, &words, 1, &opts),
        Err(DisasmError::UnknownBlock { block: 0, succ: 3 })
    ));

    let program = Program::new(GfxLevel::Gfx10, 64);
    assert!(matches!(
        dasm.disassemble(&program, &words, 1, &opts),
        Err(DisasmError::GenerationMismatch { .. })
    ));
}

#[test]
fn token_sink_receives_labels_and_comments() -> Result<(), Box<dyn std::error::Error>> {
    init_tests();
    let program = Program::new(GfxLevel::Gfx9, 64);
    let mut stream = TokenStream::new();
    let invalid = disassembler(GfxLevel::Gfx9, 64).disassemble_to(
        &program,
        &[S_ENDPGM],
        1,
        &FormatOptions::default(),
        &mut stream,
    )?;
    assert!(!invalid);
    assert!(stream
        .iter()
        .any(|t| matches!(t, TokenItem::Semantic(SemanticToken::Label(l)) if l == "BB0")));
    assert!(stream
        .iter()
        .any(|t| matches!(t, TokenItem::Semantic(SemanticToken::Comment(c)) if c == " bf810000")));
    assert_eq!(stream.mnemonic(), Some("s_endpgm"));
    Ok(())
}

#[test]
fn convenience_helper_matches_disassembler() -> Result<(), Box<dyn std::error::Error>> {
    init_tests();
    let program = Program::new(GfxLevel::Gfx8, 64);
    let words = [S_NOP_0, S_ENDPGM];
    let a = disassemble_program(&program, &words, 2)?;
    let b = disassembler(GfxLevel::Gfx8, 64).disassemble(&program, &words, 2, &FormatOptions::default())?;
    assert_eq!(a.text, b.text);
    Ok(())
}
