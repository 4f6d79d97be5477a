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

use gcn_dasm::{prelude::*, tables::GenerationTables};
use gcn_fuzzer::fuzzer::{FuzzerOptions, InstructionFuzzer};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::common::init_tests;

pub const FUZZ_TEST_COUNT: usize = 2000;
pub const TEST_SEED: u64 = 0x12345678;

const GENERATIONS: [GfxLevel; 6] = [
    GfxLevel::Gfx6,
    GfxLevel::Gfx8,
    GfxLevel::Gfx9,
    GfxLevel::Gfx10_3,
    GfxLevel::Gfx11,
    GfxLevel::Gfx12,
];

// GFX10 image instructions carry up to three dwords of extra addresses.
const MAX_INSTRUCTION_DWORDS: u32 = 5;

#[test]
fn fuzz_decode_never_overruns() -> Result<(), Box<dyn std::error::Error>> {
    init_tests();
    let mut rng = StdRng::seed_from_u64(TEST_SEED);

    for gfx in GENERATIONS {
        let fuzzer = InstructionFuzzer::new(gfx)?;
        let dasm = Disassembler::new(DisasmOptions { gfx, wave_size: 64 })?;
        let decoder = dasm.decoder();
        let options = FuzzerOptions {
            seed: TEST_SEED,
            gfx,
            ..Default::default()
        };

        for _ in 0..FUZZ_TEST_COUNT {
            let fuzzed = fuzzer.random_instruction(&mut rng, &options)?;
            let inst = decoder.decode(&fuzzed.words, 0);

            assert!(
                inst.size >= 1 && inst.size <= MAX_INSTRUCTION_DWORDS,
                "{}: {} ({:08x?}) decoded to {} dwords",
                gfx,
                fuzzed.name,
                fuzzed.words,
                inst.size
            );
            assert!(inst.size as usize <= fuzzed.words.len());
            assert!(!inst.text.is_empty());
        }
    }
    Ok(())
}

#[test]
fn fuzz_decode_is_deterministic() -> Result<(), Box<dyn std::error::Error>> {
    init_tests();
    let mut rng = StdRng::seed_from_u64(TEST_SEED);
    let gfx = GfxLevel::Gfx10_3;

    let fuzzer = InstructionFuzzer::new(gfx)?;
    let dasm = Disassembler::new(DisasmOptions { gfx, wave_size: 32 })?;
    let decoder = dasm.decoder();
    let options = FuzzerOptions {
        gfx,
        ..Default::default()
    };

    for _ in 0..FUZZ_TEST_COUNT / 4 {
        let fuzzed = fuzzer.random_instruction(&mut rng, &options)?;
        let a = decoder.decode(&fuzzed.words, 0);
        let b = dasm.decode_one(&fuzzed.words, 0);
        assert_eq!(a.text, b.text);
        assert_eq!(a.size, b.size);
        assert_eq!(a.is_valid, b.is_valid);
    }
    Ok(())
}

/// Encoding suffixes the printer may append to a display name.
const MNEMONIC_SUFFIXES: [&str; 5] = ["_e64_dpp", "_dpp", "_sdwa", "_e32", "_e64"];

fn names_record(mnemonic: &str, display: &str) -> bool {
    match mnemonic.strip_prefix(display) {
        Some("") => true,
        Some(rest) => MNEMONIC_SUFFIXES.contains(&rest),
        None => false,
    }
}

#[test]
fn fuzz_decode_resolves_fuzzed_opcode() -> Result<(), Box<dyn std::error::Error>> {
    init_tests();
    let mut rng = StdRng::seed_from_u64(TEST_SEED);

    for gfx in GENERATIONS {
        let fuzzer = InstructionFuzzer::new(gfx)?;
        let dasm = Disassembler::new(DisasmOptions { gfx, wave_size: 64 })?;
        let decoder = dasm.decoder();
        let tables = GenerationTables::build(dasm.database(), gfx);
        let encodings = EncodingTable::new(gfx);
        let options = FuzzerOptions {
            gfx,
            ..Default::default()
        };

        for _ in 0..FUZZ_TEST_COUNT {
            let fuzzed = fuzzer.random_instruction(&mut rng, &options)?;
            let inst = decoder.decode(&fuzzed.words, 0);

            let entry = encodings.native_entry(fuzzed.format).ok_or("no native entry")?;
            assert_eq!(inst.encoding, Some(entry.kind), "{}: {}", gfx, fuzzed.name);

            let index = dasm.database().index_of(&fuzzed.name).ok_or("fuzzed record not in database")?;
            let display = tables.display_name(index);
            let mnemonic = inst.mnemonic().ok_or_else(|| format!("{}: {} printed no mnemonic", gfx, fuzzed.name))?;
            assert!(
                names_record(mnemonic, display),
                "{}: {} ({}) decoded as {} ({:08x?})",
                gfx,
                fuzzed.name,
                display,
                inst.text,
                fuzzed.words
            );
        }
    }
    Ok(())
}

#[test]
fn fuzz_program_listing() -> Result<(), Box<dyn std::error::Error>> {
    init_tests();
    let mut rng = StdRng::seed_from_u64(TEST_SEED);
    let gfx = GfxLevel::Gfx11;

    let fuzzer = InstructionFuzzer::new(gfx)?;
    let dasm = Disassembler::new(DisasmOptions { gfx, wave_size: 32 })?;
    let options = FuzzerOptions {
        gfx,
        trailing_words: 0,
        ..Default::default()
    };

    let mut words = Vec::new();
    for _ in 0..200 {
        words.extend(fuzzer.random_instruction(&mut rng, &options)?.words);
    }
    let program = Program {
        gfx,
        wave_size: 32,
        blocks: vec![Block::new(0, &[]), Block::new(rng.random_range(0..words.len() as u32), &[])],
        constant_data: vec![0xde, 0xad, 0xbe, 0xef, 0x01],
    };

    let out = dasm.disassemble(&program, &words, words.len() as u32, &FormatOptions::default())?;
    assert!(out.text.starts_with("BB0:\n"));
    assert!(out.text.ends_with("[000000] efbeadde 00000001\n"));
    Ok(())
}
