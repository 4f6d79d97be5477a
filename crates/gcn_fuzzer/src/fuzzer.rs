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

use std::ops::Range;

use gcn_dasm::{
    encoding::EncodingTable,
    layout::{flat, opcode_layout},
};
use gcn_isadb::{Format, GfxLevel, IsaDB, IsaRecord, IterFilter};
use rand::{prelude::StdRng, Rng};

use crate::error::FuzzerError::{self, InvalidOptions};

/// Random dwords appended after the encoding, enough for a literal plus an SDWA or DPP word.
pub const INSTRUCTION_POST_LEN: usize = 3;

#[derive(Clone, Debug)]
pub struct FuzzerOptions {
    pub seed: u64,
    pub gfx: GfxLevel,
    /// Restrict generation to opcodes of these formats.
    pub formats: Option<Vec<Format>>,
    pub trailing_words: usize,
}

impl Default for FuzzerOptions {
    fn default() -> Self {
        Self {
            seed: 0,
            gfx: GfxLevel::Gfx9,
            formats: None,
            trailing_words: INSTRUCTION_POST_LEN,
        }
    }
}

pub struct InstructionFuzzer {
    gfx: GfxLevel,
    isa_db: IsaDB,
    encodings: EncodingTable,
}

#[derive(Clone, Debug)]
pub struct FuzzerInstruction {
    pub gfx: GfxLevel,
    pub format: Format,
    /// Database name of the opcode placed in the words.
    pub name: String,
    pub words: Vec<u32>,
    /// The opcode value written into the encoding's opcode field.
    pub opcode_field: u32,
    /// Dwords belonging to the base encoding; the rest are trailing random words.
    pub encoding_range: Range<usize>,
}

impl InstructionFuzzer {
    pub fn new(gfx: GfxLevel) -> Result<Self, FuzzerError> {
        let isa_db = IsaDB::new()?;
        Ok(InstructionFuzzer {
            gfx,
            isa_db,
            encodings: EncodingTable::new(gfx),
        })
    }

    pub fn gfx(&self) -> GfxLevel {
        self.gfx
    }

    /// A record can be generated if its format has a native encoding whose opcode field
    /// holds its opcode. VOPD opcodes only valid in the Y half do not fit the X field.
    fn encodable(&self, record: &IsaRecord) -> bool {
        let Some(entry) = self.encodings.native_entry(record.format)
        else {
            return false;
        };
        // GFX8 shares the GFX9 opcode column but has no segment to select GLOBAL or SCRATCH.
        if matches!(record.format, Format::GLOBAL | Format::SCRATCH) && flat::segment_field(self.gfx).is_none() {
            return false;
        }
        let opcode = record.encoding_for(self.gfx).map(u32::from).unwrap_or(0);
        opcode_layout(entry.kind, self.gfx).map_or(true, |layout| opcode <= layout.max_opcode())
    }

    pub fn random_instruction(
        &self,
        rng: &mut StdRng,
        options: &FuzzerOptions,
    ) -> Result<FuzzerInstruction, FuzzerError> {
        if options.gfx != self.gfx {
            return Err(InvalidOptions(format!(
                "fuzzer was built for {} but options request {}",
                self.gfx, options.gfx
            )));
        }

        let filter = IterFilter {
            gfx: Some(self.gfx),
            formats: options.formats.clone(),
        };

        let isa_records: Vec<&IsaRecord> = self
            .isa_db
            .opcode_iter(filter)
            .filter(|r| self.encodable(r))
            .collect();

        if isa_records.is_empty() {
            return Err(InvalidOptions("No ISA records match the provided filter options".into()));
        }

        let record = isa_records[rng.random_range(0..isa_records.len())];
        let opcode = record.encoding_for(self.gfx).map(u32::from).unwrap_or(0);

        let entry = self
            .encodings
            .native_entry(record.format)
            .ok_or_else(|| InvalidOptions(format!("{} has no encoding on {}", record.name, self.gfx)))?;

        let size = entry.size as usize;
        let mut words: Vec<u32> = (0..size + options.trailing_words).map(|_| rng.random()).collect();

        // Keep the random bits below the pattern, then stamp the pattern and opcode over them.
        let low_mask = u32::MAX >> entry.width;
        words[0] = (words[0] & low_mask) | entry.pattern_bits();
        if let Some(layout) = opcode_layout(entry.kind, self.gfx) {
            layout.encode(&mut words[..size], opcode);
        }
        // GLOBAL and SCRATCH share the flat encoding and are told apart by segment.
        if matches!(record.format, Format::FLAT | Format::GLOBAL | Format::SCRATCH) {
            if let Some(seg) = flat::segment_field(self.gfx) {
                seg.insert(&mut words[..size], flat::segment_of(record.format));
            }
        }

        log::trace!(
            "fuzzed {} ({} {:#x}) as {}: {:08x?}",
            record.name,
            record.format,
            opcode,
            entry.kind,
            words
        );

        Ok(FuzzerInstruction {
            gfx: self.gfx,
            format: record.format,
            name: record.name.clone(),
            words,
            opcode_field: opcode,
            encoding_range: 0..size,
        })
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    const TEST_SEED: u64 = 0x12345678;

    #[test]
    fn fuzzed_words_carry_pattern_and_opcode() -> Result<(), Box<dyn std::error::Error>> {
        let fuzzer = InstructionFuzzer::new(GfxLevel::Gfx10)?;
        let mut rng = StdRng::seed_from_u64(TEST_SEED);
        let options = FuzzerOptions {
            gfx: GfxLevel::Gfx10,
            formats: Some(vec![Format::SOP1, Format::VOP2, Format::DS]),
            ..Default::default()
        };
        let table = EncodingTable::new(GfxLevel::Gfx10);

        for _ in 0..200 {
            let inst = fuzzer.random_instruction(&mut rng, &options)?;
            let entry = table.native_entry(inst.format).ok_or("no native entry")?;
            assert!(entry.matches(inst.words[0]));
            assert_eq!(inst.words.len(), entry.size as usize + INSTRUCTION_POST_LEN);

            let layout = opcode_layout(entry.kind, GfxLevel::Gfx10).ok_or("no opcode layout")?;
            assert_eq!(layout.decode(&inst.words), inst.opcode_field, "{}", inst.name);
        }
        Ok(())
    }

    #[test]
    fn flat_family_carries_its_segment() -> Result<(), Box<dyn std::error::Error>> {
        let fuzzer = InstructionFuzzer::new(GfxLevel::Gfx11)?;
        let mut rng = StdRng::seed_from_u64(TEST_SEED);
        let options = FuzzerOptions {
            gfx: GfxLevel::Gfx11,
            formats: Some(vec![Format::FLAT, Format::GLOBAL, Format::SCRATCH]),
            ..Default::default()
        };

        for _ in 0..100 {
            let inst = fuzzer.random_instruction(&mut rng, &options)?;
            let seg = flat::SEG_GFX11.extract(&inst.words);
            assert_eq!(flat::segment_format(seg), inst.format, "{}", inst.name);
        }
        Ok(())
    }

    #[test]
    fn vopd_opcodes_fit_the_x_half() -> Result<(), Box<dyn std::error::Error>> {
        let fuzzer = InstructionFuzzer::new(GfxLevel::Gfx11)?;
        let mut rng = StdRng::seed_from_u64(TEST_SEED);
        let options = FuzzerOptions {
            gfx: GfxLevel::Gfx11,
            formats: Some(vec![Format::VOPD]),
            ..Default::default()
        };

        for _ in 0..100 {
            let inst = fuzzer.random_instruction(&mut rng, &options)?;
            assert!(inst.opcode_field <= 0xf, "{} does not fit the X opcode", inst.name);
        }
        Ok(())
    }

    #[test]
    fn empty_selection_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
        let fuzzer = InstructionFuzzer::new(GfxLevel::Gfx6)?;
        let mut rng = StdRng::seed_from_u64(TEST_SEED);
        // No VOPD on GFX6.
        let options = FuzzerOptions {
            gfx: GfxLevel::Gfx6,
            formats: Some(vec![Format::VOPD]),
            ..Default::default()
        };
        assert!(matches!(
            fuzzer.random_instruction(&mut rng, &options),
            Err(FuzzerError::InvalidOptions(_))
        ));
        Ok(())
    }

    #[test]
    fn generation_must_match() -> Result<(), Box<dyn std::error::Error>> {
        let fuzzer = InstructionFuzzer::new(GfxLevel::Gfx9)?;
        let mut rng = StdRng::seed_from_u64(TEST_SEED);
        let options = FuzzerOptions {
            gfx: GfxLevel::Gfx11,
            ..Default::default()
        };
        assert!(fuzzer.random_instruction(&mut rng, &options).is_err());
        Ok(())
    }
}
