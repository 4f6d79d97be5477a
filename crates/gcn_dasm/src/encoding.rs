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

//! Instruction encoding families and the dispatch table that recognizes them.
//!
//! Every encoding is identified by a fixed bit pattern at the top of the first dword. Patterns
//! have different widths and shorter ones are prefixes of longer ones, so lookup walks the
//! entries valid for a generation from the widest pattern to the narrowest.

use std::fmt::Display;

use gcn_isadb::{Format, GfxLevel};

/// One variant per instruction printer.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum EncodingKind {
    Sop1,
    Sop2,
    Sopk,
    Sopc,
    Sopp,
    /// GFX6-7 SMRD.
    Smem,
    /// GFX8-9 SMEM.
    Smem8,
    Smem10,
    Vop1,
    Vop2,
    Vop3,
    Vop3p,
    Vopc,
    Vopd,
    Mtbuf,
    Mtbuf10,
    Mtbuf11,
    Mubuf,
    Mubuf11,
    Mimg,
    Mimg10,
    Mimg11,
    Flat,
    Flat11,
    Vintrp,
    Vinterp,
    Ldsdir,
    Ds,
    Exp,
}

impl EncodingKind {
    pub fn to_str(&self) -> &'static str {
        match self {
            EncodingKind::Sop1 => "sop1",
            EncodingKind::Sop2 => "sop2",
            EncodingKind::Sopk => "sopk",
            EncodingKind::Sopc => "sopc",
            EncodingKind::Sopp => "sopp",
            EncodingKind::Smem => "smrd",
            EncodingKind::Smem8 => "smem_gfx8",
            EncodingKind::Smem10 => "smem_gfx10",
            EncodingKind::Vop1 => "vop1",
            EncodingKind::Vop2 => "vop2",
            EncodingKind::Vop3 => "vop3",
            EncodingKind::Vop3p => "vop3p",
            EncodingKind::Vopc => "vopc",
            EncodingKind::Vopd => "vopd",
            EncodingKind::Mtbuf => "mtbuf",
            EncodingKind::Mtbuf10 => "mtbuf_gfx10",
            EncodingKind::Mtbuf11 => "mtbuf_gfx11",
            EncodingKind::Mubuf => "mubuf",
            EncodingKind::Mubuf11 => "mubuf_gfx11",
            EncodingKind::Mimg => "mimg",
            EncodingKind::Mimg10 => "mimg_gfx10",
            EncodingKind::Mimg11 => "mimg_gfx11",
            EncodingKind::Flat => "flat",
            EncodingKind::Flat11 => "flat_gfx11",
            EncodingKind::Vintrp => "vintrp",
            EncodingKind::Vinterp => "vinterp",
            EncodingKind::Ldsdir => "ldsdir",
            EncodingKind::Ds => "ds",
            EncodingKind::Exp => "exp",
        }
    }

    /// Whether this encoding natively carries opcodes of `format`. VOP3 additionally carries
    /// the promotable VALU formats through the VOP3 opcode map.
    pub fn carries(&self, format: Format) -> bool {
        match self {
            EncodingKind::Sop1 => format == Format::SOP1,
            EncodingKind::Sop2 => format == Format::SOP2,
            EncodingKind::Sopk => format == Format::SOPK,
            EncodingKind::Sopc => format == Format::SOPC,
            EncodingKind::Sopp => format == Format::SOPP,
            EncodingKind::Smem | EncodingKind::Smem8 | EncodingKind::Smem10 => format == Format::SMEM,
            EncodingKind::Vop1 => format == Format::VOP1,
            EncodingKind::Vop2 => format == Format::VOP2,
            EncodingKind::Vop3 => format.promotes_to_vop3(),
            EncodingKind::Vop3p => format == Format::VOP3P,
            EncodingKind::Vopc => format == Format::VOPC,
            EncodingKind::Vopd => format == Format::VOPD,
            EncodingKind::Mtbuf | EncodingKind::Mtbuf10 | EncodingKind::Mtbuf11 => format == Format::MTBUF,
            EncodingKind::Mubuf | EncodingKind::Mubuf11 => format == Format::MUBUF,
            EncodingKind::Mimg | EncodingKind::Mimg10 | EncodingKind::Mimg11 => format == Format::MIMG,
            EncodingKind::Flat | EncodingKind::Flat11 => {
                matches!(format, Format::FLAT | Format::GLOBAL | Format::SCRATCH)
            }
            EncodingKind::Vintrp => format == Format::VINTRP,
            EncodingKind::Vinterp => format == Format::VINTERP_INREG,
            EncodingKind::Ldsdir => format == Format::LDSDIR,
            EncodingKind::Ds => format == Format::DS,
            EncodingKind::Exp => format == Format::EXP,
        }
    }
}

impl Display for EncodingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct EncodingEntry {
    pub min_gfx: GfxLevel,
    pub max_gfx: GfxLevel,
    /// Identifying bits, right aligned.
    pub pattern: u32,
    /// Number of identifying bits at the top of the first dword.
    pub width: u32,
    /// Base size in dwords, before literals and extension words.
    pub size: u32,
    pub kind: EncodingKind,
}

impl EncodingEntry {
    const fn new(min_gfx: GfxLevel, max_gfx: GfxLevel, pattern: u32, width: u32, size: u32, kind: EncodingKind) -> Self {
        Self { min_gfx, max_gfx, pattern, width, size, kind }
    }

    #[inline]
    pub fn matches(&self, word: u32) -> bool {
        word >> (32 - self.width) == self.pattern
    }

    #[inline]
    pub fn supports(&self, gfx: GfxLevel) -> bool {
        self.min_gfx <= gfx && gfx <= self.max_gfx
    }

    /// The identifying bits positioned in a dword, other bits clear.
    #[inline]
    pub fn pattern_bits(&self) -> u32 {
        self.pattern << (32 - self.width)
    }
}

use EncodingKind as K;
use GfxLevel as G;

#[rustfmt::skip]
pub const ENCODINGS: [EncodingEntry; 35] = [
    // scalar ALU
    EncodingEntry::new(G::Gfx6, G::LATEST, 0b101111101, 9, 1, K::Sop1),
    EncodingEntry::new(G::Gfx6, G::LATEST, 0b10, 2, 1, K::Sop2),
    EncodingEntry::new(G::Gfx6, G::LATEST, 0b1011, 4, 1, K::Sopk),
    EncodingEntry::new(G::Gfx6, G::LATEST, 0b101111110, 9, 1, K::Sopc),
    EncodingEntry::new(G::Gfx6, G::LATEST, 0b101111111, 9, 1, K::Sopp),
    // scalar memory
    EncodingEntry::new(G::Gfx6, G::Gfx7, 0b11000, 5, 1, K::Smem),
    EncodingEntry::new(G::Gfx8, G::Gfx9, 0b110000, 6, 2, K::Smem8),
    EncodingEntry::new(G::Gfx10, G::LATEST, 0b111101, 6, 2, K::Smem10),
    // vector ALU
    EncodingEntry::new(G::Gfx6, G::LATEST, 0b0111111, 7, 1, K::Vop1),
    EncodingEntry::new(G::Gfx6, G::LATEST, 0b0, 1, 1, K::Vop2),
    EncodingEntry::new(G::Gfx6, G::Gfx9, 0b110100, 6, 2, K::Vop3),
    EncodingEntry::new(G::Gfx10, G::LATEST, 0b110101, 6, 2, K::Vop3),
    EncodingEntry::new(G::Gfx9, G::Gfx9, 0b11010011, 8, 2, K::Vop3p),
    EncodingEntry::new(G::Gfx10, G::LATEST, 0b110011, 6, 2, K::Vop3p),
    EncodingEntry::new(G::Gfx6, G::LATEST, 0b0111110, 7, 1, K::Vopc),
    EncodingEntry::new(G::Gfx11, G::LATEST, 0b110010, 6, 2, K::Vopd),
    // vector memory
    EncodingEntry::new(G::Gfx6, G::Gfx9, 0b111010, 6, 2, K::Mtbuf),
    EncodingEntry::new(G::Gfx10, G::Gfx10_3, 0b111010, 6, 2, K::Mtbuf10),
    EncodingEntry::new(G::Gfx11, G::LATEST, 0b111010, 6, 2, K::Mtbuf11),
    EncodingEntry::new(G::Gfx6, G::Gfx10_3, 0b111000, 6, 2, K::Mubuf),
    EncodingEntry::new(G::Gfx11, G::LATEST, 0b111000, 6, 2, K::Mubuf11),
    EncodingEntry::new(G::Gfx6, G::Gfx9, 0b111100, 6, 2, K::Mimg),
    EncodingEntry::new(G::Gfx10, G::Gfx10_3, 0b111100, 6, 2, K::Mimg10),
    EncodingEntry::new(G::Gfx11, G::LATEST, 0b111100, 6, 2, K::Mimg11),
    EncodingEntry::new(G::Gfx6, G::Gfx10_3, 0b110111, 6, 2, K::Flat),
    EncodingEntry::new(G::Gfx11, G::LATEST, 0b110111, 6, 2, K::Flat11),
    // parameter interpolation
    EncodingEntry::new(G::Gfx6, G::Gfx7, 0b110010, 6, 1, K::Vintrp),
    EncodingEntry::new(G::Gfx8, G::Gfx9, 0b110101, 6, 1, K::Vintrp),
    EncodingEntry::new(G::Gfx10, G::Gfx10_3, 0b110010, 6, 1, K::Vintrp),
    EncodingEntry::new(G::Gfx11, G::LATEST, 0b11001101, 8, 2, K::Vinterp),
    EncodingEntry::new(G::Gfx11, G::LATEST, 0b11001110, 8, 1, K::Ldsdir),
    // local data share
    EncodingEntry::new(G::Gfx6, G::LATEST, 0b110110, 6, 2, K::Ds),
    // export
    EncodingEntry::new(G::Gfx6, G::Gfx7, 0b111110, 6, 2, K::Exp),
    EncodingEntry::new(G::Gfx8, G::Gfx9, 0b110001, 6, 2, K::Exp),
    EncodingEntry::new(G::Gfx10, G::LATEST, 0b111110, 6, 2, K::Exp),
];

/// The encodings valid on one generation, widest pattern first.
#[derive(Clone, Debug)]
pub struct EncodingTable {
    gfx: GfxLevel,
    entries: Vec<EncodingEntry>,
}

impl EncodingTable {
    pub fn new(gfx: GfxLevel) -> Self {
        let mut entries: Vec<EncodingEntry> = ENCODINGS.iter().copied().filter(|e| e.supports(gfx)).collect();
        // Stable, so equal widths keep table order.
        entries.sort_by(|a, b| b.width.cmp(&a.width));
        Self { gfx, entries }
    }

    pub fn gfx(&self) -> GfxLevel {
        self.gfx
    }

    pub fn entries(&self) -> &[EncodingEntry] {
        &self.entries
    }

    /// Find the encoding of an instruction from its first dword.
    pub fn lookup(&self, word: u32) -> Option<&EncodingEntry> {
        self.entries.iter().find(|e| e.matches(word))
    }

    /// The entry of a given kind, if the kind exists on this generation.
    pub fn entry(&self, kind: EncodingKind) -> Option<&EncodingEntry> {
        self.entries.iter().find(|e| e.kind == kind)
    }

    /// The native encoding for opcodes of `format` on this generation.
    pub fn native_entry(&self, format: Format) -> Option<&EncodingEntry> {
        self.entries
            .iter()
            .find(|e| e.kind != EncodingKind::Vop3 && e.kind.carries(format))
            .or_else(|| match format {
                Format::VOP3 => self.entry(EncodingKind::Vop3),
                _ => None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widest_patterns_first() {
        for gfx in GfxLevel::ALL {
            let table = EncodingTable::new(gfx);
            for pair in table.entries().windows(2) {
                assert!(pair[0].width >= pair[1].width);
            }
        }
    }

    #[test]
    fn dispatch_scalar_families() {
        let table = EncodingTable::new(GfxLevel::Gfx9);
        assert_eq!(table.lookup(0xbe80_0000).map(|e| e.kind), Some(EncodingKind::Sop1));
        assert_eq!(table.lookup(0xbf00_0000).map(|e| e.kind), Some(EncodingKind::Sopc));
        assert_eq!(table.lookup(0xbf81_0000).map(|e| e.kind), Some(EncodingKind::Sopp));
        assert_eq!(table.lookup(0xb000_0000).map(|e| e.kind), Some(EncodingKind::Sopk));
        assert_eq!(table.lookup(0x8000_0000).map(|e| e.kind), Some(EncodingKind::Sop2));
    }

    #[test]
    fn dispatch_depends_on_generation() {
        let word = 0xc000_0000;
        assert_eq!(EncodingTable::new(GfxLevel::Gfx7).lookup(word).map(|e| e.kind), Some(EncodingKind::Smem));
        assert_eq!(EncodingTable::new(GfxLevel::Gfx9).lookup(word).map(|e| e.kind), Some(EncodingKind::Smem8));
        assert_eq!(EncodingTable::new(GfxLevel::Gfx10).lookup(word), None);

        let vop3 = 0xd400_0000;
        assert_eq!(EncodingTable::new(GfxLevel::Gfx9).lookup(vop3).map(|e| e.kind), Some(EncodingKind::Vintrp));
        assert_eq!(EncodingTable::new(GfxLevel::Gfx10).lookup(vop3).map(|e| e.kind), Some(EncodingKind::Vop3));

        let vopd = 0xc800_0000;
        assert_eq!(EncodingTable::new(GfxLevel::Gfx10_3).lookup(vopd).map(|e| e.kind), Some(EncodingKind::Vintrp));
        assert_eq!(EncodingTable::new(GfxLevel::Gfx11).lookup(vopd).map(|e| e.kind), Some(EncodingKind::Vopd));
    }

    #[test]
    fn vop3p_only_on_gfx9_and_later() {
        let word = 0xd380_0000;
        assert_eq!(EncodingTable::new(GfxLevel::Gfx8).lookup(word).map(|e| e.kind), Some(EncodingKind::Vop3));
        assert_eq!(EncodingTable::new(GfxLevel::Gfx9).lookup(word).map(|e| e.kind), Some(EncodingKind::Vop3p));
    }

    #[test]
    fn every_word_dispatches_or_is_invalid() {
        let table = EncodingTable::new(GfxLevel::Gfx11);
        // 0b111111 has no encoding
        assert_eq!(table.lookup(0xfc00_0000), None);
        assert_eq!(table.lookup(0).map(|e| e.kind), Some(EncodingKind::Vop2));
    }

    #[test]
    fn native_entries() {
        let table = EncodingTable::new(GfxLevel::Gfx10);
        assert_eq!(table.native_entry(Format::VOP2).map(|e| e.kind), Some(EncodingKind::Vop2));
        assert_eq!(table.native_entry(Format::VOP3).map(|e| e.kind), Some(EncodingKind::Vop3));
        assert_eq!(table.native_entry(Format::GLOBAL).map(|e| e.kind), Some(EncodingKind::Flat));
        assert_eq!(table.native_entry(Format::VOPD), None);
    }
}
