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

//! Instruction field layouts.
//!
//! Bit positions are absolute within the instruction (bit 32 is bit 0 of the second dword).
//! Each encoding family gets a module of named fields; fields that moved between generations
//! carry the generation they apply from in their name. Fields of the DPP and SDWA extension
//! dwords are relative to the extension and are placed with [Field::after].

use gcn_isadb::GfxLevel;

use crate::{bits, encoding::EncodingKind};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Field {
    pub start: u32,
    pub count: u32,
}

impl Field {
    pub const fn new(start: u32, count: u32) -> Self {
        Self { start, count }
    }

    pub const fn bit(start: u32) -> Self {
        Self { start, count: 1 }
    }

    /// The same field moved `n` positions up, for per-operand and per-lane fields.
    pub const fn nth(self, n: u32, stride: u32) -> Self {
        Self { start: self.start + n * stride, count: self.count }
    }

    /// The field placed in an extension dword following `base_dwords` dwords.
    pub const fn after(self, base_dwords: u32) -> Self {
        Self { start: self.start + base_dwords * 32, count: self.count }
    }

    #[inline]
    pub fn extract(&self, words: &[u32]) -> u32 {
        bits::extract(words, self.start, self.count)
    }

    #[inline]
    pub fn is_set(&self, words: &[u32]) -> bool {
        self.extract(words) != 0
    }

    /// Write `value` into the field. Bits beyond the end of `words` are dropped.
    pub fn insert(&self, words: &mut [u32], value: u32) {
        for i in 0..self.count {
            let bit = self.start + i;
            if let Some(word) = words.get_mut((bit / 32) as usize) {
                let mask = 1u32 << (bit % 32);
                if value >> i & 1 != 0 {
                    *word |= mask;
                }
                else {
                    *word &= !mask;
                }
            }
        }
    }
}

/// Where an encoding keeps its opcode. A few encodings split the opcode across two fields.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct OpcodeLayout {
    pub low: Field,
    /// Upper opcode bits and the shift they are placed at.
    pub high: Option<(Field, u32)>,
}

impl OpcodeLayout {
    const fn single(start: u32, count: u32) -> Self {
        Self { low: Field::new(start, count), high: None }
    }

    const fn split(low: Field, high: Field, shift: u32) -> Self {
        Self { low, high: Some((high, shift)) }
    }

    pub fn decode(&self, words: &[u32]) -> u32 {
        let mut opcode = self.low.extract(words);
        if let Some((field, shift)) = self.high {
            opcode |= field.extract(words) << shift;
        }
        opcode
    }

    pub fn encode(&self, words: &mut [u32], opcode: u32) {
        self.low.insert(words, opcode);
        if let Some((field, shift)) = self.high {
            field.insert(words, opcode >> shift);
        }
    }

    /// Largest opcode the layout can hold.
    pub fn max_opcode(&self) -> u32 {
        let bits = self.low.count + self.high.map(|(f, _)| f.count).unwrap_or(0);
        (1u32 << bits) - 1
    }
}

/// The opcode field of an encoding on a generation. Exports have no opcode.
pub fn opcode_layout(kind: EncodingKind, gfx: GfxLevel) -> Option<OpcodeLayout> {
    let layout = match kind {
        EncodingKind::Sop1 => OpcodeLayout::single(8, 8),
        EncodingKind::Sop2 => OpcodeLayout::single(23, 7),
        EncodingKind::Sopk => OpcodeLayout::single(23, 5),
        EncodingKind::Sopc | EncodingKind::Sopp => OpcodeLayout::single(16, 7),
        EncodingKind::Smem => OpcodeLayout::single(22, 5),
        EncodingKind::Smem8 | EncodingKind::Smem10 => OpcodeLayout::single(18, 8),
        EncodingKind::Vop1 => OpcodeLayout::single(9, 8),
        EncodingKind::Vop2 => OpcodeLayout::single(25, 6),
        EncodingKind::Vopc => OpcodeLayout::single(17, 8),
        EncodingKind::Vop3 if gfx > GfxLevel::Gfx7 => OpcodeLayout::single(16, 10),
        EncodingKind::Vop3 => OpcodeLayout::single(17, 9),
        EncodingKind::Vop3p => OpcodeLayout::single(16, 7),
        EncodingKind::Vopd => OpcodeLayout::single(22, 4),
        EncodingKind::Mtbuf | EncodingKind::Mtbuf11 => OpcodeLayout::single(15, 4),
        EncodingKind::Mtbuf10 => OpcodeLayout::split(Field::new(16, 3), Field::bit(53), 3),
        EncodingKind::Mubuf if gfx >= GfxLevel::Gfx10 => OpcodeLayout::single(18, 8),
        EncodingKind::Mubuf => OpcodeLayout::single(18, 7),
        EncodingKind::Mubuf11 => OpcodeLayout::single(18, 8),
        EncodingKind::Mimg | EncodingKind::Mimg10 => OpcodeLayout::split(Field::new(18, 7), Field::bit(0), 7),
        EncodingKind::Mimg11 => OpcodeLayout::single(18, 8),
        EncodingKind::Flat => OpcodeLayout::single(18, 8),
        EncodingKind::Flat11 => OpcodeLayout::single(18, 7),
        EncodingKind::Vintrp => OpcodeLayout::single(16, 2),
        EncodingKind::Vinterp => OpcodeLayout::single(16, 7),
        EncodingKind::Ldsdir => OpcodeLayout::single(20, 2),
        EncodingKind::Ds if gfx > GfxLevel::Gfx9 => OpcodeLayout::single(18, 8),
        EncodingKind::Ds => OpcodeLayout::single(17, 8),
        EncodingKind::Exp => return None,
    };
    Some(layout)
}

pub mod sop {
    use super::Field;

    pub const SSRC0: Field = Field::new(0, 8);
    pub const SSRC1: Field = Field::new(8, 8);
    pub const SDST: Field = Field::new(16, 7);
    pub const SIMM16: Field = Field::new(0, 16);
}

/// GFX6-7 SMRD.
pub mod smrd {
    use super::Field;

    pub const OFFSET: Field = Field::new(0, 8);
    pub const IMM: Field = Field::bit(8);
    pub const SBASE: Field = Field::new(9, 6);
    pub const SDST: Field = Field::new(15, 7);
}

/// GFX8+ SMEM.
pub mod smem {
    use super::Field;

    pub const SBASE: Field = Field::new(0, 6);
    pub const SDATA: Field = Field::new(6, 7);
    pub const DLC_GFX11: Field = Field::bit(13);
    pub const SOFFSET_EN: Field = Field::bit(14);
    pub const DLC_GFX10: Field = Field::bit(14);
    pub const GLC_GFX11: Field = Field::bit(14);
    pub const NV: Field = Field::bit(15);
    pub const GLC: Field = Field::bit(16);
    pub const IMM: Field = Field::bit(17);
    pub const OFFSET: Field = Field::new(32, 21);
    pub const SOFFSET: Field = Field::new(57, 7);
}

/// VOP1, VOP2 and VOPC share their operand fields.
pub mod vop {
    use super::Field;

    pub const SRC0: Field = Field::new(0, 9);
    pub const VSRC1: Field = Field::new(9, 8);
    pub const VDST: Field = Field::new(17, 8);
}

/// The SDWA extension dword.
pub mod sdwa {
    use super::Field;

    pub const SRC0: Field = Field::new(0, 8);
    pub const SDST: Field = Field::new(8, 7);
    pub const SDST_EN: Field = Field::bit(15);
    pub const DST_SEL: Field = Field::new(8, 3);
    pub const DST_UNUSED: Field = Field::new(11, 2);
    pub const CLAMP: Field = Field::bit(13);
    pub const OMOD: Field = Field::new(14, 2);
    pub const SRC0_SEL: Field = Field::new(16, 3);
    pub const SRC1_SEL: Field = Field::new(24, 3);
    /// Per-source fields, stepped by [SRC_STRIDE].
    pub const SEXT: Field = Field::bit(19);
    pub const NEG: Field = Field::bit(20);
    pub const ABS: Field = Field::bit(21);
    pub const SGPR: Field = Field::bit(23);
    pub const SRC_STRIDE: u32 = 8;
}

/// The DPP8 and DPP16 extension dword.
pub mod dpp {
    use super::Field;

    pub const SRC0: Field = Field::new(0, 8);
    pub const CTRL: Field = Field::new(8, 9);
    /// Lane select `i` of DPP8, stepped by 3.
    pub const LANE_SEL: Field = Field::new(8, 3);
    pub const FI: Field = Field::bit(18);
    pub const BOUND_CTRL: Field = Field::bit(19);
    /// Per-source fields, stepped by 2.
    pub const NEG: Field = Field::bit(20);
    pub const ABS: Field = Field::bit(21);
    pub const BANK_MASK: Field = Field::new(24, 4);
    pub const ROW_MASK: Field = Field::new(28, 4);
}

pub mod vop3 {
    use super::Field;

    pub const VDST: Field = Field::new(0, 8);
    pub const SDST: Field = Field::new(8, 7);
    /// Per-source fields, stepped by 1.
    pub const ABS: Field = Field::bit(8);
    pub const OPSEL: Field = Field::bit(11);
    pub const OPSEL_DST: Field = Field::bit(14);
    pub const CLAMP_GFX6: Field = Field::bit(11);
    pub const CLAMP: Field = Field::bit(15);
    pub const SRC0: Field = Field::new(32, 9);
    pub const SRC1: Field = Field::new(41, 9);
    pub const SRC2: Field = Field::new(50, 9);
    pub const OMOD: Field = Field::new(59, 2);
    pub const NEG: Field = Field::bit(61);
    /// Attribute fields of interpolation opcodes, which use src0 for the attribute.
    pub const ATTR: Field = Field::new(32, 6);
    pub const ATTR_CHAN: Field = Field::new(38, 2);
    pub const HIGH: Field = Field::bit(40);
}

pub mod vop3p {
    use super::Field;

    pub const VDST: Field = Field::new(0, 8);
    pub const NEG_HI: Field = Field::bit(8);
    pub const OPSEL: Field = Field::bit(11);
    pub const OPSEL_HI2: Field = Field::bit(14);
    pub const CLAMP: Field = Field::bit(15);
    pub const OPSEL_HI: Field = Field::bit(59);
    pub const NEG: Field = Field::bit(61);
}

pub mod vopd {
    use super::Field;

    pub const SRC0_X: Field = Field::new(0, 9);
    pub const VSRC1_X: Field = Field::new(9, 8);
    pub const OPCODE_Y: Field = Field::new(17, 5);
    pub const SRC0_Y: Field = Field::new(32, 9);
    pub const VSRC1_Y: Field = Field::new(41, 8);
    pub const VDST_Y: Field = Field::new(49, 7);
    pub const VDST_X: Field = Field::new(56, 8);
    pub const VDST_X_LSB: Field = Field::bit(56);
}

/// MUBUF and MTBUF operand fields.
pub mod buf {
    use super::Field;

    pub const OFFSET: Field = Field::new(0, 12);
    pub const OFFEN: Field = Field::bit(12);
    pub const VADDR_EN: Field = Field::new(12, 2);
    pub const IDXEN: Field = Field::bit(13);
    pub const GLC: Field = Field::bit(14);
    pub const DLC: Field = Field::bit(15);
    pub const ADDR64: Field = Field::bit(15);
    pub const LDS: Field = Field::bit(16);
    pub const SLC_GFX6: Field = Field::bit(17);
    pub const DFMT: Field = Field::new(19, 4);
    pub const NFMT: Field = Field::new(23, 3);
    pub const FORMAT: Field = Field::new(19, 7);
    pub const VADDR: Field = Field::new(32, 8);
    pub const VDATA: Field = Field::new(40, 8);
    pub const SRSRC: Field = Field::new(48, 5);
    pub const SLC: Field = Field::bit(54);
    pub const TFE: Field = Field::bit(55);
    pub const SOFFSET: Field = Field::new(56, 8);

    pub const SLC_GFX11: Field = Field::bit(12);
    pub const DLC_GFX11: Field = Field::bit(13);
    pub const TFE_GFX11: Field = Field::bit(53);
    pub const VADDR_EN_GFX11: Field = Field::new(54, 2);
    pub const OFFEN_GFX11: Field = Field::bit(54);
    pub const IDXEN_GFX11: Field = Field::bit(55);
}

pub mod mimg {
    use super::Field;

    pub const DMASK: Field = Field::new(8, 4);
    pub const UNORM: Field = Field::bit(12);
    pub const GLC: Field = Field::bit(13);
    pub const DA: Field = Field::bit(14);
    pub const R128: Field = Field::bit(15);
    pub const TFE: Field = Field::bit(16);
    pub const LWE: Field = Field::bit(17);
    pub const SLC: Field = Field::bit(25);
    pub const VADDR: Field = Field::new(32, 8);
    pub const VDATA: Field = Field::new(40, 8);
    pub const SRSRC: Field = Field::new(48, 5);
    pub const SSAMP: Field = Field::new(53, 5);
    pub const A16: Field = Field::bit(62);
    pub const D16: Field = Field::bit(63);
    /// Extra address registers of the NSA form, stepped by 8.
    pub const NSA_ADDR: Field = Field::new(64, 8);

    pub const NSA_GFX10: Field = Field::new(1, 2);
    pub const DIM_GFX10: Field = Field::new(3, 3);
    pub const DLC_GFX10: Field = Field::bit(7);

    pub const NSA_GFX11: Field = Field::bit(0);
    pub const DIM_GFX11: Field = Field::new(2, 3);
    pub const UNORM_GFX11: Field = Field::bit(7);
    pub const SLC_GFX11: Field = Field::bit(12);
    pub const DLC_GFX11: Field = Field::bit(13);
    pub const GLC_GFX11: Field = Field::bit(14);
    pub const A16_GFX11: Field = Field::bit(16);
    pub const D16_GFX11: Field = Field::bit(17);
    pub const TFE_GFX11: Field = Field::bit(53);
    pub const LWE_GFX11: Field = Field::bit(54);
    pub const SSAMP_GFX11: Field = Field::new(58, 5);
}

/// FLAT, GLOBAL and SCRATCH.
pub mod flat {
    use gcn_isadb::{Format, GfxLevel};

    use super::Field;

    pub const OFFSET: Field = Field::new(0, 12);
    pub const OFFSET_FLAT: Field = Field::new(0, 11);
    pub const DLC: Field = Field::bit(12);
    pub const LDS: Field = Field::bit(13);
    pub const SEG: Field = Field::new(14, 2);
    pub const GLC: Field = Field::bit(16);
    pub const SLC: Field = Field::bit(17);
    pub const ADDR: Field = Field::new(32, 8);
    pub const DATA: Field = Field::new(40, 8);
    pub const SADDR: Field = Field::new(48, 7);
    pub const VDST: Field = Field::new(56, 8);

    pub const OFFSET_GFX11: Field = Field::new(0, 13);
    pub const DLC_GFX11: Field = Field::bit(13);
    pub const GLC_GFX11: Field = Field::bit(14);
    pub const SLC_GFX11: Field = Field::bit(15);
    pub const SEG_GFX11: Field = Field::new(16, 2);
    pub const SVE_GFX11: Field = Field::bit(55);

    /// The segment field of the flat encoding in use on `gfx`, if it has one.
    /// GFX7 and GFX8 only know FLAT and leave these bits reserved.
    pub fn segment_field(gfx: GfxLevel) -> Option<Field> {
        match gfx {
            g if g >= GfxLevel::Gfx11 => Some(SEG_GFX11),
            g if g >= GfxLevel::Gfx9 => Some(SEG),
            _ => None,
        }
    }

    pub fn segment_format(seg: u32) -> Format {
        match seg {
            1 => Format::SCRATCH,
            2 => Format::GLOBAL,
            _ => Format::FLAT,
        }
    }

    /// Inverse of [segment_format]. Formats outside the flat family map to FLAT.
    pub fn segment_of(format: Format) -> u32 {
        match format {
            Format::SCRATCH => 1,
            Format::GLOBAL => 2,
            _ => 0,
        }
    }
}

pub mod vintrp {
    use super::Field;

    pub const VSRC: Field = Field::new(0, 8);
    pub const ATTR_CHAN: Field = Field::new(8, 2);
    pub const ATTR: Field = Field::new(10, 6);
    pub const VDST: Field = Field::new(18, 8);
}

pub mod vinterp {
    use super::Field;

    pub const VDST: Field = Field::new(0, 8);
    pub const WAIT_EXP: Field = Field::new(8, 3);
    /// Stepped by 1 for src0, src1, src2 and the destination.
    pub const OPSEL: Field = Field::bit(11);
    pub const CLAMP: Field = Field::bit(15);
    pub const SRC0: Field = Field::new(32, 9);
    pub const SRC1: Field = Field::new(41, 9);
    pub const SRC2: Field = Field::new(50, 9);
    pub const NEG: Field = Field::bit(61);
}

pub mod ldsdir {
    use super::Field;

    pub const VDST: Field = Field::new(0, 8);
    pub const ATTR_CHAN: Field = Field::new(8, 2);
    pub const ATTR: Field = Field::new(10, 6);
    pub const WAIT_VDST: Field = Field::new(16, 4);
}

pub mod ds {
    use super::Field;

    pub const OFFSET: Field = Field::new(0, 16);
    pub const OFFSET0: Field = Field::new(0, 8);
    pub const OFFSET1: Field = Field::new(8, 8);
    pub const GDS: Field = Field::bit(16);
    pub const GDS_GFX10: Field = Field::bit(17);
    pub const ADDR: Field = Field::new(32, 8);
    pub const DATA0: Field = Field::new(40, 8);
    pub const DATA1: Field = Field::new(48, 8);
    pub const VDST: Field = Field::new(56, 8);
}

pub mod exp {
    use super::Field;

    /// Channel enable bit `i`, stepped by 1.
    pub const EN: Field = Field::bit(0);
    pub const TARGET: Field = Field::new(4, 6);
    pub const COMPR: Field = Field::bit(10);
    pub const DONE: Field = Field::bit(11);
    pub const VM: Field = Field::bit(12);
    pub const ROW_EN: Field = Field::bit(13);
    /// Source register `i`, stepped by 8.
    pub const VSRC: Field = Field::new(32, 8);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_extract() {
        let mut words = [0u32; 2];
        smem::OFFSET.insert(&mut words, 0x1f_ffff);
        assert_eq!(words, [0, 0x1f_ffff]);
        smem::SOFFSET.insert(&mut words, 0x7d);
        assert_eq!(smem::SOFFSET.extract(&words), 0x7d);
        assert_eq!(smem::OFFSET.extract(&words), 0x1f_ffff);

        smem::OFFSET.insert(&mut words, 0);
        assert_eq!(smem::SOFFSET.extract(&words), 0x7d);
    }

    #[test]
    fn insert_past_end_is_dropped() {
        let mut words = [0u32; 1];
        mimg::NSA_ADDR.insert(&mut words, 0xff);
        assert_eq!(words, [0]);
    }

    #[test]
    fn split_opcode_fields() {
        let layout = opcode_layout(EncodingKind::Mimg, GfxLevel::Gfx9).expect("mimg has an opcode");
        let mut words = [0u32; 2];
        layout.encode(&mut words, 0x9f);
        assert_eq!(words[0], (0x1f << 18) | 1);
        assert_eq!(layout.decode(&words), 0x9f);
        assert_eq!(layout.max_opcode(), 0xff);

        let layout = opcode_layout(EncodingKind::Mtbuf10, GfxLevel::Gfx10).expect("mtbuf has an opcode");
        layout.encode(&mut words, 0xf);
        assert_eq!(layout.decode(&words), 0xf);
    }

    #[test]
    fn generation_dependent_opcodes() {
        assert_eq!(
            opcode_layout(EncodingKind::Vop3, GfxLevel::Gfx7).map(|l| l.low),
            Some(Field::new(17, 9))
        );
        assert_eq!(
            opcode_layout(EncodingKind::Vop3, GfxLevel::Gfx8).map(|l| l.low),
            Some(Field::new(16, 10))
        );
        assert_eq!(
            opcode_layout(EncodingKind::Ds, GfxLevel::Gfx9).map(|l| l.low),
            Some(Field::new(17, 8))
        );
        assert_eq!(opcode_layout(EncodingKind::Exp, GfxLevel::Gfx9), None);
    }

    #[test]
    fn flat_segment_moves_with_generation() {
        assert_eq!(flat::segment_field(GfxLevel::Gfx8), None);
        assert_eq!(flat::segment_field(GfxLevel::Gfx10_3), Some(flat::SEG));
        assert_eq!(flat::segment_field(GfxLevel::Gfx12), Some(flat::SEG_GFX11));

        let mut words = [0u32; 2];
        let seg = flat::segment_field(GfxLevel::Gfx9).expect("gfx9 has segments");
        seg.insert(&mut words, flat::segment_of(gcn_isadb::Format::GLOBAL));
        assert_eq!(words[0], 2 << 14);
        assert_eq!(flat::segment_format(seg.extract(&words)), gcn_isadb::Format::GLOBAL);
        assert_eq!(flat::segment_format(3), gcn_isadb::Format::FLAT);
    }

    #[test]
    fn extension_fields() {
        let words = [0u32, 0x0000_0008 << 24];
        assert_eq!(dpp::BANK_MASK.after(1).extract(&words), 0x8);
        assert_eq!(sdwa::SGPR.after(1).nth(1, sdwa::SRC_STRIDE).start, 63);
    }
}
