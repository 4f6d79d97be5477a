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

use std::{fmt::Display, str::FromStr};

use serde::Deserialize;

use crate::{
    error::IsaDbError,
    format::Format,
    gfx::{EncodingGroup, GfxLevel},
};

pub const FLAG_NO_E64: u32 = 0b0000_0000_0000_0001; // VOP1/VOP2/VOPC opcode without a VOP3 twin
pub const FLAG_CMPX: u32 = 0b0000_0000_0000_0010; // Compare that writes exec
pub const FLAG_LOAD: u32 = 0b0000_0000_0000_0100; // Memory load, returns data
pub const FLAG_STORE: u32 = 0b0000_0000_0000_1000; // Memory store, consumes data
pub const FLAG_ATOMIC: u32 = 0b0000_0000_0001_0000; // Memory atomic, returns data with glc
pub const FLAG_BUFFER: u32 = 0b0000_0000_0010_0000; // SMEM op taking a 4-dword buffer resource
pub const FLAG_VOP3B: u32 = 0b0000_0000_0100_0000; // VOP3 form writes a scalar carry-out
pub const FLAG_SDST: u32 = 0b0000_0000_1000_0000; // VOP3 form writes a scalar definition
pub const FLAG_FMA_MIX: u32 = 0b0000_0001_0000_0000; // VOP3P mixed precision fma
pub const FLAG_NO_OPSEL: u32 = 0b0000_0010_0000_0000; // VOP3/VOP3P form ignores op_sel
pub const FLAG_NO_DATA: u32 = 0b0000_0100_0000_0000; // DS op without a data operand
pub const FLAG_TWO_OFFSETS: u32 = 0b0000_1000_0000_0000; // DS op with offset0/offset1
pub const FLAG_TWO_DATA: u32 = 0b0001_0000_0000_0000; // DS op with data0 and data1
pub const FLAG_INTERP: u32 = 0b0010_0000_0000_0000; // Interpolation op reading an attribute
pub const FLAG_NO_SRC2: u32 = 0b0100_0000_0000_0000; // VOP3 form ignores src2
pub const FLAG_PERMLANE: u32 = 0b1000_0000_0000_0000; // permlane: op_sel carries fi/bound_ctrl
pub const FLAG_LITERAL_K: u32 = 0b0001_0000_0000_0000_0000; // Inline constant dword follows (madmk/madak)
pub const FLAG_LITERAL_K_MID: u32 = 0b0010_0000_0000_0000_0000; // Inline constant sits between src0 and src1
pub const FLAG_VCC_CARRY: u32 = 0b0100_0000_0000_0000_0000; // VOP2 op with implicit vcc carry-out
pub const FLAG_VCC_SRC: u32 = 0b1000_0000_0000_0000_0000; // VOP2 op with implicit vcc source
pub const FLAG_NO_OPERANDS: u32 = 0b0001_0000_0000_0000_0000_0000; // SMEM op without address operands
pub const FLAG_READLANE: u32 = 0b0010_0000_0000_0000_0000_0000; // VOP3 form writes an sgpr
pub const FLAG_NO_HILO: u32 = 0b0100_0000_0000_0000_0000_0000; // 16-bit vgpr operands print without .l/.h

/// Per-opcode behaviour bits gathered from the `flags` column.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub struct OpcodeFlags(pub u32);

impl OpcodeFlags {
    pub fn new(data: u32) -> Self {
        Self(data)
    }
    #[inline(always)]
    pub fn get(&self) -> u32 {
        self.0
    }
    #[inline(always)]
    pub fn has_e64(&self) -> bool {
        self.0 & FLAG_NO_E64 == 0
    }
    #[inline(always)]
    pub fn is_cmpx(&self) -> bool {
        self.0 & FLAG_CMPX != 0
    }
    #[inline(always)]
    pub fn is_load(&self) -> bool {
        self.0 & FLAG_LOAD != 0
    }
    #[inline(always)]
    pub fn is_store(&self) -> bool {
        self.0 & FLAG_STORE != 0
    }
    #[inline(always)]
    pub fn is_atomic(&self) -> bool {
        self.0 & FLAG_ATOMIC != 0
    }
    #[inline(always)]
    pub fn is_buffer(&self) -> bool {
        self.0 & FLAG_BUFFER != 0
    }
    #[inline(always)]
    pub fn is_vop3b(&self) -> bool {
        self.0 & FLAG_VOP3B != 0
    }
    #[inline(always)]
    pub fn has_sdst(&self) -> bool {
        self.0 & (FLAG_SDST | FLAG_READLANE) != 0
    }
    #[inline(always)]
    pub fn is_fma_mix(&self) -> bool {
        self.0 & FLAG_FMA_MIX != 0
    }
    #[inline(always)]
    pub fn ignores_opsel(&self) -> bool {
        self.0 & FLAG_NO_OPSEL != 0
    }
    #[inline(always)]
    pub fn has_data(&self) -> bool {
        self.0 & FLAG_NO_DATA == 0
    }
    #[inline(always)]
    pub fn has_two_offsets(&self) -> bool {
        self.0 & FLAG_TWO_OFFSETS != 0
    }
    #[inline(always)]
    pub fn has_two_data(&self) -> bool {
        self.0 & FLAG_TWO_DATA != 0
    }
    #[inline(always)]
    pub fn is_interp(&self) -> bool {
        self.0 & FLAG_INTERP != 0
    }
    #[inline(always)]
    pub fn ignores_src2(&self) -> bool {
        self.0 & FLAG_NO_SRC2 != 0
    }
    #[inline(always)]
    pub fn is_permlane(&self) -> bool {
        self.0 & FLAG_PERMLANE != 0
    }
    #[inline(always)]
    pub fn has_literal_k(&self) -> bool {
        self.0 & (FLAG_LITERAL_K | FLAG_LITERAL_K_MID) != 0
    }
    #[inline(always)]
    pub fn literal_k_between_sources(&self) -> bool {
        self.0 & FLAG_LITERAL_K_MID != 0
    }
    #[inline(always)]
    pub fn has_vcc_carry(&self) -> bool {
        self.0 & FLAG_VCC_CARRY != 0
    }
    #[inline(always)]
    pub fn has_vcc_source(&self) -> bool {
        self.0 & FLAG_VCC_SRC != 0
    }
    #[inline(always)]
    pub fn has_address(&self) -> bool {
        self.0 & FLAG_NO_OPERANDS == 0
    }
    #[inline(always)]
    pub fn is_readlane(&self) -> bool {
        self.0 & FLAG_READLANE != 0
    }
    #[inline(always)]
    pub fn has_half_registers(&self) -> bool {
        self.0 & FLAG_NO_HILO == 0
    }

    fn from_token(token: &str) -> Option<u32> {
        let bit = match token {
            "noe64" => FLAG_NO_E64,
            "cmpx" => FLAG_CMPX,
            "load" => FLAG_LOAD,
            "store" => FLAG_STORE,
            "atomic" => FLAG_ATOMIC,
            "buffer" => FLAG_BUFFER,
            "vop3b" => FLAG_VOP3B,
            "sdst" => FLAG_SDST,
            "fmamix" => FLAG_FMA_MIX,
            "noopsel" => FLAG_NO_OPSEL,
            "nodata" => FLAG_NO_DATA,
            "offset2" => FLAG_TWO_OFFSETS,
            "data2" => FLAG_TWO_DATA,
            "interp" => FLAG_INTERP,
            "nosrc2" => FLAG_NO_SRC2,
            "permlane" => FLAG_PERMLANE,
            "kimm" => FLAG_LITERAL_K,
            "kmid" => FLAG_LITERAL_K_MID,
            "vcccarry" => FLAG_VCC_CARRY,
            "vccsrc" => FLAG_VCC_SRC,
            "noaddr" => FLAG_NO_OPERANDS,
            "readlane" => FLAG_READLANE,
            "nohilo" => FLAG_NO_HILO,
            _ => return None,
        };
        Some(bit)
    }
}

/// Coarse instruction classification; only branches change how operands print.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstrClass {
    Branch,
    Salu,
    Valu,
    Smem,
    Vmem,
    Ds,
    Exp,
    Waitcnt,
    #[default]
    Other,
}

/// Registers some operands are pinned to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FixedReg {
    Scc,
    Vcc,
    Exec,
    M0,
}

#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, Hash)]
pub enum RegClass {
    #[default]
    Any,
    Sgpr,
    Vgpr,
}

/// Size and placement of one operand or definition.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, Hash)]
pub struct OperandSpec {
    pub class: RegClass,
    pub bytes: u8,
    /// One bit per lane; the printed width depends on the wave size.
    pub lane_mask: bool,
    pub fixed: Option<FixedReg>,
}

impl OperandSpec {
    pub const fn sized(class: RegClass, bytes: u8) -> Self {
        Self { class, bytes, lane_mask: false, fixed: None }
    }

    /// Width in bytes for a given wave size, before any format specific adjustment.
    pub fn bytes(&self, wave_size: u32) -> u32 {
        if self.lane_mask {
            wave_size / 8
        }
        else {
            self.bytes as u32
        }
    }
}

impl FromStr for OperandSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fixed = |reg, lane_mask| OperandSpec {
            class: RegClass::Sgpr,
            bytes: 0,
            lane_mask,
            fixed: Some(reg),
        };
        match s {
            "scc" => return Ok(fixed(FixedReg::Scc, false)),
            "vcc" => return Ok(fixed(FixedReg::Vcc, true)),
            "exec" => return Ok(fixed(FixedReg::Exec, true)),
            "m0" => return Ok(fixed(FixedReg::M0, false)),
            "l" => {
                return Ok(OperandSpec {
                    class: RegClass::Sgpr,
                    bytes: 0,
                    lane_mask: true,
                    fixed: None,
                })
            }
            _ => {}
        }

        let mut chars = s.chars();
        let class = match chars.next() {
            Some('s') => RegClass::Sgpr,
            Some('v') => RegClass::Vgpr,
            Some('a') => RegClass::Any,
            _ => return Err(format!("bad operand signature '{}'", s)),
        };
        let bytes = chars
            .as_str()
            .parse::<u8>()
            .map_err(|e| format!("bad operand size in '{}': {}", s, e))?;
        Ok(OperandSpec::sized(class, bytes))
    }
}

/// Image operation kinds, as far as the disassembler needs to count data and address
/// components.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, Hash)]
pub enum MimgOp {
    #[default]
    Load,
    Store,
    Sample,
    Gather4,
    Atomic,
    MsaaLoad,
    GetLod,
    GetResinfo,
    Bvh,
    Bvh64,
}

pub const MIMG_LOD: u8 = 0b0000_0001;
pub const MIMG_BIAS: u8 = 0b0000_0010;
pub const MIMG_CLAMP: u8 = 0b0000_0100;
pub const MIMG_DERIV: u8 = 0b0000_1000;
pub const MIMG_G16: u8 = 0b0001_0000;
pub const MIMG_COMPARE: u8 = 0b0010_0000;
pub const MIMG_OFFSET: u8 = 0b0100_0000;

#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, Hash)]
pub struct MimgInfo {
    pub op: MimgOp,
    pub flags: u8,
}

impl MimgInfo {
    #[inline(always)]
    pub fn has(&self, flag: u8) -> bool {
        self.flags & flag != 0
    }

    #[inline(always)]
    pub fn is_bvh(&self) -> bool {
        matches!(self.op, MimgOp::Bvh | MimgOp::Bvh64)
    }

    #[inline(always)]
    pub fn uses_sampler(&self) -> bool {
        matches!(self.op, MimgOp::GetLod | MimgOp::Sample | MimgOp::Gather4)
    }
}

impl FromStr for MimgInfo {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('+');
        let op = match parts.next().unwrap_or_default() {
            "load" => MimgOp::Load,
            "store" => MimgOp::Store,
            "sample" => MimgOp::Sample,
            "gather4" => MimgOp::Gather4,
            "atomic" => MimgOp::Atomic,
            "msaa_load" => MimgOp::MsaaLoad,
            "get_lod" => MimgOp::GetLod,
            "get_resinfo" => MimgOp::GetResinfo,
            "bvh" => MimgOp::Bvh,
            "bvh64" => MimgOp::Bvh64,
            other => return Err(format!("unknown image op '{}'", other)),
        };
        let mut flags = 0;
        for part in parts {
            flags |= match part {
                "l" => MIMG_LOD,
                "b" => MIMG_BIAS,
                "cl" => MIMG_CLAMP,
                "d" => MIMG_DERIV,
                "g16" => MIMG_G16,
                "c" => MIMG_COMPARE,
                "o" => MIMG_OFFSET,
                other => return Err(format!("unknown image modifier '{}'", other)),
            };
        }
        Ok(MimgInfo { op, flags })
    }
}

fn de_hex_opt<'de, D>(de: D) -> Result<Option<u16>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(de)?;
    let s = s.trim();
    if s.is_empty() || s == "-" {
        return Ok(None);
    }
    // Accept "0x1A", "1a", "1A"
    let s = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
    u16::from_str_radix(s, 16).map(Some).map_err(serde::de::Error::custom)
}

fn de_definition<'de, D>(de: D) -> Result<Option<OperandSpec>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(de)?;
    let s = s.trim();
    if s.is_empty() || s == "-" {
        return Ok(None);
    }
    OperandSpec::from_str(s).map(Some).map_err(serde::de::Error::custom)
}

fn de_operands<'de, D>(de: D) -> Result<Vec<OperandSpec>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(de)?;
    s.split_whitespace()
        .map(|token| OperandSpec::from_str(token).map_err(serde::de::Error::custom))
        .collect()
}

#[derive(Clone, Debug, Deserialize)]
pub struct IsaRecord {
    pub name: String,
    #[serde(rename = "fmt")]
    pub format_raw: String,
    #[serde(skip, default = "default_format")]
    pub format: Format,
    #[serde(rename = "g7")]
    #[serde(deserialize_with = "de_hex_opt")]
    pub opcode_gfx7: Option<u16>,
    #[serde(rename = "g9")]
    #[serde(deserialize_with = "de_hex_opt")]
    pub opcode_gfx9: Option<u16>,
    #[serde(rename = "g10")]
    #[serde(deserialize_with = "de_hex_opt")]
    pub opcode_gfx10: Option<u16>,
    #[serde(rename = "g11")]
    #[serde(deserialize_with = "de_hex_opt")]
    pub opcode_gfx11: Option<u16>,
    /// Empty inherits the GFX11 opcode, `-` removes the opcode.
    #[serde(rename = "g12")]
    pub opcode_gfx12_raw: String,
    #[serde(skip)]
    pub opcode_gfx12: Option<u16>,
    #[serde(rename = "cls")]
    pub class: InstrClass,
    #[serde(rename = "def")]
    #[serde(deserialize_with = "de_definition")]
    pub definition: Option<OperandSpec>,
    #[serde(rename = "ops")]
    #[serde(deserialize_with = "de_operands")]
    pub operands: Vec<OperandSpec>,
    #[serde(rename = "flags")]
    pub flags_raw: String,
    #[serde(skip)]
    pub flags: OpcodeFlags,
    #[serde(skip)]
    pub data_dwords: u8,
    #[serde(skip)]
    pub mimg: Option<MimgInfo>,
}

fn default_format() -> Format {
    Format::SOPP
}

impl IsaRecord {
    /// Resolve the derived fields from their raw columns.
    pub fn init(&mut self) -> Result<(), IsaDbError> {
        let name = self.name.clone();
        let invalid = |reason: String| IsaDbError::InvalidRecord { name: name.clone(), reason };

        self.format = Format::from_str(&self.format_raw).map_err(|e| invalid(e.to_string()))?;

        self.opcode_gfx12 = match self.opcode_gfx12_raw.trim() {
            "" => self.opcode_gfx11,
            "-" => None,
            raw => {
                let hex = raw.strip_prefix("0x").unwrap_or(raw);
                Some(u16::from_str_radix(hex, 16).map_err(|e| invalid(format!("bad g12 opcode: {}", e)))?)
            }
        };

        if EncodingGroup::ALL.iter().all(|&group| self.encoding(group).is_none()) {
            return Err(invalid("opcode has no encoding on any generation".into()));
        }

        let mut flags = 0;
        self.data_dwords = 1;
        for token in self.flags_raw.split_whitespace() {
            if let Some(bit) = OpcodeFlags::from_token(token) {
                flags |= bit;
            }
            else if let Some(size) = token.strip_prefix('d').and_then(|n| n.parse::<u8>().ok()) {
                self.data_dwords = size;
            }
            else if let Some(info) = token.strip_prefix("mimg=") {
                self.mimg = Some(MimgInfo::from_str(info).map_err(invalid)?);
            }
            else {
                return Err(invalid(format!("unknown flag '{}'", token)));
            }
        }
        self.flags = OpcodeFlags::new(flags);

        if self.format == Format::MIMG && self.mimg.is_none() {
            return Err(invalid("image opcode without mimg= info".into()));
        }
        Ok(())
    }

    /// Numeric opcode for an encoding group, if the opcode exists there.
    pub fn encoding(&self, group: EncodingGroup) -> Option<u16> {
        match group {
            EncodingGroup::Gfx7 => self.opcode_gfx7,
            EncodingGroup::Gfx9 => self.opcode_gfx9,
            EncodingGroup::Gfx10 => self.opcode_gfx10,
            EncodingGroup::Gfx11 => self.opcode_gfx11,
            EncodingGroup::Gfx12 => self.opcode_gfx12,
        }
    }

    pub fn encoding_for(&self, gfx: GfxLevel) -> Option<u16> {
        self.encoding(gfx.encoding_group())
    }

    pub fn operand(&self, index: usize) -> OperandSpec {
        self.operands.get(index).copied().unwrap_or_default()
    }

    pub fn has_definition(&self) -> bool {
        self.definition.is_some()
    }
}

impl Display for IsaRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_operand_specs() {
        let spec: OperandSpec = "v8".parse().expect("parse ok");
        assert_eq!(spec.bytes(64), 8);
        assert_eq!(spec.class, RegClass::Vgpr);

        let mask: OperandSpec = "l".parse().expect("parse ok");
        assert_eq!(mask.bytes(64), 8);
        assert_eq!(mask.bytes(32), 4);

        let vcc: OperandSpec = "vcc".parse().expect("parse ok");
        assert_eq!(vcc.fixed, Some(FixedReg::Vcc));

        let scc: OperandSpec = "scc".parse().expect("parse ok");
        assert_eq!(scc.bytes(64), 0);

        assert!("x4".parse::<OperandSpec>().is_err());
        assert!("s".parse::<OperandSpec>().is_err());
    }

    #[test]
    fn parse_mimg_info() {
        let info: MimgInfo = "sample+l+c".parse().expect("parse ok");
        assert_eq!(info.op, MimgOp::Sample);
        assert!(info.has(MIMG_LOD));
        assert!(info.has(MIMG_COMPARE));
        assert!(!info.has(MIMG_OFFSET));
        assert!(info.uses_sampler());
        assert!("teleport".parse::<MimgInfo>().is_err());
    }
}
