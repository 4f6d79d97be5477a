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

//! Physical register encoding and naming.
//!
//! Source operand fields are 9 bits wide: 0..=255 name scalar registers, special registers and
//! inline constants, 256..=511 name vector registers. Narrower fields are widened by OR-ing in
//! [VGPR] where the field can only hold a vector register.

use gcn_isadb::GfxLevel;

pub const VGPR: u32 = 0x100;

pub const FLAT_SCRATCH_LO: u32 = 102;
pub const XNACK_MASK_HI: u32 = 105;
pub const VCC: u32 = 106;
pub const VCC_HI: u32 = 107;
pub const M0: u32 = 124;
pub const SGPR_NULL: u32 = 125;
pub const EXEC: u32 = 126;
pub const EXEC_HI: u32 = 127;
pub const SCC: u32 = 253;
pub const LITERAL: u32 = 255;

/// Sentinel values of the VOP src0 field selecting an extension dword.
pub const SRC_DPP8: u32 = 233;
pub const SRC_DPP8_FI: u32 = 234;
pub const SRC_SDWA: u32 = 249;
pub const SRC_DPP16: u32 = 250;

const FLOAT_CONSTANTS: [&str; 9] = ["0.5", "-0.5", "1.0", "-1.0", "2.0", "-2.0", "4.0", "-4.0", "0.15915494"];

const SRC_SPECIAL: [&str; 5] = [
    "src_shared_base",
    "src_shared_limit",
    "src_private_base",
    "src_private_limit",
    "src_pops_exiting_wave_id",
];

const LEGACY_FLAT_XNACK: [&str; 4] = ["flat_scratch_lo", "flat_scratch_hi", "xnack_mask_lo", "xnack_mask_hi"];

const LEGACY_TRAP: [&str; 4] = ["tba_lo", "tba_hi", "tma_lo", "tma_hi"];

/// A printable source or destination: either a register or an inline value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegName {
    Register(String),
    Constant(String),
}

impl RegName {
    pub fn as_str(&self) -> &str {
        match self {
            RegName::Register(s) | RegName::Constant(s) => s,
        }
    }
}

/// GFX11 exchanged the encodings of m0 and null.
#[inline]
pub fn decode_src(gfx: GfxLevel, reg: u32) -> u32 {
    if gfx >= GfxLevel::Gfx11 {
        match reg {
            M0 => SGPR_NULL,
            SGPR_NULL => M0,
            _ => reg,
        }
    }
    else {
        reg
    }
}

/// True for encodings naming an actual register rather than a constant or special value.
#[inline]
pub fn is_register(reg: u32) -> bool {
    reg < VCC || reg > LITERAL
}

fn ttmp_base(gfx: GfxLevel) -> u32 {
    if gfx >= GfxLevel::Gfx9 {
        108
    }
    else {
        112
    }
}

fn range(prefix: &str, first: u32, dwords: u32) -> String {
    if dwords <= 1 {
        format!("{}{}", prefix, first)
    }
    else {
        format!("{}[{}:{}]", prefix, first, first + dwords - 1)
    }
}

/// Name a register encoding spanning `bytes` bytes. `bytes` is rounded up to whole dwords.
pub fn reg_name(gfx: GfxLevel, reg: u32, bytes: u32) -> RegName {
    let dwords = bytes.div_ceil(4).max(1);
    let ttmp = ttmp_base(gfx);

    let name = match reg {
        0..=101 => range("s", reg, dwords),
        FLAT_SCRATCH_LO..=XNACK_MASK_HI if gfx <= GfxLevel::Gfx9 => {
            LEGACY_FLAT_XNACK[(reg - FLAT_SCRATCH_LO) as usize].to_string()
        }
        FLAT_SCRATCH_LO..=XNACK_MASK_HI => range("s", reg, dwords),
        VCC if dwords >= 2 => "vcc".to_string(),
        VCC => "vcc_lo".to_string(),
        VCC_HI => "vcc_hi".to_string(),
        108..=111 if ttmp > 108 => LEGACY_TRAP[(reg - 108) as usize].to_string(),
        108..=123 => range("ttmp", reg - ttmp, dwords),
        M0 => "m0".to_string(),
        SGPR_NULL => "null".to_string(),
        EXEC if dwords >= 2 => "exec".to_string(),
        EXEC => "exec_lo".to_string(),
        EXEC_HI => "exec_hi".to_string(),
        128..=192 => return RegName::Constant((reg - 128).to_string()),
        193..=208 => return RegName::Constant(format!("-{}", reg - 192)),
        235..=239 => SRC_SPECIAL[(reg - 235) as usize].to_string(),
        240..=248 => return RegName::Constant(FLOAT_CONSTANTS[(reg - 240) as usize].to_string()),
        251 => "src_vccz".to_string(),
        252 => "src_execz".to_string(),
        SCC => "scc".to_string(),
        254 => "src_lds_direct".to_string(),
        256..=511 => range("v", reg - VGPR, dwords),
        _ => format!("unknown{}", reg),
    };
    RegName::Register(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_and_vector_ranges() {
        assert_eq!(reg_name(GfxLevel::Gfx9, 0, 4).as_str(), "s0");
        assert_eq!(reg_name(GfxLevel::Gfx9, 4, 16).as_str(), "s[4:7]");
        assert_eq!(reg_name(GfxLevel::Gfx9, VGPR + 3, 8).as_str(), "v[3:4]");
        assert_eq!(reg_name(GfxLevel::Gfx9, VGPR + 255, 4).as_str(), "v255");
        assert_eq!(reg_name(GfxLevel::Gfx9, VGPR + 7, 2).as_str(), "v7");
    }

    #[test]
    fn special_registers() {
        assert_eq!(reg_name(GfxLevel::Gfx10, VCC, 8).as_str(), "vcc");
        assert_eq!(reg_name(GfxLevel::Gfx10, VCC, 4).as_str(), "vcc_lo");
        assert_eq!(reg_name(GfxLevel::Gfx10, EXEC, 8).as_str(), "exec");
        assert_eq!(reg_name(GfxLevel::Gfx10, M0, 4).as_str(), "m0");
        assert_eq!(reg_name(GfxLevel::Gfx9, 108, 4).as_str(), "ttmp0");
        assert_eq!(reg_name(GfxLevel::Gfx8, 112, 8).as_str(), "ttmp[0:1]");
        assert_eq!(reg_name(GfxLevel::Gfx8, 108, 4).as_str(), "tba_lo");
        assert_eq!(reg_name(GfxLevel::Gfx9, 104, 4).as_str(), "xnack_mask_lo");
        assert_eq!(reg_name(GfxLevel::Gfx10, 104, 4).as_str(), "s104");
    }

    #[test]
    fn inline_constants() {
        assert_eq!(reg_name(GfxLevel::Gfx9, 128, 4), RegName::Constant("0".into()));
        assert_eq!(reg_name(GfxLevel::Gfx9, 192, 4).as_str(), "64");
        assert_eq!(reg_name(GfxLevel::Gfx9, 193, 4).as_str(), "-1");
        assert_eq!(reg_name(GfxLevel::Gfx9, 208, 4).as_str(), "-16");
        assert_eq!(reg_name(GfxLevel::Gfx9, 242, 4).as_str(), "1.0");
        assert_eq!(reg_name(GfxLevel::Gfx9, 248, 4).as_str(), "0.15915494");
    }

    #[test]
    fn null_and_m0_swap_on_gfx11() {
        assert_eq!(decode_src(GfxLevel::Gfx10_3, M0), M0);
        assert_eq!(decode_src(GfxLevel::Gfx11, M0), SGPR_NULL);
        assert_eq!(decode_src(GfxLevel::Gfx11, SGPR_NULL), M0);
        assert_eq!(decode_src(GfxLevel::Gfx11, 3), 3);
    }
}
