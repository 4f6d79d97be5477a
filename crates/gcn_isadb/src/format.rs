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

use std::{fmt::Display, str::FromStr};

use crate::error::IsaDbError;

/// Instruction format families. An opcode belongs to exactly one format; the encoding used to
/// carry it may differ (a VOP2 opcode can be encoded as VOP3, a GLOBAL opcode uses the FLAT
/// encoding).
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Format {
    SOP1,
    SOP2,
    SOPK,
    SOPC,
    SOPP,
    SMEM,
    VOP1,
    VOP2,
    VOP3,
    VOP3P,
    VOPC,
    VOPD,
    VINTRP,
    VINTERP_INREG,
    LDSDIR,
    DS,
    MTBUF,
    MUBUF,
    MIMG,
    FLAT,
    GLOBAL,
    SCRATCH,
    EXP,
}

impl Format {
    pub const ALL: [Format; 23] = [
        Format::SOP1,
        Format::SOP2,
        Format::SOPK,
        Format::SOPC,
        Format::SOPP,
        Format::SMEM,
        Format::VOP1,
        Format::VOP2,
        Format::VOP3,
        Format::VOP3P,
        Format::VOPC,
        Format::VOPD,
        Format::VINTRP,
        Format::VINTERP_INREG,
        Format::LDSDIR,
        Format::DS,
        Format::MTBUF,
        Format::MUBUF,
        Format::MIMG,
        Format::FLAT,
        Format::GLOBAL,
        Format::SCRATCH,
        Format::EXP,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            Format::SOP1 => "SOP1",
            Format::SOP2 => "SOP2",
            Format::SOPK => "SOPK",
            Format::SOPC => "SOPC",
            Format::SOPP => "SOPP",
            Format::SMEM => "SMEM",
            Format::VOP1 => "VOP1",
            Format::VOP2 => "VOP2",
            Format::VOP3 => "VOP3",
            Format::VOP3P => "VOP3P",
            Format::VOPC => "VOPC",
            Format::VOPD => "VOPD",
            Format::VINTRP => "VINTRP",
            Format::VINTERP_INREG => "VINTERP_INREG",
            Format::LDSDIR => "LDSDIR",
            Format::DS => "DS",
            Format::MTBUF => "MTBUF",
            Format::MUBUF => "MUBUF",
            Format::MIMG => "MIMG",
            Format::FLAT => "FLAT",
            Format::GLOBAL => "GLOBAL",
            Format::SCRATCH => "SCRATCH",
            Format::EXP => "EXP",
        }
    }

    /// Formats whose opcodes can also be carried by the 64-bit VOP3 encoding.
    pub fn promotes_to_vop3(&self) -> bool {
        matches!(self, Format::VOP1 | Format::VOP2 | Format::VOPC | Format::VINTRP | Format::VOP3)
    }

    /// Memory-like formats always read their sources as full dwords.
    pub fn has_dword_sources(&self) -> bool {
        matches!(
            self,
            Format::EXP
                | Format::SMEM
                | Format::DS
                | Format::LDSDIR
                | Format::MIMG
                | Format::FLAT
                | Format::GLOBAL
                | Format::SCRATCH
        )
    }
}

impl Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for Format {
    type Err = IsaDbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Format::ALL
            .iter()
            .copied()
            .find(|format| format.to_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| IsaDbError::InvalidOptions(format!("Unknown instruction format: {}", s)))
    }
}
