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

/// Hardware generations understood by the opcode database, in release order.
#[derive(Copy, Clone, Default, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum GfxLevel {
    #[default]
    Gfx6,
    Gfx7,
    Gfx8,
    Gfx9,
    Gfx10,
    Gfx10_3,
    Gfx11,
    Gfx11_5,
    Gfx12,
}

/// Generations that share one numeric opcode assignment. Each group is a column of the
/// opcode database.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum EncodingGroup {
    Gfx7,
    Gfx9,
    Gfx10,
    Gfx11,
    Gfx12,
}

impl EncodingGroup {
    pub const ALL: [EncodingGroup; 5] = [
        EncodingGroup::Gfx7,
        EncodingGroup::Gfx9,
        EncodingGroup::Gfx10,
        EncodingGroup::Gfx11,
        EncodingGroup::Gfx12,
    ];
}

impl GfxLevel {
    pub const ALL: [GfxLevel; 9] = [
        GfxLevel::Gfx6,
        GfxLevel::Gfx7,
        GfxLevel::Gfx8,
        GfxLevel::Gfx9,
        GfxLevel::Gfx10,
        GfxLevel::Gfx10_3,
        GfxLevel::Gfx11,
        GfxLevel::Gfx11_5,
        GfxLevel::Gfx12,
    ];

    /// The newest generation; used as the open upper bound of generation ranges.
    pub const LATEST: GfxLevel = GfxLevel::Gfx12;

    pub fn encoding_group(&self) -> EncodingGroup {
        match self {
            GfxLevel::Gfx6 | GfxLevel::Gfx7 => EncodingGroup::Gfx7,
            GfxLevel::Gfx8 | GfxLevel::Gfx9 => EncodingGroup::Gfx9,
            GfxLevel::Gfx10 | GfxLevel::Gfx10_3 => EncodingGroup::Gfx10,
            GfxLevel::Gfx11 | GfxLevel::Gfx11_5 => EncodingGroup::Gfx11,
            GfxLevel::Gfx12 => EncodingGroup::Gfx12,
        }
    }

    /// Wave32 only exists from GFX10 on.
    pub fn supports_wave32(&self) -> bool {
        *self >= GfxLevel::Gfx10
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            GfxLevel::Gfx6 => "gfx6",
            GfxLevel::Gfx7 => "gfx7",
            GfxLevel::Gfx8 => "gfx8",
            GfxLevel::Gfx9 => "gfx9",
            GfxLevel::Gfx10 => "gfx10",
            GfxLevel::Gfx10_3 => "gfx10.3",
            GfxLevel::Gfx11 => "gfx11",
            GfxLevel::Gfx11_5 => "gfx11.5",
            GfxLevel::Gfx12 => "gfx12",
        }
    }
}

impl Display for GfxLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for GfxLevel {
    type Err = IsaDbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        GfxLevel::ALL
            .iter()
            .copied()
            .find(|gfx| gfx.to_str() == lower || gfx.to_str().replace('.', "_") == lower)
            .ok_or_else(|| IsaDbError::InvalidOptions(format!("Unknown GFX level: {}", s)))
    }
}
