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

//! Trailing modifiers shared by the vector printers.

use gcn_isadb::GfxLevel;

use crate::{
    context::InstrContext,
    layout::{dpp, Field},
};

const SDWA_SELECTS: [&str; 7] = ["BYTE_0", "BYTE_1", "BYTE_2", "BYTE_3", "WORD_0", "WORD_1", "DWORD"];
const DST_UNUSED: [&str; 3] = ["UNUSED_PAD", "UNUSED_SEXT", "UNUSED_PRESERVE"];
const CHANNELS: [char; 4] = ['x', 'y', 'z', 'w'];

pub fn print_sdwa_sel(ctx: &mut InstrContext, name: &str, sel: u32) {
    if let Some(select) = SDWA_SELECTS.get(sel as usize) {
        ctx.modifier(&format!("{}:{}", name, select));
    }
}

pub fn print_dst_unused(ctx: &mut InstrContext, unused: u32) {
    if let Some(mode) = DST_UNUSED.get(unused as usize) {
        ctx.modifier(&format!("dst_unused:{}", mode));
    }
}

pub fn print_omod(ctx: &mut InstrContext, omod: u32) {
    match omod {
        1 => ctx.modifier("mul:2"),
        2 => ctx.modifier("mul:4"),
        3 => ctx.modifier("div:2"),
        _ => {}
    }
}

/// Print `, attrN.c`.
pub fn print_attr(ctx: &mut InstrContext, attr: u32, channel: u32) {
    ctx.out.write_separator(", ");
    let chan = CHANNELS[(channel & 3) as usize];
    ctx.out.write_register(&format!("attr{}.{}", attr, chan));
}

/// Print ` name:[a,b,...]` unless every element equals `ignored`.
pub fn print_integer_array(ctx: &mut InstrContext, name: &str, data: &[u32], ignored: u32) {
    if data.iter().all(|&v| v == ignored) {
        return;
    }
    let items: Vec<String> = data.iter().map(|v| v.to_string()).collect();
    ctx.modifier(&format!("{}:[{}]", name, items.join(",")));
}

fn dpp16_control(gfx: GfxLevel, ctrl: u32) -> Option<String> {
    let text = match ctrl {
        0..=0xff => format!(
            "quad_perm:[{},{},{},{}]",
            ctrl & 3,
            (ctrl >> 2) & 3,
            (ctrl >> 4) & 3,
            (ctrl >> 6) & 3
        ),
        0x101..=0x10f => format!("row_shl:{}", ctrl - 0x100),
        0x111..=0x11f => format!("row_shr:{}", ctrl - 0x110),
        0x121..=0x12f => format!("row_ror:{}", ctrl - 0x120),
        0x140 => "row_mirror".to_string(),
        0x141 => "row_half_mirror".to_string(),
        0x130 if gfx <= GfxLevel::Gfx9 => "wave_shl:1".to_string(),
        0x134 if gfx <= GfxLevel::Gfx9 => "wave_rol:1".to_string(),
        0x138 if gfx <= GfxLevel::Gfx9 => "wave_shr:1".to_string(),
        0x13c if gfx <= GfxLevel::Gfx9 => "wave_ror:1".to_string(),
        0x142 if gfx <= GfxLevel::Gfx9 => "row_bcast:15".to_string(),
        0x143 if gfx <= GfxLevel::Gfx9 => "row_bcast:31".to_string(),
        0x150..=0x15f if gfx >= GfxLevel::Gfx11 => format!("row_share:{}", ctrl - 0x150),
        0x160..=0x16f if gfx >= GfxLevel::Gfx11 => format!("row_xmask:{}", ctrl - 0x160),
        _ => return None,
    };
    Some(text)
}

/// Print the lane controls of a DPP extension dword, if the instruction has one.
pub fn print_dpp(ctx: &mut InstrContext) {
    let base = ctx.base_size();
    let ext = |field: Field| field.after(base);

    if ctx.has_dpp8 || ctx.has_dpp8_fi {
        let lanes: Vec<String> = (0..8)
            .map(|i| ctx.field(ext(dpp::LANE_SEL).nth(i, 3)).to_string())
            .collect();
        ctx.modifier(&format!("dpp8:[{}]", lanes.join(",")));
        if ctx.has_dpp8_fi {
            ctx.modifier("fi:1");
        }
    }

    if !ctx.has_dpp16 {
        return;
    }

    let ctrl = ctx.field(ext(dpp::CTRL));
    if let Some(text) = dpp16_control(ctx.gfx(), ctrl) {
        ctx.modifier(&text);
    }

    let row_mask = ctx.field(ext(dpp::ROW_MASK));
    let bank_mask = ctx.field(ext(dpp::BANK_MASK));
    ctx.modifier(&format!("row_mask:0x{:x}", row_mask));
    ctx.modifier(&format!("bank_mask:0x{:x}", bank_mask));
    ctx.flag("bound_ctrl:1", ext(dpp::BOUND_CTRL));
    if ctx.gfx() > GfxLevel::Gfx9 {
        ctx.flag("fi:1", ext(dpp::FI));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dpp16_controls() {
        assert_eq!(dpp16_control(GfxLevel::Gfx9, 0xe4).as_deref(), Some("quad_perm:[0,1,2,3]"));
        assert_eq!(dpp16_control(GfxLevel::Gfx9, 0x1b).as_deref(), Some("quad_perm:[3,2,1,0]"));
        assert_eq!(dpp16_control(GfxLevel::Gfx9, 0x101).as_deref(), Some("row_shl:1"));
        assert_eq!(dpp16_control(GfxLevel::Gfx10, 0x11f).as_deref(), Some("row_shr:15"));
        assert_eq!(dpp16_control(GfxLevel::Gfx9, 0x142).as_deref(), Some("row_bcast:15"));
        assert_eq!(dpp16_control(GfxLevel::Gfx10, 0x142), None);
        assert_eq!(dpp16_control(GfxLevel::Gfx11, 0x153).as_deref(), Some("row_share:3"));
        assert_eq!(dpp16_control(GfxLevel::Gfx10_3, 0x153), None);
        assert_eq!(dpp16_control(GfxLevel::Gfx9, 0x100), None);
    }
}
