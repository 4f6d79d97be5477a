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

//! Export printer. Exports have a single opcode, so nothing is looked up.

use gcn_isadb::{Format, GfxLevel};

use crate::{
    context::InstrContext,
    layout::exp,
    operand::{print_operand, OperandExtra, OperandRole},
    reg::VGPR,
};

/// Name of an export target, or `None` for reserved targets.
pub fn target_name(gfx: GfxLevel, target: u32) -> Option<String> {
    let name = match target {
        0..=7 => format!("mrt{}", target),
        8 => "mrtz".to_string(),
        9 => "null".to_string(),
        12..=15 => format!("pos{}", target - 12),
        20 => "prim".to_string(),
        21 if gfx >= GfxLevel::Gfx11 => "dual_src_blend0".to_string(),
        22 if gfx >= GfxLevel::Gfx11 => "dual_src_blend1".to_string(),
        32.. => format!("param{}", target - 32),
        _ => return None,
    };
    Some(name)
}

pub fn disasm_exp(ctx: &mut InstrContext) {
    let gfx = ctx.gfx();
    ctx.format = Some(Format::EXP);
    ctx.encoded_format = Some(Format::EXP);
    ctx.out.write_mnemonic("exp");

    let target = ctx.field(exp::TARGET);
    if let Some(name) = target_name(gfx, target) {
        ctx.out.write_separator(" ");
        ctx.out.write_register(&name);
    }

    // Compressed exports pack two channels per register.
    let stride = if gfx < GfxLevel::Gfx11 && ctx.bit(exp::COMPR) { 2 } else { 1 };
    for i in 0..4u32 {
        let enabled = ctx.bit(exp::EN.nth(i - i % stride, 1));
        if enabled {
            let vsrc = ctx.field(exp::VSRC.nth(i / stride, 8)) | VGPR;
            print_operand(ctx, vsrc, OperandRole::Source(0), OperandExtra::min_count(1));
        }
        else {
            if i != 0 {
                ctx.out.write_separator(",");
            }
            ctx.out.write_separator(" ");
            ctx.out.write_register("off");
        }
        ctx.printed_operand = true;
    }

    ctx.flag("done", exp::DONE);
    if gfx >= GfxLevel::Gfx11 {
        ctx.flag("row_en", exp::ROW_EN);
    }
    else {
        ctx.flag("compr", exp::COMPR);
        ctx.flag("vm", exp::VM);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_targets() {
        assert_eq!(target_name(GfxLevel::Gfx9, 0).as_deref(), Some("mrt0"));
        assert_eq!(target_name(GfxLevel::Gfx9, 8).as_deref(), Some("mrtz"));
        assert_eq!(target_name(GfxLevel::Gfx9, 13).as_deref(), Some("pos1"));
        assert_eq!(target_name(GfxLevel::Gfx9, 35).as_deref(), Some("param3"));
        assert_eq!(target_name(GfxLevel::Gfx10_3, 21), None);
        assert_eq!(target_name(GfxLevel::Gfx11, 21).as_deref(), Some("dual_src_blend0"));
        assert_eq!(target_name(GfxLevel::Gfx11, 10), None);
    }
}
