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

//! Vector ALU printers: VOP1, VOP2, VOP3, VOP3P, VOPC, VOPD and the interpolation encodings.

use gcn_isadb::{Format, GfxLevel, RegClass};

use crate::{
    context::InstrContext,
    formatter::format_hex,
    layout::{ldsdir, sdwa, vinterp, vintrp, vop, vop3, vop3p, vopd, Field},
    operand::{print_definition, print_operand, print_source, LiteralHalf, OperandExtra, OperandRole},
    printers::modifiers::{print_attr, print_dpp, print_dst_unused, print_integer_array, print_omod, print_sdwa_sel},
    reg::{LITERAL, VCC, VGPR},
};

/// Where the inline constant of a madmk/madak style opcode sits.
#[derive(Copy, Clone, PartialEq, Eq)]
enum KPosition {
    BetweenSources,
    AfterSources,
}

fn literal_k(ctx: &InstrContext) -> Option<KPosition> {
    let flags = ctx.record?.flags;
    if !flags.has_literal_k() {
        None
    }
    else if flags.literal_k_between_sources() {
        Some(KPosition::BetweenSources)
    }
    else {
        Some(KPosition::AfterSources)
    }
}

/// Print the constant dword trailing the base encoding if it belongs at `position`.
/// When src0 already printed the literal, that dword is the constant and is not repeated.
fn print_literal_k(ctx: &mut InstrContext, position: KPosition, src0_literal: bool) {
    if literal_k(ctx) != Some(position) || src0_literal {
        return;
    }
    let base = ctx.base_size();
    let k = ctx.word(base);
    ctx.out.write_separator(", ");
    ctx.out.write_immediate(&format_hex(k));
    ctx.total_size = base + 1;
    ctx.has_literal = true;
}

/// True if any of the definition or first three sources is 16 bits wide.
fn has_16bit_operands(ctx: &InstrContext) -> bool {
    let Some(record) = ctx.record
    else {
        return false;
    };
    let wave = ctx.wave_size;
    let def16 = record.definition.is_some_and(|d| d.bytes(wave) == 2);
    def16 || (0..3).any(|i| record.operand(i).bytes(wave) == 2)
}

fn print_sdwa_tail(ctx: &mut InstrContext, with_src1: bool) {
    let base = ctx.base_size();
    let [omod, dst_sel, dst_unused, src0_sel, src1_sel] = [
        sdwa::OMOD,
        sdwa::DST_SEL,
        sdwa::DST_UNUSED,
        sdwa::SRC0_SEL,
        sdwa::SRC1_SEL,
    ]
    .map(|f| ctx.field(f.after(base)));

    ctx.flag("clamp", sdwa::CLAMP.after(base));
    print_omod(ctx, omod);
    print_sdwa_sel(ctx, "dst_sel", dst_sel);
    print_dst_unused(ctx, dst_unused);
    print_sdwa_sel(ctx, "src0_sel", src0_sel);
    if with_src1 {
        print_sdwa_sel(ctx, "src1_sel", src1_sel);
    }
}

pub fn disasm_vop1(ctx: &mut InstrContext, opcode: u32) {
    let src0 = ctx.field(vop::SRC0);
    ctx.detect_suffix(src0);
    ctx.print_opcode(Format::VOP1, opcode);

    // readfirstlane writes an sgpr through the vdst field
    let scalar_def = ctx
        .record
        .and_then(|r| r.definition)
        .is_some_and(|d| d.class == RegClass::Sgpr);
    let vdst = ctx.field(vop::VDST);
    print_definition(ctx, if scalar_def { vdst } else { vdst | VGPR });
    print_source(ctx, vop::SRC0, 0);

    if ctx.has_sdwa {
        print_sdwa_tail(ctx, false);
    }
    print_dpp(ctx);
}

pub fn disasm_vop2(ctx: &mut InstrContext, opcode: u32) {
    let src0 = ctx.field(vop::SRC0);
    ctx.detect_suffix(src0);
    ctx.print_opcode(Format::VOP2, opcode);

    let flags = ctx.record.map(|r| r.flags).unwrap_or_default();
    let vdst = ctx.field(vop::VDST);
    print_definition(ctx, vdst | VGPR);
    if flags.has_vcc_carry() {
        let count = ctx.wave_size / 32;
        print_operand(ctx, VCC, OperandRole::Definition(1), OperandExtra::count(count));
    }

    print_source(ctx, vop::SRC0, 0);
    let src0_literal = src0 == LITERAL;
    print_literal_k(ctx, KPosition::BetweenSources, src0_literal);
    let vsrc1 = ctx.field(vop::VSRC1) | VGPR;
    print_operand(ctx, vsrc1, OperandRole::Source(1), OperandExtra::default());

    if flags.has_vcc_source() {
        print_operand(ctx, VCC, OperandRole::Source(2), OperandExtra::default());
    }
    print_literal_k(ctx, KPosition::AfterSources, src0_literal);

    if ctx.has_sdwa {
        print_sdwa_tail(ctx, true);
    }
    print_dpp(ctx);
}

/// GFX11 VOP3 and VOP3P carry DPP through the src0 field of the second dword.
fn detect_vop3_dpp(ctx: &mut InstrContext) {
    if ctx.gfx() >= GfxLevel::Gfx11 {
        let src0 = ctx.field(vop3::SRC0);
        ctx.detect_suffix(src0);
        ctx.has_sdwa = false;
    }
}

pub fn disasm_vop3(ctx: &mut InstrContext, opcode: u32) {
    detect_vop3_dpp(ctx);

    let Some(index) = ctx.tables.lookup_vop3(opcode)
    else {
        log::debug!("{:05}: no VOP3 opcode {:#x}", ctx.offset, opcode);
        ctx.print_invalid_opcode();
        return;
    };
    let record = ctx.tables.record(index);
    let format = record.format;
    ctx.print_record(index, format);
    ctx.encoded_format = Some(Format::VOP3);

    let flags = record.flags;
    let has_sdst = flags.is_vop3b();
    let force_sdst = format == Format::VOPC || flags.is_readlane();
    let cmpx = format == Format::VOPC && flags.is_cmpx() && ctx.gfx() > GfxLevel::Gfx9;

    if cmpx {
        ctx.out.write_separator(" ");
    }
    else {
        let vdst = ctx.field(vop3::VDST);
        print_definition(ctx, if force_sdst { vdst } else { vdst | VGPR });
    }

    let is_vinterp = format == Format::VOP3 && flags.is_interp();
    let sources = [vop3::SRC0, vop3::SRC1, vop3::SRC2];

    if has_sdst {
        let count = ctx.wave_size / 32;
        let sdst = ctx.field(vop3::SDST);
        print_operand(ctx, sdst, OperandRole::Definition(1), OperandExtra::count(count));
        for (i, field) in sources.into_iter().enumerate() {
            let src = ctx.field(field);
            let neg = ctx.bit(vop3::NEG.nth(i as u32, 1));
            print_operand(ctx, src, OperandRole::Source(i as u32), OperandExtra::neg(neg));
        }
    }
    else {
        let has_opsel = has_16bit_operands(ctx) && !flags.ignores_opsel();
        let mut opsel = Vec::with_capacity(5);

        for (i, field) in sources.into_iter().enumerate() {
            let i = i as u32;
            if i == 2 && flags.ignores_src2() {
                continue;
            }
            // Interpolation reads the attribute through src0, so its first register operand
            // lives in src1.
            let field = if i == 0 && is_vinterp { vop3::SRC1 } else { field };
            let extra = OperandExtra {
                skip_comma: i == 0 && cmpx,
                neg: ctx.bit(vop3::NEG.nth(i, 1)),
                abs: ctx.bit(vop3::ABS.nth(i, 1)),
                ..Default::default()
            };
            let src = ctx.field(field);
            if print_operand(ctx, src, OperandRole::Source(i), extra) && has_opsel {
                opsel.push(ctx.field(vop3::OPSEL.nth(i, 1)));
            }
            if i == 0 && is_vinterp {
                let (attr, chan) = (ctx.field(vop3::ATTR), ctx.field(vop3::ATTR_CHAN));
                print_attr(ctx, attr, chan);
            }
        }

        if is_vinterp {
            ctx.flag("high", vop3::HIGH);
        }
        if has_opsel {
            opsel.push(ctx.field(vop3::OPSEL_DST));
        }
        if flags.is_permlane() {
            // fi and bound_ctrl
            opsel.push(ctx.field(vop3::OPSEL));
            opsel.push(ctx.field(vop3::OPSEL.nth(1, 1)));
        }
        print_integer_array(ctx, "op_sel", &opsel, 0);
    }

    let clamp = if ctx.gfx() > GfxLevel::Gfx7 { vop3::CLAMP } else { vop3::CLAMP_GFX6 };
    ctx.flag("clamp", clamp);
    let omod = ctx.field(vop3::OMOD);
    print_omod(ctx, omod);
    print_dpp(ctx);
}

pub fn disasm_vop3p(ctx: &mut InstrContext, opcode: u32) {
    detect_vop3_dpp(ctx);
    ctx.print_opcode(Format::VOP3P, opcode);

    let flags = ctx.record.map(|r| r.flags).unwrap_or_default();
    let fma_mix = flags.is_fma_mix();
    let has_opsel = !fma_mix && !flags.ignores_opsel();

    let vdst = ctx.field(vop3p::VDST);
    print_definition(ctx, vdst | VGPR);

    let bits = |ctx: &InstrContext, fields: [Field; 3]| fields.map(|f| ctx.field(f));
    let opsel = bits(ctx, [vop3p::OPSEL, vop3p::OPSEL.nth(1, 1), vop3p::OPSEL.nth(2, 1)]);
    let opsel_hi = bits(ctx, [vop3p::OPSEL_HI, vop3p::OPSEL_HI.nth(1, 1), vop3p::OPSEL_HI2]);
    let neg = bits(ctx, [vop3p::NEG, vop3p::NEG.nth(1, 1), vop3p::NEG.nth(2, 1)]);
    let neg_hi = bits(ctx, [vop3p::NEG_HI, vop3p::NEG_HI.nth(1, 1), vop3p::NEG_HI.nth(2, 1)]);

    let mut count = 0;
    for (i, field) in [vop3::SRC0, vop3::SRC1, vop3::SRC2].into_iter().enumerate() {
        let mut extra = OperandExtra::default();
        if fma_mix {
            extra.opsel = LiteralHalf::Lo;
            extra.neg = neg[i] != 0;
            extra.abs = neg_hi[i] != 0;
        }
        let src = ctx.field(field);
        if print_operand(ctx, src, OperandRole::Source(i as u32), extra) {
            count += 1;
        }
    }

    if has_opsel || fma_mix {
        print_integer_array(ctx, "op_sel", &opsel[..count], 0);
        print_integer_array(ctx, "op_sel_hi", &opsel_hi[..count], if fma_mix { 0 } else { 1 });
        if has_opsel {
            print_integer_array(ctx, "neg_lo", &neg[..count], 0);
            print_integer_array(ctx, "neg_hi", &neg_hi[..count], 0);
        }
    }

    ctx.flag("clamp", vop3p::CLAMP);
    print_dpp(ctx);
}

pub fn disasm_vopc(ctx: &mut InstrContext, opcode: u32) {
    let src0 = ctx.field(vop::SRC0);
    ctx.detect_suffix(src0);
    ctx.print_opcode(Format::VOPC, opcode);

    let cmpx = ctx.record.is_some_and(|r| r.flags.is_cmpx());
    let has_vcc = !cmpx || ctx.gfx() <= GfxLevel::Gfx9;
    if has_vcc {
        print_definition(ctx, VCC);
    }
    else {
        ctx.out.write_separator(" ");
    }

    let extra = OperandExtra { skip_comma: !has_vcc, ..Default::default() };
    print_operand(ctx, src0, OperandRole::Source(0), extra);
    let vsrc1 = ctx.field(vop::VSRC1) | VGPR;
    print_operand(ctx, vsrc1, OperandRole::Source(1), OperandExtra::default());

    if ctx.has_sdwa {
        let base = ctx.base_size();
        let src0_sel = ctx.field(sdwa::SRC0_SEL.after(base));
        let src1_sel = ctx.field(sdwa::SRC1_SEL.after(base));
        print_sdwa_sel(ctx, "src0_sel", src0_sel);
        print_sdwa_sel(ctx, "src1_sel", src1_sel);
    }
    print_dpp(ctx);
}

/// Print one half of a dual-issue pair.
fn print_vopd_half(ctx: &mut InstrContext, opcode: u32, vdst: u32, src0: Field, vsrc1: Field) {
    ctx.print_opcode(Format::VOPD, opcode);
    print_definition(ctx, vdst | VGPR);
    let src0_literal = ctx.field(src0) == LITERAL;
    print_source(ctx, src0, 0);
    print_literal_k(ctx, KPosition::BetweenSources, src0_literal);
    let vsrc1 = ctx.field(vsrc1) | VGPR;
    print_operand(ctx, vsrc1, OperandRole::Source(1), OperandExtra::default());
    print_literal_k(ctx, KPosition::AfterSources, src0_literal);
}

pub fn disasm_vopd(ctx: &mut InstrContext, opcode_x: u32) {
    let vdst_x = ctx.field(vopd::VDST_X);
    print_vopd_half(ctx, opcode_x, vdst_x, vopd::SRC0_X, vopd::VSRC1_X);

    ctx.out.write_separator(" :: ");

    // The Y destination always has the opposite bank parity of X.
    let parity = if ctx.bit(vopd::VDST_X_LSB) { 0 } else { 1 };
    let vdst_y = (ctx.field(vopd::VDST_Y) << 1) | parity;
    let opcode_y = ctx.field(vopd::OPCODE_Y);
    print_vopd_half(ctx, opcode_y, vdst_y, vopd::SRC0_Y, vopd::VSRC1_Y);
}

pub fn disasm_vintrp(ctx: &mut InstrContext, opcode: u32) {
    ctx.print_opcode(Format::VINTRP, opcode);
    let vdst = ctx.field(vintrp::VDST);
    print_definition(ctx, vdst | VGPR);

    if ctx.is("v_interp_mov_f32") {
        ctx.out.write_separator(", ");
        match ctx.field(vintrp::VSRC) {
            0 => ctx.out.write_immediate("p10"),
            1 => ctx.out.write_immediate("p20"),
            2 => ctx.out.write_immediate("p0"),
            _ => ctx.out.write_error("(invalid S1)"),
        }
    }
    else {
        let vsrc = ctx.field(vintrp::VSRC) | VGPR;
        print_operand(ctx, vsrc, OperandRole::Source(0), OperandExtra::default());
    }

    let (attr, chan) = (ctx.field(vintrp::ATTR), ctx.field(vintrp::ATTR_CHAN));
    print_attr(ctx, attr, chan);
}

pub fn disasm_vinterp(ctx: &mut InstrContext, opcode: u32) {
    ctx.print_opcode(Format::VINTERP_INREG, opcode);
    let vdst = ctx.field(vinterp::VDST);
    print_definition(ctx, vdst | VGPR);

    for (i, field) in [vinterp::SRC0, vinterp::SRC1, vinterp::SRC2].into_iter().enumerate() {
        let src = ctx.field(field);
        let neg = ctx.bit(vinterp::NEG.nth(i as u32, 1));
        print_operand(ctx, src, OperandRole::Source(i as u32), OperandExtra::neg(neg));
    }

    if has_16bit_operands(ctx) {
        let opsel: Vec<u32> = (0..4).map(|i| ctx.field(vinterp::OPSEL.nth(i, 1))).collect();
        print_integer_array(ctx, "op_sel", &opsel, 0);
    }

    ctx.flag("clamp", vinterp::CLAMP);
    let wait_exp = ctx.field(vinterp::WAIT_EXP);
    ctx.modifier(&format!("wait_exp:{}", wait_exp));
}

pub fn disasm_ldsdir(ctx: &mut InstrContext, opcode: u32) {
    ctx.print_opcode(Format::LDSDIR, opcode);
    let vdst = ctx.field(ldsdir::VDST) | VGPR;
    print_operand(ctx, vdst, OperandRole::Definition(0), OperandExtra::min_count(1));

    if ctx.is("lds_param_load") {
        let (attr, chan) = (ctx.field(ldsdir::ATTR), ctx.field(ldsdir::ATTR_CHAN));
        print_attr(ctx, attr, chan);
    }

    let wait_vdst = ctx.field(ldsdir::WAIT_VDST);
    ctx.modifier(&format!("wait_vdst:{}", wait_vdst));
}
