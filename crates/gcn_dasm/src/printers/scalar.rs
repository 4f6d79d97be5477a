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

//! Scalar ALU (SOP1, SOP2, SOPK, SOPC) and scalar memory printers.

use gcn_isadb::{Format, GfxLevel};

use crate::{
    bits::sign_extend,
    context::InstrContext,
    formatter::format_hex,
    layout::{smem, smrd, sop},
    operand::{print_definition, print_operand, print_source, OperandExtra, OperandRole},
    printers::sopp::hwreg_text,
};

pub fn disasm_sop1(ctx: &mut InstrContext, opcode: u32) {
    ctx.print_opcode(Format::SOP1, opcode);
    let sdst = ctx.field(sop::SDST);
    let extra = OperandExtra { print_null: true, ..Default::default() };
    print_operand(ctx, sdst, OperandRole::Definition(0), extra);
    print_source(ctx, sop::SSRC0, 0);
}

pub fn disasm_sop2(ctx: &mut InstrContext, opcode: u32) {
    ctx.print_opcode(Format::SOP2, opcode);
    let sdst = ctx.field(sop::SDST);
    print_definition(ctx, sdst);
    print_source(ctx, sop::SSRC0, 0);
    print_source(ctx, sop::SSRC1, 1);
}

pub fn disasm_sopk(ctx: &mut InstrContext, opcode: u32) {
    ctx.print_opcode(Format::SOPK, opcode);

    let imm = ctx.field(sop::SIMM16);
    let setreg = ctx.is("s_setreg_b32") || ctx.is("s_setreg_imm32_b32");
    if setreg {
        ctx.out.write_separator(" ");
        ctx.out.write_immediate(&hwreg_text(imm));
        ctx.out.write_separator(",");
    }

    if ctx.is("s_setreg_imm32_b32") {
        // The value written is a trailing literal rather than a register.
        let literal = ctx.word(ctx.base_size());
        ctx.out.write_separator(" ");
        ctx.out.write_immediate(&format_hex(literal));
        ctx.total_size = ctx.base_size() + 1;
        ctx.has_literal = true;
        return;
    }

    let sdst = ctx.field(sop::SDST);
    let extra = OperandExtra { print_null: true, min_count: 1, ..Default::default() };
    print_operand(ctx, sdst, OperandRole::Definition(0), extra);

    if ctx.is("s_getreg_b32") {
        ctx.out.write_separator(", ");
        ctx.out.write_immediate(&hwreg_text(imm));
    }
    else if !setreg {
        ctx.out.write_separator(", ");
        ctx.out.write_immediate(&format_hex(imm));
    }
}

pub fn disasm_sopc(ctx: &mut InstrContext, opcode: u32) {
    ctx.print_opcode(Format::SOPC, opcode);
    ctx.out.write_separator(" ");
    let ssrc0 = ctx.field(sop::SSRC0);
    print_operand(ctx, ssrc0, OperandRole::Source(0), OperandExtra { skip_comma: true, ..Default::default() });
    print_source(ctx, sop::SSRC1, 1);
}

/// Scalar memory operand width of the base address: buffer ops take a 4 dword resource.
fn sbase_count(ctx: &InstrContext) -> u32 {
    if ctx.record.is_some_and(|r| r.flags.is_buffer()) {
        4
    }
    else {
        2
    }
}

/// Prints the definition and, for stores, the data register. Returns false if the opcode
/// takes no address.
fn smem_data(ctx: &mut InstrContext, sdata: u32) -> bool {
    print_definition(ctx, sdata);

    let Some(record) = ctx.record
    else {
        return true;
    };
    if record.flags.is_store() {
        let count = record.data_dwords as u32;
        print_operand(ctx, sdata, OperandRole::Source(2), OperandExtra::count(count));
    }
    record.flags.has_address()
}

/// GFX6-7 SMRD.
pub fn disasm_smrd(ctx: &mut InstrContext, opcode: u32) {
    ctx.print_opcode(Format::SMEM, opcode);
    let sdst = ctx.field(smrd::SDST);
    if !smem_data(ctx, sdst) {
        return;
    }

    let sbase = ctx.field(smrd::SBASE) << 1;
    let count = sbase_count(ctx);
    print_operand(ctx, sbase, OperandRole::Source(0), OperandExtra::count(count));

    let offset = ctx.field(smrd::OFFSET);
    if ctx.bit(smrd::IMM) {
        ctx.out.write_separator(", ");
        ctx.out.write_immediate(&format_hex(offset));
    }
    else if offset == crate::reg::LITERAL {
        let literal = ctx.word(ctx.base_size());
        ctx.out.write_separator(", ");
        ctx.out.write_immediate(&format_hex(literal));
        if !ctx.has_literal {
            ctx.total_size += 1;
            ctx.has_literal = true;
        }
    }
    else {
        print_operand(ctx, offset, OperandRole::Source(1), OperandExtra::default());
    }
}

fn print_smem_offset(ctx: &mut InstrContext, offset: u32, printed_soffset: bool) {
    let text = format_hex(sign_extend(offset, 21) as u32);
    if printed_soffset {
        ctx.modifier(&format!("offset:{}", text));
    }
    else {
        ctx.out.write_separator(", ");
        ctx.out.write_immediate(&text);
    }
}

/// GFX8-9 SMEM.
pub fn disasm_smem8(ctx: &mut InstrContext, opcode: u32) {
    ctx.print_opcode(Format::SMEM, opcode);
    let sdata = ctx.field(smem::SDATA);
    if !smem_data(ctx, sdata) {
        return;
    }

    let sbase = ctx.field(smem::SBASE) << 1;
    let count = sbase_count(ctx);
    print_operand(ctx, sbase, OperandRole::Source(0), OperandExtra::count(count));

    let offset = ctx.field(smem::OFFSET);
    let mut printed_soffset = false;
    if ctx.bit(smem::SOFFSET_EN) {
        let soffset = ctx.field(smem::SOFFSET);
        let extra = OperandExtra { print_null: offset == 0, ..Default::default() };
        printed_soffset = print_operand(ctx, soffset, OperandRole::Source(1), extra);
    }

    if ctx.bit(smem::IMM) {
        print_smem_offset(ctx, offset, printed_soffset);
    }
    else {
        print_operand(ctx, offset & 0x7f, OperandRole::Source(1), OperandExtra::count(1));
    }

    ctx.flag("nv", smem::NV);
    ctx.flag("glc", smem::GLC);
}

/// GFX10+ SMEM.
pub fn disasm_smem10(ctx: &mut InstrContext, opcode: u32) {
    ctx.print_opcode(Format::SMEM, opcode);
    let sdata = ctx.field(smem::SDATA);
    if !smem_data(ctx, sdata) {
        return;
    }

    let sbase = ctx.field(smem::SBASE) << 1;
    let count = sbase_count(ctx);
    print_operand(ctx, sbase, OperandRole::Source(0), OperandExtra::count(count));

    let offset = ctx.field(smem::OFFSET);
    let soffset = ctx.field(smem::SOFFSET);
    let extra = OperandExtra { print_null: offset == 0, ..Default::default() };
    let printed_soffset = print_operand(ctx, soffset, OperandRole::Source(1), extra);

    if offset != 0 {
        print_smem_offset(ctx, offset, printed_soffset);
    }

    if ctx.gfx() >= GfxLevel::Gfx11 {
        ctx.flag("dlc", smem::DLC_GFX11);
        ctx.flag("glc", smem::GLC_GFX11);
    }
    else {
        ctx.flag("dlc", smem::DLC_GFX10);
        ctx.flag("glc", smem::GLC);
    }
}
