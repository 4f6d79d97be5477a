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

//! Operand and definition printing.
//!
//! Operand widths come from the opcode database and are adjusted for the encoding: some
//! formats always print dword sources, fixed registers such as m0 and scc are implicit, and
//! callers can force a register count for operands whose width depends on other fields.

use gcn_isadb::{FixedReg, Format, GfxLevel, OperandSpec};

use crate::{
    context::InstrContext,
    formatter::{format_hex, format_hex_or_decimal},
    layout::{dpp, sdwa, Field},
    reg::{self, RegName, LITERAL, SCC, SGPR_NULL, VCC, VGPR},
};

/// Which slot of the instruction an operand fills. Index 0 of the definitions is the main
/// result; higher indices are carry-outs and other secondary results.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OperandRole {
    Definition(u32),
    Source(u32),
}

/// Which half of a literal dword a 16-bit operand reads.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum LiteralHalf {
    #[default]
    Full,
    Lo,
    Hi,
}

/// Per-call adjustments to how an operand prints.
#[derive(Copy, Clone, Debug, Default)]
pub struct OperandExtra {
    /// Print a bare space instead of `, ` before the operand.
    pub skip_comma: bool,
    /// Print `null` instead of dropping the operand.
    pub print_null: bool,
    /// Lower bound on the register count.
    pub min_count: u32,
    /// Exact register count, overriding the database width.
    pub count: u32,
    pub opsel: LiteralHalf,
    pub neg: bool,
    pub abs: bool,
    /// Widen by one register for the texture fail status.
    pub tfe: bool,
}

impl OperandExtra {
    pub fn count(count: u32) -> Self {
        Self { count, ..Default::default() }
    }

    pub fn min_count(min_count: u32) -> Self {
        Self { min_count, ..Default::default() }
    }

    pub fn neg(neg: bool) -> Self {
        Self { neg, ..Default::default() }
    }
}

fn operand_spec(ctx: &InstrContext, role: OperandRole) -> OperandSpec {
    match (ctx.record, role) {
        (Some(record), OperandRole::Definition(_)) => record.definition.unwrap_or_default(),
        (Some(record), OperandRole::Source(index)) => record.operand(index as usize),
        (None, _) => OperandSpec::default(),
    }
}

/// Width of an operand in bytes before caller adjustments.
fn operand_bytes(ctx: &InstrContext, role: OperandRole) -> u32 {
    let spec = operand_spec(ctx, role);
    let mut bytes = spec.bytes(ctx.wave_size);

    if let OperandRole::Source(_) = role {
        if ctx.record.is_some_and(|r| r.flags.is_fma_mix()) {
            bytes = 4;
        }
        if ctx.format.is_some_and(|f| f.has_dword_sources()) {
            bytes = 4;
        }
    }

    match spec.fixed {
        Some(FixedReg::M0 | FixedReg::Scc) => 0,
        Some(FixedReg::Vcc | FixedReg::Exec) if bytes == 0 => ctx.wave_size / 8,
        _ => bytes,
    }
}

/// Print a literal dword as read by an operand of `bytes` width.
pub fn print_literal(ctx: &mut InstrContext, literal: u32, bytes: u32, half: LiteralHalf) {
    let text = match half {
        LiteralHalf::Full if bytes == 2 => format_hex(literal & 0xffff),
        LiteralHalf::Full => format_hex(literal),
        LiteralHalf::Lo => format_hex_or_decimal(literal & 0xffff, 64),
        LiteralHalf::Hi => format_hex(literal >> 16),
    };
    ctx.out.write_immediate(&text);
}

/// Print one operand with its leading separator. Returns false if nothing was printed.
pub fn print_operand(ctx: &mut InstrContext, mut operand: u32, role: OperandRole, extra: OperandExtra) -> bool {
    let mut bytes = operand_bytes(ctx, role).max(extra.min_count * 4);
    if bytes == 0 {
        return false;
    }
    if extra.count != 0 {
        bytes = extra.count * 4;
    }

    let base = ctx.base_size();
    let sdwa_index = match role {
        OperandRole::Source(index) if index < 2 && ctx.has_sdwa => Some(index),
        _ => None,
    };

    if let Some(index) = sdwa_index {
        if index == 0 {
            operand = ctx.field(sdwa::SRC0.after(base));
        }
        if ctx.bit(sdwa::SGPR.after(base).nth(index, sdwa::SRC_STRIDE)) {
            operand &= !VGPR;
        }
        else {
            operand |= VGPR;
        }
    }

    if ctx.has_dpp() && role == OperandRole::Source(0) {
        operand = ctx.field(dpp::SRC0.after(base)) | VGPR;
    }

    let gfx = ctx.gfx();
    let mut half_select = None;
    if gfx >= GfxLevel::Gfx11
        && matches!(ctx.encoded_format, Some(Format::VOP1 | Format::VOP2 | Format::VOPC))
        && bytes == 2
        && operand & VGPR != 0
        && ctx.record.map_or(true, |r| r.flags.has_half_registers())
    {
        half_select = Some(operand & 0x80 != 0);
        operand &= !0x80;
    }

    let reg = reg::decode_src(gfx, operand);
    if reg == SGPR_NULL && !extra.print_null {
        return false;
    }
    let is_reg = reg::is_register(reg);

    let listed = match role {
        OperandRole::Source(_) => true,
        OperandRole::Definition(index) => index > 0,
    };
    if (ctx.printed_operand || ctx.has_def) && listed {
        if !extra.skip_comma {
            ctx.out.write_separator(", ");
        }
    }
    else {
        ctx.out.write_separator(" ");
    }

    let mut neg = extra.neg;
    let mut abs = extra.abs;
    if let Some(index) = sdwa_index {
        neg |= ctx.bit(sdwa::NEG.after(base).nth(index, sdwa::SRC_STRIDE));
        abs |= ctx.bit(sdwa::ABS.after(base).nth(index, sdwa::SRC_STRIDE));
    }
    if ctx.has_dpp16 {
        if let OperandRole::Source(index @ 0..=1) = role {
            neg |= ctx.bit(dpp::NEG.after(base).nth(index, 2));
            abs |= ctx.bit(dpp::ABS.after(base).nth(index, 2));
        }
    }

    if neg && is_reg {
        ctx.out.write_symbol("-");
    }

    let mut closing = 0;
    if let Some(index) = sdwa_index {
        if ctx.bit(sdwa::SEXT.after(base).nth(index, sdwa::SRC_STRIDE)) {
            ctx.out.write_symbol("sext(");
            closing += 1;
        }
    }
    if neg && !is_reg {
        ctx.out.write_symbol("neg(");
        closing += 1;
    }
    if abs {
        ctx.out.write_symbol("|");
    }

    if extra.tfe {
        bytes += 4;
    }

    if reg == LITERAL {
        let literal = ctx.word(base);
        print_literal(ctx, literal, bytes, extra.opsel);
        if !ctx.has_literal {
            ctx.total_size += 1;
            ctx.has_literal = true;
        }
    }
    else {
        match reg::reg_name(gfx, reg, bytes) {
            RegName::Register(mut name) => {
                if reg == SCC && matches!(role, OperandRole::Source(_)) {
                    name.insert_str(0, "src_");
                }
                match half_select {
                    Some(true) => name.push_str(".h"),
                    Some(false) => name.push_str(".l"),
                    None => {}
                }
                ctx.out.write_register(&name);
            }
            RegName::Constant(value) => ctx.out.write_immediate(&value),
        }
    }

    if abs {
        ctx.out.write_symbol("|");
    }
    for _ in 0..closing {
        ctx.out.write_symbol(")");
    }

    ctx.printed_operand = true;
    true
}

/// Print an operand at `field` as a source.
pub fn print_source(ctx: &mut InstrContext, field: Field, index: u32) -> bool {
    let operand = ctx.field(field);
    print_operand(ctx, operand, OperandRole::Source(index), OperandExtra::default())
}

/// Print the main definition, if the opcode has one.
pub fn print_definition(ctx: &mut InstrContext, mut def: u32) {
    if !ctx.has_def {
        return;
    }

    if ctx.has_sdwa && ctx.format == Some(Format::VOPC) {
        let base = ctx.base_size();
        def = ctx.field(sdwa::SDST.after(base));
        if !ctx.bit(sdwa::SDST_EN.after(base)) {
            def = VCC;
        }
    }

    print_operand(ctx, def, OperandRole::Definition(0), OperandExtra::default());
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use gcn_isadb::IsaDB;

    use super::*;
    use crate::{encoding::EncodingTable, tables::GenerationTables};

    /// Run `f` against a context for `words` with the named opcode resolved.
    fn with_context(gfx: GfxLevel, words: &[u32], name: &str, f: impl FnOnce(&mut InstrContext)) -> (String, u32) {
        let db = IsaDB::new().expect("database ok");
        let tables = GenerationTables::build(&db, gfx);
        let blocks = HashMap::new();
        let entry = *EncodingTable::new(gfx).lookup(words[0]).expect("encoding matches");
        let index = db.index_of(name).expect("opcode present");

        let mut out = String::new();
        let size = {
            let mut ctx = InstrContext::new(&tables, &mut out, words, 0, entry, &blocks, 64);
            let format = tables.record(index).format;
            ctx.print_record(index, format);
            f(&mut ctx);
            ctx.total_size
        };
        (out, size)
    }

    #[test]
    fn literal_counts_once() {
        // v_add_f32 v0, lit, v1 twice reading the same literal
        let words = [0x0200_02ff, 0x3f80_0000];
        let (text, size) = with_context(GfxLevel::Gfx9, &words, "v_add_f32", |ctx| {
            print_definition(ctx, VGPR);
            print_operand(ctx, LITERAL, OperandRole::Source(0), OperandExtra::default());
            print_operand(ctx, LITERAL, OperandRole::Source(1), OperandExtra::default());
        });
        assert_eq!(text, "v_add_f32_e32 v0, 0x3f800000, 0x3f800000");
        assert_eq!(size, 2);
    }

    #[test]
    fn negated_constants_and_registers() {
        let words = [0x0200_0000];
        let (text, _) = with_context(GfxLevel::Gfx9, &words, "v_add_f32", |ctx| {
            print_definition(ctx, VGPR);
            print_operand(ctx, 242, OperandRole::Source(0), OperandExtra::neg(true));
            print_operand(
                ctx,
                VGPR + 1,
                OperandRole::Source(1),
                OperandExtra { neg: true, abs: true, ..Default::default() },
            );
        });
        assert_eq!(text, "v_add_f32_e32 v0, neg(1.0), -|v1|");
    }

    #[test]
    fn null_is_dropped_unless_requested() {
        let words = [0xbe80_007d];
        let (text, _) = with_context(GfxLevel::Gfx10, &words, "s_mov_b32", |ctx| {
            assert!(!print_operand(ctx, SGPR_NULL, OperandRole::Source(0), OperandExtra::default()));
            let extra = OperandExtra { print_null: true, ..Default::default() };
            assert!(print_operand(ctx, SGPR_NULL, OperandRole::Source(0), extra));
        });
        assert_eq!(text, "s_mov_b32, null");
    }

    #[test]
    fn counts_override_database_width() {
        let words = [0xc000_0000, 0];
        let (text, _) = with_context(GfxLevel::Gfx9, &words, "s_load_dword", |ctx| {
            print_definition(ctx, 4);
            print_operand(ctx, 8, OperandRole::Source(0), OperandExtra::count(2));
            print_operand(ctx, 12, OperandRole::Definition(1), OperandExtra::min_count(4));
        });
        assert_eq!(text, "s_load_dword s4, s[8:9], s[12:15]");
    }

    #[test]
    fn scc_source_prints_with_prefix() {
        let words = [0x0200_0000];
        let (text, _) = with_context(GfxLevel::Gfx9, &words, "v_add_f32", |ctx| {
            print_operand(ctx, SCC, OperandRole::Source(0), OperandExtra::default());
        });
        assert_eq!(text, "v_add_f32_e32, src_scc");
    }

    #[test]
    fn literal_halves() {
        let words = [0xbe80_00ff, 0x1234_0040];
        let (text, _) = with_context(GfxLevel::Gfx9, &words, "s_mov_b32", |ctx| {
            print_literal(ctx, 0x1234_0040, 4, LiteralHalf::Lo);
            print_literal(ctx, 0x1234_0041, 4, LiteralHalf::Lo);
            print_literal(ctx, 0x1234_0041, 4, LiteralHalf::Hi);
            print_literal(ctx, 0x1234_0041, 2, LiteralHalf::Full);
        });
        assert_eq!(text, "s_mov_b32640x410x12340x41");
    }
}
