//! Per-encoding instruction printers.
//!
//! Each printer resolves the opcode of its encoding, prints the mnemonic and then walks the
//! encoding's operand fields in assembler order, finishing with any modifiers.

pub mod buffer_format;
pub mod export;
pub mod memory;
pub mod modifiers;
pub mod scalar;
pub mod sopp;
pub mod vector;

use crate::{context::InstrContext, encoding::EncodingKind, layout::opcode_layout};

/// Print the instruction held by `ctx`. Returns the number of dwords it occupies.
pub fn print_instruction(ctx: &mut InstrContext) -> u32 {
    let kind = ctx.entry.kind;
    let opcode = opcode_layout(kind, ctx.gfx())
        .map(|layout| layout.decode(ctx.words))
        .unwrap_or(0);

    match kind {
        EncodingKind::Sop1 => scalar::disasm_sop1(ctx, opcode),
        EncodingKind::Sop2 => scalar::disasm_sop2(ctx, opcode),
        EncodingKind::Sopk => scalar::disasm_sopk(ctx, opcode),
        EncodingKind::Sopc => scalar::disasm_sopc(ctx, opcode),
        EncodingKind::Sopp => sopp::disasm_sopp(ctx, opcode),
        EncodingKind::Smem => scalar::disasm_smrd(ctx, opcode),
        EncodingKind::Smem8 => scalar::disasm_smem8(ctx, opcode),
        EncodingKind::Smem10 => scalar::disasm_smem10(ctx, opcode),
        EncodingKind::Vop1 => vector::disasm_vop1(ctx, opcode),
        EncodingKind::Vop2 => vector::disasm_vop2(ctx, opcode),
        EncodingKind::Vop3 => vector::disasm_vop3(ctx, opcode),
        EncodingKind::Vop3p => vector::disasm_vop3p(ctx, opcode),
        EncodingKind::Vopc => vector::disasm_vopc(ctx, opcode),
        EncodingKind::Vopd => vector::disasm_vopd(ctx, opcode),
        EncodingKind::Mtbuf => memory::disasm_mtbuf(ctx, opcode),
        EncodingKind::Mtbuf10 | EncodingKind::Mtbuf11 => memory::disasm_mtbuf10(ctx, opcode),
        EncodingKind::Mubuf => memory::disasm_mubuf(ctx, opcode),
        EncodingKind::Mubuf11 => memory::disasm_mubuf11(ctx, opcode),
        EncodingKind::Mimg => memory::disasm_mimg(ctx, opcode),
        EncodingKind::Mimg10 => memory::disasm_mimg10(ctx, opcode),
        EncodingKind::Mimg11 => memory::disasm_mimg11(ctx, opcode),
        EncodingKind::Flat => memory::disasm_flat(ctx, opcode),
        EncodingKind::Flat11 => memory::disasm_flat11(ctx, opcode),
        EncodingKind::Vintrp => vector::disasm_vintrp(ctx, opcode),
        EncodingKind::Vinterp => vector::disasm_vinterp(ctx, opcode),
        EncodingKind::Ldsdir => vector::disasm_ldsdir(ctx, opcode),
        EncodingKind::Ds => memory::disasm_ds(ctx, opcode),
        EncodingKind::Exp => export::disasm_exp(ctx),
    }

    ctx.total_size
}
