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

//! Vector memory printers: typed and untyped buffers, images, flat/global/scratch and LDS/GDS.

use gcn_isadb::{
    record::{MIMG_BIAS, MIMG_CLAMP, MIMG_COMPARE, MIMG_DERIV, MIMG_G16, MIMG_LOD, MIMG_OFFSET},
    Format,
    GfxLevel,
    MimgInfo,
    MimgOp,
};

use crate::{
    bits::sign_extend,
    context::InstrContext,
    layout::{buf, ds, flat, mimg, Field},
    operand::{print_definition, print_operand, OperandExtra, OperandRole},
    printers::buffer_format::{split_format_text, unified_format_text},
    reg::{self, SGPR_NULL, VGPR},
};

/// Print ` off` in place of an operand that is not present.
fn print_off(ctx: &mut InstrContext) {
    if ctx.printed_operand {
        ctx.out.write_separator(",");
    }
    ctx.out.write_separator(" ");
    ctx.out.write_register("off");
    ctx.printed_operand = true;
}

/// Bit positions that moved between buffer encodings.
struct BufferBits {
    tfe: Field,
    vaddr_en: Field,
    idxen: Field,
    offen: Field,
}

const BUFFER_BITS: BufferBits = BufferBits {
    tfe: buf::TFE,
    vaddr_en: buf::VADDR_EN,
    idxen: buf::IDXEN,
    offen: buf::OFFEN,
};

const BUFFER_BITS_GFX11: BufferBits = BufferBits {
    tfe: buf::TFE_GFX11,
    vaddr_en: buf::VADDR_EN_GFX11,
    idxen: buf::IDXEN_GFX11,
    offen: buf::OFFEN_GFX11,
};

/// vdata, vaddr, srsrc and soffset, shared by MTBUF and MUBUF.
fn print_buffer_operands(ctx: &mut InstrContext, bits: &BufferBits) {
    let vdata = ctx.field(buf::VDATA) | VGPR;
    let extra = OperandExtra { tfe: ctx.bit(bits.tfe), ..Default::default() };
    let role = if ctx.has_def { OperandRole::Definition(0) } else { OperandRole::Source(3) };
    print_operand(ctx, vdata, role, extra);

    let vaddr_en = ctx.field(bits.vaddr_en);
    if vaddr_en != 0 {
        let vaddr = ctx.field(buf::VADDR) | VGPR;
        print_operand(ctx, vaddr, OperandRole::Source(1), OperandExtra::count(vaddr_en.count_ones()));
    }
    else {
        print_off(ctx);
    }

    let srsrc = ctx.field(buf::SRSRC) << 2;
    print_operand(ctx, srsrc, OperandRole::Source(0), OperandExtra::count(4));
    let soffset = ctx.field(buf::SOFFSET);
    print_operand(ctx, soffset, OperandRole::Source(2), OperandExtra::default());
}

fn print_buffer_addressing(ctx: &mut InstrContext, bits: &BufferBits) {
    ctx.flag("idxen", bits.idxen);
    ctx.flag("offen", bits.offen);
    let offset = ctx.field(buf::OFFSET);
    if offset != 0 {
        ctx.modifier(&format!("offset:{}", offset));
    }
}

fn print_flags(ctx: &mut InstrContext, flags: &[(&str, Field)]) {
    for &(name, field) in flags {
        ctx.flag(name, field);
    }
}

/// GFX6-9 MTBUF.
pub fn disasm_mtbuf(ctx: &mut InstrContext, opcode: u32) {
    ctx.print_opcode(Format::MTBUF, opcode);
    print_buffer_operands(ctx, &BUFFER_BITS);

    let (dfmt, nfmt) = (ctx.field(buf::DFMT), ctx.field(buf::NFMT));
    if let Some(text) = split_format_text(dfmt, nfmt) {
        ctx.modifier(&text);
    }

    print_buffer_addressing(ctx, &BUFFER_BITS);
    print_flags(ctx, &[("glc", buf::GLC), ("slc", buf::SLC), ("tfe", buf::TFE)]);
}

/// GFX10+ MTBUF with a unified format field.
pub fn disasm_mtbuf10(ctx: &mut InstrContext, opcode: u32) {
    let gfx11 = ctx.gfx() >= GfxLevel::Gfx11;
    let bits = if gfx11 { &BUFFER_BITS_GFX11 } else { &BUFFER_BITS };

    ctx.print_opcode(Format::MTBUF, opcode);
    print_buffer_operands(ctx, bits);

    let format = ctx.field(buf::FORMAT);
    if let Some(text) = unified_format_text(ctx.gfx(), format) {
        ctx.modifier(&text);
    }

    print_buffer_addressing(ctx, bits);
    if gfx11 {
        print_flags(
            ctx,
            &[("glc", buf::GLC), ("dlc", buf::DLC_GFX11), ("slc", buf::SLC_GFX11), ("tfe", buf::TFE_GFX11)],
        );
    }
    else {
        print_flags(ctx, &[("glc", buf::GLC), ("dlc", buf::DLC), ("slc", buf::SLC), ("tfe", buf::TFE)]);
    }
}

/// MUBUF before GFX11.
pub fn disasm_mubuf(ctx: &mut InstrContext, opcode: u32) {
    let gfx = ctx.gfx();
    ctx.print_opcode(Format::MUBUF, opcode);
    print_buffer_operands(ctx, &BUFFER_BITS);
    print_buffer_addressing(ctx, &BUFFER_BITS);

    ctx.flag("glc", buf::GLC);
    if gfx > GfxLevel::Gfx9 {
        ctx.flag("dlc", buf::DLC);
    }
    if gfx <= GfxLevel::Gfx7 {
        ctx.flag("addr64", buf::ADDR64);
    }
    ctx.flag("slc", if gfx > GfxLevel::Gfx9 { buf::SLC } else { buf::SLC_GFX6 });
    print_flags(ctx, &[("lds", buf::LDS), ("tfe", buf::TFE)]);
}

pub fn disasm_mubuf11(ctx: &mut InstrContext, opcode: u32) {
    ctx.print_opcode(Format::MUBUF, opcode);
    print_buffer_operands(ctx, &BUFFER_BITS_GFX11);
    print_buffer_addressing(ctx, &BUFFER_BITS_GFX11);
    print_flags(
        ctx,
        &[
            ("glc", buf::GLC),
            ("dlc", buf::DLC_GFX11),
            ("slc", buf::SLC_GFX11),
            ("lds", buf::LDS),
            ("tfe", buf::TFE_GFX11),
        ],
    );
}

const DIMENSIONS: [&str; 8] = ["1D", "2D", "3D", "CUBE", "1D_ARRAY", "2D_ARRAY", "2D_MSAA", "2D_MSAA_ARRAY"];

/// Address components of `dim`, and the extra components a derivative adds.
fn dimension_components(dim: u32) -> (u32, u32) {
    match dim & 7 {
        0 => (1, 2),
        1 => (2, 4),
        2 | 3 => (3, 6),
        4 => (2, 2),
        5 | 6 => (3, 4),
        _ => (4, 4),
    }
}

/// Number of address registers an image opcode reads.
pub fn coord_components(gfx: GfxLevel, info: MimgInfo, dim: u32, a16: bool) -> u32 {
    match (info.op, a16) {
        (MimgOp::Bvh, false) => return 11,
        (MimgOp::Bvh64, false) => return 12,
        (MimgOp::Bvh, true) => return 8,
        (MimgOp::Bvh64, true) => return 9,
        _ => {}
    }

    let (mut comps, mut derivatives) = dimension_components(dim);
    for flag in [MIMG_LOD, MIMG_BIAS, MIMG_CLAMP] {
        if info.has(flag) {
            comps += 1;
        }
    }
    if info.has(MIMG_DERIV) {
        if info.has(MIMG_G16) || gfx <= GfxLevel::Gfx9 {
            derivatives /= 2;
        }
        if a16 {
            derivatives *= 2;
        }
        comps += derivatives;
    }
    for flag in [MIMG_COMPARE, MIMG_OFFSET] {
        if info.has(flag) {
            comps += if a16 { 2 } else { 1 };
        }
    }

    if a16 {
        comps.div_ceil(2)
    }
    else {
        comps
    }
}

/// Registers returned or consumed as image data.
fn data_components(info: MimgInfo, dmask: u32, tfe: bool) -> u32 {
    let comps = match info.op {
        MimgOp::MsaaLoad | MimgOp::Gather4 => 4,
        MimgOp::Atomic => 1,
        _ => dmask.count_ones(),
    };
    comps + tfe as u32
}

fn mimg_info(ctx: &InstrContext) -> MimgInfo {
    ctx.record.and_then(|r| r.mimg).unwrap_or_default()
}

fn print_vdata(ctx: &mut InstrContext, info: MimgInfo, tfe: bool, d16: bool) {
    let dmask = ctx.field(mimg::DMASK);
    let data = data_components(info, dmask, tfe);
    let count = if d16 { data.div_ceil(2) } else { data };
    let vdata = ctx.field(mimg::VDATA) | VGPR;
    let role = if ctx.has_def { OperandRole::Definition(0) } else { OperandRole::Source(2) };
    print_operand(ctx, vdata, role, OperandExtra::count(count));
}

fn print_resource(ctx: &mut InstrContext, info: MimgInfo, count: u32, ssamp: Field) {
    let srsrc = ctx.field(mimg::SRSRC) << 2;
    print_operand(ctx, srsrc, OperandRole::Source(0), OperandExtra::count(count));
    if info.uses_sampler() {
        let sampler = ctx.field(ssamp) << 2;
        print_operand(ctx, sampler, OperandRole::Source(1), OperandExtra::count(4));
    }
}

fn print_dim(ctx: &mut InstrContext, dim: u32) {
    let name = DIMENSIONS[(dim & 7) as usize];
    ctx.modifier(&format!("dim:SQ_RSRC_IMG_{}", name));
}

fn print_dmask(ctx: &mut InstrContext) {
    let dmask = ctx.field(mimg::DMASK);
    ctx.modifier(&format!("dmask:0x{:x}", dmask));
}

/// GFX6-9 MIMG.
pub fn disasm_mimg(ctx: &mut InstrContext, opcode: u32) {
    ctx.print_opcode(Format::MIMG, opcode);
    let info = mimg_info(ctx);

    let tfe = ctx.bit(mimg::TFE);
    let d16 = ctx.bit(mimg::D16);
    print_vdata(ctx, info, tfe, d16);

    // GFX6-9 images have no dimension field; addresses are counted as 1D.
    let coords = coord_components(ctx.gfx(), info, 0, ctx.bit(mimg::A16));
    let vaddr = ctx.field(mimg::VADDR) | VGPR;
    print_operand(ctx, vaddr, OperandRole::Source(0), OperandExtra::count(coords));
    print_resource(ctx, info, 8, mimg::SSAMP);

    print_dmask(ctx);
    print_flags(
        ctx,
        &[
            ("lwe", mimg::LWE),
            ("unorm", mimg::UNORM),
            ("glc", mimg::GLC),
            ("slc", mimg::SLC),
            ("a16", mimg::R128),
            ("da", mimg::DA),
            ("d16", mimg::D16),
            ("tfe", mimg::TFE),
        ],
    );
}

/// Bit positions of the GFX10+ image encodings.
struct ImageBits {
    dim: Field,
    a16: Field,
    d16: Field,
    tfe: Field,
    lwe: Field,
    unorm: Field,
    ssamp: Field,
    dlc: Field,
    glc: Field,
    slc: Field,
}

const IMAGE_BITS_GFX10: ImageBits = ImageBits {
    dim: mimg::DIM_GFX10,
    a16: mimg::A16,
    d16: mimg::D16,
    tfe: mimg::TFE,
    lwe: mimg::LWE,
    unorm: mimg::UNORM,
    ssamp: mimg::SSAMP,
    dlc: mimg::DLC_GFX10,
    glc: mimg::GLC,
    slc: mimg::SLC,
};

const IMAGE_BITS_GFX11: ImageBits = ImageBits {
    dim: mimg::DIM_GFX11,
    a16: mimg::A16_GFX11,
    d16: mimg::D16_GFX11,
    tfe: mimg::TFE_GFX11,
    lwe: mimg::LWE_GFX11,
    unorm: mimg::UNORM_GFX11,
    ssamp: mimg::SSAMP_GFX11,
    dlc: mimg::DLC_GFX11,
    glc: mimg::GLC_GFX11,
    slc: mimg::SLC_GFX11,
};

/// Modifiers and, for ray tracing opcodes, the fields that must hold fixed values.
fn print_image_modifiers(ctx: &mut InstrContext, info: MimgInfo, bits: &ImageBits) {
    let bvh = info.is_bvh();
    if !bvh {
        print_dmask(ctx);
        let dim = ctx.field(bits.dim);
        print_dim(ctx, dim);
        print_flags(ctx, &[("lwe", bits.lwe), ("unorm", bits.unorm)]);
    }

    print_flags(ctx, &[("dlc", bits.dlc), ("glc", bits.glc), ("slc", bits.slc), ("a16", bits.a16)]);

    if !bvh {
        print_flags(ctx, &[("d16", bits.d16), ("tfe", bits.tfe)]);
        return;
    }

    ctx.require_eq("dmask", mimg::DMASK, 0xf);
    ctx.require_eq("d16", bits.d16, 0);
    ctx.require_eq("r128", mimg::R128, 1);
    ctx.require_eq("unorm", bits.unorm, 1);
    ctx.require_eq("dim", bits.dim, 0);
    ctx.require_eq("lwe", bits.lwe, 0);
    ctx.require_eq("tfe", bits.tfe, 0);
    ctx.require_eq("ssamp", bits.ssamp, 0);
}

fn print_nsa_open(ctx: &mut InstrContext, first_count: u32) {
    ctx.out.write_separator(", ");
    ctx.out.write_symbol("[");
    let vaddr = ctx.field(mimg::VADDR) | VGPR;
    let extra = OperandExtra { skip_comma: true, count: first_count, ..Default::default() };
    print_operand(ctx, vaddr, OperandRole::Source(0), extra);
}

fn print_nsa_address(ctx: &mut InstrContext, i: u32, count: u32) {
    let addr = ctx.field(mimg::NSA_ADDR.nth(i, 8)) | VGPR;
    print_operand(ctx, addr, OperandRole::Source(0), OperandExtra::count(count));
}

pub fn disasm_mimg10(ctx: &mut InstrContext, opcode: u32) {
    let bits = &IMAGE_BITS_GFX10;
    ctx.print_opcode(Format::MIMG, opcode);
    let info = mimg_info(ctx);

    let tfe = ctx.bit(bits.tfe);
    let d16 = ctx.bit(bits.d16);
    print_vdata(ctx, info, tfe, d16);

    let nsa = ctx.field(mimg::NSA_GFX10);
    let dim = ctx.field(bits.dim);
    let coords = coord_components(ctx.gfx(), info, dim, ctx.bit(bits.a16));
    if nsa > 0 {
        // One register per address component.
        print_nsa_open(ctx, 1);
        for i in 0..(nsa * 4).min(coords.saturating_sub(1)) {
            print_nsa_address(ctx, i, 1);
        }
        ctx.out.write_symbol("]");
    }
    else {
        let vaddr = ctx.field(mimg::VADDR) | VGPR;
        print_operand(ctx, vaddr, OperandRole::Source(0), OperandExtra::count(coords));
    }
    ctx.total_size += nsa;

    let rsrc_count = if ctx.bit(mimg::R128) { 4 } else { 8 };
    print_resource(ctx, info, rsrc_count, bits.ssamp);
    print_image_modifiers(ctx, info, bits);
}

pub fn disasm_mimg11(ctx: &mut InstrContext, opcode: u32) {
    let bits = &IMAGE_BITS_GFX11;
    ctx.print_opcode(Format::MIMG, opcode);
    let info = mimg_info(ctx);

    let tfe = ctx.bit(bits.tfe);
    let d16 = ctx.bit(bits.d16);
    print_vdata(ctx, info, tfe, d16);

    let nsa = ctx.bit(mimg::NSA_GFX11);
    let a16 = ctx.bit(bits.a16);
    let dim = ctx.field(bits.dim);
    let coords = coord_components(ctx.gfx(), info, dim, a16);
    if nsa {
        print_nsa_open(ctx, if info.op == MimgOp::Bvh64 { 2 } else { 1 });
        if info.is_bvh() {
            // node pointer, ray extent, then origin, direction and inverse direction triples
            let groups = if a16 { 3 } else { 4 };
            for i in 0..groups {
                print_nsa_address(ctx, i, if i > 0 { 3 } else { 1 });
            }
        }
        else {
            let extra = coords.saturating_sub(1);
            for i in 0..extra.min(4) {
                // The last slot takes every remaining component.
                let count = if i == 3 { extra - i } else { 1 };
                print_nsa_address(ctx, i, count);
            }
        }
        ctx.out.write_symbol("]");
    }
    else {
        let vaddr = ctx.field(mimg::VADDR) | VGPR;
        print_operand(ctx, vaddr, OperandRole::Source(0), OperandExtra::count(coords));
    }
    ctx.total_size += nsa as u32;

    let rsrc_count = if ctx.bit(mimg::R128) { 4 } else { 8 };
    print_resource(ctx, info, rsrc_count, bits.ssamp);
    print_image_modifiers(ctx, info, bits);
}

/// Bit positions of the flat encodings.
struct FlatBits {
    glc: Field,
    offset: Field,
}

fn flat_format(ctx: &InstrContext) -> Format {
    match flat::segment_field(ctx.gfx()) {
        Some(seg) => flat::segment_format(ctx.field(seg)),
        None => Format::FLAT,
    }
}

/// Operands shared by both flat encodings. `scratch_off` says whether a scratch access
/// goes without a vector address.
fn print_flat_operands(ctx: &mut InstrContext, format: Format, bits: &FlatBits, scratch_off: impl Fn(bool) -> bool) {
    let (is_load, is_atomic, data_dwords) = match ctx.record {
        Some(r) => (r.flags.is_load(), r.flags.is_atomic(), r.data_dwords as u32),
        None => (false, false, 1),
    };

    if is_load || (is_atomic && ctx.bit(bits.glc)) {
        let vdst = ctx.field(flat::VDST) | VGPR;
        print_operand(ctx, vdst, OperandRole::Definition(0), OperandExtra::min_count(data_dwords));
    }
    else {
        // Atomics without glc return nothing.
        ctx.has_def = false;
    }

    let saddr = ctx.field(flat::SADDR);
    let use_saddr = saddr != 0x7f && reg::decode_src(ctx.gfx(), saddr) != SGPR_NULL && format != Format::FLAT;
    let scratch = format == Format::SCRATCH;

    if scratch && scratch_off(use_saddr) {
        print_off(ctx);
    }
    else {
        let addr = ctx.field(flat::ADDR) | VGPR;
        let count = if scratch || use_saddr { 1 } else { 2 };
        print_operand(ctx, addr, OperandRole::Source(0), OperandExtra::count(count));
    }

    if !is_load {
        let data = ctx.field(flat::DATA) | VGPR;
        print_operand(ctx, data, OperandRole::Source(1), OperandExtra::count(data_dwords));
    }

    if use_saddr {
        let count = if scratch { 1 } else { 2 };
        print_operand(ctx, saddr, OperandRole::Source(2), OperandExtra::count(count));
    }
    else if format != Format::FLAT {
        ctx.out.write_separator(", ");
        ctx.out.write_register("off");
    }

    let offset = ctx.field(bits.offset);
    if offset != 0 {
        let text = if format == Format::FLAT {
            // FLAT offsets are unsigned and one bit narrower.
            let unsigned = Field::new(bits.offset.start, bits.offset.count - 1);
            format!("offset:{}", ctx.field(unsigned))
        }
        else {
            format!("offset:{}", sign_extend(offset, bits.offset.count))
        };
        ctx.modifier(&text);
    }
}

/// FLAT, GLOBAL and SCRATCH before GFX11.
pub fn disasm_flat(ctx: &mut InstrContext, opcode: u32) {
    let bits = FlatBits { glc: flat::GLC, offset: flat::OFFSET };
    let format = flat_format(ctx);
    ctx.print_opcode(format, opcode);
    print_flat_operands(ctx, format, &bits, |use_saddr| use_saddr);
    print_flags(
        ctx,
        &[("glc", flat::GLC), ("dlc", flat::DLC), ("slc", flat::SLC), ("lds", flat::LDS)],
    );
}

pub fn disasm_flat11(ctx: &mut InstrContext, opcode: u32) {
    let bits = FlatBits { glc: flat::GLC_GFX11, offset: flat::OFFSET_GFX11 };
    let format = flat_format(ctx);
    ctx.print_opcode(format, opcode);
    let sve = ctx.bit(flat::SVE_GFX11);
    print_flat_operands(ctx, format, &bits, |_| !sve);
    print_flags(
        ctx,
        &[("glc", flat::GLC_GFX11), ("dlc", flat::DLC_GFX11), ("slc", flat::SLC_GFX11)],
    );
}

pub fn disasm_ds(ctx: &mut InstrContext, opcode: u32) {
    ctx.print_opcode(Format::DS, opcode);
    let vdst = ctx.field(ds::VDST) | VGPR;
    print_definition(ctx, vdst);
    let addr = ctx.field(ds::ADDR) | VGPR;
    print_operand(ctx, addr, OperandRole::Source(0), OperandExtra::default());

    let (flags, data_dwords) = match ctx.record {
        Some(r) => (r.flags, r.data_dwords as u32),
        None => (Default::default(), 1),
    };

    if flags.has_data() {
        let data0 = ctx.field(ds::DATA0) | VGPR;
        print_operand(ctx, data0, OperandRole::Source(1), OperandExtra::count(data_dwords));
        if flags.has_two_data() {
            let data1 = ctx.field(ds::DATA1) | VGPR;
            print_operand(ctx, data1, OperandRole::Source(2), OperandExtra::count(data_dwords));
        }
    }

    if flags.has_two_offsets() {
        for (name, field) in [("offset0", ds::OFFSET0), ("offset1", ds::OFFSET1)] {
            let value = ctx.field(field);
            if value != 0 {
                ctx.modifier(&format!("{}:{}", name, value));
            }
        }
    }
    else {
        let offset = ctx.field(ds::OFFSET);
        if offset != 0 {
            ctx.modifier(&format!("offset:{}", offset));
        }
    }

    let gds = if ctx.gfx() > GfxLevel::Gfx9 { ds::GDS_GFX10 } else { ds::GDS };
    ctx.flag("gds", gds);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(op: MimgOp, flags: u8) -> MimgInfo {
        MimgInfo { op, flags }
    }

    #[test]
    fn coordinate_counts() {
        let gfx = GfxLevel::Gfx10_3;
        assert_eq!(coord_components(gfx, info(MimgOp::Load, 0), 1, false), 2);
        assert_eq!(coord_components(gfx, info(MimgOp::Sample, MIMG_LOD), 5, false), 4);
        assert_eq!(coord_components(gfx, info(MimgOp::Sample, MIMG_COMPARE | MIMG_DERIV), 1, false), 7);
        // a16 packs two components per register
        assert_eq!(coord_components(gfx, info(MimgOp::Sample, MIMG_BIAS), 2, true), 2);
        assert_eq!(coord_components(gfx, info(MimgOp::Bvh64, 0), 0, false), 12);
        assert_eq!(coord_components(gfx, info(MimgOp::Bvh, 0), 0, true), 8);
    }

    #[test]
    fn derivatives_halve_before_gfx10() {
        let deriv = info(MimgOp::Sample, MIMG_DERIV);
        assert_eq!(coord_components(GfxLevel::Gfx9, deriv, 1, false), 4);
        assert_eq!(coord_components(GfxLevel::Gfx10, deriv, 1, false), 6);
        let g16 = info(MimgOp::Sample, MIMG_DERIV | MIMG_G16);
        assert_eq!(coord_components(GfxLevel::Gfx10, g16, 1, false), 4);
    }

    #[test]
    fn data_component_counts() {
        assert_eq!(data_components(info(MimgOp::Load, 0), 0b1011, false), 3);
        assert_eq!(data_components(info(MimgOp::Gather4, 0), 0b0001, false), 4);
        assert_eq!(data_components(info(MimgOp::Atomic, 0), 0b0011, true), 2);
    }
}
