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

//! Per-generation opcode lookup tables.
//!
//! Built once per disassembler from the opcode database: numeric opcodes keyed by format, the
//! VOP3 opcode space (which re-encodes VOP1, VOP2, VOPC and VINTRP opcodes at fixed offsets),
//! and the display names that replace database names on newer generations.

use std::collections::HashMap;

use gcn_isadb::{Format, GfxLevel, IsaDB, IsaRecord};

/// A display name that applies from `min_gfx` onward.
#[derive(Copy, Clone, Debug)]
pub struct Rename {
    pub min_gfx: GfxLevel,
    pub name: &'static str,
    pub display: &'static str,
}

impl Rename {
    const fn new(min_gfx: GfxLevel, name: &'static str, display: &'static str) -> Self {
        Self { min_gfx, name, display }
    }
}

use GfxLevel as G;

#[rustfmt::skip]
pub const RENAMES: &[Rename] = &[
    Rename::new(G::Gfx11, "s_andn2_b32", "s_and_not1_b32"),
    Rename::new(G::Gfx11, "s_andn2_b64", "s_and_not1_b64"),
    Rename::new(G::Gfx11, "s_orn2_b32", "s_or_not1_b32"),
    Rename::new(G::Gfx11, "s_orn2_b64", "s_or_not1_b64"),
    Rename::new(G::Gfx11, "s_ff1_i32_b32", "s_ctz_i32_b32"),
    Rename::new(G::Gfx11, "s_ff1_i32_b64", "s_ctz_i32_b64"),
    Rename::new(G::Gfx11, "s_flbit_i32_b32", "s_clz_i32_u32"),
    Rename::new(G::Gfx11, "s_flbit_i32_b64", "s_clz_i32_u64"),
    Rename::new(G::Gfx11, "s_flbit_i32", "s_cls_i32"),
    Rename::new(G::Gfx11, "s_flbit_i32_i64", "s_cls_i32_i64"),
    Rename::new(G::Gfx11, "s_andn2_saveexec_b64", "s_and_not1_saveexec_b64"),
    Rename::new(G::Gfx11, "s_orn2_saveexec_b64", "s_or_not1_saveexec_b64"),
    Rename::new(G::Gfx11, "s_andn1_saveexec_b64", "s_and_not0_savexec_b64"),
    Rename::new(G::Gfx11, "s_orn1_saveexec_b64", "s_or_not0_savexec_b64"),
    Rename::new(G::Gfx11, "s_andn1_wrexec_b64", "s_and_not0_wrexec_b64"),
    Rename::new(G::Gfx11, "s_andn2_wrexec_b64", "s_and_not1_wrexec_b64"),
    Rename::new(G::Gfx11, "s_andn2_saveexec_b32", "s_and_not1_saveexec_b32"),
    Rename::new(G::Gfx11, "s_orn2_saveexec_b32", "s_or_not1_saveexec_b32"),
    Rename::new(G::Gfx11, "s_andn1_saveexec_b32", "s_and_not0_savexec_b32"),
    Rename::new(G::Gfx11, "s_orn1_saveexec_b32", "s_or_not0_savexec_b32"),
    Rename::new(G::Gfx11, "s_andn1_wrexec_b32", "s_and_not0_wrexec_b32"),
    Rename::new(G::Gfx11, "s_andn2_wrexec_b32", "s_and_not1_wrexec_b32"),
    Rename::new(G::Gfx11, "s_inst_prefetch", "s_set_inst_prefetch_distance"),
    Rename::new(G::Gfx11, "s_load_dword", "s_load_b32"),
    Rename::new(G::Gfx11, "s_load_dwordx2", "s_load_b64"),
    Rename::new(G::Gfx11, "s_load_dwordx4", "s_load_b128"),
    Rename::new(G::Gfx11, "s_load_dwordx8", "s_load_b256"),
    Rename::new(G::Gfx11, "s_load_dwordx16", "s_load_b512"),
    Rename::new(G::Gfx11, "s_buffer_load_dword", "s_buffer_load_b32"),
    Rename::new(G::Gfx11, "s_buffer_load_dwordx2", "s_buffer_load_b64"),
    Rename::new(G::Gfx11, "s_buffer_load_dwordx4", "s_buffer_load_b128"),
    Rename::new(G::Gfx11, "s_buffer_load_dwordx8", "s_buffer_load_b256"),
    Rename::new(G::Gfx11, "s_buffer_load_dwordx16", "s_buffer_load_b512"),
    Rename::new(G::Gfx10_3, "v_mac_legacy_f32", "v_fmac_legacy_f32"),
    Rename::new(G::Gfx11, "v_mul_legacy_f32", "v_mul_dx9_zero_f32"),
    Rename::new(G::Gfx6, "v_addc_co_u32", "v_addc_u32"),
    Rename::new(G::Gfx6, "v_subb_co_u32", "v_subb_u32"),
    Rename::new(G::Gfx6, "v_subbrev_co_u32", "v_subbrev_u32"),
    Rename::new(G::Gfx10, "v_addc_co_u32", "v_add_co_ci_u32"),
    Rename::new(G::Gfx10, "v_subb_co_u32", "v_sub_co_ci_u32"),
    Rename::new(G::Gfx10, "v_subbrev_co_u32", "v_subrev_co_ci_u32"),
    Rename::new(G::Gfx10, "v_add_u16_e64", "v_add_nc_u16"),
    Rename::new(G::Gfx10, "v_sub_u16_e64", "v_sub_nc_u16"),
    Rename::new(G::Gfx10, "v_mul_lo_u16_e64", "v_mul_lo_u16"),
    Rename::new(G::Gfx10, "v_max_u16_e64", "v_max_u16"),
    Rename::new(G::Gfx10, "v_max_i16_e64", "v_max_i16"),
    Rename::new(G::Gfx10, "v_min_u16_e64", "v_min_u16"),
    Rename::new(G::Gfx10, "v_min_i16_e64", "v_min_i16"),
    Rename::new(G::Gfx10, "v_lshrrev_b16_e64", "v_lshrrev_b16"),
    Rename::new(G::Gfx10, "v_ashrrev_i16_e64", "v_ashrrev_i16"),
    Rename::new(G::Gfx10, "v_lshlrev_b16_e64", "v_lshlrev_b16"),
    Rename::new(G::Gfx11, "v_cvt_pkrtz_f16_f32", "v_cvt_pk_rtz_f16_f32"),
    Rename::new(G::Gfx6, "v_add_co_u32", "v_add_u32"),
    Rename::new(G::Gfx6, "v_sub_co_u32", "v_sub_u32"),
    Rename::new(G::Gfx9, "v_add_co_u32", "v_add_co_u32"),
    Rename::new(G::Gfx9, "v_sub_co_u32", "v_sub_co_u32"),
    Rename::new(G::Gfx10, "v_add_u32", "v_add_nc_u32"),
    Rename::new(G::Gfx10, "v_sub_u32", "v_sub_nc_u32"),
    Rename::new(G::Gfx10, "v_subrev_u32", "v_subrev_nc_u32"),
    Rename::new(G::Gfx11, "v_dot2c_f32_f16", "v_dot2acc_f32_f16"),
    Rename::new(G::Gfx11, "v_cvt_rpi_i32_f32", "v_cvt_nearest_i32_f32"),
    Rename::new(G::Gfx11, "v_cvt_flr_i32_f32", "v_cvt_floor_i32_f32"),
    Rename::new(G::Gfx11, "v_ffbh_u32", "v_clz_i32_u32"),
    Rename::new(G::Gfx11, "v_ffbl_b32", "v_ctz_i32_b32"),
    Rename::new(G::Gfx11, "v_ffbh_i32", "v_cls_i32"),
    Rename::new(G::Gfx9, "v_fma_mix_f32", "v_mad_mix_f32"),
    Rename::new(G::Gfx9, "v_fma_mixlo_f16", "v_mad_mixlo_f16"),
    Rename::new(G::Gfx9, "v_fma_mixhi_f16", "v_mad_mixhi_f16"),
    Rename::new(G::Gfx10, "v_fma_mix_f32", "v_fma_mix_f32"),
    Rename::new(G::Gfx10, "v_fma_mixlo_f16", "v_fma_mixlo_f16"),
    Rename::new(G::Gfx10, "v_fma_mixhi_f16", "v_fma_mixhi_f16"),
    Rename::new(G::Gfx10_3, "v_mad_legacy_f32", "v_fma_legacy_f32"),
    Rename::new(G::Gfx6, "v_subrev_co_u32", "v_subrev_u32"),
    Rename::new(G::Gfx10, "v_add_co_u32_e64", "v_add_co_u32"),
    Rename::new(G::Gfx10, "v_sub_co_u32_e64", "v_sub_co_u32"),
    Rename::new(G::Gfx10, "v_subrev_co_u32_e64", "v_subrev_co_u32"),
    Rename::new(G::Gfx11, "ds_write_b32", "ds_store_b32"),
    Rename::new(G::Gfx11, "ds_write2_b32", "ds_store_2addr_b32"),
    Rename::new(G::Gfx11, "ds_write2st64_b32", "ds_store_2addr_stride64_b32"),
    Rename::new(G::Gfx11, "ds_cmpst_b32", "ds_cmpstore_b32"),
    Rename::new(G::Gfx11, "ds_cmpst_f32", "ds_cmpstore_f32"),
    Rename::new(G::Gfx11, "ds_write_b8", "ds_store_b8"),
    Rename::new(G::Gfx11, "ds_write_b16", "ds_store_b16"),
    Rename::new(G::Gfx11, "ds_wrxchg_rtn_b32", "ds_storexchg_rtn_b32"),
    Rename::new(G::Gfx11, "ds_cmpst_rtn_b32", "ds_cmpstore_rtn_b32"),
    Rename::new(G::Gfx11, "ds_read_b32", "ds_load_b32"),
    Rename::new(G::Gfx11, "ds_read2_b32", "ds_load_2addr_b32"),
    Rename::new(G::Gfx11, "ds_read2st64_b32", "ds_load_2addr_stride64_b32"),
    Rename::new(G::Gfx11, "ds_read_i8", "ds_load_i8"),
    Rename::new(G::Gfx11, "ds_read_u8", "ds_load_u8"),
    Rename::new(G::Gfx11, "ds_read_i16", "ds_load_i16"),
    Rename::new(G::Gfx11, "ds_read_u16", "ds_load_u16"),
    Rename::new(G::Gfx11, "ds_write_b64", "ds_store_b64"),
    Rename::new(G::Gfx11, "ds_write2_b64", "ds_store_2addr_b64"),
    Rename::new(G::Gfx11, "ds_read_b64", "ds_load_b64"),
    Rename::new(G::Gfx11, "ds_read2_b64", "ds_load_2addr_b64"),
    Rename::new(G::Gfx11, "ds_write_b96", "ds_store_b96"),
    Rename::new(G::Gfx11, "ds_write_b128", "ds_store_b128"),
    Rename::new(G::Gfx11, "ds_read_b96", "ds_load_b96"),
    Rename::new(G::Gfx11, "ds_read_b128", "ds_load_b128"),
    Rename::new(G::Gfx11, "buffer_store_byte", "buffer_store_b8"),
    Rename::new(G::Gfx11, "buffer_store_short", "buffer_store_b16"),
    Rename::new(G::Gfx11, "buffer_store_dword", "buffer_store_b32"),
    Rename::new(G::Gfx11, "buffer_store_dwordx2", "buffer_store_b64"),
    Rename::new(G::Gfx11, "buffer_store_dwordx3", "buffer_store_b96"),
    Rename::new(G::Gfx11, "buffer_store_dwordx4", "buffer_store_b128"),
    Rename::new(G::Gfx11, "buffer_load_ubyte", "buffer_load_u8"),
    Rename::new(G::Gfx11, "buffer_load_sbyte", "buffer_load_i8"),
    Rename::new(G::Gfx11, "buffer_load_ushort", "buffer_load_u16"),
    Rename::new(G::Gfx11, "buffer_load_sshort", "buffer_load_i16"),
    Rename::new(G::Gfx11, "buffer_load_dword", "buffer_load_b32"),
    Rename::new(G::Gfx11, "buffer_load_dwordx2", "buffer_load_b64"),
    Rename::new(G::Gfx11, "buffer_load_dwordx3", "buffer_load_b96"),
    Rename::new(G::Gfx11, "buffer_load_dwordx4", "buffer_load_b128"),
    Rename::new(G::Gfx11, "buffer_atomic_swap", "buffer_atomic_swap_b32"),
    Rename::new(G::Gfx11, "buffer_atomic_cmpswap", "buffer_atomic_cmpswap_b32"),
    Rename::new(G::Gfx11, "buffer_atomic_add", "buffer_atomic_add_u32"),
    Rename::new(G::Gfx11, "buffer_atomic_sub", "buffer_atomic_sub_u32"),
    Rename::new(G::Gfx11, "buffer_atomic_smin", "buffer_atomic_min_i32"),
    Rename::new(G::Gfx11, "buffer_atomic_umin", "buffer_atomic_min_u32"),
    Rename::new(G::Gfx11, "buffer_atomic_smax", "buffer_atomic_max_i32"),
    Rename::new(G::Gfx11, "buffer_atomic_umax", "buffer_atomic_max_u32"),
    Rename::new(G::Gfx11, "buffer_atomic_and", "buffer_atomic_and_b32"),
    Rename::new(G::Gfx11, "buffer_atomic_or", "buffer_atomic_or_b32"),
    Rename::new(G::Gfx11, "buffer_atomic_xor", "buffer_atomic_xor_b32"),
    Rename::new(G::Gfx11, "buffer_atomic_inc", "buffer_atomic_inc_u32"),
    Rename::new(G::Gfx11, "buffer_atomic_dec", "buffer_atomic_dec_b32"),
    Rename::new(G::Gfx11, "global_load_ubyte", "global_load_u8"),
    Rename::new(G::Gfx11, "global_load_sbyte", "global_load_i8"),
    Rename::new(G::Gfx11, "global_load_ushort", "global_load_u16"),
    Rename::new(G::Gfx11, "global_load_sshort", "global_load_i16"),
    Rename::new(G::Gfx11, "global_load_dword", "global_load_b32"),
    Rename::new(G::Gfx11, "global_load_dwordx2", "global_load_b64"),
    Rename::new(G::Gfx11, "global_load_dwordx3", "global_load_b96"),
    Rename::new(G::Gfx11, "global_load_dwordx4", "global_load_b128"),
    Rename::new(G::Gfx11, "global_store_byte", "global_store_u8"),
    Rename::new(G::Gfx11, "global_store_short", "global_store_b16"),
    Rename::new(G::Gfx11, "global_store_dword", "global_store_b32"),
    Rename::new(G::Gfx11, "global_store_dwordx2", "global_store_b64"),
    Rename::new(G::Gfx11, "global_store_dwordx3", "global_store_b96"),
    Rename::new(G::Gfx11, "global_store_dwordx4", "global_store_b128"),
    Rename::new(G::Gfx11, "global_atomic_swap", "global_atomic_swap_b32"),
    Rename::new(G::Gfx11, "global_atomic_cmpswap", "global_atomic_cmpswap_b32"),
    Rename::new(G::Gfx11, "global_atomic_add", "global_atomic_add_u32"),
    Rename::new(G::Gfx11, "global_atomic_sub", "global_atomic_sub_u32"),
    Rename::new(G::Gfx11, "global_atomic_smin", "global_atomic_min_i32"),
    Rename::new(G::Gfx11, "global_atomic_umin", "global_atomic_min_u32"),
    Rename::new(G::Gfx11, "global_atomic_smax", "global_atomic_max_i32"),
    Rename::new(G::Gfx11, "global_atomic_umax", "global_atomic_max_u32"),
    Rename::new(G::Gfx11, "global_atomic_and", "global_atomic_and_b32"),
    Rename::new(G::Gfx11, "global_atomic_or", "global_atomic_or_b32"),
    Rename::new(G::Gfx11, "global_atomic_xor", "global_atomic_xor_b32"),
    Rename::new(G::Gfx11, "global_atomic_inc", "global_atomic_inc_u32"),
    Rename::new(G::Gfx11, "global_atomic_dec", "global_atomic_dec_b32"),
    Rename::new(G::Gfx11, "flat_load_ubyte", "flat_load_u8"),
    Rename::new(G::Gfx11, "flat_load_sbyte", "flat_load_i8"),
    Rename::new(G::Gfx11, "flat_load_ushort", "flat_load_u16"),
    Rename::new(G::Gfx11, "flat_load_sshort", "flat_load_i16"),
    Rename::new(G::Gfx11, "flat_load_dword", "flat_load_b32"),
    Rename::new(G::Gfx11, "flat_load_dwordx2", "flat_load_b64"),
    Rename::new(G::Gfx11, "flat_load_dwordx3", "flat_load_b96"),
    Rename::new(G::Gfx11, "flat_load_dwordx4", "flat_load_b128"),
    Rename::new(G::Gfx11, "flat_store_byte", "flat_store_u8"),
    Rename::new(G::Gfx11, "flat_store_short", "flat_store_b16"),
    Rename::new(G::Gfx11, "flat_store_dword", "flat_store_b32"),
    Rename::new(G::Gfx11, "flat_store_dwordx2", "flat_store_b64"),
    Rename::new(G::Gfx11, "flat_store_dwordx3", "flat_store_b96"),
    Rename::new(G::Gfx11, "flat_store_dwordx4", "flat_store_b128"),
    Rename::new(G::Gfx11, "flat_atomic_swap", "flat_atomic_swap_b32"),
    Rename::new(G::Gfx11, "flat_atomic_cmpswap", "flat_atomic_cmpswap_b32"),
    Rename::new(G::Gfx11, "flat_atomic_add", "flat_atomic_add_u32"),
    Rename::new(G::Gfx11, "flat_atomic_sub", "flat_atomic_sub_u32"),
    Rename::new(G::Gfx11, "flat_atomic_smin", "flat_atomic_min_i32"),
    Rename::new(G::Gfx11, "flat_atomic_umin", "flat_atomic_min_u32"),
    Rename::new(G::Gfx11, "flat_atomic_smax", "flat_atomic_max_i32"),
    Rename::new(G::Gfx11, "flat_atomic_umax", "flat_atomic_max_u32"),
    Rename::new(G::Gfx11, "flat_atomic_and", "flat_atomic_and_b32"),
    Rename::new(G::Gfx11, "flat_atomic_or", "flat_atomic_or_b32"),
    Rename::new(G::Gfx11, "flat_atomic_xor", "flat_atomic_xor_b32"),
    Rename::new(G::Gfx11, "flat_atomic_inc", "flat_atomic_inc_u32"),
    Rename::new(G::Gfx11, "flat_atomic_dec", "flat_atomic_dec_b32"),
    Rename::new(G::Gfx11, "scratch_load_ubyte", "scratch_load_u8"),
    Rename::new(G::Gfx11, "scratch_load_sbyte", "scratch_load_i8"),
    Rename::new(G::Gfx11, "scratch_load_ushort", "scratch_load_u16"),
    Rename::new(G::Gfx11, "scratch_load_sshort", "scratch_load_i16"),
    Rename::new(G::Gfx11, "scratch_load_dword", "scratch_load_b32"),
    Rename::new(G::Gfx11, "scratch_load_dwordx2", "scratch_load_b64"),
    Rename::new(G::Gfx11, "scratch_load_dwordx3", "scratch_load_b96"),
    Rename::new(G::Gfx11, "scratch_load_dwordx4", "scratch_load_b128"),
    Rename::new(G::Gfx11, "scratch_store_byte", "scratch_store_u8"),
    Rename::new(G::Gfx11, "scratch_store_short", "scratch_store_b16"),
    Rename::new(G::Gfx11, "scratch_store_dword", "scratch_store_b32"),
    Rename::new(G::Gfx11, "scratch_store_dwordx2", "scratch_store_b64"),
    Rename::new(G::Gfx11, "scratch_store_dwordx3", "scratch_store_b96"),
    Rename::new(G::Gfx11, "scratch_store_dwordx4", "scratch_store_b128"),
    Rename::new(G::Gfx11, "scratch_load_short_d16", "scratch_load_d16_b16"),
    Rename::new(G::Gfx11, "scratch_load_short_d16_hi", "scratch_load_d16_hi_b16"),
    Rename::new(G::Gfx11, "v_interp_p10_f32_inreg", "v_interp_p10_f32"),
    Rename::new(G::Gfx11, "v_interp_p2_f32_inreg", "v_interp_p2_f32"),
    Rename::new(G::Gfx11, "v_interp_p10_f16_f32_inreg", "v_interp_p10_f16_f32"),
    Rename::new(G::Gfx11, "v_interp_p2_f16_f32_inreg", "v_interp_p2_f16_f32"),
    Rename::new(G::Gfx11, "v_interp_p10_rtz_f16_f32_inreg", "v_interp_p10_rtz_f16_f32"),
    Rename::new(G::Gfx11, "v_interp_p2_rtz_f16_f32_inreg", "v_interp_p2_rtz_f16_f32"),
    Rename::new(G::Gfx8, "v_interp_p2_legacy_f16", "v_interp_p2_f16"),
    Rename::new(G::Gfx9, "v_interp_p2_legacy_f16", "v_interp_p2_legacy_f16"),
    Rename::new(G::Gfx11, "v_mac_legacy_f32", "v_fmac_dx9_zero_f32"),
    Rename::new(G::Gfx11, "v_mad_legacy_f32", "v_fma_dx9_zero_f32"),
    Rename::new(G::Gfx8, "v_mad_legacy_f16", "v_mad_f16"),
    Rename::new(G::Gfx8, "v_mad_legacy_u16", "v_mad_u16"),
    Rename::new(G::Gfx8, "v_mad_legacy_i16", "v_mad_i16"),
    Rename::new(G::Gfx8, "v_fma_legacy_f16", "v_fma_f16"),
    Rename::new(G::Gfx8, "v_div_fixup_legacy_f16", "v_div_fixup_f16"),
    Rename::new(G::Gfx9, "v_mad_legacy_f16", "v_mad_legacy_f16"),
    Rename::new(G::Gfx9, "v_mad_legacy_u16", "v_mad_legacy_u16"),
    Rename::new(G::Gfx9, "v_mad_legacy_i16", "v_mad_legacy_i16"),
    Rename::new(G::Gfx9, "v_fma_legacy_f16", "v_fma_legacy_f16"),
    Rename::new(G::Gfx9, "v_div_fixup_legacy_f16", "v_div_fixup_legacy_f16"),
    Rename::new(G::Gfx8, "v_ldexp_f32_e64", "v_ldexp_f32"),
    Rename::new(G::Gfx8, "v_cvt_pknorm_i16_f32_e64", "v_cvt_pknorm_i16_f32"),
    Rename::new(G::Gfx8, "v_cvt_pknorm_u16_f32_e64", "v_cvt_pknorm_u16_f32"),
    Rename::new(G::Gfx8, "v_cvt_pkrtz_f16_f32_e64", "v_cvt_pkrtz_f16_f32"),
    Rename::new(G::Gfx8, "v_cvt_pk_u16_u32_e64", "v_cvt_pk_u16_u32"),
    Rename::new(G::Gfx8, "v_cvt_pk_i16_i32_e64", "v_cvt_pk_i16_i32"),
    Rename::new(G::Gfx10, "v_add_i32", "v_add_nc_i32"),
    Rename::new(G::Gfx10, "v_sub_i32", "v_sub_nc_i32"),
    Rename::new(G::Gfx10, "v_add_i16", "v_add_nc_i16"),
    Rename::new(G::Gfx10, "v_sub_i16", "v_sub_nc_i16"),
];

/// Offset of promoted VOP1 opcodes in the VOP3 opcode space.
fn vop1_as_vop3_offset(gfx: GfxLevel) -> u16 {
    match gfx {
        GfxLevel::Gfx8 | GfxLevel::Gfx9 => 0x140,
        _ => 0x180,
    }
}

/// Where an opcode of `format` sits in the VOP3 opcode space, if it can be promoted.
pub fn vop3_opcode(gfx: GfxLevel, format: Format, opcode: u16) -> Option<u16> {
    match format {
        Format::VOP1 => Some(opcode + vop1_as_vop3_offset(gfx)),
        Format::VOP2 => Some(opcode + 0x100),
        Format::VOP3 | Format::VOPC => Some(opcode),
        Format::VINTRP => Some(opcode + 0x270),
        _ => None,
    }
}

pub struct GenerationTables<'a> {
    gfx: GfxLevel,
    db: &'a IsaDB,
    opcodes: HashMap<(Format, u16), usize>,
    vop3: HashMap<u16, usize>,
    renames: HashMap<usize, &'static str>,
}

impl<'a> GenerationTables<'a> {
    pub fn build(db: &'a IsaDB, gfx: GfxLevel) -> Self {
        let mut opcodes = HashMap::new();
        let mut vop3 = HashMap::new();

        for (index, record) in db.records.iter().enumerate() {
            let Some(opcode) = record.encoding_for(gfx)
            else {
                continue;
            };
            // Later records win collisions.
            opcodes.insert((record.format, opcode), index);

            if record.format != Format::VOP3 && !record.flags.has_e64() {
                continue;
            }
            if let Some(promoted) = vop3_opcode(gfx, record.format, opcode) {
                vop3.insert(promoted, index);
            }
        }

        let mut resolved: HashMap<usize, Rename> = HashMap::new();
        for rename in RENAMES.iter().filter(|r| r.min_gfx <= gfx) {
            let Some(index) = db.index_of(rename.name)
            else {
                log::warn!("rename of unknown opcode {}", rename.name);
                continue;
            };
            match resolved.get(&index) {
                Some(prev) if rename.min_gfx < prev.min_gfx => {}
                _ => {
                    resolved.insert(index, *rename);
                }
            }
        }
        let renames = resolved.into_iter().map(|(index, r)| (index, r.display)).collect();

        log::debug!(
            "built opcode tables for {}: {} opcodes, {} vop3 opcodes",
            gfx,
            opcodes.len(),
            vop3.len()
        );

        Self { gfx, db, opcodes, vop3, renames }
    }

    pub fn gfx(&self) -> GfxLevel {
        self.gfx
    }

    pub fn db(&self) -> &'a IsaDB {
        self.db
    }

    pub fn record(&self, index: usize) -> &'a IsaRecord {
        &self.db.records[index]
    }

    /// Find the record behind a numeric opcode of a format.
    pub fn lookup(&self, format: Format, opcode: u32) -> Option<usize> {
        let opcode = u16::try_from(opcode).ok()?;
        self.opcodes.get(&(format, opcode)).copied()
    }

    /// Find the record behind a VOP3-encoded opcode.
    pub fn lookup_vop3(&self, opcode: u32) -> Option<usize> {
        let opcode = u16::try_from(opcode).ok()?;
        self.vop3.get(&opcode).copied()
    }

    /// The mnemonic printed for a record on this generation.
    pub fn display_name(&self, index: usize) -> &'a str {
        match self.renames.get(&index) {
            Some(name) => name,
            None => &self.db.records[index].name,
        }
    }
}
