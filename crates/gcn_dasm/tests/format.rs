mod common;

use gcn_dasm::prelude::*;

use crate::common::{decode_text, disassembler, init_tests};

#[test]
fn format_mnemonic() {
    init_tests();
    let inst = disassembler(GfxLevel::Gfx9, 64).decode_one(&[0xbf81_0000], 0);
    assert_eq!(inst.mnemonic(), Some("s_endpgm"));

    let options = FormatOptions {
        uppercase_mnemonic: true,
        ..Default::default()
    };
    assert_eq!(format_instruction(&inst, &options), "S_ENDPGM");
}

#[test]
fn scalar_alu() {
    init_tests();
    assert_eq!(decode_text(GfxLevel::Gfx9, &[0x8000_0000]), "s_add_u32 s0, s0, s0");
    assert_eq!(decode_text(GfxLevel::Gfx9, &[0xbe81_0002]), "s_mov_b32 s1, s2");
    // inline integer constant
    assert_eq!(decode_text(GfxLevel::Gfx9, &[0xbe80_00c1]), "s_mov_b32 s0, -1");
}

#[test]
fn scalar_program_flow() {
    init_tests();
    assert_eq!(decode_text(GfxLevel::Gfx9, &[0xbf8c_c07f]), "s_waitcnt lgkmcnt(0)");
    assert_eq!(decode_text(GfxLevel::Gfx9, &[0xbf80_0003]), "s_nop 3");
}

#[test]
fn scalar_memory() {
    init_tests();
    // s_load_dwordx2 s[0:1], s[2:3], 0x10
    assert_eq!(
        decode_text(GfxLevel::Gfx9, &[0xc006_0001, 0x0000_0010]),
        "s_load_dwordx2 s[0:1], s[2:3], 0x10"
    );
}

#[test]
fn vector_alu_native() {
    init_tests();
    assert_eq!(decode_text(GfxLevel::Gfx9, &[0x0200_0501]), "v_add_f32_e32 v0, v1, v2");
    assert_eq!(decode_text(GfxLevel::Gfx9, &[0x7e02_0202]), "v_mov_b32_e32 v1, s2");
    assert_eq!(decode_text(GfxLevel::Gfx9, &[0x7e00_02f2]), "v_mov_b32_e32 v0, 1.0");
}

#[test]
fn vector_literal_extends_size() {
    init_tests();
    let inst = disassembler(GfxLevel::Gfx9, 64).decode_one(&[0x7e00_02ff, 0x1234_5678], 0);
    assert_eq!(inst.text, "v_mov_b32_e32 v0, 0x12345678");
    assert_eq!(inst.size, 2);
    assert_eq!(inst.words, [0x7e00_02ff, 0x1234_5678]);
}

#[test]
fn vector_compare_definition_follows_wave_size() {
    init_tests();
    let word = [0x7d84_0300];
    let wave64 = disassembler(GfxLevel::Gfx10, 64).decode_one(&word, 0);
    assert_eq!(wave64.text, "v_cmp_eq_u32_e32 vcc, v0, v1");
    let wave32 = disassembler(GfxLevel::Gfx10, 32).decode_one(&word, 0);
    assert_eq!(wave32.text, "v_cmp_eq_u32_e32 vcc_lo, v0, v1");
}

#[test]
fn vector_alu_vop3() {
    init_tests();
    // v_fma_f32 v0, v1, v2, v3
    assert_eq!(decode_text(GfxLevel::Gfx9, &[0xd1cb_0000, 0x040e_0501]), "v_fma_f32 v0, v1, v2, v3");
    // VOP2 opcode promoted to VOP3
    assert_eq!(decode_text(GfxLevel::Gfx9, &[0xd101_0000, 0x0002_0501]), "v_add_f32_e64 v0, v1, v2");
}

#[test]
fn vop3_only_opcodes_resolve() {
    init_tests();
    let sources = 0x040e_0501;
    let cases: [(GfxLevel, u32, u32, &str); 16] = [
        (GfxLevel::Gfx8, 0xd000_0000, 0x1ea, "v_mad_f16"),
        (GfxLevel::Gfx9, 0xd000_0000, 0x1ea, "v_mad_legacy_f16"),
        (GfxLevel::Gfx9, 0xd000_0000, 0x206, "v_fma_f16"),
        (GfxLevel::Gfx9, 0xd000_0000, 0x288, "v_ldexp_f32"),
        (GfxLevel::Gfx9, 0xd000_0000, 0x1ff, "v_add3_u32"),
        (GfxLevel::Gfx9, 0xd000_0000, 0x29c, "v_add_i32"),
        (GfxLevel::Gfx10, 0xd400_0000, 0x34b, "v_fma_f16"),
        (GfxLevel::Gfx10, 0xd400_0000, 0x362, "v_ldexp_f32"),
        (GfxLevel::Gfx10, 0xd400_0000, 0x178, "v_xor3_b32"),
        (GfxLevel::Gfx10, 0xd400_0000, 0x37f, "v_add_nc_i32"),
        (GfxLevel::Gfx11, 0xd400_0000, 0x248, "v_fma_f16"),
        (GfxLevel::Gfx11, 0xd400_0000, 0x31c, "v_ldexp_f32"),
        (GfxLevel::Gfx11, 0xd400_0000, 0x240, "v_xor3_b32"),
        (GfxLevel::Gfx11, 0xd400_0000, 0x255, "v_add3_u32"),
        (GfxLevel::Gfx11, 0xd400_0000, 0x245, "v_xad_u32"),
        (GfxLevel::Gfx11, 0xd400_0000, 0x25b, "v_permlane16_b32"),
    ];
    for (gfx, pattern, opcode, name) in cases {
        let inst = disassembler(gfx, 64).decode_one(&[pattern | opcode << 16, sources], 0);
        assert_eq!(inst.encoding, Some(EncodingKind::Vop3), "{} {:#x}", gfx, opcode);
        assert_eq!(inst.mnemonic(), Some(name), "{} {:#x}: {}", gfx, opcode, inst.text);
    }
}

#[test]
fn unmapped_vop3_opcode_is_invalid() {
    init_tests();
    let inst = disassembler(GfxLevel::Gfx9, 64).decode_one(&[0xd3ff_0000, 0], 0);
    assert_eq!(inst.text, "(invalid opcode)");
    assert!(!inst.is_valid);
    assert_eq!(inst.size, 2);
    assert_eq!(inst.encoding, Some(EncodingKind::Vop3));
}

#[test]
fn local_data_share() {
    init_tests();
    assert_eq!(decode_text(GfxLevel::Gfx9, &[0xd81a_0010, 0x0000_0201]), "ds_write_b32 v1, v2 offset:16");
    assert_eq!(decode_text(GfxLevel::Gfx9, &[0xd86c_0000, 0x0500_0001]), "ds_read_b32 v5, v1");
}

#[test]
fn export() {
    init_tests();
    assert_eq!(
        decode_text(GfxLevel::Gfx9, &[0xc400_180f, 0x0302_0100]),
        "exp mrt0 v0, v1, v2, v3 done vm"
    );
    assert_eq!(decode_text(GfxLevel::Gfx9, &[0xc400_0003, 0x0302_0100]), "exp mrt0 v0, v1, off, off");
}

#[test]
fn unknown_encoding() {
    init_tests();
    let inst = disassembler(GfxLevel::Gfx9, 64).decode_one(&[0xffff_ffff], 12);
    assert_eq!(inst.text, "(invalid instruction)");
    assert_eq!(inst.size, 1);
    assert_eq!(inst.offset, 12);
    assert_eq!(inst.encoding, None);
    assert!(!inst.is_valid);
}

#[test]
fn truncated_input_reads_zero() {
    init_tests();
    // The literal dword is missing; decoding still completes.
    let inst = disassembler(GfxLevel::Gfx9, 64).decode_one(&[0x7e00_02ff], 0);
    assert_eq!(inst.text, "v_mov_b32_e32 v0, 0x0");
    assert_eq!(inst.size, 2);
    assert_eq!(inst.words.len(), 1);
}
