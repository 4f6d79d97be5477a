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

//! SOPP printer: branches, wait counters, messages and ALU delay hints.

use gcn_isadb::{Format, GfxLevel, InstrClass};

use crate::{context::InstrContext, formatter::format_hex, layout::sop};

/// Names of the counters an `s_waitcnt` style immediate can wait on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WaitCounter {
    Exp,
    Vm,
    Lgkm,
    Vs,
    Sample,
    Bvh,
    Km,
}

impl WaitCounter {
    /// Print order: the newest counters come first.
    const PRINT_ORDER: [WaitCounter; 7] = [
        WaitCounter::Km,
        WaitCounter::Bvh,
        WaitCounter::Sample,
        WaitCounter::Vs,
        WaitCounter::Lgkm,
        WaitCounter::Vm,
        WaitCounter::Exp,
    ];

    pub fn name(&self, gfx: GfxLevel) -> &'static str {
        let gfx12 = gfx >= GfxLevel::Gfx12;
        match self {
            WaitCounter::Exp => "expcnt",
            WaitCounter::Vm if gfx12 => "loadcnt",
            WaitCounter::Vm => "vmcnt",
            WaitCounter::Lgkm if gfx12 => "dscnt",
            WaitCounter::Lgkm => "lgkmcnt",
            WaitCounter::Vs if gfx12 => "storecnt",
            WaitCounter::Vs => "vscnt",
            WaitCounter::Sample => "samplecnt",
            WaitCounter::Bvh => "bvhcnt",
            WaitCounter::Km => "kmcnt",
        }
    }
}

/// Counter values of a wait immediate. `None` means the counter is not waited on.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct WaitCounters {
    pub exp: Option<u32>,
    pub vm: Option<u32>,
    pub lgkm: Option<u32>,
    pub vs: Option<u32>,
    pub sample: Option<u32>,
    pub bvh: Option<u32>,
    pub km: Option<u32>,
}

impl WaitCounters {
    pub fn get(&self, counter: WaitCounter) -> Option<u32> {
        match counter {
            WaitCounter::Exp => self.exp,
            WaitCounter::Vm => self.vm,
            WaitCounter::Lgkm => self.lgkm,
            WaitCounter::Vs => self.vs,
            WaitCounter::Sample => self.sample,
            WaitCounter::Bvh => self.bvh,
            WaitCounter::Km => self.km,
        }
    }

    /// Decode the immediate of `s_waitcnt`, `s_wait_loadcnt_dscnt` or `s_wait_storecnt_dscnt`.
    pub fn unpack(gfx: GfxLevel, opcode: &str, imm: u32) -> Self {
        let below = |value: u32, unset: u32| (value != unset).then_some(value);
        let mut counters = WaitCounters::default();

        match opcode {
            "s_wait_loadcnt_dscnt" => {
                counters.vm = below((imm >> 8) & 0x3f, 0x3f);
                counters.lgkm = below(imm & 0x3f, 0x3f);
            }
            "s_wait_storecnt_dscnt" => {
                counters.vs = below((imm >> 8) & 0x3f, 0x3f);
                counters.lgkm = below(imm & 0x3f, 0x3f);
            }
            _ if gfx >= GfxLevel::Gfx11 => {
                counters.vm = below((imm >> 10) & 0x3f, 0x3f);
                counters.lgkm = below((imm >> 4) & 0x3f, 0x3f);
                counters.exp = below(imm & 0x7, 0x7);
            }
            _ => {
                let (vm, vm_max) = if gfx >= GfxLevel::Gfx9 {
                    ((imm & 0xf) | ((imm >> 14) & 0x3) << 4, 0x3f)
                }
                else {
                    (imm & 0xf, 0xf)
                };
                let (lgkm, lgkm_max) = if gfx >= GfxLevel::Gfx10 {
                    ((imm >> 8) & 0x3f, 0x3f)
                }
                else {
                    ((imm >> 8) & 0xf, 0xf)
                };
                counters.vm = below(vm, vm_max);
                counters.exp = below((imm >> 4) & 0x7, 0x7);
                counters.lgkm = below(lgkm, lgkm_max);
            }
        }
        counters
    }

    pub fn to_text(&self, gfx: GfxLevel) -> String {
        let mut text = String::new();
        for counter in WaitCounter::PRINT_ORDER {
            if let Some(value) = self.get(counter) {
                text.push_str(&format!(" {}({})", counter.name(gfx), value));
            }
        }
        text
    }
}

/// `hwreg(...)` text of a SOPK hardware register immediate. Only the register id is named.
pub fn hwreg_text(imm: u32) -> String {
    let id = imm & 31;
    let name = match id {
        1 => "MODE",
        2 => "STATUS",
        3 => "TRAPSTS",
        4 => "HW_ID",
        5 => "GPR_ALLOC",
        6 => "LDS_ALLOC",
        7 => "IB_STS",
        15 => "SH_MEM_BASES",
        16 => "TBA_LO",
        17 => "TBA_HI",
        18 => "TMA_LO",
        19 => "TMA_HI",
        20 => "FLAT_SCR_LO",
        21 => "FLAT_SCR_HI",
        22 => "XNACK_MASK",
        23 => "HW_ID1",
        24 => "HW_ID2",
        25 => "POPS_PACKER",
        29 => "SHADER_CYCLES",
        _ => return format!("hwreg({})", id),
    };
    format!("hwreg(HW_REG_{})", name)
}

fn gs_op_text(name: &str, imm: u32) -> String {
    format!(
        "sendmsg({}{}{}, {})",
        name,
        if imm & 0x10 != 0 { ", GS_OP_CUT" } else { "" },
        if imm & 0x20 != 0 { ", GS_OP_EMIT" } else { "" },
        imm >> 8
    )
}

/// Operand text of `s_sendmsg`.
pub fn sendmsg_text(gfx: GfxLevel, imm: u32) -> String {
    let gfx11 = gfx >= GfxLevel::Gfx11;
    let message = match imm & 0xf {
        0 => "MSG_NONE",
        2 if gfx11 => "hs_tessfactor",
        2 => return gs_op_text("MSG_GS", imm),
        3 if gfx11 => "MSG_DEALLOC_VGPRS",
        3 => return gs_op_text("MSG_GS_DONE", imm),
        4 => "MSG_SAVEWAVE",
        5 => "MSG_STALL_WAVE_GEN",
        6 => "MSG_HALT_WAVES",
        7 => "MSG_ORDERED_PS_DONE",
        8 => "MSG_EARLY_PRIM_DEALLOC",
        9 => "MSG_GS_ALLOC_REQ",
        10 => "MSG_GET_DOORBELL",
        11 => "MSG_GET_DDID",
        _ => return format!("imm:{}", imm),
    };
    format!("sendmsg({})", message)
}

/// Operand text of `s_delay_alu`, with a leading space per item.
pub fn delay_alu_text(imm: u32) -> String {
    let delays = [imm & 0xf, (imm >> 7) & 0xf];
    let skip = (imm >> 4) & 0x7;
    let mut text = String::new();

    for (i, &delay) in delays.iter().enumerate() {
        if i > 0 && delay != 0 {
            text.push_str(" |");
        }
        if i == 1 && skip != 0 {
            if skip == 1 {
                text.push_str(" instskip(NEXT) |");
            }
            else {
                text.push_str(&format!(" instskip(SKIP_{}) |", skip - 1));
            }
        }
        match delay {
            1..=4 => text.push_str(&format!(" instid{}(VALU_DEP_{})", i, delay)),
            5..=7 => text.push_str(&format!(" trans32_dep_{}", delay - 4)),
            8 => text.push_str(" fma_accum_cycle_1"),
            9..=11 => text.push_str(&format!(" instid1(SALU_CYCLE_{})", delay - 8)),
            _ => {}
        }
    }
    text
}

fn waits_for_export_ready(gfx: GfxLevel, imm: u32) -> bool {
    match gfx {
        GfxLevel::Gfx12 => imm & 0x2 != 0,
        GfxLevel::Gfx11 | GfxLevel::Gfx11_5 => imm & 0x1 == 0,
        _ => false,
    }
}

pub fn disasm_sopp(ctx: &mut InstrContext, opcode: u32) {
    ctx.print_opcode(Format::SOPP, opcode);
    let Some(record) = ctx.record
    else {
        return;
    };

    let imm = ctx.field(sop::SIMM16);
    let gfx = ctx.gfx();
    let text = match record.name.as_str() {
        "s_waitcnt" | "s_wait_loadcnt_dscnt" | "s_wait_storecnt_dscnt" => {
            WaitCounters::unpack(gfx, &record.name, imm).to_text(gfx)
        }
        "s_wait_expcnt" | "s_wait_dscnt" | "s_wait_loadcnt" | "s_wait_storecnt" | "s_wait_samplecnt"
        | "s_wait_bvhcnt" | "s_wait_kmcnt" => format!(" imm:{}", imm),
        "s_waitcnt_depctr" => format!(" {}", format_hex(imm)),
        "s_delay_alu" => delay_alu_text(imm),
        "s_endpgm" | "s_endpgm_saved" | "s_endpgm_ordered_ps_done" | "s_wakeup" | "s_barrier" | "s_icache_inv"
        | "s_ttracedata" | "s_set_gpr_idx_off" => String::new(),
        "s_sendmsg" => format!(" {}", sendmsg_text(gfx, imm)),
        "s_wait_event" if waits_for_export_ready(gfx, imm) => " wait_export_ready".to_string(),
        "s_wait_event" => String::new(),
        "s_setprio" | "s_nop" => format!(" {}", imm),
        _ if record.class == InstrClass::Branch => {
            print_branch_target(ctx, imm);
            return;
        }
        _ if imm != 0 => format!(" {}", format_hex(imm)),
        _ => String::new(),
    };

    if !text.is_empty() {
        ctx.out.write_separator(" ");
        ctx.out.write_modifier(&text[1..]);
    }
}

/// Branch immediates are signed dword offsets from the next instruction.
fn print_branch_target(ctx: &mut InstrContext, imm: u32) {
    let target = ctx.offset as i64 + (imm as u16 as i16) as i64 + 1;
    ctx.out.write_separator(" ");
    match u32::try_from(target).ok().and_then(|t| ctx.block_offsets.get(&t)) {
        Some(block) => ctx.out.write_label(&format!("BB{}", block)),
        None => {
            log::warn!("branch at {} targets dword {} which starts no block", ctx.offset, target);
            ctx.out.write_immediate(&format_hex(imm));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waitcnt_gfx6_through_gfx10() {
        // vmcnt(0) only: exp and lgkm at their maximum
        let c = WaitCounters::unpack(GfxLevel::Gfx7, "s_waitcnt", 0x0f70);
        assert_eq!(c.to_text(GfxLevel::Gfx7), " vmcnt(0)");

        // lgkmcnt(0) on GFX9, vm bits 14-15 set high
        let c = WaitCounters::unpack(GfxLevel::Gfx9, "s_waitcnt", 0xc07f);
        assert_eq!(c.to_text(GfxLevel::Gfx9), " lgkmcnt(0)");

        let c = WaitCounters::unpack(GfxLevel::Gfx9, "s_waitcnt", 0x0000);
        assert_eq!(c.to_text(GfxLevel::Gfx9), " lgkmcnt(0) vmcnt(0) expcnt(0)");

        // GFX10 widens lgkmcnt to six bits
        let c = WaitCounters::unpack(GfxLevel::Gfx10, "s_waitcnt", 0xff7f);
        assert_eq!(c.lgkm, None);
        let c = WaitCounters::unpack(GfxLevel::Gfx10, "s_waitcnt", 0xcf7f);
        assert_eq!(c.lgkm, Some(0xf));
    }

    #[test]
    fn waitcnt_gfx11_and_gfx12() {
        let c = WaitCounters::unpack(GfxLevel::Gfx11, "s_waitcnt", 0xfc07);
        assert_eq!(c.to_text(GfxLevel::Gfx11), " lgkmcnt(0)");
        let c = WaitCounters::unpack(GfxLevel::Gfx11, "s_waitcnt", 0x03f7);
        assert_eq!(c.to_text(GfxLevel::Gfx11), " vmcnt(0)");

        let c = WaitCounters::unpack(GfxLevel::Gfx12, "s_wait_loadcnt_dscnt", 0x0000);
        assert_eq!(c.to_text(GfxLevel::Gfx12), " dscnt(0) loadcnt(0)");
        let c = WaitCounters::unpack(GfxLevel::Gfx12, "s_wait_storecnt_dscnt", 0x013f);
        assert_eq!(c.to_text(GfxLevel::Gfx12), " storecnt(1)");
    }

    #[test]
    fn hwreg_names() {
        assert_eq!(hwreg_text(1), "hwreg(HW_REG_MODE)");
        assert_eq!(hwreg_text(0xf801), "hwreg(HW_REG_MODE)");
        assert_eq!(hwreg_text(29), "hwreg(HW_REG_SHADER_CYCLES)");
        assert_eq!(hwreg_text(9), "hwreg(9)");
    }

    #[test]
    fn sendmsg_names() {
        assert_eq!(sendmsg_text(GfxLevel::Gfx9, 0), "sendmsg(MSG_NONE)");
        assert_eq!(sendmsg_text(GfxLevel::Gfx9, 0x22), "sendmsg(MSG_GS, GS_OP_EMIT, 0)");
        assert_eq!(sendmsg_text(GfxLevel::Gfx9, 0x133), "sendmsg(MSG_GS_DONE, GS_OP_CUT, GS_OP_EMIT, 1)");
        assert_eq!(sendmsg_text(GfxLevel::Gfx11, 0x3), "sendmsg(MSG_DEALLOC_VGPRS)");
        assert_eq!(sendmsg_text(GfxLevel::Gfx11, 0x2), "sendmsg(hs_tessfactor)");
        assert_eq!(sendmsg_text(GfxLevel::Gfx10, 0x9), "sendmsg(MSG_GS_ALLOC_REQ)");
        assert_eq!(sendmsg_text(GfxLevel::Gfx10, 0xf), "imm:15");
    }

    #[test]
    fn delay_alu_items() {
        assert_eq!(delay_alu_text(0x1), " instid0(VALU_DEP_1)");
        assert_eq!(delay_alu_text(0x481), " instid0(VALU_DEP_1) | instid1(SALU_CYCLE_1)");
        assert_eq!(
            delay_alu_text(0x91),
            " instid0(VALU_DEP_1) | instskip(NEXT) | instid1(VALU_DEP_1)"
        );
        assert_eq!(delay_alu_text(0x05), " trans32_dep_1");
        assert_eq!(delay_alu_text(0x08), " fma_accum_cycle_1");
        assert_eq!(delay_alu_text(0x30 | 0x2), " instid0(VALU_DEP_2) instskip(SKIP_2) |");
    }

    #[test]
    fn export_ready_wait() {
        assert!(waits_for_export_ready(GfxLevel::Gfx11, 0));
        assert!(!waits_for_export_ready(GfxLevel::Gfx11, 1));
        assert!(waits_for_export_ready(GfxLevel::Gfx12, 2));
        assert!(!waits_for_export_ready(GfxLevel::Gfx10_3, 0));
    }
}
