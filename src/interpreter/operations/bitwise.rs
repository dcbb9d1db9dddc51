/*
Copyright 2025 Connor Nolan

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

// Bitwise, shift and rotate instructions. The synthetic rotate forms all
// funnel into rlwinm/rlwimi with pre-baked parameters.

use super::record;
use crate::errors::InterpretError;
use crate::interpreter::Interpreter;
use crate::interpreter::registry::{BIT_RC, Instruction};
use crate::processor::bits::{mask, rot32};

pub(super) fn entries() -> Vec<Instruction> {
    vec![
        Instruction::new("extsb.", "{RT:gpr},{RA:gpr}", |interp, args, bits| {
            let (rt, ra) = (args[0] as usize, args[1] as usize);
            let value = i32::from(interp.proc.gpr(ra).s8());
            interp.proc.set_gpr(rt, value);
            record(interp, rt, bits)
        }),
        Instruction::new("extsh.", "{RT:gpr},{RA:gpr}", |interp, args, bits| {
            let (rt, ra) = (args[0] as usize, args[1] as usize);
            let value = i32::from(interp.proc.gpr(ra).s16());
            interp.proc.set_gpr(rt, value);
            record(interp, rt, bits)
        }),
        Instruction::new("cntlzw.", "{RS:gpr},{RA:gpr}", |interp, args, bits| {
            let (rs, ra) = (args[0] as usize, args[1] as usize);
            let count = interp.proc.gpr(ra).u32().leading_zeros();
            interp.proc.set_gpr(rs, count);
            record(interp, rs, bits)
        }),
        logic("and.", |rs, rb| rs & rb),
        logic("andc.", |rs, rb| rs & !rb),
        logic("or.", |rs, rb| rs | rb),
        logic("orc.", |rs, rb| rs | !rb),
        logic("xor.", |rs, rb| rs ^ rb),
        logic("eqv.", |rs, rb| !(rs ^ rb)),
        logic("nand.", |rs, rb| !(rs & rb)),
        logic("nor.", |rs, rb| !(rs | rb)),
        logic_imm("andi.", false, |rs, imm| rs & imm),
        logic_imm("andis.", true, |rs, imm| rs & imm),
        logic_imm("ori.", false, |rs, imm| rs | imm),
        logic_imm("oris.", true, |rs, imm| rs | imm),
        logic_imm("xori.", false, |rs, imm| rs ^ imm),
        logic_imm("xoris.", true, |rs, imm| rs ^ imm),
        Instruction::new(
            "rlwinm.",
            "{RA:gpr},{RS:gpr},{SH:bit},{MB:bit},{ME:bit}",
            |interp, args, bits| {
                rlwinm(
                    interp,
                    args[0] as usize,
                    args[1] as usize,
                    args[2] as u32,
                    args[3] as u32,
                    args[4] as u32,
                    bits & BIT_RC != 0,
                )
            },
        ),
        Instruction::new(
            "rlwnm.",
            "{RA:gpr},{RS:gpr},{RB:gpr},{MB:bit},{ME:bit}",
            |interp, args, bits| {
                rlwnm(
                    interp,
                    args[0] as usize,
                    args[1] as usize,
                    args[2] as usize,
                    args[3] as u32,
                    args[4] as u32,
                    bits & BIT_RC != 0,
                )
            },
        ),
        Instruction::new(
            "rlwimi.",
            "{RA:gpr},{RS:gpr},{SH:bit},{MB:bit},{ME:bit}",
            |interp, args, bits| {
                rlwimi(
                    interp,
                    args[0] as usize,
                    args[1] as usize,
                    args[2] as u32,
                    args[3] as u32,
                    args[4] as u32,
                    bits & BIT_RC != 0,
                )
            },
        ),
        Instruction::new("extlwi.", "{RA:gpr},{RS:gpr},{N:bit},{B:bit}", |interp, args, bits| {
            let (n, b) = (args[2] as u32, args[3] as u32);
            rlwinm(interp, args[0] as usize, args[1] as usize, b, 0, n.wrapping_sub(1), bits & BIT_RC != 0)
        }),
        Instruction::new("extrwi.", "{RA:gpr},{RS:gpr},{N:bit},{B:bit}", |interp, args, bits| {
            let (n, b) = (args[2] as u32, args[3] as u32);
            rlwinm(interp, args[0] as usize, args[1] as usize, b.wrapping_add(n), 32 - n, 31, bits & BIT_RC != 0)
        }),
        Instruction::new("inslwi.", "{RA:gpr},{RS:gpr},{N:bit},{B:bit}", |interp, args, bits| {
            let (n, b) = (args[2] as u32, args[3] as u32);
            rlwimi(interp, args[0] as usize, args[1] as usize, 32 - b, b, (b + n).wrapping_sub(1), bits & BIT_RC != 0)
        }),
        Instruction::new("insrwi.", "{RA:gpr},{RS:gpr},{N:bit},{B:bit}", |interp, args, bits| {
            let (n, b) = (args[2] as u32, args[3] as u32);
            rlwimi(interp, args[0] as usize, args[1] as usize, 32u32.wrapping_sub(b + n), b, (b + n).wrapping_sub(1), bits & BIT_RC != 0)
        }),
        Instruction::new("rotlwi.", "{RA:gpr},{RS:gpr},{N:bit}", |interp, args, bits| {
            let n = args[2] as u32;
            rlwinm(interp, args[0] as usize, args[1] as usize, n, 0, 31, bits & BIT_RC != 0)
        }),
        Instruction::new("rotrwi.", "{RA:gpr},{RS:gpr},{N:bit}", |interp, args, bits| {
            let n = args[2] as u32;
            rlwinm(interp, args[0] as usize, args[1] as usize, 32 - n, 0, 31, bits & BIT_RC != 0)
        }),
        Instruction::new("rotlw.", "{RA:gpr},{RS:gpr},{RB:gpr}", |interp, args, bits| {
            rlwnm(interp, args[0] as usize, args[1] as usize, args[2] as usize, 0, 31, bits & BIT_RC != 0)
        }),
        Instruction::new("clrlwi.", "{RA:gpr},{RS:gpr},{N:bit}", |interp, args, bits| {
            let n = args[2] as u32;
            rlwinm(interp, args[0] as usize, args[1] as usize, 0, n, 31, bits & BIT_RC != 0)
        }),
        Instruction::new("clrrwi.", "{RA:gpr},{RS:gpr},{N:bit}", |interp, args, bits| {
            let n = args[2] as u32;
            rlwinm(interp, args[0] as usize, args[1] as usize, 0, 0, 31 - n, bits & BIT_RC != 0)
        }),
        Instruction::new("clrlslwi.", "{RA:gpr},{RS:gpr},{B:bit},{N:bit}", |interp, args, bits| {
            let (b, n) = (args[2] as u32, args[3] as u32);
            rlwinm(interp, args[0] as usize, args[1] as usize, n, b.wrapping_sub(n), 31 - n, bits & BIT_RC != 0)
        }),
        Instruction::new("slw.", "{RA:gpr},{RS:gpr},{RB:gpr}", |interp, args, bits| {
            let (ra, rs, rb) = (args[0] as usize, args[1] as usize, args[2] as usize);
            let amount = interp.proc.gpr(rb).u32();

            // Bit 0x20 of the amount shifts everything out.
            let value = if amount & 0x20 == 0 {
                interp.proc.gpr(rs).u32() << (amount & 0x1F)
            } else {
                0
            };

            interp.proc.set_gpr(ra, value);
            record(interp, ra, bits)
        }),
        Instruction::new("slwi.", "{RA:gpr},{RS:gpr},{N:bit}", |interp, args, bits| {
            let n = args[2] as u32;
            rlwinm(interp, args[0] as usize, args[1] as usize, n, 0, 31 - n, bits & BIT_RC != 0)
        }),
        Instruction::new("srw.", "{RA:gpr},{RS:gpr},{RB:gpr}", |interp, args, bits| {
            let (ra, rs, rb) = (args[0] as usize, args[1] as usize, args[2] as usize);
            let amount = interp.proc.gpr(rb).u32();

            let value = if amount & 0x20 == 0 {
                interp.proc.gpr(rs).u32() >> (amount & 0x1F)
            } else {
                0
            };

            interp.proc.set_gpr(ra, value);
            record(interp, ra, bits)
        }),
        Instruction::new("srwi.", "{RA:gpr},{RS:gpr},{N:bit}", |interp, args, bits| {
            let n = args[2] as u32;
            rlwinm(interp, args[0] as usize, args[1] as usize, 32 - n, n, 31, bits & BIT_RC != 0)
        }),
        Instruction::new("sraw.", "{RA:gpr},{RS:gpr},{RB:gpr}", |interp, args, bits| {
            let (ra, rs, rb) = (args[0] as usize, args[1] as usize, args[2] as usize);
            let amount = interp.proc.gpr(rb).u32();

            if amount & 0x20 != 0 {
                // Shifting everything out replicates the sign bit; CA says
                // whether ones were shifted out.
                if interp.proc.gpr(rs).u32() & 0x8000_0000 != 0 {
                    interp.proc.set_gpr(ra, 0xFFFF_FFFFu32);
                    interp.proc.set_ca(true);
                } else {
                    interp.proc.set_gpr(ra, 0u32);
                    interp.proc.set_ca(false);
                }
            } else {
                let sh = amount & 0x1F;
                sra(interp, ra, rs, sh);
            }

            record(interp, ra, bits)
        }),
        Instruction::new("srawi.", "{RA:gpr},{RS:gpr},{SH:bit}", |interp, args, bits| {
            let (ra, rs) = (args[0] as usize, args[1] as usize);
            sra(interp, ra, rs, args[2] as u32);
            record(interp, ra, bits)
        }),
    ]
}

fn logic(key: &'static str, op: fn(u32, u32) -> u32) -> Instruction {
    Instruction::new(key, "{RA:gpr},{RS:gpr},{RB:gpr}", move |interp, args, bits| {
        let (ra, rs, rb) = (args[0] as usize, args[1] as usize, args[2] as usize);
        let value = op(interp.proc.gpr(rs).u32(), interp.proc.gpr(rb).u32());
        interp.proc.set_gpr(ra, value);
        record(interp, ra, bits)
    })
}

fn logic_imm(key: &'static str, shifted: bool, op: fn(u32, u32) -> u32) -> Instruction {
    Instruction::new(key, "{RA:gpr},{RS:gpr},{UI:ui}", move |interp, args, bits| {
        let (ra, rs) = (args[0] as usize, args[1] as usize);
        let imm = args[2] as u32;
        let imm = if shifted { imm << 16 } else { imm };
        let value = op(interp.proc.gpr(rs).u32(), imm);
        interp.proc.set_gpr(ra, value);
        record(interp, ra, bits)
    })
}

// Arithmetic right shift with the CA rule: CA is set iff the source was
// negative and any shifted-out bit was one.
fn sra(interp: &mut Interpreter, ra: usize, rs: usize, sh: u32) {
    let source = interp.proc.gpr(rs);
    interp.proc.set_gpr(ra, source.s32() >> sh);

    let ca = source.s32() < 0 && sh > 0 && (source.u32() << (32 - sh)) != 0;
    interp.proc.set_ca(ca);
}

fn rlwinm(
    interp: &mut Interpreter,
    ra: usize,
    rs: usize,
    sh: u32,
    mb: u32,
    me: u32,
    rc: bool,
) -> Result<(), InterpretError> {
    let rotated = rot32(interp.proc.gpr(rs).u32(), sh);
    interp.proc.set_gpr(ra, rotated & mask(mb, me));
    record(interp, ra, u8::from(rc))
}

fn rlwnm(
    interp: &mut Interpreter,
    ra: usize,
    rs: usize,
    rb: usize,
    mb: u32,
    me: u32,
    rc: bool,
) -> Result<(), InterpretError> {
    // Only the low five bits of rb contribute to the amount.
    let sh = interp.proc.gpr(rb).u32() & 0x1F;
    rlwinm(interp, ra, rs, sh, mb, me, rc)
}

fn rlwimi(
    interp: &mut Interpreter,
    ra: usize,
    rs: usize,
    sh: u32,
    mb: u32,
    me: u32,
    rc: bool,
) -> Result<(), InterpretError> {
    let rotated = rot32(interp.proc.gpr(rs).u32(), sh);
    let m = mask(mb, me);
    let merged = (rotated & m) | (interp.proc.gpr(ra).u32() & !m);
    interp.proc.set_gpr(ra, merged);
    record(interp, ra, u8::from(rc))
}
