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

// Fixed-point arithmetic instructions.

use super::record;
use crate::errors::InterpretError;
use crate::interpreter::Interpreter;
use crate::interpreter::registry::{BIT_RC, Instruction};
use crate::processor::bits::carry;

pub(super) fn entries() -> Vec<Instruction> {
    vec![
        Instruction::new("add.", "{RT:gpr},{RA:gpr},{RB:gpr}", |interp, args, bits| {
            let (rt, ra, rb) = (args[0] as usize, args[1] as usize, args[2] as usize);
            let sum = interp
                .proc
                .gpr(ra)
                .u32()
                .wrapping_add(interp.proc.gpr(rb).u32());
            interp.proc.set_gpr(rt, sum);
            record(interp, rt, bits)
        }),
        Instruction::new("addi.", "{RT:gpr},{RA:gpr},{SI:si}", |interp, args, bits| {
            addi(interp, args[0] as usize, args[1] as usize, args[2] as i16, bits & BIT_RC != 0)
        }),
        Instruction::new("addis.", "{RT:gpr},{RA:gpr},{SI:si}", |interp, args, bits| {
            addis(interp, args[0] as usize, args[1] as usize, args[2] as i16, bits & BIT_RC != 0)
        }),
        Instruction::new("addic.", "{RT:gpr},{RA:gpr},{SI:si}", |interp, args, bits| {
            addic(interp, args[0] as usize, args[1] as usize, args[2] as i16, bits & BIT_RC != 0)
        }),
        Instruction::new("addze.", "{RT:gpr},{RA:gpr}", |interp, args, bits| {
            let (rt, ra) = (args[0] as usize, args[1] as usize);
            let ca = u32::from(interp.proc.ca());
            let sum = interp.proc.gpr(ra).u32().wrapping_add(ca);
            interp.proc.set_gpr(rt, sum);
            record(interp, rt, bits)
        }),
        Instruction::new("adde.", "{RT:gpr},{RA:gpr},{RB:gpr}", |interp, args, bits| {
            let (rt, ra, rb) = (args[0] as usize, args[1] as usize, args[2] as usize);
            let ca = u32::from(interp.proc.ca());
            let sum = interp
                .proc
                .gpr(ra)
                .u32()
                .wrapping_add(interp.proc.gpr(rb).u32())
                .wrapping_add(ca);
            interp.proc.set_gpr(rt, sum);
            record(interp, rt, bits)
        }),
        Instruction::new("sub.", "{RT:gpr},{RA:gpr},{RB:gpr}", |interp, args, bits| {
            // sub rt,ra,rb is ra - rb, i.e. subf with the operands swapped.
            subf(interp, args[0] as usize, args[2] as usize, args[1] as usize, bits & BIT_RC != 0)
        }),
        Instruction::new("subi.", "{RT:gpr},{RA:gpr},{SI:si}", |interp, args, bits| {
            let si = (args[2] as i16).wrapping_neg();
            addi(interp, args[0] as usize, args[1] as usize, si, bits & BIT_RC != 0)
        }),
        Instruction::new("subis.", "{RT:gpr},{RA:gpr},{SI:si}", |interp, args, bits| {
            let si = (args[2] as i16).wrapping_neg();
            addis(interp, args[0] as usize, args[1] as usize, si, bits & BIT_RC != 0)
        }),
        Instruction::new("subic.", "{RT:gpr},{RA:gpr},{SI:si}", |interp, args, bits| {
            let si = (args[2] as i16).wrapping_neg();
            addic(interp, args[0] as usize, args[1] as usize, si, bits & BIT_RC != 0)
        }),
        Instruction::new("subf.", "{RT:gpr},{RA:gpr},{RB:gpr}", |interp, args, bits| {
            subf(interp, args[0] as usize, args[1] as usize, args[2] as usize, bits & BIT_RC != 0)
        }),
        Instruction::new("subfc.", "{RT:gpr},{RA:gpr},{RB:gpr}", |interp, args, bits| {
            let (rt, ra, rb) = (args[0] as usize, args[1] as usize, args[2] as usize);
            let lhs = interp.proc.gpr(rb).u32();
            let rhs = interp.proc.gpr(ra).u32();
            interp.proc.set_gpr(rt, lhs.wrapping_sub(rhs));
            let ca = rhs == 0 || carry(lhs, 0u32.wrapping_sub(rhs));
            interp.proc.set_ca(ca);
            record(interp, rt, bits)
        }),
        Instruction::new("subfic.", "{RT:gpr},{RA:gpr},{SI:si}", |interp, args, bits| {
            let (rt, ra) = (args[0] as usize, args[1] as usize);
            let si = args[2] as i16;
            let value = i32::from(si).wrapping_sub(interp.proc.gpr(ra).s32());
            interp.proc.set_gpr(rt, value);
            let rhs = interp.proc.gpr(ra).u32();
            let ca = rhs == 0 || carry(0u32.wrapping_sub(rhs), i32::from(si) as u32);
            interp.proc.set_ca(ca);
            record(interp, rt, bits)
        }),
        Instruction::new("subfe.", "{RT:gpr},{RA:gpr},{RB:gpr}", |interp, args, bits| {
            let (rt, ra, rb) = (args[0] as usize, args[1] as usize, args[2] as usize);
            let lhs = !interp.proc.gpr(ra).u32();
            let rhs = interp.proc.gpr(rb).u32();
            let ca = u32::from(interp.proc.ca());
            interp
                .proc
                .set_gpr(rt, lhs.wrapping_add(rhs).wrapping_add(ca));
            let ca_out = carry(lhs, rhs) || carry(lhs.wrapping_add(rhs), ca);
            interp.proc.set_ca(ca_out);
            record(interp, rt, bits)
        }),
        Instruction::new("subfme.", "{RT:gpr},{RA:gpr}", |interp, args, bits| {
            let (rt, ra) = (args[0] as usize, args[1] as usize);
            let lhs = interp.proc.gpr(ra).u32();
            let ca = u32::from(interp.proc.ca());
            interp
                .proc
                .set_gpr(rt, lhs.wrapping_add(ca).wrapping_sub(1));
            interp.proc.set_ca(carry(!lhs, ca.wrapping_sub(1)));
            record(interp, rt, bits)
        }),
        Instruction::new("subfze.", "{RT:gpr},{RA:gpr}", |interp, args, bits| {
            let (rt, ra) = (args[0] as usize, args[1] as usize);
            let lhs = interp.proc.gpr(ra).u32();
            let ca = u32::from(interp.proc.ca());
            interp.proc.set_gpr(rt, lhs.wrapping_add(ca));
            interp.proc.set_ca(carry(!lhs, ca));
            record(interp, rt, bits)
        }),
        Instruction::new("mullw.", "{RT:gpr},{RA:gpr},{RB:gpr}", |interp, args, bits| {
            let (rt, ra, rb) = (args[0] as usize, args[1] as usize, args[2] as usize);
            let lhs = i64::from(interp.proc.gpr(ra).s32());
            let rhs = i64::from(interp.proc.gpr(rb).s32());
            interp.proc.set_gpr(rt, lhs.wrapping_mul(rhs) as u32);
            record(interp, rt, bits)
        }),
        Instruction::new("mulhw.", "{RT:gpr},{RA:gpr},{RB:gpr}", |interp, args, bits| {
            let (rt, ra, rb) = (args[0] as usize, args[1] as usize, args[2] as usize);
            let lhs = i64::from(interp.proc.gpr(ra).s32());
            let rhs = i64::from(interp.proc.gpr(rb).s32());
            interp.proc.set_gpr(rt, (lhs.wrapping_mul(rhs) >> 32) as u32);
            record(interp, rt, bits)
        }),
        Instruction::new("mullwu.", "{RT:gpr},{RA:gpr},{RB:gpr}", |interp, args, bits| {
            let (rt, ra, rb) = (args[0] as usize, args[1] as usize, args[2] as usize);
            let lhs = u64::from(interp.proc.gpr(ra).u32());
            let rhs = u64::from(interp.proc.gpr(rb).u32());
            interp.proc.set_gpr(rt, lhs.wrapping_mul(rhs) as u32);
            record(interp, rt, bits)
        }),
        Instruction::new("mulhwu.", "{RT:gpr},{RA:gpr},{RB:gpr}", |interp, args, bits| {
            let (rt, ra, rb) = (args[0] as usize, args[1] as usize, args[2] as usize);
            let lhs = u64::from(interp.proc.gpr(ra).u32());
            let rhs = u64::from(interp.proc.gpr(rb).u32());
            interp.proc.set_gpr(rt, (lhs.wrapping_mul(rhs) >> 32) as u32);
            record(interp, rt, bits)
        }),
        Instruction::new("mulli.", "{RT:gpr},{RA:gpr},{SI:si}", |interp, args, bits| {
            let (rt, ra) = (args[0] as usize, args[1] as usize);
            let si = i64::from(args[2] as i16);
            let lhs = i64::from(interp.proc.gpr(ra).s32());
            interp.proc.set_gpr(rt, lhs.wrapping_mul(si) as u32);
            record(interp, rt, bits)
        }),
        Instruction::new("divw.", "{RT:gpr},{RA:gpr},{RB:gpr}", |interp, args, bits| {
            let (rt, ra, rb) = (args[0] as usize, args[1] as usize, args[2] as usize);
            let rhs = interp.proc.gpr(rb).s32();

            if rhs == 0 {
                return Err(interp.semantic("division by zero"));
            }

            let value = interp.proc.gpr(ra).s32().wrapping_div(rhs);
            interp.proc.set_gpr(rt, value);
            record(interp, rt, bits)
        }),
        Instruction::new("divwu.", "{RT:gpr},{RA:gpr},{RB:gpr}", |interp, args, bits| {
            let (rt, ra, rb) = (args[0] as usize, args[1] as usize, args[2] as usize);
            let rhs = interp.proc.gpr(rb).u32();

            if rhs == 0 {
                return Err(interp.semantic("division by zero"));
            }

            let value = interp.proc.gpr(ra).u32() / rhs;
            interp.proc.set_gpr(rt, value);
            record(interp, rt, bits)
        }),
        Instruction::new("abs.", "{RT:gpr},{RA:gpr}", |interp, args, bits| {
            let (rt, ra) = (args[0] as usize, args[1] as usize);
            let value = interp.proc.gpr(ra).s32().wrapping_abs();
            interp.proc.set_gpr(rt, value);
            record(interp, rt, bits)
        }),
        Instruction::new("nabs.", "{RT:gpr},{RA:gpr}", |interp, args, bits| {
            let (rt, ra) = (args[0] as usize, args[1] as usize);
            let value = interp.proc.gpr(ra).s32().wrapping_abs().wrapping_neg();
            interp.proc.set_gpr(rt, value);
            record(interp, rt, bits)
        }),
        Instruction::new("neg.", "{RT:gpr},{RA:gpr}", |interp, args, bits| {
            let (rt, ra) = (args[0] as usize, args[1] as usize);
            let value = interp.proc.gpr(ra).u32().wrapping_neg();
            interp.proc.set_gpr(rt, value);
            record(interp, rt, bits)
        }),
    ]
}

// Shared by li/lis/mr in the load/store family and the subtract aliases.

pub(super) fn addi(
    interp: &mut Interpreter,
    rt: usize,
    ra: usize,
    si: i16,
    rc: bool,
) -> Result<(), InterpretError> {
    // A zero base means literal zero, not GPR 0.
    let value = if ra != 0 {
        interp.proc.gpr(ra).s32().wrapping_add(i32::from(si))
    } else {
        i32::from(si)
    };

    interp.proc.set_gpr(rt, value);
    record(interp, rt, u8::from(rc))
}

pub(super) fn addis(
    interp: &mut Interpreter,
    rt: usize,
    ra: usize,
    si: i16,
    rc: bool,
) -> Result<(), InterpretError> {
    let simm = i32::from(si) << 16;
    let value = if ra != 0 {
        interp.proc.gpr(ra).s32().wrapping_add(simm)
    } else {
        simm
    };

    interp.proc.set_gpr(rt, value);
    record(interp, rt, u8::from(rc))
}

fn addic(
    interp: &mut Interpreter,
    rt: usize,
    ra: usize,
    si: i16,
    rc: bool,
) -> Result<(), InterpretError> {
    let lhs = interp.proc.gpr(ra).u32();
    let rhs = i32::from(si) as u32;

    interp.proc.set_gpr(rt, lhs.wrapping_add(rhs));
    interp.proc.set_ca(carry(lhs, rhs));
    record(interp, rt, u8::from(rc))
}

fn subf(
    interp: &mut Interpreter,
    rt: usize,
    ra: usize,
    rb: usize,
    rc: bool,
) -> Result<(), InterpretError> {
    let value = interp
        .proc
        .gpr(rb)
        .s32()
        .wrapping_sub(interp.proc.gpr(ra).s32());
    interp.proc.set_gpr(rt, value);
    record(interp, rt, u8::from(rc))
}
