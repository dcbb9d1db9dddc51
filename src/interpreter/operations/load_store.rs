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

// Fixed-point load/store instructions, plus the li/lis/mr aliases that ride
// on addi. Update forms write the effective address back into the base
// register unless the base is r0 or (for loads) the destination itself.

use super::arithmetic::{addi, addis};
use crate::interpreter::Interpreter;
use crate::interpreter::registry::{BIT_RC, Instruction};

pub(super) fn entries() -> Vec<Instruction> {
    vec![
        Instruction::new("li", "{RT:gpr},{SIMM:si}", |interp, args, _bits| {
            addi(interp, args[0] as usize, 0, args[1] as i16, false)
        }),
        Instruction::new("lis", "{RT:gpr},{SIMM:si}", |interp, args, _bits| {
            addis(interp, args[0] as usize, 0, args[1] as i16, false)
        }),
        Instruction::new("mr.", "{RT:gpr},{RA:gpr}", |interp, args, bits| {
            // An addi alias, so moving from r0 loads zero.
            addi(interp, args[0] as usize, args[1] as usize, 0, bits & BIT_RC != 0)
        }),
        // Byte loads.
        Instruction::new("lbz", "{RT:gpr},{D:si}({RA:gpr})", |interp, args, _bits| {
            let (rt, ea) = disp_load(interp, args);
            let value = interp.proc.lbz(ea)?;
            interp.proc.set_gpr(rt, u32::from(value));
            Ok(())
        }),
        Instruction::new("lbzx", "{RT:gpr},{RA:gpr},{RB:gpr}", |interp, args, _bits| {
            let (rt, ea) = indexed_load(interp, args);
            let value = interp.proc.lbz(ea)?;
            interp.proc.set_gpr(rt, u32::from(value));
            Ok(())
        }),
        Instruction::new("lbzu", "{RT:gpr},{D:si}({RA:gpr})", |interp, args, _bits| {
            let (rt, ea) = disp_load(interp, args);
            let value = interp.proc.lbz(ea)?;
            interp.proc.set_gpr(rt, u32::from(value));
            update_after_load(interp, args[2] as usize, rt, ea);
            Ok(())
        }),
        Instruction::new("lbzux", "{RT:gpr},{RA:gpr},{RB:gpr}", |interp, args, _bits| {
            let (rt, ea) = indexed_load(interp, args);
            let value = interp.proc.lbz(ea)?;
            interp.proc.set_gpr(rt, u32::from(value));
            update_after_load(interp, args[1] as usize, rt, ea);
            Ok(())
        }),
        // Halfword loads, zero- and sign-extending.
        Instruction::new("lhz", "{RT:gpr},{D:si}({RA:gpr})", |interp, args, _bits| {
            let (rt, ea) = disp_load(interp, args);
            let value = interp.proc.lhz(ea)?;
            interp.proc.set_gpr(rt, u32::from(value));
            Ok(())
        }),
        Instruction::new("lhzx", "{RT:gpr},{RA:gpr},{RB:gpr}", |interp, args, _bits| {
            let (rt, ea) = indexed_load(interp, args);
            let value = interp.proc.lhz(ea)?;
            interp.proc.set_gpr(rt, u32::from(value));
            Ok(())
        }),
        Instruction::new("lhzu", "{RT:gpr},{D:si}({RA:gpr})", |interp, args, _bits| {
            let (rt, ea) = disp_load(interp, args);
            let value = interp.proc.lhz(ea)?;
            interp.proc.set_gpr(rt, u32::from(value));
            update_after_load(interp, args[2] as usize, rt, ea);
            Ok(())
        }),
        Instruction::new("lhzux", "{RT:gpr},{RA:gpr},{RB:gpr}", |interp, args, _bits| {
            let (rt, ea) = indexed_load(interp, args);
            let value = interp.proc.lhz(ea)?;
            interp.proc.set_gpr(rt, u32::from(value));
            update_after_load(interp, args[1] as usize, rt, ea);
            Ok(())
        }),
        Instruction::new("lha", "{RT:gpr},{D:si}({RA:gpr})", |interp, args, _bits| {
            let (rt, ea) = disp_load(interp, args);
            let value = interp.proc.lha(ea)?;
            interp.proc.set_gpr(rt, i32::from(value));
            Ok(())
        }),
        Instruction::new("lhax", "{RT:gpr},{RA:gpr},{RB:gpr}", |interp, args, _bits| {
            let (rt, ea) = indexed_load(interp, args);
            let value = interp.proc.lha(ea)?;
            interp.proc.set_gpr(rt, i32::from(value));
            Ok(())
        }),
        // Word loads.
        Instruction::new("lwz", "{RT:gpr},{D:si}({RA:gpr})", |interp, args, _bits| {
            let (rt, ea) = disp_load(interp, args);
            let value = interp.proc.lwz(ea)?;
            interp.proc.set_gpr(rt, value);
            Ok(())
        }),
        Instruction::new("lwzx", "{RT:gpr},{RA:gpr},{RB:gpr}", |interp, args, _bits| {
            let (rt, ea) = indexed_load(interp, args);
            let value = interp.proc.lwz(ea)?;
            interp.proc.set_gpr(rt, value);
            Ok(())
        }),
        Instruction::new("lwzu", "{RT:gpr},{D:si}({RA:gpr})", |interp, args, _bits| {
            let (rt, ea) = disp_load(interp, args);
            let value = interp.proc.lwz(ea)?;
            interp.proc.set_gpr(rt, value);
            update_after_load(interp, args[2] as usize, rt, ea);
            Ok(())
        }),
        Instruction::new("lwzux", "{RT:gpr},{RA:gpr},{RB:gpr}", |interp, args, _bits| {
            let (rt, ea) = indexed_load(interp, args);
            let value = interp.proc.lwz(ea)?;
            interp.proc.set_gpr(rt, value);
            update_after_load(interp, args[1] as usize, rt, ea);
            Ok(())
        }),
        Instruction::new("lmw", "{RT:gpr},{D:si}({RA:gpr})", |interp, args, _bits| {
            let rt = args[0] as usize;
            let mut ea = u64::from(interp.proc.ea_disp(args[1] as i16, args[2] as usize));

            for i in 0..(32 - rt) {
                let value = interp.proc.lwz(ea)?;
                interp.proc.set_gpr(rt + i, value);
                ea += 4;
            }

            Ok(())
        }),
        // Byte stores.
        Instruction::new("stb", "{RS:gpr},{D:si}({RA:gpr})", |interp, args, _bits| {
            let (rs, ea) = disp_load(interp, args);
            let value = interp.proc.gpr(rs).u8();
            interp.proc.stb(ea, value)
        }),
        Instruction::new("stbu", "{RS:gpr},{D:si}({RA:gpr})", |interp, args, _bits| {
            let (rs, ea) = disp_load(interp, args);
            let value = interp.proc.gpr(rs).u8();
            interp.proc.stb(ea, value)?;
            update_after_store(interp, args[2] as usize, ea);
            Ok(())
        }),
        Instruction::new("stbx", "{RS:gpr},{RA:gpr}({RB:gpr})", |interp, args, _bits| {
            let (rs, ea) = indexed_load(interp, args);
            let value = interp.proc.gpr(rs).u8();
            interp.proc.stb(ea, value)
        }),
        Instruction::new("stbux", "{RS:gpr},{RA:gpr}({RB:gpr})", |interp, args, _bits| {
            let (rs, ea) = indexed_load(interp, args);
            let value = interp.proc.gpr(rs).u8();
            interp.proc.stb(ea, value)?;
            update_after_store(interp, args[1] as usize, ea);
            Ok(())
        }),
        // Halfword stores.
        Instruction::new("sth", "{RS:gpr},{D:si}({RA:gpr})", |interp, args, _bits| {
            let (rs, ea) = disp_load(interp, args);
            let value = interp.proc.gpr(rs).u16();
            interp.proc.sth(ea, value)
        }),
        Instruction::new("sthu", "{RS:gpr},{D:si}({RA:gpr})", |interp, args, _bits| {
            let (rs, ea) = disp_load(interp, args);
            let value = interp.proc.gpr(rs).u16();
            interp.proc.sth(ea, value)?;
            update_after_store(interp, args[2] as usize, ea);
            Ok(())
        }),
        Instruction::new("sthx", "{RS:gpr},{RA:gpr}({RB:gpr})", |interp, args, _bits| {
            let (rs, ea) = indexed_load(interp, args);
            let value = interp.proc.gpr(rs).u16();
            interp.proc.sth(ea, value)
        }),
        Instruction::new("sthux", "{RS:gpr},{RA:gpr}({RB:gpr})", |interp, args, _bits| {
            let (rs, ea) = indexed_load(interp, args);
            let value = interp.proc.gpr(rs).u16();
            interp.proc.sth(ea, value)?;
            update_after_store(interp, args[1] as usize, ea);
            Ok(())
        }),
        // Word stores.
        Instruction::new("stw", "{RS:gpr},{D:si}({RA:gpr})", |interp, args, _bits| {
            let (rs, ea) = disp_load(interp, args);
            let value = interp.proc.gpr(rs).u32();
            interp.proc.stw(ea, value)
        }),
        Instruction::new("stwu", "{RS:gpr},{D:si}({RA:gpr})", |interp, args, _bits| {
            let (rs, ea) = disp_load(interp, args);
            let value = interp.proc.gpr(rs).u32();
            interp.proc.stw(ea, value)?;
            update_after_store(interp, args[2] as usize, ea);
            Ok(())
        }),
        Instruction::new("stwx", "{RS:gpr},{RA:gpr}({RB:gpr})", |interp, args, _bits| {
            let (rs, ea) = indexed_load(interp, args);
            let value = interp.proc.gpr(rs).u32();
            interp.proc.stw(ea, value)
        }),
        Instruction::new("stwux", "{RS:gpr},{RA:gpr}({RB:gpr})", |interp, args, _bits| {
            let (rs, ea) = indexed_load(interp, args);
            let value = interp.proc.gpr(rs).u32();
            interp.proc.stw(ea, value)?;
            update_after_store(interp, args[1] as usize, ea);
            Ok(())
        }),
        Instruction::new("stmw", "{RS:gpr},{D:si}({RA:gpr})", |interp, args, _bits| {
            let rs = args[0] as usize;
            let mut ea = u64::from(interp.proc.ea_disp(args[1] as i16, args[2] as usize));

            for i in 0..(32 - rs) {
                let value = interp.proc.gpr(rs + i).u32();
                interp.proc.stw(ea, value)?;
                ea += 4;
            }

            Ok(())
        }),
    ]
}

// Displacement operand layout: target, displacement, base.
fn disp_load(interp: &Interpreter, args: &[i32]) -> (usize, u64) {
    let ea = interp.proc.ea_disp(args[1] as i16, args[2] as usize);
    (args[0] as usize, u64::from(ea))
}

// Indexed operand layout: target, base, offset.
fn indexed_load(interp: &Interpreter, args: &[i32]) -> (usize, u64) {
    let ea = interp.proc.ea_indexed(args[1] as usize, args[2] as usize);
    (args[0] as usize, u64::from(ea))
}

fn update_after_load(interp: &mut Interpreter, ra: usize, rt: usize, ea: u64) {
    if ra != rt && ra != 0 {
        interp.proc.set_gpr(ra, ea as u32);
    }
}

fn update_after_store(interp: &mut Interpreter, ra: usize, ea: u64) {
    if ra != 0 {
        interp.proc.set_gpr(ra, ea as u32);
    }
}
