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

// Floating-point load/store instructions. Displacement forms here spell
// the base register as a third comma operand rather than in parentheses.
// Singles widen to double on load and narrow from the double view on store.

use crate::interpreter::Interpreter;
use crate::interpreter::registry::Instruction;
use crate::processor::registers::Fpr;

pub(super) fn entries() -> Vec<Instruction> {
    vec![
        Instruction::new("lfs", "{FRT:fpr},{D:si},{RA:gpr}", |interp, args, _bits| {
            let (frt, ea) = disp(interp, args);
            let value = interp.proc.lfs(ea)?;
            interp.proc.set_fpr(frt, Fpr::from_f32(value));
            Ok(())
        }),
        Instruction::new("lfsx", "{FRT:fpr},{RA:gpr},{RB:gpr}", |interp, args, _bits| {
            let (frt, ea) = indexed(interp, args);
            let value = interp.proc.lfs(ea)?;
            interp.proc.set_fpr(frt, Fpr::from_f32(value));
            Ok(())
        }),
        Instruction::new("lfsu", "{FRT:fpr},{D:si},{RA:gpr}", |interp, args, _bits| {
            let (frt, ea) = disp(interp, args);
            let value = interp.proc.lfs(ea)?;
            interp.proc.set_fpr(frt, Fpr::from_f32(value));
            update(interp, args[2] as usize, ea);
            Ok(())
        }),
        Instruction::new("lfsux", "{FRT:fpr},{RA:gpr},{RB:gpr}", |interp, args, _bits| {
            let (frt, ea) = indexed(interp, args);
            let value = interp.proc.lfs(ea)?;
            interp.proc.set_fpr(frt, Fpr::from_f32(value));
            update(interp, args[1] as usize, ea);
            Ok(())
        }),
        Instruction::new("lfd", "{FRT:fpr},{D:si},{RA:gpr}", |interp, args, _bits| {
            let (frt, ea) = disp(interp, args);
            let value = interp.proc.lfd(ea)?;
            interp.proc.set_fpr(frt, Fpr::from_f64(value));
            Ok(())
        }),
        Instruction::new("lfdx", "{FRT:fpr},{RA:gpr},{RB:gpr}", |interp, args, _bits| {
            let (frt, ea) = indexed(interp, args);
            let value = interp.proc.lfd(ea)?;
            interp.proc.set_fpr(frt, Fpr::from_f64(value));
            Ok(())
        }),
        Instruction::new("lfdu", "{FRT:fpr},{D:si},{RA:gpr}", |interp, args, _bits| {
            let (frt, ea) = disp(interp, args);
            let value = interp.proc.lfd(ea)?;
            interp.proc.set_fpr(frt, Fpr::from_f64(value));
            update(interp, args[2] as usize, ea);
            Ok(())
        }),
        Instruction::new("lfdux", "{FRT:fpr},{RA:gpr},{RB:gpr}", |interp, args, _bits| {
            let (frt, ea) = indexed(interp, args);
            let value = interp.proc.lfd(ea)?;
            interp.proc.set_fpr(frt, Fpr::from_f64(value));
            update(interp, args[1] as usize, ea);
            Ok(())
        }),
        Instruction::new("stfs", "{FRS:fpr},{D:si},{RA:gpr}", |interp, args, _bits| {
            let (frs, ea) = disp(interp, args);
            let value = interp.proc.fpr(frs).f32();
            interp.proc.stfs(ea, value)
        }),
        Instruction::new("stfsx", "{FRS:fpr},{RA:gpr},{RB:gpr}", |interp, args, _bits| {
            let (frs, ea) = indexed(interp, args);
            let value = interp.proc.fpr(frs).f32();
            interp.proc.stfs(ea, value)
        }),
        Instruction::new("stfsu", "{FRS:fpr},{D:si},{RA:gpr}", |interp, args, _bits| {
            let (frs, ea) = disp(interp, args);
            let value = interp.proc.fpr(frs).f32();
            interp.proc.stfs(ea, value)?;
            update(interp, args[2] as usize, ea);
            Ok(())
        }),
        Instruction::new("stfsux", "{FRS:fpr},{RA:gpr},{RB:gpr}", |interp, args, _bits| {
            let (frs, ea) = indexed(interp, args);
            let value = interp.proc.fpr(frs).f32();
            interp.proc.stfs(ea, value)?;
            update(interp, args[1] as usize, ea);
            Ok(())
        }),
        Instruction::new("stfd", "{FRS:fpr},{D:si},{RA:gpr}", |interp, args, _bits| {
            let (frs, ea) = disp(interp, args);
            let value = interp.proc.fpr(frs).f64();
            interp.proc.stfd(ea, value)
        }),
        Instruction::new("stfdx", "{FRS:fpr},{RA:gpr},{RB:gpr}", |interp, args, _bits| {
            let (frs, ea) = indexed(interp, args);
            let value = interp.proc.fpr(frs).f64();
            interp.proc.stfd(ea, value)
        }),
        Instruction::new("stfdu", "{FRS:fpr},{D:si},{RA:gpr}", |interp, args, _bits| {
            let (frs, ea) = disp(interp, args);
            let value = interp.proc.fpr(frs).f64();
            interp.proc.stfd(ea, value)?;
            update(interp, args[2] as usize, ea);
            Ok(())
        }),
        Instruction::new("stfdux", "{FRS:fpr},{RA:gpr},{RB:gpr}", |interp, args, _bits| {
            let (frs, ea) = indexed(interp, args);
            let value = interp.proc.fpr(frs).f64();
            interp.proc.stfd(ea, value)?;
            update(interp, args[1] as usize, ea);
            Ok(())
        }),
        Instruction::new("fmr.", "{FRT:fpr},{FRB:fpr}", |interp, args, _bits| {
            let (frt, frb) = (args[0] as usize, args[1] as usize);
            let value = interp.proc.fpr(frb);
            interp.proc.set_fpr(frt, value);
            // The record form parses but does not touch CR1.
            Ok(())
        }),
    ]
}

fn disp(interp: &Interpreter, args: &[i32]) -> (usize, u64) {
    let ea = interp.proc.ea_disp(args[1] as i16, args[2] as usize);
    (args[0] as usize, u64::from(ea))
}

fn indexed(interp: &Interpreter, args: &[i32]) -> (usize, u64) {
    let ea = interp.proc.ea_indexed(args[1] as usize, args[2] as usize);
    (args[0] as usize, u64::from(ea))
}

fn update(interp: &mut Interpreter, ra: usize, ea: u64) {
    if ra != 0 {
        interp.proc.set_gpr(ra, ea as u32);
    }
}
