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

// Compare instructions. The target CR field is optional and defaults to
// cr0, so the register/immediate operands sit at the tail of the vector.

use crate::interpreter::Interpreter;
use crate::interpreter::registry::Instruction;
use crate::processor::registers::{CR_EQ, CR_GT, CR_LT};

pub(super) fn entries() -> Vec<Instruction> {
    vec![
        Instruction::new("cmpw", "[{BF:cr},]{RA:gpr},{RB:gpr}", |interp, args, _bits| {
            let (bf, ra, rb) = split(args);
            let lhs = interp.proc.gpr(ra).s32();
            let rhs = interp.proc.gpr(rb as usize).s32();
            interp.proc.set_cr(bf, flags(lhs, rhs));
            Ok(())
        }),
        Instruction::new("cmpwi", "[{BF:cr},]{RA:gpr},{SIMM:si}", |interp, args, _bits| {
            let (bf, ra, si) = split(args);
            cmpwi(interp, bf, ra, si as i16);
            Ok(())
        }),
        Instruction::new("cmplw", "[{BF:cr},]{RA:gpr},{RB:gpr}", |interp, args, _bits| {
            let (bf, ra, rb) = split(args);
            let lhs = interp.proc.gpr(ra).u32();
            let rhs = interp.proc.gpr(rb as usize).u32();
            interp.proc.set_cr(bf, flags(lhs, rhs));
            Ok(())
        }),
        Instruction::new("cmplwi", "[{BF:cr},]{RA:gpr},{UIMM:ui}", |interp, args, _bits| {
            let (bf, ra, ui) = split(args);
            let lhs = interp.proc.gpr(ra).u32();
            interp.proc.set_cr(bf, flags(lhs, ui as u32));
            Ok(())
        }),
    ]
}

// (bf, second-to-last, last) with bf defaulting to field 0.
fn split(args: &[i32]) -> (usize, usize, i32) {
    let bf = if args.len() > 2 { args[0] as usize } else { 0 };
    (bf, args[args.len() - 2] as usize, args[args.len() - 1])
}

fn flags<T: Ord>(lhs: T, rhs: T) -> u8 {
    match lhs.cmp(&rhs) {
        std::cmp::Ordering::Less => CR_LT,
        std::cmp::Ordering::Greater => CR_GT,
        std::cmp::Ordering::Equal => CR_EQ,
    }
}

/// Signed compare of a register against an immediate; also the funnel every
/// record-form mnemonic uses to update cr0 from its result.
pub(crate) fn cmpwi(interp: &mut Interpreter, bf: usize, ra: usize, si: i16) {
    let lhs = interp.proc.gpr(ra).s32();
    interp.proc.set_cr(bf, flags(lhs, i32::from(si)));
}
