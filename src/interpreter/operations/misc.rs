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

// Moves between GPRs and the count/link registers.

use crate::interpreter::registry::Instruction;

pub(super) fn entries() -> Vec<Instruction> {
    vec![
        Instruction::new("mtctr", "{RA:gpr}", |interp, args, _bits| {
            let value = interp.proc.gpr(args[0] as usize).u32();
            interp.proc.set_ctr(value);
            Ok(())
        }),
        Instruction::new("mfctr", "{RD:gpr}", |interp, args, _bits| {
            let value = interp.proc.ctr();
            interp.proc.set_gpr(args[0] as usize, value);
            Ok(())
        }),
        Instruction::new("mtlr", "{RA:gpr}", |interp, args, _bits| {
            let value = interp.proc.gpr(args[0] as usize).u32();
            interp.proc.set_lr(value);
            Ok(())
        }),
        Instruction::new("mflr", "{RD:gpr}", |interp, args, _bits| {
            let value = interp.proc.lr();
            interp.proc.set_gpr(args[0] as usize, value);
            Ok(())
        }),
    ]
}
