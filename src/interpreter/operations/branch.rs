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

// Branching instructions. Everything conditional funnels through bc() with
// pre-baked BO/BI values; the alias matrix (blt/ble/... x -/l/lr/lrl/ctr/
// ctrl) is expanded from a table.

use crate::errors::InterpretError;
use crate::interpreter::Interpreter;
use crate::interpreter::registry::Instruction;

// CR bit offsets within a field.
const LT: u8 = 0;
const GT: u8 = 1;
const EQ: u8 = 2;

// Where a pre-baked variant takes its target from.
#[derive(Clone, Copy)]
enum Target {
    Label,
    Lr,
    Ctr,
}

// Condition aliases: mnemonic stem, BO gate, CR bit within the field.
// The complementary pairs differ only in BO bit 0x08, which flips the
// sense of the CR-bit test.
const CONDITIONS: &[(&str, u8, u8)] = &[
    ("blt", 0b01100, LT),
    ("ble", 0b00100, GT),
    ("beq", 0b01100, EQ),
    ("bge", 0b00100, LT),
    ("bgt", 0b01100, GT),
    ("bnl", 0b00100, LT),
    ("bne", 0b00100, EQ),
    ("bng", 0b00100, GT),
];

const VARIANTS: &[(&str, bool, Target)] = &[
    ("", false, Target::Label),
    ("lr", false, Target::Lr),
    ("ctr", false, Target::Ctr),
    ("l", true, Target::Label),
    ("lrl", true, Target::Lr),
    ("ctrl", true, Target::Ctr),
];

pub(super) fn entries() -> Vec<Instruction> {
    let mut set = vec![
        Instruction::new("b", "{LL:addr}", |interp, _args, _bits| {
            b(interp, false, None)
        }),
        Instruction::new("bl", "{LL:addr}", |interp, _args, _bits| {
            b(interp, true, None)
        }),
        Instruction::nullary("blr", |interp, _args, _bits| {
            let lr = interp.proc.lr();
            b(interp, false, Some(lr))
        }),
        Instruction::nullary("blrl", |interp, _args, _bits| {
            let lr = interp.proc.lr();
            b(interp, true, Some(lr))
        }),
        Instruction::nullary("bctr", |interp, _args, _bits| {
            let ctr = interp.proc.ctr();
            b(interp, false, Some(ctr))
        }),
        Instruction::nullary("bctrl", |interp, _args, _bits| {
            let ctr = interp.proc.ctr();
            b(interp, true, Some(ctr))
        }),
    ];

    for &(stem, bo, cr_bit) in CONDITIONS {
        for &(suffix, lk, target) in VARIANTS {
            let signature = match target {
                Target::Label => "[{CR:cr},]{BD:addr}",
                Target::Lr | Target::Ctr => "[{CR:cr}]",
            };

            set.push(Instruction::new(
                format!("{}{}", stem, suffix),
                signature,
                move |interp, args, _bits| {
                    let cr = args.first().copied().unwrap_or(0) as u8;
                    let bd = resolve(interp, target);
                    bc(interp, bo, 4 * cr + cr_bit, lk, bd)
                },
            ));
        }
    }

    // Decrement-and-test loop branches.
    for (key, bo, lk, to_lr) in [
        ("bdz", 0b10010u8, false, false),
        ("bdzl", 0b10010, true, false),
        ("bdnz", 0b10000, false, false),
        ("bdnzl", 0b10000, true, false),
        ("bdzlr", 0b10010, false, true),
        ("bdzlrl", 0b10010, true, true),
        ("bdnzlr", 0b10000, false, true),
        ("bdnzlrl", 0b10000, true, true),
    ] {
        let signature = if to_lr { "" } else { "{BD:addr}" };

        set.push(Instruction::new(key, signature, move |interp, _args, _bits| {
            let bd = if to_lr { Some(interp.proc.lr()) } else { None };
            bc(interp, bo, 0, lk, bd)
        }));
    }

    set
}

fn resolve(interp: &Interpreter, target: Target) -> Option<u32> {
    match target {
        Target::Label => None,
        Target::Lr => Some(interp.proc.lr()),
        Target::Ctr => Some(interp.proc.ctr()),
    }
}

// Unconditional transfer. A linked branch records the position of the next
// line first; without an absolute target the pending label decides.
fn b(interp: &mut Interpreter, lk: bool, target: Option<u32>) -> Result<(), InterpretError> {
    if lk {
        let link = interp.tell();
        interp.proc.set_lr(link);
    }

    match target {
        None => interp.branch(),
        Some(position) => {
            interp.seek(position);
            Ok(())
        }
    }
}

// The conditional funnel.
//
// BO[0] BO[1] BO[2] BO[3] BO[4]
// 0x10  0x08  0x04  0x02  0x01
//
// BO[2] clear: decrement CTR, then gate on (CTR==0) xor !BO[3].
// BO[0] clear: gate on (CR bit BI) xor !BO[1].
fn bc(
    interp: &mut Interpreter,
    bo: u8,
    bi: u8,
    lk: bool,
    bd: Option<u32>,
) -> Result<(), InterpretError> {
    if lk {
        let link = interp.tell();
        interp.proc.set_lr(link);
    }

    if bo & 0x04 == 0 {
        let ctr = interp.proc.ctr().wrapping_sub(1);
        interp.proc.set_ctr(ctr);

        if !((ctr == 0) ^ (bo & 0x02 == 0)) {
            return Ok(());
        }
    }

    if bo & 0x10 == 0 {
        let field = interp.proc.cr((bi >> 2) as usize);
        let bit = 1u8 << (bi & 0x3);

        if !((field & bit != 0) ^ (bo & 0x08 == 0)) {
            return Ok(());
        }
    }

    match bd {
        None => interp.branch(),
        Some(position) => {
            interp.seek(position);
            Ok(())
        }
    }
}
