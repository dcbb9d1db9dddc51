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

// Floating-point arithmetic. Everything computes at double precision; the
// 's'-suffixed forms round the result to single and rewiden. The record
// forms parse but never act on CR1.

use crate::interpreter::Interpreter;
use crate::interpreter::registry::Instruction;
use crate::processor::registers::Fpr;

pub(super) fn entries() -> Vec<Instruction> {
    vec![
        binary("fadd.", false, |a, b| a + b),
        binary("fadds.", true, |a, b| a + b),
        binary("fsub.", false, |a, b| a - b),
        binary("fsubs.", true, |a, b| a - b),
        binary("fmul.", false, |a, b| a * b),
        binary("fmuls.", true, |a, b| a * b),
        binary("fdiv.", false, |a, b| a / b),
        binary("fdivs.", true, |a, b| a / b),
        fused("fmadd.", false, |a, c, b| a * c + b),
        fused("fmadds.", true, |a, c, b| a * c + b),
        fused("fmsub.", false, |a, c, b| a * c - b),
        fused("fmsubs.", true, |a, c, b| a * c - b),
        fused("fnmadd.", false, |a, c, b| -(a * c + b)),
        fused("fnmadds.", true, |a, c, b| -(a * c + b)),
        fused("fnmsub.", false, |a, c, b| -(a * c - b)),
        fused("fnmsubs.", true, |a, c, b| -(a * c - b)),
        unary("fsqrt.", false, f64::sqrt),
        unary("fsqrts.", true, f64::sqrt),
        unary("fneg.", false, |v| -v),
        unary("frsqrte.", false, |v| 1.0 / v.sqrt()),
        Instruction::new("fabs.", "{FRT:fpr},{FRB:fpr}", |interp, args, _bits| {
            let (frt, frb) = (args[0] as usize, args[1] as usize);
            let bits = interp.proc.fpr(frb).bits() & !0x8000_0000_0000_0000;
            interp.proc.set_fpr(frt, Fpr::from_bits(bits));
            Ok(())
        }),
        Instruction::new("fnabs.", "{FRT:fpr},{FRB:fpr}", |interp, args, _bits| {
            let (frt, frb) = (args[0] as usize, args[1] as usize);
            let bits = interp.proc.fpr(frb).bits() | 0x8000_0000_0000_0000;
            interp.proc.set_fpr(frt, Fpr::from_bits(bits));
            Ok(())
        }),
        Instruction::new("fres.", "{FRT:fpr},{FRB:fpr}", |interp, args, _bits| {
            let (frt, frb) = (args[0] as usize, args[1] as usize);
            let value = 1.0f32 / interp.proc.fpr(frb).f32();
            interp.proc.set_fpr(frt, Fpr::from_f32(value));
            Ok(())
        }),
        Instruction::new("frsp.", "{FRT:fpr},{FRB:fpr}", |interp, args, _bits| {
            let (frt, frb) = (args[0] as usize, args[1] as usize);
            let value = interp.proc.fpr(frb).f32();
            interp.proc.set_fpr(frt, Fpr::from_f32(value));
            Ok(())
        }),
    ]
}

fn store(interp: &mut Interpreter, frt: usize, value: f64, single: bool) {
    let result = if single {
        Fpr::from_f32(value as f32)
    } else {
        Fpr::from_f64(value)
    };

    interp.proc.set_fpr(frt, result);
}

fn binary(key: &'static str, single: bool, op: fn(f64, f64) -> f64) -> Instruction {
    Instruction::new(key, "{FRT:fpr},{FRA:fpr},{FRB:fpr}", move |interp, args, _bits| {
        let (frt, fra, frb) = (args[0] as usize, args[1] as usize, args[2] as usize);
        let value = op(interp.proc.fpr(fra).f64(), interp.proc.fpr(frb).f64());
        store(interp, frt, value, single);
        Ok(())
    })
}

// Fused forms compute a*c +/- b in one double-precision expression.
fn fused(key: &'static str, single: bool, op: fn(f64, f64, f64) -> f64) -> Instruction {
    Instruction::new(
        key,
        "{FRT:fpr},{FRA:fpr},{FRC:fpr},{FRB:fpr}",
        move |interp, args, _bits| {
            let (frt, fra, frc, frb) = (
                args[0] as usize,
                args[1] as usize,
                args[2] as usize,
                args[3] as usize,
            );
            let value = op(
                interp.proc.fpr(fra).f64(),
                interp.proc.fpr(frc).f64(),
                interp.proc.fpr(frb).f64(),
            );
            store(interp, frt, value, single);
            Ok(())
        },
    )
}

fn unary(key: &'static str, single: bool, op: fn(f64) -> f64) -> Instruction {
    Instruction::new(key, "{FRT:fpr},{FRB:fpr}", move |interp, args, _bits| {
        let (frt, frb) = (args[0] as usize, args[1] as usize);
        let value = op(interp.proc.fpr(frb).f64());
        store(interp, frt, value, single);
        Ok(())
    })
}
