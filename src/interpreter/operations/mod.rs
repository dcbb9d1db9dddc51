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

mod arithmetic;
mod bitwise;
mod branch;
mod compare;
mod directives;
mod float_load_store;
mod float_math;
mod load_store;
mod misc;

use super::registry::{BIT_RC, Directive, Instruction};
use super::Interpreter;
use crate::errors::InterpretError;

/// Every instruction the interpreter knows, grouped by family.
pub fn instruction_set() -> Vec<Instruction> {
    let mut set = Vec::new();

    set.extend(arithmetic::entries());
    set.extend(bitwise::entries());
    set.extend(compare::entries());
    set.extend(branch::entries());
    set.extend(load_store::entries());
    set.extend(float_load_store::entries());
    set.extend(float_math::entries());
    set.extend(misc::entries());

    set
}

pub fn directive_set() -> Vec<Directive> {
    directives::entries()
}

// The record-bit funnel: mnemonics with a '.' suffix update CR0 from the
// result, which is exactly a signed compare of the destination against 0.
pub(crate) fn record(
    interp: &mut Interpreter,
    rt: usize,
    bits: u8,
) -> Result<(), InterpretError> {
    if bits & BIT_RC != 0 {
        compare::cmpwi(interp, 0, rt, 0);
    }

    Ok(())
}
