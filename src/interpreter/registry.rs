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

use super::signature::{self, SigOp};
use super::{Interpreter, Step};
use crate::ast::Operand;
use crate::errors::InterpretError;

// Suffix bits passed through to instruction bodies.
pub const BIT_RC: u8 = 0b0000_0001; // record bit, trailing '.'
pub const BIT_OE: u8 = 0b0000_0010; // overflow-enable bit, trailing 'o'

pub type InstrBody = Box<dyn Fn(&mut Interpreter, &[i32], u8) -> Result<(), InterpretError>>;
pub type DirectiveBody = Box<dyn Fn(&mut Interpreter, &[Operand]) -> Result<Step, InterpretError>>;

/// One instruction as declared by an operations module: mnemonic key
/// (including suffix letters), signature text, and the body.
pub struct Instruction {
    pub key: String,
    pub signature: &'static str,
    pub body: InstrBody,
}

impl Instruction {
    pub fn new<F>(key: impl Into<String>, signature: &'static str, body: F) -> Self
    where
        F: Fn(&mut Interpreter, &[i32], u8) -> Result<(), InterpretError> + 'static,
    {
        Instruction {
            key: key.into(),
            signature,
            body: Box::new(body),
        }
    }

    /// An instruction that takes no operands at all.
    pub fn nullary<F>(key: impl Into<String>, body: F) -> Self
    where
        F: Fn(&mut Interpreter, &[i32], u8) -> Result<(), InterpretError> + 'static,
    {
        Self::new(key, "", body)
    }
}

pub struct Directive {
    pub key: &'static str,
    pub body: DirectiveBody,
}

impl Directive {
    pub fn new<F>(key: &'static str, body: F) -> Self
    where
        F: Fn(&mut Interpreter, &[Operand]) -> Result<Step, InterpretError> + 'static,
    {
        Directive {
            key,
            body: Box::new(body),
        }
    }
}

/// An instruction with its signature compiled for matching.
pub struct CompiledInstruction {
    pub key: String,
    pub sig: Vec<SigOp>,
    pub body: InstrBody,
}

/// The two operation catalogs. Built once at start-up and immutable from
/// then on; lookup is a linear scan over a couple hundred entries.
pub struct Registry {
    directives: Vec<Directive>,
    instructions: Vec<CompiledInstruction>,
}

impl Registry {
    pub fn new() -> Self {
        let instructions = super::operations::instruction_set()
            .into_iter()
            .map(|inst| {
                let sig = signature::compile(inst.signature)
                    .unwrap_or_else(|err| panic!("signature for '{}': {}", inst.key, err));
                CompiledInstruction {
                    key: inst.key,
                    sig,
                    body: inst.body,
                }
            })
            .collect();

        Registry {
            directives: super::operations::directive_set(),
            instructions,
        }
    }

    pub fn fetch_directive(&self, key: &str) -> Option<&Directive> {
        self.directives.iter().find(|d| d.key == key)
    }

    /// Look up a mnemonic with suffix tolerance: a catalog key ending in
    /// `.` also answers to the spelling without the dot, and the dotted
    /// query sets the RC bit; the same applies to a trailing `o` and the
    /// OE bit. The resolved bits pass through to the body.
    pub fn fetch_instruction(&self, key: &str) -> Option<(&CompiledInstruction, u8)> {
        for inst in &self.instructions {
            let mut rhs: &str = &inst.key;
            let mut bits = 0u8;

            if rhs.ends_with('.') {
                if !key.ends_with('.') {
                    rhs = &rhs[..rhs.len() - 1];
                } else {
                    bits |= BIT_RC;
                }
            }

            if rhs.ends_with('o') {
                if !key.ends_with('o') {
                    rhs = &rhs[..rhs.len() - 1];
                } else {
                    bits |= BIT_OE;
                }
            }

            if key == rhs {
                return Some((inst, bits));
            }
        }

        None
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_signature_compiles() {
        // Registry::new panics on a malformed signature; building it is the
        // whole test.
        let registry = Registry::new();
        assert!(registry.fetch_instruction("add").is_some());
        assert!(registry.fetch_directive(".exit").is_some());
        assert!(registry.fetch_directive(".echo").is_some());
    }

    #[test]
    fn test_suffix_matching_sets_record_bit() {
        let registry = Registry::new();

        let (inst, bits) = registry.fetch_instruction("add").unwrap();
        assert_eq!(inst.key, "add.");
        assert_eq!(bits, 0);

        let (_, bits) = registry.fetch_instruction("add.").unwrap();
        assert_eq!(bits, BIT_RC);
    }

    #[test]
    fn test_plain_keys_reject_suffixes() {
        let registry = Registry::new();
        assert!(registry.fetch_instruction("cmpw").is_some());
        assert!(registry.fetch_instruction("cmpw.").is_none());
        assert!(registry.fetch_instruction("b").is_some());
        assert!(registry.fetch_instruction("bo").is_none());
    }

    #[test]
    fn test_unknown_mnemonic() {
        let registry = Registry::new();
        assert!(registry.fetch_instruction("frobnicate").is_none());
        assert!(registry.fetch_directive(".frobnicate").is_none());
    }
}
