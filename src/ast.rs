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

// Represents all possible forms an operand token can take on a line.
// Register references carry their raw index; range checks happen when the
// token is matched against an instruction signature.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Gpr(u32),      // r0..r31
    Fpr(u32),      // f0..f31
    Cr(u32),       // cr0..cr7
    Number(i64),   // hex/binary/octal/decimal literal, optionally negative
    Ident(String), // bare word, e.g. a branch target
    Str(String),   // quoted string, escapes already resolved
    Punct(char),   // ',' '(' ')'
}

impl Operand {
    /// The word spelling of this token, for slots that take any bare word
    /// (branch targets). A register reference or a number is still a word
    /// there; strings and punctuation are not.
    pub fn as_word(&self) -> Option<String> {
        match self {
            Operand::Gpr(n) => Some(format!("r{}", n)),
            Operand::Fpr(n) => Some(format!("f{}", n)),
            Operand::Cr(n) => Some(format!("cr{}", n)),
            Operand::Number(v) => Some(v.to_string()),
            Operand::Ident(word) => Some(word.clone()),
            Operand::Str(_) | Operand::Punct(_) => None,
        }
    }
}

// --- Line structure ---

// A single source line: a label declaration, a directive, an instruction,
// or nothing at all (blank / comment-only).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedLine {
    pub label: Option<String>,
    pub directive: Option<(String, Vec<Operand>)>,
    pub instruction: Option<(String, Vec<Operand>)>,
}

impl ParsedLine {
    pub fn is_empty(&self) -> bool {
        self.label.is_none() && self.directive.is_none() && self.instruction.is_none()
    }
}
