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

use crate::ast::Operand;
use crate::errors::InterpretError;

/// The typed operand slots a signature can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotType {
    Gpr,
    Fpr,
    Cr,
    Si,
    Ui,
    Bit,
    Addr,
}

/// One element of a compiled signature. Signatures are compiled once at
/// registration; matching never re-reads the signature text.
#[derive(Debug, Clone)]
pub enum SigOp {
    Literal(char),
    Slot { name: String, ty: SlotType },
    Optional(Vec<SigOp>),
}

/// Compile a signature string: literal characters, `{NAME:type}` slots,
/// `[...]` optional groups. Whitespace advances past nothing at match time
/// (the operand stream is already tokenized) and is dropped here.
pub fn compile(signature: &str) -> Result<Vec<SigOp>, String> {
    let chars: Vec<char> = signature.chars().collect();
    let mut pos = 0;
    compile_seq(&chars, &mut pos, None)
}

fn compile_seq(
    chars: &[char],
    pos: &mut usize,
    terminator: Option<char>,
) -> Result<Vec<SigOp>, String> {
    let mut ops = Vec::new();

    while *pos < chars.len() {
        let c = chars[*pos];
        *pos += 1;

        if Some(c) == terminator {
            return Ok(ops);
        }

        match c {
            ' ' => {}
            '{' => {
                let name = take_until(chars, pos, ':')?;
                let ty_text = take_until(chars, pos, '}')?;
                let ty = match ty_text.as_str() {
                    "gpr" => SlotType::Gpr,
                    "fpr" => SlotType::Fpr,
                    "cr" => SlotType::Cr,
                    "si" => SlotType::Si,
                    "ui" => SlotType::Ui,
                    "bit" => SlotType::Bit,
                    "addr" => SlotType::Addr,
                    other => return Err(format!("unknown slot type '{}'", other)),
                };
                ops.push(SigOp::Slot { name, ty });
            }
            '[' => {
                ops.push(SigOp::Optional(compile_seq(chars, pos, Some(']'))?));
            }
            other => ops.push(SigOp::Literal(other)),
        }
    }

    if terminator.is_some() {
        return Err("unterminated group".to_string());
    }

    Ok(ops)
}

fn take_until(chars: &[char], pos: &mut usize, end: char) -> Result<String, String> {
    let mut out = String::new();

    while *pos < chars.len() {
        let c = chars[*pos];
        *pos += 1;

        if c == end {
            return Ok(out);
        }

        out.push(c);
    }

    Err(format!("expected '{}' in signature", end))
}

/// The outcome of a successful match: the operand vector in declaration
/// order, plus the branch-target label when an `addr` slot was present.
#[derive(Debug, Default, PartialEq)]
pub struct MatchedArgs {
    pub values: Vec<i32>,
    pub label: Option<String>,
}

/// Match a compiled signature against the operand tokens of a line.
/// Trailing tokens beyond the signature are ignored.
pub fn match_signature(
    sig: &[SigOp],
    operands: &[Operand],
    line: usize,
) -> Result<MatchedArgs, InterpretError> {
    let mut state = MatchState {
        operands,
        pos: 0,
        out: MatchedArgs::default(),
    };

    match_seq(sig, &mut state).map_err(|reason| InterpretError::Syntax { line, reason })?;
    Ok(state.out)
}

struct MatchState<'a> {
    operands: &'a [Operand],
    pos: usize,
    out: MatchedArgs,
}

fn match_seq(sig: &[SigOp], state: &mut MatchState) -> Result<(), String> {
    for op in sig {
        match op {
            SigOp::Literal(c) => match state.operands.get(state.pos) {
                Some(Operand::Punct(p)) if p == c => state.pos += 1,
                _ => return Err(format!("expected '{}'", c)),
            },
            SigOp::Slot { name, ty } => match_slot(name, *ty, state)?,
            SigOp::Optional(inner) => {
                // Trial-parse; on failure rewind both the cursor and the
                // operand watermark and carry on after the group.
                let save_pos = state.pos;
                let save_len = state.out.values.len();
                let save_label = state.out.label.clone();

                if match_seq(inner, state).is_err() {
                    state.pos = save_pos;
                    state.out.values.truncate(save_len);
                    state.out.label = save_label;
                }
            }
        }
    }

    Ok(())
}

fn match_slot(name: &str, ty: SlotType, state: &mut MatchState) -> Result<(), String> {
    let Some(operand) = state.operands.get(state.pos) else {
        return Err(format!("missing argument '{}'", name));
    };

    let bad = || Err(format!("bad argument '{}'", name));

    match (ty, operand) {
        (SlotType::Gpr, Operand::Gpr(n)) if *n <= 31 => state.out.values.push(*n as i32),
        (SlotType::Fpr, Operand::Fpr(n)) if *n <= 31 => state.out.values.push(*n as i32),
        (SlotType::Cr, Operand::Cr(n)) if *n <= 7 => state.out.values.push(*n as i32),
        (SlotType::Si, Operand::Number(v))
            if *v >= i64::from(i16::MIN) && *v <= i64::from(i16::MAX) =>
        {
            state.out.values.push(*v as i32)
        }
        (SlotType::Ui, Operand::Number(v)) if *v >= 0 && *v <= i64::from(u16::MAX) => {
            state.out.values.push(*v as i32)
        }
        (SlotType::Bit, Operand::Number(v)) if (0..=31).contains(v) => {
            state.out.values.push(*v as i32)
        }
        // A branch target is any bare word, register- or number-shaped
        // included.
        (SlotType::Addr, word_token) => match word_token.as_word() {
            Some(word) => state.out.label = Some(word),
            None => return bad(),
        },
        _ => return bad(),
    }

    state.pos += 1;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(text: &str) -> Vec<SigOp> {
        compile(text).unwrap()
    }

    #[test]
    fn test_match_three_registers() {
        let matched = match_signature(
            &sig("{RT:gpr},{RA:gpr},{RB:gpr}"),
            &[
                Operand::Gpr(3),
                Operand::Punct(','),
                Operand::Gpr(4),
                Operand::Punct(','),
                Operand::Gpr(5),
            ],
            1,
        )
        .unwrap();

        assert_eq!(matched.values, vec![3, 4, 5]);
        assert_eq!(matched.label, None);
    }

    #[test]
    fn test_match_displacement_form() {
        let matched = match_signature(
            &sig("{RT:gpr},{D:si}({RA:gpr})"),
            &[
                Operand::Gpr(3),
                Operand::Punct(','),
                Operand::Number(-8),
                Operand::Punct('('),
                Operand::Gpr(1),
                Operand::Punct(')'),
            ],
            1,
        )
        .unwrap();

        assert_eq!(matched.values, vec![3, -8, 1]);
    }

    #[test]
    fn test_optional_group_taken() {
        let matched = match_signature(
            &sig("[{BF:cr},]{RA:gpr},{SIMM:si}"),
            &[
                Operand::Cr(2),
                Operand::Punct(','),
                Operand::Gpr(4),
                Operand::Punct(','),
                Operand::Number(7),
            ],
            1,
        )
        .unwrap();

        assert_eq!(matched.values, vec![2, 4, 7]);
    }

    #[test]
    fn test_optional_group_rewinds_on_failure() {
        let matched = match_signature(
            &sig("[{BF:cr},]{RA:gpr},{SIMM:si}"),
            &[Operand::Gpr(4), Operand::Punct(','), Operand::Number(7)],
            1,
        )
        .unwrap();

        assert_eq!(matched.values, vec![4, 7]);
    }

    #[test]
    fn test_addr_slot_stashes_label() {
        let matched = match_signature(
            &sig("[{CR:cr},]{BD:addr}"),
            &[Operand::Ident("loop_top".to_string())],
            1,
        )
        .unwrap();

        assert_eq!(matched.values, Vec::<i32>::new());
        assert_eq!(matched.label, Some("loop_top".to_string()));
    }

    #[test]
    fn test_addr_slot_accepts_register_shaped_words() {
        for (operand, expected) in [
            (Operand::Gpr(5), "r5"),
            (Operand::Fpr(2), "f2"),
            (Operand::Cr(3), "cr3"),
            (Operand::Number(16), "16"),
        ] {
            let matched = match_signature(&sig("{LL:addr}"), &[operand.clone()], 1).unwrap();
            assert_eq!(matched.label.as_deref(), Some(expected), "{:?}", operand);
        }
    }

    #[test]
    fn test_addr_slot_rejects_non_words() {
        for operand in [Operand::Str("x".to_string()), Operand::Punct(',')] {
            let err = match_signature(&sig("{LL:addr}"), &[operand.clone()], 1).unwrap_err();
            let InterpretError::Syntax { reason, .. } = err else {
                panic!("expected syntax error for {:?}", operand);
            };
            assert_eq!(reason, "bad argument 'LL'");
        }
    }

    #[test]
    fn test_missing_argument_message() {
        let err = match_signature(&sig("{RT:gpr},{SIMM:si}"), &[Operand::Gpr(3)], 7).unwrap_err();
        assert_eq!(
            err,
            InterpretError::Syntax {
                line: 7,
                reason: "expected ','".to_string()
            }
        );

        let err = match_signature(&sig("{RT:gpr}"), &[], 7).unwrap_err();
        assert_eq!(
            err,
            InterpretError::Syntax {
                line: 7,
                reason: "missing argument 'RT'".to_string()
            }
        );
    }

    #[test]
    fn test_out_of_range_values_are_bad_arguments() {
        for (signature, operand) in [
            ("{RT:gpr}", Operand::Gpr(32)),
            ("{BF:cr}", Operand::Cr(8)),
            ("{SIMM:si}", Operand::Number(40000)),
            ("{UIMM:ui}", Operand::Number(-1)),
            ("{UIMM:ui}", Operand::Number(0x10000)),
            ("{SH:bit}", Operand::Number(32)),
            ("{RT:gpr}", Operand::Number(3)),
        ] {
            let err = match_signature(&sig(signature), &[operand.clone()], 1).unwrap_err();
            let InterpretError::Syntax { reason, .. } = err else {
                panic!("expected syntax error for {:?}", operand);
            };
            assert!(reason.starts_with("bad argument"), "{:?}: {}", operand, reason);
        }
    }

    #[test]
    fn test_trailing_tokens_are_ignored() {
        let matched = match_signature(
            &sig("{RT:gpr}"),
            &[Operand::Gpr(1), Operand::Punct(','), Operand::Gpr(2)],
            1,
        )
        .unwrap();

        assert_eq!(matched.values, vec![1]);
    }

    #[test]
    fn test_compile_rejects_malformed_signatures() {
        assert!(compile("{RT:gpr").is_err());
        assert!(compile("{RT:bogus}").is_err());
        assert!(compile("[{CR:cr}").is_err());
    }
}
