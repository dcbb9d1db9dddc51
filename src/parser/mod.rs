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

use crate::ast::*;
use crate::errors::InterpretError;
use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;

// Derive the parser from our grammar file.
#[derive(Parser)]
#[grammar = "./grammar.pest"]
pub struct LineParser;

// Parse a single comment-stripped source line into its token form.
pub fn parse_line(source: &str, line_no: usize) -> Result<ParsedLine, InterpretError> {
    let pairs = LineParser::parse(Rule::line, source).map_err(|e| InterpretError::Syntax {
        line: line_no,
        reason: e.variant.message().into_owned(),
    })?;

    let mut parsed = ParsedLine::default();

    for pair in pairs.flatten() {
        match pair.as_rule() {
            Rule::label_line => {
                let name = pair.into_inner().next().map(|p| p.as_str().to_string());
                parsed.label = name;
                break;
            }
            Rule::directive_line => {
                let mut inner = pair.into_inner();
                let name = inner.next().map(|p| p.as_str().to_string()).unwrap_or_default();
                parsed.directive = Some((name, build_operands(inner, line_no)?));
                break;
            }
            Rule::instruction_line => {
                let mut inner = pair.into_inner();
                let name = inner.next().map(|p| p.as_str().to_string()).unwrap_or_default();
                parsed.instruction = Some((name, build_operands(inner, line_no)?));
                break;
            }
            _ => {}
        }
    }

    Ok(parsed)
}

fn build_operands(
    pairs: pest::iterators::Pairs<Rule>,
    line_no: usize,
) -> Result<Vec<Operand>, InterpretError> {
    pairs
        .filter(|p| p.as_rule() == Rule::operand)
        .map(|p| build_operand(p, line_no))
        .collect()
}

fn build_operand(pair: Pair<Rule>, line_no: usize) -> Result<Operand, InterpretError> {
    let bad_token = |text: &str| InterpretError::Syntax {
        line: line_no,
        reason: format!("bad token '{}'", text),
    };

    let inner = pair
        .into_inner()
        .next()
        .ok_or_else(|| bad_token("<empty>"))?;
    let text = inner.as_str();

    match inner.as_rule() {
        Rule::gpr_ref => {
            let index = text[1..].parse::<u32>().map_err(|_| bad_token(text))?;
            Ok(Operand::Gpr(index))
        }
        Rule::fpr_ref => {
            let index = text[1..].parse::<u32>().map_err(|_| bad_token(text))?;
            Ok(Operand::Fpr(index))
        }
        Rule::cr_ref => {
            let index = text[2..].parse::<u32>().map_err(|_| bad_token(text))?;
            Ok(Operand::Cr(index))
        }
        Rule::number => Ok(Operand::Number(
            parse_int(text).ok_or_else(|| bad_token(text))?,
        )),
        Rule::ident => Ok(Operand::Ident(text.to_string())),
        Rule::string => Ok(Operand::Str(
            unescape_string(text).ok_or_else(|| bad_token(text))?,
        )),
        Rule::punct => Ok(Operand::Punct(text.chars().next().unwrap_or(','))),
        _ => Err(bad_token(text)),
    }
}

// Integer lexing: 0x/0X hex, 0b/0B binary, a leading 0 octal, else decimal.
// A leading '-' negates. The grammar has already bounded the digit set.
fn parse_int(text: &str) -> Option<i64> {
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let (base, digits) = if let Some(d) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        (16, d)
    } else if let Some(d) = body.strip_prefix("0b").or_else(|| body.strip_prefix("0B")) {
        (2, d)
    } else if body.len() > 1 && body.starts_with('0') {
        (8, &body[1..])
    } else {
        (10, body)
    };

    let value = i64::from_str_radix(digits, base).ok()?;
    Some(if negative { -value } else { value })
}

// Strip the quotes and resolve the escape sequences the grammar admits.
fn unescape_string(text: &str) -> Option<String> {
    let mut chars = text.chars();
    let quote = chars.next()?;
    let mut out = String::with_capacity(text.len());

    while let Some(c) = chars.next() {
        if c == quote {
            break;
        }

        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.next()? {
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'r' => out.push('\r'),
            'n' => out.push('\n'),
            't' => out.push('\t'),
            _ => return None,
        }
    }

    Some(out)
}

// ------------- unit tests -------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_label_line() {
        let line = parse_line("start:", 1).unwrap();
        assert_eq!(line.label, Some("start".to_string()));
        assert_eq!(line.instruction, None);
    }

    #[test]
    fn test_parse_label_ignores_rest_of_line() {
        let line = parse_line("start: whatever $ follows", 1).unwrap();
        assert_eq!(line.label, Some("start".to_string()));
    }

    #[test]
    fn test_parse_instruction_with_registers() {
        let line = parse_line("add r3, r4, r5", 1).unwrap();
        let (name, ops) = line.instruction.unwrap();
        assert_eq!(name, "add");
        assert_eq!(
            ops,
            vec![
                Operand::Gpr(3),
                Operand::Punct(','),
                Operand::Gpr(4),
                Operand::Punct(','),
                Operand::Gpr(5),
            ]
        );
    }

    #[test]
    fn test_parse_record_form_mnemonic() {
        let line = parse_line("add. r3,r4,r5", 1).unwrap();
        assert_eq!(line.instruction.unwrap().0, "add.");
    }

    #[test]
    fn test_parse_displacement_form() {
        let line = parse_line("lwz r3, 8(r1)", 1).unwrap();
        let (_, ops) = line.instruction.unwrap();
        assert_eq!(
            ops,
            vec![
                Operand::Gpr(3),
                Operand::Punct(','),
                Operand::Number(8),
                Operand::Punct('('),
                Operand::Gpr(1),
                Operand::Punct(')'),
            ]
        );
    }

    #[test]
    fn test_parse_number_bases() {
        let cases = [
            ("li r3, 42", 42),
            ("li r3, 0x2A", 0x2A),
            ("li r3, 0b101010", 42),
            ("li r3, 052", 0o52),
            ("li r3, -42", -42),
            ("li r3, 0", 0),
        ];

        for (text, expected) in cases {
            let (_, ops) = parse_line(text, 1).unwrap().instruction.unwrap();
            assert_eq!(ops[2], Operand::Number(expected), "input {:?}", text);
        }
    }

    #[test]
    fn test_parse_bad_octal_digit_rejected() {
        assert!(parse_line("li r3, 089", 1).is_err());
    }

    #[test]
    fn test_parse_condition_register() {
        let (_, ops) = parse_line("cmpw cr1, r3, r4", 1).unwrap().instruction.unwrap();
        assert_eq!(ops[0], Operand::Cr(1));
    }

    #[test]
    fn test_parse_branch_target_is_ident() {
        let (_, ops) = parse_line("b r5loop", 1).unwrap().instruction.unwrap();
        assert_eq!(ops, vec![Operand::Ident("r5loop".to_string())]);
    }

    #[test]
    fn test_parse_directive_with_string() {
        let (name, ops) = parse_line(".echo \"r3 = {r3}\\n\"", 1).unwrap().directive.unwrap();
        assert_eq!(name, ".echo");
        assert_eq!(ops, vec![Operand::Str("r3 = {r3}\n".to_string())]);
    }

    #[test]
    fn test_parse_single_quoted_string() {
        let (_, ops) = parse_line(".echo 'it\\'s'", 1).unwrap().directive.unwrap();
        assert_eq!(ops, vec![Operand::Str("it's".to_string())]);
    }

    #[test]
    fn test_parse_bad_escape_rejected() {
        assert!(parse_line(".echo \"\\q\"", 1).is_err());
    }

    #[test]
    fn test_parse_unterminated_string_rejected() {
        assert!(parse_line(".echo \"open", 1).is_err());
    }

    #[test]
    fn test_parse_empty_line() {
        assert!(parse_line("", 1).unwrap().is_empty());
        assert!(parse_line("   ", 1).unwrap().is_empty());
    }

    #[test]
    fn test_parse_lone_colon_rejected() {
        assert!(parse_line(":", 1).is_err());
    }

    #[test]
    fn test_parse_register_index_not_split() {
        // r99 is still a register token; range checks happen later.
        let (_, ops) = parse_line("mtctr r99", 1).unwrap().instruction.unwrap();
        assert_eq!(ops, vec![Operand::Gpr(99)]);
    }
}
