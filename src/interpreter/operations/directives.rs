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

// Directives: `.exit` stops the driver, `.echo` prints a string through the
// `{key[:style]}` substitution mini-language against the live registers.

use crate::ast::Operand;
use crate::errors::InterpretError;
use crate::interpreter::registry::Directive;
use crate::interpreter::{Interpreter, Step};
use crate::processor::registers::{Fpr, Gpr};

pub(super) fn entries() -> Vec<Directive> {
    vec![
        Directive::new(".exit", |_interp, _ops| Ok(Step::Stop)),
        Directive::new(".echo", |interp, ops| {
            let Some(Operand::Str(text)) = ops.first() else {
                return Err(interp.semantic("expected string."));
            };

            let rendered = render(interp, text)?;
            interp.write_echo(&rendered)?;
            Ok(Step::Continue)
        }),
    ]
}

// Substitute every `{key[:style]}` in the string. `{{` emits a literal
// brace; a lone closing brace passes through unchanged.
fn render(interp: &Interpreter, text: &str) -> Result<String, InterpretError> {
    let mut out = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '{' {
            out.push(c);
            continue;
        }

        match chars.peek() {
            None => return Err(interp.semantic("bad print sequence.")),
            Some('{') => {
                chars.next();
                out.push('{');
                continue;
            }
            Some(_) => {}
        }

        let mut key = String::new();
        let mut style = String::new();
        let mut seen_colon = false;
        let mut closed = false;

        for c in chars.by_ref() {
            if c == '}' {
                closed = true;
                break;
            }

            if c == ':' && !seen_colon {
                seen_colon = true;
                continue;
            }

            if seen_colon {
                style.push(c);
            } else {
                key.push(c);
            }
        }

        if !closed || key.is_empty() || (seen_colon && style.is_empty()) {
            return Err(interp.semantic("bad print sequence."));
        }

        out.push_str(&substitute(interp, &key, &style)?);
    }

    Ok(out)
}

fn substitute(interp: &Interpreter, key: &str, style: &str) -> Result<String, InterpretError> {
    let formatted = match key.chars().next() {
        Some('r') => parse_index(key).and_then(|n| format_gpr(interp.proc.gpr(n), style)),
        Some('f') => parse_index(key).and_then(|n| format_fpr(interp.proc.fpr(n), style)),
        _ => None,
    };

    formatted.ok_or_else(|| interp.semantic("bad print sequence."))
}

// One or two decimal digits after the register letter.
fn parse_index(key: &str) -> Option<usize> {
    let digits = &key[1..];

    if digits.is_empty() || digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let index = digits.parse::<usize>().ok()?;
    (index <= 31).then_some(index)
}

// Style prefix shared by both register kinds: align/sign/base/fill flags,
// then a decimal width.
struct Style {
    plus: bool,
    alt: bool,
    zero: bool,
    width: usize,
}

fn take_style(chars: &mut std::iter::Peekable<std::str::Chars>) -> Style {
    let mut style = Style {
        plus: false,
        alt: false,
        zero: false,
        width: 0,
    };

    while let Some(&c) = chars.peek() {
        match c {
            '-' => {} // right alignment is already the default
            '+' => style.plus = true,
            '#' => style.alt = true,
            '0' => style.zero = true,
            _ => break,
        }

        chars.next();
    }

    while let Some(&c) = chars.peek() {
        if !c.is_ascii_digit() {
            break;
        }

        style.width = style.width * 10 + (c as usize - '0' as usize);
        chars.next();
    }

    style
}

fn format_gpr(reg: Gpr, style: &str) -> Option<String> {
    if style.is_empty() {
        return Some(reg.s32().to_string());
    }

    let mut chars = style.chars().peekable();
    let opts = take_style(&mut chars);
    let terminal = chars.next()?;

    if chars.next().is_some() {
        return None;
    }

    let body = match terminal {
        'd' | 'i' => signed_body(reg.s32(), opts.plus),
        'u' => reg.u32().to_string(),
        'x' => hex_body(u64::from(reg.u32()), false, opts.alt),
        'X' => hex_body(u64::from(reg.u32()), true, opts.alt),
        _ => return None,
    };

    Some(pad(body, opts.width, opts.zero))
}

fn format_fpr(reg: Fpr, style: &str) -> Option<String> {
    if style.is_empty() {
        return Some(format!("{}", reg.f64()));
    }

    let mut chars = style.chars().peekable();
    let opts = take_style(&mut chars);

    let mut precision = None;
    if chars.peek() == Some(&'.') {
        chars.next();
        let mut p = 0usize;

        while let Some(&c) = chars.peek() {
            if !c.is_ascii_digit() {
                break;
            }

            p = p * 10 + (c as usize - '0' as usize);
            chars.next();
        }

        precision = Some(p);
    }

    let terminal = chars.next()?;

    if chars.next().is_some() {
        return None;
    }

    let body = match terminal {
        'f' => float_body(fmt_f64(reg.f64(), precision), opts.plus),
        'h' => float_body(fmt_f32(reg.ps0(), precision), opts.plus),
        'l' => float_body(fmt_f32(reg.ps1(), precision), opts.plus),
        'u' => reg.bits().to_string(),
        'x' => hex_body(reg.bits(), false, opts.alt),
        'X' => hex_body(reg.bits(), true, opts.alt),
        _ => return None,
    };

    Some(pad(body, opts.width, opts.zero))
}

fn signed_body(value: i32, plus: bool) -> String {
    if plus && value >= 0 {
        format!("+{}", value)
    } else {
        value.to_string()
    }
}

fn float_body(body: String, plus: bool) -> String {
    if plus && !body.starts_with('-') {
        format!("+{}", body)
    } else {
        body
    }
}

fn hex_body(value: u64, upper: bool, alt: bool) -> String {
    let digits = if upper {
        format!("{:X}", value)
    } else {
        format!("{:x}", value)
    };

    match (alt, upper) {
        (false, _) => digits,
        (true, false) => format!("0x{}", digits),
        (true, true) => format!("0X{}", digits),
    }
}

fn fmt_f64(value: f64, precision: Option<usize>) -> String {
    match precision {
        Some(p) => format!("{:.*}", p, value),
        None => format!("{}", value),
    }
}

fn fmt_f32(value: f32, precision: Option<usize>) -> String {
    match precision {
        Some(p) => format!("{:.*}", p, value),
        None => format!("{}", value),
    }
}

fn pad(body: String, width: usize, zero: bool) -> String {
    if body.len() >= width {
        return body;
    }

    let fill = if zero { '0' } else { ' ' };
    let mut out: String = std::iter::repeat(fill).take(width - body.len()).collect();
    out.push_str(&body);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::source::Source;
    use crate::interpreter::LabelMode;
    use crate::processor::Processor;
    use crate::processor::registers::Fpr;

    fn interp() -> Interpreter {
        Interpreter::new(
            Processor::new(0x100),
            Source::new(""),
            LabelMode::ScanAhead,
            Box::new(std::io::sink()),
        )
    }

    #[test]
    fn test_echo_plain_and_default_int() {
        let mut i = interp();
        i.proc.set_gpr(3, 42u32);
        assert_eq!(render(&i, "r3 = {r3}!").unwrap(), "r3 = 42!");

        i.proc.set_gpr(4, -1i32);
        assert_eq!(render(&i, "{r4}").unwrap(), "-1");
    }

    #[test]
    fn test_echo_literal_braces() {
        let i = interp();
        assert_eq!(render(&i, "{{r3}").unwrap(), "{r3}");
        assert_eq!(render(&i, "a } b").unwrap(), "a } b");
    }

    #[test]
    fn test_echo_int_styles() {
        let mut i = interp();
        i.proc.set_gpr(3, 255u32);

        assert_eq!(render(&i, "{r3:x}").unwrap(), "ff");
        assert_eq!(render(&i, "{r3:X}").unwrap(), "FF");
        assert_eq!(render(&i, "{r3:#x}").unwrap(), "0xff");
        assert_eq!(render(&i, "{r3:#X}").unwrap(), "0XFF");
        assert_eq!(render(&i, "{r3:8x}").unwrap(), "      ff");
        assert_eq!(render(&i, "{r3:08x}").unwrap(), "000000ff");
        assert_eq!(render(&i, "{r3:+d}").unwrap(), "+255");
        assert_eq!(render(&i, "{r3:u}").unwrap(), "255");

        i.proc.set_gpr(5, 0xFFFF_FFFFu32);
        assert_eq!(render(&i, "{r5:u}").unwrap(), "4294967295");
        assert_eq!(render(&i, "{r5:d}").unwrap(), "-1");
    }

    #[test]
    fn test_echo_zero_fill_pads_before_sign() {
        let mut i = interp();
        i.proc.set_gpr(3, -42i32);
        assert_eq!(render(&i, "{r3:05d}").unwrap(), "00-42");
    }

    #[test]
    fn test_echo_float_styles() {
        let mut i = interp();
        i.proc.set_fpr(1, Fpr::from_f64(2.5));

        assert_eq!(render(&i, "{f1}").unwrap(), "2.5");
        assert_eq!(render(&i, "{f1:f}").unwrap(), "2.5");
        assert_eq!(render(&i, "{f1:.2f}").unwrap(), "2.50");
        assert_eq!(render(&i, "{f1:8.1f}").unwrap(), "     2.5");
        assert_eq!(render(&i, "{f1:+f}").unwrap(), "+2.5");
        assert_eq!(render(&i, "{f1:u}").unwrap(), 2.5f64.to_bits().to_string());
        assert_eq!(render(&i, "{f1:X}").unwrap(), format!("{:X}", 2.5f64.to_bits()));
    }

    #[test]
    fn test_echo_paired_single_halves() {
        let mut i = interp();
        i.proc.set_fpr(2, Fpr::from_pair(1.5, -2.0));

        assert_eq!(render(&i, "{f2:h}").unwrap(), "1.5");
        assert_eq!(render(&i, "{f2:l}").unwrap(), "-2");
        assert_eq!(render(&i, "{f2:.1l}").unwrap(), "-2.0");
    }

    #[test]
    fn test_echo_bad_sequences() {
        let mut i = interp();
        i.proc.set_gpr(3, 1u32);

        for text in [
            "{", "{}", "{r3", "{r3:}", "{r3:q}", "{r3:5}", "{r99}", "{r123}", "{z3}", "{f99}",
        ] {
            let err = render(&i, text).unwrap_err();
            let InterpretError::Semantic { reason, .. } = err else {
                panic!("expected semantic error for {:?}", text);
            };
            assert_eq!(reason, "bad print sequence.", "input {:?}", text);
        }
    }
}
