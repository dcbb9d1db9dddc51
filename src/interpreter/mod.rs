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

pub mod operations;
pub mod registry;
pub mod signature;
pub mod source;

use std::collections::HashMap;
use std::io::Write;

use crate::errors::InterpretError;
use crate::parser;
use crate::processor::Processor;
use registry::Registry;
use signature::MatchedArgs;
use source::Source;
use tracing::{debug, trace};

/// What the driver should do after one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Stop,
}

/// How forward branch targets get resolved. A seekable source is indexed
/// up front; a stream that cannot be rewound falls back to scanning ahead,
/// executing only label declarations until the pending label appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelMode {
    Preindex,
    ScanAhead,
}

pub struct Interpreter {
    pub proc: Processor,
    source: Source,
    mode: LabelMode,
    labels: HashMap<String, u32>,
    line_no: usize,
    label: Option<String>,
    branch_ahead: bool,
    out: Box<dyn Write>,
}

impl Interpreter {
    pub fn new(proc: Processor, source: Source, mode: LabelMode, out: Box<dyn Write>) -> Self {
        let mut interp = Interpreter {
            proc,
            source,
            mode,
            labels: HashMap::new(),
            line_no: 0,
            label: None,
            branch_ahead: false,
            out,
        };

        if interp.mode == LabelMode::Preindex {
            interp.index_labels();
        }

        interp
    }

    /// Interpret the next line. `Stop` means clean end of input or `.exit`.
    pub fn interpret(&mut self, registry: &Registry) -> Result<Step, InterpretError> {
        self.line_no += 1;

        let Some(raw) = self.source.read_line() else {
            if self.branch_ahead {
                let name = self.label.clone().unwrap_or_default();
                return Err(InterpretError::MissingBranchTarget(name));
            }

            return Ok(Step::Stop);
        };

        let line = strip_comment(&raw);

        if line.trim().is_empty() {
            return Ok(Step::Continue);
        }

        let parsed = match parser::parse_line(line, self.line_no) {
            Ok(parsed) => parsed,
            // While a forward branch is being resolved only label
            // declarations matter; anything else on the way is skipped,
            // parseable or not.
            Err(_) if self.branch_ahead => return Ok(Step::Continue),
            Err(err) => return Err(err),
        };

        if let Some(name) = parsed.label {
            let position = self.source.tell();
            debug!(label = %name, position, "label declared");
            self.labels.insert(name.clone(), position);

            if self.branch_ahead && self.label.as_deref() == Some(name.as_str()) {
                self.branch_ahead = false;
            }

            return Ok(Step::Continue);
        }

        if self.branch_ahead {
            return Ok(Step::Continue);
        }

        let Some((name, operands)) = parsed.directive.or(parsed.instruction) else {
            return Ok(Step::Continue);
        };

        if let Some(directive) = registry.fetch_directive(&name) {
            trace!(line = self.line_no, op = %name, "directive");
            return (directive.body)(self, &operands);
        }

        if let Some((instruction, bits)) = registry.fetch_instruction(&name) {
            let MatchedArgs { values, label } =
                signature::match_signature(&instruction.sig, &operands, self.line_no)?;

            if let Some(label) = label {
                self.label = Some(label);
            }

            trace!(line = self.line_no, op = %name, args = ?values, bits, "execute");
            (instruction.body)(self, &values, bits)?;
            return Ok(Step::Continue);
        }

        Err(self.semantic("unknown operation"))
    }

    /// Transfer control to the label most recently named by an `addr`
    /// operand. Unknown labels either start a scan-ahead resolution or, in
    /// pre-indexed mode, provably do not exist.
    pub fn branch(&mut self) -> Result<(), InterpretError> {
        let Some(label) = self.label.clone() else {
            return Ok(());
        };

        if let Some(&position) = self.labels.get(&label) {
            debug!(label = %label, position, "branch");
            self.source.seek(position);
            return Ok(());
        }

        if self.mode == LabelMode::ScanAhead {
            debug!(label = %label, "branch ahead, scanning");
            self.branch_ahead = true;
            return Ok(());
        }

        Err(InterpretError::MissingBranchTarget(label))
    }

    pub fn seek(&mut self, position: u32) {
        self.source.seek(position);
    }

    pub fn tell(&self) -> u32 {
        self.source.tell()
    }

    pub fn line_no(&self) -> usize {
        self.line_no
    }

    pub fn semantic(&self, reason: impl Into<String>) -> InterpretError {
        InterpretError::Semantic {
            line: self.line_no,
            reason: reason.into(),
        }
    }

    pub(crate) fn write_echo(&mut self, text: &str) -> Result<(), InterpretError> {
        writeln!(self.out, "{}", text).map_err(|e| InterpretError::Output(e.to_string()))
    }

    // First pass over a seekable source: record every label declaration so
    // forward branches seek directly. Lines that do not tokenize are
    // ignored here; they only matter if control ever reaches them.
    fn index_labels(&mut self) {
        self.source.seek(0);

        while let Some(raw) = self.source.read_line() {
            let line = strip_comment(&raw);

            if let Ok(parsed) = parser::parse_line(line, 0) {
                if let Some(name) = parsed.label {
                    self.labels.insert(name, self.source.tell());
                }
            }
        }

        self.source.seek(0);
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find(';') {
        Some(at) => &line[..at],
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_mode(text: &str, mode: LabelMode) -> (Interpreter, Result<(), InterpretError>) {
        let registry = Registry::new();
        let proc = Processor::new(0x1000);
        let mut interp = Interpreter::new(proc, Source::new(text), mode, Box::new(std::io::sink()));

        loop {
            match interp.interpret(&registry) {
                Ok(Step::Continue) => {}
                Ok(Step::Stop) => return (interp, Ok(())),
                Err(err) => return (interp, Err(err)),
            }
        }
    }

    #[test]
    fn test_scan_ahead_skips_to_forward_label() {
        let (interp, result) = run_mode(
            "b end\nli r3, 1\nend:\nli r4, 2\n.exit\n",
            LabelMode::ScanAhead,
        );

        assert_eq!(result, Ok(()));
        assert_eq!(interp.proc.gpr(3).u32(), 0);
        assert_eq!(interp.proc.gpr(4).u32(), 2);
    }

    #[test]
    fn test_scan_ahead_skips_unparseable_lines() {
        let (interp, result) = run_mode(
            "b end\n??? not a line\nend:\nli r4, 2\n",
            LabelMode::ScanAhead,
        );

        assert_eq!(result, Ok(()));
        assert_eq!(interp.proc.gpr(4).u32(), 2);
    }

    #[test]
    fn test_scan_ahead_missing_target_reports_at_eof() {
        let (_, result) = run_mode("b nowhere\nli r3, 1\n", LabelMode::ScanAhead);
        assert_eq!(
            result,
            Err(InterpretError::MissingBranchTarget("nowhere".to_string()))
        );
    }

    #[test]
    fn test_preindex_missing_target_reports_at_branch() {
        let (interp, result) = run_mode("b nowhere\nli r3, 1\n", LabelMode::Preindex);
        assert_eq!(
            result,
            Err(InterpretError::MissingBranchTarget("nowhere".to_string()))
        );
        assert_eq!(interp.proc.gpr(3).u32(), 0);
    }

    #[test]
    fn test_preindex_forward_branch_seeks_directly() {
        let (interp, result) = run_mode(
            "b end\nli r3, 1\nend:\nli r4, 2\n",
            LabelMode::Preindex,
        );

        assert_eq!(result, Ok(()));
        assert_eq!(interp.proc.gpr(3).u32(), 0);
        assert_eq!(interp.proc.gpr(4).u32(), 2);
    }

    #[test]
    fn test_duplicate_labels_last_definition_wins() {
        let (interp, result) = run_mode(
            "b skip\nskip:\nli r3, 1\nb done\nskip:\nli r3, 2\ndone:\n.exit\n",
            LabelMode::Preindex,
        );

        // Pre-indexing records the later declaration, so the first branch
        // lands on the second skip and r3 ends up untouched by it.
        assert_eq!(result, Ok(()));
        assert_eq!(interp.proc.gpr(3).u32(), 2);
    }

    #[test]
    fn test_whitespace_and_comment_lines_continue() {
        let (interp, result) = run_mode("   \n; pure comment\nli r5, 9 ; trailing\n", LabelMode::Preindex);
        assert_eq!(result, Ok(()));
        assert_eq!(interp.proc.gpr(5).u32(), 9);
    }

    #[test]
    fn test_unknown_operation_stops_with_error() {
        let (_, result) = run_mode("li r3, 1\nfrobnicate r3\n", LabelMode::Preindex);
        assert_eq!(
            result,
            Err(InterpretError::Semantic {
                line: 2,
                reason: "unknown operation".to_string()
            })
        );
    }
}
