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

pub mod ast;
pub mod errors;
pub mod interpreter;
pub mod parser;
pub mod processor;

use std::io::Write;

use errors::InterpretError;
use interpreter::registry::Registry;
use interpreter::source::Source;
use interpreter::{Interpreter, LabelMode, Step};
use processor::{DEFAULT_MEMORY_SIZE, Processor};

/// Interpret a whole source text against a fresh processor. Echo output
/// goes to `out`; the first error stops interpretation.
pub fn run(
    source_text: &str,
    memory_image: Option<&[u8]>,
    out: Box<dyn Write>,
) -> Result<(), InterpretError> {
    run_sized(source_text, memory_image, DEFAULT_MEMORY_SIZE, out)
}

/// As `run`, with an explicit mapped-memory size.
pub fn run_sized(
    source_text: &str,
    memory_image: Option<&[u8]>,
    memory_size: usize,
    out: Box<dyn Write>,
) -> Result<(), InterpretError> {
    let registry = Registry::new();
    let mut proc = Processor::new(memory_size);

    if let Some(image) = memory_image {
        proc.load_image(image);
    }

    // Whole-file input is always seekable, so labels are indexed up front.
    let mut interp = Interpreter::new(proc, Source::new(source_text), LabelMode::Preindex, out);

    while interp.interpret(&registry)? == Step::Continue {}

    Ok(())
}
