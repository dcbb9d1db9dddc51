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

/// A replayable source stream with byte-accurate seek positions. Branch
/// targets and the link register hold these positions, so they are kept to
/// 32 bits.
pub struct Source {
    text: String,
    cursor: usize,
}

impl Source {
    pub fn new(text: impl Into<String>) -> Self {
        Source {
            text: text.into(),
            cursor: 0,
        }
    }

    /// The next line, without its terminator. `None` at end of input.
    pub fn read_line(&mut self) -> Option<String> {
        if self.cursor >= self.text.len() {
            return None;
        }

        let rest = &self.text[self.cursor..];
        let (line, advance) = match rest.find('\n') {
            Some(nl) => (&rest[..nl], nl + 1),
            None => (rest, rest.len()),
        };

        self.cursor += advance;
        Some(line.strip_suffix('\r').unwrap_or(line).to_string())
    }

    pub fn tell(&self) -> u32 {
        self.cursor as u32
    }

    pub fn seek(&mut self, position: u32) {
        self.cursor = (position as usize).min(self.text.len());
    }
}
