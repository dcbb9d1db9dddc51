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

/// Rotate left by `bits` places. Amounts are taken modulo 32.
pub fn rot32(value: u32, bits: u32) -> u32 {
    value.rotate_left(bits)
}

/// The wrap-around bit mask covering positions `mb` through `me` inclusive,
/// bit 0 being the most significant. When `me < mb` the span wraps through
/// bit 31 back to bit 0.
pub fn mask(mb: u32, me: u32) -> u32 {
    let m = (0xFFFF_FFFFu32 >> (mb & 31)) ^ (0x7FFF_FFFFu32 >> (me & 31));

    if me < mb { !m } else { m }
}

/// True when the unsigned sum `lhs + rhs` overflows 32 bits.
pub fn carry(lhs: u32, rhs: u32) -> bool {
    rhs > !lhs
}
