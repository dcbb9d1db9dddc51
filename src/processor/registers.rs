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

// Condition-register field flags. One 4-bit nibble per field.
pub const CR_LT: u8 = 0b0000_0001;
pub const CR_GT: u8 = 0b0000_0010;
pub const CR_EQ: u8 = 0b0000_0100;
pub const CR_SO: u8 = 0b0000_1000;

// XER status flags. Only CA is maintained by the arithmetic here.
pub const XER_SO: u8 = 0b0000_0001;
pub const XER_OV: u8 = 0b0000_0010;
pub const XER_CA: u8 = 0b0000_0100;

/// A general-purpose register cell. Writes replace the full 32 bits; reads
/// expose sign- and zero-extended narrowings of the stored pattern.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Gpr(u32);

impl Gpr {
    pub fn s8(self) -> i8 {
        (self.0 & 0xFF) as u8 as i8
    }

    pub fn s16(self) -> i16 {
        (self.0 & 0xFFFF) as u16 as i16
    }

    pub fn s32(self) -> i32 {
        self.0 as i32
    }

    pub fn u8(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    pub fn u16(self) -> u16 {
        (self.0 & 0xFFFF) as u16
    }

    pub fn u32(self) -> u32 {
        self.0
    }
}

impl From<u32> for Gpr {
    fn from(value: u32) -> Self {
        Gpr(value)
    }
}

impl From<i32> for Gpr {
    fn from(value: i32) -> Self {
        Gpr(value as u32)
    }
}

/// A floating-point register cell: 64 raw bits with three views. The views
/// share storage via explicit bit reinterpretation. A paired-single write
/// defines ps0 as the low 32-bit half of the raw view and ps1 as the high
/// half; the double view then reads whatever double those bits spell.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Fpr(u64);

impl Fpr {
    pub fn from_bits(bits: u64) -> Self {
        Fpr(bits)
    }

    pub fn from_f64(value: f64) -> Self {
        Fpr(value.to_bits())
    }

    /// A single stores as its widening to double.
    pub fn from_f32(value: f32) -> Self {
        Fpr((value as f64).to_bits())
    }

    pub fn from_pair(ps0: f32, ps1: f32) -> Self {
        Fpr((u64::from(ps1.to_bits()) << 32) | u64::from(ps0.to_bits()))
    }

    pub fn bits(self) -> u64 {
        self.0
    }

    pub fn f64(self) -> f64 {
        f64::from_bits(self.0)
    }

    pub fn f32(self) -> f32 {
        self.f64() as f32
    }

    pub fn ps0(self) -> f32 {
        f32::from_bits(self.0 as u32)
    }

    pub fn ps1(self) -> f32 {
        f32::from_bits((self.0 >> 32) as u32)
    }
}

/// Conversion type for quantized paired-single transfers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum QuantType {
    #[default]
    F32 = 0,
    U8 = 4,
    U16 = 5,
    S8 = 6,
    S16 = 7,
}

/// Graphics/quantization register. The paired-single opcodes that would
/// consume these are reserved; the state still exists and zero-initialises.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Gqr {
    pub store_type: QuantType,
    pub store_scale: i32,
    pub load_type: QuantType,
    pub load_scale: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpr_narrowing_views() {
        let r = Gpr::from(0xDEAD_BEEFu32);
        assert_eq!(r.u32(), 0xDEAD_BEEF);
        assert_eq!(r.u16(), 0xBEEF);
        assert_eq!(r.u8(), 0xEF);
        assert_eq!(r.s32(), -559_038_737);
        assert_eq!(r.s16(), -16657);
        assert_eq!(r.s8(), -17);
    }

    #[test]
    fn test_gpr_signed_write_same_bits() {
        assert_eq!(Gpr::from(-1i32), Gpr::from(0xFFFF_FFFFu32));
    }

    #[test]
    fn test_fpr_double_round_trip() {
        let f = Fpr::from_f64(-2.5);
        assert_eq!(f.f64(), -2.5);
        assert_eq!(f.bits(), (-2.5f64).to_bits());
    }

    #[test]
    fn test_fpr_single_widens() {
        let f = Fpr::from_f32(1.5);
        assert_eq!(f.f64(), 1.5);
        assert_eq!(f.f32(), 1.5);
    }

    #[test]
    fn test_fpr_pair_round_trip() {
        let f = Fpr::from_pair(3.0, -4.0);
        assert_eq!(f.ps0(), 3.0);
        assert_eq!(f.ps1(), -4.0);
    }

    #[test]
    fn test_fpr_pair_occupies_raw_halves() {
        let f = Fpr::from_pair(f32::from_bits(0x1122_3344), f32::from_bits(0x5566_7788));
        assert_eq!(f.bits(), 0x5566_7788_1122_3344);
    }

    #[test]
    fn test_gqr_zero_initialises() {
        let q = Gqr::default();
        assert_eq!(q.load_type, QuantType::F32);
        assert_eq!(q.store_scale, 0);
    }
}
