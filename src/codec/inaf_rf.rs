// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The INAF prototype RF receiver.
//!
//! | bit | meaning            |
//! |-----|--------------------|
//! | 0   | RF enable          |
//! | 1   | 2 dB attenuator    |
//! | 2   | high-pass select   |
//! | 3   | 4 dB attenuator    |
//! | 4   | low-pass select    |
//! | 5   | 8 dB attenuator    |
//! | 6   | 1 dB attenuator    |
//! | 7   | 16 dB attenuator   |

pub(super) const ATTENUATION_BITS: u8 = 0b1110_1010;
pub(super) const FILTER_BITS: u8 = 0b0001_0100;
const HIGHPASS_BIT: u8 = 0b0000_0100;
const LOWPASS_BIT: u8 = 0b0001_0000;

/// (attenuation value bit, register bit), i.e. the 1 dB step lives in
/// register bit 6.
const ATTENUATION_SCATTER: [(u32, u32); 5] = [(0, 6), (1, 1), (2, 3), (3, 5), (4, 7)];

/// `db` must already be clamped.
pub(super) fn attenuation_encode(code: u8, db: u8) -> u8 {
    ATTENUATION_SCATTER
        .iter()
        .filter(|&&(value_bit, _)| db & (1u8 << value_bit) != 0)
        .fold(code & !ATTENUATION_BITS, |acc, &(_, reg_bit)| {
            acc | (1u8 << reg_bit)
        })
}

pub(super) fn attenuation_decode(code: u8) -> u8 {
    ATTENUATION_SCATTER
        .iter()
        .filter(|&&(_, reg_bit)| code & (1u8 << reg_bit) != 0)
        .fold(0u8, |acc, &(value_bit, _)| acc | (1u8 << value_bit))
}

pub(super) fn set_highpass(code: u8) -> u8 {
    (code & !FILTER_BITS) | HIGHPASS_BIT
}

pub(super) fn set_lowpass(code: u8) -> u8 {
    (code & !FILTER_BITS) | LOWPASS_BIT
}

pub(super) fn is_highpass(code: u8) -> bool {
    code & HIGHPASS_BIT != 0
}

pub(super) fn is_lowpass(code: u8) -> bool {
    code & LOWPASS_BIT != 0
}
