// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The contiguous attenuator field (bits 3-7) shared by both optical receivers,
//! and the termination switch (bit 0) shared by the AAVS optical and INAF RF
//! receivers.

use crate::constants::RF_ENABLE_BIT;

pub(super) const ATTENUATION_BITS: u8 = 0b1111_1000;
pub(super) const TERMINATION_BITS: u8 = RF_ENABLE_BIT;
const ATTENUATION_SHIFT: u32 = 3;

/// `db` must already be clamped.
pub(super) fn attenuation_encode(code: u8, db: u8) -> u8 {
    (code & !ATTENUATION_BITS) | ((db << ATTENUATION_SHIFT) & ATTENUATION_BITS)
}

pub(super) fn attenuation_decode(code: u8) -> u8 {
    (code & ATTENUATION_BITS) >> ATTENUATION_SHIFT
}

pub(super) fn rf_on(code: u8) -> u8 {
    code | RF_ENABLE_BIT
}

pub(super) fn rf_off(code: u8) -> u8 {
    code & !RF_ENABLE_BIT
}

// The switch is active-low: a clear bit means the input is terminated.
pub(super) fn is_terminated(code: u8) -> bool {
    code & RF_ENABLE_BIT == 0
}
