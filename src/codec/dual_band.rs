// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Filter selection on the legacy dual-band receiver. The AAVS optical receiver
//! keeps the same filter bits.
//!
//! Bits (LSB first): spare, high-pass select, low-pass select, then bits owned
//! by other capabilities.

pub(super) const FILTER_BITS: u8 = 0b0000_0110;
const HIGHPASS_BIT: u8 = 0b0000_0010;
const LOWPASS_BIT: u8 = 0b0000_0100;

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
