// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

Counts describe a single TPM: two PreADU sub-boards (TOP and BOTTOM), each
with a 16-receiver SPI chain.
 */

use static_assertions::const_assert_eq;

/// The number of receivers on one TPM's pair of PreADU sub-boards.
pub const NUM_RX: usize = 32;

/// The number of receivers in a single sub-board's SPI chain.
pub const RX_PER_SUB_BOARD: usize = 16;

/// The number of addressable sub-boards on one TPM.
pub const NUM_SUB_BOARDS: usize = 2;

const_assert_eq!(NUM_RX, RX_PER_SUB_BOARD * NUM_SUB_BOARDS);

/// The largest attenuation any digital step attenuator can apply [dB].
/// Requests above this saturate.
pub const MAX_ATTENUATION_DB: u8 = 31;

/// Bit 0 on receivers with a termination switch. When set, RF is passed
/// through; when clear, the input is terminated into 50 Ω.
pub const RF_ENABLE_BIT: u8 = 0b0000_0001;
