// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with assembling PreADU boards.

use thiserror::Error;

use crate::constants::NUM_RX;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BoardError {
    #[error("SPI permutation maps logical receiver {logical} to slot {slot}, but there are only {NUM_RX} slots")]
    SlotOutOfRange { logical: usize, slot: usize },

    #[error("SPI permutation maps both logical receivers {first} and {second} to slot {slot}")]
    DuplicateSlot {
        slot: usize,
        first: usize,
        second: usize,
    },

    #[error("Receiver index {0} is invalid; valid indices are 0 to {max}", max = NUM_RX - 1)]
    InvalidRxIndex(usize),

    #[error("Signal map refers to receiver {0}, but valid indices are 0 to {max}", max = NUM_RX - 1)]
    RoutingIndexOutOfRange(usize),

    #[error("Signal map has more than one record for receiver {0}")]
    DuplicateRoutingIndex(usize),
}
