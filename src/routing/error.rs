// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Errors associated with reading in a signal map.
#[derive(Error, Debug)]
pub enum SignalMapError {
    #[error("Signal map line {line_num}: Expected 5 comma-separated fields (index, polarisation, fibre, preadu id, filter), but found {found}")]
    Incomplete { line_num: u32, found: usize },

    #[error("Signal map line {line_num}: Could not parse {field} '{string}' as an unsigned integer")]
    ParseInt {
        line_num: u32,
        field: &'static str,
        string: String,
    },

    #[error("Signal map line {line_num}: PreADU id {id} is invalid; expected 0 (TOP) or 1 (BOTTOM)")]
    InvalidPreaduId { line_num: u32, id: u8 },

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
