// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

use crate::board::SubBoard;

#[derive(Error, Debug)]
pub enum RoundTripError {
    #[error("The registers haven't been edited since they were last read")]
    NothingToWrite,

    #[error("Failed to {operation} the registers of PreADU {sub_board}: {source}")]
    Hardware {
        operation: &'static str,
        sub_board: SubBoard,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
