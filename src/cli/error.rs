// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all preadu-related errors. This should be the *only* error
//! enum that is publicly visible from the command-line interface.

use thiserror::Error;

use super::{common::BoardArgsError, configure::ConfigureArgsError, decode::DecodeArgsError};
use crate::{
    board::{BoardError, BOARD_FLAVOURS_COMMA_SEPARATED},
    controller::RoundTripError,
    dump::RegisterDumpError,
    routing::SignalMapError,
};

/// The *only* publicly visible error from the `preadu` binary. Each category
/// carries a hint about what the user should look at.
#[derive(Error, Debug)]
pub enum PreAduError {
    /// An error related to the board flavour or its receivers.
    #[error("{0}\n\nSupported board flavours: {flavours}", flavours = *BOARD_FLAVOURS_COMMA_SEPARATED)]
    Board(String),

    /// An error related to signal map files.
    #[error("{0}\n\nSignal maps have one receiver per line: logical index, polarisation, fibre input, preadu id (0 = TOP, 1 = BOTTOM), channel filter")]
    SignalMap(String),

    /// An error related to register dump files.
    #[error("{0}\n\nRegister dumps contain 'top' and 'bottom' arrays of 16 integers (0 to 255) each")]
    RegisterDump(String),

    /// An error encountered while talking to the registers.
    #[error("{0}\n\nSome registers may have been written before the failure. The in-memory edits were kept; retry the whole operation")]
    Hardware(String),

    /// An error related to argument files.
    #[error("{0}\n\nAll arguments may be given in a toml or json file; CLI arguments take precedence")]
    ArgFile(String),

    /// A generic error that can't be clarified further, e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

// When changing the error propagation below, ensure `Self::from(e)` uses the
// correct `e`!

impl From<BoardError> for PreAduError {
    fn from(e: BoardError) -> Self {
        let s = e.to_string();
        match e {
            BoardError::SlotOutOfRange { .. }
            | BoardError::DuplicateSlot { .. }
            | BoardError::InvalidRxIndex(_) => Self::Board(s),
            BoardError::RoutingIndexOutOfRange(_) | BoardError::DuplicateRoutingIndex(_) => {
                Self::SignalMap(s)
            }
        }
    }
}

impl From<SignalMapError> for PreAduError {
    fn from(e: SignalMapError) -> Self {
        let s = e.to_string();
        match e {
            SignalMapError::Incomplete { .. }
            | SignalMapError::ParseInt { .. }
            | SignalMapError::InvalidPreaduId { .. } => Self::SignalMap(s),
            SignalMapError::IO(e) => Self::from(e),
        }
    }
}

impl From<RegisterDumpError> for PreAduError {
    fn from(e: RegisterDumpError) -> Self {
        let s = e.to_string();
        match e {
            RegisterDumpError::UnrecognisedExtension(_)
            | RegisterDumpError::TomlDecode { .. }
            | RegisterDumpError::JsonDecode { .. } => Self::RegisterDump(s),
            RegisterDumpError::TomlEncode(_) | RegisterDumpError::JsonEncode(_) => {
                Self::Generic(s)
            }
            RegisterDumpError::IO(e) => Self::from(e),
        }
    }
}

impl From<RoundTripError> for PreAduError {
    fn from(e: RoundTripError) -> Self {
        let s = e.to_string();
        match e {
            RoundTripError::NothingToWrite => Self::Generic(s),
            RoundTripError::Hardware { .. } => Self::Hardware(s),
        }
    }
}

impl From<BoardArgsError> for PreAduError {
    fn from(e: BoardArgsError) -> Self {
        let s = e.to_string();
        match e {
            BoardArgsError::NoBoard | BoardArgsError::InvalidBoard(_) => Self::Board(s),
            BoardArgsError::NoRegisters => Self::RegisterDump(s),
        }
    }
}

impl From<ConfigureArgsError> for PreAduError {
    fn from(e: ConfigureArgsError) -> Self {
        match e {
            ConfigureArgsError::NothingToDo => Self::Generic(e.to_string()),
        }
    }
}

impl From<DecodeArgsError> for PreAduError {
    fn from(e: DecodeArgsError) -> Self {
        Self::Generic(e.to_string())
    }
}

impl From<std::io::Error> for PreAduError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}

impl From<toml::ser::Error> for PreAduError {
    fn from(e: toml::ser::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
