// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Common arguments for command-line interfaces. e.g. the `show` and
//! `configure` subcommands both need a board and its registers, so the same
//! board arguments are shared between them.

mod printers;
#[cfg(test)]
mod tests;

pub(super) use printers::InfoPrinter;
pub(crate) use printers::{display_warnings, Warn};

use std::{path::PathBuf, str::FromStr};

use clap::Parser;
use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

use super::PreAduError;
use crate::{
    board::{BoardFlavour, PreAduBoard, BOARD_FLAVOURS_COMMA_SEPARATED},
    codec::VARIANT_TAGS_COMMA_SEPARATED,
    routing::read_signal_map_file,
};

lazy_static::lazy_static! {
    pub(super) static ref ARG_FILE_TYPES_COMMA_SEPARATED: String = ArgFileTypes::iter().join(", ");

    pub(super) static ref ARG_FILE_HELP: String =
        format!("All arguments may be specified in a file. Any CLI arguments override arguments set in the file. Supported formats: {}", *ARG_FILE_TYPES_COMMA_SEPARATED);

    pub(super) static ref BOARD_FLAVOUR_HELP: String =
        format!("The flavour of PreADU board. Supported flavours: {}", *BOARD_FLAVOURS_COMMA_SEPARATED);

    pub(super) static ref VARIANT_HELP: String =
        format!("The receiver revision the register belongs to. Supported revisions: {}", *VARIANT_TAGS_COMMA_SEPARATED);
}

#[derive(Debug, Display, EnumIter, EnumString)]
pub(super) enum ArgFileTypes {
    #[strum(serialize = "toml")]
    Toml,
    #[strum(serialize = "json")]
    Json,
}

macro_rules! unpack_arg_file {
    ($arg_file:expr) => ({
        use std::{fs::File, io::Read, str::FromStr};

        use crate::cli::common::{ArgFileTypes, ARG_FILE_TYPES_COMMA_SEPARATED};

        debug!("Attempting to parse argument file {}", $arg_file.display());

        let mut contents = String::new();
        let arg_file_type = $arg_file
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .and_then(|e| ArgFileTypes::from_str(&e).ok());

        match arg_file_type {
            Some(ArgFileTypes::Toml) => {
                debug!("Parsing toml file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match toml::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(PreAduError::ArgFile(format!(
                            "Couldn't decode toml structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }
            Some(ArgFileTypes::Json) => {
                debug!("Parsing json file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match serde_json::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(PreAduError::ArgFile(format!(
                            "Couldn't decode json structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }

            _ => {
                return Err(PreAduError::ArgFile(format!(
                    "Argument file '{:?}' doesn't have a recognised file extension! Valid extensions are: {}", $arg_file, *ARG_FILE_TYPES_COMMA_SEPARATED)
                ))
            }
        }
    });
}

#[derive(Error, Debug)]
pub(super) enum BoardArgsError {
    #[error("No board flavour was specified")]
    NoBoard,

    #[error("'{0}' is not a supported board flavour")]
    InvalidBoard(String),

    #[error("No register dump was specified")]
    NoRegisters,
}

/// Arguments describing a PreADU board and where its registers live.
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(super) struct BoardArgs {
    #[clap(short, long, help = BOARD_FLAVOUR_HELP.as_str(), help_heading = "BOARD")]
    pub(super) board: Option<String>,

    /// The register dump file (toml or json) standing in for the board's
    /// registers.
    #[clap(short, long, parse(from_os_str), help_heading = "BOARD")]
    pub(super) registers: Option<PathBuf>,

    /// A signal map describing how the receivers are wired to antenna inputs.
    #[clap(short = 'm', long, parse(from_os_str), help_heading = "BOARD")]
    pub(super) signal_map: Option<PathBuf>,
}

/// A board ready to be used, and the registers to use it with.
#[derive(Debug)]
pub(super) struct BoardParams {
    pub(super) board: PreAduBoard,
    pub(super) registers: PathBuf,
}

impl BoardArgs {
    /// Merge two sets of board arguments, preferring `self`'s.
    pub(super) fn merge(self, other: Self) -> Self {
        Self {
            board: self.board.or(other.board),
            registers: self.registers.or(other.registers),
            signal_map: self.signal_map.or(other.signal_map),
        }
    }

    pub(super) fn parse(self) -> Result<BoardParams, PreAduError> {
        let Self {
            board,
            registers,
            signal_map,
        } = self;

        let flavour = parse_board_flavour(board.as_deref())?;
        let registers = registers.ok_or(BoardArgsError::NoRegisters)?;
        let board = match signal_map.as_ref() {
            Some(signal_map) => {
                let records = read_signal_map_file(signal_map)?;
                PreAduBoard::from_routing(flavour, &records)?
            }
            None => PreAduBoard::new(flavour)?,
        };

        let mut printer = InfoPrinter::new(format!("{flavour} board").into());
        printer.push_block(vec![
            format!("Receivers: {}", board.receivers().map(|rx| rx.variant()).unique().join(", "))
                .into(),
            format!("Capabilities: {}", board.capabilities()).into(),
        ]);
        printer.push_line(format!("Registers: {}", registers.display()).into());
        if let Some(signal_map) = signal_map {
            printer.push_line(format!("Signal map: {}", signal_map.display()).into());
        }
        printer.display();

        Ok(BoardParams { board, registers })
    }
}

pub(super) fn parse_board_flavour(board: Option<&str>) -> Result<BoardFlavour, BoardArgsError> {
    let board = board.ok_or(BoardArgsError::NoBoard)?;
    debug!("Parsing board flavour '{board}'");
    BoardFlavour::from_str(board).map_err(|_| BoardArgsError::InvalidBoard(board.to_string()))
}
