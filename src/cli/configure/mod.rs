// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.


use std::path::PathBuf;

use clap::Parser;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use thiserror::Error;

use super::{
    common::{display_warnings, BoardArgs, BoardParams, InfoPrinter, Warn, ARG_FILE_HELP},
    show::print_channel_table,
};
use crate::{
    board::{BoardError, PreAduBoard, SubBoard},
    codec::Capabilities,
    constants::{MAX_ATTENUATION_DB, NUM_RX},
    controller::RoundTripController,
    dump::{RegisterDump, RegisterDumpFile},
    receiver::FilterBand,
    PreAduError,
};

#[derive(Error, Debug)]
pub(super) enum ConfigureArgsError {
    #[error("Nothing to configure; specify at least one of --attenuation, --filter or --rf")]
    NothingToDo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub(super) enum RfSwitch {
    #[strum(serialize = "on")]
    On,

    #[strum(serialize = "off")]
    Off,
}

/// Change receiver settings, write them to the registers and read them back.
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(super) struct ConfigureArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    #[clap(flatten)]
    #[serde(rename = "board")]
    #[serde(default)]
    pub(super) board_args: BoardArgs,

    /// The attenuation to apply [dB]. Values outside 0 to 31 saturate.
    #[clap(short, long, allow_hyphen_values = true, help_heading = "SETTINGS")]
    pub(super) attenuation: Option<i32>,

    /// The logical receiver indices to change. The default is all of them.
    #[clap(short, long, multiple_values(true), help_heading = "SETTINGS")]
    pub(super) channels: Option<Vec<usize>>,

    /// The band-pass filter to select: "hi" or "lo".
    #[clap(short, long, help_heading = "SETTINGS")]
    pub(super) filter: Option<FilterBand>,

    /// Pass RF through ("on") or terminate the input ("off").
    #[clap(long, help_heading = "SETTINGS")]
    pub(super) rf: Option<RfSwitch>,
}

impl ConfigureArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified into
    /// a single struct. Where applicable, it will prefer CLI parameters over
    /// those in the file.
    pub(super) fn merge(self) -> Result<ConfigureArgs, PreAduError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            let ConfigureArgs {
                args_file: _,
                board_args,
                attenuation,
                channels,
                filter,
                rf,
            } = unpack_arg_file!(arg_file);

            Ok(ConfigureArgs {
                args_file: None,
                board_args: cli_args.board_args.merge(board_args),
                attenuation: cli_args.attenuation.or(attenuation),
                channels: cli_args.channels.or(channels),
                filter: cli_args.filter.or(filter),
                rf: cli_args.rf.or(rf),
            })
        } else {
            Ok(cli_args)
        }
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), PreAduError> {
        debug!("{:#?}", self);

        let ConfigureArgs {
            args_file: _,
            board_args,
            attenuation,
            channels,
            filter,
            rf,
        } = self;

        if attenuation.is_none() && filter.is_none() && rf.is_none() {
            return Err(ConfigureArgsError::NothingToDo.into());
        }
        let BoardParams { board, registers } = board_args.parse()?;
        let channels = match channels {
            Some(channels) => {
                for &i in &channels {
                    board.slot(i)?;
                }
                channels
            }
            None => (0..NUM_RX).collect(),
        };
        warn_about_settings(&board, &channels, attenuation, filter, rf)?;

        let hardware = RegisterDumpFile::open(&registers)?;
        let mut controller = RoundTripController::new(board, hardware)?;
        controller.edit(|board| -> Result<(), BoardError> {
            for &i in &channels {
                if let Some(db) = attenuation {
                    board.set_rx_attenuation(i, db)?;
                }
                if let Some(band) = filter {
                    board.set_rx_filter(i, band)?;
                }
                match rf {
                    Some(RfSwitch::On) => board.rx_rf_on(i)?,
                    Some(RfSwitch::Off) => board.rx_rf_off(i)?,
                    None => (),
                }
            }
            Ok(())
        })?;
        display_warnings();

        let intended = RegisterDump::from_board(controller.board());
        let mut printer = InfoPrinter::new("Registers to write".into());
        for sub_board in [SubBoard::Top, SubBoard::Bottom] {
            let block = intended
                .block(sub_board)
                .iter()
                .map(|code| format!("{code:02X}"))
                .collect::<Vec<_>>()
                .join(" ");
            printer.push_line(format!("{:<6}: {block}", sub_board.to_string()).into());
        }
        printer.display();

        if dry_run {
            info!("Dry run -- not writing registers.");
            return Ok(());
        }
        if !controller.registers_changed() {
            info!("The registers were read with these settings; writing them anyway");
        }

        controller.write_all()?;
        trace!("Read back {:?}", controller.last_read());
        print_channel_table(controller.board())?;
        display_warnings();
        Ok(())
    }
}

/// Queue warnings for settings that some of the selected receivers can't
/// honour.
fn warn_about_settings(
    board: &PreAduBoard,
    channels: &[usize],
    attenuation: Option<i32>,
    filter: Option<FilterBand>,
    rf: Option<RfSwitch>,
) -> Result<(), BoardError> {
    if let Some(db) = attenuation {
        if !(0..=i32::from(MAX_ATTENUATION_DB)).contains(&db) {
            format!("Attenuation {db} dB is out of range; it saturates to 0 to {MAX_ATTENUATION_DB} dB")
                .warn();
        }
    }

    let requested = [
        (attenuation.is_some(), Capabilities::ATTENUATION, "an attenuator"),
        (filter.is_some(), Capabilities::FILTER, "a selectable filter"),
        (rf.is_some(), Capabilities::TERMINATION, "a termination switch"),
    ];
    for (wanted, cap, what) in requested {
        if !wanted {
            continue;
        }
        let mut lacking = vec![];
        for &i in channels {
            if !board.receiver(i)?.capabilities().contains(cap) {
                lacking.push(i);
            }
        }
        if !lacking.is_empty() {
            format!(
                "{} of the selected receivers don't have {what} and are unchanged: {lacking:?}",
                lacking.len()
            )
            .warn();
        }
    }
    Ok(())
}
