// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::Parser;
use log::info;

use super::common::{display_warnings, BoardArgs, BoardParams};
use crate::{
    board::{ChannelReport, PreAduBoard},
    constants::NUM_RX,
    controller::RoundTripController,
    dump::RegisterDumpFile,
    PreAduError,
};

/// Print the state of every receiver on a board.
#[derive(Parser, Debug, Clone, Default)]
pub(super) struct ShowArgs {
    #[clap(flatten)]
    pub(super) board_args: BoardArgs,
}

impl ShowArgs {
    pub(super) fn run(self, dry_run: bool) -> Result<(), PreAduError> {
        let BoardParams { board, registers } = self.board_args.parse()?;
        let hardware = RegisterDumpFile::open(&registers)?;
        display_warnings();

        if dry_run {
            info!("Dry run -- not reading registers.");
            return Ok(());
        }

        let controller = RoundTripController::new(board, hardware)?;
        print_channel_table(controller.board())?;
        display_warnings();
        Ok(())
    }
}

pub(super) fn print_channel_table(board: &PreAduBoard) -> Result<(), PreAduError> {
    info!(
        "{:>3}  {:<6} {:>3}  {:<15} {:>4}  {:>5}  {:<6} {:<4} {:<6} {:<6}",
        "rx", "board", "pos", "receiver", "reg", "atten", "filter", "rf", "pol", "fibre"
    );
    for i in 0..NUM_RX {
        info!("{}", format_channel_row(&board.channel_report(i)?));
    }
    info!("");
    Ok(())
}

/// One line of the channel table. Fields a receiver doesn't support are shown
/// as "-".
pub(super) fn format_channel_row(report: &ChannelReport) -> String {
    let attenuation = match report.attenuation {
        Some(db) => format!("{db}dB"),
        None => "-".to_string(),
    };
    let filter = match report.filter {
        Some((true, false)) => "hi",
        Some((false, true)) => "lo",
        Some((true, true)) => "both",
        Some((false, false)) => "none",
        None => "-",
    };
    let rf = match report.terminated {
        Some(false) => "on",
        Some(true) => "off",
        None => "-",
    };
    format!(
        "{:>3}  {:<6} {:>3}  {:<15} 0x{:02X}  {:>5}  {:<6} {:<4} {:<6} {:<6}",
        report.logical_index,
        report.sub_board.to_string(),
        report.chain_position,
        report.variant.to_string(),
        report.register,
        attenuation,
        filter,
        rf,
        report.wiring.polarisation,
        report.wiring.fibre_input,
    )
}
