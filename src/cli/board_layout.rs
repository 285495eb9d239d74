// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::Parser;
use itertools::Itertools;
use log::info;

use super::common::{parse_board_flavour, InfoPrinter, BOARD_FLAVOUR_HELP};
use crate::{
    board::{PreAduBoard, SubBoard},
    constants::NUM_RX,
    PreAduError,
};

/// Print where each logical receiver sits on a board.
#[derive(Parser, Debug, Clone)]
pub(super) struct BoardLayoutArgs {
    #[clap(short, long, help = BOARD_FLAVOUR_HELP.as_str())]
    pub(super) board: String,
}

impl BoardLayoutArgs {
    pub(super) fn run(self) -> Result<(), PreAduError> {
        let flavour = parse_board_flavour(Some(&self.board))?;
        let board = PreAduBoard::new(flavour)?;

        let mut printer = InfoPrinter::new(format!("{flavour} layout").into());
        printer.push_line(format!("Capabilities: {}", board.capabilities()).into());
        for sub_board in [SubBoard::Top, SubBoard::Bottom] {
            // The logical receivers on this sub-board, in SPI chain order.
            let chain = sub_board
                .slots()
                .map(|slot| {
                    board
                        .spi_permutation()
                        .iter()
                        .position(|&s| s == slot)
                        .map(|i| i.to_string())
                        .unwrap_or_else(|| "?".to_string())
                })
                .join(" ");
            printer.push_line(format!("{sub_board} chain: {chain}").into());
        }
        printer.display();

        info!("{:>3}  {:>4}  {:<6} {:>3}  {:<15}", "rx", "slot", "board", "pos", "receiver");
        for i in 0..NUM_RX {
            let report = board.channel_report(i)?;
            info!(
                "{:>3}  {:>4}  {:<6} {:>3}  {:<15}",
                i,
                board.slot(i)?,
                report.sub_board.to_string(),
                report.chain_position,
                report.variant.to_string(),
            );
        }
        Ok(())
    }
}
