// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Keeping a [`PreAduBoard`] in step with hardware.
//!
//! All registers are read together, edited in memory, and written back
//! together. A write always carries every register byte, never just the field
//! that changed. The two sub-boards are always read TOP first and written
//! BOTTOM first.
//!
//! The controller is not synchronised. If hardware is polled on one thread and
//! edited on another, the whole read → edit → write cycle needs to be
//! serialised by the caller.

mod error;

pub use error::RoundTripError;

use itertools::Itertools;
use log::{debug, trace, warn};

use crate::{
    board::{PreAduBoard, SubBoard},
    constants::{NUM_RX, RX_PER_SUB_BOARD},
};

const READ_ORDER: [SubBoard; 2] = [SubBoard::Top, SubBoard::Bottom];
const WRITE_ORDER: [SubBoard; 2] = [SubBoard::Bottom, SubBoard::Top];

/// Access to the register blocks of a TPM's PreADU sub-boards. Each block
/// holds one sub-board's registers in SPI chain order.
///
/// Implementations may block; timeouts and retries are their business.
pub trait RegisterAccess {
    type Error: std::error::Error + Send + Sync + 'static;

    fn read_register_block(
        &mut self,
        sub_board: SubBoard,
    ) -> Result<[u8; RX_PER_SUB_BOARD], Self::Error>;

    fn write_register_block(
        &mut self,
        sub_board: SubBoard,
        block: &[u8; RX_PER_SUB_BOARD],
    ) -> Result<(), Self::Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum SyncState {
    /// The in-memory registers are as they were last read from hardware.
    Clean,

    /// The in-memory registers have been edited since the last read. The edits
    /// may well put back values the hardware already holds.
    Dirty,
}

pub struct RoundTripController<H: RegisterAccess> {
    board: PreAduBoard,
    hardware: H,

    /// Registers by physical slot, as of the last successful read.
    last_read: [u8; NUM_RX],

    /// Has the board been edited since the last successful read?
    dirty: bool,
}

impl<H: RegisterAccess> RoundTripController<H> {
    /// Take ownership of a board and its hardware, and synchronise the board
    /// with a read of all registers.
    pub fn new(board: PreAduBoard, hardware: H) -> Result<Self, RoundTripError> {
        let last_read = board.registers_by_slot();
        let mut controller = RoundTripController {
            board,
            hardware,
            last_read,
            dirty: false,
        };
        controller.read_all()?;
        Ok(controller)
    }

    pub fn state(&self) -> SyncState {
        if self.dirty {
            SyncState::Dirty
        } else {
            SyncState::Clean
        }
    }

    /// Do the in-memory registers differ from the last read? An edit that
    /// re-applies current values leaves the controller [`SyncState::Dirty`]
    /// without changing any register.
    pub fn registers_changed(&self) -> bool {
        self.board.registers_by_slot() != self.last_read
    }

    pub fn board(&self) -> &PreAduBoard {
        &self.board
    }

    pub fn hardware(&self) -> &H {
        &self.hardware
    }

    /// Registers by physical slot, as of the last successful read.
    pub fn last_read(&self) -> &[u8; NUM_RX] {
        &self.last_read
    }

    pub fn into_parts(self) -> (PreAduBoard, H) {
        (self.board, self.hardware)
    }

    /// Make field-level edits to the board. Any edit makes the controller
    /// [`SyncState::Dirty`], even if no register ends up different. Nothing
    /// reaches hardware until [`RoundTripController::write_all`].
    pub fn edit<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut PreAduBoard) -> R,
    {
        if !self.dirty {
            trace!("Register state {} -> {}", SyncState::Clean, SyncState::Dirty);
        }
        self.dirty = true;
        f(&mut self.board)
    }

    /// Read every register from hardware, replacing anything in memory. If
    /// either read fails, nothing in memory changes.
    pub fn read_all(&mut self) -> Result<(), RoundTripError> {
        // Both reads must succeed before anything is loaded.
        let mut blocks = [[0; RX_PER_SUB_BOARD]; READ_ORDER.len()];
        for (block, sub_board) in blocks.iter_mut().zip(READ_ORDER) {
            debug!("Reading registers of PreADU {sub_board}");
            *block = self
                .hardware
                .read_register_block(sub_board)
                .map_err(|e| RoundTripError::Hardware {
                    operation: "read",
                    sub_board,
                    source: Box::new(e),
                })?;
            trace!("PreADU {sub_board}: {block:02x?}");
        }

        for (block, sub_board) in blocks.iter().zip(READ_ORDER) {
            self.board.load_sub_board_block(sub_board, block);
        }
        self.last_read = self.board.registers_by_slot();
        self.dirty = false;
        Ok(())
    }

    /// Write every register to hardware, then read them all back. Only valid
    /// after an edit.
    ///
    /// If a write or the read-back fails, the in-memory registers keep their
    /// edits and the state stays [`SyncState::Dirty`]; retrying is up to the
    /// caller.
    pub fn write_all(&mut self) -> Result<(), RoundTripError> {
        if self.state() == SyncState::Clean {
            return Err(RoundTripError::NothingToWrite);
        }

        // The whole payload is built before anything goes out.
        let payload = WRITE_ORDER.map(|sub_board| (sub_board, self.board.sub_board_block(sub_board)));
        let written = self.board.registers_by_slot();
        for (sub_board, block) in &payload {
            debug!("Writing registers of PreADU {sub_board}");
            trace!("PreADU {sub_board}: {block:02x?}");
            self.hardware
                .write_register_block(*sub_board, block)
                .map_err(|e| RoundTripError::Hardware {
                    operation: "write",
                    sub_board: *sub_board,
                    source: Box::new(e),
                })?;
        }

        self.read_all()?;

        let mismatched = written
            .iter()
            .zip(self.last_read.iter())
            .enumerate()
            .filter(|(_, (w, r))| w != r)
            .map(|(slot, _)| slot)
            .collect::<Vec<_>>();
        if !mismatched.is_empty() {
            let logical = self
                .board
                .spi_permutation()
                .iter()
                .enumerate()
                .filter(|&(_, &slot)| mismatched.contains(&slot))
                .map(|(i, _)| i)
                .join(", ");
            warn!("Registers read back after writing differ for receivers {logical}");
        }
        Ok(())
    }

    /// Throw away edits, restoring the registers from the last read. Hardware
    /// isn't touched.
    pub fn discard(&mut self) {
        if self.dirty {
            debug!("Discarding register edits");
        }
        self.board.load_registers_by_slot(&self.last_read);
        self.dirty = false;
    }
}
