// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A TPM's pair of PreADU sub-boards, treated as one assembly of 32 receivers.
//!
//! Receivers are stored by *physical slot*: slot `s` is on sub-board `s / 16`
//! at SPI chain position `s % 16`. Callers address receivers by *logical
//! index* (the TPM ADC input they feed), and each board flavour has a fixed
//! permutation from logical index to physical slot. Nothing outside of this
//! module needs to know about SPI ordering.

mod error;
#[cfg(test)]
mod tests;

pub use error::BoardError;

use std::ops::Range;

use itertools::Itertools;
use log::{debug, trace, warn};
use static_assertions::assert_impl_all;
use strum::IntoEnumIterator;
use strum_macros::{EnumIter, EnumString};

use crate::{
    codec::{Capabilities, VariantTag},
    constants::{NUM_RX, RX_PER_SUB_BOARD},
    receiver::{FilterBand, Receiver, RxWiring},
    routing::RoutingRecord,
};

/// A signal map record that disagrees with a board about which sub-board
/// carries a receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutingMismatch {
    pub logical_index: usize,

    /// The sub-board named by the signal map.
    pub signal_map: SubBoard,

    /// The sub-board the receiver is on for the board's flavour.
    pub board: SubBoard,
}

/// The two independently-addressable sub-boards on a TPM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, strum_macros::Display, EnumIter)]
pub enum SubBoard {
    #[strum(serialize = "TOP")]
    Top,

    #[strum(serialize = "BOTTOM")]
    Bottom,
}

impl SubBoard {
    /// The hardware id of this sub-board (TOP is 0, BOTTOM is 1).
    pub const fn id(self) -> u8 {
        match self {
            SubBoard::Top => 0,
            SubBoard::Bottom => 1,
        }
    }

    pub const fn from_id(id: u8) -> Option<SubBoard> {
        match id {
            0 => Some(SubBoard::Top),
            1 => Some(SubBoard::Bottom),
            _ => None,
        }
    }

    /// The physical slots on this sub-board.
    pub fn slots(self) -> Range<usize> {
        let start = usize::from(self.id()) * RX_PER_SUB_BOARD;
        start..start + RX_PER_SUB_BOARD
    }

    /// The sub-board and SPI chain position of a physical slot. `slot` must be
    /// less than [`NUM_RX`].
    pub(crate) fn locate(slot: usize) -> (SubBoard, usize) {
        let sub_board = if slot < RX_PER_SUB_BOARD {
            SubBoard::Top
        } else {
            SubBoard::Bottom
        };
        (sub_board, slot % RX_PER_SUB_BOARD)
    }
}

/// All of the supported PreADU board flavours. Each has a fixed receiver
/// revision in each physical slot and a fixed SPI permutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum BoardFlavour {
    /// INAF prototype RF receivers throughout.
    #[strum(to_string = "preAduRf", serialize = "rf")]
    Rf,

    /// New-generation optical receivers on TOP, AAVS optical receivers on
    /// BOTTOM.
    #[strum(to_string = "preAduSadino", serialize = "sadino")]
    Sadino,

    /// AAVS optical receivers throughout.
    #[strum(to_string = "preAduAAVS1", serialize = "aavs1")]
    Aavs1,

    /// New-generation optical receivers throughout.
    #[strum(to_string = "preAduAAVS3", serialize = "aavs3")]
    Aavs3,
}

lazy_static::lazy_static! {
    pub(crate) static ref BOARD_FLAVOURS_COMMA_SEPARATED: String = BoardFlavour::iter().join(", ");
}

/// Logical receivers 0-15 are on BOTTOM and 16-31 are on TOP. Within each
/// sub-board, X/Y pairs are swapped relative to the chain order, and the
/// BOTTOM chain runs backwards.
const OPTICAL_SPI_PERMUTATION: [usize; NUM_RX] = [
    30, 31, 28, 29, 26, 27, 24, 25, 22, 23, 20, 21, 18, 19, 16, 17, // BOTTOM
    1, 0, 3, 2, 5, 4, 7, 6, 9, 8, 11, 10, 13, 12, 15, 14, // TOP
];

/// Logical receivers 0-15 are on TOP and 16-31 are on BOTTOM, both chains
/// running backwards.
const RF_SPI_PERMUTATION: [usize; NUM_RX] = [
    15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0, // TOP
    31, 30, 29, 28, 27, 26, 25, 24, 23, 22, 21, 20, 19, 18, 17, 16, // BOTTOM
];

impl BoardFlavour {
    /// The receiver revision fitted in each physical slot.
    pub fn slot_variants(self) -> [VariantTag; NUM_RX] {
        let (top, bottom) = match self {
            BoardFlavour::Rf => (VariantTag::InafSkaRf, VariantTag::InafSkaRf),
            BoardFlavour::Sadino => (VariantTag::NewSkaOptical, VariantTag::AavsOptical),
            BoardFlavour::Aavs1 => (VariantTag::AavsOptical, VariantTag::AavsOptical),
            BoardFlavour::Aavs3 => (VariantTag::NewSkaOptical, VariantTag::NewSkaOptical),
        };
        std::array::from_fn(|slot| match SubBoard::locate(slot).0 {
            SubBoard::Top => top,
            SubBoard::Bottom => bottom,
        })
    }

    /// The physical slot of each logical receiver index.
    pub fn spi_permutation(self) -> [usize; NUM_RX] {
        match self {
            BoardFlavour::Rf => RF_SPI_PERMUTATION,
            BoardFlavour::Sadino | BoardFlavour::Aavs1 | BoardFlavour::Aavs3 => {
                OPTICAL_SPI_PERMUTATION
            }
        }
    }
}

/// Everything there is to say about one receiver, addressed by logical index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelReport {
    pub logical_index: usize,
    pub sub_board: SubBoard,
    pub chain_position: usize,
    pub variant: VariantTag,
    pub register: u8,
    /// `None` if the receiver has no attenuator.
    pub attenuation: Option<u8>,
    /// `None` if the receiver has no selectable filter. Otherwise, the
    /// high-pass and low-pass select bits.
    pub filter: Option<(bool, bool)>,
    /// `None` if the receiver has no termination switch.
    pub terminated: Option<bool>,
    pub serial_number: Option<String>,
    pub wiring: RxWiring,
}

#[derive(Debug, Clone)]
pub struct PreAduBoard {
    flavour: BoardFlavour,

    /// Indexed by physical slot.
    receivers: Vec<Receiver>,

    /// Logical index -> physical slot.
    spi_permutation: [usize; NUM_RX],
}

// Embedding applications move boards behind their own locks.
assert_impl_all!(PreAduBoard: Send, Sync);

impl PreAduBoard {
    /// Assemble a board of the given flavour with its own SPI permutation.
    pub fn new(flavour: BoardFlavour) -> Result<PreAduBoard, BoardError> {
        Self::with_permutation(flavour, flavour.spi_permutation())
    }

    /// Assemble a board of the given flavour with a custom SPI permutation. The
    /// permutation must be a bijection on 0..32.
    pub fn with_permutation(
        flavour: BoardFlavour,
        spi_permutation: [usize; NUM_RX],
    ) -> Result<PreAduBoard, BoardError> {
        check_bijection(&spi_permutation)?;

        let variants = flavour.slot_variants();
        // Invert the permutation so each slot knows its logical index.
        let mut logical_of_slot = [0; NUM_RX];
        for (logical, &slot) in spi_permutation.iter().enumerate() {
            logical_of_slot[slot] = logical;
        }
        let receivers = variants
            .into_iter()
            .zip(logical_of_slot)
            .enumerate()
            .map(|(slot, (variant, logical))| {
                Receiver::new(logical, variant, SubBoard::locate(slot).0)
            })
            .collect();

        debug!("Assembled a {flavour} board");
        Ok(PreAduBoard {
            flavour,
            receivers,
            spi_permutation,
        })
    }

    /// Assemble a board of the given flavour and wire it up according to a
    /// signal map. Sub-board mismatches are only logged; use
    /// [`PreAduBoard::apply_routing`] to get them.
    pub fn from_routing(
        flavour: BoardFlavour,
        records: &[RoutingRecord],
    ) -> Result<PreAduBoard, BoardError> {
        let mut board = Self::new(flavour)?;
        board.apply_routing(records)?;
        Ok(board)
    }

    /// Set the wiring of every receiver named in a signal map. Receivers not
    /// mentioned keep their wiring. Nothing is changed if any record is bad.
    ///
    /// Records that put a receiver on a different sub-board than this board's
    /// flavour does are still applied, but they are logged and returned.
    pub fn apply_routing(
        &mut self,
        records: &[RoutingRecord],
    ) -> Result<Vec<RoutingMismatch>, BoardError> {
        let mut seen = [false; NUM_RX];
        for record in records {
            let i = record.logical_index;
            if i >= NUM_RX {
                return Err(BoardError::RoutingIndexOutOfRange(i));
            }
            if seen[i] {
                return Err(BoardError::DuplicateRoutingIndex(i));
            }
            seen[i] = true;
        }

        let mut mismatches = vec![];
        for record in records {
            let slot = self.spi_permutation[record.logical_index];
            let (physical_sub_board, _) = SubBoard::locate(slot);
            if record.preadu_id != physical_sub_board {
                warn!(
                    "Signal map puts receiver {} on PreADU {}, but a {} board has it on {}",
                    record.logical_index, record.preadu_id, self.flavour, physical_sub_board
                );
                mismatches.push(RoutingMismatch {
                    logical_index: record.logical_index,
                    signal_map: record.preadu_id,
                    board: physical_sub_board,
                });
            }
            trace!(
                "Receiver {}: fibre {} ({})",
                record.logical_index,
                record.fibre_input,
                record.polarisation
            );
            self.receivers[slot].set_wiring(record.to_wiring());
        }
        Ok(mismatches)
    }

    pub fn flavour(&self) -> BoardFlavour {
        self.flavour
    }

    pub fn spi_permutation(&self) -> &[usize; NUM_RX] {
        &self.spi_permutation
    }

    /// The physical slot of a logical receiver index.
    pub fn slot(&self, logical_index: usize) -> Result<usize, BoardError> {
        self.spi_permutation
            .get(logical_index)
            .copied()
            .ok_or(BoardError::InvalidRxIndex(logical_index))
    }

    pub fn receiver(&self, logical_index: usize) -> Result<&Receiver, BoardError> {
        let slot = self.slot(logical_index)?;
        Ok(&self.receivers[slot])
    }

    fn receiver_mut(&mut self, logical_index: usize) -> Result<&mut Receiver, BoardError> {
        let slot = self.slot(logical_index)?;
        Ok(&mut self.receivers[slot])
    }

    /// All receivers in logical order.
    pub fn receivers(&self) -> impl Iterator<Item = &Receiver> {
        self.spi_permutation
            .iter()
            .map(move |&slot| &self.receivers[slot])
    }

    /// The union of the capabilities of all receivers.
    pub fn capabilities(&self) -> Capabilities {
        self.receivers
            .iter()
            .fold(Capabilities::NONE, |acc, rx| acc | rx.capabilities())
    }

    pub fn set_rx_attenuation(&mut self, logical_index: usize, db: i32) -> Result<(), BoardError> {
        self.receiver_mut(logical_index)?.set_attenuation(db);
        Ok(())
    }

    pub fn get_rx_attenuation(&self, logical_index: usize) -> Result<u8, BoardError> {
        Ok(self.receiver(logical_index)?.get_attenuation())
    }

    /// Set the same attenuation on every receiver. Receivers of different
    /// revisions may end up with different register values.
    pub fn set_all_rx_attenuation(&mut self, db: i32) {
        self.receivers
            .iter_mut()
            .for_each(|rx| rx.set_attenuation(db));
    }

    pub fn set_rx_highpass(&mut self, logical_index: usize) -> Result<(), BoardError> {
        self.receiver_mut(logical_index)?.set_highpass();
        Ok(())
    }

    pub fn set_rx_lowpass(&mut self, logical_index: usize) -> Result<(), BoardError> {
        self.receiver_mut(logical_index)?.set_lowpass();
        Ok(())
    }

    pub fn set_rx_filter(
        &mut self,
        logical_index: usize,
        band: FilterBand,
    ) -> Result<(), BoardError> {
        self.receiver_mut(logical_index)?.set_filter(band);
        Ok(())
    }

    pub fn set_all_rx_filter(&mut self, band: FilterBand) {
        self.receivers
            .iter_mut()
            .for_each(|rx| rx.set_filter(band));
    }

    pub fn is_rx_highpass(&self, logical_index: usize) -> Result<bool, BoardError> {
        Ok(self.receiver(logical_index)?.is_highpass())
    }

    pub fn is_rx_lowpass(&self, logical_index: usize) -> Result<bool, BoardError> {
        Ok(self.receiver(logical_index)?.is_lowpass())
    }

    pub fn rx_rf_on(&mut self, logical_index: usize) -> Result<(), BoardError> {
        self.receiver_mut(logical_index)?.rf_on();
        Ok(())
    }

    pub fn rx_rf_off(&mut self, logical_index: usize) -> Result<(), BoardError> {
        self.receiver_mut(logical_index)?.rf_off();
        Ok(())
    }

    pub fn all_rx_rf_on(&mut self) {
        self.receivers.iter_mut().for_each(Receiver::rf_on);
    }

    pub fn all_rx_rf_off(&mut self) {
        self.receivers.iter_mut().for_each(Receiver::rf_off);
    }

    pub fn is_rx_terminated(&self, logical_index: usize) -> Result<bool, BoardError> {
        Ok(self.receiver(logical_index)?.is_terminated())
    }

    pub fn get_register_value(&self, logical_index: usize) -> Result<u8, BoardError> {
        Ok(self.receiver(logical_index)?.get_register())
    }

    pub fn set_register_value(&mut self, logical_index: usize, code: u8) -> Result<(), BoardError> {
        self.receiver_mut(logical_index)?.set_register(code);
        Ok(())
    }

    pub fn get_wiring(&self, logical_index: usize) -> Result<&RxWiring, BoardError> {
        Ok(self.receiver(logical_index)?.wiring())
    }

    pub fn set_wiring(&mut self, logical_index: usize, wiring: RxWiring) -> Result<(), BoardError> {
        self.receiver_mut(logical_index)?.set_wiring(wiring);
        Ok(())
    }

    pub fn set_serial_number(
        &mut self,
        logical_index: usize,
        serial_number: Option<String>,
    ) -> Result<(), BoardError> {
        self.receiver_mut(logical_index)?
            .set_serial_number(serial_number);
        Ok(())
    }

    /// Every register, in physical slot order.
    pub fn registers_by_slot(&self) -> [u8; NUM_RX] {
        std::array::from_fn(|slot| self.receivers[slot].get_register())
    }

    /// Overwrite every register, in physical slot order.
    pub fn load_registers_by_slot(&mut self, registers: &[u8; NUM_RX]) {
        for (rx, &code) in self.receivers.iter_mut().zip(registers.iter()) {
            rx.set_register(code);
        }
    }

    /// The registers of one sub-board in SPI chain order, as they are written
    /// to hardware.
    pub fn sub_board_block(&self, sub_board: SubBoard) -> [u8; RX_PER_SUB_BOARD] {
        let slots = sub_board.slots();
        std::array::from_fn(|pos| self.receivers[slots.start + pos].get_register())
    }

    /// Overwrite the registers of one sub-board from a block in SPI chain order.
    pub fn load_sub_board_block(&mut self, sub_board: SubBoard, block: &[u8; RX_PER_SUB_BOARD]) {
        for (rx, &code) in self.receivers[sub_board.slots()].iter_mut().zip(block.iter()) {
            rx.set_register(code);
        }
    }

    pub fn channel_report(&self, logical_index: usize) -> Result<ChannelReport, BoardError> {
        let slot = self.slot(logical_index)?;
        let rx = &self.receivers[slot];
        let caps = rx.capabilities();
        let (sub_board, chain_position) = SubBoard::locate(slot);
        Ok(ChannelReport {
            logical_index,
            sub_board,
            chain_position,
            variant: rx.variant(),
            register: rx.get_register(),
            attenuation: caps
                .contains(Capabilities::ATTENUATION)
                .then(|| rx.get_attenuation()),
            filter: caps
                .contains(Capabilities::FILTER)
                .then(|| (rx.is_highpass(), rx.is_lowpass())),
            terminated: caps
                .contains(Capabilities::TERMINATION)
                .then(|| rx.is_terminated()),
            serial_number: rx.serial_number().map(|s| s.to_string()),
            wiring: rx.wiring().clone(),
        })
    }
}

fn check_bijection(spi_permutation: &[usize; NUM_RX]) -> Result<(), BoardError> {
    // With exactly NUM_RX entries, in range and unique means bijective.
    let mut claimed_by: [Option<usize>; NUM_RX] = [None; NUM_RX];
    for (logical, &slot) in spi_permutation.iter().enumerate() {
        if slot >= NUM_RX {
            return Err(BoardError::SlotOutOfRange { logical, slot });
        }
        if let Some(first) = claimed_by[slot] {
            return Err(BoardError::DuplicateSlot {
                slot,
                first,
                second: logical,
            });
        }
        claimed_by[slot] = Some(logical);
    }
    Ok(())
}
