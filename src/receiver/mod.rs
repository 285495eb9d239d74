// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A single PreADU receiver: one register governed by one hardware revision's
//! codec, plus where it is wired to.

use serde::{Deserialize, Serialize};
use strum_macros::{EnumIter, EnumString};

use crate::{
    board::SubBoard,
    codec::{Capabilities, VariantTag},
};

/// The band-pass filters selectable on receivers with the
/// [`Capabilities::FILTER`] capability.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum_macros::Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum FilterBand {
    #[strum(to_string = "hi", serialize = "high", serialize = "highpass")]
    #[serde(rename = "hi", alias = "high", alias = "highpass")]
    HighPass,

    #[strum(to_string = "lo", serialize = "low", serialize = "lowpass")]
    #[serde(rename = "lo", alias = "low", alias = "lowpass")]
    LowPass,
}

/// Where a receiver sits in the signal chain. Populated from a signal map; see
/// [`crate::routing`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RxWiring {
    /// The sub-board the signal map says this receiver is on.
    pub preadu_id: SubBoard,

    /// The filter channel index used by the signal map.
    pub channel_filter: u8,

    /// e.g. "RF-2" or "X".
    pub polarisation: String,

    /// The physical fibre (antenna) input label.
    pub fibre_input: String,

    /// The TPM ADC input fed by this receiver. This is always the receiver's
    /// logical index.
    pub adu_input: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receiver {
    logical_index: usize,
    variant: VariantTag,
    register: u8,
    serial_number: Option<String>,
    wiring: RxWiring,
}

impl Receiver {
    /// A receiver with a zeroed register. Until a signal map is applied, the
    /// wiring only knows the sub-board and ADU input.
    pub fn new(logical_index: usize, variant: VariantTag, sub_board: SubBoard) -> Receiver {
        Receiver {
            logical_index,
            variant,
            register: 0,
            serial_number: None,
            wiring: RxWiring {
                preadu_id: sub_board,
                channel_filter: 0,
                polarisation: String::new(),
                fibre_input: String::new(),
                adu_input: logical_index,
            },
        }
    }

    pub fn logical_index(&self) -> usize {
        self.logical_index
    }

    pub fn variant(&self) -> VariantTag {
        self.variant
    }

    pub fn capabilities(&self) -> Capabilities {
        self.variant.capabilities()
    }

    /// Set the attenuation [dB]. Values outside of 0-31 dB saturate.
    pub fn set_attenuation(&mut self, db: i32) {
        self.register = self.variant.attenuation_encode(self.register, db);
    }

    pub fn get_attenuation(&self) -> u8 {
        self.variant.attenuation_decode(self.register)
    }

    pub fn set_highpass(&mut self) {
        self.register = self.variant.set_highpass(self.register);
    }

    pub fn set_lowpass(&mut self) {
        self.register = self.variant.set_lowpass(self.register);
    }

    pub fn set_filter(&mut self, band: FilterBand) {
        match band {
            FilterBand::HighPass => self.set_highpass(),
            FilterBand::LowPass => self.set_lowpass(),
        }
    }

    pub fn is_highpass(&self) -> bool {
        self.variant.is_highpass(self.register)
    }

    pub fn is_lowpass(&self) -> bool {
        self.variant.is_lowpass(self.register)
    }

    /// The selected filter. `None` if the receiver has no selectable filter,
    /// and `Some(None)` if the register doesn't select exactly one band.
    pub fn filter(&self) -> Option<Option<FilterBand>> {
        if !self.capabilities().contains(Capabilities::FILTER) {
            return None;
        }
        Some(match (self.is_highpass(), self.is_lowpass()) {
            (true, false) => Some(FilterBand::HighPass),
            (false, true) => Some(FilterBand::LowPass),
            _ => None,
        })
    }

    pub fn rf_on(&mut self) {
        self.register = self.variant.rf_on(self.register);
    }

    pub fn rf_off(&mut self) {
        self.register = self.variant.rf_off(self.register);
    }

    pub fn is_terminated(&self) -> bool {
        self.variant.is_terminated(self.register)
    }

    /// The raw register, exactly as last set or read from hardware.
    pub fn get_register(&self) -> u8 {
        self.register
    }

    /// Overwrite the raw register. This is how bytes read from hardware get
    /// in; no field-level interpretation happens here.
    pub fn set_register(&mut self, code: u8) {
        self.register = code;
    }

    pub fn serial_number(&self) -> Option<&str> {
        self.serial_number.as_deref()
    }

    pub fn set_serial_number(&mut self, serial_number: Option<String>) {
        self.serial_number = serial_number;
    }

    pub fn wiring(&self) -> &RxWiring {
        &self.wiring
    }

    /// The ADU input is tied to the logical index and is kept regardless of
    /// what's supplied.
    pub fn set_wiring(&mut self, wiring: RxWiring) {
        self.wiring = RxWiring {
            adu_input: self.logical_index,
            ..wiring
        };
    }
}
