// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Bit-level codecs for the 8-bit configuration register of each PreADU
//! receiver hardware revision.
//!
//! Every function here is total over the register space; any byte is a legal
//! input and bits that a revision doesn't assign are left alone. Operations
//! that a revision doesn't support (e.g. filter selection on a receiver with no
//! filter) return their input unchanged, or `false` for queries. Use
//! [`VariantTag::capabilities`] to tell "unsupported" apart from "not set".

mod dual_band;
mod inaf_rf;
mod optical;

use std::ops::BitOr;

use itertools::Itertools;
use strum::IntoEnumIterator;
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

use crate::constants::MAX_ATTENUATION_DB;

/// All of the receiver hardware revisions that can be fitted to a PreADU.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum VariantTag {
    /// The legacy dual-band receiver. Only the band-pass filter is selectable.
    #[strum(to_string = "dual-band", serialize = "DualBandRx")]
    DualBand,

    /// The AAVS optical (WDM) receiver: filter, termination and a contiguous
    /// 5-bit attenuator.
    #[strum(to_string = "aavs-optical", serialize = "AAVSOpticalRx")]
    AavsOptical,

    /// The new-generation SKA optical receiver: attenuation only.
    #[strum(to_string = "new-ska-optical", serialize = "NewSKAOpticalRx")]
    NewSkaOptical,

    /// The INAF prototype RF receiver. The attenuator bits are scattered
    /// through the register.
    #[strum(to_string = "inaf-ska-rf", serialize = "InafSkaRfRx")]
    InafSkaRf,
}

lazy_static::lazy_static! {
    pub(crate) static ref VARIANT_TAGS_COMMA_SEPARATED: String = VariantTag::iter().join(", ");
}

/// A set of register capabilities. A receiver revision may support any
/// combination of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Capabilities(u8);

impl Capabilities {
    pub const NONE: Capabilities = Capabilities(0);
    pub const ATTENUATION: Capabilities = Capabilities(1 << 0);
    pub const FILTER: Capabilities = Capabilities(1 << 1);
    pub const TERMINATION: Capabilities = Capabilities(1 << 2);
    pub const ALL: Capabilities = Capabilities(0b111);

    pub const fn union(self, other: Capabilities) -> Capabilities {
        Capabilities(self.0 | other.0)
    }

    /// Are all of the capabilities in `other` also in `self`?
    pub const fn contains(self, other: Capabilities) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Capabilities {
    type Output = Capabilities;

    fn bitor(self, rhs: Capabilities) -> Capabilities {
        self.union(rhs)
    }
}

impl std::fmt::Display for Capabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }
        let names = [
            (Capabilities::ATTENUATION, "attenuation"),
            (Capabilities::FILTER, "filter"),
            (Capabilities::TERMINATION, "termination"),
        ]
        .into_iter()
        .filter(|(c, _)| self.contains(*c))
        .map(|(_, name)| name)
        .join(", ");
        write!(f, "{names}")
    }
}

/// Clamp a requested attenuation into the range the attenuators can apply.
/// Out-of-range requests saturate; they are never rejected.
pub fn clamp_attenuation(db: i32) -> u8 {
    db.clamp(0, i32::from(MAX_ATTENUATION_DB)) as u8
}

impl VariantTag {
    /// The capabilities this receiver revision implements.
    pub const fn capabilities(self) -> Capabilities {
        match self {
            VariantTag::DualBand => Capabilities::FILTER,
            VariantTag::AavsOptical | VariantTag::InafSkaRf => Capabilities::ALL,
            VariantTag::NewSkaOptical => Capabilities::ATTENUATION,
        }
    }

    /// The register bits owned by the given capabilities. Operations for a
    /// capability never change bits outside of its mask. Capabilities that this
    /// revision doesn't support own no bits.
    pub const fn owned_bits(self, caps: Capabilities) -> u8 {
        let caps = Capabilities(caps.0 & self.capabilities().0);
        let mut mask = 0;
        if caps.contains(Capabilities::ATTENUATION) {
            mask |= match self {
                VariantTag::InafSkaRf => inaf_rf::ATTENUATION_BITS,
                _ => optical::ATTENUATION_BITS,
            };
        }
        if caps.contains(Capabilities::FILTER) {
            mask |= match self {
                VariantTag::InafSkaRf => inaf_rf::FILTER_BITS,
                _ => dual_band::FILTER_BITS,
            };
        }
        if caps.contains(Capabilities::TERMINATION) {
            mask |= optical::TERMINATION_BITS;
        }
        mask
    }

    /// Write an attenuation [dB] into the register. The value is clamped to
    /// 0-31 dB first.
    pub fn attenuation_encode(self, code: u8, db: i32) -> u8 {
        let db = clamp_attenuation(db);
        match self {
            VariantTag::DualBand => code,
            VariantTag::AavsOptical | VariantTag::NewSkaOptical => {
                optical::attenuation_encode(code, db)
            }
            VariantTag::InafSkaRf => inaf_rf::attenuation_encode(code, db),
        }
    }

    /// Read the attenuation [dB] out of the register. Always 0 for revisions
    /// without an attenuator.
    pub fn attenuation_decode(self, code: u8) -> u8 {
        match self {
            VariantTag::DualBand => 0,
            VariantTag::AavsOptical | VariantTag::NewSkaOptical => {
                optical::attenuation_decode(code)
            }
            VariantTag::InafSkaRf => inaf_rf::attenuation_decode(code),
        }
    }

    pub fn set_highpass(self, code: u8) -> u8 {
        match self {
            VariantTag::DualBand | VariantTag::AavsOptical => dual_band::set_highpass(code),
            VariantTag::InafSkaRf => inaf_rf::set_highpass(code),
            VariantTag::NewSkaOptical => code,
        }
    }

    pub fn set_lowpass(self, code: u8) -> u8 {
        match self {
            VariantTag::DualBand | VariantTag::AavsOptical => dual_band::set_lowpass(code),
            VariantTag::InafSkaRf => inaf_rf::set_lowpass(code),
            VariantTag::NewSkaOptical => code,
        }
    }

    pub fn is_highpass(self, code: u8) -> bool {
        match self {
            VariantTag::DualBand | VariantTag::AavsOptical => dual_band::is_highpass(code),
            VariantTag::InafSkaRf => inaf_rf::is_highpass(code),
            VariantTag::NewSkaOptical => false,
        }
    }

    pub fn is_lowpass(self, code: u8) -> bool {
        match self {
            VariantTag::DualBand | VariantTag::AavsOptical => dual_band::is_lowpass(code),
            VariantTag::InafSkaRf => inaf_rf::is_lowpass(code),
            VariantTag::NewSkaOptical => false,
        }
    }

    /// Pass RF through to the receiver, i.e. disable the 50 Ω termination.
    pub fn rf_on(self, code: u8) -> u8 {
        if self.capabilities().contains(Capabilities::TERMINATION) {
            optical::rf_on(code)
        } else {
            code
        }
    }

    /// Terminate the receiver's input.
    pub fn rf_off(self, code: u8) -> u8 {
        if self.capabilities().contains(Capabilities::TERMINATION) {
            optical::rf_off(code)
        } else {
            code
        }
    }

    pub fn is_terminated(self, code: u8) -> bool {
        self.capabilities().contains(Capabilities::TERMINATION) && optical::is_terminated(code)
    }
}
