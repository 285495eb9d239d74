// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use clap::Parser;
use log::debug;
use thiserror::Error;

use super::common::{InfoPrinter, VARIANT_HELP};
use crate::{
    codec::{Capabilities, VariantTag, VARIANT_TAGS_COMMA_SEPARATED},
    PreAduError,
};

#[derive(Error, Debug)]
pub(super) enum DecodeArgsError {
    #[error("'{0}' is not a receiver revision; supported revisions: {revs}", revs = *VARIANT_TAGS_COMMA_SEPARATED)]
    InvalidVariant(String),

    #[error("Couldn't parse '{0}' as a register byte; expected 0 to 255, e.g. 200, 0xC8 or 0b11001000")]
    InvalidByte(String),
}

/// Explain what a single receiver register holds.
#[derive(Parser, Debug, Clone)]
pub(super) struct DecodeArgs {
    #[clap(long, help = VARIANT_HELP.as_str())]
    pub(super) variant: String,

    /// The register value. Decimal, hexadecimal (0x prefix) and binary (0b
    /// prefix) are accepted.
    #[clap(name = "BYTE")]
    pub(super) byte: String,
}

impl DecodeArgs {
    pub(super) fn run(self) -> Result<(), PreAduError> {
        let variant = VariantTag::from_str(&self.variant)
            .map_err(|_| DecodeArgsError::InvalidVariant(self.variant.clone()))?;
        let code = parse_register_byte(&self.byte)?;
        describe_register(variant, code).display();
        Ok(())
    }
}

pub(super) fn parse_register_byte(s: &str) -> Result<u8, DecodeArgsError> {
    let trimmed = s.trim();
    let lower = trimmed.to_lowercase();
    let result = if let Some(hex) = lower.strip_prefix("0x") {
        u8::from_str_radix(hex, 16)
    } else if let Some(bin) = lower.strip_prefix("0b") {
        u8::from_str_radix(&bin.replace('_', ""), 2)
    } else {
        trimmed.parse()
    };
    debug!("Parsed register byte '{s}' as {result:?}");
    result.map_err(|_| DecodeArgsError::InvalidByte(s.to_string()))
}

fn describe_register(variant: VariantTag, code: u8) -> InfoPrinter {
    let caps = variant.capabilities();
    let mut printer = InfoPrinter::new(format!("{variant} register 0x{code:02X} (0b{code:08b})").into());
    printer.push_line(format!("Capabilities: {caps}").into());

    let attenuation = if caps.contains(Capabilities::ATTENUATION) {
        format!("Attenuation: {} dB", variant.attenuation_decode(code))
    } else {
        "Attenuation: not supported".to_string()
    };
    let filter = if caps.contains(Capabilities::FILTER) {
        let band = match (variant.is_highpass(code), variant.is_lowpass(code)) {
            (true, false) => "high-pass",
            (false, true) => "low-pass",
            (true, true) => "both selected",
            (false, false) => "none selected",
        };
        format!("Filter: {band}")
    } else {
        "Filter: not supported".to_string()
    };
    let rf = if caps.contains(Capabilities::TERMINATION) {
        if variant.is_terminated(code) {
            "RF: off (terminated)"
        } else {
            "RF: on"
        }
    } else {
        "RF: not supported"
    };
    printer.push_block(vec![attenuation.into(), filter.into(), rf.into()]);

    let unowned = code & !variant.owned_bits(Capabilities::ALL);
    if unowned != 0 {
        printer.push_line(format!("Unused bits set: 0b{unowned:08b}").into());
    }
    printer
}
