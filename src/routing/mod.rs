// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parsing of signal maps, which say which fibre input and polarisation feeds
//! each logical receiver.
//!
//! One record per line, comma separated:
//!
//! ```text
//! # logical index, polarisation, fibre input, preadu id, channel filter
//! 1,RF-2,3,0,5
//! ```
//!
//! Lines starting with `#` or a space are ignored, as is any line that doesn't
//! split into more than 2 fields.

mod error;

pub use error::SignalMapError;

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use log::{debug, trace, warn};

use crate::{board::SubBoard, receiver::RxWiring};

const NUM_FIELDS: usize = 5;

/// One line of a signal map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingRecord {
    pub logical_index: usize,
    pub polarisation: String,
    pub fibre_input: String,
    pub preadu_id: SubBoard,
    pub channel_filter: u8,
}

impl RoutingRecord {
    pub(crate) fn to_wiring(&self) -> RxWiring {
        RxWiring {
            preadu_id: self.preadu_id,
            channel_filter: self.channel_filter,
            polarisation: self.polarisation.clone(),
            fibre_input: self.fibre_input.clone(),
            adu_input: self.logical_index,
        }
    }
}

/// Parse a buffer containing a signal map.
pub fn parse_signal_map<T: BufRead>(buf: &mut T) -> Result<Vec<RoutingRecord>, SignalMapError> {
    let mut records = vec![];
    let mut line = String::new();
    let mut line_num: u32 = 0;

    let parse_int = |string: &str,
                     field: &'static str,
                     line_num: u32|
     -> Result<u64, SignalMapError> {
        string.parse().map_err(|_| SignalMapError::ParseInt {
            line_num,
            field,
            string: string.to_string(),
        })
    };

    while buf.read_line(&mut line)? > 0 {
        line_num += 1;

        if line.starts_with('#') || line.starts_with(' ') {
            line.clear();
            continue;
        }

        let fields: Vec<&str> = line
            .trim_end_matches(['\r', '\n'])
            .split(',')
            .map(str::trim)
            .collect();
        if fields.len() <= 2 {
            trace!("Signal map line {line_num}: skipping");
            line.clear();
            continue;
        }
        if fields.len() < NUM_FIELDS {
            return Err(SignalMapError::Incomplete {
                line_num,
                found: fields.len(),
            });
        }
        if fields.len() > NUM_FIELDS {
            warn!(
                "Signal map line {line_num}: Ignoring {} trailing field(s)",
                fields.len() - NUM_FIELDS
            );
        }

        let too_big = |field: &'static str, string: &str| SignalMapError::ParseInt {
            line_num,
            field,
            string: string.to_string(),
        };
        let logical_index = usize::try_from(parse_int(fields[0], "logical index", line_num)?)
            .map_err(|_| too_big("logical index", fields[0]))?;
        let preadu_id = u8::try_from(parse_int(fields[3], "preadu id", line_num)?)
            .map_err(|_| too_big("preadu id", fields[3]))?;
        let preadu_id = SubBoard::from_id(preadu_id).ok_or(SignalMapError::InvalidPreaduId {
            line_num,
            id: preadu_id,
        })?;
        let channel_filter = u8::try_from(parse_int(fields[4], "channel filter", line_num)?)
            .map_err(|_| too_big("channel filter", fields[4]))?;

        records.push(RoutingRecord {
            logical_index,
            polarisation: fields[1].to_string(),
            fibre_input: fields[2].to_string(),
            preadu_id,
            channel_filter,
        });
        line.clear();
    }

    debug!("Read {} signal map records", records.len());
    Ok(records)
}

/// Read a signal map from a file.
pub fn read_signal_map_file<P: AsRef<Path>>(
    file: P,
) -> Result<Vec<RoutingRecord>, SignalMapError> {
    let file = file.as_ref();
    debug!("Reading signal map {}", file.display());
    let mut buf = BufReader::new(File::open(file)?);
    parse_signal_map(&mut buf)
}
