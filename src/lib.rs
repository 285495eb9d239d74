// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Register codec and configuration tooling for the PreADU receiver boards of
SKA-Low/AAVS stations.

Each TPM carries two PreADU sub-boards (TOP and BOTTOM) with a 16-receiver SPI
chain each. A receiver's whole state is one 8-bit register, but the meaning of
its bits depends on the receiver revision, and logical receiver indices don't
match the physical chain order. This crate hides both of those details:

- [`codec`] encodes and decodes register fields per receiver revision;
- [`PreAduBoard`] owns 32 receivers and maps logical indices to physical slots;
- [`routing`] reads signal maps describing antenna wiring;
- [`RoundTripController`] reads, edits and writes registers through any
  [`RegisterAccess`] implementation, e.g. a [`RegisterDumpFile`].
 */

pub mod board;
mod cli;
pub mod codec;
pub mod constants;
pub mod controller;
pub mod dump;
pub mod receiver;
pub mod routing;

// Re-exports.
pub use board::{BoardError, BoardFlavour, ChannelReport, PreAduBoard, RoutingMismatch, SubBoard};
pub use cli::{PreAdu, PreAduError};
pub use codec::{Capabilities, VariantTag};
pub use controller::{RegisterAccess, RoundTripController, RoundTripError, SyncState};
pub use dump::{RegisterDump, RegisterDumpError, RegisterDumpFile};
pub use receiver::{FilterBand, Receiver, RxWiring};
pub use routing::{parse_signal_map, read_signal_map_file, RoutingRecord, SignalMapError};
