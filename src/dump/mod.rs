// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Register dumps: snapshots of both sub-boards' register blocks, stored as
//! toml or json.
//!
//! A dump file can stand in for hardware (see [`RegisterDumpFile`]), which is
//! how the `preadu` binary edits saved configurations.

mod error;

pub use error::RegisterDumpError;

use std::{
    fs::File,
    io::{BufWriter, Read, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

use itertools::Itertools;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use tempfile::NamedTempFile;

use crate::{
    board::{PreAduBoard, SubBoard},
    constants::RX_PER_SUB_BOARD,
    controller::RegisterAccess,
};

#[derive(Debug, Display, EnumIter, EnumString)]
pub(crate) enum DumpFileType {
    #[strum(serialize = "toml")]
    Toml,
    #[strum(serialize = "json")]
    Json,
}

lazy_static::lazy_static! {
    pub(crate) static ref DUMP_FILE_TYPES_COMMA_SEPARATED: String = DumpFileType::iter().join(", ");
}

impl DumpFileType {
    fn from_path(file: &Path) -> Result<DumpFileType, RegisterDumpError> {
        file.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .and_then(|e| DumpFileType::from_str(&e).ok())
            .ok_or_else(|| RegisterDumpError::UnrecognisedExtension(file.display().to_string()))
    }
}

/// Both sub-boards' registers, each block in SPI chain order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterDump {
    pub top: [u8; RX_PER_SUB_BOARD],
    pub bottom: [u8; RX_PER_SUB_BOARD],
}

impl RegisterDump {
    pub fn from_board(board: &PreAduBoard) -> RegisterDump {
        RegisterDump {
            top: board.sub_board_block(SubBoard::Top),
            bottom: board.sub_board_block(SubBoard::Bottom),
        }
    }

    pub fn block(&self, sub_board: SubBoard) -> &[u8; RX_PER_SUB_BOARD] {
        match sub_board {
            SubBoard::Top => &self.top,
            SubBoard::Bottom => &self.bottom,
        }
    }

    pub fn block_mut(&mut self, sub_board: SubBoard) -> &mut [u8; RX_PER_SUB_BOARD] {
        match sub_board {
            SubBoard::Top => &mut self.top,
            SubBoard::Bottom => &mut self.bottom,
        }
    }

    /// Read a dump; the file type is determined by the extension.
    pub fn read_file<P: AsRef<Path>>(file: P) -> Result<RegisterDump, RegisterDumpError> {
        let file = file.as_ref();
        let file_type = DumpFileType::from_path(file)?;
        trace!("Reading register dump {} as {file_type}", file.display());

        let mut contents = String::new();
        File::open(file)?.read_to_string(&mut contents)?;
        let dump = match file_type {
            DumpFileType::Toml => {
                toml::from_str(&contents).map_err(|err| RegisterDumpError::TomlDecode {
                    file: file.display().to_string(),
                    err,
                })?
            }
            DumpFileType::Json => {
                serde_json::from_str(&contents).map_err(|err| RegisterDumpError::JsonDecode {
                    file: file.display().to_string(),
                    err,
                })?
            }
        };
        Ok(dump)
    }

    /// Write a dump; the file type is determined by the extension.
    pub fn write_file<P: AsRef<Path>>(&self, file: P) -> Result<(), RegisterDumpError> {
        let file = file.as_ref();
        let file_type = DumpFileType::from_path(file)?;
        trace!("Writing register dump {} as {file_type}", file.display());

        let contents = match file_type {
            DumpFileType::Toml => toml::to_string(self)?,
            DumpFileType::Json => serde_json::to_string_pretty(self)?,
        };
        // A failed write must not leave a truncated dump.
        let dir = match file.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let tmp = NamedTempFile::new_in(dir)?;
        let mut f = BufWriter::new(tmp);
        f.write_all(contents.as_bytes())?;
        let tmp = f.into_inner().map_err(|e| e.into_error())?;
        tmp.as_file().sync_all()?;
        tmp.persist(file).map_err(|e| e.error)?;
        Ok(())
    }
}

/// A register dump file used in place of hardware. Every block access goes to
/// the file, so other writers are seen.
#[derive(Debug, Clone)]
pub struct RegisterDumpFile {
    path: PathBuf,
}

impl RegisterDumpFile {
    /// The file must already exist and be readable as a dump.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<RegisterDumpFile, RegisterDumpError> {
        let path = path.as_ref().to_path_buf();
        RegisterDump::read_file(&path)?;
        debug!("Using {} as register storage", path.display());
        Ok(RegisterDumpFile { path })
    }

    /// Make a new dump file holding the given registers.
    pub fn create<P: AsRef<Path>>(
        path: P,
        dump: &RegisterDump,
    ) -> Result<RegisterDumpFile, RegisterDumpError> {
        let path = path.as_ref().to_path_buf();
        dump.write_file(&path)?;
        Ok(RegisterDumpFile { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RegisterAccess for RegisterDumpFile {
    type Error = RegisterDumpError;

    fn read_register_block(
        &mut self,
        sub_board: SubBoard,
    ) -> Result<[u8; RX_PER_SUB_BOARD], RegisterDumpError> {
        Ok(*RegisterDump::read_file(&self.path)?.block(sub_board))
    }

    fn write_register_block(
        &mut self,
        sub_board: SubBoard,
        block: &[u8; RX_PER_SUB_BOARD],
    ) -> Result<(), RegisterDumpError> {
        let mut dump = RegisterDump::read_file(&self.path)?;
        *dump.block_mut(sub_board) = *block;
        dump.write_file(&self.path)
    }
}
