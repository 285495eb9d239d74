// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

use super::DUMP_FILE_TYPES_COMMA_SEPARATED;

#[derive(Error, Debug)]
pub enum RegisterDumpError {
    #[error("Register dump '{0}' doesn't have a recognised file extension! Valid extensions are: {types}", types = *DUMP_FILE_TYPES_COMMA_SEPARATED)]
    UnrecognisedExtension(String),

    #[error("Couldn't decode toml structure from '{file}': {err}")]
    TomlDecode { file: String, err: toml::de::Error },

    #[error("Couldn't decode json structure from '{file}': {err}")]
    JsonDecode {
        file: String,
        err: serde_json::Error,
    },

    #[error(transparent)]
    TomlEncode(#[from] toml::ser::Error),

    #[error(transparent)]
    JsonEncode(#[from] serde_json::Error),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
