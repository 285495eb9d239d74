// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests.
//!
//! Some help for laying out these tests was taken from:
//! https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html

mod configure;
mod inspect;
mod no_stderr;

use std::{
    path::{Path, PathBuf},
    process::Output,
    str::from_utf8,
};

use assert_cmd::{output::OutputError, Command};

use preadu::RegisterDump;

fn preadu() -> Command {
    Command::cargo_bin("preadu").unwrap()
}

fn get_cmd_output(result: Result<Output, OutputError>) -> (String, String) {
    let output = match result {
        Ok(o) => o,
        Err(o) => o.as_output().unwrap().clone(),
    };
    (
        from_utf8(&output.stdout).unwrap().to_string(),
        from_utf8(&output.stderr).unwrap().to_string(),
    )
}

/// Write a register dump with every register zeroed.
fn get_zeroed_registers(tmp_dir: &Path, file_name: &str) -> PathBuf {
    let file = tmp_dir.join(file_name);
    RegisterDump::default().write_file(&file).unwrap();
    file
}

/// An AAVS signal map covering every receiver. Logical receivers 0-15 are on
/// BOTTOM.
fn get_aavs_signal_map(tmp_dir: &Path) -> PathBuf {
    let file = tmp_dir.join("signal_map.txt");
    let mut contents = String::from("# index, pol, fibre, preadu, filter\n");
    for i in 0..32 {
        let pol = if i % 2 == 0 { "X" } else { "Y" };
        let preadu_id = if i < 16 { 1 } else { 0 };
        contents.push_str(&format!("{i},{pol},{},{preadu_id},{}\n", i / 2 + 1, i % 16));
    }
    std::fs::write(&file, contents).unwrap();
    file
}
