// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests to ensure there is no stderr output for successful commands.

use tempfile::TempDir;

use crate::{get_cmd_output, get_zeroed_registers, preadu};

#[test]
fn test_configure_no_stderr() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let registers = get_zeroed_registers(tmp_dir.path(), "registers.json");

    #[rustfmt::skip]
    let cmd = preadu()
        .args([
            "-vv",
            "configure",
            "--board", "aavs3",
            "--registers", &registers.display().to_string(),
            "--attenuation", "40",
        ])
        .ok();
    assert!(cmd.is_ok(), "configure failed: {}", cmd.err().unwrap());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
}

#[test]
fn test_show_no_stderr() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let registers = get_zeroed_registers(tmp_dir.path(), "registers.toml");

    #[rustfmt::skip]
    let cmd = preadu()
        .args([
            "show",
            "--board", "rf",
            "--registers", &registers.display().to_string(),
        ])
        .ok();
    assert!(cmd.is_ok(), "show failed: {}", cmd.err().unwrap());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
}
