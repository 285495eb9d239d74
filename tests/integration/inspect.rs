// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests of the read-only subcommands.

use tempfile::TempDir;

use preadu::{RegisterDump, SubBoard};

use crate::{get_aavs_signal_map, get_cmd_output, preadu};

#[test]
fn test_show() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let registers = tmp_dir.path().join("registers.json");
    let mut dump = RegisterDump::default();
    // Logical 0 is BOTTOM chain position 14: 31 dB, RF on.
    dump.block_mut(SubBoard::Bottom)[14] = 0xF9;
    dump.write_file(&registers).unwrap();
    let signal_map = get_aavs_signal_map(tmp_dir.path());

    #[rustfmt::skip]
    let cmd = preadu()
        .args([
            "show",
            "--board", "aavs1",
            "--registers", &registers.display().to_string(),
            "--signal-map", &signal_map.display().to_string(),
        ])
        .ok();
    assert!(cmd.is_ok(), "show failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    let row = stdout
        .lines()
        .find(|l| l.contains("0xF9"))
        .expect("no row for the configured receiver");
    assert!(row.contains("BOTTOM"), "{row}");
    assert!(row.contains("31dB"), "{row}");
    assert!(row.contains(" on "), "{row}");

    // Nothing was written.
    assert_eq!(RegisterDump::read_file(&registers).unwrap(), dump);
}

#[test]
fn test_show_needs_registers() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let registers = tmp_dir.path().join("missing.json");

    #[rustfmt::skip]
    let cmd = preadu()
        .args([
            "show",
            "--board", "aavs1",
            "--registers", &registers.display().to_string(),
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.starts_with("Error: "), "{stderr}");
}

#[test]
fn test_decode() {
    let cmd = preadu()
        .args(["decode", "--variant", "inaf-ska-rf", "0xC8"])
        .ok();
    assert!(cmd.is_ok(), "decode failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Attenuation: 21 dB"), "{stdout}");
    assert!(stdout.contains("RF: off (terminated)"), "{stdout}");

    let cmd = preadu()
        .args(["decode", "--variant", "new-ska-optical", "0b11111111"])
        .ok();
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Attenuation: 31 dB"), "{stdout}");
    assert!(stdout.contains("Filter: not supported"), "{stdout}");
    assert!(stdout.contains("Unused bits set: 0b00000111"), "{stdout}");

    let cmd = preadu().args(["decode", "--variant", "rf", "0x1FF"]).ok();
    assert!(cmd.is_err());
}

#[test]
fn test_board_layout() {
    let cmd = preadu().args(["board-layout", "--board", "sadino"]).ok();
    assert!(cmd.is_ok(), "board-layout failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("preAduSadino layout"), "{stdout}");
    assert!(stdout.contains("TOP chain: 17 16 19 18"), "{stdout}");
    assert!(stdout.contains("BOTTOM chain: 14 15 12 13"), "{stdout}");
    assert!(stdout.contains("new-ska-optical"), "{stdout}");
    assert!(stdout.contains("aavs-optical"), "{stdout}");
}
