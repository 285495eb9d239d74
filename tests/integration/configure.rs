// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fs;

use indoc::indoc;
use tempfile::TempDir;

use preadu::RegisterDump;

use crate::{get_aavs_signal_map, get_cmd_output, get_zeroed_registers, preadu};

#[test]
fn test_configure_writes_registers() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let registers = get_zeroed_registers(tmp_dir.path(), "registers.toml");
    let signal_map = get_aavs_signal_map(tmp_dir.path());

    #[rustfmt::skip]
    let cmd = preadu()
        .args([
            "configure",
            "--board", "aavs1",
            "--registers", &registers.display().to_string(),
            "--signal-map", &signal_map.display().to_string(),
            "--attenuation", "21",
            "--filter", "lo",
            "--rf", "on",
        ])
        .ok();
    assert!(cmd.is_ok(), "configure failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("21dB"), "{stdout}");

    // 21 dB, low-pass and RF on.
    let dump = RegisterDump::read_file(&registers).unwrap();
    let expected = (21 << 3) | 0b100 | 1;
    assert!(dump.top.iter().chain(dump.bottom.iter()).all(|&r| r == expected));
}

#[test]
fn test_configure_dry_run() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let registers = get_zeroed_registers(tmp_dir.path(), "registers.json");

    #[rustfmt::skip]
    let cmd = preadu()
        .args([
            "configure",
            "--dry-run",
            "--board", "rf",
            "--registers", &registers.display().to_string(),
            "--attenuation", "21",
        ])
        .ok();
    assert!(cmd.is_ok(), "configure failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("C8 C8"), "{stdout}");
    assert_eq!(RegisterDump::read_file(&registers).unwrap(), RegisterDump::default());
}

#[test]
fn test_configure_with_arguments_file_and_save_toml() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let registers = get_zeroed_registers(tmp_dir.path(), "registers.json");
    let arg_file = tmp_dir.path().join("args.toml");
    fs::write(
        &arg_file,
        format!(
            indoc! {r#"
                attenuation = 3
                channels = [16]

                [board]
                board = "sadino"
                registers = "{}"
            "#},
            registers.display()
        ),
    )
    .unwrap();
    let saved = tmp_dir.path().join("saved.toml");

    #[rustfmt::skip]
    let cmd = preadu()
        .args([
            "configure", &arg_file.display().to_string(),
            "--attenuation", "4",
            "--save-toml", &saved.display().to_string(),
        ])
        .ok();
    assert!(cmd.is_ok(), "configure failed: {}", cmd.err().unwrap());

    // Logical 16 is TOP chain position 1; the CLI attenuation wins.
    let dump = RegisterDump::read_file(&registers).unwrap();
    assert_eq!(dump.top[1], 4 << 3);
    assert_eq!(dump.top.iter().filter(|&&r| r != 0).count(), 1);
    assert!(dump.bottom.iter().all(|&r| r == 0));

    let saved = fs::read_to_string(saved).unwrap();
    assert!(saved.contains("attenuation = 4"), "{saved}");
    assert!(saved.contains("sadino"), "{saved}");
}

#[test]
fn test_configure_errors_exit_nonzero() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let registers = get_zeroed_registers(tmp_dir.path(), "registers.json");
    let bad_map = tmp_dir.path().join("bad_map.txt");
    fs::write(&bad_map, "0,X,1\n").unwrap();

    #[rustfmt::skip]
    let cmd = preadu()
        .args([
            "configure",
            "--board", "aavs1",
            "--registers", &registers.display().to_string(),
            "--signal-map", &bad_map.display().to_string(),
            "--attenuation", "1",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.starts_with("Error: "), "{stderr}");
    assert!(stderr.contains("line 1"), "{stderr}");

    #[rustfmt::skip]
    let cmd = preadu()
        .args([
            "configure",
            "--board", "aavs2",
            "--registers", &registers.display().to_string(),
            "--attenuation", "1",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("preAduAAVS1"), "{stderr}");

    assert_eq!(RegisterDump::read_file(&registers).unwrap(), RegisterDump::default());
}
