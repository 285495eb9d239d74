// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fs;

use indoc::indoc;
use tempfile::TempDir;

use super::*;

#[test]
fn test_parse_board_flavour() {
    assert!(matches!(parse_board_flavour(None), Err(BoardArgsError::NoBoard)));
    assert_eq!(parse_board_flavour(Some("AAVS1")).unwrap(), BoardFlavour::Aavs1);
    assert_eq!(
        parse_board_flavour(Some("preAduSadino")).unwrap(),
        BoardFlavour::Sadino
    );
    assert!(matches!(
        parse_board_flavour(Some("aavs2")),
        Err(BoardArgsError::InvalidBoard(b)) if b == "aavs2"
    ));
}

#[test]
fn test_merge_board_args() {
    let cli = BoardArgs {
        board: Some("rf".to_string()),
        registers: None,
        signal_map: None,
    };
    let file = BoardArgs {
        board: Some("aavs3".to_string()),
        registers: Some(PathBuf::from("registers.toml")),
        signal_map: None,
    };
    let merged = cli.merge(file);
    assert_eq!(merged.board.as_deref(), Some("rf"));
    assert_eq!(merged.registers, Some(PathBuf::from("registers.toml")));
}

#[test]
fn test_board_args_with_signal_map() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let signal_map = tmp_dir.path().join("signal_map.txt");
    fs::write(
        &signal_map,
        indoc! {"
            # index, pol, fibre, preadu, filter
            0,X,1,1,14
            1,Y,1,1,15
            16,X,9,0,1
        "},
    )
    .unwrap();

    let params = BoardArgs {
        board: Some("aavs1".to_string()),
        registers: Some(tmp_dir.path().join("registers.json")),
        signal_map: Some(signal_map),
    }
    .parse()
    .unwrap();
    assert_eq!(params.board.flavour(), BoardFlavour::Aavs1);
    assert_eq!(params.board.get_wiring(1).unwrap().polarisation, "Y");
    assert_eq!(params.board.get_wiring(16).unwrap().fibre_input, "9");
    assert_eq!(params.registers, tmp_dir.path().join("registers.json"));
}

#[test]
fn test_board_args_with_bad_signal_map() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let signal_map = tmp_dir.path().join("signal_map.txt");
    fs::write(&signal_map, "0,X,1,1,14\n40,X,2,1,14\n").unwrap();

    let result = BoardArgs {
        board: Some("aavs1".to_string()),
        registers: Some(tmp_dir.path().join("registers.json")),
        signal_map: Some(signal_map.clone()),
    }
    .parse();
    assert!(matches!(result, Err(PreAduError::SignalMap(_))));

    fs::write(&signal_map, "0,X,1\n").unwrap();
    let result = BoardArgs {
        board: Some("aavs1".to_string()),
        registers: Some(tmp_dir.path().join("registers.json")),
        signal_map: Some(signal_map),
    }
    .parse();
    assert!(matches!(result, Err(PreAduError::SignalMap(_))));
}
