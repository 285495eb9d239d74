// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::{collections::HashSet, str::FromStr};

use super::*;

fn record(logical_index: usize, preadu_id: SubBoard) -> RoutingRecord {
    RoutingRecord {
        logical_index,
        polarisation: format!("RF-{}", logical_index % 2 + 1),
        fibre_input: (logical_index / 2 + 1).to_string(),
        preadu_id,
        channel_filter: logical_index as u8,
    }
}

#[test]
fn test_shipped_permutations_are_bijections() {
    for flavour in BoardFlavour::iter() {
        let perm = flavour.spi_permutation();
        let unique: HashSet<usize> = perm.iter().copied().collect();
        assert_eq!(unique.len(), NUM_RX, "{flavour} has duplicate slots");
        assert!(perm.iter().all(|&s| s < NUM_RX), "{flavour} has out-of-range slots");
        assert!(PreAduBoard::new(flavour).is_ok());
    }
}

#[test]
fn test_bad_permutations_are_rejected() {
    let mut perm = BoardFlavour::Aavs1.spi_permutation();
    perm[5] = perm[6];
    assert_eq!(
        PreAduBoard::with_permutation(BoardFlavour::Aavs1, perm).unwrap_err(),
        BoardError::DuplicateSlot {
            slot: perm[6],
            first: 5,
            second: 6
        }
    );

    let mut perm = BoardFlavour::Rf.spi_permutation();
    perm[31] = 32;
    assert_eq!(
        PreAduBoard::with_permutation(BoardFlavour::Rf, perm).unwrap_err(),
        BoardError::SlotOutOfRange {
            logical: 31,
            slot: 32
        }
    );

    let identity: [usize; NUM_RX] = std::array::from_fn(|i| i);
    assert!(PreAduBoard::with_permutation(BoardFlavour::Rf, identity).is_ok());
}

#[test]
fn test_broadcast_attenuation_reads_back_on_every_channel() {
    for flavour in BoardFlavour::iter() {
        let mut board = PreAduBoard::new(flavour).unwrap();
        for db in [0, 1, 13, 21, 31] {
            board.set_all_rx_attenuation(db);
            for i in 0..NUM_RX {
                assert_eq!(
                    board.get_rx_attenuation(i).unwrap(),
                    db as u8,
                    "{flavour} receiver {i}"
                );
            }
        }
    }
}

#[test]
fn test_broadcast_can_produce_different_bytes_per_variant() {
    let mut board = PreAduBoard::new(BoardFlavour::Rf).unwrap();
    board.set_all_rx_attenuation(21);
    assert!(board.registers_by_slot().iter().all(|&r| r == 0xC8));

    let mut board = PreAduBoard::new(BoardFlavour::Aavs1).unwrap();
    board.set_all_rx_attenuation(21);
    assert!(board.registers_by_slot().iter().all(|&r| r == 21 << 3));
}

#[test]
fn test_logical_index_reaches_the_right_slot() {
    let mut board = PreAduBoard::new(BoardFlavour::Aavs1).unwrap();
    board.set_rx_attenuation(0, 31).unwrap();
    board.rx_rf_on(0).unwrap();

    // Logical 0 is BOTTOM chain position 14.
    assert_eq!(board.slot(0).unwrap(), 30);
    let bottom = board.sub_board_block(SubBoard::Bottom);
    assert_eq!(bottom[14], 0xF9);
    assert_eq!(bottom.iter().filter(|&&r| r != 0).count(), 1);
    assert!(board.sub_board_block(SubBoard::Top).iter().all(|&r| r == 0));

    // Logical 16 is TOP chain position 1.
    board.set_register_value(16, 0xAB).unwrap();
    assert_eq!(board.sub_board_block(SubBoard::Top)[1], 0xAB);
    assert_eq!(board.get_register_value(16).unwrap(), 0xAB);

    let report = board.channel_report(0).unwrap();
    assert_eq!(report.sub_board, SubBoard::Bottom);
    assert_eq!(report.chain_position, 14);
    assert_eq!(report.attenuation, Some(31));
    assert_eq!(report.terminated, Some(false));
    assert_eq!(report.filter, Some((false, false)));
}

#[test]
fn test_receivers_know_their_logical_index() {
    for flavour in BoardFlavour::iter() {
        let board = PreAduBoard::new(flavour).unwrap();
        for (i, rx) in board.receivers().enumerate() {
            assert_eq!(rx.logical_index(), i);
            assert_eq!(rx.wiring().adu_input, i);
            let (sub_board, _) = SubBoard::locate(board.slot(i).unwrap());
            assert_eq!(rx.wiring().preadu_id, sub_board);
        }
    }
}

#[test]
fn test_sadino_mixes_variants() {
    let board = PreAduBoard::new(BoardFlavour::Sadino).unwrap();
    // Logical 0 is on BOTTOM, logical 16 is on TOP.
    assert_eq!(board.receiver(0).unwrap().variant(), VariantTag::AavsOptical);
    assert_eq!(board.receiver(16).unwrap().variant(), VariantTag::NewSkaOptical);
    assert_eq!(board.capabilities(), Capabilities::ALL);

    let mut board = board;
    board.set_all_rx_filter(FilterBand::LowPass);
    assert!(board.is_rx_lowpass(0).unwrap());
    assert!(!board.is_rx_lowpass(16).unwrap());
    assert_eq!(board.channel_report(16).unwrap().filter, None);
}

#[test]
fn test_termination_and_filters_by_index() {
    let mut board = PreAduBoard::new(BoardFlavour::Rf).unwrap();
    board.all_rx_rf_on();
    board.rx_rf_off(3).unwrap();
    for i in 0..NUM_RX {
        assert_eq!(board.is_rx_terminated(i).unwrap(), i == 3);
    }
    board.all_rx_rf_off();
    assert!((0..NUM_RX).all(|i| board.is_rx_terminated(i).unwrap()));

    board.set_rx_highpass(4).unwrap();
    assert!(board.is_rx_highpass(4).unwrap());
    board.set_rx_lowpass(4).unwrap();
    assert!(board.is_rx_lowpass(4).unwrap());
    assert!(!board.is_rx_highpass(4).unwrap());
    board.set_rx_filter(4, FilterBand::HighPass).unwrap();
    assert!(board.is_rx_highpass(4).unwrap());
}

#[test]
fn test_invalid_index() {
    let mut board = PreAduBoard::new(BoardFlavour::Aavs3).unwrap();
    assert_eq!(
        board.set_rx_attenuation(32, 1),
        Err(BoardError::InvalidRxIndex(32))
    );
    assert_eq!(board.get_rx_attenuation(99), Err(BoardError::InvalidRxIndex(99)));
    assert!(board.channel_report(32).is_err());
}

#[test]
fn test_apply_routing() {
    let records: Vec<RoutingRecord> = (0..NUM_RX)
        .map(|i| {
            let sub_board = SubBoard::locate(BoardFlavour::Rf.spi_permutation()[i]).0;
            record(i, sub_board)
        })
        .collect();
    let board = PreAduBoard::from_routing(BoardFlavour::Rf, &records).unwrap();
    let wiring = board.get_wiring(5).unwrap();
    assert_eq!(wiring.polarisation, "RF-2");
    assert_eq!(wiring.fibre_input, "3");
    assert_eq!(wiring.channel_filter, 5);
    assert_eq!(wiring.adu_input, 5);
    assert_eq!(wiring.preadu_id, SubBoard::Top);
}

#[test]
fn test_apply_routing_returns_sub_board_mismatches() {
    let mut board = PreAduBoard::new(BoardFlavour::Aavs1).unwrap();
    // Logical 0 is on BOTTOM and logical 16 is on TOP for this flavour.
    assert_eq!(SubBoard::locate(board.spi_permutation()[0]).0, SubBoard::Bottom);
    assert_eq!(SubBoard::locate(board.spi_permutation()[16]).0, SubBoard::Top);

    let mismatches = board
        .apply_routing(&[record(0, SubBoard::Top), record(16, SubBoard::Top)])
        .unwrap();
    assert_eq!(
        mismatches,
        vec![RoutingMismatch {
            logical_index: 0,
            signal_map: SubBoard::Top,
            board: SubBoard::Bottom,
        }]
    );
    // The mismatched record was still applied.
    assert_eq!(board.get_wiring(0).unwrap().preadu_id, SubBoard::Top);

    let mismatches = board.apply_routing(&[record(16, SubBoard::Top)]).unwrap();
    assert!(mismatches.is_empty());
}

#[test]
fn test_apply_routing_rejects_bad_records() {
    let mut board = PreAduBoard::new(BoardFlavour::Aavs1).unwrap();
    let before = board.get_wiring(1).unwrap().clone();

    let result = board.apply_routing(&[record(1, SubBoard::Bottom), record(32, SubBoard::Top)]);
    assert_eq!(result, Err(BoardError::RoutingIndexOutOfRange(32)));
    // Nothing was applied.
    assert_eq!(board.get_wiring(1).unwrap(), &before);

    let result = board.apply_routing(&[record(2, SubBoard::Bottom), record(2, SubBoard::Bottom)]);
    assert_eq!(result, Err(BoardError::DuplicateRoutingIndex(2)));
}

#[test]
fn test_register_blocks_round_trip() {
    let mut board = PreAduBoard::new(BoardFlavour::Sadino).unwrap();
    let top: [u8; RX_PER_SUB_BOARD] = std::array::from_fn(|i| i as u8);
    let bottom: [u8; RX_PER_SUB_BOARD] = std::array::from_fn(|i| 0x80 | i as u8);
    board.load_sub_board_block(SubBoard::Top, &top);
    board.load_sub_board_block(SubBoard::Bottom, &bottom);
    assert_eq!(board.sub_board_block(SubBoard::Top), top);
    assert_eq!(board.sub_board_block(SubBoard::Bottom), bottom);

    let by_slot = board.registers_by_slot();
    assert_eq!(by_slot[..16], top);
    assert_eq!(by_slot[16..], bottom);

    let mut other = PreAduBoard::new(BoardFlavour::Sadino).unwrap();
    other.load_registers_by_slot(&by_slot);
    assert_eq!(other.registers_by_slot(), by_slot);
    // Logical 0 is BOTTOM chain position 14.
    assert_eq!(other.get_register_value(0).unwrap(), 0x80 | 14);
}

#[test]
fn test_sub_boards() {
    assert_eq!(SubBoard::Top.id(), 0);
    assert_eq!(SubBoard::Bottom.id(), 1);
    assert_eq!(SubBoard::from_id(1), Some(SubBoard::Bottom));
    assert_eq!(SubBoard::from_id(2), None);
    assert_eq!(SubBoard::Bottom.slots(), 16..32);
    assert_eq!(SubBoard::locate(17), (SubBoard::Bottom, 1));
    assert_eq!(SubBoard::Top.to_string(), "TOP");
}

#[test]
fn test_flavour_names() {
    assert_eq!(BoardFlavour::from_str("preAduAAVS3"), Ok(BoardFlavour::Aavs3));
    assert_eq!(BoardFlavour::from_str("preaduaavs1"), Ok(BoardFlavour::Aavs1));
    assert_eq!(BoardFlavour::from_str("sadino"), Ok(BoardFlavour::Sadino));
    assert_eq!(BoardFlavour::Rf.to_string(), "preAduRf");
}
