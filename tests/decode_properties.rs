//! Property-based tests for the throttle and stick decoders.
//!
//! Any report of at least 13 bytes decodes; shorter ones fail; decoding never
//! touches the input and is deterministic; single-bit fields track the wire bits.

use hotas_relay::bits::read_bit;
use hotas_relay::{DecodeError, Hat, Mode, StickState, ThrottleState, REPORT_LEN};
use proptest::prelude::*;

fn report() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(any::<u8>(), REPORT_LEN..=64)
}

fn any_mode() -> impl Strategy<Value = Option<Mode>> {
    prop_oneof![
        Just(None),
        Just(Some(Mode::M1)),
        Just(Some(Mode::M2)),
        Just(Some(Mode::S1)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn throttle_decodes_every_full_report(data in report(), prior in any_mode()) {
        let previous = ThrottleState { mode: prior, ..ThrottleState::default() };
        let state = ThrottleState::decode(&data, &previous);
        prop_assert!(state.is_ok());
        let state = state.unwrap();
        prop_assert!(state.throttle_l <= 1023);
        prop_assert!(state.throttle_r <= 1023);
    }

    #[test]
    fn stick_decodes_every_full_report(data in report()) {
        let state = StickState::decode(&data);
        prop_assert!(state.is_ok());
        prop_assert!(state.unwrap().z <= 4095);
    }

    #[test]
    fn short_reports_fail(data in proptest::collection::vec(any::<u8>(), 0..REPORT_LEN)) {
        let len = data.len();
        let throttle = ThrottleState::decode(&data, &ThrottleState::default());
        let is_short_throttle =
            matches!(throttle, Err(DecodeError::ShortReport { actual, .. }) if actual == len);
        prop_assert!(is_short_throttle);
        let is_short_stick =
            matches!(StickState::decode(&data), Err(DecodeError::ShortReport { actual, .. }) if actual == len);
        prop_assert!(is_short_stick);
    }

    #[test]
    fn decoding_is_non_destructive(data in report()) {
        let original = data.clone();
        let t1 = ThrottleState::decode(&data, &ThrottleState::default()).unwrap();
        let s1 = StickState::decode(&data).unwrap();
        prop_assert_eq!(&data, &original);
        prop_assert_eq!(t1, ThrottleState::decode(&data, &ThrottleState::default()).unwrap());
        prop_assert_eq!(s1, StickState::decode(&data).unwrap());
    }

    #[test]
    fn trailing_bytes_are_ignored(data in report()) {
        let head = &data[..REPORT_LEN];
        prop_assert_eq!(StickState::decode(head).unwrap(), StickState::decode(&data).unwrap());
    }

    #[test]
    fn throttle_bits_track_wire(data in report()) {
        let s = ThrottleState::decode(&data, &ThrottleState::default()).unwrap();
        prop_assert_eq!(s.i, read_bit(data[2], 0));
        prop_assert_eq!(s.e, read_bit(data[2], 3));
        prop_assert_eq!(s.h, read_bit(data[3], 7));
        prop_assert_eq!(s.tgl1_down, read_bit(data[4], 7));
        prop_assert_eq!(s.h3.up, read_bit(data[4], 0));
        prop_assert_eq!(s.k1_up, read_bit(data[5], 0));
        prop_assert_eq!(s.k1_down, read_bit(data[6], 7));
        prop_assert_eq!(s.thumb_y, u16::from(data[10]));
        // L and R together account for exactly the 20 lever bits.
        let lever_bits = u32::from(data[0]).count_ones()
            + u32::from(data[1]).count_ones()
            + u32::from(data[2] & 0x0F).count_ones();
        prop_assert_eq!(s.throttle_l.count_ones() + s.throttle_r.count_ones(), lever_bits);
    }

    #[test]
    fn mode_follows_precedence(byte6 in any::<u8>(), prior in any_mode()) {
        let mut data = [0u8; REPORT_LEN];
        data[6] = byte6;
        let previous = ThrottleState { mode: prior, ..ThrottleState::default() };
        let mode = ThrottleState::decode(&data, &previous).unwrap().mode;
        let expected = if byte6 & 0x80 != 0 {
            Some(Mode::S1)
        } else if byte6 & 0x40 != 0 {
            Some(Mode::M2)
        } else if byte6 & 0x20 != 0 {
            Some(Mode::M1)
        } else {
            prior
        };
        prop_assert_eq!(mode, expected);
    }

    #[test]
    fn stick_hats_track_wire(data in report()) {
        let s = StickState::decode(&data).unwrap();
        prop_assert_eq!(s.pov, Hat::from_pov(data[5] >> 4));
        prop_assert_eq!(s.h1.up, data[6] & 0x40 != 0);
        prop_assert_eq!(s.h1.left, data[7] & 0x02 != 0);
        prop_assert_eq!(s.h2.up, data[7] & 0x04 != 0);
        prop_assert_eq!(s.h2.left, data[7] & 0x20 != 0);
        prop_assert_eq!(s.trigger, data[6] & 0x01 != 0);
    }
}
