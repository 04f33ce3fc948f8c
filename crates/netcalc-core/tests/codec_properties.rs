use netcalc_core::{classify, ip_to_long, long_to_ip, IpType};
use proptest::prelude::*;

proptest! {
    #[test]
    fn round_trips_every_address(value in any::<u32>()) {
        prop_assert_eq!(ip_to_long(&long_to_ip(value)).unwrap(), value);
    }

    #[test]
    fn accepts_any_four_octets(a in any::<u8>(), b in any::<u8>(), c in any::<u8>(), d in any::<u8>()) {
        let text = format!("{}.{}.{}.{}", a, b, c, d);
        prop_assert_eq!(ip_to_long(&text).unwrap(), u32::from_be_bytes([a, b, c, d]));
    }

    #[test]
    fn rejects_out_of_range_octets(octet in 256u32..100_000, position in 0usize..4) {
        let mut groups = vec!["1".to_string(); 4];
        groups[position] = octet.to_string();
        prop_assert!(ip_to_long(&groups.join(".")).is_err());
    }

    #[test]
    fn loopback_wins_for_whole_block(rest in 0u32..(1 << 24)) {
        prop_assert_eq!(classify((127 << 24) | rest), IpType::Loopback);
    }
}

#[test]
fn classifier_precedence_scenarios() {
    assert_eq!(classify(ip_to_long("127.0.0.1").unwrap()), IpType::Loopback);
    assert_eq!(classify(ip_to_long("172.20.5.1").unwrap()), IpType::Private);
    assert_eq!(classify(ip_to_long("172.32.0.1").unwrap()), IpType::Public);
}
