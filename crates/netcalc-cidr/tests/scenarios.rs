use netcalc_cidr::{calculate_cidr, generate_subnets, CidrError};
use netcalc_core::IpType;

#[test]
fn test_private_slash_24() {
    let calc = calculate_cidr("192.168.1.0/24").expect("valid CIDR");

    assert_eq!(calc.network_address, "192.168.1.0");
    assert_eq!(calc.broadcast_address, "192.168.1.255");
    assert_eq!(calc.first_usable_host, "192.168.1.1");
    assert_eq!(calc.last_usable_host, "192.168.1.254");
    assert_eq!(calc.num_usable_hosts, 254);
    assert_eq!(calc.subnet_mask, "255.255.255.0");
    assert_eq!(calc.wildcard_mask, "0.0.0.255");
    assert_eq!(calc.ip_type, IpType::Private);
}

#[test]
fn test_host_address_is_normalized() {
    let calc = calculate_cidr("10.0.0.5/8").expect("valid CIDR");

    assert_eq!(calc.original_ip, "10.0.0.5");
    assert_eq!(calc.network_address, "10.0.0.0");
    assert_eq!(calc.broadcast_address, "10.255.255.255");
    assert_eq!(calc.cidr_notation, "10.0.0.0/8");
    assert_eq!(calc.ip_type, IpType::Private);
}

#[test]
fn test_single_host() {
    let calc = calculate_cidr("8.8.8.8/32").expect("valid CIDR");

    assert_eq!(calc.network_address, "8.8.8.8");
    assert_eq!(calc.broadcast_address, "8.8.8.8");
    assert_eq!(calc.num_usable_hosts, 0);
    assert_eq!(calc.first_usable_host, "N/A");
    assert_eq!(calc.last_usable_host, "N/A");
    assert_eq!(calc.subnet_mask, "255.255.255.255");
    assert_eq!(calc.wildcard_mask, "0.0.0.0");
    assert_eq!(calc.ip_type, IpType::Public);
}

#[test]
fn test_garbage_address() {
    let err = calculate_cidr("not-an-ip/24").unwrap_err();
    assert!(matches!(err, CidrError::InvalidCidr(_)));
    assert_eq!(err.to_string(), "Invalid IP address: not-an-ip");
}

#[test]
fn test_four_way_split() {
    let subnets = generate_subnets("192.168.1.0/24", "26").expect("valid split");

    let networks: Vec<_> = subnets.iter().map(|s| s.cidr_notation.clone()).collect();
    assert_eq!(
        networks,
        [
            "192.168.1.0/26",
            "192.168.1.64/26",
            "192.168.1.128/26",
            "192.168.1.192/26"
        ]
    );
    assert!(subnets.iter().all(|s| s.num_usable_hosts == 62));
}

#[test]
fn test_shorter_prefix_rejected() {
    let err = generate_subnets("192.168.1.0/24", "23").unwrap_err();
    assert!(matches!(err, CidrError::InvalidInput(_)));
}

#[test]
fn test_calculation_json_shape() {
    let calc = calculate_cidr("172.20.5.1/20").expect("valid CIDR");
    let json = serde_json::to_string(&calc).expect("serialization failed");

    assert!(json.contains("\"network_address\":\"172.20.0.0\""));
    assert!(json.contains("\"ip_type\":\"Private\""));
}
