use super::*;
use etherparse::PacketBuilder;
use std::net::Ipv4Addr;

fn build_syn(src: [u8; 4], src_port: u16, dst: [u8; 4], dst_port: u16) -> Vec<u8> {
    let builder = PacketBuilder::ethernet2([1, 2, 3, 4, 5, 6], [6, 5, 4, 3, 2, 1])
        .ipv4(src, dst, 64)
        .tcp(src_port, dst_port, 1000, 65535)
        .syn();

    let payload = [];
    let mut out = Vec::new();
    builder.write(&mut out, &payload).unwrap();
    out
}

#[test]
fn parses_syn_into_forward_direction_when_src_is_local() {
    let mut locals = HashSet::new();
    locals.insert(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)));

    let frame = build_syn([10, 0, 0, 1], 1234, [93, 184, 216, 34], 80);
    let parsed = parse(0, &frame, &locals).unwrap();

    assert!(parsed.syn);
    assert!(!parsed.ack);
    assert_eq!(parsed.direction, Direction::Forward);
    assert_eq!(parsed.five_tuple.remote_port, 80);
}

#[test]
fn non_ip_frame_is_not_tcp() {
    let locals = HashSet::new();
    let garbage = [0u8; 10];
    let result = parse(0, &garbage, &locals);
    assert!(matches!(result, Err(ParseError::Malformed(_)) | Err(ParseError::NotTcp)));
}
