use super::*;
use pathspider_core::{FiveTuple, Protocol};
use std::net::{IpAddr, Ipv4Addr};

fn packet(ip_ecn_bits: u8, syn: bool, payload_len: usize, direction: Direction) -> ParsedPacket<'static> {
    ParsedPacket {
        timestamp_ms: 0,
        five_tuple: FiveTuple::new(
            Protocol::Tcp,
            IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)),
            1,
            IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2)),
            2,
        ),
        direction,
        syn,
        ack: false,
        fin: false,
        rst: false,
        ece: false,
        cwr: false,
        sequence_number: 0,
        acknowledgment_number: 0,
        ip_ecn_bits,
        payload_len,
        tcp_options: &[],
    }
}

#[test]
fn ect0_on_syn_marks_syn_field_only() {
    let chain = EcnChain;
    let mut record = FlowRecord::default();
    chain.on_packet(&mut record, &packet(0b10, true, 0, Direction::Forward), Direction::Forward);
    assert!(record.ecn.ecn_ect0_syn_fwd);
    assert!(!record.ecn.ecn_ect0_data_fwd);
}

#[test]
fn ce_on_data_marks_data_field() {
    let chain = EcnChain;
    let mut record = FlowRecord::default();
    chain.on_packet(&mut record, &packet(0b11, false, 64, Direction::Reverse), Direction::Reverse);
    assert!(record.ecn.ecn_ce_data_rev);
    assert!(!record.ecn.ecn_ce_syn_rev);
}

#[test]
fn not_ect_sets_nothing() {
    let chain = EcnChain;
    let mut record = FlowRecord::default();
    chain.on_packet(&mut record, &packet(0b00, true, 64, Direction::Forward), Direction::Forward);
    assert_eq!(record.ecn, pathspider_core::EcnFields::default());
}
