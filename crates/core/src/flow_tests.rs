use super::*;
use crate::five_tuple::Protocol;
use std::net::{IpAddr, Ipv4Addr};

fn tuple() -> FiveTuple {
    FiveTuple::new(
        Protocol::Tcp,
        IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)),
        1234,
        IpAddr::V4(Ipv4Addr::new(93, 184, 216, 34)),
        80,
    )
}

#[test]
fn new_stamps_first_and_last_seen() {
    let flow = FlowRecord::new(tuple(), 1_000);
    assert_eq!(flow.first_seen_ms, 1_000);
    assert_eq!(flow.last_seen_ms, 1_000);
    assert!(!flow.is_complete());
}

#[test]
fn completion_delegates_to_tcp_fields() {
    let mut flow = FlowRecord::new(tuple(), 0);
    flow.tcp.tcp_rst_fwd = true;
    assert!(flow.is_complete());
}

#[test]
fn flattened_fields_round_trip_through_json() {
    let mut flow = FlowRecord::new(tuple(), 0);
    flow.ecn.ecn_ect0_syn_fwd = true;
    flow.tfo.tfo_ackkind = 34;

    let value = serde_json::to_value(&flow).unwrap();
    assert_eq!(value["ecn_ect0_syn_fwd"], serde_json::json!(true));
    assert_eq!(value["tfo_ackkind"], serde_json::json!(34));

    let back: FlowRecord = serde_json::from_value(value).unwrap();
    assert!(back.ecn.ecn_ect0_syn_fwd);
    assert_eq!(back.tfo.tfo_ackkind, 34);
}
