use super::*;
use crate::five_tuple::{FiveTuple, Protocol};
use std::net::{IpAddr, Ipv4Addr};

fn active() -> ActiveRecord {
    ActiveRecord::new("job-1".into(), 0, 0)
}

fn flow() -> FlowRecord {
    FlowRecord::new(
        FiveTuple::new(
            Protocol::Tcp,
            IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)),
            1,
            IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2)),
            2,
        ),
        0,
    )
}

#[test]
fn unobserved_has_no_flow() {
    let slot = FlowSlot::unobserved(active());
    assert!(!slot.observed);
    assert!(slot.flow.is_none());
}

#[test]
fn merged_carries_both_halves() {
    let slot = FlowSlot::merged(active(), flow());
    assert!(slot.observed);
    assert!(slot.flow.is_some());
}
