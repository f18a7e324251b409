use super::*;
use pathspider_core::{five_tuple::Protocol, ConnState, FiveTuple, FlowRecord, Job, JobId};
use serde_json::Map;
use std::net::Ipv4Addr;

fn job() -> Job {
    Job {
        id: JobId::new("j1"),
        ip: IpAddr::V4(Ipv4Addr::new(93, 184, 216, 34)),
        port: 80,
        domain: None,
        rank: None,
        tags: Map::new(),
    }
}

fn active(config_index: usize, source_port: u16) -> ActiveRecord {
    let mut record = ActiveRecord::new(JobId::new("j1"), config_index, 0);
    record.state = ConnState::Ok;
    record.source_port = source_port;
    record
}

fn flow_for(job: &Job, source_port: u16) -> FlowRecord {
    let tuple = FiveTuple::new(Protocol::Tcp, IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)), source_port, job.ip, job.port);
    FlowRecord::new(tuple, 0)
}

#[test]
fn matches_active_records_to_flows_by_remote_and_local_port() {
    let job = job();
    let mut flows = HashMap::new();
    let flow = flow_for(&job, 4321);
    flows.insert(match_key_for_flow(&flow).unwrap(), flow);

    let merger = Merger::new(Arc::new(|_slots: &[FlowSlot]| vec!["connectivity.works".to_string()]));
    let verdict = merger.merge(job, vec![active(0, 4321)], &mut flows, 0, 10);

    assert_eq!(verdict.flows.len(), 1);
    assert!(verdict.flows[0].observed);
    assert!(flows.is_empty());
}

#[test]
fn unmatched_active_record_is_unobserved() {
    let job = job();
    let mut flows = HashMap::new();

    let merger = Merger::new(Arc::new(|_slots: &[FlowSlot]| Vec::new()));
    let verdict = merger.merge(job, vec![active(0, 9999)], &mut flows, 0, 10);

    assert_eq!(verdict.flows.len(), 1);
    assert!(!verdict.flows[0].observed);
    assert!(verdict.flows[0].flow.is_none());
}

#[test]
fn combine_hook_receives_the_merged_slots() {
    let job = job();
    let mut flows = HashMap::new();

    let merger = Merger::new(Arc::new(|slots: &[FlowSlot]| vec![format!("count.{}", slots.len())]));
    let verdict = merger.merge(job, vec![active(0, 1), active(1, 2)], &mut flows, 0, 10);

    assert_eq!(verdict.conditions, vec!["count.2"]);
}
