use super::*;
use pathspider_core::FiveTuple;

fn active(config_index: usize, state: ConnState) -> ActiveRecord {
    let mut record = ActiveRecord::new(JobId::from("job-1"), config_index, 0);
    record.state = state;
    record
}

fn flow_with_negotiation(negotiated: bool) -> FlowRecord {
    let mut flow = FlowRecord::new(
        FiveTuple {
            protocol: pathspider_core::Protocol::Tcp,
            local_addr: "127.0.0.1".parse().unwrap(),
            local_port: 1234,
            remote_addr: "127.0.0.1".parse().unwrap(),
            remote_port: 80,
        },
        0,
    );
    if negotiated {
        flow.tfo.tfo_ackkind = pathspider_core::tcp_options::TO_FASTOPEN;
    }
    flow
}

#[test]
fn both_ok_is_connectivity_works() {
    let slots = vec![
        FlowSlot::unobserved(active(0, ConnState::Ok)),
        FlowSlot::unobserved(active(1, ConnState::Ok)),
    ];
    assert_eq!(combine_flows(&slots)[0], "connectivity.works");
}

#[tokio::test]
async fn baseline_failed_marks_follow_up_skipped() {
    let connector = SkipPropagatingConnector::new(TfoConnector::new(Duration::from_millis(50)));
    let job = Job::from_record(
        JobId::from("job-1"),
        pathspider_core::JobRecord {
            ip: [203, 0, 113, 1].into(),
            port: 80,
            domain: None,
            rank: None,
            tags: serde_json::Map::new(),
        },
    );

    let baseline = connector.connect(&job, 0, 0).await;
    assert_ne!(baseline.state, ConnState::Ok);

    let follow_up = connector.connect(&job, 1, 0).await;
    assert_eq!(follow_up.state, ConnState::Skipped);
}

#[test]
fn unsuccessful_follow_up_flow_is_reported_as_negotiation_failed() {
    let slots = vec![
        FlowSlot::unobserved(active(0, ConnState::Ok)),
        FlowSlot::merged(active(1, ConnState::Ok), flow_with_negotiation(false)),
    ];
    let conditions = combine_flows(&slots);
    assert!(conditions.contains(&"tfo.negotiation.failed".to_string()));
}

#[test]
fn cookie_on_synack_is_negotiation_succeeded() {
    let slots = vec![
        FlowSlot::unobserved(active(0, ConnState::Ok)),
        FlowSlot::merged(active(1, ConnState::Ok), flow_with_negotiation(true)),
    ];
    let conditions = combine_flows(&slots);
    assert!(conditions.contains(&"tfo.negotiation.succeeded".to_string()));
}

#[test]
fn plugin_declares_two_configurations_and_tcp_tfo_chains() {
    let plugin = TfoPlugin::new(Duration::from_secs(1));
    assert_eq!(plugin.configuration_count(), 2);
    assert_eq!(plugin.analyzer_chains().len(), 2);
}
