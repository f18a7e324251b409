use super::*;
use pathspider_core::id::JobId;
use pathspider_core::{ConnState, FiveTuple};

fn active(config_index: usize, state: ConnState) -> ActiveRecord {
    let mut record = ActiveRecord::new(JobId::from("job-1"), config_index, 0);
    record.state = state;
    record
}

fn flow_with_synflags(synflags_rev: u8) -> FlowRecord {
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
    flow.tcp.tcp_connected = true;
    flow.tcp.tcp_synflags_rev = synflags_rev;
    flow
}

#[test]
fn both_configurations_ok_is_connectivity_works() {
    let slots = vec![
        FlowSlot::unobserved(active(0, ConnState::Ok)),
        FlowSlot::unobserved(active(1, ConnState::Ok)),
    ];
    assert_eq!(combine_flows(&slots)[0], "ecn.connectivity.works");
}

#[test]
fn baseline_ok_follow_up_failed_is_connectivity_broken() {
    let slots = vec![
        FlowSlot::unobserved(active(0, ConnState::Ok)),
        FlowSlot::unobserved(active(1, ConnState::Failed)),
    ];
    assert_eq!(combine_flows(&slots)[0], "ecn.connectivity.broken");
}

#[test]
fn baseline_failed_follow_up_ok_is_connectivity_transient() {
    let slots = vec![
        FlowSlot::unobserved(active(0, ConnState::Failed)),
        FlowSlot::unobserved(active(1, ConnState::Ok)),
    ];
    assert_eq!(combine_flows(&slots)[0], "ecn.connectivity.transient");
}

#[test]
fn both_configurations_failed_is_connectivity_offline() {
    let slots = vec![
        FlowSlot::unobserved(active(0, ConnState::Failed)),
        FlowSlot::unobserved(active(1, ConnState::Failed)),
    ];
    assert_eq!(combine_flows(&slots), vec!["ecn.connectivity.offline".to_string()]);
}

#[test]
fn unobserved_follow_up_flow_emits_only_connectivity() {
    let slots = vec![
        FlowSlot::unobserved(active(0, ConnState::Ok)),
        FlowSlot::unobserved(active(1, ConnState::Ok)),
    ];
    assert_eq!(combine_flows(&slots).len(), 1);
}

#[test]
fn synack_with_ece_only_is_negotiation_succeeded() {
    let slots = vec![
        FlowSlot::unobserved(active(0, ConnState::Ok)),
        FlowSlot::merged(active(1, ConnState::Ok), flow_with_synflags(TCP_SAE)),
    ];
    let conditions = combine_flows(&slots);
    assert!(conditions.contains(&"ecn.negotiation.succeeded".to_string()));
}

#[test]
fn synack_with_ece_and_cwr_is_negotiation_reflected() {
    let slots = vec![
        FlowSlot::unobserved(active(0, ConnState::Ok)),
        FlowSlot::merged(active(1, ConnState::Ok), flow_with_synflags(TCP_SAEC)),
    ];
    let conditions = combine_flows(&slots);
    assert!(conditions.contains(&"ecn.negotiation.reflected".to_string()));
}

#[test]
fn synack_without_ece_is_negotiation_failed() {
    let slots = vec![
        FlowSlot::unobserved(active(0, ConnState::Ok)),
        FlowSlot::merged(active(1, ConnState::Ok), flow_with_synflags(pathspider_core::tcp::TCP_SYN | pathspider_core::tcp::TCP_ACK)),
    ];
    let conditions = combine_flows(&slots);
    assert!(conditions.contains(&"ecn.negotiation.failed".to_string()));
}

#[test]
fn ipmark_tags_reflect_observed_codepoints() {
    let mut flow = flow_with_synflags(TCP_SAE);
    flow.ecn.ecn_ect0_syn_rev = true;
    let slots = vec![
        FlowSlot::unobserved(active(0, ConnState::Ok)),
        FlowSlot::merged(active(1, ConnState::Ok), flow),
    ];
    let conditions = combine_flows(&slots);
    assert!(conditions.contains(&"ecn.ipmark.ect0.seen".to_string()));
    assert!(conditions.contains(&"ecn.ipmark.ect1.not_seen".to_string()));
    assert!(conditions.contains(&"ecn.ipmark.ce.not_seen".to_string()));
}

#[test]
fn connector_selects_tcp_for_tcp_connect_kind() {
    let plugin = EcnPlugin::new(ConnectKind::Tcp, Duration::from_secs(1));
    assert!(matches!(plugin.connector(), EcnConnector::Tcp(_)));
}

#[test]
fn connector_selects_http_for_http_and_https_connect_kinds() {
    let http = EcnPlugin::new(ConnectKind::Http, Duration::from_secs(1));
    assert!(matches!(http.connector(), EcnConnector::Http(_)));

    let https = EcnPlugin::new(ConnectKind::Https, Duration::from_secs(1));
    assert!(matches!(https.connector(), EcnConnector::Http(_)));
}

#[test]
fn plugin_declares_two_configurations_and_tcp_ecn_chains() {
    let plugin = EcnPlugin::new(ConnectKind::Tcp, Duration::from_secs(1));
    assert_eq!(plugin.configuration_count(), 2);
    assert_eq!(plugin.analyzer_chains().len(), 2);
}
