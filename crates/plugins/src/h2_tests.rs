use super::*;
use pathspider_core::id::JobId;

fn active_with_version(config_index: usize, state: ConnState, version: Option<&str>) -> ActiveRecord {
    let mut record = ActiveRecord::new(JobId::from("job-1"), config_index, 0);
    record.state = state;
    if let Some(v) = version {
        record.fields.insert("h2_version".into(), v.into());
    }
    record
}

#[test]
fn both_configurations_ok_is_connectivity_works() {
    let slots = vec![
        FlowSlot::unobserved(active_with_version(0, ConnState::Ok, Some("HTTP/1.1"))),
        FlowSlot::unobserved(active_with_version(1, ConnState::Ok, Some("HTTP/2.0"))),
    ];
    assert_eq!(combine_flows(&slots)[0], "connectivity.works");
}

#[test]
fn response_actually_served_over_h2_is_upgrade_success() {
    let slots = vec![
        FlowSlot::unobserved(active_with_version(0, ConnState::Ok, Some("HTTP/1.1"))),
        FlowSlot::unobserved(active_with_version(1, ConnState::Ok, Some("HTTP/2.0"))),
    ];
    let conditions = combine_flows(&slots);
    assert!(conditions.contains(&"h2.upgrade.success".to_string()));
}

#[test]
fn response_served_over_http1_despite_prior_knowledge_request_is_upgrade_failed() {
    let slots = vec![
        FlowSlot::unobserved(active_with_version(0, ConnState::Ok, Some("HTTP/1.1"))),
        FlowSlot::unobserved(active_with_version(1, ConnState::Ok, Some("HTTP/1.1"))),
    ];
    let conditions = combine_flows(&slots);
    assert!(conditions.contains(&"h2.upgrade.failed".to_string()));
}

#[test]
fn follow_up_connect_failure_omits_the_upgrade_tag() {
    let slots = vec![
        FlowSlot::unobserved(active_with_version(0, ConnState::Ok, Some("HTTP/1.1"))),
        FlowSlot::unobserved(active_with_version(1, ConnState::Failed, None)),
    ];
    let conditions = combine_flows(&slots);
    assert_eq!(conditions, vec!["connectivity.broken".to_string()]);
}

#[test]
fn connector_uses_https_scheme_when_connect_kind_is_https() {
    let plugin = H2Plugin::new(ConnectKind::Https, Duration::from_secs(1));
    assert_eq!(plugin.connector().no_h2.scheme, pathspider_adapters::Scheme::Https);
}

#[test]
fn plugin_declares_two_configurations_and_tcp_chain_only() {
    let plugin = H2Plugin::new(ConnectKind::Http, Duration::from_secs(1));
    assert_eq!(plugin.configuration_count(), 2);
    assert_eq!(plugin.analyzer_chains().len(), 1);
}
