use super::*;
use pathspider_core::JobRecord;
use std::net::{IpAddr, Ipv4Addr};

fn job() -> Job {
    let record = JobRecord {
        ip: IpAddr::V4(Ipv4Addr::new(93, 184, 216, 34)),
        port: 80,
        domain: None,
        rank: None,
        tags: serde_json::Map::new(),
    };
    Job::from_record("job-1".into(), record)
}

#[tokio::test]
async fn records_calls_in_order() {
    let fake = FakeConnector::new();
    fake.connect(&job(), 0, 0).await;
    fake.connect(&job(), 1, 10).await;

    let calls = fake.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].config_index, 0);
    assert_eq!(calls[1].config_index, 1);
}

#[tokio::test]
async fn scripted_states_are_consumed_in_order() {
    let fake = FakeConnector::with_scripted_states(vec![ConnState::Failed, ConnState::Timeout]);

    let first = fake.connect(&job(), 0, 0).await;
    let second = fake.connect(&job(), 0, 0).await;
    let third = fake.connect(&job(), 0, 0).await;

    assert_eq!(first.state, ConnState::Failed);
    assert_eq!(second.state, ConnState::Timeout);
    assert_eq!(third.state, ConnState::Ok);
}
