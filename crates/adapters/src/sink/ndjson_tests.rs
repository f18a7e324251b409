use super::*;
use pathspider_core::Job;
use std::net::{IpAddr, Ipv4Addr};

fn job() -> Job {
    Job {
        id: "job-1".into(),
        ip: IpAddr::V4(Ipv4Addr::new(93, 184, 216, 34)),
        port: 80,
        domain: None,
        rank: None,
        tags: serde_json::Map::new(),
    }
}

#[tokio::test]
async fn writes_one_json_line_per_verdict() {
    let mut sink = NdjsonSink::new(Vec::new());
    let verdict = Verdict::new(job(), vec![], vec!["tfo.works".into()], 0, 5);
    sink.write(&verdict).await.unwrap();
    sink.flush().await.unwrap();

    let text = String::from_utf8(sink.into_inner()).unwrap();
    assert_eq!(text.lines().count(), 1);
    let parsed: serde_json::Value = serde_json::from_str(text.lines().next().unwrap()).unwrap();
    assert_eq!(parsed["conditions"][0], serde_json::json!("tfo.works"));
}

#[tokio::test]
async fn successive_writes_append_lines() {
    let mut sink = NdjsonSink::new(Vec::new());
    sink.write(&Verdict::new(job(), vec![], vec![], 0, 1))
        .await
        .unwrap();
    sink.write(&Verdict::new(job(), vec![], vec![], 1, 2))
        .await
        .unwrap();

    let text = String::from_utf8(sink.into_inner()).unwrap();
    assert_eq!(text.lines().count(), 2);
}
