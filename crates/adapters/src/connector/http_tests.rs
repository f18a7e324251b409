use super::*;
use pathspider_core::JobRecord;
use std::net::Ipv4Addr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

fn job_for(ip: std::net::IpAddr, port: u16) -> Job {
    let record = JobRecord {
        ip,
        port,
        domain: None,
        rank: None,
        tags: serde_json::Map::new(),
    };
    Job::from_record("job-1".into(), record)
}

async fn serve_one_http11_response(listener: TcpListener) {
    if let Ok((mut stream, _)) = listener.accept().await {
        let mut buf = [0u8; 1024];
        let _ = stream.read(&mut buf).await;
        let body = "hi";
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        let _ = stream.write_all(response.as_bytes()).await;
        let _ = stream.shutdown().await;
    }
}

#[tokio::test]
async fn http11_config_reaches_plain_server() {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(serve_one_http11_response(listener));

    let connector = HttpConnector::default();
    let record = connector.connect(&job_for(addr.ip(), addr.port()), 0, 0).await;

    assert_eq!(record.state, ConnState::Ok);
    assert_eq!(record.fields.get("h2_status"), Some(&serde_json::json!(200)));
}

#[tokio::test]
async fn unreachable_target_is_failed() {
    let connector = HttpConnector::new(std::time::Duration::from_millis(200));
    let addr: std::net::IpAddr = [203, 0, 113, 1].into();
    let record = connector.connect(&job_for(addr, 80), 0, 0).await;

    assert!(matches!(record.state, ConnState::Failed | ConnState::Timeout));
}

#[tokio::test]
async fn same_instance_behaves_identically_across_configuration_indices() {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(serve_one_http11_response(listener));

    let connector = HttpConnector::default();
    let record = connector.connect(&job_for(addr.ip(), addr.port()), 1, 0).await;

    assert_eq!(record.state, ConnState::Ok);
}
