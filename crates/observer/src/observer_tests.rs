use super::*;
use crate::tcp_chain::TcpChain;
use etherparse::PacketBuilder;
use pathspider_adapters::{FakeSource, Packet};
use std::net::Ipv4Addr;

fn frame(src: [u8; 4], src_port: u16, dst: [u8; 4], dst_port: u16, flags: &str) -> Vec<u8> {
    let mut builder = PacketBuilder::ethernet2([1, 2, 3, 4, 5, 6], [6, 5, 4, 3, 2, 1])
        .ipv4(src, dst, 64)
        .tcp(src_port, dst_port, 1000, 65535);
    builder = match flags {
        "syn" => builder.syn(),
        "synack" => builder.syn().ack(2000),
        "fin" => builder.fin().ack(2000),
        _ => builder,
    };
    let mut out = Vec::new();
    builder.write(&mut out, &[]).unwrap();
    out
}

#[tokio::test]
async fn full_handshake_and_close_emits_one_completed_flow() {
    let mut locals = HashSet::new();
    locals.insert(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)));

    let packets = vec![
        Packet { timestamp_ms: 0, data: frame([10, 0, 0, 1], 1234, [93, 184, 216, 34], 80, "syn") },
        Packet { timestamp_ms: 1, data: frame([93, 184, 216, 34], 80, [10, 0, 0, 1], 1234, "synack") },
        Packet { timestamp_ms: 2, data: frame([10, 0, 0, 1], 1234, [93, 184, 216, 34], 80, "fin") },
        Packet { timestamp_ms: 3, data: frame([93, 184, 216, 34], 80, [10, 0, 0, 1], 1234, "fin") },
    ];

    let source = Box::new(FakeSource::new(packets));
    let chains: Vec<Box<dyn Analyzer>> = vec![Box::new(TcpChain)];
    let observer = Observer::new(source, chains, locals, DEFAULT_IDLE_TIMEOUT_MS);

    let (tx, mut rx) = mpsc::channel(8);
    observer.run(tx).await.unwrap();

    let flow = rx.recv().await.unwrap();
    assert!(flow.tcp.tcp_connected);
    assert!(flow.tcp.tcp_fin_fwd);
    assert!(flow.tcp.tcp_fin_rev);
}

#[tokio::test]
async fn incomplete_flow_is_drained_on_source_exhaustion() {
    let mut locals = HashSet::new();
    locals.insert(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)));

    let packets = vec![Packet {
        timestamp_ms: 0,
        data: frame([10, 0, 0, 1], 1234, [93, 184, 216, 34], 80, "syn"),
    }];

    let source = Box::new(FakeSource::new(packets));
    let chains: Vec<Box<dyn Analyzer>> = vec![Box::new(TcpChain)];
    let observer = Observer::new(source, chains, locals, DEFAULT_IDLE_TIMEOUT_MS);

    let (tx, mut rx) = mpsc::channel(8);
    observer.run(tx).await.unwrap();

    let flow = rx.recv().await.unwrap();
    assert!(!flow.is_complete());
    assert_eq!(flow.tcp.tcp_synflags_fwd & pathspider_core::tcp::TCP_SYN, pathspider_core::tcp::TCP_SYN);
}
