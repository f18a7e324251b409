// SPDX-License-Identifier: MIT

//! TCP Fast Open connector (spec §4.2, `tfo` plugin): configuration 0 is
//! a plain TCP baseline; configuration 1 sends the SYN's payload through
//! `sendto(2)` with `MSG_FASTOPEN`, which is the only portable way to ask
//! the kernel to attach a Fast Open cookie request/data to a SYN.
//!
//! Byte layout of the SYN payload (`message_for`) matches the original
//! tool's per-port conventions: an HTTP/1.1 request for port 80, a raw
//! DNS question for port 53, and an empty payload otherwise.

use super::ConnectorAdapter;
use async_trait::async_trait;
use pathspider_core::{ActiveRecord, ConnState, Job};
use std::io;
use std::mem;
use std::net::SocketAddr;
use std::os::fd::RawFd;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
pub struct TfoConnector {
    pub connect_timeout: Duration,
}

impl Default for TfoConnector {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl TfoConnector {
    pub fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }
}

fn encode_dns_question(qname: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for part in qname.split('.') {
        out.push(part.len() as u8);
        out.extend_from_slice(part.as_bytes());
    }
    out.push(0);
    out
}

/// Construct the payload to attach to the SYN for `phase` (0 = cookie
/// request, 1 = cookie use), per spec §4.2.
pub fn message_for(job: &Job, phase: u16) -> Vec<u8> {
    match job.port {
        80 => {
            let domain = job
                .domain
                .clone()
                .unwrap_or_else(|| job.ip.to_string());
            format!("GET / HTTP/1.1\r\nhost: {}\r\n\r\n", domain).into_bytes()
        }
        53 => {
            let domain = job.domain.clone().unwrap_or_default();
            let mut out = Vec::with_capacity(12);
            let header: [u16; 6] = [0x0a75u16.wrapping_add(phase), 0x0100, 1, 0, 0, 0];
            for field in header {
                out.extend_from_slice(&field.to_be_bytes());
            }
            out.extend_from_slice(&encode_dns_question(&domain));
            out
        }
        _ => Vec::new(),
    }
}

/// `sendto(2)` a Fast Open SYN carrying `payload`, returning the socket's
/// assigned local port on success. The socket is always closed before
/// returning; the kernel completes (or times out) the handshake
/// asynchronously, so this call only needs to hand off the initial datagram.
#[allow(unsafe_code)]
fn send_fastopen_syn(addr: SocketAddr, payload: &[u8]) -> io::Result<u16> {
    // SAFETY: every libc call below is given correctly-sized, initialized
    // arguments; the socket fd is closed on every exit path.
    unsafe {
        let (domain, sockaddr, addrlen): (libc::c_int, Vec<u8>, libc::socklen_t) = match addr {
            SocketAddr::V4(v4) => {
                let mut sa: libc::sockaddr_in = mem::zeroed();
                sa.sin_family = libc::AF_INET as libc::sa_family_t;
                sa.sin_port = v4.port().to_be();
                sa.sin_addr.s_addr = u32::from_ne_bytes(v4.ip().octets());
                let bytes = std::slice::from_raw_parts(
                    &sa as *const _ as *const u8,
                    mem::size_of::<libc::sockaddr_in>(),
                )
                .to_vec();
                (
                    libc::AF_INET,
                    bytes,
                    mem::size_of::<libc::sockaddr_in>() as libc::socklen_t,
                )
            }
            SocketAddr::V6(v6) => {
                let mut sa: libc::sockaddr_in6 = mem::zeroed();
                sa.sin6_family = libc::AF_INET6 as libc::sa_family_t;
                sa.sin6_port = v6.port().to_be();
                sa.sin6_addr.s6_addr = v6.ip().octets();
                let bytes = std::slice::from_raw_parts(
                    &sa as *const _ as *const u8,
                    mem::size_of::<libc::sockaddr_in6>(),
                )
                .to_vec();
                (
                    libc::AF_INET6,
                    bytes,
                    mem::size_of::<libc::sockaddr_in6>() as libc::socklen_t,
                )
            }
        };

        let fd: RawFd = libc::socket(domain, libc::SOCK_STREAM, 0);
        if fd < 0 {
            return Err(io::Error::last_os_error());
        }

        let sent = libc::sendto(
            fd,
            payload.as_ptr() as *const libc::c_void,
            payload.len(),
            libc::MSG_FASTOPEN,
            sockaddr.as_ptr() as *const libc::sockaddr,
            addrlen,
        );

        if sent < 0 {
            let err = io::Error::last_os_error();
            libc::close(fd);
            return Err(err);
        }

        let mut local: libc::sockaddr_storage = mem::zeroed();
        let mut local_len = mem::size_of::<libc::sockaddr_storage>() as libc::socklen_t;
        let port = if libc::getsockname(
            fd,
            &mut local as *mut _ as *mut libc::sockaddr,
            &mut local_len,
        ) == 0
        {
            match local.ss_family as libc::c_int {
                libc::AF_INET => {
                    let sa = &*(&local as *const _ as *const libc::sockaddr_in);
                    u16::from_be(sa.sin_port)
                }
                libc::AF_INET6 => {
                    let sa = &*(&local as *const _ as *const libc::sockaddr_in6);
                    u16::from_be(sa.sin6_port)
                }
                _ => 0,
            }
        } else {
            0
        };

        libc::close(fd);
        Ok(port)
    }
}

#[async_trait]
impl ConnectorAdapter for TfoConnector {
    async fn connect(&self, job: &Job, config_index: usize, started_at_ms: u64) -> ActiveRecord {
        let mut record = ActiveRecord::new(job.id.clone(), config_index, started_at_ms);
        let addr = SocketAddr::new(job.ip, job.port);
        let attempt_start = Instant::now();

        match config_index {
            0 => match tokio::time::timeout(
                self.connect_timeout,
                tokio::net::TcpStream::connect(addr),
            )
            .await
            {
                Ok(Ok(stream)) => {
                    record.state = ConnState::Ok;
                    if let Ok(local) = stream.local_addr() {
                        record.source_port = local.port();
                    }
                }
                Ok(Err(_)) => record.state = ConnState::Failed,
                Err(_) => record.state = ConnState::Timeout,
            },
            1 => {
                let cookie_request = message_for(job, 0);
                let _ = send_fastopen_syn(addr, &cookie_request);

                let payload = message_for(job, 1);
                let addr_owned = addr;
                let payload_owned = payload;
                let result = tokio::task::spawn_blocking(move || {
                    send_fastopen_syn(addr_owned, &payload_owned)
                })
                .await;

                match result {
                    Ok(Ok(port)) => {
                        record.state = ConnState::Ok;
                        record.source_port = port;
                    }
                    Ok(Err(err)) if err.kind() == io::ErrorKind::TimedOut => {
                        record.state = ConnState::Timeout
                    }
                    Ok(Err(_)) | Err(_) => record.state = ConnState::Failed,
                }
            }
            _ => record.state = ConnState::Skipped,
        }

        record.elapsed_ms = attempt_start.elapsed().as_millis() as u64;
        record
    }
}

#[cfg(test)]
#[path = "tfo_tests.rs"]
mod tests;
