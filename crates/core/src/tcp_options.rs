// SPDX-License-Identifier: MIT

//! Zero-allocation TCP options parser (spec §6, bit-exact).
//!
//! Options begin at byte 20 of the TCP header and end at `doff*4`. Kind 0
//! terminates; kind 1 is a single-byte no-op; every other kind is
//! length-prefixed (the length byte includes the kind and length bytes
//! themselves). Duplicate kinds keep the last occurrence.

use std::collections::HashMap;

/// TCP Fast Open option kind (RFC 7413).
pub const TO_FASTOPEN: u8 = 34;
/// Experimental option kind A (RFC 6994), used by older Fast Open clients.
pub const TO_EXPA: u8 = 254;
/// Experimental option kind B.
pub const TO_EXPB: u8 = 255;
/// Magic bytes identifying a Fast Open cookie inside an experimental option.
pub const TO_EXP_FASTOPEN_MAGIC: [u8; 2] = [0xF9, 0x89];

const TO_EOL: u8 = 0;
const TO_NOP: u8 = 1;

/// Map from option kind to its value bytes, borrowed from the input slice.
pub type TcpOptions<'a> = HashMap<u8, &'a [u8]>;

/// Parse TCP options out of `optbytes` (the header bytes from offset 20 to
/// `doff*4`, already sliced by the caller). Never allocates beyond the
/// returned map; values borrow from `optbytes`.
pub fn parse_tcp_options(optbytes: &[u8]) -> TcpOptions<'_> {
    let mut opts = HashMap::new();
    let mut cp = 0usize;

    while cp < optbytes.len() {
        let kind = optbytes[cp];

        if kind == TO_NOP {
            cp += 1;
            continue;
        }
        if kind == TO_EOL {
            break;
        }

        // Need at least the length byte.
        let Some(&len) = optbytes.get(cp + 1) else {
            break;
        };
        let len = len as usize;
        if len < 2 {
            // Malformed length; stop rather than loop or underflow.
            break;
        }
        let ncp = cp + len;
        if ncp > optbytes.len() {
            break;
        }

        opts.insert(kind, &optbytes[cp + 2..ncp]);
        cp = ncp;
    }

    opts
}

/// Extract a TCP Fast Open cookie from a parsed options map, per spec §4.3:
/// kind 34 carries the cookie directly; kinds 254/255 carry it behind a
/// two-byte `0xF9 0x89` magic. Returns `(kind, cookie)` or `(None, None)`.
pub fn tfo_cookie<'a>(opts: &TcpOptions<'a>) -> (Option<u8>, Option<&'a [u8]>) {
    if let Some(cookie) = opts.get(&TO_FASTOPEN) {
        return (Some(TO_FASTOPEN), Some(cookie));
    }
    for exp_kind in [TO_EXPA, TO_EXPB] {
        if let Some(value) = opts.get(&exp_kind) {
            if value.len() >= 2 && value[0..2] == TO_EXP_FASTOPEN_MAGIC {
                return (Some(exp_kind), Some(&value[2..]));
            }
        }
    }
    (None, None)
}

#[cfg(test)]
#[path = "tcp_options_tests.rs"]
mod tests;
