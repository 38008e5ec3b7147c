//! Proof-of-work search used to disarm a mine.
//!
//! The key is the smallest non-negative integer whose SHA-256 digest of
//! `decimal(key) ++ serial_no` starts with [`DIFFICULTY`] zero hex digits.
//! The search is a plain increasing scan, so the result for a given serial
//! number is identical on every run.

use alloc::string::String;
use core::fmt::Write;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::*;

/// Number of leading `'0'` hex digits a winning digest must have.
pub const DIFFICULTY: usize = 4;

/// Keys tried before the search is declared exhausted.
pub const KEY_LIMIT: u64 = 1 << 32;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    pub key: u64,
    pub digest: String,
}

pub fn solve(serial_no: &str) -> Result<Solution> {
    solve_bounded(serial_no, KEY_LIMIT)
}

/// Same as [`solve`] but gives up after `limit` keys.
pub fn solve_bounded(serial_no: &str, limit: u64) -> Result<Solution> {
    let mut key_buf = String::with_capacity(20);

    for key in 0..limit {
        key_buf.clear();
        let _ = write!(key_buf, "{key}");

        let raw = Sha256::new()
            .chain_update(key_buf.as_bytes())
            .chain_update(serial_no.as_bytes())
            .finalize();

        if leading_zero_nibbles(&raw) >= DIFFICULTY {
            log::debug!("solved puzzle for serial {serial_no:?} with key {key}");
            return Ok(Solution {
                key,
                digest: to_hex(&raw),
            });
        }
    }

    log::error!("no key below {limit} solves serial {serial_no:?}");
    Err(RoverError::PuzzleExhausted)
}

/// Hex digest of `decimal(key) ++ serial_no`.
pub fn digest_for(key: u64, serial_no: &str) -> String {
    let mut input = String::new();
    let _ = write!(input, "{key}{serial_no}");
    to_hex(&Sha256::digest(input.as_bytes()))
}

pub fn meets_difficulty(digest: &str) -> bool {
    digest.len() >= DIFFICULTY && digest.bytes().take(DIFFICULTY).all(|b| b == b'0')
}

fn leading_zero_nibbles(bytes: &[u8]) -> usize {
    let mut count = 0;
    for &byte in bytes {
        if byte == 0 {
            count += 2;
            continue;
        }
        if byte >> 4 == 0 {
            count += 1;
        }
        break;
    }
    count
}

fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(out, "{byte:02x}");
    }
    out
}
