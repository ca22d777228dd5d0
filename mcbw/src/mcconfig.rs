use crate::{DeviceRoster, Error, Result};
use serde::{Deserialize, Serialize};
use std::num::IntErrorKind;
use std::path::Path;

/// A validated inter-node device pair, in global device indices.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Session {
    pub src: usize,
    pub dst: usize,
}

fn parse_index(token: &str, line: usize, what: &str, bound: usize) -> Result<usize> {
    let value: i64 = token.parse().map_err(|e: std::num::ParseIntError| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => Error::RangeError {
            line,
            msg: format!("invalid {what} device {token}, expected 0 <= index < {bound}"),
        },
        _ => Error::ParseError {
            line,
            msg: format!("{what} device {token:?} is not an integer"),
        },
    })?;
    if value < 0 || value as u64 >= bound as u64 {
        return Err(Error::RangeError {
            line,
            msg: format!("invalid {what} device {value}, expected 0 <= index < {bound}"),
        });
    }
    Ok(value as usize)
}

/// Parses mcconfig rows `<src> <dst> <weight>` against a cluster of `nnodes`
/// nodes sharing `roster`. The weight column is accepted and ignored.
pub fn parse_sessions(text: &str, nnodes: usize, roster: &DeviceRoster) -> Result<Vec<Session>> {
    let bound = roster.global_count(nnodes);
    let mut sessions = vec![];

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        let [src, dst, _weight] = tokens[..] else {
            return Err(Error::ParseError {
                line,
                msg: format!("expected 3 tokens, got {}: {trimmed}", tokens.len()),
            });
        };

        let src = parse_index(src, line, "source", bound)?;
        let dst = parse_index(dst, line, "destination", bound)?;
        if roster.node_of(src) == roster.node_of(dst) {
            return Err(Error::TopologyError(format!(
                "invalid device pair ({src},{dst}) at line {line}: src and dst device must locate on different nodes"
            )));
        }
        sessions.push(Session { src, dst });
    }

    tracing::debug!("parsed {} sessions over {} nodes", sessions.len(), nnodes);
    Ok(sessions)
}

pub fn load_sessions(
    path: impl AsRef<Path>,
    nnodes: usize,
    roster: &DeviceRoster,
) -> Result<Vec<Session>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_sessions(&text, nnodes, roster)
}
