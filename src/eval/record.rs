//! Text records for evaluator parameters
//!
//! Both records start with a header line naming the record and its version,
//! followed by whitespace-separated numbers:
//!
//! ```text
//! gomoku-heuristic v1
//! 100000 10000 5000 1000 50 1 1
//! ```
//!
//! ```text
//! gomoku-network v1 8 12 1
//! <8 lines of 12 input->hidden weights>
//! <12 lines of 1 hidden->output weight>
//! ```
//!
//! Files without a header are read as the legacy layout, which is the same
//! numbers with no header line.

use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::PersistError;

use super::network::{Network, HIDDEN_SIZE, INPUT_SIZE, OUTPUT_SIZE};
use super::patterns::HeuristicWeights;

pub const HEURISTIC_RECORD: &str = "gomoku-heuristic";
pub const NETWORK_RECORD: &str = "gomoku-network";
pub const RECORD_VERSION: u32 = 1;

const HEURISTIC_FIELDS: usize = 7;
const NETWORK_FIELDS: usize = INPUT_SIZE * HIDDEN_SIZE + HIDDEN_SIZE * OUTPUT_SIZE;

/// Read a file, mapping "not found" to `None`.
fn read_optional(path: &Path) -> Result<Option<String>, PersistError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(PersistError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("weights"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write `contents` to a sibling temp file, then rename it over `path`.
fn write_atomic(path: &Path, contents: &str) -> Result<(), PersistError> {
    let io_err = |source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let tmp = temp_sibling(path);
    fs::write(&tmp, contents).map_err(io_err)?;
    fs::rename(&tmp, path).map_err(io_err)
}

/// Split off and check the header, returning the body.
///
/// `extra` lists the tokens expected after the version. A body with no
/// header at all is returned unchanged.
fn strip_header<'a>(
    text: &'a str,
    path: &Path,
    record: &'static str,
    extra: &[usize],
) -> Result<&'a str, PersistError> {
    let trimmed = text.trim_start();
    if !trimmed.starts_with("gomoku-") {
        return Ok(trimmed);
    }
    let (line, body) = trimmed.split_once('\n').unwrap_or((trimmed, ""));
    let bad_header = || PersistError::Header {
        path: path.to_path_buf(),
        header: line.trim().to_string(),
    };

    let mut tokens = line.split_whitespace();
    if tokens.next() != Some(record) {
        return Err(bad_header());
    }
    let version = tokens
        .next()
        .and_then(|t| t.strip_prefix('v'))
        .and_then(|t| t.parse::<u32>().ok())
        .ok_or_else(bad_header)?;
    if version != RECORD_VERSION {
        return Err(PersistError::Version {
            path: path.to_path_buf(),
            record,
            version,
        });
    }
    let dims: Vec<&str> = tokens.collect();
    let expected: Vec<String> = extra.iter().map(ToString::to_string).collect();
    if dims != expected {
        return Err(bad_header());
    }
    Ok(body)
}

fn parse_numbers(body: &str, path: &Path, expected: usize) -> Result<Vec<f64>, PersistError> {
    let values = body
        .split_whitespace()
        .map(|token| match token.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(PersistError::Number {
                path: path.to_path_buf(),
                token: token.to_string(),
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;
    if values.len() != expected {
        return Err(PersistError::Shape {
            path: path.to_path_buf(),
            expected,
            found: values.len(),
        });
    }
    Ok(values)
}

pub fn parse_heuristic(text: &str, path: &Path) -> Result<HeuristicWeights, PersistError> {
    let body = strip_header(text, path, HEURISTIC_RECORD, &[])?;
    let values = parse_numbers(body, path, HEURISTIC_FIELDS)?;
    let mut fields = [0.0; HEURISTIC_FIELDS];
    fields.copy_from_slice(&values);
    Ok(HeuristicWeights::from_fields(fields))
}

pub fn format_heuristic(weights: &HeuristicWeights) -> String {
    let fields: Vec<String> = weights.to_fields().iter().map(ToString::to_string).collect();
    format!("{HEURISTIC_RECORD} v{RECORD_VERSION}\n{}\n", fields.join(" "))
}

pub fn parse_network(text: &str, path: &Path) -> Result<Network, PersistError> {
    let body = strip_header(
        text,
        path,
        NETWORK_RECORD,
        &[INPUT_SIZE, HIDDEN_SIZE, OUTPUT_SIZE],
    )?;
    let values = parse_numbers(body, path, NETWORK_FIELDS)?;
    let (first, second) = values.split_at(INPUT_SIZE * HIDDEN_SIZE);

    let mut w1 = [[0.0; HIDDEN_SIZE]; INPUT_SIZE];
    for (row, chunk) in w1.iter_mut().zip(first.chunks_exact(HIDDEN_SIZE)) {
        row.copy_from_slice(chunk);
    }
    let mut w2 = [[0.0; OUTPUT_SIZE]; HIDDEN_SIZE];
    for (row, chunk) in w2.iter_mut().zip(second.chunks_exact(OUTPUT_SIZE)) {
        row.copy_from_slice(chunk);
    }
    Ok(Network::from_weights(w1, w2))
}

pub fn format_network(network: &Network) -> String {
    let mut out = format!("{NETWORK_RECORD} v{RECORD_VERSION} {INPUT_SIZE} {HIDDEN_SIZE} {OUTPUT_SIZE}\n");
    let rows = network
        .input_weights()
        .iter()
        .map(|row| row.as_slice())
        .chain(network.output_weights().iter().map(|row| row.as_slice()));
    for row in rows {
        let line: Vec<String> = row.iter().map(ToString::to_string).collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}

/// Load heuristic weights; `Ok(None)` if the file does not exist.
pub fn load_heuristic(path: &Path) -> Result<Option<HeuristicWeights>, PersistError> {
    read_optional(path)?
        .map(|text| parse_heuristic(&text, path))
        .transpose()
}

pub fn save_heuristic(path: &Path, weights: &HeuristicWeights) -> Result<(), PersistError> {
    write_atomic(path, &format_heuristic(weights))
}

/// Load network weights; `Ok(None)` if the file does not exist.
pub fn load_network(path: &Path) -> Result<Option<Network>, PersistError> {
    read_optional(path)?
        .map(|text| parse_network(&text, path))
        .transpose()
}

pub fn save_network(path: &Path, network: &Network) -> Result<(), PersistError> {
    write_atomic(path, &format_network(network))
}
