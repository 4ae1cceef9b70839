//! Edge-list and seed-file readers.
//!
//! Both formats are delimiter-separated tables where lines starting with `#` are comments.
//! The delimiter is sniffed from the first few non-comment lines.

use std::cmp::Reverse;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::graph::Network;
use crate::{Error, Result};

/// Candidate delimiters, in tie-breaking order.
const PREFERRED_DELIMITERS: [u8; 5] = [b'\t', b',', b';', b'|', b' '];

/// Punctuation commonly found inside gene/protein identifiers.
const IDENTIFIER_PUNCTUATION: &[u8] = b"-_.:'\"#";

/// Data rows inspected when sniffing.
const SNIFF_ROWS: usize = 5;

fn data_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().filter(|l| !l.starts_with('#') && !l.trim().is_empty())
}

fn field_count(row: &str, delimiter: u8) -> usize {
    row.trim()
        .split(delimiter as char)
        .filter(|f| !f.trim().is_empty())
        .count()
}

/// Best preferred delimiter for `rows`, if any splits the first row.
///
/// Candidates that split more of the sampled rows win; then the one leaving the fewest
/// fields in the first row; then [`PREFERRED_DELIMITERS`] order.
fn sniff_preferred(rows: &[&str]) -> Option<u8> {
    let first = rows.first()?;
    PREFERRED_DELIMITERS
        .iter()
        .enumerate()
        .filter_map(|(order, &d)| {
            let fields = field_count(first, d);
            (fields >= 2).then(|| {
                let split = rows.iter().filter(|r| field_count(r, d) >= 2).count();
                (Reverse(split), fields, order, d)
            })
        })
        .min()
        .map(|(.., d)| d)
}

/// Most frequent non-identifier punctuation byte that splits `row`.
fn sniff_punctuation(row: &str) -> Option<u8> {
    let mut counts = [0usize; 128];
    for &b in row.trim().as_bytes() {
        if b.is_ascii_punctuation() && !IDENTIFIER_PUNCTUATION.contains(&b) {
            counts[b as usize] += 1;
        }
    }
    // Highest count wins; on equal counts the smaller byte wins.
    counts
        .iter()
        .enumerate()
        .filter(|&(b, &c)| c > 0 && field_count(row, b as u8) >= 2)
        .max_by_key(|&(b, &c)| (c, Reverse(b)))
        .map(|(b, _)| b as u8)
}

/// Guess the single-byte delimiter of a table from its first data rows.
///
/// Comment and blank lines are skipped. Returns `None` when no candidate splits the first
/// data row into two non-empty fields (e.g. a single column).
pub fn sniff_delimiter(text: &str) -> Option<u8> {
    let rows: Vec<&str> = data_lines(text).take(SNIFF_ROWS).collect();
    sniff_preferred(&rows).or_else(|| rows.first().and_then(|r| sniff_punctuation(r)))
}

fn table_reader(text: &str, delimiter: u8) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes())
}

/// Read an undirected edge list: the first two columns of each row are the endpoints.
pub fn read_edge_list<R: Read>(mut reader: R) -> Result<Vec<(String, String)>> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;

    if data_lines(&text).next().is_none() {
        return Err(Error::InvalidInput("network file contains no edges".to_string()));
    }
    let delimiter = sniff_delimiter(&text).ok_or_else(|| {
        Error::InvalidInput("network file format not correct: no delimiter found".to_string())
    })?;
    let shown = (delimiter as char).escape_default().to_string();
    tracing::debug!(delimiter = %shown, "sniffed edge list delimiter");

    let mut edges = Vec::new();
    for record in table_reader(&text, delimiter).records() {
        let record = record?;
        let mut fields = record.iter().filter(|f| !f.is_empty());
        match (fields.next(), fields.next()) {
            (Some(u), Some(v)) => edges.push((u.to_string(), v.to_string())),
            (None, _) => continue,
            (Some(_), None) => {
                let line = record.position().map_or(0, |p| p.line());
                return Err(Error::InvalidInput(format!(
                    "network file line {line}: expected two columns"
                )));
            }
        }
    }
    Ok(edges)
}

/// Read seed identifiers, one per row; only the first column is used.
///
/// Only [`PREFERRED_DELIMITERS`] can split a seed row. Anything else, such as the `*` in
/// `HLA-A*02`, stays part of the identifier.
pub fn read_seeds<R: Read>(mut reader: R) -> Result<Vec<String>> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;

    let rows: Vec<&str> = data_lines(&text).take(SNIFF_ROWS).collect();
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let delimiter = sniff_preferred(&rows).unwrap_or(b'\t');

    let mut seeds = Vec::new();
    for record in table_reader(&text, delimiter).records() {
        let record = record?;
        if let Some(seed) = record.iter().find(|f| !f.is_empty()) {
            seeds.push(seed.to_string());
        }
    }
    Ok(seeds)
}

/// Load an edge list from `path`, restricted to its largest connected component.
pub fn load_network(path: impl AsRef<Path>) -> Result<Network> {
    let path = path.as_ref();
    let edges = read_edge_list(BufReader::new(File::open(path)?))?;
    let full = Network::from_edges(edges);
    let network = full.largest_component();
    if network.node_count() < full.node_count() {
        tracing::warn!(
            dropped = full.node_count() - network.node_count(),
            "nodes outside the largest connected component were dropped"
        );
    }
    tracing::info!(
        path = %path.display(),
        nodes = network.node_count(),
        edges = network.edge_count(),
        "loaded network"
    );
    Ok(network)
}

pub fn load_seeds(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let seeds = read_seeds(BufReader::new(File::open(path)?))?;
    tracing::info!(path = %path.display(), seeds = seeds.len(), "loaded seeds");
    Ok(seeds)
}
