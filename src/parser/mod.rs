//! Parser for the directory service's headline payload.
//!
//! The payload is gzip-compressed text in a legacy Japanese encoding. Each
//! program is a run of `KEY=VALUE` lines terminated by a blank line.

use std::collections::HashSet;
use std::io::Read;
use std::num::ParseIntError;
use std::str::FromStr;

use chrono::NaiveDateTime;
use encoding_rs::Encoding;
use flate2::read::GzDecoder;
use thiserror::Error;

use crate::app::{Result, WatchError};
use crate::domain::Program;

/// Accepted renderings of the TIMS field.
const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y/%m/%d %H:%M:%S"];

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidNumber {
        key: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("invalid start time: {value:?}")]
    InvalidTimestamp { value: String },
}

/// Converts one raw payload into a snapshot of [`Program`]s.
pub struct SnapshotParser {
    encoding: &'static Encoding,
}

impl SnapshotParser {
    /// Resolve the payload encoding from a label such as `"shift_jis"`.
    pub fn new(label: &str) -> Result<Self> {
        let encoding = Encoding::for_label(label.as_bytes())
            .ok_or_else(|| WatchError::UnknownEncoding(label.to_string()))?;
        Ok(Self { encoding })
    }

    /// Decompress, decode and parse one snapshot payload.
    pub fn parse(&self, body: &[u8]) -> Result<HashSet<Program>> {
        let mut decoder = GzDecoder::new(body);
        let mut raw = Vec::new();
        decoder.read_to_end(&mut raw)?;

        // Undecodable byte sequences are replaced, not fatal.
        let (text, _, _) = self.encoding.decode(&raw);
        Ok(self.parse_text(&text)?)
    }

    /// Parse an already-decoded line stream.
    ///
    /// A blank line terminates the record under construction; the record
    /// enters the result set only if both identity fields (SURL, TIMS) were
    /// seen. A trailing record with no closing blank line is dropped.
    pub fn parse_text(&self, text: &str) -> std::result::Result<HashSet<Program>, ParseError> {
        let mut programs = HashSet::new();
        let mut record = RecordBuilder::default();

        for line in text.lines() {
            if line.is_empty() {
                if let Some(program) = std::mem::take(&mut record).finish() {
                    programs.insert(program);
                }
                continue;
            }

            // Split on the first '='. A line without one, or with '=' as the
            // first character, carries no field and is skipped.
            if let Some((key, value)) = line.split_once('=') {
                if !key.is_empty() {
                    record.apply(key, value)?;
                }
            }
        }

        Ok(programs)
    }
}

#[derive(Default)]
struct RecordBuilder {
    detail_url: String,
    start_time: Option<NaiveDateTime>,
    title: String,
    dj: String,
    genre: String,
    description: String,
    related_url: String,
    mount: String,
    listeners: u32,
    total_listeners: u32,
    max_listeners: u32,
    bit_rate: u32,
    sample_rate: u32,
    channels: u32,
    format: String,
    song: String,
    server_host: String,
    server_port: u16,
}

impl RecordBuilder {
    fn apply(&mut self, key: &str, value: &str) -> std::result::Result<(), ParseError> {
        match key {
            "SURL" => self.detail_url = value.to_string(),
            "TIMS" => self.start_time = Some(parse_timestamp(value)?),
            "SRV" => self.server_host = value.to_string(),
            "PRT" => self.server_port = parse_number("PRT", value)?,
            "MNT" => self.mount = value.to_string(),
            "TYPE" => self.format = value.to_string(),
            "NAM" => self.title = value.to_string(),
            "GNL" => self.genre = value.to_string(),
            "DESC" => self.description = value.to_string(),
            "DJ" => self.dj = value.to_string(),
            "SONG" => self.song = value.to_string(),
            "URL" => self.related_url = value.to_string(),
            "CLN" => self.listeners = parse_number("CLN", value)?,
            "CLNS" => self.total_listeners = parse_number("CLNS", value)?,
            "MAX" => self.max_listeners = parse_number("MAX", value)?,
            "BIT" => self.bit_rate = parse_number("BIT", value)?,
            "SMPL" => self.sample_rate = parse_number("SMPL", value)?,
            "CHS" => self.channels = parse_number("CHS", value)?,
            // Unknown keys are tolerated so newer upstream fields don't
            // break older clients.
            _ => {}
        }
        Ok(())
    }

    /// A record counts only once both identity fields have been seen.
    fn finish(self) -> Option<Program> {
        if self.detail_url.is_empty() {
            return None;
        }
        let start_time = self.start_time?;

        Some(Program {
            title: self.title,
            dj: self.dj,
            genre: self.genre,
            description: self.description,
            related_url: self.related_url,
            mount: self.mount,
            start_time,
            listeners: self.listeners,
            total_listeners: self.total_listeners,
            max_listeners: self.max_listeners,
            bit_rate: self.bit_rate,
            sample_rate: self.sample_rate,
            channels: self.channels,
            format: self.format,
            song: self.song,
            detail_url: self.detail_url,
            server_host: self.server_host,
            server_port: self.server_port,
        })
    }
}

fn parse_number<T>(key: &'static str, value: &str) -> std::result::Result<T, ParseError>
where
    T: FromStr<Err = ParseIntError>,
{
    value.trim().parse().map_err(|source| ParseError::InvalidNumber {
        key,
        value: value.to_string(),
        source,
    })
}

fn parse_timestamp(value: &str) -> std::result::Result<NaiveDateTime, ParseError> {
    let value = value.trim();
    for format in TIMESTAMP_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(ts);
        }
    }
    Err(ParseError::InvalidTimestamp {
        value: value.to_string(),
    })
}
