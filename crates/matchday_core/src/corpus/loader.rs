//! Fixed-size binary record reader for the probability corpus

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use crate::error::{MatchError, Result};

/// Bytes per corpus record.
pub const RECORD_SIZE: usize = 19;

/// Byte offsets inside a record.
pub mod offset {
    pub const Y: usize = 0;
    pub const X: usize = 1;
    pub const PRESSURE: usize = 2;
    pub const AREA: usize = 3;
    pub const ACTION: usize = 4;
    pub const RESULT_DESC: usize = 5;
    pub const CHALLENGE_Y: usize = 6;
    pub const CHALLENGE_TEAM: usize = 7;
    pub const CHALLENGE_ENDING: usize = 8;
    pub const RES_Y: usize = 9;
    pub const RES_X: usize = 10;
    pub const RES_PRESSURE: usize = 11;
    pub const RES_AREA: usize = 12;
    pub const RES_TEAM: usize = 13;
    pub const OTHER_RES: usize = 14;
    pub const POSSESSION_CHANGE: usize = 15;
    pub const CHALLENGE_TYPE: usize = 16;
    pub const ROW_ID: usize = 17;
    pub const SPECIAL_EVENT: usize = 18;
}

/// One untouched corpus row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRecord([u8; RECORD_SIZE]);

impl RawRecord {
    pub fn new(bytes: [u8; RECORD_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn bytes(&self) -> &[u8; RECORD_SIZE] {
        &self.0
    }

    pub fn y(&self) -> u8 {
        self.0[offset::Y]
    }

    pub fn x(&self) -> u8 {
        self.0[offset::X]
    }

    pub fn pressure(&self) -> u8 {
        self.0[offset::PRESSURE]
    }

    pub fn area(&self) -> u8 {
        self.0[offset::AREA]
    }

    pub fn action(&self) -> u8 {
        self.0[offset::ACTION]
    }

    pub fn result_desc(&self) -> u8 {
        self.0[offset::RESULT_DESC]
    }

    pub fn challenge_y(&self) -> u8 {
        self.0[offset::CHALLENGE_Y]
    }

    pub fn challenge_team(&self) -> u8 {
        self.0[offset::CHALLENGE_TEAM]
    }

    pub fn challenge_ending(&self) -> u8 {
        self.0[offset::CHALLENGE_ENDING]
    }

    pub fn result_y(&self) -> u8 {
        self.0[offset::RES_Y]
    }

    pub fn result_x(&self) -> u8 {
        self.0[offset::RES_X]
    }

    pub fn result_pressure(&self) -> u8 {
        self.0[offset::RES_PRESSURE]
    }

    pub fn result_area(&self) -> u8 {
        self.0[offset::RES_AREA]
    }

    pub fn result_team(&self) -> u8 {
        self.0[offset::RES_TEAM]
    }

    pub fn other_result(&self) -> u8 {
        self.0[offset::OTHER_RES]
    }

    pub fn possession_change(&self) -> u8 {
        self.0[offset::POSSESSION_CHANGE]
    }

    pub fn challenge_type(&self) -> u8 {
        self.0[offset::CHALLENGE_TYPE]
    }

    pub fn row_id(&self) -> u8 {
        self.0[offset::ROW_ID]
    }

    pub fn special_event(&self) -> u8 {
        self.0[offset::SPECIAL_EVENT]
    }
}

/// Fills `buf` as far as the reader allows; returns the bytes read.
fn read_full(reader: &mut impl Read, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}

/// Reads records until EOF. A short trailing record is an error, not silently dropped.
pub fn load_records(mut reader: impl Read) -> Result<Vec<RawRecord>> {
    let mut records = Vec::new();
    let mut buf = [0u8; RECORD_SIZE];
    loop {
        let len = read_full(&mut reader, &mut buf)?;
        if len == 0 {
            break;
        }
        if len != RECORD_SIZE {
            return Err(MatchError::TruncatedRecord {
                offset: (records.len() * RECORD_SIZE) as u64,
                len,
                expected: RECORD_SIZE,
            });
        }
        records.push(RawRecord(buf));
    }
    if records.is_empty() {
        return Err(MatchError::EmptyCorpus);
    }
    Ok(records)
}

pub fn load_file(path: &Path) -> Result<Vec<RawRecord>> {
    let file = File::open(path)?;
    let records = load_records(BufReader::new(file))?;
    log::info!("Loaded {} corpus records from {}", records.len(), path.display());
    Ok(records)
}
