//! Document log record format
//!
//! ```text
//! +------------------+
//! | Record Length    | (u32 LE, whole record)
//! +------------------+
//! | Kind             | (u8: 1 = put, 2 = tombstone)
//! +------------------+
//! | Shoe ID          | (16 bytes)
//! +------------------+
//! | Body             | (length-prefixed JSON, empty for tombstones)
//! +------------------+
//! | Checksum         | (u32 LE)
//! +------------------+
//! ```
//!
//! The checksum covers every byte before it.

use crate::shoe::{Shoe, ShoeId};

use super::checksum::compute_checksum;
use super::errors::{StoreError, StoreResult};

/// length + kind + id + body length + checksum
pub const MIN_RECORD_SIZE: usize = 4 + 1 + 16 + 4 + 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Put = 1,
    Tombstone = 2,
}

impl RecordKind {
    fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            1 => Some(RecordKind::Put),
            2 => Some(RecordKind::Tombstone),
            _ => None,
        }
    }
}

/// One entry in the document log
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub kind: RecordKind,
    pub id: ShoeId,
    pub body: Vec<u8>,
}

impl LogRecord {
    /// Full-document write of `shoe`
    pub fn put(shoe: &Shoe) -> StoreResult<Self> {
        Ok(Self {
            kind: RecordKind::Put,
            id: shoe.id,
            body: serde_json::to_vec(shoe)?,
        })
    }

    pub fn tombstone(id: ShoeId) -> Self {
        Self {
            kind: RecordKind::Tombstone,
            id,
            body: Vec::new(),
        }
    }

    /// Decode the document carried by a put record
    pub fn document(&self) -> StoreResult<Shoe> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    pub fn serialize(&self) -> Vec<u8> {
        let record_length = MIN_RECORD_SIZE + self.body.len();

        let mut buf = Vec::with_capacity(record_length);
        buf.extend_from_slice(&(record_length as u32).to_le_bytes());
        buf.push(self.kind as u8);
        buf.extend_from_slice(self.id.as_bytes());
        buf.extend_from_slice(&(self.body.len() as u32).to_le_bytes());
        buf.extend_from_slice(&self.body);

        let checksum = compute_checksum(&buf);
        buf.extend_from_slice(&checksum.to_le_bytes());
        buf
    }

    /// Decode the record at the start of `data`, verifying its checksum.
    ///
    /// `offset` is only used for error context. Returns the record and the
    /// number of bytes consumed.
    pub fn deserialize(data: &[u8], offset: u64) -> StoreResult<(Self, usize)> {
        if data.len() < MIN_RECORD_SIZE {
            return Err(StoreError::corruption(
                offset,
                format!(
                    "truncated log: {} bytes remaining, minimum record size is {}",
                    data.len(),
                    MIN_RECORD_SIZE
                ),
            ));
        }

        let record_length = read_u32(data, 0) as usize;
        if record_length < MIN_RECORD_SIZE {
            return Err(StoreError::corruption(
                offset,
                format!("invalid record length: {}", record_length),
            ));
        }
        if record_length > data.len() {
            return Err(StoreError::corruption(
                offset,
                format!(
                    "record length {} exceeds remaining log size {}",
                    record_length,
                    data.len()
                ),
            ));
        }

        let checksum_offset = record_length - 4;
        let stored = read_u32(data, checksum_offset);
        let computed = compute_checksum(&data[..checksum_offset]);
        if stored != computed {
            return Err(StoreError::corruption(
                offset,
                format!(
                    "checksum mismatch: computed {:08x}, stored {:08x}",
                    computed, stored
                ),
            ));
        }

        let kind = RecordKind::from_byte(data[4]).ok_or_else(|| {
            StoreError::corruption(offset, format!("unknown record kind: {}", data[4]))
        })?;

        let mut id_bytes = [0u8; 16];
        id_bytes.copy_from_slice(&data[5..21]);

        let body_length = read_u32(data, 21) as usize;
        if 25 + body_length != checksum_offset {
            return Err(StoreError::corruption(
                offset,
                format!(
                    "body length {} disagrees with record length {}",
                    body_length, record_length
                ),
            ));
        }

        Ok((
            Self {
                kind,
                id: ShoeId::from_bytes(id_bytes),
                body: data[25..checksum_offset].to_vec(),
            },
            record_length,
        ))
    }
}

fn read_u32(data: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
}
