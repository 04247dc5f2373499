//! Library metadata format
//!
//! A `.sblib` file carries the serialized metadata of one compiled library:
//! its name, version, and exported declaration table. The container is a
//! small binary envelope around a JSON payload:
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │ magic    [u8; 4]  "SBLB"                 │
//! │ version  u32 LE                          │
//! │ length   u32 LE   payload byte count     │
//! │ checksum u32 LE   crc32 of payload       │
//! ├──────────────────────────────────────────┤
//! │ payload  JSON-encoded LibraryMetadata    │
//! └──────────────────────────────────────────┘
//! ```
//!
//! Decoding is deterministic: the same bytes always produce the same
//! metadata, and any mismatch in magic, version, length, or checksum is
//! rejected before the payload is parsed.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Magic number for Sable library files: "SBLB"
pub const MAGIC: [u8; 4] = *b"SBLB";

/// Current library metadata format version
pub const VERSION: u32 = 1;

/// Size of the fixed container header in bytes
const HEADER_LEN: usize = 16;

/// Library metadata encoding/decoding errors
#[derive(Debug, Error)]
pub enum MetadataError {
    /// IO error reading or writing the file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File too short to hold the container header
    #[error("Truncated library file: {0} bytes, need at least {HEADER_LEN}")]
    Truncated(usize),

    /// Invalid magic number
    #[error("Invalid magic number: expected SBLB, got {0:?}")]
    InvalidMagic([u8; 4]),

    /// Unsupported format version
    #[error("Unsupported version: {0} (current: {VERSION})")]
    UnsupportedVersion(u32),

    /// Payload length in the header disagrees with the file
    #[error("Payload length mismatch: header says {expected}, file has {actual}")]
    LengthMismatch {
        /// Length declared in the header
        expected: usize,
        /// Bytes actually present after the header
        actual: usize,
    },

    /// Checksum mismatch
    #[error("Checksum mismatch: expected {expected:#x}, got {actual:#x}")]
    ChecksumMismatch {
        /// Checksum declared in the header
        expected: u32,
        /// Checksum computed over the payload
        actual: u32,
    },

    /// Payload is not valid metadata JSON
    #[error("Malformed metadata payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Kind of an exported declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclarationKind {
    /// Function declaration
    Function,
    /// Class declaration
    Class,
    /// Constant declaration
    Constant,
}

/// One exported declaration in a library's symbol table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    /// Fully qualified symbol name
    pub name: String,
    /// Kind of symbol
    pub kind: DeclarationKind,
}

/// Metadata of one compiled library
///
/// The declaration table is opaque to the configuration layer; it is carried
/// through to the type checker unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryMetadata {
    /// Library name
    pub name: String,
    /// Library version string
    pub version: String,
    /// Exported declarations
    pub declarations: Vec<Declaration>,
}

impl LibraryMetadata {
    /// Create metadata with an empty declaration table
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            declarations: Vec::new(),
        }
    }

    /// Encode into container bytes
    pub fn encode(&self) -> Result<Vec<u8>, MetadataError> {
        let payload = serde_json::to_vec(self)?;
        let checksum = crc32fast::hash(&payload);

        let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
        bytes.extend_from_slice(&MAGIC);
        bytes.extend_from_slice(&VERSION.to_le_bytes());
        bytes.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        bytes.extend_from_slice(&checksum.to_le_bytes());
        bytes.extend_from_slice(&payload);
        Ok(bytes)
    }

    /// Decode from container bytes
    pub fn decode(bytes: &[u8]) -> Result<Self, MetadataError> {
        if bytes.len() < HEADER_LEN {
            return Err(MetadataError::Truncated(bytes.len()));
        }

        let magic: [u8; 4] = bytes[0..4].try_into().unwrap();
        if magic != MAGIC {
            return Err(MetadataError::InvalidMagic(magic));
        }

        let version = u32::from_le_bytes(bytes[4..8].try_into().unwrap());
        if version != VERSION {
            return Err(MetadataError::UnsupportedVersion(version));
        }

        let length = u32::from_le_bytes(bytes[8..12].try_into().unwrap()) as usize;
        let payload = &bytes[HEADER_LEN..];
        if payload.len() != length {
            return Err(MetadataError::LengthMismatch {
                expected: length,
                actual: payload.len(),
            });
        }

        let expected = u32::from_le_bytes(bytes[12..16].try_into().unwrap());
        let actual = crc32fast::hash(payload);
        if expected != actual {
            return Err(MetadataError::ChecksumMismatch { expected, actual });
        }

        Ok(serde_json::from_slice(payload)?)
    }
}

/// Read library metadata from a `.sblib` file
pub fn read_library(path: &Path) -> Result<LibraryMetadata, MetadataError> {
    let bytes = fs::read(path)?;
    LibraryMetadata::decode(&bytes)
}

/// Write library metadata to a `.sblib` file
pub fn write_library(path: &Path, metadata: &LibraryMetadata) -> Result<(), MetadataError> {
    let bytes = metadata.encode()?;
    fs::write(path, bytes)?;
    Ok(())
}
