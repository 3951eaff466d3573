use std::io;

use thiserror::Error;

use crate::header::TableKind;
use crate::reader::Class;

/// Errors raised while decoding ELF header structures.
#[derive(Error, Debug)]
pub enum ElfError {
    /// The byte source ran dry (or failed) in the middle of a field.
    #[error("short read of {field}: {source}")]
    ShortRead {
        field: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("invalid ELF magic: {found:02x?}")]
    InvalidMagic { found: [u8; 4] },

    #[error("unsupported ELF class: {0}")]
    UnsupportedClass(u8),

    #[error("unsupported ELF byte order: {0}")]
    UnsupportedByteOrder(u8),

    #[error("unsupported ELF version in {field}: {found}")]
    VersionMismatch { field: &'static str, found: u32 },

    #[error("ELF header size mismatch for {class}: expected {expected}, got {found}")]
    HeaderSizeMismatch {
        class: Class,
        expected: u16,
        found: u16,
    },

    #[error("section name table index {index} out of range for {count} sections")]
    NameIndexOutOfRange { index: u16, count: u16 },

    /// Wraps an error raised while decoding one entry of a header table.
    #[error("{table} entry {index}: {source}")]
    Entry {
        table: TableKind,
        index: u16,
        #[source]
        source: Box<ElfError>,
    },

    #[error("{table} entry {index} lies beyond the addressable range")]
    EntryOffsetOverflow { table: TableKind, index: u16 },

    #[error("I/O error at offset {offset:#x}: {source}")]
    Io {
        offset: u64,
        #[source]
        source: io::Error,
    },
}

impl ElfError {
    /// Returns true when the bytes were readable but violate the ELF format.
    pub fn is_format_error(&self) -> bool {
        match self {
            ElfError::InvalidMagic { .. }
            | ElfError::UnsupportedClass(_)
            | ElfError::UnsupportedByteOrder(_)
            | ElfError::VersionMismatch { .. }
            | ElfError::HeaderSizeMismatch { .. }
            | ElfError::NameIndexOutOfRange { .. }
            | ElfError::EntryOffsetOverflow { .. } => true,
            ElfError::Entry { source, .. } => source.is_format_error(),
            ElfError::ShortRead { .. } | ElfError::Io { .. } => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ElfError>;

/// Attaches the name of the wire field to a raw I/O result.
pub(crate) trait FieldContext<T> {
    fn field(self, field: &'static str) -> Result<T>;
}

impl<T> FieldContext<T> for io::Result<T> {
    fn field(self, field: &'static str) -> Result<T> {
        self.map_err(|source| ElfError::ShortRead { field, source })
    }
}
