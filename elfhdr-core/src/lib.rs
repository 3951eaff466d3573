//! Decoding of ELF file headers, program headers and section headers.
//!
//! Typical use: decode a [`FileHeader`] from offset 0, build a
//! [`NativeReader`] from it with [`FileHeader::native_reader`], then decode
//! one [`ProgramHeader`] or [`SectionHeader`] per table entry after seeking
//! to it. [`ElfFile`] does all of that for seekable sources.

pub mod binary;
pub mod error;
mod header;
pub mod reader;
pub mod types;

#[cfg(test)]
mod testing;

pub use binary::*;
pub use error::{ElfError, Result};
pub use header::file::*;
pub use header::program::*;
pub use header::section::*;
pub use header::{Header, TableKind};
pub use reader::*;
pub use types::*;
