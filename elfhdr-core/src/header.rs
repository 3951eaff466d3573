pub mod file;
pub mod program;
pub mod section;

use std::fmt;

use crate::reader::Class;
use crate::types::{Machine, ObjectType};

pub trait Header: std::fmt::Debug + Send + Sync {
    /// Returns the virtual address of the entry point.
    fn entry_point(&self) -> u64;

    /// Returns the target instruction set.
    fn machine(&self) -> Machine;

    /// Returns true if this is a 64-bit binary.
    fn is_64(&self) -> bool;

    /// Returns a short human-readable name, e.g. "ELF32" or "ELF64".
    fn format_name(&self) -> &'static str;

    /// Returns true if the binary represents an executable (vs object/lib).
    fn is_executable(&self) -> bool;

    fn object_type(&self) -> ObjectType;
}

/// The two header tables an ELF file header points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    ProgramHeaders,
    SectionHeaders,
}

impl TableKind {
    /// Entry size the format defines for this table in the given class.
    pub const fn standard_entry_size(self, class: Class) -> u16 {
        match (self, class) {
            (TableKind::ProgramHeaders, Class::Elf32) => 32,
            (TableKind::ProgramHeaders, Class::Elf64) => 56,
            (TableKind::SectionHeaders, Class::Elf32) => 40,
            (TableKind::SectionHeaders, Class::Elf64) => 64,
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::ProgramHeaders => write!(f, "program header"),
            TableKind::SectionHeaders => write!(f, "section header"),
        }
    }
}
