use std::io::Read;

use crate::error::{FieldContext, Result};
use crate::reader::NativeReader;
use crate::types::{Alignment, SectionFlags, SectionType};

/// One entry of the section header table (`ElfN_Shdr`).
///
/// `name`, `link` and `info` are kept as raw indices; resolving them
/// needs the rest of the file and is left to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionHeader {
    /// Offset of the name in the section name string table (`sh_name`).
    pub name: u32,
    pub kind: SectionType,
    pub flags: SectionFlags,
    pub addr: u64,
    pub offset: u64,
    pub size: u64,
    /// Section index whose meaning depends on `kind` (`sh_link`).
    pub link: u32,
    pub info: u32,
    pub align: Alignment,
    /// Size of one entry for sections holding a table, otherwise 0.
    pub entsize: u64,
}

impl SectionHeader {
    /// Decodes one entry. Field order is the same in both classes.
    pub fn from_reader<R: Read>(reader: &mut NativeReader<R>) -> Result<SectionHeader> {
        Ok(SectionHeader {
            name: reader.read_u32().field("sh_name")?,
            kind: SectionType::from(reader.read_u32().field("sh_type")?),
            flags: SectionFlags::from(reader.read_word().field("sh_flags")?),
            addr: reader.read_word().field("sh_addr")?,
            offset: reader.read_word().field("sh_offset")?,
            size: reader.read_word().field("sh_size")?,
            link: reader.read_u32().field("sh_link")?,
            info: reader.read_u32().field("sh_info")?,
            align: Alignment::from(reader.read_word().field("sh_addralign")?),
            entsize: reader.read_word().field("sh_entsize")?,
        })
    }

    /// True if the section occupies bytes in the file.
    pub fn has_file_data(&self) -> bool {
        !matches!(self.kind, SectionType::NoBits | SectionType::Null)
    }
}
