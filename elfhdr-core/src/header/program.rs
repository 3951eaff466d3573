use std::io::Read;

use crate::error::{FieldContext, Result};
use crate::reader::{Class, NativeReader};
use crate::types::{Alignment, SegmentFlags, SegmentType};

/// One entry of the program header table (`ElfN_Phdr`), describing a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHeader {
    /// `p_type`
    pub kind: SegmentType,
    /// `p_flags`
    pub flags: SegmentFlags,
    /// File offset of the segment's first byte (`p_offset`).
    pub offset: u64,
    /// `p_vaddr`
    pub vaddr: u64,
    /// `p_paddr`, only meaningful where physical addressing is relevant.
    pub paddr: u64,
    /// Bytes of the segment present in the file (`p_filesz`).
    pub filesz: u64,
    /// Bytes of the segment once loaded (`p_memsz`).
    pub memsz: u64,
    /// `p_align`
    pub align: Alignment,
}

impl ProgramHeader {
    /// Decodes one entry. The reader must sit at the start of the entry.
    ///
    /// ELF64 stores `p_flags` right after `p_type`; ELF32 stores it after
    /// `p_memsz`.
    pub fn from_reader<R: Read>(reader: &mut NativeReader<R>) -> Result<ProgramHeader> {
        let kind = SegmentType::from(reader.read_u32().field("p_type")?);

        let mut flags = SegmentFlags::empty();
        if reader.class() == Class::Elf64 {
            flags = SegmentFlags::from(reader.read_u32().field("p_flags")?);
        }

        let offset = reader.read_word().field("p_offset")?;
        let vaddr = reader.read_word().field("p_vaddr")?;
        let paddr = reader.read_word().field("p_paddr")?;
        let filesz = reader.read_word().field("p_filesz")?;
        let memsz = reader.read_word().field("p_memsz")?;

        if reader.class() == Class::Elf32 {
            flags = SegmentFlags::from(reader.read_u32().field("p_flags")?);
        }

        let align = Alignment::from(reader.read_word().field("p_align")?);

        Ok(ProgramHeader {
            kind,
            flags,
            offset,
            vaddr,
            paddr,
            filesz,
            memsz,
            align,
        })
    }

    pub fn is_load(&self) -> bool {
        self.kind == SegmentType::Load
    }

    /// Bytes of the loaded segment with no file backing (e.g. `.bss`).
    pub fn bss_size(&self) -> u64 {
        self.memsz.saturating_sub(self.filesz)
    }
}
