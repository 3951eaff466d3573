use crate::error::{ElfError, Result};
use crate::header::file::{FileHeader, TableDescriptor};
use crate::header::program::ProgramHeader;
use crate::header::section::SectionHeader;
use crate::header::TableKind;
use crate::reader::NativeReader;
use std::io::{self, Read, Seek, SeekFrom};

/// An ELF file with its header tables decoded.
#[derive(Debug, Clone)]
pub struct ElfFile {
    pub path: String,
    pub header: FileHeader,
    pub program_headers: Vec<ProgramHeader>,
    pub section_headers: Vec<SectionHeader>,
}

impl ElfFile {
    pub fn open<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let mut file =
            std::fs::File::open(&path).map_err(|source| ElfError::Io { offset: 0, source })?;
        let mut buf = Vec::new();
        file.read_to_end(&mut buf)
            .map_err(|source| ElfError::Io { offset: 0, source })?;
        log::info!("Read {} bytes from {}", buf.len(), path.as_ref().display());

        let mut elf = Self::from_reader(io::Cursor::new(&buf))?;
        elf.path = path.as_ref().display().to_string();
        Ok(elf)
    }

    /// Decodes the file header at offset 0, then every entry of both tables.
    pub fn from_reader<R: Read + Seek>(mut reader: R) -> Result<Self> {
        reader
            .seek(SeekFrom::Start(0))
            .map_err(|source| ElfError::Io { offset: 0, source })?;
        let header = FileHeader::from_reader(&mut reader)?;

        let mut native = header.native_reader(reader);
        let program_headers = read_table(
            &mut native,
            TableKind::ProgramHeaders,
            header.program_headers,
            ProgramHeader::from_reader,
        )?;
        for (index, ph) in program_headers.iter().enumerate() {
            if !ph.align.is_valid() {
                log::warn!("Program header {index} has invalid alignment {:#x}", ph.align.get());
            }
        }

        let section_headers = read_table(
            &mut native,
            TableKind::SectionHeaders,
            header.section_headers,
            SectionHeader::from_reader,
        )?;
        for (index, sh) in section_headers.iter().enumerate() {
            if !sh.align.is_valid() {
                log::warn!("Section header {index} has invalid alignment {:#x}", sh.align.get());
            }
        }

        Ok(Self {
            path: String::new(),
            header,
            program_headers,
            section_headers,
        })
    }

    /// The section holding section names, as named by `e_shstrndx`.
    pub fn section_names(&self) -> Option<&SectionHeader> {
        self.section_headers
            .get(usize::from(self.header.section_names_index))
    }
}

fn read_table<R, T>(
    native: &mut NativeReader<R>,
    table: TableKind,
    desc: TableDescriptor,
    decode: impl Fn(&mut NativeReader<R>) -> Result<T>,
) -> Result<Vec<T>>
where
    R: Read + Seek,
    T: std::fmt::Debug,
{
    if desc.is_empty() {
        log::info!("No {table} table");
        return Ok(Vec::new());
    }

    let standard = table.standard_entry_size(native.class());
    if desc.entry_size != standard {
        log::warn!(
            "{table} entries are {} bytes, {} expects {standard}",
            desc.entry_size,
            native.class()
        );
    }

    let mut entries = Vec::with_capacity(usize::from(desc.entry_count));
    for index in 0..desc.entry_count {
        let offset = desc
            .entry_offset(index)
            .ok_or(ElfError::EntryOffsetOverflow { table, index })?;
        native
            .get_mut()
            .seek(SeekFrom::Start(offset))
            .map_err(|source| ElfError::Io { offset, source })?;

        let entry = decode(native).map_err(|source| ElfError::Entry {
            table,
            index,
            source: Box::new(source),
        })?;
        log::trace!("{table} {index} at {offset:#x}: {entry:?}");
        entries.push(entry);
    }
    Ok(entries)
}
