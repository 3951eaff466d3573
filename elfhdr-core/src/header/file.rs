use std::io::Read;

use byteorder::ReadBytesExt;

use crate::error::{ElfError, FieldContext, Result};
use crate::header::Header;
use crate::reader::{ByteOrder, Class, NativeReader};
use crate::types::{Machine, ObjectType, OsAbi};

/// `0x7F`, `'E'`, `'L'`, `'F'`
pub const ELF_MAGIC: [u8; 4] = [0x7f, b'E', b'L', b'F'];

/// The only ELF version ever defined (`EV_CURRENT`).
pub const EV_CURRENT: u32 = 1;

/// Location and shape of the program or section header table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TableDescriptor {
    /// File offset of the first entry.
    pub offset: u64,
    /// Size in bytes of one entry.
    pub entry_size: u16,
    /// Number of entries.
    pub entry_count: u16,
}

impl TableDescriptor {
    pub fn is_empty(&self) -> bool {
        self.entry_count == 0
    }

    /// File offset of entry `index`, or `None` if it does not fit in a `u64`.
    pub fn entry_offset(&self, index: u16) -> Option<u64> {
        self.offset
            .checked_add(u64::from(index) * u64::from(self.entry_size))
    }

    /// Total size of the table in bytes.
    pub fn byte_len(&self) -> u64 {
        u64::from(self.entry_size) * u64::from(self.entry_count)
    }
}

/// The ELF file header (`ElfN_Ehdr`).
///
/// Covers both classes: every address and offset is widened to `u64`.
/// Appears at offset 0 of every ELF file and describes how the rest of
/// the file is laid out.
///
/// Reference: [ELF Specification v1.2](https://refspecs.linuxfoundation.org/elf/elf.pdf)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileHeader {
    /// 32-bit or 64-bit addressing (`EI_CLASS`).
    ///
    /// Fixes the width of every native word field after the identification
    /// prefix.
    pub class: Class,

    /// Byte order of every multi-byte field (`EI_DATA`).
    pub byte_order: ByteOrder,

    /// Target operating system ABI (`EI_OSABI`).
    pub os_abi: OsAbi,

    /// ABI version, meaning depends on `os_abi` (`EI_ABIVERSION`).
    pub abi_version: u8,

    /// Object file type (`e_type`).
    ///
    /// Common values:
    /// - `ET_REL` (1): Relocatable file
    /// - `ET_EXEC` (2): Executable file
    /// - `ET_DYN` (3): Shared object
    /// - `ET_CORE` (4): Core dump
    pub object_type: ObjectType,

    /// Target architecture (`e_machine`).
    pub machine: Machine,

    /// Virtual address of the program entry point (`e_entry`).
    ///
    /// Zero when the file has no associated entry point.
    pub entry: u64,

    /// Program header table (`e_phoff`, `e_phentsize`, `e_phnum`).
    pub program_headers: TableDescriptor,

    /// Section header table (`e_shoff`, `e_shentsize`, `e_shnum`).
    pub section_headers: TableDescriptor,

    /// Processor-specific flags (`e_flags`).
    pub flags: u32,

    /// Size of this header as recorded in the file (`e_ehsize`).
    ///
    /// Always equal to [`Class::header_size`] for a decoded header.
    pub header_size: u16,

    /// Index of the section holding section names (`e_shstrndx`).
    ///
    /// Always less than `section_headers.entry_count`.
    pub section_names_index: u16,
}

impl FileHeader {
    /// Decodes a file header from a stream positioned at offset 0.
    ///
    /// Consumes exactly [`Class::header_size`] bytes on success.
    pub fn from_reader<R: Read>(reader: &mut R) -> Result<FileHeader> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic).field("EI_MAG")?;
        if magic != ELF_MAGIC {
            return Err(ElfError::InvalidMagic { found: magic });
        }

        // Byte order is unknown until EI_DATA, so the prefix is read bytewise.
        let class = Class::from_raw(reader.read_u8().field("EI_CLASS")?)?;
        let byte_order = ByteOrder::from_raw(reader.read_u8().field("EI_DATA")?)?;
        let ident_version = reader.read_u8().field("EI_VERSION")?;
        if u32::from(ident_version) != EV_CURRENT {
            return Err(ElfError::VersionMismatch {
                field: "EI_VERSION",
                found: ident_version.into(),
            });
        }
        let os_abi = OsAbi::from(reader.read_u8().field("EI_OSABI")?);
        let abi_version = reader.read_u8().field("EI_ABIVERSION")?;
        let mut padding = [0u8; 7];
        reader.read_exact(&mut padding).field("EI_PAD")?;

        let mut native = NativeReader::new(class, byte_order, &mut *reader);

        let object_type = ObjectType::from(native.read_u16().field("e_type")?);
        let machine = Machine::from(native.read_u16().field("e_machine")?);
        let version = native.read_u32().field("e_version")?;
        if version != EV_CURRENT {
            return Err(ElfError::VersionMismatch {
                field: "e_version",
                found: version,
            });
        }

        let entry = native.read_word().field("e_entry")?;
        let mut program_headers = TableDescriptor {
            offset: native.read_word().field("e_phoff")?,
            ..Default::default()
        };
        let mut section_headers = TableDescriptor {
            offset: native.read_word().field("e_shoff")?,
            ..Default::default()
        };

        let flags = native.read_u32().field("e_flags")?;
        let header_size = native.read_u16().field("e_ehsize")?;
        if header_size != class.header_size() {
            return Err(ElfError::HeaderSizeMismatch {
                class,
                expected: class.header_size(),
                found: header_size,
            });
        }

        program_headers.entry_size = native.read_u16().field("e_phentsize")?;
        program_headers.entry_count = native.read_u16().field("e_phnum")?;
        section_headers.entry_size = native.read_u16().field("e_shentsize")?;
        section_headers.entry_count = native.read_u16().field("e_shnum")?;

        let section_names_index = native.read_u16().field("e_shstrndx")?;
        if section_names_index >= section_headers.entry_count {
            return Err(ElfError::NameIndexOutOfRange {
                index: section_names_index,
                count: section_headers.entry_count,
            });
        }

        let header = FileHeader {
            class,
            byte_order,
            os_abi,
            abi_version,
            object_type,
            machine,
            entry,
            program_headers,
            section_headers,
            flags,
            header_size,
            section_names_index,
        };
        log::debug!(
            "{} {} {} for {}, entry {:#x}, {} program headers, {} section headers",
            header.class,
            header.byte_order,
            header.object_type,
            header.machine,
            header.entry,
            header.program_headers.entry_count,
            header.section_headers.entry_count
        );
        Ok(header)
    }

    /// Wraps `reader` in a [`NativeReader`] matching this file's class and byte order.
    pub fn native_reader<R: Read>(&self, reader: R) -> NativeReader<R> {
        NativeReader::new(self.class, self.byte_order, reader)
    }
}

impl Header for FileHeader {
    fn entry_point(&self) -> u64 {
        self.entry
    }

    fn machine(&self) -> Machine {
        self.machine
    }

    fn is_64(&self) -> bool {
        self.class == Class::Elf64
    }

    fn format_name(&self) -> &'static str {
        match self.class {
            Class::Elf32 => "ELF32",
            Class::Elf64 => "ELF64",
        }
    }

    fn is_executable(&self) -> bool {
        self.object_type == ObjectType::Executable
    }

    fn object_type(&self) -> ObjectType {
        self.object_type
    }
}
