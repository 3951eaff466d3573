use std::fmt;

use bitflags::bitflags;

/// Section header type (`sh_type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionType {
    Null,
    ProgBits,
    SymTab,
    StrTab,
    Rela,
    Hash,
    Dynamic,
    Note,
    NoBits,
    Rel,
    Shlib,
    DynSym,
    InitArray,
    FiniArray,
    PreinitArray,
    Group,
    SymTabShndx,
    Num,
    /// `SHT_LOOS..=SHT_HIOS`
    Os(u32),
    /// `SHT_LOPROC..=SHT_HIPROC`
    Processor(u32),
    /// `SHT_LOUSER..=SHT_HIUSER`
    User(u32),
    Unknown(u32),
}

impl SectionType {
    pub const LOOS: u32 = 0x6000_0000;
    pub const HIOS: u32 = 0x6fff_ffff;
    pub const LOPROC: u32 = 0x7000_0000;
    pub const HIPROC: u32 = 0x7fff_ffff;
    pub const LOUSER: u32 = 0x8000_0000;
    pub const HIUSER: u32 = 0xffff_ffff;

    pub fn raw(self) -> u32 {
        match self {
            SectionType::Null => 0x00,
            SectionType::ProgBits => 0x01,
            SectionType::SymTab => 0x02,
            SectionType::StrTab => 0x03,
            SectionType::Rela => 0x04,
            SectionType::Hash => 0x05,
            SectionType::Dynamic => 0x06,
            SectionType::Note => 0x07,
            SectionType::NoBits => 0x08,
            SectionType::Rel => 0x09,
            SectionType::Shlib => 0x0a,
            SectionType::DynSym => 0x0b,
            SectionType::InitArray => 0x0e,
            SectionType::FiniArray => 0x0f,
            SectionType::PreinitArray => 0x10,
            SectionType::Group => 0x11,
            SectionType::SymTabShndx => 0x12,
            SectionType::Num => 0x13,
            SectionType::Os(raw)
            | SectionType::Processor(raw)
            | SectionType::User(raw)
            | SectionType::Unknown(raw) => raw,
        }
    }
}

impl From<u32> for SectionType {
    fn from(raw: u32) -> Self {
        match raw {
            0x00 => SectionType::Null,
            0x01 => SectionType::ProgBits,
            0x02 => SectionType::SymTab,
            0x03 => SectionType::StrTab,
            0x04 => SectionType::Rela,
            0x05 => SectionType::Hash,
            0x06 => SectionType::Dynamic,
            0x07 => SectionType::Note,
            0x08 => SectionType::NoBits,
            0x09 => SectionType::Rel,
            0x0a => SectionType::Shlib,
            0x0b => SectionType::DynSym,
            0x0e => SectionType::InitArray,
            0x0f => SectionType::FiniArray,
            0x10 => SectionType::PreinitArray,
            0x11 => SectionType::Group,
            0x12 => SectionType::SymTabShndx,
            0x13 => SectionType::Num,
            Self::LOOS..=Self::HIOS => SectionType::Os(raw),
            Self::LOPROC..=Self::HIPROC => SectionType::Processor(raw),
            Self::LOUSER..=Self::HIUSER => SectionType::User(raw),
            _ => SectionType::Unknown(raw),
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SectionType::Null => "NULL",
            SectionType::ProgBits => "PROGBITS",
            SectionType::SymTab => "SYMTAB",
            SectionType::StrTab => "STRTAB",
            SectionType::Rela => "RELA",
            SectionType::Hash => "HASH",
            SectionType::Dynamic => "DYNAMIC",
            SectionType::Note => "NOTE",
            SectionType::NoBits => "NOBITS",
            SectionType::Rel => "REL",
            SectionType::Shlib => "SHLIB",
            SectionType::DynSym => "DYNSYM",
            SectionType::InitArray => "INIT_ARRAY",
            SectionType::FiniArray => "FINI_ARRAY",
            SectionType::PreinitArray => "PREINIT_ARRAY",
            SectionType::Group => "GROUP",
            SectionType::SymTabShndx => "SYMTAB_SHNDX",
            SectionType::Num => "NUM",
            SectionType::Os(raw) => return write!(f, "OS specific ({raw:#010x})"),
            SectionType::Processor(raw) => return write!(f, "processor specific ({raw:#010x})"),
            SectionType::User(raw) => return write!(f, "user ({raw:#010x})"),
            SectionType::Unknown(raw) => return write!(f, "unknown ({raw:#010x})"),
        };
        write!(f, "{}", name)
    }
}

bitflags! {
    /// Section attribute bits (`sh_flags`).
    ///
    /// The raw word is stored untouched; the named bits are only a view
    /// over it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SectionFlags: u64 {
        const WRITE = 0x1;
        const ALLOC = 0x2;
        const EXECINSTR = 0x4;
        const MERGE = 0x10;
        const STRINGS = 0x20;
        const INFO_LINK = 0x40;
        const LINK_ORDER = 0x80;
        const OS_NONCONFORMING = 0x100;
        const GROUP = 0x200;
        const TLS = 0x400;
        const COMPRESSED = 0x800;
    }
}

impl SectionFlags {
    pub fn is_writable(self) -> bool {
        self.contains(Self::WRITE)
    }

    pub fn is_alloc(self) -> bool {
        self.contains(Self::ALLOC)
    }

    pub fn is_executable(self) -> bool {
        self.contains(Self::EXECINSTR)
    }

    /// readelf-style key letters, e.g. `AX` for `.text`.
    pub fn letters(self) -> String {
        const KEYS: [(SectionFlags, char); 11] = [
            (SectionFlags::WRITE, 'W'),
            (SectionFlags::ALLOC, 'A'),
            (SectionFlags::EXECINSTR, 'X'),
            (SectionFlags::MERGE, 'M'),
            (SectionFlags::STRINGS, 'S'),
            (SectionFlags::INFO_LINK, 'I'),
            (SectionFlags::LINK_ORDER, 'L'),
            (SectionFlags::OS_NONCONFORMING, 'O'),
            (SectionFlags::GROUP, 'G'),
            (SectionFlags::TLS, 'T'),
            (SectionFlags::COMPRESSED, 'C'),
        ];
        KEYS.iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, key)| *key)
            .collect()
    }
}

impl From<u64> for SectionFlags {
    fn from(raw: u64) -> Self {
        Self::from_bits_retain(raw)
    }
}

impl fmt::Display for SectionFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.bits())
    }
}
