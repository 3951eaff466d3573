use std::fmt;

use bitflags::bitflags;

/// Program header segment type (`p_type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentType {
    Null,
    Load,
    Dynamic,
    Interp,
    Note,
    Shlib,
    Phdr,
    Tls,
    GnuEhFrame,
    GnuStack,
    GnuRelro,
    GnuProperty,
    PaxFlags,
    /// `PT_LOOS..=PT_HIOS` without a name of its own
    Os(u32),
    /// `PT_LOPROC..=PT_HIPROC`
    Processor(u32),
    Unknown(u32),
}

impl SegmentType {
    pub const LOOS: u32 = 0x6000_0000;
    pub const HIOS: u32 = 0x6fff_ffff;
    pub const LOPROC: u32 = 0x7000_0000;
    pub const HIPROC: u32 = 0x7fff_ffff;

    const GNU_EH_FRAME: u32 = 0x6474_e550;
    const GNU_STACK: u32 = 0x6474_e551;
    const GNU_RELRO: u32 = 0x6474_e552;
    const GNU_PROPERTY: u32 = 0x6474_e553;
    const PAX_FLAGS: u32 = 0x6504_1580;

    pub fn raw(self) -> u32 {
        match self {
            SegmentType::Null => 0,
            SegmentType::Load => 1,
            SegmentType::Dynamic => 2,
            SegmentType::Interp => 3,
            SegmentType::Note => 4,
            SegmentType::Shlib => 5,
            SegmentType::Phdr => 6,
            SegmentType::Tls => 7,
            SegmentType::GnuEhFrame => Self::GNU_EH_FRAME,
            SegmentType::GnuStack => Self::GNU_STACK,
            SegmentType::GnuRelro => Self::GNU_RELRO,
            SegmentType::GnuProperty => Self::GNU_PROPERTY,
            SegmentType::PaxFlags => Self::PAX_FLAGS,
            SegmentType::Os(raw) | SegmentType::Processor(raw) | SegmentType::Unknown(raw) => {
                raw
            }
        }
    }
}

impl From<u32> for SegmentType {
    fn from(raw: u32) -> Self {
        match raw {
            0 => SegmentType::Null,
            1 => SegmentType::Load,
            2 => SegmentType::Dynamic,
            3 => SegmentType::Interp,
            4 => SegmentType::Note,
            5 => SegmentType::Shlib,
            6 => SegmentType::Phdr,
            7 => SegmentType::Tls,
            Self::GNU_EH_FRAME => SegmentType::GnuEhFrame,
            Self::GNU_STACK => SegmentType::GnuStack,
            Self::GNU_RELRO => SegmentType::GnuRelro,
            Self::GNU_PROPERTY => SegmentType::GnuProperty,
            Self::PAX_FLAGS => SegmentType::PaxFlags,
            Self::LOOS..=Self::HIOS => SegmentType::Os(raw),
            Self::LOPROC..=Self::HIPROC => SegmentType::Processor(raw),
            _ => SegmentType::Unknown(raw),
        }
    }
}

impl fmt::Display for SegmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SegmentType::Null => "NULL",
            SegmentType::Load => "LOAD",
            SegmentType::Dynamic => "DYNAMIC",
            SegmentType::Interp => "INTERP",
            SegmentType::Note => "NOTE",
            SegmentType::Shlib => "SHLIB",
            SegmentType::Phdr => "PHDR",
            SegmentType::Tls => "TLS",
            SegmentType::GnuEhFrame => "GNU_EH_FRAME",
            SegmentType::GnuStack => "GNU_STACK",
            SegmentType::GnuRelro => "GNU_RELRO",
            SegmentType::GnuProperty => "GNU_PROPERTY",
            SegmentType::PaxFlags => "PAX_FLAGS",
            SegmentType::Os(raw) => return write!(f, "LOOS+{:#x}", raw - Self::LOOS),
            SegmentType::Processor(raw) => return write!(f, "LOPROC+{:#x}", raw - Self::LOPROC),
            SegmentType::Unknown(raw) => return write!(f, "unknown ({raw:#010x})"),
        };
        write!(f, "{}", name)
    }
}

bitflags! {
    /// Segment permission bits (`p_flags`). Unknown bits are retained.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SegmentFlags: u32 {
        const EXECUTE = 0x1;
        const WRITE = 0x2;
        const READ = 0x4;
    }
}

impl SegmentFlags {
    pub fn is_readable(self) -> bool {
        self.contains(Self::READ)
    }

    pub fn is_writable(self) -> bool {
        self.contains(Self::WRITE)
    }

    pub fn is_executable(self) -> bool {
        self.contains(Self::EXECUTE)
    }
}

impl From<u32> for SegmentFlags {
    fn from(raw: u32) -> Self {
        Self::from_bits_retain(raw)
    }
}

impl fmt::Display for SegmentFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = if self.is_readable() { 'r' } else { '-' };
        let w = if self.is_writable() { 'w' } else { '-' };
        let x = if self.is_executable() { 'x' } else { '-' };
        write!(f, "{r}{w}{x}")?;
        let unknown = self.bits() & !Self::all().bits();
        if unknown != 0 {
            write!(f, " +{unknown:#x}")?;
        }
        Ok(())
    }
}

/// Alignment constraint of a segment or section.
///
/// 0 and 1 mean "no constraint"; anything else should be a power of two.
/// An invalid value is kept as-is and only flagged when rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Alignment(pub u64);

impl Alignment {
    pub fn get(self) -> u64 {
        self.0
    }

    pub fn is_constrained(self) -> bool {
        self.0 > 1
    }

    pub fn is_valid(self) -> bool {
        self.0 == 0 || self.0.is_power_of_two()
    }
}

impl From<u64> for Alignment {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_constrained() {
            write!(f, "none")
        } else if self.is_valid() {
            write!(f, "{:#x} (2^{})", self.0, self.0.trailing_zeros())
        } else {
            write!(f, "{:#x} (invalid)", self.0)
        }
    }
}
