//! Named values for the numeric codes found in ELF headers.
//!
//! These are presentation helpers only. Decoding never fails because a
//! code is unknown; such codes are kept raw and rendered as such.

pub mod section;
pub mod segment;

pub use section::*;
pub use segment::*;

use std::fmt;

/// Operating system ABI (`EI_OSABI`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsAbi {
    SystemV,
    HpUx,
    NetBsd,
    Linux,
    GnuHurd,
    Solaris,
    Aix,
    Irix,
    FreeBsd,
    Tru64,
    NovellModesto,
    OpenBsd,
    OpenVms,
    NonStopKernel,
    Aros,
    FenixOs,
    CloudAbi,
    OpenVos,
    Other(u8),
}

impl From<u8> for OsAbi {
    fn from(raw: u8) -> Self {
        match raw {
            0x00 => OsAbi::SystemV,
            0x01 => OsAbi::HpUx,
            0x02 => OsAbi::NetBsd,
            0x03 => OsAbi::Linux,
            0x04 => OsAbi::GnuHurd,
            0x06 => OsAbi::Solaris,
            0x07 => OsAbi::Aix,
            0x08 => OsAbi::Irix,
            0x09 => OsAbi::FreeBsd,
            0x0a => OsAbi::Tru64,
            0x0b => OsAbi::NovellModesto,
            0x0c => OsAbi::OpenBsd,
            0x0d => OsAbi::OpenVms,
            0x0e => OsAbi::NonStopKernel,
            0x0f => OsAbi::Aros,
            0x10 => OsAbi::FenixOs,
            0x11 => OsAbi::CloudAbi,
            0x12 => OsAbi::OpenVos,
            other => OsAbi::Other(other),
        }
    }
}

impl OsAbi {
    pub fn raw(self) -> u8 {
        match self {
            OsAbi::SystemV => 0x00,
            OsAbi::HpUx => 0x01,
            OsAbi::NetBsd => 0x02,
            OsAbi::Linux => 0x03,
            OsAbi::GnuHurd => 0x04,
            OsAbi::Solaris => 0x06,
            OsAbi::Aix => 0x07,
            OsAbi::Irix => 0x08,
            OsAbi::FreeBsd => 0x09,
            OsAbi::Tru64 => 0x0a,
            OsAbi::NovellModesto => 0x0b,
            OsAbi::OpenBsd => 0x0c,
            OsAbi::OpenVms => 0x0d,
            OsAbi::NonStopKernel => 0x0e,
            OsAbi::Aros => 0x0f,
            OsAbi::FenixOs => 0x10,
            OsAbi::CloudAbi => 0x11,
            OsAbi::OpenVos => 0x12,
            OsAbi::Other(raw) => raw,
        }
    }
}

impl fmt::Display for OsAbi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OsAbi::SystemV => "System V",
            OsAbi::HpUx => "HP-UX",
            OsAbi::NetBsd => "NetBSD",
            OsAbi::Linux => "Linux",
            OsAbi::GnuHurd => "GNU Hurd",
            OsAbi::Solaris => "Solaris",
            OsAbi::Aix => "AIX",
            OsAbi::Irix => "IRIX",
            OsAbi::FreeBsd => "FreeBSD",
            OsAbi::Tru64 => "Tru64",
            OsAbi::NovellModesto => "Novell Modesto",
            OsAbi::OpenBsd => "OpenBSD",
            OsAbi::OpenVms => "OpenVMS",
            OsAbi::NonStopKernel => "NonStop Kernel",
            OsAbi::Aros => "AROS",
            OsAbi::FenixOs => "Fenix OS",
            OsAbi::CloudAbi => "CloudABI",
            OsAbi::OpenVos => "Stratus Technologies OpenVOS",
            OsAbi::Other(raw) => return write!(f, "unknown ({raw:#04x})"),
        };
        write!(f, "{}", name)
    }
}

/// Object file type (`e_type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    None,
    Relocatable,
    Executable,
    SharedObject,
    Core,
    /// `ET_LOOS..=ET_HIOS`
    Os(u16),
    /// `ET_LOPROC..=ET_HIPROC`
    Processor(u16),
    Unknown(u16),
}

impl ObjectType {
    pub const LOOS: u16 = 0xfe00;
    pub const HIOS: u16 = 0xfeff;
    pub const LOPROC: u16 = 0xff00;
    pub const HIPROC: u16 = 0xffff;

    pub fn raw(self) -> u16 {
        match self {
            ObjectType::None => 0,
            ObjectType::Relocatable => 1,
            ObjectType::Executable => 2,
            ObjectType::SharedObject => 3,
            ObjectType::Core => 4,
            ObjectType::Os(raw) | ObjectType::Processor(raw) | ObjectType::Unknown(raw) => raw,
        }
    }
}

impl From<u16> for ObjectType {
    fn from(raw: u16) -> Self {
        match raw {
            0 => ObjectType::None,
            1 => ObjectType::Relocatable,
            2 => ObjectType::Executable,
            3 => ObjectType::SharedObject,
            4 => ObjectType::Core,
            Self::LOOS..=Self::HIOS => ObjectType::Os(raw),
            Self::LOPROC..=Self::HIPROC => ObjectType::Processor(raw),
            _ => ObjectType::Unknown(raw),
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectType::None => write!(f, "NONE (no file type)"),
            ObjectType::Relocatable => write!(f, "REL (relocatable file)"),
            ObjectType::Executable => write!(f, "EXEC (executable file)"),
            ObjectType::SharedObject => write!(f, "DYN (shared object file)"),
            ObjectType::Core => write!(f, "CORE (core file)"),
            ObjectType::Os(raw) => write!(f, "OS specific ({raw:#06x})"),
            ObjectType::Processor(raw) => write!(f, "processor specific ({raw:#06x})"),
            ObjectType::Unknown(raw) => write!(f, "unknown ({raw:#06x})"),
        }
    }
}

/// Target instruction set (`e_machine`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Machine {
    None,
    Sparc,
    X86,
    Mips,
    PowerPc,
    PowerPc64,
    S390,
    Arm,
    SuperH,
    Ia64,
    X86_64,
    Tms320C6000,
    AArch64,
    RiscV,
    Other(u16),
}

impl From<u16> for Machine {
    fn from(raw: u16) -> Self {
        match raw {
            0x00 => Machine::None,
            0x02 => Machine::Sparc,
            0x03 => Machine::X86,
            0x08 => Machine::Mips,
            0x14 => Machine::PowerPc,
            0x15 => Machine::PowerPc64,
            0x16 => Machine::S390,
            0x28 => Machine::Arm,
            0x2a => Machine::SuperH,
            0x32 => Machine::Ia64,
            0x3e => Machine::X86_64,
            0x8c => Machine::Tms320C6000,
            0xb7 => Machine::AArch64,
            0xf3 => Machine::RiscV,
            other => Machine::Other(other),
        }
    }
}

impl Machine {
    pub fn raw(self) -> u16 {
        match self {
            Machine::None => 0x00,
            Machine::Sparc => 0x02,
            Machine::X86 => 0x03,
            Machine::Mips => 0x08,
            Machine::PowerPc => 0x14,
            Machine::PowerPc64 => 0x15,
            Machine::S390 => 0x16,
            Machine::Arm => 0x28,
            Machine::SuperH => 0x2a,
            Machine::Ia64 => 0x32,
            Machine::X86_64 => 0x3e,
            Machine::Tms320C6000 => 0x8c,
            Machine::AArch64 => 0xb7,
            Machine::RiscV => 0xf3,
            Machine::Other(raw) => raw,
        }
    }
}

impl fmt::Display for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Machine::None => "none",
            Machine::Sparc => "SPARC",
            Machine::X86 => "x86",
            Machine::Mips => "MIPS",
            Machine::PowerPc => "PowerPC",
            Machine::PowerPc64 => "PowerPC64",
            Machine::S390 => "S390",
            Machine::Arm => "ARM",
            Machine::SuperH => "SuperH",
            Machine::Ia64 => "IA-64",
            Machine::X86_64 => "x86-64",
            Machine::Tms320C6000 => "TMS320C6000",
            Machine::AArch64 => "AArch64",
            Machine::RiscV => "RISC-V",
            Machine::Other(raw) => return write!(f, "unknown ({raw:#06x})"),
        };
        write!(f, "{}", name)
    }
}
