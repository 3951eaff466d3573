//! Integer readers parameterised by byte order and ELF class.
//!
//! [`IntReader`] decodes fixed-width integers under a [`ByteOrder`].
//! [`NativeReader`] adds a [`Class`] and is the only place that decides
//! whether an address, offset or size field is 4 or 8 bytes wide.

use std::fmt;
use std::io::{self, Read};

use byteorder::{BigEndian, LittleEndian, ReadBytesExt};

use crate::error::{ElfError, Result};

/// Byte order of every multi-byte field after the identification prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    Little,
    Big,
}

impl ByteOrder {
    /// Decodes the `EI_DATA` byte (1 = little, 2 = big).
    pub const fn from_raw(raw: u8) -> Result<Self> {
        match raw {
            1 => Ok(ByteOrder::Little),
            2 => Ok(ByteOrder::Big),
            _ => Err(ElfError::UnsupportedByteOrder(raw)),
        }
    }

    pub const fn raw(self) -> u8 {
        match self {
            ByteOrder::Little => 1,
            ByteOrder::Big => 2,
        }
    }

    pub fn read_u16<R: Read>(self, reader: &mut R) -> io::Result<u16> {
        match self {
            ByteOrder::Little => reader.read_u16::<LittleEndian>(),
            ByteOrder::Big => reader.read_u16::<BigEndian>(),
        }
    }

    pub fn read_u32<R: Read>(self, reader: &mut R) -> io::Result<u32> {
        match self {
            ByteOrder::Little => reader.read_u32::<LittleEndian>(),
            ByteOrder::Big => reader.read_u32::<BigEndian>(),
        }
    }

    pub fn read_u64<R: Read>(self, reader: &mut R) -> io::Result<u64> {
        match self {
            ByteOrder::Little => reader.read_u64::<LittleEndian>(),
            ByteOrder::Big => reader.read_u64::<BigEndian>(),
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ByteOrder::Little => write!(f, "little endian"),
            ByteOrder::Big => write!(f, "big endian"),
        }
    }
}

/// Addressing model of an ELF file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Class {
    Elf32,
    Elf64,
}

impl Class {
    /// Decodes the `EI_CLASS` byte (1 = 32-bit, 2 = 64-bit).
    pub const fn from_raw(raw: u8) -> Result<Self> {
        match raw {
            1 => Ok(Class::Elf32),
            2 => Ok(Class::Elf64),
            _ => Err(ElfError::UnsupportedClass(raw)),
        }
    }

    pub const fn raw(self) -> u8 {
        match self {
            Class::Elf32 => 1,
            Class::Elf64 => 2,
        }
    }

    /// Width in bytes of a native word (address, offset or size).
    pub const fn word_size(self) -> usize {
        match self {
            Class::Elf32 => 4,
            Class::Elf64 => 8,
        }
    }

    /// The only file header size this class allows.
    pub const fn header_size(self) -> u16 {
        match self {
            Class::Elf32 => 52,
            Class::Elf64 => 64,
        }
    }

    /// Reads one native word, zero-extending 32-bit words.
    pub fn read_word<R: Read>(self, order: ByteOrder, reader: &mut R) -> io::Result<u64> {
        match self {
            Class::Elf32 => order.read_u32(reader).map(u64::from),
            Class::Elf64 => order.read_u64(reader),
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Class::Elf32 => write!(f, "ELF32"),
            Class::Elf64 => write!(f, "ELF64"),
        }
    }
}

/// Reads unsigned integers from a byte stream under a fixed byte order.
#[derive(Debug)]
pub struct IntReader<R> {
    order: ByteOrder,
    inner: R,
}

impl<R: Read> IntReader<R> {
    pub fn new(order: ByteOrder, inner: R) -> Self {
        Self { order, inner }
    }

    pub fn big_endian(inner: R) -> Self {
        Self::new(ByteOrder::Big, inner)
    }

    pub fn little_endian(inner: R) -> Self {
        Self::new(ByteOrder::Little, inner)
    }

    pub fn read_u8(&mut self) -> io::Result<u8> {
        self.inner.read_u8()
    }

    pub fn read_u16(&mut self) -> io::Result<u16> {
        self.order.read_u16(&mut self.inner)
    }

    pub fn read_u32(&mut self) -> io::Result<u32> {
        self.order.read_u32(&mut self.inner)
    }

    pub fn read_u64(&mut self) -> io::Result<u64> {
        self.order.read_u64(&mut self.inner)
    }
}

impl<R> IntReader<R> {
    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

/// An [`IntReader`] bound to an ELF class.
///
/// Every address, offset and size field must go through
/// [`NativeReader::read_word`]; the fixed-width reads are for fields whose
/// width is the same in both classes.
#[derive(Debug)]
pub struct NativeReader<R> {
    class: Class,
    ints: IntReader<R>,
}

impl<R: Read> NativeReader<R> {
    pub fn new(class: Class, order: ByteOrder, inner: R) -> Self {
        Self::from_int_reader(class, IntReader::new(order, inner))
    }

    pub fn from_int_reader(class: Class, ints: IntReader<R>) -> Self {
        Self { class, ints }
    }

    pub fn read_word(&mut self) -> io::Result<u64> {
        self.class.read_word(self.ints.order, &mut self.ints.inner)
    }

    pub fn read_u8(&mut self) -> io::Result<u8> {
        self.ints.read_u8()
    }

    pub fn read_u16(&mut self) -> io::Result<u16> {
        self.ints.read_u16()
    }

    pub fn read_u32(&mut self) -> io::Result<u32> {
        self.ints.read_u32()
    }
}

impl<R> NativeReader<R> {
    pub fn class(&self) -> Class {
        self.class
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.ints.byte_order()
    }

    pub fn get_ref(&self) -> &R {
        self.ints.get_ref()
    }

    pub fn get_mut(&mut self) -> &mut R {
        self.ints.get_mut()
    }

    pub fn into_inner(self) -> R {
        self.ints.into_inner()
    }
}
