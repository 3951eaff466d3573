//! Synthetic ELF images for unit tests.

use byteorder::{BigEndian, ByteOrder as _, LittleEndian, WriteBytesExt};

use crate::header::file::ELF_MAGIC;
use crate::header::TableKind;
use crate::reader::{ByteOrder, Class};

/// Writes integers with a chosen class and byte order.
pub(crate) struct Emitter {
    class: Class,
    order: ByteOrder,
    pub bytes: Vec<u8>,
}

impl Emitter {
    pub fn new(class: Class, order: ByteOrder) -> Self {
        Self {
            class,
            order,
            bytes: Vec::new(),
        }
    }

    pub fn u8(&mut self, value: u8) -> &mut Self {
        self.bytes.push(value);
        self
    }

    pub fn u16(&mut self, value: u16) -> &mut Self {
        let written = match self.order {
            ByteOrder::Little => self.bytes.write_u16::<LittleEndian>(value),
            ByteOrder::Big => self.bytes.write_u16::<BigEndian>(value),
        };
        written.unwrap();
        self
    }

    pub fn u32(&mut self, value: u32) -> &mut Self {
        let written = match self.order {
            ByteOrder::Little => self.bytes.write_u32::<LittleEndian>(value),
            ByteOrder::Big => self.bytes.write_u32::<BigEndian>(value),
        };
        written.unwrap();
        self
    }

    pub fn u64(&mut self, value: u64) -> &mut Self {
        let written = match self.order {
            ByteOrder::Little => self.bytes.write_u64::<LittleEndian>(value),
            ByteOrder::Big => self.bytes.write_u64::<BigEndian>(value),
        };
        written.unwrap();
        self
    }

    pub fn word(&mut self, value: u64) -> &mut Self {
        match self.class {
            Class::Elf32 => self.u32(u32::try_from(value).unwrap()),
            Class::Elf64 => self.u64(value),
        }
    }

    pub fn pad_to(&mut self, len: usize) -> &mut Self {
        assert!(self.bytes.len() <= len);
        self.bytes.resize(len, 0);
        self
    }
}

pub(crate) struct RawSegment {
    pub kind: u32,
    pub flags: u32,
    pub offset: u64,
    pub vaddr: u64,
    pub paddr: u64,
    pub filesz: u64,
    pub memsz: u64,
    pub align: u64,
}

impl RawSegment {
    pub fn write(&self, out: &mut Emitter) {
        out.u32(self.kind);
        if out.class == Class::Elf64 {
            out.u32(self.flags);
        }
        out.word(self.offset)
            .word(self.vaddr)
            .word(self.paddr)
            .word(self.filesz)
            .word(self.memsz);
        if out.class == Class::Elf32 {
            out.u32(self.flags);
        }
        out.word(self.align);
    }
}

pub(crate) struct RawSection {
    pub name: &'static str,
    pub kind: u32,
    pub flags: u64,
    pub addr: u64,
    pub size: u64,
    pub link: u32,
    pub info: u32,
    pub align: u64,
    pub entsize: u64,
}

impl RawSection {
    pub fn write(&self, out: &mut Emitter, name: u32, offset: u64) {
        out.u32(name)
            .u32(self.kind)
            .word(self.flags)
            .word(self.addr)
            .word(offset)
            .word(self.size)
            .u32(self.link)
            .u32(self.info)
            .word(self.align)
            .word(self.entsize);
    }
}

/// Lays out a complete image: file header, program header table, section
/// contents, then the section header table.
pub(crate) struct ImageBuilder {
    pub class: Class,
    pub order: ByteOrder,
    pub os_abi: u8,
    pub object_type: u16,
    pub machine: u16,
    pub entry: u64,
    pub flags: u32,
    pub segments: Vec<RawSegment>,
    pub sections: Vec<RawSection>,
    section_table: bool,
}

impl ImageBuilder {
    pub fn new(class: Class, order: ByteOrder) -> Self {
        Self {
            class,
            order,
            os_abi: 0,
            object_type: 2,
            machine: 0x3e,
            entry: 0,
            flags: 0,
            segments: Vec::new(),
            sections: Vec::new(),
            section_table: true,
        }
    }

    /// Drops the section header table entirely (`e_shnum` = 0).
    pub fn without_section_table(&mut self) -> &mut Self {
        self.section_table = false;
        self
    }

    pub fn phoff(&self) -> u64 {
        if self.segments.is_empty() {
            0
        } else {
            u64::from(self.class.header_size())
        }
    }

    pub fn build(&self) -> Vec<u8> {
        let class = self.class;
        let ehsize = class.header_size();
        let phentsize = TableKind::ProgramHeaders.standard_entry_size(class);
        let shentsize = TableKind::SectionHeaders.standard_entry_size(class);
        let phnum = u16::try_from(self.segments.len()).unwrap();

        // .shstrtab contents and per-section name offsets
        let mut strtab = vec![0u8];
        let mut names = Vec::new();
        for section in &self.sections {
            names.push(u32::try_from(strtab.len()).unwrap());
            strtab.extend(section.name.as_bytes());
            strtab.push(0);
        }
        let strtab_name = u32::try_from(strtab.len()).unwrap();
        strtab.extend(b".shstrtab\0");

        let mut cursor = usize::from(ehsize) + usize::from(phentsize) * self.segments.len();
        let mut offsets = Vec::new();
        for section in &self.sections {
            cursor = cursor.next_multiple_of(16);
            offsets.push(cursor);
            cursor += usize::try_from(section.size).unwrap();
        }
        let strtab_offset = cursor;
        cursor += strtab.len();
        let shoff = cursor.next_multiple_of(8);

        let (shoff_field, shnum, shstrndx) = if self.section_table {
            let shnum = u16::try_from(self.sections.len() + 2).unwrap();
            (shoff as u64, shnum, shnum - 1)
        } else {
            (0, 0, 0)
        };

        let mut out = Emitter::new(class, self.order);
        out.bytes.extend(ELF_MAGIC);
        out.u8(class.raw())
            .u8(self.order.raw())
            .u8(1)
            .u8(self.os_abi)
            .u8(0)
            .pad_to(16);
        out.u16(self.object_type)
            .u16(self.machine)
            .u32(1)
            .word(self.entry)
            .word(self.phoff())
            .word(shoff_field)
            .u32(self.flags)
            .u16(ehsize)
            .u16(phentsize)
            .u16(phnum)
            .u16(shentsize)
            .u16(shnum)
            .u16(shstrndx);
        assert_eq!(out.bytes.len(), usize::from(ehsize));

        for segment in &self.segments {
            segment.write(&mut out);
        }

        // Section contents are zero filled.
        out.pad_to(strtab_offset);
        out.bytes.extend(&strtab);
        out.pad_to(shoff);

        if self.section_table {
            RawSection {
                name: "",
                kind: 0,
                flags: 0,
                addr: 0,
                size: 0,
                link: 0,
                info: 0,
                align: 0,
                entsize: 0,
            }
            .write(&mut out, 0, 0);
            for ((section, name), offset) in self.sections.iter().zip(&names).zip(&offsets) {
                section.write(&mut out, *name, *offset as u64);
            }
            RawSection {
                name: ".shstrtab",
                kind: 3,
                flags: 0,
                addr: 0,
                size: strtab.len() as u64,
                link: 0,
                info: 0,
                align: 1,
                entsize: 0,
            }
            .write(&mut out, strtab_name, strtab_offset as u64);
        }

        out.bytes
    }
}

fn segment(kind: u32, flags: u32, offset: u64, vaddr: u64, size: (u64, u64), align: u64) -> RawSegment {
    RawSegment {
        kind,
        flags,
        offset,
        vaddr,
        paddr: vaddr,
        filesz: size.0,
        memsz: size.1,
        align,
    }
}

fn section(name: &'static str, kind: u32, flags: u64, addr: u64, size: u64, align: u64) -> RawSection {
    RawSection {
        name,
        kind,
        flags,
        addr,
        size,
        link: 0,
        info: 0,
        align,
        entsize: 0,
    }
}

/// Segments of a statically linked hello world: PHDR, three LOADs, GNU_STACK.
fn hello_segments(builder: &ImageBuilder, base: u64, page: u64) -> Vec<RawSegment> {
    let phoff = u64::from(builder.class.header_size());
    let phsize = 5 * u64::from(TableKind::ProgramHeaders.standard_entry_size(builder.class));
    let word = builder.class.word_size() as u64;
    vec![
        segment(6, 0x4, phoff, base + phoff, (phsize, phsize), word),
        segment(1, 0x5, 0, base, (0x100, 0x100), page),
        segment(1, 0x4, 0x100, base + page + 0x100, (0x20, 0x20), page),
        segment(1, 0x6, 0x120, base + 2 * page + 0x120, (0x10, 0x40), page),
        segment(0x6474_e551, 0x6, 0, 0, (0, 0), 0x10),
    ]
}

fn hello_sections(base: u64) -> Vec<RawSection> {
    vec![
        section(".text", 1, 0x6, base + 0x1000, 0x40, 32),
        section(".rodata", 1, 0x2, base + 0x2000, 0x20, 32),
        section(".data", 1, 0x3, base + 0x3000, 0x10, 8),
        section(".bss", 8, 0x3, base + 0x3010, 0x30, 32),
    ]
}

/// Little-endian 32-bit x86 executable.
pub(crate) fn linux_386() -> Vec<u8> {
    let base = 0x0804_8000;
    let mut builder = ImageBuilder::new(Class::Elf32, ByteOrder::Little);
    builder.machine = 0x03;
    builder.entry = 0x0809_a1c0;
    builder.segments = hello_segments(&builder, base, 0x1000);
    builder.sections = hello_sections(base);
    builder.build()
}

/// Little-endian 64-bit x86-64 executable.
pub(crate) fn linux_amd64() -> Vec<u8> {
    let base = 0x0040_0000;
    let mut builder = ImageBuilder::new(Class::Elf64, ByteOrder::Little);
    builder.machine = 0x3e;
    builder.entry = 0x0046_1a40;
    builder.segments = hello_segments(&builder, base, 0x1000);
    builder.sections = hello_sections(base);
    builder.build()
}

/// Big-endian 64-bit PowerPC64 executable.
pub(crate) fn linux_ppc64() -> Vec<u8> {
    let base = 0x0001_0000;
    let mut builder = ImageBuilder::new(Class::Elf64, ByteOrder::Big);
    builder.machine = 0x15;
    builder.entry = 0x0007_3a10;
    builder.flags = 1;
    builder.segments = hello_segments(&builder, base, 0x1_0000);
    builder.sections = hello_sections(base);
    builder
        .sections
        .insert(2, section(".note.go.buildid", 7, 0x2, base + 0xf9c, 0x64, 4));
    builder.build()
}

pub(crate) fn ehsize_offset(class: Class) -> usize {
    match class {
        Class::Elf32 => 40,
        Class::Elf64 => 52,
    }
}

pub(crate) fn shstrndx_offset(class: Class) -> usize {
    ehsize_offset(class) + 10
}

pub(crate) fn patch_u16(image: &mut [u8], offset: usize, order: ByteOrder, value: u16) {
    let field = &mut image[offset..offset + 2];
    match order {
        ByteOrder::Little => LittleEndian::write_u16(field, value),
        ByteOrder::Big => BigEndian::write_u16(field, value),
    }
}

pub(crate) fn patch_u32(image: &mut [u8], offset: usize, order: ByteOrder, value: u32) {
    let field = &mut image[offset..offset + 4];
    match order {
        ByteOrder::Little => LittleEndian::write_u32(field, value),
        ByteOrder::Big => BigEndian::write_u32(field, value),
    }
}

pub(crate) fn patch_word(image: &mut [u8], offset: usize, class: Class, order: ByteOrder, value: u64) {
    match class {
        Class::Elf32 => patch_u32(image, offset, order, u32::try_from(value).unwrap()),
        Class::Elf64 => {
            let field = &mut image[offset..offset + 8];
            match order {
                ByteOrder::Little => LittleEndian::write_u64(field, value),
                ByteOrder::Big => BigEndian::write_u64(field, value),
            }
        }
    }
}

/// Offset of `e_shoff` in the file header.
pub(crate) fn shoff_offset(class: Class) -> usize {
    24 + 2 * class.word_size()
}
