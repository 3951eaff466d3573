use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use elfhdr_core::{ElfFile, FileHeader, Header, ProgramHeader, SectionHeader};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Simple ELF header inspection CLI
#[derive(Parser)]
#[command(
    name = "elfhdr",
    about = "Inspect ELF headers (file header, segments and sections)",
    version,
    author
)]
struct Cli {
    /// Path to binary file
    #[arg(required = true)]
    path: std::path::PathBuf,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show entry point of binary
    Entry,
    /// Show the ELF file header
    Header,
    /// List all program headers (segments)
    Segments,
    /// List all section headers
    Sections,
}

#[derive(Serialize)]
struct HeaderInfo {
    class: String,
    byte_order: String,
    os_abi: String,
    abi_version: u8,
    object_type: String,
    machine: String,
    entry: String,
    flags: String,
    header_size: u16,
    program_headers: TableInfo,
    section_headers: TableInfo,
    section_names_index: u16,
}

#[derive(Serialize)]
struct TableInfo {
    offset: String,
    entry_size: u16,
    entry_count: u16,
}

impl From<&FileHeader> for HeaderInfo {
    fn from(h: &FileHeader) -> Self {
        let table = |t: elfhdr_core::TableDescriptor| TableInfo {
            offset: format!("{:#x}", t.offset),
            entry_size: t.entry_size,
            entry_count: t.entry_count,
        };
        Self {
            class: h.class.to_string(),
            byte_order: h.byte_order.to_string(),
            os_abi: h.os_abi.to_string(),
            abi_version: h.abi_version,
            object_type: h.object_type.to_string(),
            machine: h.machine.to_string(),
            entry: format!("{:#x}", h.entry),
            flags: format!("{:#x}", h.flags),
            header_size: h.header_size,
            program_headers: table(h.program_headers),
            section_headers: table(h.section_headers),
            section_names_index: h.section_names_index,
        }
    }
}

#[derive(Serialize, Tabled)]
struct SegmentRow {
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Flags")]
    flags: String,
    #[tabled(rename = "Offset")]
    offset: String,
    #[tabled(rename = "VirtAddr")]
    vaddr: String,
    #[tabled(rename = "PhysAddr")]
    paddr: String,
    #[tabled(rename = "FileSiz")]
    filesz: String,
    #[tabled(rename = "MemSiz")]
    memsz: String,
    #[tabled(rename = "Align")]
    align: String,
}

impl From<&ProgramHeader> for SegmentRow {
    fn from(ph: &ProgramHeader) -> Self {
        Self {
            kind: ph.kind.to_string(),
            flags: ph.flags.to_string(),
            offset: format!("{:#x}", ph.offset),
            vaddr: format!("{:#x}", ph.vaddr),
            paddr: format!("{:#x}", ph.paddr),
            filesz: format!("{:#x}", ph.filesz),
            memsz: format!("{:#x}", ph.memsz),
            align: ph.align.to_string(),
        }
    }
}

#[derive(Serialize, Tabled)]
struct SectionRow {
    #[tabled(rename = "Nr")]
    index: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Flags")]
    flags: String,
    #[tabled(rename = "Addr")]
    addr: String,
    #[tabled(rename = "Offset")]
    offset: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Link")]
    link: u32,
    #[tabled(rename = "Info")]
    info: u32,
    #[tabled(rename = "Align")]
    align: String,
    #[tabled(rename = "EntSize")]
    entsize: String,
}

impl SectionRow {
    fn new(index: usize, sh: &SectionHeader) -> Self {
        Self {
            index,
            name: format!("{:#x}", sh.name),
            kind: sh.kind.to_string(),
            flags: format!("{} {}", sh.flags, sh.flags.letters()).trim_end().to_string(),
            addr: format!("{:#x}", sh.addr),
            offset: format!("{:#x}", sh.offset),
            size: format!("{:#x}", sh.size),
            link: sh.link,
            info: sh.info,
            align: sh.align.to_string(),
            entsize: format!("{:#x}", sh.entsize),
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_header(header: &FileHeader) {
    let info = HeaderInfo::from(header);
    let rows = [
        ("Class", info.class),
        ("Data", info.byte_order),
        ("OS/ABI", info.os_abi),
        ("ABI Version", info.abi_version.to_string()),
        ("Type", info.object_type),
        ("Machine", info.machine),
        ("Entry point", info.entry),
        (
            "Program headers",
            format!(
                "{} x {} bytes at {}",
                info.program_headers.entry_count,
                info.program_headers.entry_size,
                info.program_headers.offset
            ),
        ),
        (
            "Section headers",
            format!(
                "{} x {} bytes at {}",
                info.section_headers.entry_count,
                info.section_headers.entry_size,
                info.section_headers.offset
            ),
        ),
        ("Flags", info.flags),
        ("Header size", info.header_size.to_string()),
        ("Section names", info.section_names_index.to_string()),
    ];
    for (key, value) in rows {
        println!("  {:<18} {}", format!("{key}:").bold(), value);
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let bin = ElfFile::open(&cli.path)
        .with_context(|| format!("failed to decode {}", cli.path.display()))?;

    match cli.command {
        Command::Entry => {
            let entry = bin.header.entry_point();
            if cli.json {
                print_json(&serde_json::json!({ "entry": format!("{entry:#x}") }))?;
            } else {
                println!("Entry point: 0x{entry:x}");
            }
        }

        Command::Header => {
            if cli.json {
                print_json(&HeaderInfo::from(&bin.header))?;
            } else {
                println!("{} {}", "ELF Header".green().bold(), bin.path);
                print_header(&bin.header);
            }
        }

        Command::Segments => {
            let rows: Vec<SegmentRow> = bin.program_headers.iter().map(SegmentRow::from).collect();
            if cli.json {
                print_json(&rows)?;
            } else if rows.is_empty() {
                println!("No program headers found.");
            } else {
                println!(
                    "{} {} ({})",
                    "Program Headers".green().bold(),
                    bin.path,
                    bin.header.format_name()
                );
                println!("{}", Table::new(rows).with(Style::sharp()));
            }
        }

        Command::Sections => {
            let rows: Vec<SectionRow> = bin
                .section_headers
                .iter()
                .enumerate()
                .map(|(i, sh)| SectionRow::new(i, sh))
                .collect();
            if cli.json {
                print_json(&rows)?;
            } else if rows.is_empty() {
                println!("No sections found (possibly stripped binary).");
            } else {
                println!(
                    "{} {} (names at section {})",
                    "Section Headers".green().bold(),
                    bin.path,
                    bin.header.section_names_index
                );
                println!("{}", Table::new(rows).with(Style::sharp()));
                println!(
                    "{}",
                    "Key to Flags: W (write), A (alloc), X (execute), M (merge), S (strings), \
                     I (info), L (link order), O (extra OS processing), G (group), T (TLS), \
                     C (compressed)"
                        .dimmed()
                );
            }
        }
    }

    Ok(())
}
