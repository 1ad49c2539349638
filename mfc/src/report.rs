//! Per-sector report of a dump, as structured data or text lines.

use std::io::{self, Write};

use serde::Serialize;

use crate::block::{ManufacturerBlock, SectorTrailer};
use crate::checksum::Checksums;
use crate::dump::{Dump, Sector};
use crate::hex::format_hex_dump;

/// Options controlling which sectors and annotations appear in a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Omit sectors (other than sector 0) whose data blocks are all `0x00` or all `0xff`.
    pub skip_empty: bool,
    /// Separator between hex byte pairs in decoded block lines.
    pub hex_separator: String,
    /// Show content checksums in sector headings.
    pub checksums: bool,
    /// Show the raw access bits of sector trailers.
    pub access_bits: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            skip_empty: false,
            hex_separator: " ".to_string(),
            checksums: true,
            access_bits: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectorReport {
    index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    checksums: Option<Checksums>,
    hex_dump: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    manufacturer: Option<ManufacturerBlock>,
    trailer: SectorTrailer,
}

impl SectorReport {
    fn new(sector: &Sector<'_>, options: &RenderOptions) -> Self {
        SectorReport {
            index: sector.index(),
            checksums: options.checksums.then(|| Checksums::for_sector(sector)),
            hex_dump: format_hex_dump(sector.bytes(), sector.offset()),
            manufacturer: sector.manufacturer_block().map(ManufacturerBlock::decode),
            trailer: SectorTrailer::decode(sector.trailer()),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn checksums(&self) -> Option<&Checksums> {
        self.checksums.as_ref()
    }

    pub fn manufacturer(&self) -> Option<&ManufacturerBlock> {
        self.manufacturer.as_ref()
    }

    pub fn trailer(&self) -> &SectorTrailer {
        &self.trailer
    }

    fn heading(&self) -> String {
        match &self.checksums {
            Some(checksums) => format!(
                "- [ Sector {:2} ] - [ {} ] -",
                self.index,
                checksums.iter().collect::<Vec<_>>().join(" ")
            ),
            None => format!("- [ Sector {:2} ] -", self.index),
        }
    }

    fn push_lines(&self, lines: &mut Vec<String>, options: &RenderOptions) {
        lines.push(self.heading());

        lines.extend(self.hex_dump.iter().cloned());
        lines.push(String::new());

        if let Some(manufacturer) = &self.manufacturer {
            lines.push(manufacturer.to_line(&options.hex_separator));
            lines.push(String::new());
        }

        lines.extend(
            self.trailer
                .to_lines(&options.hex_separator, options.access_bits),
        );
        lines.push(String::new());
    }
}

/// Decoded report of a dump, in ascending sector order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    sectors: Vec<SectorReport>,
}

impl Report {
    pub fn build(dump: &Dump, options: &RenderOptions) -> Self {
        let sectors = dump
            .sectors()
            .filter(|sector| {
                let skip = options.skip_empty && sector.index() > 0 && sector.is_empty();
                if skip {
                    tracing::debug!(sector = sector.index(), "skipping empty sector");
                }
                !skip
            })
            .map(|sector| SectorReport::new(&sector, options))
            .collect();

        Report { sectors }
    }

    pub fn sectors(&self) -> &[SectorReport] {
        &self.sectors
    }

    pub fn lines(&self, options: &RenderOptions) -> Vec<String> {
        let mut lines = Vec::new();
        for sector in &self.sectors {
            sector.push_lines(&mut lines, options);
        }
        lines
    }

    /// Writes the text report to `writer`, one line at a time.
    pub fn write_to<W: Write>(&self, writer: &mut W, options: &RenderOptions) -> io::Result<()> {
        for line in self.lines(options) {
            writeln!(writer, "{line}")?;
        }
        Ok(())
    }
}

/// Renders the text report of `dump`.
pub fn render(dump: &Dump, options: &RenderOptions) -> Vec<String> {
    Report::build(dump, options).lines(options)
}
