use std::io::{self, Write};

use clap::Args;
use mfc::{Dump, RenderOptions, Report};

use crate::error::Result;
use crate::output::OutputFormat;
use crate::utils::read_input;

#[derive(Args, Debug)]
pub(crate) struct Config {
    /// Path to the 1024-byte dump file. If not specified or `-`, reads from stdin
    file: Option<String>,

    /// Skip sectors whose data blocks consist only of 0x00 or 0xff
    #[arg(long, visible_alias = "skipempty")]
    skip_empty: bool,

    /// Separator placed between hex bytes in decoded blocks
    #[arg(long, default_value = " ", allow_hyphen_values = true)]
    hex_separator: String,

    /// Hide content checksums in sector headings
    #[arg(long)]
    no_checksums: bool,

    /// Hide access bits in sector trailers
    #[arg(long)]
    no_access_bits: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    output: OutputFormat,
}

impl Config {
    fn render_options(&self) -> RenderOptions {
        RenderOptions {
            skip_empty: self.skip_empty,
            hex_separator: self.hex_separator.clone(),
            checksums: !self.no_checksums,
            access_bits: !self.no_access_bits,
        }
    }
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let input = read_input(config.file.as_deref())?;
    let dump = Dump::new(&input)?;

    let options = config.render_options();
    let report = Report::build(&dump, &options);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match config.output {
        OutputFormat::Text => report.write_to(&mut out, &options)?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?,
        OutputFormat::Yaml => write!(out, "{}", serde_yml::to_string(&report)?)?,
    }
    out.flush()?;

    Ok(())
}
