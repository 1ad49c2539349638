//! # mfc
//!
//! Decoding of Mifare Classic 1K memory dumps.
//!
//! A dump is a 1024-byte image of the card: 16 sectors of 4 blocks, 16 bytes
//! per block. Block 0 of sector 0 is the manufacturer block and the last block
//! of every sector is the sector trailer.
//!
//! ```
//! use mfc::{Dump, RenderOptions, render};
//!
//! let dump = Dump::new(&[0u8; 1024]).unwrap();
//! let lines = render(&dump, &RenderOptions::default());
//! assert!(lines[0].starts_with("- [ Sector  0 ]"));
//! ```

pub mod block;
pub mod checksum;
pub mod dump;
pub mod error;
pub mod hex;
pub mod report;

pub use block::{ManufacturerBlock, SectorTrailer, UidSize};
pub use checksum::Checksums;
pub use dump::{Dump, Sector};
pub use error::{Error, Result};
pub use report::{RenderOptions, Report, SectorReport, render};
