use thiserror::Error;

/// Errors that can occur when loading a Mifare Classic 1K dump.
///
/// Only the buffer length is validated. Once a dump is loaded, decoding
/// sectors, blocks and checksums cannot fail.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The input is shorter than 1024 bytes
    #[error("input is too small to be a Mifare Classic dump ({0} bytes, expected 1024)")]
    TooSmall(usize),

    /// The input is longer than 1024 bytes
    #[error("input is too large to be a Mifare Classic dump ({0} bytes, expected 1024)")]
    TooLarge(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
