//! Loading of raw Mifare Classic 1K dumps and sector access.

use crate::error::{Error, Result};

/// Size of a complete Mifare Classic 1K dump in bytes.
pub const DUMP_SIZE: usize = 1024;
/// Number of sectors on a 1K card.
pub const SECTOR_COUNT: usize = 16;
/// Number of blocks in each sector.
pub const BLOCKS_PER_SECTOR: usize = 4;
/// Size of a single block in bytes.
pub const BLOCK_SIZE: usize = 16;
/// Size of a sector in bytes.
pub const SECTOR_SIZE: usize = BLOCKS_PER_SECTOR * BLOCK_SIZE;

const TRAILER_BLOCK: usize = BLOCKS_PER_SECTOR - 1;

type Block = [u8; BLOCK_SIZE];
type SectorBlocks = [Block; BLOCKS_PER_SECTOR];

/// An immutable, validated Mifare Classic 1K dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dump {
    sectors: Box<[SectorBlocks; SECTOR_COUNT]>,
}

impl Dump {
    /// Validates that `input` is exactly [`DUMP_SIZE`] bytes and copies it.
    ///
    /// No truncation or padding is performed: any other length is rejected
    /// with [`Error::TooSmall`] or [`Error::TooLarge`].
    pub fn new(input: &[u8]) -> Result<Self> {
        if input.len() < DUMP_SIZE {
            return Err(Error::TooSmall(input.len()));
        }
        if input.len() > DUMP_SIZE {
            return Err(Error::TooLarge(input.len()));
        }

        let mut sectors = Box::new([[[0u8; BLOCK_SIZE]; BLOCKS_PER_SECTOR]; SECTOR_COUNT]);
        for (block, chunk) in sectors
            .as_flattened_mut()
            .iter_mut()
            .zip(input.chunks_exact(BLOCK_SIZE))
        {
            block.copy_from_slice(chunk);
        }
        tracing::debug!(size = input.len(), "loaded Mifare Classic 1K dump");

        Ok(Dump { sectors })
    }

    /// Returns the sector at `index`, or `None` if `index >= 16`.
    pub fn sector(&self, index: usize) -> Option<Sector<'_>> {
        self.sectors
            .get(index)
            .map(|blocks| Sector { index, blocks })
    }

    /// Iterates over all sectors in ascending order.
    pub fn sectors(&self) -> impl Iterator<Item = Sector<'_>> {
        self.sectors
            .iter()
            .enumerate()
            .map(|(index, blocks)| Sector { index, blocks })
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.sectors.as_flattened().as_flattened()
    }
}

impl TryFrom<&[u8]> for Dump {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self> {
        Dump::new(value)
    }
}

impl TryFrom<Vec<u8>> for Dump {
    type Error = Error;

    fn try_from(value: Vec<u8>) -> Result<Self> {
        Dump::new(&value)
    }
}

/// A read-only view of one 64-byte sector of a [`Dump`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sector<'a> {
    index: usize,
    blocks: &'a SectorBlocks,
}

impl<'a> Sector<'a> {
    pub fn index(&self) -> usize {
        self.index
    }

    /// Absolute byte offset of this sector within the dump.
    pub fn offset(&self) -> usize {
        self.index * SECTOR_SIZE
    }

    /// All 64 bytes of the sector.
    pub fn bytes(&self) -> &'a [u8] {
        self.blocks.as_flattened()
    }

    pub fn block(&self, n: usize) -> Option<&'a [u8; BLOCK_SIZE]> {
        self.blocks.get(n)
    }

    /// The first three blocks, i.e. the sector without its trailer.
    pub fn data(&self) -> &'a [u8] {
        self.blocks[..TRAILER_BLOCK].as_flattened()
    }

    pub fn trailer(&self) -> &'a [u8; BLOCK_SIZE] {
        &self.blocks[TRAILER_BLOCK]
    }

    /// The manufacturer block. Only sector 0 carries one.
    pub fn manufacturer_block(&self) -> Option<&'a [u8; BLOCK_SIZE]> {
        (self.index == 0).then(|| &self.blocks[0])
    }

    /// Whether the first three blocks are all `0x00` or all `0xff`.
    ///
    /// The trailer is not inspected.
    pub fn is_empty(&self) -> bool {
        let data = self.data();
        data.iter().all(|&b| b == 0x00) || data.iter().all(|&b| b == 0xff)
    }
}
