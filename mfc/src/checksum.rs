use base64::{Engine, engine::general_purpose::STANDARD};
use md5::{Digest, Md5};
use serde::Serialize;

use crate::dump::{BLOCK_SIZE, Sector};

/// Content checksums of a sector, shown in the sector heading.
///
/// Each checksum is the base64-encoded MD5 digest of a byte range of the
/// sector. The manufacturer-excluding checksum only exists for sector 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Checksums {
    #[serde(skip_serializing_if = "Option::is_none")]
    without_manufacturer: Option<String>,
    without_trailer: String,
    sector: String,
}

impl Checksums {
    pub fn for_sector(sector: &Sector<'_>) -> Self {
        let data = sector.data();
        let without_manufacturer = sector
            .manufacturer_block()
            .map(|_| digest(&data[BLOCK_SIZE..]));

        Checksums {
            without_manufacturer,
            without_trailer: digest(data),
            sector: digest(sector.bytes()),
        }
    }

    /// Checksum of blocks 1 and 2 (sector 0 only).
    pub fn without_manufacturer(&self) -> Option<&str> {
        self.without_manufacturer.as_deref()
    }

    /// Checksum of the sector without its trailer.
    pub fn without_trailer(&self) -> &str {
        &self.without_trailer
    }

    /// Checksum of the whole sector.
    pub fn sector(&self) -> &str {
        &self.sector
    }

    /// Iterates over the checksums in heading order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.without_manufacturer
            .as_deref()
            .into_iter()
            .chain([self.without_trailer.as_str(), self.sector.as_str()])
    }
}

fn digest(data: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(data);
    STANDARD.encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::dump::{DUMP_SIZE, Dump};

    #[rstest(
        input,
        expected,
        case(b"".to_vec(), "1B2M2Y8AsgTpgAmY7PhCfg=="),
        case(b"abc".to_vec(), "kAFQmDzST7DWlj99KOF/cg=="),
        case(vec![0x00; 64], "O108fSB+N9zu7dMB414uWA==")
    )]
    fn test_digest(input: Vec<u8>, expected: &str) {
        assert_eq!(expected, digest(&input));
    }

    #[rstest]
    #[case::manufacturer_sector(0, 3)]
    #[case::data_sector(1, 2)]
    #[case::last_sector(15, 2)]
    fn test_checksum_count(#[case] index: usize, #[case] expected: usize) {
        let dump = Dump::new(&[0x42; DUMP_SIZE]).unwrap();
        let checksums = Checksums::for_sector(&dump.sector(index).unwrap());

        assert_eq!(expected, checksums.iter().count());
        assert_eq!(index == 0, checksums.without_manufacturer().is_some());
    }

    #[test]
    fn test_checksum_ranges() {
        let input: Vec<u8> = (0..DUMP_SIZE).map(|i| i as u8).collect();
        let dump = Dump::new(&input).unwrap();
        let checksums = Checksums::for_sector(&dump.sector(0).unwrap());

        assert_eq!(Some(digest(&input[16..48]).as_str()), checksums.without_manufacturer());
        assert_eq!(digest(&input[0..48]), checksums.without_trailer());
        assert_eq!(digest(&input[0..64]), checksums.sector());
        assert_eq!(
            vec![
                digest(&input[16..48]),
                digest(&input[0..48]),
                digest(&input[0..64])
            ],
            checksums.iter().collect::<Vec<_>>()
        );
    }

    #[rstest]
    #[case::manufacturer_block(0, [false, true, true])]
    #[case::data_block(20, [true, true, true])]
    #[case::trailer(50, [false, false, true])]
    fn test_single_bit_flip(#[case] offset: usize, #[case] changed: [bool; 3]) {
        let original = vec![0x00; DUMP_SIZE];
        let mut flipped = original.clone();
        flipped[offset] ^= 0x01;

        let a = Dump::new(&original).unwrap();
        let b = Dump::new(&flipped).unwrap();
        let a = Checksums::for_sector(&a.sector(0).unwrap());
        let b = Checksums::for_sector(&b.sector(0).unwrap());

        assert_eq!(
            changed,
            [
                a.without_manufacturer() != b.without_manufacturer(),
                a.without_trailer() != b.without_trailer(),
                a.sector() != b.sector(),
            ]
        );
    }
}
