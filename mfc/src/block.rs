//! Decoders for the manufacturer block and sector trailers.

use num_bigint::BigUint;
use serde::{Serialize, Serializer};

use crate::dump::BLOCK_SIZE;
use crate::hex::format_hex;

/*
ref: NXP AN10927, MF1S50YYX datasheet

Manufacturer block (sector 0, block 0), by UID size:

  single: UID0 UID1 UID2 UID3 BCC0 | manufacturer data (11 bytes)
  double: CT UID0 UID1 UID2 BCC0 UID3 UID4 UID5 UID6 BCC1 | manufacturer data (6 bytes)
  triple: CT UID0 UID1 UID2 BCC0 CT UID3 UID4 UID5 BCC1 UID6 UID7 UID8 UID9 BCC2 | manufacturer data (1 byte)

Sector trailer:

  Key A (6 bytes) | access bits (4 bytes) | Key B (6 bytes)
*/

/// Cascade tag marking a UID longer than 4 bytes (ISO/IEC 14443-3).
pub const CASCADE_TAG: u8 = 0x88;

const JSON_HEX_SEPARATOR: &str = ":";

/// UID length class, determined by the cascade tags in the manufacturer block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UidSize {
    /// 4-byte UID
    Single,
    /// 7-byte UID
    Double,
    /// 10-byte UID
    Triple,
}

impl UidSize {
    pub fn len(&self) -> usize {
        match self {
            UidSize::Single => 4,
            UidSize::Double => 7,
            UidSize::Triple => 10,
        }
    }

    /// Offsets of the UID bytes within the manufacturer block.
    fn offsets(&self) -> &'static [usize] {
        match self {
            UidSize::Single => &[0, 1, 2, 3],
            UidSize::Double => &[1, 2, 3, 5, 6, 7, 8],
            UidSize::Triple => &[1, 2, 3, 6, 7, 8, 10, 11, 12, 13],
        }
    }

    /// Offset at which manufacturer data starts.
    fn manufacturer_data_offset(&self) -> usize {
        match self {
            UidSize::Single => 5,
            UidSize::Double => 10,
            UidSize::Triple => 15,
        }
    }

    fn detect(block: &[u8; BLOCK_SIZE]) -> Self {
        // A triple-size block also satisfies the double-size check, so it goes first.
        if block[0] == CASCADE_TAG && block[5] == CASCADE_TAG {
            UidSize::Triple
        } else if block[0] == CASCADE_TAG {
            UidSize::Double
        } else {
            UidSize::Single
        }
    }
}

/// Decoded manufacturer block: the card UID and manufacturer-specific bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManufacturerBlock {
    size: UidSize,
    uid: Vec<u8>,
    manufacturer_data: Vec<u8>,
}

impl ManufacturerBlock {
    /// Decodes a manufacturer block. Every 16-byte block decodes to one of
    /// the three UID sizes.
    pub fn decode(block: &[u8; BLOCK_SIZE]) -> Self {
        let size = UidSize::detect(block);
        let uid = size.offsets().iter().map(|&i| block[i]).collect();
        let manufacturer_data = block[size.manufacturer_data_offset()..].to_vec();

        ManufacturerBlock {
            size,
            uid,
            manufacturer_data,
        }
    }

    pub fn size(&self) -> UidSize {
        self.size
    }

    pub fn uid(&self) -> &[u8] {
        &self.uid
    }

    pub fn manufacturer_data(&self) -> &[u8] {
        &self.manufacturer_data
    }

    /// The UID read as a big-endian unsigned integer.
    pub fn uid_value(&self) -> BigUint {
        BigUint::from_bytes_be(&self.uid)
    }

    /// Formats the block as a single report line.
    pub fn to_line(&self, separator: &str) -> String {
        format!(
            "  UID: {} ({})    Length: {}    Manufacturer Data: {}",
            self.uid_value(),
            format_hex(&self.uid, separator),
            self.uid.len(),
            format_hex(&self.manufacturer_data, separator),
        )
    }
}

impl Serialize for ManufacturerBlock {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("ManufacturerBlock", 5)?;
        state.serialize_field("size", &self.size)?;
        state.serialize_field("uid_length", &self.uid.len())?;
        state.serialize_field("uid", &format_hex(&self.uid, JSON_HEX_SEPARATOR))?;
        state.serialize_field("uid_value", &self.uid_value().to_string())?;
        state.serialize_field(
            "manufacturer_data",
            &format_hex(&self.manufacturer_data, JSON_HEX_SEPARATOR),
        )?;
        state.end()
    }
}

/// Decoded sector trailer. Access bits are kept as raw bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectorTrailer {
    key_a: [u8; 6],
    access_bits: [u8; 4],
    key_b: [u8; 6],
}

impl SectorTrailer {
    pub fn decode(block: &[u8; BLOCK_SIZE]) -> Self {
        let mut key_a = [0u8; 6];
        let mut access_bits = [0u8; 4];
        let mut key_b = [0u8; 6];
        key_a.copy_from_slice(&block[..6]);
        access_bits.copy_from_slice(&block[6..10]);
        key_b.copy_from_slice(&block[10..]);

        SectorTrailer {
            key_a,
            access_bits,
            key_b,
        }
    }

    pub fn key_a(&self) -> &[u8; 6] {
        &self.key_a
    }

    pub fn access_bits(&self) -> &[u8; 4] {
        &self.access_bits
    }

    pub fn key_b(&self) -> &[u8; 6] {
        &self.key_b
    }

    /// Reassembles the 16-byte trailer block.
    pub fn to_bytes(&self) -> [u8; BLOCK_SIZE] {
        let mut block = [0u8; BLOCK_SIZE];
        block[..6].copy_from_slice(&self.key_a);
        block[6..10].copy_from_slice(&self.access_bits);
        block[10..].copy_from_slice(&self.key_b);
        block
    }

    /// Formats the trailer as report lines, optionally including access bits.
    pub fn to_lines(&self, separator: &str, access_bits: bool) -> Vec<String> {
        let mut lines = vec![format!("  Key A: {}", format_hex(&self.key_a, separator))];
        if access_bits {
            lines.push(format!(
                "  Access Bits: {}",
                format_hex(&self.access_bits, separator)
            ));
        }
        lines.push(format!("  Key B: {}", format_hex(&self.key_b, separator)));
        lines
    }
}

impl Serialize for SectorTrailer {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("SectorTrailer", 3)?;
        state.serialize_field("key_a", &format_hex(&self.key_a, JSON_HEX_SEPARATOR))?;
        state.serialize_field(
            "access_bits",
            &format_hex(&self.access_bits, JSON_HEX_SEPARATOR),
        )?;
        state.serialize_field("key_b", &format_hex(&self.key_b, JSON_HEX_SEPARATOR))?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const TRIPLE: [u8; 16] = [
        0x88, 0x04, 0x11, 0x22, 0x3d, 0x88, 0x33, 0x44, 0x55, 0x22, 0x66, 0x77, 0x88, 0x99, 0x00,
        0xe1,
    ];
    const DOUBLE: [u8; 16] = [
        0x88, 0x04, 0x11, 0x22, 0x3d, 0x33, 0x44, 0x55, 0x66, 0x44, 0x08, 0x44, 0x00, 0x62, 0x63,
        0x64,
    ];
    const SINGLE: [u8; 16] = [
        0xde, 0xad, 0xbe, 0xef, 0x22, 0x08, 0x04, 0x00, 0x62, 0x63, 0x64, 0x65, 0x66, 0x67, 0x68,
        0x69,
    ];

    #[rstest]
    #[case::triple(TRIPLE, UidSize::Triple, vec![0x04, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99], vec![0xe1])]
    #[case::double(DOUBLE, UidSize::Double, vec![0x04, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66], DOUBLE[10..].to_vec())]
    #[case::single(SINGLE, UidSize::Single, vec![0xde, 0xad, 0xbe, 0xef], SINGLE[5..].to_vec())]
    fn test_manufacturer_block_decode(
        #[case] block: [u8; 16],
        #[case] size: UidSize,
        #[case] uid: Vec<u8>,
        #[case] manufacturer_data: Vec<u8>,
    ) {
        let decoded = ManufacturerBlock::decode(&block);

        assert_eq!(size, decoded.size());
        assert_eq!(size.len(), decoded.uid().len());
        assert_eq!(uid, decoded.uid());
        assert_eq!(manufacturer_data, decoded.manufacturer_data());
    }

    #[rstest]
    #[case::cascade_at_five_only(0x00, 0x88, UidSize::Single)]
    #[case::cascade_at_zero_only(0x88, 0x00, UidSize::Double)]
    #[case::cascade_at_both(0x88, 0x88, UidSize::Triple)]
    #[case::no_cascade(0x12, 0x34, UidSize::Single)]
    fn test_uid_size_priority(#[case] b0: u8, #[case] b5: u8, #[case] expected: UidSize) {
        let mut block = [0x5a; 16];
        block[0] = b0;
        block[5] = b5;

        assert_eq!(expected, ManufacturerBlock::decode(&block).size());
    }

    #[test]
    fn test_uid_value() {
        let decoded = ManufacturerBlock::decode(&SINGLE);
        assert_eq!(BigUint::from(0xdeadbeef_u32), decoded.uid_value());
    }

    #[test]
    fn test_manufacturer_block_to_line() {
        let decoded = ManufacturerBlock::decode(&SINGLE);

        assert_eq!(
            "  UID: 3735928559 (de:ad:be:ef)    Length: 4    Manufacturer Data: 08:04:00:62:63:64:65:66:67:68:69",
            decoded.to_line(":")
        );
    }

    #[test]
    fn test_sector_trailer_decode() {
        let block = [
            0xa0, 0xa1, 0xa2, 0xa3, 0xa4, 0xa5, 0xff, 0x07, 0x80, 0x69, 0xb0, 0xb1, 0xb2, 0xb3,
            0xb4, 0xb5,
        ];
        let trailer = SectorTrailer::decode(&block);

        assert_eq!(&[0xa0_u8, 0xa1, 0xa2, 0xa3, 0xa4, 0xa5], trailer.key_a());
        assert_eq!(&[0xff_u8, 0x07, 0x80, 0x69], trailer.access_bits());
        assert_eq!(&[0xb0_u8, 0xb1, 0xb2, 0xb3, 0xb4, 0xb5], trailer.key_b());
        assert_eq!(block, trailer.to_bytes());
    }

    #[rstest]
    #[case::with_access_bits(true, vec![
        "  Key A: ff ff ff ff ff ff",
        "  Access Bits: ff 07 80 69",
        "  Key B: ff ff ff ff ff ff",
    ])]
    #[case::without_access_bits(false, vec![
        "  Key A: ff ff ff ff ff ff",
        "  Key B: ff ff ff ff ff ff",
    ])]
    fn test_sector_trailer_to_lines(#[case] access_bits: bool, #[case] expected: Vec<&str>) {
        let block = [
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x07, 0x80, 0x69, 0xff, 0xff, 0xff, 0xff,
            0xff, 0xff,
        ];
        let trailer = SectorTrailer::decode(&block);

        assert_eq!(expected, trailer.to_lines(" ", access_bits));
    }
}
