//! The fixed-position container structure of a PCD image pack.
//!
//! Everything the decoder needs up front lives in the first three sectors:
//! the file-header sector (whose signature distinguishes overview packs),
//! the IPI header sector-and-a-half of metadata, and the Base/16 image
//! component attributes, which carry the rotation, the native resolution
//! class and the sector where the variable-length 4Base data stops.

use std::fs::File;
use std::io::Read;

use crate::Resolution;
use crate::bitstream::SECTOR_SIZE;
use crate::error::{ContainerError, Result, bail};
use crate::reader::{be_u16, be_u32};

/// File-header signature of an overview pack. Accepted, but an overview pack
/// holds no decodable image, so the base-image search will come up empty.
const OVERVIEW_SIGNATURE: &[u8] = b"PCD_OPA";

/// IPI signature at the start of the second sector.
const IPI_SIGNATURE: &[u8] = b"PCD_IPI";

/// Byte length of the fixed header area: file header, IPI header, and the
/// five per-tier image component attribute records.
const HEADER_LEN: usize = 3 * SECTOR_SIZE;

/// Start of the IPI header within the fixed area.
const IPI_START: usize = SECTOR_SIZE;

/// Start of the Base/16 image component attributes (the IPI header occupies
/// 1536 bytes).
const ICA_START: usize = IPI_START + 1536;

pub(crate) struct Container {
    /// The raw IPI header (1536 bytes); metadata is extracted lazily.
    ipi: Vec<u8>,
    /// Rotation quadrant from stored to natural orientation (n * 90° CCW).
    pub rotation: u8,
    /// Highest resolution class the pack claims to carry.
    pub native_resolution: Resolution,
    /// Whether a 64Base image pack extension exists.
    pub ipe_available: bool,
    /// Huffman class tag; informational only.
    pub huffman_class: usize,
    /// Sector where the 4Base data stops; the 16Base regions follow it.
    base4_stop: u64,
}

impl Container {
    pub(crate) fn parse(file: &mut File) -> Result<Self> {
        let mut header = vec![0; HEADER_LEN];
        let mut filled = 0;
        while filled < HEADER_LEN {
            match file.read(&mut header[filled..])? {
                0 => break,
                n => filled += n,
            }
        }
        if filled < HEADER_LEN {
            bail!(ContainerError::TooSmall);
        }

        let overview = &header[..OVERVIEW_SIGNATURE.len()] == OVERVIEW_SIGNATURE;
        if &header[IPI_START..IPI_START + IPI_SIGNATURE.len()] != IPI_SIGNATURE && !overview {
            bail!(ContainerError::InvalidSignature);
        }

        let ica = &header[ICA_START..ICA_START + 512];
        // An interleave ratio other than one means ADPCM audio is woven into
        // the image sectors, which this decoder does not support.
        if ica[9] != 1 {
            bail!(ContainerError::InterleavedAudio);
        }

        let attributes = ica[2];
        let native_resolution =
            Resolution::from_index(((attributes >> 2) & 0x3) as usize + Resolution::Base as usize)
                .unwrap_or(Resolution::SixtyFourBase);

        Ok(Self {
            ipi: header[IPI_START..ICA_START].to_vec(),
            rotation: attributes & 0x3,
            native_resolution,
            ipe_available: (attributes >> 4) & 0x1 == 1,
            huffman_class: ((attributes >> 5) & 0x2) as usize,
            base4_stop: be_u16(ica, 3).unwrap_or(0) as u64,
        })
    }

    /// Sector of a tier's image component data.
    pub(crate) fn icd_sector(&self, level: Resolution) -> u64 {
        match level {
            Resolution::Base16 => 4,
            Resolution::Base4 => 23,
            Resolution::Base => 96,
            Resolution::FourBase => 389,
            Resolution::SixteenBase => self.base4_stop + 14,
            Resolution::SixtyFourBase => unreachable!("64Base data lives in the companion files"),
        }
    }

    /// Byte offset of a compressed tier's Huffman code table region.
    pub(crate) fn hct_offset(&self, level: Resolution) -> u64 {
        let sector = match level {
            Resolution::FourBase => 388,
            Resolution::SixteenBase => self.base4_stop + 12,
            _ => unreachable!("only the compressed tiers carry code tables"),
        };
        sector * SECTOR_SIZE as u64
    }

    /// Byte offset of a tier's image component data.
    pub(crate) fn icd_offset(&self, level: Resolution) -> u64 {
        self.icd_sector(level) * SECTOR_SIZE as u64
    }

    /// An ASCII text field of the IPI header, with the trailing space
    /// padding removed.
    pub(crate) fn ipi_text(&self, offset: usize, len: usize) -> &str {
        let raw = &self.ipi[offset..offset + len];
        let text = core::str::from_utf8(raw).unwrap_or("");
        text.trim_end_matches([' ', '\0'])
    }

    pub(crate) fn ipi_bytes(&self, offset: usize, len: usize) -> &[u8] {
        &self.ipi[offset..offset + len]
    }

    pub(crate) fn ipi_u16(&self, offset: usize) -> u16 {
        be_u16(&self.ipi, offset).unwrap_or(0)
    }

    pub(crate) fn ipi_u32(&self, offset: usize) -> u32 {
        be_u32(&self.ipi, offset).unwrap_or(0)
    }

    /// Whether the scene balance algorithm section is present.
    pub(crate) fn has_sba(&self) -> bool {
        &self.ipi[225..228] == b"SBA"
    }

    /// Scanning time as seconds since 1970-01-01 UTC.
    pub(crate) fn scanning_time(&self) -> u32 {
        self.ipi_u32(13)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Seek, SeekFrom, Write};

    fn synthetic_header() -> Vec<u8> {
        let mut header = vec![0_u8; HEADER_LEN];
        header[IPI_START..IPI_START + 7].copy_from_slice(IPI_SIGNATURE);
        header[ICA_START + 9] = 1;
        header
    }

    fn parse_bytes(header: &[u8]) -> Result<Container> {
        let mut file = tempfile::tempfile().unwrap();
        file.write_all(header).unwrap();
        file.seek(SeekFrom::Start(0)).unwrap();
        Container::parse(&mut file)
    }

    #[test]
    fn parses_a_minimal_header() {
        let container = parse_bytes(&synthetic_header()).unwrap();

        assert_eq!(container.rotation, 0);
        assert_eq!(container.native_resolution, Resolution::Base);
        assert!(!container.ipe_available);
        assert!(!container.has_sba());
    }

    #[test]
    fn rejects_short_files() {
        let result = parse_bytes(&synthetic_header()[..4000]);
        assert!(matches!(
            result,
            Err(crate::Error::Container(ContainerError::TooSmall))
        ));
    }

    #[test]
    fn rejects_a_bad_signature() {
        let mut header = synthetic_header();
        header[IPI_START] = b'X';
        assert!(matches!(
            parse_bytes(&header),
            Err(crate::Error::Container(ContainerError::InvalidSignature))
        ));
    }

    #[test]
    fn accepts_an_overview_signature() {
        let mut header = synthetic_header();
        header[IPI_START] = b'X';
        header[..7].copy_from_slice(OVERVIEW_SIGNATURE);
        assert!(parse_bytes(&header).is_ok());
    }

    #[test]
    fn rejects_interleaved_audio() {
        let mut header = synthetic_header();
        header[ICA_START + 9] = 2;
        assert!(matches!(
            parse_bytes(&header),
            Err(crate::Error::Container(ContainerError::InterleavedAudio))
        ));
    }

    #[test]
    fn decodes_the_attribute_bits() {
        let mut header = synthetic_header();
        // Rotation 1, resolution class 2 (16Base), IPE available.
        header[ICA_START + 2] = 0b0001_1001;
        // 4Base stop sector.
        header[ICA_START + 3] = 0x01;
        header[ICA_START + 4] = 0xf4;

        let container = parse_bytes(&header).unwrap();
        assert_eq!(container.rotation, 1);
        assert_eq!(container.native_resolution, Resolution::SixteenBase);
        assert!(container.ipe_available);
        assert_eq!(container.hct_offset(Resolution::SixteenBase), 512 * 2048);
        assert_eq!(container.icd_sector(Resolution::SixteenBase), 514);
    }
}
