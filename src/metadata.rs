//! Human-readable metadata extracted from the IPI header.
//!
//! Values are formatted on demand from the raw header bytes: version fields
//! are "major.minor" pairs, timestamps are seconds since 1970-01-01 UTC, the
//! scanner pixel size is BCD-coded in hundredths of a micron, and text
//! fields are ISO 646 with trailing space padding. A field the pack does not
//! carry formats as `"-"`.

use chrono::DateTime;

use crate::container::Container;
use crate::film;

/// The closed set of metadata fields a PCD image pack can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataField {
    SpecificationVersion,
    AuthoringSoftwareRelease,
    ImageScanningTime,
    ImageModificationTime,
    ImageMedium,
    ProductType,
    ScannerVendorIdentity,
    ScannerProductIdentity,
    ScannerFirmwareRevision,
    ScannerFirmwareDate,
    ScannerSerialNumber,
    ScannerPixelSize,
    PiwEquipmentManufacturer,
    PhotoFinisherName,
    SbaRevision,
    SbaCommand,
    SbaFilm,
    CopyrightStatus,
    CopyrightFile,
    CompressionClass,
}

impl MetadataField {
    /// Every field, in dictionary order.
    pub const ALL: [Self; 20] = [
        Self::SpecificationVersion,
        Self::AuthoringSoftwareRelease,
        Self::ImageScanningTime,
        Self::ImageModificationTime,
        Self::ImageMedium,
        Self::ProductType,
        Self::ScannerVendorIdentity,
        Self::ScannerProductIdentity,
        Self::ScannerFirmwareRevision,
        Self::ScannerFirmwareDate,
        Self::ScannerSerialNumber,
        Self::ScannerPixelSize,
        Self::PiwEquipmentManufacturer,
        Self::PhotoFinisherName,
        Self::SbaRevision,
        Self::SbaCommand,
        Self::SbaFilm,
        Self::CopyrightStatus,
        Self::CopyrightFile,
        Self::CompressionClass,
    ];

    /// English-language description of the field.
    pub fn description(self) -> &'static str {
        match self {
            Self::SpecificationVersion => "PCD specification version",
            Self::AuthoringSoftwareRelease => "Authoring software release number",
            Self::ImageScanningTime => "Scanning time",
            Self::ImageModificationTime => "Last modification time",
            Self::ImageMedium => "Image medium",
            Self::ProductType => "Product type",
            Self::ScannerVendorIdentity => "Scanner vendor identity",
            Self::ScannerProductIdentity => "Scanner product identity",
            Self::ScannerFirmwareRevision => "Scanner firmware revision",
            Self::ScannerFirmwareDate => "Scanner firmware date",
            Self::ScannerSerialNumber => "Scanner serial number",
            Self::ScannerPixelSize => "Scanner pixel size (microns)",
            Self::PiwEquipmentManufacturer => "Image workstation equipment manufacturer",
            Self::PhotoFinisherName => "Photo finisher name",
            Self::SbaRevision => "Scene balance algorithm revision",
            Self::SbaCommand => "Scene balance algorithm command",
            Self::SbaFilm => "Scene balance algorithm film identification",
            Self::CopyrightStatus => "Copyright status",
            Self::CopyrightFile => "Copyright file name",
            Self::CompressionClass => "Compression",
        }
    }
}

static MEDIUM_TYPES: [&str; 10] = [
    "color negative",
    "color reversal",
    "color hard copy",
    "thermal hard copy",
    "black and white negative",
    "black and white reversal",
    "black and white hard copy",
    "internegative",
    "synthetic image",
    "chromogenic",
];

static SBA_COMMANDS: [&str; 4] = [
    "neutral SBA on, color SBA on",
    "neutral SBA off, color SBA off",
    "neutral SBA on, color SBA off",
    "neutral SBA off, color SBA on",
];

static HUFFMAN_CLASSES: [&str; 4] = [
    "class 1 - 35mm film; pictoral hard copy",
    "class 2 - large format film",
    "class 3 - text and graphics, high resolution",
    "class 4 - text and graphics, high dynamic range",
];

const MISSING: &str = "-";

/// Format one metadata value from the parsed container.
pub(crate) fn value(container: &Container, field: MetadataField) -> String {
    match field {
        MetadataField::SpecificationVersion => version_pair(container, 7),
        MetadataField::AuthoringSoftwareRelease => version_pair(container, 9),
        MetadataField::ImageScanningTime => timestamp(container.ipi_u32(13)),
        MetadataField::ImageModificationTime => timestamp(container.ipi_u32(17)),
        MetadataField::ImageMedium => {
            let medium = container.ipi_bytes(21, 1)[0] as usize;
            MEDIUM_TYPES.get(medium).copied().unwrap_or(MISSING).into()
        }
        MetadataField::ProductType => text(container, 22, 20),
        MetadataField::ScannerVendorIdentity => text(container, 42, 20),
        MetadataField::ScannerProductIdentity => text(container, 62, 16),
        MetadataField::ScannerFirmwareRevision => text(container, 78, 4),
        MetadataField::ScannerFirmwareDate => text(container, 82, 8),
        MetadataField::ScannerSerialNumber => text(container, 90, 20),
        MetadataField::ScannerPixelSize => {
            let bcd = container.ipi_bytes(110, 2);
            format!(
                "{}{}.{}{}",
                (bcd[0] >> 4) & 0xf,
                bcd[0] & 0xf,
                (bcd[1] >> 4) & 0xf,
                bcd[1] & 0xf
            )
        }
        MetadataField::PiwEquipmentManufacturer => text(container, 112, 20),
        MetadataField::PhotoFinisherName => {
            // Exotic character sets have no realistic chance of displaying
            // correctly; report those names as missing.
            if container.ipi_bytes(132, 1)[0] < 5 {
                text(container, 165, 60)
            } else {
                MISSING.into()
            }
        }
        MetadataField::SbaRevision => {
            if container.has_sba() {
                version_pair(container, 228)
            } else {
                MISSING.into()
            }
        }
        MetadataField::SbaCommand => {
            if container.has_sba() {
                let command = container.ipi_bytes(230, 1)[0] as usize;
                SBA_COMMANDS.get(command).copied().unwrap_or(MISSING).into()
            } else {
                MISSING.into()
            }
        }
        MetadataField::SbaFilm => {
            if container.has_sba() {
                match film::lookup(container.ipi_u16(325)) {
                    Some(term) => term.name.into(),
                    None => "Unknown film".into(),
                }
            } else {
                MISSING.into()
            }
        }
        MetadataField::CopyrightStatus => {
            if container.ipi_bytes(331, 1)[0] == 0x1 {
                "Copyright restrictions apply - see copyright file on original CD-ROM for details"
                    .into()
            } else {
                "Copyright restrictions not specified".into()
            }
        }
        MetadataField::CopyrightFile => {
            if container.ipi_bytes(331, 1)[0] == 0x1 {
                text(container, 332, 12)
            } else {
                MISSING.into()
            }
        }
        MetadataField::CompressionClass => HUFFMAN_CLASSES
            .get(container.huffman_class)
            .copied()
            .unwrap_or(MISSING)
            .into(),
    }
}

/// "major.minor" from two binary-coded bytes; `0xffff` means unrecorded.
fn version_pair(container: &Container, offset: usize) -> String {
    if container.ipi_u16(offset) == 0xffff {
        return MISSING.into();
    }
    let bytes = container.ipi_bytes(offset, 2);
    format!("{}.{}", bytes[0], bytes[1])
}

fn timestamp(seconds: u32) -> String {
    if seconds == 0xffff {
        return MISSING.into();
    }
    match DateTime::from_timestamp(seconds as i64, 0) {
        Some(time) => time.format("%a %b %e %H:%M:%S %Y").to_string(),
        None => MISSING.into(),
    }
}

fn text(container: &Container, offset: usize, len: usize) -> String {
    let trimmed = container.ipi_text(offset, len);
    if trimmed.is_empty() {
        MISSING.into()
    } else {
        trimmed.into()
    }
}
