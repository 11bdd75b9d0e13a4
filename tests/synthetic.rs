//! End-to-end tests over synthesized PCD image packs.
//!
//! Real Photo CD discs are rare; these tests build byte-exact packs in
//! memory instead, including working Huffman streams for the compressed
//! tiers, and drive the decoder through the path-based API.

use std::fs;
use std::path::PathBuf;

use pcd_decode::{ColorSpace, MetadataField, PcdDecoder, Resolution};

const SECTOR: usize = 2048;

/// Byte offset of the IPI header.
const IPI: usize = 2048;

/// Byte offset of the Base/16 image component attributes.
const ICA: usize = IPI + 1536;

fn write_temp(dir: &tempfile::TempDir, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, data).unwrap();
    path
}

/// A pack whose only readable tier is the Base16 thumbnail (the file ends
/// before the Base4 region).
fn base16_pack() -> Vec<u8> {
    let base16_bytes = 64 * (192 * 2 + 96 * 2);
    let mut data = vec![0_u8; 4 * SECTOR + base16_bytes];
    data[IPI..IPI + 7].copy_from_slice(b"PCD_IPI");
    data[ICA + 9] = 1;
    data
}

/// Append one Huffman sequence: resync marker, plane/row header, and a
/// payload of one-bit codes (the test tables map code `1` to symbol 0).
fn push_sequence(stream: &mut Vec<u8>, plane: u8, row: u16, payload_bytes: usize) {
    stream.extend_from_slice(&[
        0xff,
        0xff,
        0xfe,
        (plane << 6) | ((row >> 7) as u8 & 0x3f),
        ((row & 0x7f) as u8) << 1,
    ]);
    stream.extend(std::iter::repeat_n(0xff_u8, payload_bytes));
}

/// Write `tables` single-entry code tables: the one-bit code `1` decodes to
/// the zero delta.
fn write_hct(data: &mut [u8], offset: usize, tables: usize) {
    let mut pos = offset;
    for _ in 0..tables {
        data[pos] = 0x00;
        data[pos + 1..pos + 5].copy_from_slice(&[0x00, 0x80, 0x00, 0x00]);
        pos += 5;
    }
}

/// A pack carrying zero-valued planes all the way up to 16Base, with real
/// Huffman streams for the 4Base and 16Base delta tiers.
fn sixteen_base_pack() -> Vec<u8> {
    let base4_stop = 500_usize;

    let mut stream4 = Vec::new();
    for row in 0..1024_u16 {
        push_sequence(&mut stream4, 0, row, 1536 / 8);
    }
    // A stale out-of-range row terminates the tier.
    push_sequence(&mut stream4, 0, 0x1fff, 0);

    let mut stream16 = Vec::new();
    for row in 0..2048_u16 {
        push_sequence(&mut stream16, 0, row, 3072 / 8);
    }
    for chroma_row in 0..1024_u16 {
        push_sequence(&mut stream16, 2, chroma_row * 2, 1536 / 8);
    }
    for chroma_row in 0..1024_u16 {
        push_sequence(&mut stream16, 3, chroma_row * 2, 1536 / 8);
    }

    let icd16 = (base4_stop + 14) * SECTOR;
    let mut data = vec![0_u8; icd16 + stream16.len() + 2 * SECTOR];
    data[IPI..IPI + 7].copy_from_slice(b"PCD_IPI");
    data[ICA + 9] = 1;
    // Native resolution class 16Base.
    data[ICA + 2] = 0b0000_1000;
    data[ICA + 3..ICA + 5].copy_from_slice(&(base4_stop as u16).to_be_bytes());

    write_hct(&mut data, 388 * SECTOR, 1);
    data[389 * SECTOR..389 * SECTOR + stream4.len()].copy_from_slice(&stream4);
    write_hct(&mut data, (base4_stop + 12) * SECTOR, 3);
    data[icd16..icd16 + stream16.len()].copy_from_slice(&stream16);

    data
}

#[test]
fn header_validation_decodes_the_thumbnail() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(&dir, "img0001.pcd", &base16_pack());

    let mut decoder = PcdDecoder::new();
    decoder
        .parse_file(&path, None, Resolution::Base)
        .expect("a zero-filled pack still has a thumbnail");

    assert_eq!(decoder.resolution(), Resolution::Base16);
    assert_eq!(decoder.orientation(), 0);
    assert_eq!(decoder.width(), 192);
    assert_eq!(decoder.height(), 128);
    assert!(decoder.warning().is_none());

    decoder.post_parse();
    decoder.set_color_space(ColorSpace::Ycc);

    let pixels = 192 * 128;
    let mut red = vec![0xee_u8; pixels];
    let (mut green, mut blue) = (vec![0_u8; pixels], vec![0_u8; pixels]);
    decoder.populate_u8(&mut red, &mut green, &mut blue, None, 1);

    // Zero planes decode to a uniform image.
    assert!(red.iter().all(|&v| v == red[0]));
    assert_eq!(red[0], 0);
}

#[test]
fn interleaved_audio_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut pack = base16_pack();
    pack[ICA + 9] = 2;
    let path = write_temp(&dir, "img0001.pcd", &pack);

    let err = PcdDecoder::new()
        .parse_file(&path, None, Resolution::Base)
        .unwrap_err();
    assert!(err.to_string().contains("interleaved audio"));
}

#[test]
fn truncated_files_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(&dir, "img0001.pcd", &base16_pack()[..1000]);

    let err = PcdDecoder::new()
        .parse_file(&path, None, Resolution::Base)
        .unwrap_err();
    assert!(err.to_string().contains("too small"));
}

#[test]
fn a_bad_signature_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut pack = base16_pack();
    pack[IPI] = b'J';
    let path = write_temp(&dir, "img0001.pcd", &pack);

    let err = PcdDecoder::new()
        .parse_file(&path, None, Resolution::Base)
        .unwrap_err();
    assert!(err.to_string().contains("not a valid PCD file"));
}

#[test]
fn rotation_swaps_the_reported_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    let mut pack = base16_pack();
    pack[ICA + 2] = 0x01;
    let path = write_temp(&dir, "img0001.pcd", &pack);

    let mut decoder = PcdDecoder::new();
    decoder
        .parse_file(&path, None, Resolution::Base16)
        .unwrap();

    assert_eq!(decoder.orientation(), 1);
    assert_eq!(decoder.width(), 128);
    assert_eq!(decoder.height(), 192);
}

#[test]
fn metadata_fields_format_from_the_ipi_header() {
    let dir = tempfile::tempdir().unwrap();
    let mut pack = base16_pack();
    // Specification version 1.2.
    pack[IPI + 7] = 1;
    pack[IPI + 8] = 2;
    // Medium: color reversal.
    pack[IPI + 21] = 1;
    // Product type, blank padded.
    pack[IPI + 22..IPI + 30].copy_from_slice(b"PCD0042 ");
    // Scanner pixel size, BCD.
    pack[IPI + 110] = 0x12;
    pack[IPI + 111] = 0x34;
    // SBA section with film term number 578.
    pack[IPI + 225..IPI + 228].copy_from_slice(b"SBA");
    pack[IPI + 325..IPI + 327].copy_from_slice(&578_u16.to_be_bytes());
    let path = write_temp(&dir, "img0001.pcd", &pack);

    let mut decoder = PcdDecoder::new();
    decoder
        .parse_file(&path, None, Resolution::Base16)
        .unwrap();

    assert_eq!(
        decoder.metadata(MetadataField::SpecificationVersion).1,
        "1.2"
    );
    assert_eq!(
        decoder.metadata(MetadataField::ImageMedium).1,
        "color reversal"
    );
    assert_eq!(decoder.metadata(MetadataField::ProductType).1, "PCD0042");
    assert_eq!(decoder.metadata(MetadataField::ScannerPixelSize).1, "12.34");
    assert_eq!(
        decoder.metadata(MetadataField::SbaFilm).1,
        "KODAK EKTAPRESS PJ800-2"
    );
    assert_eq!(decoder.metadata(MetadataField::ScannerSerialNumber).1, "-");

    let film = decoder.film_term_data().unwrap();
    assert_eq!(film.ftn, 578);
    assert_eq!(film.product_code, 78);
    assert_eq!(film.gamut_code, 15);
}

#[test]
fn the_compressed_tiers_assemble_to_sixteen_base() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(&dir, "img0001.pcd", &sixteen_base_pack());

    let mut decoder = PcdDecoder::new();
    decoder
        .parse_file(&path, None, Resolution::SixteenBase)
        .unwrap();

    assert_eq!(decoder.resolution(), Resolution::SixteenBase);
    assert!(decoder.warning().is_none());
    assert_eq!(decoder.width(), 3072);
    assert_eq!(decoder.height(), 2048);

    decoder.post_parse();
    decoder.set_color_space(ColorSpace::Ycc);

    let pixels = 3072 * 2048;
    let mut red = vec![0xee_u8; pixels];
    let (mut green, mut blue) = (vec![0xee_u8; pixels], vec![0xee_u8; pixels]);
    decoder.populate_u8(&mut red, &mut green, &mut blue, None, 1);

    // All-zero planes with all-zero deltas stay all zero through assembly.
    assert!(red.iter().all(|&v| v == 0));
    assert!(green.iter().all(|&v| v == 0));
    assert!(blue.iter().all(|&v| v == 0));
}

#[test]
fn a_malformed_companion_downgrades_to_sixteen_base() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(&dir, "img0001.pcd", &sixteen_base_pack());
    let ipe = write_temp(&dir, "64base.ipe", &[0_u8; 100]);

    let mut decoder = PcdDecoder::new();
    decoder
        .parse_file(&path, Some(&ipe), Resolution::SixtyFourBase)
        .expect("a 64Base failure is a downgrade, not an error");

    assert_eq!(decoder.resolution(), Resolution::SixteenBase);
    let warning = decoder.warning().unwrap().to_string();
    assert!(warning.contains("64Base"), "got: {warning}");
}

#[test]
fn a_missing_companion_downgrades_to_sixteen_base() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(&dir, "img0001.pcd", &sixteen_base_pack());

    let mut decoder = PcdDecoder::new();
    decoder
        .parse_file(&path, None, Resolution::SixtyFourBase)
        .unwrap();

    assert_eq!(decoder.resolution(), Resolution::SixteenBase);
    assert!(decoder.warning().unwrap().to_string().contains("64Base"));
}

#[test]
fn post_parse_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(&dir, "img0001.pcd", &sixteen_base_pack());

    let mut decoder = PcdDecoder::new();
    decoder
        .parse_file(&path, None, Resolution::FourBase)
        .unwrap();
    assert_eq!(decoder.resolution(), Resolution::FourBase);

    decoder.post_parse();

    let pixels = 1536 * 1024;
    let mut first = vec![0_u8; pixels];
    let (mut green, mut blue) = (vec![0_u8; pixels], vec![0_u8; pixels]);
    decoder.populate_u8(&mut first, &mut green, &mut blue, None, 1);

    decoder.post_parse();
    let mut second = vec![0xee_u8; pixels];
    decoder.populate_u8(&mut second, &mut green, &mut blue, None, 1);

    assert_eq!(first, second);
}

#[test]
fn monochrome_can_be_toggled_without_losing_chroma() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(&dir, "img0001.pcd", &base16_pack());

    let mut decoder = PcdDecoder::new();
    decoder
        .parse_file(&path, None, Resolution::Base16)
        .unwrap();
    decoder.post_parse();

    let pixels = 192 * 128;
    let mut with_chroma = vec![0_u8; pixels];
    let (mut green, mut blue) = (vec![0_u8; pixels], vec![0_u8; pixels]);
    decoder.populate_u8(&mut with_chroma, &mut green, &mut blue, None, 1);
    let green_with_chroma = green.clone();

    // Zero chroma bytes are far from the neutral values, so color output
    // differs between the channels.
    assert_ne!(with_chroma[0], green_with_chroma[0]);

    decoder.set_monochrome(true);
    let mut gray_red = vec![0_u8; pixels];
    decoder.populate_u8(&mut gray_red, &mut green, &mut blue, None, 1);
    assert_eq!(gray_red, green);
    assert_eq!(green, blue);

    // Unsetting monochrome restores the chroma-bearing output.
    decoder.set_monochrome(false);
    let mut restored = vec![0_u8; pixels];
    decoder.populate_u8(&mut restored, &mut green, &mut blue, None, 1);
    assert_eq!(restored, with_chroma);
    assert_eq!(green, green_with_chroma);
}
