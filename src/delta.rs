//! Decoding of the Huffman-coded delta streams.
//!
//! A resolution tier's compressed data is a series of *sequences*: a resync
//! marker, a plane/row header, then one Huffman-coded run of delta bytes.
//! The header's bit-field placements are tier-specific, as is its width
//! (24 bits up to 16Base, 32 bits for the 64Base extension streams).

use std::io::Read;

use crate::Resolution;
use crate::bitstream::BitSource;
use crate::error::{HuffmanError, Result, bail};
use crate::huffman::HuffTables;
use crate::plane::Plane;

/// Bit-field placements of a sequence header, after the resync marker and a
/// 16-bit consume have left the header bytes in the shift register.
struct SequenceLayout {
    row_shift: u32,
    row_mask: u32,
    /// Chroma header rows are stored in the chroma grid at 64Base and must
    /// be scaled up to luma units before the bounds check.
    row_subsample: usize,
    seq_shift: u32,
    seq_mask: u32,
    plane_shift: u32,
    plane_mask: u32,
    /// Whole bytes to discard after the fields have been extracted.
    header_bytes: u32,
}

fn layout(level: Resolution) -> SequenceLayout {
    match level {
        Resolution::FourBase | Resolution::SixteenBase => SequenceLayout {
            row_shift: 9,
            row_mask: 0x1fff,
            row_subsample: 1,
            seq_shift: 0,
            seq_mask: 0,
            plane_shift: 22,
            plane_mask: 0x3,
            header_bytes: 3,
        },
        Resolution::SixtyFourBase => SequenceLayout {
            row_shift: 6,
            row_mask: 0x3fff,
            row_subsample: 2,
            seq_shift: 1,
            seq_mask: 0xf,
            plane_shift: 19,
            plane_mask: 0x6,
            header_bytes: 4,
        },
        _ => unreachable!("levels at or below Base are stored uncompressed"),
    }
}

/// Decode sequences into the tier's delta planes.
///
/// `sequence_size` is the run length in symbols (0 means one full row per
/// sequence). `sequences_to_process` bounds the number of sequences; 0
/// derives the tier's own budget (one sequence per stored plane row). The
/// 64Base locator passes explicit run counts per extension-file segment,
/// along with the layer's column offset into the full-width planes.
///
/// Rows outside the target plane are skipped without consuming their run;
/// the next resync recovers the stream position. Chroma sequences address
/// plane 2 (C1) and plane 3 (C2); plane 4 is legacy IPE aliasing for C2.
pub(crate) fn decode_deltas<R: Read>(
    bits: &mut BitSource<R>,
    tables: &HuffTables,
    level: Resolution,
    sequence_size: usize,
    sequences_to_process: usize,
    planes: &mut [Option<Plane>; 3],
    col_offset: usize,
) -> Result<()> {
    let layout = layout(level);
    let luma_width = level.luma_width();
    let luma_height = level.luma_height();
    let chroma_width = level.chroma_width();

    let mut budget = if sequences_to_process == 0 {
        if level == Resolution::SixtyFourBase {
            1
        } else {
            level.luma_height() + 2 * level.chroma_height()
        }
    } else {
        sequences_to_process
    };

    let mut plane_track = planes
        .iter()
        .enumerate()
        .fold(0_u32, |acc, (i, p)| acc | ((p.is_some() as u32) << i));
    let mut row = 0;

    while (plane_track != 0 || row < luma_height) && budget > 0 {
        bits.sync()?;
        // Pull the header fields into the shift register.
        bits.consume(16)?;
        let acc = bits.accumulator();

        row = ((acc >> layout.row_shift) & layout.row_mask) as usize;
        let sequence = ((acc >> layout.seq_shift) & layout.seq_mask) as usize;
        let plane = (acc >> layout.plane_shift) & layout.plane_mask;
        if plane != 0 {
            row *= layout.row_subsample;
        }

        for _ in 0..layout.header_bytes {
            bits.consume(8)?;
        }

        if row < luma_height {
            match plane {
                0 => {
                    if let Some(luma) = &mut planes[0] {
                        let length = if sequence_size == 0 {
                            luma_width
                        } else {
                            sequence_size
                        };
                        let start = row * luma_width + sequence * sequence_size + col_offset;
                        if let Some(dest) = luma.data.get_mut(start..start + length) {
                            tables.plane(0).decode_run(bits, dest)?;
                        }
                    }
                    plane_track &= 0x6;
                }
                2 => {
                    if let Some(chroma) = &mut planes[1] {
                        let length = if sequence_size == 0 {
                            chroma_width
                        } else {
                            sequence_size
                        };
                        let start =
                            (row >> 1) * chroma_width + sequence * sequence_size + (col_offset >> 1);
                        if let Some(dest) = chroma.data.get_mut(start..start + length) {
                            tables.plane(1).decode_run(bits, dest)?;
                        }
                    }
                    plane_track &= 0x5;
                }
                // Plane 4 is the legacy IPE alias for C2.
                3 | 4 => {
                    if let Some(chroma) = &mut planes[2] {
                        let length = if sequence_size == 0 {
                            chroma_width
                        } else {
                            sequence_size
                        };
                        let start =
                            (row >> 1) * chroma_width + sequence * sequence_size + (col_offset >> 1);
                        if let Some(dest) = chroma.data.get_mut(start..start + length) {
                            tables.plane(2).decode_run(bits, dest)?;
                        }
                    }
                    plane_track &= 0x3;
                }
                _ => bail!(HuffmanError::InvalidPlane),
            }
        }

        budget -= 1;
    }

    Ok(())
}
