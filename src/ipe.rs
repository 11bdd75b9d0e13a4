//! The 64Base image pack extension (IPE) locator.
//!
//! 64Base deltas do not live in the primary file. A companion "IC" file
//! describes one luma (and optionally two chroma) layers, names up to ten
//! extension files holding the compressed streams, and carries per-layer
//! pointer arrays of `(file index, byte offset)` records. Decoding walks a
//! layer's pointer array, opening the named extension file whenever the file
//! index changes and handing the accumulated run to the delta decoder.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use smallvec::SmallVec;

use crate::Resolution;
use crate::bitstream::BitSource;
use crate::delta::decode_deltas;
use crate::error::{IpeError, Result, bail};
use crate::huffman;
use crate::plane::Plane;
use crate::reader::{be_u16, be_u32};

/// What a successfully decoded companion contained.
pub(crate) struct CompanionInfo {
    pub layers: u16,
    pub files: u16,
}

struct LayerDescriptor {
    width: usize,
    height: usize,
    /// Run length of one sequence, in symbols.
    sequence_length: usize,
    /// Column offset of this layer's sub-tile within the full-width planes.
    column_offset: usize,
    /// Absolute offset of the layer's pointer array within the IC file.
    pointers_offset: usize,
}

/// Parse the IC companion file and decode the 64Base deltas it points to.
///
/// On error the caller discards the (partially filled) 64Base delta planes
/// and downgrades the decode to 16Base.
pub(crate) fn decode_companion(
    ipe_path: &Path,
    monochrome: bool,
    deltas: &mut [Option<Plane>; 3],
) -> Result<CompanionInfo> {
    let path_str = ipe_path.to_string_lossy();
    if path_str.len() < 10 {
        bail!(IpeError::NameTooShort);
    }
    // Discs mastered for case-preserving systems list the extension files in
    // lower case; the companion path's own extension tells us which world we
    // are in.
    let lowercase = path_str.rfind(".ipe").is_some();

    let mut ic = File::open(ipe_path).map_err(|_| IpeError::CouldNotOpen)?;
    let mut buffer = Vec::new();
    ic.read_to_end(&mut buffer)?;
    if buffer.len() < 60 {
        bail!(IpeError::TooSmall);
    }

    let descriptor_offset = be_u32(&buffer, 44).ok_or(IpeError::TooSmall)? as usize;
    let filenames_offset = be_u32(&buffer, 48).ok_or(IpeError::TooSmall)? as usize;
    let huffman_offset = be_u32(&buffer, 56).ok_or(IpeError::TooSmall)?;

    let mut layers = be_u16(&buffer, descriptor_offset).ok_or(IpeError::TooSmall)?;
    if layers != 1 && layers != 3 {
        bail!(IpeError::InvalidLayerCount);
    }
    if monochrome {
        // A monochrome decode only needs the luma layer.
        layers = 1;
    }

    let mut descriptors: SmallVec<[LayerDescriptor; 3]> = SmallVec::new();
    let mut position = descriptor_offset + 2;
    for _ in 0..layers {
        let record_len = be_u16(&buffer, position).ok_or(IpeError::InvalidDescriptor)? as usize;
        if record_len == 0 {
            bail!(IpeError::InvalidDescriptor);
        }
        descriptors.push(LayerDescriptor {
            width: be_u16(&buffer, position + 4).ok_or(IpeError::InvalidDescriptor)? as usize,
            height: be_u16(&buffer, position + 6).ok_or(IpeError::InvalidDescriptor)? as usize,
            column_offset: be_u16(&buffer, position + 8).ok_or(IpeError::InvalidDescriptor)?
                as usize,
            sequence_length: be_u32(&buffer, position + 10).ok_or(IpeError::InvalidDescriptor)?
                as usize,
            pointers_offset: be_u32(&buffer, position + 14).ok_or(IpeError::InvalidDescriptor)?
                as usize,
        });
        position += record_len;
    }

    let file_count = be_u16(&buffer, filenames_offset).ok_or(IpeError::TooSmall)?;
    if !(1..=10).contains(&file_count) || file_count < layers {
        bail!(IpeError::InvalidFileCount);
    }

    let mut names: SmallVec<[String; 10]> = SmallVec::new();
    for i in 0..file_count as usize {
        let start = filenames_offset + 2 + 16 * i;
        let raw = buffer.get(start..start + 12).ok_or(IpeError::TooSmall)?;
        let mut name: String = raw
            .iter()
            .take_while(|&&b| b != 0)
            .map(|&b| b as char)
            .collect::<String>()
            .trim_end()
            .to_string();
        if lowercase {
            name.make_ascii_lowercase();
        }
        names.push(name);
    }

    let tables = huffman::read_tables(&mut ic, huffman_offset as u64, layers as usize)?;

    let level = Resolution::SixtyFourBase;
    deltas[0] = Some(Plane::new(level.luma_width(), level.luma_height()));
    if layers == 3 {
        deltas[1] = Some(Plane::new(level.chroma_width(), level.chroma_height()));
        deltas[2] = Some(Plane::new(level.chroma_width(), level.chroma_height()));
    }

    for descriptor in &descriptors {
        if descriptor.sequence_length == 0 {
            bail!(IpeError::InvalidDescriptor);
        }
        let mut remaining = descriptor.width * descriptor.height / descriptor.sequence_length;
        let mut entry_position = descriptor.pointers_offset;

        let (mut current_file, mut start_point) =
            pointer_entry(&buffer, entry_position).ok_or(IpeError::TooSmall)?;
        let mut run = 0;

        while remaining > 0 {
            remaining -= 1;
            run += 1;

            let (file_index, offset) =
                pointer_entry(&buffer, entry_position).ok_or(IpeError::TooSmall)?;
            if file_index != current_file || remaining == 0 {
                let name = names
                    .get(current_file as usize)
                    .ok_or(IpeError::InvalidFileCount)?;
                let extension_path = ipe_path.with_file_name(name.as_str());
                let mut extension =
                    File::open(&extension_path).map_err(|_| IpeError::ExtensionNotFound)?;
                extension.seek(SeekFrom::Start(start_point as u64))?;

                let mut bits = BitSource::new(extension)?;
                decode_deltas(
                    &mut bits,
                    &tables,
                    level,
                    descriptor.sequence_length,
                    run - 1,
                    deltas,
                    descriptor.column_offset,
                )?;

                current_file = file_index;
                start_point = offset;
                run = 0;
            }
            entry_position += 6;
        }
    }

    Ok(CompanionInfo {
        layers,
        files: file_count,
    })
}

fn pointer_entry(buffer: &[u8], position: usize) -> Option<(u16, u32)> {
    Some((be_u16(buffer, position)?, be_u32(buffer, position + 2)?))
}
