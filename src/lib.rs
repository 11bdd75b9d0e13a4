/*!
A pure-Rust decoder for Kodak Photo CD (PCD) image packs.

A PCD image is a hierarchical multi-resolution YCC image: a thumbnail of
192×128 doubles in both dimensions up to 64Base (6144×4096), with every tier
above Base stored as Huffman-compressed delta corrections against a
bilinearly up-resolved copy of the tier below. `pcd-decode` parses the
container, reads the uncompressed base planes, folds the delta pyramid back
together, and converts the result to RGB in a choice of color spaces and
output formats, rotated to the natural orientation.

# Example
```rust,no_run
use pcd_decode::{ColorSpace, PcdDecoder, Resolution};

let mut decoder = PcdDecoder::new();
decoder
    .parse_file("IMG0042.PCD".as_ref(), None, Resolution::SixteenBase)
    .unwrap();
decoder.post_parse();
decoder.set_color_space(ColorSpace::Srgb);

let (width, height) = (decoder.width(), decoder.height());
let mut pixels = vec![0_u8; width * height * 3];
let (red, rest) = pixels.split_at_mut(width * height);
let (green, blue) = rest.split_at_mut(width * height);
decoder.populate_u8(red, green, blue, None, 1);
```

The decoder recovers from most data errors transparently: a tier whose
compressed stream is damaged is dropped and the image is delivered at the
best tier that decoded cleanly, with the cause available from
[`PcdDecoder::warning`]. Only a file that yields no base image at all is an
error.

# 64Base

The optional 64Base tier lives in a companion "IPE" file set next to the
primary file. Pass the companion's path as the second argument of
[`PcdDecoder::parse_file`]; the extension files it names are resolved
relative to it. Any failure inside the companion downgrades the decode to
16Base instead of failing it.
*/

#![forbid(unsafe_code)]

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

mod bitstream;
mod color;
mod container;
mod delta;
pub mod error;
mod film;
mod huffman;
mod ipe;
mod luts;
mod metadata;
mod plane;
mod pyramid;
mod reader;

use bitstream::BitSource;
use container::Container;
pub use error::{ContainerError, Downgrade, Error, HuffmanError, IpeError, Result};
pub use film::FilmTerm;
pub use metadata::MetadataField;
use plane::Plane;

/// The resolution tiers of a PCD image pack, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Resolution {
    /// 192×128, the index-print thumbnail.
    Base16 = 0,
    /// 384×256.
    Base4 = 1,
    /// 768×512, the highest uncompressed tier.
    Base = 2,
    /// 1536×1024, luma deltas only.
    FourBase = 3,
    /// 3072×2048, luma and chroma deltas.
    SixteenBase = 4,
    /// 6144×4096, stored in the companion IPE file set.
    SixtyFourBase = 5,
}

impl Resolution {
    fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Base16),
            1 => Some(Self::Base4),
            2 => Some(Self::Base),
            3 => Some(Self::FourBase),
            4 => Some(Self::SixteenBase),
            5 => Some(Self::SixtyFourBase),
            _ => None,
        }
    }

    /// Luma plane width at this tier.
    pub fn luma_width(self) -> usize {
        192 << self as usize
    }

    /// Luma plane height at this tier.
    pub fn luma_height(self) -> usize {
        128 << self as usize
    }

    /// Stored chroma plane width. Chroma is subsampled 2:1 against luma at
    /// every tier except 4Base, which stores no chroma of its own and leans
    /// on the Base planes.
    pub(crate) fn chroma_width(self) -> usize {
        match self {
            Self::FourBase => Self::Base.chroma_width(),
            _ => self.luma_width() / 2,
        }
    }

    /// Stored chroma plane height.
    pub(crate) fn chroma_height(self) -> usize {
        match self {
            Self::FourBase => Self::Base.chroma_height(),
            _ => self.luma_height() / 2,
        }
    }

    fn lower(self) -> Option<Self> {
        Self::from_index((self as usize).checked_sub(1)?)
    }
}

/// Chroma upsampling policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpolation {
    /// Nearest neighbour; only useful for debugging.
    Nearest,
    /// The "Kodak standard" bilinear interpolator. The default.
    Bilinear,
    /// Luma-guided adaptive interpolation. Not implemented; decodes with
    /// the bilinear policy.
    LumaAdaptive,
}

/// Target color space of the populated RGB data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    /// Raw Photo CD data converted to RGB but still gamma-compressed.
    Raw,
    /// CCIR 709 primaries at linear light (gamma 1).
    LinearCcir709,
    /// sRGB primaries and tone curve.
    Srgb,
    /// The original YCC planes, rescaled but unconverted.
    Ycc,
}

/// White balance applied in the processed color spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhiteBalance {
    /// 6500 K, what PCD images are scanned for. The default.
    D65,
    /// 5000 K, via a chromatic adaptation matrix.
    D50,
}

/// A PCD decoder instance.
///
/// The lifecycle is `parse_file` (container, base planes and delta streams),
/// `post_parse` (fold the deltas into the pyramid), then any number of
/// `populate_*` calls. Settings may change between populates; monochrome
/// also affects which planes `parse_file` reads, so set it first when it
/// matters.
pub struct PcdDecoder {
    interpolation: Interpolation,
    color_space: ColorSpace,
    white_balance: WhiteBalance,
    monochrome: bool,
    container: Option<Container>,
    resolution: Resolution,
    base_resolution: Resolution,
    luma: Option<Plane>,
    chroma1: Option<Plane>,
    chroma2: Option<Plane>,
    /// Pending delta planes, indexed `[tier - FourBase][plane]`.
    deltas: [[Option<Plane>; 3]; 3],
    warning: Option<Downgrade>,
}

impl Default for PcdDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PcdDecoder {
    /// An empty decoder with default settings.
    pub fn new() -> Self {
        Self {
            interpolation: Interpolation::Bilinear,
            color_space: ColorSpace::Raw,
            white_balance: WhiteBalance::D65,
            monochrome: false,
            container: None,
            resolution: Resolution::Base16,
            base_resolution: Resolution::Base16,
            luma: None,
            chroma1: None,
            chroma2: None,
            deltas: Default::default(),
            warning: None,
        }
    }

    /// Parse a PCD file up to `max_resolution`.
    ///
    /// `ipe_file` names the 64Base companion file and is only consulted when
    /// `max_resolution` is [`Resolution::SixtyFourBase`].
    ///
    /// The actual decoded tier may be lower than requested: a pack simply
    /// not carrying the requested tier is not an error, and a tier whose
    /// data is damaged is dropped with a [`Downgrade`] warning. Metadata and
    /// image dimensions are available once this returns; pixel data needs
    /// [`Self::post_parse`] first.
    pub fn parse_file(
        &mut self,
        path: &Path,
        ipe_file: Option<&Path>,
        max_resolution: Resolution,
    ) -> Result<()> {
        self.release_all();

        let mut file = File::open(path).map_err(|_| ContainerError::CouldNotOpen)?;
        let container = Container::parse(&mut file)?;

        let mut resolution = max_resolution;
        if container.native_resolution < Resolution::SixteenBase {
            resolution = resolution.min(container.native_resolution);
        }

        let base_level = self.read_base_image(&mut file, resolution, &container)?;
        self.base_resolution = base_level;
        if base_level < Resolution::Base {
            // Nothing above the level we actually got can be assembled.
            resolution = base_level;
        }

        if resolution >= Resolution::SixtyFourBase && !container.ipe_available {
            log::debug!("pack does not advertise a 64Base extension; trying the companion anyway");
        }

        if resolution >= Resolution::FourBase {
            match self.read_four_base(&mut file, &container) {
                Ok(()) => {
                    if resolution >= Resolution::SixteenBase {
                        match self.read_sixteen_base(&mut file, &container) {
                            Ok(()) => {
                                if resolution >= Resolution::SixtyFourBase {
                                    if let Err(e) = self.read_sixty_four_base(ipe_file) {
                                        self.deltas[2] = Default::default();
                                        resolution = Resolution::SixteenBase;
                                        self.warning = Some(Downgrade::SixtyFourBase(e));
                                    }
                                }
                            }
                            Err(e) => {
                                self.deltas[1] = Default::default();
                                resolution = Resolution::FourBase;
                                self.warning = Some(Downgrade::SixteenBase(e));
                            }
                        }
                    }
                }
                Err(e) => {
                    self.deltas[0] = Default::default();
                    resolution = Resolution::Base;
                    self.warning = Some(Downgrade::FourBase(e));
                }
            }
        }

        if let Some(warning) = &self.warning {
            log::warn!("{warning}");
        }

        self.resolution = resolution;
        self.container = Some(container);

        Ok(())
    }

    /// Fold the pending delta tiers into the image pyramid.
    ///
    /// Idempotent: once the deltas have been consumed (or when nothing was
    /// parsed) this is a no-op.
    pub fn post_parse(&mut self) {
        if self.container.is_none() {
            return;
        }

        // Deltas are folded with the bilinear interpolator; the adaptive
        // policy only ever applies to chroma upsampling.
        let method = match self.interpolation {
            Interpolation::Nearest => Interpolation::Nearest,
            _ => Interpolation::Bilinear,
        };

        for tier in [
            Resolution::FourBase,
            Resolution::SixteenBase,
            Resolution::SixtyFourBase,
        ] {
            let slot = tier as usize - Resolution::FourBase as usize;
            let Some(mut luma_dest) = self.deltas[slot][0].take() else {
                continue;
            };
            let Some(luma_base) = self.luma.take() else {
                return;
            };

            pyramid::up_res(&luma_base, &mut luma_dest, method, true);
            self.luma = Some(luma_dest);

            // A tier with luma deltas pulls chroma up with it, whether or
            // not chroma deltas exist.
            let chroma_width = tier.luma_width() / 2;
            let chroma_height = tier.luma_height() / 2;

            for (plane, chroma) in [(1, &mut self.chroma1), (2, &mut self.chroma2)] {
                let has_deltas = self.deltas[slot][plane].is_some();
                let mut dest = self.deltas[slot][plane]
                    .take()
                    .unwrap_or_else(|| Plane::new(chroma_width, chroma_height));
                let Some(base) = chroma.take() else {
                    continue;
                };
                pyramid::up_res(&base, &mut dest, method, has_deltas);
                *chroma = Some(dest);
            }
        }
    }

    /// Actual decoded resolution tier; meaningful after `parse_file`.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Tier the uncompressed base planes were read at.
    pub fn base_resolution(&self) -> Resolution {
        self.base_resolution
    }

    /// Image width after rotation to the natural orientation.
    pub fn width(&self) -> usize {
        match &self.container {
            Some(container) if container.rotation & 1 == 1 => self.resolution.luma_height(),
            Some(_) => self.resolution.luma_width(),
            None => 0,
        }
    }

    /// Image height after rotation to the natural orientation.
    pub fn height(&self) -> usize {
        match &self.container {
            Some(container) if container.rotation & 1 == 1 => self.resolution.luma_width(),
            Some(_) => self.resolution.luma_height(),
            None => 0,
        }
    }

    /// Rotation quadrant of the stored image: `n` means `n * 90°`
    /// counter-clockwise from stored to natural orientation. The populated
    /// RGB data is always delivered in the natural orientation.
    pub fn orientation(&self) -> u8 {
        self.container.as_ref().map_or(0, |c| c.rotation)
    }

    /// Chroma upsampling method for subsequent `populate_*` calls.
    pub fn set_interpolation(&mut self, interpolation: Interpolation) {
        self.interpolation = interpolation;
    }

    /// Target color space for subsequent `populate_*` calls.
    pub fn set_color_space(&mut self, color_space: ColorSpace) {
        self.color_space = color_space;
    }

    /// The configured target color space.
    pub fn color_space(&self) -> ColorSpace {
        self.color_space
    }

    /// White balance for the CCIR 709 and sRGB color spaces.
    pub fn set_white_balance(&mut self, white_balance: WhiteBalance) {
        self.white_balance = white_balance;
    }

    /// Ignore chroma and decode the luma channel only. The populated data is
    /// still three-component RGB. Set this before `parse_file` to skip
    /// reading chroma delta streams as well.
    pub fn set_monochrome(&mut self, monochrome: bool) {
        self.monochrome = monochrome;
    }

    /// Whether monochrome processing is enabled.
    pub fn is_monochrome(&self) -> bool {
        self.monochrome
    }

    /// Scanning time in seconds since 1970-01-01 UTC.
    pub fn digitisation_time(&self) -> Option<u32> {
        self.container.as_ref().map(|c| c.scanning_time())
    }

    /// The film term record of the scanned medium, if the pack carries a
    /// scene balance section naming a known film.
    pub fn film_term_data(&self) -> Option<FilmTerm> {
        let container = self.container.as_ref()?;
        if !container.has_sba() {
            return None;
        }
        film::lookup(container.ipi_u16(325))
    }

    /// A metadata field as `(description, value)`. Fields the pack does not
    /// carry yield `"-"`.
    pub fn metadata(&self, field: MetadataField) -> (&'static str, String) {
        let value = match &self.container {
            Some(container) => metadata::value(container, field),
            None => "-".into(),
        };
        (field.description(), value)
    }

    /// The most recent downgrade warning, when `parse_file` succeeded at a
    /// lower tier than requested because of damaged data.
    pub fn warning(&self) -> Option<&Downgrade> {
        self.warning.as_ref()
    }

    /// Fill 8-bit RGB channel buffers; see [`Self::populate_f32`].
    pub fn populate_u8(
        &self,
        red: &mut [u8],
        green: &mut [u8],
        blue: &mut [u8],
        alpha: Option<&mut [u8]>,
        stride: usize,
    ) {
        self.populate(red, green, blue, alpha, stride);
    }

    /// Fill 16-bit RGB channel buffers; see [`Self::populate_f32`].
    pub fn populate_u16(
        &self,
        red: &mut [u16],
        green: &mut [u16],
        blue: &mut [u16],
        alpha: Option<&mut [u16]>,
        stride: usize,
    ) {
        self.populate(red, green, blue, alpha, stride);
    }

    /// Fill float RGB channel buffers with values in `[0, 1]`.
    ///
    /// `stride` is the element step per pixel within each buffer, allowing
    /// planar (`stride == 1`) or interleaved-per-channel layouts. Alpha,
    /// when present, is written as the format's opaque constant. Requires a
    /// successful `parse_file` followed by `post_parse`; does nothing
    /// otherwise. Idempotent for fixed settings.
    ///
    /// # Panics
    /// If a buffer holds fewer than `width() * height() * stride` elements.
    pub fn populate_f32(
        &self,
        red: &mut [f32],
        green: &mut [f32],
        blue: &mut [f32],
        alpha: Option<&mut [f32]>,
        stride: usize,
    ) {
        self.populate(red, green, blue, alpha, stride);
    }

    fn populate<T: color::Sample>(
        &self,
        red: &mut [T],
        green: &mut [T],
        blue: &mut [T],
        alpha: Option<&mut [T]>,
        stride: usize,
    ) {
        let (Some(container), Some(luma)) = (&self.container, &self.luma) else {
            return;
        };

        // Bring chroma to luma resolution unless the debugging interpolator
        // is active, in which case conversion samples the subsampled planes
        // directly.
        let mut upsampled: Option<(Plane, Plane)> = None;
        let mut chroma_shift = 0;
        if !self.monochrome
            && let (Some(c1), Some(c2)) = (&self.chroma1, &self.chroma2)
        {
            chroma_shift = (luma.width / c1.width).trailing_zeros();
            if self.interpolation != Interpolation::Nearest && chroma_shift > 0 {
                upsampled = Some((
                    self.upsample_chroma(c1, luma, chroma_shift),
                    self.upsample_chroma(c2, luma, chroma_shift),
                ));
                chroma_shift = 0;
            }
        }

        let (chroma1, chroma2): (Option<&[u8]>, Option<&[u8]>) = if self.monochrome {
            (None, None)
        } else {
            match &upsampled {
                Some((c1, c2)) => (Some(&c1.data), Some(&c2.data)),
                None => (
                    self.chroma1.as_ref().map(|p| p.data.as_slice()),
                    self.chroma2.as_ref().map(|p| p.data.as_slice()),
                ),
            }
        };

        let source = color::ConvertSource {
            luma,
            chroma1,
            chroma2,
            chroma_shift,
            rotation: container.rotation,
            color_space: self.color_space,
            white_balance: self.white_balance,
        };
        source.populate(red, green, blue, alpha, stride);
    }

    /// Up-res one chroma plane to luma dimensions, in one or two doubling
    /// passes depending on the subsampling factor.
    fn upsample_chroma(&self, chroma: &Plane, luma: &Plane, shift: u32) -> Plane {
        let method = self.interpolation;

        if shift == 2 {
            let mut intermediate = Plane::new(luma.width / 2, luma.height / 2);
            pyramid::up_res(chroma, &mut intermediate, method, false);
            let mut full = Plane::new(luma.width, luma.height);
            pyramid::up_res(&intermediate, &mut full, method, false);
            full
        } else {
            let mut full = Plane::new(luma.width, luma.height);
            pyramid::up_res(chroma, &mut full, method, false);
            full
        }
    }

    /// Read the uncompressed planes of the best available tier at or below
    /// `Base`, stepping down on any short read.
    fn read_base_image(
        &mut self,
        file: &mut File,
        requested: Resolution,
        container: &Container,
    ) -> Result<Resolution> {
        let mut level = requested.min(Resolution::Base);

        loop {
            match read_base_planes(file, level, container) {
                Ok((luma, chroma1, chroma2)) => {
                    self.luma = Some(luma);
                    self.chroma1 = Some(chroma1);
                    self.chroma2 = Some(chroma2);
                    return Ok(level);
                }
                Err(_) => match level.lower() {
                    Some(lower) => level = lower,
                    None => return Err(ContainerError::NoBaseImage.into()),
                },
            }
        }
    }

    /// The 4Base tier: one code table, luma deltas only.
    fn read_four_base(&mut self, file: &mut File, container: &Container) -> Result<()> {
        let level = Resolution::FourBase;
        let tables = huffman::read_tables(file, container.hct_offset(level), 1)?;

        file.seek(SeekFrom::Start(container.icd_offset(level)))?;
        self.deltas[0][0] = Some(Plane::new(level.luma_width(), level.luma_height()));

        let mut bits = BitSource::new(&mut *file)?;
        delta::decode_deltas(&mut bits, &tables, level, 0, 0, &mut self.deltas[0], 0)
    }

    /// The 16Base tier: three code tables (one when monochrome), luma and
    /// chroma deltas.
    fn read_sixteen_base(&mut self, file: &mut File, container: &Container) -> Result<()> {
        let level = Resolution::SixteenBase;
        let num_tables = if self.monochrome { 1 } else { 3 };
        let tables = huffman::read_tables(file, container.hct_offset(level), num_tables)?;

        file.seek(SeekFrom::Start(container.icd_offset(level)))?;
        self.deltas[1][0] = Some(Plane::new(level.luma_width(), level.luma_height()));
        if !self.monochrome {
            self.deltas[1][1] = Some(Plane::new(level.chroma_width(), level.chroma_height()));
            self.deltas[1][2] = Some(Plane::new(level.chroma_width(), level.chroma_height()));
        }

        let mut bits = BitSource::new(&mut *file)?;
        delta::decode_deltas(&mut bits, &tables, level, 0, 0, &mut self.deltas[1], 0)
    }

    /// The 64Base tier, decoded across the companion IPE file set.
    fn read_sixty_four_base(&mut self, ipe_file: Option<&Path>) -> Result<()> {
        let Some(ipe_file) = ipe_file else {
            return Err(IpeError::MissingCompanion.into());
        };

        let info = ipe::decode_companion(ipe_file, self.monochrome, &mut self.deltas[2])?;
        log::debug!(
            "64Base companion decoded: {} layers across {} extension files",
            info.layers,
            info.files
        );

        Ok(())
    }

    fn release_all(&mut self) {
        self.container = None;
        self.luma = None;
        self.chroma1 = None;
        self.chroma2 = None;
        self.deltas = Default::default();
        self.warning = None;
        self.resolution = Resolution::Base16;
        self.base_resolution = Resolution::Base16;
    }
}

/// Read one tier's interleaved uncompressed planes: for every chroma row,
/// two luma rows, then one row of each chroma plane.
fn read_base_planes(
    file: &mut File,
    level: Resolution,
    container: &Container,
) -> Result<(Plane, Plane, Plane)> {
    let luma_width = level.luma_width();
    let chroma_width = level.chroma_width();
    let chroma_height = level.chroma_height();

    let mut luma = Plane::new(luma_width, level.luma_height());
    let mut chroma1 = Plane::new(chroma_width, chroma_height);
    let mut chroma2 = Plane::new(chroma_width, chroma_height);

    file.seek(SeekFrom::Start(container.icd_offset(level)))?;

    for y in 0..chroma_height {
        let luma_start = y * 2 * luma_width;
        file.read_exact(&mut luma.data[luma_start..luma_start + 2 * luma_width])?;

        let chroma_start = y * chroma_width;
        file.read_exact(&mut chroma1.data[chroma_start..chroma_start + chroma_width])?;
        file.read_exact(&mut chroma2.data[chroma_start..chroma_start + chroma_width])?;
    }

    Ok((luma, chroma1, chroma2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_dimensions_double_per_level() {
        assert_eq!(Resolution::Base16.luma_width(), 192);
        assert_eq!(Resolution::Base16.luma_height(), 128);
        assert_eq!(Resolution::Base.luma_width(), 768);
        assert_eq!(Resolution::SixtyFourBase.luma_width(), 6144);
        assert_eq!(Resolution::SixtyFourBase.luma_height(), 4096);
    }

    #[test]
    fn four_base_reuses_the_base_chroma_grid() {
        assert_eq!(Resolution::Base.chroma_width(), 384);
        assert_eq!(Resolution::FourBase.chroma_width(), 384);
        assert_eq!(Resolution::FourBase.chroma_height(), 256);
        assert_eq!(Resolution::SixteenBase.chroma_width(), 1536);
    }

    #[test]
    fn an_empty_decoder_reports_nothing() {
        let decoder = PcdDecoder::new();

        assert_eq!(decoder.width(), 0);
        assert_eq!(decoder.height(), 0);
        assert_eq!(decoder.orientation(), 0);
        assert_eq!(decoder.digitisation_time(), None);
        assert!(decoder.film_term_data().is_none());
        assert_eq!(decoder.metadata(MetadataField::SbaFilm).1, "-");
    }

    #[test]
    fn populate_on_an_empty_decoder_is_a_no_op() {
        let decoder = PcdDecoder::new();
        let (mut r, mut g, mut b) = ([7_u8; 4], [7_u8; 4], [7_u8; 4]);
        decoder.populate_u8(&mut r, &mut g, &mut b, None, 1);
        assert_eq!(r, [7; 4]);
    }
}
