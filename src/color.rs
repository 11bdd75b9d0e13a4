//! The color pipeline ("micro CMM").
//!
//! Rather than handing the decoded YCC planes to an external color
//! management module, the conversion to RGB is a handful of integer matrix
//! steps and look-up tables: the Photo CD YCC matrix into a 0..=1388
//! fixed-point range, an optional linear-light decode, an optional D65→D50
//! chromatic adaptation, an optional sRGB re-encode, and a final
//! quantization LUT per output format. Image rotation is applied during
//! address generation, and rows are converted in parallel bands.

use rayon::prelude::*;

use crate::luts::{CCIR709_TO_SRGB, F32_OUTPUT, TO_LINEAR_LIGHT, U8_OUTPUT, U16_OUTPUT};
use crate::plane::Plane;
use crate::{ColorSpace, WhiteBalance};

/// Top of the pipeline's fixed-point range.
const PIPELINE_MAX: i32 = 1388;

/// Neutral (zero-chroma) value of the C1 plane.
pub(crate) const C1_NEUTRAL: i32 = 156;

/// Neutral (zero-chroma) value of the C2 plane.
pub(crate) const C2_NEUTRAL: i32 = 137;

/// An output sample format: one of the three quantization LUTs plus the
/// format's opaque alpha constant.
pub(crate) trait Sample: Copy + Send {
    const OPAQUE: Self;
    fn quantize(index: i32) -> Self;
}

impl Sample for u8 {
    const OPAQUE: Self = 0xff;

    #[inline(always)]
    fn quantize(index: i32) -> Self {
        U8_OUTPUT[index as usize]
    }
}

impl Sample for u16 {
    const OPAQUE: Self = 0xffff;

    #[inline(always)]
    fn quantize(index: i32) -> Self {
        U16_OUTPUT[index as usize]
    }
}

impl Sample for f32 {
    const OPAQUE: Self = 1.0;

    #[inline(always)]
    fn quantize(index: i32) -> Self {
        F32_OUTPUT[index as usize]
    }
}

/// The planes and settings one conversion reads from.
pub(crate) struct ConvertSource<'a> {
    pub luma: &'a Plane,
    /// Chroma planes at luma resolution, or at a power-of-two subsampling
    /// when the upsampling stage was skipped. `None` for monochrome output.
    pub chroma1: Option<&'a [u8]>,
    pub chroma2: Option<&'a [u8]>,
    /// log2 of the luma-to-chroma subsampling factor.
    pub chroma_shift: u32,
    pub rotation: u8,
    pub color_space: ColorSpace,
    pub white_balance: WhiteBalance,
}

impl ConvertSource<'_> {
    /// Convert and quantize into the caller's channel buffers.
    ///
    /// `stride` is the element step per pixel within each buffer. The
    /// destination is written in the natural orientation; each output row
    /// band is an independent rayon work item.
    pub(crate) fn populate<T: Sample>(
        &self,
        red: &mut [T],
        green: &mut [T],
        blue: &mut [T],
        alpha: Option<&mut [T]>,
        stride: usize,
    ) {
        let (dest_width, dest_height) = if self.rotation & 1 == 1 {
            (self.luma.height, self.luma.width)
        } else {
            (self.luma.width, self.luma.height)
        };
        let row_len = dest_width * stride;
        let pixels = dest_height * row_len;
        if pixels == 0 {
            return;
        }

        let red = &mut red[..pixels];
        let green = &mut green[..pixels];
        let blue = &mut blue[..pixels];

        match alpha {
            Some(alpha) => {
                let alpha = &mut alpha[..pixels];
                red.par_chunks_mut(row_len)
                    .zip(green.par_chunks_mut(row_len))
                    .zip(blue.par_chunks_mut(row_len))
                    .zip(alpha.par_chunks_mut(row_len))
                    .enumerate()
                    .for_each(|(dest_row, (((red, green), blue), alpha))| {
                        self.convert_row(dest_row, dest_width, red, green, blue, Some(alpha), stride);
                    });
            }
            None => {
                red.par_chunks_mut(row_len)
                    .zip(green.par_chunks_mut(row_len))
                    .zip(blue.par_chunks_mut(row_len))
                    .enumerate()
                    .for_each(|(dest_row, ((red, green), blue))| {
                        self.convert_row(dest_row, dest_width, red, green, blue, None, stride);
                    });
            }
        }
    }

    fn convert_row<T: Sample>(
        &self,
        dest_row: usize,
        dest_width: usize,
        red: &mut [T],
        green: &mut [T],
        blue: &mut [T],
        alpha: Option<&mut [T]>,
        stride: usize,
    ) {
        let width = self.luma.width;
        let height = self.luma.height;
        let shift = self.chroma_shift;
        let chroma_width = width >> shift;

        for dest_col in 0..dest_width {
            // Undo the rotation: which source pixel lands here?
            let (row, col) = match self.rotation {
                1 => (dest_col, width - 1 - dest_row),
                2 => (height - 1 - dest_row, width - 1 - dest_col),
                3 => (height - 1 - dest_col, dest_row),
                _ => (dest_row, dest_col),
            };

            let luma = self.luma.data[col + row * width] as i32;
            let chroma_index = (col >> shift) + (row >> shift) * chroma_width;
            let c1 = self.chroma1.map(|p| p[chroma_index] as i32);
            let c2 = self.chroma2.map(|p| p[chroma_index] as i32);

            let (ri, gi, bi) = self.pixel(luma, c1, c2);

            let slot = dest_col * stride;
            red[slot] = T::quantize(ri);
            green[slot] = T::quantize(gi);
            blue[slot] = T::quantize(bi);
        }

        if let Some(alpha) = alpha {
            for dest_col in 0..dest_width {
                alpha[dest_col * stride] = T::OPAQUE;
            }
        }
    }

    /// The fixed-point pipeline for one pixel, yielding 0..=1388 indices.
    fn pixel(&self, luma: i32, c1: Option<i32>, c2: Option<i32>) -> (i32, i32, i32) {
        if self.color_space == ColorSpace::Ycc {
            // The caller wants the original YCC data, only rescaled.
            let ri = ((luma << 10) / 188).clamp(0, PIPELINE_MAX);
            let gi = c1.map_or(ri, |c1| ((c1 << 10) / 188).clamp(0, PIPELINE_MAX));
            let bi = c2.map_or(ri, |c2| ((c2 << 10) / 188).clamp(0, PIPELINE_MAX));
            return (ri, gi, bi);
        }

        let li = luma * 5573;
        let c1i = c1.map_or(0, |c1| (c1 - C1_NEUTRAL) * 9085);
        let c2i = c2.map_or(0, |c2| (c2 - C2_NEUTRAL) * 7461);

        let mut ri = ((li + c2i) >> 10).clamp(0, PIPELINE_MAX);
        let mut gi = ((li >> 10) - c1i / 5278 - c2i / 2012).clamp(0, PIPELINE_MAX);
        let mut bi = ((li + c1i) >> 10).clamp(0, PIPELINE_MAX);

        if matches!(
            self.color_space,
            ColorSpace::LinearCcir709 | ColorSpace::Srgb
        ) {
            ri = TO_LINEAR_LIGHT[ri as usize] as i32;
            gi = TO_LINEAR_LIGHT[gi as usize] as i32;
            bi = TO_LINEAR_LIGHT[bi as usize] as i32;

            // White balance only applies to the processed spaces, never to
            // raw data.
            if self.white_balance == WhiteBalance::D50 {
                let (rt, gt, bt) = (ri, gi, bi);
                ri = (5930 * rt - 143 * gt + 393 * bt) >> 13;
                gi = (-176 * rt + 6268 * gt + 131 * bt) >> 13;
                bi = (76 * rt - 128 * gt + 8256 * bt) >> 13;
            }
        }

        if self.color_space == ColorSpace::Srgb {
            ri = CCIR709_TO_SRGB[ri.clamp(0, PIPELINE_MAX) as usize] as i32;
            gi = CCIR709_TO_SRGB[gi.clamp(0, PIPELINE_MAX) as usize] as i32;
            bi = CCIR709_TO_SRGB[bi.clamp(0, PIPELINE_MAX) as usize] as i32;
        } else {
            ri = ri.clamp(0, PIPELINE_MAX);
            gi = gi.clamp(0, PIPELINE_MAX);
            bi = bi.clamp(0, PIPELINE_MAX);
        }

        (ri, gi, bi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source<'a>(
        luma: &'a Plane,
        chroma1: Option<&'a [u8]>,
        chroma2: Option<&'a [u8]>,
        color_space: ColorSpace,
    ) -> ConvertSource<'a> {
        ConvertSource {
            luma,
            chroma1,
            chroma2,
            chroma_shift: 0,
            rotation: 0,
            color_space,
            white_balance: WhiteBalance::D65,
        }
    }

    #[test]
    fn neutral_chroma_yields_equal_srgb_channels() {
        let luma = Plane {
            data: vec![196],
            width: 1,
            height: 1,
        };
        let c1 = [C1_NEUTRAL as u8];
        let c2 = [C2_NEUTRAL as u8];
        let src = source(&luma, Some(&c1), Some(&c2), ColorSpace::Srgb);

        let (mut r, mut g, mut b) = ([0.0_f32], [0.0_f32], [0.0_f32]);
        src.populate(&mut r, &mut g, &mut b, None, 1);

        assert_eq!(r[0], g[0]);
        assert_eq!(g[0], b[0]);
        // The PCD curve and the sRGB curve nearly cancel, so a mid-gray
        // luma comes back out close to where it went in.
        assert!((r[0] - 196.0 / 255.0).abs() < 0.02, "got {}", r[0]);
    }

    #[test]
    fn ycc_mode_rescales_the_planes() {
        let luma = Plane {
            data: vec![188],
            width: 1,
            height: 1,
        };
        let c1 = [94_u8];
        let c2 = [255_u8];
        let src = source(&luma, Some(&c1), Some(&c2), ColorSpace::Ycc);

        let (mut r, mut g, mut b) = ([0.0_f32], [0.0_f32], [0.0_f32]);
        src.populate(&mut r, &mut g, &mut b, None, 1);

        // 188 maps to exactly 1024/1388; 255 saturates the range.
        assert!((r[0] - 1024.0 / 1388.0).abs() < 1e-6);
        assert!((g[0] - 512.0 / 1388.0).abs() < 1e-6);
        assert_eq!(b[0], 1.0);
    }

    #[test]
    fn output_formats_are_consistent_lut_mappings() {
        let luma = Plane {
            data: vec![0, 67, 130, 255],
            width: 4,
            height: 1,
        };
        let src = source(&luma, None, None, ColorSpace::Raw);

        let mut r8 = [0_u8; 4];
        let mut r16 = [0_u16; 4];
        let mut rf = [0.0_f32; 4];
        let (mut g8, mut b8) = ([0_u8; 4], [0_u8; 4]);
        let (mut g16, mut b16) = ([0_u16; 4], [0_u16; 4]);
        let (mut gf, mut bf) = ([0.0_f32; 4], [0.0_f32; 4]);

        src.populate(&mut r8, &mut g8, &mut b8, None, 1);
        src.populate(&mut r16, &mut g16, &mut b16, None, 1);
        src.populate(&mut rf, &mut gf, &mut bf, None, 1);

        for i in 0..4 {
            assert!((r16[i] as f32 / 65535.0 - rf[i]).abs() < 1e-3);
            assert!((r8[i] as f32 / 255.0 - rf[i]).abs() < 5e-3);
        }
    }

    /// The u8 a luma value produces in YCC mode with neutral chroma absent.
    fn ycc_u8(luma: u8) -> u8 {
        u8::quantize(((luma as i32) << 10) / 188)
    }

    #[test]
    fn rotation_3_sends_the_origin_to_the_source_height_column() {
        // 2 wide, 3 high; luma values identify each pixel.
        let luma = Plane {
            data: vec![10, 20, 30, 40, 50, 60],
            width: 2,
            height: 3,
        };
        let mut src = source(&luma, None, None, ColorSpace::Ycc);
        src.rotation = 3;

        // Output is 3 wide, 2 high; source (0, 0) lands at destination
        // index `source_height - 1`, i.e. row 0, column 2.
        let mut r = [0_u8; 6];
        let (mut g, mut b) = ([0_u8; 6], [0_u8; 6]);
        src.populate(&mut r, &mut g, &mut b, None, 1);

        let expected: Vec<u8> = [50, 30, 10, 60, 40, 20].map(ycc_u8).to_vec();
        assert_eq!(r.to_vec(), expected);
    }

    #[test]
    fn alpha_is_written_opaque() {
        let luma = Plane {
            data: vec![1, 2],
            width: 2,
            height: 1,
        };
        let src = source(&luma, None, None, ColorSpace::Raw);

        let mut r = [0_u16; 4];
        let (mut g, mut b, mut a) = ([0_u16; 4], [0_u16; 4], [0_u16; 4]);
        src.populate(&mut r, &mut g, &mut b, Some(&mut a), 2);

        assert_eq!(a[0], u16::MAX);
        assert_eq!(a[2], u16::MAX);
    }
}
