//! Plane up-resolution and delta assembly.
//!
//! Each pyramid step doubles a plane in both dimensions with the "Kodak
//! standard" bilinear interpolator and folds in the tier's signed delta
//! corrections with saturation. The destination plane arrives holding the
//! raw delta bytes and is overwritten in place, band-parallel over row
//! pairs.

use rayon::prelude::*;

use crate::Interpolation;
use crate::plane::Plane;

/// Double `base` into `dest` (which must have twice the dimensions).
///
/// With `has_deltas`, the destination's existing bytes are read as signed
/// deltas and added to the interpolated values before the saturating store.
pub(crate) fn up_res(base: &Plane, dest: &mut Plane, method: Interpolation, has_deltas: bool) {
    debug_assert_eq!(dest.width, base.width * 2);
    debug_assert_eq!(dest.height, base.height * 2);

    if method == Interpolation::Nearest {
        up_res_nearest(base, dest, has_deltas);
        return;
    }

    let base_width = base.width;
    let base_height = base.height;
    let width = dest.width;

    dest.data
        .par_chunks_mut(2 * width)
        .enumerate()
        .for_each(|(row, out)| {
            let row_plus = (row + 1).min(base_height - 1);
            let top = &base.data[row * base_width..(row + 1) * base_width];
            let bottom = &base.data[row_plus * base_width..(row_plus + 1) * base_width];

            for column in 0..base_width {
                let column_plus = (column + 1).min(base_width - 1);
                let p00 = top[column] as i32;
                let p01 = top[column_plus] as i32;
                let p10 = bottom[column] as i32;
                let p11 = bottom[column_plus] as i32;

                store(out, 2 * column, p00, has_deltas);
                store(out, 2 * column + 1, (p00 + p01 + 1) >> 1, has_deltas);
                store(out, 2 * column + width, (p00 + p10 + 1) >> 1, has_deltas);
                store(
                    out,
                    2 * column + 1 + width,
                    (p00 + p01 + p10 + p11 + 2) >> 2,
                    has_deltas,
                );
            }
        });
}

/// Nearest-neighbour up-resolution. Only useful for debugging; the bilinear
/// policy is what the format was designed around.
fn up_res_nearest(base: &Plane, dest: &mut Plane, has_deltas: bool) {
    let base_width = base.width;

    dest.data
        .par_chunks_mut(dest.width)
        .enumerate()
        .for_each(|(row, out)| {
            let source = &base.data[(row >> 1) * base_width..];
            for (column, slot) in out.iter_mut().enumerate() {
                let mut sum = source[column >> 1] as i32;
                if has_deltas {
                    sum += *slot as i8 as i32;
                }
                *slot = sum.clamp(0, 255) as u8;
            }
        });
}

#[inline(always)]
fn store(out: &mut [u8], index: usize, value: i32, has_deltas: bool) {
    let mut sum = value;
    if has_deltas {
        sum += out[index] as i8 as i32;
    }
    out[index] = sum.clamp(0, 255) as u8;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plane_from(width: usize, height: usize, data: &[u8]) -> Plane {
        Plane {
            data: data.to_vec(),
            width,
            height,
        }
    }

    #[test]
    fn bilinear_doubling_matches_hand_computation() {
        let base = plane_from(2, 2, &[10, 30, 50, 70]);
        let mut dest = Plane::new(4, 4);

        up_res(&base, &mut dest, Interpolation::Bilinear, false);

        #[rustfmt::skip]
        let expected = [
            10, 20, 30, 30,
            30, 40, 50, 50,
            50, 60, 70, 70,
            50, 60, 70, 70,
        ];
        assert_eq!(dest.data, expected);
    }

    #[test]
    fn deltas_are_added_with_saturation() {
        let base = plane_from(1, 1, &[200]);
        // Deltas +100 (saturates high), -100 (clamps at 100), -128, +7.
        let mut dest = plane_from(2, 2, &[100, 156, 128, 7]);

        up_res(&base, &mut dest, Interpolation::Bilinear, true);

        assert_eq!(dest.data, [255, 100, 72, 207]);
    }

    #[test]
    fn nearest_replicates_base_pixels() {
        let base = plane_from(2, 1, &[11, 22]);
        let mut dest = Plane::new(4, 2);

        up_res(&base, &mut dest, Interpolation::Nearest, false);

        assert_eq!(dest.data, [11, 11, 22, 22, 11, 11, 22, 22]);
    }
}
