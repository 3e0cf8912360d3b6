/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Variance guided fusion of two grayscale exposures of the same scene.
//!
//! Both inputs go through [`emd_decompose`], the detail left over is
//! measured with a 3x3 local variance, and every output pixel is taken from
//! the input with more detail there, or their average when neither clearly
//! wins. The result is stretched to the full `0..=255` range and is what
//! [`encode_fused`](crate::encode_fused) writes out as a dump.
use log::{debug, info};

use crate::decoder::FusedImage;
use crate::emd::{emd_decompose, to_q16_16, Q16_SHIFT};
use crate::errors::FusedErrors;

/// Side length of the local variance window
pub const VARIANCE_WINDOW: usize = 3;

/// Share of the average variance, in percent, two variances must differ by
/// before one input is preferred
pub const THRESHOLD_PERCENT: i64 = 20;

/// Where a fused pixel comes from
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AlphaChoice {
    /// First image has more local detail
    A,
    /// Second image has more local detail
    B,
    /// Neither clearly wins, use the rounded mean
    Average
}

/// Variance of a Q16.16 signal over a [`VARIANCE_WINDOW`] square around
/// each pixel, clipped at the image borders.
///
/// Results are in Q16.16.
pub fn local_variance(signal: &[i32], width: usize, height: usize) -> Vec<i64> {
    let half = VARIANCE_WINDOW / 2;
    let mut variance = vec![0_i64; signal.len()];

    for y in 0..height {
        let y_start = y.saturating_sub(half);
        let y_end = (y + half).min(height - 1);

        for x in 0..width {
            let x_start = x.saturating_sub(half);
            let x_end = (x + half).min(width - 1);

            let mut sum = 0_i64;
            let mut sum_sq = 0_i64;
            let mut count = 0_i64;

            for row in signal[y_start * width..=y_end * width + x_end].chunks(width) {
                for &val in &row[x_start..=x_end] {
                    let val = i64::from(val);
                    sum += val;
                    sum_sq += (val * val) >> Q16_SHIFT;
                    count += 1;
                }
            }
            let mean = sum / count;
            variance[y * width + x] = sum_sq / count - ((mean * mean) >> Q16_SHIFT);
        }
    }
    variance
}

/// Pick a source for every pixel from two variance maps.
///
/// The threshold adapts to the images: [`THRESHOLD_PERCENT`] of the average
/// variance over both maps, in whole units.
pub fn decision_mask(var_a: &[i64], var_b: &[i64]) -> Vec<AlphaChoice> {
    let total = var_a.len() + var_b.len();
    if total == 0 {
        return Vec::new();
    }
    let sum: i64 = var_a.iter().chain(var_b).sum();
    let epsilon = ((sum / total as i64) * THRESHOLD_PERCENT / 100) >> Q16_SHIFT;
    debug!("Decision threshold is {}", epsilon);

    var_a
        .iter()
        .zip(var_b)
        .map(|(&a, &b)| {
            let diff = (a - b + (1 << (Q16_SHIFT - 1))) >> Q16_SHIFT;

            if diff > epsilon {
                AlphaChoice::A
            } else if diff < -epsilon {
                AlphaChoice::B
            } else {
                AlphaChoice::Average
            }
        })
        .collect()
}

/// Combine two images pixel by pixel following `mask`
pub fn fuse_with_mask(a: &[u8], b: &[u8], mask: &[AlphaChoice]) -> Vec<u8> {
    a.iter()
        .zip(b)
        .zip(mask)
        .map(|((&pa, &pb), choice)| match choice {
            AlphaChoice::A => pa,
            AlphaChoice::B => pb,
            AlphaChoice::Average => ((u16::from(pa) + u16::from(pb) + 1) >> 1) as u8
        })
        .collect()
}

/// Linearly stretch `pixels` in place so the darkest becomes 0 and the
/// brightest 255.
///
/// A flat image is left untouched.
pub fn histogram_stretch(pixels: &mut [u8]) {
    let (Some(&min), Some(&max)) = (pixels.iter().min(), pixels.iter().max()) else {
        return;
    };
    let range = u32::from(max - min);

    if range == 0 {
        return;
    }
    for pixel in pixels.iter_mut() {
        *pixel = (u32::from(*pixel - min) * 255 / range) as u8;
    }
}

/// Fuse two `width x height` grayscale images into one.
///
/// Runs the whole pipeline: Q16.16 conversion, one sifting pass per input,
/// local variance, decision mask, fusion and histogram stretch.
///
/// # Errors
/// [`FusedErrors::SizeMismatch`] when an input does not hold exactly
/// `width * height` pixels.
pub fn fuse_images(width: u32, height: u32, a: &[u8], b: &[u8]) -> Result<FusedImage, FusedErrors> {
    let expected = u64::from(width) * u64::from(height);

    for input in [a, b] {
        if input.len() as u64 != expected {
            return Err(FusedErrors::SizeMismatch(expected, input.len() as u64));
        }
    }
    let (w, h) = (width as usize, height as usize);

    let mut signal_a = to_q16_16(a);
    let mut signal_b = to_q16_16(b);

    emd_decompose(&mut signal_a);
    emd_decompose(&mut signal_b);

    let mask = decision_mask(
        &local_variance(&signal_a, w, h),
        &local_variance(&signal_b, w, h)
    );
    let mut fused = fuse_with_mask(a, b, &mask);
    histogram_stretch(&mut fused);

    info!("Fused two {}x{} images", width, height);

    Ok(FusedImage::new(width, height, fused))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stretch_covers_full_range() {
        let mut pixels = [10, 20, 30];
        histogram_stretch(&mut pixels);
        assert_eq!(pixels, [0, 127, 255]);
    }

    #[test]
    fn flat_image_is_not_stretched() {
        let mut pixels = [42; 6];
        histogram_stretch(&mut pixels);
        assert_eq!(pixels, [42; 6]);

        let mut empty: [u8; 0] = [];
        histogram_stretch(&mut empty);
    }

    #[test]
    fn variance_of_flat_signal_is_zero() {
        let signal = to_q16_16(&[7; 12]);
        assert!(local_variance(&signal, 4, 3).iter().all(|&v| v == 0));
    }

    #[test]
    fn variance_window_is_clipped() {
        // 2x2 image, every window covers all four pixels
        let signal = to_q16_16(&[0, 2, 0, 2]);
        let variance = local_variance(&signal, 2, 2);

        assert_eq!(variance, [1 << 16; 4]);
    }

    #[test]
    fn variance_is_local() {
        // a single bright pixel at the left end of a 5x1 row
        let signal = to_q16_16(&[3, 0, 0, 0, 0]);
        let variance = local_variance(&signal, 5, 1);

        assert!(variance[0] > 0 && variance[1] > 0);
        assert_eq!(&variance[2..], &[0, 0, 0]);
    }

    #[test]
    fn mask_prefers_the_busier_image() {
        let one = 1 << 16;
        let var_a = [10 * one, 0, 5 * one];
        let var_b = [0, 10 * one, 5 * one];

        assert_eq!(
            decision_mask(&var_a, &var_b),
            [AlphaChoice::A, AlphaChoice::B, AlphaChoice::Average]
        );
    }

    #[test]
    fn mask_threshold_scales_with_average() {
        let one = 1 << 16;
        // average over both maps is 100 units, the threshold is 20
        let var_a = [110 * one, 121 * one];
        let var_b = [90 * one, 79 * one];

        assert_eq!(
            decision_mask(&var_a, &var_b),
            [AlphaChoice::Average, AlphaChoice::A]
        );
    }

    #[test]
    fn average_rounds_up() {
        let fused = fuse_with_mask(
            &[1, 200, 3],
            &[2, 100, 9],
            &[AlphaChoice::Average, AlphaChoice::A, AlphaChoice::B]
        );
        assert_eq!(fused, [2, 200, 9]);
    }

    #[test]
    fn identical_inputs_fuse_to_stretched_input() {
        let image = [10, 20, 30, 40, 50, 60];
        let fused = fuse_images(3, 2, &image, &image).unwrap();

        assert_eq!(fused.dimensions(), (3, 2));
        assert_eq!(fused.pixels(), &[0, 51, 102, 153, 204, 255]);
    }

    #[test]
    fn inputs_must_match_dimensions() {
        let err = fuse_images(2, 2, &[0; 4], &[0; 3]).unwrap_err();
        assert!(matches!(err, FusedErrors::SizeMismatch(4, 3)));
    }
}
