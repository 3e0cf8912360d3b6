/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Q16.16 fixed point signals and a single sifting pass of empirical mode
//! decomposition.
//!
//! The image is treated as one long row-major signal. Local maxima and
//! minima are joined by straight lines to form an upper and a lower
//! envelope, and the mean of both is subtracted from the signal, leaving
//! the first intrinsic mode function (the fine detail).
use log::trace;

/// Number of fractional bits in a Q16.16 value
pub const Q16_SHIFT: u32 = 16;

/// Widen 8-bit samples to Q16.16
pub fn to_q16_16(pixels: &[u8]) -> Vec<i32> {
    pixels.iter().map(|&p| i32::from(p) << Q16_SHIFT).collect()
}

/// Round Q16.16 values to the nearest integer and clamp them to `0..=255`
pub fn from_q16_16(signal: &[i32]) -> Vec<u8> {
    signal
        .iter()
        .map(|&v| ((i64::from(v) + (1 << (Q16_SHIFT - 1))) >> Q16_SHIFT).clamp(0, 255) as u8)
        .collect()
}

/// Positions and values of strict local extrema.
///
/// The first and last sample only have one neighbour and are compared
/// against it alone.
fn find_extrema(signal: &[i32]) -> (Vec<(usize, i32)>, Vec<(usize, i32)>) {
    let mut maxima = Vec::new();
    let mut minima = Vec::new();

    let len = signal.len();
    if len < 2 {
        return (maxima, minima);
    }

    if signal[0] > signal[1] {
        maxima.push((0, signal[0]));
    } else if signal[0] < signal[1] {
        minima.push((0, signal[0]));
    }

    for (i, w) in signal.windows(3).enumerate() {
        let (prev, cur, next) = (w[0], w[1], w[2]);

        if cur > prev && cur > next {
            maxima.push((i + 1, cur));
        } else if cur < prev && cur < next {
            minima.push((i + 1, cur));
        }
    }

    if signal[len - 1] > signal[len - 2] {
        maxima.push((len - 1, signal[len - 1]));
    } else if signal[len - 1] < signal[len - 2] {
        minima.push((len - 1, signal[len - 1]));
    }
    (maxima, minima)
}

/// Piecewise linear envelope through `extrema`, held constant before the
/// first and after the last one.
///
/// Returns `None` when there is nothing to interpolate.
fn linear_envelope(extrema: &[(usize, i32)], len: usize) -> Option<Vec<i64>> {
    let (&(first_pos, first_val), &(last_pos, last_val)) = (extrema.first()?, extrema.last()?);

    let mut envelope = vec![0_i64; len];

    envelope[..first_pos].fill(i64::from(first_val));

    for pair in extrema.windows(2) {
        let ((pos1, val1), (pos2, val2)) = (pair[0], pair[1]);
        let seg_len = (pos2 - pos1) as i64;
        let delta = i64::from(val2) - i64::from(val1);

        for (j, out) in envelope[pos1..pos2].iter_mut().enumerate() {
            *out = i64::from(val1) + (delta * j as i64).div_euclid(seg_len);
        }
    }
    envelope[last_pos..].fill(i64::from(last_val));

    Some(envelope)
}

/// Run one sifting pass over a Q16.16 signal in place.
///
/// A side without extrema (a flat or strictly monotonic run has no interior
/// ones) uses the signal itself as its envelope.
pub fn emd_decompose(signal: &mut [i32]) {
    let (maxima, minima) = find_extrema(signal);
    trace!("{} maxima, {} minima", maxima.len(), minima.len());

    let len = signal.len();
    let upper = linear_envelope(&maxima, len);
    let lower = linear_envelope(&minima, len);

    for (i, sample) in signal.iter_mut().enumerate() {
        let own = i64::from(*sample);
        let up = upper.as_ref().map_or(own, |env| env[i]);
        let down = lower.as_ref().map_or(own, |env| env[i]);

        *sample = (own - ((up + down) >> 1)) as i32;
    }
}
