//! Procedural demo input: a signed noise field whose non-positive blobs act
//! as seed regions, so the binaries can run without an input image.

use rayon::prelude::*;

const SALT_DEMO: u64 = 0x6A66_6100_CAFE_0001;

#[inline]
fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E3779B97F4A7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

#[inline]
fn splitmix32(x: u32) -> u32 {
    let mut z = x.wrapping_add(0x9E3779B9);
    z = (z ^ (z >> 16)).wrapping_mul(0x7FEB352D);
    z = (z ^ (z >> 15)).wrapping_mul(0x846CA68B);
    z ^ (z >> 16)
}

/// Stateless per-lattice-point hash. No stateful RNG in pixel loops.
#[inline]
fn hash2(ix: i32, iy: i32, seed: u32) -> u32 {
    let x = ix as u32;
    let y = iy as u32;
    let mut h = seed ^ 0x9E3779B9;
    h = splitmix32(h ^ x.wrapping_mul(0x85EBCA6B));
    h = splitmix32(h ^ y.wrapping_mul(0xC2B2AE35));
    h
}

#[inline]
fn smootherstep(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// 2D gradient noise (Perlin-style), hashed lattice gradients.
#[inline]
fn gradient_noise(x: f32, y: f32, seed: u32) -> f32 {
    let ix = x.floor() as i32;
    let iy = y.floor() as i32;
    let fx = x - ix as f32;
    let fy = y - iy as f32;
    let sx = smootherstep(fx);
    let sy = smootherstep(fy);

    #[inline]
    fn grad(hash: u32, dx: f32, dy: f32) -> f32 {
        // 16 evenly-spaced unit gradients (every 22.5°).
        match hash & 15 {
            0 => dx,
            1 => 0.924 * dx + 0.383 * dy,
            2 => 0.707 * (dx + dy),
            3 => 0.383 * dx + 0.924 * dy,
            4 => dy,
            5 => -0.383 * dx + 0.924 * dy,
            6 => 0.707 * (-dx + dy),
            7 => -0.924 * dx + 0.383 * dy,
            8 => -dx,
            9 => -0.924 * dx - 0.383 * dy,
            10 => 0.707 * (-dx - dy),
            11 => -0.383 * dx - 0.924 * dy,
            12 => -dy,
            13 => 0.383 * dx - 0.924 * dy,
            14 => 0.707 * (dx - dy),
            _ => 0.924 * dx - 0.383 * dy,
        }
    }

    let v00 = grad(hash2(ix, iy, seed), fx, fy);
    let v10 = grad(hash2(ix + 1, iy, seed), fx - 1.0, fy);
    let v01 = grad(hash2(ix, iy + 1, seed), fx, fy - 1.0);
    let v11 = grad(hash2(ix + 1, iy + 1, seed), fx - 1.0, fy - 1.0);

    let a = lerp(v00, v10, sx);
    let b = lerp(v01, v11, sx);
    // Scale to approximately [-1, 1] (raw range is ~[-0.7, 0.7])
    lerp(a, b, sy) * 1.414
}

/// Fractal Brownian Motion with per-octave rotation to break grid alignment.
fn fbm(x: f32, y: f32, seed: u32, octaves: u32, freq0: f32, lac: f32, gain: f32) -> f32 {
    let mut sum = 0.0;
    let mut amp = 1.0;
    let mut freq = freq0;
    let mut norm = 0.0;
    const COS30: f32 = 0.866025;
    const SIN30: f32 = 0.5;
    let mut px = x;
    let mut py = y;
    for i in 0..octaves {
        sum += gradient_noise(px * freq, py * freq, seed.wrapping_add(i)) * amp;
        norm += amp;
        amp *= gain;
        freq *= lac;
        let (rx, ry) = (px * COS30 - py * SIN30, px * SIN30 + py * COS30);
        px = rx;
        py = ry;
    }
    if norm > 0.0 { sum / norm } else { 0.0 }
}

/// Signed demo field: fbm noise shifted up so only the deepest blobs dip
/// below zero and become seed regions under the default threshold.
pub fn demo_field(w: usize, h: usize, seed: u64) -> Vec<f32> {
    let noise_seed = splitmix64(seed ^ SALT_DEMO) as u32;
    let mut values = vec![0.0f32; w * h];
    values.par_chunks_mut(w).enumerate().for_each(|(y, row)| {
        for (x, out) in row.iter_mut().enumerate() {
            let u = x as f32 / w as f32;
            let v = y as f32 / h as f32;
            *out = fbm(u, v, noise_seed, 4, 6.0, 2.0, 0.5) + 0.35;
        }
    });
    values
}
