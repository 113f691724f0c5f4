use rayon::prelude::*;

// Color wheel segment lengths (Baker et al., "A Database and Evaluation
// Methodology for Optical Flow", ICCV 2007). 55 hues around the circle.
const RY: usize = 15;
const YG: usize = 6;
const GC: usize = 4;
const CB: usize = 11;
const BM: usize = 13;
const MR: usize = 6;

/// The 55-entry flow color wheel, channels in [0, 1].
fn color_wheel() -> Vec<[f32; 3]> {
    let mut wheel = Vec::with_capacity(RY + YG + GC + CB + BM + MR);
    for i in 0..RY {
        wheel.push([1.0, i as f32 / RY as f32, 0.0]);
    }
    for i in 0..YG {
        wheel.push([1.0 - i as f32 / YG as f32, 1.0, 0.0]);
    }
    for i in 0..GC {
        wheel.push([0.0, 1.0, i as f32 / GC as f32]);
    }
    for i in 0..CB {
        wheel.push([0.0, 1.0 - i as f32 / CB as f32, 1.0]);
    }
    for i in 0..BM {
        wheel.push([i as f32 / BM as f32, 0.0, 1.0]);
    }
    for i in 0..MR {
        wheel.push([1.0, 0.0, 1.0 - i as f32 / MR as f32]);
    }
    wheel
}

/// Render one batch element of a displacement field (`[H, W, 2]` flat) as an
/// angle/magnitude color image: direction picks the hue from the wheel,
/// magnitude (normalized by the image's max radius) fades from white at zero
/// toward the full hue.
pub fn render_flow(offsets: &[f32], w: usize, h: usize) -> Vec<u8> {
    debug_assert_eq!(offsets.len(), w * h * 2);
    let wheel = color_wheel();
    let ncols = wheel.len();

    let rad_max = (0..w * h)
        .map(|i| {
            let u = offsets[i * 2];
            let v = offsets[i * 2 + 1];
            (u * u + v * v).sqrt()
        })
        .fold(0.0f32, f32::max)
        + 1e-5;

    let mut rgba = vec![0u8; w * h * 4];
    rgba.par_chunks_mut(w * 4).enumerate().for_each(|(y, row)| {
        for x in 0..w {
            let i = y * w + x;
            let u = offsets[i * 2] / rad_max;
            let v = offsets[i * 2 + 1] / rad_max;
            let rad = (u * u + v * v).sqrt();

            let a = (-v).atan2(-u) / std::f32::consts::PI;
            let fk = (a + 1.0) / 2.0 * (ncols - 1) as f32;
            let k0 = (fk.floor() as usize).min(ncols - 1);
            let k1 = if k0 + 1 == ncols { 0 } else { k0 + 1 };
            let f = fk - k0 as f32;

            let mut px = [255u8; 4];
            for c in 0..3 {
                let col = lerp(wheel[k0][c], wheel[k1][c], f);
                let col = if rad <= 1.0 {
                    1.0 - rad * (1.0 - col)
                } else {
                    col * 0.75
                };
                px[c] = (col * 255.0).round().clamp(0.0, 255.0) as u8;
            }
            row[x * 4..x * 4 + 4].copy_from_slice(&px);
        }
    });
    rgba
}

/// Grayscale nearest-seed distance, normalized by the image's max magnitude.
pub fn render_magnitude(offsets: &[f32], w: usize, h: usize) -> Vec<u8> {
    debug_assert_eq!(offsets.len(), w * h * 2);
    let mag: Vec<f32> = (0..w * h)
        .map(|i| {
            let u = offsets[i * 2];
            let v = offsets[i * 2 + 1];
            (u * u + v * v).sqrt()
        })
        .collect();
    let max_d = mag.iter().cloned().fold(0.0f32, f32::max).max(1.0);

    let mut rgba = vec![0u8; w * h * 4];
    for i in 0..w * h {
        let t = (mag[i] / max_d * 255.0) as u8;
        rgba[i * 4..i * 4 + 4].copy_from_slice(&[t, t, t, 255]);
    }
    rgba
}

/// Seed mask: white where the input value is at or below the threshold.
pub fn render_seeds(values: &[f32], w: usize, h: usize, threshold: f32) -> Vec<u8> {
    debug_assert_eq!(values.len(), w * h);
    let mut rgba = vec![0u8; w * h * 4];
    for i in 0..w * h {
        let v = if values[i] <= threshold { 255 } else { 0 };
        rgba[i * 4..i * 4 + 4].copy_from_slice(&[v, v, v, 255]);
    }
    rgba
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_has_55_hues_anchored_at_red() {
        let wheel = color_wheel();
        assert_eq!(wheel.len(), 55);
        assert_eq!(wheel[0], [1.0, 0.0, 0.0]);
    }

    #[test]
    fn render_buffers_are_rgba_sized() {
        let offsets = vec![0.0f32; 6 * 4 * 2];
        assert_eq!(render_flow(&offsets, 6, 4).len(), 6 * 4 * 4);
        assert_eq!(render_magnitude(&offsets, 6, 4).len(), 6 * 4 * 4);
    }

    #[test]
    fn seed_mask_tracks_the_threshold() {
        let values = [-0.5f32, 0.0, 0.5, 1.0];
        let rgba = render_seeds(&values, 4, 1, 0.0);
        assert_eq!(rgba[0], 255);
        assert_eq!(rgba[4], 255);
        assert_eq!(rgba[8], 0);
        assert_eq!(rgba[12], 0);
    }
}
