pub mod config;
pub mod demo;
pub mod error;
pub mod field;
pub mod flood;
pub mod grid;
pub mod offset;
pub mod render;
pub mod schedule;

use std::time::Instant;

use rayon::prelude::*;

use config::Params;
use error::FloodError;
use field::InputField;
use grid::{Grid, Nearest};
use offset::OffsetField;

pub use demo::demo_field;

pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

/// Run the full jump-flood pipeline over a validated field.
///
/// Batch elements are fully independent and processed in parallel; within an
/// element, every round is itself data-parallel over rows. The returned
/// offsets have logical shape `[B, H, W, 2]`, matching the field's batch.
pub fn compute(field: &InputField, params: &Params) -> (OffsetField, Vec<Timing>) {
    let mut timings = Vec::new();
    let total_start = Instant::now();

    let b = field.batch();
    let h = field.h();
    let w = field.w();

    // 1. Threshold the input into per-element owner grids
    let t = Instant::now();
    let seeded: Vec<Grid<Nearest>> = (0..b)
        .into_par_iter()
        .map(|i| flood::seed_grid(field.element(i), w, h, params.threshold))
        .collect();
    timings.push(Timing {
        name: "seed_init",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 2. Flood each element through the shared step schedule
    let t = Instant::now();
    let steps = schedule::step_schedule(w, h, params.refine);
    let flooded: Vec<Grid<Nearest>> = seeded
        .into_par_iter()
        .map(|g| flood::jump_flood(g, &steps))
        .collect();
    timings.push(Timing {
        name: "flood",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 3. Extract displacement channels
    let t = Instant::now();
    let mut data = vec![0.0f32; b * h * w * 2];
    data.par_chunks_mut(h * w * 2)
        .zip(flooded.par_iter())
        .for_each(|(chunk, g)| offset::extract_offsets(g, chunk));
    let offsets = OffsetField::new(data, b, h, w);
    timings.push(Timing {
        name: "extract",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    timings.push(Timing {
        name: "TOTAL",
        ms: total_start.elapsed().as_secs_f64() * 1000.0,
    });

    (offsets, timings)
}

/// Validate a raw array against its declared shape, then run the pipeline.
///
/// This is the whole error surface: a malformed shape fails here, before any
/// work happens, and no partial output is produced.
pub fn compute_from_values(
    data: Vec<f32>,
    shape: &[usize],
    params: &Params,
) -> Result<(OffsetField, Vec<Timing>), FloodError> {
    let field = InputField::from_values(data, shape)?;
    Ok(compute(&field, params))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_with_seeds(w: usize, h: usize, seeds: &[(usize, usize)]) -> Vec<f32> {
        let mut values = vec![1.0f32; w * h];
        for &(x, y) in seeds {
            values[y * w + x] = -1.0;
        }
        values
    }

    #[test]
    fn single_seed_pipeline_is_exact() {
        let values = field_with_seeds(9, 7, &[(2, 5)]);
        let (offsets, timings) =
            compute_from_values(values, &[7, 9], &Params::default()).unwrap();
        assert_eq!(offsets.shape(), [1, 7, 9, 2]);
        for y in 0..7 {
            for x in 0..9 {
                let (u, v) = offsets.get(0, x, y);
                assert_eq!((u, v), (2.0 - x as f32, 5.0 - y as f32));
            }
        }
        assert!(timings.iter().any(|t| t.name == "TOTAL"));
    }

    #[test]
    fn batched_run_matches_independent_runs() {
        let a = field_with_seeds(8, 6, &[(1, 1), (6, 4)]);
        let b = field_with_seeds(8, 6, &[(4, 0), (0, 5), (7, 2)]);

        let mut stacked = a.clone();
        stacked.extend_from_slice(&b);
        let (batched, _) =
            compute_from_values(stacked, &[2, 6, 8], &Params::default()).unwrap();

        let (only_a, _) = compute_from_values(a, &[6, 8], &Params::default()).unwrap();
        let (only_b, _) = compute_from_values(b, &[6, 8], &Params::default()).unwrap();

        assert_eq!(batched.element(0), only_a.element(0));
        assert_eq!(batched.element(1), only_b.element(0));
    }

    #[test]
    fn seedless_element_reports_the_sentinel_without_failing_the_batch() {
        let with_seed = field_with_seeds(5, 5, &[(2, 2)]);
        let mut stacked = with_seed;
        stacked.extend_from_slice(&vec![1.0f32; 25]);

        let (offsets, _) =
            compute_from_values(stacked, &[2, 5, 5], &Params::default()).unwrap();
        assert_eq!(offsets.get(0, 0, 0), (2.0, 2.0));
        assert!(offsets.element(1).iter().all(|&c| c == 0.0));
    }

    #[test]
    fn malformed_shape_fails_before_any_work() {
        let err = compute_from_values(vec![0.0; 8], &[3, 3], &Params::default());
        assert!(err.is_err());
    }

    #[test]
    fn demo_field_runs_end_to_end() {
        let values = demo_field(64, 48, 42);
        let (offsets, _) =
            compute_from_values(values, &[48, 64], &Params::default()).unwrap();
        assert_eq!(offsets.shape(), [1, 48, 64, 2]);
    }
}
