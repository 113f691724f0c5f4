use crate::error::FloodError;

/// Validated input field in canonical `[B, H, W]` layout.
///
/// Construction is the only fallible step in the pipeline: every shape and
/// consistency problem is rejected here, before any flood round runs.
#[derive(Clone, Debug)]
pub struct InputField {
    data: Vec<f32>,
    batch: usize,
    h: usize,
    w: usize,
}

impl InputField {
    /// Build a field from flat row-major values and a declared shape.
    ///
    /// Accepted shapes, after squeezing a trailing singleton channel axis
    /// (`[.., H, W, 1]` → `[.., H, W]`):
    /// - `[H, W]`: a single grid, batch of one
    /// - `[B, H, W]`: a batch of independent grids (a leading 1 is just B=1)
    ///
    /// Anything else is an [`FloodError::InvalidShape`]: higher ranks, a
    /// trailing channel axis larger than one, zero-sized axes, or a data
    /// length that disagrees with the shape.
    pub fn from_values(data: Vec<f32>, shape: &[usize]) -> Result<Self, FloodError> {
        let mut dims: Vec<usize> = shape.to_vec();
        if dims.len() > 2 && dims.last() == Some(&1) {
            dims.pop();
        }

        let (batch, h, w) = match dims[..] {
            [h, w] => (1, h, w),
            [b, h, w] => (b, h, w),
            _ => {
                return Err(FloodError::InvalidShape {
                    reason: format!(
                        "expected [H, W] or [B, H, W] (optionally with a trailing \
                         singleton channel), got {shape:?}"
                    ),
                });
            }
        };

        if h == 0 || w == 0 {
            return Err(FloodError::InvalidShape {
                reason: format!("spatial dimensions must be positive, got {h}x{w}"),
            });
        }
        if batch == 0 {
            return Err(FloodError::InvalidShape {
                reason: "batch dimension must be positive".into(),
            });
        }
        let expected = batch * h * w;
        if data.len() != expected {
            return Err(FloodError::InvalidShape {
                reason: format!(
                    "data length {} does not match shape {shape:?} (expected {expected})",
                    data.len()
                ),
            });
        }

        Ok(Self { data, batch, h, w })
    }

    pub fn batch(&self) -> usize {
        self.batch
    }

    pub fn h(&self) -> usize {
        self.h
    }

    pub fn w(&self) -> usize {
        self.w
    }

    /// Values of one batch element, row-major `[H, W]`.
    pub fn element(&self, b: usize) -> &[f32] {
        let n = self.h * self.w;
        &self.data[b * n..(b + 1) * n]
    }
}
