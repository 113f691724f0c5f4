/// Tunable parameters for the flood pipeline.
#[derive(Clone, Debug)]
pub struct Params {
    /// Seed predicate threshold: cells with `value <= threshold` are seeds.
    /// The default of 0.0 treats the non-positive side of a signed input
    /// field as the seed set.
    pub threshold: f32,
    /// Append cleanup passes at steps 2 and 1 after the halving schedule.
    /// Jump flooding is approximate; the extra passes repair most of the
    /// rare mis-resolved cells near ownership boundaries at the cost of two
    /// more rounds. They do not make multi-seed results exact.
    pub refine: bool,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            refine: true,
        }
    }
}
