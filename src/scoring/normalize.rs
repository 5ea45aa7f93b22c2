use crate::scoring::errors::ScoreError;

/// Logistic squash onto `[0, 100]`: `100 / (1 + exp(-k * (x - midpoint)))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sigmoid {
    pub steepness: f64,
    pub midpoint: f64,
}

impl Default for Sigmoid {
    fn default() -> Self {
        Self {
            steepness: 0.1,
            midpoint: 50.0,
        }
    }
}

impl Sigmoid {
    pub fn new(steepness: f64, midpoint: f64) -> Self {
        Self {
            steepness,
            midpoint,
        }
    }

    pub fn apply(&self, raw: f64) -> Result<f64, ScoreError> {
        if !raw.is_finite() {
            return Err(ScoreError::NonFinite {
                stage: "normalize",
                value: raw,
            });
        }

        let squashed = 100.0 / (1.0 + (-self.steepness * (raw - self.midpoint)).exp());
        if squashed.is_nan() {
            return Err(ScoreError::NonFinite {
                stage: "normalize",
                value: squashed,
            });
        }
        Ok(squashed.clamp(0.0, 100.0))
    }
}
