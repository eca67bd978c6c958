//! # Blended Predictor
//! Two independently trained regressors over the same 33-field schema,
//! combined with a fixed weighted average and clamped to a percentage.
//!
//! Built once at startup, read-only afterwards; each `predict` call is an
//! independent stateless pass, so the service is shared behind `Arc` with
//! no locking.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::PredictorConfig;
use crate::error::{InferenceError, StartupError};
use crate::features::{build_record, PredictorInput};
use crate::model::{GradientBoosting, Regressor};

/// Fixed ensemble weights. The blend is part of the contract, not tunable
/// configuration.
pub const WEIGHT_A: f64 = 0.6;
pub const WEIGHT_B: f64 = 0.4;

/// A score guaranteed to lie in [0, 100]. Displays with two decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Percentage(f64);

impl Percentage {
    /// Clamp an unbounded blend into percentage range.
    pub fn clamped(raw: f64) -> Self {
        Percentage(raw.clamp(0.0, 100.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Weighted blend of the two raw model outputs, clamped to [0, 100].
/// Pure; exposed separately so it can be tested without artifacts.
pub fn blend(a: f64, b: f64) -> Percentage {
    Percentage::clamped(WEIGHT_A * a + WEIGHT_B * b)
}

pub struct BlendedPredictor {
    model_a: Box<dyn Regressor>,
    model_b: Box<dyn Regressor>,
}

impl fmt::Debug for BlendedPredictor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlendedPredictor")
            .field("model_a", &self.model_a.name())
            .field("model_b", &self.model_b.name())
            .finish()
    }
}

impl BlendedPredictor {
    /// Load both artifacts from the configured paths. Either failure is
    /// fatal for startup; the error names the offending path.
    pub fn load(config: &PredictorConfig) -> Result<Arc<Self>, StartupError> {
        let model_a = GradientBoosting::load(&config.models.model_a)?;
        let model_b = GradientBoosting::load(&config.models.model_b)?;
        info!(
            model_a = model_a.name(),
            model_b = model_b.name(),
            "blended predictor ready"
        );
        Ok(Arc::new(Self::new(Box::new(model_a), Box::new(model_b))))
    }

    /// Assemble from any two regressors. Used by `load` and by tests that
    /// substitute stub models.
    pub fn new(model_a: Box<dyn Regressor>, model_b: Box<dyn Regressor>) -> Self {
        Self { model_a, model_b }
    }

    /// One full pass: merge inputs over the default table, run both models,
    /// blend. Both predictions must succeed; a failed model call fails the
    /// request with no partial blend and no retry.
    pub fn predict(&self, input: &PredictorInput) -> Result<Percentage, InferenceError> {
        let record = build_record(input);
        let a = self.model_a.predict(&record)?;
        let b = self.model_b.predict(&record)?;
        let score = blend(a, b);
        debug!(
            model_a = self.model_a.name(),
            raw_a = a,
            model_b = self.model_b.name(),
            raw_b = b,
            score = score.value(),
            "prediction"
        );
        Ok(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureRecord;

    /// Stub regressor returning a fixed raw value.
    struct Fixed(f64);

    impl Regressor for Fixed {
        fn predict(&self, _record: &FeatureRecord) -> Result<f64, InferenceError> {
            Ok(self.0)
        }
        fn name(&self) -> &str {
            "fixed"
        }
    }

    /// Stub regressor that always errors.
    struct Failing;

    impl Regressor for Failing {
        fn predict(&self, _record: &FeatureRecord) -> Result<f64, InferenceError> {
            Err(InferenceError::NonFinite {
                model: "failing".into(),
            })
        }
        fn name(&self) -> &str {
            "failing"
        }
    }

    fn service(a: f64, b: f64) -> BlendedPredictor {
        BlendedPredictor::new(Box::new(Fixed(a)), Box::new(Fixed(b)))
    }

    #[test]
    fn blend_is_sixty_forty() {
        // 0.6*70 + 0.4*50 = 62.00
        let p = service(70.0, 50.0)
            .predict(&PredictorInput::default())
            .unwrap();
        assert_eq!(p.value(), 62.0);
        assert_eq!(p.to_string(), "62.00");
    }

    #[test]
    fn blend_clamps_at_one_hundred() {
        let p = service(200.0, 200.0)
            .predict(&PredictorInput::default())
            .unwrap();
        assert_eq!(p.to_string(), "100.00");
    }

    #[test]
    fn blend_clamps_at_zero() {
        let p = service(-50.0, -50.0)
            .predict(&PredictorInput::default())
            .unwrap();
        assert_eq!(p.to_string(), "0.00");
    }

    #[test]
    fn in_range_blend_is_untouched() {
        assert_eq!(blend(50.0, 50.0).value(), 50.0);
        assert_eq!(blend(0.0, 0.0).value(), 0.0);
        assert_eq!(blend(100.0, 100.0).value(), 100.0);
    }

    #[test]
    fn first_model_failure_fails_the_request() {
        let svc = BlendedPredictor::new(Box::new(Failing), Box::new(Fixed(50.0)));
        assert!(svc.predict(&PredictorInput::default()).is_err());
    }

    #[test]
    fn second_model_failure_is_not_blended_partially() {
        let svc = BlendedPredictor::new(Box::new(Fixed(50.0)), Box::new(Failing));
        let err = svc.predict(&PredictorInput::default()).unwrap_err();
        assert_eq!(
            err,
            InferenceError::NonFinite {
                model: "failing".into()
            }
        );
    }

    #[test]
    fn prediction_is_deterministic_across_calls() {
        let svc = service(64.25, 31.5);
        let input = PredictorInput::default();
        let first = svc.predict(&input).unwrap();
        for _ in 0..5 {
            assert_eq!(svc.predict(&input).unwrap(), first);
        }
    }
}
