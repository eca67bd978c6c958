// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod blend;
pub mod config;
pub mod error;
pub mod features;
pub mod model;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, AppState};
pub use crate::blend::{blend, BlendedPredictor, Percentage};
pub use crate::config::PredictorConfig;
pub use crate::error::{InferenceError, StartupError};
pub use crate::features::{build_record, BranchCode, FeatureRecord, PredictorInput};
pub use crate::model::{GradientBoosting, Regressor};
