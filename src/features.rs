//! # Feature schema
//! The fixed 33-field input vector both regressors were trained on, the
//! branch encoding, and the merge of live inputs over the default table.
//!
//! The schema is the binding contract with the model artifacts: exact names
//! `F1..F33`, exact order, no field ever omitted.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Number of features both models consume.
pub const FEATURE_COUNT: usize = 33;

/// Canonical feature names, in training order.
pub static FEATURE_NAMES: Lazy<[String; FEATURE_COUNT]> = Lazy::new(|| {
    std::array::from_fn(|i| format!("F{}", i + 1))
});

/// Training-time default for every feature. Live inputs overwrite F1..F6;
/// the rest stay at these constants for every prediction.
const DEFAULT_VALUES: [f64; FEATURE_COUNT] = [
    20.0,  // F1  age
    170.0, // F2  height (cm)
    60.0,  // F3  weight (kg)
    2.0,   // F4  gym frequency per week (integral)
    0.0,   // F5  branch code (integral)
    5.0,   // F6  social vibe score
    0.0,   // F7
    0.0,   // F8
    0.0,   // F9
    0.0,   // F10
    5.0,   // F11
    5.0,   // F12
    0.0,   // F13
    5.0,   // F14
    5.0,   // F15
    5.0,   // F16
    5.0,   // F17
    5.0,   // F18
    5.0,   // F19
    5.0,   // F20
    5.0,   // F21
    5.0,   // F22
    5.0,   // F23
    5.0,   // F24
    5.0,   // F25
    500.0, // F26
    100.0, // F27
    3.0,   // F28
    5.0,   // F29
    5.0,   // F30
    5.0,   // F31
    5.0,   // F32
    5.0,   // F33
];

/// Academic branch, encoded 0–5 for the models. Closed set; serde accepts
/// only the six uppercase names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BranchCode {
    Biotech,
    Ce,
    Cse,
    Ece,
    It,
    Me,
}

impl BranchCode {
    /// Integer code the models were trained on.
    pub fn code(self) -> u8 {
        match self {
            BranchCode::Biotech => 0,
            BranchCode::Ce => 1,
            BranchCode::Cse => 2,
            BranchCode::Ece => 3,
            BranchCode::It => 4,
            BranchCode::Me => 5,
        }
    }

    pub const ALL: [BranchCode; 6] = [
        BranchCode::Biotech,
        BranchCode::Ce,
        BranchCode::Cse,
        BranchCode::Ece,
        BranchCode::It,
        BranchCode::Me,
    ];
}

impl Default for BranchCode {
    fn default() -> Self {
        BranchCode::Biotech
    }
}

/// Declared widget ranges, mirrored server-side by clamping.
pub mod ranges {
    pub const AGE: (f64, f64) = (16.0, 35.0);
    pub const HEIGHT: (f64, f64) = (140.0, 200.0);
    pub const WEIGHT: (f64, f64) = (40.0, 100.0);
    pub const GYM_FREQUENCY: (u8, u8) = (0, 7);
    pub const SOCIAL_SCORE: (f64, f64) = (0.0, 10.0);
}

/// The six live inputs plus the optional display name.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictorInput {
    #[serde(default)]
    pub name: Option<String>,
    pub age: f64,
    pub height: f64,
    pub weight: f64,
    pub gym_frequency: u8,
    pub branch: BranchCode,
    pub social_score: f64,
}

impl PredictorInput {
    /// Clamp every value into its declared widget range. The original UI
    /// made out-of-range entry structurally impossible; for a JSON body this
    /// clamp is the equivalent guarantee.
    pub fn clamped(mut self) -> Self {
        self.age = self.age.clamp(ranges::AGE.0, ranges::AGE.1);
        self.height = self.height.clamp(ranges::HEIGHT.0, ranges::HEIGHT.1);
        self.weight = self.weight.clamp(ranges::WEIGHT.0, ranges::WEIGHT.1);
        self.gym_frequency = self
            .gym_frequency
            .clamp(ranges::GYM_FREQUENCY.0, ranges::GYM_FREQUENCY.1);
        self.social_score = self
            .social_score
            .clamp(ranges::SOCIAL_SCORE.0, ranges::SOCIAL_SCORE.1);
        self
    }

    /// Name to display: trimmed input, or "You" when absent/blank.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref().map(str::trim) {
            Some(n) if !n.is_empty() => n,
            _ => "You",
        }
    }
}

impl Default for PredictorInput {
    /// The widget defaults shown before submission. Chosen to reproduce the
    /// training-time default record exactly.
    fn default() -> Self {
        Self {
            name: None,
            age: 20.0,
            height: 170.0,
            weight: 60.0,
            gym_frequency: 2,
            branch: BranchCode::Biotech,
            social_score: 5.0,
        }
    }
}

/// Ordered 33-field vector consumed by both regressors. Constructed fresh
/// per prediction, never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    values: [f64; FEATURE_COUNT],
}

static DEFAULT_RECORD: Lazy<FeatureRecord> = Lazy::new(|| FeatureRecord {
    values: DEFAULT_VALUES,
});

impl FeatureRecord {
    /// The all-defaults record (no user input applied).
    pub fn defaults() -> &'static FeatureRecord {
        &DEFAULT_RECORD
    }

    /// Value at a 0-based feature index. Index validity is checked when the
    /// artifact is loaded, so lookups during tree walks cannot miss.
    #[inline]
    pub fn value(&self, index: usize) -> f64 {
        self.values[index]
    }

    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.values
    }
}

/// Merge the six live inputs over the default table. Pure and total:
/// any clamped input yields a valid record.
pub fn build_record(input: &PredictorInput) -> FeatureRecord {
    let mut values = DEFAULT_VALUES;
    values[0] = input.age;
    values[1] = input.height;
    values[2] = input.weight;
    values[3] = f64::from(input.gym_frequency);
    values[4] = f64::from(input.branch.code());
    values[5] = input.social_score;
    FeatureRecord { values }
}
