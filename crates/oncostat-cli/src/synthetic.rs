//! Synthetic tumor diagnosis cohorts
//!
//! Each patient is first assigned a diagnosis, then every feature is drawn
//! from a normal distribution that depends on the diagnosis:
//!
//! | Feature     | Benign          | Malignant      | Range        | Decimals |
//! |-------------|-----------------|----------------|--------------|----------|
//! | Tumor_Size  | N(10, 3)        | N(15, 4)       | [2, 30]      | 2        |
//! | Smoothness  | N(0.10, 0.015)  | N(0.08, 0.02)  | [0.02, 0.20] | 4        |
//! | Compactness | N(0.08, 0.02)   | N(0.12, 0.03)  | [0.01, 0.30] | 4        |
//! | Patient_Age | N(52, 15)       | N(58, 12)      | [18, 90]     | 0        |

use anyhow::Context;
use oncostat_analysis::dataset::{Diagnosis, Feature, PatientRecord};
use rand::{
    Rng,
    distr::{Bernoulli, Distribution},
};
use rand_distr::Normal;

pub const DEFAULT_MALIGNANT_FRACTION: f64 = 0.3;

/// Sampling parameters of one feature.
#[derive(Debug, Clone, Copy)]
struct FeatureModel {
    feature: Feature,
    benign: (f64, f64),
    malignant: (f64, f64),
    range: (f64, f64),
    decimals: i32,
}

const FEATURE_MODELS: [FeatureModel; Feature::COUNT] = [
    FeatureModel {
        feature: Feature::TumorSize,
        benign: (10.0, 3.0),
        malignant: (15.0, 4.0),
        range: (2.0, 30.0),
        decimals: 2,
    },
    FeatureModel {
        feature: Feature::Smoothness,
        benign: (0.10, 0.015),
        malignant: (0.08, 0.02),
        range: (0.02, 0.20),
        decimals: 4,
    },
    FeatureModel {
        feature: Feature::Compactness,
        benign: (0.08, 0.02),
        malignant: (0.12, 0.03),
        range: (0.01, 0.30),
        decimals: 4,
    },
    FeatureModel {
        feature: Feature::PatientAge,
        benign: (52.0, 15.0),
        malignant: (58.0, 12.0),
        range: (18.0, 90.0),
        decimals: 0,
    },
];

#[derive(Debug, Clone)]
struct FeatureSampler {
    benign: Normal<f64>,
    malignant: Normal<f64>,
    range: (f64, f64),
    scale: f64,
}

impl FeatureSampler {
    fn new(model: &FeatureModel) -> anyhow::Result<Self> {
        let normal = |(mean, std_dev): (f64, f64)| {
            Normal::new(mean, std_dev).with_context(|| {
                format!(
                    "Invalid normal distribution N({mean}, {std_dev}) for {}",
                    model.feature
                )
            })
        };
        Ok(Self {
            benign: normal(model.benign)?,
            malignant: normal(model.malignant)?,
            range: model.range,
            scale: 10_f64.powi(model.decimals),
        })
    }

    fn sample<R>(&self, rng: &mut R, diagnosis: Diagnosis) -> f64
    where
        R: Rng + ?Sized,
    {
        let dist = match diagnosis {
            Diagnosis::Benign => &self.benign,
            Diagnosis::Malignant => &self.malignant,
        };
        let (min, max) = self.range;
        let value = dist.sample(rng).clamp(min, max);
        (value * self.scale).round() / self.scale
    }
}

/// Generator of synthetic patient records.
#[derive(Debug, Clone)]
pub struct CohortGenerator {
    malignant: Bernoulli,
    samplers: [FeatureSampler; Feature::COUNT],
}

impl CohortGenerator {
    pub fn new(malignant_fraction: f64) -> anyhow::Result<Self> {
        let malignant = Bernoulli::new(malignant_fraction).with_context(|| {
            format!("Malignant fraction must be within [0, 1], got {malignant_fraction}")
        })?;
        let [size, smoothness, compactness, age] = FEATURE_MODELS;
        Ok(Self {
            malignant,
            samplers: [
                FeatureSampler::new(&size)?,
                FeatureSampler::new(&smoothness)?,
                FeatureSampler::new(&compactness)?,
                FeatureSampler::new(&age)?,
            ],
        })
    }

    /// Draws one patient. `index` is zero-based; ids start at `P0001`.
    pub fn record<R>(&self, rng: &mut R, index: usize) -> PatientRecord
    where
        R: Rng + ?Sized,
    {
        let diagnosis = if self.malignant.sample(rng) {
            Diagnosis::Malignant
        } else {
            Diagnosis::Benign
        };
        let [tumor_size, smoothness, compactness, patient_age] =
            self.samplers.each_ref().map(|s| s.sample(rng, diagnosis));
        PatientRecord {
            patient_id: format!("P{:04}", index + 1),
            tumor_size,
            smoothness,
            compactness,
            patient_age,
            diagnosis,
        }
    }

    pub fn generate<R>(&self, rng: &mut R, count: usize) -> Vec<PatientRecord>
    where
        R: Rng + ?Sized,
    {
        (0..count).map(|index| self.record(rng, index)).collect()
    }
}
