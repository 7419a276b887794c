//! Tabular patient data and its validation
//!
//! A [`Dataset`] is a set of named columns. It can be assembled from typed
//! [`PatientRecord`]s or from loosely typed JSON-like [`Row`]s, in which case
//! each column's kind is inferred from its cells.
//!
//! The engine never works on a [`Dataset`] directly. It first validates it
//! into a [`Cohort`], a borrowed read-only view guaranteeing that
//!
//! - every row carries a `Diagnosis` of either `Benign` or `Malignant`,
//! - both diagnosis groups are non-empty,
//! - every numeric feature column exists, has one cell per row, and holds
//!   only finite values or missing cells.
//!
//! Missing feature values are allowed; each computation drops them for the
//! features it consumes.
//!
//! # Examples
//!
//! ```
//! use oncostat_analysis::dataset::{Cohort, Dataset, Diagnosis, Feature, PatientRecord};
//!
//! let records = vec![
//!     PatientRecord {
//!         patient_id: "P0001".into(),
//!         tumor_size: 9.5,
//!         smoothness: 0.11,
//!         compactness: 0.07,
//!         patient_age: 48.0,
//!         diagnosis: Diagnosis::Benign,
//!     },
//!     PatientRecord {
//!         patient_id: "P0002".into(),
//!         tumor_size: 16.2,
//!         smoothness: 0.08,
//!         compactness: 0.13,
//!         patient_age: 63.0,
//!         diagnosis: Diagnosis::Malignant,
//!     },
//! ];
//!
//! let dataset = Dataset::from_records(&records);
//! let cohort = Cohort::new(&dataset).unwrap();
//! assert_eq!(cohort.len(), 2);
//! assert_eq!(cohort.group_values(Feature::TumorSize, Diagnosis::Malignant), vec![16.2]);
//! ```

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// Name of the identifier column. Carried through but never analyzed.
pub const PATIENT_ID_COLUMN: &str = "Patient_ID";

/// Name of the label column.
pub const DIAGNOSIS_COLUMN: &str = "Diagnosis";

/// Numeric features analyzed by the engine, in declaration order.
///
/// The derived ordering follows the declaration order, so maps keyed by
/// `Feature` iterate as `Tumor_Size`, `Smoothness`, `Compactness`, `Patient_Age`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    derive_more::Display,
    Serialize,
    Deserialize,
)]
pub enum Feature {
    #[display("Tumor_Size")]
    #[serde(rename = "Tumor_Size")]
    TumorSize,
    #[display("Smoothness")]
    Smoothness,
    #[display("Compactness")]
    Compactness,
    #[display("Patient_Age")]
    #[serde(rename = "Patient_Age")]
    PatientAge,
}

impl Feature {
    pub const COUNT: usize = 4;

    pub const ALL: [Self; Self::COUNT] = [
        Self::TumorSize,
        Self::Smoothness,
        Self::Compactness,
        Self::PatientAge,
    ];

    /// Column name of the feature in a dataset.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TumorSize => "Tumor_Size",
            Self::Smoothness => "Smoothness",
            Self::Compactness => "Compactness",
            Self::PatientAge => "Patient_Age",
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Diagnostic label of a patient.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    derive_more::Display,
    Serialize,
    Deserialize,
)]
pub enum Diagnosis {
    Benign,
    Malignant,
}

impl Diagnosis {
    pub const ALL: [Self; 2] = [Self::Benign, Self::Malignant];

    /// Parses a label by exact, case-sensitive match.
    ///
    /// ```
    /// # use oncostat_analysis::dataset::Diagnosis;
    /// assert_eq!(Diagnosis::from_label("Malignant"), Some(Diagnosis::Malignant));
    /// assert_eq!(Diagnosis::from_label("malignant"), None);
    /// ```
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Benign" => Some(Self::Benign),
            "Malignant" => Some(Self::Malignant),
            _ => None,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Benign => "Benign",
            Self::Malignant => "Malignant",
        }
    }
}

/// A typed patient row, as produced by the synthetic generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    #[serde(rename = "Patient_ID")]
    pub patient_id: String,
    #[serde(rename = "Tumor_Size")]
    pub tumor_size: f64,
    #[serde(rename = "Smoothness")]
    pub smoothness: f64,
    #[serde(rename = "Compactness")]
    pub compactness: f64,
    #[serde(rename = "Patient_Age")]
    pub patient_age: f64,
    #[serde(rename = "Diagnosis")]
    pub diagnosis: Diagnosis,
}

impl PatientRecord {
    #[must_use]
    pub fn feature(&self, feature: Feature) -> f64 {
        match feature {
            Feature::TumorSize => self.tumor_size,
            Feature::Smoothness => self.smoothness,
            Feature::Compactness => self.compactness,
            Feature::PatientAge => self.patient_age,
        }
    }
}

/// A single loosely typed cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Null,
}

/// A loosely typed row keyed by column name. Absent keys are missing cells.
pub type Row = BTreeMap<String, Cell>;

/// Kind of a column, used in schema errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ColumnKind {
    #[display("numeric")]
    Numeric,
    #[display("categorical")]
    Categorical,
    #[display("mixed")]
    Mixed,
}

/// A column of cells, `None` marking a missing value.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Numeric(Vec<Option<f64>>),
    Categorical(Vec<Option<String>>),
    /// Cells of both kinds. Never acceptable where a typed column is required.
    Mixed(Vec<Cell>),
}

impl Column {
    /// Infers the narrowest column kind able to hold `cells`.
    ///
    /// A column without any non-null cell is numeric.
    #[must_use]
    pub fn infer(cells: Vec<Cell>) -> Self {
        let has_number = cells.iter().any(|c| matches!(c, Cell::Number(_)));
        let has_text = cells.iter().any(|c| matches!(c, Cell::Text(_)));
        match (has_number, has_text) {
            (true, true) => Self::Mixed(cells),
            (false, true) => Self::Categorical(
                cells
                    .into_iter()
                    .map(|cell| match cell {
                        Cell::Text(text) => Some(text),
                        _ => None,
                    })
                    .collect(),
            ),
            _ => Self::Numeric(
                cells
                    .into_iter()
                    .map(|cell| match cell {
                        Cell::Number(value) => Some(value),
                        _ => None,
                    })
                    .collect(),
            ),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ColumnKind {
        match self {
            Self::Numeric(_) => ColumnKind::Numeric,
            Self::Categorical(_) => ColumnKind::Categorical,
            Self::Mixed(_) => ColumnKind::Mixed,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Numeric(cells) => cells.len(),
            Self::Categorical(cells) => cells.len(),
            Self::Mixed(cells) => cells.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_all_missing(&self) -> bool {
        match self {
            Self::Numeric(cells) => cells.iter().all(Option::is_none),
            Self::Categorical(cells) => cells.iter().all(Option::is_none),
            Self::Mixed(cells) => cells.iter().all(|c| *c == Cell::Null),
        }
    }
}

/// An in-memory table of named columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: BTreeMap<String, Column>,
}

impl Dataset {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a dataset from typed records.
    #[must_use]
    pub fn from_records(records: &[PatientRecord]) -> Self {
        let mut dataset = Self::new();
        dataset.insert_column(
            PATIENT_ID_COLUMN,
            Column::Categorical(records.iter().map(|r| Some(r.patient_id.clone())).collect()),
        );
        for feature in Feature::ALL {
            dataset.insert_column(
                feature.name(),
                Column::Numeric(records.iter().map(|r| Some(r.feature(feature))).collect()),
            );
        }
        dataset.insert_column(
            DIAGNOSIS_COLUMN,
            Column::Categorical(
                records
                    .iter()
                    .map(|r| Some(r.diagnosis.label().to_owned()))
                    .collect(),
            ),
        );
        dataset
    }

    /// Builds a dataset from loosely typed rows, inferring each column's kind.
    ///
    /// The column set is the union of all row keys.
    #[must_use]
    pub fn from_rows(rows: &[Row]) -> Self {
        let names = rows
            .iter()
            .flat_map(BTreeMap::keys)
            .collect::<BTreeSet<_>>();
        let columns = names
            .into_iter()
            .map(|name| {
                let cells = rows
                    .iter()
                    .map(|row| row.get(name).cloned().unwrap_or(Cell::Null))
                    .collect();
                (name.clone(), Column::infer(cells))
            })
            .collect();
        Self { columns }
    }

    /// Adds or replaces a column.
    pub fn insert_column(&mut self, name: impl Into<String>, column: Column) {
        self.columns.insert(name.into(), column);
    }

    #[must_use]
    pub fn with_column(mut self, name: impl Into<String>, column: Column) -> Self {
        self.insert_column(name, column);
        self
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.columns.iter().map(|(name, column)| (name.as_str(), column))
    }

    /// Number of rows, taken from the longest column.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.columns.values().map(Column::len).max().unwrap_or(0)
    }
}

/// A validated, read-only view of a [`Dataset`].
#[derive(Debug, Clone)]
pub struct Cohort<'a> {
    diagnoses: Vec<Diagnosis>,
    features: [&'a [Option<f64>]; Feature::COUNT],
}

impl<'a> Cohort<'a> {
    /// Validates `dataset` against the schema the engine relies on.
    pub fn new(dataset: &'a Dataset) -> Result<Self, SchemaError> {
        let diagnoses = validate_diagnoses(dataset)?;

        let mut features: [&[Option<f64>]; Feature::COUNT] = [&[]; Feature::COUNT];
        for feature in Feature::ALL {
            features[feature.index()] = validate_feature(dataset, feature, diagnoses.len())?;
        }

        for diagnosis in Diagnosis::ALL {
            if !diagnoses.contains(&diagnosis) {
                return Err(SchemaError::EmptyGroup { diagnosis });
            }
        }

        Ok(Self {
            diagnoses,
            features,
        })
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.diagnoses.len()
    }

    /// Always `false`: both diagnosis groups are non-empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diagnoses.is_empty()
    }

    #[must_use]
    pub fn diagnoses(&self) -> &[Diagnosis] {
        &self.diagnoses
    }

    #[must_use]
    pub fn group_size(&self, diagnosis: Diagnosis) -> usize {
        self.diagnoses.iter().filter(|&&d| d == diagnosis).count()
    }

    /// Raw cells of a feature column, one per row.
    #[must_use]
    pub fn column(&self, feature: Feature) -> &'a [Option<f64>] {
        self.features[feature.index()]
    }

    /// Non-missing values of a feature across all rows.
    #[must_use]
    pub fn values(&self, feature: Feature) -> Vec<f64> {
        self.column(feature).iter().flatten().copied().collect()
    }

    /// Non-missing values of a feature within one diagnosis group.
    #[must_use]
    pub fn group_values(&self, feature: Feature, diagnosis: Diagnosis) -> Vec<f64> {
        self.column(feature)
            .iter()
            .zip(&self.diagnoses)
            .filter(|&(_, &d)| d == diagnosis)
            .filter_map(|(value, _)| *value)
            .collect()
    }

    /// Values of two features over the rows where both are present.
    #[must_use]
    pub fn paired_values(&self, x: Feature, y: Feature) -> (Vec<f64>, Vec<f64>) {
        self.column(x)
            .iter()
            .zip(self.column(y))
            .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
            .unzip()
    }
}

fn validate_diagnoses(dataset: &Dataset) -> Result<Vec<Diagnosis>, SchemaError> {
    let column = dataset
        .column(DIAGNOSIS_COLUMN)
        .ok_or_else(|| SchemaError::MissingColumn {
            column: DIAGNOSIS_COLUMN.to_owned(),
        })?;
    let labels = match column {
        Column::Categorical(labels) => labels,
        // An inferred column without any label is numeric; report the labels
        // as missing rather than the column as mistyped.
        column if !column.is_empty() && column.is_all_missing() => {
            return Err(SchemaError::MissingLabel { row: 0 });
        }
        column => {
            return Err(SchemaError::WrongColumnType {
                column: DIAGNOSIS_COLUMN.to_owned(),
                expected: ColumnKind::Categorical,
                found: column.kind(),
            });
        }
    };

    labels
        .iter()
        .enumerate()
        .map(|(row, label)| {
            let label = label.as_deref().ok_or(SchemaError::MissingLabel { row })?;
            Diagnosis::from_label(label).ok_or_else(|| SchemaError::UnknownLabel {
                row,
                label: label.to_owned(),
            })
        })
        .collect()
}

fn validate_feature(
    dataset: &Dataset,
    feature: Feature,
    num_rows: usize,
) -> Result<&[Option<f64>], SchemaError> {
    let name = feature.name();
    let column = dataset
        .column(name)
        .ok_or_else(|| SchemaError::MissingColumn {
            column: name.to_owned(),
        })?;
    let Column::Numeric(values) = column else {
        return Err(SchemaError::WrongColumnType {
            column: name.to_owned(),
            expected: ColumnKind::Numeric,
            found: column.kind(),
        });
    };
    if values.len() != num_rows {
        return Err(SchemaError::RaggedColumn {
            column: name.to_owned(),
            expected: num_rows,
            actual: values.len(),
        });
    }
    if let Some(row) = values
        .iter()
        .position(|value| value.is_some_and(|v| !v.is_finite()))
    {
        return Err(SchemaError::NonFiniteValue {
            column: name.to_owned(),
            row,
        });
    }
    Ok(values)
}
