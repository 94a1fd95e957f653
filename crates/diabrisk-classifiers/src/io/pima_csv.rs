//! Headerless Pima Indians Diabetes CSV reader.
//!
//! Each row holds the eight features in [`FEATURE_NAMES`] order followed by
//! the binary outcome. The source may be a local file or an http(s) URL.
use std::fmt;
use std::io::Read;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::data_handling::Dataset;
use crate::error::DataError;
use crate::math::{Array1, Array2};
use crate::schema::{FEATURE_NAMES, LABEL_COLUMN, N_FEATURES};

/// Public copy of the dataset used when no other source is configured.
pub const DEFAULT_DATA_URL: &str =
    "https://raw.githubusercontent.com/jbrownlee/Datasets/master/pima-indians-diabetes.data.csv";

/// Where the training CSV lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Url(String),
    Path(PathBuf),
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::Url(DEFAULT_DATA_URL.to_string())
    }
}

impl FromStr for DataSource {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("http://") || s.starts_with("https://") {
            Ok(DataSource::Url(s.to_string()))
        } else {
            Ok(DataSource::Path(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => write!(f, "{}", url),
            DataSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Load the dataset from a file or URL.
pub fn read_pima_csv(source: &DataSource) -> Result<Dataset, DataError> {
    match source {
        DataSource::Url(url) => {
            log::info!("Downloading dataset from {}", url);
            let response = reqwest::blocking::get(url)
                .and_then(|r| r.error_for_status())
                .map_err(|source| DataError::Fetch {
                    url: url.clone(),
                    source,
                })?;
            let body = response.bytes().map_err(|source| DataError::Fetch {
                url: url.clone(),
                source,
            })?;
            read_pima_from_reader(body.as_ref())
        }
        DataSource::Path(path) => {
            log::info!("Reading dataset from {}", path.display());
            let file = std::fs::File::open(path).map_err(csv::Error::from)?;
            read_pima_from_reader(file)
        }
    }
}

/// Parse headerless CSV rows into a [`Dataset`].
pub fn read_pima_from_reader<R: Read>(reader: R) -> Result<Dataset, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b',')
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut features = Vec::new();
    let mut labels = Vec::new();

    for (row_idx, result) in reader.records().enumerate() {
        let row = row_idx + 1;
        let record = result?;
        if record.len() != N_FEATURES + 1 {
            return Err(DataError::Width {
                row,
                expected: N_FEATURES + 1,
                found: record.len(),
            });
        }

        for (col, name) in FEATURE_NAMES.into_iter().enumerate() {
            let raw = &record[col];
            let value = raw.parse::<f32>().map_err(|_| DataError::Parse {
                row,
                column: name,
                value: raw.to_string(),
            })?;
            features.push(value);
        }

        let raw = &record[N_FEATURES];
        let label = raw
            .parse::<f32>()
            .ok()
            .filter(|v| v.fract() == 0.0)
            .map(|v| v as i32)
            .ok_or_else(|| DataError::Parse {
                row,
                column: LABEL_COLUMN,
                value: raw.to_string(),
            })?;
        if label != 0 && label != 1 {
            return Err(DataError::Label { row, value: label });
        }
        labels.push(label);
    }

    if labels.is_empty() {
        return Err(DataError::Empty);
    }

    let x = Array2::from_shape_vec((labels.len(), N_FEATURES), features)?;
    Dataset::new(x, Array1::from_vec(labels))
}
