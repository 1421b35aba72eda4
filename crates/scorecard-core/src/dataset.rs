//! Read-only datasets loaded once at startup
//!
//! Two CSV inputs feed the dashboard: the list of selectable client
//! identifiers and a sample of historical rows carrying a binary `TARGET`
//! outcome. Both are loaded before the server starts and shared read-only.

use crate::config::DataConfig;
use crate::{Error, Result};
use indexmap::IndexMap;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Ordered list of selectable client identifiers, duplicates preserved
#[derive(Debug, Clone, Default)]
pub struct ClientIdentifierList {
    ids: Vec<String>,
    index: HashSet<String>,
}

impl ClientIdentifierList {
    /// Build a list from identifiers already in memory
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: Vec<String> = ids.into_iter().map(Into::into).collect();
        let index = ids.iter().cloned().collect();
        Self { ids, index }
    }

    /// Load identifiers from `column` of the CSV at `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or lacks the column.
    pub fn from_path(path: &Path, column: &str) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, column, &path.display().to_string())
    }

    /// Load identifiers from `column` of CSV data
    ///
    /// # Errors
    ///
    /// Returns an error if the data is not valid CSV or lacks the column.
    pub fn from_reader<R: Read>(reader: R, column: &str, source_name: &str) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let position = csv_reader
            .headers()?
            .iter()
            .position(|header| header == column)
            .ok_or_else(|| Error::dataset(source_name, format!("missing column {column}")))?;

        let mut ids = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            match record.get(position) {
                Some(id) if !id.is_empty() => ids.push(id.to_string()),
                _ => debug!(line = ?record.position().map(csv::Position::line), "Skipping empty identifier"),
            }
        }

        info!(source = source_name, count = ids.len(), "Loaded client identifiers");
        Ok(Self::new(ids))
    }

    /// Whether `id` is selectable
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains(id)
    }

    /// Identifiers in file order
    pub fn as_slice(&self) -> &[String] {
        &self.ids
    }

    /// Iterate identifiers in file order
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.ids.iter().map(String::as_str)
    }

    /// Number of identifiers, duplicates included
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Historical rows with a binary outcome, one numeric column per variable
#[derive(Debug, Clone, Default)]
pub struct ReferenceDataset {
    target: Vec<u8>,
    columns: IndexMap<String, Vec<Option<f64>>>,
}

impl ReferenceDataset {
    /// Load the dataset from the CSV at `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, lacks the target column,
    /// or holds a target value other than 0 or 1.
    pub fn from_path(path: &Path, target_column: &str) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, target_column, &path.display().to_string())
    }

    /// Load the dataset from CSV data
    ///
    /// Empty cells are missing values. Columns holding any cell that is not a
    /// number or a boolean are not analyzable and are left out with a warning.
    /// Rows without an outcome are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if the data is not valid CSV, lacks the target column,
    /// or holds a target value other than 0 or 1.
    pub fn from_reader<R: Read>(reader: R, target_column: &str, source_name: &str) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let target_position = headers
            .iter()
            .position(|header| header == target_column)
            .ok_or_else(|| {
                Error::dataset(source_name, format!("missing target column {target_column}"))
            })?;

        let mut target = Vec::new();
        let mut raw: Vec<Option<Vec<Option<f64>>>> = headers.iter().map(|_| Some(Vec::new())).collect();

        for (row, record) in csv_reader.records().enumerate() {
            let record = record?;
            let outcome = record.get(target_position).and_then(parse_cell);
            target.push(match outcome {
                Some(Some(value)) if value == 0.0 => 0,
                Some(Some(value)) if value == 1.0 => 1,
                Some(None) => {
                    warn!(
                        source = source_name,
                        row = row + 1,
                        "Row has no {target_column} value and is skipped"
                    );
                    continue;
                }
                _ => {
                    return Err(Error::dataset(
                        source_name,
                        format!("row {}: {target_column} must be 0 or 1", row + 1),
                    ));
                }
            });

            for (position, cell) in record.iter().enumerate() {
                if position == target_position {
                    continue;
                }
                let Some(Some(values)) = raw.get_mut(position) else {
                    continue;
                };
                match parse_cell(cell) {
                    Some(value) => values.push(value),
                    None => {
                        warn!(
                            source = source_name,
                            column = headers.get(position).unwrap_or_default(),
                            row = row + 1,
                            "Column holds a non-numeric value and is not analyzable"
                        );
                        raw[position] = None;
                    }
                }
            }
        }

        let columns: IndexMap<String, Vec<Option<f64>>> = headers
            .iter()
            .zip(raw)
            .enumerate()
            .filter(|(position, _)| *position != target_position)
            .filter_map(|(_, (name, values))| values.map(|values| (name.to_string(), values)))
            .collect();

        info!(
            source = source_name,
            rows = target.len(),
            variables = columns.len(),
            "Loaded reference dataset"
        );
        Ok(Self { target, columns })
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.target.len()
    }

    /// Whether the dataset has no rows
    pub fn is_empty(&self) -> bool {
        self.target.is_empty()
    }

    /// Whether `variable` is an analyzable column
    pub fn has_variable(&self, variable: &str) -> bool {
        self.columns.contains_key(variable)
    }

    /// Distinct non-missing values of `variable`, ascending
    pub fn distinct_values(&self, variable: &str) -> Option<Vec<f64>> {
        let values = self.columns.get(variable)?;
        let mut distinct: Vec<f64> = values.iter().flatten().copied().collect();
        distinct.sort_by(f64::total_cmp);
        distinct.dedup();
        Some(distinct)
    }

    /// Mean outcome per distinct non-missing value of `variable`, ascending by value
    pub fn target_mean_by_value(&self, variable: &str) -> Option<Vec<(f64, f64)>> {
        let values = self.columns.get(variable)?;
        let mut groups: Vec<(f64, u64, u64)> = Vec::new();
        for (value, outcome) in values.iter().zip(&self.target) {
            let Some(value) = value else { continue };
            match groups.iter_mut().find(|(group, _, _)| group.total_cmp(value).is_eq()) {
                Some((_, positives, count)) => {
                    *positives += u64::from(*outcome);
                    *count += 1;
                }
                None => groups.push((*value, u64::from(*outcome), 1)),
            }
        }
        groups.sort_by(|a, b| a.0.total_cmp(&b.0));
        Some(
            groups
                .into_iter()
                .map(|(value, positives, count)| (value, positives as f64 / count as f64))
                .collect(),
        )
    }

    /// Non-missing values of `variable` on rows whose outcome equals `outcome`
    pub fn values_for_outcome(&self, variable: &str, outcome: u8) -> Option<Vec<f64>> {
        let values = self.columns.get(variable)?;
        Some(
            values
                .iter()
                .zip(&self.target)
                .filter(|(_, target)| **target == outcome)
                .filter_map(|(value, _)| *value)
                .collect(),
        )
    }
}

/// Parse one cell: `None` when unparseable, `Some(None)` when missing
fn parse_cell(cell: &str) -> Option<Option<f64>> {
    if cell.is_empty() || cell.eq_ignore_ascii_case("nan") || cell.eq_ignore_ascii_case("na") {
        return Some(None);
    }
    if cell.eq_ignore_ascii_case("true") {
        return Some(Some(1.0));
    }
    if cell.eq_ignore_ascii_case("false") {
        return Some(Some(0.0));
    }
    cell.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        // -0.0 and 0.0 are one category
        .map(|value| Some(if value == 0.0 { 0.0 } else { value }))
}

/// Both startup datasets
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    /// Selectable client identifiers
    pub identifiers: ClientIdentifierList,
    /// Historical rows for reference distributions
    pub reference: ReferenceDataset,
}

impl Datasets {
    /// Load both datasets from the configured paths
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be loaded.
    pub fn load(config: &DataConfig) -> Result<Self> {
        let identifiers =
            ClientIdentifierList::from_path(&config.identifiers_path, &config.identifier_column)?;
        let reference = ReferenceDataset::from_path(&config.reference_path, &config.target_column)?;
        Ok(Self {
            identifiers,
            reference,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const REFERENCE: &str = "\
TARGET,CODE_GENDER,EXT_SOURCE_3,NAME,FLAG_OWN_CAR
0,0,0.5,alice,True
1,1,0.1,bob,False
0,1,,carol,true
1,1,0.2,dave,
0,0,0.7,erin,false
";

    fn reference() -> ReferenceDataset {
        ReferenceDataset::from_reader(REFERENCE.as_bytes(), "TARGET", "test").unwrap()
    }

    #[test]
    fn test_identifiers_keep_order_and_duplicates() {
        let data = "SK_ID_CURR,OTHER\n100002,a\n100003,b\n100002,c\n";
        let ids = ClientIdentifierList::from_reader(data.as_bytes(), "SK_ID_CURR", "test").unwrap();

        assert_eq!(ids.as_slice(), ["100002", "100003", "100002"]);
        assert_eq!(ids.len(), 3);
        assert!(ids.contains("100003"));
        assert!(!ids.contains("999999"));
    }

    #[test]
    fn test_identifiers_missing_column() {
        let data = "ID\n1\n";
        let err = ClientIdentifierList::from_reader(data.as_bytes(), "SK_ID_CURR", "ids.csv")
            .unwrap_err();

        assert_eq!(err.to_string(), "Dataset error in ids.csv: missing column SK_ID_CURR");
    }

    #[test]
    fn test_reference_skips_non_numeric_columns() {
        let dataset = reference();

        assert_eq!(dataset.len(), 5);
        assert!(dataset.has_variable("CODE_GENDER"));
        assert!(dataset.has_variable("EXT_SOURCE_3"));
        assert!(dataset.has_variable("FLAG_OWN_CAR"));
        assert!(!dataset.has_variable("NAME"));
        assert!(!dataset.has_variable("TARGET"));
    }

    #[test]
    fn test_distinct_values_ignore_missing() {
        let dataset = reference();

        assert_eq!(dataset.distinct_values("CODE_GENDER"), Some(vec![0.0, 1.0]));
        assert_eq!(dataset.distinct_values("EXT_SOURCE_3"), Some(vec![0.1, 0.2, 0.5, 0.7]));
        assert_eq!(dataset.distinct_values("FLAG_OWN_CAR"), Some(vec![0.0, 1.0]));
        assert_eq!(dataset.distinct_values("UNKNOWN"), None);
    }

    #[test]
    fn test_target_mean_by_value() {
        let dataset = reference();

        let means = dataset.target_mean_by_value("CODE_GENDER").unwrap();
        assert_eq!(means.len(), 2);
        assert_eq!(means[0], (0.0, 0.0));
        assert!((means[1].1 - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_values_for_outcome() {
        let dataset = reference();

        assert_eq!(dataset.values_for_outcome("EXT_SOURCE_3", 0), Some(vec![0.5, 0.7]));
        assert_eq!(dataset.values_for_outcome("EXT_SOURCE_3", 1), Some(vec![0.1, 0.2]));
    }

    #[test]
    fn test_reference_rejects_non_binary_target() {
        let data = "TARGET,X\n0,1\n2,3\n";
        let err = ReferenceDataset::from_reader(data.as_bytes(), "TARGET", "train.csv").unwrap_err();

        assert!(err.to_string().contains("row 2"));
    }

    #[test]
    fn test_reference_skips_rows_without_target() {
        let data = "TARGET,X\n0,1\n,2\n1,3\nNA,4\n";
        let dataset = ReferenceDataset::from_reader(data.as_bytes(), "TARGET", "train.csv").unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.distinct_values("X"), Some(vec![1.0, 3.0]));
        assert_eq!(dataset.values_for_outcome("X", 1), Some(vec![3.0]));
    }

    #[test]
    fn test_negative_zero_is_the_same_category_as_zero() {
        let data = "TARGET,X\n1,-0.0\n0,0\n0,1\n";
        let dataset = ReferenceDataset::from_reader(data.as_bytes(), "TARGET", "train.csv").unwrap();

        let distinct = dataset.distinct_values("X").unwrap();
        let means = dataset.target_mean_by_value("X").unwrap();

        assert_eq!(distinct.len(), 2);
        assert_eq!(means.len(), distinct.len());
        assert!(means[0].0.is_sign_positive());
        assert_eq!(means[0].1, 0.5);
        assert_eq!(means[1], (1.0, 0.0));
    }

    #[test]
    fn test_reference_missing_target_column() {
        let data = "X,Y\n0,1\n";
        let err = ReferenceDataset::from_reader(data.as_bytes(), "TARGET", "train.csv").unwrap_err();

        assert!(matches!(err, Error::Dataset { .. }));
    }

    #[test]
    fn test_datasets_load_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let ids_path = dir.path().join("test_data.csv");
        let reference_path = dir.path().join("train_sample.csv");
        std::fs::File::create(&ids_path)
            .unwrap()
            .write_all(b"SK_ID_CURR\n100002\n100003\n")
            .unwrap();
        std::fs::File::create(&reference_path)
            .unwrap()
            .write_all(REFERENCE.as_bytes())
            .unwrap();

        let config = DataConfig {
            identifiers_path: ids_path,
            identifier_column: "SK_ID_CURR".to_string(),
            reference_path,
            target_column: "TARGET".to_string(),
        };
        let datasets = Datasets::load(&config).unwrap();

        assert_eq!(datasets.identifiers.len(), 2);
        assert_eq!(datasets.reference.len(), 5);
    }

    #[test]
    fn test_datasets_load_missing_file() {
        let config = DataConfig {
            identifiers_path: "/nonexistent/ids.csv".into(),
            ..DataConfig::default()
        };

        assert!(matches!(Datasets::load(&config), Err(Error::Io(_))));
    }
}
