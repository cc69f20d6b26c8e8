use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::{can_cast_types, cast};
use arrow::datatypes::{DataType, Float64Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{LaunchDataset, LaunchRecord, MetadataValue, REQUIRED_COLUMNS};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why the launch table could not be loaded. Always fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed Parquet file: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("malformed Arrow batch: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("column '{column}' has unsupported type {data_type}")]
    UnsupportedColumnType {
        column: &'static str,
        data_type: DataType,
    },
    #[error("row {row}: missing value in column '{column}'")]
    MissingValue { row: usize, column: &'static str },
    #[error("row {row}: invalid value '{value}' in column '{column}'")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },
    #[error("dataset contains no launches")]
    EmptyDataset,
}

impl LoadError {
    pub(crate) fn invalid(row: usize, column: &'static str, value: &MetadataValue) -> Self {
        LoadError::InvalidValue {
            row,
            column,
            value: value.to_string(),
        }
    }
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row; `Launch Site`, `Payload Mass (kg)`, `class`,
///   `Booster Version Category` plus any descriptive columns
/// * `.json`    – `[{ "Launch Site": "...", "class": 1, ... }, ...]`
/// * `.parquet` – flat scalar columns with the same names
pub fn load_file(path: &Path) -> Result<LaunchDataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(LoadError::UnsupportedFormat(other.to_string())),
    }?;

    log::info!(
        "Loaded {} launches from {} ({} sites, payload {}..={} kg)",
        dataset.len(),
        path.display(),
        dataset.sites().len(),
        dataset.payload_bounds().min,
        dataset.payload_bounds().max,
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one launch per row. Columns
/// with an empty header (a Pandas index written by `to_csv`) are skipped.
fn load_csv(path: &Path) -> Result<LaunchDataset, LoadError> {
    let mut reader = csv::Reader::from_reader(open(path)?);
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(LoadError::MissingColumn(required));
        }
    }

    let descriptive: Vec<String> = headers
        .iter()
        .filter(|h| !h.is_empty() && !REQUIRED_COLUMNS.contains(&h.as_str()))
        .cloned()
        .collect();

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result?;

        let cells: BTreeMap<String, MetadataValue> = headers
            .iter()
            .zip(record.iter())
            .filter(|(name, _)| !name.is_empty())
            .map(|(name, value)| (name.clone(), MetadataValue::guess(value)))
            .collect();

        records.push(LaunchRecord::from_row(row_no, cells)?);
    }

    LaunchDataset::with_columns(records, descriptive)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "Payload Mass (kg)": 525.0,
///     "class": 0,
///     "Booster Version Category": "v1.0"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<LaunchDataset, LoadError> {
    let rows: Vec<BTreeMap<String, MetadataValue>> =
        serde_json::from_reader(std::io::BufReader::new(open(path)?))?;

    let records = rows
        .into_iter()
        .enumerate()
        .map(|(i, cells)| LaunchRecord::from_row(i, cells))
        .collect::<Result<Vec<_>, _>>()?;

    LaunchDataset::from_records(records)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one launch per row.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`). Pandas index columns
/// (`__index_level_0__`) are ignored. Categorical (dictionary), view and
/// narrow numeric columns are cast to the scalar types read by
/// [`extract_cell`].
fn load_parquet(path: &Path) -> Result<LaunchDataset, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;

    let schema = builder.schema().clone();
    for required in REQUIRED_COLUMNS {
        let field = match schema.field_with_name(required) {
            Ok(field) => field,
            Err(_) => return Err(LoadError::MissingColumn(required)),
        };
        if cell_type(field.data_type()).is_none() {
            return Err(LoadError::UnsupportedColumnType {
                column: required,
                data_type: field.data_type().clone(),
            });
        }
    }

    // (batch index, name, type cells are read as)
    let mut columns: Vec<(usize, String, DataType)> = Vec::new();
    for (i, field) in schema.fields().iter().enumerate() {
        if field.name().starts_with("__index_level") {
            continue;
        }
        match cell_type(field.data_type()) {
            Some(target) => columns.push((i, field.name().clone(), target)),
            None => log::warn!(
                "Skipping column '{}' of unsupported type {}",
                field.name(),
                field.data_type()
            ),
        }
    }

    let reader = builder.build()?;
    let mut records = Vec::new();
    let mut row_no = 0;

    for batch in reader {
        let batch = batch?;
        let arrays = columns
            .iter()
            .map(|(idx, _, target)| {
                let col = batch.column(*idx);
                if col.data_type() == target {
                    Ok(col.clone())
                } else {
                    cast(col, target)
                }
            })
            .collect::<Result<Vec<ArrayRef>, _>>()?;

        for row in 0..batch.num_rows() {
            let cells = columns
                .iter()
                .zip(&arrays)
                .map(|((_, name, _), col)| (name.clone(), extract_cell(col, row)))
                .collect();
            records.push(LaunchRecord::from_row(row_no, cells)?);
            row_no += 1;
        }
    }

    let descriptive = columns
        .into_iter()
        .map(|(_, name, _)| name)
        .filter(|name| !REQUIRED_COLUMNS.contains(&name.as_str()))
        .collect();
    LaunchDataset::with_columns(records, descriptive)
}

/// The scalar type a column's cells are read as, or `None` if the column
/// cannot be turned into scalars.
fn cell_type(data_type: &DataType) -> Option<DataType> {
    let value_type = match data_type {
        DataType::Dictionary(_, value) => value.as_ref(),
        other => other,
    };
    let target = match value_type {
        DataType::Boolean => DataType::Boolean,
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64 => DataType::Int64,
        DataType::Float16 | DataType::Float32 | DataType::Float64 => DataType::Float64,
        // Strings, dates, timestamps and decimals are read as text.
        _ => DataType::Utf8,
    };
    can_cast_types(data_type, &target).then_some(target)
}

/// Extract a single cell from a column already cast by [`cell_type`].
fn extract_cell(col: &ArrayRef, row: usize) -> MetadataValue {
    if col.is_null(row) {
        return MetadataValue::Null;
    }
    let extracted = match col.data_type() {
        DataType::Utf8 => col
            .as_string_opt::<i32>()
            .map(|s| MetadataValue::String(s.value(row).to_string())),
        DataType::Int64 => col
            .as_primitive_opt::<Int64Type>()
            .map(|a| MetadataValue::Integer(a.value(row))),
        DataType::Float64 => col
            .as_primitive_opt::<Float64Type>()
            .map(|a| MetadataValue::Float(a.value(row))),
        DataType::Boolean => col
            .as_boolean_opt()
            .map(|a| MetadataValue::Bool(a.value(row))),
        _ => None,
    };
    extracted.unwrap_or(MetadataValue::Null)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{DictionaryArray, Float64Array, Int64Array, StringArray, UInt8Array};
    use arrow::datatypes::{Field, Int32Type, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;

    const HEADER: &str =
        ",Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category";

    fn write_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn write_parquet(batch: &RecordBatch) -> tempfile::NamedTempFile {
        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer =
            ArrowWriter::try_new(file.as_file().try_clone().unwrap(), batch.schema(), None)
                .unwrap();
        writer.write(batch).unwrap();
        writer.close().unwrap();
        file
    }

    #[test]
    fn loads_csv_with_index_column() {
        let file = write_file(
            ".csv",
            &format!(
                "{HEADER}\n\
                 0,1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0\n\
                 1,2,CCAFS LC-40,0,525.0,F9 v1.0  B0005,v1.0\n\
                 2,3,VAFB SLC-4E,1,9600.0,F9 FT B1029.1,FT\n"
            ),
        );

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.sites(), ["CCAFS LC-40", "VAFB SLC-4E"]);
        assert_eq!(ds.metadata_columns(), ["Flight Number", "Booster Version"]);
        assert_eq!(ds.payload_bounds().max, 9600.0);

        let last = &ds.records()[2];
        assert!(last.success);
        assert_eq!(last.booster_category, "FT");
        assert_eq!(
            last.metadata.get("Booster Version"),
            Some(&MetadataValue::String("F9 FT B1029.1".into()))
        );
        assert!(!last.metadata.contains_key(""));
    }

    #[test]
    fn csv_missing_required_column_fails() {
        let file = write_file(".csv", "Launch Site,class,Payload Mass (kg)\nKSC LC-39A,1,2500\n");
        assert!(matches!(
            load_file(file.path()),
            Err(LoadError::MissingColumn("Booster Version Category"))
        ));
    }

    #[test]
    fn csv_bad_class_value_fails() {
        let file = write_file(
            ".csv",
            &format!("{HEADER}\n0,1,KSC LC-39A,maybe,2500,F9 FT,FT\n"),
        );
        match load_file(file.path()) {
            Err(LoadError::InvalidValue { row, column, .. }) => {
                assert_eq!(row, 0);
                assert_eq!(column, "class");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn csv_non_numeric_payload_fails() {
        let file = write_file(
            ".csv",
            &format!("{HEADER}\n0,1,KSC LC-39A,1,heavy,F9 FT,FT\n"),
        );
        assert!(matches!(
            load_file(file.path()),
            Err(LoadError::InvalidValue { column: "Payload Mass (kg)", .. })
        ));
    }

    #[test]
    fn header_only_csv_is_empty_dataset() {
        let file = write_file(".csv", &format!("{HEADER}\n"));
        assert!(matches!(load_file(file.path()), Err(LoadError::EmptyDataset)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("nope.csv"));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let file = write_file(".xlsx", "");
        assert!(matches!(
            load_file(file.path()),
            Err(LoadError::UnsupportedFormat(ext)) if ext == "xlsx"
        ));
    }

    #[test]
    fn loads_json_records() {
        let file = write_file(
            ".json",
            r#"[
                {"Launch Site": "KSC LC-39A", "class": 1, "Payload Mass (kg)": 2490.0,
                 "Booster Version Category": "FT", "Flight Number": 30},
                {"Launch Site": "CCAFS SLC-40", "class": false, "Payload Mass (kg)": 3600,
                 "Booster Version Category": "B4"}
            ]"#,
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert!(ds.records()[0].success);
        assert!(!ds.records()[1].success);
        assert_eq!(ds.payload_bounds().min, 2490.0);
        assert_eq!(ds.metadata_columns(), ["Flight Number"]);
    }

    #[test]
    fn json_list_column_is_kept_as_text() {
        let file = write_file(
            ".json",
            r#"[
                {"Launch Site": "CCAFS LC-40", "class": 1, "Payload Mass (kg)": 4700.0,
                 "Booster Version Category": "FT", "Customers": ["NASA", "SES"]}
            ]"#,
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(
            ds.records()[0].metadata.get("Customers"),
            Some(&MetadataValue::String(r#"["NASA","SES"]"#.into()))
        );
    }

    #[test]
    fn json_list_in_required_column_fails() {
        let file = write_file(
            ".json",
            r#"[{"Launch Site": "CCAFS LC-40", "class": [1], "Payload Mass (kg)": 4700.0,
                 "Booster Version Category": "FT"}]"#,
        );
        assert!(matches!(
            load_file(file.path()),
            Err(LoadError::InvalidValue { row: 0, column: "class", .. })
        ));
    }

    #[test]
    fn json_object_root_is_rejected() {
        let file = write_file(".json", r#"{"Launch Site": "KSC LC-39A"}"#);
        assert!(matches!(load_file(file.path()), Err(LoadError::Json(_))));
    }

    #[test]
    fn loads_parquet_columns() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("Launch Site", DataType::Utf8, false),
            Field::new("class", DataType::Int64, false),
            Field::new("Payload Mass (kg)", DataType::Float64, false),
            Field::new("Booster Version Category", DataType::Utf8, false),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(vec!["VAFB SLC-4E", "KSC LC-39A"])),
                Arc::new(Int64Array::from(vec![0, 1])),
                Arc::new(Float64Array::from(vec![500.0, 5300.0])),
                Arc::new(StringArray::from(vec!["v1.1", "FT"])),
            ],
        )
        .unwrap();

        let file = write_parquet(&batch);
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.sites(), ["VAFB SLC-4E", "KSC LC-39A"]);
        assert!(ds.records()[1].success);
        assert_eq!(ds.payload_bounds().max, 5300.0);
    }

    #[test]
    fn parquet_categorical_and_narrow_columns_are_decoded() {
        let dict = DataType::Dictionary(Box::new(DataType::Int32), Box::new(DataType::Utf8));
        let schema = Arc::new(Schema::new(vec![
            Field::new("Launch Site", dict.clone(), false),
            Field::new("class", DataType::UInt8, false),
            Field::new("Payload Mass (kg)", DataType::Float64, false),
            Field::new("Booster Version Category", dict, false),
        ]));
        let sites: DictionaryArray<Int32Type> =
            vec!["VAFB SLC-4E", "KSC LC-39A", "VAFB SLC-4E"].into_iter().collect();
        let boosters: DictionaryArray<Int32Type> = vec!["v1.1", "FT", "FT"].into_iter().collect();
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(sites),
                Arc::new(UInt8Array::from(vec![0, 1, 1])),
                Arc::new(Float64Array::from(vec![500.0, 5300.0, 9600.0])),
                Arc::new(boosters),
            ],
        )
        .unwrap();

        let file = write_parquet(&batch);
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.sites(), ["VAFB SLC-4E", "KSC LC-39A"]);
        assert_eq!(ds.records()[1].booster_category, "FT");
        assert_eq!(
            ds.records().iter().map(|r| r.success).collect::<Vec<_>>(),
            [false, true, true]
        );
        assert_eq!(ds.booster_categories().len(), 2);
    }

    #[test]
    fn parquet_missing_required_column_fails() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("Launch Site", DataType::Utf8, false),
            Field::new("class", DataType::Int64, false),
            Field::new("Payload Mass (kg)", DataType::Float64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(vec!["KSC LC-39A"])),
                Arc::new(Int64Array::from(vec![1])),
                Arc::new(Float64Array::from(vec![2500.0])),
            ],
        )
        .unwrap();

        let file = write_parquet(&batch);
        assert!(matches!(
            load_file(file.path()),
            Err(LoadError::MissingColumn("Booster Version Category"))
        ));
    }

    #[test]
    fn cell_types_for_arrow_columns() {
        let dict = DataType::Dictionary(Box::new(DataType::Int16), Box::new(DataType::Utf8));
        assert_eq!(cell_type(&dict), Some(DataType::Utf8));
        assert_eq!(cell_type(&DataType::Utf8View), Some(DataType::Utf8));
        assert_eq!(cell_type(&DataType::Int8), Some(DataType::Int64));
        assert_eq!(cell_type(&DataType::UInt16), Some(DataType::Int64));
        assert_eq!(cell_type(&DataType::Float32), Some(DataType::Float64));
        assert_eq!(cell_type(&DataType::Boolean), Some(DataType::Boolean));
    }
}
