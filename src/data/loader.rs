use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::SchemaError;
use super::columns;
use super::model::{LaunchDataset, LaunchRecord, Outcome};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the launch table's column names
/// * `.json`    – `[{ "Launch Site": "...", "Payload Mass (kg)": 0.0, ... }, ...]`
/// * `.parquet` – one column per field, string or numeric types
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening CSV {}", path.display()))?;
            read_csv(file)
        }
        "json" => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading JSON {}", path.display()))?;
            parse_json(&text)
        }
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading launch records from {}", path.display()))?;

    log::info!(
        "Loaded {} launches from {} sites (payload {}..={} kg)",
        dataset.len(),
        dataset.sites().len(),
        dataset.min_payload(),
        dataset.max_payload()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Row schema shared by the CSV and JSON loaders
// ---------------------------------------------------------------------------

/// One row as it appears on disk. Extra columns are ignored.
#[derive(Debug, Deserialize)]
struct RawLaunchRow {
    #[serde(rename = "Flight Number")]
    flight_number: Option<u32>,
    #[serde(rename = "Launch Site")]
    site: Option<String>,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass: Option<f64>,
    #[serde(rename = "class")]
    class: Option<f64>,
    #[serde(rename = "Booster Version")]
    booster_version: Option<String>,
}

impl RawLaunchRow {
    fn into_record(self, row: usize) -> Result<LaunchRecord, SchemaError> {
        build_record(
            row,
            self.flight_number,
            self.site,
            self.payload_mass,
            self.class,
            self.booster_version,
        )
    }
}

/// Validate one row's cells and assemble a [`LaunchRecord`].
fn build_record(
    row: usize,
    flight_number: Option<u32>,
    site: Option<String>,
    payload_mass: Option<f64>,
    class: Option<f64>,
    booster_version: Option<String>,
) -> Result<LaunchRecord, SchemaError> {
    let site = non_empty(site, row, columns::LAUNCH_SITE)?;
    let booster_version = non_empty(booster_version, row, columns::BOOSTER_VERSION)?;

    let payload_mass = payload_mass.ok_or(SchemaError::EmptyField {
        row,
        column: columns::PAYLOAD_MASS,
    })?;
    if !payload_mass.is_finite() || payload_mass < 0.0 {
        return Err(SchemaError::InvalidPayload {
            row,
            value: payload_mass.to_string(),
        });
    }

    let class = class.ok_or(SchemaError::EmptyField {
        row,
        column: columns::CLASS,
    })?;
    let outcome = Outcome::from_class(class).ok_or(SchemaError::InvalidOutcome {
        row,
        value: class.to_string(),
    })?;

    Ok(LaunchRecord {
        flight_number,
        site,
        payload_mass,
        outcome,
        booster_version,
    })
}

fn non_empty(value: Option<String>, row: usize, column: &'static str) -> Result<String, SchemaError> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        _ => Err(SchemaError::EmptyField { row, column }),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Parse CSV launch records from any reader. The header row must name at
/// least the site, payload, class and booster columns.
pub fn read_csv<R: Read>(input: R) -> Result<LaunchDataset> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader.headers().context("reading CSV headers")?.clone();
    for required in [
        columns::LAUNCH_SITE,
        columns::PAYLOAD_MASS,
        columns::CLASS,
        columns::BOOSTER_VERSION,
    ] {
        if !headers.iter().any(|h| h == required) {
            return Err(SchemaError::MissingColumn(required).into());
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<RawLaunchRow>().enumerate() {
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(raw.into_record(row_no)?);
    }

    Ok(LaunchDataset::from_records(records)?)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
pub fn parse_json(text: &str) -> Result<LaunchDataset> {
    let rows: Vec<RawLaunchRow> =
        serde_json::from_str(text).context("Expected a top-level JSON array of launch objects")?;

    let records = rows
        .into_iter()
        .enumerate()
        .map(|(i, raw)| raw.into_record(i))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(LaunchDataset::from_records(records)?)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file whose columns carry the launch table's names.
///
/// String columns may be `Utf8` or `LargeUtf8`; numeric columns may be any
/// of `Int32`, `Int64`, `Float32`, `Float64`, which covers files written by
/// both Pandas and Polars.
fn load_parquet(path: &Path) -> Result<LaunchDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let required = |name: &'static str| {
            schema
                .index_of(name)
                .map(|i| batch.column(i).clone())
                .map_err(|_| SchemaError::MissingColumn(name))
        };
        let site_col = required(columns::LAUNCH_SITE)?;
        let payload_col = required(columns::PAYLOAD_MASS)?;
        let class_col = required(columns::CLASS)?;
        let booster_col = required(columns::BOOSTER_VERSION)?;
        let flight_col = schema
            .index_of(columns::FLIGHT_NUMBER)
            .ok()
            .map(|i| batch.column(i).clone());

        for row in 0..batch.num_rows() {
            let row_no = records.len();
            let flight_number = match &flight_col {
                Some(col) => numeric_at(col, row)
                    .with_context(|| format!("Row {row_no}: '{}'", columns::FLIGHT_NUMBER))?
                    .map(|v| flight_number(v, row_no))
                    .transpose()?,
                None => None,
            };
            let record = build_record(
                row_no,
                flight_number,
                string_at(&site_col, row)
                    .with_context(|| format!("Row {row_no}: '{}'", columns::LAUNCH_SITE))?,
                numeric_at(&payload_col, row)
                    .with_context(|| format!("Row {row_no}: '{}'", columns::PAYLOAD_MASS))?,
                numeric_at(&class_col, row)
                    .with_context(|| format!("Row {row_no}: '{}'", columns::CLASS))?,
                string_at(&booster_col, row)
                    .with_context(|| format!("Row {row_no}: '{}'", columns::BOOSTER_VERSION))?,
            )?;
            records.push(record);
        }
    }

    Ok(LaunchDataset::from_records(records)?)
}

// -- Parquet / Arrow helpers --

/// Numeric flight numbers must be whole and fit in `u32`, as on the CSV path.
fn flight_number(value: f64, row: usize) -> Result<u32, SchemaError> {
    if value.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&value) {
        Ok(value as u32)
    } else {
        Err(SchemaError::InvalidFlightNumber {
            row,
            value: value.to_string(),
        })
    }
}

/// Read a string cell; `None` for nulls.
fn string_at(col: &Arc<dyn Array>, row: usize) -> Result<Option<String>> {
    if col.is_null(row) {
        return Ok(None);
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(Some(arr.value(row).to_string()))
        }
        DataType::LargeUtf8 => Ok(Some(col.as_string::<i64>().value(row).to_string())),
        other => bail!("Expected a string column, got {other:?}"),
    }
}

/// Read a numeric cell as `f64`; `None` for nulls.
fn numeric_at(col: &Arc<dyn Array>, row: usize) -> Result<Option<f64>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map(|a| a.value(row) as f64),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map(|a| a.value(row) as f64),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map(|a| a.value(row) as f64),
        DataType::Float64 => any.downcast_ref::<Float64Array>().map(|a| a.value(row)),
        other => bail!("Expected a numeric column, got {other:?}"),
    };
    value.map(Some).context("column array does not match its data type")
}
