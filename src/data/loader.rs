use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, Float32Array, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::model::Dataset;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an x/y dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json`    – `{ "x": [...], "y": [...] }`
/// * `.csv`     – header row with `x` and `y` columns, one point per row
/// * `.parquet` – numeric `x` and `y` columns
///
/// Either the whole file loads or an error is returned; there is no
/// partial result.
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "json" => load_json(path),
        "csv" => load_csv(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    Ok(dataset.with_source(path))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema:
///
/// ```json
/// { "x": [0.0, 1.0, 2.0], "y": [1.0, 2.9, 9.2] }
/// ```
///
/// Keys other than `x` and `y` are ignored.
#[derive(Debug, Deserialize)]
struct JsonSeries {
    x: Vec<f64>,
    y: Vec<f64>,
}

fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let series: JsonSeries = serde_json::from_str(&text).context("parsing JSON")?;
    Dataset::new(series.x, series.y)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// One CSV row.  Other columns are ignored.
#[derive(Debug, Deserialize)]
struct CsvPoint {
    x: f64,
    y: f64,
}

fn load_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?;
    for required in ["x", "y"] {
        if !headers.iter().any(|h| h == required) {
            bail!("CSV missing '{required}' column");
        }
    }

    let mut x = Vec::new();
    let mut y = Vec::new();
    for (row_no, result) in reader.deserialize::<CsvPoint>().enumerate() {
        let point = result.with_context(|| format!("CSV row {row_no}"))?;
        x.push(point.x);
        y.push(point.y);
    }

    Dataset::new(x, y)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with numeric `x` and `y` columns.
///
/// Rows from every record batch are concatenated in file order.  Works with
/// files written by both **Pandas** (`df.to_parquet()`) and **Polars**
/// (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut x = Vec::new();
    let mut y = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let x_idx = schema
            .index_of("x")
            .map_err(|_| anyhow::anyhow!("Parquet file missing 'x' column"))?;
        let y_idx = schema
            .index_of("y")
            .map_err(|_| anyhow::anyhow!("Parquet file missing 'y' column"))?;

        x.extend(numeric_column(batch.column(x_idx)).context("reading 'x'")?);
        y.extend(numeric_column(batch.column(y_idx)).context("reading 'y'")?);
    }

    Dataset::new(x, y)
}

/// Extract a numeric Arrow column as `f64`s.
fn numeric_column(col: &ArrayRef) -> Result<Vec<f64>> {
    if col.null_count() > 0 {
        bail!("column contains {} null value(s)", col.null_count());
    }

    let values = match col.data_type() {
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .context("expected Float64Array")?
            .values()
            .to_vec(),
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .context("expected Float32Array")?
            .values()
            .iter()
            .map(|&v| v as f64)
            .collect(),
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .context("expected Int64Array")?
            .values()
            .iter()
            .map(|&v| v as f64)
            .collect(),
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .context("expected Int32Array")?
            .values()
            .iter()
            .map(|&v| v as f64)
            .collect(),
        other => bail!("Expected a numeric column, got {other:?}"),
    };
    Ok(values)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::array::StringArray;
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use tempdir::TempDir;

    use super::*;

    fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_json_object() {
        let dir = TempDir::new("loader").unwrap();
        let path = write(&dir, "points.json", r#"{"x": [0, 1, 2.5], "y": [1.0, -2, 3], "unit": "mm"}"#);

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.x(), &[0.0, 1.0, 2.5]);
        assert_eq!(ds.y(), &[1.0, -2.0, 3.0]);
        assert_eq!(ds.source(), Some(path.as_path()));
    }

    #[test]
    fn json_extension_is_case_insensitive() {
        let dir = TempDir::new("loader").unwrap();
        let path = write(&dir, "POINTS.JSON", r#"{"x": [1], "y": [2]}"#);
        assert_eq!(load_file(&path).unwrap().len(), 1);
    }

    #[test]
    fn json_with_mismatched_lengths_is_rejected() {
        let dir = TempDir::new("loader").unwrap();
        let path = write(&dir, "bad.json", r#"{"x": [0, 1, 2], "y": [0, 1]}"#);

        let err = load_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("x has 3 values but y has 2"));
    }

    #[test]
    fn json_missing_key_is_rejected() {
        let dir = TempDir::new("loader").unwrap();
        let path = write(&dir, "bad.json", r#"{"x": [0, 1]}"#);

        let err = load_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("missing field `y`"));
    }

    #[test]
    fn json_non_numeric_value_is_rejected() {
        let dir = TempDir::new("loader").unwrap();
        let path = write(&dir, "bad.json", r#"{"x": [0, "one"], "y": [0, 1]}"#);
        assert!(load_file(&path).is_err());
    }

    #[test]
    fn json_top_level_array_is_rejected() {
        let dir = TempDir::new("loader").unwrap();
        let path = write(&dir, "bad.json", r#"[{"x": [0], "y": [0]}]"#);
        assert!(load_file(&path).is_err());
    }

    #[test]
    fn empty_series_load() {
        let dir = TempDir::new("loader").unwrap();
        let path = write(&dir, "empty.json", r#"{"x": [], "y": []}"#);
        assert!(load_file(&path).unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = TempDir::new("loader").unwrap();
        let err = load_file(&dir.path().join("nope.json")).unwrap_err();
        assert!(format!("{err:#}").contains("reading JSON file"));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let dir = TempDir::new("loader").unwrap();
        let path = write(&dir, "points.txt", "0 1");
        let err = load_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Unsupported file extension: .txt"));
    }

    #[test]
    fn loads_csv_rows() {
        let dir = TempDir::new("loader").unwrap();
        let path = write(&dir, "points.csv", "label,x,y\na,0,1\nb,1,3\nc,2,7\n");

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.x(), &[0.0, 1.0, 2.0]);
        assert_eq!(ds.y(), &[1.0, 3.0, 7.0]);
    }

    #[test]
    fn csv_missing_column_is_rejected() {
        let dir = TempDir::new("loader").unwrap();
        let path = write(&dir, "points.csv", "x,z\n0,1\n");
        let err = load_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("CSV missing 'y' column"));
    }

    #[test]
    fn csv_non_numeric_cell_is_rejected() {
        let dir = TempDir::new("loader").unwrap();
        let path = write(&dir, "points.csv", "x,y\n0,1\n1,oops\n");
        let err = load_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("CSV row 1"));
    }

    #[test]
    fn loads_parquet_columns() {
        let dir = TempDir::new("loader").unwrap();
        let path = dir.path().join("points.parquet");

        let schema = Arc::new(Schema::new(vec![
            Field::new("x", DataType::Int64, false),
            Field::new("y", DataType::Float64, false),
            Field::new("label", DataType::Utf8, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int64Array::from(vec![0, 1, 2])),
                Arc::new(Float64Array::from(vec![0.5, 1.5, 4.5])),
                Arc::new(StringArray::from(vec!["a", "b", "c"])),
            ],
        )
        .unwrap();
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.x(), &[0.0, 1.0, 2.0]);
        assert_eq!(ds.y(), &[0.5, 1.5, 4.5]);
    }

    #[test]
    fn parquet_string_column_is_rejected() {
        let dir = TempDir::new("loader").unwrap();
        let path = dir.path().join("points.parquet");

        let schema = Arc::new(Schema::new(vec![
            Field::new("x", DataType::Utf8, false),
            Field::new("y", DataType::Float64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["a"])),
                Arc::new(Float64Array::from(vec![0.5])),
            ],
        )
        .unwrap();
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let err = load_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Expected a numeric column"));
    }
}
