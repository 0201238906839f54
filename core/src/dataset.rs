use crate::error::LoadError;
use crate::model::{CanteenLocation, Dataset, Point, StallRecord};
use serde::Deserialize;
use unicode_normalization::UnicodeNormalization;
use walkdir::WalkDir;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// One row of the stall table as stored on disk.
#[derive(Debug, Deserialize)]
struct InputRow {
    #[serde(rename = "Canteen", alias = "canteen")]
    canteen: String,
    #[serde(rename = "Stall", alias = "stall")]
    stall: String,
    #[serde(rename = "Keywords", alias = "keywords")]
    keywords: String,
    #[serde(rename = "Price", alias = "price")]
    price: f64,
    /// `"x,y"` on the reference map.
    #[serde(rename = "Location", alias = "location", default)]
    location: Option<String>,
}

/// Load a dataset from a `.json` file (array or single row), a `.jsonl`
/// file, or a directory containing such files.
pub fn load_dataset(path: &Path) -> Result<Dataset, LoadError> {
    let mut files: Vec<PathBuf> = Vec::new();
    if path.is_dir() {
        for entry in WalkDir::new(path).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() {
                if let Some(ext) = p.extension().and_then(|s| s.to_str()) {
                    if matches!(ext, "json" | "jsonl") {
                        files.push(p.to_path_buf());
                    }
                }
            }
        }
    } else if path.is_file() {
        files.push(path.to_path_buf());
    }
    if files.is_empty() {
        return Err(LoadError::NoDataset(path.to_path_buf()));
    }

    let mut rows: Vec<InputRow> = Vec::new();
    for file in &files {
        if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            read_jsonl(file, &mut rows)?;
        } else {
            read_json(file, &mut rows)?;
        }
    }

    let dataset = assemble(rows)?;
    tracing::info!(
        files = files.len(),
        stalls = dataset.stalls().len(),
        canteens = dataset.canteen_count(),
        "dataset loaded"
    );
    Ok(dataset)
}

/// Parse rows from an in-memory JSONL string.
pub fn parse_jsonl(text: &str) -> Result<Dataset, LoadError> {
    let mut rows = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let row: InputRow = serde_json::from_str(line).map_err(|source| LoadError::Json { path: PathBuf::from("<memory>"), source })?;
        rows.push(row);
    }
    assemble(rows)
}

fn read_jsonl(file: &Path, rows: &mut Vec<InputRow>) -> Result<(), LoadError> {
    let f = File::open(file).map_err(|source| io_error(file, source))?;
    let reader = BufReader::new(f);
    for line in reader.lines() {
        let line = line.map_err(|source| io_error(file, source))?;
        if line.trim().is_empty() {
            continue;
        }
        let row: InputRow = serde_json::from_str(&line).map_err(|source| json_error(file, source))?;
        rows.push(row);
    }
    Ok(())
}

fn read_json(file: &Path, rows: &mut Vec<InputRow>) -> Result<(), LoadError> {
    let f = File::open(file).map_err(|source| io_error(file, source))?;
    let reader = BufReader::new(f);
    let json: serde_json::Value = serde_json::from_reader(reader).map_err(|source| json_error(file, source))?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                rows.push(serde_json::from_value(v).map_err(|source| json_error(file, source))?);
            }
        }
        serde_json::Value::Object(_) => {
            rows.push(serde_json::from_value(json).map_err(|source| json_error(file, source))?);
        }
        _ => tracing::warn!(file = %file.display(), "ignoring JSON that is neither an array nor an object"),
    }
    Ok(())
}

fn assemble(rows: Vec<InputRow>) -> Result<Dataset, LoadError> {
    let mut stalls = Vec::with_capacity(rows.len());
    let mut locations = Vec::new();
    for row in rows {
        let canteen = clean(&row.canteen);
        if let Some(raw) = row.location.as_deref() {
            let raw = clean(raw);
            if !raw.is_empty() {
                let point = Point::parse_pair(&raw).ok_or_else(|| LoadError::InvalidLocation {
                    canteen: canteen.clone(),
                    value: raw.clone(),
                })?;
                locations.push(CanteenLocation { canteen: canteen.clone(), point });
            }
        }
        stalls.push(StallRecord {
            canteen,
            stall: clean(&row.stall),
            keywords: clean(&row.keywords),
            price: row.price,
        });
    }
    Dataset::new(stalls, locations)
}

fn clean(text: &str) -> String {
    text.nfkc().collect::<String>().trim().to_string()
}

fn io_error(path: &Path, source: std::io::Error) -> LoadError {
    LoadError::Io { path: path.to_path_buf(), source }
}

fn json_error(path: &Path, source: serde_json::Error) -> LoadError {
    LoadError::Json { path: path.to_path_buf(), source }
}
