//! Record extraction from scenario entity lists.
//!
//! Scenario files are decoded by an external parser; this module only sees
//! its output through [`EntitySource`]: a list of `{kind, x, y}` entities
//! per source file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::dataset::{Dataset, Record};
use crate::error::{HerdError, Result};
use crate::point::Point;

/// A placed unit or building as reported by the scenario parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub kind: String,
    pub x: f64,
    pub y: f64,
}

impl Entity {
    pub fn new(kind: impl Into<String>, x: impl Into<f64>, y: impl Into<f64>) -> Self {
        Self {
            kind: kind.into(),
            x: x.into(),
            y: y.into(),
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Provider of the entity list of one source file.
pub trait EntitySource {
    fn entities(&self, path: &Path) -> Result<Vec<Entity>>;
}

/// Reads entity lists exported as JSON, either `{"entities": [...]}` or a bare array.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEntitySource;

#[derive(Deserialize)]
#[serde(untagged)]
enum EntityFile {
    Wrapped { entities: Vec<Entity> },
    Bare(Vec<Entity>),
}

impl EntitySource for JsonEntitySource {
    fn entities(&self, path: &Path) -> Result<Vec<Entity>> {
        let text = fs::read_to_string(path).map_err(|e| HerdError::io(path, e))?;
        let file: EntityFile = serde_json::from_str(&text).map_err(|e| HerdError::json(path, e))?;
        Ok(match file {
            EntityFile::Wrapped { entities } | EntityFile::Bare(entities) => entities,
        })
    }
}

/// Record name for a source file: the file name up to its first `.`.
pub fn record_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match file_name.find('.') {
        Some(dot) => file_name[..dot].to_string(),
        None => file_name,
    }
}

/// Build one record from an entity list.
pub fn extract_record(name: &str, entities: &[Entity], config: &AnalysisConfig) -> Result<Record> {
    Record::validate_name(name)?;
    let references: Vec<&Entity> = entities
        .iter()
        .filter(|e| e.kind == config.reference_kind)
        .collect();
    let reference = match references.as_slice() {
        [] => {
            return Err(HerdError::MissingReference {
                record: name.to_string(),
            })
        }
        [only] => only.position(),
        [.., last] if config.allow_multiple_references => {
            log::warn!(
                "{name}: {} reference entities, keeping the last",
                references.len()
            );
            last.position()
        }
        many => {
            return Err(HerdError::MultipleReference {
                record: name.to_string(),
                count: many.len(),
            })
        }
    };
    let satellites = entities
        .iter()
        .filter(|e| config.is_satellite(&e.kind))
        .map(Entity::position)
        .collect();
    Ok(Record::new(name, reference, satellites))
}

/// Extract a single source file.
pub fn extract_file(
    path: &Path,
    source: &impl EntitySource,
    config: &AnalysisConfig,
) -> Result<Record> {
    let entities = source.entities(path)?;
    let record = extract_record(&record_name(path), &entities, config)?;
    log::debug!(
        "{}: {} satellites of {} entities",
        path.display(),
        record.satellites.len(),
        entities.len()
    );
    Ok(record)
}

/// Regular, non-hidden files of a collection directory in file-name order.
pub fn source_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| HerdError::io(dir, e))? {
        let entry = entry.map_err(|e| HerdError::io(dir, e))?;
        let path = entry.path();
        if !path.is_file() || entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        files.push(path);
    }
    files.sort();
    Ok(files)
}

/// Extract every source file in `dir` into a dataset named after the directory.
///
/// With `skip_invalid`, files lacking a unique reference entity or whose
/// name cannot be stored as a record name are logged and left out; any
/// other failure aborts the collection.
pub fn extract_collection(
    dir: &Path,
    source: &impl EntitySource,
    config: &AnalysisConfig,
    skip_invalid: bool,
) -> Result<Dataset> {
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string());
    let mut records = Vec::new();
    let mut skipped = 0usize;
    for path in source_files(dir)? {
        match extract_file(&path, source, config) {
            Ok(record) => records.push(record),
            Err(e) if skip_invalid && e.is_record_error() => {
                log::warn!("skipping {}: {e}", path.display());
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }
    log::info!(
        "collection {name}: {} records extracted, {skipped} skipped",
        records.len()
    );
    Ok(Dataset::new(name, records))
}
