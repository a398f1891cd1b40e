use std::path::{Path, PathBuf};

/// File names produced for one collection inside an output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionPaths {
    pub dataset: PathBuf,
    pub offsets: PathBuf,
    pub columns: PathBuf,
    pub report: PathBuf,
}

impl CollectionPaths {
    pub fn new(output_dir: &Path, collection: &str) -> Self {
        Self {
            dataset: output_dir.join(format!("{collection}.csv")),
            offsets: output_dir.join(format!("{collection}-offsets.csv")),
            columns: output_dir.join(format!("{collection}-columns.csv")),
            report: output_dir.join(format!("{collection}-report.json")),
        }
    }
}

/// Source directory of a collection under the input root.
pub fn collection_dir(input_root: &Path, collection: &str) -> PathBuf {
    input_root.join(collection)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_follow_collection() {
        let paths = CollectionPaths::new(Path::new("out"), "nocow");
        assert_eq!(paths.dataset, Path::new("out/nocow.csv"));
        assert_eq!(paths.offsets, Path::new("out/nocow-offsets.csv"));
        assert_eq!(paths.columns, Path::new("out/nocow-columns.csv"));
        assert_eq!(paths.report, Path::new("out/nocow-report.json"));
        assert_eq!(collection_dir(Path::new("maps"), "og"), Path::new("maps/og"));
    }
}
