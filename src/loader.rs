//! Dataset loading and discovery
//!
//! A dataset is a YAML document with a top-level `features:` sequence.
//! Datasets are discovered by file name suffix (`*.fecov.yml` by default)
//! in a single directory, without recursion.

use crate::models::{FeatureSet, ModalityTag};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Default file name suffix for datasets
pub const DEFAULT_SUFFIX: &str = ".fecov.yml";

/// Errors raised while locating or reading a dataset
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to list datasets in {}: {source}", dir.display())]
    Discover {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type LoadResult<T> = Result<T, LoadError>;

/// A parsed dataset and where it came from
#[derive(Debug, Clone)]
pub struct Dataset {
    /// File name without the dataset suffix (used to name reports)
    pub name: String,
    pub path: PathBuf,
    pub features: FeatureSet,
}

/// Parse a dataset from YAML text
pub fn parse_feature_set(content: &str) -> Result<FeatureSet, serde_yaml::Error> {
    serde_yaml::from_str(content)
}

/// Read and parse one dataset file
pub fn load_feature_set(path: &Path) -> LoadResult<FeatureSet> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let set = parse_feature_set(&content).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    report_unknown_tags(path, &set);
    debug!("Loaded {} features from {}", set.features.len(), path.display());
    Ok(set)
}

/// Load a dataset, naming it after its file
pub fn load_dataset(path: &Path, suffix: &str) -> LoadResult<Dataset> {
    Ok(Dataset {
        name: dataset_name(path, suffix),
        path: path.to_path_buf(),
        features: load_feature_set(path)?,
    })
}

/// Dataset name: file name with the suffix (or, failing that, the extension) removed
pub fn dataset_name(path: &Path, suffix: &str) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    if let Some(stem) = file_name.strip_suffix(suffix).filter(|s| !s.is_empty()) {
        return stem.to_string();
    }
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or(file_name)
}

/// List dataset files in `dir` whose name ends with `suffix`, sorted by name
pub fn discover(dir: &Path, suffix: &str) -> LoadResult<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|source| LoadError::Discover {
        dir: dir.to_path_buf(),
        source,
    })?;

    let mut found: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.file_name()
                .map(|n| n.to_string_lossy().ends_with(suffix))
                .unwrap_or(false)
        })
        .collect();
    found.sort();
    debug!("Discovered {} datasets in {}", found.len(), dir.display());
    Ok(found)
}

/// Unknown tags are ignored by the engine; surface them once for the user
fn report_unknown_tags(path: &Path, set: &FeatureSet) {
    let mut unknown: Vec<&str> = set
        .features
        .iter()
        .flat_map(|f| {
            f.tags
                .iter()
                .chain(f.acceptance_criteria.iter().flat_map(|ac| ac.tags.iter()))
        })
        .map(String::as_str)
        .filter(|t| ModalityTag::from_label(t).is_none())
        .collect();
    unknown.sort_unstable();
    unknown.dedup();
    if !unknown.is_empty() {
        warn!(
            "{}: ignoring unknown tags: {}",
            path.display(),
            unknown.join(", ")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CriterionStatus;

    const SAMPLE: &str = r#"
features:
  - name: Login
    tags: [manualUI, automateAPI]
    severity: 4
    acceptance_criteria:
      - description: User can log in
        tags: [manualUI]
        status: true
        severity: 2
        complexity: 3
        for_test: true
        test_cases:
          manual: [TC-1]
          automate: [AT-7]
      - description: Lockout after 3 attempts
        tags: [automateAPI]
        status: TODO
"#;

    #[test]
    fn test_parse_sample() {
        let set = parse_feature_set(SAMPLE).unwrap();
        assert_eq!(set.features.len(), 1);
        let f = &set.features[0];
        assert_eq!(f.severity, Some(4.0));
        assert_eq!(f.acceptance_criteria[0].status, CriterionStatus::Verified);
        assert_eq!(f.acceptance_criteria[1].status, CriterionStatus::Todo);
        let cases = f.acceptance_criteria[0].test_cases.as_ref().unwrap();
        assert_eq!(cases.manual, vec!["TC-1"]);
        assert_eq!(cases.automate, vec!["AT-7"]);
        assert!(f.acceptance_criteria[0].is_for_test());
        assert!(!f.acceptance_criteria[1].is_for_test());
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        assert!(parse_feature_set("features:\n  - tags: [manualUI]\n    acceptance_criteria: []\n").is_err());
        assert!(parse_feature_set("features:\n  - name: x\n").is_err());
        assert!(parse_feature_set("not_features: []\n").is_err());
    }

    #[test]
    fn test_dataset_name() {
        assert_eq!(dataset_name(Path::new("dir/shop.fecov.yml"), DEFAULT_SUFFIX), "shop");
        assert_eq!(dataset_name(Path::new("featureMap.yml"), DEFAULT_SUFFIX), "featureMap");
        assert_eq!(dataset_name(Path::new(".fecov.yml"), DEFAULT_SUFFIX), ".fecov");
    }

    #[test]
    fn test_discover_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.fecov.yml", "a.fecov.yml", "notes.yml", "c.fecov.yaml"] {
            std::fs::write(dir.path().join(name), "features: []\n").unwrap();
        }
        std::fs::create_dir(dir.path().join("d.fecov.yml")).unwrap();

        let found = discover(dir.path(), DEFAULT_SUFFIX).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.fecov.yml", "b.fecov.yml"]);
    }

    #[test]
    fn test_load_errors_carry_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.fecov.yml");
        let err = load_feature_set(&missing).unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
        assert!(err.to_string().contains("missing.fecov.yml"));

        let broken = dir.path().join("broken.fecov.yml");
        std::fs::write(&broken, "features: [\n").unwrap();
        assert!(matches!(load_feature_set(&broken).unwrap_err(), LoadError::Parse { .. }));
    }
}
