// ============================================================
// Layer 6 — Artifact Store
// ============================================================
// Saves and restores the fitted vectorizer + classifier pair as
// two JSON files.
//
// What gets saved:
//   1. tfidf_vectorizer.json — vocabulary, idf weights, fit config
//   2. fake_news_model.json  — weights, bias, fit config, and the
//                              digest of the vectorizer it was
//                              trained against
//
// Both files carry a format version. Loading reads BOTH files,
// re-checks the invariants fitting established (idf length, index
// layout, finite weights) and checks the digest before returning
// anything, so a model is never paired with a vectorizer it was not
// trained with and a hand-edited file cannot panic at predict time.
//
// Reference: serde_json documentation
//            Rust Book §9 (Error Handling)

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::domain::error::{ClassifierError, ClassifierResult};
use crate::domain::traits::Persistable;
use crate::ml::classifier::PassiveAggressiveClassifier;
use crate::ml::pipeline::FittedPipeline;
use crate::ml::vectorizer::TfidfVectorizer;

pub const DEFAULT_MODEL_PATH:      &str = "fake_news_model.json";
pub const DEFAULT_VECTORIZER_PATH: &str = "tfidf_vectorizer.json";

/// Bumped whenever the on-disk layout changes.
pub const FORMAT_VERSION: u32 = 1;

// ─── On-disk records ──────────────────────────────────────────────────────────
#[derive(Debug, Serialize, Deserialize)]
pub struct VectorizerArtifact {
    pub format_version: u32,
    pub vectorizer:     TfidfVectorizer,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version:    u32,
    pub vectorizer_digest: String,
    pub classifier:        PassiveAggressiveClassifier,
}

impl Persistable for VectorizerArtifact {
    fn save(&self, path: &Path) -> ClassifierResult<()> {
        write_json(path, self)
    }

    fn load(path: &Path) -> ClassifierResult<Self> {
        let artifact: Self = read_json(path)?;
        check_version(path, artifact.format_version)?;
        artifact
            .vectorizer
            .validate()
            .map_err(|reason| inconsistent(path, reason))?;
        Ok(artifact)
    }
}

impl Persistable for ModelArtifact {
    fn save(&self, path: &Path) -> ClassifierResult<()> {
        write_json(path, self)
    }

    fn load(path: &Path) -> ClassifierResult<Self> {
        let artifact: Self = read_json(path)?;
        check_version(path, artifact.format_version)?;
        artifact
            .classifier
            .validate()
            .map_err(|reason| inconsistent(path, reason))?;
        Ok(artifact)
    }
}

fn inconsistent(path: &Path, reason: &'static str) -> ClassifierError {
    ClassifierError::InconsistentArtifact {
        path: path.to_path_buf(),
        reason,
    }
}

fn check_version(path: &Path, found: u32) -> ClassifierResult<()> {
    if found == FORMAT_VERSION {
        Ok(())
    } else {
        Err(ClassifierError::UnsupportedArtifact {
            path: path.to_path_buf(),
            found,
            expected: FORMAT_VERSION,
        })
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> ClassifierResult<()> {
    let unavailable = |source| ClassifierError::ArtifactUnavailable {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(unavailable)?;
    }

    let json = serde_json::to_vec(value).map_err(|source| ClassifierError::CorruptArtifact {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(unavailable)?;

    tracing::debug!("Wrote artifact '{}'", path.display());
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> ClassifierResult<T> {
    let bytes = fs::read(path).map_err(|source| ClassifierError::ArtifactUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| ClassifierError::CorruptArtifact {
        path: path.to_path_buf(),
        source,
    })
}

// ─── ArtifactStore ────────────────────────────────────────────────────────────
/// Where a fitted pair lives on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactStore {
    model_path:      PathBuf,
    vectorizer_path: PathBuf,
}

impl ArtifactStore {
    pub fn new(model_path: impl Into<PathBuf>, vectorizer_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path:      model_path.into(),
            vectorizer_path: vectorizer_path.into(),
        }
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    pub fn vectorizer_path(&self) -> &Path {
        &self.vectorizer_path
    }

    /// Write both halves of the pair.
    pub fn save(&self, pipeline: &FittedPipeline) -> ClassifierResult<()> {
        let vectorizer = VectorizerArtifact {
            format_version: FORMAT_VERSION,
            vectorizer:     pipeline.vectorizer().clone(),
        };
        let model = ModelArtifact {
            format_version:    FORMAT_VERSION,
            vectorizer_digest: pipeline.vectorizer().digest(),
            classifier:        pipeline.classifier().clone(),
        };

        vectorizer.save(&self.vectorizer_path)?;
        model.save(&self.model_path)?;

        tracing::info!(
            "Saved model to '{}' and vectorizer to '{}'",
            self.model_path.display(),
            self.vectorizer_path.display()
        );
        Ok(())
    }

    /// Read both halves and verify they belong together.
    pub fn load(&self) -> ClassifierResult<FittedPipeline> {
        let vectorizer = VectorizerArtifact::load(&self.vectorizer_path)?.vectorizer;
        let model      = ModelArtifact::load(&self.model_path)?;

        if model.vectorizer_digest != vectorizer.digest() {
            return Err(ClassifierError::MismatchedArtifacts);
        }
        let pipeline = FittedPipeline::new(vectorizer, model.classifier)?;

        tracing::info!(
            "Loaded model from '{}' ({} features)",
            self.model_path.display(),
            pipeline.vectorizer().vocabulary_size()
        );
        Ok(pipeline)
    }
}

impl Default for ArtifactStore {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL_PATH, DEFAULT_VECTORIZER_PATH)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::normalizer::{NlpResources, Normalizer};
    use crate::ml::classifier::PassiveAggressiveConfig;
    use crate::ml::trainer::fit_pipeline;
    use crate::ml::vectorizer::TfidfConfig;
    use crate::test_support::synthetic_documents;

    fn trained(per_class: usize) -> FittedPipeline {
        fit_pipeline(
            &synthetic_documents(per_class),
            TfidfConfig::default(),
            PassiveAggressiveConfig::default(),
            NlpResources::english(),
        )
        .expect("fit")
        .pipeline
    }

    fn store_in(dir: &Path) -> ArtifactStore {
        ArtifactStore::new(dir.join("model.json"), dir.join("vectorizer.json"))
    }

    #[test]
    fn test_save_then_load_reproduces_predictions() {
        let dir      = tempfile::tempdir().expect("tempdir");
        let store    = store_in(dir.path());
        let original = trained(20);
        store.save(&original).expect("save");

        let restored   = store.load().expect("load");
        let normalizer = Normalizer::english();
        let inputs = [
            "Shocking secret cure exposed",
            "Parliament passes the budget after committee report",
            "",
            "completely unrelated words",
        ];
        for text in inputs {
            assert_eq!(
                original.classify(&normalizer, text),
                restored.classify(&normalizer, text),
                "prediction changed for {text:?}"
            );
        }
        assert_eq!(original, restored);
    }

    #[test]
    fn test_creates_missing_parent_directories() {
        let dir   = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir.path().join("nested/deeper"));
        store.save(&trained(10)).expect("save");
        assert!(store.model_path().exists());
        assert!(store.vectorizer_path().exists());
    }

    #[test]
    fn test_missing_files_are_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = store_in(dir.path()).load().unwrap_err();
        assert!(matches!(err, ClassifierError::ArtifactUnavailable { .. }));
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir   = tempfile::tempdir().expect("tempdir");
        let store = store_in(dir.path());
        store.save(&trained(10)).expect("save");
        fs::write(store.model_path(), b"{ not json").expect("corrupt");

        let err = store.load().unwrap_err();
        assert!(matches!(err, ClassifierError::CorruptArtifact { .. }));
    }

    /// Rewrite one JSON field of a saved artifact in place.
    fn edit_json(path: &Path, edit: impl FnOnce(&mut serde_json::Value)) {
        let raw = fs::read(path).expect("read");
        let mut value: serde_json::Value = serde_json::from_slice(&raw).expect("parse");
        edit(&mut value);
        fs::write(path, serde_json::to_vec(&value).expect("encode")).expect("write");
    }

    #[test]
    fn test_truncated_idf_is_rejected_on_load() {
        let dir   = tempfile::tempdir().expect("tempdir");
        let store = store_in(dir.path());
        store.save(&trained(10)).expect("save");
        edit_json(store.vectorizer_path(), |v| {
            v["vectorizer"]["idf"] = serde_json::json!([1.0]);
        });

        let err = store.load().unwrap_err();
        assert!(matches!(err, ClassifierError::InconsistentArtifact { .. }));
    }

    #[test]
    fn test_out_of_range_vocabulary_index_is_rejected_on_load() {
        let dir   = tempfile::tempdir().expect("tempdir");
        let store = store_in(dir.path());
        store.save(&trained(10)).expect("save");
        edit_json(store.vectorizer_path(), |v| {
            let vocab = v["vectorizer"]["vocabulary"].as_object_mut().expect("vocabulary");
            let first = vocab.keys().next().cloned().expect("term");
            vocab.insert(first, serde_json::json!(10_000));
        });

        let err = store.load().unwrap_err();
        assert!(matches!(err, ClassifierError::InconsistentArtifact { .. }));
    }

    #[test]
    fn test_mismatched_pair_is_rejected() {
        let dir_a = tempfile::tempdir().expect("tempdir");
        let dir_b = tempfile::tempdir().expect("tempdir");
        let a     = store_in(dir_a.path());
        let b     = store_in(dir_b.path());
        // 4 articles per class only use the first seven words of each
        // class list, so the two vocabularies differ
        a.save(&trained(4)).expect("save a");
        b.save(&trained(10)).expect("save b");

        // model from run A, vectorizer from run B
        let mixed = ArtifactStore::new(a.model_path(), b.vectorizer_path());
        let err   = mixed.load().unwrap_err();
        assert!(matches!(err, ClassifierError::MismatchedArtifacts));
    }

    #[test]
    fn test_future_format_version_is_rejected() {
        let dir   = tempfile::tempdir().expect("tempdir");
        let store = store_in(dir.path());
        store.save(&trained(10)).expect("save");

        let raw = fs::read_to_string(store.vectorizer_path()).expect("read");
        let bumped = raw.replacen(
            &format!("\"format_version\":{FORMAT_VERSION}"),
            "\"format_version\":99",
            1,
        );
        fs::write(store.vectorizer_path(), bumped).expect("write");

        let err = store.load().unwrap_err();
        assert!(matches!(err, ClassifierError::UnsupportedArtifact { found: 99, .. }));
    }
}
