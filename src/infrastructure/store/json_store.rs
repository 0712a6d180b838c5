//! File-backed ballot store.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::domain::entities::{BallotRecord, Candidate};
use crate::domain::errors::StoreError;
use crate::domain::ports::BallotStorePort;

const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "votebooth";
const APP_NAME: &str = "votebooth";
const CANDIDATES_FILE: &str = "candidates.json";
const VOTER_LOG_FILE: &str = "voter_log.json";

/// Ballot store persisting each named record as a JSON file in the
/// platform data directory.
pub struct JsonBallotStore {
    data_dir: PathBuf,
}

impl JsonBallotStore {
    /// Creates a store rooted at the platform data directory.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the data directory cannot be determined.
    pub fn new() -> Result<Self, StoreError> {
        let data_dir = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or(StoreError::DataDirNotFound)?;

        Ok(Self { data_dir })
    }

    /// Creates a store rooted at a specific directory.
    #[must_use]
    pub fn with_dir(path: PathBuf) -> Self {
        Self { data_dir: path }
    }

    /// Returns the directory holding both records.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn ensure_data_dir(&self) -> Result<(), StoreError> {
        if !self.data_dir.exists() {
            info!("Creating data directory at {:?}", self.data_dir);
            fs::create_dir_all(&self.data_dir)?;
        }
        Ok(())
    }

    fn read_record<T: DeserializeOwned>(&self, file_name: &str) -> Option<Vec<T>> {
        let path = self.data_dir.join(file_name);
        if !path.exists() {
            return None;
        }

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!(file = file_name, error = %e, "Failed to read record");
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(records) => Some(records),
            Err(e) => {
                warn!(file = file_name, error = %e, "Failed to parse record, ignoring it");
                None
            }
        }
    }

    fn write_record<T: Serialize>(&self, file_name: &str, records: &[T]) -> Result<(), StoreError> {
        self.ensure_data_dir()?;
        let path = self.data_dir.join(file_name);
        let content = serde_json::to_string_pretty(records)?;

        let mut temp_file = tempfile::NamedTempFile::new_in(&self.data_dir)?;
        temp_file.write_all(content.as_bytes())?;
        temp_file.persist(&path).map_err(|e| e.error)?;

        Ok(())
    }
}

impl BallotStorePort for JsonBallotStore {
    fn load_candidates(&self) -> Option<Vec<Candidate>> {
        self.read_record(CANDIDATES_FILE)
    }

    fn save_candidates(&self, candidates: &[Candidate]) -> Result<(), StoreError> {
        self.write_record(CANDIDATES_FILE, candidates)
    }

    fn load_voter_log(&self) -> Option<Vec<BallotRecord>> {
        self.read_record(VOTER_LOG_FILE)
    }

    fn save_voter_log(&self, log: &[BallotRecord]) -> Result<(), StoreError> {
        self.write_record(VOTER_LOG_FILE, log)
    }
}
