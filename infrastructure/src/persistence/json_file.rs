//! Single-file JSON repository for the workflow state.

use agenda_application::{AgendaRepository, AgendaSnapshot, RepositoryError};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Stores the whole [`AgendaSnapshot`] as pretty-printed JSON in one file.
///
/// Writes go to a sibling temp file that is then renamed over the target,
/// so a reader never sees a partially written state.
pub struct JsonFileAgendaRepository {
    path: PathBuf,
}

impl JsonFileAgendaRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl AgendaRepository for JsonFileAgendaRepository {
    fn load(&self) -> Result<Option<AgendaSnapshot>, RepositoryError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| RepositoryError::Corrupt(format!("{}: {}", self.path.display(), e)))
    }

    fn save(&self, snapshot: &AgendaSnapshot) -> Result<(), RepositoryError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(snapshot)
            .map_err(|e| RepositoryError::Corrupt(e.to_string()))?;

        let temp = self.temp_path();
        {
            let mut file = fs::File::create(&temp)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&temp, &self.path)?;

        debug!(
            "Saved agenda state ({} panels) to {}",
            snapshot.panels.len(),
            self.path.display()
        );
        Ok(())
    }
}
