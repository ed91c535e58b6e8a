//! Session-scoped snapshot of the selected file, used to restore the tool
//! after a language-switch navigation.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::{FrameCropError, Result};
use crate::source::{ImageMime, SourceFile};

/// The selected file, encoded as a data URL, plus its name and MIME type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub data_url: String,
    pub file_name: String,
    pub mime_type: String,
}

impl SessionSnapshot {
    pub fn from_source(file: &SourceFile) -> Self {
        Self {
            data_url: format!("data:{};base64,{}", file.mime, STANDARD.encode(&file.bytes)),
            file_name: file.name.clone(),
            mime_type: file.mime.as_str().to_string(),
        }
    }

    /// Decode the data URL back into a validated file.
    pub fn to_source_file(&self) -> Result<SourceFile> {
        let rest = self
            .data_url
            .strip_prefix("data:")
            .ok_or_else(|| FrameCropError::InvalidSnapshot("missing data: prefix".into()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| FrameCropError::InvalidSnapshot("missing payload".into()))?;
        let url_mime = header
            .strip_suffix(";base64")
            .ok_or_else(|| FrameCropError::InvalidSnapshot("payload is not base64".into()))?;

        let declared = if self.mime_type.is_empty() {
            url_mime
        } else {
            self.mime_type.as_str()
        };
        let mime = ImageMime::from_mime(declared).ok_or_else(|| {
            FrameCropError::InvalidSnapshot(format!("unsupported MIME type {declared}"))
        })?;
        let bytes = STANDARD
            .decode(payload)
            .map_err(|err| FrameCropError::InvalidSnapshot(err.to_string()))?;

        Ok(SourceFile {
            name: self.file_name.clone(),
            mime,
            bytes,
        })
    }
}

/// Where the tool keeps its snapshot between navigations.
pub trait SessionStore {
    fn save(&mut self, snapshot: &SessionSnapshot) -> Result<()>;
    fn load(&self) -> Result<Option<SessionSnapshot>>;
    fn clear(&mut self) -> Result<()>;
}

impl<S: SessionStore + ?Sized> SessionStore for Box<S> {
    fn save(&mut self, snapshot: &SessionSnapshot) -> Result<()> {
        (**self).save(snapshot)
    }

    fn load(&self) -> Result<Option<SessionSnapshot>> {
        (**self).load()
    }

    fn clear(&mut self) -> Result<()> {
        (**self).clear()
    }
}

/// In-memory store.
#[derive(Clone, Debug, Default)]
pub struct MemorySessionStore {
    snapshot: Option<SessionSnapshot>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&mut self, snapshot: &SessionSnapshot) -> Result<()> {
        self.snapshot = Some(snapshot.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<SessionSnapshot>> {
        Ok(self.snapshot.clone())
    }

    fn clear(&mut self) -> Result<()> {
        self.snapshot = None;
        Ok(())
    }
}

/// Store backed by a single JSON file.
#[derive(Clone, Debug)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn save(&mut self, snapshot: &SessionSnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(snapshot)?)?;
        Ok(())
    }

    fn load(&self) -> Result<Option<SessionSnapshot>> {
        let contents = match fs::read(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_slice(&contents)?))
    }

    fn clear(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
