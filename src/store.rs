//! The herokron database
//!
//! A single JSON document mirrored in memory. Opening never fails because of
//! the document's contents: a missing or invalid file is replaced with
//! [`Document::default`]. Every mutation writes the complete next document to
//! disk before it becomes the in-memory state, so a failed write or a rejected
//! input leaves both untouched.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::color::parse_color;
use crate::document::{Document, RegistryEntry, KEY_LENGTH};
use crate::error::{HerokronError, Result};
use crate::heroku::{AppSource, HerokuClient, SourceError};
use crate::webhook::WebhookUrl;

/// File-backed store of API keys, apps, webhook and color
pub struct Store<S = HerokuClient> {
    /// Backing file
    path: PathBuf,
    /// In-memory mirror of the backing file
    document: Document,
    /// Answers "which apps does this key own"
    source: S,
}

impl<S: AppSource> Store<S> {
    /// Open the database at `path`, creating or repairing it as needed
    pub fn open(path: impl AsRef<Path>, source: S) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let document = match Self::load(&path)? {
            Some(document) => document,
            None => {
                write_document(&path, &Document::default())?;
                let content = fs::read(&path)?;
                serde_json::from_slice(&content)?
            }
        };

        Ok(Self {
            path,
            document,
            source,
        })
    }

    /// Read the backing file, `None` when it is absent or fails validation
    fn load(path: &Path) -> Result<Option<Document>> {
        if !path.is_file() {
            debug!(path = %path.display(), "no database file, creating one");
            return Ok(None);
        }

        let content = fs::read(path)?;
        match Document::from_json(&content) {
            Ok(document) => {
                debug!(path = %path.display(), keys = document.registry.len(), "loaded database");
                Ok(Some(document))
            }
            Err(violation) => {
                warn!(
                    path = %path.display(),
                    reason = %violation,
                    "database failed validation, reinitializing with defaults"
                );
                Ok(None)
            }
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The whole document
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn keys(&self) -> Vec<&str> {
        self.document.keys()
    }

    pub fn apps(&self) -> Vec<&str> {
        self.document.apps()
    }

    pub fn key_exists(&self, key: &str) -> bool {
        self.document.key_exists(key)
    }

    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.document.index_of(key)
    }

    pub fn apps_for(&self, key: &str) -> Option<&[String]> {
        self.document.apps_for(key)
    }

    pub fn key_for(&self, app: &str) -> Option<&str> {
        self.document.key_for(app)
    }

    pub fn color(&self) -> u32 {
        self.document.color
    }

    pub fn webhook_url(&self) -> Option<String> {
        self.document.webhook.url()
    }

    /// Register `key` with the apps it currently owns
    ///
    /// Already registered keys are left alone without asking Heroku.
    pub fn add_key(&mut self, key: &str) -> Result<&Document> {
        if self.key_exists(key) {
            debug!("API key already registered");
            return Ok(&self.document);
        }
        // a key of any other length would fail validation on the next open
        if key.chars().count() != KEY_LENGTH {
            return Err(HerokronError::InvalidKey);
        }

        let apps = self.fetch_apps(key)?;
        info!(apps = apps.len(), "registered API key");

        let mut next = self.document.clone();
        next.registry.push(RegistryEntry::new(key, apps));
        self.commit(next)
    }

    /// Forget `key`; unknown keys are ignored
    pub fn remove_key(&mut self, key: &str) -> Result<&Document> {
        let Some(index) = self.index_of(key) else {
            debug!("API key not registered, nothing to remove");
            return Ok(&self.document);
        };

        let mut next = self.document.clone();
        next.registry.remove(index);
        info!(index, "removed API key");
        self.commit(next)
    }

    /// Refresh the app list of a registered key and return it
    pub fn sync_key(&mut self, key: &str) -> Result<Vec<String>> {
        let index = self
            .index_of(key)
            .ok_or(HerokronError::UnknownKey)?;

        let apps = self.fetch_apps(key)?;
        info!(index, apps = apps.len(), "synced API key");

        let mut next = self.document.clone();
        next.registry[index].apps = apps.clone();
        self.commit(next)?;
        Ok(apps)
    }

    /// Refresh every key in registry order, stopping at the first failure
    pub fn sync_all(&mut self) -> Result<&Document> {
        let keys: Vec<String> = self.keys().into_iter().map(String::from).collect();
        for key in &keys {
            self.sync_key(key)?;
        }
        Ok(&self.document)
    }

    /// Store the webhook named by `url`
    pub fn set_webhook(&mut self, url: &str) -> Result<&Document> {
        let parsed = WebhookUrl::parse(url)?;

        let mut next = self.document.clone();
        next.webhook = parsed.into();
        self.commit(next)
    }

    /// Store a color given as `#RRGGBB`, `RRGGBB` or a base 10 integer
    pub fn set_color(&mut self, input: &str) -> Result<&Document> {
        let color = parse_color(input)?;

        let mut next = self.document.clone();
        next.color = color;
        self.commit(next)
    }

    fn fetch_apps(&self, key: &str) -> Result<Vec<String>> {
        self.source.apps_for_key(key).map_err(|e| match e {
            SourceError::Rejected { status } => {
                debug!(status, "Heroku rejected API key");
                HerokronError::InvalidKey
            }
            SourceError::Transport(message) => HerokronError::Remote(message),
        })
    }

    /// Write `next` to disk, then adopt it
    fn commit(&mut self, next: Document) -> Result<&Document> {
        write_document(&self.path, &next)?;
        self.document = next;
        Ok(&self.document)
    }
}

/// Overwrite `path` with `document` through a sibling temp file
fn write_document(path: &Path, document: &Document) -> Result<()> {
    let content = serde_json::to_string_pretty(document)?;

    let mut tmp = OsString::from(path.as_os_str());
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let written = fs::write(&tmp, content).and_then(|()| fs::rename(&tmp, path));
    if let Err(e) = written {
        // the target is untouched; only the temp file may be left over
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    debug!(path = %path.display(), "persisted database");
    Ok(())
}
