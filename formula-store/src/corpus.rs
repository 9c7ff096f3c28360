//! Reference corpus loader with modification-time based hot reload.
//!
//! Every call stats the formula directory, so callers always observe the
//! latest on-disk content. A document body is only re-read when its
//! `(mtime, len)` stamp changed since the previous call, or when the file was
//! modified so recently that a same-length edit could share the old mtime.
//! Deleted files drop out of the snapshot immediately.

use std::{
    collections::HashMap,
    fs,
    io::ErrorKind,
    path::Path,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
    time::{Duration, SystemTime},
};

use tracing::{debug, trace, warn};

use crate::{category::Category, config::CorpusConfig, errors::FormulaError};

/// One formula document as seen by the classifier and extractor.
#[derive(Debug, Clone)]
pub struct FormulaDocument {
    pub category: Category,
    /// Raw text, shared with the loader cache.
    pub content: Arc<str>,
}

/// Files modified within this window are always re-read: coarse mtime clocks
/// cannot distinguish two same-length writes inside it.
const RACY_WINDOW: Duration = Duration::from_secs(2);

/// File identity used to decide whether the cached body is still current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Stamp {
    modified: Option<SystemTime>,
    len: u64,
}

impl Stamp {
    fn of(meta: &fs::Metadata) -> Self {
        Self {
            modified: meta.modified().ok(),
            len: meta.len(),
        }
    }

    /// Whether a cached body with the same stamp can be reused. Without an
    /// mtime, or with a recent one, the platform cannot tell us about edits.
    fn is_settled(&self, now: SystemTime) -> bool {
        self.modified
            .and_then(|m| now.duration_since(m).ok())
            .is_some_and(|age| age >= RACY_WINDOW)
    }
}

struct CachedDoc {
    stamp: Stamp,
    content: Arc<str>,
}

/// Loads formula documents from a directory, caching bodies by file stamp.
pub struct CorpusLoader {
    cfg: CorpusConfig,
    cache: RwLock<HashMap<Category, CachedDoc>>,
}

impl CorpusLoader {
    pub fn new(cfg: CorpusConfig) -> Self {
        Self {
            cfg,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.cfg.dir
    }

    /// Returns every known category document present on disk, in canonical
    /// category order.
    ///
    /// An unreadable directory is logged and yields an empty list; a single
    /// unreadable file is logged and skipped.
    pub fn documents(&self) -> Vec<FormulaDocument> {
        let entries = match fs::read_dir(&self.cfg.dir) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(dir = ?self.cfg.dir, error = %err, "formula directory unreadable; using empty corpus");
                return Vec::new();
            }
        };

        let mut present: HashMap<Category, Stamp> = HashMap::new();
        for entry in entries.flatten() {
            let name = entry.file_name();
            let Some(category) = name.to_str().and_then(Category::from_file_name) else {
                trace!(file = ?name, "ignoring non-formula file");
                continue;
            };
            match entry.metadata() {
                Ok(meta) if meta.is_file() => {
                    present.insert(category, Stamp::of(&meta));
                }
                Ok(_) => trace!(file = ?name, "ignoring non-regular entry"),
                Err(err) => warn!(file = ?name, error = %err, "cannot stat formula file"),
            }
        }

        self.write_cache().retain(|c, _| present.contains_key(c));

        let mut docs = Vec::with_capacity(present.len());
        for category in Category::ALL {
            let Some(stamp) = present.get(&category).copied() else {
                continue;
            };
            match self.load(category, stamp) {
                Ok(doc) => docs.push(doc),
                Err(err) => warn!(%category, error = %err, "skipping unreadable formula file"),
            }
        }

        debug!(count = docs.len(), dir = ?self.cfg.dir, "formula corpus scanned");
        docs
    }

    /// Loads a single category document.
    ///
    /// Returns `Ok(None)` if the file does not exist.
    ///
    /// # Errors
    /// Returns [`FormulaError::Io`] if the file exists but cannot be read.
    pub fn document(&self, category: Category) -> Result<Option<FormulaDocument>, FormulaError> {
        let path = self.cfg.dir.join(category.file_name());
        let meta = match fs::metadata(&path) {
            Ok(meta) => meta,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                self.write_cache().remove(&category);
                return Ok(None);
            }
            Err(source) => return Err(FormulaError::Io { path, source }),
        };
        self.load(category, Stamp::of(&meta)).map(Some)
    }

    fn load(&self, category: Category, stamp: Stamp) -> Result<FormulaDocument, FormulaError> {
        if stamp.is_settled(SystemTime::now()) {
            if let Some(hit) = self.read_cache().get(&category) {
                if hit.stamp == stamp {
                    trace!(%category, "formula cache hit");
                    return Ok(FormulaDocument {
                        category,
                        content: Arc::clone(&hit.content),
                    });
                }
            }
        }

        let path = self.cfg.dir.join(category.file_name());
        let content: Arc<str> = fs::read_to_string(&path)
            .map_err(|source| FormulaError::Io {
                path: path.clone(),
                source,
            })?
            .into();

        debug!(%category, bytes = content.len(), "formula document (re)loaded");
        self.write_cache().insert(
            category,
            CachedDoc {
                stamp,
                content: Arc::clone(&content),
            },
        );

        Ok(FormulaDocument { category, content })
    }

    // Cache contents are plain data, so a poisoned lock is still usable.
    fn read_cache(&self) -> RwLockReadGuard<'_, HashMap<Category, CachedDoc>> {
        self.cache.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_cache(&self) -> RwLockWriteGuard<'_, HashMap<Category, CachedDoc>> {
        self.cache.write().unwrap_or_else(|e| e.into_inner())
    }
}
