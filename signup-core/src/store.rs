//! JSON-file-backed activity store.
//!
//! The whole mapping lives in memory and is written back in full after every
//! mutation. Writes go to a temp file in the target's directory which is then
//! renamed over the data file, so readers only ever see a complete file.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::activity::{Activities, Activity};
use crate::defaults::default_activities;
use crate::error::{SignupError, SignupResult};

const TEMP_SUFFIX: &str = ".tmp";

/// Owns the data file path and the in-memory copy of its contents.
pub struct ActivityStore {
    path: PathBuf,
    activities: Activities,
}

impl ActivityStore {
    /// Load the store from `path`, seeding defaults if the file is missing or unreadable.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let activities = load(&path);
        ActivityStore { path, activities }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn activities(&self) -> &Activities {
        &self.activities
    }

    pub fn get(&self, name: &str) -> Option<&Activity> {
        self.activities.get(name)
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// Discard the in-memory mapping and re-read the data file.
    /// Returns the number of activities now loaded.
    pub fn reload(&mut self) -> usize {
        self.activities = load(&self.path);
        info!(count = self.activities.len(), path = %self.path.display(), "Reloaded activities");
        self.activities.len()
    }

    /// Add `email` to the roster of `name` and persist.
    pub fn signup(&mut self, name: &str, email: &str) -> SignupResult<()> {
        let activity = self
            .activities
            .get_mut(name)
            .ok_or_else(|| SignupError::ActivityNotFound(name.to_string()))?;

        if !activity.add_participant(email) {
            return Err(SignupError::AlreadySignedUp {
                activity: name.to_string(),
                email: email.to_string(),
            });
        }

        if let Err(e) = save(&self.path, &self.activities) {
            // Keep memory in line with what is on disk
            if let Some(activity) = self.activities.get_mut(name) {
                activity.participants.pop();
            }
            return Err(e);
        }

        info!(activity = name, email, "Signed up participant");
        Ok(())
    }

    /// Remove `email` from the roster of `name` and persist.
    pub fn unregister(&mut self, name: &str, email: &str) -> SignupResult<()> {
        let activity = self
            .activities
            .get_mut(name)
            .ok_or_else(|| SignupError::ActivityNotFound(name.to_string()))?;

        let Some(index) = activity.remove_participant(email) else {
            return Err(SignupError::NotSignedUp {
                activity: name.to_string(),
                email: email.to_string(),
            });
        };

        if let Err(e) = save(&self.path, &self.activities) {
            if let Some(activity) = self.activities.get_mut(name) {
                activity.participants.insert(index, email.to_string());
            }
            return Err(e);
        }

        info!(activity = name, email, "Unregistered participant");
        Ok(())
    }
}

/// Read activities from `path`.
///
/// Never fails: a missing file is seeded with the defaults, and a file that
/// cannot be read or parsed is overwritten with them.
pub fn load(path: &Path) -> Activities {
    if !path.exists() {
        info!(path = %path.display(), "No activities file, seeding defaults");
        return seed_defaults(path);
    }

    match read(path) {
        Ok(activities) => {
            debug!(count = activities.len(), path = %path.display(), "Loaded activities");
            activities
        }
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "Activities file is unreadable, replacing it with defaults"
            );
            seed_defaults(path)
        }
    }
}

fn read(path: &Path) -> SignupResult<Activities> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn seed_defaults(path: &Path) -> Activities {
    let activities = default_activities();
    if let Err(e) = save(path, &activities) {
        warn!(path = %path.display(), error = %e, "Could not persist default activities");
    }
    activities
}

/// Atomically replace the file at `path` with the JSON form of `activities`.
pub fn save(path: &Path, activities: &Activities) -> SignupResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let prefix = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("activities");

    // Dropping the temp file before `persist` succeeds deletes it
    let mut temp = tempfile::Builder::new()
        .prefix(prefix)
        .suffix(TEMP_SUFFIX)
        .tempfile_in(dir)?;

    let content = serde_json::to_string_pretty(activities)?;
    temp.write_all(content.as_bytes())?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;
    sync_dir(dir)?;

    debug!(count = activities.len(), path = %path.display(), "Saved activities");
    Ok(())
}

/// Flush the directory entry so a completed rename survives a crash.
#[cfg(unix)]
fn sync_dir(dir: &Path) -> std::io::Result<()> {
    fs::File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> std::io::Result<()> {
    Ok(())
}
