use std::{
    env,
    fs::{self, File, OpenOptions},
    io::{self, BufRead, BufReader, Write},
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::filedeck_state_dir;

pub const FAVOURITES_VERSION: u8 = 1;

pub const FAVOURITES_DISABLED_ENV: &str = "FILEDECK_FAVOURITES";

pub const FAVOURITES_FILE_NAME: &str = "favourites.jsonl";

/// One line of the favourites log. The current set is the replay of
/// every event in file order.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub enum FavouriteEvent {
    Added(FavouriteChange),
    Removed(FavouriteChange),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FavouriteChange {
    /// Schema version
    pub version: u8,

    pub timestamp: DateTime<Utc>,

    pub path: PathBuf,
}

impl FavouriteChange {
    pub fn new(path: PathBuf) -> Self {
        Self {
            version: FAVOURITES_VERSION,
            timestamp: Utc::now(),
            path,
        }
    }
}

pub struct FavouriteStore {
    path: PathBuf,
}

pub fn favourites_path() -> PathBuf {
    filedeck_state_dir().join(FAVOURITES_FILE_NAME)
}

fn favourites_disabled() -> bool {
    match env::var(FAVOURITES_DISABLED_ENV) {
        Ok(val) => val == "0" || val.eq_ignore_ascii_case("false"),
        Err(_) => false,
    }
}

impl FavouriteStore {
    /// Store at the default location, or `None` when disabled through
    /// `FILEDECK_FAVOURITES`.
    pub fn new() -> Option<Self> {
        if favourites_disabled() {
            return None;
        }

        Some(Self {
            path: favourites_path(),
        })
    }

    /// Store backed by an explicit file.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn add(&self, path: &Path) -> io::Result<bool> {
        if self.contains(path) {
            return Ok(false);
        }
        self.append_event(&FavouriteEvent::Added(FavouriteChange::new(
            path.to_path_buf(),
        )))?;
        Ok(true)
    }

    pub fn remove(&self, path: &Path) -> io::Result<bool> {
        if !self.contains(path) {
            return Ok(false);
        }
        self.append_event(&FavouriteEvent::Removed(FavouriteChange::new(
            path.to_path_buf(),
        )))?;
        Ok(true)
    }

    /// Flip the favourite state of `path`, returning the new state.
    pub fn toggle(&self, path: &Path) -> io::Result<bool> {
        if self.contains(path) {
            self.remove(path)?;
            Ok(false)
        } else {
            self.add(path)?;
            Ok(true)
        }
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths().iter().any(|p| p == path)
    }

    /// Current favourites in the order they were added.
    pub fn paths(&self) -> Vec<PathBuf> {
        let mut current: Vec<PathBuf> = Vec::new();

        for event in self.iter_events() {
            match event {
                FavouriteEvent::Added(change) => {
                    if !current.contains(&change.path) {
                        current.push(change.path);
                    }
                }
                FavouriteEvent::Removed(change) => {
                    current.retain(|p| *p != change.path);
                }
            }
        }

        current
    }

    fn append_event(&self, event: &FavouriteEvent) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut line = serde_json::to_string(event).map_err(io::Error::other)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.write_all(line.as_bytes())
    }

    pub fn iter_events(&self) -> impl Iterator<Item = FavouriteEvent> {
        self.read_events().into_iter().flatten()
    }

    fn read_events(&self) -> Option<Vec<FavouriteEvent>> {
        let file = File::open(&self.path).ok()?;
        let reader = BufReader::new(file);
        let mut events = Vec::new();
        for line in reader.lines() {
            match line {
                Ok(line) => match serde_json::from_str(&line) {
                    Ok(ev) => events.push(ev),
                    Err(e) => debug!("Skipping malformed favourites line: {e}"),
                },
                Err(e) => {
                    debug!("Error reading favourites file: {e}");
                    break;
                }
            }
        }
        Some(events)
    }

    pub fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
#[path = "favourites_tests.rs"]
mod tests;
