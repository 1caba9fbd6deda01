//! Asset registry
//!
//! Tracks every image and sound the game asked for, and whether the
//! backend has finished decoding it. The core only ever reads these flags;
//! loading itself is fire-and-poll, done by the backend between frames.

use std::fmt;

/// Stable handle for a registered asset (index into the registry)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetId(u32);

impl AssetId {
    pub fn index(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "asset#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Image,
    Sound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetState {
    /// Requested, completion signal not seen yet
    Pending,
    Loaded,
    /// Backend gave up; the reason is kept for diagnostics
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct AssetEntry {
    pub kind: AssetKind,
    pub location: String,
    pub state: AssetState,
}

#[derive(Debug, Default)]
pub struct AssetRegistry {
    entries: Vec<AssetEntry>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, kind: AssetKind, location: impl Into<String>) -> AssetId {
        let id = AssetId(self.entries.len() as u32);
        let location = location.into();
        log::debug!("registered {:?} {} at {:?}", kind, id, location);
        self.entries.push(AssetEntry {
            kind,
            location,
            state: AssetState::Pending,
        });
        id
    }

    pub fn register_image(&mut self, location: impl Into<String>) -> AssetId {
        self.register(AssetKind::Image, location)
    }

    pub fn register_sound(&mut self, location: impl Into<String>) -> AssetId {
        self.register(AssetKind::Sound, location)
    }

    pub fn get(&self, id: AssetId) -> Option<&AssetEntry> {
        self.entries.get(id.0 as usize)
    }

    /// Load-completion signal from the backend. Unknown ids are ignored.
    pub fn mark_loaded(&mut self, id: AssetId) {
        match self.entries.get_mut(id.0 as usize) {
            Some(entry) => entry.state = AssetState::Loaded,
            None => log::warn!("load completion for unknown {}", id),
        }
    }

    pub fn mark_failed(&mut self, id: AssetId, reason: impl Into<String>) {
        let reason = reason.into();
        match self.entries.get_mut(id.0 as usize) {
            Some(entry) => {
                log::warn!("{} ({}) failed to load: {}", id, entry.location, reason);
                entry.state = AssetState::Failed(reason);
            }
            None => log::warn!("load failure for unknown {}: {}", id, reason),
        }
    }

    pub fn is_loaded(&self, id: AssetId) -> bool {
        matches!(self.get(id).map(|e| &e.state), Some(AssetState::Loaded))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn loaded_count(&self) -> usize {
        self.entries.iter().filter(|e| e.state == AssetState::Loaded).count()
    }

    /// Fraction of assets loaded; 1.0 when nothing is registered.
    pub fn loaded_fraction(&self) -> f64 {
        if self.entries.is_empty() {
            1.0
        } else {
            self.loaded_count() as f64 / self.entries.len() as f64
        }
    }

    /// True once no asset is still waiting for its completion signal.
    pub fn all_settled(&self) -> bool {
        self.entries.iter().all(|e| e.state != AssetState::Pending)
    }

    /// First asset still pending, for backends that load one per frame.
    pub fn next_pending(&self) -> Option<(AssetId, &AssetEntry)> {
        self.entries
            .iter()
            .enumerate()
            .find(|(_, e)| e.state == AssetState::Pending)
            .map(|(i, e)| (AssetId(i as u32), e))
    }

    pub fn iter(&self) -> impl Iterator<Item = (AssetId, &AssetEntry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| (AssetId(i as u32), e))
    }
}
