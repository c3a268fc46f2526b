use crate::io::ext_repr::ExtProject;
use anyhow::{Context, Result};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// One committed project snapshot. `digest` covers the parent digest and the
/// canonical JSON of the snapshot, chaining every entry to its predecessor.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct VersionEntry {
    pub seq: usize,
    pub message: String,
    /// RFC 3339 commit time
    pub timestamp: String,
    pub parent_digest: Option<String>,
    pub digest: String,
    pub snapshot: ExtProject,
}

/// Summary row of [`VersionLog::history`]: everything but the snapshot itself.
#[derive(Clone, Debug, PartialEq)]
pub struct VersionSummary {
    pub seq: usize,
    pub message: String,
    pub timestamp: String,
    pub digest: String,
}

/// Result of comparing two log entries.
#[derive(Clone, Debug, PartialEq)]
pub struct VersionDiff {
    pub seq_a: usize,
    pub seq_b: usize,
    /// True iff the two snapshots hash identically
    pub same_snapshot: bool,
}

/// Append-only, hash-chained history of project snapshots.
///
/// The chain makes silent tampering with a persisted log detectable via
/// [`VersionLog::verify`]; it is an integrity check, not a cryptographic one.
#[derive(Default, Serialize, Deserialize, Clone, Debug)]
pub struct VersionLog {
    entries: Vec<VersionEntry>,
    /// Index of the entry the project is currently at, shifted by rollbacks
    cursor: Option<usize>,
}

impl VersionLog {
    pub fn new() -> Self {
        VersionLog::default()
    }

    /// Appends a snapshot to the log and moves the cursor to it.
    pub fn commit(&mut self, snapshot: ExtProject, message: impl Into<String>) -> Result<&VersionEntry> {
        let canonical =
            serde_json::to_string(&snapshot).context("could not serialize project snapshot")?;
        let parent_digest = self.entries.last().map(|e| e.digest.clone());
        let digest = chain_digest(parent_digest.as_deref(), &canonical);

        self.entries.push(VersionEntry {
            seq: self.entries.len(),
            message: message.into(),
            timestamp: Timestamp::now().to_string(),
            parent_digest,
            digest,
            snapshot,
        });
        self.cursor = Some(self.entries.len() - 1);
        Ok(self.entries.last().expect("entry was just pushed"))
    }

    /// Moves the cursor back to `seq` and returns that entry.
    /// An unknown sequence number leaves the cursor untouched.
    pub fn rollback(&mut self, seq: usize) -> Option<&VersionEntry> {
        if seq < self.entries.len() {
            self.cursor = Some(seq);
            Some(&self.entries[seq])
        } else {
            None
        }
    }

    /// Entry the cursor currently points at.
    pub fn current(&self) -> Option<&VersionEntry> {
        self.cursor.map(|i| &self.entries[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn history(&self) -> Vec<VersionSummary> {
        self.entries
            .iter()
            .map(|e| VersionSummary {
                seq: e.seq,
                message: e.message.clone(),
                timestamp: e.timestamp.clone(),
                digest: e.digest.clone(),
            })
            .collect()
    }

    /// Recomputes the digest chain from scratch. `false` means an entry was
    /// altered, reordered or spliced after being committed.
    pub fn verify(&self) -> bool {
        let mut parent: Option<&str> = None;
        for entry in &self.entries {
            if entry.parent_digest.as_deref() != parent {
                return false;
            }
            let canonical = match serde_json::to_string(&entry.snapshot) {
                Ok(json) => json,
                Err(_) => return false,
            };
            if entry.digest != chain_digest(parent, &canonical) {
                return false;
            }
            parent = Some(&entry.digest);
        }
        true
    }

    pub fn diff(&self, seq_a: usize, seq_b: usize) -> Option<VersionDiff> {
        let a = self.entries.get(seq_a)?;
        let b = self.entries.get(seq_b)?;
        let same_snapshot = snapshot_digest(&a.snapshot) == snapshot_digest(&b.snapshot);
        Some(VersionDiff {
            seq_a,
            seq_b,
            same_snapshot,
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("could not create version log: {}", path.display()))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self).context("could not serialize version log")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("could not open version log: {}", path.display()))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("could not parse version log: {}", path.display()))
    }
}

fn chain_digest(parent: Option<&str>, canonical_snapshot: &str) -> String {
    let mut hasher = DefaultHasher::new();
    parent.unwrap_or("").hash(&mut hasher);
    canonical_snapshot.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

fn snapshot_digest(snapshot: &ExtProject) -> Option<String> {
    serde_json::to_string(snapshot)
        .ok()
        .map(|json| chain_digest(None, &json))
}
