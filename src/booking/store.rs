use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::{Consignment, ConsignmentStatus};
use crate::error::Result;

/// Persistence seam for consignments
///
/// The production document store lives outside this crate; the desk CLI uses
/// [`JsonFileStore`] and tests use [`MemoryStore`].
pub trait ConsignmentStore {
    fn insert(&mut self, consignment: Consignment) -> Result<()>;

    fn get(&self, id: &Uuid) -> Result<Option<Consignment>>;

    /// Set status and current branch; `None` when the id is unknown
    fn update_status(
        &mut self,
        id: &Uuid,
        status: ConsignmentStatus,
        branch: &str,
    ) -> Result<Option<Consignment>>;

    /// All consignments, oldest booking first
    fn list(&self) -> Result<Vec<Consignment>>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    consignments: HashMap<Uuid, Consignment>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.consignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.consignments.is_empty()
    }

    fn apply_status(
        &mut self,
        id: &Uuid,
        status: ConsignmentStatus,
        branch: &str,
    ) -> Option<Consignment> {
        let consignment = self.consignments.get_mut(id)?;
        consignment.status = status;
        consignment.branch = branch.to_string();
        Some(consignment.clone())
    }

    fn sorted(&self) -> Vec<Consignment> {
        let mut all: Vec<Consignment> = self.consignments.values().cloned().collect();
        all.sort_by(|a, b| a.booking_date.cmp(&b.booking_date).then(a.id.cmp(&b.id)));
        all
    }
}

impl ConsignmentStore for MemoryStore {
    fn insert(&mut self, consignment: Consignment) -> Result<()> {
        self.consignments.insert(consignment.id, consignment);
        Ok(())
    }

    fn get(&self, id: &Uuid) -> Result<Option<Consignment>> {
        Ok(self.consignments.get(id).cloned())
    }

    fn update_status(
        &mut self,
        id: &Uuid,
        status: ConsignmentStatus,
        branch: &str,
    ) -> Result<Option<Consignment>> {
        Ok(self.apply_status(id, status, branch))
    }

    fn list(&self) -> Result<Vec<Consignment>> {
        Ok(self.sorted())
    }
}

/// Whole-file JSON store: loaded on open, rewritten after every change
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonFileStore {
    /// Open the store, starting empty when the file is missing or blank
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut inner = MemoryStore::new();

        if path.exists() {
            let content = fs::read_to_string(&path)?;
            if !content.trim().is_empty() {
                let consignments: Vec<Consignment> = serde_json::from_str(&content)?;
                for consignment in consignments {
                    inner.consignments.insert(consignment.id, consignment);
                }
            }
        }

        crate::debug_println!(
            "Opened consignment store {} ({} records)",
            path.display(),
            inner.len()
        );
        Ok(Self { path, inner })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file the next snapshot is written to before replacing the store
    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self.inner.sorted())?;
        let staging = self.staging_path();
        fs::write(&staging, content)?;
        fs::rename(&staging, &self.path)?;
        Ok(())
    }
}

impl ConsignmentStore for JsonFileStore {
    fn insert(&mut self, consignment: Consignment) -> Result<()> {
        self.inner.insert(consignment)?;
        self.save()
    }

    fn get(&self, id: &Uuid) -> Result<Option<Consignment>> {
        self.inner.get(id)
    }

    fn update_status(
        &mut self,
        id: &Uuid,
        status: ConsignmentStatus,
        branch: &str,
    ) -> Result<Option<Consignment>> {
        let updated = self.inner.apply_status(id, status, branch);
        if updated.is_some() {
            self.save()?;
        }
        Ok(updated)
    }

    fn list(&self) -> Result<Vec<Consignment>> {
        self.inner.list()
    }
}
