use tracing::{debug, info, warn};

use crate::core::clock::{Clock, SystemClock};
use crate::core::metrics::{self, Completion};
use crate::domain::{format_timestamp, normalize_name, SavingsJar};
use crate::errors::{JarError, Result};
use crate::storage::JarStorage;

/// One row of the jar listing: the record plus its derived metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JarOverview {
    /// 1-based position in [`JarStore::list`].
    pub index: usize,
    pub jar: SavingsJar,
    pub complete: bool,
    pub percent: u8,
    pub completion: Completion,
}

impl JarOverview {
    fn from_jar(index: usize, jar: SavingsJar) -> Self {
        Self {
            index,
            complete: metrics::is_complete(&jar),
            percent: metrics::progress_percent(&jar),
            completion: metrics::days_to_completion(&jar),
            jar,
        }
    }
}

/// Durable mapping from jar name to [`SavingsJar`].
///
/// Every mutation goes through [`JarStore::write`], which stamps `updated_at`
/// and keeps the original `created_at`. Each call persists before returning.
pub struct JarStore {
    storage: Box<dyn JarStorage>,
    clock: Box<dyn Clock>,
}

impl JarStore {
    pub fn new(storage: Box<dyn JarStorage>) -> Self {
        Self::with_clock(storage, Box::new(SystemClock))
    }

    pub fn with_clock(storage: Box<dyn JarStorage>, clock: Box<dyn Clock>) -> Self {
        Self { storage, clock }
    }

    pub fn storage(&self) -> &dyn JarStorage {
        self.storage.as_ref()
    }

    /// Jar names in ascending order.
    pub fn list(&self) -> Result<Vec<String>> {
        self.storage.keys()
    }

    pub fn exists(&self, name: &str) -> Result<bool> {
        let name = normalize_name(name)?;
        self.storage.contains(&name)
    }

    /// Creates an empty jar. Fails with [`JarError::DuplicateName`] when the
    /// name is taken.
    pub fn create(&self, name: &str, target: u64) -> Result<SavingsJar> {
        let name = normalize_name(name)?;
        if self.storage.contains(&name)? {
            return Err(JarError::DuplicateName(name));
        }
        let jar = SavingsJar::new(name.clone(), target, self.clock.now());
        self.commit(&name, &jar)?;
        info!(jar = %name, target, "jar created");
        Ok(jar)
    }

    pub fn read(&self, name: &str) -> Result<SavingsJar> {
        let name = normalize_name(name)?;
        self.load(&name)?.ok_or(JarError::NotFound(name))
    }

    /// Upserts `jar` under `name`.
    ///
    /// A prior record's `created_at` wins over the one carried by `jar`;
    /// `updated_at` is always set to now.
    pub fn write(&self, name: &str, jar: &SavingsJar) -> Result<SavingsJar> {
        let name = normalize_name(name)?;
        let prior_created = self.load(&name)?.map(|prior| prior.created_at);
        self.stamp_and_commit(&name, jar, prior_created)
    }

    /// Moves a jar to a new name, keeping every field and refreshing
    /// `updated_at`.
    ///
    /// When the old record cannot be removed, the new one is removed again so the
    /// jar stays under its old name only.
    pub fn rename(&self, old: &str, new: &str) -> Result<SavingsJar> {
        let old = normalize_name(old)?;
        let new = normalize_name(new)?;
        let jar = self.load(&old)?.ok_or_else(|| JarError::NotFound(old.clone()))?;
        if old == new {
            return self.stamp_and_commit(&new, &jar, Some(jar.created_at.clone()));
        }
        if self.storage.contains(&new)? {
            return Err(JarError::DuplicateName(new));
        }
        let renamed = self.stamp_and_commit(&new, &jar, Some(jar.created_at.clone()))?;
        if let Err(err) = self.storage.remove(&old) {
            if let Err(rollback) = self.storage.remove(&new) {
                warn!(from = %old, to = %new, %rollback, "rename left both records behind");
            }
            return Err(err);
        }
        info!(from = %old, to = %new, "jar renamed");
        Ok(renamed)
    }

    pub fn delete(&self, name: &str) -> Result<()> {
        let name = normalize_name(name)?;
        if !self.storage.remove(&name)? {
            return Err(JarError::NotFound(name));
        }
        info!(jar = %name, "jar deleted");
        Ok(())
    }

    pub fn deposit(&self, name: &str, amount: u64) -> Result<SavingsJar> {
        self.update(name, |jar| jar.deposit(amount))
    }

    /// Withdraws up to the current balance; the balance never goes negative.
    pub fn withdraw(&self, name: &str, amount: u64) -> Result<SavingsJar> {
        self.update(name, |jar| jar.withdraw(amount))
    }

    pub fn retarget(&self, name: &str, target: u64) -> Result<SavingsJar> {
        self.update(name, |jar| jar.target = target)
    }

    /// Reads every jar in listing order together with its metrics.
    pub fn overview(&self) -> Result<Vec<JarOverview>> {
        self.list()?
            .into_iter()
            .enumerate()
            .map(|(idx, name)| Ok(JarOverview::from_jar(idx + 1, self.read(&name)?)))
            .collect()
    }

    fn update<F>(&self, name: &str, mutate: F) -> Result<SavingsJar>
    where
        F: FnOnce(&mut SavingsJar),
    {
        let mut jar = self.read(name)?;
        mutate(&mut jar);
        let name = jar.name.clone();
        self.write(&name, &jar)
    }

    fn load(&self, name: &str) -> Result<Option<SavingsJar>> {
        let Some(bytes) = self.storage.get(name)? else {
            return Ok(None);
        };
        let mut jar: SavingsJar = serde_json::from_slice(&bytes)
            .map_err(|err| JarError::Storage(format!("jar `{}` is unreadable: {}", name, err)))?;
        jar.name = name.to_string();
        debug!(jar = %name, "jar loaded");
        Ok(Some(jar))
    }

    fn stamp_and_commit(
        &self,
        name: &str,
        jar: &SavingsJar,
        prior_created: Option<String>,
    ) -> Result<SavingsJar> {
        let now = format_timestamp(self.clock.now());
        let created_at = prior_created
            .filter(|created| !created.trim().is_empty())
            .unwrap_or_else(|| now.clone());
        let stored = SavingsJar {
            name: name.to_string(),
            target: jar.target,
            current: jar.current,
            created_at,
            updated_at: now,
        };
        self.commit(name, &stored)?;
        info!(
            jar = %name,
            current = stored.current,
            target = stored.target,
            "jar written"
        );
        Ok(stored)
    }

    fn commit(&self, name: &str, jar: &SavingsJar) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(jar)?;
        self.storage.put(name, &bytes)
    }
}
