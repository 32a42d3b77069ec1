//! Registry Service
//!
//! Orchestrates admin authority, record storage and the height oracle to
//! implement the public registry operations.
//!
//! ## Per-account lifecycle
//!
//! ```text
//! Absent ──register──▶ Active ──reject──▶ Rejected
//!                       │  ▲               │  ▲
//!                       └──┘ update        └──┘ reject (re-stamp)
//! ```
//!
//! - `Absent` is never re-entered: records are not deleted.
//! - `Rejected` is terminal. Registration is gated on key presence, so a
//!   rejected account cannot register again under the same key.
//!
//! ## Atomicity
//!
//! Every guard is checked before the oracle is read or anything is written.
//! A failed operation leaves records and admin untouched.

use crate::{
    authority::AdminAuthority,
    env::HeightOracle,
    error::RegistryError,
    store::{MaisonStore, MemoryStore},
    types::{AccountKey, Maison},
};

/// Maison registry state machine.
pub struct RegistryService<H, S = MemoryStore>
where
    H: HeightOracle,
    S: MaisonStore,
{
    /// Holder of admin rights
    authority: AdminAuthority,
    /// Record storage
    store: S,
    /// Source of `updated_at`
    oracle: H,
}

impl<H> RegistryService<H, MemoryStore>
where
    H: HeightOracle,
{
    /// Create an empty in-memory registry administered by `admin`.
    pub fn with_admin(admin: impl Into<AccountKey>, oracle: H) -> Self {
        Self::new(AdminAuthority::new(admin), MemoryStore::new(), oracle)
    }
}

impl<H, S> RegistryService<H, S>
where
    H: HeightOracle,
    S: MaisonStore,
{
    /// Create a registry from its collaborators.
    pub fn new(authority: AdminAuthority, store: S, oracle: H) -> Self {
        Self { authority, store, oracle }
    }

    /// Admin authority.
    pub fn authority(&self) -> &AdminAuthority {
        &self.authority
    }

    /// Record storage.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Check whether `caller` currently holds admin rights.
    pub fn is_admin(&self, caller: &AccountKey) -> bool {
        self.authority.is_admin(caller)
    }

    /// Register a new maison for `caller`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::AlreadyRegistered` if `caller` already has a
    /// record, including a rejected one.
    pub fn register_maison(
        &mut self,
        caller: &AccountKey,
        name: impl Into<String>,
        cid: impl Into<String>,
    ) -> Result<(), RegistryError> {
        if self.store.contains(caller) {
            return Err(RegistryError::AlreadyRegistered { account: caller.clone() });
        }

        let height = self.oracle.current_height();
        self.store.put(caller.clone(), Maison::active(name, cid, height));

        tracing::debug!(account = %caller, height, "maison registered");
        Ok(())
    }

    /// Replace `caller`'s record with a fresh active one.
    ///
    /// This is a full replace, not a merge: fields the caller wants to keep
    /// must be supplied again.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NotFound` if `caller` has no record.
    /// Returns `RegistryError::Rejected` if the record has been rejected.
    pub fn update_maison(
        &mut self,
        caller: &AccountKey,
        name: impl Into<String>,
        cid: impl Into<String>,
    ) -> Result<(), RegistryError> {
        let existing = self
            .store
            .get(caller)
            .ok_or_else(|| RegistryError::NotFound { account: caller.clone() })?;
        if existing.rejected {
            return Err(RegistryError::Rejected { account: caller.clone() });
        }

        let height = self.oracle.current_height();
        self.store.put(caller.clone(), Maison::active(name, cid, height));

        tracing::debug!(account = %caller, height, "maison updated");
        Ok(())
    }

    /// Reject `target`'s record. Admin only.
    ///
    /// `name` and `cid` are preserved. Rejecting an already rejected record
    /// succeeds and only re-stamps `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Unauthorized` if `caller` is not the admin.
    /// Returns `RegistryError::NotFound` if `target` has no record.
    pub fn reject_maison(
        &mut self,
        caller: &AccountKey,
        target: &AccountKey,
    ) -> Result<(), RegistryError> {
        if !self.authority.is_admin(caller) {
            tracing::warn!(caller = %caller, account = %target, "reject attempted by non-admin");
            return Err(RegistryError::Unauthorized { caller: caller.clone() });
        }

        let existing = self
            .store
            .get(target)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound { account: target.clone() })?;

        let height = self.oracle.current_height();
        self.store.put(target.clone(), existing.into_rejected(height));

        tracing::info!(account = %target, height, "maison rejected");
        Ok(())
    }

    /// Hand admin rights to `new_admin`.
    ///
    /// Takes effect immediately: the old admin loses privileged rights for
    /// every subsequent call.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Unauthorized` if `caller` is not the admin.
    pub fn transfer_admin(
        &mut self,
        caller: &AccountKey,
        new_admin: impl Into<AccountKey>,
    ) -> Result<(), RegistryError> {
        let new_admin = new_admin.into();
        if let Err(err) = self.authority.transfer(caller, new_admin.clone()) {
            tracing::warn!(caller = %caller, "admin transfer attempted by non-admin");
            return Err(err);
        }

        tracing::info!(from = %caller, to = %new_admin, "admin transferred");
        Ok(())
    }

    /// Whether `account` has an active record. Absent yields `false`.
    pub fn is_registered(&self, account: &AccountKey) -> bool {
        self.store.get(account).is_some_and(|m| m.registered)
    }

    /// Whether `account` has a rejected record. Absent yields `false`.
    pub fn is_rejected(&self, account: &AccountKey) -> bool {
        self.store.get(account).is_some_and(|m| m.rejected)
    }

    /// Record for `account`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NotFound` if `account` has no record.
    pub fn get_maison(&self, account: &AccountKey) -> Result<Maison, RegistryError> {
        self.store
            .get(account)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound { account: account.clone() })
    }
}

impl<H, S> std::fmt::Debug for RegistryService<H, S>
where
    H: HeightOracle,
    S: MaisonStore,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryService")
            .field("admin", self.authority.admin())
            .field("maison_count", &self.store.len())
            .finish_non_exhaustive()
    }
}
