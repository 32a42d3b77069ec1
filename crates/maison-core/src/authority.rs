//! Admin authority.
//!
//! Holds the single privileged identity. The initial admin is supplied at
//! construction; afterwards it only changes through `transfer`.

use crate::{error::RegistryError, types::AccountKey};

/// Owner of the admin identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminAuthority {
    admin: AccountKey,
}

impl AdminAuthority {
    /// Create an authority with the given initial admin.
    pub fn new(admin: impl Into<AccountKey>) -> Self {
        Self { admin: admin.into() }
    }

    /// Current admin.
    pub fn admin(&self) -> &AccountKey {
        &self.admin
    }

    /// Check whether `caller` is the current admin.
    pub fn is_admin(&self, caller: &AccountKey) -> bool {
        *caller == self.admin
    }

    /// Hand admin rights to `new_admin`.
    ///
    /// `new_admin` is not validated; transferring to the current admin is a
    /// no-op that still succeeds.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Unauthorized` if `caller` is not the admin. The
    /// admin is left unchanged.
    pub fn transfer(
        &mut self,
        caller: &AccountKey,
        new_admin: AccountKey,
    ) -> Result<(), RegistryError> {
        if !self.is_admin(caller) {
            return Err(RegistryError::Unauthorized { caller: caller.clone() });
        }

        self.admin = new_admin;
        Ok(())
    }
}
