//! Fuzz target for the [`RegistryService`] state machine
//!
//! Prevent moderation bypass via unexpected call sequences
//!
//! # Strategy
//!
//! - Call sequences: Arbitrary registrations, updates, rejections and admin
//!   transfers from a small pool of identities
//! - Height movement: Advance the oracle between calls
//! - State probing: Re-register and update after rejection
//!
//! # Invariants
//!
//! - `registered` and `rejected` are never both set
//! - No transition FROM `Rejected` (terminal invariant)
//! - A failed call mutates nothing, admin included
//! - `updated_at` never decreases for a key
//! - NEVER panic on any call

#![no_main]

use std::{cell::Cell, collections::HashMap};

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use maison_core::{AccountKey, HeightOracle, Maison, MaisonStatus, MaisonStore, RegistryService};

struct FuzzHeight<'a>(&'a Cell<u64>);

impl HeightOracle for FuzzHeight<'_> {
    fn current_height(&self) -> u64 {
        self.0.get()
    }
}

#[derive(Debug, Clone, Arbitrary)]
enum RegistryEvent {
    Register { caller: u8, name: String, cid: String },
    Update { caller: u8, name: String, cid: String },
    Reject { caller: u8, target: u8 },
    TransferAdmin { caller: u8, new_admin: u8 },
    Advance { blocks: u16 },
}

/// Fuzz input with deterministic genesis height.
#[derive(Debug, Clone, Arbitrary)]
struct FuzzInput {
    /// Starting height.
    genesis: u32,
    /// Event sequence to process.
    events: Vec<RegistryEvent>,
}

fn key(id: u8) -> AccountKey {
    AccountKey::new(format!("ST{}", id % 8))
}

fn snapshot(registry: &RegistryService<FuzzHeight<'_>>) -> (AccountKey, HashMap<AccountKey, Maison>) {
    let records = registry
        .store()
        .accounts()
        .into_iter()
        .filter_map(|k| registry.get_maison(&k).ok().map(|m| (k, m)))
        .collect();
    (registry.authority().admin().clone(), records)
}

fuzz_target!(|input: FuzzInput| {
    let height = Cell::new(u64::from(input.genesis));
    let mut registry = RegistryService::with_admin(key(0), FuzzHeight(&height));

    for event in input.events {
        let before = snapshot(&registry);

        let result = match event {
            RegistryEvent::Register { caller, name, cid } => {
                registry.register_maison(&key(caller), name, cid)
            },
            RegistryEvent::Update { caller, name, cid } => {
                registry.update_maison(&key(caller), name, cid)
            },
            RegistryEvent::Reject { caller, target } => {
                registry.reject_maison(&key(caller), &key(target))
            },
            RegistryEvent::TransferAdmin { caller, new_admin } => {
                registry.transfer_admin(&key(caller), key(new_admin))
            },
            RegistryEvent::Advance { blocks } => {
                height.set(height.get().saturating_add(u64::from(blocks)));
                Ok(())
            },
        };

        let after = snapshot(&registry);

        if result.is_err() {
            assert_eq!(before, after, "failed call mutated state");
        }

        for (account, old) in &before.1 {
            let Some(new) = after.1.get(account) else {
                panic!("record for {account} disappeared");
            };
            if old.status() == MaisonStatus::Rejected {
                assert_eq!(
                    new.status(),
                    MaisonStatus::Rejected,
                    "{account} left the Rejected state"
                );
                assert_eq!((&old.name, &old.cid), (&new.name, &new.cid));
            }
            assert!(new.updated_at >= old.updated_at, "updated_at went backwards for {account}");
        }

        for (account, maison) in &after.1 {
            assert!(
                !(maison.registered && maison.rejected),
                "{account} is both registered and rejected"
            );
        }
    }
});
