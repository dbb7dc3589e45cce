//! Resource ledger - colony-level resource storage
//!
//! Reads are get-or-zero: a resource that was never recorded has 0.0.
//! Writes are insert-if-absent: adding to an unknown resource creates it at
//! 0.0 first, so new resource types need no registration. Quantities never
//! drop below zero: spending is all-or-nothing and draining clamps.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A mapping from resource name to a non-negative quantity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceLedger {
    amounts: BTreeMap<String, f64>,
}

impl ResourceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from `(name, amount)` pairs
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        let mut ledger = Self::new();
        for (name, amount) in pairs {
            ledger.add(name, amount);
        }
        ledger
    }

    /// Current amount of a resource (0.0 if never recorded)
    pub fn get(&self, resource: &str) -> f64 {
        self.amounts.get(resource).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, resource: &str) -> bool {
        self.amounts.contains_key(resource)
    }

    /// Add to a resource, creating it at 0.0 if absent
    ///
    /// A negative amount behaves like a drain and clamps at zero. The total
    /// saturates at `f64::MAX`; a NaN amount is ignored.
    pub fn add(&mut self, resource: &str, amount: f64) {
        if amount.is_nan() {
            return;
        }
        let entry = self.amounts.entry(resource.to_string()).or_insert(0.0);
        let sum = *entry + amount;
        *entry = if sum.is_finite() {
            sum.max(0.0)
        } else if sum > 0.0 {
            f64::MAX
        } else {
            0.0
        };
    }

    /// Overwrite a resource quantity, clamped at zero
    pub fn set(&mut self, resource: &str, amount: f64) {
        let value = if amount.is_finite() { amount.max(0.0) } else { 0.0 };
        self.amounts.insert(resource.to_string(), value);
    }

    /// Remove up to `amount`, returns the amount actually removed
    pub fn drain(&mut self, resource: &str, amount: f64) -> f64 {
        let entry = self.amounts.entry(resource.to_string()).or_insert(0.0);
        let removed = amount.max(0.0).min(*entry);
        *entry -= removed;
        removed
    }

    /// Check if every resource in `cost` is available in the required quantity
    pub fn has_enough(&self, cost: &ResourceLedger) -> bool {
        cost.iter().all(|(res, amount)| self.get(res) >= amount)
    }

    /// Deduct all of `cost`, or nothing at all if any resource is short
    pub fn spend(&mut self, cost: &ResourceLedger) -> bool {
        if !self.has_enough(cost) {
            return false;
        }
        for (res, amount) in cost.iter() {
            self.drain(res, amount);
        }
        true
    }

    /// Shortfall per resource for a cost that cannot be paid
    pub fn shortfall(&self, cost: &ResourceLedger) -> ResourceLedger {
        let mut missing = ResourceLedger::new();
        for (res, amount) in cost.iter() {
            let have = self.get(res);
            if have < amount {
                missing.add(res, amount - have);
            }
        }
        missing
    }

    /// Add every entry of `other` into this ledger
    pub fn absorb(&mut self, other: &ResourceLedger) {
        for (res, amount) in other.iter() {
            self.add(res, amount);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.amounts.iter().map(|(name, amount)| (name.as_str(), *amount))
    }

    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }
}

impl fmt::Display for ResourceLedger {
    /// Formats as "50.0 Minerals, 10.0 Energy"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "nothing");
        }
        let parts: Vec<String> = self
            .iter()
            .map(|(name, amount)| format!("{:.1} {}", amount, name))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}
