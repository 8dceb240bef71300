// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeSet;

use crate::ClaimId;

/// Claims marked for a report or invoice. Survives table re-renders and
/// filter resets; lives only as long as the dashboard session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: BTreeSet<ClaimId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `id` and returns whether it is now selected.
    pub fn toggle(&mut self, id: ClaimId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    /// Returns `true` when `id` was not selected before.
    pub fn insert(&mut self, id: ClaimId) -> bool {
        self.ids.insert(id)
    }

    pub fn contains(&self, id: ClaimId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ClaimId> + '_ {
        self.ids.iter().copied()
    }

    /// Comma-joined ids in ascending order, the `claim_ids` wire format.
    pub fn joined(&self) -> String {
        self.ids
            .iter()
            .map(ClaimId::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl FromIterator<ClaimId> for SelectionSet {
    fn from_iter<T: IntoIterator<Item = ClaimId>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
