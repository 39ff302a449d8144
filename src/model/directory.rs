// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Advomail-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Advomail and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use super::ids::{PartyId, RegionCode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Party {
    id: PartyId,
    label: String,
}

impl Party {
    pub fn new(id: PartyId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }

    pub fn id(&self) -> &PartyId {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Representative {
    name: String,
}

impl Representative {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Everything loaded at startup: the party list and representatives grouped by region.
///
/// Read-only once built. Regions iterate in code order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    parties: Vec<Party>,
    representatives_by_region: BTreeMap<RegionCode, Vec<Representative>>,
}

impl Directory {
    pub fn new(
        parties: Vec<Party>,
        representatives_by_region: BTreeMap<RegionCode, Vec<Representative>>,
    ) -> Self {
        Self {
            parties,
            representatives_by_region,
        }
    }

    pub fn parties(&self) -> &[Party] {
        &self.parties
    }

    /// Whether `region` is a key of the mapping, even with no representatives.
    pub fn contains_region(&self, region: &str) -> bool {
        self.representatives_by_region.contains_key(region)
    }

    pub fn region_codes(&self) -> impl Iterator<Item = &RegionCode> + '_ {
        self.representatives_by_region.keys()
    }

    /// Representatives for `region`, or an empty slice for a code that is not in the mapping.
    pub fn representatives_in(&self, region: &str) -> &[Representative] {
        self.representatives_by_region.get(region).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn representatives_sorted(&self, region: &str) -> Vec<&Representative> {
        let mut out = self.representatives_in(region).iter().collect::<Vec<_>>();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        out
    }
}
