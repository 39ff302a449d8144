// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Advomail-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Advomail and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Startup data loading.
//!
//! Reads the representatives file (mandatory) and the parties file (optional) concurrently and
//! builds the read-only [`Directory`]. A missing or unusable parties file is replaced by the
//! configured fallback list. Individual records whose id is not usable are skipped with a warning.

use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::model::{Directory, Party, PartyId, RegionCode, Representative};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PartyRecord {
    pub id: String,
    pub label: String,
}

/// Only `name` is read; other fields in the file (such as `id`) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepresentativeRecord {
    pub name: String,
}

pub type RepresentativesFile = BTreeMap<String, Vec<RepresentativeRecord>>;

#[derive(Debug)]
pub enum LoadError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read {path:?}: {source}"),
            Self::Json { path, source } => write!(f, "invalid JSON in {path:?}: {source}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DataSource {
    representatives_path: PathBuf,
    parties_path: PathBuf,
    fallback_parties: Vec<Party>,
}

impl DataSource {
    pub fn new(
        representatives_path: impl Into<PathBuf>,
        parties_path: impl Into<PathBuf>,
        fallback_parties: Vec<Party>,
    ) -> Self {
        Self {
            representatives_path: representatives_path.into(),
            parties_path: parties_path.into(),
            fallback_parties,
        }
    }

    /// Loads both resources once. Only a representatives failure is an error.
    pub async fn load(&self) -> Result<Directory, LoadError> {
        let (representatives, parties) = tokio::join!(
            tokio::fs::read(&self.representatives_path),
            tokio::fs::read(&self.parties_path),
        );

        let representatives = representatives.map_err(|source| LoadError::Io {
            path: self.representatives_path.clone(),
            source,
        })?;
        let representatives_by_region =
            parse_representatives(&self.representatives_path, &representatives)?;

        let parties = match parties
            .map_err(|source| LoadError::Io {
                path: self.parties_path.clone(),
                source,
            })
            .and_then(|bytes| parse_parties(&self.parties_path, &bytes))
        {
            Ok(parties) => parties,
            Err(err) => {
                tracing::warn!(error = %err, "parties unavailable; using fallback list");
                self.fallback_parties.clone()
            }
        };

        tracing::info!(
            parties = parties.len(),
            regions = representatives_by_region.len(),
            "loaded directory"
        );
        Ok(Directory::new(parties, representatives_by_region))
    }

    /// Runs [`DataSource::load`] on a fresh current-thread runtime.
    pub fn load_blocking(&self) -> Result<Directory, Box<dyn std::error::Error>> {
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
        Ok(runtime.block_on(self.load())?)
    }
}

pub fn parse_representatives(
    path: &Path,
    bytes: &[u8],
) -> Result<BTreeMap<RegionCode, Vec<Representative>>, LoadError> {
    let file: RepresentativesFile =
        serde_json::from_slice(bytes).map_err(|source| LoadError::Json {
            path: path.to_owned(),
            source,
        })?;

    let mut out = BTreeMap::new();
    for (code, records) in file {
        let region = match RegionCode::new(code.as_str()) {
            Ok(region) => region,
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    code = ?code,
                    error = %err,
                    "skipping region"
                );
                continue;
            }
        };
        let representatives =
            records.into_iter().map(|record| Representative::new(record.name)).collect();
        out.insert(region, representatives);
    }
    Ok(out)
}

pub fn parse_parties(path: &Path, bytes: &[u8]) -> Result<Vec<Party>, LoadError> {
    let records: Vec<PartyRecord> =
        serde_json::from_slice(bytes).map_err(|source| LoadError::Json {
            path: path.to_owned(),
            source,
        })?;

    Ok(records
        .into_iter()
        .filter_map(|record| match PartyId::new(record.id.as_str()) {
            Ok(id) => Some(Party::new(id, record.label)),
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    id = ?record.id,
                    error = %err,
                    "skipping party"
                );
                None
            }
        })
        .collect())
}

#[cfg(test)]
mod tests;
