// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Advomail-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Advomail and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Runtime configuration.
//!
//! Command-line overrides win over environment variables, which win over built-in defaults.

use std::env;
use std::error::Error;
use std::fmt;
use std::path::PathBuf;

use crate::data::DataSource;
use crate::model::{Party, PartyId};
use crate::template::Tone;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const REPRESENTATIVES_FILE: &str = "politicians.json";
pub const PARTIES_FILE: &str = "parties.json";
pub const DEFAULT_LOG_FILTER: &str = "advomail=info";

const ENV_DATA_DIR: &str = "ADVOMAIL_DATA_DIR";
const ENV_FALLBACK_PARTIES: &str = "ADVOMAIL_FALLBACK_PARTIES";
const ENV_MAIL_OPENER: &str = "ADVOMAIL_MAIL_OPENER";
const ENV_TONE: &str = "ADVOMAIL_TONE";
const ENV_LOG: &str = "ADVOMAIL_LOG";
const ENV_LOG_FILE: &str = "ADVOMAIL_LOG_FILE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub representatives_path: PathBuf,
    pub parties_path: PathBuf,
    /// Parties used when the parties file cannot be read.
    pub fallback_parties: Vec<Party>,
    pub default_tone: Tone,
    /// Shell command the `mailto:` URI is appended to; platform opener when unset.
    pub mail_opener: Option<String>,
    pub log_filter: String,
    pub log_file: PathBuf,
}

/// Values given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub data_dir: Option<PathBuf>,
    pub representatives: Option<PathBuf>,
    pub parties: Option<PathBuf>,
    pub tone: Option<Tone>,
}

impl AppConfig {
    pub fn from_env(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        Self::resolve(overrides, |name| env::var(name).ok())
    }

    pub fn resolve(
        overrides: ConfigOverrides,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let lookup = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let data_dir = overrides
            .data_dir
            .or_else(|| lookup(ENV_DATA_DIR).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let fallback_parties = match lookup(ENV_FALLBACK_PARTIES) {
            Some(raw) => parse_fallback_parties(&raw).map_err(|reason| ConfigError::InvalidEnv {
                name: ENV_FALLBACK_PARTIES.to_owned(),
                value: raw.clone(),
                reason,
            })?,
            None => default_fallback_parties(),
        };

        let default_tone = match overrides.tone {
            Some(tone) => tone,
            None => match lookup(ENV_TONE) {
                Some(raw) => raw.trim().parse().map_err(|err: crate::template::ParseToneError| {
                    ConfigError::InvalidEnv {
                        name: ENV_TONE.to_owned(),
                        value: raw.clone(),
                        reason: err.to_string(),
                    }
                })?,
                None => Tone::default(),
            },
        };

        Ok(Self {
            representatives_path: overrides
                .representatives
                .unwrap_or_else(|| data_dir.join(REPRESENTATIVES_FILE)),
            parties_path: overrides.parties.unwrap_or_else(|| data_dir.join(PARTIES_FILE)),
            fallback_parties,
            default_tone,
            mail_opener: lookup(ENV_MAIL_OPENER),
            log_filter: lookup(ENV_LOG).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_owned()),
            log_file: lookup(ENV_LOG_FILE)
                .map(PathBuf::from)
                .unwrap_or_else(|| env::temp_dir().join("advomail.log")),
        })
    }

    pub fn data_source(&self) -> DataSource {
        DataSource::new(
            self.representatives_path.clone(),
            self.parties_path.clone(),
            self.fallback_parties.clone(),
        )
    }
}

pub fn default_fallback_parties() -> Vec<Party> {
    [("partyA", "Party A"), ("partyB", "Party B"), ("partyC", "Party C")]
        .into_iter()
        .map(|(id, label)| Party::new(PartyId::from_static(id), label))
        .collect()
}

/// Parses `id=Label,id=Label`.
pub fn parse_fallback_parties(raw: &str) -> Result<Vec<Party>, String> {
    let mut parties = Vec::new();
    for entry in raw.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
        let Some((id, label)) = entry.split_once('=') else {
            return Err(format!("expected id=Label, got `{entry}`"));
        };
        let id = PartyId::new(id.trim()).map_err(|err| format!("`{entry}`: {err}"))?;
        let label = label.trim();
        if label.is_empty() {
            return Err(format!("`{entry}`: label must not be empty"));
        }
        parties.push(Party::new(id, label));
    }
    if parties.is_empty() {
        return Err("at least one party is required".to_owned());
    }
    Ok(parties)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidEnv {
        name: String,
        value: String,
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEnv {
                name,
                value,
                reason,
            } => write!(f, "invalid env {name}={value} ({reason})"),
        }
    }
}

impl Error for ConfigError {}
