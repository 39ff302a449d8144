// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Advomail-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Advomail and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tone {
    #[default]
    Formal,
    Neutral,
    Friendly,
    Concise,
}

impl Tone {
    pub const ALL: [Tone; 4] = [Tone::Formal, Tone::Neutral, Tone::Friendly, Tone::Concise];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Formal => "formal",
            Self::Neutral => "neutral",
            Self::Friendly => "friendly",
            Self::Concise => "concise",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Formal => "Formal",
            Self::Neutral => "Neutral",
            Self::Friendly => "Friendly",
            Self::Concise => "Concise",
        }
    }

    /// Sentence that opens the body. Empty for [`Tone::Concise`].
    pub fn opening_line(self) -> &'static str {
        match self {
            Self::Formal => "I hope this message finds you well.",
            Self::Neutral => "I hope you're well.",
            Self::Friendly => "Hope you're doing well!",
            Self::Concise => "",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|tone| *tone == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|tone| *tone == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseToneError {
    value: String,
}

impl fmt::Display for ParseToneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown tone `{}` (expected formal, neutral, friendly or concise)",
            self.value
        )
    }
}

impl std::error::Error for ParseToneError {}

impl FromStr for Tone {
    type Err = ParseToneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|tone| tone.as_str() == s).ok_or_else(|| ParseToneError {
            value: s.to_owned(),
        })
    }
}

/// Opening sentence for a raw tone id; unrecognised ids yield an empty line.
pub fn tone_line(tone: &str) -> &'static str {
    tone.parse::<Tone>().map(Tone::opening_line).unwrap_or("")
}
