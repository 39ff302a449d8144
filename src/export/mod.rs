// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Advomail-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Advomail and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Exporting rendered output: clipboard copy and `mailto:` handoff.
//!
//! Both actions work on the rendered output text (`Subject: <subject>\n\n<body>`), not on the
//! selection that produced it.

use std::fmt;
use std::io;
use std::sync::OnceLock;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;

mod clipboard;
mod launcher;

pub use clipboard::{copy_with_fallback, Clipboard, CopyPath, Osc52Clipboard, SystemClipboard};
pub use launcher::{MailLauncher, SystemMailLauncher};

/// Subject used when the output text does not follow the rendered format.
pub const DEFAULT_SUBJECT: &str = "Re:";

/// Characters `encodeURIComponent` leaves as they are.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedOutput {
    pub subject: String,
    pub body: String,
}

#[derive(Debug)]
pub enum ExportError {
    Io(io::Error),
    Spawn { command: String, source: io::Error },
    Status { command: String, status: String },
    Unsupported(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(source) => write!(f, "io error: {source}"),
            Self::Spawn { command, source } => write!(f, "failed to run `{command}`: {source}"),
            Self::Status { command, status } => write!(f, "`{command}` exited with {status}"),
            Self::Unsupported(reason) => f.write_str(reason),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(source) => Some(source),
            Self::Spawn { source, .. } => Some(source),
            Self::Status { .. } | Self::Unsupported(_) => None,
        }
    }
}

impl From<io::Error> for ExportError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

fn output_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // The subject stops at any line terminator, `\r` included.
    PATTERN.get_or_init(|| {
        Regex::new(r"\ASubject:\s*([^\r\n\x{2028}\x{2029}]*)\n\n((?s:.*))\z")
            .expect("rendered output pattern")
    })
}

/// Splits rendered output into subject and body.
///
/// Text that does not start with `Subject:` followed by a blank line becomes the body as a
/// whole, with [`DEFAULT_SUBJECT`].
pub fn parse_output(text: &str) -> ParsedOutput {
    match output_pattern().captures(text) {
        Some(caps) => ParsedOutput {
            subject: caps.get(1).map_or("", |m| m.as_str()).to_owned(),
            body: caps.get(2).map_or("", |m| m.as_str()).to_owned(),
        },
        None => ParsedOutput {
            subject: DEFAULT_SUBJECT.to_owned(),
            body: text.to_owned(),
        },
    }
}

/// Percent-encodes `value` the way `encodeURIComponent` does.
pub fn encode_uri_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Builds `mailto:?subject=…&body=…` from rendered output text.
pub fn mailto_uri(output_text: &str) -> String {
    let parsed = parse_output(output_text);
    format!(
        "mailto:?subject={}&body={}",
        encode_uri_component(&parsed.subject),
        encode_uri_component(&parsed.body)
    )
}
