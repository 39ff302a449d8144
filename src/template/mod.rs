// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Advomail-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Advomail and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Email templates.
//!
//! Pure functions that turn a recipient, a tone and an optional subject override into a
//! [`RenderedEmail`]. Bracketed placeholders such as `[topic/issue]` are emitted literally for the
//! user to edit.

use std::fmt;

use crate::format::{party_label, region_label};
use crate::model::{Directory, PartyId, RegionCode};

mod tone;

pub use tone::{tone_line, ParseToneError, Tone};

/// Who the email is addressed to, with the identifiers the templates need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipient<'a> {
    Leader { party: &'a PartyId },
    Representative { region: &'a RegionCode, name: &'a str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub body: String,
}

impl RenderedEmail {
    /// The text shown in the output panel and used by the export actions.
    pub fn output_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RenderedEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Subject: {}\n\n{}", self.subject, self.body)
    }
}

pub fn leader_subject(directory: &Directory, party: &PartyId) -> String {
    let label = party_label(directory.parties(), party.as_str());
    format!("Request for meeting with {label} Party Leader")
}

pub fn leader_body(directory: &Directory, party: &PartyId, tone: Tone) -> String {
    let label = party_label(directory.parties(), party.as_str());
    let opening = with_tone_line(
        tone,
        "I'm writing to request a brief meeting to discuss [topic/issue] and its impact on our community.",
    );
    format!(
        "Dear {label} Party Leader,\n\
         \n\
         {opening}\n\
         \n\
         I'd appreciate the opportunity to share evidence-based considerations and potential solutions that could inform your party's policy priorities.\n\
         \n\
         Kind regards,\n\
         [Your Name]\n\
         [Affiliation, optional]"
    )
}

pub fn representative_subject(region: &RegionCode, name: &str) -> String {
    format!("Constituent request from {} for {name}", region_label(region.as_str()))
}

pub fn representative_body(region: &RegionCode, name: &str, tone: Tone) -> String {
    let region = region_label(region.as_str());
    let opening = with_tone_line(
        tone,
        &format!(
            "As a constituent from {region}, I'm writing regarding [topic/issue]. I'm seeking your support to address the following points:"
        ),
    );
    format!(
        "Dear {name},\n\
         \n\
         {opening}\n\
         • Point 1\n\
         • Point 2\n\
         • Point 3\n\
         \n\
         Thank you for your time and service.\n\
         \n\
         Sincerely,\n\
         [Your Name]\n\
         [Address / Postcode, optional]"
    )
}

/// Renders subject and body for `recipient`.
///
/// A non-blank `subject_override` replaces the computed subject (trimmed); the body always comes
/// from the template.
pub fn render(
    directory: &Directory,
    recipient: Recipient<'_>,
    tone: Tone,
    subject_override: &str,
) -> RenderedEmail {
    let (computed_subject, body) = match recipient {
        Recipient::Leader { party } => {
            (leader_subject(directory, party), leader_body(directory, party, tone))
        }
        Recipient::Representative { region, name } => {
            (representative_subject(region, name), representative_body(region, name, tone))
        }
    };

    let subject_override = subject_override.trim();
    let subject = if subject_override.is_empty() {
        computed_subject
    } else {
        subject_override.to_owned()
    };

    RenderedEmail { subject, body }
}

fn with_tone_line(tone: Tone, sentence: &str) -> String {
    let line = tone.opening_line();
    if line.is_empty() {
        sentence.to_owned()
    } else {
        format!("{line} {sentence}")
    }
}
