// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Advomail-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Advomail and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Selection state machine.
//!
//! [`ComposerState`] is the single application-state object: the loaded [`Directory`], the
//! user's [`Selection`] and the last rendered email. All transitions are synchronous methods on
//! it, and panel visibility is derived from it by [`visibility`], so the whole flow can be driven
//! without a terminal.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::choice::ChoiceOption;
use crate::format::region_label;
use crate::model::{Directory, PartyId, RegionCode};
use crate::template::{render, Recipient, RenderedEmail, Tone};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Leader,
    Representative,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Leader, Category::Representative];

    /// Wire id used on the command line (`leader` / `mp`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Leader => "leader",
            Self::Representative => "mp",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Leader => "Party leader",
            Self::Representative => "Elected representative (MP)",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCategoryError {
    value: String,
}

impl fmt::Display for ParseCategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category `{}` (expected leader or mp)", self.value)
    }
}

impl std::error::Error for ParseCategoryError {}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|category| category.as_str() == s).ok_or_else(|| {
            ParseCategoryError {
                value: s.to_owned(),
            }
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    category: Option<Category>,
    party: Option<PartyId>,
    region: Option<RegionCode>,
    representative: Option<String>,
    tone: Tone,
    subject_override: String,
}

impl Selection {
    pub fn with_tone(tone: Tone) -> Self {
        Self {
            tone,
            ..Self::default()
        }
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn party(&self) -> Option<&PartyId> {
        self.party.as_ref()
    }

    pub fn region(&self) -> Option<&RegionCode> {
        self.region.as_ref()
    }

    pub fn representative(&self) -> Option<&str> {
        self.representative.as_deref()
    }

    pub fn tone(&self) -> Tone {
        self.tone
    }

    pub fn subject_override(&self) -> &str {
        &self.subject_override
    }

    pub fn flow_state(&self) -> FlowState {
        match self.category {
            None => FlowState::NoCategory,
            Some(Category::Leader) => FlowState::Leader(match self.party {
                None => LeaderStage::PartyUnselected,
                Some(_) => LeaderStage::PartySelected,
            }),
            Some(Category::Representative) => {
                FlowState::Representative(match (&self.region, &self.representative) {
                    (None, _) => RepresentativeStage::RegionUnselected,
                    (Some(_), None) => RepresentativeStage::RepresentativeUnselected,
                    (Some(_), Some(_)) => RepresentativeStage::RepresentativeSelected,
                })
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        self.flow_state().is_complete()
    }

    /// The recipient of a fully selected flow.
    pub fn recipient(&self) -> Option<Recipient<'_>> {
        match self.category? {
            Category::Leader => Some(Recipient::Leader {
                party: self.party.as_ref()?,
            }),
            Category::Representative => Some(Recipient::Representative {
                region: self.region.as_ref()?,
                name: self.representative.as_deref()?,
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    NoCategory,
    Leader(LeaderStage),
    Representative(RepresentativeStage),
}

impl FlowState {
    pub fn is_complete(self) -> bool {
        matches!(
            self,
            Self::Leader(LeaderStage::PartySelected)
                | Self::Representative(RepresentativeStage::RepresentativeSelected)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderStage {
    PartyUnselected,
    PartySelected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepresentativeStage {
    RegionUnselected,
    RepresentativeUnselected,
    RepresentativeSelected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    WrongCategory {
        expected: Category,
        actual: Option<Category>,
    },
    RegionRequired,
    Incomplete(FlowState),
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongCategory { expected, actual } => match actual {
                Some(actual) => write!(f, "expected category {expected}, got {actual}"),
                None => write!(f, "expected category {expected}, no category selected"),
            },
            Self::RegionRequired => f.write_str("select a region first"),
            Self::Incomplete(FlowState::NoCategory) => f.write_str("select a recipient type first"),
            Self::Incomplete(FlowState::Leader(_)) => f.write_str("select a party first"),
            Self::Incomplete(FlowState::Representative(RepresentativeStage::RegionUnselected)) => {
                f.write_str("select a region first")
            }
            Self::Incomplete(FlowState::Representative(_)) => {
                f.write_str("select a representative first")
            }
        }
    }
}

impl std::error::Error for TransitionError {}

/// UI regions whose visibility depends on the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Panel {
    Party,
    Region,
    Representative,
    Options,
    Generate,
    Output,
}

pub type Visibility = BTreeSet<Panel>;

pub struct ComposerState {
    directory: Directory,
    selection: Selection,
    output: Option<RenderedEmail>,
}

impl ComposerState {
    pub fn new(directory: Directory) -> Self {
        Self::with_tone(directory, Tone::default())
    }

    pub fn with_tone(directory: Directory, tone: Tone) -> Self {
        Self {
            directory,
            selection: Selection::with_tone(tone),
            output: None,
        }
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn output(&self) -> Option<&RenderedEmail> {
        self.output.as_ref()
    }

    pub fn flow_state(&self) -> FlowState {
        self.selection.flow_state()
    }

    /// Switches the recipient type. Every dependent field, the subject override and any
    /// rendered output are reset, even when `category` equals the current one.
    pub fn select_category(&mut self, category: Option<Category>) {
        tracing::debug!(category = ?category, "select category");
        let tone = self.selection.tone;
        self.selection = Selection {
            category,
            tone,
            ..Selection::default()
        };
        self.output = None;
    }

    pub fn select_party(&mut self, party: PartyId) -> Result<(), TransitionError> {
        self.expect_category(Category::Leader)?;
        tracing::debug!(party = %party, "select party");
        self.selection.party = Some(party);
        self.output = None;
        Ok(())
    }

    /// Selects a region and resets the representative, whose choices now come from this region.
    pub fn select_region(&mut self, region: RegionCode) -> Result<(), TransitionError> {
        self.expect_category(Category::Representative)?;
        tracing::debug!(region = %region, "select region");
        self.selection.region = Some(region);
        self.selection.representative = None;
        self.output = None;
        Ok(())
    }

    pub fn select_representative(
        &mut self,
        name: impl Into<String>,
    ) -> Result<(), TransitionError> {
        self.expect_category(Category::Representative)?;
        if self.selection.region.is_none() {
            return Err(TransitionError::RegionRequired);
        }
        let name = name.into();
        tracing::debug!(representative = %name, "select representative");
        self.selection.representative = Some(name);
        self.output = None;
        Ok(())
    }

    pub fn set_tone(&mut self, tone: Tone) {
        self.selection.tone = tone;
    }

    pub fn set_subject_override(&mut self, subject: impl Into<String>) {
        self.selection.subject_override = subject.into();
    }

    pub fn subject_override_mut(&mut self) -> &mut String {
        &mut self.selection.subject_override
    }

    /// Renders the email for a fully selected flow and keeps it as the current output.
    ///
    /// The selection itself is left untouched; generating twice yields identical output.
    pub fn generate(&mut self) -> Result<&RenderedEmail, TransitionError> {
        let Some(recipient) = self.selection.recipient() else {
            return Err(TransitionError::Incomplete(self.flow_state()));
        };
        let email = render(
            &self.directory,
            recipient,
            self.selection.tone,
            &self.selection.subject_override,
        );
        tracing::debug!(subject = %email.subject, "generated email");
        Ok(self.output.insert(email))
    }

    pub fn party_choices(&self) -> Vec<ChoiceOption> {
        self.directory
            .parties()
            .iter()
            .map(|party| ChoiceOption::new(party.id().as_str(), party.label()))
            .collect()
    }

    pub fn region_choices(&self) -> Vec<ChoiceOption> {
        self.directory
            .region_codes()
            .map(|code| ChoiceOption::new(code.as_str(), region_label(code.as_str())))
            .collect()
    }

    /// Representatives of the selected region, sorted by name; empty without a region.
    pub fn representative_choices(&self) -> Vec<ChoiceOption> {
        let Some(region) = self.selection.region.as_ref() else {
            return Vec::new();
        };
        self.directory
            .representatives_sorted(region.as_str())
            .into_iter()
            .map(|rep| ChoiceOption::new(rep.name(), rep.name()))
            .collect()
    }

    fn expect_category(&self, expected: Category) -> Result<(), TransitionError> {
        if self.selection.category == Some(expected) {
            return Ok(());
        }
        Err(TransitionError::WrongCategory {
            expected,
            actual: self.selection.category,
        })
    }
}

/// Panels visible for `state`. Nothing outside this function decides visibility.
pub fn visibility(state: &ComposerState) -> Visibility {
    let mut panels = Visibility::new();
    let selection = state.selection();

    match selection.category() {
        None => return panels,
        Some(Category::Leader) => {
            panels.insert(Panel::Party);
        }
        Some(Category::Representative) => {
            panels.insert(Panel::Region);
            if selection.region().is_some() {
                panels.insert(Panel::Representative);
            }
        }
    }

    panels.insert(Panel::Options);
    if selection.is_complete() {
        panels.insert(Panel::Generate);
    }
    if state.output().is_some() {
        panels.insert(Panel::Output);
    }
    panels
}
