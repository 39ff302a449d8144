// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Advomail-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Advomail and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Searchable choice lists.
//!
//! The controller depends only on [`ChoiceList`]; [`SearchableChoiceList`] is the terminal
//! implementation with type-to-search over option labels and values.

mod search;

pub use search::SearchKind;

/// One entry of a choice list: the stable value and the label shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    pub value: String,
    pub text: String,
}

impl ChoiceOption {
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
        }
    }
}

pub trait ChoiceList {
    /// Replaces all options. Any current selection is dropped.
    fn set_options(&mut self, options: Vec<ChoiceOption>);

    fn clear_selection(&mut self);

    fn selection(&self) -> Option<&ChoiceOption>;
}

#[derive(Debug, Clone)]
pub struct ChoiceListConfig {
    pub placeholder: String,
    /// Upper bound on options listed at once; matches beyond it are hidden until the query
    /// narrows them down.
    pub max_options: usize,
    pub search: SearchKind,
}

impl ChoiceListConfig {
    pub const DEFAULT_MAX_OPTIONS: usize = 50;

    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            max_options: Self::DEFAULT_MAX_OPTIONS,
            search: SearchKind::Regular,
        }
    }

    pub fn with_max_options(mut self, max_options: usize) -> Self {
        self.max_options = max_options;
        self
    }

    pub fn with_search(mut self, search: SearchKind) -> Self {
        self.search = search;
        self
    }
}

/// A choice list sorted by label, filtered by a case-insensitive query over label and value.
#[derive(Debug, Clone)]
pub struct SearchableChoiceList {
    config: ChoiceListConfig,
    options: Vec<ChoiceOption>,
    query: String,
    matches: Vec<usize>,
    cursor: usize,
    selected: Option<usize>,
}

impl SearchableChoiceList {
    pub fn new(config: ChoiceListConfig) -> Self {
        Self {
            config,
            options: Vec::new(),
            query: String::new(),
            matches: Vec::new(),
            cursor: 0,
            selected: None,
        }
    }

    pub fn placeholder(&self) -> &str {
        &self.config.placeholder
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn options(&self) -> &[ChoiceOption] {
        &self.options
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.refresh_matches();
    }

    pub fn push_query_char(&mut self, ch: char) {
        self.query.push(ch);
        self.refresh_matches();
    }

    pub fn pop_query_char(&mut self) -> bool {
        if self.query.pop().is_none() {
            return false;
        }
        self.refresh_matches();
        true
    }

    pub fn clear_query(&mut self) -> bool {
        if self.query.is_empty() {
            return false;
        }
        self.query.clear();
        self.refresh_matches();
        true
    }

    /// Options currently listed, capped at `max_options`.
    pub fn visible_options(&self) -> impl Iterator<Item = &ChoiceOption> + '_ {
        self.matches.iter().take(self.config.max_options).map(|&idx| &self.options[idx])
    }

    pub fn visible_len(&self) -> usize {
        self.matches.len().min(self.config.max_options)
    }

    /// Number of matches hidden by the `max_options` cap.
    pub fn hidden_match_count(&self) -> usize {
        self.matches.len().saturating_sub(self.config.max_options)
    }

    pub fn cursor(&self) -> Option<usize> {
        (self.visible_len() > 0).then_some(self.cursor)
    }

    pub fn is_visible_selected(&self, visible_idx: usize) -> bool {
        self.selected.is_some() && self.matches.get(visible_idx).copied() == self.selected
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.visible_len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        let next = (self.cursor as isize + delta).clamp(0, len as isize - 1);
        self.cursor = next as usize;
    }

    pub fn move_cursor_to_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_to_end(&mut self) {
        self.cursor = self.visible_len().saturating_sub(1);
    }

    /// Selects the option under the cursor and returns it.
    pub fn select_cursor(&mut self) -> Option<&ChoiceOption> {
        if self.cursor >= self.visible_len() {
            return None;
        }
        let idx = *self.matches.get(self.cursor)?;
        self.selected = Some(idx);
        self.options.get(idx)
    }

    /// Selects the option whose value equals `value`.
    pub fn select_value(&mut self, value: &str) -> Option<&ChoiceOption> {
        let idx = self.options.iter().position(|option| option.value == value)?;
        self.selected = Some(idx);
        if let Some(pos) = self.matches.iter().take(self.config.max_options).position(|&m| m == idx)
        {
            self.cursor = pos;
        }
        self.options.get(idx)
    }

    fn refresh_matches(&mut self) {
        self.matches = search::ranked_matches(&self.options, &self.query, self.config.search);
        self.cursor = 0;
    }
}

impl ChoiceList for SearchableChoiceList {
    fn set_options(&mut self, mut options: Vec<ChoiceOption>) {
        options.sort_by(|a, b| {
            a.text.to_lowercase().cmp(&b.text.to_lowercase()).then_with(|| a.value.cmp(&b.value))
        });
        self.options = options;
        self.selected = None;
        self.query.clear();
        self.refresh_matches();
    }

    fn clear_selection(&mut self) {
        self.selected = None;
    }

    fn selection(&self) -> Option<&ChoiceOption> {
        self.selected.and_then(|idx| self.options.get(idx))
    }
}
