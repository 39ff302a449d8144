// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Advomail-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Advomail and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ChoiceOption;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchKind {
    /// Case-insensitive substring match.
    #[default]
    Regular,
    /// Case-insensitive subsequence match ranked by similarity.
    Fuzzy,
}

/// Indices into `options` that match `query`, best match first.
///
/// An empty query keeps every option in list order. Ties keep list order too, so results stay
/// alphabetical among equally good matches.
pub(crate) fn ranked_matches(options: &[ChoiceOption], query: &str, kind: SearchKind) -> Vec<usize> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return (0..options.len()).collect();
    }

    let score_fn: fn(&str, &str) -> Option<i64> = match kind {
        SearchKind::Regular => regular_score,
        SearchKind::Fuzzy => fuzzy_score,
    };

    let mut scored = options
        .iter()
        .enumerate()
        .filter_map(|(idx, option)| {
            let text = score_fn(&needle, &option.text.to_lowercase());
            let value = score_fn(&needle, &option.value.to_lowercase());
            text.max(value).map(|score| (score, idx))
        })
        .collect::<Vec<_>>();

    scored.sort_by(|(score_a, idx_a), (score_b, idx_b)| {
        score_b.cmp(score_a).then_with(|| idx_a.cmp(idx_b))
    });
    scored.into_iter().map(|(_, idx)| idx).collect()
}

fn regular_score(needle: &str, haystack: &str) -> Option<i64> {
    let first = haystack.find(needle)?;
    let starts = first == 0;
    let start_boundary =
        starts || haystack[..first].chars().last().is_some_and(is_boundary_char);

    let mut score = 200_000i64.saturating_sub((first as i64) * 1000);
    score -= haystack.chars().count() as i64;
    if starts {
        score += 50_000;
    }
    if start_boundary {
        score += 20_000;
    }
    if haystack == needle {
        score += 100_000;
    }

    Some(score)
}

fn fuzzy_score(needle: &str, haystack: &str) -> Option<i64> {
    let subseq = subsequence_stats(needle, haystack)?;
    let ratio = rapidfuzz::fuzz::ratio(needle.chars(), haystack.chars());

    let mut score = (ratio * 1000.0).round() as i64;
    score -= subseq.span as i64;
    score -= (subseq.first as i64) / 4;
    score += (subseq.consecutive as i64) * 40;
    if subseq.start_boundary {
        score += 150;
    }
    if haystack.contains(needle) {
        score += 2000;
    }

    Some(score)
}

struct SubsequenceStats {
    first: usize,
    span: usize,
    consecutive: usize,
    start_boundary: bool,
}

fn subsequence_stats(needle: &str, haystack: &str) -> Option<SubsequenceStats> {
    let mut wanted = needle.chars().peekable();
    let mut first = None::<usize>;
    let mut last = 0usize;
    let mut prev_match = None::<usize>;
    let mut consecutive = 0usize;
    let mut start_boundary = false;
    let mut prev_char = None::<char>;

    for (idx, ch) in haystack.chars().enumerate() {
        let Some(&want) = wanted.peek() else {
            break;
        };

        if ch == want {
            wanted.next();
            if first.is_none() {
                first = Some(idx);
                start_boundary = prev_char.map_or(true, is_boundary_char);
            }
            if prev_match.is_some_and(|prev| idx == prev + 1) {
                consecutive += 1;
            }
            prev_match = Some(idx);
            last = idx;
        }

        prev_char = Some(ch);
    }

    if wanted.peek().is_some() {
        return None;
    }

    let first = first?;
    Some(SubsequenceStats {
        first,
        span: last.saturating_sub(first).saturating_add(1),
        consecutive,
        start_boundary,
    })
}

fn is_boundary_char(ch: char) -> bool {
    matches!(ch, ' ' | '-' | '_' | '.' | '\'')
}
