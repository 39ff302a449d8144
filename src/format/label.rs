// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Advomail-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Advomail and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::Party;

/// Returns the display label for `id`, or `id` itself when no party carries it.
pub fn party_label<'a>(parties: &'a [Party], id: &'a str) -> &'a str {
    parties.iter().find(|party| party.id().as_str() == id).map(Party::label).unwrap_or(id)
}

/// Turns a region code such as `new_south-wales` into `New South Wales`.
///
/// A word character at the start of the code, or right after a `-`/`_` separator, is
/// upper-cased and the separator becomes a single space. No dataset lookup is involved.
pub fn region_label(code: &str) -> String {
    let mut out = String::with_capacity(code.len());
    let mut chars = code.chars().peekable();
    let mut at_start = true;

    while let Some(ch) = chars.next() {
        if at_start {
            at_start = false;
            if is_word_char(ch) {
                out.push(ch.to_ascii_uppercase());
                continue;
            }
        }

        if is_separator(ch) {
            if let Some(&next) = chars.peek() {
                if is_word_char(next) {
                    chars.next();
                    out.push(' ');
                    out.push(next.to_ascii_uppercase());
                    continue;
                }
            }
        }

        out.push(ch);
    }

    out.trim().to_owned()
}

fn is_separator(ch: char) -> bool {
    matches!(ch, '-' | '_')
}

fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}
