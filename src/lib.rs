// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Advomail-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Advomail and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Advomail: compose advocacy emails to party leaders and elected representatives.
//!
//! The core is terminal-independent: [`data`] loads the directory, [`state`] holds the selection
//! state machine, [`template`] renders emails and [`export`] hands them to the clipboard or a mail
//! client. [`tui`] is the interactive front end.

pub mod choice;
pub mod config;
pub mod data;
pub mod export;
pub mod format;
pub mod logging;
pub mod model;
pub mod state;
pub mod template;
pub mod tui;
