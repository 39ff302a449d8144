// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Advomail-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Advomail and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Parties and representatives grouped by region, as loaded from the data files.

pub mod directory;
pub mod ids;

pub use directory::{Directory, Party, Representative};
pub use ids::{Id, IdError, PartyId, RegionCode};
