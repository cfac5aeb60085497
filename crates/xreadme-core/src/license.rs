// SPDX-License-Identifier: AGPL-3.0-or-later
//! Licenses offered for the generated README

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// License identifier selected for the project
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum License {
    #[default]
    #[serde(rename = "MIT")]
    Mit,
    #[serde(rename = "Apache-2.0")]
    Apache2,
    #[serde(rename = "GPL-3.0")]
    Gpl3,
    #[serde(rename = "BSD-3-Clause")]
    Bsd3Clause,
    #[serde(rename = "ISC")]
    Isc,
    #[serde(rename = "AGPL-3.0")]
    Agpl3,
    #[serde(rename = "LGPL-3.0")]
    Lgpl3,
    #[serde(rename = "MPL-2.0")]
    Mpl2,
    #[serde(rename = "Unlicense")]
    Unlicense,
    #[serde(rename = "Artistic-2.0")]
    Artistic2,
}

impl License {
    /// Identifier as written into the badge and footer
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Mit => "MIT",
            Self::Apache2 => "Apache-2.0",
            Self::Gpl3 => "GPL-3.0",
            Self::Bsd3Clause => "BSD-3-Clause",
            Self::Isc => "ISC",
            Self::Agpl3 => "AGPL-3.0",
            Self::Lgpl3 => "LGPL-3.0",
            Self::Mpl2 => "MPL-2.0",
            Self::Unlicense => "Unlicense",
            Self::Artistic2 => "Artistic-2.0",
        }
    }

    /// Human-readable name for pickers
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Mit => "MIT License",
            Self::Apache2 => "Apache License 2.0",
            Self::Gpl3 => "GNU GPLv3",
            Self::Bsd3Clause => "BSD 3-Clause",
            Self::Isc => "ISC License",
            Self::Agpl3 => "GNU AGPLv3",
            Self::Lgpl3 => "GNU LGPLv3",
            Self::Mpl2 => "Mozilla Public License 2.0",
            Self::Unlicense => "The Unlicense",
            Self::Artistic2 => "Artistic License 2.0",
        }
    }

    /// All licenses in picker order
    pub const ALL: [Self; 10] = [
        Self::Mit,
        Self::Apache2,
        Self::Gpl3,
        Self::Bsd3Clause,
        Self::Isc,
        Self::Agpl3,
        Self::Lgpl3,
        Self::Mpl2,
        Self::Unlicense,
        Self::Artistic2,
    ];
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for License {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|license| license.id() == s)
            .ok_or_else(|| ConfigError::UnknownLicense(s.to_string()))
    }
}
