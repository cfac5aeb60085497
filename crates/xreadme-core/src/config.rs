// SPDX-License-Identifier: AGPL-3.0-or-later
//! Initial session state and host settings

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::license::License;

/// Everything a session starts from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Sections listed in the table of contents at start
    pub default_sections: Vec<String>,
    /// Editor markup loaded into the body when the editor attaches
    pub starter_content: String,
    /// License selected at start
    pub default_license: License,
    /// Suggested section names offered to the user
    pub recommended_sections: Vec<String>,
    /// Filename suggested to the artifact sink
    pub artifact_filename: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_sections: ["Installation", "Usage", "Contributing", "License"]
                .map(String::from)
                .to_vec(),
            starter_content: "## Installation\n\n## Usage\n\n## Contributing\n".to_string(),
            default_license: License::default(),
            recommended_sections: [
                "Installation",
                "Usage",
                "Features",
                "Tech Stack",
                "Live Link",
                "Demo",
                "Contributing",
                "Tests",
                "Documentation",
                "Roadmap",
                "Changelog",
                "FAQ",
                "Support",
                "Acknowledgments",
                "Authors",
                "Related Projects",
            ]
            .map(String::from)
            .to_vec(),
            artifact_filename: "README.md".to_string(),
        }
    }
}

impl SessionConfig {
    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    /// Load from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        tracing::debug!("Loaded session config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(
            config.default_sections,
            vec!["Installation", "Usage", "Contributing", "License"]
        );
        assert_eq!(config.default_license, License::Mit);
        assert_eq!(config.artifact_filename, "README.md");
        assert_eq!(config.recommended_sections.len(), 16);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SessionConfig::from_toml(
            r#"
default_license = "ISC"
default_sections = ["Usage"]
"#,
        )
        .unwrap();
        assert_eq!(config.default_license, License::Isc);
        assert_eq!(config.default_sections, vec!["Usage"]);
        assert_eq!(config.artifact_filename, "README.md");
    }

    #[test]
    fn test_unknown_license_rejected() {
        let err = SessionConfig::from_toml(r#"default_license = "WTFPL""#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(SessionConfig::from_toml("").unwrap(), SessionConfig::default());
    }
}
