// SPDX-License-Identifier: AGPL-3.0-or-later
//! Command implementations behind the CLI

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use xreadme_core::{GenerateError, License, Session, SessionConfig};

use crate::project::ProjectFile;
use crate::sink::{FileSink, TerminalChannel};

#[derive(Debug, Clone, Serialize)]
pub struct GenerateSummary {
    pub path: PathBuf,
    pub sections: usize,
    pub body_words: usize,
    pub bytes: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct LicenseEntry {
    pub id: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionEntry {
    pub name: String,
    pub selected: bool,
}

/// Load the session config, falling back to defaults
pub fn load_config(path: Option<&Path>) -> Result<SessionConfig> {
    match path {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(SessionConfig::default()),
    }
}

/// Build a session from a project file
pub fn open_session(config: SessionConfig, project: &Path) -> Result<Session> {
    let project = ProjectFile::load(project)
        .with_context(|| format!("Failed to load project: {}", project.display()))?;
    let mut session = Session::new(config);
    project.apply(&mut session)?;
    Ok(session)
}

/// Generate the README into `out_dir`. Returns `None` when the form failed
/// validation; the reason has already been printed.
pub fn generate(
    config: SessionConfig,
    project: &Path,
    out_dir: &Path,
    quiet: bool,
) -> Result<Option<GenerateSummary>> {
    let session = open_session(config, project)?;
    let mut sink = FileSink::new(out_dir);
    let mut channel = TerminalChannel { quiet };

    let artifact = match session.generate_into(&mut sink, &mut channel) {
        Ok(artifact) => artifact,
        Err(GenerateError::Validation(_)) => return Ok(None),
        Err(e) => return Err(e).context("Failed to write README"),
    };

    Ok(Some(GenerateSummary {
        path: sink
            .written()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| out_dir.join(&artifact.filename)),
        sections: session.sections().len(),
        body_words: session.body_word_count(),
        bytes: artifact.content.len(),
    }))
}

/// HTML preview of the project's body
pub fn preview(config: SessionConfig, project: &Path) -> Result<String> {
    let session = open_session(config, project)?;
    Ok(session.preview_html().unwrap_or_default())
}

/// The project's body as a JSON block tree, loadable again via `body_tree`
pub fn tree(config: SessionConfig, project: &Path) -> Result<String> {
    let session = open_session(config, project)?;
    let tree = session
        .body_tree()
        .transpose()
        .context("Failed to serialize body tree")?;
    Ok(tree.unwrap_or_else(|| "[]".to_string()))
}

pub fn licenses() -> Vec<LicenseEntry> {
    License::ALL
        .iter()
        .map(|license| LicenseEntry {
            id: license.id(),
            label: license.label(),
        })
        .collect()
}

/// Recommended sections, flagged against the project's registry if given
pub fn sections(config: SessionConfig, project: Option<&Path>) -> Result<Vec<SectionEntry>> {
    let session = match project {
        Some(project) => open_session(config, project)?,
        None => Session::new(config),
    };
    Ok(session
        .recommended_sections()
        .into_iter()
        .map(|section| SectionEntry {
            name: section.name.to_string(),
            selected: section.selected,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write_project(dir: &Path, toml: &str) -> PathBuf {
        let path = dir.join("project.toml");
        std::fs::write(&path, toml).unwrap();
        path
    }

    #[test]
    fn test_generate_writes_readme() {
        let dir = tempfile::tempdir().unwrap();
        let project = write_project(
            dir.path(),
            r###"
name = "Foo"
description = "Bar"
body = "## Installation\n\n* `cargo install foo`\n"
add_sections = ["FAQ"]
remove_sections = ["Usage", "Contributing"]
"###,
        );

        let summary = generate(SessionConfig::default(), &project, dir.path(), true)
            .unwrap()
            .unwrap();
        assert_eq!(summary.path, dir.path().join("README.md"));
        assert_eq!(summary.sections, 3);

        let readme = std::fs::read_to_string(&summary.path).unwrap();
        let expected = "\
# Foo

![License](https://img.shields.io/badge/license-MIT-blue.svg)

## Description

Bar

## Table of Contents

- [Installation](#installation)
- [License](#license)
- [FAQ](#faq)

## Installation

- `cargo install foo`

## FAQ

## License

This project is licensed under the MIT License - see the [LICENSE](LICENSE) file for details.
";
        assert_eq!(readme, expected);
        assert_eq!(summary.bytes, expected.len());
    }

    #[test]
    fn test_generate_validation_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let project = write_project(dir.path(), "description = \"Bar\"\n");

        let summary = generate(SessionConfig::default(), &project, dir.path(), true).unwrap();
        assert!(summary.is_none());
        assert!(!dir.path().join("README.md").exists());
    }

    #[test]
    fn test_generate_with_custom_filename() {
        let dir = tempfile::tempdir().unwrap();
        let project = write_project(dir.path(), "name = \"Foo\"\ndescription = \"Bar\"\n");
        let config = SessionConfig {
            artifact_filename: "README.generated.md".to_string(),
            ..SessionConfig::default()
        };

        let summary = generate(config, &project, dir.path(), true).unwrap().unwrap();
        assert_eq!(summary.path, dir.path().join("README.generated.md"));
    }

    #[test]
    fn test_preview_renders_body() {
        let dir = tempfile::tempdir().unwrap();
        let project = write_project(dir.path(), "body = \"## Demo\\n\\n**soon**\"\n");
        let html = preview(SessionConfig::default(), &project).unwrap();
        assert!(html.contains("<h2>Demo</h2>"));
        assert!(html.contains("<strong>soon</strong>"));
    }

    #[test]
    fn test_tree_dump_feeds_body_tree() {
        let dir = tempfile::tempdir().unwrap();
        let project = write_project(
            dir.path(),
            "name = \"Foo\"\ndescription = \"Bar\"\nbody = \"## Usage\\n\\n* _run_ it\"\n",
        );
        let json = tree(SessionConfig::default(), &project).unwrap();
        assert!(json.contains("\"type\": \"heading\""));

        std::fs::write(dir.path().join("body.json"), &json).unwrap();
        let from_tree = dir.path().join("from_tree.toml");
        std::fs::write(
            &from_tree,
            "name = \"Foo\"\ndescription = \"Bar\"\nbody_tree = \"body.json\"\n",
        )
        .unwrap();
        assert_eq!(
            open_session(SessionConfig::default(), &from_tree).unwrap().body_markup(),
            open_session(SessionConfig::default(), &project).unwrap().body_markup()
        );
    }

    #[test]
    fn test_missing_project_reports_path() {
        let err = open_session(SessionConfig::default(), Path::new("/nonexistent/p.toml"))
            .unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/p.toml"));
    }

    #[test]
    fn test_licenses_listed_in_order() {
        let ids: Vec<_> = licenses().iter().map(|l| l.id).collect();
        assert_eq!(ids.first(), Some(&"MIT"));
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn test_sections_without_project() {
        let entries = sections(SessionConfig::default(), None).unwrap();
        let selected: Vec<_> = entries
            .iter()
            .filter(|e| e.selected)
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(selected, vec!["Installation", "Usage", "Contributing"]);
    }
}
