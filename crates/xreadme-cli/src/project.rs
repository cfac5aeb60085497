// SPDX-License-Identifier: AGPL-3.0-or-later
//! Project files: the form contents a host would otherwise collect

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use xreadme_core::{ConfigError, ContentSource, Session};

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid project file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Only one of body, body_file and body_tree may be set")]
    ConflictingBody,
}

/// A project description as written in TOML
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectFile {
    pub name: String,
    pub description: String,
    /// License identifier, e.g. "Apache-2.0"
    pub license: Option<String>,
    /// Sections added after the configured defaults, in order
    pub add_sections: Vec<String>,
    /// Sections removed after additions
    pub remove_sections: Vec<String>,
    /// Inline editor markup for the body
    pub body: Option<String>,
    /// Path to editor markup, relative to the project file
    pub body_file: Option<PathBuf>,
    /// Path to a JSON block tree, relative to the project file
    pub body_tree: Option<PathBuf>,
    #[serde(skip)]
    base_dir: PathBuf,
}

impl ProjectFile {
    pub fn from_toml(input: &str, base_dir: &Path) -> Result<Self, ProjectError> {
        let mut project: Self = toml::from_str(input)?;
        project.base_dir = base_dir.to_path_buf();
        Ok(project)
    }

    pub fn load(path: &Path) -> Result<Self, ProjectError> {
        let content = read(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_toml(&content, base_dir)
    }

    /// Body content, if the project supplies one
    fn body_source(&self) -> Result<Option<ContentSource>, ProjectError> {
        match (&self.body, &self.body_file, &self.body_tree) {
            (None, None, None) => Ok(None),
            (Some(body), None, None) => Ok(Some(ContentSource::Markup(body.clone()))),
            (None, Some(file), None) => {
                Ok(Some(ContentSource::Markup(read(&self.base_dir.join(file))?)))
            }
            (None, None, Some(tree)) => {
                Ok(Some(ContentSource::Json(read(&self.base_dir.join(tree))?)))
            }
            _ => Err(ProjectError::ConflictingBody),
        }
    }

    /// Replay the project onto a session as a user would: fill the form,
    /// mount the editor, then edit sections
    pub fn apply(&self, session: &mut Session) -> Result<(), ProjectError> {
        session.set_project_name(self.name.as_str());
        session.set_description(self.description.as_str());
        if let Some(license) = &self.license {
            session.set_license_id(license)?;
        }

        session.editor_ready();
        if let Some(source) = self.body_source()? {
            session.replace_body(source);
        }

        for name in &self.add_sections {
            if !session.add_section(name) {
                tracing::debug!("Section {:?} not added", name);
            }
        }
        for name in &self.remove_sections {
            if !session.remove_section(name) {
                tracing::warn!("Section {:?} could not be removed", name);
            }
        }
        Ok(())
    }
}

fn read(path: &Path) -> Result<String, ProjectError> {
    std::fs::read_to_string(path).map_err(|source| ProjectError::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use xreadme_core::License;

    #[test]
    fn test_apply_fills_session() {
        let project = ProjectFile::from_toml(
            r#"
name = "Foo"
description = "Bar"
license = "ISC"
add_sections = ["FAQ"]
remove_sections = ["Usage", "License"]
"#,
            Path::new("."),
        )
        .unwrap();

        let mut session = Session::default();
        project.apply(&mut session).unwrap();

        assert_eq!(session.project_name(), "Foo");
        assert_eq!(session.license(), License::Isc);
        assert_eq!(
            session.sections().as_slice(),
            &["Installation", "Contributing", "License", "FAQ"]
        );
        assert_eq!(
            session.body_markup().as_deref(),
            Some("## Installation\n\n## Contributing\n\n## FAQ")
        );
    }

    #[test]
    fn test_body_file_relative_to_project() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("body.md"), "## Usage\n\nRun it.").unwrap();
        std::fs::write(
            dir.path().join("project.toml"),
            "name = \"Foo\"\ndescription = \"Bar\"\nbody_file = \"body.md\"\n",
        )
        .unwrap();

        let project = ProjectFile::load(&dir.path().join("project.toml")).unwrap();
        let mut session = Session::default();
        project.apply(&mut session).unwrap();
        assert_eq!(session.body_markup().as_deref(), Some("## Usage\n\nRun it."));
    }

    #[test]
    fn test_conflicting_body_rejected() {
        let project = ProjectFile::from_toml(
            "body = \"x\"\nbody_file = \"y.md\"\n",
            Path::new("."),
        )
        .unwrap();
        let err = project.apply(&mut Session::default()).unwrap_err();
        assert!(matches!(err, ProjectError::ConflictingBody));
    }

    #[test]
    fn test_unknown_license_rejected() {
        let project = ProjectFile::from_toml("license = \"WTFPL\"\n", Path::new(".")).unwrap();
        let err = project.apply(&mut Session::default()).unwrap_err();
        assert!(matches!(err, ProjectError::Config(ConfigError::UnknownLicense(_))));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(ProjectFile::from_toml("titel = \"typo\"\n", Path::new(".")).is_err());
    }
}
