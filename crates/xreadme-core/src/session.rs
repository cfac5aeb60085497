// SPDX-License-Identifier: AGPL-3.0-or-later
//! A README authoring session
//!
//! The session is the root aggregate: form fields, the section registry and
//! the editor slot. It keeps registry and body headings in step on add and
//! remove, and runs generation on request. Hosts plug in a
//! [`NotificationChannel`] and an [`ArtifactSink`].

use crate::assembler::{Assembler, ProjectMeta};
use crate::config::SessionConfig;
use crate::content::{ContentSource, RichContent, SECTION_HEADING_LEVEL};
use crate::convert::MarkupConverter;
use crate::editor::{EditorPhase, EditorSlot};
use crate::error::{ConfigError, GenerateError, SinkError, ValidationError};
use crate::license::License;
use crate::sections::{SectionRegistry, LICENSE_SECTION};
use crate::traits::ConversionError;

/// Outcome reported to the host UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    ValidationError(String),
    GenerationSuccess { filename: String },
}

/// Where outcome notifications go
pub trait NotificationChannel {
    fn notify(&mut self, notification: Notification);
}

impl NotificationChannel for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}

/// A generated README ready to be offered as a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub filename: String,
    pub content: String,
}

/// Takes finished artifacts and delivers them (download, file write, ...)
pub trait ArtifactSink {
    fn offer(&mut self, artifact: &Artifact) -> Result<(), SinkError>;
}

/// Drift between the registry and the headings in the body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionReport {
    /// Registered sections with no matching heading in the body
    pub missing_headings: Vec<String>,
    /// Section-level headings in the body that are not registered
    pub untracked_headings: Vec<String>,
}

impl SectionReport {
    pub fn is_consistent(&self) -> bool {
        self.missing_headings.is_empty() && self.untracked_headings.is_empty()
    }
}

/// A suggested section and whether it is already in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendedSection<'a> {
    pub name: &'a str,
    pub selected: bool,
}

#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    project_name: String,
    description: String,
    license: License,
    sections: SectionRegistry,
    editor: EditorSlot,
    assembler: Assembler,
}

impl Session {
    /// Start a session; the body stays unavailable until the editor attaches
    pub fn new(config: SessionConfig) -> Self {
        Self {
            project_name: String::new(),
            description: String::new(),
            license: config.default_license,
            sections: SectionRegistry::from_names(config.default_sections.iter().cloned()),
            editor: EditorSlot::new(),
            assembler: Assembler::new(),
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn set_project_name(&mut self, name: impl Into<String>) {
        self.project_name = name.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn license(&self) -> License {
        self.license
    }

    pub fn set_license(&mut self, license: License) {
        self.license = license;
    }

    /// Select a license by identifier; unknown identifiers leave the
    /// selection unchanged
    pub fn set_license_id(&mut self, id: &str) -> Result<(), ConfigError> {
        self.license = id.parse()?;
        Ok(())
    }

    pub fn sections(&self) -> &SectionRegistry {
        &self.sections
    }

    /// Register a section and append its heading to the body
    pub fn add_section(&mut self, name: &str) -> bool {
        if !self.sections.add(name) {
            return false;
        }
        self.editor.append_section(name);
        tracing::debug!("Added section {:?}", name);
        true
    }

    /// Unregister a section and strip its heading and body text
    pub fn remove_section(&mut self, name: &str) -> bool {
        if !self.sections.remove(name) {
            return false;
        }
        self.editor.strip_section(name);
        tracing::debug!("Removed section {:?}", name);
        true
    }

    /// Suggested sections, flagged when already registered
    pub fn recommended_sections(&self) -> Vec<RecommendedSection<'_>> {
        self.config
            .recommended_sections
            .iter()
            .map(|name| RecommendedSection {
                name: name.as_str(),
                selected: self.sections.contains(name),
            })
            .collect()
    }

    /// The editing surface is mounted; load the starter content
    pub fn editor_ready(&mut self) {
        self.editor
            .attach(ContentSource::Markup(self.config.starter_content.clone()));
    }

    /// The editing surface was torn down
    pub fn editor_destroyed(&mut self) {
        self.editor.destroy();
    }

    pub fn editor_phase(&self) -> EditorPhase {
        self.editor.phase()
    }

    /// Editor markup of the body, if the editor is ready
    pub fn body_markup(&self) -> Option<String> {
        self.editor.serialize_to_markup()
    }

    /// The body's block tree as JSON, if the editor is ready
    pub fn body_tree(&self) -> Option<Result<String, ConversionError>> {
        self.editor.content().map(RichContent::serialize_to_json)
    }

    /// Replace the whole body; ignored until the editor is ready
    pub fn replace_body(&mut self, source: ContentSource) {
        self.editor.replace_content(source);
    }

    /// Words in the body, zero while the editor is unavailable
    pub fn body_word_count(&self) -> usize {
        self.editor.content().map_or(0, |c| c.word_count())
    }

    /// HTML preview of the converted body
    pub fn preview_html(&self) -> Option<String> {
        let converter = MarkupConverter::new();
        self.body_markup()
            .map(|markup| converter.preview_html(&converter.convert(&markup)))
    }

    /// Compare registered sections with the body's section-level headings.
    /// `None` while the editor is unavailable.
    pub fn reconcile(&self) -> Option<SectionReport> {
        let content = self.editor.content()?;
        let headings = content.headings();

        let missing_headings = self
            .sections
            .iter()
            .filter(|name| *name != LICENSE_SECTION)
            .filter(|name| !headings.iter().any(|(_, title)| title == name.trim()))
            .map(str::to_string)
            .collect();

        // Headings are rendered trimmed, so registered names compare trimmed too
        let untracked_headings = headings
            .into_iter()
            .filter(|(level, title)| {
                *level == SECTION_HEADING_LEVEL
                    && !self.sections.iter().any(|name| name.trim() == title)
            })
            .map(|(_, title)| title)
            .collect();

        Some(SectionReport {
            missing_headings,
            untracked_headings,
        })
    }

    /// Validate and assemble the README. Session state is never modified.
    pub fn generate(&self) -> Result<Artifact, ValidationError> {
        let meta = ProjectMeta {
            name: &self.project_name,
            description: &self.description,
            license: self.license,
        };
        meta.validate()?;

        if let Some(report) = self.reconcile().filter(|r| !r.is_consistent()) {
            tracing::warn!(
                "Sections out of step with body: missing headings {:?}, untracked headings {:?}",
                report.missing_headings,
                report.untracked_headings
            );
        }

        let body = self.body_markup().unwrap_or_else(|| {
            tracing::debug!("Editor not ready; generating with an empty body");
            String::new()
        });
        let content = self.assembler.assemble(&meta, &self.sections, &body)?;

        tracing::info!(
            "Generated {} ({} bytes, {} sections)",
            self.config.artifact_filename,
            content.len(),
            self.sections.len()
        );
        Ok(Artifact {
            filename: self.config.artifact_filename.clone(),
            content,
        })
    }

    /// Generate, hand the artifact to `sink` and report the outcome on
    /// `channel`. Success is only reported once the sink has accepted it.
    pub fn generate_into(
        &self,
        sink: &mut dyn ArtifactSink,
        channel: &mut dyn NotificationChannel,
    ) -> Result<Artifact, GenerateError> {
        let artifact = match self.generate() {
            Ok(artifact) => artifact,
            Err(e) => {
                channel.notify(Notification::ValidationError(e.to_string()));
                return Err(e.into());
            }
        };

        sink.offer(&artifact)?;
        channel.notify(Notification::GenerationSuccess {
            filename: artifact.filename.clone(),
        });
        Ok(artifact)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
