// SPDX-License-Identifier: AGPL-3.0-or-later
//! Error types for sessions, configuration and generation

use thiserror::Error;

/// Form field that generation requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    ProjectName,
    Description,
}

/// Generation refused because of the form contents
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{}", missing_message(.0))]
    MissingField(Field),
}

fn missing_message(field: &Field) -> &'static str {
    match field {
        Field::ProjectName => "Project name is required",
        Field::Description => "Project description is required",
    }
}

/// The artifact sink could not take the README
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Sink rejected artifact: {0}")]
    Rejected(String),
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown license identifier: {0}")]
    UnknownLicense(String),

    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
