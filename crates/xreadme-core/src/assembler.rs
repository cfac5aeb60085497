// SPDX-License-Identifier: AGPL-3.0-or-later
//! README assembly from project metadata, sections and body
//!
//! The layout is fixed: title, license badge, description, table of
//! contents, converted body, license footer.

use crate::convert::MarkupConverter;
use crate::error::{Field, ValidationError};
use crate::license::License;
use crate::sections::SectionRegistry;

/// Form fields that feed the template
#[derive(Debug, Clone, Copy)]
pub struct ProjectMeta<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub license: License,
}

impl ProjectMeta<'_> {
    /// Check required fields, name first
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField(Field::ProjectName));
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::MissingField(Field::Description));
        }
        Ok(())
    }
}

/// Builds README text around a converted body
#[derive(Debug, Clone, Default)]
pub struct Assembler {
    converter: MarkupConverter,
}

impl Assembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble the README. `body_markup` is editor markup; it is converted
    /// here and inserted as-is.
    pub fn assemble(
        &self,
        meta: &ProjectMeta<'_>,
        sections: &SectionRegistry,
        body_markup: &str,
    ) -> Result<String, ValidationError> {
        meta.validate()?;

        let body = self.converter.convert(body_markup);

        let mut segments = vec![
            format!("# {}", meta.name),
            license_badge(meta.license),
            format!("## Description\n\n{}", meta.description),
            table_of_contents(sections),
        ];
        if !body.trim().is_empty() {
            segments.push(body);
        }
        segments.push(license_footer(meta.license));

        let mut readme = segments.join("\n\n");
        readme.push('\n');
        Ok(readme)
    }
}

/// shields.io badge naming the license
pub fn license_badge(license: License) -> String {
    format!(
        "![License](https://img.shields.io/badge/license-{}-blue.svg)",
        license.id()
    )
}

/// Link to a section; the anchor is the lower-cased name with no other
/// normalization
pub fn toc_entry(name: &str) -> String {
    format!("- [{}](#{})", name, name.to_lowercase())
}

fn table_of_contents(sections: &SectionRegistry) -> String {
    let mut toc = String::from("## Table of Contents\n");
    for name in sections.iter() {
        toc.push('\n');
        toc.push_str(&toc_entry(name));
    }
    toc
}

fn license_footer(license: License) -> String {
    format!(
        "## License\n\nThis project is licensed under the {} License - see the [LICENSE](LICENSE) file for details.",
        license.id()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn meta<'a>(name: &'a str, description: &'a str) -> ProjectMeta<'a> {
        ProjectMeta {
            name,
            description,
            license: License::Mit,
        }
    }

    fn sections(names: &[&str]) -> SectionRegistry {
        SectionRegistry::from_names(names.iter().copied())
    }

    #[test]
    fn test_foo_bar_scenario() {
        let readme = Assembler::new()
            .assemble(&meta("Foo", "Bar"), &sections(&["Installation", "License"]), "")
            .unwrap();

        let expected = "\
# Foo

![License](https://img.shields.io/badge/license-MIT-blue.svg)

## Description

Bar

## Table of Contents

- [Installation](#installation)
- [License](#license)

## License

This project is licensed under the MIT License - see the [LICENSE](LICENSE) file for details.
";
        assert_eq!(readme, expected);
        assert!(readme.starts_with("# Foo"));
        assert_eq!(readme.lines().filter(|l| l.starts_with("- [")).count(), 2);
    }

    #[test]
    fn test_segments_in_order_with_body() {
        let readme = Assembler::new()
            .assemble(
                &ProjectMeta {
                    name: "Widget",
                    description: "Makes widgets.",
                    license: License::Apache2,
                },
                &sections(&["Usage", "License"]),
                "## Usage\n\n* _run_ it",
            )
            .unwrap();

        let order = [
            "# Widget",
            "![License](https://img.shields.io/badge/license-Apache-2.0-blue.svg)",
            "## Description",
            "Makes widgets.",
            "## Table of Contents",
            "- [Usage](#usage)",
            "## Usage\n\n- *run* it",
            "## License\n\nThis project is licensed under the Apache-2.0 License",
        ];
        let mut from = 0;
        for segment in order {
            let found = readme[from..]
                .find(segment)
                .unwrap_or_else(|| panic!("missing {segment:?} after byte {from}"));
            from += found + segment.len();
        }
    }

    #[test]
    fn test_anchor_is_only_lowercased() {
        assert_eq!(toc_entry("Tech Stack"), "- [Tech Stack](#tech stack)");
        assert_eq!(toc_entry("FAQ?"), "- [FAQ?](#faq?)");
    }

    #[test]
    fn test_missing_name_checked_first() {
        let err = Assembler::new()
            .assemble(&meta("", ""), &SectionRegistry::new(), "")
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingField(Field::ProjectName));
    }

    #[test]
    fn test_missing_description() {
        let err = Assembler::new()
            .assemble(&meta("Foo", "  "), &SectionRegistry::new(), "")
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingField(Field::Description));
    }

    #[test]
    fn test_description_verbatim() {
        let description = "Line *one*\n\nLine two with <b>html</b>";
        let readme = Assembler::new()
            .assemble(&meta("Foo", description), &SectionRegistry::new(), "")
            .unwrap();
        assert!(readme.contains(&format!("## Description\n\n{description}\n\n")));
    }
}
