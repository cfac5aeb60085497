// SPDX-License-Identifier: AGPL-3.0-or-later
//! Lifecycle of the externally owned editing surface
//!
//! The surface becomes available some time after the session starts and can
//! go away again. Every content operation goes through [`EditorSlot`] and is
//! a no-op unless the editor is ready.

use crate::content::{ContentSource, RichContent};

/// Where the editing surface is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorPhase {
    Uninitialized,
    Ready,
    Destroyed,
}

#[derive(Debug, Clone, Default)]
enum SlotState {
    #[default]
    Uninitialized,
    Ready(RichContent),
    Destroyed,
}

/// Holds the rich content while the editing surface is alive
#[derive(Debug, Clone, Default)]
pub struct EditorSlot {
    state: SlotState,
}

impl EditorSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> EditorPhase {
        match self.state {
            SlotState::Uninitialized => EditorPhase::Uninitialized,
            SlotState::Ready(_) => EditorPhase::Ready,
            SlotState::Destroyed => EditorPhase::Destroyed,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, SlotState::Ready(_))
    }

    /// The surface reported ready. A re-mount after destruction starts over
    /// from `initial`; attaching while already ready keeps the current content.
    pub fn attach(&mut self, initial: ContentSource) {
        if self.is_ready() {
            tracing::debug!("Editor already attached");
            return;
        }
        self.state = SlotState::Ready(RichContent::from_source(initial));
    }

    /// The surface went away; its content goes with it
    pub fn destroy(&mut self) {
        self.state = SlotState::Destroyed;
    }

    pub fn content(&self) -> Option<&RichContent> {
        match &self.state {
            SlotState::Ready(content) => Some(content),
            _ => None,
        }
    }

    /// Run `f` against the content if the editor is ready
    pub fn with_content<R>(&mut self, f: impl FnOnce(&mut RichContent) -> R) -> Option<R> {
        if let SlotState::Ready(content) = &mut self.state {
            return Some(f(content));
        }
        tracing::debug!("Editor not ready ({:?}); ignoring operation", self.phase());
        None
    }

    /// Editor markup of the current body, if the editor is ready
    pub fn serialize_to_markup(&self) -> Option<String> {
        self.content().map(RichContent::serialize_to_markup)
    }

    pub fn replace_content(&mut self, source: ContentSource) {
        self.with_content(|content| content.replace_content(source));
    }

    pub fn append_section(&mut self, name: &str) {
        self.with_content(|content| content.append_section(name));
    }

    pub fn strip_section(&mut self, name: &str) {
        self.with_content(|content| content.strip_section(name));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn starter() -> ContentSource {
        ContentSource::Markup("## Usage".to_string())
    }

    #[test]
    fn test_lifecycle_transitions() {
        let mut slot = EditorSlot::new();
        assert_eq!(slot.phase(), EditorPhase::Uninitialized);

        slot.attach(starter());
        assert_eq!(slot.phase(), EditorPhase::Ready);

        slot.destroy();
        assert_eq!(slot.phase(), EditorPhase::Destroyed);

        slot.attach(starter());
        assert_eq!(slot.phase(), EditorPhase::Ready);
    }

    #[test]
    fn test_operations_before_ready_are_noops() {
        let mut slot = EditorSlot::new();
        slot.append_section("FAQ");
        slot.strip_section("Usage");
        slot.replace_content(ContentSource::Markup("# X".to_string()));
        assert_eq!(slot.serialize_to_markup(), None);
        assert_eq!(slot.phase(), EditorPhase::Uninitialized);
    }

    #[test]
    fn test_operations_after_destroy_are_noops() {
        let mut slot = EditorSlot::new();
        slot.attach(starter());
        slot.destroy();
        slot.append_section("FAQ");
        assert_eq!(slot.serialize_to_markup(), None);
    }

    #[test]
    fn test_reattach_keeps_content_when_ready() {
        let mut slot = EditorSlot::new();
        slot.attach(starter());
        slot.append_section("FAQ");
        slot.attach(starter());
        assert_eq!(
            slot.serialize_to_markup().as_deref(),
            Some("## Usage\n\n## FAQ")
        );
    }

    #[test]
    fn test_remount_starts_from_initial_content() {
        let mut slot = EditorSlot::new();
        slot.attach(starter());
        slot.append_section("FAQ");
        slot.destroy();
        slot.attach(starter());
        assert_eq!(slot.serialize_to_markup().as_deref(), Some("## Usage"));
    }
}
