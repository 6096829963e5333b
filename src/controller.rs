//! Drop/select controller model, usable on both wasm and native.
//!
//! Keeping the drag classification and state transitions out of the
//! wasm-only `web` module allows us to unit-test them on the host without a
//! live document. The DOM layer translates events into [`DragItem`] lists
//! and applies whatever state these functions return.

/// Declared MIME type a dragged item must carry to be accepted.
pub const WASM_MIME: &str = "application/wasm";

/// Name given to the rendered artifact when it is wrapped as a file.
pub const OUTPUT_FILENAME: &str = "flamegraph.svg";

/// MIME type of the rendered artifact.
pub const OUTPUT_MIME: &str = "image/svg+xml";

/// Decoration state of the drop zone while a drag is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropState {
    #[default]
    Neutral,
    Valid,
    Invalid,
}

impl DropState {
    /// CSS class list for the drop-signal element. The class names are an
    /// external naming table resolved by the host page, not behavior.
    pub fn signal_class(self) -> &'static str {
        match self {
            DropState::Neutral => "drop-signal",
            DropState::Valid => "drop-signal drop-valid",
            DropState::Invalid => "drop-signal drop-invalid",
        }
    }
}

/// Metadata of one dragged item, as exposed by the host's drag payload.
/// Only `kind` and the declared MIME type are visible before the drop;
/// file contents cannot be inspected at classification time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragItem {
    pub kind: String,
    pub mime: String,
}

impl DragItem {
    pub fn new(kind: &str, mime: &str) -> Self {
        Self {
            kind: kind.to_string(),
            mime: mime.to_string(),
        }
    }
}

/// Shared validation predicate for dragover and drop: exactly one dragged
/// item, of kind `file`, declaring `application/wasm`. Returns the matching
/// item, or `None` when the payload has the wrong shape. Pure; callers
/// treat `None` as reject/ignore.
pub fn matching_wasm_item(items: &[DragItem]) -> Option<&DragItem> {
    match items {
        [item] if item.kind == "file" && item.mime == WASM_MIME => Some(item),
        _ => None,
    }
}

/// State after a dragover event. Never Neutral: a drag in progress is
/// always signalled one way or the other. Re-evaluated on every event.
pub fn drag_over_state(items: &[DragItem]) -> DropState {
    if matching_wasm_item(items).is_some() {
        DropState::Valid
    } else {
        DropState::Invalid
    }
}

/// State after a dragleave event, from any prior state.
pub fn drag_leave_state() -> DropState {
    DropState::Neutral
}

/// Whether a drop should be processed or silently discarded. The payload is
/// re-validated here because items may differ between the dragover and drop
/// events. Either way the decoration resets to Neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropDecision {
    Process,
    Ignore,
}

pub fn drop_decision(items: &[DragItem]) -> DropDecision {
    if matching_wasm_item(items).is_some() {
        DropDecision::Process
    } else {
        DropDecision::Ignore
    }
}

/// Failure taxonomy of the render pipeline. Invalid drops and cancelled
/// file choosers are not errors; they never reach this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The chosen file could not be read into memory.
    FileRead(String),
    /// The rendering collaborator rejected the module bytes.
    Render(String),
    /// Wrapping or delivering the rendered SVG failed.
    Delivery(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::FileRead(detail) => write!(f, "could not read file: {detail}"),
            RenderError::Render(detail) => write!(f, "flame graph rendering failed: {detail}"),
            RenderError::Delivery(detail) => write!(f, "could not deliver result: {detail}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wasm_file() -> DragItem {
        DragItem::new("file", WASM_MIME)
    }

    #[test]
    fn empty_payload_has_no_match() {
        assert_eq!(matching_wasm_item(&[]), None);
    }

    #[test]
    fn two_items_have_no_match_even_if_both_are_wasm() {
        let items = [wasm_file(), wasm_file()];
        assert_eq!(matching_wasm_item(&items), None);
        assert_eq!(drag_over_state(&items), DropState::Invalid);
    }

    #[test]
    fn non_file_kind_has_no_match() {
        let items = [DragItem::new("string", WASM_MIME)];
        assert_eq!(matching_wasm_item(&items), None);
    }

    #[test]
    fn wrong_mime_has_no_match() {
        let items = [DragItem::new("file", "text/plain")];
        assert_eq!(matching_wasm_item(&items), None);
        assert_eq!(drag_over_state(&items), DropState::Invalid);
    }

    #[test]
    fn single_wasm_file_matches_that_item() {
        let items = [wasm_file()];
        assert_eq!(matching_wasm_item(&items), Some(&items[0]));
        assert_eq!(drag_over_state(&items), DropState::Valid);
    }

    #[test]
    fn predicate_is_idempotent() {
        let items = [wasm_file()];
        let first = matching_wasm_item(&items).cloned();
        let second = matching_wasm_item(&items).cloned();
        assert_eq!(first, second);
    }

    #[test]
    fn drag_leave_resets_from_every_state() {
        for _prior in [DropState::Neutral, DropState::Valid, DropState::Invalid] {
            assert_eq!(drag_leave_state(), DropState::Neutral);
        }
    }

    #[test]
    fn valid_drop_is_processed() {
        assert_eq!(drop_decision(&[wasm_file()]), DropDecision::Process);
    }

    #[test]
    fn invalid_drop_is_ignored() {
        assert_eq!(drop_decision(&[]), DropDecision::Ignore);
        assert_eq!(
            drop_decision(&[DragItem::new("file", "text/plain")]),
            DropDecision::Ignore
        );
        assert_eq!(
            drop_decision(&[wasm_file(), wasm_file()]),
            DropDecision::Ignore
        );
    }

    #[test]
    fn signal_classes_are_distinct_and_share_the_base_class() {
        let classes = [
            DropState::Neutral.signal_class(),
            DropState::Valid.signal_class(),
            DropState::Invalid.signal_class(),
        ];
        for c in classes {
            assert!(c.starts_with("drop-signal"));
        }
        assert_ne!(classes[0], classes[1]);
        assert_ne!(classes[1], classes[2]);
        assert_ne!(classes[0], classes[2]);
    }

    #[test]
    fn error_messages_distinguish_the_taxonomy() {
        let errors = [
            RenderError::FileRead("x".into()),
            RenderError::Render("x".into()),
            RenderError::Delivery("x".into()),
        ];
        let mut messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        for m in &messages {
            assert!(!m.trim().is_empty());
        }
        messages.sort_unstable();
        messages.dedup();
        assert_eq!(messages.len(), 3);
    }
}
