use conduit_types::{CanonicalEvent, EventKind};

/// Best-effort plain-text rendering attached to `RawEvent::text`. Shared by
/// every dialect so "what counts as this event's text" stays consistent.
pub(crate) fn derive_text(event: &CanonicalEvent) -> Option<String> {
    match event.kind {
        EventKind::Assistant | EventKind::User => event
            .message
            .as_ref()
            .map(|m| m.concatenated_text())
            .filter(|s| !s.is_empty()),
        EventKind::Result => event.result_fields.as_ref().and_then(|r| r.result_text.clone()),
        EventKind::ContentBlockDelta => event.delta.as_ref().and_then(|d| d.text.clone()),
        EventKind::Error => event.error_message.clone(),
        _ => None,
    }
}
