//! Keyboard navigation over the suggestion panel.

/// Keys the suggestion panel reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}

/// Whether a keypress was consumed by the panel. A consumed Enter does not
/// submit the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Consumed,
    PassThrough,
}

/// Highlight after ArrowDown: none → first, last → first.
#[must_use]
pub fn next_highlight(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(current.map_or(0, |i| (i + 1) % len))
}

/// Highlight after ArrowUp: none or first → last.
#[must_use]
pub fn previous_highlight(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match current {
        None | Some(0) => Some(len - 1),
        Some(i) => Some(i.min(len) - 1),
    }
}
