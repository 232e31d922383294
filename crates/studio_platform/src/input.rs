//! Input types for keyboard activation

/// Keys the gallery distinguishes
///
/// Hosts translate their native key events into this enum before routing
/// them to the view. Anything the view does not care about maps to
/// [`Key::Other`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Enter,
    Space,
    Escape,
    Tab,
    /// Character input
    Char(char),
    /// Any key without special meaning to the view
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value to a [`Key`]
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "Enter" => Key::Enter,
            " " | "Spacebar" => Key::Space,
            "Escape" | "Esc" => Key::Escape,
            "Tab" => Key::Tab,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => Key::Other,
                }
            }
        }
    }

    /// Whether this key activates a focused link-like element
    pub fn is_activation(&self) -> bool {
        matches!(self, Key::Enter)
    }
}
