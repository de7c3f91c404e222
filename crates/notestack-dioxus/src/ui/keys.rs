use dioxus::html::Key as DomKey;
use notestack_engine::Key;

/// Map a DOM key to the key the editor session understands
pub fn editor_key(key: &DomKey) -> Option<Key> {
    match key {
        DomKey::Enter => Some(Key::Enter),
        DomKey::Backspace => Some(Key::Backspace),
        DomKey::Tab => Some(Key::Tab),
        DomKey::Escape => Some(Key::Escape),
        DomKey::ArrowUp => Some(Key::ArrowUp),
        DomKey::ArrowDown => Some(Key::ArrowDown),
        DomKey::Character(text) => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(Key::Character(c)),
                _ => None,
            }
        }
        _ => None,
    }
}
