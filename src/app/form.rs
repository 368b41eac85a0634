//! Edit buffer for the profile create/edit views.
//!
//! Parsing is deliberately lenient: malformed `key=value` pairs are dropped
//! and a bad interval falls back to the default. The form never rejects
//! input; only a missing name or base URL blocks saving, and that check
//! lives in the state machine.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

use crate::store::{Profile, DEFAULT_INTERVAL_MINUTES};

pub const FIELD_COUNT: usize = 6;

/// Field labels and hints, in focus order.
pub const FIELD_LABELS: [(&str, &str); FIELD_COUNT] = [
    ("Profile Name", "A name to identify this profile"),
    ("Base URL", "The base URL to monitor (e.g., https://api.example.com)"),
    ("Route", "The endpoint route (e.g., /health)"),
    ("URL Params", "Optional query parameters (e.g., key1=value1,key2=value2)"),
    ("Headers", "Request headers (e.g., Authorization=Bearer token)"),
    ("Interval (minutes)", "How often to check the endpoint"),
];

/// One editable text field. Edits append to or delete from the end.
#[derive(Debug, Clone, Default)]
pub struct TextField {
    value: String,
}

impl TextField {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn handle_key(&mut self, key: &KeyEvent) {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.value.push(c);
            }
            KeyCode::Backspace => {
                self.value.pop();
            }
            _ => {}
        }
    }
}

/// The six-field edit buffer plus focus state.
#[derive(Debug, Default)]
pub struct FormBuffer {
    fields: [TextField; FIELD_COUNT],
    focus: usize,
    editing: bool,
}

impl FormBuffer {
    pub fn focus(&self) -> usize {
        self.focus
    }

    /// True when the buffer was loaded from an existing profile.
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn field(&self, index: usize) -> &TextField {
        &self.fields[index]
    }

    /// Clear every field and focus the first one.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.set("");
        }
        self.focus = 0;
        self.editing = false;
    }

    /// Fill the buffer from an existing profile for editing.
    pub fn load(&mut self, profile: &Profile) {
        self.fields[0].set(&profile.name);
        self.fields[1].set(&profile.base_url);
        self.fields[2].set(&profile.route);
        self.fields[3].set(join_pairs(&profile.params));
        self.fields[4].set(join_pairs(&profile.headers));
        self.fields[5].set(profile.interval.to_string());
        self.focus = 0;
        self.editing = true;
    }

    /// Move focus one field forward, clamped at the last field.
    pub fn focus_next(&mut self) {
        if self.focus + 1 < FIELD_COUNT {
            self.focus += 1;
        }
    }

    /// Move focus one field back, clamped at the first field.
    pub fn focus_prev(&mut self) {
        self.focus = self.focus.saturating_sub(1);
    }

    pub fn on_last_field(&self) -> bool {
        self.focus == FIELD_COUNT - 1
    }

    /// Route a key into the focused field.
    pub fn handle_key(&mut self, key: &KeyEvent) {
        self.fields[self.focus].handle_key(key);
    }

    /// Parse the buffer into a profile. Never fails; see the module docs.
    pub fn to_profile(&self) -> Profile {
        let interval = match self.fields[5].value().parse::<i64>() {
            Ok(n) if n > 0 => n as u64,
            _ => DEFAULT_INTERVAL_MINUTES,
        };

        Profile {
            name: self.fields[0].value().to_string(),
            base_url: self.fields[1].value().to_string(),
            route: self.fields[2].value().to_string(),
            params: parse_pairs(self.fields[3].value()),
            headers: parse_pairs(self.fields[4].value()),
            interval,
        }
    }
}

/// Parse comma-separated `key=value` pairs. The first `=` splits key from
/// value; pairs without one are dropped.
fn parse_pairs(text: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for pair in text.split(',') {
        let pair = pair.trim();
        if let Some((key, value)) = pair.split_once('=') {
            map.insert(key.to_string(), value.to_string());
        }
    }
    map
}

fn join_pairs(map: &HashMap<String, String>) -> String {
    map.iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_text_field_editing() {
        let mut field = TextField::default();
        field.handle_key(&key(KeyCode::Char('h')));
        field.handle_key(&key(KeyCode::Char('i')));
        assert_eq!(field.value(), "hi");

        field.handle_key(&key(KeyCode::Backspace));
        assert_eq!(field.value(), "h");

        // Control chords do not insert.
        field.handle_key(&KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL));
        assert_eq!(field.value(), "h");
    }

    #[test]
    fn test_focus_clamps_at_both_ends() {
        let mut form = FormBuffer::default();
        form.focus_prev();
        assert_eq!(form.focus(), 0);

        for _ in 0..10 {
            form.focus_next();
        }
        assert_eq!(form.focus(), FIELD_COUNT - 1);
        assert!(form.on_last_field());
    }

    #[test]
    fn test_parse_pairs() {
        let pairs = parse_pairs(" key1=value1 , key2=value2,malformed,k3=");
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs["key1"], "value1");
        assert_eq!(pairs["key2"], "value2");
        assert_eq!(pairs["k3"], "");
    }

    #[test]
    fn test_to_profile() {
        let mut form = FormBuffer::default();
        form.fields[0].set("api");
        form.fields[1].set("https://api.example.com");
        form.fields[2].set("/health");
        form.fields[3].set("key1=value1,key2=value2");
        form.fields[4].set("Authorization=Bearer token");
        form.fields[5].set("3");

        let profile = form.to_profile();
        assert_eq!(profile.name, "api");
        assert_eq!(profile.base_url, "https://api.example.com");
        assert_eq!(profile.route, "/health");
        assert_eq!(profile.params["key1"], "value1");
        assert_eq!(profile.headers["Authorization"], "Bearer token");
        assert_eq!(profile.interval, 3);
    }

    #[test]
    fn test_interval_fallback() {
        let mut form = FormBuffer::default();
        for text in ["", "abc", "0", "-2"] {
            form.fields[5].set(text);
            assert_eq!(form.to_profile().interval, DEFAULT_INTERVAL_MINUTES);
        }
    }

    #[test]
    fn test_load_round_trips_through_parse() {
        let profile = Profile {
            name: "api".to_string(),
            base_url: "https://api.example.com".to_string(),
            route: "/health".to_string(),
            params: HashMap::from([("key1".to_string(), "value1".to_string())]),
            headers: HashMap::from([("X-Token".to_string(), "abc".to_string())]),
            interval: 7,
        };

        let mut form = FormBuffer::default();
        form.load(&profile);
        assert!(form.is_editing());
        assert_eq!(form.focus(), 0);
        assert_eq!(form.to_profile(), profile);
    }
}
