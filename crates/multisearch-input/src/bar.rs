//! Search-bar state.
//!
//! [`SearchBar`] holds what a text box and its dropdown need: the typed text,
//! whether the menu is open, and whether the input has focus. The selected
//! field lives in the engine; every action takes the engine and talks to it
//! through its control surface only.

use multisearch::{Engine, FieldKey, Searchable};
use tracing::debug;

use crate::error::InputError;
use crate::shorthand::{parse_shorthand, parse_shorthand_strict};

/// A key press delivered to the search input or its menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    Backspace,
    ArrowDown,
    Tab,
    Char(char),
}

/// What the host should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The bar consumed the key.
    Handled,
    /// The bar did nothing; the host may apply its default behavior.
    Ignored,
    /// Move focus to the first menu entry.
    FocusMenu,
}

/// Which list the dropdown shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShownMenu {
    /// The declared fields, for picking a search target.
    Fields,
    /// Suggestions for the selected field.
    Suggestions,
}

/// Input text and dropdown state for one engine.
#[derive(Debug, Clone, Default)]
pub struct SearchBar {
    text: String,
    menu_open: bool,
    explicit_all: bool,
    focused: bool,
}

impl SearchBar {
    pub fn new() -> Self {
        SearchBar::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn open_menu(&mut self) {
        self.menu_open = true;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    /// Replaces the input text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Clears the text, targets all fields and opens the menu.
    pub fn clear_input<T: Searchable>(&mut self, engine: &mut Engine<T>) {
        self.text.clear();
        engine.select_field(FieldKey::All);
        self.menu_open = true;
        self.focused = true;
    }

    /// Handles a key press in the input.
    pub fn key<T: Searchable>(&mut self, engine: &mut Engine<T>, key: Key) -> KeyOutcome {
        let on_all = engine.selected_field().is_all();
        match key {
            Key::Enter if !self.text.is_empty() => {
                self.commit(engine);
                KeyOutcome::Handled
            }
            Key::Escape => {
                if self.text.is_empty() && !on_all && !self.menu_open {
                    engine.select_field(FieldKey::All);
                    self.menu_open = true;
                } else {
                    self.menu_open = false;
                }
                KeyOutcome::Handled
            }
            Key::Backspace if self.text.is_empty() && !on_all => {
                engine.select_field(FieldKey::All);
                self.menu_open = true;
                KeyOutcome::Handled
            }
            Key::Backspace => {
                self.text.pop();
                KeyOutcome::Handled
            }
            Key::Char(':') if on_all => {
                let label = self.text.split(':').next().unwrap_or_default().to_lowercase();
                let named = engine.fields().by_label(&label).map(|f| f.name().to_string());
                match named {
                    Some(name) => {
                        self.text.clear();
                        self.select(engine, FieldKey::named(name));
                    }
                    None => self.text.push(':'),
                }
                KeyOutcome::Handled
            }
            Key::Char(c) => {
                self.text.push(c);
                KeyOutcome::Handled
            }
            Key::ArrowDown if self.menu_open => KeyOutcome::FocusMenu,
            _ => KeyOutcome::Ignored,
        }
    }

    /// Handles a key press while focus is in the menu.
    pub fn menu_key(&mut self, key: Key) -> KeyOutcome {
        match key {
            Key::Tab | Key::Escape => {
                self.menu_open = false;
                KeyOutcome::Handled
            }
            _ => KeyOutcome::Ignored,
        }
    }

    /// Adds the current text as a clause for the selected field.
    pub fn submit<T: Searchable>(&mut self, engine: &mut Engine<T>) -> Result<(), InputError> {
        if self.text.trim().is_empty() {
            return Err(InputError::EmptyQuery);
        }
        self.commit(engine);
        Ok(())
    }

    /// Handles pasted text.
    ///
    /// `Label:value` text selects the labeled field and takes the value as
    /// the input text. Returns `true` if the paste was consumed that way;
    /// otherwise the host should insert the text itself.
    pub fn paste<T: Searchable>(&mut self, engine: &mut Engine<T>, pasted: &str) -> bool {
        let Some((field, value)) = parse_shorthand(engine.fields(), pasted) else {
            return false;
        };
        let (name, value) = (field.name().to_string(), value.to_string());
        debug!(field = %name, "pasted shorthand");
        self.text = value;
        self.select(engine, FieldKey::named(name));
        true
    }

    /// Handles the input gaining focus.
    pub fn focus<T: Searchable>(&mut self, engine: &Engine<T>) {
        self.focused = true;
        if !self.text.is_empty() {
            return;
        }
        let selected = engine.selected_field();
        if (selected.is_all() && !self.explicit_all) || engine.fields().offers_suggestions(selected) {
            self.menu_open = true;
        }
    }

    /// Handles the input losing focus.
    pub fn blur(&mut self) {
        self.focused = false;
        self.explicit_all = false;
    }

    /// Picks a search target from the menu.
    pub fn choose_field<T: Searchable>(&mut self, engine: &mut Engine<T>, field: impl Into<FieldKey>) {
        let field = field.into();
        if field.is_all() {
            self.explicit_all = true;
        }
        self.focused = true;
        self.select(engine, field);
    }

    /// Picks a search target by its label.
    pub fn choose_field_by_label<T: Searchable>(
        &mut self,
        engine: &mut Engine<T>,
        label: &str,
    ) -> Result<(), InputError> {
        let name = engine
            .fields()
            .by_label(label)
            .map(|f| f.name().to_string())
            .ok_or_else(|| InputError::unknown_label(label))?;
        self.choose_field(engine, FieldKey::named(name));
        Ok(())
    }

    /// Picks a suggestion, adding it as a clause for the selected field.
    pub fn choose_suggestion<T: Searchable>(&mut self, engine: &mut Engine<T>, value: &str) -> bool {
        let added = engine.select_suggestion(value);
        self.text.clear();
        self.menu_open = false;
        self.focused = true;
        added
    }

    /// Applies `Label:value` text in one step, adding the clause.
    pub fn submit_shorthand<T: Searchable>(
        &mut self,
        engine: &mut Engine<T>,
        text: &str,
    ) -> Result<(), InputError> {
        let (field, value) = parse_shorthand_strict(engine.fields(), text)?;
        let (name, value) = (field.name().to_string(), value.to_string());
        engine.select_field(FieldKey::named(name));
        self.text = value;
        self.submit(engine)
    }

    /// The list the dropdown should show.
    pub fn shown_menu<T: Searchable>(&self, engine: &Engine<T>) -> ShownMenu {
        if self.focused && engine.fields().offers_suggestions(engine.selected_field()) {
            ShownMenu::Suggestions
        } else {
            ShownMenu::Fields
        }
    }

    fn select<T: Searchable>(&mut self, engine: &mut Engine<T>, field: FieldKey) {
        self.menu_open = engine.fields().offers_suggestions(&field);
        engine.select_field(field);
    }

    fn commit<T: Searchable>(&mut self, engine: &mut Engine<T>) {
        let field = engine.selected_field().clone();
        engine.add_clause(field, &self.text);
        self.text.clear();
        self.menu_open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use multisearch::FieldDescriptor;
    use serde_json::{json, Value as Json};

    fn engine() -> Engine<Json> {
        Engine::builder()
            .field(FieldDescriptor::new("name", "Name"))
            .field(FieldDescriptor::new("isEmployed", "Is Employed").with_suggestions())
            .source(vec![
                json!({"name": "Bob", "isEmployed": false}),
                json!({"name": "Eve", "isEmployed": true}),
            ])
            .build()
            .unwrap()
    }

    fn type_text<T: Searchable>(bar: &mut SearchBar, engine: &mut Engine<T>, text: &str) {
        for c in text.chars() {
            bar.key(engine, Key::Char(c));
        }
    }

    #[test]
    fn enter_adds_clause_and_resets() {
        let (mut bar, mut engine) = (SearchBar::new(), engine());
        type_text(&mut bar, &mut engine, "bob");
        assert_eq!(bar.key(&mut engine, Key::Enter), KeyOutcome::Handled);
        assert_eq!(engine.clauses().len(), 1);
        assert!(bar.text().is_empty());
        assert!(!bar.is_menu_open());
    }

    #[test]
    fn enter_on_empty_text_is_ignored() {
        let (mut bar, mut engine) = (SearchBar::new(), engine());
        assert_eq!(bar.key(&mut engine, Key::Enter), KeyOutcome::Ignored);
        assert!(engine.clauses().is_empty());
    }

    #[test]
    fn typed_label_selects_field() {
        let (mut bar, mut engine) = (SearchBar::new(), engine());
        type_text(&mut bar, &mut engine, "is employed:");
        assert_eq!(engine.selected_field(), &FieldKey::named("isEmployed"));
        assert!(bar.text().is_empty());
        assert!(bar.is_menu_open());
        assert_eq!(engine.selected_suggestions().unwrap(), ["Yes", "No"]);
    }

    #[test]
    fn unknown_label_keeps_colon() {
        let (mut bar, mut engine) = (SearchBar::new(), engine());
        type_text(&mut bar, &mut engine, "12:30");
        assert_eq!(bar.text(), "12:30");
        assert!(engine.selected_field().is_all());
    }

    #[test]
    fn label_is_read_up_to_the_first_colon() {
        let (mut bar, mut engine) = (SearchBar::new(), engine());
        bar.set_text("Name:bob");
        bar.key(&mut engine, Key::Char(':'));
        assert_eq!(engine.selected_field(), &FieldKey::named("name"));
        assert!(bar.text().is_empty());
    }

    #[test]
    fn colon_inside_a_field_query_is_text() {
        let (mut bar, mut engine) = (SearchBar::new(), engine());
        type_text(&mut bar, &mut engine, "name:a:b");
        assert_eq!(engine.selected_field(), &FieldKey::named("name"));
        assert_eq!(bar.text(), "a:b");
    }

    #[test]
    fn backspace_on_empty_text_resets_field() {
        let (mut bar, mut engine) = (SearchBar::new(), engine());
        type_text(&mut bar, &mut engine, "name:x");
        bar.key(&mut engine, Key::Backspace);
        assert_eq!(engine.selected_field(), &FieldKey::named("name"));
        bar.key(&mut engine, Key::Backspace);
        assert!(engine.selected_field().is_all());
        assert!(bar.is_menu_open());
    }

    #[test]
    fn escape_closes_then_resets() {
        let (mut bar, mut engine) = (SearchBar::new(), engine());
        type_text(&mut bar, &mut engine, "is employed:");
        assert!(bar.is_menu_open());

        bar.key(&mut engine, Key::Escape);
        assert!(!bar.is_menu_open());
        assert_eq!(engine.selected_field(), &FieldKey::named("isEmployed"));

        bar.key(&mut engine, Key::Escape);
        assert!(engine.selected_field().is_all());
        assert!(bar.is_menu_open());
    }

    #[test]
    fn arrow_down_focuses_open_menu() {
        let (mut bar, mut engine) = (SearchBar::new(), engine());
        assert_eq!(bar.key(&mut engine, Key::ArrowDown), KeyOutcome::Ignored);
        bar.open_menu();
        assert_eq!(bar.key(&mut engine, Key::ArrowDown), KeyOutcome::FocusMenu);
        assert_eq!(bar.menu_key(Key::Tab), KeyOutcome::Handled);
        assert!(!bar.is_menu_open());
    }

    #[test]
    fn paste_shorthand() {
        let (mut bar, mut engine) = (SearchBar::new(), engine());
        assert!(bar.paste(&mut engine, "Name:eve"));
        assert_eq!(engine.selected_field(), &FieldKey::named("name"));
        assert_eq!(bar.text(), "eve");
        assert!(!bar.is_menu_open());

        assert!(!bar.paste(&mut engine, "plain text"));
    }

    #[test]
    fn focus_opens_menu_unless_all_was_explicit() {
        let (mut bar, mut engine) = (SearchBar::new(), engine());
        bar.focus(&engine);
        assert!(bar.is_menu_open());

        bar.close_menu();
        bar.choose_field(&mut engine, FieldKey::All);
        bar.blur();
        bar.choose_field(&mut engine, FieldKey::All);
        bar.close_menu();
        bar.focus(&engine);
        assert!(!bar.is_menu_open());

        bar.blur();
        bar.focus(&engine);
        assert!(bar.is_menu_open());
    }

    #[test]
    fn focus_on_suggestion_field_opens_menu() {
        let (mut bar, mut engine) = (SearchBar::new(), engine());
        bar.choose_field(&mut engine, "isEmployed");
        bar.close_menu();
        bar.blur();
        bar.focus(&engine);
        assert!(bar.is_menu_open());
        assert_eq!(bar.shown_menu(&engine), ShownMenu::Suggestions);
    }

    #[test]
    fn choosing_a_suggestion_adds_a_clause() {
        let (mut bar, mut engine) = (SearchBar::new(), engine());
        bar.choose_field_by_label(&mut engine, "is employed").unwrap();
        assert!(bar.choose_suggestion(&mut engine, "Yes"));
        engine.sync();
        assert_eq!(engine.records()[0]["name"], "Eve");
        assert_eq!(bar.shown_menu(&engine), ShownMenu::Fields);
    }

    #[test]
    fn submit_reports_empty_text() {
        let (mut bar, mut engine) = (SearchBar::new(), engine());
        bar.set_text("  ");
        assert!(matches!(bar.submit(&mut engine), Err(InputError::EmptyQuery)));
    }

    #[test]
    fn clear_input_resets_everything() {
        let (mut bar, mut engine) = (SearchBar::new(), engine());
        type_text(&mut bar, &mut engine, "name:bo");
        bar.clear_input(&mut engine);
        assert!(bar.text().is_empty());
        assert!(engine.selected_field().is_all());
        assert!(bar.is_menu_open());
    }
}
