//! Editor synchronization tests driving a scripted editor through typing
//! sessions

#[cfg(test)]
mod tests {
    use chemtyper::chem::sync::{
        key_insertion, DeleteKey, EditorSync, MathEditor, UpdateOrigin, CHEM_KEYS,
    };

    /// An editor whose cursor is always at the end of its value
    #[derive(Default)]
    struct ScriptedEditor {
        value: String,
        writes: Vec<String>,
    }

    impl ScriptedEditor {
        fn type_str(&mut self, text: &str) {
            self.value.push_str(text);
        }
    }

    impl MathEditor for ScriptedEditor {
        fn value(&self) -> String {
            self.value.clone()
        }

        fn set_value(&mut self, value: &str) {
            self.value = value.to_string();
            self.writes.push(value.to_string());
        }

        fn insert(&mut self, text: &str) {
            self.value.push_str(text);
        }
    }

    #[test]
    fn typing_a_salt_equation() {
        let mut sync = EditorSync::default();
        let mut editor = ScriptedEditor::default();

        editor.type_str("CuSO4");
        let outcome = sync.sync_editor(&mut editor).unwrap();
        assert_eq!(outcome.word, "〖Cu〗SO_4");
        assert_eq!(editor.writes, vec!["CuSO_{4}".to_string()]);

        let outcome = sync.apply_state(&mut editor, "aq").unwrap();
        assert_eq!(outcome.markup, "CuSO_{4} (aq)");
        assert_eq!(outcome.word, "〖Cu〗SO_4 (aq)");
        // Already canonical, so no second write
        assert_eq!(editor.writes.len(), 1);
    }

    #[test]
    fn keypad_arrow_then_product() {
        let mut sync = EditorSync::default();
        let mut editor = ScriptedEditor::default();
        editor.type_str("A");

        let arrow = CHEM_KEYS
            .iter()
            .find(|key| key.display == r"\rightarrow")
            .unwrap();
        sync.insert(&mut editor, arrow.insert);
        editor.type_str("B");

        let outcome = sync.sync_editor(&mut editor).unwrap();
        assert_eq!(outcome.word, "A → B");
    }

    #[test]
    fn echo_of_write_back_is_ignored() {
        let mut sync = EditorSync::default();
        let first = sync.sync_from_markup("NH4", UpdateOrigin::User).unwrap();
        assert_eq!(first.write_back.as_deref(), Some("NH_{4}"));

        assert_eq!(sync.sync_from_markup("NH_{4}", UpdateOrigin::Programmatic), None);
        assert_eq!(sync.last_markup(), "NH_{4}");
    }

    #[test]
    fn text_mirror_tracks_caret_through_expansion() {
        let mut sync = EditorSync::default();
        // Caret sits after "SO4", before " + Na"
        let outcome = sync.sync_from_text("SO4 + Na", Some(3));
        assert_eq!(outcome.text, "SO_{4} + Na");
        assert_eq!(outcome.caret, Some(6));
        assert_eq!(outcome.word, "SO_4 + 〖Na〗");
    }

    #[test]
    fn backspace_and_delete_around_states() {
        let sync = EditorSync::default();

        let text = r"NaCl\text{(aq)} + X";
        let removed = sync.delete_state(text, 15, DeleteKey::Backspace).unwrap();
        assert_eq!(removed.text, "NaCl + X");
        assert_eq!(removed.caret, Some(4));

        let removed = sync.delete_state("NaCl (s)", 4, DeleteKey::Delete).unwrap();
        assert_eq!(removed.text, "NaCl");
        assert_eq!(removed.caret, Some(4));

        assert_eq!(sync.delete_state("NaCl", 4, DeleteKey::Backspace), None);
    }

    #[test]
    fn script_keys_open_placeholders() {
        assert_eq!(key_insertion("H", '_').as_deref(), Some(r"_{\placeholder{}}"));
        assert_eq!(
            key_insertion("H_{2}", 'O').as_deref(),
            Some(r"^{\placeholder{}}O")
        );
    }
}
