use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smartenter_core::{Editor, Key, TextEdit};
use smartenter_lang::CodeStyle;

#[test]
fn test_insert_at_caret_keeps_caret_before_text() {
    let mut editor = Editor::new("foo(1").with_caret(5);
    editor.insert(5, ")").unwrap();
    assert_eq!(editor.text(), "foo(1)");
    assert_eq!(editor.caret(), 5);

    editor.insert(0, "  ").unwrap();
    assert_eq!(editor.caret(), 7);
}

#[test]
fn test_caret_inside_replaced_range_moves_to_end() {
    let mut editor = Editor::new("a    b").with_caret(3);
    editor.replace(1, 5, " ").unwrap();
    assert_eq!(editor.text(), "a b");
    assert_eq!(editor.caret(), 2);
}

#[test]
fn test_move_caret_clamps() {
    let mut editor = Editor::new("é");
    editor.move_caret_to(1);
    assert_eq!(editor.caret(), 0);
    editor.move_caret_to(42);
    assert_eq!(editor.caret(), 2);
}

#[test]
fn test_apply_edits_in_descending_order() {
    let mut editor = Editor::new("if(x){}").with_caret(6);
    editor
        .apply_edits(&[TextEdit::insert(2, " "), TextEdit::insert(5, " "), TextEdit::insert(6, "\n")])
        .unwrap();
    assert_eq!(editor.text(), "if (x) {\n}");
    assert_eq!(editor.caret(), 8);
}

#[test]
fn test_range_marker_follows_edits() {
    let mut editor = Editor::new("foo(1, 2)");
    let marker = editor.create_range_marker(0..9);
    editor.insert(9, ";").unwrap();
    assert_eq!(editor.range_marker(marker), Some(0..9));
    editor.insert(0, "  ").unwrap();
    assert_eq!(editor.range_marker(marker), Some(2..11));
    editor.replace(7, 8, "   ").unwrap();
    assert_eq!(editor.range_marker(marker), Some(2..13));
    editor.release_range_marker(marker);
    assert_eq!(editor.range_marker(marker), None);
}

#[test]
fn test_user_data() {
    const STAMP: Key<u64> = Key::new("stamp");
    const OTHER: Key<String> = Key::new("other");

    let mut editor = Editor::new("");
    assert_eq!(editor.user_data(&STAMP), None);
    editor.put_user_data(&STAMP, Some(7));
    editor.put_user_data(&OTHER, Some("x".to_string()));
    assert_eq!(editor.user_data(&STAMP), Some(&7));
    editor.put_user_data(&STAMP, None);
    assert_eq!(editor.user_data(&STAMP), None);
    assert_eq!(editor.user_data(&OTHER).map(String::as_str), Some("x"));
}

#[test]
fn test_insert_newline_keeps_indentation() {
    let style = CodeStyle::default();
    let mut editor = Editor::new("    foo();").with_caret(10);
    editor.insert_newline(&style).unwrap();
    assert_eq!(editor.text(), "    foo();\n    ");
    assert_eq!(editor.caret(), 15);
}

#[test]
fn test_insert_newline_after_open_brace() {
    let style = CodeStyle::default();
    let mut editor = Editor::new("  while (x) {\n  }").with_caret(13);
    editor.insert_newline(&style).unwrap();
    assert_eq!(editor.text(), "  while (x) {\n      \n  }");
    assert_eq!(editor.caret(), 20);
}

#[test]
fn test_insert_newline_between_braces_on_one_line() {
    let style = CodeStyle::default().with_tabs(true);
    let mut editor = Editor::new("\tvoid f() {  }").with_caret(11);
    editor.insert_newline(&style).unwrap();
    assert_eq!(editor.text(), "\tvoid f() {\n\t\t\n\t}");
    assert_eq!(editor.caret(), 14);
}

#[test]
fn test_start_new_line_goes_to_line_end() {
    let style = CodeStyle::default();
    let mut editor = Editor::new("int x = 1; // one\nint y;").with_caret(4);
    editor.start_new_line(&style).unwrap();
    assert_eq!(editor.text(), "int x = 1; // one\n\nint y;");
    assert_eq!(editor.caret(), 18);
}

#[test]
fn test_random_edits_keep_marker_on_its_text() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..200 {
        let mut editor = Editor::new("aaaa[MARK]bbbb");
        let marker = editor.create_range_marker(4..10);
        for _ in 0..8 {
            let range = editor.range_marker(marker).unwrap();
            let len = editor.document().len();
            // Edit strictly outside the marked text.
            let (from, to) = if rng.gen_bool(0.5) {
                let to = rng.gen_range(0..=range.start);
                (rng.gen_range(0..=to), to)
            } else {
                let from = rng.gen_range(range.end..=len);
                (from, rng.gen_range(from..=len))
            };
            let text = "x".repeat(rng.gen_range(0..4));
            editor.replace(from, to, &text).unwrap();
        }
        let range = editor.range_marker(marker).unwrap();
        assert_eq!(editor.document().slice(range).unwrap(), "[MARK]");
    }
}
