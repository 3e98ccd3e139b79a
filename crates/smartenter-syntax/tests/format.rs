use pretty_assertions::assert_eq;
use smartenter_core::Editor;
use smartenter_lang::CodeStyle;
use smartenter_syntax::{SourceKind, SyntaxTree, reformat};
use std::ops::Range;

fn reformatted(text: &str, kind: SourceKind, range: Range<usize>, style: &CodeStyle) -> String {
    let mut editor = Editor::new(text);
    let tree = SyntaxTree::parse(editor.document(), kind);
    let edits = reformat(&tree, range, style);
    editor.apply_edits(&edits).unwrap();
    editor.text()
}

fn whole(text: &str, kind: SourceKind, style: &CodeStyle) -> String {
    reformatted(text, kind, 0..text.len(), style)
}

#[test]
fn test_reindents_class_body() {
    let text = "class A {\nvoid f() {\nx();\n}\n}";
    assert_eq!(
        whole(text, SourceKind::CompilationUnit, &CodeStyle::default()),
        "class A {\n    void f() {\n        x();\n    }\n}"
    );
}

#[test]
fn test_spaces_around_control_keywords_and_braces() {
    let text = "if(a){b();}else{c();}";
    assert_eq!(
        whole(text, SourceKind::CodeFragment, &CodeStyle::default()),
        "if (a) {b();} else {c();}"
    );
}

#[test]
fn test_empty_block_expands_unless_kept_on_one_line() {
    let text = "while (a) {}";
    assert_eq!(
        whole(text, SourceKind::CodeFragment, &CodeStyle::default()),
        "while (a) {}"
    );
    let style = CodeStyle::default().with_keep_simple_blocks_in_one_line(false);
    assert_eq!(
        whole(text, SourceKind::CodeFragment, &style),
        "while (a) {\n}"
    );
}

#[test]
fn test_blank_lines_are_capped() {
    let text = "a();\n\n\n\n\nb();";
    let style = CodeStyle::default().with_keep_blank_lines(1);
    assert_eq!(
        whole(text, SourceKind::CodeFragment, &style),
        "a();\n\nb();"
    );
}

#[test]
fn test_unbraced_body_is_indented_with_tabs() {
    let text = "for (int i = 0; i < n; i++)\nx();";
    let style = CodeStyle::default().with_tabs(true);
    assert_eq!(
        whole(text, SourceKind::CodeFragment, &style),
        "for (int i = 0; i < n; i++)\n\tx();"
    );
}

#[test]
fn test_only_gaps_touching_the_range_change() {
    let text = "if(a){}\nif(b){}";
    let second = text.rfind("if").unwrap();
    assert_eq!(
        reformatted(
            text,
            SourceKind::CodeFragment,
            second..text.len(),
            &CodeStyle::default()
        ),
        "if(a){}\nif (b) {}"
    );
}

#[test]
fn test_reformat_of_formatted_code_is_empty() {
    let text = "class A {\n    int f() {\n        return 1;\n    }\n}";
    let editor = Editor::new(text);
    let tree = SyntaxTree::parse(editor.document(), SourceKind::CompilationUnit);
    assert!(reformat(&tree, 0..text.len(), &CodeStyle::default()).is_empty());
}
