use pretty_assertions::assert_eq;
use smartenter_core::Editor;
use smartenter_syntax::{SourceKind, SyntaxTree};

use super::*;

fn first_of<'a>(node: LinkedNode<'a>, kind: SyntaxKind) -> Option<LinkedNode<'a>> {
    if node.kind() == kind {
        return Some(node);
    }
    node.children().find_map(|child| first_of(child, kind))
}

fn apply_in(
    source: SourceKind,
    text: &str,
    kind: SyntaxKind,
    fixer: Fixer,
) -> (String, Option<usize>, usize) {
    let mut editor = Editor::new(text).with_caret(text.len());
    let tree = SyntaxTree::parse(editor.document(), source);
    let node = first_of(tree.root(), kind).expect("node to fix");
    let mut errors = ErrorRegistry::new();
    fixer
        .apply(&mut FixContext::new(&mut editor, &mut errors), &node)
        .unwrap();
    (editor.text(), errors.first_error_offset(), editor.caret())
}

/// Fix a code fragment and return the new text and error offset.
fn apply(text: &str, kind: SyntaxKind, fixer: Fixer) -> (String, Option<usize>) {
    let (text, error, _) = apply_in(SourceKind::CodeFragment, text, kind, fixer);
    (text, error)
}

fn apply_unit(text: &str, kind: SyntaxKind, fixer: Fixer) -> (String, Option<usize>) {
    let (text, error, _) = apply_in(SourceKind::CompilationUnit, text, kind, fixer);
    (text, error)
}

/// Apply `fixer` to its own output and check that nothing changes the second time.
#[track_caller]
fn assert_settles(text: &str, kind: SyntaxKind, fixer: Fixer) {
    let (once, _) = apply(text, kind, fixer);
    let (twice, _) = apply(&once, kind, fixer);
    assert_eq!(once, twice);
}

#[test]
fn test_fixer_order() {
    assert_eq!(FIXERS.first(), Some(&Fixer::Literal));
    assert_eq!(FIXERS[7], Fixer::BlockBrace);
    assert_eq!(FIXERS[20], Fixer::Semicolon);
    assert_eq!(FIXERS.last(), Some(&Fixer::EnumField));
}

#[test]
fn test_literal() {
    let string = SyntaxKind::StringLiteral;
    assert_eq!(apply("s = \"abc", string, Fixer::Literal).0, "s = \"abc\"");
    assert_eq!(apply("s = \"abc\";", string, Fixer::Literal).0, "s = \"abc\";");
    assert_eq!(apply("c = 'x", SyntaxKind::CharLiteral, Fixer::Literal).0, "c = 'x'");
}

#[test]
fn test_method_call() {
    let call = SyntaxKind::MethodCall;
    assert_eq!(apply("foo(1, 2", call, Fixer::MethodCall), ("foo(1, 2)".into(), None));
    assert_eq!(apply("foo(a,", call, Fixer::MethodCall), ("foo(a,)".into(), Some(6)));
    assert_eq!(apply("foo(1);", call, Fixer::MethodCall), ("foo(1);".into(), None));
    assert_eq!(
        apply("x = new A(1", SyntaxKind::NewExpression, Fixer::MethodCall).0,
        "x = new A(1)"
    );
    assert_settles("foo(a, b", call, Fixer::MethodCall);
}

#[test]
fn test_conditions() {
    let ifs = SyntaxKind::IfStatement;
    assert_eq!(apply("if x > 0", ifs, Fixer::IfCondition), ("if (x > 0)".into(), None));
    assert_eq!(apply("if", ifs, Fixer::IfCondition), ("if()".into(), Some(3)));
    assert_eq!(apply("if (x > 0", ifs, Fixer::IfCondition), ("if (x > 0)".into(), None));
    assert_eq!(apply("if (a) {}", ifs, Fixer::IfCondition), ("if (a) {}".into(), None));
    assert_eq!(
        apply("while (", SyntaxKind::WhileStatement, Fixer::WhileCondition),
        ("while ()".into(), Some(7))
    );
    assert_eq!(
        apply("switch (x", SyntaxKind::SwitchStatement, Fixer::SwitchExpression).0,
        "switch (x)"
    );
    assert_settles("if (x > 0", ifs, Fixer::IfCondition);
}

#[test]
fn test_do_while_condition() {
    let kind = SyntaxKind::DoWhileStatement;
    assert_eq!(
        apply("do {}", kind, Fixer::DoWhileCondition),
        ("do {} while ()".into(), Some(13))
    );
    assert_eq!(
        apply("do {} while (a", kind, Fixer::DoWhileCondition),
        ("do {} while (a)".into(), None)
    );
}

#[test]
fn test_catch_declaration() {
    let kind = SyntaxKind::CatchSection;
    assert_eq!(
        apply("try {} catch {}", kind, Fixer::CatchDeclaration),
        ("try {} catch() {}".into(), Some(13))
    );
    assert_eq!(
        apply("try {} catch (E e", kind, Fixer::CatchDeclaration),
        ("try {} catch (E e)".into(), None)
    );
}

#[test]
fn test_block_brace() {
    let kind = SyntaxKind::WhileStatement;
    assert_eq!(
        apply("while (a)\n    foo();", kind, Fixer::BlockBrace).0,
        "while (a){\n    foo();\n}"
    );
    assert_eq!(apply("while (a) foo();", kind, Fixer::BlockBrace).0, "while (a) foo();");
    assert_eq!(apply("while (a)\nfoo();", kind, Fixer::BlockBrace).0, "while (a)\nfoo();");
    assert_eq!(
        apply("while (a)\n    foo(", kind, Fixer::BlockBrace),
        ("while (a)\n    foo(".into(), Some(14))
    );
}

#[test]
fn test_missing_bodies() {
    let (text, _, caret) =
        apply_in(SourceKind::CodeFragment, "if (a)", SyntaxKind::IfStatement, Fixer::MissingIfBranches);
    assert_eq!((text.as_str(), caret), ("if (a){}", 6));
    assert_eq!(
        apply("if (a) b(); else", SyntaxKind::IfStatement, Fixer::MissingIfBranches).0,
        "if (a) b(); else{}"
    );
    assert_eq!(
        apply("while (a)\nfoo();", SyntaxKind::WhileStatement, Fixer::MissingWhileBody).0,
        "while (a){}\nfoo();"
    );
    assert_eq!(
        apply("while (a)\n{\n}", SyntaxKind::WhileStatement, Fixer::MissingWhileBody).0,
        "while (a)\n{\n}"
    );
    assert_eq!(
        apply("switch (x)", SyntaxKind::SwitchStatement, Fixer::MissingSwitchBody).0,
        "switch (x){}"
    );
    assert_eq!(
        apply("try {} catch (E e)", SyntaxKind::CatchSection, Fixer::MissingCatchBody).0,
        "try {} catch (E e){}"
    );
    assert_eq!(
        apply(
            "synchronized (lock)",
            SyntaxKind::SynchronizedStatement,
            Fixer::MissingSynchronizedBody
        )
        .0,
        "synchronized (lock){}"
    );
    assert_settles("if (a)", SyntaxKind::IfStatement, Fixer::MissingIfBranches);
}

#[test]
fn test_for_header_is_closed_in_one_edit() {
    let kind = SyntaxKind::ForStatement;
    let cases = [
        ("for (int i = 0", "for (int i = 0;;){}"),
        ("for (int i = 0;", "for (int i = 0;;){}"),
        ("for (int i = 0; i < n", "for (int i = 0; i < n;){}"),
        ("for (int i = 0; i < n; i++", "for (int i = 0; i < n; i++){}"),
        ("for (int i = 0; i < n; i++)", "for (int i = 0; i < n; i++){}"),
        ("for", "for"),
        (
            "for (int i = 0; i < n; i++\n    foo();",
            "for (int i = 0; i < n; i++)\n    foo();",
        ),
    ];
    for (text, expected) in cases {
        assert_eq!(apply(text, kind, Fixer::MissingForBody).0, expected, "{text}");
        assert_settles(text, kind, Fixer::MissingForBody);
    }

    let (_, _, caret) =
        apply_in(SourceKind::CodeFragment, "for (int i = 0", kind, Fixer::MissingForBody);
    assert_eq!(caret, 17);
}

#[test]
fn test_foreach_body() {
    let kind = SyntaxKind::ForeachStatement;
    assert_eq!(
        apply("for (String s : list", kind, Fixer::MissingForeachBody).0,
        "for (String s : list){}"
    );
    assert_eq!(
        apply("for (String s : list)", kind, Fixer::MissingForeachBody).0,
        "for (String s : list){}"
    );
    assert_settles("for (String s : list", kind, Fixer::MissingForeachBody);
}

#[test]
fn test_synchronized_body() {
    let kind = SyntaxKind::SynchronizedStatement;
    assert_eq!(
        apply("synchronized (l", kind, Fixer::MissingSynchronizedBody),
        ("synchronized (l){}".into(), None)
    );
    assert_eq!(
        apply("synchronized (", kind, Fixer::MissingSynchronizedBody),
        ("synchronized (){}".into(), Some(14))
    );
    assert_eq!(
        apply("synchronized (l) {}", kind, Fixer::MissingSynchronizedBody),
        ("synchronized (l) {}".into(), None)
    );
    assert_settles("synchronized (l", kind, Fixer::MissingSynchronizedBody);
}

#[test]
fn test_method_body() {
    let kind = SyntaxKind::Method;
    assert_eq!(
        apply_unit("class A { void foo() }", kind, Fixer::MissingMethodBody).0,
        "class A { void foo(){} }"
    );
    assert_eq!(
        apply_unit("interface I { void foo() }", kind, Fixer::MissingMethodBody).0,
        "interface I { void foo() }"
    );
    assert_eq!(
        apply_unit("class A { abstract void foo() }", kind, Fixer::MissingMethodBody).0,
        "class A { abstract void foo() }"
    );
    assert_eq!(
        apply_unit("class A { abstract void foo() }", kind, Fixer::Semicolon).0,
        "class A { abstract void foo(); }"
    );
}

#[test]
fn test_return_and_throw() {
    let kind = SyntaxKind::ReturnStatement;
    assert_eq!(
        apply_unit("class A { int f() { return; } }", kind, Fixer::MissingReturnExpression).1,
        Some(26)
    );
    assert_eq!(
        apply_unit("class A { void f() { return; } }", kind, Fixer::MissingReturnExpression).1,
        None
    );
    assert_eq!(
        apply_unit("class A { A() { return; } }", kind, Fixer::MissingReturnExpression).1,
        None
    );
    assert_eq!(apply("return x;", kind, Fixer::MissingReturnExpression).1, None);
    assert_eq!(
        apply("throw", SyntaxKind::ThrowStatement, Fixer::MissingThrowExpression).1,
        Some(5)
    );
}

#[test]
fn test_closers() {
    assert_eq!(
        apply_unit("class A { void f(int a }", SyntaxKind::ParameterList, Fixer::ParameterList).0,
        "class A { void f(int a) }"
    );
    assert_eq!(
        apply("x = (a + b", SyntaxKind::Parenthesized, Fixer::Parenthesized).0,
        "x = (a + b)"
    );
    assert_eq!(
        apply(
            "int[] a = {1, 2",
            SyntaxKind::ArrayInitializer,
            Fixer::MissingArrayInitializerBrace
        )
        .0,
        "int[] a = {1, 2}"
    );
}

#[test]
fn test_semicolon() {
    let statement = SyntaxKind::ExpressionStatement;
    assert_eq!(apply("foo()", statement, Fixer::Semicolon), ("foo();".into(), None));
    assert_eq!(apply("foo();", statement, Fixer::Semicolon), ("foo();".into(), None));
    assert_eq!(
        apply("int x =", SyntaxKind::DeclarationStatement, Fixer::Semicolon),
        ("int x =;".into(), Some(7))
    );
    assert_eq!(apply("for (i = 0", statement, Fixer::Semicolon).0, "for (i = 0");
    assert_eq!(apply("break", SyntaxKind::BreakStatement, Fixer::Semicolon).0, "break;");
    assert_settles("a.b()", statement, Fixer::Semicolon);
    assert_settles("s = \"abc", statement, Fixer::Semicolon);
}

#[test]
fn test_semicolon_on_incomplete_declarations() {
    let field = SyntaxKind::Field;
    let (once, error) = apply_unit("class A { void f() {} C }", field, Fixer::Semicolon);
    assert_eq!((once.as_str(), error), ("class A { void f() {} C; }", Some(23)));
    assert_eq!(apply_unit(&once, field, Fixer::Semicolon).0, once);

    assert_eq!(
        apply_unit("class A { private; }", field, Fixer::Semicolon),
        ("class A { private; }".into(), Some(17))
    );
    assert_eq!(
        apply("synchronized", SyntaxKind::DeclarationStatement, Fixer::Semicolon),
        ("synchronized".into(), Some(12))
    );
}

#[test]
fn test_enum_constants() {
    let kind = SyntaxKind::EnumConstant;
    assert_eq!(
        apply_unit("enum E { A\n B }", kind, Fixer::EnumField).0,
        "enum E { A,\n B }"
    );
    assert_eq!(
        apply_unit("enum E { A\n String name; }", kind, Fixer::EnumField).0,
        "enum E { A;\n String name; }"
    );
    assert_eq!(apply_unit("enum E { A, B }", kind, Fixer::EnumField).0, "enum E { A, B }");
    assert_eq!(apply_unit("enum E { A B }", kind, Fixer::EnumField).0, "enum E { A, B }");
    assert_eq!(
        apply_unit("enum E { A; B b = null; }", kind, Fixer::EnumField).0,
        "enum E { A; B b = null; }"
    );
}

/// Run `fixer` over `node` and its descendants in preorder until it edits the document.
fn fix_preorder(
    cx: &mut FixContext,
    tree: &SyntaxTree,
    node: &LinkedNode,
    fixer: Fixer,
) -> bool {
    fixer.apply(cx, node).unwrap();
    !tree.is_committed(cx.editor.document())
        || node.children().any(|child| fix_preorder(cx, tree, &child, fixer))
}

fn fix_once(source: SourceKind, text: &str, fixer: Fixer) -> String {
    let mut editor = Editor::new(text).with_caret(text.len());
    let tree = SyntaxTree::parse(editor.document(), source);
    let mut errors = ErrorRegistry::new();
    fix_preorder(&mut FixContext::new(&mut editor, &mut errors), &tree, &tree.root(), fixer);
    editor.text()
}

#[test]
fn test_every_fixer_settles_on_its_own_output() {
    let inputs = [
        (SourceKind::CodeFragment, "foo(1, 2"),
        (SourceKind::CodeFragment, "if x > 0"),
        (SourceKind::CodeFragment, "while (a"),
        (SourceKind::CodeFragment, "do {} while (a"),
        (SourceKind::CodeFragment, "switch (x"),
        (SourceKind::CodeFragment, "try {} catch (E e"),
        (SourceKind::CodeFragment, "while (a)\n    foo();"),
        (SourceKind::CodeFragment, "if (a) b(); else"),
        (SourceKind::CodeFragment, "synchronized (l"),
        (SourceKind::CodeFragment, "synchronized"),
        (SourceKind::CodeFragment, "for (int i = 0"),
        (SourceKind::CodeFragment, "for (int i = 0; i < n"),
        (SourceKind::CodeFragment, "for (String s : list"),
        (SourceKind::CodeFragment, "x = (a + b"),
        (SourceKind::CodeFragment, "int[] a = {1, 2"),
        (SourceKind::CodeFragment, "s = \"abc"),
        (SourceKind::CodeFragment, "return x"),
        (SourceKind::CodeFragment, "throw"),
        (SourceKind::CompilationUnit, "class A { void f(int a }"),
        (SourceKind::CompilationUnit, "class A { void foo() }"),
        (SourceKind::CompilationUnit, "class A {\n    String\n}"),
        (SourceKind::CompilationUnit, "class A {\n    private int\n}"),
        (SourceKind::CompilationUnit, "class A { private; }"),
        (SourceKind::CompilationUnit, "enum E { A B }"),
        (SourceKind::CompilationUnit, "enum E {\n    A\n    B\n}"),
        (SourceKind::CompilationUnit, "enum E {\n    A\n    String name;\n}"),
        (SourceKind::CompilationUnit, "class A { int f() { return; } }"),
    ];
    for (source, text) in inputs {
        for fixer in FIXERS {
            let once = fix_once(source, text, fixer);
            let twice = fix_once(source, &once, fixer);
            assert_eq!(once, twice, "{fixer:?} on {text:?}");
        }
    }
}

#[test]
fn test_fixers_ignore_complete_code() {
    let text = "if (a) {\n    foo(1);\n}";
    let mut editor = Editor::new(text);
    let tree = SyntaxTree::parse(editor.document(), SourceKind::CodeFragment);
    let mut errors = ErrorRegistry::new();
    for node in tree.root().children().chain(first_of(tree.root(), SyntaxKind::MethodCall)) {
        for fixer in FIXERS {
            fixer
                .apply(&mut FixContext::new(&mut editor, &mut errors), &node)
                .unwrap();
        }
    }
    assert_eq!(editor.text(), text);
    assert!(errors.is_empty());
}
