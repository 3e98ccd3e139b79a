use pretty_assertions::assert_eq;
use smartenter_syntax::{LinkedNode, SourceKind, SyntaxKind, SyntaxNode, parse};

fn fragment(text: &str) -> SyntaxNode {
    parse(text, SourceKind::CodeFragment)
}

/// Node kinds in preorder, without trivia and leaves.
fn inner_kinds(node: &SyntaxNode) -> Vec<SyntaxKind> {
    let mut out = vec![];
    collect(node, &mut out);
    out
}

fn collect(node: &SyntaxNode, out: &mut Vec<SyntaxKind>) {
    if node.is_leaf() {
        return;
    }
    out.push(node.kind());
    for child in node.children() {
        collect(child, out);
    }
}

fn errors(node: &SyntaxNode) -> Vec<String> {
    node.errors().iter().map(|message| message.to_string()).collect()
}

fn first_of_kind<'a>(node: &LinkedNode<'a>, kind: SyntaxKind) -> Option<LinkedNode<'a>> {
    if node.kind() == kind {
        return Some(node.clone());
    }
    node.children().find_map(|child| first_of_kind(&child, kind))
}

#[test]
fn test_parse_is_lossless() {
    let inputs = [
        "",
        "if (x > 0",
        "foo(1, 2",
        "String s = \"hello",
        ") ) } else ;; @ #",
        "class A { void f() { for (int i = 0; i < n; i++) { } } }",
        "enum E { A\n B, C; int x; }",
        "/* open comment",
        "x = a ? b : c; y += (int) z; w = new int[] {1, {2}};",
    ];
    for text in inputs {
        assert_eq!(fragment(text).to_string(), text);
        assert_eq!(parse(text, SourceKind::CompilationUnit).to_string(), text);
    }
}

#[test]
fn test_unclosed_if_condition() {
    let root = fragment("if (x > 0");
    assert_eq!(
        inner_kinds(&root),
        vec![SyntaxKind::File, SyntaxKind::IfStatement, SyntaxKind::Binary]
    );
    assert_eq!(errors(&root), vec!["expected closing paren"]);
}

#[test]
fn test_unclosed_call() {
    let root = fragment("foo(1, 2");
    assert_eq!(
        inner_kinds(&root),
        vec![
            SyntaxKind::File,
            SyntaxKind::ExpressionStatement,
            SyntaxKind::MethodCall,
            SyntaxKind::ArgumentList,
        ]
    );
    assert_eq!(
        errors(&root),
        vec!["expected closing paren", "expected semicolon"]
    );
}

#[test]
fn test_unterminated_string_declaration() {
    let root = fragment("String s = \"hello");
    let linked = LinkedNode::new(&root);
    let statement = first_of_kind(&linked, SyntaxKind::DeclarationStatement).unwrap();
    assert_eq!(statement.range(), 0..17);
    let literal = linked.leaf_at(12).unwrap();
    assert_eq!(literal.kind(), SyntaxKind::StringLiteral);
    assert_eq!(literal.text().as_str(), "\"hello");
    assert_eq!(literal.parent_kind(), Some(SyntaxKind::LocalVariable));
}

#[test]
fn test_for_and_foreach() {
    let root = fragment("for (int i = 0; i < n; i++) {}\nfor (String s : xs) {}");
    let kinds = inner_kinds(&root);
    assert!(kinds.contains(&SyntaxKind::ForStatement));
    assert!(kinds.contains(&SyntaxKind::ForeachStatement));
    assert!(errors(&root).is_empty());

    let linked = LinkedNode::new(&root);
    let for_statement = first_of_kind(&linked, SyntaxKind::ForStatement).unwrap();
    let header: Vec<_> = for_statement
        .children()
        .filter(|child| child.kind().is_statement())
        .map(|child| child.kind())
        .collect();
    assert_eq!(
        header,
        vec![
            SyntaxKind::DeclarationStatement,
            SyntaxKind::ExpressionStatement,
            SyntaxKind::BlockStatement,
        ]
    );
}

#[test]
fn test_generic_declaration_versus_comparison() {
    let root = fragment("List<String> xs = new ArrayList<>();\nok = a < b;");
    assert!(errors(&root).is_empty());
    let kinds: Vec<_> = root.children().map(|child| child.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::DeclarationStatement,
            SyntaxKind::Whitespace,
            SyntaxKind::ExpressionStatement,
        ]
    );
}

#[test]
fn test_compilation_unit_members() {
    let text = "package a.b;\nimport java.util.*;\npublic class A {\n  int x = 1;\n  A() {}\n  int f() {\n    return\n  }\n}\n";
    let root = parse(text, SourceKind::CompilationUnit);
    let kinds = inner_kinds(&root);
    for kind in [
        SyntaxKind::PackageDeclaration,
        SyntaxKind::ImportDeclaration,
        SyntaxKind::ClassDeclaration,
        SyntaxKind::Field,
        SyntaxKind::Method,
        SyntaxKind::ReturnStatement,
    ] {
        assert!(kinds.contains(&kind), "missing {kind:?}");
    }
    assert_eq!(errors(&root), vec!["expected semicolon"]);
}

#[test]
fn test_enum_constant_missing_comma() {
    let root = parse("enum E {\n  A\n  B;\n}", SourceKind::CompilationUnit);
    let kinds = inner_kinds(&root);
    let constants = kinds
        .iter()
        .filter(|kind| **kind == SyntaxKind::EnumConstant)
        .count();
    assert_eq!(constants, 2);
    assert_eq!(errors(&root), vec!["expected comma"]);
}

#[test]
fn test_enum_constants_on_one_line() {
    let root = parse("enum E { A B }", SourceKind::CompilationUnit);
    let kinds = inner_kinds(&root);
    let constants = kinds
        .iter()
        .filter(|kind| **kind == SyntaxKind::EnumConstant)
        .count();
    assert_eq!(constants, 2);
    assert!(!kinds.contains(&SyntaxKind::Field));
    assert_eq!(errors(&root), vec!["expected comma"]);

    let root = parse("enum E { A; B b = null; }", SourceKind::CompilationUnit);
    assert!(inner_kinds(&root).contains(&SyntaxKind::Field));
    assert!(errors(&root).is_empty());
}

#[test]
fn test_member_without_name_keeps_its_semicolon() {
    let root = parse("class A {\n    String;\n}", SourceKind::CompilationUnit);
    let linked = LinkedNode::new(&root);
    let field = first_of_kind(&linked, SyntaxKind::Field).unwrap();
    assert_eq!(field.get().to_string(), "String;");
    assert_eq!(errors(&root), vec!["expected identifier"]);

    let root = parse("class A { private; }", SourceKind::CompilationUnit);
    let linked = LinkedNode::new(&root);
    let field = first_of_kind(&linked, SyntaxKind::Field).unwrap();
    assert_eq!(field.get().to_string(), "private;");
    assert_eq!(errors(&root), vec!["expected type"]);
}

#[test]
fn test_missing_if_body_and_bare_condition() {
    let root = fragment("if x\n");
    assert_eq!(
        errors(&root),
        vec!["expected opening paren", "expected statement"]
    );

    let root = fragment("while ()");
    assert_eq!(errors(&root), vec!["expected expression", "expected statement"]);
}

#[test]
fn test_do_while_and_switch() {
    let root = fragment("do { x++; } while (x < 3);\nswitch (x) {\ncase 1:\n  break;\ndefault:\n}");
    assert!(errors(&root).is_empty());
    let kinds = inner_kinds(&root);
    assert!(kinds.contains(&SyntaxKind::DoWhileStatement));
    assert!(kinds.contains(&SyntaxKind::SwitchStatement));
    assert_eq!(
        kinds
            .iter()
            .filter(|kind| **kind == SyntaxKind::SwitchLabel)
            .count(),
        2
    );
}

#[test]
fn test_try_catch_finally() {
    let root = fragment("try { a(); } catch (IOException e) { } finally { b(); }");
    assert!(errors(&root).is_empty());
    let kinds = inner_kinds(&root);
    assert!(kinds.contains(&SyntaxKind::TryStatement));
    assert!(kinds.contains(&SyntaxKind::CatchSection));
}

#[test]
fn test_stray_tokens_become_errors() {
    let root = fragment(") foo();");
    assert_eq!(errors(&root), vec!["unexpected closing paren"]);
    assert!(
        root.children()
            .any(|child| child.kind() == SyntaxKind::ExpressionStatement)
    );
}
