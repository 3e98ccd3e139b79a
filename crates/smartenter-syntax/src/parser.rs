use ecow::{EcoString, eco_format};

use crate::lexer::Lexer;
use crate::{SourceKind, SyntaxKind, SyntaxNode};

/// Message of the zero-length error node inserted where an expression is missing.
pub const MISSING_EXPRESSION: &str = "expected expression";

/// Message of the zero-length error node inserted where an identifier is missing.
pub const MISSING_IDENTIFIER: &str = "expected identifier";

/// Message of the zero-length error node inserted where a type is missing.
pub const MISSING_TYPE: &str = "expected type";

/// Parses a source file.
///
/// Parsing never fails: missing pieces become zero-length error nodes and stray tokens
/// become error nodes holding their text.
pub fn parse(text: &str, kind: SourceKind) -> SyntaxNode {
    let mut p = Parser::new(text);
    match kind {
        SourceKind::CompilationUnit => compilation_unit(&mut p),
        SourceKind::CodeFragment => code_fragment(&mut p),
    }
    p.finish_into(SyntaxKind::File)
}

/// Parses package, import and type declarations.
fn compilation_unit(p: &mut Parser) {
    while !p.end() {
        let before = p.cursor();
        match p.current() {
            SyntaxKind::Package => qualified_declaration(p, SyntaxKind::PackageDeclaration),
            SyntaxKind::Import => qualified_declaration(p, SyntaxKind::ImportDeclaration),
            SyntaxKind::Semicolon => p.eat(),
            SyntaxKind::RightBrace => p.unexpected(),
            _ => member(p),
        }
        if p.cursor() == before {
            p.unexpected();
        }
    }
}

/// Parses a sequence of block statements.
fn code_fragment(p: &mut Parser) {
    while !p.end() {
        let before = p.cursor();
        if p.at(SyntaxKind::RightBrace) {
            p.unexpected();
            continue;
        }
        block_statement(p);
        if p.cursor() == before {
            p.unexpected();
        }
    }
}

/// Parses `package a.b;` or `import static a.b.*;`.
fn qualified_declaration(p: &mut Parser, kind: SyntaxKind) {
    let m = p.marker();
    p.eat();
    p.eat_if(SyntaxKind::Modifier);
    if p.expect(SyntaxKind::Ident) {
        while p.at(SyntaxKind::Dot) {
            p.eat();
            if !p.eat_if(SyntaxKind::Ident) && !p.eat_if(SyntaxKind::Star) {
                p.expected("identifier");
                break;
            }
        }
    }
    p.expect(SyntaxKind::Semicolon);
    p.wrap(m, kind);
}

/// Parses annotations and modifier keywords in front of a declaration.
fn modifiers(p: &mut Parser) {
    let m = p.marker();
    loop {
        match p.current() {
            SyntaxKind::Modifier | SyntaxKind::Synchronized => p.eat(),
            SyntaxKind::At => {
                p.eat();
                p.expect(SyntaxKind::Ident);
                while p.at(SyntaxKind::Dot) && p.peek().0 == SyntaxKind::Ident {
                    p.eat();
                    p.eat();
                }
                if p.at(SyntaxKind::LeftParen) {
                    argument_list(p);
                }
            }
            _ => break,
        }
    }
    if p.marker() != m {
        p.wrap(m, SyntaxKind::ModifierList);
    }
}

/// Parses a class member; also used for top-level declarations.
fn member(p: &mut Parser) {
    let m = p.marker();
    modifiers(p);
    match p.current() {
        SyntaxKind::Class | SyntaxKind::Interface | SyntaxKind::Enum => class_declaration(p, m),
        SyntaxKind::LeftBrace => {
            code_block(p);
            p.wrap(m, SyntaxKind::Initializer);
        }
        SyntaxKind::Ident if p.peek().0 == SyntaxKind::LeftParen => {
            p.eat();
            method_rest(p, m);
        }
        _ => {
            if !type_(p) {
                if p.marker() != m {
                    p.expected("type");
                    p.eat_if(SyntaxKind::Semicolon);
                    p.wrap(m, SyntaxKind::Field);
                }
                return;
            }
            if !p.eat_if(SyntaxKind::Ident) {
                p.expected("identifier");
                p.eat_if(SyntaxKind::Semicolon);
                p.wrap(m, SyntaxKind::Field);
                return;
            }
            if p.at(SyntaxKind::LeftParen) {
                method_rest(p, m);
            } else {
                field_rest(p, m);
            }
        }
    }
}

fn class_declaration(p: &mut Parser, m: Marker) {
    let is_enum = p.at(SyntaxKind::Enum);
    p.eat();
    p.expect(SyntaxKind::Ident);
    if p.at(SyntaxKind::Lt) {
        type_arguments(p);
    }
    if p.eat_if(SyntaxKind::Extends) {
        type_list(p);
    }
    if p.eat_if(SyntaxKind::Implements) {
        type_list(p);
    }
    class_body(p, is_enum);
    p.wrap(m, SyntaxKind::ClassDeclaration);
}

fn class_body(p: &mut Parser, is_enum: bool) {
    if !p.at(SyntaxKind::LeftBrace) {
        p.expected("class body");
        return;
    }
    p.eat();
    if is_enum {
        enum_constants(p);
    }
    while !p.end() && !p.at(SyntaxKind::RightBrace) {
        let before = p.cursor();
        member(p);
        if p.cursor() == before {
            p.unexpected();
        }
    }
    p.expect(SyntaxKind::RightBrace);
}

/// Parses the constant list at the start of an enum body.
fn enum_constants(p: &mut Parser) {
    while looks_like_enum_constant(p) {
        let m = p.marker();
        p.eat();
        if p.at(SyntaxKind::LeftParen) {
            argument_list(p);
        }
        if p.at(SyntaxKind::LeftBrace) {
            class_body(p, false);
        }
        p.wrap(m, SyntaxKind::EnumConstant);

        if p.eat_if(SyntaxKind::Comma) {
            continue;
        }
        if looks_like_enum_constant(p) {
            p.expected("comma");
            continue;
        }
        break;
    }
    if p.eat_if(SyntaxKind::Semicolon) {
        return;
    }
    if !p.end() && !p.at(SyntaxKind::RightBrace) {
        p.expected("semicolon");
    }
}

fn looks_like_enum_constant(p: &mut Parser) -> bool {
    if !p.at(SyntaxKind::Ident) {
        return false;
    }
    match p.peek() {
        (
            SyntaxKind::Comma
            | SyntaxKind::Semicolon
            | SyntaxKind::RightBrace
            | SyntaxKind::LeftParen
            | SyntaxKind::LeftBrace
            | SyntaxKind::End,
            _,
        ) => true,
        (SyntaxKind::Ident, newline) => newline || !declares_member(p),
        _ => false,
    }
}

/// Whether the `Type name` at the cursor goes on like a field or method declaration.
fn declares_member(p: &mut Parser) -> bool {
    let checkpoint = p.checkpoint();
    p.eat();
    p.eat();
    let member = matches!(
        p.current(),
        SyntaxKind::Semicolon | SyntaxKind::Eq | SyntaxKind::LeftParen | SyntaxKind::LeftBracket
    );
    p.restore(checkpoint);
    member
}

fn method_rest(p: &mut Parser, m: Marker) {
    parameter_list(p);
    while p.at(SyntaxKind::LeftBracket) && p.peek().0 == SyntaxKind::RightBracket {
        p.eat();
        p.eat();
    }
    if p.at(SyntaxKind::Throws) {
        let t = p.marker();
        p.eat();
        type_list(p);
        p.wrap(t, SyntaxKind::ThrowsList);
    }
    if p.at(SyntaxKind::LeftBrace) {
        code_block(p);
    } else if !p.eat_if(SyntaxKind::Semicolon) {
        p.expected("method body");
    }
    p.wrap(m, SyntaxKind::Method);
}

fn field_rest(p: &mut Parser, m: Marker) {
    dims(p);
    if p.eat_if(SyntaxKind::Eq) {
        variable_initializer(p);
    }
    while p.eat_if(SyntaxKind::Comma) {
        p.expect(SyntaxKind::Ident);
        dims(p);
        if p.eat_if(SyntaxKind::Eq) {
            variable_initializer(p);
        }
    }
    p.expect(SyntaxKind::Semicolon);
    p.wrap(m, SyntaxKind::Field);
}

fn parameter_list(p: &mut Parser) {
    let m = p.marker();
    p.eat();
    if !p.at(SyntaxKind::RightParen) {
        loop {
            if !parameter(p) {
                p.expected("parameter");
                break;
            }
            if !p.eat_if(SyntaxKind::Comma) {
                break;
            }
        }
    }
    p.expect(SyntaxKind::RightParen);
    p.wrap(m, SyntaxKind::ParameterList);
}

/// Parses a formal parameter. Returns `false` without consuming if none starts here.
fn parameter(p: &mut Parser) -> bool {
    if !starts_type(p.current()) && !p.at(SyntaxKind::Modifier) && !p.at(SyntaxKind::At) {
        return false;
    }
    let m = p.marker();
    modifiers(p);
    if !type_(p) {
        p.expected("type");
        p.wrap(m, SyntaxKind::Parameter);
        return true;
    }
    while p.at(SyntaxKind::Pipe) {
        p.eat();
        type_(p);
    }
    while p.eat_if(SyntaxKind::Dot) {}
    p.expect(SyntaxKind::Ident);
    dims(p);
    p.wrap(m, SyntaxKind::Parameter);
    true
}

fn type_list(p: &mut Parser) {
    loop {
        if !type_(p) {
            p.expected("type");
            break;
        }
        if !p.eat_if(SyntaxKind::Comma) {
            break;
        }
    }
}

fn starts_type(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Ident | SyntaxKind::PrimitiveType | SyntaxKind::Void
    )
}

/// Parses a type reference. Returns `false` without consuming if none starts here.
fn type_(p: &mut Parser) -> bool {
    let m = p.marker();
    match p.current() {
        SyntaxKind::PrimitiveType | SyntaxKind::Void => p.eat(),
        SyntaxKind::Ident => {
            p.eat();
            while p.at(SyntaxKind::Dot) && p.peek().0 == SyntaxKind::Ident {
                p.eat();
                p.eat();
            }
            if p.at(SyntaxKind::Lt) {
                let checkpoint = p.checkpoint();
                if !type_arguments(p) {
                    p.restore(checkpoint);
                }
            }
        }
        _ => return false,
    }
    while p.at(SyntaxKind::LeftBracket) && p.peek().0 == SyntaxKind::RightBracket {
        p.eat();
        p.eat();
    }
    p.wrap(m, SyntaxKind::Type);
    true
}

/// Parses `<A, ? extends B>`. Returns whether the list was closed by `>`.
fn type_arguments(p: &mut Parser) -> bool {
    p.eat();
    if p.eat_if(SyntaxKind::Gt) {
        return true;
    }
    loop {
        if p.eat_if(SyntaxKind::Question) {
            if p.eat_if(SyntaxKind::Extends) || p.eat_if(SyntaxKind::Super) {
                type_(p);
            }
        } else if !type_(p) {
            return false;
        }
        if !p.eat_if(SyntaxKind::Comma) {
            break;
        }
    }
    p.eat_if(SyntaxKind::Gt)
}

fn dims(p: &mut Parser) {
    while p.at(SyntaxKind::LeftBracket) && p.peek().0 == SyntaxKind::RightBracket {
        p.eat();
        p.eat();
    }
}

fn variable_initializer(p: &mut Parser) {
    if p.at(SyntaxKind::LeftBrace) {
        array_initializer(p);
    } else if !expression(p) {
        p.expected("expression");
    }
}

fn code_block(p: &mut Parser) {
    let m = p.marker();
    p.eat();
    while !p.end() && !p.at(SyntaxKind::RightBrace) {
        let before = p.cursor();
        block_statement(p);
        if p.cursor() == before {
            p.unexpected();
        }
    }
    p.expect(SyntaxKind::RightBrace);
    p.wrap(m, SyntaxKind::CodeBlock);
}

fn starts_statement(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::LeftBrace
            | SyntaxKind::If
            | SyntaxKind::While
            | SyntaxKind::Do
            | SyntaxKind::For
            | SyntaxKind::Switch
            | SyntaxKind::Try
            | SyntaxKind::Synchronized
            | SyntaxKind::Return
            | SyntaxKind::Throw
            | SyntaxKind::Break
            | SyntaxKind::Continue
            | SyntaxKind::Semicolon
            | SyntaxKind::Modifier
            | SyntaxKind::Class
            | SyntaxKind::Interface
            | SyntaxKind::Enum
    ) || starts_expression(kind)
}

fn starts_expression(kind: SyntaxKind) -> bool {
    kind.is_literal()
        || matches!(
            kind,
            SyntaxKind::Ident
                | SyntaxKind::This
                | SyntaxKind::Super
                | SyntaxKind::PrimitiveType
                | SyntaxKind::LeftParen
                | SyntaxKind::New
                | SyntaxKind::Plus
                | SyntaxKind::Minus
                | SyntaxKind::Bang
                | SyntaxKind::Tilde
                | SyntaxKind::PlusPlus
                | SyntaxKind::MinusMinus
        )
}

fn block_statement(p: &mut Parser) {
    let m = p.marker();
    match p.current() {
        SyntaxKind::LeftBrace => {
            code_block(p);
            p.wrap(m, SyntaxKind::BlockStatement);
        }
        SyntaxKind::If => if_statement(p, m),
        SyntaxKind::While => while_statement(p, m),
        SyntaxKind::Do => do_while_statement(p, m),
        SyntaxKind::For => for_statement(p, m),
        SyntaxKind::Switch => switch_statement(p, m),
        SyntaxKind::Case | SyntaxKind::Default => switch_label(p, m),
        SyntaxKind::Try => try_statement(p, m),
        SyntaxKind::Synchronized if p.peek().0 == SyntaxKind::LeftParen => {
            synchronized_statement(p, m)
        }
        SyntaxKind::Return => jump_statement(p, m, SyntaxKind::ReturnStatement),
        SyntaxKind::Throw => jump_statement(p, m, SyntaxKind::ThrowStatement),
        SyntaxKind::Break => jump_statement(p, m, SyntaxKind::BreakStatement),
        SyntaxKind::Continue => jump_statement(p, m, SyntaxKind::ContinueStatement),
        SyntaxKind::Semicolon => {
            p.eat();
            p.wrap(m, SyntaxKind::EmptyStatement);
        }
        SyntaxKind::Class | SyntaxKind::Interface | SyntaxKind::Enum => {
            class_declaration(p, m)
        }
        SyntaxKind::Modifier | SyntaxKind::At | SyntaxKind::Synchronized => {
            modifiers(p);
            if matches!(
                p.current(),
                SyntaxKind::Class | SyntaxKind::Interface | SyntaxKind::Enum
            ) {
                class_declaration(p, m);
            } else {
                local_declaration(p, m);
            }
        }
        _ if is_declaration(p) => local_declaration(p, m),
        kind if starts_expression(kind) => {
            expression(p);
            p.expect(SyntaxKind::Semicolon);
            p.wrap(m, SyntaxKind::ExpressionStatement);
        }
        _ => p.unexpected(),
    }
}

/// Speculatively checks whether a local variable declaration starts here.
fn is_declaration(p: &mut Parser) -> bool {
    let checkpoint = p.checkpoint();
    let result = type_(p) && p.at(SyntaxKind::Ident);
    p.restore(checkpoint);
    result
}

/// Parses `T a = 1, b;` with `m` in front of any modifiers already eaten.
fn local_declaration(p: &mut Parser, m: Marker) {
    if !type_(p) {
        p.expected("type");
    }
    p.expect(SyntaxKind::Ident);
    dims(p);
    if p.eat_if(SyntaxKind::Eq) {
        variable_initializer(p);
    }
    p.wrap(m, SyntaxKind::LocalVariable);
    while p.eat_if(SyntaxKind::Comma) {
        let v = p.marker();
        p.expect(SyntaxKind::Ident);
        dims(p);
        if p.eat_if(SyntaxKind::Eq) {
            variable_initializer(p);
        }
        p.wrap(v, SyntaxKind::LocalVariable);
    }
    p.expect(SyntaxKind::Semicolon);
    p.wrap(m, SyntaxKind::DeclarationStatement);
}

/// Parses a statement body, or marks it as missing.
fn statement_body(p: &mut Parser) {
    if p.end() || p.at(SyntaxKind::RightBrace) || !starts_statement(p.current()) {
        p.expected("statement");
        return;
    }
    block_statement(p);
}

/// Parses `(expr)`. A bare condition on the keyword's line is accepted without parens.
fn condition(p: &mut Parser) {
    if p.eat_if(SyntaxKind::LeftParen) {
        if !expression(p) {
            p.expected("expression");
        }
        p.expect(SyntaxKind::RightParen);
    } else {
        p.expected("opening paren");
        if !p.had_newline() && starts_expression(p.current()) {
            expression(p);
        }
    }
}

fn if_statement(p: &mut Parser, m: Marker) {
    p.eat();
    condition(p);
    statement_body(p);
    if p.eat_if(SyntaxKind::Else) {
        statement_body(p);
    }
    p.wrap(m, SyntaxKind::IfStatement);
}

fn while_statement(p: &mut Parser, m: Marker) {
    p.eat();
    condition(p);
    statement_body(p);
    p.wrap(m, SyntaxKind::WhileStatement);
}

fn do_while_statement(p: &mut Parser, m: Marker) {
    p.eat();
    statement_body(p);
    if p.eat_if(SyntaxKind::While) {
        condition(p);
    } else {
        p.expected("keyword `while`");
    }
    p.expect(SyntaxKind::Semicolon);
    p.wrap(m, SyntaxKind::DoWhileStatement);
}

/// Speculatively checks for `T x :` after the opening paren of a `for`.
fn is_foreach(p: &mut Parser) -> bool {
    let checkpoint = p.checkpoint();
    modifiers(p);
    let result = type_(p) && p.eat_if(SyntaxKind::Ident) && p.at(SyntaxKind::Colon);
    p.restore(checkpoint);
    result
}

fn for_statement(p: &mut Parser, m: Marker) {
    p.eat();
    if !p.eat_if(SyntaxKind::LeftParen) {
        p.expected("opening paren");
        p.wrap(m, SyntaxKind::ForStatement);
        return;
    }

    if is_foreach(p) {
        parameter(p);
        p.eat();
        if !expression(p) {
            p.expected("expression");
        }
        p.expect(SyntaxKind::RightParen);
        statement_body(p);
        p.wrap(m, SyntaxKind::ForeachStatement);
        return;
    }

    let init = p.marker();
    if p.at(SyntaxKind::Semicolon) {
        p.eat();
        p.wrap(init, SyntaxKind::EmptyStatement);
    } else if p.at(SyntaxKind::Modifier) || is_declaration(p) {
        modifiers(p);
        local_declaration(p, init);
    } else if starts_expression(p.current()) {
        expression(p);
        while p.eat_if(SyntaxKind::Comma) {
            expression(p);
        }
        p.expect(SyntaxKind::Semicolon);
        p.wrap(init, SyntaxKind::ExpressionStatement);
    } else {
        p.expected("semicolon");
    }

    if starts_expression(p.current()) {
        expression(p);
    }
    p.expect(SyntaxKind::Semicolon);

    if starts_expression(p.current()) {
        let update = p.marker();
        expression(p);
        while p.eat_if(SyntaxKind::Comma) {
            expression(p);
        }
        p.wrap(update, SyntaxKind::ExpressionStatement);
    }
    p.expect(SyntaxKind::RightParen);
    statement_body(p);
    p.wrap(m, SyntaxKind::ForStatement);
}

fn switch_statement(p: &mut Parser, m: Marker) {
    p.eat();
    condition(p);
    if p.at(SyntaxKind::LeftBrace) {
        code_block(p);
    } else {
        p.expected("switch body");
    }
    p.wrap(m, SyntaxKind::SwitchStatement);
}

fn switch_label(p: &mut Parser, m: Marker) {
    if p.eat_if(SyntaxKind::Case) {
        if !expression(p) {
            p.expected("expression");
        }
        while p.eat_if(SyntaxKind::Comma) {
            expression(p);
        }
    } else {
        p.eat();
    }
    if !p.eat_if(SyntaxKind::Colon) && !p.eat_if(SyntaxKind::Arrow) {
        p.expected("colon");
    }
    p.wrap(m, SyntaxKind::SwitchLabel);
}

fn try_statement(p: &mut Parser, m: Marker) {
    p.eat();
    if p.eat_if(SyntaxKind::LeftParen) {
        while !p.end() && !p.at(SyntaxKind::RightParen) {
            let resource = p.marker();
            local_resource(p);
            if p.marker() == resource || !p.eat_if(SyntaxKind::Semicolon) {
                break;
            }
        }
        p.expect(SyntaxKind::RightParen);
    }
    if p.at(SyntaxKind::LeftBrace) {
        code_block(p);
    } else {
        p.expected("opening brace");
    }
    while p.at(SyntaxKind::Catch) {
        catch_section(p);
    }
    if p.eat_if(SyntaxKind::Finally) {
        if p.at(SyntaxKind::LeftBrace) {
            code_block(p);
        } else {
            p.expected("opening brace");
        }
    }
    p.wrap(m, SyntaxKind::TryStatement);
}

fn local_resource(p: &mut Parser) {
    let m = p.marker();
    if is_declaration(p) {
        type_(p);
        p.eat();
        if p.eat_if(SyntaxKind::Eq) && !expression(p) {
            p.expected("expression");
        }
        p.wrap(m, SyntaxKind::LocalVariable);
    } else {
        expression(p);
    }
}

fn catch_section(p: &mut Parser) {
    let m = p.marker();
    p.eat();
    if p.eat_if(SyntaxKind::LeftParen) {
        if !parameter(p) {
            p.expected("parameter");
        }
        p.expect(SyntaxKind::RightParen);
    } else {
        p.expected("opening paren");
    }
    if p.at(SyntaxKind::LeftBrace) {
        code_block(p);
    } else {
        p.expected("opening brace");
    }
    p.wrap(m, SyntaxKind::CatchSection);
}

fn synchronized_statement(p: &mut Parser, m: Marker) {
    p.eat();
    condition(p);
    if p.at(SyntaxKind::LeftBrace) {
        code_block(p);
    } else {
        p.expected("opening brace");
    }
    p.wrap(m, SyntaxKind::SynchronizedStatement);
}

/// Parses `return`, `throw`, `break` and `continue`.
fn jump_statement(p: &mut Parser, m: Marker, kind: SyntaxKind) {
    p.eat();
    match kind {
        SyntaxKind::ReturnStatement | SyntaxKind::ThrowStatement => {
            if starts_expression(p.current()) {
                expression(p);
            }
        }
        _ => {
            p.eat_if(SyntaxKind::Ident);
        }
    }
    p.expect(SyntaxKind::Semicolon);
    p.wrap(m, kind);
}

/// Parses an expression. Returns `false` without consuming if none starts here.
fn expression(p: &mut Parser) -> bool {
    assignment(p)
}

fn assignment(p: &mut Parser) -> bool {
    let m = p.marker();
    if !conditional(p) {
        return false;
    }
    if p.at(SyntaxKind::Eq) || p.at(SyntaxKind::AssignOp) {
        p.eat();
        if p.at(SyntaxKind::LeftBrace) {
            array_initializer(p);
        } else if !assignment(p) {
            p.expected("expression");
        }
        p.wrap(m, SyntaxKind::Assignment);
    }
    true
}

fn conditional(p: &mut Parser) -> bool {
    let m = p.marker();
    if !binary(p, 0) {
        return false;
    }
    if p.eat_if(SyntaxKind::Question) {
        if !expression(p) {
            p.expected("expression");
        }
        p.expect(SyntaxKind::Colon);
        if !conditional(p) {
            p.expected("expression");
        }
        p.wrap(m, SyntaxKind::Conditional);
    }
    true
}

fn binary_precedence(kind: SyntaxKind) -> Option<u8> {
    Some(match kind {
        SyntaxKind::PipePipe => 1,
        SyntaxKind::AmpAmp => 2,
        SyntaxKind::Pipe => 3,
        SyntaxKind::Caret => 4,
        SyntaxKind::Amp => 5,
        SyntaxKind::EqEq | SyntaxKind::BangEq => 6,
        SyntaxKind::Lt
        | SyntaxKind::Gt
        | SyntaxKind::LtEq
        | SyntaxKind::GtEq
        | SyntaxKind::Instanceof => 7,
        SyntaxKind::Plus | SyntaxKind::Minus => 8,
        SyntaxKind::Star | SyntaxKind::Slash | SyntaxKind::Percent => 9,
        _ => return None,
    })
}

fn binary(p: &mut Parser, min_prec: u8) -> bool {
    let m = p.marker();
    if !unary(p) {
        return false;
    }
    loop {
        let kind = p.current();
        let Some(prec) = binary_precedence(kind) else {
            break;
        };
        if prec < min_prec {
            break;
        }
        p.eat();
        if kind == SyntaxKind::Instanceof {
            if !type_(p) {
                p.expected("type");
            }
            p.wrap(m, SyntaxKind::InstanceofExpression);
            continue;
        }
        if !binary(p, prec + 1) {
            p.expected("expression");
        }
        p.wrap(m, SyntaxKind::Binary);
    }
    true
}

fn unary(p: &mut Parser) -> bool {
    if matches!(
        p.current(),
        SyntaxKind::Plus
            | SyntaxKind::Minus
            | SyntaxKind::Bang
            | SyntaxKind::Tilde
            | SyntaxKind::PlusPlus
            | SyntaxKind::MinusMinus
    ) {
        let m = p.marker();
        p.eat();
        if !unary(p) {
            p.expected("expression");
        }
        p.wrap(m, SyntaxKind::Unary);
        return true;
    }
    postfix(p)
}

fn postfix(p: &mut Parser) -> bool {
    let m = p.marker();
    if !primary(p) {
        return false;
    }
    loop {
        match p.current() {
            SyntaxKind::Dot => {
                p.eat();
                if !p.eat_if(SyntaxKind::Ident)
                    && !p.eat_if(SyntaxKind::Class)
                    && !p.eat_if(SyntaxKind::This)
                {
                    p.expected("identifier");
                }
                p.wrap(m, SyntaxKind::FieldAccess);
            }
            SyntaxKind::LeftParen => {
                argument_list(p);
                p.wrap(m, SyntaxKind::MethodCall);
            }
            SyntaxKind::LeftBracket => {
                p.eat();
                if !expression(p) {
                    p.expected("expression");
                }
                p.expect(SyntaxKind::RightBracket);
                p.wrap(m, SyntaxKind::ArrayAccess);
            }
            SyntaxKind::PlusPlus | SyntaxKind::MinusMinus => {
                p.eat();
                p.wrap(m, SyntaxKind::Postfix);
            }
            _ => break,
        }
    }
    true
}

fn primary(p: &mut Parser) -> bool {
    match p.current() {
        kind if kind.is_literal() => p.eat(),
        SyntaxKind::Ident | SyntaxKind::This | SyntaxKind::Super => p.eat(),
        SyntaxKind::PrimitiveType => {
            type_(p);
        }
        SyntaxKind::LeftParen if is_cast(p) => type_cast(p),
        SyntaxKind::LeftParen => parenthesized(p),
        SyntaxKind::New => new_expression(p),
        _ => return false,
    }
    true
}

/// Speculatively checks for `(Type) operand`.
fn is_cast(p: &mut Parser) -> bool {
    let checkpoint = p.checkpoint();
    p.eat();
    let result = type_(p)
        && p.eat_if(SyntaxKind::RightParen)
        && (p.current().is_literal()
            || matches!(
                p.current(),
                SyntaxKind::Ident
                    | SyntaxKind::LeftParen
                    | SyntaxKind::This
                    | SyntaxKind::Super
                    | SyntaxKind::New
                    | SyntaxKind::Bang
                    | SyntaxKind::Tilde
            ));
    p.restore(checkpoint);
    result
}

fn type_cast(p: &mut Parser) {
    let m = p.marker();
    p.eat();
    type_(p);
    p.expect(SyntaxKind::RightParen);
    if !unary(p) {
        p.expected("expression");
    }
    p.wrap(m, SyntaxKind::TypeCast);
}

fn parenthesized(p: &mut Parser) {
    let m = p.marker();
    p.eat();
    if !expression(p) {
        p.expected("expression");
    }
    p.expect(SyntaxKind::RightParen);
    p.wrap(m, SyntaxKind::Parenthesized);
}

fn new_expression(p: &mut Parser) {
    let m = p.marker();
    p.eat();
    let t = p.marker();
    match p.current() {
        SyntaxKind::PrimitiveType => p.eat(),
        SyntaxKind::Ident => {
            p.eat();
            while p.at(SyntaxKind::Dot) && p.peek().0 == SyntaxKind::Ident {
                p.eat();
                p.eat();
            }
            if p.at(SyntaxKind::Lt) {
                let checkpoint = p.checkpoint();
                if !type_arguments(p) {
                    p.restore(checkpoint);
                }
            }
        }
        _ => p.expected("type"),
    }
    if p.marker() != t {
        p.wrap(t, SyntaxKind::Type);
    }

    if p.at(SyntaxKind::LeftParen) {
        argument_list(p);
        if p.at(SyntaxKind::LeftBrace) {
            class_body(p, false);
        }
    } else if p.at(SyntaxKind::LeftBracket) {
        while p.eat_if(SyntaxKind::LeftBracket) {
            if !p.at(SyntaxKind::RightBracket) && !expression(p) {
                p.expected("expression");
            }
            p.expect(SyntaxKind::RightBracket);
        }
        if p.at(SyntaxKind::LeftBrace) {
            array_initializer(p);
        }
    } else {
        p.expected("opening paren");
    }
    p.wrap(m, SyntaxKind::NewExpression);
}

fn argument_list(p: &mut Parser) {
    let m = p.marker();
    p.eat();
    if !p.at(SyntaxKind::RightParen) {
        loop {
            if !expression(p) {
                p.expected("expression");
                break;
            }
            if !p.eat_if(SyntaxKind::Comma) {
                break;
            }
        }
    }
    p.expect(SyntaxKind::RightParen);
    p.wrap(m, SyntaxKind::ArgumentList);
}

fn array_initializer(p: &mut Parser) {
    let m = p.marker();
    p.eat();
    loop {
        if p.at(SyntaxKind::RightBrace) {
            break;
        }
        let parsed = if p.at(SyntaxKind::LeftBrace) {
            array_initializer(p);
            true
        } else {
            expression(p)
        };
        if !parsed || !p.eat_if(SyntaxKind::Comma) {
            break;
        }
    }
    p.expect(SyntaxKind::RightBrace);
    p.wrap(m, SyntaxKind::ArrayInitializer);
}

/// Manages parsing a stream of tokens into a tree of [`SyntaxNode`]s.
struct Parser<'s> {
    /// The lexer over the source text.
    lexer: Lexer<'s>,
    /// The current (non-trivia) token.
    current: Token,
    /// The nodes parsed so far, including the trivia in front of `current`.
    nodes: Vec<SyntaxNode>,
}

/// A token with the trivia that precedes it.
#[derive(Clone)]
struct Token {
    kind: SyntaxKind,
    node: SyntaxNode,
    /// Number of trivia nodes pushed right before this token.
    n_trivia: usize,
    /// Whether the preceding trivia contains a line break.
    newline: bool,
}

/// A position in the node list.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
struct Marker(usize);

/// Saved parser state for speculative parsing.
struct Checkpoint<'s> {
    lexer: Lexer<'s>,
    current: Token,
    node_len: usize,
}

impl<'s> Parser<'s> {
    fn new(text: &'s str) -> Self {
        let mut lexer = Lexer::new(text);
        let mut nodes = vec![];
        let current = Self::lex(&mut lexer, &mut nodes);
        Self {
            lexer,
            current,
            nodes,
        }
    }

    /// Lex the next non-trivia token, pushing trivia into `nodes`.
    fn lex(lexer: &mut Lexer<'s>, nodes: &mut Vec<SyntaxNode>) -> Token {
        let mut n_trivia = 0;
        let mut newline = false;
        loop {
            let (kind, node) = lexer.next();
            if kind.is_trivia() {
                newline |= kind == SyntaxKind::Whitespace && node.text().contains('\n');
                nodes.push(node);
                n_trivia += 1;
                continue;
            }
            return Token {
                kind,
                node,
                n_trivia,
                newline,
            };
        }
    }

    fn finish_into(self, kind: SyntaxKind) -> SyntaxNode {
        SyntaxNode::inner(kind, self.nodes)
    }

    fn current(&self) -> SyntaxKind {
        self.current.kind
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current.kind == kind
    }

    fn end(&self) -> bool {
        self.at(SyntaxKind::End)
    }

    fn had_newline(&self) -> bool {
        self.current.newline
    }

    fn cursor(&self) -> usize {
        self.lexer.cursor()
    }

    fn marker(&self) -> Marker {
        Marker(self.nodes.len())
    }

    /// The marker right after the last non-trivia node.
    fn before_trivia(&self) -> Marker {
        Marker(self.nodes.len() - self.current.n_trivia)
    }

    /// The kind and line-break flag of the token after the current one.
    fn peek(&self) -> (SyntaxKind, bool) {
        let mut lexer = self.lexer.clone();
        let mut scratch = vec![];
        let token = Self::lex(&mut lexer, &mut scratch);
        (token.kind, token.newline)
    }

    fn eat(&mut self) {
        if self.end() {
            return;
        }
        self.nodes.push(self.current.node.clone());
        self.current = Self::lex(&mut self.lexer, &mut self.nodes);
    }

    fn eat_if(&mut self, kind: SyntaxKind) -> bool {
        let at = self.at(kind);
        if at {
            self.eat();
        }
        at
    }

    fn expect(&mut self, kind: SyntaxKind) -> bool {
        let at = self.at(kind);
        if at {
            self.eat();
        } else {
            self.expected(kind.name());
        }
        at
    }

    /// Whether the last non-trivia node is an error.
    fn after_error(&self) -> bool {
        let m = self.before_trivia();
        m.0 > 0 && self.nodes[m.0 - 1].kind().is_error()
    }

    /// Insert a zero-length error in front of the trivia, unless one is already there.
    fn expected(&mut self, thing: &str) {
        if !self.after_error() {
            let m = self.before_trivia();
            self.nodes
                .insert(m.0, SyntaxNode::error(eco_format!("expected {thing}"), ""));
        }
    }

    /// Consume the current token as an error node.
    fn unexpected(&mut self) {
        if self.end() {
            return;
        }
        let node = if self.current.kind.is_error() {
            self.current.node.clone()
        } else {
            let message: EcoString = eco_format!("unexpected {}", self.current.kind.name());
            SyntaxNode::error(message, self.current.node.text().clone())
        };
        self.nodes.push(node);
        self.current = Self::lex(&mut self.lexer, &mut self.nodes);
    }

    /// Wrap the nodes from `from` up to the trailing trivia in a new inner node.
    fn wrap(&mut self, from: Marker, kind: SyntaxKind) {
        let to = self.before_trivia().0;
        let from = from.0.min(to);
        let children = self.nodes.drain(from..to).collect();
        self.nodes.insert(from, SyntaxNode::inner(kind, children));
    }

    fn checkpoint(&self) -> Checkpoint<'s> {
        Checkpoint {
            lexer: self.lexer.clone(),
            current: self.current.clone(),
            node_len: self.nodes.len(),
        }
    }

    fn restore(&mut self, checkpoint: Checkpoint<'s>) {
        self.lexer = checkpoint.lexer;
        self.current = checkpoint.current;
        self.nodes.truncate(checkpoint.node_len);
    }
}
