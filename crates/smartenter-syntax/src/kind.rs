//! Syntax kinds of the Java subset.

/// A syntactical building block of a Java source file.
///
/// Can be a token kind (leaf) or a node kind (inner node).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum SyntaxKind {
    /// The end of token stream.
    End,
    /// An invalid sequence of characters or a missing piece of syntax.
    Error,

    /// Spaces, tabs and line breaks.
    Whitespace,
    /// A line comment: `// ...`.
    LineComment,
    /// A block or doc comment: `/* ... */`.
    BlockComment,

    /// An identifier: `value`.
    Ident,
    /// An integer or floating point literal: `12`, `0x1F`, `1.5f`.
    NumberLiteral,
    /// A string literal, possibly unterminated: `"text"`.
    StringLiteral,
    /// A character literal, possibly unterminated: `'c'`.
    CharLiteral,
    /// `true` or `false`.
    BoolLiteral,
    /// `null`.
    NullLiteral,

    /// `package`.
    Package,
    /// `import`.
    Import,
    /// `class`.
    Class,
    /// `interface`.
    Interface,
    /// `enum`.
    Enum,
    /// `extends`.
    Extends,
    /// `implements`.
    Implements,
    /// `throws`.
    Throws,
    /// `void`.
    Void,
    /// A primitive type name: `int`, `boolean`, ...
    PrimitiveType,
    /// A declaration modifier: `public`, `static`, `abstract`, ...
    Modifier,
    /// `synchronized` (modifier or statement).
    Synchronized,
    /// `if`.
    If,
    /// `else`.
    Else,
    /// `while`.
    While,
    /// `do`.
    Do,
    /// `for`.
    For,
    /// `switch`.
    Switch,
    /// `case`.
    Case,
    /// `default`.
    Default,
    /// `try`.
    Try,
    /// `catch`.
    Catch,
    /// `finally`.
    Finally,
    /// `return`.
    Return,
    /// `throw`.
    Throw,
    /// `break`.
    Break,
    /// `continue`.
    Continue,
    /// `new`.
    New,
    /// `this`.
    This,
    /// `super`.
    Super,
    /// `instanceof`.
    Instanceof,

    /// `(`.
    LeftParen,
    /// `)`.
    RightParen,
    /// `{`.
    LeftBrace,
    /// `}`.
    RightBrace,
    /// `[`.
    LeftBracket,
    /// `]`.
    RightBracket,
    /// `;`.
    Semicolon,
    /// `,`.
    Comma,
    /// `.`.
    Dot,
    /// `:`.
    Colon,
    /// `?`.
    Question,
    /// `@`.
    At,
    /// `->`.
    Arrow,
    /// `=`.
    Eq,
    /// A compound assignment operator: `+=`, `-=`, ...
    AssignOp,
    /// `==`.
    EqEq,
    /// `!=`.
    BangEq,
    /// `<`.
    Lt,
    /// `>`.
    Gt,
    /// `<=`.
    LtEq,
    /// `>=`.
    GtEq,
    /// `+`.
    Plus,
    /// `-`.
    Minus,
    /// `*`.
    Star,
    /// `/`.
    Slash,
    /// `%`.
    Percent,
    /// `&&`.
    AmpAmp,
    /// `||`.
    PipePipe,
    /// `&`.
    Amp,
    /// `|`.
    Pipe,
    /// `^`.
    Caret,
    /// `!`.
    Bang,
    /// `~`.
    Tilde,
    /// `++`.
    PlusPlus,
    /// `--`.
    MinusMinus,

    /// The root of a parsed source.
    File,
    /// `package a.b;`.
    PackageDeclaration,
    /// `import a.b.C;`.
    ImportDeclaration,
    /// A class, interface or enum declaration.
    ClassDeclaration,
    /// A method or constructor declaration.
    Method,
    /// A field declaration.
    Field,
    /// An enum constant: `RED` or `RED(1)`.
    EnumConstant,
    /// An instance or static initializer block.
    Initializer,
    /// The modifiers in front of a declaration.
    ModifierList,
    /// A type reference: `int`, `java.util.List<String>[]`.
    Type,
    /// `(int a, String b)`.
    ParameterList,
    /// A formal parameter: `String b`.
    Parameter,
    /// `throws A, B`.
    ThrowsList,
    /// `{ statements }`.
    CodeBlock,

    /// A code block used as a statement.
    BlockStatement,
    /// An expression followed by `;`.
    ExpressionStatement,
    /// A local variable declaration statement.
    DeclarationStatement,
    /// One variable inside a declaration statement.
    LocalVariable,
    /// `if (..) .. else ..`.
    IfStatement,
    /// `while (..) ..`.
    WhileStatement,
    /// `do .. while (..);`.
    DoWhileStatement,
    /// `for (..; ..; ..) ..`.
    ForStatement,
    /// `for (T x : xs) ..`.
    ForeachStatement,
    /// `switch (..) { .. }`.
    SwitchStatement,
    /// `case x:` or `default:`.
    SwitchLabel,
    /// `try { .. } catch (..) { .. } finally { .. }`.
    TryStatement,
    /// `catch (E e) { .. }`.
    CatchSection,
    /// `synchronized (..) { .. }`.
    SynchronizedStatement,
    /// `return ..;`.
    ReturnStatement,
    /// `throw ..;`.
    ThrowStatement,
    /// `break;`.
    BreakStatement,
    /// `continue;`.
    ContinueStatement,
    /// A lone `;`.
    EmptyStatement,

    /// `a = b`, `a += b`.
    Assignment,
    /// `c ? a : b`.
    Conditional,
    /// `a + b`, `a && b`, ...
    Binary,
    /// `x instanceof T`.
    InstanceofExpression,
    /// `-a`, `!a`, `++a`.
    Unary,
    /// `a++`.
    Postfix,
    /// `(T) a`.
    TypeCast,
    /// `(a)`.
    Parenthesized,
    /// `a.b`.
    FieldAccess,
    /// `a[i]`.
    ArrayAccess,
    /// `f(a, b)`.
    MethodCall,
    /// `(a, b)` after a callee.
    ArgumentList,
    /// `new T(..)`, `new T[n]`.
    NewExpression,
    /// `{1, 2}`.
    ArrayInitializer,
}

impl SyntaxKind {
    /// Is this kind skipped by the parser?
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::Whitespace | Self::LineComment | Self::BlockComment)
    }

    /// Is this a comment token?
    pub fn is_comment(self) -> bool {
        matches!(self, Self::LineComment | Self::BlockComment)
    }

    /// Is this the error kind?
    pub fn is_error(self) -> bool {
        self == Self::Error
    }

    /// Is this a literal token?
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::NumberLiteral
                | Self::StringLiteral
                | Self::CharLiteral
                | Self::BoolLiteral
                | Self::NullLiteral
        )
    }

    /// Is this a statement node?
    pub fn is_statement(self) -> bool {
        matches!(
            self,
            Self::BlockStatement
                | Self::ExpressionStatement
                | Self::DeclarationStatement
                | Self::IfStatement
                | Self::WhileStatement
                | Self::DoWhileStatement
                | Self::ForStatement
                | Self::ForeachStatement
                | Self::SwitchStatement
                | Self::SwitchLabel
                | Self::TryStatement
                | Self::SynchronizedStatement
                | Self::ReturnStatement
                | Self::ThrowStatement
                | Self::BreakStatement
                | Self::ContinueStatement
                | Self::EmptyStatement
        )
    }

    /// Is this a class member (or a class)?
    pub fn is_member(self) -> bool {
        matches!(
            self,
            Self::ClassDeclaration
                | Self::Method
                | Self::Field
                | Self::EnumConstant
                | Self::Initializer
        )
    }

    /// Is this an expression node?
    pub fn is_expression(self) -> bool {
        matches!(
            self,
            Self::Assignment
                | Self::Conditional
                | Self::Binary
                | Self::InstanceofExpression
                | Self::Unary
                | Self::Postfix
                | Self::TypeCast
                | Self::Parenthesized
                | Self::FieldAccess
                | Self::ArrayAccess
                | Self::MethodCall
                | Self::NewExpression
                | Self::ArrayInitializer
        )
    }

    /// Is this a statement that owns a condition and a body?
    pub fn is_control_statement(self) -> bool {
        matches!(
            self,
            Self::IfStatement
                | Self::WhileStatement
                | Self::DoWhileStatement
                | Self::ForStatement
                | Self::ForeachStatement
        )
    }

    /// A human-readable name for the kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::End => "end of file",
            Self::Error => "syntax error",
            Self::Whitespace => "whitespace",
            Self::LineComment => "line comment",
            Self::BlockComment => "block comment",
            Self::Ident => "identifier",
            Self::NumberLiteral => "number",
            Self::StringLiteral => "string",
            Self::CharLiteral => "character",
            Self::BoolLiteral => "boolean",
            Self::NullLiteral => "`null`",
            Self::Package => "keyword `package`",
            Self::Import => "keyword `import`",
            Self::Class => "keyword `class`",
            Self::Interface => "keyword `interface`",
            Self::Enum => "keyword `enum`",
            Self::Extends => "keyword `extends`",
            Self::Implements => "keyword `implements`",
            Self::Throws => "keyword `throws`",
            Self::Void => "keyword `void`",
            Self::PrimitiveType => "primitive type",
            Self::Modifier => "modifier",
            Self::Synchronized => "keyword `synchronized`",
            Self::If => "keyword `if`",
            Self::Else => "keyword `else`",
            Self::While => "keyword `while`",
            Self::Do => "keyword `do`",
            Self::For => "keyword `for`",
            Self::Switch => "keyword `switch`",
            Self::Case => "keyword `case`",
            Self::Default => "keyword `default`",
            Self::Try => "keyword `try`",
            Self::Catch => "keyword `catch`",
            Self::Finally => "keyword `finally`",
            Self::Return => "keyword `return`",
            Self::Throw => "keyword `throw`",
            Self::Break => "keyword `break`",
            Self::Continue => "keyword `continue`",
            Self::New => "keyword `new`",
            Self::This => "keyword `this`",
            Self::Super => "keyword `super`",
            Self::Instanceof => "keyword `instanceof`",
            Self::LeftParen => "opening paren",
            Self::RightParen => "closing paren",
            Self::LeftBrace => "opening brace",
            Self::RightBrace => "closing brace",
            Self::LeftBracket => "opening bracket",
            Self::RightBracket => "closing bracket",
            Self::Semicolon => "semicolon",
            Self::Comma => "comma",
            Self::Dot => "dot",
            Self::Colon => "colon",
            Self::Question => "question mark",
            Self::At => "at sign",
            Self::Arrow => "arrow",
            Self::Eq => "assignment operator",
            Self::AssignOp => "compound assignment operator",
            Self::EqEq => "equality operator",
            Self::BangEq => "inequality operator",
            Self::Lt => "less-than operator",
            Self::Gt => "greater-than operator",
            Self::LtEq => "less-equal operator",
            Self::GtEq => "greater-equal operator",
            Self::Plus => "plus",
            Self::Minus => "minus",
            Self::Star => "star",
            Self::Slash => "slash",
            Self::Percent => "percent",
            Self::AmpAmp => "logical and",
            Self::PipePipe => "logical or",
            Self::Amp => "bitwise and",
            Self::Pipe => "bitwise or",
            Self::Caret => "bitwise xor",
            Self::Bang => "logical not",
            Self::Tilde => "bitwise not",
            Self::PlusPlus => "increment",
            Self::MinusMinus => "decrement",
            Self::File => "file",
            Self::PackageDeclaration => "package declaration",
            Self::ImportDeclaration => "import declaration",
            Self::ClassDeclaration => "class declaration",
            Self::Method => "method",
            Self::Field => "field",
            Self::EnumConstant => "enum constant",
            Self::Initializer => "initializer",
            Self::ModifierList => "modifier list",
            Self::Type => "type",
            Self::ParameterList => "parameter list",
            Self::Parameter => "parameter",
            Self::ThrowsList => "throws list",
            Self::CodeBlock => "code block",
            Self::BlockStatement => "block statement",
            Self::ExpressionStatement => "expression statement",
            Self::DeclarationStatement => "declaration statement",
            Self::LocalVariable => "local variable",
            Self::IfStatement => "`if` statement",
            Self::WhileStatement => "`while` statement",
            Self::DoWhileStatement => "`do` statement",
            Self::ForStatement => "`for` statement",
            Self::ForeachStatement => "`for-each` statement",
            Self::SwitchStatement => "`switch` statement",
            Self::SwitchLabel => "switch label",
            Self::TryStatement => "`try` statement",
            Self::CatchSection => "catch section",
            Self::SynchronizedStatement => "`synchronized` statement",
            Self::ReturnStatement => "`return` statement",
            Self::ThrowStatement => "`throw` statement",
            Self::BreakStatement => "`break` statement",
            Self::ContinueStatement => "`continue` statement",
            Self::EmptyStatement => "empty statement",
            Self::Assignment => "assignment",
            Self::Conditional => "conditional expression",
            Self::Binary => "binary expression",
            Self::InstanceofExpression => "`instanceof` expression",
            Self::Unary => "unary expression",
            Self::Postfix => "postfix expression",
            Self::TypeCast => "type cast",
            Self::Parenthesized => "parenthesized expression",
            Self::FieldAccess => "field access",
            Self::ArrayAccess => "array access",
            Self::MethodCall => "method call",
            Self::ArgumentList => "argument list",
            Self::NewExpression => "`new` expression",
            Self::ArrayInitializer => "array initializer",
        }
    }
}
