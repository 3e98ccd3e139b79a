//! Local repairs for syntactic holes.
//!
//! Every fixer looks at one node. It either leaves the document alone, makes exactly one
//! edit, or records an [`ErrorRegistry`] offset where it would otherwise have to guess an
//! expression. Fixers are no-ops on nodes that are already complete.

mod body;
mod call;
mod condition;
mod enum_constant;
mod expression;
mod literal;
mod semicolon;

use std::ops::Range;

use smartenter_core::{Document, Editor};
use smartenter_syntax::{
    LinkedNode, MISSING_EXPRESSION, MISSING_IDENTIFIER, MISSING_TYPE, SyntaxKind,
};

use crate::{ErrorRegistry, SmartEnterError};

/// A repair rule. [`FIXERS`] lists them in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixer {
    /// Close an unterminated string or character literal.
    Literal,
    /// Close the argument list of a call or `new` expression.
    MethodCall,
    /// Parenthesize or close the condition of an `if`.
    IfCondition,
    /// Parenthesize or close the condition of a `while`.
    WhileCondition,
    /// Add or close the `while (..)` tail of a `do` loop.
    DoWhileCondition,
    /// Parenthesize or close the selector of a `switch`.
    SwitchExpression,
    /// Add or close the parameter of a `catch`.
    CatchDeclaration,
    /// Wrap an unbraced body written on the following lines in braces.
    BlockBrace,
    /// Add a missing `then` or `else` block.
    MissingIfBranches,
    /// Add a missing `while` body.
    MissingWhileBody,
    /// Add a missing `switch` body.
    MissingSwitchBody,
    /// Add a missing `catch` block.
    MissingCatchBody,
    /// Add a missing `synchronized` block.
    MissingSynchronizedBody,
    /// Complete a `for` header and add a missing body.
    MissingForBody,
    /// Close a for-each header and add a missing body.
    MissingForeachBody,
    /// Add a missing method body.
    MissingMethodBody,
    /// Mark a value-less `return` in a non-void method.
    MissingReturnExpression,
    /// Mark a `throw` without an exception.
    MissingThrowExpression,
    /// Close a method's parameter list.
    ParameterList,
    /// Close a parenthesized expression.
    Parenthesized,
    /// Terminate a statement or declaration with `;`.
    Semicolon,
    /// Close an array initializer.
    MissingArrayInitializerBrace,
    /// Separate an enum constant from what follows it.
    EnumField,
}

/// All fixers, in the order they are tried on each node.
pub const FIXERS: [Fixer; 23] = [
    Fixer::Literal,
    Fixer::MethodCall,
    Fixer::IfCondition,
    Fixer::WhileCondition,
    Fixer::DoWhileCondition,
    Fixer::SwitchExpression,
    Fixer::CatchDeclaration,
    Fixer::BlockBrace,
    Fixer::MissingIfBranches,
    Fixer::MissingWhileBody,
    Fixer::MissingSwitchBody,
    Fixer::MissingCatchBody,
    Fixer::MissingSynchronizedBody,
    Fixer::MissingForBody,
    Fixer::MissingForeachBody,
    Fixer::MissingMethodBody,
    Fixer::MissingReturnExpression,
    Fixer::MissingThrowExpression,
    Fixer::ParameterList,
    Fixer::Parenthesized,
    Fixer::Semicolon,
    Fixer::MissingArrayInitializerBrace,
    Fixer::EnumField,
];

impl Fixer {
    /// Repair `node` if this fixer applies to it.
    ///
    /// `node` must come from a tree committed against `cx.editor`'s document.
    pub fn apply(self, cx: &mut FixContext, node: &LinkedNode) -> Result<(), SmartEnterError> {
        match self {
            Self::Literal => literal::fix(cx, node),
            Self::MethodCall => call::fix_method_call(cx, node),
            Self::IfCondition => {
                condition::fix_header(cx, node, SyntaxKind::IfStatement, SyntaxKind::If)
            }
            Self::WhileCondition => {
                condition::fix_header(cx, node, SyntaxKind::WhileStatement, SyntaxKind::While)
            }
            Self::DoWhileCondition => condition::fix_do_while(cx, node),
            Self::SwitchExpression => {
                condition::fix_header(cx, node, SyntaxKind::SwitchStatement, SyntaxKind::Switch)
            }
            Self::CatchDeclaration => condition::fix_catch(cx, node),
            Self::BlockBrace => body::fix_block_brace(cx, node),
            Self::MissingIfBranches => body::fix_if_branches(cx, node),
            Self::MissingWhileBody => body::fix_loop_body(cx, node, SyntaxKind::WhileStatement),
            Self::MissingSwitchBody => {
                body::fix_block_body(cx, node, SyntaxKind::SwitchStatement)
            }
            Self::MissingCatchBody => body::fix_block_body(cx, node, SyntaxKind::CatchSection),
            Self::MissingSynchronizedBody => body::fix_synchronized_body(cx, node),
            Self::MissingForBody => body::fix_for_body(cx, node),
            Self::MissingForeachBody => {
                body::fix_loop_body(cx, node, SyntaxKind::ForeachStatement)
            }
            Self::MissingMethodBody => body::fix_method_body(cx, node),
            Self::MissingReturnExpression => expression::fix_return(cx, node),
            Self::MissingThrowExpression => expression::fix_throw(cx, node),
            Self::ParameterList => {
                call::close_list(cx, node, SyntaxKind::ParameterList, SyntaxKind::RightParen, ")")
            }
            Self::Parenthesized => call::fix_parenthesized(cx, node),
            Self::Semicolon => semicolon::fix(cx, node),
            Self::MissingArrayInitializerBrace => call::close_list(
                cx,
                node,
                SyntaxKind::ArrayInitializer,
                SyntaxKind::RightBrace,
                "}",
            ),
            Self::EnumField => enum_constant::fix(cx, node),
        }
    }
}

/// What a fixer may touch: the editor and the error registry.
pub struct FixContext<'a> {
    /// The edited document with its caret.
    pub editor: &'a mut Editor,
    /// Holes the fixers refused to fill.
    pub errors: &'a mut ErrorRegistry,
}

impl<'a> FixContext<'a> {
    /// Bundle an editor and a registry.
    pub fn new(editor: &'a mut Editor, errors: &'a mut ErrorRegistry) -> Self {
        Self { editor, errors }
    }

    fn document(&self) -> &Document {
        self.editor.document()
    }

    fn insert(&mut self, offset: usize, text: &str) -> Result<(), SmartEnterError> {
        self.editor.insert(offset, text)?;
        Ok(())
    }

    fn replace(&mut self, range: Range<usize>, text: &str) -> Result<(), SmartEnterError> {
        self.editor.replace(range.start, range.end, text)?;
        Ok(())
    }

    /// Insert `{}` and put the caret on the `{`.
    fn insert_block(&mut self, offset: usize) -> Result<(), SmartEnterError> {
        self.insert(offset, "{}")?;
        self.editor.move_caret_to(offset);
        Ok(())
    }

    fn register(&mut self, offset: usize) {
        self.errors.register(offset);
    }

    /// Register every missing expression or identifier below `node`, without entering
    /// nested statements or blocks.
    fn register_holes(&mut self, node: &LinkedNode) {
        for child in node.children() {
            if is_hole(&child) {
                self.register(child.offset());
            } else if !child.kind().is_statement() && child.kind() != SyntaxKind::CodeBlock {
                self.register_holes(&child);
            }
        }
    }
}

/// A zero-length error standing for an expression, name or type the user still has to
/// type.
fn is_hole(node: &LinkedNode) -> bool {
    node.is_empty()
        && node.error_message().is_some_and(|message| {
            matches!(
                message.as_str(),
                MISSING_EXPRESSION | MISSING_IDENTIFIER | MISSING_TYPE
            )
        })
}

/// The end of the last child that is neither trivia nor a zero-length error.
fn significant_end(node: &LinkedNode) -> usize {
    node.significant_children()
        .next_back()
        .map_or(node.end(), |child| child.end())
}

/// Whether the last significant child is a `;`.
pub(crate) fn ends_with_semicolon(node: &LinkedNode) -> bool {
    node.significant_children()
        .next_back()
        .is_some_and(|child| child.kind() == SyntaxKind::Semicolon)
}

/// The first statement child after `after`.
fn statement_after<'a>(node: &LinkedNode<'a>, after: &LinkedNode) -> Option<LinkedNode<'a>> {
    node.children()
        .skip(after.index() + 1)
        .find(|child| child.kind().is_statement())
}

fn has_modifier(node: &LinkedNode, names: &[&str]) -> bool {
    node.child(SyntaxKind::ModifierList).is_some_and(|modifiers| {
        modifiers.children().any(|modifier| {
            modifier.kind() == SyntaxKind::Modifier && names.contains(&modifier.text().as_str())
        })
    })
}

/// A method declared without a body on purpose.
fn is_bodiless_method(node: &LinkedNode) -> bool {
    has_modifier(node, &["abstract", "native"])
        || node
            .ancestor(|kind| kind == SyntaxKind::ClassDeclaration)
            .is_some_and(|class| class.child(SyntaxKind::Interface).is_some())
}

#[cfg(test)]
mod tests;
