//! The Smart-Enter driver: repair passes, re-targeting and the final enter.

use std::ops::Range;

use smartenter_core::{Editor, RangeMarkerId};
use smartenter_syntax::{LinkedNode, SyntaxKind, SyntaxTree, reformat};
use tracing::{debug, error, warn};

use crate::enter::{ENTER_RULES, EnterContext, break_comment};
use crate::fixers::{FIXERS, FixContext};
use crate::navigator::{collect_queue, find_repair_target, shift_backward};
use crate::{CompletionPopup, ErrorRegistry, Session, SmartEnterConfig, SmartEnterError};

/// How an invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The target was completed and the caret placed.
    Completed,
    /// A completion popup was showing; the invocation stopped without further edits.
    Deferred,
    /// The pass bound was hit and the document was restored.
    RolledBack,
    /// Tree and text disagreed; the document is left as it was at that point.
    Failed,
}

/// Summary of one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmartEnterReport {
    /// How the invocation ended.
    pub outcome: Outcome,
    /// Repair passes started.
    pub attempts: usize,
    /// The unresolved hole of the last pass, if any.
    pub first_error_offset: Option<usize>,
}

enum Pass {
    Done(Outcome),
    Retry,
}

/// The target of a completed repair, detached from the tree it was found in.
struct TargetScope {
    range: Range<usize>,
    kind: SyntaxKind,
    reformat_range: Range<usize>,
}

enum Repair {
    NoTarget,
    Deferred,
    /// A fixer edited the document; the tree is stale.
    Invalidated,
    Complete(TargetScope),
}

/// Runs Smart-Enter on an editor.
#[derive(Debug, Clone, Default)]
pub struct SmartEnterProcessor {
    config: SmartEnterConfig,
}

impl SmartEnterProcessor {
    /// Create a processor with the given configuration.
    pub fn new(config: SmartEnterConfig) -> Self {
        Self { config }
    }

    /// The processor's configuration.
    pub fn config(&self) -> &SmartEnterConfig {
        &self.config
    }

    /// Complete the statement at the caret. Always returns `true`: the key press is
    /// consumed whatever happened to the document.
    pub fn process(&self, editor: &mut Editor, popup: &dyn CompletionPopup) -> bool {
        self.run(editor, popup);
        true
    }

    /// Like [`SmartEnterProcessor::process`], reporting how the invocation ended.
    pub fn run(&self, editor: &mut Editor, popup: &dyn CompletionPopup) -> SmartEnterReport {
        let snapshot = editor.text();
        let caret = editor.caret();
        let mut session = Session::begin(editor);
        let mut tree = SyntaxTree::parse(session.document(), self.config.source_kind);
        let mut errors = ErrorRegistry::new();

        let mut attempts = 0;
        let outcome = loop {
            if attempts == self.config.max_attempts {
                warn!(attempts, "smart enter did not settle, rolling back");
                break match roll_back(&mut session, &snapshot, caret) {
                    Ok(()) => Outcome::RolledBack,
                    Err(err) => {
                        error!(%err, "smart enter rollback failed");
                        Outcome::Failed
                    }
                };
            }
            attempts += 1;
            debug!(attempt = attempts, caret = session.caret(), "smart enter pass");

            match self.pass(&mut session, &mut tree, &mut errors, popup) {
                Ok(Pass::Done(outcome)) => break outcome,
                Ok(Pass::Retry) => {}
                Err(err) => {
                    error!(%err, "smart enter failed");
                    break Outcome::Failed;
                }
            }
        };

        SmartEnterReport {
            outcome,
            attempts,
            first_error_offset: errors.first_error_offset(),
        }
    }

    fn pass(
        &self,
        session: &mut Session<'_>,
        tree: &mut SyntaxTree,
        errors: &mut ErrorRegistry,
        popup: &dyn CompletionPopup,
    ) -> Result<Pass, SmartEnterError> {
        tree.commit(session.document());
        if let Some(offset) = errors.take() {
            session.move_caret_to(offset);
        }

        match repair(session, tree, errors, popup)? {
            Repair::NoTarget => {
                let mut cx = EnterContext {
                    editor: session,
                    tree,
                    style: &self.config.style,
                    comments: &self.config.comments,
                };
                if !break_comment(&mut cx)? {
                    session.start_new_line(&self.config.style)?;
                }
                Ok(Pass::Done(Outcome::Completed))
            }
            Repair::Deferred => Ok(Pass::Done(Outcome::Deferred)),
            Repair::Invalidated => {
                self.move_caret_inside_braces(session, tree)?;
                Ok(Pass::Retry)
            }
            Repair::Complete(scope) => {
                let marker = session.create_range_marker(scope.range.clone());
                let result = self.enter(session, tree, errors, &scope, marker);
                session.release_range_marker(marker);
                result.map(|()| Pass::Done(Outcome::Completed))
            }
        }
    }

    /// Reformat around the completed target and run the first enter rule that applies.
    fn enter(
        &self,
        session: &mut Session<'_>,
        tree: &mut SyntaxTree,
        errors: &ErrorRegistry,
        scope: &TargetScope,
        marker: RangeMarkerId,
    ) -> Result<(), SmartEnterError> {
        if let Some(offset) = errors.first_error_offset() {
            session.move_caret_to(offset);
            return self.reformat(session, tree, scope.reformat_range.clone());
        }

        self.reformat(session, tree, scope.reformat_range.clone())?;
        tree.commit(session.document());
        let range = target_range(session, marker)?;

        let entered = {
            let target = tree.find_in_range(range, scope.kind);
            let mut cx = EnterContext {
                editor: session,
                tree,
                style: &self.config.style,
                comments: &self.config.comments,
            };
            let mut entered = false;
            if let Some(target) = &target {
                for rule in ENTER_RULES {
                    if rule.apply(&mut cx, target)? {
                        debug!(?rule, "enter rule applied");
                        entered = true;
                        break;
                    }
                }
            }
            entered
        };
        if entered {
            return Ok(());
        }

        if session.is_modified()? {
            let mut end = target_range(session, marker)?.end;
            let document = session.document();
            if scope.kind == SyntaxKind::EnumConstant
                && (document.region_matches(end, ",") || document.region_matches(end, ";"))
            {
                end += 1;
            }
            session.move_caret_to(end);
        } else {
            session.start_new_line(&self.config.style)?;
        }
        Ok(())
    }

    fn reformat(
        &self,
        editor: &mut Editor,
        tree: &SyntaxTree,
        range: Range<usize>,
    ) -> Result<(), SmartEnterError> {
        let edits = reformat(tree, range, &self.config.style);
        editor.apply_edits(&edits)?;
        Ok(())
    }

    /// Step into an empty block a fixer just inserted next to the caret, laying it out
    /// over two lines.
    fn move_caret_inside_braces(
        &self,
        session: &mut Session<'_>,
        tree: &mut SyntaxTree,
    ) -> Result<(), SmartEnterError> {
        let document = session.document();
        let mut caret = session.caret();
        if document.region_matches(caret, "{}") {
            caret += 2;
        } else if document.region_matches(caret, "{\n}") {
            caret += 3;
        }
        let text = document.text();
        let caret = caret
            .checked_sub(1)
            .and_then(|before| shift_backward(&text, before, " \t"))
            .map_or(0, |pos| pos + 1);

        let open = if caret >= 2 && document.region_matches(caret - 2, "{}") {
            caret - 2
        } else if caret >= 3 && document.region_matches(caret - 3, "{\n}") {
            caret - 3
        } else {
            return Ok(());
        };

        tree.commit(session.document());
        let block = tree
            .leaf_at(open)
            .and_then(|brace| brace.parent().map(|block| block.range()))
            .ok_or_else(|| {
                SmartEnterError::IncorrectTreeOperation(format!("no block owns `{{` at {open}"))
            })?;

        session.move_caret_to(open + 1);
        let style = self
            .config
            .style
            .clone()
            .with_keep_simple_blocks_in_one_line(false);
        let edits = reformat(tree, block, &style);
        session.apply_edits(&edits)?;
        Ok(())
    }
}

/// Run the fixers over the target at the caret until one of them edits the document.
fn repair(
    editor: &mut Editor,
    tree: &SyntaxTree,
    errors: &mut ErrorRegistry,
    popup: &dyn CompletionPopup,
) -> Result<Repair, SmartEnterError> {
    let Some(target) = find_repair_target(tree, editor.document(), editor.caret()) else {
        return Ok(Repair::NoTarget);
    };
    let queue = collect_queue(&target);
    let mut cx = FixContext::new(editor, errors);

    for node in &queue {
        for fixer in FIXERS {
            if popup.is_active() {
                return Ok(Repair::Deferred);
            }
            fixer.apply(&mut cx, node)?;
            if popup.is_active() {
                return Ok(Repair::Deferred);
            }
            if !tree.is_committed(cx.editor.document()) {
                debug!(?fixer, kind = ?node.kind(), offset = node.offset(), "fixer edited document");
                return Ok(Repair::Invalidated);
            }
        }
    }

    Ok(Repair::Complete(TargetScope {
        range: target.range(),
        kind: target.kind(),
        reformat_range: reformat_range(&target),
    }))
}

/// What to reformat once `target` is complete: the enclosing block when the target
/// opens it, the whole loop for parts of a `for` header, otherwise the target alone.
fn reformat_range(target: &LinkedNode) -> Range<usize> {
    let Some(parent) = target.parent() else {
        return target.range();
    };
    match parent.kind() {
        SyntaxKind::CodeBlock => {
            let first = parent.children().find(|child| child.kind().is_statement());
            match first {
                Some(first) if first.offset() == target.offset() => parent.range(),
                _ => target.range(),
            }
        }
        SyntaxKind::ForStatement => parent.range(),
        _ => target.range(),
    }
}

fn target_range(editor: &Editor, marker: RangeMarkerId) -> Result<Range<usize>, SmartEnterError> {
    editor.range_marker(marker).ok_or_else(|| {
        SmartEnterError::IncorrectTreeOperation("target marker was released".into())
    })
}

fn roll_back(editor: &mut Editor, snapshot: &str, caret: usize) -> Result<(), SmartEnterError> {
    let len = editor.document().len();
    editor.replace(0, len, snapshot)?;
    editor.move_caret_to(caret);
    Ok(())
}
