//! Chain interpreter
//!
//! Folds a decomposed chain into Playwright source text. Each link is looked
//! up in a dispatch table keyed by method name; its handler reads the link's
//! arguments and updates a [`ChainState`] accumulator, or stops the fold
//! early with a finished replacement (alias lookups, network interception,
//! anything without an equivalent).
//!
//! After the fold, an assertion wins over any emitted statement, a statement
//! wins over a bare locator, and an empty state means "leave the call alone".
//!
//! Replacement text is shaped by the [`Position`] of the outermost call: line
//! comments and `;`-joined statements only where they cannot swallow or break
//! the surrounding code.

mod actions;
mod assertions;
mod locators;
mod navigation;
mod side_channel;
mod special;
mod unsupported;

use std::collections::HashMap;
use std::ops::ControlFlow;

use lazy_static::lazy_static;
use pwmigrate_ast::adapters::line_indent;
use pwmigrate_ast::{node_text, Node};
use tracing::debug;

use super::chain::ChainLink;
use super::literal::{one_line, string_content};
use super::mappings::action_for;

use actions::ElementOp;
use locators::LocatorOp;
use navigation::PageOp;
use side_channel::SideOp;
use unsupported::ManualOp;

/// What a handler tells the fold: keep going, or this is the final text
pub(crate) type Flow = ControlFlow<String>;

/// Accumulator threaded through the fold
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainState {
    /// Last statement emitted by an action, navigation or side-channel link
    pub result_statement: Option<String>,
    /// Locator (or page-level value) expression built so far
    pub current_locator: String,
    /// Pending assertion statements, in chain order
    pub assertions: Vec<String>,
}

impl ChainState {
    /// Record a statement, replacing any earlier one
    pub fn emit(&mut self, statement: String) {
        if let Some(previous) = self.result_statement.replace(statement) {
            debug!(%previous, "statement superseded by a later link");
        }
    }

    /// Final replacement text, `None` when the chain produced nothing
    pub(crate) fn finish(self, cx: &Cx) -> Option<String> {
        if !self.assertions.is_empty() {
            if let Some(statement) = &self.result_statement {
                debug!(%statement, "statement superseded by assertion");
            }
            return Some(cx.join(self.assertions));
        }
        if let Some(statement) = self.result_statement {
            return Some(cx.join(vec![statement]));
        }
        (!self.current_locator.is_empty()).then_some(self.current_locator)
    }
}

/// Where the outermost call of a chain sits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// A whole expression statement with nothing else after it on its line
    LineEnd,
    /// A whole expression statement followed by more code on the same line
    Statement,
    /// Part of a larger expression: arrow body, argument, initializer
    Expression,
}

impl Position {
    pub fn of(call: &Node, source: &str) -> Position {
        let Some(statement) = call.parent().filter(|p| p.kind() == "expression_statement") else {
            return Position::Expression;
        };
        let rest_of_line = source[statement.end_byte()..]
            .split('\n')
            .next()
            .unwrap_or_default();
        if rest_of_line.trim().is_empty() {
            Position::LineEnd
        } else {
            Position::Statement
        }
    }
}

/// Line-comment text folded into `undefined /* ... */`
fn block_comment(text: &str) -> String {
    let body = text
        .lines()
        .map(|line| line.trim().trim_start_matches("//").trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .replace("*/", "* /");
    format!("undefined /* {body} */")
}

/// Per-chain context shared by all handlers
pub(crate) struct Cx<'a> {
    pub source: &'a str,
    /// Indentation of the line the chain starts on
    pub indent: &'a str,
    /// Full text of the outermost call
    pub original: &'a str,
    pub position: Position,
}

impl<'a> Cx<'a> {
    fn new(source: &'a str, outermost: &Node) -> Self {
        Self {
            source,
            indent: line_indent(source, outermost.start_byte()),
            original: node_text(outermost, source),
            position: Position::of(outermost, source),
        }
    }

    /// Source text of argument `i`
    pub fn arg(&self, link: &ChainLink<'a>, i: usize) -> Option<&'a str> {
        link.arg_text(i, self.source)
    }

    /// String content of argument `i` when it is a literal
    pub fn literal(&self, link: &ChainLink<'a>, i: usize) -> Option<&'a str> {
        string_content(link.args.get(i), self.source)
    }

    /// Argument `i` as it should appear inside a TODO: `'content'` for
    /// literals, the raw expression otherwise
    pub fn quoted(&self, link: &ChainLink<'a>, i: usize) -> String {
        match (self.literal(link, i), self.arg(link, i)) {
            (Some(content), _) => format!("'{content}'"),
            (None, Some(raw)) => raw.to_string(),
            (None, None) => String::new(),
        }
    }

    /// Trailing note after a statement: a line comment at the end of a line,
    /// a block comment anywhere else
    pub fn note(&self, text: &str) -> String {
        match self.position {
            Position::LineEnd => format!("; // {text}"),
            _ => format!(" /* {} */", text.replace("*/", "* /")),
        }
    }

    /// Join the statements of one replacement
    ///
    /// Statement positions get `;`-separated lines; expression positions get
    /// a parenthesized sequence. A line comment that would run into code
    /// after it becomes a block comment.
    pub fn join(&self, statements: Vec<String>) -> String {
        let last = statements.len().saturating_sub(1);
        let fitted: Vec<String> = statements
            .into_iter()
            .enumerate()
            .map(|(i, statement)| {
                let runs_into_code = match self.position {
                    Position::LineEnd => false,
                    Position::Statement => i == last,
                    Position::Expression => true,
                };
                if runs_into_code && statement.starts_with("//") {
                    block_comment(&statement)
                } else {
                    statement
                }
            })
            .collect();

        match self.position {
            Position::Expression if fitted.len() > 1 => format!("({})", fitted.join(", ")),
            _ => fitted.join(&format!(";\n{}", self.indent)),
        }
    }

    /// Marker for a chain the engine cannot translate
    pub fn no_equivalent(&self) -> String {
        format!(
            "// TODO: Migrate {} - no Playwright equivalent known",
            one_line(self.original)
        )
    }
}

/// Handler family for one chain method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    /// Builds or refines the current locator
    Locator(LocatorOp),
    /// `should` (replaces) or `and` (appends)
    Assertion { chained: bool },
    /// Element action from the action table, carrying the target method
    Action(&'static str),
    /// Element interactions with bespoke argument handling
    Element(ElementOp),
    /// Page navigation and page-level accessors
    Page(PageOp),
    /// Cookies, storage, network, files, logging
    SideChannel(SideOp),
    /// Constructs that need a human: aliases, callbacks, interception
    Manual(ManualOp),
}

lazy_static! {
    static ref DISPATCH: HashMap<&'static str, Handler> = {
        let mut table = HashMap::new();
        for (method, op) in LocatorOp::METHODS {
            table.insert(*method, Handler::Locator(*op));
        }
        table.insert("should", Handler::Assertion { chained: false });
        table.insert("and", Handler::Assertion { chained: true });
        for (method, op) in ElementOp::METHODS {
            table.insert(*method, Handler::Element(*op));
        }
        for (method, op) in PageOp::METHODS {
            table.insert(*method, Handler::Page(*op));
        }
        for (method, op) in SideOp::METHODS {
            table.insert(*method, Handler::SideChannel(*op));
        }
        for (method, op) in ManualOp::METHODS {
            table.insert(*method, Handler::Manual(*op));
        }
        table
    };
}

impl Handler {
    /// Look up the handler for a method name
    pub fn for_method(method: &str) -> Option<Handler> {
        DISPATCH
            .get(method)
            .copied()
            .or_else(|| action_for(method).map(Handler::Action))
    }

    /// Whether the handler operates on an existing locator
    pub fn needs_subject(self) -> bool {
        match self {
            Handler::Locator(op) => op.needs_subject(),
            Handler::Assertion { .. } | Handler::Action(_) | Handler::Element(_) => true,
            Handler::Page(_) | Handler::SideChannel(_) => false,
            Handler::Manual(op) => op.needs_subject(),
        }
    }

    fn apply<'a>(self, state: &mut ChainState, link: &ChainLink<'a>, cx: &Cx<'a>) -> Flow {
        match self {
            Handler::Locator(op) => op.apply(state, link, cx),
            Handler::Assertion { chained } => assertions::apply(state, link, cx, chained),
            Handler::Action(target) => actions::apply_action(state, link, cx, target),
            Handler::Element(op) => op.apply(state, link, cx),
            Handler::Page(op) => op.apply(state, link, cx),
            Handler::SideChannel(op) => op.apply(state, link, cx),
            Handler::Manual(op) => op.apply(state, link, cx),
        }
    }
}

/// Translate one chain into replacement text
///
/// `None` leaves the original call untouched.
pub fn interpret<'a>(chain: &[ChainLink<'a>], source: &'a str) -> Option<String> {
    let outermost = chain.last()?;
    let cx = Cx::new(source, &outermost.node);

    if special::is_page_assertion_chain(chain) {
        return Some(special::interpret(chain, &cx));
    }

    let folded = chain.iter().try_fold(ChainState::default(), |mut state, link| {
        let flow = match Handler::for_method(link.method) {
            Some(handler) if handler.needs_subject() && state.current_locator.is_empty() => {
                debug!(method = link.method, "link has no subject");
                ControlFlow::Break(cx.no_equivalent())
            }
            Some(handler) => handler.apply(&mut state, link, &cx),
            None => {
                debug!(method = link.method, "no handler for method");
                ControlFlow::Break(cx.no_equivalent())
            }
        };
        match flow {
            ControlFlow::Continue(()) => ControlFlow::Continue(state),
            ControlFlow::Break(text) => ControlFlow::Break(text),
        }
    });

    match folded {
        ControlFlow::Break(text) => Some(cx.join(vec![text])),
        ControlFlow::Continue(state) => state.finish(&cx),
    }
}
