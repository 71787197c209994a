//! Element actions and interactions

use std::ops::ControlFlow;

use super::{ChainState, Cx, Flow};
use crate::core::chain::ChainLink;

/// Table-driven action: `await <loc>.<target>(<args>)`
pub(super) fn apply_action<'a>(
    state: &mut ChainState,
    link: &ChainLink<'a>,
    cx: &Cx<'a>,
    target: &str,
) -> Flow {
    let statement = format!(
        "await {}.{}({})",
        state.current_locator,
        target,
        link.joined_args(cx.source)
    );
    state.emit(statement);
    ControlFlow::Continue(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementOp {
    Trigger,
    Hover,
    RightClick,
    Submit,
    Invoke,
    Its,
}

impl ElementOp {
    pub const METHODS: &'static [(&'static str, ElementOp)] = &[
        ("trigger", ElementOp::Trigger),
        ("hover", ElementOp::Hover),
        ("rightclick", ElementOp::RightClick),
        ("submit", ElementOp::Submit),
        ("invoke", ElementOp::Invoke),
        ("its", ElementOp::Its),
    ];

    pub(super) fn apply<'a>(self, state: &mut ChainState, link: &ChainLink<'a>, cx: &Cx<'a>) -> Flow {
        let loc = state.current_locator.clone();
        match self {
            ElementOp::Trigger => {
                let call = match (cx.literal(link, 0), cx.arg(link, 0)) {
                    (Some("mouseover" | "mouseenter"), _) | (None, None) => "hover()".to_string(),
                    (Some("focus"), _) => "focus()".to_string(),
                    (Some("blur"), _) => "blur()".to_string(),
                    (Some(event), _) => format!("dispatchEvent('{event}')"),
                    (None, Some(expr)) => format!("dispatchEvent({expr})"),
                };
                state.emit(format!("await {loc}.{call}"));
            }
            ElementOp::Hover => state.emit(format!("await {loc}.hover()")),
            ElementOp::RightClick => state.emit(format!("await {loc}.click({{ button: 'right' }})")),
            ElementOp::Submit => {
                state.emit(format!("await {loc}.evaluate((form) => form.submit())"))
            }
            ElementOp::Invoke => {
                let name = cx
                    .literal(link, 0)
                    .or_else(|| cx.arg(link, 0))
                    .unwrap_or_default();
                let rest: Vec<&str> = (1..link.args.len())
                    .filter_map(|i| cx.arg(link, i))
                    .collect();
                state.emit(format!(
                    "await {loc}.evaluate((el) => el.{name}({}))",
                    rest.join(", ")
                ));
            }
            ElementOp::Its => {
                let path = cx
                    .literal(link, 0)
                    .or_else(|| cx.arg(link, 0))
                    .unwrap_or_default();
                state.current_locator = format!("await {loc}.evaluate((el) => el.{path})");
            }
        }
        ControlFlow::Continue(())
    }
}
