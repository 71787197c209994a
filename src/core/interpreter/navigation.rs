//! Page navigation, page-level accessors and scrolling

use std::ops::ControlFlow;

use super::{ChainState, Cx, Flow};
use crate::core::chain::ChainLink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOp {
    Visit,
    Reload,
    Go,
    Wait,
    Url,
    Title,
    Location,
    Hash,
    Window,
    Document,
    ScrollTo,
    Viewport,
}

impl PageOp {
    pub const METHODS: &'static [(&'static str, PageOp)] = &[
        ("visit", PageOp::Visit),
        ("reload", PageOp::Reload),
        ("go", PageOp::Go),
        ("wait", PageOp::Wait),
        ("url", PageOp::Url),
        ("title", PageOp::Title),
        ("location", PageOp::Location),
        ("hash", PageOp::Hash),
        ("window", PageOp::Window),
        ("document", PageOp::Document),
        ("scrollTo", PageOp::ScrollTo),
        ("viewport", PageOp::Viewport),
    ];

    pub(super) fn apply<'a>(self, state: &mut ChainState, link: &ChainLink<'a>, cx: &Cx<'a>) -> Flow {
        match self {
            PageOp::Visit => state.emit(format!("await page.goto({})", link.joined_args(cx.source))),
            PageOp::Reload => state.emit("await page.reload()".to_string()),
            PageOp::Go => state.emit(go(link, cx)),
            PageOp::Wait => match cx.literal(link, 0).filter(|s| s.starts_with('@')) {
                Some(alias) => state.emit(format!(
                    "// TODO: Migrate cy.wait('{alias}') - use page.waitForResponse() or similar"
                )),
                None => state.emit(format!(
                    "await page.waitForTimeout({})",
                    cx.arg(link, 0).unwrap_or("0")
                )),
            },
            PageOp::Url | PageOp::Title | PageOp::Window | PageOp::Document => {
                state.current_locator = "page".to_string();
            }
            PageOp::Location => {
                state.current_locator = match cx.literal(link, 0) {
                    Some(part) => format!("new URL(page.url()).{part}"),
                    None => "new URL(page.url())".to_string(),
                };
            }
            PageOp::Hash => state.current_locator = "new URL(page.url()).hash".to_string(),
            PageOp::ScrollTo => {
                let statement = scroll_to(&state.current_locator, link, cx);
                state.emit(statement);
            }
            PageOp::Viewport => match (cx.arg(link, 0), cx.arg(link, 1)) {
                (Some(width), Some(height)) => state.emit(format!(
                    "await page.setViewportSize({{ width: {width}, height: {height} }})"
                )),
                _ => state.emit(format!(
                    "// TODO: Migrate cy.viewport({}) - use a device profile from devices[...] in playwright.config",
                    cx.quoted(link, 0)
                )),
            },
        }
        ControlFlow::Continue(())
    }
}

/// History navigation; numeric steps are approximated with a single move
fn go<'a>(link: &ChainLink<'a>, cx: &Cx<'a>) -> String {
    match (cx.literal(link, 0), cx.arg(link, 0)) {
        (Some("back"), _) => "await page.goBack()".to_string(),
        (Some("forward"), _) => "await page.goForward()".to_string(),
        (_, raw) => {
            let raw = raw.unwrap_or_default();
            let forward = raw.parse::<i64>().is_ok_and(|n| n > 0);
            let method = if forward { "goForward" } else { "goBack" };
            let note = cx.note(&format!("TODO: Verify - was cy.go({raw})"));
            format!("await page.{method}(){note}")
        }
    }
}

/// Window scrolling, or element scrolling when the chain has an element subject
fn scroll_to<'a>(subject: &str, link: &ChainLink<'a>, cx: &Cx<'a>) -> String {
    let on_element = !subject.is_empty() && subject != "page";
    let (prefix, target, height) = if on_element {
        (
            format!("await {subject}.evaluate((el) => "),
            "el",
            "el.scrollHeight",
        )
    } else {
        (
            "await page.evaluate(() => ".to_string(),
            "window",
            "document.body.scrollHeight",
        )
    };

    match (cx.literal(link, 0), cx.arg(link, 0), cx.arg(link, 1)) {
        (Some("bottom"), _, _) => format!("{prefix}{target}.scrollTo(0, {height}))"),
        (Some("top"), _, _) => format!("{prefix}{target}.scrollTo(0, 0))"),
        (None, Some(x), Some(y)) => format!("{prefix}{target}.scrollTo({x}, {y}))"),
        _ => format!(
            "{prefix}{target}.scrollTo(0, 0)){}",
            cx.note("TODO: Verify scroll position")
        ),
    }
}
