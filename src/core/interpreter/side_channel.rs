//! Cookies, storage, HTTP requests, files, tasks and logging

use std::ops::ControlFlow;

use super::{ChainState, Cx, Flow};
use crate::core::chain::ChainLink;

const HTTP_METHODS: &[&str] = &["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideOp {
    ClearCookies,
    ClearCookie,
    GetCookies,
    GetCookie,
    SetCookie,
    ClearLocalStorage,
    Screenshot,
    Request,
    Task,
    Exec,
    ReadFile,
    WriteFile,
    Fixture,
    Log,
    Pause,
    Debug,
}

impl SideOp {
    pub const METHODS: &'static [(&'static str, SideOp)] = &[
        ("clearCookies", SideOp::ClearCookies),
        ("clearCookie", SideOp::ClearCookie),
        ("getCookies", SideOp::GetCookies),
        ("getCookie", SideOp::GetCookie),
        ("setCookie", SideOp::SetCookie),
        ("clearLocalStorage", SideOp::ClearLocalStorage),
        ("screenshot", SideOp::Screenshot),
        ("request", SideOp::Request),
        ("task", SideOp::Task),
        ("exec", SideOp::Exec),
        ("readFile", SideOp::ReadFile),
        ("writeFile", SideOp::WriteFile),
        ("fixture", SideOp::Fixture),
        ("log", SideOp::Log),
        ("pause", SideOp::Pause),
        ("debug", SideOp::Debug),
    ];

    pub(super) fn apply<'a>(self, state: &mut ChainState, link: &ChainLink<'a>, cx: &Cx<'a>) -> Flow {
        let arg = |i: usize| cx.arg(link, i).unwrap_or("''");
        let statement = match self {
            SideOp::ClearCookies => "await page.context().clearCookies()".to_string(),
            SideOp::ClearCookie => format!(
                "// TODO: Migrate cy.clearCookie({}) - use page.context().clearCookies() with filter",
                cx.quoted(link, 0)
            ),
            SideOp::GetCookies => "await page.context().cookies()".to_string(),
            SideOp::GetCookie => format!(
                "await page.context().cookies().then(cookies => cookies.find(c => c.name === {}))",
                arg(0)
            ),
            SideOp::SetCookie => format!(
                "await page.context().addCookies([{{ name: {}, value: {}, url: page.url() }}])",
                arg(0),
                arg(1)
            ),
            SideOp::ClearLocalStorage => match cx.arg(link, 0) {
                Some(key) => format!("await page.evaluate(() => localStorage.removeItem({key}))"),
                None => "await page.evaluate(() => localStorage.clear())".to_string(),
            },
            SideOp::Screenshot => screenshot(&state.current_locator, link, cx),
            SideOp::Request => request(link, cx),
            SideOp::Task => format!(
                "// TODO: Migrate cy.task({}) - Playwright uses fixtures or global setup",
                cx.quoted(link, 0)
            ),
            SideOp::Exec => format!(
                "// TODO: Migrate cy.exec({}) - use child_process or test fixtures in Playwright",
                cx.quoted(link, 0)
            ),
            SideOp::ReadFile => format!(
                "// TODO: Migrate cy.readFile({}) - use fs.readFileSync in Playwright",
                cx.quoted(link, 0)
            ),
            SideOp::WriteFile => format!(
                "// TODO: Migrate cy.writeFile({}) - use fs.writeFileSync in Playwright",
                cx.quoted(link, 0)
            ),
            SideOp::Fixture => format!(
                "// TODO: Migrate cy.fixture({}) - use import or fs.readFileSync in Playwright",
                cx.quoted(link, 0)
            ),
            SideOp::Log => format!("console.log({})", link.joined_args(cx.source)),
            SideOp::Pause => format!(
                "await page.pause(){}",
                cx.note("Opens Playwright Inspector for debugging")
            ),
            SideOp::Debug => format!(
                "await page.pause(){}",
                cx.note("cy.debug() equivalent - opens Playwright Inspector")
            ),
        };
        state.emit(statement);
        ControlFlow::Continue(())
    }
}

/// Page screenshot, or an element screenshot when the chain has a subject
fn screenshot<'a>(subject: &str, link: &ChainLink<'a>, cx: &Cx<'a>) -> String {
    let target = if subject.is_empty() || subject == "page" {
        "page"
    } else {
        subject
    };
    match (cx.literal(link, 0), cx.arg(link, 0)) {
        (Some(name), _) => format!("await {target}.screenshot({{ path: '{name}.png' }})"),
        (None, Some(expr)) if !expr.starts_with('{') => {
            format!("await {target}.screenshot({{ path: `${{{expr}}}.png` }})")
        }
        _ => format!("await {target}.screenshot()"),
    }
}

/// `request(url)`, `request(METHOD, url[, body])`, `request(url, body)`
fn request<'a>(link: &ChainLink<'a>, cx: &Cx<'a>) -> String {
    let first_is_object = link.args.first().is_some_and(|a| a.kind() == "object");
    if first_is_object || link.args.is_empty() {
        return "await page.request.fetch(/* TODO: migrate cy.request with options object */)"
            .to_string();
    }

    let method = cx
        .literal(link, 0)
        .filter(|m| HTTP_METHODS.contains(&m.to_uppercase().as_str()));

    let (verb, url, body) = match method {
        Some(m) => (m.to_lowercase(), cx.arg(link, 1).unwrap_or("''"), cx.arg(link, 2)),
        None if link.args.len() >= 2 => ("post".to_string(), cx.arg(link, 0).unwrap_or("''"), cx.arg(link, 1)),
        None => ("get".to_string(), cx.arg(link, 0).unwrap_or("''"), None),
    };

    match body {
        Some(body) => format!("await page.request.{verb}({url}, {{ data: {body} }})"),
        None => format!("await page.request.{verb}({url})"),
    }
}
