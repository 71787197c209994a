//! Test-structure rewriting
//!
//! `describe`/`it`/hook calls become their `test.*` equivalents, and the
//! callbacks of cases and hooks are made async with the `{ page }` fixture
//! where the target needs one.

use std::collections::HashMap;

use lazy_static::lazy_static;
use pwmigrate_ast::adapters::{is_function_like, is_string_like};
use pwmigrate_ast::{find_all, named_args, node_text, EditSet, Node};
use tracing::warn;

/// Which argument shapes a test-structure call accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// `describe(name, fn)`
    Group,
    /// `it(name, fn)`
    Case,
    /// `beforeEach(fn)` or `beforeEach(name, fn)`
    Hook,
}

/// Target of one test-structure name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockMapping {
    pub kind: BlockKind,
    pub target: &'static str,
    pub needs_async: bool,
    pub needs_page: bool,
}

const fn block(kind: BlockKind, target: &'static str, needs_async: bool, needs_page: bool) -> BlockMapping {
    BlockMapping {
        kind,
        target,
        needs_async,
        needs_page,
    }
}

lazy_static! {
    static ref BLOCKS: HashMap<&'static str, BlockMapping> = {
        use BlockKind::*;
        let mut m = HashMap::new();
        m.insert("describe", block(Group, "test.describe", false, false));
        m.insert("context", block(Group, "test.describe", false, false));
        m.insert("it", block(Case, "test", true, true));
        m.insert("specify", block(Case, "test", true, true));
        m.insert("before", block(Hook, "test.beforeAll", true, false));
        m.insert("beforeEach", block(Hook, "test.beforeEach", true, true));
        m.insert("after", block(Hook, "test.afterAll", true, false));
        m.insert("afterEach", block(Hook, "test.afterEach", true, true));
        m
    };
}

/// Mapping for a bare test-structure name
pub fn block_mapping(name: &str) -> Option<&'static BlockMapping> {
    BLOCKS.get(name)
}

/// A call recognised as test structure, ready to rewrite
#[derive(Debug, Clone)]
pub struct TestBlockCall<'a> {
    pub callee: Node<'a>,
    pub callback: Node<'a>,
    pub target: String,
    pub mapping: &'static BlockMapping,
}

/// Resolve the callee to a mapping and the full target name
///
/// `describe.only` and `it.skip` keep their modifier on the target.
fn resolve_callee(callee: &Node, source: &str) -> Option<(&'static BlockMapping, String)> {
    match callee.kind() {
        "identifier" => {
            let mapping = block_mapping(node_text(callee, source))?;
            Some((mapping, mapping.target.to_string()))
        }
        "member_expression" => {
            let object = callee.child_by_field_name("object")?;
            let property = callee.child_by_field_name("property")?;
            if object.kind() != "identifier" {
                return None;
            }
            let mapping = block_mapping(node_text(&object, source))?;
            let modifier = node_text(&property, source);
            let modifiable = matches!(mapping.kind, BlockKind::Group | BlockKind::Case);
            (modifiable && matches!(modifier, "only" | "skip"))
                .then(|| (mapping, format!("{}.{}", mapping.target, modifier)))
        }
        _ => None,
    }
}

/// Classify a call expression as test structure
///
/// Groups and cases need exactly `(string, function)`; hooks take
/// `(function)` or `(string, function)`. Anything else is ordinary code that
/// happens to share a name.
pub fn classify<'a>(call: &Node<'a>, source: &str) -> Option<TestBlockCall<'a>> {
    if call.kind() != "call_expression" {
        return None;
    }
    let callee = call.child_by_field_name("function")?;
    let (mapping, target) = resolve_callee(&callee, source)?;
    let args = named_args(call);

    let callback = match (mapping.kind, args.as_slice()) {
        (_, [name, callback]) if is_string_like(name) && is_function_like(callback) => *callback,
        (BlockKind::Hook, [callback]) if is_function_like(callback) => *callback,
        _ => return None,
    };

    Some(TestBlockCall {
        callee,
        callback,
        target,
        mapping,
    })
}

fn is_async(function: &Node) -> bool {
    function.child(0).is_some_and(|first| first.kind() == "async")
}

/// Queue the edits for one recognised block
fn rewrite_block(block: &TestBlockCall, edits: &mut EditSet) -> pwmigrate_ast::Result<()> {
    edits.replace(&block.callee, block.target.as_str())?;

    let mapping = block.mapping;
    if !mapping.needs_async && !mapping.needs_page {
        return Ok(());
    }

    let callback = &block.callback;
    let params = if mapping.needs_page { "({ page })" } else { "()" };
    let add_async = mapping.needs_async && !is_async(callback);
    let param_node = callback
        .child_by_field_name("parameters")
        .or_else(|| callback.child_by_field_name("parameter"));

    if callback.kind() == "arrow_function" {
        let prefix = if add_async { "async " } else { "" };
        if let Some(param_node) = param_node {
            edits.replace(&param_node, format!("{prefix}{params}"))?;
        }
    } else {
        if add_async {
            edits.insert(callback.start_byte(), "async ")?;
        }
        if let Some(param_node) = param_node {
            edits.replace(&param_node, params)?;
        }
    }
    Ok(())
}

/// Rewrite every test-structure call under `root`, returning how many
pub fn rewrite_test_blocks(root: Node, source: &str, edits: &mut EditSet) -> usize {
    let mut rewritten = 0;
    for call in find_all(root, |n| n.kind() == "call_expression") {
        let Some(block) = classify(&call, source) else {
            continue;
        };
        match rewrite_block(&block, edits) {
            Ok(()) => rewritten += 1,
            Err(e) => warn!(
                line = call.start_position().row + 1,
                "skipping test block {}: {}", block.target, e
            ),
        }
    }
    rewritten
}
