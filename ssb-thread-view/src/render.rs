use serde::Serialize;
use serde_json::to_string_pretty;
use ssb_msg::{Msg, PostContent};
use ssb_ref::{FeedRef, MsgRef};
use ssb_threads::{AncestorBoundary, ThreadContext, ThreadContextModel};

pub type PostThread = ThreadContextModel<Msg<PostContent>>;

#[derive(Debug, Serialize)]
struct ThreadJson<'a> {
    focused: &'a MsgRef,
    truncated_at: Option<&'a MsgRef>,
    cycle_at: Option<&'a MsgRef>,
    thread: Vec<RowJson<'a>>,
}

#[derive(Debug, Serialize)]
struct RowJson<'a> {
    key: &'a MsgRef,
    author: &'a FeedRef,
    context: ThreadContext,
    text: &'a str,
}

fn connector(context: &ThreadContext) -> &'static str {
    match (context.is_connected_above(), context.is_connected_below()) {
        (false, false) => "·",
        (false, true) => "┬",
        (true, true) => "│",
        (true, false) => "└",
    }
}

fn label(context: &ThreadContext) -> &'static str {
    match context {
        ThreadContext::RootWithChildBelow => "root",
        ThreadContext::Focused { .. } => "focused",
        ThreadContext::FragmentBegin { .. } => "begin",
        ThreadContext::FragmentContinuation => "continuation",
        ThreadContext::FragmentEnd => "end",
    }
}

fn truncated_at(thread: &PostThread) -> Option<&MsgRef> {
    match thread.ancestor_boundary() {
        AncestorBoundary::Truncated { at } => Some(at),
        _ => None,
    }
}

fn cycle_at(thread: &PostThread) -> Option<&MsgRef> {
    match thread.ancestor_boundary() {
        AncestorBoundary::Cycle { at } => Some(at),
        _ => None,
    }
}

/// Note above the first row when the ancestor chain does not reach a root.
fn boundary_note(thread: &PostThread) -> Option<String> {
    match thread.ancestor_boundary() {
        AncestorBoundary::Truncated { at } => Some(format!("  ⋮ {} not fetched", at.short())),
        AncestorBoundary::Cycle { at } => Some(format!("  ⋮ reply cycle at {}", at.short())),
        AncestorBoundary::Root | AncestorBoundary::NoParent => None,
    }
}

/// One line per post: connector, classification, short ref, first line of
/// text. The focused post is starred.
pub fn render_text(thread: &PostThread) -> String {
    let mut lines = Vec::with_capacity(thread.len() + 1);

    lines.extend(boundary_note(thread));

    for (msg, context) in thread.iter() {
        let star = if context.is_focused() { "*" } else { " " };
        lines.push(format!(
            "{}{} {:<12} {} {}",
            star,
            connector(&context),
            label(&context),
            msg.key.short(),
            msg.value.content.summary()
        ));
    }

    lines.join("\n")
}

pub fn render_json(thread: &PostThread) -> Result<String, serde_json::Error> {
    let json = ThreadJson {
        focused: thread.focused_id(),
        truncated_at: truncated_at(thread),
        cycle_at: cycle_at(thread),
        thread: thread
            .iter()
            .map(|(msg, context)| RowJson {
                key: &msg.key,
                author: &msg.value.author,
                context,
                text: &msg.value.content.text,
            })
            .collect(),
    };

    to_string_pretty(&json)
}
