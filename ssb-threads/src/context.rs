use serde::{Deserialize, Serialize};

/// How a post in the linear thread connects to the entries around it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ThreadContext {
    /// Oldest resolved ancestor, with the rest of the chain below it.
    RootWithChildBelow,
    /// The post the thread was opened on.
    Focused {
        connected_above: bool,
        connected_below: bool,
    },
    /// Starts a new fragment: the entry before it does not chain into it.
    FragmentBegin { connected_below: bool },
    /// Connected from above, with a reply directly below.
    FragmentContinuation,
    /// Connected from above, nothing below.
    FragmentEnd,
}

impl ThreadContext {
    pub fn is_connected_above(&self) -> bool {
        match self {
            ThreadContext::RootWithChildBelow => false,
            ThreadContext::Focused {
                connected_above, ..
            } => *connected_above,
            ThreadContext::FragmentBegin { .. } => false,
            ThreadContext::FragmentContinuation | ThreadContext::FragmentEnd => true,
        }
    }

    pub fn is_connected_below(&self) -> bool {
        match self {
            ThreadContext::RootWithChildBelow | ThreadContext::FragmentContinuation => true,
            ThreadContext::Focused {
                connected_below, ..
            } => *connected_below,
            ThreadContext::FragmentBegin { connected_below } => *connected_below,
            ThreadContext::FragmentEnd => false,
        }
    }

    pub fn is_focused(&self) -> bool {
        matches!(self, ThreadContext::Focused { .. })
    }
}
