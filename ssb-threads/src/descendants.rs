use log::trace;

use crate::{ReplyPost, ThreadContext};

/// Classify a depth-first, parent-before-children list of replies to the
/// focused post.
///
/// Only the next entry is looked at: a post "has a reply below" when the
/// entry right after it replies to it. The first entry is taken to reply to
/// the focused post. Out-of-order input classifies badly but never panics.
pub fn classify_descendants<P: ReplyPost>(descendants: &[P]) -> Vec<(&P, ThreadContext)> {
    let mut is_reply_to_previous = true;

    descendants
        .iter()
        .enumerate()
        .map(|(index, post)| {
            let has_reply_below = descendants
                .get(index + 1)
                .and_then(|next| next.reply_to())
                .is_some_and(|reply_to| reply_to == post.id());

            let context = match (is_reply_to_previous, has_reply_below) {
                (true, true) => ThreadContext::FragmentContinuation,
                (true, false) => ThreadContext::FragmentEnd,
                (false, connected_below) => ThreadContext::FragmentBegin { connected_below },
            };
            trace!("Descendant {:?} is {:?}", post.id(), context);

            is_reply_to_previous = has_reply_below;
            (post, context)
        })
        .collect()
}
