use std::collections::HashMap;

use itertools::Itertools;
use log::{debug, warn};

use crate::{
    classify_descendants, AncestorBoundary, AncestorChainResolver, ReplyPost, ThreadContext,
};

/// A conversation flattened around one focused post.
///
/// `full_thread` holds the resolved ancestors (oldest first), the focused
/// post, then the descendants in the order they were given. Every post in it
/// has a [`ThreadContext`], and nothing outside it does.
#[derive(Clone, Debug)]
pub struct ThreadContextModel<P: ReplyPost> {
    focused_id: P::Id,
    focused_index: usize,
    full_thread: Vec<P>,
    contexts: Vec<ThreadContext>,
    context_by_post_id: HashMap<P::Id, ThreadContext>,
    ancestor_boundary: AncestorBoundary<P::Id>,
}

impl<P: ReplyPost> ThreadContextModel<P> {
    pub fn new<I>(focused: P, ancestor_candidates: I, descendants: Vec<P>) -> Self
    where
        I: IntoIterator<Item = P>,
    {
        let focused_id = focused.id().clone();

        let chain = AncestorChainResolver::new()
            .excluding(focused_id.clone())
            .resolve(focused.reply_to(), ancestor_candidates);
        let ancestors = chain.posts;

        let mut contexts = Vec::with_capacity(ancestors.len() + 1 + descendants.len());
        contexts.extend((0..ancestors.len()).map(|index| {
            if index == 0 {
                ThreadContext::RootWithChildBelow
            } else {
                ThreadContext::FragmentContinuation
            }
        }));
        contexts.push(ThreadContext::Focused {
            connected_above: !ancestors.is_empty(),
            connected_below: !descendants.is_empty(),
        });
        contexts.extend(
            classify_descendants(&descendants)
                .into_iter()
                .map(|(_, context)| context),
        );

        let focused_index = ancestors.len();
        let mut full_thread = ancestors;
        full_thread.push(focused);
        full_thread.extend(descendants);

        for id in full_thread.iter().map(ReplyPost::id).duplicates() {
            warn!("Post {:?} appears more than once in thread", id);
        }

        let mut context_by_post_id: HashMap<P::Id, ThreadContext> = full_thread
            .iter()
            .zip(contexts.iter())
            .map(|(post, context)| (post.id().clone(), *context))
            .collect();
        // the focused entry always wins a clash
        context_by_post_id.insert(focused_id.clone(), contexts[focused_index]);

        debug!(
            "Built thread around {:?}: {} ancestors ({:?}), {} descendants",
            focused_id,
            focused_index,
            chain.boundary,
            full_thread.len() - focused_index - 1
        );

        Self {
            focused_id,
            focused_index,
            full_thread,
            contexts,
            context_by_post_id,
            ancestor_boundary: chain.boundary,
        }
    }

    /// Classification of `id`, or `None` when the post is not in this thread.
    pub fn context(&self, id: &P::Id) -> Option<ThreadContext> {
        self.context_by_post_id.get(id).copied()
    }

    pub fn full_thread(&self) -> &[P] {
        &self.full_thread
    }

    pub fn focused_id(&self) -> &P::Id {
        &self.focused_id
    }

    pub fn focused(&self) -> &P {
        &self.full_thread[self.focused_index]
    }

    pub fn ancestors(&self) -> &[P] {
        &self.full_thread[..self.focused_index]
    }

    pub fn descendants(&self) -> &[P] {
        &self.full_thread[self.focused_index + 1..]
    }

    /// Whether the ancestor chain reached the conversation root, was cut
    /// short, or never existed. `Focused::connected_above` alone cannot tell
    /// a root from a missing parent.
    pub fn ancestor_boundary(&self) -> &AncestorBoundary<P::Id> {
        &self.ancestor_boundary
    }

    /// Posts in thread order, each with the classification it was given at
    /// its position.
    pub fn iter(&self) -> impl Iterator<Item = (&P, ThreadContext)> {
        self.full_thread
            .iter()
            .zip(self.contexts.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.full_thread.len()
    }

    pub fn is_empty(&self) -> bool {
        // always holds the focused post
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ids, note, Note};
    use pretty_assertions::assert_eq;

    fn scenario() -> ThreadContextModel<Note> {
        ThreadContextModel::new(
            note("p0", Some("a2")),
            vec![
                note("a1", Some("a0")),
                note("a2", Some("a1")),
                note("a0", None),
            ],
            vec![
                note("d1", Some("p0")),
                note("d2", Some("d1")),
                note("d3", Some("p0")),
            ],
        )
    }

    #[test]
    fn end_to_end() {
        let model = scenario();

        assert_eq!(
            ids(model.full_thread()),
            vec!["a0", "a1", "a2", "p0", "d1", "d2", "d3"]
        );
        assert_eq!(model.context(&"a0"), Some(ThreadContext::RootWithChildBelow));
        assert_eq!(model.context(&"a1"), Some(ThreadContext::FragmentContinuation));
        assert_eq!(model.context(&"a2"), Some(ThreadContext::FragmentContinuation));
        assert_eq!(
            model.context(&"p0"),
            Some(ThreadContext::Focused {
                connected_above: true,
                connected_below: true
            })
        );
        assert_eq!(model.context(&"d1"), Some(ThreadContext::FragmentContinuation));
        assert_eq!(model.context(&"d2"), Some(ThreadContext::FragmentEnd));
        assert_eq!(
            model.context(&"d3"),
            Some(ThreadContext::FragmentBegin {
                connected_below: false
            })
        );
        assert_eq!(model.ancestor_boundary(), &AncestorBoundary::Root);
    }

    #[test]
    fn accessors_split_thread() {
        let model = scenario();

        assert_eq!(model.focused_id(), &"p0");
        assert_eq!(model.focused().id, "p0");
        assert_eq!(ids(model.ancestors()), vec!["a0", "a1", "a2"]);
        assert_eq!(ids(model.descendants()), vec!["d1", "d2", "d3"]);
        assert_eq!(model.len(), 7);
        assert!(!model.is_empty());
    }

    #[test]
    fn empty_thread() {
        let model = ThreadContextModel::new(note("p0", None), Vec::new(), Vec::new());

        assert_eq!(model.full_thread(), &[note("p0", None)]);
        assert_eq!(
            model.context(&"p0"),
            Some(ThreadContext::Focused {
                connected_above: false,
                connected_below: false
            })
        );
        assert_eq!(model.ancestor_boundary(), &AncestorBoundary::NoParent);
    }

    #[test]
    fn unknown_id_has_no_context() {
        let model = scenario();

        assert_eq!(model.context(&"nope"), None);
    }

    #[test]
    fn unrelated_candidates_stay_out() {
        let model = ThreadContextModel::new(
            note("p0", Some("a0")),
            vec![note("a0", None), note("stray", Some("a0"))],
            Vec::new(),
        );

        assert_eq!(ids(model.full_thread()), vec!["a0", "p0"]);
        assert_eq!(model.context(&"stray"), None);
    }

    #[test]
    fn single_ancestor_is_root() {
        let model = ThreadContextModel::new(
            note("p0", Some("a0")),
            vec![note("a0", None)],
            vec![note("d1", Some("p0"))],
        );

        assert_eq!(model.context(&"a0"), Some(ThreadContext::RootWithChildBelow));
        assert_eq!(model.context(&"d1"), Some(ThreadContext::FragmentEnd));
    }

    #[test]
    fn missing_parent_is_truncated_not_root() {
        let model = ThreadContextModel::new(
            note("p0", Some("deleted")),
            vec![note("a0", None)],
            Vec::new(),
        );

        assert_eq!(ids(model.full_thread()), vec!["p0"]);
        assert_eq!(
            model.context(&"p0"),
            Some(ThreadContext::Focused {
                connected_above: false,
                connected_below: false
            })
        );
        assert_eq!(
            model.ancestor_boundary(),
            &AncestorBoundary::Truncated { at: "deleted" }
        );
    }

    #[test]
    fn focused_post_among_candidates_is_not_its_own_ancestor() {
        let model = ThreadContextModel::new(
            note("p0", Some("a0")),
            vec![note("a0", Some("p0")), note("p0", Some("a0"))],
            Vec::new(),
        );

        assert_eq!(ids(model.full_thread()), vec!["a0", "p0"]);
        assert_eq!(model.context(&"a0"), Some(ThreadContext::RootWithChildBelow));
        assert_eq!(model.ancestor_boundary(), &AncestorBoundary::Cycle { at: "p0" });
    }

    #[test]
    fn focused_entry_survives_duplicate_ids() {
        let model = ThreadContextModel::new(
            note("p0", None),
            Vec::new(),
            vec![note("d1", Some("p0")), note("p0", Some("d1"))],
        );

        assert_eq!(model.len(), 3);
        assert!(model.context(&"p0").is_some_and(|c| c.is_focused()));
        let focused_count = model
            .iter()
            .filter(|(_, context)| context.is_focused())
            .count();
        assert_eq!(focused_count, 1);
    }

    #[test]
    fn iter_pairs_posts_with_contexts() {
        let model = scenario();

        let pairs: Vec<_> = model
            .iter()
            .map(|(post, context)| (post.id, context))
            .collect();

        assert_eq!(pairs.len(), 7);
        assert_eq!(pairs[0], ("a0", ThreadContext::RootWithChildBelow));
        assert_eq!(
            pairs[6],
            (
                "d3",
                ThreadContext::FragmentBegin {
                    connected_below: false
                }
            )
        );
    }

    #[test]
    fn idempotent() {
        let first = scenario();
        let second = scenario();

        assert_eq!(first.full_thread(), second.full_thread());
        for post in first.full_thread() {
            assert_eq!(first.context(&post.id), second.context(&post.id));
        }
    }
}
