use std::collections::{HashMap, HashSet};

use log::{debug, trace, warn};

use crate::ReplyPost;

/// Where the walk up the reply chain stopped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AncestorBoundary<Id> {
    /// The focused post replies to nothing.
    NoParent,
    /// The oldest resolved ancestor replies to nothing: the conversation root.
    Root,
    /// No candidate had id `at`: the parent was deleted or never fetched.
    Truncated { at: Id },
    /// The walk reached `at` a second time and stopped there.
    Cycle { at: Id },
}

impl<Id> AncestorBoundary<Id> {
    pub fn is_truncated(&self) -> bool {
        matches!(self, AncestorBoundary::Truncated { .. })
    }

    pub fn is_cycle(&self) -> bool {
        matches!(self, AncestorBoundary::Cycle { .. })
    }
}

/// Ancestors ordered oldest first, plus how the chain ended.
#[derive(Clone, Debug)]
pub struct AncestorChain<P: ReplyPost> {
    pub posts: Vec<P>,
    pub boundary: AncestorBoundary<P::Id>,
}

impl<P: ReplyPost> AncestorChain<P> {
    pub fn into_posts(self) -> Vec<P> {
        self.posts
    }
}

/// Rebuilds the root-to-parent chain of a post from an unordered set of
/// candidate ancestors.
#[derive(Clone, Debug)]
pub struct AncestorChainResolver<Id> {
    excluded: HashSet<Id>,
}

impl<Id> Default for AncestorChainResolver<Id> {
    fn default() -> Self {
        Self {
            excluded: HashSet::new(),
        }
    }
}

impl<Id> AncestorChainResolver<Id>
where
    Id: Clone + Eq + std::hash::Hash + std::fmt::Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat `id` as already visited, so the walk never resolves it. Used to
    /// keep the focused post itself out of its own ancestry.
    pub fn excluding(mut self, id: Id) -> Self {
        self.excluded.insert(id);
        self
    }

    pub fn resolve<P, I>(&self, focused_reply_to: Option<&Id>, candidates: I) -> AncestorChain<P>
    where
        P: ReplyPost<Id = Id>,
        I: IntoIterator<Item = P>,
    {
        // last write wins on duplicate ids
        let mut lookup: HashMap<Id, P> = candidates
            .into_iter()
            .map(|post| (post.id().clone(), post))
            .collect();

        let mut visited = self.excluded.clone();
        let mut posts = Vec::new();
        let mut next = focused_reply_to.cloned();

        let boundary = loop {
            let Some(id) = next.take() else {
                break if posts.is_empty() {
                    AncestorBoundary::NoParent
                } else {
                    AncestorBoundary::Root
                };
            };

            if !visited.insert(id.clone()) {
                warn!("Reply cycle through {:?}, stopping ancestor walk", id);
                break AncestorBoundary::Cycle { at: id };
            }

            match lookup.remove(&id) {
                Some(post) => {
                    trace!("Resolved ancestor {:?}", id);
                    next = post.reply_to().cloned();
                    posts.push(post);
                }
                None => {
                    debug!("Ancestor {:?} not among candidates, chain truncated", id);
                    break AncestorBoundary::Truncated { at: id };
                }
            }
        };

        // walked newest to oldest
        posts.reverse();

        AncestorChain { posts, boundary }
    }
}

/// Ancestors of a post replying to `focused_reply_to`, oldest first.
pub fn resolve_ancestors<P, I>(focused_reply_to: Option<&P::Id>, candidates: I) -> Vec<P>
where
    P: ReplyPost,
    I: IntoIterator<Item = P>,
{
    AncestorChainResolver::new()
        .resolve(focused_reply_to, candidates)
        .into_posts()
}
