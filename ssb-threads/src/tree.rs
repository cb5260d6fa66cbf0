use std::collections::{HashMap, HashSet};

use log::warn;

use crate::ReplyPost;

/// Parent/children view of a flattened descendant list.
///
/// Built separately from [`crate::classify_descendants`] for callers that
/// need real tree traversal. A post becomes top-level when it replies to the
/// focused post, to nothing, or to a post not in the list.
#[derive(Clone, Debug)]
pub struct ReplyTree<Id> {
    top_level: Vec<Id>,
    children: HashMap<Id, Vec<Id>>,
    parents: HashMap<Id, Id>,
}

impl<Id> ReplyTree<Id>
where
    Id: Clone + Eq + std::hash::Hash + std::fmt::Debug,
{
    pub fn from_descendants<P>(focused_id: &Id, descendants: &[P]) -> Self
    where
        P: ReplyPost<Id = Id>,
    {
        let known: HashSet<&Id> = descendants.iter().map(|post| post.id()).collect();

        let mut seen: HashSet<&Id> = HashSet::new();
        let mut top_level = Vec::new();
        let mut children: HashMap<Id, Vec<Id>> = HashMap::new();
        let mut parents = HashMap::new();

        for post in descendants {
            let id = post.id();
            if !seen.insert(id) {
                warn!("Skipping repeated descendant {:?}", id);
                continue;
            }

            match post.reply_to() {
                Some(parent) if parent != focused_id && parent != id && known.contains(parent) => {
                    children.entry(parent.clone()).or_default().push(id.clone());
                    parents.insert(id.clone(), parent.clone());
                }
                _ => top_level.push(id.clone()),
            }
        }

        Self {
            top_level,
            children,
            parents,
        }
    }

    /// Posts hanging directly off the focused post, in list order.
    pub fn top_level(&self) -> &[Id] {
        &self.top_level
    }

    pub fn children(&self, id: &Id) -> &[Id] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn parent(&self, id: &Id) -> Option<&Id> {
        self.parents.get(id)
    }

    /// Distance from the focused post, 1 for top-level posts. `None` for ids
    /// not in the tree or only reachable through a reply cycle.
    pub fn depth(&self, id: &Id) -> Option<usize> {
        let mut visited = HashSet::new();
        let mut current = id;
        let mut depth = 1;

        while let Some(parent) = self.parents.get(current) {
            if !visited.insert(current) {
                return None;
            }
            current = parent;
            depth += 1;
        }

        self.top_level.contains(current).then_some(depth)
    }

    /// Every post reachable from the top level, depth-first, parents before
    /// children.
    pub fn walk(&self) -> Vec<&Id> {
        let mut order = Vec::with_capacity(self.parents.len() + self.top_level.len());
        let mut stack: Vec<&Id> = self.top_level.iter().rev().collect();

        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.children(id).iter().rev());
        }

        order
    }

    /// Number of distinct posts in the tree, including any caught in cycles.
    pub fn len(&self) -> usize {
        self.top_level.len() + self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.top_level.is_empty() && self.parents.is_empty()
    }
}
