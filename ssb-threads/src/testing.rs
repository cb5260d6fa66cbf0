use crate::ReplyPost;

/// Minimal post keyed by a static string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Note {
    pub id: &'static str,
    pub reply_to: Option<&'static str>,
}

pub fn note(id: &'static str, reply_to: Option<&'static str>) -> Note {
    Note { id, reply_to }
}

pub fn ids<P: ReplyPost<Id = &'static str>>(posts: &[P]) -> Vec<&'static str> {
    posts.iter().map(|post| *post.id()).collect()
}

impl ReplyPost for Note {
    type Id = &'static str;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn reply_to(&self) -> Option<&Self::Id> {
        self.reply_to.as_ref()
    }
}
