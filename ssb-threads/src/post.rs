use std::{fmt::Debug, hash::Hash};

use ssb_msg::{Msg, PostContent};
use ssb_ref::MsgRef;

/// The only shape of a post a thread needs: who it is, and who it answers.
///
/// Everything else a post carries (author, text, timestamps) rides along
/// untouched.
pub trait ReplyPost {
    type Id: Clone + Eq + Hash + Debug;

    fn id(&self) -> &Self::Id;

    fn reply_to(&self) -> Option<&Self::Id>;
}

impl ReplyPost for Msg<PostContent> {
    type Id = MsgRef;

    fn id(&self) -> &MsgRef {
        &self.key
    }

    fn reply_to(&self) -> Option<&MsgRef> {
        self.value.content.reply_to()
    }
}

impl<P: ReplyPost> ReplyPost for &P {
    type Id = P::Id;

    fn id(&self) -> &Self::Id {
        (*self).id()
    }

    fn reply_to(&self) -> Option<&Self::Id> {
        (*self).reply_to()
    }
}
