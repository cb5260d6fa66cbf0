// https://github.com/ssbc/ssb-typescript

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnError, OneOrMany};
use ssb_ref::{FeedRef, MsgRef};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Msg<Content> {
    pub key: MsgRef,
    pub value: MsgValue<Content>,
    #[serde(alias = "timestamp")]
    pub timestamp_received: f64,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct MsgValue<Content> {
    pub author: FeedRef,
    pub sequence: u64,
    #[serde(alias = "timestamp")]
    pub timestamp_asserted: f64,
    pub content: Content,
}

#[serde_as]
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct PostContent {
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub text: String,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub channel: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub root: Option<MsgRef>,
    #[serde_as(as = "Option<DefaultOnError<OneOrMany<_>>>")]
    #[serde(default)]
    pub branch: Option<Vec<MsgRef>>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub fork: Option<MsgRef>,
}

impl PostContent {
    /// The message this post answers directly.
    ///
    /// `branch` holds the latest message(s) the author saw in the thread, so
    /// its first entry is the immediate parent. A post without branches
    /// answers the thread root.
    pub fn reply_to(&self) -> Option<&MsgRef> {
        self.branch
            .as_ref()
            .and_then(|branch| branch.first())
            .or(self.root.as_ref())
    }

    /// First line of the post text, for one-line listings.
    pub fn summary(&self) -> &str {
        self.text.lines().next().unwrap_or("").trim()
    }
}

impl Msg<PostContent> {
    pub fn reply_to(&self) -> Option<&MsgRef> {
        self.value.content.reply_to()
    }
}
