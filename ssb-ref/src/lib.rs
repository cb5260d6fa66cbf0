use base64::{
    engine::{general_purpose::STANDARD as b64, Engine},
    DecodeError,
};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt, str::FromStr};
use thiserror::Error as ThisError;

#[derive(Clone, Debug, ThisError)]
pub enum RefError {
    #[error("Does not match as {ref_type}: {input}")]
    BadFormat {
        ref_type: &'static str,
        input: String,
    },
    #[error("Failed to decode base64: {0}")]
    DecodeError(#[from] DecodeError),
}

/// Identity of a feed, `@<base64>.ed25519`.
#[derive(Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct FeedRef(Vec<u8>);

impl FeedRef {
    // From string that starts with @
    pub fn from_string(string: String) -> Result<Self, RefError> {
        if !Self::is_match(string.as_str()) {
            Err(RefError::BadFormat {
                ref_type: "Feed",
                input: string,
            })
        } else {
            Ok(Self(parse_data(string.as_str(), ".ed25519")?))
        }
    }

    pub fn single_regex() -> &'static Regex {
        lazy_static! {
            static ref RE: Regex = canonical_base64("@", ".ed25519", 32, true);
        }
        &RE
    }

    pub fn is_match(string: &str) -> bool {
        Self::single_regex().is_match(string)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for FeedRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}.ed25519", b64.encode(&self.0))
    }
}

impl fmt::Debug for FeedRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeedRef({})", self)
    }
}

impl FromStr for FeedRef {
    type Err = RefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FeedRef::from_string(s.to_string())
    }
}

impl TryFrom<String> for FeedRef {
    type Error = RefError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        FeedRef::from_string(value)
    }
}

impl From<FeedRef> for String {
    fn from(value: FeedRef) -> String {
        value.to_string()
    }
}

/// Identity of a message, `%<base64>.sha256`.
///
/// Two refs are equal when their decoded hashes are equal, so a `MsgRef` can
/// key the lookups used while rebuilding a thread.
#[derive(Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct MsgRef(Vec<u8>);

impl MsgRef {
    // From string that starts with %
    pub fn from_string(string: String) -> Result<Self, RefError> {
        if !Self::is_match(string.as_str()) {
            Err(RefError::BadFormat {
                ref_type: "Msg",
                input: string,
            })
        } else {
            Ok(Self(parse_data(string.as_str(), ".sha256")?))
        }
    }

    pub fn single_regex() -> &'static Regex {
        lazy_static! {
            static ref RE: Regex = canonical_base64("%", ".sha256", 32, true);
        }
        &RE
    }

    pub fn is_match(string: &str) -> bool {
        Self::single_regex().is_match(string)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Sigil plus the first eight base64 characters, enough to tell posts in
    /// one thread apart.
    pub fn short(&self) -> String {
        let data = b64.encode(&self.0);
        format!("%{}", &data[..8.min(data.len())])
    }
}

impl fmt::Display for MsgRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}.sha256", b64.encode(&self.0))
    }
}

impl fmt::Debug for MsgRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MsgRef({})", self)
    }
}

impl FromStr for MsgRef {
    type Err = RefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MsgRef::from_string(s.to_string())
    }
}

impl TryFrom<String> for MsgRef {
    type Error = RefError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        MsgRef::from_string(value)
    }
}

impl From<MsgRef> for String {
    fn from(value: MsgRef) -> String {
        value.to_string()
    }
}

fn parse_data(key: &str, suffix: &str) -> Result<Vec<u8>, RefError> {
    let base64_data = &key[1..key.len() - suffix.len()];
    Ok(b64.decode(base64_data)?)
}

// https://github.com/dominictarr/is-canonical-base64/blob/master/index.js
fn canonical_base64(prefix: &str, suffix: &str, length: u32, include_start_and_end: bool) -> Regex {
    let char = "[a-zA-Z0-9/+]";
    let trail2 = "[AQgw]==";
    let trail4 = "[AEIMQUYcgkosw048]=";

    let mut re = String::new();
    if include_start_and_end {
        re.push('^');
    }
    re.push_str(&regex::escape(prefix));
    re.push_str(char);
    re.push_str(&format!("{{{}}}", (length * 8) / 6));

    re.push_str(match length % 3 {
        0 => "",
        1 => trail2,
        _ => trail4,
    });

    re.push_str(&regex::escape(suffix));
    if include_start_and_end {
        re.push('$');
    }

    Regex::new(&re).expect("canonical base64 pattern is valid")
}
