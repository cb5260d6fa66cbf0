use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{Error, ReplyPost, ReplyTree, ThreadContextModel};

/// Everything fetched for one thread view: the focused post, whatever
/// ancestors came back (any order), and its descendants in depth-first order.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ContextBundle<P> {
    pub focused: P,
    #[serde(default = "Vec::new")]
    pub ancestors: Vec<P>,
    #[serde(default = "Vec::new")]
    pub descendants: Vec<P>,
}

impl<P: DeserializeOwned> ContextBundle<P> {
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, Error> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

impl<P: ReplyPost> ContextBundle<P> {
    pub fn reply_tree(&self) -> ReplyTree<P::Id> {
        ReplyTree::from_descendants(self.focused.id(), &self.descendants)
    }

    pub fn into_model(self) -> ThreadContextModel<P> {
        let Self {
            focused,
            ancestors,
            descendants,
        } = self;

        ThreadContextModel::new(focused, ancestors, descendants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{testing::ids, ThreadContext};
    use pretty_assertions::assert_eq;

    #[derive(Debug, Deserialize)]
    struct Plain {
        id: String,
        reply_to: Option<String>,
    }

    impl ReplyPost for Plain {
        type Id = String;

        fn id(&self) -> &String {
            &self.id
        }

        fn reply_to(&self) -> Option<&String> {
            self.reply_to.as_ref()
        }
    }

    #[test]
    fn decodes_and_builds() {
        let bundle: ContextBundle<Plain> = ContextBundle::from_json_slice(
            br#"{
                "focused": { "id": "p", "reply_to": "a" },
                "ancestors": [{ "id": "a", "reply_to": null }],
                "descendants": [{ "id": "d", "reply_to": "p" }]
            }"#,
        )
        .unwrap();

        assert_eq!(bundle.reply_tree().top_level(), &["d".to_string()]);

        let model = bundle.into_model();
        let thread: Vec<&str> = model.full_thread().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(thread, vec!["a", "p", "d"]);
        assert_eq!(
            model.context(&"p".to_string()),
            Some(ThreadContext::Focused {
                connected_above: true,
                connected_below: true
            })
        );
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let bundle: ContextBundle<Plain> =
            ContextBundle::from_json_slice(br#"{ "focused": { "id": "p", "reply_to": null } }"#)
                .unwrap();

        assert!(bundle.ancestors.is_empty());
        assert!(bundle.descendants.is_empty());
        assert_eq!(bundle.into_model().len(), 1);
    }

    #[test]
    fn rejects_bundle_without_focused() {
        let result = ContextBundle::<Plain>::from_json_slice(br#"{ "ancestors": [] }"#);

        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn works_with_test_notes() {
        let bundle = ContextBundle {
            focused: crate::testing::note("p", None),
            ancestors: Vec::new(),
            descendants: vec![crate::testing::note("d", Some("p"))],
        };

        assert_eq!(ids(bundle.into_model().full_thread()), vec!["p", "d"]);
    }
}
