//! Title-to-key search.
//!
//! The scan walks the arena in slot order. Freed slots are reused, so when
//! several topics share a title only membership is guaranteed, not which of
//! them `title_key` picks.

use tracing::instrument;

use crate::domain::arena::ResourceIndex;
use crate::domain::id::TopicKey;

impl ResourceIndex {
    fn matching_keys<'a>(&'a self, title: &'a str) -> impl Iterator<Item = TopicKey> + 'a {
        let root = self.sentinels.root;
        let center = self.sentinels.center;
        self.arena
            .iter()
            .filter(move |(idx, node)| *idx != root && node.title == title)
            .map(move |(idx, node)| {
                if idx == center {
                    TopicKey::Center
                } else {
                    TopicKey::Content(node.id.clone())
                }
            })
    }

    /// Key of the first topic titled `title`.
    ///
    /// Empty title gives [`TopicKey::Center`], no match gives [`TopicKey::Last`].
    #[instrument(level = "trace", skip(self))]
    pub fn title_key(&self, title: &str) -> TopicKey {
        if title.is_empty() {
            return TopicKey::Center;
        }
        self.matching_keys(title).next().unwrap_or(TopicKey::Last)
    }

    /// Keys of every topic titled `title`, never empty.
    #[instrument(level = "trace", skip(self))]
    pub fn title_keys(&self, title: &str) -> Vec<TopicKey> {
        if title.is_empty() {
            return vec![TopicKey::Center];
        }
        let keys: Vec<TopicKey> = self.matching_keys(title).collect();
        if keys.is_empty() {
            vec![TopicKey::Last]
        } else {
            keys
        }
    }
}
