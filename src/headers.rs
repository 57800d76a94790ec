//! Header access for verification and outbound header packaging.

use crate::profile::HeaderProfile;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Case-sensitive `name -> value` lookup over an inbound header set.
pub trait HeaderSource {
    fn header(&self, name: &str) -> Option<&str>;
}

impl<S: BuildHasher> HeaderSource for HashMap<String, String, S> {
    fn header(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl<S: BuildHasher> HeaderSource for HashMap<&str, &str, S> {
    fn header(&self, name: &str) -> Option<&str> {
        self.get(name).copied()
    }
}

impl HeaderSource for BTreeMap<String, String> {
    fn header(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl HeaderSource for [(&str, &str)] {
    fn header(&self, name: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == name).map(|(_, v)| *v)
    }
}

impl<const N: usize> HeaderSource for [(&str, &str); N] {
    fn header(&self, name: &str) -> Option<&str> {
        self.as_slice().header(name)
    }
}

impl HeaderSource for [(String, String)] {
    fn header(&self, name: &str) -> Option<&str> {
        self.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }
}

impl HeaderSource for Vec<(String, String)> {
    fn header(&self, name: &str) -> Option<&str> {
        self.as_slice().header(name)
    }
}

impl<T: HeaderSource + ?Sized> HeaderSource for &T {
    fn header(&self, name: &str) -> Option<&str> {
        (**self).header(name)
    }
}

/// The three headers attached to an outbound delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    entries: [(String, String); 3],
}

impl SignedHeaders {
    pub(crate) fn new(
        profile: &HeaderProfile,
        msg_id: &str,
        timestamp: u64,
        signature: String,
    ) -> Self {
        Self {
            entries: [
                (profile.id.to_string(), msg_id.to_string()),
                (profile.timestamp.to_string(), timestamp.to_string()),
                (profile.signature.to_string(), signature),
            ],
        }
    }

    pub fn id(&self) -> &str {
        &self.entries[0].1
    }

    pub fn timestamp(&self) -> &str {
        &self.entries[1].1
    }

    pub fn signature(&self) -> &str {
        &self.entries[2].1
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Owned `(name, value)` pairs, for handing to an HTTP client.
    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.entries.into()
    }
}

impl HeaderSource for SignedHeaders {
    fn header(&self, name: &str) -> Option<&str> {
        self.entries.as_slice().header(name)
    }
}

impl IntoIterator for SignedHeaders {
    type Item = (String, String);
    type IntoIter = std::array::IntoIter<(String, String), 3>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_sensitive() {
        let headers = [("webhook-id", "msg_1")];
        assert_eq!(headers.header("webhook-id"), Some("msg_1"));
        assert_eq!(headers.header("Webhook-Id"), None);
    }

    #[test]
    fn map_sources() {
        let mut owned = HashMap::new();
        owned.insert("a".to_string(), "1".to_string());
        assert_eq!(owned.header("a"), Some("1"));
        assert_eq!(owned.header("b"), None);

        let mut sorted = BTreeMap::new();
        sorted.insert("a".to_string(), "2".to_string());
        assert_eq!(sorted.header("a"), Some("2"));

        let borrowed: HashMap<&str, &str> = [("a", "3")].into_iter().collect();
        assert_eq!(borrowed.header("a"), Some("3"));
    }

    #[test]
    fn vec_source_returns_first_match() {
        let headers = vec![
            ("a".to_string(), "first".to_string()),
            ("a".to_string(), "second".to_string()),
        ];
        assert_eq!(headers.header("a"), Some("first"));
        assert_eq!((&headers).header("a"), Some("first"));
    }

    #[test]
    fn signed_headers_follow_profile() {
        let headers = SignedHeaders::new(HeaderProfile::legacy(), "msg_1", 7, "v1,abc".into());
        assert_eq!(headers.header("Svix-Id"), Some("msg_1"));
        assert_eq!(headers.header("Svix-Timestamp"), Some("7"));
        assert_eq!(headers.header("Svix-Signature"), Some("v1,abc"));
        assert_eq!(headers.header("webhook-id"), None);

        assert_eq!(headers.id(), "msg_1");
        assert_eq!(headers.timestamp(), "7");
        assert_eq!(headers.signature(), "v1,abc");
        assert_eq!(headers.iter().count(), 3);
        assert_eq!(headers.into_pairs().len(), 3);
    }
}
