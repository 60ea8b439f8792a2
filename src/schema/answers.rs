use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnswerError {
    #[error("answer for '{0}' was already recorded")]
    AlreadyAnswered(String),
}

/// Responses collected by the question wizard, keyed by question key.
///
/// Write-once: a key can be recorded a single time per session and is
/// never overwritten. Iteration follows recording order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<(String, String)>", into = "Vec<(String, String)>")]
pub struct AnswerMap {
    index: FxHashMap<String, usize>,
    entries: Vec<(String, String)>,
}

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` under `key`. Fails if `key` already has an answer.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), AnswerError> {
        let key = key.into();
        if self.index.contains_key(&key) {
            return Err(AnswerError::AlreadyAnswered(key));
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value.into()));
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&i| self.entries[i].1.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(key, answer)` pairs in recording order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl From<Vec<(String, String)>> for AnswerMap {
    /// Later duplicates of a key are dropped, keeping the first answer.
    fn from(pairs: Vec<(String, String)>) -> Self {
        let mut map = AnswerMap::new();
        for (key, value) in pairs {
            let _ = map.insert(key, value);
        }
        map
    }
}

impl From<AnswerMap> for Vec<(String, String)> {
    fn from(map: AnswerMap) -> Self {
        map.entries
    }
}
