use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use tgb_core::Result;

/// Named request parameters, kept in key order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Params {
    inner: BTreeMap<String, Value>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.inner.insert(key.into(), value.into());
        self
    }

    /// `None` leaves the bag untouched.
    pub fn set_opt(
        &mut self,
        key: impl Into<String>,
        value: Option<impl Into<Value>>,
    ) -> &mut Self {
        if let Some(v) = value {
            self.inner.insert(key.into(), v.into());
        }
        self
    }

    /// Serialize any record into a single parameter.
    pub fn set_serialized(
        &mut self,
        key: impl Into<String>,
        value: &impl Serialize,
    ) -> Result<&mut Self> {
        let value = serde_json::to_value(value)?;
        self.inner.insert(key.into(), value);
        Ok(self)
    }

    /// Add every entry of `other` whose key is not set yet; existing values win.
    pub fn merge(&mut self, other: Params) -> &mut Self {
        for (k, v) in other.inner {
            self.inner.entry(k).or_insert(v);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.inner.get(key)
    }

    /// Present and not `null`.
    pub fn contains(&self, key: &str) -> bool {
        self.inner.get(key).is_some_and(|v| !v.is_null())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// JSON object body for POST requests.
    pub fn to_json(&self) -> Value {
        Value::Object(self.inner.clone().into_iter().collect::<Map<_, _>>())
    }

    /// Form/query representation: strings as-is, everything else as JSON text.
    pub fn to_form(&self) -> Vec<(String, String)> {
        self.inner
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| (k.clone(), form_value(v)))
            .collect()
    }
}

pub(crate) fn form_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl IntoIterator for Params {
    type Item = (String, Value);
    type IntoIter = std::collections::btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}
