use crux_kv::KeyValue;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::event::Event;

pub type KvCapability = KeyValue<Event>;

pub const MAX_VALUE_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KvKey {
    namespace: KeyNamespace,
    key: String,
}

impl KvKey {
    /// Where the remembered category chip lives.
    pub fn selected_category() -> Self {
        Self {
            namespace: KeyNamespace::Selection,
            key: crate::SELECTED_CATEGORY_KEY.to_string(),
        }
    }

    pub fn raw(&self) -> String {
        format!("{}:{}", self.namespace.prefix(), self.key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyNamespace {
    Selection,
}

impl KeyNamespace {
    pub fn prefix(self) -> &'static str {
        match self {
            KeyNamespace::Selection => "selection",
        }
    }
}

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum KvError {
    #[error("value too large: {size} bytes exceeds maximum of {max} bytes")]
    ValueTooLarge { size: usize, max: usize },

    #[error("serialization error: {message}")]
    Serialization { message: String },
}

/// `null` stands for "no selection", so clearing is a plain write.
pub fn encode_selection(category_id: Option<&str>) -> Result<Vec<u8>, KvError> {
    let data = serde_json::to_vec(&category_id)
        .map_err(|e| KvError::Serialization { message: e.to_string() })?;
    if data.len() > MAX_VALUE_SIZE {
        return Err(KvError::ValueTooLarge { size: data.len(), max: MAX_VALUE_SIZE });
    }
    Ok(data)
}

pub fn decode_selection(data: &[u8]) -> Result<Option<String>, KvError> {
    serde_json::from_slice(data).map_err(|e| KvError::Serialization { message: e.to_string() })
}

pub fn save_selection<F>(
    kv: &KvCapability,
    category_id: Option<&str>,
    make_event: F,
) -> Result<(), KvError>
where
    F: FnOnce(bool) -> Event + Send + Sync + 'static,
{
    let value = encode_selection(category_id)?;
    kv.set(KvKey::selected_category().raw(), value, move |result| make_event(result.is_ok()));
    Ok(())
}

/// Missing, unreadable or corrupt values all restore as "no selection".
pub fn load_selection<F>(kv: &KvCapability, make_event: F)
where
    F: FnOnce(Option<String>) -> Event + Send + Sync + 'static,
{
    kv.get(KvKey::selected_category().raw(), move |result| {
        let restored = match result {
            Ok(Some(data)) => decode_selection(&data).unwrap_or_else(|error| {
                warn!(%error, "discarding unreadable category selection");
                None
            }),
            Ok(None) => None,
            Err(_) => {
                warn!("category selection could not be read");
                None
            }
        };
        make_event(restored)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selected_category_key_is_namespaced() {
        assert_eq!(KvKey::selected_category().raw(), "selection:selected_category_id");
    }

    #[test]
    fn selection_survives_encoding() {
        let data = encode_selection(Some("13035")).unwrap();
        assert_eq!(decode_selection(&data).unwrap().as_deref(), Some("13035"));

        let cleared = encode_selection(None).unwrap();
        assert_eq!(cleared, b"null");
        assert_eq!(decode_selection(&cleared).unwrap(), None);
    }

    #[test]
    fn corrupt_selection_is_an_error() {
        assert!(matches!(
            decode_selection(b"{not json"),
            Err(KvError::Serialization { .. })
        ));
    }
}
