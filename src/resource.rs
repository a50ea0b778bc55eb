//! Resource naming and the response envelope.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, DeserializeOwned, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// A QuickBooks entity addressable under `/v3/company/{realmId}/`.
pub trait Resource: DeserializeOwned {
    /// Key the entity is wrapped under in response envelopes (e.g. "Purchase").
    const ENTITY: &'static str;

    /// Path segment of the entity endpoint (e.g. "purchase").
    const PATH: &'static str;
}

/// Response body of a single-entity call:
/// `{"<Entity>": {...}, "time": "<timestamp>"}`.
///
/// Only lives long enough to extract the entity; the server timestamp and
/// any other keys are skipped.
#[derive(Debug)]
pub(crate) struct Envelope<T> {
    pub(crate) entity: T,
}

impl<T: Resource> Envelope<T> {
    pub(crate) fn into_inner(self) -> T {
        self.entity
    }
}

impl<'de, T: Resource> Deserialize<'de> for Envelope<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EnvelopeVisitor<T>(PhantomData<T>);

        impl<'de, T: Resource> Visitor<'de> for EnvelopeVisitor<T> {
            type Value = Envelope<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "an object with a `{}` entry", T::ENTITY)
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entity = None;

                while let Some(key) = map.next_key::<String>()? {
                    if key == T::ENTITY {
                        if entity.is_some() {
                            return Err(de::Error::duplicate_field(T::ENTITY));
                        }
                        entity = Some(map.next_value::<T>()?);
                    } else {
                        map.next_value::<IgnoredAny>()?;
                    }
                }

                let entity = entity.ok_or_else(|| de::Error::missing_field(T::ENTITY))?;
                Ok(Envelope { entity })
            }
        }

        deserializer.deserialize_map(EnvelopeVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Widget {
        #[serde(rename = "Id")]
        id: String,
    }

    impl Resource for Widget {
        const ENTITY: &'static str = "Widget";
        const PATH: &'static str = "widget";
    }

    #[test]
    fn test_envelope_extracts_entity() {
        let body = r#"{"Widget": {"Id": "7"}, "time": "2015-07-29T09:29:56.229-07:00"}"#;
        let envelope: Envelope<Widget> = serde_json::from_str(body).unwrap();

        assert_eq!(envelope.into_inner().id, "7");
    }

    #[test]
    fn test_envelope_skips_time_of_any_shape() {
        let body = r#"{"time": {"epoch": 1438187396}, "Widget": {"Id": "8"}}"#;
        let envelope: Envelope<Widget> = serde_json::from_str(body).unwrap();

        assert_eq!(envelope.into_inner().id, "8");
    }

    #[test]
    fn test_envelope_ignores_unknown_keys() {
        let body = r#"{"warnings": [], "Widget": {"Id": "7", "domain": "QBO"}}"#;
        let envelope: Envelope<Widget> = serde_json::from_str(body).unwrap();

        assert_eq!(envelope.into_inner().id, "7");
    }

    #[test]
    fn test_envelope_missing_entity_is_an_error() {
        let body = r#"{"Gadget": {"Id": "7"}, "time": "2015-07-29T09:29:56.229-07:00"}"#;
        let err = serde_json::from_str::<Envelope<Widget>>(body).unwrap_err();
        assert!(err.to_string().contains("missing field `Widget`"));
    }

    #[test]
    fn test_envelope_rejects_non_object() {
        assert!(serde_json::from_str::<Envelope<Widget>>("[1, 2]").is_err());
    }
}
