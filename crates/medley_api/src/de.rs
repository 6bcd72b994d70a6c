//! Lenient deserializers for the backend's loosely-typed fields.

use serde::de::{self, Deserializer, Visitor};
use std::fmt;

/// Decodes a count that the backend emits as a number, a float, or a
/// numeric string, depending on which code path produced it.
pub(crate) fn u64_lenient<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    struct U64Lenient;

    impl Visitor<'_> for U64Lenient {
        type Value = u64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a non-negative integer, possibly encoded as a string")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u64, E> {
            u64::try_from(v).map_err(|_| E::custom(format!("negative count: {v}")))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<u64, E> {
            if v >= 0.0 && v.fract() == 0.0 {
                Ok(v as u64)
            } else {
                Err(E::custom(format!("not a whole non-negative number: {v}")))
            }
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u64, E> {
            v.trim()
                .parse::<u64>()
                .map_err(|_| E::custom(format!("not a numeric string: {v:?}")))
        }
    }

    deserializer.deserialize_any(U64Lenient)
}

/// Decodes a flag that the backend emits either as a JSON bool or as a
/// Python-stringified `"True"`/`"False"`.
pub(crate) fn bool_lenient<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct BoolLenient;

    impl Visitor<'_> for BoolLenient {
        type Value = bool;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a boolean, possibly encoded as a string")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
            Ok(v)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<bool, E> {
            match v.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => Ok(true),
                "false" | "0" | "" => Ok(false),
                other => Err(E::custom(format!("not a boolean string: {other:?}"))),
            }
        }
    }

    deserializer.deserialize_any(BoolLenient)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Counted {
        #[serde(deserialize_with = "super::u64_lenient")]
        n: u64,
    }

    #[derive(Deserialize)]
    struct Flagged {
        #[serde(deserialize_with = "super::bool_lenient")]
        f: bool,
    }

    #[test]
    fn count_from_number_and_string() {
        assert_eq!(serde_json::from_str::<Counted>(r#"{"n": 42}"#).unwrap().n, 42);
        assert_eq!(serde_json::from_str::<Counted>(r#"{"n": "42"}"#).unwrap().n, 42);
        assert_eq!(serde_json::from_str::<Counted>(r#"{"n": 42.0}"#).unwrap().n, 42);
        assert_eq!(serde_json::from_str::<Counted>(r#"{"n": " 7 "}"#).unwrap().n, 7);
    }

    #[test]
    fn count_rejects_garbage() {
        assert!(serde_json::from_str::<Counted>(r#"{"n": -1}"#).is_err());
        assert!(serde_json::from_str::<Counted>(r#"{"n": "many"}"#).is_err());
        assert!(serde_json::from_str::<Counted>(r#"{"n": 1.5}"#).is_err());
    }

    #[test]
    fn flag_from_bool_and_string() {
        assert!(serde_json::from_str::<Flagged>(r#"{"f": true}"#).unwrap().f);
        assert!(serde_json::from_str::<Flagged>(r#"{"f": "True"}"#).unwrap().f);
        assert!(!serde_json::from_str::<Flagged>(r#"{"f": "False"}"#).unwrap().f);
        assert!(!serde_json::from_str::<Flagged>(r#"{"f": ""}"#).unwrap().f);
        assert!(serde_json::from_str::<Flagged>(r#"{"f": "maybe"}"#).is_err());
    }
}
