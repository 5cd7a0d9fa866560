//! JSON text adapters.
//!
//! `serde_json` is the reference parser: every text or tree result is read
//! back through it before comparison, so formatting differences between
//! libraries never count as mismatches.

use eyre::{bail, Result, WrapErr};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::codec::Library;

/// Writes `value` as JSON text with `library`.
pub fn to_json<T: Serialize>(library: Library, value: &T) -> Result<String> {
    match library {
        Library::SerdeJson => serde_json::to_string(value).wrap_err("serde_json encode failed"),
        Library::SerdeJsonValue => {
            let tree = serde_json::to_value(value).wrap_err("serde_json tree build failed")?;
            Ok(tree.to_string())
        }
        Library::SimdJson => simd_json::serde::to_string(value).wrap_err("simd_json encode failed"),
        other => bail!("{} does not write JSON text", other),
    }
}

/// Parses JSON text into a typed value with `library`.
pub fn from_json<T: DeserializeOwned>(library: Library, text: &str) -> Result<T> {
    match library {
        Library::SerdeJson => serde_json::from_str(text).wrap_err("serde_json decode failed"),
        Library::SimdJson => {
            let mut bytes = text.as_bytes().to_vec();
            simd_json::serde::from_slice(&mut bytes).wrap_err("simd_json decode failed")
        }
        other => bail!("{} does not read JSON text into objects", other),
    }
}

/// Parses JSON text into an untyped tree.
pub fn parse_tree(text: &str) -> Result<Value> {
    serde_json::from_str(text).wrap_err("serde_json tree parse failed")
}

/// Parses text with the reference parser.
pub fn reference_parse<T: DeserializeOwned>(text: &str) -> Result<T> {
    serde_json::from_str(text).wrap_err("reference parser rejected JSON text")
}

/// Converts a JSON tree with the reference parser.
pub fn from_tree<T: DeserializeOwned>(tree: Value) -> Result<T> {
    serde_json::from_value(tree).wrap_err("reference parser rejected JSON tree")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Client, Clients, DataGenerator, Dataset, Users};

    #[test]
    fn every_text_library_round_trips_users() {
        let users = Users::generate(&mut DataGenerator::new(4), 4096).unwrap();

        for lib in [Library::SerdeJson, Library::SerdeJsonValue, Library::SimdJson] {
            let text = to_json(lib, &users).unwrap();
            let parsed: Users = reference_parse(&text).unwrap();
            assert_eq!(parsed, users, "{} text did not round trip", lib);
        }
    }

    #[test]
    fn typed_parsers_agree_with_reference() {
        let clients = Clients::generate(&mut DataGenerator::new(8), 4096).unwrap();
        let text = serde_json::to_string_pretty(&clients).unwrap();

        let via_simd: Clients = from_json(Library::SimdJson, &text).unwrap();
        let via_serde: Clients = from_json(Library::SerdeJson, &text).unwrap();
        assert_eq!(via_simd, clients);
        assert_eq!(via_serde, clients);
    }

    #[test]
    fn tree_conversion_matches_typed_parse() {
        let clients = Clients {
            clients: vec![Client::default()],
        };
        let text = to_json(Library::SerdeJson, &clients).unwrap();

        let tree = parse_tree(&text).unwrap();
        assert_eq!(from_tree::<Clients>(tree).unwrap(), clients);
    }

    #[test]
    fn binary_library_has_no_text_form() {
        let err = to_json(Library::Cbor, &Users::default()).unwrap_err();
        assert!(err.to_string().contains("cbor"));
        assert!(from_json::<Users>(Library::Protobuf, "{}").is_err());
    }

    #[test]
    fn malformed_text_is_an_error() {
        assert!(reference_parse::<Users>("{\"users\": [").is_err());
        assert!(from_json::<Users>(Library::SimdJson, "{\"users\": 3}").is_err());
    }
}
