//! # Libraries, APIs and Output Shapes
//!
//! Every library under test is a `Library`. For each `Api` a library has one
//! registered `Shape`: the form its result takes and therefore the path the
//! harness uses to verify it. Shapes are fixed here, at registration, instead
//! of being discovered by inspecting each result.
//!
//! | Library            | Serialize            | Deserialize    |
//! |--------------------|----------------------|----------------|
//! | `serde_json`       | Text                 | Object         |
//! | `serde_json_value` | Text                 | JsonTree       |
//! | `simd_json`        | Text                 | Object         |
//! | `bincode`          | Binary(Bincode)      | Object         |
//! | `msgpack`          | Binary(MessagePack)  | Object         |
//! | `cbor`             | Binary(Cbor)         | Object         |
//! | `protobuf`         | Binary(Protobuf)     | ProtoMessage   |
//! | `flatbuffers`      | Binary(FlatBuffers)  | Object         |
//!
//! `protobuf` and `flatbuffers` have schemas for users payloads only.
//!
//! ## Module Structure
//!
//! - `json`: text encoders and parsers, including the reference parser
//! - `binary`: byte encoders and decoders per `BinaryFormat`

pub mod binary;
pub mod json;

use std::fmt;
use std::str::FromStr;

use eyre::{eyre, Report};

use crate::model::DataKind;
use crate::proto::UsersProto;

pub use binary::{decode, encode};
pub use json::{from_json, from_tree, reference_parse, to_json};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Library {
    SerdeJson,
    SerdeJsonValue,
    SimdJson,
    Bincode,
    MessagePack,
    Cbor,
    Protobuf,
    FlatBuffers,
}

impl Library {
    pub const ALL: [Library; 8] = [
        Library::SerdeJson,
        Library::SerdeJsonValue,
        Library::SimdJson,
        Library::Bincode,
        Library::MessagePack,
        Library::Cbor,
        Library::Protobuf,
        Library::FlatBuffers,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Library::SerdeJson => "serde_json",
            Library::SerdeJsonValue => "serde_json_value",
            Library::SimdJson => "simd_json",
            Library::Bincode => "bincode",
            Library::MessagePack => "msgpack",
            Library::Cbor => "cbor",
            Library::Protobuf => "protobuf",
            Library::FlatBuffers => "flatbuffers",
        }
    }

    pub fn shape(self, api: Api) -> Shape {
        match (self, api) {
            (Library::SerdeJson | Library::SerdeJsonValue | Library::SimdJson, Api::Serialize) => {
                Shape::Text
            }
            (Library::Bincode, Api::Serialize) => Shape::Binary(BinaryFormat::Bincode),
            (Library::MessagePack, Api::Serialize) => Shape::Binary(BinaryFormat::MessagePack),
            (Library::Cbor, Api::Serialize) => Shape::Binary(BinaryFormat::Cbor),
            (Library::Protobuf, Api::Serialize) => Shape::Binary(BinaryFormat::Protobuf),
            (Library::FlatBuffers, Api::Serialize) => Shape::Binary(BinaryFormat::FlatBuffers),
            (Library::SerdeJsonValue, Api::Deserialize) => Shape::JsonTree,
            (Library::Protobuf, Api::Deserialize) => Shape::ProtoMessage,
            (_, Api::Deserialize) => Shape::Object,
        }
    }

    /// The byte format the library reads and writes, if it is not JSON text.
    pub fn binary_format(self) -> Option<BinaryFormat> {
        match self.shape(Api::Serialize) {
            Shape::Binary(format) => Some(format),
            _ => None,
        }
    }

    pub fn is_json(self) -> bool {
        self.binary_format().is_none()
    }

    /// Payload kinds the library has a schema for.
    pub fn kinds(self) -> &'static [DataKind] {
        match self {
            Library::Protobuf | Library::FlatBuffers => &[DataKind::Users],
            _ => &[DataKind::Users, DataKind::Clients],
        }
    }
}

impl fmt::Display for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Library {
    type Err = Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Library::ALL
            .into_iter()
            .find(|lib| lib.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| eyre!("unknown library '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Api {
    Serialize,
    Deserialize,
}

impl Api {
    pub const ALL: [Api; 2] = [Api::Serialize, Api::Deserialize];
}

impl fmt::Display for Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Api::Serialize => "serialize",
            Api::Deserialize => "deserialize",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryFormat {
    Bincode,
    MessagePack,
    Cbor,
    Protobuf,
    FlatBuffers,
}

impl BinaryFormat {
    pub const ALL: [BinaryFormat; 5] = [
        BinaryFormat::Bincode,
        BinaryFormat::MessagePack,
        BinaryFormat::Cbor,
        BinaryFormat::Protobuf,
        BinaryFormat::FlatBuffers,
    ];

    /// Whether the format can encode payloads of `kind`.
    pub fn supports(self, kind: DataKind) -> bool {
        match self {
            BinaryFormat::Protobuf | BinaryFormat::FlatBuffers => kind == DataKind::Users,
            _ => true,
        }
    }
}

impl fmt::Display for BinaryFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BinaryFormat::Bincode => "bincode",
            BinaryFormat::MessagePack => "msgpack",
            BinaryFormat::Cbor => "cbor",
            BinaryFormat::Protobuf => "protobuf",
            BinaryFormat::FlatBuffers => "flatbuffers",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Object,
    ProtoMessage,
    JsonTree,
    Text,
    Binary(BinaryFormat),
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Object => f.write_str("object"),
            Shape::ProtoMessage => f.write_str("protobuf message"),
            Shape::JsonTree => f.write_str("json tree"),
            Shape::Text => f.write_str("text"),
            Shape::Binary(format) => write!(f, "{} bytes", format),
        }
    }
}

/// One library result, tagged with its shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Output<T> {
    Object(T),
    ProtoMessage(UsersProto),
    JsonTree(serde_json::Value),
    Text(String),
    Binary(BinaryFormat, Vec<u8>),
}

impl<T> Output<T> {
    pub fn shape(&self) -> Shape {
        match self {
            Output::Object(_) => Shape::Object,
            Output::ProtoMessage(_) => Shape::ProtoMessage,
            Output::JsonTree(_) => Shape::JsonTree,
            Output::Text(_) => Shape::Text,
            Output::Binary(format, _) => Shape::Binary(*format),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_names_round_trip() {
        for lib in Library::ALL {
            assert_eq!(lib.to_string().parse::<Library>().unwrap(), lib);
        }
        assert_eq!("  MsgPack ".parse::<Library>().unwrap(), Library::MessagePack);
    }

    #[test]
    fn unknown_library_is_an_error() {
        let err = "jackson".parse::<Library>().unwrap_err();
        assert!(err.to_string().contains("jackson"));
    }

    #[test]
    fn serialize_shapes() {
        assert_eq!(Library::SerdeJson.shape(Api::Serialize), Shape::Text);
        assert_eq!(Library::SerdeJsonValue.shape(Api::Serialize), Shape::Text);
        assert_eq!(
            Library::FlatBuffers.shape(Api::Serialize),
            Shape::Binary(BinaryFormat::FlatBuffers)
        );
        assert_eq!(
            Library::Protobuf.shape(Api::Serialize),
            Shape::Binary(BinaryFormat::Protobuf)
        );
    }

    #[test]
    fn deserialize_shapes() {
        assert_eq!(Library::SerdeJson.shape(Api::Deserialize), Shape::Object);
        assert_eq!(Library::SerdeJsonValue.shape(Api::Deserialize), Shape::JsonTree);
        assert_eq!(Library::Protobuf.shape(Api::Deserialize), Shape::ProtoMessage);
        assert_eq!(Library::FlatBuffers.shape(Api::Deserialize), Shape::Object);
    }

    #[test]
    fn schema_libraries_cover_users_only() {
        assert_eq!(Library::Protobuf.kinds(), &[DataKind::Users]);
        assert!(Library::Cbor.kinds().contains(&DataKind::Clients));
        assert!(!BinaryFormat::FlatBuffers.supports(DataKind::Clients));
        assert!(BinaryFormat::Bincode.supports(DataKind::Clients));
    }

    #[test]
    fn binary_format_matches_serialize_shape() {
        assert_eq!(Library::Cbor.binary_format(), Some(BinaryFormat::Cbor));
        assert_eq!(Library::SimdJson.binary_format(), None);
        assert!(Library::SerdeJsonValue.is_json());
        assert!(!Library::MessagePack.is_json());
    }

    #[test]
    fn output_reports_its_shape() {
        let text: Output<()> = Output::Text("{}".to_string());
        let bytes: Output<()> = Output::Binary(BinaryFormat::Cbor, vec![0xA0]);

        assert_eq!(text.shape(), Shape::Text);
        assert_eq!(bytes.shape(), Shape::Binary(BinaryFormat::Cbor));
        assert_eq!(Output::Object(1).shape(), Shape::Object);
    }
}
