//! Binary format adapters.
//!
//! The serde formats (`bincode`, `msgpack`, `cbor`) work for any payload.
//! `protobuf` and `flatbuffers` go through the payload's schema conversions
//! and fail for payload kinds without one.

use eyre::{ensure, eyre, Result, WrapErr};
use prost::Message;

use crate::codec::BinaryFormat;
use crate::model::Dataset;
use crate::proto::UsersProto;

pub fn encode<T: Dataset>(format: BinaryFormat, value: &T) -> Result<Vec<u8>> {
    match format {
        BinaryFormat::Bincode => bincode::serde::encode_to_vec(value, bincode::config::standard())
            .wrap_err("bincode encode failed"),
        BinaryFormat::MessagePack => {
            rmp_serde::to_vec_named(value).wrap_err("msgpack encode failed")
        }
        BinaryFormat::Cbor => serde_cbor::to_vec(value).wrap_err("cbor encode failed"),
        BinaryFormat::Protobuf => {
            let message = value
                .to_proto()
                .ok_or_else(|| eyre!("{} payloads have no protobuf schema", T::KIND))?;
            Ok(message.encode_to_vec())
        }
        BinaryFormat::FlatBuffers => value
            .to_flatbuffers()
            .ok_or_else(|| eyre!("{} payloads have no table schema", T::KIND)),
    }
}

pub fn decode<T: Dataset>(format: BinaryFormat, bytes: &[u8]) -> Result<T> {
    match format {
        BinaryFormat::Bincode => {
            let (value, read) =
                bincode::serde::decode_from_slice(bytes, bincode::config::standard())
                    .wrap_err("bincode decode failed")?;
            ensure!(
                read == bytes.len(),
                "bincode left {} trailing bytes",
                bytes.len() - read
            );
            Ok(value)
        }
        BinaryFormat::MessagePack => rmp_serde::from_slice(bytes).wrap_err("msgpack decode failed"),
        BinaryFormat::Cbor => serde_cbor::from_slice(bytes).wrap_err("cbor decode failed"),
        BinaryFormat::Protobuf => T::from_proto(decode_proto(bytes)?),
        BinaryFormat::FlatBuffers => T::from_flatbuffers(bytes),
    }
}

pub fn decode_proto(bytes: &[u8]) -> Result<UsersProto> {
    UsersProto::decode(bytes).wrap_err("protobuf decode failed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Clients, DataGenerator, DataKind, Users};

    #[test]
    fn every_format_round_trips_users() {
        let users = Users::generate(&mut DataGenerator::new(12), 4096).unwrap();

        for format in BinaryFormat::ALL {
            let bytes = encode(format, &users).unwrap();
            let decoded: Users = decode(format, &bytes).unwrap();
            assert_eq!(decoded, users, "{} did not round trip", format);
        }
    }

    #[test]
    fn serde_formats_round_trip_clients() {
        let clients = Clients::generate(&mut DataGenerator::new(13), 4096).unwrap();

        for format in BinaryFormat::ALL
            .into_iter()
            .filter(|f| f.supports(DataKind::Clients))
        {
            let bytes = encode(format, &clients).unwrap();
            let decoded: Clients = decode(format, &bytes).unwrap();
            assert_eq!(decoded, clients, "{} did not round trip", format);
        }
    }

    #[test]
    fn schema_formats_reject_clients() {
        let clients = Clients::default();

        let err = encode(BinaryFormat::Protobuf, &clients).unwrap_err();
        assert!(err.to_string().contains("clients"));
        assert!(encode(BinaryFormat::FlatBuffers, &clients).is_err());
        assert!(decode::<Clients>(BinaryFormat::FlatBuffers, &[0; 8]).is_err());
    }

    #[test]
    fn bincode_rejects_trailing_bytes() {
        let mut bytes = encode(BinaryFormat::Bincode, &Users::default()).unwrap();
        bytes.push(0);

        let err = decode::<Users>(BinaryFormat::Bincode, &bytes).unwrap_err();
        assert!(err.to_string().contains("trailing"));
    }

    #[test]
    fn truncated_input_is_an_error() {
        let users = Users::generate(&mut DataGenerator::new(14), 1024).unwrap();

        for format in [BinaryFormat::MessagePack, BinaryFormat::Cbor, BinaryFormat::FlatBuffers] {
            let bytes = encode(format, &users).unwrap();
            let cut = &bytes[..bytes.len() / 2];
            assert!(decode::<Users>(format, cut).is_err(), "{} accepted a truncated payload", format);
        }
    }
}
