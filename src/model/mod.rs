//! # Data Model
//!
//! The two payload kinds every library round-trips: `Users` and `Clients`.
//! JSON field names are camelCase with a leading `_id`, matching the sample
//! payloads the benchmark was built around.
//!
//! `Dataset` ties a payload type to its generator and to the schema-specific
//! encodings. Protobuf and table-buffer conversions exist for `Users` only;
//! the defaults report them as unavailable.

pub mod clients;
pub mod generator;
pub mod users;

use std::fmt::{self, Debug};

use eyre::{bail, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub use clients::{Client, Clients, EyeColor, Partner};
pub use generator::DataGenerator;
pub use users::{Friend, User, Users};

use crate::proto::UsersProto;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKind {
    Users,
    Clients,
}

impl DataKind {
    pub fn name(self) -> &'static str {
        match self {
            DataKind::Users => "users",
            DataKind::Clients => "clients",
        }
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub trait Dataset: Serialize + DeserializeOwned + Clone + PartialEq + Debug {
    const KIND: DataKind;

    /// Builds a payload whose JSON form is at least `target_bytes` long.
    fn generate(generator: &mut DataGenerator, target_bytes: usize) -> Result<Self>;

    /// Number of records in the payload.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn to_proto(&self) -> Option<UsersProto> {
        None
    }

    fn from_proto(_message: UsersProto) -> Result<Self> {
        bail!("{} payloads have no protobuf schema", Self::KIND)
    }

    fn to_flatbuffers(&self) -> Option<Vec<u8>> {
        None
    }

    fn from_flatbuffers(_buf: &[u8]) -> Result<Self> {
        bail!("{} payloads have no table schema", Self::KIND)
    }
}
