//! # Benchmark Operations
//!
//! A `Bench` produces one library result per call for a fixed API. The
//! harness verifies those results; the criterion benches time the same
//! calls.
//!
//! `JsonBench` is the real implementation: it reads inputs from a
//! `JsonSource` and runs the library. When the capability registry says the
//! library cannot perform the API for this payload kind it returns
//! `Ok(None)` without touching the library.

use eyre::{ensure, Result};

use crate::codec::{self, Api, BinaryFormat, Library, Output};
use crate::config::BenchConfig;
use crate::model::Dataset;
use crate::source::JsonSource;
use crate::support::BenchSupport;

pub trait Bench<T> {
    fn api(&self) -> Api;

    fn support(&self) -> &BenchSupport;

    /// Runs `lib` once. `Ok(None)` means the library is unsupported for
    /// this API.
    fn produce(&self, lib: Library) -> Result<Option<Output<T>>>;
}

#[derive(Debug)]
pub struct JsonBench<T> {
    source: JsonSource<T>,
    support: BenchSupport,
    api: Api,
}

impl<T: Dataset> JsonBench<T> {
    pub fn new(source: JsonSource<T>, support: BenchSupport, api: Api) -> Result<Self> {
        ensure!(
            support.kind() == T::KIND,
            "capability registry for {} used with {} payloads",
            support.kind(),
            T::KIND
        );
        Ok(Self {
            source,
            support,
            api,
        })
    }

    /// Generates a source from `config` and restricts the registry to the
    /// configured libraries.
    pub fn from_config(config: &BenchConfig, api: Api) -> Result<Self> {
        let source = JsonSource::generate(config)?;
        let mut support = BenchSupport::for_kind(T::KIND);
        if let Some(libraries) = config.selected_libraries() {
            support.restrict_to(libraries);
        }
        Self::new(source, support, api)
    }

    pub fn source(&self) -> &JsonSource<T> {
        &self.source
    }

    pub fn support_mut(&mut self) -> &mut BenchSupport {
        &mut self.support
    }

    fn serialize(&self, lib: Library) -> Result<Output<T>> {
        let value = self.source.next_pojo();
        match lib.binary_format() {
            None => Ok(Output::Text(codec::to_json(lib, value)?)),
            Some(format) => Ok(Output::Binary(format, codec::encode(format, value)?)),
        }
    }

    fn deserialize(&self, lib: Library) -> Result<Output<T>> {
        match lib {
            Library::SerdeJsonValue => {
                let tree = codec::json::parse_tree(self.source.next_string())?;
                Ok(Output::JsonTree(tree))
            }
            Library::Protobuf => {
                let bytes = self.source.next_encoded(BinaryFormat::Protobuf)?;
                Ok(Output::ProtoMessage(codec::binary::decode_proto(bytes)?))
            }
            _ => match lib.binary_format() {
                None => Ok(Output::Object(codec::from_json(
                    lib,
                    self.source.next_string(),
                )?)),
                Some(format) => {
                    let bytes = self.source.next_encoded(format)?;
                    Ok(Output::Object(codec::decode(format, bytes)?))
                }
            },
        }
    }
}

impl<T: Dataset> Bench<T> for JsonBench<T> {
    fn api(&self) -> Api {
        self.api
    }

    fn support(&self) -> &BenchSupport {
        &self.support
    }

    fn produce(&self, lib: Library) -> Result<Option<Output<T>>> {
        if !self.support.supports(lib, self.api) {
            return Ok(None);
        }
        let output = match self.api {
            Api::Serialize => self.serialize(lib)?,
            Api::Deserialize => self.deserialize(lib)?,
        };
        Ok(Some(output))
    }
}
