//! # JsonSource - Pre-Encoded Benchmark Inputs
//!
//! A source holds `quantity` sample payloads. Each sample keeps the object,
//! its JSON text and every binary encoding its kind supports, all computed
//! once up front so benchmarks time only the library call under test.
//!
//! The `next_*` accessors rotate through the samples with a shared cursor.
//! The cursor is a `Cell`, so a source can be read through a shared
//! reference from a benchmark closure.
//!
//! ```ignore
//! let source = JsonSource::<Users>::generate(&BenchConfig::new().quantity(4))?;
//! let text = source.next_string();
//! let bytes = source.next_encoded(BinaryFormat::Cbor)?;
//! ```

use std::cell::Cell;
use std::path::Path;

use eyre::{ensure, eyre, Result, WrapErr};
use hashbrown::HashMap;
use log::{debug, info};

use crate::codec::{self, BinaryFormat};
use crate::config::BenchConfig;
use crate::model::{DataGenerator, Dataset};

#[derive(Debug, Clone)]
pub struct Sample<T> {
    object: T,
    json: String,
    encoded: HashMap<BinaryFormat, Vec<u8>>,
}

impl<T: Dataset> Sample<T> {
    pub fn new(object: T) -> Result<Self> {
        let json = serde_json::to_string(&object).wrap_err("failed to write sample JSON")?;
        let encoded = BinaryFormat::ALL
            .into_iter()
            .filter(|format| format.supports(T::KIND))
            .map(|format| {
                codec::encode(format, &object)
                    .map(|bytes| (format, bytes))
                    .wrap_err_with(|| format!("failed to pre-encode {} sample", format))
            })
            .collect::<Result<HashMap<_, _>>>()?;
        Ok(Self {
            object,
            json,
            encoded,
        })
    }

    pub fn object(&self) -> &T {
        &self.object
    }

    pub fn json(&self) -> &str {
        &self.json
    }

    pub fn encoded(&self, format: BinaryFormat) -> Option<&[u8]> {
        self.encoded.get(&format).map(Vec::as_slice)
    }
}

#[derive(Debug)]
pub struct JsonSource<T> {
    samples: Vec<Sample<T>>,
    cursor: Cell<usize>,
}

impl<T: Dataset> JsonSource<T> {
    /// Generates `config.get_quantity()` payloads of about
    /// `config.get_payload_kb()` KB each from the configured seed.
    pub fn generate(config: &BenchConfig) -> Result<Self> {
        config.validate()?;
        let mut generator = DataGenerator::new(config.get_seed());
        let objects = (0..config.get_quantity())
            .map(|_| T::generate(&mut generator, config.target_bytes()))
            .collect::<Result<Vec<_>>>()?;

        info!(
            "generated {} {} samples of ~{} KB",
            objects.len(),
            T::KIND,
            config.get_payload_kb()
        );
        Self::from_objects(objects)
    }

    pub fn from_objects(objects: Vec<T>) -> Result<Self> {
        ensure!(!objects.is_empty(), "a source needs at least one sample");
        let samples = objects
            .into_iter()
            .map(Sample::new)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            samples,
            cursor: Cell::new(0),
        })
    }

    /// Loads a single payload from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        let object: T = codec::reference_parse(&text)
            .wrap_err_with(|| format!("failed to parse {} payload from {}", T::KIND, path.display()))?;
        debug!(
            "loaded {} {} records from {}",
            object.len(),
            T::KIND,
            path.display()
        );
        Self::from_objects(vec![object])
    }

    pub fn quantity(&self) -> usize {
        self.samples.len()
    }

    pub fn samples(&self) -> &[Sample<T>] {
        &self.samples
    }

    /// The first sample. With a quantity of one every accessor returns it.
    pub fn canonical(&self) -> &T {
        &self.samples[0].object
    }

    fn next_sample(&self) -> &Sample<T> {
        let index = self.cursor.get();
        self.cursor.set((index + 1) % self.samples.len());
        &self.samples[index]
    }

    pub fn next_pojo(&self) -> &T {
        &self.next_sample().object
    }

    pub fn next_string(&self) -> &str {
        &self.next_sample().json
    }

    pub fn next_bytes(&self) -> &[u8] {
        self.next_sample().json.as_bytes()
    }

    pub fn next_encoded(&self, format: BinaryFormat) -> Result<&[u8]> {
        self.next_sample()
            .encoded(format)
            .ok_or_else(|| eyre!("{} samples have no {} encoding", T::KIND, format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Clients, Users};
    use std::io::Write;

    #[test]
    fn generate_builds_requested_quantity() {
        let config = BenchConfig::new().quantity(3).seed(99);
        let source = JsonSource::<Users>::generate(&config).unwrap();

        assert_eq!(source.quantity(), 3);
        assert_ne!(source.samples()[0].object(), source.samples()[1].object());
    }

    #[test]
    fn accessors_rotate_through_samples() {
        let config = BenchConfig::new().quantity(2);
        let source = JsonSource::<Users>::generate(&config).unwrap();
        let first = source.samples()[0].object().clone();
        let second = source.samples()[1].object().clone();

        assert_eq!(source.next_pojo(), &first);
        assert_eq!(source.next_pojo(), &second);
        assert_eq!(source.next_pojo(), &first);
    }

    #[test]
    fn sample_json_and_encodings_describe_the_object() {
        let source = JsonSource::<Users>::generate(&BenchConfig::new().quantity(1)).unwrap();
        let canonical = source.canonical().clone();

        let parsed: Users = serde_json::from_str(source.next_string()).unwrap();
        assert_eq!(parsed, canonical);
        assert_eq!(source.next_bytes(), source.samples()[0].json().as_bytes());
        for format in BinaryFormat::ALL {
            let bytes = source.next_encoded(format).unwrap();
            assert_eq!(codec::decode::<Users>(format, bytes).unwrap(), canonical);
        }
    }

    #[test]
    fn clients_have_no_schema_encodings() {
        let source = JsonSource::<Clients>::generate(&BenchConfig::new().quantity(1)).unwrap();

        assert!(source.next_encoded(BinaryFormat::Cbor).is_ok());
        let err = source.next_encoded(BinaryFormat::Protobuf).unwrap_err();
        assert!(err.to_string().contains("protobuf"));
    }

    #[test]
    fn empty_source_is_rejected() {
        assert!(JsonSource::<Users>::from_objects(Vec::new()).is_err());
    }

    #[test]
    fn loads_payload_from_json_file() {
        let users = Users::generate(&mut DataGenerator::new(1), 1024).unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string_pretty(&users).unwrap().as_bytes())
            .unwrap();

        let source = JsonSource::<Users>::from_json_file(file.path()).unwrap();
        assert_eq!(source.quantity(), 1);
        assert_eq!(source.canonical(), &users);
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let err = JsonSource::<Users>::from_json_file(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("absent.json"));
    }
}
