//! # DataGenerator - Seeded Sample Records
//!
//! Produces reproducible pseudo-random field values for the data model. The
//! same seed always yields the same sequence of records, so every library in
//! a run sees identical payloads.
//!
//! Payloads are grown record by record until their JSON encoding reaches a
//! target size; a payload always holds at least one record.

use eyre::{Result, WrapErr};
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

const FIRST_NAMES: &[&str] = &[
    "Alice", "Bruno", "Chiara", "Dmitri", "Elena", "Farid", "Greta", "Hiro", "Ines", "Jonah",
    "Kalani", "Liam", "Mei", "Nadia", "Omar", "Priya", "Quentin", "Rosa", "Soren", "Talia",
];

const LAST_NAMES: &[&str] = &[
    "Abbott", "Bianchi", "Castillo", "Dubois", "Eriksen", "Fischer", "Gallagher", "Haddad",
    "Ivanova", "Jensen", "Kowalski", "Lindqvist", "Moreau", "Nakamura", "Okafor", "Petrov",
];

const COMPANIES: &[&str] = &[
    "ZENTIX", "QUILITY", "ORBALIX", "NETPLAX", "VIRVA", "KOOGLE", "MEDIFAX", "ISOLOGIX",
    "TERRAGO", "COMTRAK",
];

const WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed",
    "eiusmod", "tempor", "incididunt", "labore", "dolore", "magna", "aliqua", "veniam",
    "nostrud", "ullamco", "laboris", "nisi", "aliquip", "commodo", "consequat",
];

const STREETS: &[&str] = &[
    "Harbor Lane", "Maple Street", "Quincy Avenue", "Sackett Place", "Willow Court",
    "Beacon Road", "Lincoln Terrace",
];

const CITIES: &[&str] = &[
    "Riverton, Oregon", "Fairview, Ohio", "Springdale, Utah", "Georgetown, Maine",
    "Ashland, Kansas", "Milford, Iowa",
];

pub const EYE_COLORS: &[&str] = &["brown", "blue", "green"];
pub const GENDERS: &[&str] = &["female", "male"];
pub const FRUITS: &[&str] = &["apple", "banana", "strawberry"];

#[derive(Debug)]
pub struct DataGenerator {
    rng: StdRng,
}

impl DataGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn pick<'a>(&mut self, values: &[&'a str]) -> &'a str {
        values.choose(&mut self.rng).copied().unwrap_or_default()
    }

    pub fn int(&mut self, low: i32, high: i32) -> i32 {
        self.rng.gen_range(low..=high)
    }

    pub fn long(&mut self, low: i64, high: i64) -> i64 {
        self.rng.gen_range(low..=high)
    }

    pub fn flag(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }

    /// A value in `[low, high)` rounded to `decimals` places.
    pub fn decimal(&mut self, low: f64, high: f64, decimals: i32) -> f64 {
        let scale = 10f64.powi(decimals);
        (self.rng.gen_range(low..high) * scale).round() / scale
    }

    pub fn hex(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| char::from_digit(self.rng.gen_range(0..16), 16).unwrap_or('0'))
            .collect()
    }

    pub fn guid(&mut self) -> String {
        format!(
            "{}-{}-{}-{}-{}",
            self.hex(8),
            self.hex(4),
            self.hex(4),
            self.hex(4),
            self.hex(12)
        )
    }

    pub fn full_name(&mut self) -> String {
        format!("{} {}", self.pick(FIRST_NAMES), self.pick(LAST_NAMES))
    }

    pub fn company(&mut self) -> &'static str {
        self.pick(COMPANIES)
    }

    pub fn email(&mut self, name: &str, company: &str) -> String {
        let local = name.split_whitespace().next().unwrap_or("user");
        format!(
            "{}{}@{}.com",
            local.to_lowercase(),
            self.int(1, 99),
            company.to_lowercase()
        )
    }

    pub fn phone(&mut self) -> String {
        format!(
            "+1 ({}) {}-{}",
            self.int(200, 999),
            self.int(200, 999),
            self.int(1000, 9999)
        )
    }

    pub fn address(&mut self) -> String {
        format!(
            "{} {}, {}, {}",
            self.int(100, 999),
            self.pick(STREETS),
            self.pick(CITIES),
            self.int(1000, 9999)
        )
    }

    pub fn word(&mut self) -> &'static str {
        self.pick(WORDS)
    }

    pub fn sentence(&mut self, words: usize) -> String {
        let mut sentence = (0..words).map(|_| self.word()).collect::<Vec<_>>().join(" ");
        sentence.push('.');
        sentence
    }

    pub fn words(&mut self, count: usize) -> Vec<String> {
        (0..count).map(|_| self.word().to_string()).collect()
    }

    /// An ISO-8601 timestamp with a fixed offset.
    pub fn timestamp(&mut self) -> String {
        format!(
            "{}-{:02}-{:02}T{:02}:{:02}:{:02} -01:00",
            self.int(2014, 2024),
            self.int(1, 12),
            self.int(1, 28),
            self.int(0, 23),
            self.int(0, 59),
            self.int(0, 59)
        )
    }

    pub fn date(&mut self) -> String {
        format!(
            "{}-{:02}-{:02}",
            self.int(2000, 2024),
            self.int(1, 12),
            self.int(1, 28)
        )
    }

    pub fn latitude(&mut self) -> f64 {
        self.decimal(-90.0, 90.0, 6)
    }

    pub fn longitude(&mut self) -> f64 {
        self.decimal(-180.0, 180.0, 6)
    }

    /// Generates records with `next` until their combined JSON size reaches
    /// `target_bytes`.
    pub fn records_until<R, F>(&mut self, target_bytes: usize, mut next: F) -> Result<Vec<R>>
    where
        R: Serialize,
        F: FnMut(&mut Self, usize) -> R,
    {
        let mut records = Vec::new();
        let mut size = 0usize;

        loop {
            let record = next(self, records.len());
            size += serde_json::to_vec(&record)
                .wrap_err("failed to measure generated record")?
                .len()
                + 1;
            records.push(record);
            if size >= target_bytes {
                break;
            }
        }

        debug!(
            "generated {} records (~{} JSON bytes, target {})",
            records.len(),
            size,
            target_bytes
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_values() {
        let mut a = DataGenerator::new(7);
        let mut b = DataGenerator::new(7);

        assert_eq!(a.guid(), b.guid());
        assert_eq!(a.full_name(), b.full_name());
        assert_eq!(a.latitude(), b.latitude());
    }

    #[test]
    fn guid_has_canonical_shape() {
        let guid = DataGenerator::new(1).guid();
        let groups: Vec<usize> = guid.split('-').map(str::len).collect();
        assert_eq!(groups, vec![8, 4, 4, 4, 12]);
    }

    #[test]
    fn decimal_is_rounded() {
        let mut generator = DataGenerator::new(3);
        for _ in 0..100 {
            let value = generator.decimal(0.0, 5000.0, 2);
            assert_eq!(value, (value * 100.0).round() / 100.0);
        }
    }

    #[test]
    fn records_until_reaches_target() {
        let mut generator = DataGenerator::new(5);
        let records = generator
            .records_until(200, |g, i| format!("{}-{}", i, g.word()))
            .unwrap();

        let size: usize = records
            .iter()
            .map(|r| serde_json::to_vec(r).unwrap().len() + 1)
            .sum();
        assert!(size >= 200);
        assert!(records.len() > 1);
    }

    #[test]
    fn records_until_yields_at_least_one() {
        let mut generator = DataGenerator::new(5);
        let records = generator.records_until(0, |_, i| i).unwrap();
        assert_eq!(records, vec![0]);
    }
}
