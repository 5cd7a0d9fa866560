use eyre::Result;
use serde::{Deserialize, Serialize};

use crate::model::generator::DataGenerator;
use crate::model::{DataKind, Dataset};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Clients {
    pub clients: Vec<Client>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EyeColor {
    #[default]
    Brown,
    Blue,
    Green,
}

impl EyeColor {
    pub const ALL: [EyeColor; 3] = [EyeColor::Brown, EyeColor::Blue, EyeColor::Green];
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[serde(rename = "_id")]
    pub id: i64,
    pub index: i32,
    pub guid: String,
    pub is_active: bool,
    pub balance: f64,
    pub picture: String,
    pub age: i32,
    pub eye_color: EyeColor,
    pub name: String,
    pub company: String,
    pub emails: Vec<String>,
    pub phones: Vec<i64>,
    pub address: String,
    pub about: String,
    pub registered: String,
    pub latitude: f64,
    pub longitude: f64,
    pub tags: Vec<String>,
    pub partners: Vec<Partner>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Partner {
    pub id: i64,
    pub name: String,
    pub since: String,
}

impl Client {
    pub fn random(generator: &mut DataGenerator, index: usize) -> Self {
        let name = generator.full_name();
        let company = generator.company().to_string();
        let email_count = generator.int(1, 3) as usize;
        let phone_count = generator.int(1, 3) as usize;
        let tag_count = generator.int(1, 7) as usize;
        let partner_count = generator.int(0, 4) as usize;
        let about_words = generator.int(8, 24) as usize;
        let eye_color = EyeColor::ALL[generator.int(0, 2) as usize];

        Self {
            id: generator.long(1, i64::MAX),
            index: index as i32,
            guid: generator.guid(),
            is_active: generator.flag(),
            balance: generator.decimal(1000.0, 4000.0, 2),
            picture: "http://placehold.it/32x32".to_string(),
            age: generator.int(20, 40),
            eye_color,
            emails: (0..email_count)
                .map(|_| generator.email(&name, &company))
                .collect(),
            phones: (0..phone_count)
                .map(|_| generator.long(2_000_000_000, 9_999_999_999))
                .collect(),
            address: generator.address(),
            about: generator.sentence(about_words),
            registered: generator.timestamp(),
            latitude: generator.latitude(),
            longitude: generator.longitude(),
            tags: generator.words(tag_count),
            partners: (0..partner_count)
                .map(|_| Partner {
                    id: generator.long(1, i64::MAX),
                    name: generator.company().to_string(),
                    since: generator.date(),
                })
                .collect(),
            name,
            company,
        }
    }
}

impl Dataset for Clients {
    const KIND: DataKind = DataKind::Clients;

    fn generate(generator: &mut DataGenerator, target_bytes: usize) -> Result<Self> {
        let clients = generator.records_until(target_bytes, Client::random)?;
        Ok(Self { clients })
    }

    fn len(&self) -> usize {
        self.clients.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eye_color_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&EyeColor::Green).unwrap(), "\"green\"");
        let parsed: EyeColor = serde_json::from_str("\"blue\"").unwrap();
        assert_eq!(parsed, EyeColor::Blue);
    }

    #[test]
    fn client_json_field_names() {
        let client = Client {
            id: 42,
            phones: vec![5551234567],
            ..Client::default()
        };
        let json = serde_json::to_value(&client).unwrap();

        assert_eq!(json["_id"], 42);
        assert_eq!(json["eyeColor"], "brown");
        assert_eq!(json["phones"][0], 5551234567i64);
        assert!(json.get("isActive").is_some());
    }

    #[test]
    fn unknown_eye_color_is_rejected() {
        assert!(serde_json::from_str::<EyeColor>("\"purple\"").is_err());
    }

    #[test]
    fn generate_is_deterministic() {
        let a = Clients::generate(&mut DataGenerator::new(2), 2048).unwrap();
        let b = Clients::generate(&mut DataGenerator::new(2), 2048).unwrap();

        assert_eq!(a, b);
        assert!(a.len() >= 1);
    }
}
