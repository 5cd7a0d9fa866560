use eyre::Result;
use serde::{Deserialize, Serialize};

use crate::model::generator::{DataGenerator, EYE_COLORS, FRUITS, GENDERS};
use crate::model::{DataKind, Dataset};
use crate::proto::UsersProto;
use crate::schema::mapping;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Users {
    pub users: Vec<User>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub index: i32,
    pub guid: String,
    pub is_active: bool,
    pub balance: String,
    pub picture: String,
    pub age: i32,
    pub eye_color: String,
    pub name: String,
    pub gender: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub about: String,
    pub registered: String,
    pub latitude: f64,
    pub longitude: f64,
    pub tags: Vec<String>,
    pub friends: Vec<Friend>,
    pub greeting: String,
    pub favorite_fruit: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Friend {
    pub id: String,
    pub name: String,
}

impl User {
    pub fn random(generator: &mut DataGenerator, index: usize) -> Self {
        let name = generator.full_name();
        let company = generator.company().to_string();
        let email = generator.email(&name, &company);
        let friend_count = generator.int(0, 4) as usize;
        let tag_count = generator.int(1, 7) as usize;
        let about_words = generator.int(8, 24) as usize;

        Self {
            id: generator.hex(24),
            index: index as i32,
            guid: generator.guid(),
            is_active: generator.flag(),
            balance: format!("${:.2}", generator.decimal(1000.0, 4000.0, 2)),
            picture: "http://placehold.it/32x32".to_string(),
            age: generator.int(20, 40),
            eye_color: generator.pick(EYE_COLORS).to_string(),
            gender: generator.pick(GENDERS).to_string(),
            phone: generator.phone(),
            address: generator.address(),
            about: generator.sentence(about_words),
            registered: generator.timestamp(),
            latitude: generator.latitude(),
            longitude: generator.longitude(),
            tags: generator.words(tag_count),
            friends: (0..friend_count)
                .map(|id| Friend {
                    id: id.to_string(),
                    name: generator.full_name(),
                })
                .collect(),
            greeting: format!("Hello, {}! You have {} unread messages.", name, generator.int(1, 10)),
            favorite_fruit: generator.pick(FRUITS).to_string(),
            name,
            company,
            email,
        }
    }
}

impl Dataset for Users {
    const KIND: DataKind = DataKind::Users;

    fn generate(generator: &mut DataGenerator, target_bytes: usize) -> Result<Self> {
        let users = generator.records_until(target_bytes, User::random)?;
        Ok(Self { users })
    }

    fn len(&self) -> usize {
        self.users.len()
    }

    fn to_proto(&self) -> Option<UsersProto> {
        Some(UsersProto::from(self))
    }

    fn from_proto(message: UsersProto) -> Result<Self> {
        Ok(Self::from(message))
    }

    fn to_flatbuffers(&self) -> Option<Vec<u8>> {
        Some(mapping::serialize(self))
    }

    fn from_flatbuffers(buf: &[u8]) -> Result<Self> {
        mapping::deserialize(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_uses_camel_case_and_underscore_id() {
        let user = User {
            id: "abc".to_string(),
            is_active: true,
            eye_color: "blue".to_string(),
            favorite_fruit: "apple".to_string(),
            ..User::default()
        };
        let json = serde_json::to_value(&user).unwrap();

        assert_eq!(json["_id"], "abc");
        assert_eq!(json["isActive"], true);
        assert_eq!(json["eyeColor"], "blue");
        assert_eq!(json["favoriteFruit"], "apple");
        assert!(json.get("id").is_none());
    }

    #[test]
    fn random_user_is_populated() {
        let mut generator = DataGenerator::new(11);
        let user = User::random(&mut generator, 4);

        assert_eq!(user.index, 4);
        assert_eq!(user.id.len(), 24);
        assert!(user.balance.starts_with('$'));
        assert!(user.greeting.contains(&user.name));
        assert!(!user.tags.is_empty());
        assert!((20..=40).contains(&user.age));
    }

    #[test]
    fn generate_is_deterministic() {
        let a = Users::generate(&mut DataGenerator::new(9), 2048).unwrap();
        let b = Users::generate(&mut DataGenerator::new(9), 2048).unwrap();

        assert_eq!(a, b);
        assert!(!a.is_empty());
    }
}
