//! # Protobuf Messages
//!
//! Hand-written `prost` messages for the users schema:
//!
//! ```text
//! message FriendProto { string id = 1; string name = 2; }
//!
//! message UserProto {
//!   string id = 1; int32 index = 2; string guid = 3; bool is_active = 4;
//!   string balance = 5; string picture = 6; int32 age = 7;
//!   string eye_color = 8; string name = 9; string gender = 10;
//!   string company = 11; string email = 12; string phone = 13;
//!   string address = 14; string about = 15; string registered = 16;
//!   double latitude = 17; double longitude = 18; repeated string tags = 19;
//!   repeated FriendProto friends = 20; string greeting = 21;
//!   string favorite_fruit = 22;
//! }
//!
//! message UsersProto { repeated UserProto users = 1; }
//! ```

use crate::model::{Friend, User, Users};

#[derive(Clone, PartialEq, prost::Message)]
pub struct UsersProto {
    #[prost(message, repeated, tag = "1")]
    pub users: Vec<UserProto>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct UserProto {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(int32, tag = "2")]
    pub index: i32,
    #[prost(string, tag = "3")]
    pub guid: String,
    #[prost(bool, tag = "4")]
    pub is_active: bool,
    #[prost(string, tag = "5")]
    pub balance: String,
    #[prost(string, tag = "6")]
    pub picture: String,
    #[prost(int32, tag = "7")]
    pub age: i32,
    #[prost(string, tag = "8")]
    pub eye_color: String,
    #[prost(string, tag = "9")]
    pub name: String,
    #[prost(string, tag = "10")]
    pub gender: String,
    #[prost(string, tag = "11")]
    pub company: String,
    #[prost(string, tag = "12")]
    pub email: String,
    #[prost(string, tag = "13")]
    pub phone: String,
    #[prost(string, tag = "14")]
    pub address: String,
    #[prost(string, tag = "15")]
    pub about: String,
    #[prost(string, tag = "16")]
    pub registered: String,
    #[prost(double, tag = "17")]
    pub latitude: f64,
    #[prost(double, tag = "18")]
    pub longitude: f64,
    #[prost(string, repeated, tag = "19")]
    pub tags: Vec<String>,
    #[prost(message, repeated, tag = "20")]
    pub friends: Vec<FriendProto>,
    #[prost(string, tag = "21")]
    pub greeting: String,
    #[prost(string, tag = "22")]
    pub favorite_fruit: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct FriendProto {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub name: String,
}

impl From<&Users> for UsersProto {
    fn from(users: &Users) -> Self {
        Self {
            users: users.users.iter().map(UserProto::from).collect(),
        }
    }
}

impl From<&User> for UserProto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            index: user.index,
            guid: user.guid.clone(),
            is_active: user.is_active,
            balance: user.balance.clone(),
            picture: user.picture.clone(),
            age: user.age,
            eye_color: user.eye_color.clone(),
            name: user.name.clone(),
            gender: user.gender.clone(),
            company: user.company.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            address: user.address.clone(),
            about: user.about.clone(),
            registered: user.registered.clone(),
            latitude: user.latitude,
            longitude: user.longitude,
            tags: user.tags.clone(),
            friends: user
                .friends
                .iter()
                .map(|f| FriendProto {
                    id: f.id.clone(),
                    name: f.name.clone(),
                })
                .collect(),
            greeting: user.greeting.clone(),
            favorite_fruit: user.favorite_fruit.clone(),
        }
    }
}

impl From<UsersProto> for Users {
    fn from(message: UsersProto) -> Self {
        Self {
            users: message.users.into_iter().map(User::from).collect(),
        }
    }
}

impl From<UserProto> for User {
    fn from(message: UserProto) -> Self {
        Self {
            id: message.id,
            index: message.index,
            guid: message.guid,
            is_active: message.is_active,
            balance: message.balance,
            picture: message.picture,
            age: message.age,
            eye_color: message.eye_color,
            name: message.name,
            gender: message.gender,
            company: message.company,
            email: message.email,
            phone: message.phone,
            address: message.address,
            about: message.about,
            registered: message.registered,
            latitude: message.latitude,
            longitude: message.longitude,
            tags: message.tags,
            friends: message
                .friends
                .into_iter()
                .map(|f| Friend {
                    id: f.id,
                    name: f.name,
                })
                .collect(),
            greeting: message.greeting,
            favorite_fruit: message.favorite_fruit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DataGenerator, Dataset};
    use prost::Message;

    #[test]
    fn users_survive_protobuf_round_trip() {
        let users = Users::generate(&mut DataGenerator::new(21), 4096).unwrap();

        let bytes = UsersProto::from(&users).encode_to_vec();
        let decoded = UsersProto::decode(bytes.as_slice()).unwrap();

        assert_eq!(Users::from(decoded), users);
    }

    #[test]
    fn default_fields_are_not_encoded() {
        let bytes = UsersProto::from(&Users {
            users: vec![User::default()],
        })
        .encode_to_vec();

        // one empty embedded message: tag byte + zero length
        assert_eq!(bytes, vec![0x0A, 0x00]);
    }
}
