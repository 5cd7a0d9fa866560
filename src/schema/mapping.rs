//! Conversion between `Users` and `UsersFb` table buffers.
//!
//! Children are written before their parents: for each user the friend
//! tables, the tag vector and every string come first, then the user table
//! itself. Strings are always written, even when empty, so every string
//! field is present in the buffer.

use eyre::{Result, WrapErr};
use smallvec::SmallVec;

use crate::flatbuf::{FlatBufferBuilder, Offset};
use crate::model::{Friend, User, Users};
use crate::schema::users_fb::{FriendFb, UserFb, UsersFb};

pub fn serialize(users: &Users) -> Vec<u8> {
    let mut builder = FlatBufferBuilder::new();
    serialize_into(&mut builder, users);
    builder.into_finished_data()
}

/// Writes `users` into a freshly reset `builder` and finishes it.
pub fn serialize_into(builder: &mut FlatBufferBuilder, users: &Users) {
    builder.reset();
    let offsets: Vec<Offset> = users
        .users
        .iter()
        .map(|user| write_user(builder, user))
        .collect();
    let vector = UsersFb::create_users_vector(builder, &offsets);
    let root = UsersFb::create_users_fb(builder, vector);
    UsersFb::finish_users_fb_buffer(builder, root);
}

fn write_friend(builder: &mut FlatBufferBuilder, friend: &Friend) -> Offset {
    let id = builder.create_string(&friend.id);
    let name = builder.create_string(&friend.name);
    FriendFb::create_friend_fb(builder, id, name)
}

fn write_user(builder: &mut FlatBufferBuilder, user: &User) -> Offset {
    let friends: SmallVec<[Offset; 8]> = user
        .friends
        .iter()
        .map(|friend| write_friend(builder, friend))
        .collect();
    let friends = UserFb::create_friends_vector(builder, &friends);
    let tags = UserFb::create_tags_vector(builder, &user.tags);

    let id = builder.create_string(&user.id);
    let guid = builder.create_string(&user.guid);
    let balance = builder.create_string(&user.balance);
    let picture = builder.create_string(&user.picture);
    let eye_color = builder.create_string(&user.eye_color);
    let name = builder.create_string(&user.name);
    let gender = builder.create_string(&user.gender);
    let company = builder.create_string(&user.company);
    let email = builder.create_string(&user.email);
    let phone = builder.create_string(&user.phone);
    let address = builder.create_string(&user.address);
    let about = builder.create_string(&user.about);
    let registered = builder.create_string(&user.registered);
    let greeting = builder.create_string(&user.greeting);
    let favorite_fruit = builder.create_string(&user.favorite_fruit);

    UserFb::start_user_fb(builder);
    UserFb::add_latitude(builder, user.latitude);
    UserFb::add_longitude(builder, user.longitude);
    UserFb::add_id(builder, id);
    UserFb::add_index(builder, user.index);
    UserFb::add_guid(builder, guid);
    UserFb::add_balance(builder, balance);
    UserFb::add_picture(builder, picture);
    UserFb::add_age(builder, user.age);
    UserFb::add_eye_color(builder, eye_color);
    UserFb::add_name(builder, name);
    UserFb::add_gender(builder, gender);
    UserFb::add_company(builder, company);
    UserFb::add_email(builder, email);
    UserFb::add_phone(builder, phone);
    UserFb::add_address(builder, address);
    UserFb::add_about(builder, about);
    UserFb::add_registered(builder, registered);
    UserFb::add_tags(builder, tags);
    UserFb::add_friends(builder, friends);
    UserFb::add_greeting(builder, greeting);
    UserFb::add_favorite_fruit(builder, favorite_fruit);
    UserFb::add_is_active(builder, user.is_active);
    UserFb::end_user_fb(builder)
}

/// Verifies `buf` and reads it back into owned records.
pub fn deserialize(buf: &[u8]) -> Result<Users> {
    let root = UsersFb::root(buf).wrap_err("invalid users table buffer")?;
    Ok(read_users(root))
}

pub fn read_users(root: UsersFb<'_>) -> Users {
    Users {
        users: (0..root.users_length())
            .filter_map(|j| root.users(j))
            .map(read_user)
            .collect(),
    }
}

fn owned(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

fn read_user(user: UserFb<'_>) -> User {
    User {
        id: owned(user.id()),
        index: user.index(),
        guid: owned(user.guid()),
        is_active: user.is_active(),
        balance: owned(user.balance()),
        picture: owned(user.picture()),
        age: user.age(),
        eye_color: owned(user.eye_color()),
        name: owned(user.name()),
        gender: owned(user.gender()),
        company: owned(user.company()),
        email: owned(user.email()),
        phone: owned(user.phone()),
        address: owned(user.address()),
        about: owned(user.about()),
        registered: owned(user.registered()),
        latitude: user.latitude(),
        longitude: user.longitude(),
        tags: user
            .tags()
            .map(|tags| tags.strs().map(str::to_string).collect())
            .unwrap_or_default(),
        friends: (0..user.friends_length())
            .filter_map(|j| user.friends(j))
            .map(|friend| Friend {
                id: owned(friend.id()),
                name: owned(friend.name()),
            })
            .collect(),
        greeting: owned(user.greeting()),
        favorite_fruit: owned(user.favorite_fruit()),
    }
}
