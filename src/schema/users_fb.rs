//! Table accessors for the `UsersFb` schema.
//!
//! ```text
//! table FriendFb { id: string; name: string; }
//!
//! table UserFb {
//!   id: string; index: int; guid: string; is_active: bool;
//!   balance: string; picture: string; age: int; eye_color: string;
//!   name: string; gender: string; company: string; email: string;
//!   phone: string; address: string; about: string; registered: string;
//!   latitude: double; longitude: double; tags: [string];
//!   friends: [FriendFb]; greeting: string; favorite_fruit: string;
//! }
//!
//! table UsersFb { users: [UserFb]; }
//! root_type UsersFb;
//! ```

use eyre::Result;

use crate::flatbuf::{
    field_slot, verify_root, FlatBufferBuilder, Offset, Table, VOffset, Verifiable, Verifier,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsersFb<'a> {
    table: Table<'a>,
}

impl<'a> UsersFb<'a> {
    pub const NUM_FIELDS: usize = 1;
    pub const VT_USERS: VOffset = field_slot(0);

    pub fn init(table: Table<'a>) -> Self {
        Self { table }
    }

    /// Verifies `buf` and returns its root table.
    pub fn root(buf: &'a [u8]) -> Result<Self> {
        verify_root::<UsersFb<'_>>(buf)?;
        Ok(Self::root_unchecked(buf))
    }

    /// Returns the root table without verification. Panics on the first
    /// out-of-bounds read if `buf` is malformed.
    pub fn root_unchecked(buf: &'a [u8]) -> Self {
        Self::init(Table::root(buf))
    }

    pub fn table(&self) -> Table<'a> {
        self.table
    }

    pub fn users(&self, j: usize) -> Option<UserFb<'a>> {
        self.table
            .get_vector(Self::VT_USERS)?
            .get_table(j)
            .map(UserFb::init)
    }

    pub fn users_length(&self) -> usize {
        self.table.vector_len(Self::VT_USERS)
    }

    pub fn create_users_fb(builder: &mut FlatBufferBuilder, users: Offset) -> Offset {
        Self::start_users_fb(builder);
        Self::add_users(builder, users);
        Self::end_users_fb(builder)
    }

    pub fn start_users_fb(builder: &mut FlatBufferBuilder) {
        builder.start_object(Self::NUM_FIELDS);
    }

    pub fn add_users(builder: &mut FlatBufferBuilder, users: Offset) {
        builder.add_offset(Self::VT_USERS, users);
    }

    pub fn create_users_vector(builder: &mut FlatBufferBuilder, users: &[Offset]) -> Offset {
        builder.create_vector_of_offsets(users)
    }

    pub fn end_users_fb(builder: &mut FlatBufferBuilder) -> Offset {
        builder.end_object()
    }

    pub fn finish_users_fb_buffer(builder: &mut FlatBufferBuilder, root: Offset) {
        builder.finish(root);
    }
}

impl Verifiable for UsersFb<'_> {
    fn verify(verifier: &mut Verifier<'_>, pos: usize) -> Result<()> {
        verifier
            .table(pos)?
            .vector_of_tables::<UserFb<'_>>(Self::VT_USERS)?
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserFb<'a> {
    table: Table<'a>,
}

impl<'a> UserFb<'a> {
    pub const NUM_FIELDS: usize = 22;
    pub const VT_FRIENDS: VOffset = field_slot(19);

    table_fields! { <'a>
        id @ 0: str,
        index @ 1: i32 = 0,
        guid @ 2: str,
        is_active @ 3: bool = false,
        balance @ 4: str,
        picture @ 5: str,
        age @ 6: i32 = 0,
        eye_color @ 7: str,
        name @ 8: str,
        gender @ 9: str,
        company @ 10: str,
        email @ 11: str,
        phone @ 12: str,
        address @ 13: str,
        about @ 14: str,
        registered @ 15: str,
        latitude @ 16: f64 = 0.0,
        longitude @ 17: f64 = 0.0,
        tags @ 18: vector,
        greeting @ 20: str,
        favorite_fruit @ 21: str,
    }

    pub fn init(table: Table<'a>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> Table<'a> {
        self.table
    }

    pub fn friends(&self, j: usize) -> Option<FriendFb<'a>> {
        self.table
            .get_vector(Self::VT_FRIENDS)?
            .get_table(j)
            .map(FriendFb::init)
    }

    pub fn friends_length(&self) -> usize {
        self.table.vector_len(Self::VT_FRIENDS)
    }

    pub fn tags_length(&self) -> usize {
        self.table.vector_len(Self::VT_TAGS)
    }

    pub fn start_user_fb(builder: &mut FlatBufferBuilder) {
        builder.start_object(Self::NUM_FIELDS);
    }

    pub fn add_friends(builder: &mut FlatBufferBuilder, friends: Offset) {
        builder.add_offset(Self::VT_FRIENDS, friends);
    }

    pub fn create_friends_vector(builder: &mut FlatBufferBuilder, friends: &[Offset]) -> Offset {
        builder.create_vector_of_offsets(friends)
    }

    pub fn create_tags_vector<S: AsRef<str>>(builder: &mut FlatBufferBuilder, tags: &[S]) -> Offset {
        builder.create_vector_of_strings(tags)
    }

    pub fn end_user_fb(builder: &mut FlatBufferBuilder) -> Offset {
        builder.end_object()
    }
}

impl Verifiable for UserFb<'_> {
    fn verify(verifier: &mut Verifier<'_>, pos: usize) -> Result<()> {
        verifier
            .table(pos)?
            .string(Self::VT_ID)?
            .scalar::<i32>(Self::VT_INDEX)?
            .string(Self::VT_GUID)?
            .scalar::<bool>(Self::VT_IS_ACTIVE)?
            .string(Self::VT_BALANCE)?
            .string(Self::VT_PICTURE)?
            .scalar::<i32>(Self::VT_AGE)?
            .string(Self::VT_EYE_COLOR)?
            .string(Self::VT_NAME)?
            .string(Self::VT_GENDER)?
            .string(Self::VT_COMPANY)?
            .string(Self::VT_EMAIL)?
            .string(Self::VT_PHONE)?
            .string(Self::VT_ADDRESS)?
            .string(Self::VT_ABOUT)?
            .string(Self::VT_REGISTERED)?
            .scalar::<f64>(Self::VT_LATITUDE)?
            .scalar::<f64>(Self::VT_LONGITUDE)?
            .vector_of_strings(Self::VT_TAGS)?
            .vector_of_tables::<FriendFb<'_>>(Self::VT_FRIENDS)?
            .string(Self::VT_GREETING)?
            .string(Self::VT_FAVORITE_FRUIT)?
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FriendFb<'a> {
    table: Table<'a>,
}

impl<'a> FriendFb<'a> {
    pub const NUM_FIELDS: usize = 2;

    table_fields! { <'a>
        id @ 0: str,
        name @ 1: str,
    }

    pub fn init(table: Table<'a>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> Table<'a> {
        self.table
    }

    pub fn create_friend_fb(builder: &mut FlatBufferBuilder, id: Offset, name: Offset) -> Offset {
        builder.start_object(Self::NUM_FIELDS);
        Self::add_id(builder, id);
        Self::add_name(builder, name);
        builder.end_object()
    }
}

impl Verifiable for FriendFb<'_> {
    fn verify(verifier: &mut Verifier<'_>, pos: usize) -> Result<()> {
        verifier
            .table(pos)?
            .string(Self::VT_ID)?
            .string(Self::VT_NAME)?
            .finish()
    }
}
