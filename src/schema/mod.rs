//! # Users Table Schema
//!
//! Typed accessors over `flatbuf` buffers for the users payload, in the
//! shape a schema compiler would emit: one wrapper per table with a slot
//! constant, a getter and an `add_*` builder function per field.
//!
//! ```ignore
//! let bytes = mapping::serialize(&users);
//!
//! let root = UsersFb::root(&bytes)?;
//! for j in 0..root.users_length() {
//!     let user = root.users(j).unwrap();
//!     println!("{:?}", user.name());
//! }
//! ```

pub mod mapping;
pub mod users_fb;


pub use users_fb::{FriendFb, UserFb, UsersFb};
