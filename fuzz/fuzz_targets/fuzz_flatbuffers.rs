//! Fuzz testing for the table verifier.
//!
//! Arbitrary bytes are fed to the users root verifier. Verification may
//! reject the buffer, but must never panic, and any buffer it accepts must
//! be readable through the unchecked accessors and decodable into the
//! owned model.

#![no_main]

use libfuzzer_sys::fuzz_target;

use jsonbench::schema::{mapping, UsersFb};

fuzz_target!(|data: &[u8]| {
    let Ok(root) = UsersFb::root(data) else {
        assert!(mapping::deserialize(data).is_err());
        return;
    };

    for i in 0..root.users_length() {
        let Some(user) = root.users(i) else { continue };
        let _ = (user.name(), user.about(), user.latitude(), user.is_active());
        for j in 0..user.tags_length() {
            let _ = user.tags().and_then(|tags| tags.get_str(j));
        }
        for j in 0..user.friends_length() {
            let _ = user.friends(j).map(|friend| friend.name());
        }
    }

    let users = mapping::deserialize(data).expect("verified buffer must decode");
    assert_eq!(users.users.len(), root.users_length());
});
