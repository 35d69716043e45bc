//! User APIs.
//!
//! ## `get_user` — `GET /rest/getUser.view?username=alice`
//!
//! ```json
//! { "user": { "username": "alice", "email": "alice@example.com",
//!             "adminRole": false, "streamRole": true, "folder": [1, 3] } }
//! ```
//!
//! Non-admins may only fetch themselves. `get_users` is admin only.

use crate::client::{SubsonicClient, expect_body};
use crate::error::Result;
use crate::objects::User;
use crate::values::QueryValues;

impl SubsonicClient {
    /// Settings and roles of one user.
    pub fn get_user(&mut self, username: &str) -> Result<User> {
        let body = self.call("getUser", QueryValues::single("username", username))?;
        expect_body!(body, "user" => User)
    }

    pub fn get_users(&mut self) -> Result<Vec<User>> {
        let body = self.call("getUsers", QueryValues::new())?;
        let users = expect_body!(body, "users" => Users, or_default)?;
        Ok(users.user)
    }
}
