use bank_core_api::ApiResult;
use serde::{Deserialize, Serialize};

use super::user::{Introduce, User};

/// User with a list of privileges; composes [`User`] instead of extending it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    user: User,
    privileges: Vec<String>,
}

impl AdminUser {
    pub fn new<I, S>(name: &str, age: u32, privileges: I) -> ApiResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            user: User::new(name, age)?,
            privileges: privileges.into_iter().map(Into::into).collect(),
        })
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn user_mut(&mut self) -> &mut User {
        &mut self.user
    }

    pub fn privileges(&self) -> &[String] {
        &self.privileges
    }

    pub fn has_privilege(&self, privilege: &str) -> bool {
        self.privileges.iter().any(|p| p == privilege)
    }
}

impl Introduce for AdminUser {
    fn introduction(&self) -> String {
        format!(
            "Hi, I'm Admin {} with privileges: {}.",
            self.user.name(),
            self.privileges.join(", ")
        )
    }
}
