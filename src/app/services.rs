//! Demo services backing the user controller.

use serde::Serialize;

use crate::container::{Args, Component, ContainerError, Param};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// In-memory user records.
#[derive(Debug)]
pub struct UserStore {
    users: Vec<User>,
}

impl UserStore {
    pub fn seeded() -> Self {
        let user = |id, name: &str, email: &str| User {
            id,
            name: name.to_string(),
            email: email.to_string(),
        };

        Self {
            users: vec![
                user(1, "Alice", "alice@example.com"),
                user(2, "Bob", "bob@example.com"),
                user(3, "Charlie", "charlie@example.com"),
            ],
        }
    }

    pub fn all(&self) -> &[User] {
        &self.users
    }
}

impl Component for UserStore {
    const ID: &'static str = "app::services::UserStore";

    fn construct(_args: &mut Args) -> Result<Self, ContainerError> {
        Ok(Self::seeded())
    }
}

/// Read access to users.
#[derive(Debug)]
pub struct UserService {
    store: std::sync::Arc<UserStore>,
}

impl UserService {
    pub fn all_users(&self) -> &[User] {
        self.store.all()
    }

    pub fn user_by_id(&self, id: i64) -> Option<&User> {
        self.store.all().iter().find(|user| user.id == id)
    }
}

impl Component for UserService {
    const ID: &'static str = "app::services::UserService";

    fn params() -> Vec<Param> {
        vec![Param::component::<UserStore>("store")]
    }

    fn construct(args: &mut Args) -> Result<Self, ContainerError> {
        Ok(Self { store: args.take()? })
    }
}
