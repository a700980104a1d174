//! User listing and lookup.

use std::sync::Arc;

use crate::app::services::UserService;
use crate::app::USERS;
use crate::container::{Args, Component, ContainerError, Param};
use crate::http::Response;
use crate::routing::{Action, Controller, HandlerResult, Params};

pub const NAMESPACE: &str = "app::controllers";

pub struct UserController {
    users: Arc<UserService>,
}

impl UserController {
    fn get_users(&self, _params: &Params, response: &mut Response) -> HandlerResult {
        response.json(self.users.all_users())?;
        Ok(())
    }

    fn get_user(&self, params: &Params, response: &mut Response) -> HandlerResult {
        let user_id: i64 = params.parse(0)?;
        response.json(&self.users.user_by_id(user_id))?;
        Ok(())
    }
}

impl Component for UserController {
    const ID: &'static str = "app::controllers::UserController";

    fn params() -> Vec<Param> {
        vec![Param::abstract_id("users", USERS)]
    }

    fn construct(args: &mut Args) -> Result<Self, ContainerError> {
        Ok(Self { users: args.take()? })
    }
}

impl Controller for UserController {
    fn actions() -> Vec<Action<Self>> {
        vec![
            Action::new("get_users", UserController::get_users).get("/users"),
            Action::new("get_user", UserController::get_user).get(r"/user/(\d+)"),
        ]
    }
}
