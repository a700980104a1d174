//! Landing page.

use crate::container::{Args, Component, ContainerError};
use crate::http::Response;
use crate::routing::{Action, Controller, HandlerResult, Params, Route};

pub const NAMESPACE: &str = "app::controllers";

pub struct HomeController;

impl HomeController {
    fn index(&self, _params: &Params, response: &mut Response) -> HandlerResult {
        response.set_header("Content-Type", "text/html; charset=utf-8");
        response.write("Welcome to the Home Page!<br>");
        response.write("<a href='/users'>Users</a><br>");
        response.write("<a href='/user/2'>User #2</a><br>");
        Ok(())
    }
}

impl Component for HomeController {
    const ID: &'static str = "app::controllers::HomeController";

    fn construct(_args: &mut Args) -> Result<Self, ContainerError> {
        Ok(HomeController)
    }
}

impl Controller for HomeController {
    fn actions() -> Vec<Action<Self>> {
        vec![Action::new("index", HomeController::index).route(Route::with_methods("/", ["GET"]))]
    }
}
