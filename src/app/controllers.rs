//! Demo controllers.
//!
//! Each file under `controllers/` is also a discovery unit: it declares a
//! `NAMESPACE` and is named after the controller it defines.

pub mod home_controller;
pub mod user_controller;

pub use home_controller::HomeController;
pub use user_controller::UserController;
