pub mod auth;
pub mod delivery;
pub mod driver;
pub mod notification;
pub mod order;
pub mod user;

mod router;
pub use router::get_router;
