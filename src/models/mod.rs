pub mod user;
pub mod seat;
pub mod receipt;

pub use user::User;
pub use seat::{Seat, Section};
pub use receipt::Receipt;
