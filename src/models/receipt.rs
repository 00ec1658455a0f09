use serde::{Deserialize, Serialize};

use super::{Seat, User};

// Proof of purchase for one active reservation, keyed by the buyer's email.
// Only the seat ever changes after purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub user: User,
    pub from: String,
    pub to: String,
    pub price: f64,
    pub seat: Seat,
}
