use serde::{Deserialize, Serialize};

// A passenger. Email is the primary key everywhere; a user embedded in a
// receipt is never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}
