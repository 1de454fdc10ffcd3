mod dto;
mod memory;
mod outcome;
mod postgres;
mod repository;
mod service;

pub use dto::*;
pub use memory::*;
pub use outcome::*;
pub use postgres::*;
pub use repository::*;
pub use service::*;

use serde::{Deserialize, Serialize};

/// Account profile as saved on database.
///
/// `id` comes from the identity provider and never changes once stored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub address: Option<Address>,
}

/// Postal address of a [`Profile`].
///
/// Keyed by the owning profile id, so a profile holds at most one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub profile_id: String,
    pub street_name: String,
    pub postal_code: String,
    pub city: String,
}
