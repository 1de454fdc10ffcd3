//! Data transfer objects and their mapping to [`Profile`].

use serde::{Deserialize, Serialize};

use crate::profile::{Address, Profile};

/// Data required to create a [`Profile`] and its [`Address`].
#[derive(Debug, Clone, Default)]
pub struct CreateProfile {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub street_name: String,
    pub postal_code: String,
    pub city: String,
}

/// Mutable fields of a [`Profile`].
///
/// Carries neither `id` nor `email`: both are fixed at creation.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfile {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub street_name: String,
    pub postal_code: String,
    pub city: String,
}

/// Public representation of a [`Profile`], address flattened.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub street_name: String,
    pub postal_code: String,
    pub city: String,
}

impl From<CreateProfile> for Profile {
    fn from(request: CreateProfile) -> Self {
        Self {
            address: Some(Address {
                profile_id: request.id.clone(),
                street_name: request.street_name,
                postal_code: request.postal_code,
                city: request.city,
            }),
            id: request.id,
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
            phone: request.phone,
        }
    }
}

impl From<&Profile> for ProfileView {
    fn from(profile: &Profile) -> Self {
        let address = profile.address.as_ref();

        Self {
            id: profile.id.clone(),
            email: profile.email.clone(),
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            phone: profile.phone.clone(),
            street_name: address.map(|a| a.street_name.clone()).unwrap_or_default(),
            postal_code: address.map(|a| a.postal_code.clone()).unwrap_or_default(),
            city: address.map(|a| a.city.clone()).unwrap_or_default(),
        }
    }
}

impl Profile {
    /// Overwrite mutable fields with `update`.
    ///
    /// Creates the [`Address`] when the profile has none yet.
    pub fn apply(&mut self, update: UpdateProfile) {
        self.first_name = update.first_name;
        self.last_name = update.last_name;
        self.phone = update.phone;

        let address = self.address.get_or_insert_with(|| Address {
            profile_id: self.id.clone(),
            ..Default::default()
        });
        address.street_name = update.street_name;
        address.postal_code = update.postal_code;
        address.city = update.city;
    }
}
