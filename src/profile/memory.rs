//! In-process implementation of [`ProfileRepository`].
//!
//! Used when no PostgreSQL instance is configured and by tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{Result, ServerError};
use crate::profile::{Address, Profile, ProfileRepository};

#[derive(Debug, Default)]
struct Tables {
    /// Profiles, stored without their address.
    profiles: HashMap<String, Profile>,
    addresses: HashMap<String, Address>,
}

impl Tables {
    fn joined(&self, id: &str) -> Option<Profile> {
        self.profiles.get(id).map(|profile| Profile {
            address: self.addresses.get(id).cloned(),
            ..profile.clone()
        })
    }
}

/// Profile repository kept in memory.
#[derive(Debug, Default)]
pub struct MemoryProfileRepository {
    tables: RwLock<Tables>,
}

impl MemoryProfileRepository {
    /// Create an empty [`MemoryProfileRepository`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an address row is stored for `profile_id`.
    pub async fn has_address(&self, profile_id: &str) -> bool {
        self.tables.read().await.addresses.contains_key(profile_id)
    }
}

#[async_trait]
impl ProfileRepository for MemoryProfileRepository {
    async fn exists_by_id(&self, id: &str) -> Result<bool> {
        Ok(self.tables.read().await.profiles.contains_key(id))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool> {
        Ok(self
            .tables
            .read()
            .await
            .profiles
            .values()
            .any(|profile| profile.email == email))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Profile>> {
        Ok(self.tables.read().await.joined(id))
    }

    async fn insert(&self, profile: &Profile) -> Result<()> {
        let mut tables = self.tables.write().await;

        if tables.profiles.contains_key(&profile.id) {
            return Err(ServerError::Conflict {
                constraint: Some("profiles_pkey".to_owned()),
            });
        }
        if tables.profiles.values().any(|p| p.email == profile.email) {
            return Err(ServerError::Conflict {
                constraint: Some("profiles_email_key".to_owned()),
            });
        }

        if let Some(address) = &profile.address {
            tables.addresses.insert(
                profile.id.clone(),
                Address {
                    profile_id: profile.id.clone(),
                    ..address.clone()
                },
            );
        }
        tables.profiles.insert(
            profile.id.clone(),
            Profile {
                address: None,
                ..profile.clone()
            },
        );

        Ok(())
    }

    async fn update(&self, profile: &Profile) -> Result<bool> {
        let mut tables = self.tables.write().await;

        let Some(stored) = tables.profiles.get_mut(&profile.id) else {
            return Ok(false);
        };
        stored.first_name = profile.first_name.clone();
        stored.last_name = profile.last_name.clone();
        stored.phone = profile.phone.clone();

        if let Some(address) = &profile.address {
            tables.addresses.insert(
                profile.id.clone(),
                Address {
                    profile_id: profile.id.clone(),
                    ..address.clone()
                },
            );
        }

        Ok(true)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut tables = self.tables.write().await;

        // cascade.
        tables.addresses.remove(id);
        Ok(tables.profiles.remove(id).is_some())
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.tables.read().await.profiles.len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: &str, email: &str) -> Profile {
        Profile {
            id: id.into(),
            email: email.into(),
            first_name: "John".into(),
            last_name: "Doe".into(),
            phone: "1234567890".into(),
            address: Some(Address {
                profile_id: id.into(),
                street_name: "123 Main St".into(),
                postal_code: "12345".into(),
                city: "Testville".into(),
            }),
        }
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_email() {
        let repo = MemoryProfileRepository::new();
        repo.insert(&profile("u1", "a@b.com")).await.unwrap();

        let err = repo.insert(&profile("u2", "a@b.com")).await.unwrap_err();
        assert!(matches!(
            err,
            ServerError::Conflict { constraint: Some(ref c) } if c == "profiles_email_key"
        ));
        assert!(repo.exists_by_email("a@b.com").await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_cascades_address() {
        let repo = MemoryProfileRepository::new();
        repo.insert(&profile("u1", "a@b.com")).await.unwrap();
        assert!(repo.has_address("u1").await);

        assert!(repo.delete("u1").await.unwrap());
        assert!(!repo.has_address("u1").await);
        assert!(!repo.delete("u1").await.unwrap());
    }

    #[tokio::test]
    async fn test_update_missing_profile() {
        let repo = MemoryProfileRepository::new();
        assert!(!repo.update(&profile("ghost", "g@h.com")).await.unwrap());
        assert!(!repo.has_address("ghost").await);
    }
}
