use std::sync::Arc;

use crate::error::{Result, ServerError};
use crate::profile::{
    ALREADY_EXISTS, CREATED, CreateProfile, DELETED, NOT_FOUND, Outcome,
    Profile, ProfileRepository, RETRIEVED, UPDATED, UpdateProfile,
};

/// Profile lifecycle manager.
#[derive(Clone)]
pub struct ProfileService {
    repo: Arc<dyn ProfileRepository>,
}

impl ProfileService {
    /// Create a new [`ProfileService`].
    pub fn new(repo: Arc<dyn ProfileRepository>) -> Self {
        Self { repo }
    }

    /// Whether a profile with `id` exists.
    pub async fn exists_by_id(&self, id: &str) -> Result<bool> {
        self.repo.exists_by_id(id).await
    }

    /// Create a profile with its address, unless `id` is already taken.
    ///
    /// The existence check only avoids a round trip: a concurrent insert, or
    /// a duplicate email, is caught by storage constraints and reported the
    /// same way.
    pub async fn create(
        &self,
        request: CreateProfile,
    ) -> Result<Outcome<Profile>> {
        if self.exists_by_id(&request.id).await? {
            return Ok(Outcome::failure(ALREADY_EXISTS));
        }

        let profile = Profile::from(request);
        match self.repo.insert(&profile).await {
            Ok(()) => {
                tracing::info!(profile_id = %profile.id, "account profile created");
                Ok(Outcome::success(profile, CREATED))
            },
            Err(ServerError::Conflict { constraint }) => {
                tracing::debug!(
                    profile_id = %profile.id,
                    ?constraint,
                    "account profile creation hit a unique constraint"
                );
                Ok(Outcome::failure(ALREADY_EXISTS))
            },
            Err(err) => Err(err),
        }
    }

    /// Find a profile with its address.
    pub async fn get_by_id(&self, id: &str) -> Result<Outcome<Profile>> {
        Ok(match self.repo.find_by_id(id).await? {
            Some(profile) => Outcome::success(profile, RETRIEVED),
            None => Outcome::failure(NOT_FOUND),
        })
    }

    /// Overwrite names, phone and address of a profile.
    pub async fn update(
        &self,
        id: &str,
        request: UpdateProfile,
    ) -> Result<Outcome<Profile>> {
        let outcome = self.get_by_id(id).await?;
        let Some(mut profile) = outcome.result else {
            return Ok(outcome);
        };

        profile.apply(request);

        // deleted between both steps.
        if !self.repo.update(&profile).await? {
            return Ok(Outcome::failure(NOT_FOUND));
        }

        tracing::info!(profile_id = %profile.id, "account profile updated");
        Ok(Outcome::success(profile, UPDATED))
    }

    /// Delete a profile and its address.
    pub async fn delete(&self, id: &str) -> Result<Outcome<()>> {
        let outcome = self.get_by_id(id).await?;
        if !outcome.succeeded {
            return Ok(outcome.discard());
        }

        if !self.repo.delete(id).await? {
            return Ok(Outcome::failure(NOT_FOUND));
        }

        tracing::info!(profile_id = %id, "account profile deleted");
        Ok(Outcome::success((), DELETED))
    }
}
