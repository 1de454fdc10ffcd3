//! PostgreSQL implementation of [`ProfileRepository`].

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::error::{Result, ServerError};
use crate::profile::{Address, Profile, ProfileRepository};

/// Profile row left-joined with its address row.
#[derive(Debug, Clone, FromRow)]
struct ProfileRecord {
    id: String,
    email: String,
    first_name: String,
    last_name: String,
    phone: String,
    street_name: Option<String>,
    postal_code: Option<String>,
    city: Option<String>,
}

impl From<ProfileRecord> for Profile {
    fn from(record: ProfileRecord) -> Self {
        let address = record
            .street_name
            .zip(record.postal_code)
            .zip(record.city)
            .map(|((street_name, postal_code), city)| Address {
                profile_id: record.id.clone(),
                street_name,
                postal_code,
                city,
            });

        Self {
            id: record.id,
            email: record.email,
            first_name: record.first_name,
            last_name: record.last_name,
            phone: record.phone,
            address,
        }
    }
}

/// Turn unique violations into [`ServerError::Conflict`].
fn catch_conflict(err: sqlx::Error) -> ServerError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            return ServerError::Conflict {
                constraint: db_err.constraint().map(ToOwned::to_owned),
            };
        }
    }

    ServerError::Sql(err)
}

/// PostgreSQL profile repository.
#[derive(Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    /// Create a new [`PgProfileRepository`].
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn exists_by_id(&self, id: &str) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(SELECT 1 FROM profiles WHERE id = $1)"#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(SELECT 1 FROM profiles WHERE email = $1)"#,
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Profile>> {
        let record = sqlx::query_as::<_, ProfileRecord>(
            r#"
            SELECT
                p.id, p.email, p.first_name, p.last_name, p.phone,
                a.street_name, a.postal_code, a.city
            FROM profiles p
            LEFT JOIN profile_addresses a ON a.profile_id = p.id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Profile::from))
    }

    async fn insert(&self, profile: &Profile) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"INSERT INTO profiles (id, email, first_name, last_name, phone)
                VALUES ($1, $2, $3, $4, $5)"#,
        )
        .bind(&profile.id)
        .bind(&profile.email)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(&profile.phone)
        .execute(&mut *tx)
        .await
        .map_err(catch_conflict)?;

        if let Some(address) = &profile.address {
            sqlx::query(
                r#"INSERT INTO profile_addresses (profile_id, street_name, postal_code, city)
                    VALUES ($1, $2, $3, $4)"#,
            )
            .bind(&profile.id)
            .bind(&address.street_name)
            .bind(&address.postal_code)
            .bind(&address.city)
            .execute(&mut *tx)
            .await
            .map_err(catch_conflict)?;
        }

        tx.commit().await?;

        Ok(())
    }

    async fn update(&self, profile: &Profile) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"UPDATE profiles
                SET first_name = $2, last_name = $3, phone = $4
                WHERE id = $1"#,
        )
        .bind(&profile.id)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(&profile.phone)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        if let Some(address) = &profile.address {
            sqlx::query(
                r#"INSERT INTO profile_addresses (profile_id, street_name, postal_code, city)
                    VALUES ($1, $2, $3, $4)
                    ON CONFLICT (profile_id) DO UPDATE
                    SET street_name = EXCLUDED.street_name,
                        postal_code = EXCLUDED.postal_code,
                        city = EXCLUDED.city"#,
            )
            .bind(&profile.id)
            .bind(&address.street_name)
            .bind(&address.postal_code)
            .bind(&address.city)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(true)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        // `profile_addresses` rows go with it, see `ON DELETE CASCADE`.
        let result = sqlx::query(r#"DELETE FROM profiles WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64> {
        let count =
            sqlx::query_scalar::<_, i64>(r#"SELECT COUNT(*) FROM profiles"#)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use sqlx::{Pool, Postgres};

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

    async fn address_rows(pool: &PgPool, id: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM profile_addresses WHERE profile_id = $1"#,
        )
        .bind(id)
        .fetch_one(pool)
        .await
        .unwrap()
    }

    #[test]
    fn test_record_without_address() {
        let record = ProfileRecord {
            id: "u1".into(),
            email: "a@b.com".into(),
            first_name: "John".into(),
            last_name: "Doe".into(),
            phone: "1234567890".into(),
            street_name: None,
            postal_code: None,
            city: None,
        };
        let profile = Profile::from(record.clone());
        assert_eq!(profile.id, "u1");
        assert!(profile.address.is_none());

        // A partial row is not an address either.
        let profile = Profile::from(ProfileRecord {
            street_name: Some("123 Main St".into()),
            ..record
        });
        assert!(profile.address.is_none());
    }

    #[sqlx::test]
    async fn test_insert_and_find(pool: Pool<Postgres>) {
        let repo = PgProfileRepository::new(pool);
        assert!(!repo.exists_by_id("u1").await.unwrap());

        repo.insert(&profile("u1", "a@b.com")).await.unwrap();
        assert!(repo.exists_by_id("u1").await.unwrap());
        assert!(repo.exists_by_email("a@b.com").await.unwrap());
        assert!(!repo.exists_by_email("x@y.com").await.unwrap());

        let found = repo.find_by_id("u1").await.unwrap().unwrap();
        assert_eq!(found, profile("u1", "a@b.com"));
        assert!(repo.find_by_id("unknown").await.unwrap().is_none());
    }

    #[sqlx::test]
    async fn test_insert_conflicts(pool: Pool<Postgres>) {
        let repo = PgProfileRepository::new(pool);
        repo.insert(&profile("u1", "a@b.com")).await.unwrap();

        let err = repo.insert(&profile("u1", "x@y.com")).await.unwrap_err();
        assert!(matches!(
            err,
            ServerError::Conflict { constraint: Some(ref c) } if c == "profiles_pkey"
        ));

        let err = repo.insert(&profile("u2", "a@b.com")).await.unwrap_err();
        assert!(matches!(
            err,
            ServerError::Conflict { constraint: Some(ref c) } if c == "profiles_email_key"
        ));

        assert_eq!(repo.count().await.unwrap(), 1);
        assert!(!repo.exists_by_id("u2").await.unwrap());
    }

    #[sqlx::test]
    async fn test_find_without_address(pool: Pool<Postgres>) {
        let repo = PgProfileRepository::new(pool.clone());
        repo.insert(&Profile {
            address: None,
            ..profile("bare", "bare@b.com")
        })
        .await
        .unwrap();

        let found = repo.find_by_id("bare").await.unwrap().unwrap();
        assert_eq!(found.email, "bare@b.com");
        assert!(found.address.is_none());
        assert_eq!(address_rows(&pool, "bare").await, 0);
    }

    #[sqlx::test]
    async fn test_update(pool: Pool<Postgres>) {
        let repo = PgProfileRepository::new(pool.clone());
        repo.insert(&Profile {
            address: None,
            ..profile("bare", "bare@b.com")
        })
        .await
        .unwrap();

        let mut changed = profile("bare", "bare@b.com");
        changed.first_name = "Johnny".into();
        if let Some(address) = changed.address.as_mut() {
            address.postal_code = "67890".into();
        }
        assert!(repo.update(&changed).await.unwrap());
        assert_eq!(address_rows(&pool, "bare").await, 1);

        // Existing address is overwritten.
        if let Some(address) = changed.address.as_mut() {
            address.city = "Newtown".into();
        }
        assert!(repo.update(&changed).await.unwrap());

        let found = repo.find_by_id("bare").await.unwrap().unwrap();
        assert_eq!(found.first_name, "Johnny");
        let address = found.address.unwrap();
        assert_eq!(address.postal_code, "67890");
        assert_eq!(address.city, "Newtown");
        assert_eq!(address_rows(&pool, "bare").await, 1);

        assert!(!repo.update(&profile("ghost", "g@h.com")).await.unwrap());
        assert_eq!(address_rows(&pool, "ghost").await, 0);
    }

    #[sqlx::test]
    async fn test_delete_cascades_address(pool: Pool<Postgres>) {
        let repo = PgProfileRepository::new(pool.clone());
        repo.insert(&profile("u1", "a@b.com")).await.unwrap();
        assert_eq!(address_rows(&pool, "u1").await, 1);

        assert!(repo.delete("u1").await.unwrap());
        assert_eq!(address_rows(&pool, "u1").await, 0);
        assert!(repo.find_by_id("u1").await.unwrap().is_none());

        assert!(!repo.delete("u1").await.unwrap());
    }
}
