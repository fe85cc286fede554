use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use sea_orm::DatabaseConnection;

use crate::{
    data::cook::{CookRepository, NewCook},
    error::Error,
    model::form::{CookRegistration, FieldErrors},
    service::Submission,
};

pub const USERNAME_TAKEN_MESSAGE: &str = "A user with that username already exists.";

pub struct CookService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CookService<'a> {
    /// Creates a new instance of [`CookService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a new cook with a hashed password. A taken username comes
    /// back as a field error, not a database failure.
    pub async fn register(
        &self,
        registration: CookRegistration,
    ) -> Result<Submission<entity::cook::Model>, Error> {
        let cook_repository = CookRepository::new(self.db);

        if cook_repository
            .find_by_username(&registration.username)
            .await?
            .is_some()
        {
            let mut errors = FieldErrors::default();
            errors.add("username", USERNAME_TAKEN_MESSAGE);
            return Ok(Submission::Invalid(errors));
        }

        let cook = cook_repository
            .create(NewCook {
                username: registration.username,
                password_hash: hash_password(&registration.password)?,
                first_name: registration.first_name,
                last_name: registration.last_name,
                years_of_experience: Some(registration.years_of_experience),
                is_staff: false,
            })
            .await?;

        Ok(Submission::Saved(cook))
    }

    /// Checks credentials, returning the cook on a match and None on an
    /// unknown username or wrong password. The two cases are not
    /// distinguished to the caller.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<entity::cook::Model>, Error> {
        let cook = CookRepository::new(self.db).find_by_username(username).await?;

        match cook {
            Some(cook) if verify_password(password, &cook.password_hash) => Ok(Some(cook)),
            _ => Ok(None),
        }
    }

    /// Updates a cook's years of experience.
    pub async fn update_experience(
        &self,
        cook_id: i32,
        years_of_experience: i32,
    ) -> Result<entity::cook::Model, Error> {
        CookRepository::new(self.db)
            .update_experience(cook_id, years_of_experience)
            .await?
            .ok_or(Error::NotFound("Cook"))
    }
}

fn hash_password(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| Error::PasswordHash(err.to_string()))?;

    Ok(hash.to_string())
}

/// An unparsable stored hash (e.g. an unusable placeholder) simply fails
/// verification.
fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
