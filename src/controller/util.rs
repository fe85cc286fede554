//! Session-based access checks shared by the handlers.

use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::{
    data::cook::CookRepository,
    error::{auth::AuthError, Error},
    model::session::SessionCookId,
};

/// Resolves the session to the acting cook. Fails with a redirect-to-login
/// error when nobody is logged in; a session pointing at a deleted cook is
/// cleared first so the next request starts clean.
pub async fn require_cook(
    db: &DatabaseConnection,
    session: &Session,
) -> Result<entity::cook::Model, Error> {
    let cook_id = SessionCookId::get(session)
        .await?
        .ok_or(AuthError::NotLoggedIn)?;

    match CookRepository::new(db).get(cook_id).await? {
        Some(cook) => Ok(cook),
        None => {
            session.clear().await;

            tracing::warn!(
                "cook ID {} had an active session but no longer exists; session cleared",
                cook_id
            );

            Err(AuthError::CookNotInDatabase(cook_id).into())
        }
    }
}

/// Like [`require_cook`], additionally requiring the staff flag.
pub async fn require_staff(
    db: &DatabaseConnection,
    session: &Session,
) -> Result<entity::cook::Model, Error> {
    let cook = require_cook(db, session).await?;

    if !cook.is_staff {
        return Err(AuthError::NotStaff(cook.id).into());
    }

    Ok(cook)
}

#[cfg(test)]
mod tests {
    use galley_test_utils::prelude::*;

    use crate::{
        controller::util::{require_cook, require_staff},
        error::{auth::AuthError, Error},
        model::session::SessionCookId,
    };

    mod require_cook_tests {
        use super::*;

        #[tokio::test]
        /// Expect the acting cook back when the session resolves
        async fn test_require_cook_success() -> Result<(), TestError> {
            let test = test_setup_with_catalog_tables!()?;

            let cook = factory::create_cook(&test.db, "amir").await?;
            SessionCookId::insert(&test.session, cook.id).await.unwrap();

            let acting = require_cook(&test.db, &test.session).await.unwrap();

            assert_eq!(acting.id, cook.id);

            Ok(())
        }

        #[tokio::test]
        /// Expect NotLoggedIn when the session holds no cook ID
        async fn test_require_cook_not_logged_in() -> Result<(), TestError> {
            let test = test_setup_with_catalog_tables!()?;

            let result = require_cook(&test.db, &test.session).await;

            assert!(matches!(
                result,
                Err(Error::AuthError(AuthError::NotLoggedIn))
            ));

            Ok(())
        }

        #[tokio::test]
        /// Expect a stale session to be cleared and rejected
        async fn test_require_cook_stale_session() -> Result<(), TestError> {
            let test = test_setup_with_catalog_tables!()?;

            SessionCookId::insert(&test.session, 42).await.unwrap();

            let result = require_cook(&test.db, &test.session).await;

            assert!(matches!(
                result,
                Err(Error::AuthError(AuthError::CookNotInDatabase(42)))
            ));
            assert!(SessionCookId::get(&test.session).await.unwrap().is_none());

            Ok(())
        }
    }

    mod require_staff_tests {
        use super::*;

        #[tokio::test]
        /// Expect a non-staff cook to be rejected with NotStaff
        async fn test_require_staff_rejects_regular_cook() -> Result<(), TestError> {
            let test = test_setup_with_catalog_tables!()?;

            let cook = factory::create_cook(&test.db, "amir").await?;
            SessionCookId::insert(&test.session, cook.id).await.unwrap();

            let result = require_staff(&test.db, &test.session).await;

            assert!(matches!(
                result,
                Err(Error::AuthError(AuthError::NotStaff(_)))
            ));

            Ok(())
        }

        #[tokio::test]
        /// Expect a staff cook to pass the staff check
        async fn test_require_staff_accepts_staff() -> Result<(), TestError> {
            let test = test_setup_with_catalog_tables!()?;

            let cook = factory::create_staff_cook(&test.db, "chief").await?;
            SessionCookId::insert(&test.session, cook.id).await.unwrap();

            let acting = require_staff(&test.db, &test.session).await.unwrap();

            assert!(acting.is_staff);

            Ok(())
        }
    }
}
