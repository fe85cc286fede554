//! Typed wrappers for session state.
//!
//! Each wrapper owns one session key with methods for inserting and
//! retrieving its value, so handlers never touch raw session keys.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::error::Error;

pub const SESSION_COOK_ID_KEY: &str = "galley:cook:id";
pub const SESSION_VISIT_COUNT_KEY: &str = "galley:visits";

/// ID of the cook logged in for this session.
#[derive(Default, Deserialize, Serialize, Debug)]
pub struct SessionCookId(pub i32);

impl SessionCookId {
    /// Insert cook ID into session
    pub async fn insert(session: &Session, cook_id: i32) -> Result<(), Error> {
        session
            .insert(SESSION_COOK_ID_KEY, SessionCookId(cook_id))
            .await?;

        Ok(())
    }

    /// Get cook ID from session
    pub async fn get(session: &Session) -> Result<Option<i32>, Error> {
        Ok(session
            .get::<SessionCookId>(SESSION_COOK_ID_KEY)
            .await?
            .map(|SessionCookId(id)| id))
    }
}

/// Number of times this session has requested the landing page.
/// Starts at 0 when the session is created and is never shared
/// across sessions.
#[derive(Default, Deserialize, Serialize, Debug)]
pub struct SessionVisitCount(pub u64);

impl SessionVisitCount {
    /// Increment the visit counter and return the new count.
    pub async fn increment(session: &Session) -> Result<u64, Error> {
        let SessionVisitCount(visits) = session
            .get::<SessionVisitCount>(SESSION_VISIT_COUNT_KEY)
            .await?
            .unwrap_or_default();

        let visits = visits + 1;

        session
            .insert(SESSION_VISIT_COUNT_KEY, SessionVisitCount(visits))
            .await?;

        Ok(visits)
    }
}

#[cfg(test)]
mod tests {
    mod session_cook_id_tests {
        use galley_test_utils::prelude::*;

        use crate::model::session::SessionCookId;

        #[tokio::test]
        /// Expect Some when a cook ID was inserted into the session
        async fn test_get_session_cook_id_some() -> Result<(), TestError> {
            let test = test_setup_with_tables!()?;

            SessionCookId::insert(&test.session, 7).await.unwrap();

            let result = SessionCookId::get(&test.session).await;

            assert!(result.is_ok());
            assert_eq!(result.unwrap(), Some(7));

            Ok(())
        }

        #[tokio::test]
        /// Expect None when no cook ID is present in the session
        async fn test_get_session_cook_id_none() -> Result<(), TestError> {
            let test = test_setup_with_tables!()?;

            let result = SessionCookId::get(&test.session).await;

            assert!(result.is_ok());
            assert!(result.unwrap().is_none());

            Ok(())
        }
    }

    mod session_visit_count_tests {
        use galley_test_utils::prelude::*;

        use crate::model::session::SessionVisitCount;

        #[tokio::test]
        /// Expect the first increment of a fresh session to return 1
        async fn test_visit_count_starts_at_zero() -> Result<(), TestError> {
            let test = test_setup_with_tables!()?;

            let visits = SessionVisitCount::increment(&test.session).await.unwrap();

            assert_eq!(visits, 1);

            Ok(())
        }

        #[tokio::test]
        /// Expect the counter to advance by one per increment
        async fn test_visit_count_increments() -> Result<(), TestError> {
            let test = test_setup_with_tables!()?;

            for expected in 1..=3 {
                let visits = SessionVisitCount::increment(&test.session).await.unwrap();
                assert_eq!(visits, expected);
            }

            Ok(())
        }
    }
}
