//! HTTP routing for the Galley server.
//!
//! Every path is registered here. The whole surface sits behind the
//! session layer; the per-handler access checks live in
//! [`controller::util`](crate::controller::util).

use axum::{
    routing::{get, post},
    Router,
};

use crate::{controller, model::app::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(controller::index::index))
        .route(
            "/accounts/login/",
            get(controller::auth::login_form).post(controller::auth::login),
        )
        .route("/accounts/logout/", get(controller::auth::logout))
        .route("/cook/", get(controller::cook::list))
        .route(
            "/cook/create/",
            get(controller::cook::create_form).post(controller::cook::create),
        )
        .route("/cook/{id}/", get(controller::cook::detail))
        .route(
            "/cook/{id}/update/",
            get(controller::cook::update_form).post(controller::cook::update),
        )
        .route("/dish-type/", get(controller::dish_type::list))
        .route(
            "/dish-type/create/",
            get(controller::dish_type::create_form).post(controller::dish_type::create),
        )
        .route("/dish-type/{id}/", get(controller::dish_type::detail))
        .route(
            "/dish-type/{id}/update/",
            get(controller::dish_type::update_form).post(controller::dish_type::update),
        )
        .route(
            "/dish-type/{id}/delete/",
            get(controller::dish_type::delete_form).post(controller::dish_type::delete),
        )
        .route("/dishes/", get(controller::dish::list))
        .route(
            "/dish/create/",
            get(controller::dish::create_form).post(controller::dish::create),
        )
        .route("/dish/{id}/", get(controller::dish::detail))
        .route(
            "/dish/{id}/update/",
            get(controller::dish::update_form).post(controller::dish::update),
        )
        .route(
            "/dish/{id}/delete/",
            get(controller::dish::delete_form).post(controller::dish::delete),
        )
        .route(
            "/dish/{id}/toggle-assign/",
            post(controller::dish::toggle_assign),
        )
        .route("/ingredients/", get(controller::ingredient::list))
        .route(
            "/ingredients/create/",
            get(controller::ingredient::create_form).post(controller::ingredient::create),
        )
        .route("/ingredients/{id}/", get(controller::ingredient::detail))
        .route(
            "/ingredients/{id}/update/",
            get(controller::ingredient::update_form).post(controller::ingredient::update),
        )
        .route(
            "/ingredients/{id}/delete/",
            get(controller::ingredient::delete_form).post(controller::ingredient::delete),
        )
        .route("/admin/", get(controller::admin::dashboard))
        .route("/admin/cook/", get(controller::admin::cook_list))
        .route(
            "/admin/cook/{id}/delete/",
            get(controller::admin::cook_delete_form).post(controller::admin::cook_delete),
        )
        .route("/admin/dishes/", get(controller::admin::dish_list))
        .route("/admin/dish-type/", get(controller::admin::dish_type_list))
        .route(
            "/admin/ingredients/",
            get(controller::admin::ingredient_list),
        )
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{
            header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
            Request, StatusCode,
        },
        Router,
    };
    use galley_test_utils::prelude::*;
    use tower::ServiceExt;

    use crate::{
        model::{app::AppState, form::CookRegistration},
        router::routes,
        service::cook::CookService,
        startup,
    };

    fn app(db: sea_orm::DatabaseConnection) -> Router {
        let templates = startup::load_templates().expect("templates parse");

        routes()
            .with_state(AppState { db, templates })
            .layer(startup::session_layer())
    }

    async fn register_gordon(db: &sea_orm::DatabaseConnection) {
        CookService::new(db)
            .register(CookRegistration {
                username: "gordon".to_string(),
                password: "brigade-secret".to_string(),
                first_name: "Gordon".to_string(),
                last_name: "Crawford".to_string(),
                years_of_experience: 5,
            })
            .await
            .expect("registration succeeds");
    }

    /// Logs gordon in and returns the session cookie.
    async fn login_cookie(app: &Router) -> String {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/accounts/login/")
                    .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("username=gordon&password=brigade-secret"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/");

        response.headers()[SET_COOKIE]
            .to_str()
            .unwrap()
            .split(';')
            .next()
            .unwrap()
            .to_string()
    }

    mod access_tests {
        use super::*;

        #[tokio::test]
        /// Expect an anonymous request to a protected page to redirect to
        /// the login page
        async fn test_anonymous_request_redirects_to_login() -> Result<(), TestError> {
            let test = test_setup_with_catalog_tables!()?;
            let app = app(test.db.clone());

            let response = app
                .oneshot(
                    Request::builder()
                        .uri("/dish-type/")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::SEE_OTHER);
            assert_eq!(response.headers()[LOCATION], "/accounts/login/");

            Ok(())
        }

        #[tokio::test]
        /// Expect the login page itself to be reachable anonymously
        async fn test_login_page_is_public() -> Result<(), TestError> {
            let test = test_setup_with_catalog_tables!()?;
            let app = app(test.db.clone());

            let response = app
                .oneshot(
                    Request::builder()
                        .uri("/accounts/login/")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK);

            Ok(())
        }

        #[tokio::test]
        /// Expect a non-staff cook to get 403 on the admin surface
        async fn test_admin_surface_rejects_regular_cook() -> Result<(), TestError> {
            let test = test_setup_with_catalog_tables!()?;
            let app = app(test.db.clone());

            register_gordon(&test.db).await;
            let cookie = login_cookie(&app).await;

            let response = app
                .oneshot(
                    Request::builder()
                        .uri("/admin/")
                        .header(COOKIE, &cookie)
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::FORBIDDEN);

            Ok(())
        }
    }

    mod flow_tests {
        use super::*;

        #[tokio::test]
        /// Expect login to establish a session that reaches the index page
        async fn test_login_then_index() -> Result<(), TestError> {
            let test = test_setup_with_catalog_tables!()?;
            let app = app(test.db.clone());

            register_gordon(&test.db).await;
            let cookie = login_cookie(&app).await;

            let response = app
                .oneshot(
                    Request::builder()
                        .uri("/")
                        .header(COOKIE, &cookie)
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK);

            Ok(())
        }

        #[tokio::test]
        /// Expect the toggle route to answer with a redirect to the dish
        /// detail page
        async fn test_toggle_assign_redirects_to_detail() -> Result<(), TestError> {
            let test = test_setup_with_catalog_tables!()?;
            let app = app(test.db.clone());

            register_gordon(&test.db).await;
            let cookie = login_cookie(&app).await;

            let dish_type = factory::create_dish_type(&test.db, "Soup").await?;
            let dish = factory::create_dish(&test.db, "Borsch", "8.50", dish_type.id).await?;

            let response = app
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri(format!("/dish/{}/toggle-assign/", dish.id))
                        .header(COOKIE, &cookie)
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::SEE_OTHER);
            assert_eq!(
                response.headers()[LOCATION],
                format!("/dish/{}/", dish.id).as_str()
            );

            Ok(())
        }

        #[tokio::test]
        /// Expect a request for a missing dish to answer 404
        async fn test_missing_dish_is_not_found() -> Result<(), TestError> {
            let test = test_setup_with_catalog_tables!()?;
            let app = app(test.db.clone());

            register_gordon(&test.db).await;
            let cookie = login_cookie(&app).await;

            let response = app
                .oneshot(
                    Request::builder()
                        .uri("/dish/42/")
                        .header(COOKIE, &cookie)
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::NOT_FOUND);

            Ok(())
        }

        #[tokio::test]
        /// Expect logout to clear the session so the next request is
        /// redirected to login again
        async fn test_logout_ends_the_session() -> Result<(), TestError> {
            let test = test_setup_with_catalog_tables!()?;
            let app = app(test.db.clone());

            register_gordon(&test.db).await;
            let cookie = login_cookie(&app).await;

            let response = app
                .clone()
                .oneshot(
                    Request::builder()
                        .uri("/accounts/logout/")
                        .header(COOKIE, &cookie)
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::SEE_OTHER);
            assert_eq!(response.headers()[LOCATION], "/accounts/login/");

            let response = app
                .oneshot(
                    Request::builder()
                        .uri("/")
                        .header(COOKIE, &cookie)
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::SEE_OTHER);
            assert_eq!(response.headers()[LOCATION], "/accounts/login/");

            Ok(())
        }
    }
}
