//! The `/api/v1` route table.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{auth, car, driver, index, manufacturer};
use crate::state::AppState;

/// Every route except the auth login/refresh pair requires a Bearer token;
/// the handlers enforce it through the `AuthDriver` extractor.
///
/// ```text
/// GET    /                                 index
/// POST   /auth/login                       login
/// POST   /auth/refresh                     refresh
/// POST   /auth/logout                      logout
/// GET    /drivers?username=                driver-list
/// POST   /drivers                          driver-create
/// GET    /drivers/{id}                     driver-detail
/// DELETE /drivers/{id}                     driver-delete
/// POST   /drivers/{id}/update              driver-update
/// POST   /drivers/{id}/deactivate          driver-deactivate
/// GET    /cars?model=                      car-list
/// POST   /cars                             car-create
/// GET    /cars/{id}                        car-detail
/// DELETE /cars/{id}                        car-delete
/// POST   /cars/{id}/update                 car-update
/// POST   /cars/{id}/toggle-assign          car-toggle-assign
/// GET    /manufacturers?name=              manufacturer-list
/// POST   /manufacturers                    manufacturer-create
/// DELETE /manufacturers/{id}               manufacturer-delete
/// POST   /manufacturers/{id}/update        manufacturer-update
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index::index))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/logout", post(auth::logout))
        .route("/drivers", get(driver::list).post(driver::create))
        .route("/drivers/{id}", get(driver::get_by_id).delete(driver::delete))
        .route("/drivers/{id}/update", post(driver::update_license))
        .route("/drivers/{id}/deactivate", post(driver::deactivate))
        .route("/cars", get(car::list).post(car::create))
        .route("/cars/{id}", get(car::get_by_id).delete(car::delete))
        .route("/cars/{id}/update", post(car::update))
        .route("/cars/{id}/toggle-assign", post(car::toggle_assign))
        .route(
            "/manufacturers",
            get(manufacturer::list).post(manufacturer::create),
        )
        .route(
            "/manufacturers/{id}",
            axum::routing::delete(manufacturer::delete),
        )
        .route("/manufacturers/{id}/update", post(manufacturer::update))
}
