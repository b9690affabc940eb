//! Application composition: state, middleware stack and routes.

use actix_web::{
    App, Error,
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web,
};
use tracing_actix_web::TracingLogger;

use crate::handlers;
use crate::middleware::error::form_error;
use crate::middleware::{DbSession, LoadCurrentUser};
use crate::state::AppState;

/// Build the application. Shared by the server and the HTTP tests.
///
/// Middleware runs outermost first: request tracing, then the per-request
/// database connection, then current-user loading, then routing.
pub fn build_app(
    state: AppState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Response = ServiceResponse<impl MessageBody>,
        Config = (),
        InitError = (),
        Error = Error,
    >,
> {
    let database = state.database.clone();

    App::new()
        .app_data(web::Data::new(state))
        .app_data(web::FormConfig::default().error_handler(form_error))
        .wrap(LoadCurrentUser)
        .wrap(DbSession::new(database))
        .wrap(TracingLogger::default())
        .configure(handlers::configure_routes)
}
