//! HTTP handlers and route configuration.

mod auth;
mod blog;
mod hello;

use actix_web::{HttpResponse, http::header, web};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/hello", web::get().to(hello::hello))
        // Auth routes
        .service(
            web::scope("/auth")
                .route("/register", web::get().to(auth::register_form))
                .route("/register", web::post().to(auth::register))
                .route("/login", web::get().to(auth::login_form))
                .route("/login", web::post().to(auth::login))
                .route("/logout", web::get().to(auth::logout)),
        )
        // Blog routes
        .route("/", web::get().to(blog::index))
        .route("/create", web::get().to(blog::create_form))
        .route("/create", web::post().to(blog::create))
        .route("/{id}/update", web::get().to(blog::update_form))
        .route("/{id}/update", web::post().to(blog::update))
        .route("/{id}/delete", web::post().to(blog::delete));
}

/// 302 to another page of the site.
pub(crate) fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}
