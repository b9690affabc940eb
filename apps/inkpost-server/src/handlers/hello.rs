//! Liveness page.

use actix_web::HttpResponse;
use actix_web::http::header::ContentType;

/// GET /hello
pub async fn hello() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body("Hello World!")
}
