//! Request-scoped database connection middleware and extractor.

use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use std::future::{Future, Ready, ready};
use std::ops::Deref;
use std::pin::Pin;
use std::sync::Arc;

use inkpost_infra::{DatabaseConfig, RequestConnection};

use super::error::AppError;

/// Gives every request its own lazily opened connection and closes it once
/// the response is produced, whether the handler succeeded or not.
pub struct DbSession {
    config: Arc<DatabaseConfig>,
}

impl DbSession {
    pub fn new(config: Arc<DatabaseConfig>) -> Self {
        Self { config }
    }
}

impl<S, B> Transform<S, ServiceRequest> for DbSession
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = DbSessionService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(DbSessionService {
            service,
            config: self.config.clone(),
        }))
    }
}

pub struct DbSessionService<S> {
    service: S,
    config: Arc<DatabaseConfig>,
}

impl<S, B> Service<ServiceRequest> for DbSessionService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let connection = RequestConnection::new(self.config.clone());
        req.extensions_mut().insert(connection.clone());

        let fut = self.service.call(req);

        Box::pin(async move {
            let res = fut.await;

            if let Err(e) = connection.close().await {
                tracing::warn!(error = %e, "Failed to close request connection");
            }

            res
        })
    }
}

/// Extractor for the current request's database connection.
#[derive(Clone)]
pub struct Db(RequestConnection);

impl Db {
    pub(crate) fn from_request_parts(req: &HttpRequest) -> Result<Self, AppError> {
        req.extensions()
            .get::<RequestConnection>()
            .cloned()
            .map(Db)
            .ok_or_else(|| {
                tracing::error!("DbSession middleware is not installed");
                AppError::Internal("Database unavailable".to_string())
            })
    }
}

impl Deref for Db {
    type Target = RequestConnection;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for Db {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::from_request_parts(req))
    }
}
