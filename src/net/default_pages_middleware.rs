use std::{
    future::{Ready, ready},
    pin::Pin,
    task::{Context, Poll},
};

use actix_errpage::SkipDefaultErrorPage;
use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::Error,
    http::{StatusCode, header::HeaderValue},
};

use crate::net::replace_body;

const SERVER_NAME: &str = env!("CARGO_PKG_NAME");

/// Replaces the body of error responses with the server's generic error page,
/// unless the response asks to keep its own.
pub struct DefaultErrorPages;

pub struct DefaultErrorPagesService<S> {
    service: S,
}

impl<S, B> Transform<S, ServiceRequest> for DefaultErrorPages
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse;
    type Error = Error;
    type Transform = DefaultErrorPagesService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(DefaultErrorPagesService { service }))
    }
}

impl<S, B> Service<ServiceRequest> for DefaultErrorPagesService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse;
    type Error = Error;
    type Future = Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let fut = self.service.call(req);

        Box::pin(async move {
            let res = fut.await?;

            let status = res.status();
            let skip = res
                .response()
                .extensions()
                .get::<SkipDefaultErrorPage>()
                .is_some_and(|f| f.0);
            if skip || !(status.is_client_error() || status.is_server_error()) {
                return Ok(res.map_into_boxed_body());
            }

            tracing::debug!("substituting default error page for {status}");
            let (req, res) = res.into_parts();
            let page = replace_body(
                &res,
                default_page(status),
                HeaderValue::from_static("text/html; charset=utf-8"),
            );
            Ok(ServiceResponse::new(req, page))
        })
    }
}

fn default_page(status: StatusCode) -> String {
    let title = format!(
        "{} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Error")
    );
    format!(
        "<!DOCTYPE html>\n<html>\n<head><title>{title}</title></head>\n<body>\n<h1>{title}</h1>\n<hr>\n<p>{SERVER_NAME}</p>\n</body>\n</html>\n"
    )
}
