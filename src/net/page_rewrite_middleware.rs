use std::{
    future::{Ready, ready},
    path::{Component, Path, PathBuf},
    pin::Pin,
    task::{Context, Poll},
};

use actix_errpage::X_ERR_PAGE_URL;
use actix_files::file_extension_to_mime;
use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::Error,
    http::header::HeaderValue,
    web::Data,
};

use crate::{core::configuration::Configuration, net::replace_body};

const DEFAULT_PAGE_MIME: &str = "text/html; charset=utf-8";

/// Serves the custom error page named by `X-ErrPageUrl` in place of the
/// original error body, keeping the requested url, status code and headers.
pub struct ErrorPageRewrite;

pub struct ErrorPageRewriteService<S> {
    service: S,
}

impl<S, B> Transform<S, ServiceRequest> for ErrorPageRewrite
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse;
    type Error = Error;
    type Transform = ErrorPageRewriteService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ErrorPageRewriteService { service }))
    }
}

impl<S, B> Service<ServiceRequest> for ErrorPageRewriteService<S>
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
        let conf = req.app_data::<Data<Configuration>>().cloned();

        let fut = self.service.call(req);

        Box::pin(async move {
            let res = fut.await?;

            let page_url = res
                .headers()
                .get(X_ERR_PAGE_URL)
                .and_then(|f| std::str::from_utf8(f.as_bytes()).ok())
                .map(str::to_owned);

            let page = match (page_url, conf) {
                (Some(url), Some(conf)) => {
                    page_file(conf.virtual_path(), conf.static_path(), &url)
                }
                _ => None,
            };
            let Some(page) = page else {
                return Ok(res.map_into_boxed_body());
            };

            let content = match tokio::fs::read(&page).await {
                Ok(content) => content,
                Err(err) => {
                    tracing::warn!("failed to read error page {page:?}: {err}");
                    return Ok(res.map_into_boxed_body());
                }
            };

            let mime = page
                .extension()
                .and_then(|f| f.to_str())
                .map(|ext| file_extension_to_mime(ext).to_string())
                .and_then(|mime| HeaderValue::from_str(&mime).ok())
                .unwrap_or(HeaderValue::from_static(DEFAULT_PAGE_MIME));

            tracing::debug!("rewriting {} response with {page:?}", res.status());
            let (req, res) = res.into_parts();
            let res = replace_body(&res, content, mime);
            Ok(ServiceResponse::new(req, res))
        })
    }
}

/// Maps an error page url to a file below the static directory.
///
/// Urls outside the application and urls escaping the directory map to nothing.
fn page_file(virtual_path: &str, static_path: &str, url: &str) -> Option<PathBuf> {
    let prefix = virtual_path.trim_end_matches('/');
    let relative = url.strip_prefix(prefix)?;
    let relative = relative.strip_prefix('/').filter(|f| !f.is_empty())?;

    let relative = Path::new(relative);
    if !relative
        .components()
        .all(|f| matches!(f, Component::Normal(_)))
    {
        return None;
    }
    Some(Path::new(static_path).join(relative))
}
