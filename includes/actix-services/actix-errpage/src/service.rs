use std::{net::SocketAddr, rc::Rc};

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, forward_ready},
    error::Error as ActixError,
};
use futures_core::future::LocalBoxFuture;

use super::annotate::{Annotation, ErrorContext, ErrorHeaderAnnotator};
use super::error::HttpStatus;

/// Assembled custom error page annotation service
pub struct ErrorPageService<S> {
    pub(crate) service: S,
    pub(crate) annotator: Rc<ErrorHeaderAnnotator>,
}

impl<S, B> Service<ServiceRequest> for ErrorPageService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let annotator = Rc::clone(&self.annotator);
        let local = is_local(req.peer_addr(), req.app_config().local_addr());
        let path = req.path().to_owned();

        let fut = self.service.call(req);
        Box::pin(async move {
            let mut res = fut.await?;

            let annotation = {
                let ctx = ErrorContext {
                    last_error: res.response().error().map(|err| err as &dyn HttpStatus),
                    custom_errors_enabled: annotator.custom_errors_enabled(local),
                };
                annotator.annotate(&ctx)
            };
            if annotation != Annotation::Untouched {
                tracing::debug!("annotating error response for {path}: {annotation:?}");
            }
            annotation.apply(res.response_mut());
            Ok(res)
        })
    }
}

/// Loopback peers and peers sharing the server address are local,
/// unknown peers never are.
fn is_local(peer: Option<SocketAddr>, local: SocketAddr) -> bool {
    peer.is_some_and(|addr| addr.ip().is_loopback() || addr.ip() == local.ip())
}
