use std::future::{Ready, ready};
use std::rc::Rc;

use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
};

use crate::annotate::ErrorHeaderAnnotator;
use crate::service::ErrorPageService;

/// Custom error page annotation middleware
///
/// `Middleware` must be registered with `App::wrap()` method and runs
/// once per request, right before the response heads back to the client.
///
/// # Examples
///
/// ```
/// use actix_web::App;
/// use actix_errpage::{ErrorHeaderAnnotator, Middleware};
///
/// let app = App::new().wrap(Middleware::new(ErrorHeaderAnnotator::new(None)));
/// ```
pub struct Middleware(Rc<ErrorHeaderAnnotator>);

impl Middleware {
    /// Creates a new annotation middleware instance
    #[inline]
    pub fn new(annotator: ErrorHeaderAnnotator) -> Self {
        Self(Rc::new(annotator))
    }
}

impl From<ErrorHeaderAnnotator> for Middleware {
    #[inline]
    fn from(value: ErrorHeaderAnnotator) -> Self {
        Self::new(value)
    }
}

impl<S, B> Transform<S, ServiceRequest> for Middleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = ErrorPageService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ErrorPageService {
            service,
            annotator: self.0.clone(),
        }))
    }
}
