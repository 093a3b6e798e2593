//! Actix-Web middleware reporting the real HTTP status behind rewritten custom error pages.
//!
//! When a request fails and custom errors are served in place (`ResponseRewrite`),
//! the middleware restores the status code of the original error and describes
//! the page that stands in for it:
//!
//! * `X-CustomErrorPage: Yes` and `X-ErrPageUrl: <page>` when a custom page applies
//! * `X-CustomErrorPage: No` when custom errors are disabled for the client
//!
//! It also attaches a [`SkipDefaultErrorPage`] response extension so outer
//! error page handlers can leave the custom page alone.
//!
//! # Example
//!
//! ```
//! use actix_web::App;
//! use actix_errpage::{
//!     CustomError, CustomErrorsMode, CustomErrorsSection, ErrorHeaderAnnotator, RedirectMode,
//!     Settings,
//! };
//!
//! let section = CustomErrorsSection {
//!     mode: CustomErrorsMode::On,
//!     redirect_mode: RedirectMode::ResponseRewrite,
//!     default_redirect: Some("~/generic.html".to_string()),
//!     errors: vec![CustomError { status_code: 404, redirect: "~/404.html".to_string() }],
//! };
//!
//! let app = App::new().wrap(
//!     ErrorHeaderAnnotator::new(Some(section))
//!         .settings(Settings::from_app_setting(Some("true")))
//!         .virtual_path("/site/")
//!         .middleware(),
//! );
//! ```
mod annotate;
mod config;
mod error;
mod factory;
mod service;

pub use annotate::{
    Annotation, ErrorContext, ErrorHeaderAnnotator, SkipDefaultErrorPage, X_CUSTOM_ERROR_PAGE,
    X_ERR_PAGE_URL, resolve_url,
};
pub use config::{
    CustomError, CustomErrorsMode, CustomErrorsSection, RedirectMode, Settings, TRY_SKIP_SETTING,
};
pub use error::{HttpError, HttpStatus};
pub use factory::Middleware;
pub use service::ErrorPageService;
