//! Error header annotation decisions

use actix_web::{
    HttpResponse,
    http::{
        StatusCode,
        header::{HeaderName, HeaderValue},
    },
};

use crate::{
    Middleware,
    config::{CustomErrorsSection, Settings},
    error::HttpStatus,
};

/// `X-CustomErrorPage` response header
pub const X_CUSTOM_ERROR_PAGE: HeaderName = HeaderName::from_static("x-customerrorpage");
/// `X-ErrPageUrl` response header
pub const X_ERR_PAGE_URL: HeaderName = HeaderName::from_static("x-errpageurl");

const DEFAULT_VIRTUAL_PATH: &str = "/";

/// Response extension asking the host to keep the body as is
/// instead of substituting its own generic error page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkipDefaultErrorPage(pub bool);

/// Per-request state read by [`ErrorHeaderAnnotator::annotate`]
pub struct ErrorContext<'a> {
    pub last_error: Option<&'a dyn HttpStatus>,
    pub custom_errors_enabled: bool,
}

/// Outcome of a single annotation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    /// Response is left untouched.
    Untouched,
    /// Custom error pages are disabled for this request.
    Disabled,
    /// Custom error page served in place.
    Rewrite {
        status: StatusCode,
        skip_default_errors: bool,
        page_url: Option<String>,
    },
}

impl Annotation {
    /// Writes the annotation into the outgoing response.
    pub fn apply<B>(&self, res: &mut HttpResponse<B>) {
        match self {
            Self::Untouched => {}
            Self::Disabled => {
                res.headers_mut()
                    .insert(X_CUSTOM_ERROR_PAGE, HeaderValue::from_static("No"));
            }
            Self::Rewrite {
                status,
                skip_default_errors,
                page_url,
            } => {
                *res.status_mut() = *status;
                res.extensions_mut()
                    .insert(SkipDefaultErrorPage(*skip_default_errors));

                let Some(url) = page_url else {
                    return;
                };
                match HeaderValue::from_str(url) {
                    Ok(value) => {
                        res.headers_mut().insert(X_ERR_PAGE_URL, value);
                    }
                    Err(err) => tracing::warn!("error page url {url:?} is not a header: {err}"),
                }
                res.headers_mut()
                    .insert(X_CUSTOM_ERROR_PAGE, HeaderValue::from_static("Yes"));
            }
        }
    }
}

/// Reports the real status of errors answered with a rewritten custom error page.
///
/// # Examples
///
/// ```
/// use actix_web::App;
/// use actix_errpage::{CustomErrorsSection, ErrorHeaderAnnotator, RedirectMode};
///
/// let section = CustomErrorsSection {
///     redirect_mode: RedirectMode::ResponseRewrite,
///     default_redirect: Some("~/error.html".to_string()),
///     ..Default::default()
/// };
/// let annotator = ErrorHeaderAnnotator::new(Some(section)).virtual_path("/site/");
///
/// let app = App::new().wrap(annotator.middleware());
/// ```
#[derive(Debug, Clone)]
pub struct ErrorHeaderAnnotator {
    section: Option<CustomErrorsSection>,
    settings: Settings,
    virtual_path: String,
}

impl ErrorHeaderAnnotator {
    /// Creates a new annotator for an optional custom errors section
    pub fn new(section: Option<CustomErrorsSection>) -> Self {
        Self {
            section,
            settings: Settings::default(),
            virtual_path: DEFAULT_VIRTUAL_PATH.to_string(),
        }
    }

    /// Replaces the annotator [`Settings`]
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Configures the application root virtual path used to resolve `~/` targets
    pub fn virtual_path(mut self, path: impl Into<String>) -> Self {
        self.virtual_path = path.into();
        self
    }

    #[inline]
    pub fn section(&self) -> Option<&CustomErrorsSection> {
        self.section.as_ref()
    }

    /// Whether custom error pages apply to a client of the given locality.
    ///
    /// Without a section the host default mode applies.
    pub fn custom_errors_enabled(&self, is_local: bool) -> bool {
        self.section
            .as_ref()
            .map(|s| s.mode)
            .unwrap_or_default()
            .enabled_for(is_local)
    }

    /// Decides how the response for the given request state is annotated.
    pub fn annotate(&self, ctx: &ErrorContext<'_>) -> Annotation {
        let Some(err) = ctx.last_error else {
            return Annotation::Untouched;
        };
        if !ctx.custom_errors_enabled {
            return Annotation::Disabled;
        }
        let Some(section) = self.section.as_ref().filter(|s| s.is_rewrite()) else {
            return Annotation::Untouched;
        };

        let status = err
            .http_status()
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let page_url = section
            .redirect_for(status)
            .map(|target| resolve_url(&self.virtual_path, target));
        if page_url.is_none() {
            tracing::debug!("no custom error page configured for {status}");
        }

        Annotation::Rewrite {
            status,
            skip_default_errors: self.settings.try_skip_default_errors,
            page_url,
        }
    }

    /// Converts the annotator into Actix-Web middleware
    #[inline]
    pub fn middleware(self) -> Middleware {
        self.into()
    }
}

/// Resolves an error page target into an absolute application path.
///
/// Absolute targets are kept, `~/` is the application root.
pub fn resolve_url(virtual_path: &str, target: &str) -> String {
    if target.starts_with('/') {
        return target.to_string();
    }
    let target = target.strip_prefix("~/").unwrap_or(target);
    if virtual_path.ends_with('/') {
        format!("{virtual_path}{target}")
    } else {
        format!("{virtual_path}/{target}")
    }
}
