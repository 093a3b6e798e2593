//! Custom error configuration consumed by the annotator

use actix_web::http::StatusCode;
use serde::Deserialize;

/// Application setting controlling [`Settings::try_skip_default_errors`].
pub const TRY_SKIP_SETTING: &str = "TrySkipIisCustomErrors";

/// Decides when custom error pages are used at all.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum CustomErrorsMode {
    #[serde(alias = "on")]
    On,
    #[serde(alias = "off")]
    Off,
    /// Custom pages for remote clients only, local clients get the raw error.
    #[default]
    #[serde(alias = "remote_only", alias = "remoteonly")]
    RemoteOnly,
}

impl CustomErrorsMode {
    /// Whether custom error pages apply to a client of the given locality
    pub fn enabled_for(self, is_local: bool) -> bool {
        match self {
            Self::On => true,
            Self::Off => false,
            Self::RemoteOnly => !is_local,
        }
    }
}

/// How the custom error page is delivered to the client.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum RedirectMode {
    /// Send a redirect to the error page.
    #[default]
    #[serde(alias = "response_redirect", alias = "redirect")]
    ResponseRedirect,
    /// Serve the error page content in place, keeping the requested url.
    #[serde(alias = "response_rewrite", alias = "rewrite")]
    ResponseRewrite,
}

/// Per-status redirect entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CustomError {
    pub status_code: u16,
    pub redirect: String,
}

/// Custom errors configuration section
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct CustomErrorsSection {
    #[serde(default)]
    pub mode: CustomErrorsMode,
    #[serde(default)]
    pub redirect_mode: RedirectMode,
    pub default_redirect: Option<String>,
    #[serde(default)]
    pub errors: Vec<CustomError>,
}

impl CustomErrorsSection {
    #[inline]
    pub fn is_rewrite(&self) -> bool {
        self.redirect_mode == RedirectMode::ResponseRewrite
    }

    /// Redirect target for the given status, falling back to the default redirect.
    pub fn redirect_for(&self, status: StatusCode) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.status_code == status.as_u16())
            .map(|e| e.redirect.as_str())
            .or(self.default_redirect.as_deref())
    }
}

/// Annotator settings injected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Ask the host not to substitute its own generic error page.
    ///
    /// Defaults to `true`.
    pub try_skip_default_errors: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            try_skip_default_errors: true,
        }
    }
}

impl Settings {
    /// Builds settings from the raw [`TRY_SKIP_SETTING`] value.
    ///
    /// A missing value and a value that is not a boolean both keep the default.
    pub fn from_app_setting(raw: Option<&str>) -> Self {
        let try_skip_default_errors = raw.and_then(parse_bool).unwrap_or(true);
        Self {
            try_skip_default_errors,
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default() {
        assert!(Settings::default().try_skip_default_errors);
        assert!(Settings::from_app_setting(None).try_skip_default_errors);
        assert!(Settings::from_app_setting(Some("yes please")).try_skip_default_errors);
        assert!(Settings::from_app_setting(Some("")).try_skip_default_errors);
    }

    #[test]
    fn test_settings_parse() {
        assert!(!Settings::from_app_setting(Some("false")).try_skip_default_errors);
        assert!(!Settings::from_app_setting(Some(" False ")).try_skip_default_errors);
        assert!(Settings::from_app_setting(Some("TRUE")).try_skip_default_errors);
    }

    #[test]
    fn test_mode_enabled() {
        assert!(CustomErrorsMode::On.enabled_for(true));
        assert!(!CustomErrorsMode::Off.enabled_for(false));
        assert!(!CustomErrorsMode::RemoteOnly.enabled_for(true));
        assert!(CustomErrorsMode::RemoteOnly.enabled_for(false));
        assert_eq!(CustomErrorsMode::default(), CustomErrorsMode::RemoteOnly);
    }

    #[test]
    fn test_redirect_lookup() {
        let section = CustomErrorsSection {
            default_redirect: Some("~/generic.html".to_string()),
            errors: vec![CustomError {
                status_code: 404,
                redirect: "~/404.html".to_string(),
            }],
            ..Default::default()
        };
        assert_eq!(section.redirect_for(StatusCode::NOT_FOUND), Some("~/404.html"));
        assert_eq!(
            section.redirect_for(StatusCode::SERVICE_UNAVAILABLE),
            Some("~/generic.html")
        );

        let section = CustomErrorsSection::default();
        assert_eq!(section.redirect_for(StatusCode::NOT_FOUND), None);
        assert!(!section.is_rewrite());
    }

    #[test]
    fn test_section_yaml() {
        let section: CustomErrorsSection = serde_yaml::from_str(
            r#"
            mode: On
            redirect_mode: ResponseRewrite
            default_redirect: ~/generic.html
            errors:
              - status_code: 404
                redirect: ~/404.html
            "#,
        )
        .expect("invalid section");
        assert_eq!(section.mode, CustomErrorsMode::On);
        assert!(section.is_rewrite());
        assert_eq!(section.errors.len(), 1);
    }
}
