use actix_errpage::{CustomErrorsSection, ErrorHeaderAnnotator, Settings, TRY_SKIP_SETTING};
use serde::Deserialize;
use std::{collections::HashMap, path::Path};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HOST: &str = "localhost";
const DEFAULT_VIRTUAL_PATH: &str = "/";
const DEFAULT_STATIC_PATH: &str = "/var/www/html/";

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Configuration {
    pub network: Option<NetworkConfiguration>,
    pub application: Option<ApplicationConfiguration>,
    pub custom_errors: Option<CustomErrorsSection>,
    pub app_settings: Option<HashMap<String, String>>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct NetworkConfiguration {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ApplicationConfiguration {
    /// Root url of the application, `~/` error page targets resolve against it.
    pub virtual_path: Option<String>,
    /// Directory served under the virtual path.
    pub path: Option<String>,
}

impl Configuration {
    pub fn host(&self) -> String {
        self.network
            .as_ref()
            .and_then(|f| f.host.clone())
            .unwrap_or_else(|| DEFAULT_HOST.to_string())
    }

    pub fn port(&self) -> u16 {
        self.network
            .as_ref()
            .and_then(|f| f.port)
            .unwrap_or(DEFAULT_PORT)
    }

    pub fn virtual_path(&self) -> &str {
        self.application
            .as_ref()
            .and_then(|f| f.virtual_path.as_deref())
            .unwrap_or(DEFAULT_VIRTUAL_PATH)
    }

    pub fn static_path(&self) -> &str {
        self.application
            .as_ref()
            .and_then(|f| f.path.as_deref())
            .unwrap_or(DEFAULT_STATIC_PATH)
    }

    /// Returns the raw value of an application setting.
    pub fn app_setting(&self, key: &str) -> Option<&str> {
        self.app_settings
            .as_ref()
            .and_then(|f| f.get(key))
            .map(String::as_str)
    }

    /// Builds the error header annotator described by this configuration.
    pub fn annotator(&self) -> ErrorHeaderAnnotator {
        ErrorHeaderAnnotator::new(self.custom_errors.clone())
            .settings(Settings::from_app_setting(self.app_setting(TRY_SKIP_SETTING)))
            .virtual_path(self.virtual_path())
    }
}

/// Parses configuration content, the format is picked from the file extension.
pub fn parse_configuration(
    path: &str,
    content: &str,
) -> Result<Configuration, Box<dyn std::error::Error + Send + Sync>> {
    let extension = Path::new(path)
        .extension()
        .and_then(|f| f.to_str())
        .unwrap_or_default();

    let config = match extension {
        "toml" => toml::from_str::<Configuration>(content)?,
        _ => serde_yaml::from_str::<Configuration>(content)?,
    };
    Ok(config)
}

pub async fn load_configuration(
    path: &str,
) -> Result<Configuration, Box<dyn std::error::Error + Send + Sync>> {
    let res = tokio::fs::read_to_string(path)
        .await
        .map_err(|err| format!("failed to read configuration file {path}: {err}"))?;

    parse_configuration(path, &res)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_errpage::{CustomErrorsMode, RedirectMode};

    #[tokio::test]
    async fn test_load_configuration() {
        let config = load_configuration("config.yaml").await;
        assert!(config.is_ok());

        let config = config.unwrap();
        assert_eq!(config.virtual_path(), "/site/");
        assert_eq!(config.app_setting(TRY_SKIP_SETTING), Some("true"));

        let section = config.custom_errors.unwrap();
        assert_eq!(section.mode, CustomErrorsMode::On);
        assert_eq!(section.redirect_mode, RedirectMode::ResponseRewrite);
        assert_eq!(section.default_redirect.as_deref(), Some("~/generic.html"));
        assert_eq!(section.errors.len(), 1);
    }

    #[tokio::test]
    async fn test_load_missing_configuration() {
        let config = load_configuration("does-not-exist.yaml").await;
        assert!(config.is_err());
    }

    #[test]
    fn test_parse_toml() {
        let config = parse_configuration(
            "conf.toml",
            r#"
            [network]
            port = 9090

            [application]
            virtual_path = "/app"

            [custom_errors]
            mode = "RemoteOnly"
            redirect_mode = "ResponseRewrite"
            default_redirect = "~/oops.html"

            [[custom_errors.errors]]
            status_code = 500
            redirect = "/static/500.html"

            [app_settings]
            TrySkipIisCustomErrors = "false"
            "#,
        )
        .expect("invalid toml configuration");

        assert_eq!(config.port(), 9090);
        assert_eq!(config.host(), DEFAULT_HOST);
        assert_eq!(config.static_path(), DEFAULT_STATIC_PATH);
        let section = config.custom_errors.as_ref().unwrap();
        assert_eq!(section.mode, CustomErrorsMode::RemoteOnly);
        assert_eq!(section.errors[0].redirect, "/static/500.html");
        assert_eq!(config.app_setting(TRY_SKIP_SETTING), Some("false"));
    }

    #[test]
    fn test_defaults() {
        let config = parse_configuration("conf.yaml", "{}").expect("invalid yaml");
        assert_eq!(config.port(), DEFAULT_PORT);
        assert_eq!(config.virtual_path(), DEFAULT_VIRTUAL_PATH);
        assert!(config.custom_errors.is_none());
        assert!(config.app_setting(TRY_SKIP_SETTING).is_none());
    }

    #[test]
    fn test_invalid_configuration() {
        let config = parse_configuration("conf.yaml", "network: [1, 2");
        assert!(config.is_err());
    }
}
