use actix_errpage::HttpError;
use actix_files::Files;
use actix_web::{
    App, HttpResponse, HttpServer,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse, fn_service},
    web,
};

use crate::{
    core::configuration::Configuration,
    net::{
        default_pages_middleware::DefaultErrorPages, page_rewrite_middleware::ErrorPageRewrite,
    },
};

const DEFAULT_DOCUMENT: &str = "index.html";

pub struct HttpAdapter<'a> {
    configuration: &'a Configuration,
}

impl<'a> HttpAdapter<'a> {
    pub fn new(configuration: &'a Configuration) -> Self {
        Self { configuration }
    }

    pub async fn run(&self) -> Result<(), std::io::Error> {
        let host = self.configuration.host();
        let port = self.configuration.port();
        let conf = self.configuration.clone();

        tracing::info!(
            "serving {} at {} on {host}:{port}",
            conf.static_path(),
            conf.virtual_path()
        );

        HttpServer::new(move || app(conf.clone()))
            .bind(format!("{host}:{port}"))?
            .run()
            .await
    }
}

/// Assembles the application: static files behind the error page stages.
///
/// The annotator sits innermost so it sees the recorded error first, the
/// generic error pages outermost so they only fill in what is left.
pub fn app(
    conf: Configuration,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let annotator = conf.annotator();
    let virtual_path = conf.virtual_path().to_string();
    let static_path = conf.static_path().to_string();

    App::new()
        .app_data(web::Data::new(conf))
        .wrap(annotator.middleware())
        .wrap(ErrorPageRewrite)
        .wrap(DefaultErrorPages)
        .configure(|cfg: &mut web::ServiceConfig| config(cfg, &virtual_path, &static_path))
        .default_service(web::to(not_found))
}

fn config(cfg: &mut web::ServiceConfig, virtual_path: &str, static_path: &str) {
    cfg.service(
        Files::new(virtual_path, static_path)
            .index_file(DEFAULT_DOCUMENT)
            .use_last_modified(true)
            .prefer_utf8(true)
            .default_handler(fn_service(|req: ServiceRequest| async move {
                let (req, _pl) = req.into_parts();
                Ok::<_, actix_web::Error>(ServiceResponse::from_err(HttpError::not_found(), req))
            })),
    );
}

async fn not_found() -> Result<HttpResponse, HttpError> {
    Err(HttpError::not_found())
}
