use actix_errpage::SkipDefaultErrorPage;
use actix_web::{
    HttpResponse,
    body::MessageBody,
    http::header::{CONTENT_LENGTH, CONTENT_TYPE, HeaderValue},
};

pub mod default_pages_middleware;
pub mod http_adapter;
pub mod page_rewrite_middleware;

/// Builds a response with a new body, keeping status, headers and the skip flag.
pub(crate) fn replace_body<B, T>(res: &HttpResponse<B>, body: T, content_type: HeaderValue) -> HttpResponse
where
    T: MessageBody + 'static,
{
    let mut headers = res.headers().clone();
    headers.remove(CONTENT_LENGTH);
    headers.insert(CONTENT_TYPE, content_type);

    let mut new = HttpResponse::with_body(res.status(), body).map_into_boxed_body();
    *new.headers_mut() = headers;

    let skip = res.extensions().get::<SkipDefaultErrorPage>().copied();
    if let Some(skip) = skip {
        new.extensions_mut().insert(skip);
    }
    new
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_replace_body() {
        let mut res = HttpResponse::NotFound()
            .insert_header(("x-customerrorpage", "Yes"))
            .insert_header((CONTENT_LENGTH, "3"))
            .body("old");
        res.extensions_mut().insert(SkipDefaultErrorPage(true));

        let new = replace_body(&res, "new body", HeaderValue::from_static("text/html"));
        assert_eq!(new.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            new.headers().get("x-customerrorpage"),
            Some(&HeaderValue::from_static("Yes"))
        );
        assert_eq!(
            new.headers().get(CONTENT_TYPE),
            Some(&HeaderValue::from_static("text/html"))
        );
        assert!(new.headers().get(CONTENT_LENGTH).is_none());
        assert_eq!(
            new.extensions().get::<SkipDefaultErrorPage>(),
            Some(&SkipDefaultErrorPage(true))
        );
    }
}
