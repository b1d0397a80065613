use bytes::Bytes;
use http::{Method, Request, StatusCode};
use http_body_util::Full;
use micro_params::{ParamSource, PathParams, RequestContext};
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::DEBUG).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let mut router = matchit::Router::new();
    router.insert("/users/{id}", "update_user").expect("route is valid");

    let requests = [
        user_request("/users/42?notify=1", r#"{"name": "Ann", "age": 30}"#),
        user_request("/users/abc", r#"{"name": "A", "age": "old"}"#),
        user_request("/users/7", r#"{"name": "Ann""#),
    ];

    for mut request in requests {
        let path = request.uri().path().to_owned();
        let Ok(matched) = router.at(&path) else {
            error!(path, "no route");
            continue;
        };
        request.extensions_mut().insert(PathParams::from(matched.params));

        let mut ctx = RequestContext::from_request(request);
        ctx.register::<i64>("id", "E_USER_ID", ParamSource::Path, true)
            .register::<bool>("notify", "E_NOTIFY", ParamSource::Query, false)
            .register::<i64>("age", "E_AGE", ParamSource::JsonBody, false)
            .register_string("name", "E_NAME", ParamSource::JsonBody, true, 2, 32);

        if ctx.validate().await {
            let id = ctx.param("id").map(|p| p.as_int());
            let name = ctx.param("name").map(|p| p.as_str().to_owned());
            info!(handler = *matched.value, ?id, ?name, "params accepted");
        } else {
            let status = ctx.failure_status().unwrap_or(StatusCode::BAD_REQUEST);
            info!(%status, codes = ?ctx.error_codes(), errors = ?ctx.errors(), "params rejected");
        }
    }
}

fn user_request(uri: &str, json: &'static str) -> Request<Full<Bytes>> {
    Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
        .body(Full::new(Bytes::from_static(json.as_bytes())))
        .expect("request is valid")
}
