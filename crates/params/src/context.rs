//! Request-scoped parameter context.
//!
//! A [`RequestContext`] is built once per request. Handler setup code registers one
//! [`Param`] per expected input, then a single [`RequestContext::validate`] call
//! extracts, coerces and checks all of them. Failures land in one of two channels:
//!
//! - error codes: the configured code of every parameter that was missing or invalid,
//!   meant to be reported back to the client
//! - raw errors: [`ExtractError`]s raised while reading or decoding the request itself,
//!   which fail the whole pass before any parameter is looked at
//!
//! The request body is read at most once per context and the JSON object parsed from it
//! is cached, no matter how many body-sourced parameters are registered.
//!
//! # Example
//! ```
//! # use micro_params::{ParamSource, RequestContext};
//! # use http_body_util::Empty;
//! # use bytes::Bytes;
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let request = http::Request::builder().uri("/items?page=7").body(Empty::<Bytes>::new()).unwrap();
//!
//! let mut ctx = RequestContext::from_request(request);
//! ctx.register::<i64>("page", "E_PAGE", ParamSource::Query, true)
//!     .register::<String>("trace", "E_TRACE", ParamSource::Header, false);
//!
//! assert!(ctx.validate().await);
//! assert_eq!(ctx.param("page").map(|p| p.as_int()), Some(7));
//! # }
//! ```

use crate::body::{OptionReqBody, ResponseBody};
use crate::config::ContextConfig;
use crate::error::ExtractError;
use crate::extract::{self, RequestSources};
use crate::param::{Param, ParamKind, ParamSource, ParamType};
use crate::request::PathParams;
use crate::validate::validate_param;
use bytes::Bytes;
use http::request::Parts;
use http::{HeaderMap, Method, Request, Response, StatusCode, Uri};
use http_body::Body as HttpBody;
use once_cell::unsync::OnceCell;
use serde_json::{Map, Value};
use std::error::Error;
use tracing::{debug, trace, warn};

/// Parameters declared for one request, the request they are read from and the
/// response the handler is building.
#[derive(Debug)]
pub struct RequestContext<B> {
    parts: Parts,
    body: OptionReqBody<B>,
    path_params: PathParams,
    response: Response<ResponseBody>,
    config: ContextConfig,

    params: Vec<Param>,
    error_codes: Vec<String>,
    errors: Vec<ExtractError>,

    query: OnceCell<Vec<(String, String)>>,
    body_bytes: Option<Bytes>,
    json: Option<Map<String, Value>>,
    form: Option<Vec<(String, String)>>,
}

impl<B> RequestContext<B> {
    /// Creates a context for `request`, owning `response` on behalf of the handler.
    ///
    /// A [`PathParams`] placed in the request extensions by the router is taken over by
    /// the context. Nothing is read from the request until [`RequestContext::validate`].
    pub fn new(response: Response<ResponseBody>, request: Request<B>) -> Self {
        let (mut parts, body) = request.into_parts();
        let path_params = parts.extensions.remove::<PathParams>().unwrap_or_default();

        Self {
            parts,
            body: OptionReqBody::from(body),
            path_params,
            response,
            config: ContextConfig::default(),
            params: Vec::new(),
            error_codes: Vec::new(),
            errors: Vec::new(),
            query: OnceCell::new(),
            body_bytes: None,
            json: None,
            form: None,
        }
    }

    /// Creates a context with an empty `200 OK` response.
    pub fn from_request(request: Request<B>) -> Self {
        Self::new(Response::new(ResponseBody::empty()), request)
    }

    #[must_use]
    pub fn with_config(mut self, config: ContextConfig) -> Self {
        self.config = config;
        self
    }

    /// Declares a parameter of type `T`, replacing any parameter already registered as `name`.
    pub fn register<T: ParamKind>(
        &mut self,
        name: impl Into<String>,
        invalid_error_code: impl Into<String>,
        source: ParamSource,
        required: bool,
    ) -> &mut Self {
        self.insert(Param::new(name, invalid_error_code, source, T::DATA_TYPE, required))
    }

    /// Declares a string parameter with byte length bounds, zero meaning unbounded.
    ///
    /// The bounds are stored and enforced, but only when `required` is set: an optional
    /// string is never length checked.
    pub fn register_string(
        &mut self,
        name: impl Into<String>,
        invalid_error_code: impl Into<String>,
        source: ParamSource,
        required: bool,
        min_length: usize,
        max_length: usize,
    ) -> &mut Self {
        let param = Param::new(name, invalid_error_code, source, ParamType::String, required);
        self.insert(param.with_length(min_length, max_length))
    }

    /// Adds a prebuilt descriptor. A descriptor with the same name is discarded along
    /// with its outcome, and the new one takes its place in validation order.
    pub fn insert(&mut self, param: Param) -> &mut Self {
        match self.params.iter_mut().find(|p| p.name() == param.name()) {
            Some(existing) => *existing = param,
            None => self.params.push(param),
        }
        self
    }

    pub fn param(&self, name: &str) -> Option<&Param> {
        self.params.iter().find(|p| p.name() == name)
    }

    /// Iterates over the registered parameters in registration order.
    pub fn params(&self) -> impl Iterator<Item = &Param> {
        self.params.iter()
    }

    /// Codes of the parameters that failed the last validation, in registration order.
    pub fn error_codes(&self) -> &[String] {
        &self.error_codes
    }

    /// Failures reading or decoding the request.
    pub fn errors(&self) -> &[ExtractError] {
        &self.errors
    }

    pub fn has_raw_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Suggested response status after validation: `500` for raw errors, `400` for
    /// invalid parameters, `None` when everything passed.
    pub fn failure_status(&self) -> Option<StatusCode> {
        if self.has_raw_errors() {
            Some(StatusCode::INTERNAL_SERVER_ERROR)
        } else if !self.error_codes.is_empty() {
            Some(StatusCode::BAD_REQUEST)
        } else {
            None
        }
    }

    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    pub fn method(&self) -> &Method {
        &self.parts.method
    }

    pub fn uri(&self) -> &Uri {
        &self.parts.uri
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.parts.headers
    }

    pub fn path_params(&self) -> &PathParams {
        &self.path_params
    }

    pub fn path_params_mut(&mut self) -> &mut PathParams {
        &mut self.path_params
    }

    pub fn response(&self) -> &Response<ResponseBody> {
        &self.response
    }

    pub fn response_mut(&mut self) -> &mut Response<ResponseBody> {
        &mut self.response
    }

    pub fn into_response(self) -> Response<ResponseBody> {
        self.response
    }

    fn record_error(&mut self, e: ExtractError) {
        warn!(cause = %e, "failed to extract request params");
        self.errors.push(e);
    }
}

impl<B> RequestContext<B>
where
    B: HttpBody<Data = Bytes>,
    B::Error: Into<Box<dyn Error + Send + Sync>>,
{
    /// Extracts, coerces and checks every registered parameter.
    ///
    /// Returns `false` straight away when a raw error has been recorded, including one
    /// raised while reading the body for this call; in that case no parameter outcome is
    /// touched. With no parameters registered this is vacuously `true`. Otherwise every
    /// parameter is validated independently and the result is `true` iff no error code
    /// was recorded.
    pub async fn validate(&mut self) -> bool {
        if self.has_raw_errors() {
            return false;
        }
        if self.params.is_empty() {
            return true;
        }

        trace!(params = self.params.len(), "validating request params");
        self.load_body_sources().await;
        if self.has_raw_errors() {
            return false;
        }

        self.error_codes.clear();
        let sources = RequestSources {
            headers: &self.parts.headers,
            query: self.query.get_or_init(|| extract::decode_query(self.parts.uri.query())),
            form: self.form.as_deref().unwrap_or_default(),
            json: self.json.as_ref(),
            path_params: &self.path_params,
        };

        for param in &mut self.params {
            param.reset_outcome();
            let raw = extract::extract_raw_text(&sources, param);
            if let Err(rejection) = validate_param(param, raw) {
                debug!(
                    param = param.name(),
                    source = %param.source(),
                    code = param.invalid_error_code(),
                    reason = %rejection,
                    "param rejected"
                );
                self.error_codes.push(param.invalid_error_code().to_owned());
                param.reject(rejection);
            }
        }

        self.error_codes.is_empty()
    }

    // Reads and decodes the body up front so that a body failure is known before any
    // parameter outcome is written.
    async fn load_body_sources(&mut self) {
        let wants_json = self.params.iter().any(|p| p.source() == ParamSource::JsonBody);
        let wants_form = self.params.iter().any(|p| p.source() == ParamSource::PostForm)
            && (!self.config.strict_form_content_type() || extract::is_form_content(&self.parts.headers));

        if !(wants_json && self.json.is_none()) && !(wants_form && self.form.is_none()) {
            return;
        }

        let Some(bytes) = self.body_bytes().await else {
            return;
        };

        if wants_json && self.json.is_none() {
            match extract::decode_json_object(&bytes) {
                Ok(json) => self.json = Some(json),
                Err(e) => self.record_error(e),
            }
        }

        if wants_form && self.form.is_none() {
            match extract::decode_form(&bytes) {
                Ok(form) => self.form = Some(form),
                Err(e) => self.record_error(e),
            }
        }
    }

    async fn body_bytes(&mut self) -> Option<Bytes> {
        if let Some(bytes) = &self.body_bytes {
            return Some(bytes.clone());
        }

        match self.body.read_to_bytes(self.config.max_body_size()).await {
            Ok(bytes) => {
                self.body_bytes = Some(bytes.clone());
                Some(bytes)
            }
            Err(e) => {
                self.record_error(e);
                None
            }
        }
    }
}
