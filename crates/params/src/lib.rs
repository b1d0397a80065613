//! Declarative extraction and validation of HTTP request parameters.
//!
//! Handlers declare the inputs they expect, each with a name, a source (form body,
//! JSON body, query string, header or path variable), a type (integer, string, float or
//! boolean) and presence/length constraints. One call then extracts and validates all of
//! them, and the handler only reads typed values afterwards.
//!
//! # Example
//!
//! ```
//! use bytes::Bytes;
//! use http_body_util::Full;
//! use micro_params::{ParamSource, PathParams, RequestContext};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut request = http::Request::builder()
//!     .method(http::Method::PUT)
//!     .uri("/users/42?notify=true")
//!     .header(http::header::CONTENT_TYPE, "application/json")
//!     .body(Full::new(Bytes::from_static(br#"{"name": "Ann", "age": 30}"#)))
//!     .unwrap();
//!
//! // normally done by the router
//! request.extensions_mut().insert::<PathParams>([("id", "42")].into_iter().collect());
//!
//! let mut ctx = RequestContext::from_request(request);
//! ctx.register::<i64>("id", "E_ID", ParamSource::Path, true)
//!     .register::<bool>("notify", "E_NOTIFY", ParamSource::Query, false)
//!     .register::<i64>("age", "E_AGE", ParamSource::JsonBody, false)
//!     .register_string("name", "E_NAME", ParamSource::JsonBody, true, 1, 64);
//!
//! if ctx.validate().await {
//!     assert_eq!(ctx.param("id").unwrap().as_int(), 42);
//!     assert!(ctx.param("notify").unwrap().as_bool());
//!     assert_eq!(ctx.param("name").unwrap().as_str(), "Ann");
//! } else {
//!     panic!("rejected: {:?} {:?}", ctx.error_codes(), ctx.errors());
//! }
//! # }
//! ```
//!
//! # Errors
//!
//! Invalid or missing parameters are reported through
//! [`RequestContext::error_codes`], one caller-defined code per failed parameter.
//! Failures to read or decode the request itself are [`ExtractError`]s, available from
//! [`RequestContext::errors`]; any of them fails validation outright.

mod body;
mod config;
mod context;
mod error;
mod extract;
mod param;
mod request;

pub mod validate;

pub use body::ResponseBody;
pub use config::{ContextConfig, ContextConfigBuilder};
pub use context::RequestContext;
pub use error::ExtractError;
pub use param::{Param, ParamKind, ParamSource, ParamType, ParamValue};
pub use request::PathParams;
pub use validate::Rejection;
