//! Raw text extraction.
//!
//! Each parameter's raw value is read as text from its declared source, whatever that
//! source is, so that coercion and validation stay source-agnostic.

mod extract_body;
mod extract_header;
mod extract_url;

pub(crate) use extract_body::{decode_form, decode_json_object, is_form_content};
pub(crate) use extract_url::decode_query;

use crate::param::{Param, ParamSource};
use crate::request::PathParams;
use http::HeaderMap;
use serde_json::{Map, Value};

/// Borrowed view over everything a parameter can be read from.
#[derive(Debug)]
pub(crate) struct RequestSources<'a> {
    pub(crate) headers: &'a HeaderMap,
    pub(crate) query: &'a [(String, String)],
    pub(crate) form: &'a [(String, String)],
    pub(crate) json: Option<&'a Map<String, Value>>,
    pub(crate) path_params: &'a PathParams,
}

/// Returns the raw text for `param`, or an empty string when its source has no value.
///
/// Text from JSON bodies is returned as-is; every other source is trimmed.
pub(crate) fn extract_raw_text(sources: &RequestSources<'_>, param: &Param) -> String {
    let name = param.name();
    match param.source() {
        ParamSource::PostForm => trimmed(first_value(sources.form, name)),
        ParamSource::JsonBody => sources.json.map(|json| extract_body::json_text(json.get(name))).unwrap_or_default(),
        ParamSource::Query => trimmed(first_value(sources.query, name)),
        ParamSource::Header => trimmed(extract_header::header_value(sources.headers, name)),
        ParamSource::Path => trimmed(sources.path_params.get(name)),
    }
}

fn first_value<'a>(fields: &'a [(String, String)], name: &str) -> Option<&'a str> {
    fields.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
}

fn trimmed(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_owned()
}
