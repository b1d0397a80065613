//! Parameter descriptors.
//!
//! A [`Param`] declares one expected request input: its name, where it is read from,
//! which type it is coerced to and the constraints it must satisfy. After
//! [`RequestContext::validate`](crate::RequestContext::validate) runs, the descriptor
//! also carries the outcome: the raw text, whether a value is present, whether the
//! descriptor is still valid, and the coerced [`ParamValue`].

use crate::validate::Rejection;
use std::fmt;

/// Where the raw value of a parameter is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamSource {
    /// A field of an `application/x-www-form-urlencoded` body.
    PostForm,
    /// A top level field of a JSON object body.
    JsonBody,
    /// A query string parameter.
    Query,
    /// A request header.
    Header,
    /// A path-template variable bound by the router, e.g. `id` in `/users/{id}`.
    Path,
}

impl fmt::Display for ParamSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PostForm => write!(f, "form"),
            Self::JsonBody => write!(f, "json"),
            Self::Query => write!(f, "query"),
            Self::Header => write!(f, "header"),
            Self::Path => write!(f, "path"),
        }
    }
}

/// The type a parameter's raw text is coerced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    Int,
    String,
    Float,
    Bool,
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int => write!(f, "int"),
            Self::String => write!(f, "string"),
            Self::Float => write!(f, "float"),
            Self::Bool => write!(f, "bool"),
        }
    }
}

/// A coerced parameter value, tagged by its [`ParamType`].
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Int(i64),
    String(String),
    Float(f64),
    Bool(bool),
}

impl ParamValue {
    pub fn data_type(&self) -> ParamType {
        match self {
            Self::Int(_) => ParamType::Int,
            Self::String(_) => ParamType::String,
            Self::Float(_) => ParamType::Float,
            Self::Bool(_) => ParamType::Bool,
        }
    }
}

/// Rust types a parameter can be registered as.
///
/// # Example
/// ```
/// use micro_params::{ParamKind, ParamType};
///
/// assert_eq!(<i64 as ParamKind>::DATA_TYPE, ParamType::Int);
/// assert_eq!(<String as ParamKind>::DATA_TYPE, ParamType::String);
/// ```
pub trait ParamKind {
    const DATA_TYPE: ParamType;
}

impl ParamKind for i64 {
    const DATA_TYPE: ParamType = ParamType::Int;
}

impl ParamKind for String {
    const DATA_TYPE: ParamType = ParamType::String;
}

impl ParamKind for f64 {
    const DATA_TYPE: ParamType = ParamType::Float;
}

impl ParamKind for bool {
    const DATA_TYPE: ParamType = ParamType::Bool;
}

/// Declaration of one expected request parameter together with its validation outcome.
#[derive(Debug, Clone)]
pub struct Param {
    name: String,
    invalid_error_code: String,
    source: ParamSource,
    data_type: ParamType,
    required: bool,
    min_length: usize,
    max_length: usize,

    raw: String,
    present: bool,
    valid: bool,
    value: Option<ParamValue>,
    rejection: Option<Rejection>,
}

impl Param {
    /// Creates a descriptor with no length bounds.
    pub fn new(
        name: impl Into<String>,
        invalid_error_code: impl Into<String>,
        source: ParamSource,
        data_type: ParamType,
        required: bool,
    ) -> Self {
        Self {
            name: name.into(),
            invalid_error_code: invalid_error_code.into(),
            source,
            data_type,
            required,
            min_length: 0,
            max_length: 0,
            raw: String::new(),
            present: false,
            valid: true,
            value: None,
            rejection: None,
        }
    }

    /// Sets byte length bounds, zero meaning unbounded.
    ///
    /// Bounds only take effect for required string parameters.
    #[must_use]
    pub fn with_length(mut self, min_length: usize, max_length: usize) -> Self {
        self.min_length = min_length;
        self.max_length = max_length;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn invalid_error_code(&self) -> &str {
        &self.invalid_error_code
    }

    pub fn source(&self) -> ParamSource {
        self.source
    }

    pub fn data_type(&self) -> ParamType {
        self.data_type
    }

    pub fn required(&self) -> bool {
        self.required
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// The text extracted from the request, empty when the source had nothing.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Whether a value was extracted and coerced successfully.
    pub fn present(&self) -> bool {
        self.present
    }

    /// False once this parameter has failed validation.
    pub fn valid(&self) -> bool {
        self.valid
    }

    /// Why validation failed, if it did.
    pub fn rejection(&self) -> Option<&Rejection> {
        self.rejection.as_ref()
    }

    /// Returns the coerced value, or `None` unless the parameter is both present and valid.
    pub fn value(&self) -> Option<&ParamValue> {
        if self.present && self.valid { self.value.as_ref() } else { None }
    }

    /// Returns the integer value.
    ///
    /// # Panics
    /// Panics if the parameter is not a present, valid integer. Check [`Param::present`]
    /// and [`Param::valid`] first.
    pub fn as_int(&self) -> i64 {
        match self.value() {
            Some(ParamValue::Int(value)) => *value,
            _ => self.contract_violation(ParamType::Int),
        }
    }

    /// Returns the float value.
    ///
    /// # Panics
    /// Panics if the parameter is not a present, valid float.
    pub fn as_float(&self) -> f64 {
        match self.value() {
            Some(ParamValue::Float(value)) => *value,
            _ => self.contract_violation(ParamType::Float),
        }
    }

    /// Returns the string value.
    ///
    /// # Panics
    /// Panics if the parameter is not a present, valid string.
    pub fn as_str(&self) -> &str {
        match self.value() {
            Some(ParamValue::String(value)) => value,
            _ => self.contract_violation(ParamType::String),
        }
    }

    /// Returns the boolean value.
    ///
    /// # Panics
    /// Panics if the parameter is not a present, valid boolean.
    pub fn as_bool(&self) -> bool {
        match self.value() {
            Some(ParamValue::Bool(value)) => *value,
            _ => self.contract_violation(ParamType::Bool),
        }
    }

    fn contract_violation(&self, expected: ParamType) -> ! {
        let held = self.value.as_ref().map_or(self.data_type, ParamValue::data_type);
        panic!(
            "param `{}` read as {} but it is {} (present: {}, valid: {})",
            self.name, expected, held, self.present, self.valid
        )
    }

    pub(crate) fn reset_outcome(&mut self) {
        self.raw.clear();
        self.present = false;
        self.valid = true;
        self.value = None;
        self.rejection = None;
    }

    pub(crate) fn set_raw(&mut self, raw: String) {
        self.raw = raw;
    }

    pub(crate) fn set_present_value(&mut self, value: ParamValue) {
        self.present = true;
        self.value = Some(value);
    }

    pub(crate) fn reject(&mut self, rejection: Rejection) {
        self.valid = false;
        self.rejection = Some(rejection);
    }
}
