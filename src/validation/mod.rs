//! Declarative request-body schemas.
//!
//! A schema is a static slice of [`Field`]s. [`validate`] walks the raw JSON
//! body against it and collects every failure instead of stopping at the
//! first one, so a client sees all problems at once. Keys that the schema
//! does not declare are rejected.

pub mod card;
pub mod shared;
pub mod user;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ApiError;

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0[2-9]\d{7,8}$").expect("phone pattern compiles"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\w.-]+@([\w-]+\.)+[\w-]{2,4}$").expect("email pattern compiles")
});

const PASSWORD_SPECIALS: &str = "@$!%*?&";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Israeli phone number: leading 0, then 8 or 9 digits
    Phone,
    Email,
    /// Absolute URL with a host
    Uri,
    /// At least one lowercase, uppercase, digit and one of `@$!%*?&`
    Password,
}

impl Format {
    pub fn matches(self, value: &str) -> bool {
        match self {
            Format::Phone => PHONE_RE.is_match(value),
            Format::Email => EMAIL_RE.is_match(value),
            Format::Uri => url::Url::parse(value).map(|u| u.has_host()).unwrap_or(false),
            Format::Password => is_strong_password(value),
        }
    }

    fn default_message(self, path: &str, value: &str) -> String {
        match self {
            Format::Email => format!("\"{path}\" must be a valid email"),
            Format::Uri => format!("\"{path}\" must be a valid uri"),
            Format::Phone | Format::Password => {
                format!("\"{path}\" with value \"{value}\" fails to match the required pattern")
            }
        }
    }
}

fn is_strong_password(value: &str) -> bool {
    let allowed = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SPECIALS.contains(c));
    allowed
        && value.chars().count() >= 6
        && value.chars().any(|c| c.is_ascii_lowercase())
        && value.chars().any(|c| c.is_ascii_uppercase())
        && value.chars().any(|c| c.is_ascii_digit())
        && value.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}

#[derive(Debug, Clone, Copy)]
pub enum Kind {
    String {
        min: Option<usize>,
        max: Option<usize>,
        allow_empty: bool,
        format: Option<Format>,
    },
    Integer,
    Boolean,
    Object(&'static [Field]),
}

/// Messages that replace the generic ones for a field.
#[derive(Debug, Clone, Copy)]
pub struct Messages {
    pub required: Option<&'static str>,
    pub min: Option<&'static str>,
    pub max: Option<&'static str>,
    pub format: Option<&'static str>,
}

impl Messages {
    const NONE: Messages = Messages {
        required: None,
        min: None,
        max: None,
        format: None,
    };
}

#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub key: &'static str,
    pub kind: Kind,
    pub required: bool,
    pub messages: Messages,
}

impl Field {
    const fn new(key: &'static str, kind: Kind) -> Self {
        Self {
            key,
            kind,
            required: false,
            messages: Messages::NONE,
        }
    }

    pub const fn string(key: &'static str) -> Self {
        Self::new(
            key,
            Kind::String {
                min: None,
                max: None,
                allow_empty: false,
                format: None,
            },
        )
    }

    pub const fn integer(key: &'static str) -> Self {
        Self::new(key, Kind::Integer)
    }

    pub const fn boolean(key: &'static str) -> Self {
        Self::new(key, Kind::Boolean)
    }

    pub const fn object(key: &'static str, fields: &'static [Field]) -> Self {
        Self::new(key, Kind::Object(fields))
    }

    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    pub const fn min(self, n: usize) -> Self {
        match self.kind {
            Kind::String {
                max,
                allow_empty,
                format,
                ..
            } => Self {
                kind: Kind::String {
                    min: Some(n),
                    max,
                    allow_empty,
                    format,
                },
                ..self
            },
            _ => self,
        }
    }

    pub const fn max(self, n: usize) -> Self {
        match self.kind {
            Kind::String {
                min,
                allow_empty,
                format,
                ..
            } => Self {
                kind: Kind::String {
                    min,
                    max: Some(n),
                    allow_empty,
                    format,
                },
                ..self
            },
            _ => self,
        }
    }

    pub const fn allow_empty(self) -> Self {
        match self.kind {
            Kind::String {
                min, max, format, ..
            } => Self {
                kind: Kind::String {
                    min,
                    max,
                    allow_empty: true,
                    format,
                },
                ..self
            },
            _ => self,
        }
    }

    pub const fn format(self, format: Format) -> Self {
        match self.kind {
            Kind::String {
                min,
                max,
                allow_empty,
                ..
            } => Self {
                kind: Kind::String {
                    min,
                    max,
                    allow_empty,
                    format: Some(format),
                },
                ..self
            },
            _ => self,
        }
    }

    pub const fn on_required(self, msg: &'static str) -> Self {
        Self {
            messages: Messages {
                required: Some(msg),
                ..self.messages
            },
            ..self
        }
    }

    pub const fn on_min(self, msg: &'static str) -> Self {
        Self {
            messages: Messages {
                min: Some(msg),
                ..self.messages
            },
            ..self
        }
    }

    pub const fn on_max(self, msg: &'static str) -> Self {
        Self {
            messages: Messages {
                max: Some(msg),
                ..self.messages
            },
            ..self
        }
    }

    pub const fn on_format(self, msg: &'static str) -> Self {
        Self {
            messages: Messages {
                format: Some(msg),
                ..self.messages
            },
            ..self
        }
    }
}

/// Check `body` against `schema`, aggregating all failures into one
/// `ValidationError`.
pub fn validate(schema: &[Field], body: &Value) -> Result<(), ApiError> {
    let mut errors = Vec::new();
    match body.as_object() {
        Some(map) => check_object(schema, map, "", &mut errors),
        None => errors.push((
            "value".to_string(),
            "\"value\" must be of type object".to_string(),
        )),
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation(errors))
    }
}

/// Validate, then deserialize into the typed payload.
pub fn parse<T: DeserializeOwned>(schema: &[Field], body: Value) -> Result<T, ApiError> {
    validate(schema, &body)?;
    serde_json::from_value(body).map_err(|e| ApiError::bad_request(format!("Invalid request body: {e}")))
}

fn check_object(
    schema: &[Field],
    map: &Map<String, Value>,
    prefix: &str,
    errors: &mut Vec<(String, String)>,
) {
    for field in schema {
        let path = join_path(prefix, field.key);
        match map.get(field.key) {
            Some(value) => check_value(field, value, &path, errors),
            None if field.required => {
                let msg = field
                    .messages
                    .required
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("\"{path}\" is required"));
                errors.push((path, msg));
            }
            None => {}
        }
    }

    for key in map.keys() {
        if !schema.iter().any(|f| f.key == key) {
            let path = join_path(prefix, key);
            let msg = format!("\"{path}\" is not allowed");
            errors.push((path, msg));
        }
    }
}

fn check_value(field: &Field, value: &Value, path: &str, errors: &mut Vec<(String, String)>) {
    let failure = match field.kind {
        Kind::String {
            min,
            max,
            allow_empty,
            format,
        } => check_string(field, value, path, min, max, allow_empty, format),
        Kind::Integer => match value {
            Value::Number(n) if n.is_i64() || n.is_u64() => None,
            Value::Number(_) => Some(format!("\"{path}\" must be an integer")),
            _ => Some(format!("\"{path}\" must be a number")),
        },
        Kind::Boolean => match value {
            Value::Bool(_) => None,
            _ => Some(format!("\"{path}\" must be a boolean")),
        },
        Kind::Object(fields) => match value.as_object() {
            Some(map) => {
                check_object(fields, map, path, errors);
                None
            }
            None => Some(format!("\"{path}\" must be of type object")),
        },
    };

    if let Some(msg) = failure {
        errors.push((path.to_string(), msg));
    }
}

fn check_string(
    field: &Field,
    value: &Value,
    path: &str,
    min: Option<usize>,
    max: Option<usize>,
    allow_empty: bool,
    format: Option<Format>,
) -> Option<String> {
    let Some(s) = value.as_str() else {
        return Some(format!("\"{path}\" must be a string"));
    };

    if s.is_empty() {
        return (!allow_empty).then(|| format!("\"{path}\" is not allowed to be empty"));
    }

    let len = s.chars().count();
    if let Some(min) = min.filter(|m| len < *m) {
        return Some(field.messages.min.map(str::to_string).unwrap_or_else(|| {
            format!("\"{path}\" length must be at least {min} characters long")
        }));
    }
    if let Some(max) = max.filter(|m| len > *m) {
        return Some(field.messages.max.map(str::to_string).unwrap_or_else(|| {
            format!("\"{path}\" length must be less than or equal to {max} characters long")
        }));
    }
    if let Some(format) = format.filter(|f| !f.matches(s)) {
        return Some(
            field
                .messages
                .format
                .map(str::to_string)
                .unwrap_or_else(|| format.default_message(path, s)),
        );
    }

    None
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}
