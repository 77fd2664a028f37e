use super::shared::{ADDRESS, EMAIL, IMAGE, PHONE};
use super::{Field, Format};

const NAME_FIELDS: &[Field] = &[
    Field::string("first")
        .min(2)
        .max(256)
        .required()
        .on_min("First name must be at least 2 characters")
        .on_max("First name cannot exceed 256 characters")
        .on_required("First name is required"),
    Field::string("middle")
        .max(256)
        .allow_empty()
        .on_max("Middle name cannot exceed 256 characters"),
    Field::string("last")
        .min(2)
        .max(256)
        .required()
        .on_min("Last name must be at least 2 characters")
        .on_max("Last name cannot exceed 256 characters")
        .on_required("Last name is required"),
];

const NAME: Field = Field::object("name", NAME_FIELDS).required();

const PASSWORD: Field = Field::string("password")
    .min(6)
    .max(128)
    .format(Format::Password)
    .required()
    .on_min("Password must be at least 6 characters")
    .on_max("Password cannot exceed 128 characters")
    .on_format(
        "Password must contain at least one uppercase letter, one lowercase letter, \
         one number and one special character",
    )
    .on_required("Password is required");

/// POST /users
pub const REGISTER: &[Field] = &[
    NAME,
    PHONE,
    EMAIL,
    PASSWORD,
    IMAGE,
    ADDRESS,
    Field::boolean("isBusiness"),
    Field::boolean("isAdmin"),
];

/// POST /users/login. Password strength is not re-checked here.
pub const LOGIN: &[Field] = &[
    EMAIL,
    Field::string("password")
        .max(128)
        .required()
        .on_max("Password cannot exceed 128 characters")
        .on_required("Password is required"),
];

/// PUT /users/:id
pub const UPDATE: &[Field] = &[NAME, PHONE, IMAGE, ADDRESS];

/// PATCH /users/:id
pub const BUSINESS_STATUS: &[Field] = &[Field::boolean("isBusiness")
    .required()
    .on_required("Business status is required")];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::RegisterUser;
    use crate::error::ApiError;
    use crate::validation::{parse, validate};
    use serde_json::{json, Value};

    fn register_body() -> Value {
        json!({
            "name": { "first": "Yael", "last": "Mizrahi" },
            "phone": "0541234567",
            "email": "yael@example.com",
            "password": "Strong@1",
            "address": {
                "country": "Israel",
                "city": "Ramat Gan",
                "street": "Bialik",
                "houseNumber": 12
            }
        })
    }

    fn messages(err: ApiError) -> Vec<String> {
        match err {
            ApiError::ValidationError {
                field_errors: Some(map),
                ..
            } => map.into_values().collect(),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn register_parses_with_defaults() {
        let user: RegisterUser = parse(REGISTER, register_body()).unwrap();
        assert_eq!(user.name.middle, "");
        assert_eq!(user.address.zip, 0);
        assert!(user.is_business.is_none());
        assert!(user.image.is_none());
    }

    #[test]
    fn register_reports_custom_messages() {
        let mut body = register_body();
        body["phone"] = json!("12345");
        body["password"] = json!("weakpassword");
        body["name"]["first"] = json!("Y");
        body["address"].as_object_mut().unwrap().remove("city");

        let msgs = messages(validate(REGISTER, &body).unwrap_err());
        assert!(msgs.contains(&"Please provide a valid Israeli phone number".to_string()));
        assert!(msgs.contains(&"First name must be at least 2 characters".to_string()));
        assert!(msgs.contains(&"City is required".to_string()));
        assert!(msgs.iter().any(|m| m.starts_with("Password must contain")));
    }

    #[test]
    fn register_caps_password_length() {
        let mut body = register_body();
        body["password"] = json!(format!("Aa1@{}", "x".repeat(200)));

        let msgs = messages(validate(REGISTER, &body).unwrap_err());
        assert_eq!(msgs, vec!["Password cannot exceed 128 characters".to_string()]);
    }

    #[test]
    fn update_rejects_email_changes() {
        let mut body = register_body();
        body.as_object_mut().unwrap().remove("password");
        let msgs = messages(validate(UPDATE, &body).unwrap_err());
        assert_eq!(msgs, vec!["\"email\" is not allowed".to_string()]);
    }

    #[test]
    fn business_status_is_required() {
        let msgs = messages(validate(BUSINESS_STATUS, &json!({})).unwrap_err());
        assert_eq!(msgs, vec!["Business status is required".to_string()]);
        assert!(validate(BUSINESS_STATUS, &json!({ "isBusiness": true })).is_ok());
    }
}
