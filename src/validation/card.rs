use super::shared::{ADDRESS, EMAIL, IMAGE, PHONE};
use super::{Field, Format};

/// Card body, shared by POST /cards and PUT /cards/:id
pub const CARD: &[Field] = &[
    Field::string("title")
        .min(2)
        .max(256)
        .required()
        .on_min("Title must be at least 2 characters")
        .on_max("Title cannot exceed 256 characters")
        .on_required("Title is required"),
    Field::string("subtitle")
        .min(2)
        .max(256)
        .required()
        .on_min("Subtitle must be at least 2 characters")
        .on_max("Subtitle cannot exceed 256 characters")
        .on_required("Subtitle is required"),
    Field::string("description")
        .min(2)
        .max(1024)
        .required()
        .on_min("Description must be at least 2 characters")
        .on_max("Description cannot exceed 1024 characters")
        .on_required("Description is required"),
    PHONE,
    EMAIL,
    Field::string("web")
        .format(Format::Uri)
        .allow_empty()
        .on_format("Please provide a valid URL"),
    IMAGE,
    ADDRESS,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::CardInput;
    use crate::error::ApiError;
    use crate::validation::{parse, validate};
    use serde_json::json;

    #[test]
    fn parses_minimal_card() {
        let card: CardInput = parse(
            CARD,
            json!({
                "title": "Falafel Gabai",
                "subtitle": "Since 1974",
                "description": "Fresh every morning",
                "phone": "0771234567",
                "email": "falafel@example.com",
                "address": {
                    "country": "Israel",
                    "city": "Jerusalem",
                    "street": "Agripas",
                    "houseNumber": 7
                }
            }),
        )
        .unwrap();
        assert!(card.web.is_none());
        assert_eq!(card.address.house_number, 7);
    }

    #[test]
    fn empty_body_lists_all_required_fields() {
        let err = validate(CARD, &json!({})).unwrap_err();
        let ApiError::ValidationError { message, .. } = err else {
            panic!("expected validation error");
        };
        assert_eq!(
            message,
            "Title is required. Subtitle is required. Description is required. \
             Phone number is required. Email is required. \"address\" is required"
        );
    }

    #[test]
    fn bad_web_uses_custom_message() {
        let body = json!({ "web": "www" });
        let ApiError::ValidationError { field_errors: Some(map), .. } =
            validate(CARD, &body).unwrap_err()
        else {
            panic!("expected validation error");
        };
        assert_eq!(map["web"], "Please provide a valid URL");
    }
}
