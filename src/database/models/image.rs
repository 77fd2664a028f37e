use serde::{Deserialize, Serialize};

pub const USER_IMAGE_URL: &str =
    "https://cdn.pixabay.com/photo/2015/10/05/22/37/blank-profile-picture-973460_1280.png";
pub const USER_IMAGE_ALT: &str = "User profile image";
pub const CARD_IMAGE_URL: &str =
    "https://cdn.pixabay.com/photo/2016/04/20/08/21/entrepreneur-1340649_960_720.jpg";
pub const CARD_IMAGE_ALT: &str = "Business card image";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub alt: String,
}

impl Image {
    pub fn user_default() -> Self {
        Self {
            url: USER_IMAGE_URL.to_string(),
            alt: USER_IMAGE_ALT.to_string(),
        }
    }

    pub fn card_default() -> Self {
        Self {
            url: CARD_IMAGE_URL.to_string(),
            alt: CARD_IMAGE_ALT.to_string(),
        }
    }
}

/// Image as sent by clients; either part may be omitted or blank.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageInput {
    pub url: Option<String>,
    pub alt: Option<String>,
}

impl ImageInput {
    /// Fill blank or missing parts from `defaults`.
    pub fn into_image(self, defaults: Image) -> Image {
        Image {
            url: non_blank(self.url).unwrap_or(defaults.url),
            alt: non_blank(self.alt).unwrap_or(defaults.alt),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
