pub mod address;
pub mod card;
pub mod image;
pub mod user;

pub use address::Address;
pub use card::{Card, CardChanges, CardInput, NewCard};
pub use image::{Image, ImageInput};
pub use user::{
    BusinessStatus, LoginRequest, Name, NewUser, ProfileChanges, RegisterUser, UpdateUser, User,
};
