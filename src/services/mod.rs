pub mod biz_number;
pub mod seed;

pub use biz_number::{generate_biz_number, insert_card, BizNumberError, BIZ_NUMBER_RANGE};
pub use seed::{seed_if_empty, SeedReport};
