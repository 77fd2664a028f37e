use super::{Field, Format};

pub const PHONE: Field = Field::string("phone")
    .format(Format::Phone)
    .required()
    .on_format("Please provide a valid Israeli phone number")
    .on_required("Phone number is required");

pub const EMAIL: Field = Field::string("email")
    .format(Format::Email)
    .required()
    .on_format("Please provide a valid email")
    .on_required("Email is required");

pub const IMAGE_FIELDS: &[Field] = &[
    Field::string("url").format(Format::Uri).allow_empty(),
    Field::string("alt").allow_empty(),
];

pub const IMAGE: Field = Field::object("image", IMAGE_FIELDS);

pub const ADDRESS_FIELDS: &[Field] = &[
    Field::string("state").allow_empty(),
    Field::string("country")
        .required()
        .on_required("Country is required"),
    Field::string("city").required().on_required("City is required"),
    Field::string("street")
        .required()
        .on_required("Street is required"),
    Field::integer("houseNumber")
        .required()
        .on_required("House number is required"),
    Field::integer("zip"),
];

pub const ADDRESS: Field = Field::object("address", ADDRESS_FIELDS).required();
