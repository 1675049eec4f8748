//! Test Helpers

use jiff::civil::date;
use quire::{catalog::Genre, orders::ShippingAddress, users::Role};

use crate::domain::{
    books::data::BookDetails,
    users::{data::NewUser, records::UserUuid},
};

/// Password every helper-registered user logs in with.
pub(crate) const TEST_PASSWORD: &str = "secret-password";

pub(crate) fn new_user(name: &str) -> NewUser {
    NewUser {
        uuid: UserUuid::new(),
        username: name.to_string(),
        email: format!("{name}@example.com"),
        password: TEST_PASSWORD.to_string(),
        role: Role::Customer,
    }
}

/// A valid science-fiction listing with ten copies on the shelf.
pub(crate) fn book_details(title: &str) -> BookDetails {
    BookDetails {
        title: title.to_string(),
        author: "Frank Herbert".to_string(),
        cover_image: "https://covers.example.com/book.jpg".to_string(),
        description: Some("A novel.".to_string()),
        publication_date: date(1965, 8, 1),
        genre: Genre::ScienceFiction,
        publisher: Some("Chilton".to_string()),
        price: 1_299,
        rating: 4,
        quantity: 10,
        in_stock: 10,
    }
}

pub(crate) fn shipping_address() -> ShippingAddress {
    ShippingAddress {
        street: "1 Main Street".to_string(),
        city: "Springfield".to_string(),
        state: "IL".to_string(),
        zip_code: "62701".to_string(),
        country: "USA".to_string(),
    }
}
