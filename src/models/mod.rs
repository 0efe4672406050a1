mod document;
mod product;
mod user;

pub use document::{Document, DocumentRecord};
pub use product::{
    Image, ListingSummary, Location, Product, PropertyDetails, PropertyInfo, Review, ReviewSummary,
};
pub use user::User;
