pub mod book;
pub mod borrow_request;
pub mod commands;
pub mod errors;
pub mod user;
pub mod value_objects;

pub use book::Book;
pub use borrow_request::{BorrowRequest, BorrowStatus};
pub use errors::*;
pub use user::{Role, User};
pub use value_objects::*;
