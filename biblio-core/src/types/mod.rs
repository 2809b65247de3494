//! Core metadata types

mod book_info;
mod partial;

pub use book_info::BookInfo;
pub use partial::PartialBookInfo;
