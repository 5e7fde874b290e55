//! Data models for the bookstore platform

pub mod announcement;
pub mod book;
pub mod bookmark;
pub mod cart;
pub mod order;
pub mod review;
pub mod user;

pub use announcement::*;
pub use book::*;
pub use bookmark::*;
pub use cart::*;
pub use order::*;
pub use review::*;
pub use user::*;
