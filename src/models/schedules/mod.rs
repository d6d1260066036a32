pub mod audience;
pub mod entities;
pub mod requests;
pub mod responses;

pub use audience::Audience;
