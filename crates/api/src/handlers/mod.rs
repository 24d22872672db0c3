//! HTTP request handlers, one module per resource.

pub mod character;
pub mod house;
pub mod subject;
