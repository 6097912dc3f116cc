pub mod json;
pub mod web;
