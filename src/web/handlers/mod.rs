pub mod admin;
pub mod news;
pub mod stoerer;
