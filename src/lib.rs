//! Blog Desk - the admin interface for a personal blog
//!
//! This crate provides list/search/filter screens over the blog's content
//! types and a quoteback editor that scrapes title, author and favicon from
//! the quoted page on save.

pub mod admin;
pub mod config;
pub mod db;
pub mod fetch;
