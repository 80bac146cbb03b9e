pub mod admin_items;
pub mod auth;
pub mod clicks;
pub mod download;
pub mod items;
