pub mod about;
pub mod admin;
pub mod editor;
pub mod home;
pub mod login;
pub mod not_found;
pub mod post;
pub mod stats;
