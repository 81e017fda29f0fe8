pub mod credentials;
pub mod event;
pub mod gallery;
pub mod member;
pub mod notice;
pub mod treasury;
