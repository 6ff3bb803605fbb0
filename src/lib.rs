pub mod application;
pub mod catalog;
pub mod commands;
pub mod domain;
pub mod runtime;
