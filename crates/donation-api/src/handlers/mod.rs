//! HTTP request handlers

pub mod donate;
pub mod items;
