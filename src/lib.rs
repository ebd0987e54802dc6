#![allow(async_fn_in_trait)]

pub mod config;
pub mod core;
pub mod database;
pub mod error;
pub mod form;
pub mod handlers;
pub mod response;

#[cfg(test)]
mod testing;
