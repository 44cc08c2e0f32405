#![allow(async_fn_in_trait)]

mod app;
pub mod config;
pub mod db;
mod util;

pub use app::run;
