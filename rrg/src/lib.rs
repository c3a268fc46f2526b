use once_cell::sync::Lazy;
use std::time::Instant;

pub mod config;
pub mod io;
pub mod opt;

pub static EPOCH: Lazy<Instant> = Lazy::new(Instant::now);
