// src/lib.rs

pub mod config;
pub mod error;
pub mod logging;
pub mod objective;
pub mod params;
pub mod reducer;
pub mod reference;
pub mod runner;
pub mod scan;
pub mod search;
