pub mod backend;
pub mod config;
pub mod controller;
pub mod error;
pub mod export;
pub mod geolocation;
pub mod map;
pub mod model;
pub mod request;
pub mod summary;
pub mod utils;
