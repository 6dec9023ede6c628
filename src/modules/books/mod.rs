pub mod catalog;
pub mod controller;
pub mod router;
pub mod service;
