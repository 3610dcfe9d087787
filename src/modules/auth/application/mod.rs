pub mod domain;
pub mod events;
pub mod listeners;
pub mod ports;
pub mod services;
pub mod use_cases;
