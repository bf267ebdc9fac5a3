pub mod cli;
pub mod client;
pub mod configuration;
pub mod db;
pub mod forms;
pub mod models;
pub mod parser;
pub mod routes;
pub mod services;
pub mod startup;
pub mod telemetry;
