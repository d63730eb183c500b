// File: src/rabbitmq/mod.rs

pub mod connection;
pub mod listener;
pub mod publisher;
