// src/lib.rs

pub mod commands;
pub mod config;
pub mod dashboard;
pub mod handlers;
pub mod models;
pub mod services;
pub mod view;
