pub mod app_context;
pub mod auth;
pub mod config;
pub mod data_exporter;
pub mod deferred;
pub mod i18n;
pub mod models;
pub mod record_loader;
pub mod repository;
pub mod router;
pub mod storage;
pub mod table;
pub mod table_display;
pub mod ui;
pub mod utils;
pub mod views;
