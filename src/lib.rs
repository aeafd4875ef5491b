pub mod activity;
pub mod analytics;
pub mod app;
pub mod cli;
pub mod config;
pub mod page;
pub mod remote;
pub mod render;
pub mod storage;
pub mod views;
pub mod web;
