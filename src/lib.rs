//! Support Menu Bot Library
//!
//! A Telegram bot that greets users with a two-option support menu.
//!
//! This crate provides the core functionality for:
//! - Loading Telegram credentials from the environment
//! - Parsing `/start` and mapping menu button presses to canned replies
//! - Connecting to Telegram via `MTProto` and serving updates

pub mod commands;
pub mod config;
pub mod telegram;
