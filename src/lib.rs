//! # Conversational Games Bot
//!
//! A Telegram bot for party games in group chats.
//!
//! ## Features
//! - Truth or dare and never have I ever prompts from local lists
//! - This or that, would you rather and press-the-button polls
//! - Live vote tallies edited into the poll message, one vote per member
//! - Tallies rebuilt from the message text after a restart

/// Bot command handlers and message processing
pub mod bot;
/// Configuration management and environment variables
pub mod config;
/// Prompt lists and prompt text formatting
pub mod content;
/// Poll sessions, voting and the tally text codec
pub mod polls;
/// Background and network services: health, question sources, sweeping
pub mod services;
/// Utility functions for logging, feedback and markdown
pub mod utils;
