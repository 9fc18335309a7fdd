//! # City-Guide Telegram Bot
//!
//! Event routing and in-place menu navigation for a Telegram city guide. An
//! ordered-predicate router maps each inbound event to exactly one handler,
//! and a small screen model drives menu navigation by editing messages in
//! place. The Telegram transport is confined to the `bot` module; everything
//! else is pure and testable without a network.

pub mod bot;
pub mod catalog;
pub mod event;
pub mod localization;
pub mod navigation;
pub mod outbound;
pub mod render;
pub mod router;
pub mod screen;
pub mod token;
