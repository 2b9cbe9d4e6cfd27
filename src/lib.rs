//! Agora Realtime - group-broadcast messaging and notification service
//!
//! This crate implements the real-time layer of the Agora social platform:
//! WebSocket group fan-out for chat messages, comments on polymorphic
//! content, and user notifications, plus the community follow-request
//! workflow that feeds the notification channel.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
