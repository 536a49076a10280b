//! Dossier TUI — the retro-terminal front end for the archive.
//!
//! This crate renders the boot screen, the agent login form and the
//! two-column archive browser, and routes keyboard and pointer input into
//! the state machine. Auth and data access go through the contracts in
//! `dossier-core`; nothing here talks to the outside world except the
//! terminal itself.
//!
//! # Modules
//!
//! - [`app`] — phase and navigation state machine
//! - [`boot`] — timed boot-screen reveal
//! - [`input`] — single-line field editing
//! - [`login`] — login form and auth bridge
//! - [`menu`] — static menu tables
//! - [`render`] — plain-text layout helpers
//! - [`sound`] — sound cues and sinks
//! - [`theme`] — color themes
//! - [`tui`] — terminal runner and event loop
//! - [`views`] — per-phase view rendering

pub mod app;
pub mod boot;
pub mod input;
pub mod login;
pub mod menu;
pub mod render;
pub mod sound;
pub mod theme;
pub mod tui;
pub mod views;
