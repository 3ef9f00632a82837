//! # Core Application Logic
//!
//! This module contains ORION's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • DataSource / Reply   │
//!                    └───────────┬─────────────┘
//!                                │
//!                    ┌───────────┴─────────────┐
//!                    ▼                         ▼
//!             ┌────────────┐            ┌────────────┐
//!             │    TUI     │            │  Backend   │
//!             │  Adapter   │            │  (future)  │
//!             │ (ratatui)  │            │            │
//!             └────────────┘            └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`data`]: Conversation and search data sources
//! - [`reply`]: Assistant reply providers

pub mod action;
pub mod attachment;
pub mod config;
pub mod data;
pub mod recording;
pub mod reply;
pub mod state;
pub mod theme;
pub mod toast;
pub mod types;
pub mod welcome;
