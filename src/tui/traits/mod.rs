//! Component trait system for TUI architecture
//!
//! Blocks declare their own rendering and input handling through these
//! traits, so the App only routes events and lays out areas.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         App                                 │
//! │   (orchestrator: routes input, lays out blocks, drains queue)│
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!          ┌──────────┬────────┼─────────┬──────────┐
//!          ▼          ▼        ▼         ▼          ▼
//!      Odometer   Spinner   Slider   TextEntry  ColoredBox
//!                              │
//!                     Implements traits:
//!                   Component, Interactive
//! ```
//!
//! # Traits Overview
//!
//! - [`Component`] - render + preferred height
//! - [`Interactive`] - keyboard and mouse input

mod component;
mod interactive;

pub use component::{Component, RenderContext};
pub use interactive::{Handled, Interactive};
