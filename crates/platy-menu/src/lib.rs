//! # platy-menu
//!
//! Menu generation for the Platy funnel: a thin orchestration layer over a
//! generative text model with a deterministic safety net.
//!
//! The service asks the model for a 7-day plan in a strict JSON shape,
//! validates and repairs what comes back, and falls back to a fixed,
//! hand-authored week when the model fails twice. Either way the caller
//! gets a complete plan with a consolidated, costed shopping list; the
//! result type says which path produced it.

pub mod error;
pub mod openai;
pub mod provider;
pub mod service;

pub use error::{MenuError, Result};
pub use openai::{OpenAiChat, OpenAiConfig};
pub use provider::ChatModel;
pub use service::{GeneratedPlan, MenuRequest, MenuService, PlanSource};
