//! # platy-core
//!
//! Domain model and pure logic for the Platy weekly meal planner.
//!
//! Everything here is request-scoped and stateless: a plan comes in (from
//! the model or the deterministic fallback), gets normalized, and leaves as
//! a complete response with a consolidated shopping list and cost estimates.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────┐   ┌───────────┐   ┌─────────────┐   ┌──────────┐   ┌────────┐
//! │ raw plan │──▶│ normalize │──▶│ consolidate │──▶│  bucket  │──▶│  cost  │
//! │ (7 days) │   │ g/ml/ud   │   │ (name,unit) │   │ category │   │  COP   │
//! └──────────┘   └───────────┘   └─────────────┘   └──────────┘   └────────┘
//! ```
//!
//! Quantities are "friendly rounded" to shoppable granularities (nearest
//! 25 g below 100 g, nearest 50 g above, whole units for counts) so the
//! shopping list reads like something a person would actually buy.

pub mod error;
pub mod fallback;
pub mod model;
pub mod pricebook;
pub mod shopping;
pub mod units;

pub use error::{CoreError, Result};
pub use fallback::fallback_plan;
pub use model::{Batch, Costs, Currency, Day, ItemQty, Meta, Plan, Unit};
pub use pricebook::{DEFAULT_CITY, PriceEntry, Pricebook};
pub use shopping::{DEFAULT_CATEGORY, build_costs, build_lista, category_for, consolidate};
pub use units::{normalize_unit, round_friendly};
