//! Calculation logic for the Tariff Engine.
//!
//! This module contains the pricing calculator: flat consumption prices,
//! base prices, tiered band walks, and the dispatch that turns a selection
//! of tariffs into a priced breakdown.

mod base_price;
mod consumption;
mod price;
mod tiered;

pub use base_price::calculate_base_price;
pub use consumption::{NO_RATE_DESCRIPTION, calculate_consumption_price};
pub use price::calculate_price;
pub use tiered::{BandCharge, TieredPriceResult, calculate_tiered_price};
