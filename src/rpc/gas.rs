//! Gas safety margins
//!
//! Margins are added in whole percent and rounded down, so a 20% margin on
//! `v` is `v + floor(v * 20 / 100)`.

/// Gas limit with `percent` headroom over the estimate
pub fn gas_limit_with_margin(estimate: u64, percent: u32) -> u64 {
    estimate.saturating_add(estimate.saturating_mul(percent as u64) / 100)
}

/// Gas price with `percent` headroom over the network quote
pub fn gas_price_with_margin(price: u128, percent: u32) -> u128 {
    price.saturating_add(price.saturating_mul(percent as u128) / 100)
}
