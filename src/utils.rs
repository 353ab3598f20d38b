/// Number of atomic units in one coin.
pub const COIN: u64 = 1_000_000_000_000;

/// Seconds between blocks targeted by the network; hashrate is derived from it.
pub const DIFFICULTY_TARGET_SECONDS: u64 = 240;

/// Convert an amount in atomic units to a decimal coin amount.
pub fn atomic_to_coins(amount: u64) -> f64 {
    amount as f64 / COIN as f64
}

/// Estimate network hashrate from the current difficulty.
pub fn hashrate_from_difficulty(difficulty: u64) -> u64 {
    difficulty / DIFFICULTY_TARGET_SECONDS
}
