/// CSV export of per-panel records.
pub mod export;
