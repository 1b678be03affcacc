//! Device identifier generation.
//!
//! The like endpoint dedups repeat likes per device, so the embedding
//! app generates one identifier, persists it, and passes it in via
//! `Config`. Format: prefix, millisecond timestamp, bounded random salt.

use chrono::Utc;
use rand::Rng;

const PREFIX: &str = "dvc";

pub fn generate() -> String {
    let millis = Utc::now().timestamp_millis();
    let salt: u32 = rand::rng().random_range(0..100_000);
    format!("{PREFIX}-{millis}-{salt:05}")
}
