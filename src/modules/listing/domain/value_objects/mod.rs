pub mod upgrade_level;

pub use upgrade_level::{extract_plus_level, BucketFilter, UpgradeBucket};
