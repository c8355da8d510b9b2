// Security module for dataset access control
//
// This module restricts every dataset-scoped tool call to the datasets the
// server was started with. Nothing outside the allowlist ever reaches the
// warehouse.

pub mod allowlist;

pub use allowlist::{AllowlistGuard, DatasetNotAllowed};
