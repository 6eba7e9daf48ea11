pub mod dedup;
pub mod domains;
pub mod dtos;
pub mod handlers;
pub mod model;
pub mod service;

pub use dedup::deduplicate;
pub use domains::{PROFILE_DOMAINS, is_profile_domain};
pub use model::{Candidate, Profile};
pub use service::{ProfileScout, ScoutLimits};
