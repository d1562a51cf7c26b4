mod persistence;
mod shared;
mod store;

pub use persistence::{
    JsonFileStorage, MemoryStorage, PlanStorage, load_plan, load_profile, save_plan, save_profile,
};
pub use shared::SharedProgressStore;
pub use store::{Clock, FixedClock, ProgressStore, SystemClock};
