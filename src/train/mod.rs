//! Release train engine
//!
//! Same functional-core split as a merge plan:
//! 1. Gather - query pending and queued PRs (effectful)
//! 2. Plan - filter candidates and pick promotions (pure, testable)
//! 3. Execute - label the picked PRs, then wait for the next cycle (effectful)

mod execute;
mod policy;
mod progress;

pub use execute::{
    CycleOutcome, CycleReport, DEFAULT_POLL_INTERVAL, StopReason, TrainExit, TrainOptions,
    run_cycle, run_train,
};
pub use policy::{
    AdmissionPolicy, DEFAULT_MAX_IN_FLIGHT, PromotionPlan, RELEASE_TITLE_PREFIX,
    create_promotion_plan,
};
pub use progress::{NoopProgress, ProgressCallback};
