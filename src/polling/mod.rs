pub mod controller;
pub mod gesture;
pub mod scheduler;
pub mod snapshot;

pub use controller::OrdersPoller;
pub use gesture::{PullGesture, PullPhase};
pub use scheduler::PollScheduler;
pub use snapshot::orders_differ;
