pub mod controller;
pub mod hook;
pub mod loop_worker;

pub use controller::CaptureController;
pub use hook::HookMessage;
pub use loop_worker::capture_loop;
