pub mod account;
pub mod health;
pub mod payment;
pub mod tasks;

// Glob re-exports so utoipa's generated `__path_*` items are reachable for openapi.rs
pub use account::*;
pub use health::*;
pub use payment::*;
pub use tasks::*;
