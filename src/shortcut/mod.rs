pub mod bridge;
pub mod intent;
pub mod listener;
