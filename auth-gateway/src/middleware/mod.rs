// auth-gateway/src/middleware/mod.rs
pub mod session_gate;
