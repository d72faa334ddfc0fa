// auth-gateway/src/utils/mod.rs
pub mod apps;
