pub mod config;
pub mod enums;
pub mod fees;
pub mod itbit;
pub mod liqui;
pub mod shared;
pub mod signing;
pub mod r#static;
pub mod structs;
