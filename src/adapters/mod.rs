pub mod memory;
pub mod password_hasher;
pub mod postgres;
