pub mod release_schedule;
pub mod sale_config;
pub mod wallet_purchase;

pub use release_schedule::*;
pub use sale_config::*;
pub use wallet_purchase::*;
