pub mod initialize_sale;
pub mod initialize_schedule;
pub mod fund_reserve;
pub mod buy_tokens;
pub mod pause;
pub mod resume;
pub mod change_authority;
pub mod change_recipient;
pub mod update_token_price;
pub mod update_wallet_purchase_limit;
pub mod withdraw_native;
pub mod withdraw_tokens;
pub mod airdrop_tokens;
pub mod emit_sale_quote;

pub use initialize_sale::*;
pub use initialize_schedule::*;
pub use fund_reserve::*;
pub use buy_tokens::*;
pub use pause::*;
pub use resume::*;
pub use change_authority::*;
pub use change_recipient::*;
pub use update_token_price::*;
pub use update_wallet_purchase_limit::*;
pub use withdraw_native::*;
pub use withdraw_tokens::*;
pub use airdrop_tokens::*;
pub use emit_sale_quote::*;
