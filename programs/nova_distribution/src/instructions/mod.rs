//! Instruction handlers for the Nova Distribution program.
//!
//! Auction instructions come first, reward farm instructions after.

pub mod auction_admin;
pub mod buy_token;
pub mod fund;
pub mod initialize_auction;
pub mod update_price;

pub mod add_pool;
pub mod deposit;
pub mod emergency_withdraw;
pub mod farm_admin;
pub mod initialize_farm;
pub mod set_pool;
pub mod update_pool;
pub mod withdraw;

pub use auction_admin::*;
pub use buy_token::*;
pub use fund::*;
pub use initialize_auction::*;
pub use update_price::*;

pub use add_pool::*;
pub use deposit::*;
pub use emergency_withdraw::*;
pub use farm_admin::*;
pub use initialize_farm::*;
pub use set_pool::*;
pub use update_pool::*;
pub use withdraw::*;
