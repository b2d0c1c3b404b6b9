mod calendar;
mod ledger;
mod money;
mod transaction;
mod wallet;

pub use calendar::*;
pub use ledger::*;
pub use money::*;
pub use transaction::*;
pub use wallet::*;
