pub mod card;
pub mod frame;
pub mod layout;
pub mod ledger;
