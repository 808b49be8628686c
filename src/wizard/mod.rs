pub mod catalog;
mod fsm;

pub use fsm::*;
