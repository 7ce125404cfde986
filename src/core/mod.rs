pub mod finance_manager;
pub mod load_cycle;
pub mod services;

pub use finance_manager::FinanceManager;
pub use load_cycle::{LoadSequencer, LoadTicket, ScreenState};
