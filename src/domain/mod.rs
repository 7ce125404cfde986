pub mod category;
pub mod common;
pub mod date_zone;
pub mod month;
pub mod session;
pub mod transaction;

pub use category::{CategoryCatalog, CategoryDefinition};
pub use common::{Displayable, Identifiable, NamedEntity};
pub use date_zone::DateZone;
pub use month::YearMonth;
pub use session::{Session, UserIdentity};
pub use transaction::{Direction, StoredTransaction, TransactionRecord};
