//! Types that represent the core data model, such as `Employee` and `Transaction`.
mod amount;
mod employee;
mod page;
mod transaction;

pub use amount::Amount;
pub use employee::Employee;
pub use page::{PaginatedRequestParams, PaginatedResponse, RequestByEmployeeParams};
pub use transaction::Transaction;
