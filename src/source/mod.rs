//! The data-source state cells that the view coordinator reconciles: the employee directory,
//! the paginated "all transactions" accumulator, and the single-employee transaction list.
//!
//! Each source owns exactly one piece of state plus a loading flag. The flag is raised before
//! the backend await and lowered before the result is inspected, so it clears even when the
//! fetch comes back absent or fails. "Unloaded" (`None`) is distinct from "fetched and got
//! zero rows" (`Some` of an empty list).

mod directory;
mod paginated;
mod scoped;

pub use directory::EmployeeDirectory;
pub use paginated::PaginatedTransactions;
pub use scoped::EmployeeTransactions;
