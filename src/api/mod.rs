//! The backend seam: the `Backend` trait that the data sources fetch through, the in-memory
//! mock service that implements it, and the shared keyed request cache that wraps it.

mod cache;
mod mock;

use crate::model::{Employee, PaginatedResponse, Transaction};
use crate::Result;

pub use cache::{CachedBackend, MemoryCache, RequestCache};
pub use mock::MemoryBackend;

// Endpoint names, used as the leading component of request-cache keys.
pub(crate) const EMPLOYEES: &str = "employees";
pub(crate) const PAGINATED_TRANSACTIONS: &str = "paginatedTransactions";
pub(crate) const TRANSACTIONS_BY_EMPLOYEE: &str = "transactionsByEmployee";

/// The data service consumed by the browsing core. Fetch operations return `Ok(None)` when no
/// data is available (for example a cold cache); callers treat that as "absent", not an error,
/// and leave their prior state intact.
#[async_trait::async_trait]
pub trait Backend: Send {
    /// Fetch the full employee directory.
    async fn fetch_all_employees(&mut self) -> Result<Option<Vec<Employee>>>;

    /// Fetch one page of the "all transactions" feed. `page: None` means the first page.
    async fn fetch_page(
        &mut self,
        page: Option<u32>,
    ) -> Result<Option<PaginatedResponse<Vec<Transaction>>>>;

    /// Fetch the complete, unpaginated transaction list for one employee.
    async fn fetch_by_employee(&mut self, employee_id: &str) -> Result<Option<Vec<Transaction>>>;

    /// Set the `approved` flag on a transaction. An `Ok` return is the acknowledgement that the
    /// write landed; the caller is responsible for reflecting the new value into whatever list
    /// it currently displays.
    async fn set_approval(&mut self, transaction_id: &str, approved: bool) -> Result<()>;
}
