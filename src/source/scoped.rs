use crate::api::Backend;
use crate::model::Transaction;
use crate::Result;
use tracing::trace;

/// Holds the complete transaction list for at most one employee at a time. There is no merging
/// and no pagination: a successful fetch replaces whatever was held before, wholesale.
#[derive(Default, Debug)]
pub struct EmployeeTransactions {
    data: Option<Vec<Transaction>>,
    loading: bool,
}

impl EmployeeTransactions {
    /// Fetch the full transaction list for `employee_id`, replacing any previously held list.
    /// An absent response is a no-op that leaves the prior list intact.
    pub async fn fetch_for(
        &mut self,
        backend: &mut (dyn Backend + Send),
        employee_id: &str,
    ) -> Result<()> {
        trace!("fetching transactions for employee {employee_id}");
        self.loading = true;
        let fetched = backend.fetch_by_employee(employee_id).await;
        self.loading = false;
        if let Some(transactions) = fetched? {
            self.data = Some(transactions);
        }
        Ok(())
    }

    /// Drop the held list. The coordinator does this when the employee filter is cleared, so
    /// that a stale scoped list can never outrank the reloaded paginated feed.
    pub(crate) fn clear(&mut self) {
        self.data = None;
    }

    /// Whether a fetch is currently in flight.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// The held list, or `None` when unloaded.
    pub fn transactions(&self) -> Option<&[Transaction]> {
        self.data.as_deref()
    }

    /// Flip the `approved` flag on the held transaction with the given id. Returns whether a
    /// matching row was found.
    pub(crate) fn set_approved(&mut self, transaction_id: &str, approved: bool) -> bool {
        let Some(transactions) = self.data.as_mut() else {
            return false;
        };
        match transactions.iter_mut().find(|t| t.id() == transaction_id) {
            Some(transaction) => {
                transaction.set_approved(approved);
                true
            }
            None => false,
        }
    }
}
