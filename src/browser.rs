//! The view coordinator: decides which transaction source is authoritative for the display,
//! drives the loading flags, and owns the approval-update flow.

use crate::api::Backend;
use crate::model::{Employee, Transaction};
use crate::source::{EmployeeDirectory, EmployeeTransactions, PaginatedTransactions};
use crate::Result;
use tracing::{debug, trace};

/// Which source currently backs the displayed transaction list. Derived from the two sources'
/// states on every call, never stored.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DisplaySource {
    /// The single-employee list is present and wins.
    EmployeeScoped,
    /// No scoped list is held; the page accumulator is present.
    Paginated,
    /// Neither source holds data.
    Unloaded,
}

/// Coordinates the employee directory, the paginated "all transactions" feed and the
/// per-employee feed behind a single displayed list.
///
/// All multi-step sequences are serialized: the full-load sequence finishes the directory fetch
/// before the page fetch begins, so the two loading flags are distinguishable, non-overlapping
/// phases. Fetches are never cancelled once started.
pub struct Browser {
    backend: Box<dyn Backend + Send>,
    directory: EmployeeDirectory,
    paginated: PaginatedTransactions,
    scoped: EmployeeTransactions,
    loading_employees: bool,
    loading_transactions: bool,
}

impl Browser {
    pub fn new(backend: Box<dyn Backend + Send>) -> Self {
        Self {
            backend,
            directory: EmployeeDirectory::default(),
            paginated: PaginatedTransactions::default(),
            scoped: EmployeeTransactions::default(),
            loading_employees: false,
            loading_transactions: false,
        }
    }

    /// The startup transition: run the full-load sequence iff the directory has never loaded
    /// and is not already loading. Safe to call any number of times; the guard is the
    /// directory's own state, not a separate lock.
    pub async fn ensure_loaded(&mut self) -> Result<()> {
        if self.directory.is_loaded() || self.directory.loading() {
            trace!("directory already loaded or loading, skipping startup load");
            return Ok(());
        }
        self.load_all().await
    }

    /// The full-load sequence: the employee directory, then one page of the "all transactions"
    /// feed. The phases run strictly in that order and each flag covers exactly its own await,
    /// clearing even when the fetch yields nothing.
    pub async fn load_all(&mut self) -> Result<()> {
        debug!("loading employees and the first transaction page");
        self.loading_employees = true;
        let directory = self.directory.fetch_all(self.backend.as_mut()).await;
        self.loading_employees = false;
        directory?;

        self.loading_transactions = true;
        let page = self.paginated.fetch_next(self.backend.as_mut()).await;
        self.loading_transactions = false;
        page?;
        Ok(())
    }

    /// Apply a filter selection. A real employee switches the display to that employee's
    /// transactions; the no-filter sentinel or an absent selection reverts to the full feed,
    /// reloading it from the first page.
    pub async fn select(&mut self, selection: Option<&Employee>) -> Result<()> {
        match selection {
            Some(employee) if !employee.is_no_filter() => {
                let id = employee.id().to_string();
                self.load_for_employee(&id).await
            }
            _ => {
                // A stale scoped list must not outrank the reloaded feed.
                self.scoped.clear();
                self.load_all().await
            }
        }
    }

    /// Switch the display to one employee's transactions. The paginated accumulator is
    /// invalidated before the scoped fetch begins, so a stale page set is never visible
    /// alongside the new filter; returning to "all" later restarts from the first page.
    pub async fn load_for_employee(&mut self, employee_id: &str) -> Result<()> {
        debug!("loading transactions for employee {employee_id}");
        self.paginated.invalidate();
        self.loading_transactions = true;
        let fetched = self.scoped.fetch_for(self.backend.as_mut(), employee_id).await;
        self.loading_transactions = false;
        fetched
    }

    /// Fetch one more page of the full feed. A no-op unless `can_load_more()` holds.
    pub async fn load_more(&mut self) -> Result<()> {
        if !self.can_load_more() {
            trace!("load_more called with no further pages available");
            return Ok(());
        }
        self.loading_transactions = true;
        let page = self.paginated.fetch_next(self.backend.as_mut()).await;
        self.loading_transactions = false;
        page
    }

    /// Reset the page accumulator to unloaded. The shared request cache is untouched.
    pub fn invalidate_pagination(&mut self) {
        self.paginated.invalidate();
    }

    /// Set the `approved` flag on a transaction. The write goes to the backend first; once
    /// acknowledged, the matching row in whichever list currently backs the display is updated
    /// in place. All other fields and rows are untouched.
    pub async fn set_approval(&mut self, transaction_id: &str, approved: bool) -> Result<()> {
        self.backend.set_approval(transaction_id, approved).await?;
        let updated = match self.display_source() {
            DisplaySource::EmployeeScoped => self.scoped.set_approved(transaction_id, approved),
            DisplaySource::Paginated => self.paginated.set_approved(transaction_id, approved),
            DisplaySource::Unloaded => false,
        };
        if !updated {
            trace!("approved transaction {transaction_id} is not in the displayed list");
        }
        Ok(())
    }

    /// The displayed transaction list: the employee-scoped list if present, else the page
    /// accumulator, else nothing. A pure derivation of the two sources.
    pub fn transactions(&self) -> Option<&[Transaction]> {
        self.scoped
            .transactions()
            .or_else(|| self.paginated.transactions())
    }

    /// Which source backs `transactions()` right now.
    pub fn display_source(&self) -> DisplaySource {
        if self.scoped.transactions().is_some() {
            DisplaySource::EmployeeScoped
        } else if self.paginated.transactions().is_some() {
            DisplaySource::Paginated
        } else {
            DisplaySource::Unloaded
        }
    }

    /// The loaded employee directory, or `None` before the first successful load.
    pub fn employees(&self) -> Option<&[Employee]> {
        self.directory.employees()
    }

    /// Whether the directory fetch phase is in flight.
    pub fn is_loading_employees(&self) -> bool {
        self.loading_employees
    }

    /// Whether a transaction fetch phase is in flight.
    pub fn is_loading_transactions(&self) -> bool {
        self.loading_transactions
    }

    /// Whether the full feed has further pages: a paginated response exists and its marker is
    /// not terminal. Governs whether a "load more" affordance should be shown at all.
    pub fn has_more_pages(&self) -> bool {
        self.paginated.has_more()
    }

    /// Whether `load_more()` would actually fetch: further pages exist and no transaction
    /// fetch is in flight.
    pub fn can_load_more(&self) -> bool {
        self.has_more_pages() && !self.is_loading_transactions()
    }
}
