//! Implements the `Backend` trait using in-memory data.
//!
//! Note: this is compiled even in the "production" version of this app because there is no real
//! transport; the whole app runs, top-to-bottom, against this mock data service.

use crate::api::Backend;
use crate::model::{Amount, Employee, PaginatedResponse, Transaction};
use crate::Result;
use anyhow::{bail, Context};
use chrono::NaiveDate;
use serde::Deserialize;
use std::io::Cursor;
use std::str::FromStr;

/// How many transactions each page of the "all transactions" feed contains.
pub(crate) const DEFAULT_PAGE_SIZE: usize = 5;

/// An implementation of the `Backend` trait that holds all employee and transaction data in
/// memory and, by default, is seeded with deterministic data.
pub struct MemoryBackend {
    employees: Vec<Employee>,
    transactions: Vec<Transaction>,
    page_size: usize,
}

impl MemoryBackend {
    /// Create a new `MemoryBackend` holding `employees` and `transactions`, paginating the
    /// latter into pages of `page_size`.
    pub fn new(
        employees: Vec<Employee>,
        transactions: Vec<Transaction>,
        page_size: usize,
    ) -> Self {
        Self {
            employees,
            transactions,
            page_size: page_size.max(1),
        }
    }

    /// Create a `MemoryBackend` with the default seed data and the given page size.
    pub fn seeded(page_size: usize) -> Result<Self> {
        let employees = load_employees(EMPLOYEE_DATA)?;
        let transactions = load_transactions(TRANSACTION_DATA, &employees)?;
        Ok(Self::new(employees, transactions, page_size))
    }
}

impl Default for MemoryBackend {
    /// Loads the seed data from this module with the default page size.
    fn default() -> Self {
        Self::seeded(DEFAULT_PAGE_SIZE).expect("seed data must parse")
    }
}

#[async_trait::async_trait]
impl Backend for MemoryBackend {
    async fn fetch_all_employees(&mut self) -> Result<Option<Vec<Employee>>> {
        Ok(Some(self.employees.clone()))
    }

    async fn fetch_page(
        &mut self,
        page: Option<u32>,
    ) -> Result<Option<PaginatedResponse<Vec<Transaction>>>> {
        let page = page.unwrap_or(0) as usize;
        let start = page * self.page_size;
        if start >= self.transactions.len() && page > 0 {
            // Past the end of the feed. The terminal marker should have stopped the caller, but
            // an out-of-range request is still answered rather than erroring.
            return Ok(Some(PaginatedResponse::new(Vec::new(), None)));
        }
        let end = (start + self.page_size).min(self.transactions.len());
        let data = self.transactions[start..end].to_vec();
        let next_page = if end < self.transactions.len() {
            Some(page as u32 + 1)
        } else {
            None
        };
        Ok(Some(PaginatedResponse::new(data, next_page)))
    }

    async fn fetch_by_employee(&mut self, employee_id: &str) -> Result<Option<Vec<Transaction>>> {
        let matching: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|t| t.employee().id() == employee_id)
            .cloned()
            .collect();
        Ok(Some(matching))
    }

    async fn set_approval(&mut self, transaction_id: &str, approved: bool) -> Result<()> {
        let transaction = self
            .transactions
            .iter_mut()
            .find(|t| t.id() == transaction_id)
            .with_context(|| format!("Invalid transaction to approve: '{transaction_id}'"))?;
        transaction.set_approved(approved);
        Ok(())
    }
}

/// One row of the employee seed CSV.
#[derive(Debug, Clone, Deserialize)]
struct EmployeeRecord {
    id: String,
    first_name: String,
    last_name: String,
}

/// One row of the transaction seed CSV. The amount stays a `String` here and is parsed into an
/// `Amount` when the row is turned into a `Transaction`.
#[derive(Debug, Clone, Deserialize)]
struct TransactionRecord {
    id: String,
    amount: String,
    employee_id: String,
    merchant: String,
    date: String,
    approved: bool,
}

/// Loads the employee directory from a CSV-formatted string.
fn load_employees(csv_data: &str) -> Result<Vec<Employee>> {
    let mut rdr = csv::Reader::from_reader(Cursor::new(csv_data.as_bytes()));
    let mut employees = Vec::new();
    for result in rdr.deserialize() {
        let record: EmployeeRecord = result.context("Unable to parse employee seed row")?;
        employees.push(Employee::new(record.id, record.first_name, record.last_name));
    }
    Ok(employees)
}

/// Loads transactions from a CSV-formatted string, embedding the matching employee record into
/// each transaction.
fn load_transactions(csv_data: &str, employees: &[Employee]) -> Result<Vec<Transaction>> {
    let mut rdr = csv::Reader::from_reader(Cursor::new(csv_data.as_bytes()));
    let mut transactions = Vec::new();
    for result in rdr.deserialize() {
        let record: TransactionRecord = result.context("Unable to parse transaction seed row")?;
        let employee = employees
            .iter()
            .find(|e| e.id() == record.employee_id)
            .with_context(|| {
                format!(
                    "Transaction '{}' references unknown employee '{}'",
                    record.id, record.employee_id
                )
            })?
            .clone();
        let amount = Amount::from_str(&record.amount)?;
        let date = NaiveDate::parse_from_str(&record.date, "%Y-%m-%d")
            .with_context(|| format!("Bad date '{}' in transaction '{}'", record.date, record.id))?;
        transactions.push(Transaction::new(
            record.id,
            amount,
            employee,
            record.merchant,
            date,
            record.approved,
        ));
    }
    if transactions.is_empty() {
        bail!("The transaction seed data is empty");
    }
    Ok(transactions)
}

/// Seed employee data.
const EMPLOYEE_DATA: &str = r##"id,first_name,last_name
emp-001,James,Smith
emp-002,Maria,Garcia
emp-003,Wei,Chen
emp-004,Priya,Patel
"##;

/// Seed transaction data.
const TRANSACTION_DATA: &str = r##"id,amount,employee_id,merchant,date,approved
txn-001,-$87.43,emp-001,Whole Foods Market,2025-10-20,false
txn-002,-$6.75,emp-002,Starbucks #2847,2025-10-19,true
txn-003,-$52.30,emp-001,Shell Gas Station,2025-10-18,false
txn-004,-$14.85,emp-003,Chipotle Mexican Grill,2025-10-17,false
txn-005,-$142.67,emp-004,PG&E Electric,2025-10-16,true
txn-006,-$63.21,emp-002,Trader Joe's #429,2025-10-15,false
txn-007,-$7.25,emp-001,Peet's Coffee & Tea,2025-10-14,true
txn-008,-$48.90,emp-003,Chevron Gas,2025-10-13,false
txn-009,-$12.40,emp-004,Panera Bread,2025-10-12,false
txn-010,-$89.99,emp-002,Comcast Internet,2025-10-11,true
txn-011,-$95.82,emp-001,Safeway #1534,2025-10-10,false
txn-012,$250.00,emp-003,Travel Reimbursement,2025-10-09,true
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_page_slicing_and_terminal_marker() {
        let mut backend = MemoryBackend::default();

        let first = backend.fetch_page(None).await.unwrap().unwrap();
        assert_eq!(first.data().len(), 5);
        assert_eq!(first.next_page(), Some(1));

        let second = backend.fetch_page(Some(1)).await.unwrap().unwrap();
        assert_eq!(second.data().len(), 5);
        assert_eq!(second.next_page(), Some(2));

        let third = backend.fetch_page(Some(2)).await.unwrap().unwrap();
        assert_eq!(third.data().len(), 2);
        assert_eq!(third.next_page(), None);
    }

    #[tokio::test]
    async fn test_fetch_by_employee_filters() {
        let mut backend = MemoryBackend::default();
        let transactions = backend.fetch_by_employee("emp-001").await.unwrap().unwrap();
        assert_eq!(transactions.len(), 4);
        assert!(transactions.iter().all(|t| t.employee().id() == "emp-001"));
    }

    #[tokio::test]
    async fn test_set_approval() {
        let mut backend = MemoryBackend::default();
        backend.set_approval("txn-001", true).await.unwrap();
        let page = backend.fetch_page(None).await.unwrap().unwrap();
        let txn = page.data().iter().find(|t| t.id() == "txn-001").unwrap();
        assert!(txn.approved());
    }

    #[tokio::test]
    async fn test_set_approval_unknown_id() {
        let mut backend = MemoryBackend::default();
        assert!(backend.set_approval("txn-999", true).await.is_err());
    }

    #[tokio::test]
    async fn test_out_of_range_page() {
        let mut backend = MemoryBackend::default();
        let page = backend.fetch_page(Some(99)).await.unwrap().unwrap();
        assert!(page.data().is_empty());
        assert!(page.is_terminal());
    }
}
