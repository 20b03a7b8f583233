//! Shared test fixtures.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::api::Backend;
use crate::model::{Amount, Employee, PaginatedResponse, Transaction};
use crate::Result;
use chrono::NaiveDate;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Builds a throwaway employee with a derived name.
pub(crate) fn employee(id: &str) -> Employee {
    Employee::new(id, format!("First-{id}"), format!("Last-{id}"))
}

/// Builds one transaction per id, all belonging to the same employee, with fixed incidental
/// fields. Tests that care about amounts or dates build their own rows.
pub(crate) fn transactions(ids: &[&str]) -> Vec<Transaction> {
    ids.iter()
        .map(|id| {
            Transaction::new(
                *id,
                Amount::default(),
                employee("emp-001"),
                "Test Merchant",
                NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
                false,
            )
        })
        .collect()
}

#[derive(Default)]
struct RecordedRequests {
    pages: Vec<Option<u32>>,
    employees: Vec<String>,
    directory_fetches: usize,
}

/// A cloneable view of the requests a `ScriptedBackend` has received. Lets a test keep reading
/// the request log after the backend itself has been boxed and moved into a `Browser`.
#[derive(Default, Clone)]
pub(crate) struct Recorder(Arc<Mutex<RecordedRequests>>);

impl Recorder {
    /// Every page index requested so far, in order.
    pub(crate) fn pages(&self) -> Vec<Option<u32>> {
        self.0.lock().unwrap().pages.clone()
    }

    /// Every employee id requested so far, in order.
    pub(crate) fn employees(&self) -> Vec<String> {
        self.0.lock().unwrap().employees.clone()
    }

    /// How many times the directory was fetched.
    pub(crate) fn directory_fetches(&self) -> usize {
        self.0.lock().unwrap().directory_fetches
    }
}

/// A `Backend` that serves scripted responses and records every request it receives, so tests
/// can assert on both the data that flowed and the order in which it was asked for.
///
/// The employee directory is served on every call. Page and by-employee responses are queues:
/// each call pops the next scripted response, and an exhausted queue yields the absent
/// response (`Ok(None)`).
#[derive(Default)]
pub(crate) struct ScriptedBackend {
    employees: Option<Vec<Employee>>,
    pages: VecDeque<PaginatedResponse<Vec<Transaction>>>,
    by_employee: VecDeque<Vec<Transaction>>,
    recorder: Recorder,
}

impl ScriptedBackend {
    /// A backend whose directory holds `count` generated employees.
    pub(crate) fn with_employees(count: usize) -> Self {
        let employees = (1..=count).map(|n| employee(&format!("emp-{n:03}"))).collect();
        Self {
            employees: Some(employees),
            ..Self::default()
        }
    }

    /// Scripts the next paginated response.
    pub(crate) fn page(mut self, data: Vec<Transaction>, next_page: Option<u32>) -> Self {
        self.pages.push_back(PaginatedResponse::new(data, next_page));
        self
    }

    /// Scripts the next by-employee response.
    pub(crate) fn by_employee(mut self, data: Vec<Transaction>) -> Self {
        self.by_employee.push_back(data);
        self
    }

    /// A handle onto the request log.
    pub(crate) fn recorder(&self) -> Recorder {
        self.recorder.clone()
    }

    /// Every page index requested so far, in order.
    pub(crate) fn requested_pages(&self) -> Vec<Option<u32>> {
        self.recorder.pages()
    }
}

#[async_trait::async_trait]
impl Backend for ScriptedBackend {
    async fn fetch_all_employees(&mut self) -> Result<Option<Vec<Employee>>> {
        self.recorder.0.lock().unwrap().directory_fetches += 1;
        Ok(self.employees.clone())
    }

    async fn fetch_page(
        &mut self,
        page: Option<u32>,
    ) -> Result<Option<PaginatedResponse<Vec<Transaction>>>> {
        self.recorder.0.lock().unwrap().pages.push(page);
        Ok(self.pages.pop_front())
    }

    async fn fetch_by_employee(&mut self, employee_id: &str) -> Result<Option<Vec<Transaction>>> {
        self.recorder
            .0
            .lock()
            .unwrap()
            .employees
            .push(employee_id.to_string());
        Ok(self.by_employee.pop_front())
    }

    async fn set_approval(&mut self, _transaction_id: &str, _approved: bool) -> Result<()> {
        Ok(())
    }
}

/// A shared read counter handle for `CountingBackend`.
#[derive(Clone)]
pub(crate) struct Counter(Arc<AtomicUsize>);

impl Counter {
    pub(crate) fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Wraps a `Backend` and counts read calls that reach it. Used to prove what the request cache
/// absorbed.
pub(crate) struct CountingBackend<B> {
    inner: B,
    reads: Arc<AtomicUsize>,
}

impl<B: Backend> CountingBackend<B> {
    pub(crate) fn new(inner: B) -> Self {
        Self {
            inner,
            reads: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn counter(&self) -> Counter {
        Counter(Arc::clone(&self.reads))
    }
}

#[async_trait::async_trait]
impl<B: Backend> Backend for CountingBackend<B> {
    async fn fetch_all_employees(&mut self) -> Result<Option<Vec<Employee>>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_all_employees().await
    }

    async fn fetch_page(
        &mut self,
        page: Option<u32>,
    ) -> Result<Option<PaginatedResponse<Vec<Transaction>>>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_page(page).await
    }

    async fn fetch_by_employee(&mut self, employee_id: &str) -> Result<Option<Vec<Transaction>>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_by_employee(employee_id).await
    }

    async fn set_approval(&mut self, transaction_id: &str, approved: bool) -> Result<()> {
        self.inner.set_approval(transaction_id, approved).await
    }
}
