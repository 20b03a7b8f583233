use crate::model::{Amount, Employee};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single expense transaction. The employee record is embedded rather than referenced, so a
/// transaction is a self-contained snapshot. Every field except `approved` is immutable once
/// fetched; `approved` is toggled through the explicit approval operation only.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Transaction {
    id: String,
    amount: Amount,
    employee: Employee,
    merchant: String,
    date: NaiveDate,
    approved: bool,
}

impl Transaction {
    pub fn new(
        id: impl Into<String>,
        amount: Amount,
        employee: Employee,
        merchant: impl Into<String>,
        date: NaiveDate,
        approved: bool,
    ) -> Self {
        Self {
            id: id.into(),
            amount,
            employee,
            merchant: merchant.into(),
            date,
            approved,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn employee(&self) -> &Employee {
        &self.employee
    }

    pub fn merchant(&self) -> &str {
        &self.merchant
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn approved(&self) -> bool {
        self.approved
    }

    pub(crate) fn set_approved(&mut self, approved: bool) {
        self.approved = approved;
    }
}
