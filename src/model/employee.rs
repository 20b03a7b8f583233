use serde::{Deserialize, Serialize};

/// An employee whose transactions can be browsed. Records are read-only snapshots from the
/// backend and are never mutated after they are fetched.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Employee {
    id: String,
    first_name: String,
    last_name: String,
}

impl Employee {
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// The reserved "All Employees" entry that means no employee filter is selected. It is
    /// distinct from the absence of a selection and from every real employee. The reserved id
    /// is the empty string; comparison is by id.
    pub fn no_filter() -> Self {
        Self::new("", "All", "Employees")
    }

    /// Whether this is the reserved no-filter entry rather than a real employee.
    pub fn is_no_filter(&self) -> bool {
        self.id.is_empty()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Display name, e.g. "James Smith".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
