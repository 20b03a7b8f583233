use serde::{Deserialize, Serialize};

/// One page of results from a paginated endpoint. `next_page` is the index to request for the
/// following page; `None` is the terminal marker meaning no further pages exist for this query.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PaginatedResponse<T> {
    data: T,
    next_page: Option<u32>,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: T, next_page: Option<u32>) -> Self {
        Self { data, next_page }
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }

    pub fn next_page(&self) -> Option<u32> {
        self.next_page
    }

    /// Whether this response carries the terminal marker.
    pub fn is_terminal(&self) -> bool {
        self.next_page.is_none()
    }

    /// Fold a newer response into this one: the new page's rows are appended after the rows
    /// already held (earlier pages first) and the `next_page` marker is replaced.
    pub(crate) fn extend(&mut self, newer: PaginatedResponse<T>)
    where
        T: Extend<<T as IntoIterator>::Item> + IntoIterator,
    {
        self.data.extend(newer.data);
        self.next_page = newer.next_page;
    }
}

/// Parameters for the paginated transactions endpoint. `page: None` means "first page".
#[derive(Default, Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PaginatedRequestParams {
    pub page: Option<u32>,
}

/// Parameters for the by-employee transactions endpoint.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RequestByEmployeeParams {
    pub employee_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extend_appends_in_order() {
        let mut page: PaginatedResponse<Vec<u32>> = PaginatedResponse::new(vec![1, 2], Some(1));
        page.extend(PaginatedResponse::new(vec![3, 4], None));
        assert_eq!(page.data(), &vec![1, 2, 3, 4]);
        assert!(page.is_terminal());
    }
}
