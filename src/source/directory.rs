use crate::api::Backend;
use crate::model::Employee;
use crate::Result;
use tracing::trace;

/// Holds the employee directory. A single-shot load: the directory is fetched once and then
/// only re-fetched when the full-load sequence runs again.
#[derive(Default, Debug)]
pub struct EmployeeDirectory {
    data: Option<Vec<Employee>>,
    loading: bool,
}

impl EmployeeDirectory {
    /// Fetch the full directory. An absent response is a no-op that leaves prior data intact.
    pub async fn fetch_all(&mut self, backend: &mut (dyn Backend + Send)) -> Result<()> {
        trace!("fetching the employee directory");
        self.loading = true;
        let fetched = backend.fetch_all_employees().await;
        self.loading = false;
        if let Some(employees) = fetched? {
            self.data = Some(employees);
        }
        Ok(())
    }

    /// Whether the directory has ever loaded successfully.
    pub fn is_loaded(&self) -> bool {
        self.data.is_some()
    }

    /// Whether a directory fetch is currently in flight.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// The loaded directory, or `None` if it has never loaded.
    pub fn employees(&self) -> Option<&[Employee]> {
        self.data.as_deref()
    }
}
