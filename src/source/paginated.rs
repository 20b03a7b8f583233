use crate::api::Backend;
use crate::model::{PaginatedResponse, Transaction};
use crate::Result;
use tracing::trace;

/// Holds the page accumulator for the "all transactions" feed: the concatenation of every page
/// fetched so far plus the latest `next_page` marker, or nothing when unloaded.
#[derive(Default, Debug)]
pub struct PaginatedTransactions {
    response: Option<PaginatedResponse<Vec<Transaction>>>,
    loading: bool,
}

impl PaginatedTransactions {
    /// Fetch the next page and fold it into the accumulator.
    ///
    /// The requested page is the remembered `next_page`; when unloaded, the first page. On the
    /// first successful fetch the response becomes the accumulator verbatim; afterwards the new
    /// rows are appended behind the existing ones and the marker is replaced. An absent
    /// response leaves the accumulator unchanged.
    ///
    /// Requesting another page once `next_page` is terminal is the caller's responsibility to
    /// avoid; the coordinator withholds its load-more affordance at that point.
    pub async fn fetch_next(&mut self, backend: &mut (dyn Backend + Send)) -> Result<()> {
        let page = self.response.as_ref().and_then(|r| r.next_page());
        trace!("fetching transaction page {page:?}");
        self.loading = true;
        let fetched = backend.fetch_page(page.or(Some(0))).await;
        self.loading = false;
        let Some(response) = fetched? else {
            return Ok(());
        };
        match self.response.as_mut() {
            None => self.response = Some(response),
            Some(accumulated) => accumulated.extend(response),
        }
        Ok(())
    }

    /// Reset to the unloaded state, discarding every accumulated page. The next fetch starts
    /// over at the first page. The shared request cache is not touched.
    pub fn invalidate(&mut self) {
        trace!("invalidating the page accumulator");
        self.response = None;
    }

    /// Whether a page fetch is currently in flight.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Whether more pages exist: a response has been accumulated and its marker is not
    /// terminal.
    pub fn has_more(&self) -> bool {
        self.response.as_ref().is_some_and(|r| !r.is_terminal())
    }

    /// The accumulated rows, or `None` when unloaded.
    pub fn transactions(&self) -> Option<&[Transaction]> {
        self.response.as_ref().map(|r| r.data().as_slice())
    }

    /// Flip the `approved` flag on the accumulated transaction with the given id. Returns
    /// whether a matching row was found.
    pub(crate) fn set_approved(&mut self, transaction_id: &str, approved: bool) -> bool {
        let Some(response) = self.response.as_mut() else {
            return false;
        };
        match response
            .data_mut()
            .iter_mut()
            .find(|t| t.id() == transaction_id)
        {
            Some(transaction) => {
                transaction.set_approved(approved);
                true
            }
            None => false,
        }
    }
}
