use crate::args::BrowseArgs;
use crate::commands::{standard_browser, Out};
use crate::model::Transaction;
use crate::Result;
use anyhow::bail;
use serde::Serialize;

/// Structured result of a browse session: the displayed list and the paging state it ended in.
#[derive(Debug, Clone, Serialize)]
pub struct BrowseReport {
    /// The employee id the list was filtered to, if any.
    filter: Option<String>,
    /// The transactions the session ended up displaying.
    transactions: Vec<Transaction>,
    /// Whether further pages of the full feed remain.
    has_more_pages: bool,
}

impl BrowseReport {
    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn has_more_pages(&self) -> bool {
        self.has_more_pages
    }
}

/// Run one browsing session: the initial full load, then the optional employee filter, extra
/// pages and approval changes, in that order.
pub async fn browse(args: BrowseArgs) -> Result<Out<BrowseReport>> {
    let mut browser = standard_browser(args.page_size())?;
    browser.ensure_loaded().await?;

    if let Some(id) = args.employee() {
        let selected = browser
            .employees()
            .and_then(|list| list.iter().find(|e| e.id() == id))
            .cloned();
        match selected {
            Some(employee) => browser.select(Some(&employee)).await?,
            None => bail!("Unknown employee id '{id}'"),
        }
    }

    for _ in 0..args.pages() {
        if !browser.can_load_more() {
            break;
        }
        browser.load_more().await?;
    }

    for id in args.approve() {
        browser.set_approval(id, true).await?;
    }
    for id in args.deny() {
        browser.set_approval(id, false).await?;
    }

    let transactions = browser.transactions().unwrap_or_default().to_vec();
    let report = BrowseReport {
        filter: args.employee().map(String::from),
        transactions,
        has_more_pages: browser.has_more_pages(),
    };
    Ok(Out::new(render(&report), report.clone()))
}

/// Formats the displayed list for the terminal.
fn render(report: &BrowseReport) -> String {
    if report.transactions.is_empty() {
        return "No transactions to display.".to_string();
    }
    let mut message = format!("{} transactions:\n", report.transactions.len());
    for t in &report.transactions {
        message.push_str(&format!(
            "  {:<8} {} {:>10} {:<24} {:<16} {}\n",
            t.id(),
            t.date(),
            t.amount().to_string(),
            t.merchant(),
            t.employee().full_name(),
            if t.approved() { "approved" } else { "pending" },
        ));
    }
    if report.has_more_pages {
        message.push_str("More pages are available; rerun with a higher --pages value.\n");
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(employee: Option<&str>, pages: u32) -> BrowseArgs {
        BrowseArgs::new(employee.map(String::from), pages, Vec::new(), Vec::new(), 5)
    }

    #[tokio::test]
    async fn test_browse_shows_the_first_page() {
        let out = browse(args(None, 0)).await.unwrap();
        let report = out.structure().unwrap();
        assert_eq!(report.transactions().len(), 5);
        assert!(report.has_more_pages());
    }

    #[tokio::test]
    async fn test_browse_pages_through_the_whole_feed() {
        let out = browse(args(None, 5)).await.unwrap();
        let report = out.structure().unwrap();
        assert_eq!(report.transactions().len(), 12);
        assert!(!report.has_more_pages());
    }

    #[tokio::test]
    async fn test_browse_filters_to_one_employee() {
        let out = browse(args(Some("emp-001"), 0)).await.unwrap();
        let report = out.structure().unwrap();
        assert_eq!(report.transactions().len(), 4);
        assert!(report
            .transactions()
            .iter()
            .all(|t| t.employee().id() == "emp-001"));
    }

    #[tokio::test]
    async fn test_browse_rejects_unknown_employee() {
        assert!(browse(args(Some("emp-999"), 0)).await.is_err());
    }

    #[tokio::test]
    async fn test_browse_applies_approvals() {
        let browse_args =
            BrowseArgs::new(None, 0, vec!["txn-001".to_string()], vec!["txn-002".to_string()], 5);
        let out = browse(browse_args).await.unwrap();
        let report = out.structure().unwrap();
        let by_id = |id: &str| {
            report
                .transactions()
                .iter()
                .find(|t| t.id() == id)
                .unwrap()
                .approved()
        };
        assert!(by_id("txn-001"));
        assert!(!by_id("txn-002"));
    }
}
