use crate::commands::{standard_browser, Out};
use crate::model::Employee;
use crate::Result;
use anyhow::Context;

/// List the employee directory, with the "All Employees" filter entry ahead of the real
/// employees, the way a selector widget would present it.
pub async fn employees() -> Result<Out<Vec<Employee>>> {
    let mut browser = standard_browser(5)?;
    browser.ensure_loaded().await?;
    let loaded = browser
        .employees()
        .context("The employee directory did not load")?;

    let mut directory = vec![Employee::no_filter()];
    directory.extend(loaded.iter().cloned());

    let mut message = format!("{} employees:\n", loaded.len());
    for employee in &directory {
        let id = if employee.is_no_filter() { "-" } else { employee.id() };
        message.push_str(&format!("  {:<8} {}\n", id, employee.full_name()));
    }
    Ok(Out::new(message, directory))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_employees_lists_sentinel_first() {
        let out = employees().await.unwrap();
        let directory = out.structure().unwrap();
        assert!(directory[0].is_no_filter());
        assert_eq!(directory.len(), 5);
        assert!(out.message().contains("All Employees"));
    }
}
