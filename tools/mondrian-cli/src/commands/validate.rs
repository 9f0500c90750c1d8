use std::path::PathBuf;

use anyhow::Context;
use mondrian_path_model::PathTable;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let table = PathTable::parse_csv(&content)
        .with_context(|| format!("Invalid path table {}", path.display()))?;

    let issues = check(&table);

    println!("Path table: {}", path.display());
    println!("  Rows: {}", table.len());
    if let Some((start, end)) = table.time_span() {
        println!("  Time: {start:.2}s .. {end:.2}s");
    }

    if issues.is_empty() {
        println!("  Status: valid");
        Ok(())
    } else {
        for issue in &issues {
            println!("  Issue: {issue}");
        }
        anyhow::bail!("{} issue(s) found", issues.len())
    }
}

fn check(table: &PathTable) -> Vec<String> {
    let mut issues = Vec::new();
    if table.is_empty() {
        issues.push("table has no rows".to_string());
    }
    if !table.is_time_ordered() {
        issues.push("times are not in non-decreasing order".to_string());
    }
    if let Some(row) = table.rows().iter().find(|r| r.x < 0.0 || r.y < 0.0) {
        issues.push(format!(
            "negative coordinate at t={:.2} ({:.2}, {:.2})",
            row.time, row.x, row.y
        ));
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordered_table() {
        let table = PathTable::parse_csv("time,x,y\n0.00,1.00,2.00\n0.50,3.00,4.00\n").unwrap();
        assert!(check(&table).is_empty());
    }

    #[test]
    fn flags_unordered_and_empty_tables() {
        let table = PathTable::parse_csv("time,x,y\n1.00,1.00,2.00\n0.50,3.00,4.00\n").unwrap();
        assert_eq!(check(&table).len(), 1);

        let empty = PathTable::parse_csv("time,x,y\n").unwrap();
        assert_eq!(check(&empty), vec!["table has no rows".to_string()]);
    }
}
