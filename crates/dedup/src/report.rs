//! Human-readable run report, written next to the cleaned output.

use crate::model::DedupResult;

/// Groups listed before the report truncates.
const MAX_GROUPS: usize = 10;

/// Path and key context the report needs beyond the run result itself.
pub struct ReportContext<'a> {
    pub input_path: &'a str,
    pub output_path: &'a str,
    pub keys: &'a [String],
    pub normalize: &'a [String],
}

/// Render the run report as plain text.
pub fn render(result: &DedupResult, ctx: &ReportContext<'_>) -> String {
    let mut lines = Vec::new();

    lines.push(format!("RowClean report - {}", result.meta.run_at));
    lines.push(format!("Input file: {}", ctx.input_path));
    lines.push(format!("Output file: {}", ctx.output_path));
    lines.push(format!("Rows before: {}", result.summary.total));
    lines.push(format!("Rows after: {}", result.summary.kept));
    lines.push(format!("Duplicates removed: {}", result.summary.duplicates));
    lines.push(format!("Unprocessable rows: {}", result.summary.unprocessable));
    lines.push(String::new());
    lines.push(format!("Deduplication keys: {}", ctx.keys.join(", ")));
    lines.push(format!("Normalized columns: {}", name_list(ctx.normalize)));
    lines.push(format!("Keep policy: {}", result.meta.keep));
    lines.push(String::new());

    if result.groups.is_empty() {
        lines.push("No duplicate groups found.".to_string());
    } else {
        lines.push(format!("Top duplicate groups (up to {MAX_GROUPS}):"));
        for group in result.groups.iter().take(MAX_GROUPS) {
            let rows: Vec<String> = group.rows.iter().map(ToString::to_string).collect();
            lines.push(format!(
                "  {}x {} (rows {})",
                group.count,
                group.key,
                rows.join(", ")
            ));
        }
        if result.groups.len() > MAX_GROUPS {
            lines.push(format!("  ... and {} more", result.groups.len() - MAX_GROUPS));
        }
    }

    lines.join("\n") + "\n"
}

fn name_list(names: &[String]) -> String {
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeepPolicy;
    use crate::engine::run;
    use crate::key::KeySpec;
    use crate::table::read_records;

    fn report_for(csv: &str, keys: &[&str], normalize: &[&str]) -> String {
        let set = read_records(csv, b',').unwrap();
        let spec = KeySpec::new(
            keys.iter().map(|c| c.to_string()).collect(),
            normalize.iter().map(|c| c.to_string()).collect(),
        )
        .unwrap();
        let result = run(&spec, KeepPolicy::First, &set);
        render(
            &result,
            &ReportContext {
                input_path: "vendors.csv",
                output_path: "cleaned.csv",
                keys: &spec.columns,
                normalize: &spec.normalized,
            },
        )
    }

    #[test]
    fn counts_and_context() {
        let report = report_for(
            "V,P\nAcme,1\nacme,1\nGlobex,2\n",
            &["V", "P"],
            &["V"],
        );
        assert!(report.contains("Input file: vendors.csv"));
        assert!(report.contains("Rows before: 3"));
        assert!(report.contains("Rows after: 2"));
        assert!(report.contains("Duplicates removed: 1"));
        assert!(report.contains("Unprocessable rows: 0"));
        assert!(report.contains("Deduplication keys: V, P"));
        assert!(report.contains("Normalized columns: V"));
        assert!(report.contains("Keep policy: first"));
    }

    #[test]
    fn duplicate_group_lines() {
        let report = report_for("V\na\na\na\nb\nb\n", &["V"], &[]);
        assert!(report.contains("Top duplicate groups (up to 10):"));
        assert!(report.contains("3x a (rows 1, 2, 3)"));
        assert!(report.contains("2x b (rows 4, 5)"));
    }

    #[test]
    fn no_groups_line() {
        let report = report_for("V\na\nb\n", &["V"], &[]);
        assert!(report.contains("No duplicate groups found."));
        assert!(!report.contains("Top duplicate groups"));
    }

    #[test]
    fn truncates_after_ten_groups() {
        // 12 duplicated keys: k00..k11, each twice.
        let mut csv = String::from("V\n");
        for i in 0..12 {
            csv.push_str(&format!("k{i:02}\nk{i:02}\n"));
        }
        let report = report_for(&csv, &["V"], &[]);
        assert!(report.contains("... and 2 more"));
    }

    #[test]
    fn empty_normalize_shown_as_none() {
        let report = report_for("V\na\n", &["V"], &[]);
        assert!(report.contains("Normalized columns: (none)"));
    }
}
