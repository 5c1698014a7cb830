use crate::core::aggregate::Report;
use crate::core::normalize::display_city_label;
use crate::domain::model::{CountEntry, Dimension, TransformResult};

const BAR_WIDTH: usize = 40;
const MAX_LABEL_WIDTH: usize = 28;

/// 將數字加上千分位，例如 12345 -> "12,345"
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn render_metrics(report: &Report) -> String {
    format!(
        "Rows (orders): {}\nUnique states: {}\nUnique cities: {}\nTop state / city: {} / {}\n",
        format_count(report.total_rows),
        format_count(report.distinct_states()),
        format_count(report.distinct_cities()),
        report.top_state(),
        report.top_city_display(),
    )
}

pub fn render_table(dimension: Dimension, entries: &[CountEntry]) -> String {
    let width = label_width(dimension.heading(), entries);
    let counts: Vec<String> = entries.iter().map(|e| format_count(e.count)).collect();
    let count_width = counts.iter().map(String::len).max().unwrap_or(0).max("Count".len());

    let mut out = format!(
        "{:<width$}  {:>count_width$}\n",
        dimension.heading(),
        "Count",
        width = width,
        count_width = count_width
    );
    out.push_str(&format!("{}\n", "-".repeat(width + 2 + count_width)));

    for (entry, count) in entries.iter().zip(&counts) {
        out.push_str(&format!(
            "{:<width$}  {:>count_width$}\n",
            truncate(&entry.label, width),
            count,
            width = width,
            count_width = count_width
        ));
    }
    out
}

/// Horizontal bars scaled so the largest count fills the full width.
pub fn render_bar_chart(title: &str, entries: &[CountEntry]) -> String {
    let mut out = format!("{}\n", title);
    let Some(max) = entries.iter().map(|e| e.count).max() else {
        return out;
    };

    let width = label_width("", entries);
    for entry in entries {
        let len = (entry.count * BAR_WIDTH).div_ceil(max.max(1));
        out.push_str(&format!(
            "{:<width$} │{} {}\n",
            truncate(&entry.label, width),
            "█".repeat(len),
            format_count(entry.count),
            width = width
        ));
    }
    out
}

/// 完整文字報表：指標、兩張統計表、Top N 長條圖，以及選擇性的原始資料樣本
pub fn render_report(result: &TransformResult, top_n: usize) -> String {
    let report = &result.report;
    let mut out = String::new();

    out.push_str("📦 Ship State & City Counter\n\n");
    out.push_str(&render_metrics(report));
    out.push('\n');

    out.push_str("📍 Ship State Counts\n");
    out.push_str(&render_table(Dimension::State, report.states.entries()));
    out.push('\n');

    out.push_str("🏙 Ship City Counts\n");
    out.push_str(&render_table(Dimension::City, &report.cities_for_display()));
    out.push('\n');

    out.push_str(&render_bar_chart(
        &format!("📊 Top {} Ship States", top_n),
        report.top_states(top_n),
    ));
    out.push('\n');

    let top_cities: Vec<CountEntry> = report
        .top_cities(top_n)
        .iter()
        .map(|e| CountEntry {
            label: display_city_label(&e.label).to_string(),
            count: e.count,
        })
        .collect();
    out.push_str(&render_bar_chart(
        &format!("📊 Top {} Ship Cities", top_n),
        &top_cities,
    ));

    if !result.raw_sample.is_empty() {
        out.push('\n');
        out.push_str(&format!(
            "Sample raw rows ({} shown)\n",
            format_count(result.raw_sample.len())
        ));
        out.push_str(&result.headers.join("\t"));
        out.push('\n');
        for row in &result.raw_sample {
            out.push_str(&row.join("\t"));
            out.push('\n');
        }
    }

    out
}

fn label_width(heading: &str, entries: &[CountEntry]) -> usize {
    entries
        .iter()
        .map(|e| e.label.chars().count())
        .chain(std::iter::once(heading.chars().count()))
        .max()
        .unwrap_or(0)
        .min(MAX_LABEL_WIDTH)
}

fn truncate(label: &str, width: usize) -> String {
    if label.chars().count() <= width {
        label.to_string()
    } else {
        let mut cut: String = label.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(label: &str, count: usize) -> CountEntry {
        CountEntry {
            label: label.to_string(),
            count,
        }
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn test_render_table_aligns_columns() {
        let out = render_table(
            Dimension::City,
            &[entry("Mumbai ++", 1200), entry("Pune", 7)],
        );
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "Ship City  Count");
        assert_eq!(lines[2], "Mumbai ++  1,200");
        assert_eq!(lines[3], "Pune           7");
    }

    #[test]
    fn test_bar_chart_scales_to_largest() {
        let out = render_bar_chart("Top", &[entry("Goa", 10), entry("Kerala", 5)]);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "Top");
        assert_eq!(lines[1].matches('█').count(), BAR_WIDTH);
        assert_eq!(lines[2].matches('█').count(), BAR_WIDTH / 2);
        assert!(lines[2].ends_with(" 5"));
    }

    #[test]
    fn test_bar_chart_without_entries() {
        assert_eq!(render_bar_chart("Top", &[]), "Top\n");
    }

    #[test]
    fn test_truncate_long_labels() {
        let long = "A".repeat(40);
        let cut = truncate(&long, MAX_LABEL_WIDTH);
        assert_eq!(cut.chars().count(), MAX_LABEL_WIDTH);
        assert!(cut.ends_with('…'));
    }
}
