//! Analysis engine: runs a catalog against an input table.

use crate::aggregate::{bin_frequencies, five_number, grouped_sum, sort_key_ascending, sort_total_descending};
use crate::catalog::{AggregationKind, AnalysisSpec, ChartKind, GroupOrder};
use crate::error::{AnalysisError, Result};
use crate::series;

use sr_data::{Column, Table};
use tracing::{debug, info};

/// One computed analysis: a derived series table plus its fixed caption,
/// ready for rendering. Not mutated after creation.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// Chart and page title.
    pub title: String,
    /// Fixed narrative caption.
    pub summary: String,
    /// Chart form for the renderer.
    pub chart: ChartKind,
    /// Derived series table.
    pub series: Table,
}

/// Run every analysis in `specs` against `table`, in order.
///
/// All referenced columns are validated up front: if any is absent the whole
/// run fails with [`AnalysisError::MissingColumn`] naming the first missing
/// column, and no results are produced.
pub fn run_analyses(table: &Table, specs: &[AnalysisSpec]) -> Result<Vec<AnalysisResult>> {
    for spec in specs {
        for column in spec.required_columns() {
            if !table.has_column(column) {
                return Err(AnalysisError::MissingColumn(column.to_string()));
            }
        }
    }

    let mut results = Vec::with_capacity(specs.len());
    for spec in specs {
        debug!(title = %spec.title, "running analysis");
        results.push(run_one(table, spec)?);
    }
    info!(count = results.len(), rows = table.rows(), "analyses complete");
    Ok(results)
}

fn run_one(table: &Table, spec: &AnalysisSpec) -> Result<AnalysisResult> {
    let series = match spec.kind {
        AggregationKind::Distribution { bins } => distribution_series(table, spec, bins)?,
        AggregationKind::FiveNumberSummary => five_number_series(table, spec)?,
        AggregationKind::GroupedSum { order } => grouped_sum_series(table, spec, order, None)?,
        AggregationKind::TopN { n } => {
            grouped_sum_series(table, spec, GroupOrder::TotalDescending, Some(n))?
        }
    };
    Ok(AnalysisResult {
        title: spec.title.clone(),
        summary: spec.summary.clone(),
        chart: spec.chart,
        series,
    })
}

/// Numeric cells of the value column, in row order; absent and non-numeric
/// cells are skipped.
fn numeric_values(table: &Table, spec: &AnalysisSpec) -> Result<Vec<f64>> {
    Ok(table
        .column(&spec.value_column)?
        .numbers()
        .into_iter()
        .flatten()
        .collect())
}

/// `(label, value)` pairs from the group and value columns, in row order.
/// Rows where either cell is absent are skipped.
fn labelled_values(table: &Table, spec: &AnalysisSpec) -> Result<Vec<(String, f64)>> {
    let group_column = spec
        .group_column
        .as_deref()
        .ok_or_else(|| AnalysisError::MissingGroupColumn(spec.title.clone()))?;
    let labels = table.column(group_column)?.labels();
    let values = table.column(&spec.value_column)?.numbers();
    Ok(labels
        .into_iter()
        .zip(values)
        .filter_map(|(label, value)| Some((label?, value?)))
        .collect())
}

fn distribution_series(table: &Table, spec: &AnalysisSpec, bins: usize) -> Result<Table> {
    let values = numeric_values(table, spec)?;
    let binned = bin_frequencies(&values, bins);
    let table = Table::new(vec![
        Column::floats(series::BIN_START, binned.iter().map(|b| b.start).collect()),
        Column::floats(series::BIN_END, binned.iter().map(|b| b.end).collect()),
        Column::ints(series::COUNT, binned.iter().map(|b| b.count).collect()),
    ])?;
    Ok(table)
}

fn five_number_series(table: &Table, spec: &AnalysisSpec) -> Result<Table> {
    // Bucket values per group label, first-seen group order.
    let mut groups: Vec<(String, Vec<f64>)> = Vec::new();
    for (label, value) in labelled_values(table, spec)? {
        match groups.iter_mut().find(|(seen, _)| *seen == label) {
            Some((_, bucket)) => bucket.push(value),
            None => groups.push((label, vec![value])),
        }
    }

    let mut labels = Vec::with_capacity(groups.len());
    let mut summaries = Vec::with_capacity(groups.len());
    for (label, bucket) in groups {
        if let Some(summary) = five_number(&bucket) {
            labels.push(label);
            summaries.push(summary);
        }
    }

    let table = Table::new(vec![
        Column::texts(series::LABEL, labels),
        Column::floats(series::WHISKER_LO, summaries.iter().map(|s| s.whisker_lo).collect()),
        Column::floats(series::Q1, summaries.iter().map(|s| s.q1).collect()),
        Column::floats(series::MEDIAN, summaries.iter().map(|s| s.median).collect()),
        Column::floats(series::Q3, summaries.iter().map(|s| s.q3).collect()),
        Column::floats(series::WHISKER_HI, summaries.iter().map(|s| s.whisker_hi).collect()),
    ])?;
    Ok(table)
}

fn grouped_sum_series(
    table: &Table,
    spec: &AnalysisSpec,
    order: GroupOrder,
    top: Option<usize>,
) -> Result<Table> {
    let mut groups = grouped_sum(labelled_values(table, spec)?);
    match order {
        GroupOrder::KeyAscending => sort_key_ascending(&mut groups),
        GroupOrder::TotalDescending => sort_total_descending(&mut groups),
    }
    if let Some(n) = top {
        groups.truncate(n);
    }

    let table = Table::new(vec![
        Column::texts(series::LABEL, groups.iter().map(|(label, _)| label.clone()).collect::<Vec<_>>()),
        Column::floats(series::TOTAL, groups.iter().map(|(_, total)| *total).collect()),
    ])?;
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::standard_analyses;
    use crate::columns;
    use sr_data::Value;

    /// The worked example from the report requirements: three sales rows,
    /// two product lines with equal totals.
    fn example_table() -> Table {
        Table::new(vec![
            Column::floats(columns::SALES, vec![10.0, 20.0, 30.0]),
            Column::texts(columns::STATUS, vec!["Shipped", "Shipped", "Shipped"]),
            Column::ints(columns::QTR_ID, vec![1, 1, 2]),
            Column::texts(columns::PRODUCTLINE, vec!["A", "A", "B"]),
            Column::texts(columns::CUSTOMERNAME, vec!["X", "Y", "X"]),
        ])
        .unwrap()
    }

    #[test]
    fn valid_table_yields_five_results_in_fixed_order() {
        let results = run_analyses(&example_table(), &standard_analyses()).unwrap();
        let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(
            titles,
            [
                "Sales Distribution",
                "Sales by Order Status",
                "Sales by Quarter",
                "Sales by Product Line",
                "Top 10 Customers by Sales",
            ]
        );
    }

    #[test]
    fn any_missing_required_column_fails_the_whole_run() {
        let full = example_table();
        for dropped in [
            columns::SALES,
            columns::STATUS,
            columns::QTR_ID,
            columns::PRODUCTLINE,
            columns::CUSTOMERNAME,
        ] {
            let columns: Vec<Column> = full
                .columns()
                .iter()
                .filter(|c| c.name() != dropped)
                .cloned()
                .collect();
            let table = Table::new(columns).unwrap();
            let err = run_analyses(&table, &standard_analyses()).unwrap_err();
            match err {
                AnalysisError::MissingColumn(name) => assert_eq!(name, dropped),
                other => panic!("expected MissingColumn, got {other}"),
            }
        }
    }

    #[test]
    fn category_sums_tie_break_by_first_seen_order() {
        let results = run_analyses(&example_table(), &standard_analyses()).unwrap();
        let by_product = &results[3].series;
        let labels: Vec<Option<String>> =
            by_product.column(series::LABEL).unwrap().labels();
        assert_eq!(
            labels,
            vec![Some("A".to_string()), Some("B".to_string())]
        );
        assert_eq!(
            by_product.value(0, series::TOTAL).unwrap(),
            &Value::Float(30.0)
        );
        assert_eq!(
            by_product.value(1, series::TOTAL).unwrap(),
            &Value::Float(30.0)
        );
    }

    #[test]
    fn quarter_buckets_sort_ascending() {
        let table = Table::new(vec![
            Column::floats(columns::SALES, vec![5.0, 7.0, 9.0]),
            Column::ints(columns::QTR_ID, vec![3, 1, 2]),
        ])
        .unwrap();
        let spec = AnalysisSpec {
            title: "Sales by Quarter".to_string(),
            summary: String::new(),
            kind: AggregationKind::GroupedSum {
                order: GroupOrder::KeyAscending,
            },
            value_column: columns::SALES.to_string(),
            group_column: Some(columns::QTR_ID.to_string()),
            chart: ChartKind::Bars,
        };
        let results = run_analyses(&table, &[spec]).unwrap();
        let labels: Vec<Option<String>> =
            results[0].series.column(series::LABEL).unwrap().labels();
        assert_eq!(
            labels,
            vec![
                Some("1".to_string()),
                Some("2".to_string()),
                Some("3".to_string())
            ]
        );
    }

    #[test]
    fn top_n_keeps_exactly_n_descending_with_first_seen_ties() {
        // Twelve customers; two pairs tie on total.
        let names: Vec<String> = (0..12).map(|i| format!("C{i:02}")).collect();
        let sales: Vec<f64> = vec![
            50.0, 90.0, 90.0, 10.0, 80.0, 70.0, 60.0, 55.0, 52.0, 51.0, 50.0, 95.0,
        ];
        let table = Table::new(vec![
            Column::floats(columns::SALES, sales),
            Column::texts(columns::CUSTOMERNAME, names),
        ])
        .unwrap();
        let spec = AnalysisSpec {
            title: "Top 10 Customers by Sales".to_string(),
            summary: String::new(),
            kind: AggregationKind::TopN { n: 10 },
            value_column: columns::SALES.to_string(),
            group_column: Some(columns::CUSTOMERNAME.to_string()),
            chart: ChartKind::HorizontalBars,
        };
        let results = run_analyses(&table, &[spec]).unwrap();
        let series = &results[0].series;
        assert_eq!(series.rows(), 10);

        let labels: Vec<String> = series
            .column(crate::series::LABEL)
            .unwrap()
            .labels()
            .into_iter()
            .flatten()
            .collect();
        // 95 > 90 (C01 before C02, first-seen) > 80 > ... ; C03 (10.0) and
        // one of the 50.0 pair fall out.
        assert_eq!(labels[0], "C11");
        assert_eq!(labels[1], "C01");
        assert_eq!(labels[2], "C02");
        assert!(!labels.contains(&"C03".to_string()));

        let totals: Vec<f64> = series
            .column(crate::series::TOTAL)
            .unwrap()
            .numbers()
            .into_iter()
            .flatten()
            .collect();
        assert!(totals.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn distribution_bins_use_catalog_default() {
        let sales: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let rows = sales.len();
        let table = Table::new(vec![
            Column::floats(columns::SALES, sales),
            Column::texts(columns::STATUS, vec!["Shipped"; rows]),
            Column::ints(columns::QTR_ID, vec![1; rows]),
            Column::texts(columns::PRODUCTLINE, vec!["A"; rows]),
            Column::texts(columns::CUSTOMERNAME, vec!["X"; rows]),
        ])
        .unwrap();
        let results = run_analyses(&table, &standard_analyses()).unwrap();
        assert_eq!(results[0].series.rows(), crate::DEFAULT_BINS);
        let counts: i64 = results[0]
            .series
            .column(series::COUNT)
            .unwrap()
            .numbers()
            .into_iter()
            .flatten()
            .map(|c| c as i64)
            .sum();
        assert_eq!(counts, 100);
    }

    #[test]
    fn five_number_series_has_one_row_per_status() {
        let table = Table::new(vec![
            Column::floats(columns::SALES, vec![10.0, 20.0, 30.0, 40.0]),
            Column::texts(
                columns::STATUS,
                vec!["Shipped", "Cancelled", "Shipped", "Shipped"],
            ),
        ])
        .unwrap();
        let spec = AnalysisSpec {
            title: "Sales by Order Status".to_string(),
            summary: String::new(),
            kind: AggregationKind::FiveNumberSummary,
            value_column: columns::SALES.to_string(),
            group_column: Some(columns::STATUS.to_string()),
            chart: ChartKind::Boxplot,
        };
        let results = run_analyses(&table, &[spec]).unwrap();
        let series = &results[0].series;
        assert_eq!(series.rows(), 2);
        // First-seen group order.
        assert_eq!(
            series.value(0, crate::series::LABEL).unwrap(),
            &Value::Text("Shipped".to_string())
        );
        assert_eq!(
            series.value(0, crate::series::MEDIAN).unwrap(),
            &Value::Float(30.0)
        );
    }
}
