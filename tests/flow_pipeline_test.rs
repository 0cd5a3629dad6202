//! End-to-end checks over the embedded survey table: dataset -> pivot ->
//! flow graph -> highlight overlay.

use cohortflow::dataset::survey::{survey_dataset, STACK_ORDER};
use cohortflow::dataset::Status;
use cohortflow::{
    build_graph, cohort_overview, pivot, resolve, PivotOptions, Selection, ValueMode,
};

#[test]
fn test_survey_graph_shape() {
    let dataset = survey_dataset();
    let graph = build_graph(dataset, ValueMode::Absolute);

    assert_eq!(graph.sources.len(), 5);
    assert_eq!(graph.targets.len(), 6);
    // Every survey cell is non-zero, so every pair gets an edge
    assert_eq!(graph.edges.len(), 30);
    assert!(graph.edges.iter().all(|e| e.weight > 0.0));

    // Edge weights per target reproduce the status totals
    for (t, target) in graph.targets.iter().enumerate() {
        let node = graph.target_offset() + t;
        let weight_sum: f64 = graph
            .edges
            .iter()
            .filter(|e| e.target == node)
            .map(|e| e.weight)
            .sum();
        assert_eq!(weight_sum as u32, target.total, "{}", target.status);
    }
}

#[test]
fn test_survey_source_totals_are_cohort_sizes() {
    let dataset = survey_dataset();
    let graph = build_graph(dataset, ValueMode::Absolute);

    for (source, cohort) in graph.sources.iter().zip(dataset.cohorts()) {
        assert_eq!(source.total, cohort.size);
    }
}

#[test]
fn test_survey_pivot_ranking_by_working_rate() {
    let table = pivot(
        survey_dataset(),
        &PivotOptions {
            status_order: STACK_ORDER.to_vec(),
            sort_by: Status::Working,
            mode: ValueMode::Percentage,
            ascending: true,
        },
    );

    let order: Vec<&str> = table.rows.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(
        order,
        vec![
            "Spouse job offer", // 48%
            "Sought job",       // 53%
            "Study/research",   // 55%
            "Joined partner",   // 59%
            "Job opportunity",  // 85%
        ]
    );
}

#[test]
fn test_survey_pivot_absolute_keeps_percentage_ranking() {
    // "Joined partner" (518 people) has the largest Working *count*, but
    // ranks by rate exactly as in percentage mode.
    let percentage = pivot(
        survey_dataset(),
        &PivotOptions {
            mode: ValueMode::Percentage,
            ..PivotOptions::default()
        },
    );
    let absolute = pivot(
        survey_dataset(),
        &PivotOptions {
            mode: ValueMode::Absolute,
            ..PivotOptions::default()
        },
    );

    let rate_order: Vec<&str> = percentage.rows.iter().map(|r| r.cohort.as_str()).collect();
    let count_order: Vec<&str> = absolute.rows.iter().map(|r| r.cohort.as_str()).collect();
    assert_eq!(rate_order, count_order);

    let top = absolute.rows.last().unwrap();
    assert_eq!(top.cohort, "For a specific job opportunity");
    assert_eq!(top.values[&Status::Working], 404.0);
}

#[test]
fn test_survey_highlight_study_cohort() {
    let dataset = survey_dataset();
    let graph = build_graph(dataset, ValueMode::Absolute);

    let selection =
        Selection::from_label(Some("To study/do research"), dataset).unwrap();
    let overlay = resolve(&graph, &selection).unwrap();

    let study = graph.source_index("To study/do research").unwrap();
    assert!(overlay.nodes[study].is_full());

    // Every status receives people from this cohort, so all targets light up
    // while the other four cohorts dim.
    for status in Status::ALL {
        assert!(overlay.nodes[graph.target_index(status).unwrap()].is_full());
    }
    for (i, source) in graph.sources.iter().enumerate() {
        assert_eq!(overlay.nodes[i].is_full(), source.name == "To study/do research");
    }

    let full_edges = overlay.edges.iter().filter(|e| e.is_full()).count();
    assert_eq!(full_edges, 6);
}

#[test]
fn test_survey_highlight_status_selection() {
    let dataset = survey_dataset();
    let graph = build_graph(dataset, ValueMode::Percentage);

    let selection = Selection::from_label(Some("Left"), dataset).unwrap();
    assert_eq!(selection, Selection::Status(Status::Left));

    let overlay = resolve(&graph, &selection).unwrap();
    let left = graph.target_index(Status::Left).unwrap();

    // Every cohort loses someone, so all sources light up
    for i in 0..graph.sources.len() {
        assert!(overlay.nodes[i].is_full());
    }
    for (i, edge) in graph.edges.iter().enumerate() {
        assert_eq!(overlay.edges[i].is_full(), edge.target == left);
    }
}

#[test]
fn test_survey_overview_matches_dataset() {
    let dataset = survey_dataset();
    let overview = cohort_overview(dataset);

    assert_eq!(overview.len(), 5);
    let job = overview
        .iter()
        .find(|c| c.cohort == "For a specific job opportunity")
        .unwrap();
    assert_eq!(job.size, 475);
    assert_eq!(job.working, 404);
    assert_eq!(job.working_rate, 85.1);

    let total_working: u32 = overview.iter().map(|c| c.working).sum();
    assert_eq!(total_working, dataset.status_total(Status::Working));
}

#[test]
fn test_stale_selection_against_smaller_dataset() {
    use cohortflow::dataset::{CohortConfig, Dataset, DatasetConfig};
    use indexmap::IndexMap;

    let small = Dataset::from_config(DatasetConfig {
        cohorts: vec![CohortConfig {
            name: "Only".to_string(),
            short_label: None,
            size: 10,
            percentages: IndexMap::from([(Status::Working, 100.0)]),
        }],
    })
    .unwrap();
    let graph = build_graph(&small, ValueMode::Absolute);

    // A selection carried over from the survey no longer resolves
    let stale = Selection::Cohort("To seek employment".to_string());
    assert!(resolve(&graph, &stale).is_err());

    // Falling back to no selection is the caller's decision
    let overlay = resolve(&graph, &Selection::None).unwrap();
    assert!(overlay.nodes.iter().all(|e| e.is_full()));
}
