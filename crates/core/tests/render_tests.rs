// ═══════════════════════════════════════════════════════════════════
// Render Tests — chart projection, stat cards, data-info panel, export names
// ═══════════════════════════════════════════════════════════════════

mod common;

use common::*;
use serde_json::json;

use fund_dashboard_core::errors::CoreError;
use fund_dashboard_core::models::chart::{ChartEnvelope, ChartResponse};
use fund_dashboard_core::models::dataset::DataInfo;
use fund_dashboard_core::models::filter::{ChartType, DataType};
use fund_dashboard_core::models::fund::{FundId, SelectedFunds};
use fund_dashboard_core::models::state::AppState;
use fund_dashboard_core::models::statistics::{FundStatistics, StatisticsEnvelope};
use fund_dashboard_core::models::view::{ChangeDirection, StatCardBody, StatPanel};
use fund_dashboard_core::services::chart_service::{
    render_chart, value_axis_title, ChartCompletion, ChartService, POINT_HOVER_RADIUS,
    POINT_RADIUS,
};
use fund_dashboard_core::services::data_info_service::render_data_info;
use fund_dashboard_core::services::export_service::{chart_export_filename, csv_export_filename};
use fund_dashboard_core::services::statistics_service::{
    render_card_body, render_statistics, StatisticsService, STATISTICS_ERROR,
};

fn chart_response() -> ChartResponse {
    let envelope: ChartEnvelope = serde_json::from_value(chart_ok()).unwrap();
    envelope.data.unwrap()
}

fn stats_envelope(value: serde_json::Value) -> Result<StatisticsEnvelope, CoreError> {
    Ok(serde_json::from_value(value).unwrap())
}

fn loaded_state() -> AppState {
    let mut state = AppState::new();
    state.mark_loaded(DataType::Prices);
    state
}

// ── Chart projection ────────────────────────────────────────────────

mod chart {
    use super::*;

    #[test]
    fn one_series_per_dataset_with_one_value_per_label() {
        let chart = render_chart(&chart_response(), ChartType::Line, DataType::Prices);

        assert_eq!(chart.labels, vec![d(2003, 7, 1), d(2003, 7, 2), d(2003, 7, 3)]);
        assert_eq!(chart.series.len(), 2);
        for series in &chart.series {
            assert_eq!(series.values.len(), 3);
            assert!(!series.fill);
            assert!(!series.span_gaps);
            assert_eq!(series.point_radius, POINT_RADIUS);
            assert_eq!(series.point_hover_radius, POINT_HOVER_RADIUS);
        }
    }

    #[test]
    fn area_fills_every_series() {
        let chart = render_chart(&chart_response(), ChartType::Area, DataType::Prices);
        assert!(chart.series.iter().all(|s| s.fill));
    }

    #[test]
    fn series_decoration() {
        let chart = render_chart(&chart_response(), ChartType::Line, DataType::Prices);
        let c = &chart.series[1];
        assert_eq!(c.fund, FundId::C);
        assert_eq!(c.label, "C Fund");
        assert_eq!(c.border_color, "#ff9800");
        assert_eq!(c.background_color, "#ff980020");
        assert_eq!(c.point_background_color, "#ff9800");
        assert_eq!(c.values, vec![None, None, Some(10.24)]);
    }

    #[test]
    fn axis_title_follows_data_type() {
        assert_eq!(value_axis_title(DataType::Prices), "Share Price ($)");
        assert_eq!(value_axis_title(DataType::Returns), "Monthly Return (%)");
        let chart = render_chart(&chart_response(), ChartType::Line, DataType::Returns);
        assert_eq!(chart.value_axis_title, "Monthly Return (%)");
    }

    #[test]
    fn length_mismatch_is_invalid_response() {
        let mut response = chart_response();
        response.datasets[0].values.pop();
        assert!(matches!(response.validate(), Err(CoreError::InvalidResponse(_))));
    }

    #[test]
    fn empty_chart_renders_nothing() {
        let chart = render_chart(&ChartResponse::default(), ChartType::Line, DataType::Prices);
        assert!(chart.labels.is_empty());
        assert!(chart.series.is_empty());
    }
}

// ── Chart request lifecycle ─────────────────────────────────────────

mod chart_lifecycle {
    use super::*;

    #[test]
    fn refuses_unloaded_dataset() {
        let mut service = ChartService::new();
        let err = service.prepare(&AppState::new()).unwrap_err();
        assert!(matches!(err, CoreError::DatasetNotLoaded(DataType::Prices)));
    }

    #[test]
    fn refuses_empty_selection() {
        let mut state = loaded_state();
        for fund in FundId::ALL {
            state.set_fund_selected(fund, false);
        }
        let err = ChartService::new().prepare(&state).unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }

    #[test]
    fn service_rejection_carries_message() {
        let mut service = ChartService::new();
        let pending = service.prepare(&loaded_state()).unwrap();
        let envelope: ChartEnvelope =
            serde_json::from_value(json!({"success": false, "message": "No data in range"})).unwrap();

        let err = service.complete(&pending, envelope).unwrap_err();
        assert!(matches!(err, CoreError::Rejected(ref m) if m == "No data in range"));
    }

    #[test]
    fn success_without_data_is_invalid() {
        let mut service = ChartService::new();
        let pending = service.prepare(&loaded_state()).unwrap();
        let envelope: ChartEnvelope = serde_json::from_value(json!({"success": true})).unwrap();

        let err = service.complete(&pending, envelope).unwrap_err();
        assert!(matches!(err, CoreError::InvalidResponse(_)));
    }

    #[test]
    fn older_ticket_is_stale() {
        let mut service = ChartService::new();
        let state = loaded_state();
        let first = service.prepare(&state).unwrap();
        let second = service.prepare(&state).unwrap();
        let envelope: ChartEnvelope = serde_json::from_value(chart_ok()).unwrap();

        assert_eq!(
            service.complete(&first, envelope.clone()).unwrap(),
            ChartCompletion::Stale
        );
        assert!(matches!(
            service.complete(&second, envelope).unwrap(),
            ChartCompletion::Render(_)
        ));
    }

    #[test]
    fn chart_type_is_captured_at_request_time() {
        let mut service = ChartService::new();
        let mut state = loaded_state();
        state.set_chart_type(ChartType::Area);
        let pending = service.prepare(&state).unwrap();
        state.set_chart_type(ChartType::Line);

        let envelope: ChartEnvelope = serde_json::from_value(chart_ok()).unwrap();
        let ChartCompletion::Render(chart) = service.complete(&pending, envelope).unwrap() else {
            panic!("expected a render");
        };
        assert!(chart.series.iter().all(|s| s.fill));
    }
}

// ── Stat cards ──────────────────────────────────────────────────────

mod statistics {
    use super::*;

    #[test]
    fn cards_for_selected_funds_present_in_response() {
        let panel = render_statistics(&stats_envelope(stats_ok()), &SelectedFunds::all(), DataType::Prices);

        let StatPanel::Cards(cards) = panel else {
            panic!("expected cards");
        };
        let funds: Vec<FundId> = cards.iter().map(|c| c.fund).collect();
        assert_eq!(funds, vec![FundId::G, FundId::I]);
        assert_eq!(cards[0].title, "G Fund");
    }

    #[test]
    fn unselected_funds_are_skipped() {
        let mut funds = SelectedFunds::all();
        funds.set(FundId::G, false);
        let panel = render_statistics(&stats_envelope(stats_ok()), &funds, DataType::Prices);

        let StatPanel::Cards(cards) = panel else {
            panic!("expected cards");
        };
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].fund, FundId::I);
    }

    #[test]
    fn values_card_for_fund_with_data() {
        let panel = render_statistics(&stats_envelope(stats_ok()), &SelectedFunds::all(), DataType::Prices);
        let StatPanel::Cards(cards) = panel else {
            panic!("expected cards");
        };
        assert_eq!(
            cards[0].body,
            StatCardBody::Values {
                current: "$10.24".into(),
                change: "+0.22".into(),
                direction: ChangeDirection::Positive,
                coverage: "10/10 periods (100.0%)".into(),
                range: Some("$10.02 – $10.24".into()),
            }
        );
    }

    #[test]
    fn no_current_value_renders_no_data_card() {
        let panel = render_statistics(&stats_envelope(stats_ok()), &SelectedFunds::all(), DataType::Prices);
        let StatPanel::Cards(cards) = panel else {
            panic!("expected cards");
        };
        assert_eq!(
            cards[1].body,
            StatCardBody::NoData {
                coverage: "Coverage: 0.0%".into()
            }
        );
    }

    #[test]
    fn missing_change_displays_as_zero_and_missing_min_hides_range() {
        let stats = FundStatistics {
            current: Some(1.5),
            count: 3,
            total_periods: 4,
            data_coverage_percent: 75.0,
            ..FundStatistics::default()
        };

        let body = render_card_body(&stats, DataType::Returns);
        assert_eq!(
            body,
            StatCardBody::Values {
                current: "1.50%".into(),
                change: "+0.00%".into(),
                direction: ChangeDirection::Neutral,
                coverage: "3/4 periods (75.0%)".into(),
                range: None,
            }
        );
        assert_eq!(stats.change, None);
    }

    #[test]
    fn negative_change_direction() {
        let stats = FundStatistics {
            current: Some(-0.8),
            change: Some(-1.71),
            min: Some(-2.0),
            max: Some(3.25),
            count: 12,
            total_periods: 12,
            data_coverage_percent: 100.0,
            ..FundStatistics::default()
        };
        let StatCardBody::Values { change, direction, range, .. } = render_card_body(&stats, DataType::Returns)
        else {
            panic!("expected values");
        };
        assert_eq!(change, "-1.71%");
        assert_eq!(direction, ChangeDirection::Negative);
        assert_eq!(range.as_deref(), Some("-2.00% – 3.25%"));
    }

    #[test]
    fn empty_mapping_is_no_data_placeholder() {
        let panel = render_statistics(
            &stats_envelope(json!({"success": true, "statistics": {}})),
            &SelectedFunds::all(),
            DataType::Prices,
        );
        assert_eq!(panel, StatPanel::NoData);
    }

    #[test]
    fn failure_is_error_placeholder() {
        let failed: Result<StatisticsEnvelope, CoreError> = Err(CoreError::Network("down".into()));
        let panel = render_statistics(&failed, &SelectedFunds::all(), DataType::Prices);
        assert_eq!(panel, StatPanel::Error(STATISTICS_ERROR.to_string()));
    }

    #[test]
    fn rejection_uses_service_message() {
        let panel = render_statistics(
            &stats_envelope(json!({"success": false, "message": "No returns data loaded"})),
            &SelectedFunds::all(),
            DataType::Returns,
        );
        assert_eq!(panel, StatPanel::Error("No returns data loaded".into()));
    }

    #[test]
    fn older_statistics_request_is_dropped() {
        let mut service = StatisticsService::new();
        let query = loaded_state().query();
        let first = service.prepare(query.clone(), SelectedFunds::all());
        let second = service.prepare(query, SelectedFunds::all());
        let result = stats_envelope(stats_ok());

        assert!(service.complete(&first, &result).is_none());
        assert!(service.complete(&second, &result).is_some());
    }
}

// ── Data-info panel ─────────────────────────────────────────────────

mod data_info {
    use super::*;

    #[test]
    fn one_section_per_loaded_dataset() {
        let info: DataInfo = serde_json::from_value(data_info_both()).unwrap();
        let panel = render_data_info(&info);

        assert_eq!(panel.sections.len(), 2);
        let prices = &panel.sections[0];
        assert_eq!(prices.title, "Prices Data");
        assert_eq!(prices.records, "10 records");
        assert_eq!(prices.date_range, "2003-07-01 to 2003-07-10");
        let rows: Vec<(FundId, &str)> = prices
            .funds
            .iter()
            .map(|r| (r.fund, r.coverage.as_str()))
            .collect();
        assert_eq!(rows, vec![(FundId::G, "100.0%"), (FundId::I, "60.0%")]);

        let returns = &panel.sections[1];
        assert_eq!(returns.title, "Returns Data");
        assert_eq!(returns.funds[0].span.as_deref(), Some("2020-03-01 – 2024-12-01"));
    }

    #[test]
    fn nothing_loaded_is_empty_panel() {
        let panel = render_data_info(&DataInfo::default());
        assert!(panel.is_empty());
    }
}

// ── Export file names ───────────────────────────────────────────────

mod export_names {
    use super::*;

    #[test]
    fn csv_name_carries_type_and_iso_date() {
        assert_eq!(
            csv_export_filename(DataType::Returns, d(2024, 3, 5)),
            "returns_export_2024-03-05.csv"
        );
    }

    #[test]
    fn png_name_carries_type_and_iso_date() {
        assert_eq!(
            chart_export_filename(DataType::Prices, d(2024, 3, 5)),
            "prices_chart_2024-03-05.png"
        );
    }
}
