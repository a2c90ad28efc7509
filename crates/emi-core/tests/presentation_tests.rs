use std::cell::RefCell;
use std::rc::Rc;

use emi_core::loan::{calculate_emi, EmiInput};
use emi_core::presentation::format::{display_schedule, format_indian};
use emi_core::presentation::{CalculatorSession, ControlView, DisplaySummary, LoanField};
use pretty_assertions::assert_eq;

// ===========================================================================
// Formatting
// ===========================================================================

#[test]
fn test_home_loan_headline_figures() {
    let out = calculate_emi(&EmiInput {
        principal: 500_000.0,
        annual_rate_percent: 8.5,
        term_years: 20,
        max_rows: None,
    })
    .unwrap();

    let display = DisplaySummary::from_summary(&out.result.summary);
    assert_eq!(
        display,
        DisplaySummary {
            emi: "₹ 4,339.12".into(),
            total_interest: "₹ 5,41,387.88".into(),
            total_payment: "₹ 10,41,387.88".into(),
            loan_tenure: "240 Months".into(),
        }
    );
}

#[test]
fn test_schedule_cells_use_two_decimals() {
    let out = calculate_emi(&EmiInput {
        principal: 500_000.0,
        annual_rate_percent: 8.5,
        term_years: 20,
        max_rows: Some(1),
    })
    .unwrap();

    let rows = display_schedule(&out.result.schedule);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].month, 1);
    assert_eq!(rows[0].emi, "₹ 4339.12");
    assert_eq!(rows[0].principal, "₹ 797.45");
    assert_eq!(rows[0].interest, "₹ 3541.67");
    assert_eq!(rows[0].balance, "₹ 499202.55");
}

#[test]
fn test_display_rounding_leaves_summary_untouched() {
    let out = calculate_emi(&EmiInput {
        principal: 500_000.0,
        annual_rate_percent: 8.5,
        term_years: 20,
        max_rows: None,
    })
    .unwrap();
    let before = out.result.summary;
    let _ = DisplaySummary::from_summary(&before);
    assert_eq!(before, out.result.summary);
    assert_ne!(before.periodic_payment, 4339.12);
}

#[test]
fn test_indian_grouping_large_amounts() {
    assert_eq!(format_indian(10_000_000.0, 2), "1,00,00,000");
    assert_eq!(format_indian(999.999, 2), "1,000");
}

// ===========================================================================
// Session behaviour
// ===========================================================================

#[test]
fn test_slider_edit_mirrors_text_and_recalculates() {
    let mut session = CalculatorSession::default();
    let calc = session.set_slider(LoanField::Tenure, 10.0).unwrap();
    assert_eq!(calc.output.summary.term_months, 120);
    assert_eq!(session.field(LoanField::Tenure).text(), "10");
    assert_eq!(session.chart().generation(), 2);
}

#[test]
fn test_text_edit_mirrors_slider() {
    let mut session = CalculatorSession::default();
    session.set_text(LoanField::Principal, "1250000").unwrap();
    assert_eq!(session.field(LoanField::Principal).slider(), 1_250_000.0);
    let chart = session.chart().current().unwrap();
    assert_eq!(chart.values[0], 1_250_000.0);
}

#[test]
fn test_invalid_text_clears_result_and_chart() {
    let mut session = CalculatorSession::default();
    let err = session.set_text(LoanField::Principal, "").unwrap_err();

    assert_eq!(err.field(), Some("principal"));
    assert!(session.latest().is_none());
    assert!(session.chart().current().is_none());
    assert_eq!(session.last_error(), Some(&err));
    // Bad text is kept, never replaced by a default.
    assert_eq!(session.field(LoanField::Principal).text(), "");
}

#[test]
fn test_negative_rate_rejected() {
    let mut session = CalculatorSession::default();
    let err = session.set_text(LoanField::AnnualRate, "-1").unwrap_err();
    assert_eq!(err.field(), Some("annual_rate_percent"));
}

#[test]
fn test_latest_result_supersedes_previous() {
    let mut session = CalculatorSession::default();
    session.set_text(LoanField::AnnualRate, "0").unwrap();
    let calc = session.set_text(LoanField::Principal, "1200000").unwrap();
    // tenure still 20 years
    assert_eq!(calc.output.summary.periodic_payment, 5000.0);
    assert_eq!(calc.summary.total_interest, "₹ 0");
    assert_eq!(session.revision(), 3);
}

#[test]
fn test_reset_restores_defaults_after_error() {
    let mut session = CalculatorSession::default();
    session.set_text(LoanField::Tenure, "zero").unwrap_err();

    let calc = session.reset().unwrap();
    assert_eq!(calc.summary.emi, "₹ 4,339.12");
    assert_eq!(session.field(LoanField::Principal).text(), "500000");
    assert_eq!(session.field(LoanField::AnnualRate).text(), "8.5");
    assert_eq!(session.field(LoanField::Tenure).slider(), 20.0);
    assert!(session.last_error().is_none());
}

#[test]
fn test_max_rows_is_configurable() {
    let mut session = CalculatorSession::new(3);
    assert_eq!(session.latest().unwrap().rows.len(), 3);
    let calc = session.set_max_rows(36).unwrap();
    assert_eq!(calc.rows.len(), 36);
}

#[test]
fn test_session_subscribers_see_slider_edits() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let mut session = CalculatorSession::default();
    session.subscribe(LoanField::AnnualRate, move |c| {
        sink.borrow_mut().push((c.source, c.text.clone()))
    });
    session.set_slider(LoanField::AnnualRate, 9.26).unwrap();

    assert_eq!(*seen.borrow(), vec![(ControlView::Slider, "9.3".to_string())]);
}
