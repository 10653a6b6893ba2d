//! Spend report tests over a JSON fixture source.

use std::sync::Arc;

use crate::in_memory::helpers::{
    clock, date, numbered_task_order, portfolio_id, repo, runtime,
};
use clinledger::{
    clock::FixedClock,
    reporting::{
        adapters::FixtureSpendDataSource,
        domain::{BillingCode, ClinTypeSpend, MonthlyTotals},
        services::{ReportService, ReportingError},
    },
    task_order::{
        adapters::memory::InMemoryTaskOrderRepository,
        domain::{PortfolioId, SignerId, TaskOrder},
        ports::TaskOrderRepository,
    },
};
use rstest::{fixture, rstest};
use rust_decimal::Decimal;
use serde_json::json;
use std::io;
use tokio::runtime::Runtime;

type FixtureReports =
    ReportService<FixtureSpendDataSource, InMemoryTaskOrderRepository, FixedClock>;

const SPEND: &str = r#"{
  "Aardvark": {
    "applications": [
      {
        "name": "Mobile",
        "environments": [
          {
            "name": "Staging",
            "spending": {
              "this_month": { "JEDI_CLIN_1": 50 },
              "last_month": { "JEDI_CLIN_1": 150 },
              "total": { "JEDI_CLIN_1": 600 }
            }
          },
          {
            "name": "Prod",
            "spending": {
              "this_month": { "JEDI_CLIN_1": 663.25, "JEDI_CLIN_2": 397 },
              "last_month": { "JEDI_CLIN_1": 5006, "JEDI_CLIN_2": 3212 },
              "total": { "JEDI_CLIN_1": 23921, "JEDI_CLIN_2": 15745 }
            }
          }
        ]
      },
      {
        "name": "Billing",
        "environments": [
          { "name": "Prod", "spending": { "total": { "JEDI_CLIN_3": 40 } } }
        ]
      }
    ]
  }
}"#;

#[fixture]
fn reports(repo: InMemoryTaskOrderRepository, clock: FixedClock) -> FixtureReports {
    let source = FixtureSpendDataSource::from_json_str(SPEND).expect("fixture parses");
    ReportService::new(Arc::new(source), Arc::new(repo), Arc::new(clock))
}

#[rstest]
fn monthly_spending_orders_applications_and_environments(reports: FixtureReports) {
    let applications = reports
        .monthly_spending("Aardvark")
        .expect("monthly spending");

    let layout: Vec<(&str, Vec<&str>)> = applications
        .iter()
        .map(|application| {
            (
                application.name.as_str(),
                application
                    .environments
                    .iter()
                    .map(|environment| environment.name.as_str())
                    .collect(),
            )
        })
        .collect();
    assert_eq!(
        layout,
        vec![("Billing", vec!["Prod"]), ("Mobile", vec!["Prod", "Staging"])]
    );

    let mobile = applications
        .iter()
        .find(|application| application.name == "Mobile")
        .expect("mobile application");
    assert_eq!(
        mobile.totals,
        MonthlyTotals {
            this_month: Decimal::new(111_025, 2),
            last_month: Decimal::from(8_368),
            total: Decimal::from(40_266),
        }
    );
}

#[rstest]
fn monthly_spending_serializes_flat_totals(reports: FixtureReports) {
    let applications = reports
        .monthly_spending("Aardvark")
        .expect("monthly spending");

    let billing = serde_json::to_value(applications.first().expect("billing application"))
        .expect("serialize totals");

    assert_eq!(
        billing,
        json!({
            "name": "Billing",
            "this_month": "0",
            "last_month": "0",
            "total": "40",
            "environments": [
                { "name": "Prod", "this_month": "0", "last_month": "0", "total": "40" }
            ]
        })
    );
}

#[rstest]
fn monthly_spending_for_unknown_portfolio_is_empty(reports: FixtureReports) {
    assert!(
        reports
            .monthly_spending("Beluga")
            .expect("absent portfolio is not an error")
            .is_empty()
    );
}

#[rstest]
fn environment_clin_type_totals_from_fixture(reports: FixtureReports) {
    let totals = reports
        .environment_clin_type_totals("Aardvark", "Mobile", "Prod")
        .expect("lookup")
        .expect("environment exists");

    assert_eq!(
        totals.get(&BillingCode::from("JEDI_CLIN_1")),
        Some(&ClinTypeSpend {
            invoiced: Decimal::from(28_927),
            estimated: Decimal::new(66_325, 2),
        })
    );
    assert_eq!(
        totals.get(&BillingCode::from("JEDI_CLIN_2")),
        Some(&ClinTypeSpend {
            invoiced: Decimal::from(18_957),
            estimated: Decimal::from(397),
        })
    );
}

#[rstest]
fn portfolio_clin_type_rollup_fails_loudly(reports: FixtureReports) {
    assert!(matches!(
        reports.spending_by_clin_type("Aardvark"),
        Err(ReportingError::NotImplemented(_))
    ));
}

#[rstest]
#[case::before_end(date(2024, 6, 1), false)]
#[case::after_end(date(2025, 1, 15), true)]
fn expired_report_from_task_order_json_follows_report_date(
    runtime: io::Result<Runtime>,
    repo: InMemoryTaskOrderRepository,
    portfolio_id: PortfolioId,
    #[case] report_date: chrono::NaiveDate,
    #[case] expired: bool,
) {
    let runtime = runtime.expect("runtime");
    let signing_clock = FixedClock::at_date(date(2024, 1, 10));
    let mut signed = numbered_task_order(portfolio_id, "TO-EXP-1", &signing_clock);
    signed.sign(
        SignerId::new("1234567890").expect("valid signer"),
        &signing_clock,
    );
    let unsigned = numbered_task_order(portfolio_id, "TO-EXP-2", &signing_clock);
    let payload = serde_json::to_string(&vec![signed.clone(), unsigned])
        .expect("serialize task orders");

    let loaded: Vec<TaskOrder> = serde_json::from_str(&payload).expect("task orders parse");
    runtime.block_on(async {
        for task_order in &loaded {
            repo.store(task_order).await.expect("store task order");
        }
    });
    let reports = ReportService::new(
        Arc::new(FixtureSpendDataSource::new()),
        Arc::new(repo),
        Arc::new(FixedClock::at_date(report_date)),
    );

    let listed = runtime
        .block_on(reports.expired_task_orders(portfolio_id))
        .expect("expired listing");

    let expected = if expired { vec![signed] } else { Vec::new() };
    assert_eq!(listed, expected);
}
