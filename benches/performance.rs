use budget_insight::{
    config::InsightConfig,
    core::{deficit::DeficitResolver, report_analyzer::ReportAnalyzer},
    ledger::Ledger,
    simulation::ScenarioSimulator,
};
use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

const CATEGORIES: [&str; 6] = ["Salary", "Rent", "Food", "Travel", "Fuel", "Entertainment"];

fn build_sample_ledger(txn_count: usize) -> Ledger {
    let mut ledger = Ledger::new(2025);
    let start_date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

    for idx in 0..txn_count {
        let date = start_date + Duration::days((idx % 365) as i64);
        let category = CATEGORIES[idx % CATEGORIES.len()];
        let amount = if category == "Salary" {
            250.0 + (idx % 50) as f64
        } else {
            -(50.0 + (idx % 100) as f64)
        };
        ledger.add_transaction(date, category, amount);
    }
    ledger
}

fn bench_ledger_aggregates(c: &mut Criterion) {
    let ledger = build_sample_ledger(black_box(10_000));

    c.bench_function("monthly_totals_10k", |b| {
        b.iter(|| black_box(ledger.calculate_monthly_totals()))
    });

    c.bench_function("group_by_category_10k", |b| {
        b.iter(|| black_box(ledger.get_transactions_by_category()))
    });

    c.bench_function("report_analyzer_10k", |b| {
        let analyzer = ReportAnalyzer::from_transactions(ledger.transactions());
        b.iter(|| {
            black_box(analyzer.find_highest_spending_month(2025));
            black_box(analyzer.list_negative_balance_months(2025));
        })
    });
}

fn bench_deficit_and_scenarios(c: &mut Criterion) {
    let ledger = build_sample_ledger(black_box(10_000));
    let config = InsightConfig::default();

    c.bench_function("deficit_resolver_10k", |b| {
        b.iter(|| {
            let resolver = DeficitResolver::new(&ledger, &config);
            black_box(resolver.proportional_reductions());
        })
    });

    c.bench_function("scenario_compare_10k", |b| {
        b.iter_batched(
            || ScenarioSimulator::with_base(ledger.scenario_base(&config)),
            |mut simulator| {
                simulator.create_scenario("Current").expect("create current");
                simulator.create_scenario("Lean").expect("create lean");
                simulator
                    .apply_expense_change("Lean", "Food", 0.0)
                    .expect("food exists");
                black_box(simulator.compare_scenarios("Current", "Lean").expect("compare"));
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_ledger_aggregates, bench_deficit_and_scenarios);
criterion_main!(benches);
