//! # Caseflow Store Benchmarks
//!
//! | Path                     | Expectation                          |
//! |--------------------------|--------------------------------------|
//! | normalize a case page    | linear in cases and nested entities  |
//! | reduce a page into state | linear in the page, not in the table |
//! | memoized selector        | no recomputation on unrelated events |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::{json, Value};

use cf_01_normalizer::{cases_schema, normalize};
use cf_02_entity_store::{reduce, selectors, AppState, Memoized};
use shared_bus::StoreEvent;
use shared_types::{EntityTable, Pagination};

fn case_page(size: usize, offset: usize) -> Value {
    Value::Array(
        (offset..offset + size)
            .map(|i| {
                json!({
                    "id": i.to_string(),
                    "status": "open",
                    "asset": { "id": format!("a{}", i % 50), "unitNumber": i % 50 },
                    "serviceProvider": { "id": format!("sp{}", i % 7), "name": "Provider" }
                })
            })
            .collect(),
    )
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("cf-01-normalize");
    let schema = cases_schema();

    for size in [10, 100, 1000] {
        let page = case_page(size, 0);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("case_page", size), &page, |b, page| {
            b.iter(|| black_box(normalize(page, &schema).is_ok()));
        });
    }
    group.finish();
}

fn bench_reduce(c: &mut Criterion) {
    let mut group = c.benchmark_group("cf-02-reduce");
    let schema = cases_schema();

    for existing in [0, 1000, 10_000] {
        let mut state = AppState::default();
        if existing > 0 {
            if let Ok(data) = normalize(&case_page(existing, 0), &schema) {
                state = reduce(state, &StoreEvent::AddOrUpdateCases(data));
            }
        }
        let Ok(page) = normalize(&case_page(25, existing), &schema) else {
            continue;
        };
        let event = StoreEvent::AddOrUpdateCases(page);

        group.bench_with_input(
            BenchmarkId::new("merge_page_into", existing),
            &(state, event),
            |b, (state, event)| {
                b.iter(|| black_box(reduce(state.clone(), event)));
            },
        );
    }
    group.finish();
}

fn bench_memoized_selector(c: &mut Criterion) {
    let mut group = c.benchmark_group("cf-02-selectors");
    let Ok(data) = normalize(&case_page(1000, 0), &cases_schema()) else {
        return;
    };
    let state = reduce(AppState::default(), &StoreEvent::AddOrUpdateCases(data));
    let unrelated = reduce(
        state.clone(),
        &StoreEvent::SetFavoritePagination(Pagination::default()),
    );

    let open_cases = Memoized::new(
        |state: &AppState| state.cases.table.clone(),
        |table: &EntityTable| {
            table
                .records_in_response_order()
                .into_iter()
                .filter(|c| c.get("status") == Some(&json!("open")))
                .count()
        },
    );

    group.bench_function("open_cases_cached", |b| {
        b.iter(|| black_box(open_cases.get(&unrelated)));
    });
    group.bench_function("open_cases_uncached", |b| {
        b.iter(|| {
            black_box(
                selectors::cases(&state)
                    .into_iter()
                    .filter(|c| c.get("status") == Some(&json!("open")))
                    .count(),
            )
        });
    });
    group.finish();
}

criterion_group!(benches, bench_normalize, bench_reduce, bench_memoized_selector);
criterion_main!(benches);
