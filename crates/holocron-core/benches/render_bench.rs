//! # Routing and Rendering Benchmarks
//!
//! Run with: `cargo bench -p holocron-core`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use holocron_core::render::{render_detail, render_favorites, render_list};
use holocron_core::{Category, FavoriteRecord, ResourceId, Route};
use serde_json::{Value, json};
use std::hint::black_box;

/// A people collection page with `size` entries.
fn people_page(size: u32) -> Value {
    let results: Vec<Value> = (1..=size)
        .map(|i| {
            json!({
                "name": format!("Person {i}"),
                "url": format!("https://swapi.dev/api/people/{i}/"),
                "birth_year": "19BBY",
                "eye_color": if i % 2 == 0 { "blue" } else { "hazel" },
            })
        })
        .collect();
    json!({ "count": size, "results": results })
}

fn bench_route_parse(c: &mut Criterion) {
    let fragments = ["", "#/", "#/favorites", "#/people", "#/Starships/12", "#/droids/1"];
    c.bench_function("route_parse", |b| {
        b.iter(|| {
            for fragment in fragments {
                black_box(Route::parse(black_box(fragment)));
            }
        });
    });
}

fn bench_render_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_list");
    for size in [10u32, 100, 1000] {
        let page = people_page(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &page, |b, page| {
            b.iter(|| render_list(Category::People, black_box(page)).expect("render"));
        });
    }
    group.finish();
}

fn bench_render_detail(c: &mut Criterion) {
    let planet = json!({
        "name": "Tatooine",
        "rotation_period": "23",
        "orbital_period": "304",
        "diameter": "10465",
        "climate": "arid",
        "gravity": "1 standard",
        "terrain": "desert",
        "surface_water": "1",
        "population": "200000",
        "residents": ["a", "b", "c"],
        "films": ["a", "b"],
        "created": "2014-12-09T13:50:49.641000Z",
        "edited": "2014-12-20T20:58:18.411000Z",
        "url": "https://swapi.dev/api/planets/1/"
    });
    let id = ResourceId::new(1).expect("id");
    c.bench_function("render_detail", |b| {
        b.iter(|| render_detail(Category::Planets, id, black_box(&planet), true).expect("render"));
    });
}

fn bench_render_favorites(c: &mut Criterion) {
    let records: Vec<FavoriteRecord> = (1..=200u32)
        .map(|i| {
            let category = Category::ALL[(i as usize) % Category::ALL.len()];
            FavoriteRecord::new(category, ResourceId::new(i).expect("id"), format!("Entity {i}"))
        })
        .collect();
    c.bench_function("render_favorites_200", |b| {
        b.iter(|| render_favorites(black_box(&records)));
    });
}

criterion_group!(
    benches,
    bench_route_parse,
    bench_render_list,
    bench_render_detail,
    bench_render_favorites
);
criterion_main!(benches);
