//! Benchmarks for mapping execution
//!
//! These benchmarks cover the common paths: flat copies, naming
//! convention resolution, nested mappings and batch mapping.
//!
//! Copyright (c) 2025 Automap Team
//! Licensed under the Apache-2.0 license

use automap_core::{
    CamelCaseNamingConvention, Mappable, Mapper, Operation, SnakeCaseNamingConvention,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct Order {
    id: u64,
    customer_name: String,
    total: f64,
    note: Option<String>,
    lines: Vec<OrderLine>,
}
impl Mappable for Order {}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderDto {
    id: u64,
    customer_name: String,
    total: f64,
    note: Option<String>,
    lines: Vec<OrderLineDto>,
}
impl Mappable for OrderDto {}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct OrderLine {
    sku: String,
    quantity: u32,
}
impl Mappable for OrderLine {}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct OrderLineDto {
    sku: String,
    quantity: u32,
}
impl Mappable for OrderLineDto {}

fn create_order(lines: usize) -> Order {
    Order {
        id: 42,
        customer_name: "Ada Lovelace".to_string(),
        total: 99.5,
        note: Some("leave at the door".to_string()),
        lines: (0..lines)
            .map(|i| OrderLine {
                sku: format!("SKU-{}", i),
                quantity: (i % 5) as u32 + 1,
            })
            .collect(),
    }
}

fn create_mapper() -> Mapper {
    let result = Mapper::initialize(|registry| {
        registry.register_mapping::<OrderLine, OrderLineDto>();
        registry
            .register_mapping::<Order, OrderDto>()
            .with_naming_conventions(SnakeCaseNamingConvention, CamelCaseNamingConvention)
            .for_member("lines", Operation::map_to::<OrderLine, OrderLineDto>())?
            .for_member("note", Operation::map_from(|source| source["note"].clone()))?
            .reverse_map();
        Ok(())
    });
    match result {
        Ok(mapper) => mapper,
        Err(err) => panic!("benchmark mapper configuration failed: {}", err),
    }
}

fn bench_flat_mapping(c: &mut Criterion) {
    let mut group = c.benchmark_group("flat");
    let mapper = create_mapper();
    let line = OrderLine {
        sku: "SKU-1".to_string(),
        quantity: 3,
    };

    group.bench_function("single_line", |b| {
        b.iter(|| {
            let result = mapper.map::<OrderLine, OrderLineDto>(black_box(&line));
            black_box(result)
        })
    });

    group.finish();
}

fn bench_nested_mapping(c: &mut Criterion) {
    let mut group = c.benchmark_group("nested");
    let mapper = create_mapper();

    for size in [0usize, 10, 100] {
        let order = create_order(size);
        group.bench_with_input(BenchmarkId::new("order_lines", size), &order, |b, order| {
            b.iter(|| {
                let result = mapper.map::<Order, OrderDto>(black_box(order));
                black_box(result)
            })
        });
    }

    group.finish();
}

fn bench_reverse_mapping(c: &mut Criterion) {
    let mut group = c.benchmark_group("reverse");
    let mapper = create_mapper();
    let dto = match mapper.map::<Order, OrderDto>(&create_order(10)) {
        Ok(dto) => dto,
        Err(err) => panic!("forward mapping failed: {}", err),
    };

    group.bench_function("dto_to_order", |b| {
        b.iter(|| {
            let result = mapper.map::<OrderDto, Order>(black_box(&dto));
            black_box(result)
        })
    });

    group.finish();
}

fn bench_map_multiple(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_multiple");
    let mapper = create_mapper();

    for count in [10usize, 100, 1000] {
        let orders: Vec<Order> = (0..count).map(|_| create_order(3)).collect();
        group.bench_with_input(BenchmarkId::new("orders", count), &orders, |b, orders| {
            b.iter(|| {
                let result = mapper.map_multiple::<Order, OrderDto, _>(black_box(orders));
                black_box(result)
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_flat_mapping,
    bench_nested_mapping,
    bench_reverse_mapping,
    bench_map_multiple
);

criterion_main!(benches);
