// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;
use understory_mindmap::{
    Diagram, FixedAdvanceMeasurer, ImageTable, LayoutEngine, LinkSpec, Node, PreparedDiagram,
    Recorder, ViewState,
};
use understory_regions::Registry;

/// Complete tree with `fanout` children per node, `depth` levels below the root.
fn gen_tree(depth: usize, fanout: usize, label: &mut usize) -> Node {
    *label += 1;
    let mut node = Node::new(format!("node {label}\nsecond line of text"));
    if *label % 3 == 0 {
        node = node.with_link(LinkSpec::url(format!("https://example.com/{label}"), "docs"));
    }
    if depth > 0 {
        for _ in 0..fanout {
            node = node.with_child(gen_tree(depth - 1, fanout, label));
        }
    }
    node
}

fn gen_diagram(depth: usize, fanout: usize) -> (Diagram, usize) {
    let mut count = 0;
    let root = gen_tree(depth, fanout, &mut count);
    let mut diagram = Diagram::new(root);
    diagram.global_style.max_width = 120.0;
    (diagram, count)
}

fn bench_prepare(c: &mut Criterion) {
    let mut group = c.benchmark_group("prepare");
    let measurer = FixedAdvanceMeasurer::default();
    for &(depth, fanout) in &[(3_usize, 4_usize), (5, 4)] {
        let (diagram, nodes) = gen_diagram(depth, fanout);
        group.throughput(Throughput::Elements(nodes as u64));
        group.bench_function(format!("d{depth}_f{fanout}"), |b| {
            b.iter(|| black_box(PreparedDiagram::prepare(&diagram, &measurer)));
        });
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let measurer = FixedAdvanceMeasurer::default();
    for &(depth, fanout) in &[(3_usize, 4_usize), (5, 4)] {
        let (diagram, nodes) = gen_diagram(depth, fanout);
        let prepared = PreparedDiagram::prepare(&diagram, &measurer);
        let images = ImageTable::<()>::new();
        let engine = LayoutEngine::new(&prepared, &images);
        let view = ViewState {
            hover: Some("0-1-1".into()),
            ..ViewState::new(&prepared)
        };
        group.throughput(Throughput::Elements(nodes as u64));
        group.bench_function(format!("d{depth}_f{fanout}"), |b| {
            b.iter_batched(
                Recorder::new,
                |mut surface| black_box(engine.layout(&mut surface, &view)),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_hover_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("hover_query");
    let (diagram, _) = gen_diagram(5, 4);
    let prepared = PreparedDiagram::prepare(&diagram, &FixedAdvanceMeasurer::default());
    let images = ImageTable::<()>::new();
    let result = LayoutEngine::new(&prepared, &images)
        .layout(&mut Recorder::new(), &ViewState::new(&prepared));
    let points: Vec<Point> = result
        .hover_spots
        .iter()
        .step_by(7)
        .map(|h| h.rect.top_left.midpoint(h.rect.bottom_right))
        .collect();
    let mut registry = Registry::new();
    registry.replace(result.hot_spots, result.hover_spots);
    group.throughput(Throughput::Elements(points.len() as u64));
    group.bench_function("linear_scan", |b| {
        b.iter(|| {
            let found = points
                .iter()
                .filter(|p| registry.query_hover_spot(**p).is_some())
                .count();
            black_box(found)
        });
    });
    group.finish();
}

criterion_group!(benches, bench_prepare, bench_layout, bench_hover_query);
criterion_main!(benches);
