// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless layout of a JSON diagram.
//!
//! Loads and validates `data/sample.json`, lays it out onto a recording
//! surface, and prints the draw calls and regions.
//!
//! Run:
//! - `cargo run -p understory_demos --example mindmap_headless`

use understory_mindmap::{
    Diagram, DrawCommand, FixedAdvanceMeasurer, ImageTable, LayoutEngine, PreparedDiagram,
    Recorder, ViewState,
};

const SAMPLE: &str = include_str!("../data/sample.json");

fn main() -> understory_mindmap::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
        .init();

    let diagram = Diagram::from_json(SAMPLE)?;
    diagram.validate()?;

    // Roughly a 16px proportional font.
    let measurer = FixedAdvanceMeasurer::new(8.0, 12.0, -3.0);
    let prepared = PreparedDiagram::prepare(&diagram, &measurer);
    let images = ImageTable::placeholders(&diagram.images);

    let mut surface = Recorder::new();
    let view = ViewState::new(&prepared);
    let result = LayoutEngine::new(&prepared, &images).layout(&mut surface, &view);

    println!(
        "tree height {:.1}, width {:.1}, {} draw calls",
        result.tree_height,
        result.width,
        surface.commands.len()
    );
    for cmd in &surface.commands {
        match cmd {
            DrawCommand::RoundedRect { rect, fill, stroke } => {
                let r = rect.rect();
                println!(
                    "  rect ({:.1}, {:.1})-({:.1}, {:.1}) fill={fill:?} stroke={stroke:?}",
                    r.x0, r.y0, r.x1, r.y1
                );
            }
            DrawCommand::Text { text, at, .. } => {
                println!("  text {text:?} at ({:.1}, {:.1})", at.x, at.y);
            }
            DrawCommand::Bezier { curve, style } => {
                println!(
                    "  curve ({:.1}, {:.1}) -> ({:.1}, {:.1}) {}",
                    curve.p0.x, curve.p0.y, curve.p3.x, curve.p3.y, style.color
                );
            }
            DrawCommand::Image { rect } => println!("  image {rect:?}"),
            DrawCommand::Clear => println!("  clear"),
        }
    }

    println!("hover spots:");
    for spot in &result.hover_spots {
        println!("  {:8} {:?}", spot.id, spot.rect);
    }
    println!("hot spots:");
    for spot in &result.hot_spots {
        println!(
            "  {:?}/{:?} owner={:?} link={:?}",
            spot.trigger_type, spot.action, spot.node_id, spot.link
        );
    }
    Ok(())
}
