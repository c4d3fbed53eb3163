// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover and click handling through the interaction controller.
//!
//! Sweeps a pointer across the sample diagram at zoom 1.5, printing hover
//! transitions, then clicks the expand button of the collapsed node.
//!
//! Run:
//! - `cargo run -p understory_demos --example mindmap_hover`

use kurbo::Point;
use understory_interaction::{Controller, HoverEvent};
use understory_mindmap::{Diagram, FixedAdvanceMeasurer, ImageTable, PreparedDiagram, Recorder};
use understory_regions::TriggerType;

const SAMPLE: &str = include_str!("../data/sample.json");

fn main() -> understory_mindmap::Result<()> {
    tracing_subscriber::fmt::init();

    let diagram = Diagram::from_json(SAMPLE)?;
    diagram.validate()?;
    let prepared = PreparedDiagram::prepare(&diagram, &FixedAdvanceMeasurer::new(8.0, 12.0, -3.0));
    let images = ImageTable::placeholders(&diagram.images);
    let mut ctl = Controller::new(prepared, images, Recorder::new());

    let scale = 1.5;
    let first = ctl.layout(scale, 0.0, 0.0, None);
    println!(
        "initial pass: {} hover spots, {} hot spots",
        first.hover_spots.len(),
        first.hot_spots.len()
    );

    // Sweep diagonally through real coordinates.
    for step in 0..40 {
        let p = Point::new(60.0 + f64::from(step) * 20.0, 60.0 + f64::from(step) * 6.0);
        for event in ctl.pointer_moved(p) {
            match event {
                HoverEvent::Enter(id) => println!("({:.0}, {:.0}) enter {id}", p.x, p.y),
                HoverEvent::Leave(id) => println!("({:.0}, {:.0}) leave {id}", p.x, p.y),
            }
        }
    }

    let button = ctl
        .registry()
        .hot_spots()
        .iter()
        .find(|s| {
            s.trigger_type == TriggerType::ExpandCollapse && s.node_id.as_deref() == Some("0-2")
        })
        .map(|s| s.rect.top_left.midpoint(s.rect.bottom_right));
    if let Some(at) = button {
        let before = ctl.registry().hover_spots().len();
        ctl.activate(at);
        println!(
            "expanded 0-2: {} -> {} hover spots",
            before,
            ctl.registry().hover_spots().len()
        );
    }
    Ok(())
}
