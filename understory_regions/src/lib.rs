// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Regions: hit and hover regions for laid-out diagrams.
//!
//! A layout pass positions boxes in *logical* coordinates. Whatever in that
//! pass should react to the pointer is registered here as a region in *real*
//! coordinates (logical coordinates multiplied by the zoom scale), so pointer
//! positions can be tested without undoing the zoom.
//!
//! - [`HotSpot`]: activation targets (images, links, custom node spots, expand buttons).
//! - [`HoverSpot`]: highlight targets (node bodies, link text), keyed by id.
//! - [`Registry`]: both lists for one layout pass, replaced as a unit.
//!
//! Regions may overlap: a link's text sits inside its node's body. Queries
//! prefer link regions and fall back to a [`TieBreak`] policy otherwise.
//!
//! # Example
//!
//! ```rust
//! use kurbo::Point;
//! use understory_regions::{HoverSpot, RealRect, Registry};
//!
//! let mut registry = Registry::new();
//! let body = RealRect::from_logical(Point::new(50.0, 50.0), 120.0, 40.0, 2.0);
//! registry.replace(Vec::new(), vec![HoverSpot { id: "0".into(), rect: body }]);
//!
//! // Real coordinates: the logical box [50, 170] is [100, 340] at scale 2.
//! assert!(registry.query_hover_spot(Point::new(300.0, 150.0)).is_some());
//! assert!(registry.query_hover_spot(Point::new(60.0, 60.0)).is_none());
//! ```

pub mod rect;
pub mod registry;
pub mod spot;

pub use rect::{RealRect, point_in_rect};
pub use registry::{RegionSet, Registry, TieBreak};
pub use spot::{Action, HotSpot, HoverSpot, LinkType, Region, TriggerType};
