// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region sets and the hit-region registry.
//!
//! ## Query semantics
//!
//! Queries scan regions in registration order and collect every region whose
//! rect contains the point (inclusive edges):
//!
//! - no match: `None`;
//! - one match: that region;
//! - several matches: the preferred match of highest [`Region::precedence`],
//!   the first registered among equals; with no preferred match the
//!   [`TieBreak`] policy decides.
//!
//! Layout registers regions depth-first with children before their parent, and
//! a node's body spot before the spots drawn inside it, so the last match of an
//! ambiguous query is the outermost region.

use kurbo::Point;

use crate::spot::{HotSpot, HoverSpot, Region};

/// Policy for overlapping candidates when none of them is preferred.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum TieBreak {
    /// Last-registered match wins (the outermost ancestor).
    #[default]
    Outermost,
    /// First-registered match wins (the innermost descendant).
    Innermost,
    /// Ambiguous queries yield no result.
    Strict,
}

/// An ordered list of regions of one kind.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionSet<R> {
    regions: Vec<R>,
}

impl<R> Default for RegionSet<R> {
    fn default() -> Self {
        Self {
            regions: Vec::new(),
        }
    }
}

impl<R> FromIterator<R> for RegionSet<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self {
            regions: iter.into_iter().collect(),
        }
    }
}

impl<R> From<Vec<R>> for RegionSet<R> {
    fn from(regions: Vec<R>) -> Self {
        Self { regions }
    }
}

impl<R: Region> RegionSet<R> {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every region.
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    /// Number of registered regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether no region is registered.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Regions in registration order.
    pub fn iter(&self) -> core::slice::Iter<'_, R> {
        self.regions.iter()
    }

    /// All regions containing `pt`, in registration order.
    pub fn matches(&self, pt: Point) -> impl Iterator<Item = &R> + '_ {
        self.regions.iter().filter(move |r| r.rect().contains(pt))
    }

    /// Resolve the region under `pt`; see the module docs for overlap rules.
    pub fn query_point(&self, pt: Point, tie_break: TieBreak) -> Option<&R> {
        let candidates: Vec<&R> = self.matches(pt).collect();
        match candidates.as_slice() {
            [] => None,
            [only] => Some(*only),
            many => many
                .iter()
                .copied()
                .filter(|r| r.is_preferred())
                .fold(None::<&R>, |best, r| match best {
                    Some(b) if b.precedence() >= r.precedence() => Some(b),
                    _ => Some(r),
                })
                .or(match tie_break {
                    TieBreak::Outermost => many.last().copied(),
                    TieBreak::Innermost => many.first().copied(),
                    TieBreak::Strict => None,
                }),
        }
    }
}

impl<'a, R> IntoIterator for &'a RegionSet<R> {
    type Item = &'a R;
    type IntoIter = core::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.iter()
    }
}

/// Hot spots and hover spots of one layout pass.
///
/// The registry is replaced as a unit: [`Registry::replace`] swaps in the
/// complete region lists of a finished pass, so queries never observe a
/// partially rebuilt state and no region of an older pass survives.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    hot_spots: RegionSet<HotSpot>,
    hover_spots: RegionSet<HoverSpot>,
    tie_break: TieBreak,
    generation: u64,
}

impl Registry {
    /// Create an empty registry with the default [`TieBreak::Outermost`] policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with an explicit tie-break policy.
    pub fn with_tie_break(tie_break: TieBreak) -> Self {
        Self {
            tie_break,
            ..Self::default()
        }
    }

    /// Change the policy used for ambiguous queries.
    pub fn set_tie_break(&mut self, tie_break: TieBreak) {
        self.tie_break = tie_break;
    }

    /// Current tie-break policy.
    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Drop all regions.
    pub fn clear(&mut self) {
        self.hot_spots.clear();
        self.hover_spots.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    /// Replace all regions with the output of a completed layout pass.
    pub fn replace(&mut self, hot_spots: Vec<HotSpot>, hover_spots: Vec<HoverSpot>) {
        self.hot_spots = hot_spots.into();
        self.hover_spots = hover_spots.into();
        self.generation = self.generation.wrapping_add(1);
    }

    /// Number of times the registry was cleared or replaced.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Registered hot spots.
    pub fn hot_spots(&self) -> &RegionSet<HotSpot> {
        &self.hot_spots
    }

    /// Registered hover spots.
    pub fn hover_spots(&self) -> &RegionSet<HoverSpot> {
        &self.hover_spots
    }

    /// Resolve the hot spot under a real-coordinate point.
    pub fn query_hot_spot(&self, pt: Point) -> Option<&HotSpot> {
        self.hot_spots.query_point(pt, self.tie_break)
    }

    /// Resolve the hover spot under a real-coordinate point.
    pub fn query_hover_spot(&self, pt: Point) -> Option<&HoverSpot> {
        self.hover_spots.query_point(pt, self.tie_break)
    }
}
