//! Tracing paths and cycles through a sparse graph of active edges.

use std::collections::HashSet;

use itertools::Itertools;
use petgraph::graphmap::UnGraphMap;
use unordered_pair::UnorderedPair;

use crate::location::Location;

/// A sparse graph of active edges whose connected pieces are simple paths or cycles.
pub trait TrackSubject {
    /// The next node with at least one unvisited incident edge, if any is left.
    fn find_next_node(&mut self) -> Option<Location>;

    /// Cross one unvisited edge incident to `from`, marking it visited, and return the node on its other side.
    fn navigate_over_unvisited_edge_from(&mut self, from: Location) -> Option<Location>;
}

/// A maximal path (or cycle) of active edges.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Track {
    /// The two endpoints; equal for a cycle.
    pub ends: (Location, Location),
    /// Number of edges along the track.
    pub legs: usize,
}

impl Track {
    /// Manhattan distance between the two ends.
    pub fn distance(&self) -> usize {
        self.ends.0.distance_to(self.ends.1)
    }

    /// Whether the track is a cycle.
    pub fn closed(&self) -> bool {
        self.distance() == 0
    }
}

/// Every track of a board plus the total number of active edges.
#[derive(Clone, Debug, Default)]
pub struct TrackTopology {
    tracks: Vec<Track>,
    total_legs: usize,
}

impl TrackTopology {
    /// Every track, in the order traced.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Number of active edges across all tracks.
    pub fn total_legs(&self) -> usize {
        self.total_legs
    }

    /// Trace the tracks formed by the edges of `graph`.
    pub fn from_graph(graph: &UnGraphMap<Location, ()>) -> Self {
        trace_tracks(&mut GraphTrackSubject::new(graph))
    }
}

/// Walk from `start` until no unvisited edge is left.
fn walk(subject: &mut impl TrackSubject, start: Location) -> Option<Track> {
    let mut end = start;
    let mut legs = 0;
    while let Some(next) = subject.navigate_over_unvisited_edge_from(end) {
        end = next;
        legs += 1;
    }

    (legs > 0).then_some(Track { ends: (start, end), legs })
}

/// Split the active edges of `subject` into tracks.
///
/// Each track is found by walking both ways out of a start node and joining the two halves at that node.
pub fn trace_tracks(subject: &mut impl TrackSubject) -> TrackTopology {
    let mut tracks = Vec::new();

    while let Some(start) = subject.find_next_node() {
        let track = match (walk(subject, start), walk(subject, start)) {
            (Some(first), Some(second)) => Track {
                ends: (first.ends.1, second.ends.1),
                legs: first.legs + second.legs,
            },
            (Some(only), None) | (None, Some(only)) => only,
            // the node had nothing left to walk after all
            (None, None) => continue,
        };
        tracks.push(track);
    }

    let total_legs = tracks.iter().map(|track| track.legs).sum();
    TrackTopology { tracks, total_legs }
}

/// [`TrackSubject`] over an undirected graph of active edges, visiting nodes in insertion order.
pub struct GraphTrackSubject<'a> {
    graph: &'a UnGraphMap<Location, ()>,
    nodes: Vec<Location>,
    cursor: usize,
    visited: HashSet<UnorderedPair<Location>>,
}

impl<'a> GraphTrackSubject<'a> {
    /// A subject with every edge of `graph` unvisited.
    pub fn new(graph: &'a UnGraphMap<Location, ()>) -> Self {
        Self {
            graph,
            nodes: graph.nodes().collect_vec(),
            cursor: 0,
            visited: HashSet::with_capacity(graph.edge_count()),
        }
    }

    fn unvisited(&self, from: Location) -> Option<Location> {
        self.graph.neighbors(from).find(|&to| !self.visited.contains(&UnorderedPair(from, to)))
    }
}

impl TrackSubject for GraphTrackSubject<'_> {
    fn find_next_node(&mut self) -> Option<Location> {
        while let Some(&node) = self.nodes.get(self.cursor) {
            if self.unvisited(node).is_some() {
                return Some(node);
            }
            self.cursor += 1;
        }

        None
    }

    fn navigate_over_unvisited_edge_from(&mut self, from: Location) -> Option<Location> {
        let to = self.unvisited(from)?;
        self.visited.insert(UnorderedPair(from, to));
        Some(to)
    }
}
