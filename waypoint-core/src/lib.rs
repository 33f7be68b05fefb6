//! Waypoint core library.
//!
//! Synthesizes random weighted graphs over a catalog of named nodes and
//! searches them exhaustively for the cheapest path visiting every node.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod catalog;
mod connectivity;
mod error;
mod generator;
mod graph;
mod path;
mod permutation;
mod planner;
mod search;
mod synthesizer;
mod telemetry;
mod transform;

#[cfg(test)]
mod property;
#[cfg(test)]
mod test_utils;

pub use crate::{
    builder::PlannerBuilder,
    catalog::{CatalogEntry, NodeCatalog, NodeMetadata, NodeName},
    connectivity::{
        ConnectivityCheck, has_full_tour, has_full_tour_over, is_weakly_connected,
        is_weakly_connected_over,
    },
    error::{CatalogError, CatalogErrorCode, Result, WaypointError, WaypointErrorCode},
    generator::{
        CostRange, EdgeGenerator, EdgeProbability, PROBABILITY_FLOOR, RandomEdges,
        generate_directed,
    },
    graph::{Cost, Edge, Graph, Orientation, Score},
    path::{Path, ScoredPath},
    permutation::Permutations,
    planner::{Planner, TourPlan},
    search::{SearchStrategy, ValidPaths, select_shortest, shortest_path, valid_paths},
    synthesizer::{DEFAULT_NODE_CEILING, SynthesizedGraph, Synthesizer, clamp_node_count},
    transform::{AdjacencyMap, adjacency_map, node_set, to_undirected},
};
