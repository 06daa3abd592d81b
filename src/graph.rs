use crate::{sampling::chance, symmetric_set::SymmetricSet};

use petgraph::{
    algo::{has_path_connecting, tarjan_scc},
    graph::NodeIndex,
    stable_graph::StableGraph,
    Undirected,
};
use rand::prelude::*;
use serde::{Deserialize, Serialize};

/// The planned links between rooms, by room index. Edges are normalized so the smaller index
/// comes first, and no edge appears twice.
///
/// This is a planning aid only. Nothing carves corridors along these edges yet.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct RoomConnections {
    pub num_rooms: usize,
    /// Rooms visited from the entrance (room 0) to the objective (the last room).
    pub main_path: Vec<usize>,
    pub edges: Vec<(usize, usize)>,
}

impl RoomConnections {
    /// Node `i` of the returned graph holds room index `i`. Edges naming a room past
    /// `num_rooms` are dropped.
    pub fn to_graph(&self) -> StableGraph<usize, (), Undirected> {
        let mut graph = StableGraph::default();
        for i in 0..self.num_rooms {
            graph.add_node(i);
        }
        for &(a, b) in self.edges.iter() {
            if a >= self.num_rooms || b >= self.num_rooms {
                log::warn!("Dropping edge ({}, {}) between {} rooms", a, b, self.num_rooms);
                continue;
            }
            graph.add_edge(NodeIndex::new(a), NodeIndex::new(b), ());
        }

        graph
    }

    /// True iff the planned edges link rooms `a` and `b`, possibly through other rooms.
    pub fn are_linked(&self, a: usize, b: usize) -> bool {
        if a >= self.num_rooms || b >= self.num_rooms {
            return false;
        }

        has_path_connecting(&self.to_graph(), NodeIndex::new(a), NodeIndex::new(b), None)
    }

    /// Room indices of the biggest connected component, ascending.
    pub fn largest_component(&self) -> Vec<usize> {
        let graph = self.to_graph();
        let mut largest: Vec<usize> = tarjan_scc(&graph)
            .into_iter()
            .max_by_key(|c| c.len())
            .unwrap_or_default()
            .into_iter()
            .map(|n| graph[n])
            .collect();
        largest.sort_unstable();

        largest
    }
}

/// Plans a main path from room 0 to the last room through a shuffled subset of the rooms in
/// between, then sprinkles extra edges between random pairs.
///
/// Each interior room joins the main path with probability `path_inclusion_chance`; each ordered
/// pair of distinct rooms gets an extra edge with probability `extra_connection_chance`. Both are
/// clamped to `[0, 1]`, and NaN counts as 0.
pub fn plan_connections(
    num_rooms: usize,
    path_inclusion_chance: f64,
    extra_connection_chance: f64,
    rng: &mut impl Rng,
) -> RoomConnections {
    let mut main_path = Vec::new();
    if num_rooms > 0 {
        main_path.push(0);
    }
    if num_rooms > 1 {
        let mut middle: Vec<usize> = (1..num_rooms - 1)
            .filter(|_| chance(rng, path_inclusion_chance))
            .collect();
        middle.shuffle(rng);
        main_path.extend(middle);
        main_path.push(num_rooms - 1);
    }

    let path_edges = main_path.windows(2).map(|w| (w[0], w[1]));

    let mut extra_edges = Vec::new();
    for i in 0..num_rooms {
        for j in (0..num_rooms).filter(|j| *j != i) {
            if chance(rng, extra_connection_chance) {
                extra_edges.push((i, j));
            }
        }
    }

    let mut seen = SymmetricSet::new();
    let edges: Vec<_> = path_edges
        .chain(extra_edges)
        .map(|(a, b)| SymmetricSet::order_indices(a, b))
        .filter(|&(a, b)| seen.insert(a, b))
        .collect();
    log::debug!(
        "Planned {} room connections, main path = {:?}",
        edges.len(),
        main_path
    );

    RoomConnections {
        num_rooms,
        main_path,
        edges,
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝

#[cfg(test)]
mod tests {
    use super::*;

    use crate::sampling::small_rng;

    #[test]
    fn test_main_path_runs_from_first_to_last_room() {
        let mut rng = small_rng(5);
        for _ in 0..50 {
            let plan = plan_connections(6, 0.75, 0.25, &mut rng);

            assert_eq!(plan.main_path.first(), Some(&0));
            assert_eq!(plan.main_path.last(), Some(&5));
            assert!(plan.are_linked(0, 5));
        }
    }

    #[test]
    fn test_edges_are_normalized_and_unique() {
        let mut rng = small_rng(6);
        let plan = plan_connections(8, 0.5, 0.9, &mut rng);

        let mut seen = SymmetricSet::new();
        for &(a, b) in plan.edges.iter() {
            assert!(a < b, "({}, {}) is not normalized", a, b);
            assert!(seen.insert(a, b), "({}, {}) is duplicated", a, b);
        }
    }

    #[test]
    fn test_full_inclusion_visits_every_room_without_extras() {
        let mut rng = small_rng(7);
        let plan = plan_connections(5, 1.0, 0.0, &mut rng);

        let mut visited = plan.main_path.clone();
        visited.sort_unstable();
        assert_eq!(visited, vec![0, 1, 2, 3, 4]);
        assert_eq!(plan.edges.len(), 4);
        assert_eq!(plan.largest_component(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_no_inclusion_links_ends_directly() {
        let mut rng = small_rng(8);
        let plan = plan_connections(4, 0.0, 0.0, &mut rng);

        assert_eq!(plan.main_path, vec![0, 3]);
        assert_eq!(plan.edges, vec![(0, 3)]);
        assert!(!plan.are_linked(1, 2));
        assert_eq!(plan.largest_component(), vec![0, 3]);
    }

    #[test]
    fn test_degenerate_room_counts() {
        let mut rng = small_rng(9);

        assert_eq!(plan_connections(0, 0.5, 0.5, &mut rng), RoomConnections::default());

        let single = plan_connections(1, 0.5, 0.5, &mut rng);
        assert_eq!(single.main_path, vec![0]);
        assert!(single.edges.is_empty());
        assert!(single.are_linked(0, 0));
        assert!(!single.are_linked(0, 1));
    }

    #[test]
    fn test_out_of_range_chances_are_clamped() {
        let mut rng = small_rng(13);

        let never = plan_connections(5, -0.5, f64::NAN, &mut rng);
        assert_eq!(never.main_path, vec![0, 4]);
        assert_eq!(never.edges, vec![(0, 4)]);

        let always = plan_connections(4, 2.0, f64::INFINITY, &mut rng);
        assert_eq!(always.main_path.len(), 4);
        assert_eq!(always.edges.len(), 6);
    }

    #[test]
    fn test_dangling_edges_are_dropped() {
        let plan = RoomConnections {
            num_rooms: 2,
            main_path: vec![0, 1],
            edges: vec![(0, 1), (1, 5), (7, 0)],
        };

        assert_eq!(plan.to_graph().edge_count(), 1);
        assert_eq!(plan.largest_component(), vec![0, 1]);
        assert!(plan.are_linked(0, 1));
        assert!(!plan.are_linked(1, 5));
    }

    #[test]
    fn test_every_extra_edge_when_certain() {
        let mut rng = small_rng(10);
        let plan = plan_connections(4, 0.0, 1.0, &mut rng);

        assert_eq!(plan.edges.len(), 6);
    }
}
