//! Graph search over the maze.
//!
//! This module contains the three search strategies (breadth-first, depth-first and greedy
//! best-first), the shared expansion loop they run on and the bookkeeping recorded for the
//! visualization: visited cells, cells waiting in the frontier and the expansion counter.

use std::{
    cmp::Reverse,
    collections::{BTreeMap, BTreeSet, BinaryHeap, VecDeque},
    fmt,
};

use tracing::debug;

use crate::maze::{Grid, Position};

/// Search strategy selectable by the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Strategy {
    /// Breadth-first search on a FIFO queue; finds a shortest path.
    Bfs,
    /// Depth-first search on a LIFO stack.
    Dfs,
    /// Greedy best-first search ordered by Manhattan distance to the goal.
    Greedy,
}

impl Strategy {
    /// Label shown in the interface.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bfs => "BFS",
            Self::Dfs => "DFS",
            Self::Greedy => "Greedy",
        }
    }

    /// The strategy after this one, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Bfs => Self::Dfs,
            Self::Dfs => Self::Greedy,
            Self::Greedy => Self::Bfs,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.label())
    }
}

/// Outcome of a single search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchResult {
    /// Positions from the start to the selected goal, both included. Empty when nothing was
    /// found.
    pub path: Vec<Position>,
    /// Number of moves along [`path`](SearchResult::path), zero when nothing was found.
    pub cost: usize,
    /// Whether the search ran to the end. Searches are never sliced, so this is always `true`.
    pub completed: bool,
    /// Whether the selected goal was reached.
    pub found: bool,
}

impl SearchResult {
    /// The outcome reported when the goal set is empty or the goal is unreachable.
    #[must_use]
    pub const fn not_found() -> Self {
        Self {
            path: Vec::new(),
            cost: 0,
            completed: true,
            found: false,
        }
    }
}

/// Diagnostics gathered while a search runs.
///
/// A fresh value is built for every search; nothing carries over between calls.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Positions that were taken off the frontier and expanded.
    pub visited: BTreeSet<Position>,
    /// Positions still waiting in the frontier when the search stopped.
    pub frontier: BTreeSet<Position>,
    /// Number of expansions performed.
    pub expanded: usize,
}

/// Result and diagnostics of one search call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchReport {
    /// Path and flags handed to the caller.
    pub result: SearchResult,
    /// Visualization data for the same call.
    pub stats: SearchStats,
    /// Goal the search aimed for, if the goal set was not empty.
    pub target: Option<Position>,
}

/// Manhattan distance between two positions, the heuristic of the greedy strategy.
#[must_use]
pub const fn heuristic(from: Position, goal: Position) -> usize {
    from.manhattan(goal)
}

/// Picks the goal closest to `start` by Manhattan distance.
///
/// Ties go to the smallest position in `(x, y)` order.
#[must_use]
pub fn nearest_goal(start: Position, goals: &BTreeSet<Position>) -> Option<Position> {
    goals
        .iter()
        .copied()
        .min_by_key(|&goal| (heuristic(start, goal), goal))
}

/// Frontier entry: a position and the expanded cell it was reached from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    /// Cell waiting to be expanded.
    position: Position,
    /// Cell whose expansion produced this entry, [`None`] for the start.
    parent: Option<Position>,
}

/// Container deciding the order in which entries are expanded.
///
/// Entries are allowed to appear several times; the expansion loop drops every copy after the
/// first one it pops.
trait Frontier {
    /// Whether siblings must be pushed in reverse so the first-enumerated one is popped first.
    const REVERSE_SIBLINGS: bool = false;

    /// Adds an entry; `goal` is available for strategies that rank entries.
    fn push(&mut self, entry: Entry, goal: Position);

    /// Removes the next entry to expand.
    fn pop(&mut self) -> Option<Entry>;
}

/// FIFO frontier for breadth-first search.
#[derive(Default)]
struct Queue(VecDeque<Entry>);

impl Frontier for Queue {
    fn push(&mut self, entry: Entry, _goal: Position) {
        self.0.push_back(entry);
    }

    fn pop(&mut self) -> Option<Entry> {
        self.0.pop_front()
    }
}

/// LIFO frontier for depth-first search.
#[derive(Default)]
struct Stack(Vec<Entry>);

impl Frontier for Stack {
    const REVERSE_SIBLINGS: bool = true;

    fn push(&mut self, entry: Entry, _goal: Position) {
        self.0.push(entry);
    }

    fn pop(&mut self) -> Option<Entry> {
        self.0.pop()
    }
}

/// Min-priority frontier for greedy best-first search.
///
/// The priority is the heuristic at push time and is never revised. Equal priorities pop the
/// smaller position first, then the smaller parent.
#[derive(Default)]
struct Ranked(BinaryHeap<Reverse<(usize, Entry)>>);

impl Frontier for Ranked {
    fn push(&mut self, entry: Entry, goal: Position) {
        self.0.push(Reverse((heuristic(entry.position, goal), entry)));
    }

    fn pop(&mut self) -> Option<Entry> {
        self.0.pop().map(|Reverse((_, entry))| entry)
    }
}

/// Runs one search from `start` toward the goal in `goals` nearest to it.
///
/// The statistics in the returned report describe this call only.
#[must_use]
pub fn search(
    grid: &Grid,
    strategy: Strategy,
    start: Position,
    goals: &BTreeSet<Position>,
) -> SearchReport {
    let Some(goal) = nearest_goal(start, goals) else {
        return SearchReport {
            result: SearchResult::not_found(),
            stats: SearchStats::default(),
            target: None,
        };
    };

    let (path, stats) = match strategy {
        Strategy::Bfs => explore(grid, start, goal, Queue::default()),
        Strategy::Dfs => explore(grid, start, goal, Stack::default()),
        Strategy::Greedy => explore(grid, start, goal, Ranked::default()),
    };

    let result = path.map_or_else(SearchResult::not_found, |path| SearchResult {
        cost: path.len().saturating_sub(1),
        path,
        completed: true,
        found: true,
    });

    SearchReport {
        result,
        stats,
        target: Some(goal),
    }
}

/// Expansion loop shared by every strategy.
///
/// A position is expanded the first time it is popped; later copies are skipped. The parent
/// recorded at that moment is what the returned path follows.
fn explore<F: Frontier>(
    grid: &Grid,
    start: Position,
    goal: Position,
    mut frontier: F,
) -> (Option<Vec<Position>>, SearchStats) {
    let mut stats = SearchStats::default();
    let mut explored: BTreeMap<Position, Option<Position>> = BTreeMap::new();

    frontier.push(
        Entry {
            position: start,
            parent: None,
        },
        goal,
    );
    let _ = stats.frontier.insert(start);

    while let Some(Entry { position, parent }) = frontier.pop() {
        let _ = stats.frontier.remove(&position);

        if explored.contains_key(&position) {
            continue;
        }

        let _ = explored.insert(position, parent);
        let _ = stats.visited.insert(position);
        stats.expanded += 1;

        if position == goal {
            return (Some(trace_path(&explored, goal)), stats);
        }

        let mut neighbors = grid.neighbors(position);
        if F::REVERSE_SIBLINGS {
            neighbors.reverse();
        }
        for neighbor in neighbors {
            if !explored.contains_key(&neighbor) {
                frontier.push(
                    Entry {
                        position: neighbor,
                        parent: Some(position),
                    },
                    goal,
                );
                let _ = stats.frontier.insert(neighbor);
            }
        }
    }

    (None, stats)
}

/// Walks parent links back from `goal` and returns the path in start-to-goal order.
fn trace_path(explored: &BTreeMap<Position, Option<Position>>, goal: Position) -> Vec<Position> {
    let mut path = vec![goal];
    let mut cursor = explored.get(&goal).copied().flatten();
    while let Some(step) = cursor {
        path.push(step);
        cursor = explored.get(&step).copied().flatten();
    }
    path.reverse();

    path
}

/// Search front end owned by the game.
///
/// It holds the maze of the current episode and the statistics of the latest call, which the
/// interface reads back for drawing.
#[derive(Clone, Debug)]
pub struct SearchEngine {
    /// Maze searched by every call.
    grid: Grid,
    /// Report of the most recent call.
    last: SearchReport,
}

impl SearchEngine {
    /// Wraps a maze with empty statistics.
    #[must_use]
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            last: SearchReport::default(),
        }
    }

    /// The maze being searched.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Searches for the goal nearest to `start` and replaces the stored statistics.
    pub fn run(
        &mut self,
        strategy: Strategy,
        start: Position,
        goals: &BTreeSet<Position>,
    ) -> SearchResult {
        self.last = search(&self.grid, strategy, start, goals);

        debug!(
            %strategy,
            %start,
            target = ?self.last.target,
            expanded = self.last.stats.expanded,
            cost = self.last.result.cost,
            found = self.last.result.found,
            "search finished"
        );

        self.last.result.clone()
    }

    /// Cells expanded by the latest call.
    #[must_use]
    pub const fn last_visited(&self) -> &BTreeSet<Position> {
        &self.last.stats.visited
    }

    /// Cells left in the frontier by the latest call.
    #[must_use]
    pub const fn last_frontier(&self) -> &BTreeSet<Position> {
        &self.last.stats.frontier
    }

    /// Expansions performed by the latest call.
    #[must_use]
    pub const fn last_expansion_count(&self) -> usize {
        self.last.stats.expanded
    }

    /// Goal targeted by the latest call.
    #[must_use]
    pub const fn last_target(&self) -> Option<Position> {
        self.last.target
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng as _};

    use super::*;

    const ALL: [Strategy; 3] = [Strategy::Bfs, Strategy::Dfs, Strategy::Greedy];

    /// Builds a goal set from coordinate pairs.
    fn goals(cells: &[(usize, usize)]) -> BTreeSet<Position> {
        cells.iter().map(|&(x, y)| Position::new(x, y)).collect()
    }

    /// Parses a textual maze used by the scenarios below.
    fn grid(text: &str) -> Grid {
        text.parse().expect("test maze should parse")
    }

    /// Checks that a found path starts at `start`, ends at `goal` and never skips a cell.
    fn assert_connected(grid: &Grid, result: &SearchResult, start: Position, goal: Position) {
        assert!(result.found, "path should be found");
        assert_eq!(result.path.first(), Some(&start), "path starts at the start");
        assert_eq!(result.path.last(), Some(&goal), "path ends at the goal");
        assert_eq!(result.cost, result.path.len() - 1, "cost counts moves");
        for pair in result.path.windows(2) {
            if let [from, to] = pair {
                assert!(
                    grid.neighbors(*from).contains(to),
                    "{from} -> {to} is not a legal move"
                );
            }
        }
    }

    #[test]
    fn test_empty_goal_set() {
        let maze = grid("#####\n#...#\n#...#\n#...#\n#####");

        for strategy in ALL {
            let report = search(&maze, strategy, Position::new(1, 1), &BTreeSet::new());

            assert_eq!(report.result, SearchResult::not_found());
            assert_eq!(report.result.path, Vec::new());
            assert_eq!(report.result.cost, 0);
            assert!(report.result.completed);
            assert!(!report.result.found);
            assert_eq!(report.stats, SearchStats::default(), "{strategy} expanded nothing");
            assert_eq!(report.target, None);
        }
    }

    #[test]
    fn test_open_five_by_five_bfs() {
        let maze = Grid::generate(5, 5, 0.0, &mut StdRng::seed_from_u64(1))
            .expect("valid dimensions");
        let start = Position::new(1, 1);
        let goal = Position::new(3, 3);

        let report = search(&maze, Strategy::Bfs, start, &goals(&[(3, 3)]));

        assert_connected(&maze, &report.result, start, goal);
        assert_eq!(report.result.cost, 4);
        assert_eq!(report.result.path.len(), 5);
        assert!(report.result.completed);
    }

    #[test]
    fn test_bfs_exact_path_follows_direction_order() {
        let maze = grid("#####\n#...#\n#...#\n#...#\n#####");

        let report = search(
            &maze,
            Strategy::Bfs,
            Position::new(1, 1),
            &goals(&[(3, 3)]),
        );

        assert_eq!(
            report.result.path,
            vec![
                Position::new(1, 1),
                Position::new(1, 2),
                Position::new(1, 3),
                Position::new(2, 3),
                Position::new(3, 3),
            ],
            "down is enumerated before right, so BFS reaches (1, 3) first"
        );
    }

    #[test]
    fn test_dfs_prefers_first_enumerated_neighbor() {
        let maze = grid("#####\n#...#\n#...#\n#...#\n#####");

        let report = search(
            &maze,
            Strategy::Dfs,
            Position::new(1, 1),
            &goals(&[(3, 1)]),
        );

        assert_eq!(
            report.result.path.get(1),
            Some(&Position::new(1, 2)),
            "down comes before right, so DFS dives down first"
        );
        assert_connected(&maze, &report.result, Position::new(1, 1), Position::new(3, 1));
        assert!(report.result.cost > 2, "DFS takes the long way round here");
    }

    #[test]
    fn test_greedy_heads_for_goal() {
        let maze = grid("#######\n#.....#\n#.....#\n#######");

        let report = search(
            &maze,
            Strategy::Greedy,
            Position::new(1, 1),
            &goals(&[(5, 1)]),
        );

        assert_connected(&maze, &report.result, Position::new(1, 1), Position::new(5, 1));
        assert_eq!(report.result.cost, 4);
        assert_eq!(report.stats.expanded, 5, "no detour on an open corridor");
    }

    #[test]
    fn test_ranked_frontier_breaks_ties_by_position_then_parent() {
        let goal = Position::new(3, 3);
        let entry = |x, y, parent: Option<(usize, usize)>| Entry {
            position: Position::new(x, y),
            parent: parent.map(|(px, py)| Position::new(px, py)),
        };
        let mut frontier = Ranked::default();

        frontier.push(entry(2, 1, Some((1, 1))), goal);
        frontier.push(entry(1, 2, Some((2, 2))), goal);
        frontier.push(entry(1, 2, Some((1, 1))), goal);
        frontier.push(entry(2, 2, Some((1, 2))), goal);

        let order: Vec<Entry> = std::iter::from_fn(|| frontier.pop()).collect();
        assert_eq!(
            order,
            vec![
                entry(2, 2, Some((1, 2))),
                entry(1, 2, Some((1, 1))),
                entry(1, 2, Some((2, 2))),
                entry(2, 1, Some((1, 1))),
            ],
            "lowest heuristic first, then smaller position, then smaller parent"
        );
    }

    #[test]
    fn test_greedy_tie_expands_smaller_position_first() {
        let maze = grid("#####\n#...#\n#...#\n#...#\n#####");

        let report = search(
            &maze,
            Strategy::Greedy,
            Position::new(1, 1),
            &goals(&[(3, 3)]),
        );

        assert_eq!(
            report.result.path,
            vec![
                Position::new(1, 1),
                Position::new(1, 2),
                Position::new(1, 3),
                Position::new(2, 3),
                Position::new(3, 3),
            ],
            "(1, 2) and (2, 1) tie on distance and (1, 2) is the smaller position"
        );
        assert!(
            !report.stats.visited.contains(&Position::new(2, 1)),
            "the losing sibling is never expanded"
        );
        assert!(report.stats.frontier.contains(&Position::new(2, 1)));
    }

    #[test]
    fn test_enclosed_goal_is_unreachable() {
        let maze = grid(
            "\
            #######
            #.....#
            #.###.#
            #.#.#.#
            #.###.#
            #.....#
            #######",
        );

        for strategy in ALL {
            let report = search(&maze, strategy, Position::new(1, 1), &goals(&[(3, 3)]));

            assert!(!report.result.found, "{strategy} should not reach a sealed cell");
            assert!(report.result.completed);
            assert!(report.result.path.is_empty());
            assert_eq!(report.result.cost, 0);
            assert_eq!(
                report.stats.expanded, 16,
                "{strategy} exhausts every reachable cell"
            );
            assert!(report.stats.frontier.is_empty(), "frontier drains on exhaustion");
            assert_eq!(report.target, Some(Position::new(3, 3)));
        }
    }

    #[test]
    fn test_goal_at_start() {
        let maze = grid("#####\n#...#\n#...#\n#...#\n#####");
        let start = Position::new(2, 2);

        for strategy in ALL {
            let report = search(&maze, strategy, start, &goals(&[(2, 2), (3, 3)]));

            assert_eq!(report.result.path, vec![start], "{strategy}");
            assert_eq!(report.result.cost, 0);
            assert!(report.result.found);
            assert_eq!(report.stats.expanded, 1);
        }
    }

    #[test]
    fn test_nearest_goal_selection_and_tie_break() {
        let start = Position::new(3, 3);

        assert_eq!(
            nearest_goal(start, &goals(&[(9, 9), (3, 5), (1, 1)])),
            Some(Position::new(3, 5))
        );
        assert_eq!(
            nearest_goal(start, &goals(&[(4, 3), (3, 2), (2, 3)])),
            Some(Position::new(2, 3)),
            "equal distances resolve to the smallest (x, y)"
        );
        assert_eq!(nearest_goal(start, &BTreeSet::new()), None);
    }

    #[test]
    fn test_bfs_never_longer_than_other_strategies() {
        for seed in 0..40 {
            let mut rng = StdRng::seed_from_u64(seed);
            let maze = Grid::generate(21, 15, 0.7, &mut rng).expect("valid dimensions");
            let start = Position::new(1, 1);
            let Some(goal) = maze.open_cells().last() else {
                continue;
            };
            let targets = BTreeSet::from([goal]);

            let bfs = search(&maze, Strategy::Bfs, start, &targets).result;
            for strategy in [Strategy::Dfs, Strategy::Greedy] {
                let other = search(&maze, strategy, start, &targets).result;

                assert_eq!(bfs.found, other.found, "reachability does not depend on strategy");
                if bfs.found {
                    assert_connected(&maze, &bfs, start, goal);
                    assert_connected(&maze, &other, start, goal);
                    assert!(
                        bfs.cost <= other.cost,
                        "seed {seed}: BFS {} vs {strategy} {}",
                        bfs.cost,
                        other.cost
                    );
                }
            }
        }
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let maze = Grid::generate(25, 19, 0.7, &mut StdRng::seed_from_u64(5))
            .expect("valid dimensions");
        let targets = goals(&[(23, 17), (11, 9), (21, 1)]);

        for strategy in ALL {
            let first = search(&maze, strategy, Position::new(1, 1), &targets);
            let second = search(&maze, strategy, Position::new(1, 1), &targets);

            assert_eq!(first, second, "{strategy} must be deterministic");
        }
    }

    #[test]
    fn test_visited_matches_expansion_count() {
        let maze = Grid::generate(15, 11, 0.5, &mut StdRng::seed_from_u64(8))
            .expect("valid dimensions");

        for strategy in ALL {
            let report = search(&maze, strategy, Position::new(1, 1), &goals(&[(13, 9)]));

            assert_eq!(report.stats.visited.len(), report.stats.expanded);
            assert!(
                report.stats.visited.is_disjoint(&report.stats.frontier),
                "{strategy} left an expanded cell in the frontier"
            );
            for pos in &report.stats.visited {
                assert!(maze.is_open(*pos), "{strategy} expanded a wall at {pos}");
            }
        }
    }

    #[test]
    fn test_engine_replaces_statistics_each_call() {
        let maze = grid("#######\n#.....#\n#.....#\n#######");
        let mut engine = SearchEngine::new(maze);

        let far = engine.run(Strategy::Bfs, Position::new(1, 1), &goals(&[(5, 2)]));
        let far_expanded = engine.last_expansion_count();
        assert!(far.found);
        assert!(far_expanded > 1);
        assert_eq!(engine.last_target(), Some(Position::new(5, 2)));

        let here = engine.run(Strategy::Bfs, Position::new(1, 1), &goals(&[(1, 1)]));
        assert_eq!(here.path, vec![Position::new(1, 1)]);
        assert_eq!(engine.last_expansion_count(), 1);
        assert_eq!(engine.last_visited(), &goals(&[(1, 1)]));
        assert!(engine.last_frontier().is_empty());

        let none = engine.run(Strategy::Dfs, Position::new(1, 1), &BTreeSet::new());
        assert!(!none.found);
        assert_eq!(engine.last_expansion_count(), 0);
        assert!(engine.last_visited().is_empty());
        assert_eq!(engine.last_target(), None);
    }

    #[test]
    fn test_strategy_cycle_and_labels() {
        assert_eq!(Strategy::Bfs.next(), Strategy::Dfs);
        assert_eq!(Strategy::Dfs.next(), Strategy::Greedy);
        assert_eq!(Strategy::Greedy.next(), Strategy::Bfs);
        assert_eq!(Strategy::Greedy.to_string(), "Greedy");
        assert_eq!(Strategy::Bfs.label(), "BFS");
    }
}
