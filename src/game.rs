//! Episode state: the agent, its food, the ghost and the path being followed.

use std::collections::BTreeSet;

use rand::{rngs::StdRng, seq::SliceRandom as _, SeedableRng as _};
use tracing::info;

use crate::{
    config::{Config, ConfigurationError},
    maze::{Grid, Position, AGENT_START},
    pathfinding::{SearchEngine, SearchResult, Strategy},
};

/// Game state driven by the terminal shell.
///
/// The shell calls [`update`](Game::update) once per frame and renders the accessors. Every time
/// a pellet is eaten, or the current path runs out while food remains, a new search is run from
/// the agent's position.
pub(crate) struct Game {
    /// Random source for mazes and food placement.
    rng: StdRng,
    /// Grid columns.
    width: usize,
    /// Grid rows.
    height: usize,
    /// Wall probability on even/even interior cells.
    wall_density: f64,
    /// Pellets placed per episode.
    food_count: usize,
    /// Strategy used by the next search.
    pub(crate) strategy: Strategy,
    /// Maze and statistics of the latest search.
    pub(crate) engine: SearchEngine,
    /// Current agent cell.
    pub(crate) agent: Position,
    /// Pellets still on the board.
    pub(crate) foods: BTreeSet<Position>,
    /// Static ghost cells, drawn only.
    pub(crate) ghosts: Vec<Position>,
    /// Result of the latest search.
    pub(crate) result: SearchResult,
    /// Index of the next path cell to move to.
    pub(crate) step_index: usize,
    /// Whether frames stop advancing the agent and manual steps take over.
    pub(crate) step_mode: bool,
    /// Whether visited and frontier cells are drawn.
    pub(crate) visualize: bool,
}

impl Game {
    /// Creates a game from validated settings and runs the first search.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if the settings do not describe a buildable maze.
    pub(crate) fn new(config: &Config) -> Result<Self, ConfigurationError> {
        config.validate()?;

        let mut rng = config
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        let grid = Grid::generate(config.width, config.height, config.wall_density, &mut rng)?;

        let mut game = Self {
            rng,
            width: config.width,
            height: config.height,
            wall_density: config.wall_density,
            food_count: config.food_count,
            strategy: config.algorithm,
            engine: SearchEngine::new(grid),
            agent: AGENT_START,
            foods: BTreeSet::new(),
            ghosts: Vec::new(),
            result: SearchResult::default(),
            step_index: 0,
            step_mode: false,
            visualize: true,
        };
        game.populate();
        game.run_search();

        Ok(game)
    }

    /// Starts a new episode on a freshly generated maze.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if the maze cannot be generated.
    pub(crate) fn restart(&mut self) -> Result<(), ConfigurationError> {
        let grid = Grid::generate(self.width, self.height, self.wall_density, &mut self.rng)?;
        self.engine = SearchEngine::new(grid);
        self.populate();
        self.run_search();

        Ok(())
    }

    /// Switches strategy and starts a new episode.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if the maze cannot be generated.
    pub(crate) fn set_strategy(&mut self, strategy: Strategy) -> Result<(), ConfigurationError> {
        info!(from = %self.strategy, to = %strategy, "strategy changed");
        self.strategy = strategy;
        self.restart()
    }

    /// Places the agent, the food and the ghost on the current maze.
    ///
    /// The ghost always sits at `(width - 2, height - 2)`. When both sides are even that cell may
    /// be a wall; the ghost is drawn there anyway since it never moves or blocks the search.
    fn populate(&mut self) {
        self.agent = AGENT_START;
        self.ghosts = vec![Position::new(self.width - 2, self.height - 2)];

        let candidates: Vec<Position> = self
            .engine
            .grid()
            .open_cells()
            .filter(|&pos| pos != self.agent)
            .collect();
        self.foods = candidates
            .choose_multiple(&mut self.rng, self.food_count)
            .copied()
            .collect();

        info!(
            width = self.width,
            height = self.height,
            open = candidates.len() + 1,
            foods = self.foods.len(),
            "maze generated"
        );
    }

    /// Searches from the agent toward the nearest pellet and restarts path following.
    pub(crate) fn run_search(&mut self) {
        self.result = self.engine.run(self.strategy, self.agent, &self.foods);
        self.step_index = 0;
    }

    /// Moves the agent one cell along the current path.
    ///
    /// Eating a pellet triggers a new search while food remains. Running off the end of the path
    /// also searches again. Without a path the agent stays where it is.
    pub(crate) fn advance(&mut self) {
        if !self.result.found {
            return;
        }

        if let Some(&next) = self.result.path.get(self.step_index) {
            self.agent = next;
            self.step_index += 1;

            if self.foods.remove(&next) {
                if self.foods.is_empty() {
                    info!(at = %next, "all food eaten");
                } else {
                    info!(at = %next, left = self.foods.len(), "food eaten");
                    self.run_search();
                }
            }
        } else if !self.foods.is_empty() {
            self.run_search();
        }
    }

    /// Advances one frame unless step mode is on.
    pub(crate) fn update(&mut self) {
        if !self.step_mode {
            self.advance();
        }
    }

    /// Advances one cell if step mode is on.
    pub(crate) fn step(&mut self) {
        if self.step_mode {
            self.advance();
        }
    }

    /// Flips step mode.
    pub(crate) fn toggle_step_mode(&mut self) {
        self.step_mode = !self.step_mode;
    }

    /// Flips drawing of visited and frontier cells.
    pub(crate) fn toggle_visualization(&mut self) {
        self.visualize = !self.visualize;
    }

    /// Whether every pellet has been eaten.
    pub(crate) fn is_won(&self) -> bool {
        self.foods.is_empty()
    }

    /// Maze of the current episode.
    pub(crate) const fn grid(&self) -> &Grid {
        self.engine.grid()
    }

    /// Path cells the agent has not reached yet.
    pub(crate) fn remaining_path(&self) -> &[Position] {
        self.result.path.get(self.step_index..).unwrap_or_default()
    }
}
