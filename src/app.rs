//! Core application state and main loop.

use color_eyre::eyre::Result;
use ratatui::DefaultTerminal;

use crate::{
    config::Config,
    events,
    game::Game,
    timing::FrameClock,
    types::{MainMenuItem, Screen},
    ui,
};

/// Application state container.
///
/// This structure holds the state of the application, which is to say the structure from which
/// Ratatui will render the game and Crossterm events will help writing to.
pub struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the application should exit. It is set to `true` when the user
    /// wants to quit the game but it starts off `false`.
    pub(crate) exit: bool,
    /// Current screen being displayed to the user.
    pub(crate) screen: Screen,
    /// Maze, agent, food and search state of the running episode.
    pub(crate) game: Game,
    /// Clock deciding when the agent takes its next step.
    pub(crate) clock: FrameClock,
}

impl App {
    /// Creates the application and its first episode from the given settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings do not validate.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            exit: false,
            screen: Screen::MainMenu(MainMenuItem::StartGame),
            game: Game::new(config)?,
            clock: FrameClock::new(config.fps),
        })
    }

    /// Runs the main loop of the application.
    ///
    /// Each iteration redraws the current screen, then waits for input until the next frame is
    /// due. The loop continues until the exit flag is set.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`] from drawing or polling the terminal
    /// - [`ConfigurationError`](crate::ConfigurationError) if a new maze cannot be generated
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal.try_draw(|frame| ui::draw(self, frame).map_err(std::io::Error::other))?;
            events::handle_events(self)?;
        }

        Ok(())
    }
}
