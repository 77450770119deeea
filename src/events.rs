//! Event handling functions for user input and application state updates.

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};

use crate::{
    pathfinding::Strategy,
    types::{MainMenuItem, OptionsMenuItem, Screen},
    App,
};

/// Handles input events and advances the game when a frame is due.
///
/// This function blocks on keyboard input for at most the time left until the next frame, so the
/// agent keeps moving at the configured rate while the UI stays responsive.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    if event::poll(app.clock.remaining())? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                handle_key(app, key.code)?;
            }
        }
    }

    if app.screen == Screen::InGame && app.clock.tick() {
        app.game.update();
    }

    Ok(())
}

/// Dispatches a single key press.
pub(crate) fn handle_key(app: &mut App, code: KeyCode) -> Result<()> {
    match code {
        KeyCode::Char('q') => app.exit = true,
        KeyCode::Char('j') => handle_j_events(app),
        KeyCode::Char('k') => handle_k_events(app),
        KeyCode::Char('l') => handle_l_events(app)?,
        KeyCode::Char('h') => handle_h_events(app),
        code if app.screen == Screen::InGame => handle_game_events(app, code)?,
        _ => {}
    }

    Ok(())
}

/// Handles 'j' key press events for downward navigation.
pub(crate) fn handle_j_events(app: &mut App) {
    match app.screen {
        Screen::MainMenu(item) => app.screen = Screen::MainMenu(item.down()),
        Screen::OptionsMenu(OptionsMenuItem::Algorithm) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Back);
        }
        _ => {}
    }
}

/// Handles 'k' key press events for upward navigation.
pub(crate) fn handle_k_events(app: &mut App) {
    match app.screen {
        Screen::MainMenu(item) => app.screen = Screen::MainMenu(item.up()),
        Screen::OptionsMenu(OptionsMenuItem::Back) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Algorithm);
        }
        _ => {}
    }
}

/// Handles 'l' key press events for selection and forward navigation.
///
/// Selecting the algorithm entry of the options menu cycles to the next strategy and starts a
/// new episode with it.
pub(crate) fn handle_l_events(app: &mut App) -> Result<()> {
    match app.screen {
        Screen::MainMenu(MainMenuItem::StartGame) => {
            app.screen = Screen::InGame;
            app.clock.reset();
        }
        Screen::MainMenu(MainMenuItem::Options) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Algorithm);
        }
        Screen::MainMenu(MainMenuItem::Quit) => {
            app.exit = true;
        }
        Screen::OptionsMenu(OptionsMenuItem::Algorithm) => {
            app.game.set_strategy(app.game.strategy.next())?;
        }
        Screen::OptionsMenu(OptionsMenuItem::Back) => {
            app.screen = Screen::MainMenu(MainMenuItem::StartGame);
        }
        Screen::InGame => {}
    }

    Ok(())
}

/// Handles 'h' key press events for backward navigation.
pub(crate) fn handle_h_events(app: &mut App) {
    match app.screen {
        Screen::InGame => {
            app.screen = Screen::MainMenu(MainMenuItem::StartGame);
        }
        Screen::OptionsMenu(_) => {
            app.screen = Screen::MainMenu(MainMenuItem::Options);
        }
        Screen::MainMenu(_) => {}
    }
}

/// Handles the in-game controls.
///
/// `r` regenerates the maze, `b`/`d`/`g` switch to BFS/DFS/greedy on a new maze, `v` toggles the
/// search overlay, space toggles step mode and `n` takes one manual step.
pub(crate) fn handle_game_events(app: &mut App, code: KeyCode) -> Result<()> {
    match code {
        KeyCode::Char('r') => app.game.restart()?,
        KeyCode::Char('b') => app.game.set_strategy(Strategy::Bfs)?,
        KeyCode::Char('d') => app.game.set_strategy(Strategy::Dfs)?,
        KeyCode::Char('g') => app.game.set_strategy(Strategy::Greedy)?,
        KeyCode::Char('v') => app.game.toggle_visualization(),
        KeyCode::Char(' ') => app.game.toggle_step_mode(),
        KeyCode::Char('n') => app.game.step(),
        _ => {}
    }

    Ok(())
}
