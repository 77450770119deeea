//! User interface rendering functions for all application screens.

use std::rc::Rc;

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::Line,
    widgets::{
        canvas::{Canvas, Points},
        Block, BorderType, Borders, Clear, Paragraph,
    },
    Frame,
};

use crate::{
    game::Game,
    maze::{Cell, Position},
    types::{MainMenuItem, MenuType, OptionsMenuItem, Screen},
    App,
};

/// Width in terminal cells of the statistics panel next to the maze.
const PANEL_WIDTH: u16 = 30;

/// Updates the application UI based on the persistent state.
///
/// This function renders different screens based on the current state stored in the [`App`]
/// structure, dispatching to the appropriate rendering function for each screen type.
///
/// # Errors
///
/// This function may return errors from layout lookups or coordinate conversion failures.
pub(crate) fn draw(app: &App, frame: &mut Frame) -> Result<()> {
    match &app.screen {
        Screen::MainMenu(item) => main_menu(frame, *item),
        Screen::OptionsMenu(item) => options_menu(frame, *item, app.game.strategy.label()),
        Screen::InGame => in_game(&app.game, frame)?,
    }

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
pub(crate) fn clear(frame: &mut Frame) {
    let clear = Clear;
    frame.render_widget(clear, frame.area());
}

/// Renders the generic layout structure for the main and options menus.
///
/// This function creates the common layout and block structure used by both menus. The generic
/// part includes the centered positioning and border styling, while the specific menu content is
/// handled by the caller using the [`MenuType`] parameter.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
pub(crate) fn init_menu(frame: &mut Frame, menu: MenuType) -> Rc<[Rect]> {
    let space = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Percentage(20),
        Constraint::Percentage(40),
    ])
    .split(frame.area())[1];
    let space = Layout::horizontal([
        Constraint::Percentage(35),
        Constraint::Percentage(30),
        Constraint::Percentage(35),
    ])
    .split(space)[1];

    let layout = Layout::vertical([Constraint::Max(u16::from(menu.value() + 2))])
        .flex(Flex::Center)
        .split(space)[0];

    let block = Block::bordered()
        .title(menu.repr())
        .title_bottom("(j) down / (k) up / (l) select")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(layout);

    frame.render_widget(block, layout);

    Layout::vertical(vec![Constraint::Max(1); menu.value().into()]).split(inner_space)
}

/// Renders a list of menu entries, highlighting the one at `active`.
fn menu_entries(frame: &mut Frame, slots: &[Rect], entries: &[String], active: usize) {
    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Green);

    for (idx, (slot, entry)) in slots.iter().zip(entries).enumerate() {
        let style = if idx == active {
            active_content_style
        } else {
            content_style
        };
        frame.render_widget(Line::raw(entry.as_str()).centered().style(style), *slot);
    }
}

/// Renders the main menu screen with navigation options.
pub(crate) fn main_menu(frame: &mut Frame, item: MainMenuItem) {
    clear(frame);

    let slots = init_menu(frame, MenuType::MainMenu(3));
    let entries = ["Start Game", "Options", "Quit"].map(str::to_owned);
    let active = match item {
        MainMenuItem::StartGame => 0,
        MainMenuItem::Options => 1,
        MainMenuItem::Quit => 2,
    };

    menu_entries(frame, &slots, &entries, active);
}

/// Renders the options menu, showing the strategy the next game will use.
pub(crate) fn options_menu(frame: &mut Frame, item: OptionsMenuItem, strategy: &str) {
    clear(frame);

    let slots = init_menu(frame, MenuType::OptionsMenu(2));
    let entries = [format!("Algorithm: {strategy}"), "Return".to_owned()];
    let active = match item {
        OptionsMenuItem::Algorithm => 0,
        OptionsMenuItem::Back => 1,
    };

    menu_entries(frame, &slots, &entries, active);
}

/// Converts maze positions to canvas coordinates.
///
/// Columns map straight to `x`. Rows are flipped, since the canvas grows upward while row 0 is
/// the top of the maze: `y = (rows - 1) - row`.
///
/// # Errors
///
/// This function may return errors if a coordinate does not fit in a terminal dimension.
pub(crate) fn transform_maze_to_screen_coords(
    positions: &[Position],
    rows: usize,
) -> Result<Vec<(f64, f64)>> {
    let top = u16::try_from(rows.saturating_sub(1))?;

    positions
        .iter()
        .map(|pos| {
            let screen_x = f64::from(u16::try_from(pos.x)?);
            let screen_y = f64::from(top.saturating_sub(u16::try_from(pos.y)?));

            Ok((screen_x, screen_y))
        })
        .collect()
}

/// Renders the in-game screen: the maze with its search overlay and the statistics panel.
///
/// # Errors
///
/// This function may return errors from layout lookups or coordinate conversion operations.
pub(crate) fn in_game(game: &Game, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let grid = game.grid();
    let columns = u16::try_from(grid.width())?;
    let rows = u16::try_from(grid.height())?;

    let overall_layout =
        Layout::horizontal([Constraint::Min(1), Constraint::Length(PANEL_WIDTH)])
            .split(frame.area());
    let maze_content_area = *overall_layout
        .first()
        .ok_or_eyre("failed to get maze content area from layout")?;
    let panel_area = *overall_layout
        .last()
        .ok_or_eyre("failed to get panel area from layout")?;

    let maze_column = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(rows),
        Constraint::Length(2),
        Constraint::Min(1),
    ])
    .split(maze_content_area);
    let center = |area: Option<&Rect>, what: &str| -> Result<Rect> {
        let area = *area.ok_or_eyre(format!("failed to get {what} from layout"))?;
        Layout::horizontal([
            Constraint::Min(1),
            Constraint::Length(columns),
            Constraint::Min(1),
        ])
        .split(area)
        .get(1)
        .copied()
        .ok_or_eyre(format!("failed to center {what}"))
    };
    let space = center(maze_column.get(1), "maze area")?;
    let tooltip_area = center(maze_column.get(2), "tooltip area")?;

    let walls: Vec<Position> = (0..grid.height())
        .flat_map(|y| (0..grid.width()).map(move |x| Position::new(x, y)))
        .filter(|&pos| grid.cell(pos) == Some(Cell::Wall))
        .collect();
    let (visited, frontier) = if game.visualize {
        (
            overlay(game, game.engine.last_visited()),
            overlay(game, game.engine.last_frontier()),
        )
    } else {
        (Vec::new(), Vec::new())
    };
    let path = if game.result.found {
        overlay(game, game.remaining_path())
    } else {
        Vec::new()
    };
    let foods: Vec<Position> = game.foods.iter().copied().collect();

    let height = grid.height();
    let layers = [
        (transform_maze_to_screen_coords(&walls, height)?, Color::Blue),
        (transform_maze_to_screen_coords(&visited, height)?, Color::DarkGray),
        (transform_maze_to_screen_coords(&frontier, height)?, Color::Magenta),
        (transform_maze_to_screen_coords(&path, height)?, Color::Green),
        (transform_maze_to_screen_coords(&foods, height)?, Color::Yellow),
        (transform_maze_to_screen_coords(&game.ghosts, height)?, Color::Red),
        (
            transform_maze_to_screen_coords(&[game.agent], height)?,
            Color::LightYellow,
        ),
    ];

    let maze = Canvas::default()
        .x_bounds([0.0, f64::from(columns.saturating_sub(1))])
        .y_bounds([0.0, f64::from(rows.saturating_sub(1))])
        .marker(Marker::Block)
        .paint(|ctx| {
            for (coords, color) in &layers {
                ctx.draw(&Points {
                    coords,
                    color: *color,
                });
                ctx.layer();
            }
        });

    frame.render_widget(maze, space);

    let tooltip_block = Block::bordered()
        .title("(h) return to menu")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);

    frame.render_widget(tooltip_block, tooltip_area);
    frame.render_widget(stats_panel(game), panel_area);

    Ok(())
}

/// Drops the cells hidden under the agent or a pellet.
fn overlay<'cells, I>(game: &Game, cells: I) -> Vec<Position>
where
    I: IntoIterator<Item = &'cells Position>,
{
    cells
        .into_iter()
        .copied()
        .filter(|pos| *pos != game.agent && !game.foods.contains(pos))
        .collect()
}

/// Builds the side panel with search statistics and the control list.
fn stats_panel(game: &Game) -> Paragraph<'static> {
    let status = if game.is_won() {
        "All food eaten!"
    } else if game.result.found {
        "Chasing food"
    } else {
        "No path to food"
    };
    let lines = vec![
        Line::raw(format!("Algorithm: {}", game.strategy)),
        Line::raw(format!(
            "Nodes Expanded: {}",
            game.engine.last_expansion_count()
        )),
        Line::raw(format!("Path Length: {}", game.result.cost)),
        Line::raw(game.engine.last_target().map_or_else(
            || "Target: none".to_owned(),
            |target| format!("Target: {target}"),
        )),
        Line::raw(format!("Food Left: {}", game.foods.len())),
        Line::raw(format!(
            "Mode: {}",
            if game.step_mode { "step" } else { "auto" }
        )),
        Line::raw(status),
        Line::raw(""),
        Line::raw("Controls:"),
        Line::raw("r - Reset"),
        Line::raw("b - BFS"),
        Line::raw("d - DFS"),
        Line::raw("g - Greedy"),
        Line::raw("v - Toggle Visualization"),
        Line::raw("space - Step Mode"),
        Line::raw("n - Step"),
        Line::raw("q - Quit"),
    ];

    Paragraph::new(lines).style(Style::default().fg(Color::Green)).block(
        Block::bordered()
            .title("Search")
            .title_alignment(Alignment::Center)
            .border_type(BorderType::Rounded),
    )
}
