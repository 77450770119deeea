//! Type definitions and enums for the application screens and menu navigation.

/// Enumeration of available application screens.
///
/// This enumeration holds information about the current screen of the game. This is used to
/// determine which screen to render and what actions to take based on user input.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Screen {
    /// Main menu screen of the game.
    MainMenu(MainMenuItem),
    /// Options screen where the search strategy is picked.
    OptionsMenu(OptionsMenuItem),
    /// In-game screen where the agent chases food through the maze.
    InGame,
}

/// Main menu navigation options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MainMenuItem {
    /// "Start Game" menu option.
    StartGame,
    /// "Options" menu option.
    Options,
    /// "Quit" menu option.
    Quit,
}

impl MainMenuItem {
    /// Item below this one, staying on the last item.
    pub(crate) const fn down(self) -> Self {
        match self {
            Self::StartGame => Self::Options,
            Self::Options | Self::Quit => Self::Quit,
        }
    }

    /// Item above this one, staying on the first item.
    pub(crate) const fn up(self) -> Self {
        match self {
            Self::StartGame | Self::Options => Self::StartGame,
            Self::Quit => Self::Options,
        }
    }
}

/// Options menu navigation choices.
///
/// This enumeration holds the different items in the options menu. It is used to determine which
/// items can the user select in the options menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum OptionsMenuItem {
    /// Cycles the search strategy used by the next game.
    Algorithm,
    /// "Return" navigation option.
    Back,
}

/// Generic menu type configuration.
///
/// This enumeration holds the different specifics particular to each generic menu type in the
/// application's interface. Generic here means they share enough features to be considered worth
/// joining together part of their functionality.
pub(crate) enum MenuType {
    /// Main menu configuration, holding its item count.
    MainMenu(u8),
    /// Options menu configuration, holding its item count.
    OptionsMenu(u8),
}

impl MenuType {
    /// Returns the title drawn in the menu's border.
    pub(crate) const fn repr(&self) -> &str {
        match self {
            Self::MainMenu(_) => "Main Menu",
            Self::OptionsMenu(_) => "Options Menu",
        }
    }

    /// Returns the number of items, used to size the menu container.
    pub(crate) const fn value(&self) -> u8 {
        match self {
            Self::MainMenu(value) | Self::OptionsMenu(value) => *value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_variants() {
        let main_menu = Screen::MainMenu(MainMenuItem::StartGame);
        let options_menu = Screen::OptionsMenu(OptionsMenuItem::Back);

        assert_eq!(main_menu, Screen::MainMenu(MainMenuItem::StartGame));
        assert_eq!(options_menu, Screen::OptionsMenu(OptionsMenuItem::Back));
        assert_ne!(main_menu, Screen::InGame);
        assert_ne!(options_menu, Screen::OptionsMenu(OptionsMenuItem::Algorithm));
    }

    #[test]
    fn test_main_menu_navigation_clamps() {
        assert_eq!(MainMenuItem::StartGame.down(), MainMenuItem::Options);
        assert_eq!(MainMenuItem::Options.down(), MainMenuItem::Quit);
        assert_eq!(MainMenuItem::Quit.down(), MainMenuItem::Quit);
        assert_eq!(MainMenuItem::Quit.up(), MainMenuItem::Options);
        assert_eq!(MainMenuItem::Options.up(), MainMenuItem::StartGame);
        assert_eq!(MainMenuItem::StartGame.up(), MainMenuItem::StartGame);
    }

    #[test]
    fn test_menu_type_repr() {
        assert_eq!(MenuType::MainMenu(3).repr(), "Main Menu");
        assert_eq!(MenuType::OptionsMenu(2).repr(), "Options Menu");
    }

    #[test]
    fn test_menu_type_value() {
        assert_eq!(MenuType::MainMenu(3).value(), 3);
        assert_eq!(MenuType::OptionsMenu(2).value(), 2);
        assert_eq!(MenuType::OptionsMenu(0).value(), 0);
    }

    #[test]
    fn test_debug_implementations() {
        assert_eq!(format!("{:?}", Screen::InGame), "InGame");
        assert_eq!(format!("{:?}", MainMenuItem::StartGame), "StartGame");
        assert_eq!(format!("{:?}", OptionsMenuItem::Algorithm), "Algorithm");
    }
}
