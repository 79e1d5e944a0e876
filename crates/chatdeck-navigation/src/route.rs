//! Named views

use serde::{Deserialize, Serialize};

use crate::error::NavigationError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Route {
    #[default]
    Home,
    /// The currently selected conversation
    Chat,
    /// Mask picker shown before starting a conversation
    NewChat,
    Settings,
    Masks,
}

impl Route {
    pub fn as_path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Chat => "/chat",
            Route::NewChat => "/new-chat",
            Route::Settings => "/settings",
            Route::Masks => "/masks",
        }
    }

    /// Views in which the selected sidebar item is drawn highlighted
    pub fn highlights_selection(&self) -> bool {
        matches!(self, Route::Chat | Route::Home)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_path())
    }
}

impl std::str::FromStr for Route {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Tolerate a trailing slash and hash-router prefixes
        let path = s.trim().trim_start_matches('#');
        let path = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };

        match path {
            "" | "/" => Ok(Route::Home),
            "/chat" => Ok(Route::Chat),
            "/new-chat" => Ok(Route::NewChat),
            "/settings" => Ok(Route::Settings),
            "/masks" => Ok(Route::Masks),
            _ => Err(NavigationError::UnknownRoute(s.to_string())),
        }
    }
}
