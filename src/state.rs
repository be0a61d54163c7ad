//! Application-wide state: the signed-in user and the color theme.
//!
//! Constructed once by the root component and injected through a
//! `ContextProvider`, with explicit lifecycle rules: session restore runs on
//! startup, logout clears the user. There are no module-level globals.

use yew::UseStateHandle;

use crate::model::User;

const THEME_STORAGE_KEY: &str = "theme-mode";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        match key {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            _ => None,
        }
    }

    /// Root CSS class the stylesheet keys light/dark palettes off.
    pub fn class(self) -> &'static str {
        match self {
            ThemeMode::Light => "theme-light",
            ThemeMode::Dark => "theme-dark",
        }
    }

    pub fn load() -> Self {
        local_storage()
            .and_then(|storage| storage.get_item(THEME_STORAGE_KEY).ok().flatten())
            .and_then(|raw| ThemeMode::from_key(&raw))
            .unwrap_or(ThemeMode::Dark)
    }

    pub fn store(self) {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(THEME_STORAGE_KEY, self.key());
        }
    }
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

#[derive(Clone, PartialEq)]
pub struct AppState {
    pub user: Option<User>,
    /// False until the startup session-restore call has settled; the
    /// dashboard shows a checking indicator instead of bouncing to sign-in.
    pub auth_checked: bool,
    pub theme: ThemeMode,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            user: None,
            auth_checked: false,
            theme: ThemeMode::load(),
        }
    }

    pub fn signed_in(&self, user: User) -> Self {
        Self {
            user: Some(user),
            auth_checked: true,
            theme: self.theme,
        }
    }

    /// Startup restore failed or the user logged out: no session, but the
    /// check has settled.
    pub fn signed_out(&self) -> Self {
        Self {
            user: None,
            auth_checked: true,
            theme: self.theme,
        }
    }

    pub fn with_theme(&self, theme: ThemeMode) -> Self {
        Self {
            user: self.user.clone(),
            auth_checked: self.auth_checked,
            theme,
        }
    }
}

pub type AppStateHandle = UseStateHandle<AppState>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_keys_round_trip() {
        for mode in [ThemeMode::Light, ThemeMode::Dark] {
            assert_eq!(ThemeMode::from_key(mode.key()), Some(mode));
        }
        assert_eq!(ThemeMode::from_key("sepia"), None);
    }

    #[test]
    fn logout_clears_the_user_but_keeps_the_theme() {
        let state = AppState {
            user: None,
            auth_checked: false,
            theme: ThemeMode::Light,
        };
        let signed_out = state.signed_out();
        assert!(signed_out.user.is_none());
        assert!(signed_out.auth_checked);
        assert_eq!(signed_out.theme, ThemeMode::Light);
    }
}
