//! App state persistence — JSON save/load across restarts.
//!
//! Only UI control positions persist; fetched datasets never touch disk.

use std::path::Path;

use serde::{Deserialize, Serialize};

use quakecoins_core::pipeline::{DEFAULT_DAYS, DEFAULT_MIN_MAGNITUDE};

use crate::app::{AppState, Overlay, Panel};

/// Serializable subset of app state that persists across restarts.
#[derive(Debug, Serialize, Deserialize)]
pub struct PersistedState {
    pub days: u32,
    pub min_magnitude: f64,
    pub active_panel: Panel,
    pub welcome_dismissed: bool,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            days: DEFAULT_DAYS,
            min_magnitude: DEFAULT_MIN_MAGNITUDE,
            active_panel: Panel::Overview,
            welcome_dismissed: false,
        }
    }
}

/// Load persisted state from disk. Returns defaults if file is missing or corrupt.
pub fn load(path: &Path) -> PersistedState {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => PersistedState::default(),
    }
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Extract persisted state from AppState.
pub fn extract(app: &AppState) -> PersistedState {
    PersistedState {
        days: app.controls.days,
        min_magnitude: app.controls.min_magnitude,
        active_panel: app.active_panel,
        welcome_dismissed: app.overlay != Overlay::Welcome,
    }
}

/// Apply persisted state to AppState.
pub fn apply(app: &mut AppState, state: PersistedState) {
    app.controls.days = state.days;
    app.controls.min_magnitude = state.min_magnitude;
    app.controls.adjust_days(0); // re-clamp in case the file was edited
    app.controls.adjust_magnitude(0.0);
    app.active_panel = state.active_panel;
    if state.welcome_dismissed {
        app.overlay = Overlay::None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = std::env::temp_dir().join("quakecoins-test-persistence");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("state.json");
        std::fs::write(&path, "{ not json").unwrap();

        let state = load(&path);
        assert_eq!(state.days, DEFAULT_DAYS);
        assert_eq!(state.min_magnitude, DEFAULT_MIN_MAGNITUDE);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn save_then_load_roundtrip() {
        let dir = std::env::temp_dir().join("quakecoins-test-persistence");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("roundtrip.json");

        let state = PersistedState {
            days: 60,
            min_magnitude: 4.5,
            active_panel: Panel::Quakes,
            welcome_dismissed: true,
        };
        save(&path, &state).unwrap();
        let loaded = load(&path);
        assert_eq!(loaded.days, 60);
        assert_eq!(loaded.min_magnitude, 4.5);
        assert_eq!(loaded.active_panel, Panel::Quakes);
        assert!(loaded.welcome_dismissed);

        std::fs::remove_file(&path).ok();
    }
}
