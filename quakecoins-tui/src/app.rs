//! Application state — single-owner, main-thread only.
//!
//! All TUI state lives here. The worker thread communicates via channels.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};

use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use quakecoins_core::domain::DataOrigin;
use quakecoins_core::pipeline::{
    DashboardSnapshot, RefreshOptions, DEFAULT_DAYS, DEFAULT_MIN_MAGNITUDE, MAGNITUDE_STEP,
    MAX_DAYS, MIN_DAYS, MIN_MAGNITUDE_CEIL, MIN_MAGNITUDE_FLOOR,
};

use crate::worker::{WorkerCommand, WorkerResponse};

/// Which panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Panel {
    Overview,
    Price,
    Quakes,
    Combined,
    Table,
    Help,
}

impl Panel {
    pub const COUNT: usize = 6;

    pub fn index(self) -> usize {
        match self {
            Panel::Overview => 0,
            Panel::Price => 1,
            Panel::Quakes => 2,
            Panel::Combined => 3,
            Panel::Table => 4,
            Panel::Help => 5,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Panel::Overview),
            1 => Some(Panel::Price),
            2 => Some(Panel::Quakes),
            3 => Some(Panel::Combined),
            4 => Some(Panel::Table),
            5 => Some(Panel::Help),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Overview => "Overview",
            Panel::Price => "Price",
            Panel::Quakes => "Quakes",
            Panel::Combined => "Combined",
            Panel::Table => "Table",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        Panel::from_index((self.index() + 1) % Self::COUNT).unwrap()
    }

    pub fn prev(self) -> Panel {
        Panel::from_index((self.index() + Self::COUNT - 1) % Self::COUNT).unwrap()
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An entry in the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
}

/// Error category for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Fallback,
    EmptyData,
    Other,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Fallback => "SYNTH",
            ErrorCategory::EmptyData => "EMPTY",
            ErrorCategory::Other => "ERR",
        }
    }
}

/// Which overlay is open, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Welcome,
    ErrorHistory,
    None,
}

/// The two dashboard controls (the sole inputs driving the pipeline).
#[derive(Debug, Clone, Copy)]
pub struct Controls {
    pub days: u32,
    pub min_magnitude: f64,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            days: DEFAULT_DAYS,
            min_magnitude: DEFAULT_MIN_MAGNITUDE,
        }
    }
}

impl Controls {
    pub fn adjust_days(&mut self, delta: i64) {
        let next = i64::from(self.days) + delta;
        self.days = next.clamp(i64::from(MIN_DAYS), i64::from(MAX_DAYS)) as u32;
    }

    pub fn adjust_magnitude(&mut self, steps: f64) {
        let next = self.min_magnitude + steps * MAGNITUDE_STEP;
        self.min_magnitude = next.clamp(MIN_MAGNITUDE_FLOOR, MIN_MAGNITUDE_CEIL);
    }

    pub fn to_options(self) -> RefreshOptions {
        RefreshOptions {
            days: self.days,
            min_magnitude: self.min_magnitude,
            ..Default::default()
        }
    }
}

const ERROR_HISTORY_CAP: usize = 100;

/// Top-level TUI state.
pub struct AppState {
    pub running: bool,
    pub active_panel: Panel,
    pub overlay: Overlay,

    pub controls: Controls,
    /// Cursor over the two Overview controls: 0 = days, 1 = magnitude.
    pub control_cursor: usize,

    pub snapshot: Option<DashboardSnapshot>,
    pub refreshing: bool,
    pub table_scroll: usize,

    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,

    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,
    pub state_path: PathBuf,
}

impl AppState {
    pub fn new(
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
        state_path: PathBuf,
    ) -> Self {
        Self {
            running: true,
            active_panel: Panel::Overview,
            overlay: Overlay::Welcome,
            controls: Controls::default(),
            control_cursor: 0,
            snapshot: None,
            refreshing: false,
            table_scroll: 0,
            status_message: None,
            error_history: VecDeque::new(),
            error_scroll: 0,
            worker_tx,
            worker_rx,
            state_path,
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>, level: StatusLevel) {
        self.status_message = Some((message.into(), level));
    }

    pub fn record_error(&mut self, category: ErrorCategory, message: impl Into<String>) {
        if self.error_history.len() == ERROR_HISTORY_CAP {
            self.error_history.pop_back();
        }
        self.error_history.push_front(ErrorRecord {
            timestamp: Utc::now().naive_utc(),
            category,
            message: message.into(),
        });
    }

    /// Kick off a full re-fetch-and-recompute cycle on the worker.
    pub fn request_refresh(&mut self) {
        self.refreshing = true;
        self.set_status(
            format!(
                "Refreshing: {} days, min magnitude {:.1}...",
                self.controls.days, self.controls.min_magnitude
            ),
            StatusLevel::Info,
        );
        let _ = self.worker_tx.send(WorkerCommand::Refresh {
            options: self.controls.to_options(),
        });
    }

    /// Install a completed snapshot and surface degraded-mode notices.
    pub fn apply_snapshot(&mut self, snapshot: DashboardSnapshot) {
        self.refreshing = false;
        self.table_scroll = 0;

        if snapshot.prices.origin == DataOrigin::Synthetic {
            self.record_error(
                ErrorCategory::Fallback,
                "price fetch failed, showing synthetic series",
            );
        }
        if snapshot.quakes.origin == DataOrigin::Synthetic {
            self.record_error(
                ErrorCategory::Fallback,
                "earthquake fetch failed, showing synthetic series",
            );
        } else if snapshot.quakes.rows.is_empty() {
            self.record_error(
                ErrorCategory::EmptyData,
                "no qualifying earthquakes in the selected window",
            );
        }

        let level = if snapshot.is_degraded() {
            StatusLevel::Warning
        } else {
            StatusLevel::Info
        };
        self.set_status(
            format!(
                "Loaded {} aligned days (prices: {}, quakes: {})",
                snapshot.aligned.len(),
                snapshot.prices.origin.label(),
                snapshot.quakes.origin.label(),
            ),
            level,
        );

        self.snapshot = Some(snapshot);
    }
}
