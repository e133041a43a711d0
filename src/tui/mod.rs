//! Ratatui-based terminal UI.
//!
//! The TUI is a curve editor: pick a resource, nudge its min/max/curve/rounding,
//! watch the reward curve and chapter spans update, then save the profile to
//! the store.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use crate::app::pipeline::LoadedProfile;
use crate::domain::{ResourceKind, RewardCurveConfig, RewardProfile};
use crate::engine::{RewardCurveEngine, evaluate};
use crate::error::AppError;
use crate::io::{ProfileStore, SaveOutcome};
use crate::math::snap;
use crate::report::{fmt_value, format_curve};
use crate::rewards::{CHAPTERS, chapter_preview};
use crate::settings::Settings;

mod plotters_chart;

use plotters_chart::RewardPlottersChart;

const FIELDS: [&str; 5] = ["Resource", "Min", "Max", "Curve", "Rounding"];
const CURVE_STEP: f64 = 0.05;
const CHART_SAMPLES: usize = 200;

/// Start the TUI.
pub fn run(store: Box<dyn ProfileStore>, settings: Settings, loaded: LoadedProfile) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(store, settings, loaded);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    store: Box<dyn ProfileStore>,
    settings: Settings,
    name: Option<String>,
    profile: RewardProfile,
    resource: ResourceKind,
    selected_field: usize,
    editing_name: bool,
    name_input: String,
    dirty: bool,
    status: String,
}

impl App {
    fn new(store: Box<dyn ProfileStore>, settings: Settings, loaded: LoadedProfile) -> Self {
        let status = match &loaded.name {
            Some(name) => format!("Loaded profile '{name}'."),
            None => "Built-in profile. Press n to save it under a name.".to_string(),
        };
        Self {
            store,
            settings,
            name: loaded.name,
            profile: loaded.profile,
            resource: ResourceKind::Gold,
            selected_field: 0,
            editing_name: false,
            name_input: String::new(),
            dirty: false,
            status,
        }
    }

    fn config(&self) -> &RewardCurveConfig {
        self.profile.get(self.resource)
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the app should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.editing_name {
            self.handle_name_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => {
                self.selected_field = self.selected_field.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected_field + 1 < FIELDS.len() {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1.0),
            KeyCode::Right => self.adjust_field(1.0),
            KeyCode::Tab => self.resource = self.resource.next(),
            KeyCode::BackTab => self.resource = self.resource.prev(),
            KeyCode::Char('s') => match self.name.clone() {
                Some(name) => self.save_as(&name),
                None => self.begin_name_edit(),
            },
            KeyCode::Char('n') => self.begin_name_edit(),
            KeyCode::Char('r') => {
                *self.profile.get_mut(self.resource) = *RewardProfile::default().get(self.resource);
                self.dirty = true;
                self.status = format!("{} reset to default.", self.resource.display_name());
            }
            KeyCode::Char('d') => {
                match crate::debug::write_debug_bundle(&self.settings.debug_dir, self.name.as_deref(), &self.profile) {
                    Ok(path) => {
                        self.status = format!("Wrote debug bundle: {}", path.display());
                    }
                    Err(err) => {
                        self.status = format!("Debug write failed: {err}");
                    }
                }
            }
            _ => {}
        }

        false
    }

    fn begin_name_edit(&mut self) {
        self.editing_name = true;
        self.name_input = self.name.clone().unwrap_or_default();
        self.status = "Profile name ([A-Za-z0-9_-]). Enter to save, Esc to cancel.".to_string();
    }

    fn handle_name_edit(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.editing_name = false;
                self.status = "Save canceled.".to_string();
            }
            KeyCode::Enter => {
                self.editing_name = false;
                let name = self.name_input.trim().to_string();
                self.save_as(&name);
            }
            KeyCode::Backspace => {
                self.name_input.pop();
            }
            KeyCode::Char(c) => {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    self.name_input.push(c);
                }
            }
            _ => {}
        }
    }

    fn save_as(&mut self, name: &str) {
        match self.store.save(name, &self.profile) {
            Ok(outcome) => {
                let verb = match outcome {
                    SaveOutcome::Created => "Created",
                    SaveOutcome::Updated => "Updated",
                };
                self.status = format!("{verb} profile '{name}'.");
                self.name = Some(name.to_string());
                self.dirty = false;
            }
            Err(err) => {
                self.status = format!("Save failed: {err}");
            }
        }
    }

    fn adjust_field(&mut self, delta: f64) {
        let kind = self.resource;
        let step = value_step(kind);
        let config = self.profile.get_mut(kind);
        match self.selected_field {
            0 => {
                self.resource = if delta >= 0.0 { kind.next() } else { kind.prev() };
                self.status = format!("resource: {}", self.resource.display_name());
                return;
            }
            1 => {
                config.output_min = snap((config.output_min + delta * step).max(0.0), step);
            }
            2 => {
                config.output_max = snap((config.output_max + delta * step).max(0.0), step);
            }
            3 => {
                config.curve = snap(config.curve + delta * CURVE_STEP, CURVE_STEP).clamp(-1.0, 1.0);
            }
            4 => {
                config.rounding = if delta >= 0.0 {
                    config.rounding.next()
                } else {
                    config.rounding.prev()
                };
            }
            _ => return,
        }
        self.dirty = true;
        self.status = format!("{}: {}", kind.display_name(), format_curve(config));
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("rewards", Style::default().fg(Color::Cyan)),
            Span::raw(" - Mek reward curves"),
        ]));

        let name = self.name.as_deref().unwrap_or("(default)");
        let dirty = if self.dirty { " [unsaved]" } else { "" };
        lines.push(Line::from(Span::styled(
            format!(
                "profile: {name}{dirty} | {}: {}",
                self.resource.display_name(),
                format_curve(self.config()),
            ),
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(12)])
            .split(area);

        self.draw_chart(frame, chunks[0]);

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(chunks[1]);

        self.draw_settings(frame, bottom[0]);
        self.draw_chapters(frame, bottom[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default()
            .title(format!("{} curve", self.resource.display_name()))
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let data = chart_series(self.config());
        let y_label = self.resource.display_name().to_lowercase();

        let (chart_rect, insets) = chart_layout(inner);
        let widget = RewardPlottersChart {
            curve: &data.curve,
            markers: &data.markers,
            x_bounds: data.x_bounds,
            y_bounds: data.y_bounds,
            x_label: "rank",
            y_label: y_label.clone(),
            fmt_x: fmt_axis_rank,
            fmt_y: fmt_axis_reward,
        };

        frame.render_widget(widget, chart_rect);
        if let Some(insets) = insets {
            draw_axis_ticks(frame, inner, chart_rect, insets, data.x_bounds, data.y_bounds, &y_label);
        }
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let config = self.config();
        let items = vec![
            ListItem::new(format!("Resource: {}", self.resource.display_name())),
            ListItem::new(format!("Min: {}", fmt_value(config.output_min))),
            ListItem::new(format!("Max: {}", fmt_value(config.output_max))),
            ListItem::new(format!("Curve: {:+.2}", config.curve)),
            ListItem::new(format!("Rounding: {}", config.rounding.label())),
        ];

        let list = List::new(items)
            .block(Block::default().title("Settings").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);

        if self.editing_name {
            let hint = Paragraph::new(format!("Name: {}_", self.name_input))
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
            let rect = Rect {
                x: area.x + 2,
                y: area.y + area.height.saturating_sub(2),
                width: area.width.saturating_sub(4),
                height: 1,
            };
            frame.render_widget(hint, rect);
        }
    }

    fn draw_chapters(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let rows = chapter_preview(&self.profile, &RewardCurveEngine::default());
        let lines: Vec<Line> = rows
            .iter()
            .map(|row| {
                Line::from(format!(
                    "ch{:<2} {:>9}  {:>8} .. {:<8} boss {}",
                    row.chapter,
                    format!("{}-{}", row.high.rank, row.low.rank),
                    fmt_value(row.low.get(self.resource)),
                    fmt_value(row.high.get(self.resource)),
                    row.boss.get(self.resource),
                ))
            })
            .collect();

        let p = Paragraph::new(Text::from(lines)).block(
            Block::default()
                .title(format!("Chapters ({}, normal nodes)", self.resource.display_name()))
                .borders(Borders::ALL),
        );
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  Tab resource  s save  n save as  r reset  d debug  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Min/max nudge per keypress.
fn value_step(kind: ResourceKind) -> f64 {
    match kind {
        ResourceKind::Gold => 100.0,
        ResourceKind::Xp => 10.0,
        ResourceKind::Essence => 0.1,
    }
}

struct ChartData {
    curve: Vec<(f64, f64)>,
    markers: Vec<(f64, f64)>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

/// Build chart series for Plotters.
fn chart_series(config: &RewardCurveConfig) -> ChartData {
    let x_bounds = [config.rank_min as f64, config.rank_max as f64];
    let span = config.rank_max as f64 - config.rank_min as f64;

    let mut curve = Vec::with_capacity(CHART_SAMPLES);
    for i in 0..CHART_SAMPLES {
        let u = i as f64 / (CHART_SAMPLES as f64 - 1.0);
        let rank = config.clamp_rank((config.rank_min as f64 + u * span).round() as i64);
        curve.push((rank as f64, evaluate(rank, config)));
    }

    let markers = CHAPTERS
        .iter()
        .map(|ch| ch.normal.0)
        .filter(|rank| config.rank_range().contains(rank))
        .map(|rank| (rank as f64, evaluate(rank, config)))
        .collect::<Vec<_>>();

    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(_, y) in &curve {
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    if !y_min.is_finite() || !y_max.is_finite() {
        y_min = 0.0;
        y_max = 1.0;
    } else if y_max <= y_min {
        // Flat curve: center it.
        y_min -= 0.5;
        y_max += 0.5;
    }

    let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);
    let y_bounds = [y_min - pad, y_max + pad];

    ChartData {
        curve,
        markers,
        x_bounds,
        y_bounds,
    }
}

fn fmt_axis_rank(v: f64) -> String {
    format!("{v:.0}")
}

fn fmt_axis_reward(v: f64) -> String {
    format!("{v:.1}")
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 8,
        right: 2,
        top: 1,
        bottom: 2,
    };

    if inner.width <= insets.left + insets.right + 10 || inner.height <= insets.top + insets.bottom + 5 {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };

    (rect, Some(insets))
}

fn draw_axis_ticks(
    frame: &mut ratatui::Frame<'_>,
    inner: Rect,
    chart: Rect,
    insets: AxisInsets,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    y_label: &str,
) {
    let ticks = 5usize;
    let style = Style::default().fg(Color::Gray);

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let x_val = x_bounds[0] + u * (x_bounds[1] - x_bounds[0]);
        let x = chart.x + ((chart.width - 1) as f64 * u).round() as u16;
        let label = fmt_axis_rank(x_val);
        let label_len = label.len() as u16;
        let start = x.saturating_sub((label.len() / 2) as u16);
        let y = chart.y + chart.height;
        if y >= inner.y + inner.height - 1 {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let y_val = y_bounds[0] + u * (y_bounds[1] - y_bounds[0]);
        let y = chart.y + (chart.height - 1) - ((chart.height - 1) as f64 * u).round() as u16;
        let label = format!("{y_val:.0}");
        let label_len = label.len() as u16;
        let x = inner.x + insets.left.saturating_sub(1);
        let start = x.saturating_sub(label.len() as u16);
        if start < inner.x {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    let x_label = Paragraph::new("rank (1 = best)")
        .alignment(Alignment::Center)
        .style(style);
    let x_rect = Rect {
        x: chart.x,
        y: chart.y + chart.height + 1,
        width: chart.width,
        height: 1,
    };
    if x_rect.y < inner.y + inner.height {
        frame.render_widget(x_label, x_rect);
    }

    let y_title = Paragraph::new(y_label.to_string()).style(style.add_modifier(Modifier::BOLD));
    let y_rect = Rect {
        x: inner.x,
        y: inner.y,
        width: insets.left.saturating_sub(1),
        height: 1,
    };
    frame.render_widget(y_title, y_rect);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Rounding;
    use crate::io::MemoryStore;

    fn app() -> App {
        let settings = Settings {
            store_dir: "unused".into(),
            debug_dir: std::env::temp_dir(),
        };
        App::new(Box::new(MemoryStore::new()), settings, LoadedProfile::builtin())
    }

    #[test]
    fn curve_adjusts_in_steps_and_clamps() {
        let mut app = app();
        app.selected_field = 3;
        app.handle_key(KeyCode::Right);
        app.handle_key(KeyCode::Right);
        assert_eq!(app.profile.gold.curve, 0.1);
        assert!(app.dirty);

        for _ in 0..40 {
            app.handle_key(KeyCode::Left);
        }
        assert_eq!(app.profile.gold.curve, -1.0);
    }

    #[test]
    fn essence_min_steps_by_tenths() {
        let mut app = app();
        app.handle_key(KeyCode::Tab);
        app.handle_key(KeyCode::Tab);
        assert_eq!(app.resource, ResourceKind::Essence);

        app.selected_field = 1;
        for _ in 0..3 {
            app.handle_key(KeyCode::Right);
        }
        assert_eq!(app.profile.essence.output_min, 1.3);
    }

    #[test]
    fn rounding_cycles() {
        let mut app = app();
        app.selected_field = 4;
        app.handle_key(KeyCode::Right);
        assert_eq!(app.profile.gold.rounding, Rounding::Thousand);
    }

    #[test]
    fn save_prompts_for_name_then_updates() {
        let mut app = app();
        app.selected_field = 3;
        app.handle_key(KeyCode::Right);

        app.handle_key(KeyCode::Char('s'));
        assert!(app.editing_name);
        for c in "lau/nch".chars() {
            app.handle_key(KeyCode::Char(c));
        }
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.name.as_deref(), Some("launch"));
        assert!(!app.dirty);
        assert_eq!(app.status, "Created profile 'launch'.");

        app.handle_key(KeyCode::Right);
        app.handle_key(KeyCode::Char('s'));
        assert_eq!(app.status, "Updated profile 'launch'.");
        assert_eq!(app.store.load("launch").unwrap().profile.gold.curve, 0.15);
    }

    #[test]
    fn empty_name_reports_failure() {
        let mut app = app();
        app.handle_key(KeyCode::Char('n'));
        app.handle_key(KeyCode::Enter);
        assert!(app.status.starts_with("Save failed"));
        assert_eq!(app.name, None);
    }

    #[test]
    fn quit_keys() {
        let mut app = app();
        assert!(!app.handle_key(KeyCode::Down));
        assert!(app.handle_key(KeyCode::Char('q')));
    }

    #[test]
    fn chart_series_spans_domain() {
        let profile = RewardProfile::default();
        let data = chart_series(&profile.gold);
        assert_eq!(data.curve.len(), CHART_SAMPLES);
        assert_eq!(data.curve[0], (1.0, 10_000.0));
        assert_eq!(data.curve[CHART_SAMPLES - 1], (4000.0, 100.0));
        assert_eq!(data.markers.len(), CHAPTERS.len());
        assert!(data.y_bounds[0] < 100.0 && data.y_bounds[1] > 10_000.0);
    }
}
