//! Main UI Application
//!
//! Routes input to the action sources, grants XP through the session and
//! draws the level bar, tabs and live award feedback.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Tabs, Wrap},
};

use crate::actions::{Distortion, Habit, ThoughtDraft, UserRecords, MAX_SUDS, WIN_COUNT};
use crate::feedback::Origin;
use crate::profile::LocalStorage;
use crate::progression::AwardSource;
use crate::session::Session;

use super::form::{FormAction, TextForm};

const ACCENT: Color = Color::Rgb(230, 120, 40);
const SUDS_STEP: u8 = 5;

/// Top-level screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Home,
    Journal,
    Exposure,
    Progress,
}

impl Tab {
    const ALL: [Tab; 4] = [Tab::Home, Tab::Journal, Tab::Exposure, Tab::Progress];

    fn title(&self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Journal => "Journal",
            Tab::Exposure => "Challenges",
            Tab::Progress => "Profile",
        }
    }

    fn index(&self) -> usize {
        Tab::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    fn next(&self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    fn prev(&self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

/// Modal forms
enum Overlay {
    Thought {
        form: TextForm,
        distortion: Option<Distortion>,
        intensity: u8,
    },
    Exposure {
        form: TextForm,
        rating: u8,
        editing: Option<u64>,
    },
    Reflection {
        form: TextForm,
    },
}

/// Main UI application
pub struct App {
    tab: Tab,
    session: Session,
    records: UserRecords,
    storage: LocalStorage,
    overlay: Option<Overlay>,
    /// Selected row on the exposure tab (index into pending steps)
    exposure_cursor: usize,
    /// One-line status shown in the footer until the next input
    status: Option<String>,
    /// Habit cells from the last frame, for mouse hit-testing
    habit_areas: Vec<(Habit, Rect)>,
    /// Daily consult button from the last frame
    consult_area: Rect,
}

impl App {
    pub fn new(session: Session, storage: LocalStorage) -> Self {
        let records = UserRecords::load(&storage, session.user());
        Self {
            tab: Tab::Home,
            session,
            records,
            storage,
            overlay: None,
            exposure_cursor: 0,
            status: None,
            habit_areas: Vec::new(),
            consult_area: Rect::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Per-frame housekeeping
    pub fn update(&mut self) {
        self.session.update();
    }

    /// Handle a key press, returns true to quit
    pub fn handle_input(&mut self, key: KeyEvent) -> Result<bool> {
        if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(true);
        }
        self.status = None;

        if self.overlay.is_some() {
            self.handle_overlay_input(key);
            return Ok(false);
        }

        match key.code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Tab | KeyCode::Right => self.tab = self.tab.next(),
            KeyCode::BackTab | KeyCode::Left => self.tab = self.tab.prev(),
            _ => match self.tab {
                Tab::Home => self.handle_home_input(key),
                Tab::Journal => self.handle_journal_input(key),
                Tab::Exposure => self.handle_exposure_input(key),
                Tab::Progress => {}
            },
        }
        Ok(false)
    }

    /// Handle a mouse event; clicks carry the popup origin
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.overlay.is_some() || self.tab != Tab::Home {
            return;
        }
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        self.status = None;

        let origin = Origin::new(mouse.column, mouse.row);
        let hit = self
            .habit_areas
            .iter()
            .find(|(_, area)| contains(*area, mouse.column, mouse.row))
            .map(|(habit, _)| *habit);

        if let Some(habit) = hit {
            self.toggle_habit(habit, Some(origin));
        } else if contains(self.consult_area, mouse.column, mouse.row) {
            self.grant(AwardSource::DailyConsult, Some(origin));
        }
    }

    fn grant(&mut self, source: AwardSource, origin: Option<Origin>) {
        let advance = self.session.award_for(source, origin);
        if advance.leveled_up() {
            self.status = Some(format!("Level {} reached!", advance.profile.level));
        }
    }

    fn toggle_habit(&mut self, habit: Habit, origin: Option<Origin>) {
        let award = self.records.habits.toggle(habit);
        if let Err(e) = self.records.save_habits(&self.storage, self.session.user()) {
            log::warn!("Failed to save habits: {}", e);
        }
        if let Some(source) = award {
            let origin = origin.or_else(|| self.habit_origin(habit));
            self.grant(source, origin);
        }
    }

    fn habit_origin(&self, habit: Habit) -> Option<Origin> {
        self.habit_areas
            .iter()
            .find(|(h, _)| *h == habit)
            .map(|(_, area)| Origin::new(area.x + area.width / 2, area.y + area.height / 2))
    }

    fn handle_home_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c @ '1'..='6') => {
                let index = c as usize - '1' as usize;
                if let Some(habit) = Habit::ALL.get(index).copied() {
                    self.toggle_habit(habit, None);
                }
            }
            KeyCode::Char('c') => {
                let area = self.consult_area;
                let origin = Origin::new(area.x + area.width / 2, area.y);
                self.grant(AwardSource::DailyConsult, Some(origin));
            }
            KeyCode::Char('r') => {
                let reflection = &self.records.reflection;
                let mut form = TextForm::new(
                    "Wins of the Day",
                    &[("Grateful for", false), ("Win 1", false), ("Win 2", false), ("Win 3", false)],
                )
                .with_value(0, reflection.gratitude.clone());
                for (i, win) in reflection.wins.iter().enumerate() {
                    form = form.with_value(i + 1, win.clone());
                }
                self.overlay = Some(Overlay::Reflection { form });
            }
            _ => {}
        }
    }

    fn handle_journal_input(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('n') {
            self.overlay = Some(Overlay::Thought {
                form: TextForm::new(
                    "New Thought Record",
                    &[
                        ("Situation", true),
                        ("Automatic thought", true),
                        ("Emotion", true),
                        ("Rational response", true),
                        ("Outcome", false),
                    ],
                ),
                distortion: None,
                intensity: 50,
            });
        }
    }

    fn handle_exposure_input(&mut self, key: KeyEvent) {
        let pending: Vec<u64> = self.records.ladder.pending().iter().map(|s| s.id).collect();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.exposure_cursor = self.exposure_cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.exposure_cursor + 1 < pending.len() {
                    self.exposure_cursor += 1;
                }
            }
            KeyCode::Char('n') => {
                self.overlay = Some(Overlay::Exposure {
                    form: TextForm::new("New Challenge", &[("Action / behavior", true)]),
                    rating: 50,
                    editing: None,
                });
            }
            KeyCode::Char('e') => {
                if let Some(step) = pending.get(self.exposure_cursor).and_then(|id| self.records.ladder.get(*id)) {
                    self.overlay = Some(Overlay::Exposure {
                        form: TextForm::new("Edit Challenge", &[("Action / behavior", true)])
                            .with_value(0, step.behavior.clone()),
                        rating: step.rating,
                        editing: Some(step.id),
                    });
                }
            }
            KeyCode::Enter | KeyCode::Char('v') => {
                if let Some(id) = pending.get(self.exposure_cursor).copied() {
                    self.validate_step(id);
                }
            }
            _ => {}
        }
    }

    fn validate_step(&mut self, id: u64) {
        match self.records.ladder.validate(id) {
            Ok(Some(source)) => {
                if let Err(e) = self.records.save_ladder(&self.storage, self.session.user()) {
                    log::warn!("Failed to save exposures: {}", e);
                }
                self.grant(source, None);
                let remaining = self.records.ladder.pending().len();
                self.exposure_cursor = self.exposure_cursor.min(remaining.saturating_sub(1));
            }
            Ok(None) => {}
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    fn handle_overlay_input(&mut self, key: KeyEvent) {
        let Some(mut overlay) = self.overlay.take() else {
            return;
        };

        let keep_open = match &mut overlay {
            Overlay::Thought { form, distortion, intensity } => match key.code {
                KeyCode::F(2) => {
                    *distortion = Distortion::cycle(*distortion);
                    true
                }
                KeyCode::PageUp => {
                    *intensity = intensity.saturating_add(SUDS_STEP).min(100);
                    true
                }
                KeyCode::PageDown => {
                    *intensity = intensity.saturating_sub(SUDS_STEP);
                    true
                }
                _ => match form.handle_key(key) {
                    FormAction::Continue => true,
                    FormAction::Cancel => false,
                    FormAction::Submit => {
                        let draft = ThoughtDraft {
                            situation: form.value(0).to_string(),
                            automatic_thought: form.value(1).to_string(),
                            distortion: *distortion,
                            emotion: form.value(2).to_string(),
                            intensity: *intensity,
                            rational_response: form.value(3).to_string(),
                            outcome: form.value(4).to_string(),
                        };
                        match self.records.journal.file(draft) {
                            Ok(source) => {
                                if let Err(e) = self.records.save_journal(&self.storage, self.session.user()) {
                                    log::warn!("Failed to save journal: {}", e);
                                }
                                self.grant(source, None);
                                false
                            }
                            Err(e) => {
                                form.set_error(e.to_string());
                                true
                            }
                        }
                    }
                },
            },
            Overlay::Exposure { form, rating, editing } => match key.code {
                KeyCode::PageUp => {
                    *rating = rating.saturating_add(SUDS_STEP).min(MAX_SUDS);
                    true
                }
                KeyCode::PageDown => {
                    *rating = rating.saturating_sub(SUDS_STEP);
                    true
                }
                _ => match form.handle_key(key) {
                    FormAction::Continue => true,
                    FormAction::Cancel => false,
                    FormAction::Submit => {
                        let result = match editing {
                            Some(id) => self.records.ladder.edit(*id, form.value(0), *rating),
                            None => self.records.ladder.add(form.value(0), *rating).map(|_| ()),
                        };
                        match result {
                            Ok(()) => {
                                if let Err(e) = self.records.save_ladder(&self.storage, self.session.user()) {
                                    log::warn!("Failed to save exposures: {}", e);
                                }
                                false
                            }
                            Err(e) => {
                                form.set_error(e.to_string());
                                true
                            }
                        }
                    }
                },
            },
            Overlay::Reflection { form } => match form.handle_key(key) {
                FormAction::Continue => true,
                FormAction::Cancel => false,
                FormAction::Submit => {
                    let wins: [&str; WIN_COUNT] = [form.value(1), form.value(2), form.value(3)];
                    self.records.reflection.update(form.value(0), wins);
                    if let Err(e) = self.records.save_reflection(&self.storage, self.session.user()) {
                        log::warn!("Failed to save reflection: {}", e);
                    }
                    false
                }
            },
        };

        if keep_open {
            self.overlay = Some(overlay);
        }
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.session
            .feedback_mut()
            .set_default_origin(Origin::new(area.width / 2, area.height / 2));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_level_bar(frame, chunks[0]);
        self.render_tabs(frame, chunks[1]);
        match self.tab {
            Tab::Home => self.render_home(frame, chunks[2]),
            Tab::Journal => self.render_journal(frame, chunks[2]),
            Tab::Exposure => self.render_exposure(frame, chunks[2]),
            Tab::Progress => self.render_progress(frame, chunks[2]),
        }
        self.render_footer(frame, chunks[3]);

        if let Some(overlay) = &self.overlay {
            let form_area = centered_rect(60, 80, area);
            match overlay {
                Overlay::Thought { form, distortion, intensity } => {
                    let label = distortion.map(|d| d.label()).unwrap_or("none");
                    form.render(
                        frame,
                        form_area,
                        vec![
                            Line::from(format!("Distortion: {}  [F2] change", label)),
                            Line::from(format!("Intensity: {}%  [PgUp/PgDn]", intensity)),
                        ],
                    );
                }
                Overlay::Exposure { form, rating, .. } => {
                    form.render(
                        frame,
                        form_area,
                        vec![Line::from(format!("Discomfort: {} SUDS  [PgUp/PgDn]", rating))],
                    );
                }
                Overlay::Reflection { form } => form.render(frame, form_area, Vec::new()),
            }
        }

        self.render_popups(frame);
    }

    fn render_level_bar(&self, frame: &mut Frame, area: Rect) {
        let profile = self.session.profile();
        let feedback = self.session.feedback();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Length(2)])
            .split(area);

        let level_style = if feedback.is_leveling_up() {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK)
        } else {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        };
        let mut spans = vec![
            Span::styled(" LivreMente  ", Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            Span::styled("LEVEL ", Style::default().fg(Color::DarkGray)),
            Span::styled(profile.level.to_string(), level_style),
            Span::styled(
                format!("   {} / {} XP", profile.points, profile.xp_to_next_level),
                Style::default().fg(Color::DarkGray),
            ),
        ];
        if let Some(banner) = feedback.level_up() {
            let text = if banner.levels_gained > 1 {
                format!("   LEVEL UP x{}!", banner.levels_gained)
            } else {
                "   LEVEL UP!".to_string()
            };
            spans.push(Span::styled(text, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), rows[0]);

        let bar_color = if feedback.is_gaining_xp() { Color::White } else { ACCENT };
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(bar_color).bg(Color::Rgb(40, 30, 25)))
            .ratio(profile.progress_percent() / 100.0)
            .label(format!("{} XP to next level", profile.xp_remaining()));
        frame.render_widget(gauge, rows[1]);
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = Tab::ALL.iter().map(|t| Line::from(t.title())).collect();
        let tabs = Tabs::new(titles)
            .select(self.tab.index())
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::DarkGray))
            .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));
        frame.render_widget(tabs, area);
    }

    fn render_home(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(6), Constraint::Length(6)])
            .split(area);

        // Daily consult button
        let consult_area = Rect::new(chunks[0].x, chunks[0].y, chunks[0].width.min(28), chunks[0].height);
        self.consult_area = consult_area;
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "[C] Daily Consult",
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(ACCENT))),
            consult_area,
        );

        // Habit grid, two columns
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Ratio(1, 3), Constraint::Ratio(1, 3), Constraint::Ratio(1, 3)])
            .split(chunks[1]);

        self.habit_areas.clear();
        for (i, habit) in Habit::ALL.iter().enumerate() {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(rows[i / 2]);
            let cell = cols[i % 2];
            self.habit_areas.push((*habit, cell));

            let done = self.records.habits.is_done(*habit);
            let (mark, style) = if done {
                ("[x]", Style::default().fg(Color::Rgb(120, 200, 230)).add_modifier(Modifier::BOLD))
            } else {
                ("[ ]", Style::default().fg(Color::DarkGray))
            };
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    format!("{} {} {}", i + 1, mark, habit.label()),
                    style,
                )))
                .block(Block::default().borders(Borders::ALL).border_style(style)),
                cell,
            );
        }

        self.render_reflection(frame, chunks[2]);
    }

    fn render_reflection(&self, frame: &mut Frame, area: Rect) {
        let reflection = &self.records.reflection;
        let mut lines = Vec::new();
        if reflection.is_empty() {
            lines.push(Line::from(Span::styled(
                "What went well today? Press [R] to write it down.",
                Style::default().fg(Color::DarkGray),
            )));
        } else {
            if !reflection.gratitude.is_empty() {
                lines.push(Line::from(vec![
                    Span::styled("Grateful for: ", Style::default().fg(Color::DarkGray)),
                    Span::styled(reflection.gratitude.clone(), Style::default().fg(Color::White)),
                ]));
            }
            for win in reflection.filled_wins() {
                lines.push(Line::from(Span::styled(
                    format!("+ {}", win),
                    Style::default().fg(Color::Rgb(120, 200, 230)),
                )));
            }
        }

        frame.render_widget(
            Paragraph::new(lines)
                .block(Block::default().title(" Wins of the Day ").borders(Borders::ALL))
                .wrap(Wrap { trim: true }),
            area,
        );
    }

    fn render_journal(&self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![
            Line::from(Span::styled(
                "Thought Journal   [N] New record",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        if self.records.journal.is_empty() {
            lines.push(Line::from(Span::styled(
                "No records yet.",
                Style::default().fg(Color::DarkGray),
            )));
        }
        for record in self.records.journal.records() {
            let distortion = record.distortion.map(|d| format!(" ({})", d.label())).unwrap_or_default();
            lines.push(Line::from(vec![
                Span::styled(record.emotion.clone(), Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
                Span::styled(format!(" {}%{}", record.intensity, distortion), Style::default().fg(Color::DarkGray)),
            ]));
            lines.push(Line::from(Span::styled(
                format!("  \"{}\"", record.automatic_thought),
                Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
            )));
        }

        frame.render_widget(
            Paragraph::new(lines)
                .block(Block::default().borders(Borders::ALL))
                .wrap(Wrap { trim: true }),
            area,
        );
    }

    fn render_exposure(&self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![
            Line::from(Span::styled(
                "Exposure Ladder   [N] New  [E] Edit  [Enter] Done",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        for (i, step) in self.records.ladder.pending().iter().enumerate() {
            let selected = i == self.exposure_cursor;
            let style = if selected {
                Style::default().fg(Color::Black).bg(ACCENT)
            } else {
                Style::default().fg(Color::White)
            };
            lines.push(Line::from(Span::styled(
                format!("{:>3} SUDS  {}", step.rating, step.behavior),
                style,
            )));
        }
        for step in self.records.ladder.steps().iter().filter(|s| s.completed) {
            lines.push(Line::from(Span::styled(
                format!("{:>3} SUDS  {}", step.rating, step.behavior),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT),
            )));
        }

        frame.render_widget(Paragraph::new(lines).block(Block::default().borders(Borders::ALL)), area);
    }

    fn render_progress(&self, frame: &mut Frame, area: Rect) {
        let profile = self.session.profile();
        let curve = &self.session.config().curve;
        let total = curve.total_xp_for_level(profile.level).saturating_add(profile.points);

        let lines = vec![
            Line::from(Span::styled(
                format!("Level {}", profile.level),
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!("User: {}", self.session.user())),
            Line::from(format!("Lifetime XP: {}", total)),
            Line::from(format!("Next level at: {} XP", profile.xp_to_next_level)),
            Line::from(format!("Habits today: {}/{}", self.records.habits.completed_count(), Habit::ALL.len())),
            Line::from(format!("Thought records: {}", self.records.journal.len())),
            Line::from(format!(
                "Challenges done: {}/{}",
                self.records.ladder.steps().iter().filter(|s| s.completed).count(),
                self.records.ladder.len()
            )),
            Line::from(format!("Badges: {}", profile.badges.len())),
        ];

        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL)),
            area,
        );
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let text = match (&self.status, self.tab) {
            (Some(status), _) => status.clone(),
            (None, Tab::Home) => "[1-6] Toggle habit  [C] Consult  [R] Reflect  [Tab] Switch  [Q] Quit".to_string(),
            (None, _) => "[Tab] Switch  [Q] Quit".to_string(),
        };
        frame.render_widget(
            Paragraph::new(Span::styled(text, Style::default().fg(Color::DarkGray))),
            area,
        );
    }

    fn render_popups(&self, frame: &mut Frame) {
        let area = frame.area();
        let feedback = self.session.feedback();
        let now = feedback.now();

        for popup in feedback.popups() {
            let text = format!("+{} XP", popup.amount);
            let rise = (popup.rise(now) * 3.0) as u16;
            let y = popup.origin.y.saturating_sub(rise);
            let width = (text.len() as u16).min(area.width.saturating_sub(popup.origin.x));
            if width == 0 || y >= area.height {
                continue;
            }
            let cell = Rect::new(popup.origin.x, y, width, 1);
            frame.render_widget(Clear, cell);
            frame.render_widget(
                Paragraph::new(Span::styled(
                    text,
                    Style::default().fg(Color::Rgb(255, 150, 40)).add_modifier(Modifier::BOLD),
                )),
                cell,
            );
        }
    }
}

fn contains(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x && x < area.x + area.width && y >= area.y && y < area.y + area.height
}

/// Helper to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::Silent;
    use crate::config::{FeedbackTimings, ProgressionConfig};
    use crate::feedback::{FeedbackEmitter, ManualClock};
    use crate::profile::{MemoryProfileStore, UserId};
    use tempfile::TempDir;

    fn app() -> (App, TempDir) {
        let dir = TempDir::new().unwrap();
        let clock = ManualClock::new();
        let session = Session::open(
            UserId::new("ui").unwrap(),
            ProgressionConfig::default(),
            Box::new(MemoryProfileStore::new()),
            FeedbackEmitter::new(FeedbackTimings::default(), Box::new(clock), Box::new(Silent)),
        );
        let app = App::new(session, LocalStorage::new(dir.path()));
        (app, dir)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_input(key(KeyCode::Char(c))).unwrap();
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_habit_keys_award_on_activation_only() {
        let (mut app, _dir) = app();
        app.handle_input(key(KeyCode::Char('1'))).unwrap();
        assert_eq!(app.session().profile().points, 30);
        app.handle_input(key(KeyCode::Char('1'))).unwrap();
        assert_eq!(app.session().profile().points, 30);
    }

    #[test]
    fn test_consult_key() {
        let (mut app, _dir) = app();
        app.handle_input(key(KeyCode::Char('c'))).unwrap();
        assert_eq!(app.session().profile().points, 200);
        assert_eq!(app.session().feedback().popup_count(), 1);
    }

    #[test]
    fn test_exposure_flow() {
        let (mut app, _dir) = app();
        app.handle_input(key(KeyCode::Tab)).unwrap();
        app.handle_input(key(KeyCode::Tab)).unwrap();
        app.handle_input(key(KeyCode::Char('n'))).unwrap();
        type_text(&mut app, "Order coffee");
        app.handle_input(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.session().profile().points, 0);

        app.handle_input(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.session().profile().points, 75);
    }

    #[test]
    fn test_incomplete_thought_form_stays_open() {
        let (mut app, _dir) = app();
        app.handle_input(key(KeyCode::Tab)).unwrap();
        app.handle_input(key(KeyCode::Char('n'))).unwrap();
        for _ in 0..5 {
            app.handle_input(key(KeyCode::Enter)).unwrap();
        }
        assert!(app.overlay.is_some());
        assert_eq!(app.session().profile().points, 0);
    }

    #[test]
    fn test_level_up_status_clears_on_next_key() {
        let (mut app, _dir) = app();
        for _ in 0..3 {
            app.handle_input(key(KeyCode::Char('c'))).unwrap();
        }
        assert_eq!(app.status.as_deref(), Some("Level 2 reached!"));

        app.handle_input(key(KeyCode::Tab)).unwrap();
        assert!(app.status.is_none());
    }

    #[test]
    fn test_reflection_is_saved_without_xp() {
        let (mut app, dir) = app();
        app.handle_input(key(KeyCode::Char('r'))).unwrap();
        type_text(&mut app, "Sunny day");
        app.handle_input(key(KeyCode::Enter)).unwrap();
        type_text(&mut app, "Went to therapy");
        for _ in 0..3 {
            app.handle_input(key(KeyCode::Enter)).unwrap();
        }
        assert!(app.overlay.is_none());
        assert_eq!(app.session().profile().points, 0);

        let storage = LocalStorage::new(dir.path());
        let reloaded = UserRecords::load(&storage, app.session().user());
        assert_eq!(reloaded.reflection.gratitude, "Sunny day");
        assert_eq!(reloaded.reflection.filled_wins().collect::<Vec<_>>(), vec!["Went to therapy"]);
    }

    #[test]
    fn test_quit() {
        let (mut app, _dir) = app();
        assert!(app.handle_input(key(KeyCode::Char('q'))).unwrap());
    }
}
