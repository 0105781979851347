// crates/portal-client/src/view.rs
// Plain-text rendering of list and detail state for the terminal front end

use crate::controller::detail::{
    ActivitiesOverview, Dashboard, GroupOverview, HaikuOverview, SessionOverview,
};
use crate::controller::{DetailState, ListView, LoadState};
use crate::notify::{Notification, Variant};
use chrono::{DateTime, NaiveDateTime};
use portal_types::{Haiku, HaikuStatus, Pagination, StudySession, Word, WordDetail};
use std::fmt::Write;

/// Table column: header and cell formatter
pub type Column<T> = (&'static str, fn(&T) -> String);

/// Title and wording around a list table
#[derive(Debug, Clone, Copy)]
pub struct ListFrame<'a> {
    pub title: &'a str,
    /// Plural noun used in the empty state ("words", "groups")
    pub noun: &'a str,
    /// Extra line under the empty-state message
    pub empty_hint: Option<&'a str>,
}

impl<'a> ListFrame<'a> {
    pub fn new(title: &'a str, noun: &'a str) -> Self {
        Self {
            title,
            noun,
            empty_hint: None,
        }
    }

    pub fn with_hint(mut self, hint: &'a str) -> Self {
        self.empty_hint = Some(hint);
        self
    }
}

pub const WORDS_EMPTY_HINT: &str =
    "Load the initial vocabulary from settings: portal admin reset load_initial_data";

pub fn render_list<T>(
    frame: ListFrame<'_>,
    view: &ListView<'_, T>,
    columns: &[Column<T>],
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", frame.title);

    if let Some(err) = view.error() {
        let _ = writeln!(out, "Error: {err}");
    }

    if matches!(view.state, LoadState::Loading | LoadState::Idle) && view.items.is_empty() {
        out.push_str("Loading...\n");
        return out;
    }

    if view.is_empty_state() {
        let _ = writeln!(out, "No {} found.", frame.noun);
        if let Some(hint) = frame.empty_hint {
            let _ = writeln!(out, "{hint}");
        }
        return out;
    }

    if !view.items.is_empty() {
        out.push_str(&render_table(view.items, columns));
    }

    if let Some(p) = view.pagination {
        out.push_str(&pagination_footer(
            p,
            view.previous_enabled(),
            view.next_enabled(),
        ));
        out.push('\n');
    }
    out
}

fn render_table<T>(items: &[T], columns: &[Column<T>]) -> String {
    let cells: Vec<Vec<String>> = items
        .iter()
        .map(|item| columns.iter().map(|(_, cell)| cell(item)).collect())
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, (header, _))| {
            cells
                .iter()
                .map(|row| width(&row[i]))
                .chain(std::iter::once(width(header)))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let headers: Vec<String> = columns.iter().map(|(h, _)| h.to_string()).collect();
    push_row(&mut out, &headers, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);
    for row in &cells {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, row: &[String], widths: &[usize]) {
    let padded: Vec<String> = row
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!("{cell}{}", " ".repeat(w.saturating_sub(width(cell)))))
        .collect();
    let _ = writeln!(out, "{}", padded.join("  ").trim_end());
}

fn width(s: &str) -> usize {
    s.chars().count()
}

/// `[< Previous]  Page X of Y  [Next >]`, with `(-)` for a disabled control
pub fn pagination_footer(p: Pagination, previous: bool, next: bool) -> String {
    let prev = if previous { "[< Previous]" } else { "(-)" };
    let next = if next { "[Next >]" } else { "(-)" };
    format!(
        "{prev}  Page {} of {}  {next}",
        p.current_page,
        p.total_pages.max(1)
    )
}

pub fn render_detail<T>(state: &DetailState<T>, render: impl FnOnce(&T) -> String) -> String {
    match state {
        DetailState::Loading => "Loading...\n".to_string(),
        DetailState::NotFound => "Not found\n".to_string(),
        DetailState::Failed(msg) => format!("Error: {msg}\n"),
        DetailState::Loaded(value) => render(value),
    }
}

/// ISO timestamps as `YYYY-MM-DD HH:MM`; anything unparsable passes through
pub fn format_timestamp(raw: &str) -> String {
    const OUT: &str = "%Y-%m-%d %H:%M";
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(OUT).to_string();
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.format(OUT).to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Truncate to `max` characters with an ellipsis
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max).collect();
        format!("{cut}...")
    }
}

// ═══════════════════════════════════════
// COLUMN SETS
// ═══════════════════════════════════════

pub fn word_columns() -> [Column<Word>; 5] {
    [
        ("Japanese", |w| w.japanese.clone()),
        ("Romaji", |w| w.romaji.clone()),
        ("English", |w| w.english.clone()),
        ("Correct", |w| w.correct_count.to_string()),
        ("Wrong", |w| w.wrong_count.to_string()),
    ]
}

pub fn group_columns() -> [Column<portal_types::Group>; 3] {
    [
        ("ID", |g| g.id.to_string()),
        ("Name", |g| g.name.clone()),
        ("Words", |g| g.word_count.to_string()),
    ]
}

pub fn session_columns() -> [Column<StudySession>; 6] {
    [
        ("ID", |s| s.id.to_string()),
        ("Activity", |s| s.activity_name.clone()),
        ("Group", |s| s.group_name.clone()),
        ("Start", |s| format_timestamp(&s.start_time)),
        ("End", |s| {
            s.end_time
                .as_deref()
                .map(format_timestamp)
                .unwrap_or_else(|| "-".to_string())
        }),
        ("Reviews", |s| s.review_items_count.to_string()),
    ]
}

// ═══════════════════════════════════════
// DETAIL PAGES
// ═══════════════════════════════════════

pub fn render_word(word: &WordDetail) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", word.japanese, word.romaji);
    let _ = writeln!(out, "English: {}", word.english);
    let _ = writeln!(
        out,
        "Correct: {}  Wrong: {}",
        word.stats.correct_count, word.stats.wrong_count
    );
    if !word.groups.is_empty() {
        let names: Vec<&str> = word.groups.iter().map(|g| g.name.as_str()).collect();
        let _ = writeln!(out, "Groups: {}", names.join(", "));
    }
    out
}

pub fn render_group(overview: &GroupOverview) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({} words)",
        overview.group.name, overview.group.stats.total_word_count
    );
    out.push('\n');
    out.push_str(&render_page(
        "Words",
        "words",
        &overview.words.items,
        overview.words.pagination,
        &word_columns(),
    ));
    out.push('\n');
    out.push_str(&render_page(
        "Study Sessions",
        "study sessions",
        &overview.sessions.items,
        overview.sessions.pagination,
        &session_columns(),
    ));
    out
}

pub fn render_session(overview: &SessionOverview) -> String {
    let s = &overview.session;
    let mut out = String::new();
    let _ = writeln!(out, "Study Session #{}", s.id);
    let _ = writeln!(out, "Activity: {}", s.activity_name);
    let _ = writeln!(out, "Group: {}", s.group_name);
    let _ = writeln!(out, "Started: {}", format_timestamp(&s.start_time));
    if let Some(end) = &s.end_time {
        let _ = writeln!(out, "Ended: {}", format_timestamp(end));
    }
    let _ = writeln!(out, "Review items: {}", s.review_items_count);
    out.push('\n');
    out.push_str(&render_page(
        "Words Reviewed",
        "words",
        &overview.words.items,
        overview.words.pagination,
        &word_columns(),
    ));
    out
}

/// Static page embedded in a detail view (no controller behind it)
fn render_page<T>(
    title: &str,
    noun: &str,
    items: &[T],
    pagination: Pagination,
    columns: &[Column<T>],
) -> String {
    let state = LoadState::Loaded;
    let view = ListView {
        items,
        pagination: Some(pagination),
        state: &state,
    };
    render_list(ListFrame::new(title, noun), &view, columns)
}

pub fn render_dashboard(dashboard: &Dashboard) -> String {
    let mut out = String::new();
    out.push_str("Dashboard\n");

    match &dashboard.last_session {
        Some(s) => {
            let _ = writeln!(
                out,
                "Last session: {} with {} on {} ({} reviews)",
                s.activity_name,
                s.group_name,
                format_timestamp(&s.start_time),
                s.review_items_count
            );
        }
        None => out.push_str("Last session: none yet\n"),
    }

    let p = &dashboard.progress;
    let _ = writeln!(
        out,
        "Study progress: {} / {} ({}%)",
        p.total_words_studied,
        p.total_available_words,
        p.percent()
    );

    let s = &dashboard.stats;
    let _ = writeln!(out, "Success rate: {:.1}%", s.success_rate);
    let _ = writeln!(out, "Study sessions: {}", s.total_study_sessions);
    let _ = writeln!(out, "Active groups: {}", s.total_active_groups);
    let _ = writeln!(out, "Study streak: {} days", s.study_streak_days);
    out
}

pub fn render_activities(overview: &ActivitiesOverview) -> String {
    let mut out = String::new();
    out.push_str("Study Activities\n");
    if overview.activities.is_empty() {
        out.push_str("No study activities found.\n");
    }
    for a in &overview.activities {
        let _ = writeln!(out, "  [{}] {}", a.id, a.name);
        if !a.description.is_empty() {
            let _ = writeln!(out, "      {}", truncate(&a.description, 72));
        }
    }
    out.push_str("\nRecent Sessions\n");
    if overview.recent_sessions.is_empty() {
        out.push_str("No study sessions found.\n");
    } else {
        out.push_str(&render_table(&overview.recent_sessions, &session_columns()));
    }
    out
}

// ═══════════════════════════════════════
// HAIKU
// ═══════════════════════════════════════

pub fn status_badge(status: &HaikuStatus) -> String {
    format!("[{}]", status.as_str())
}

/// One haiku per block: badge plus the three English lines, or the id
pub fn render_haiku_list(view: &ListView<'_, Haiku>) -> String {
    let mut out = String::new();
    out.push_str("Haikus\n");
    if let Some(err) = view.error() {
        let _ = writeln!(out, "Error: {err}");
    }
    if view.is_empty_state() {
        out.push_str("No haikus found.\n");
        return out;
    }
    for haiku in view.items {
        let _ = writeln!(out, "{} {}", status_badge(&haiku.status()), haiku.haiku_id);
        match haiku.english_lines() {
            Some(lines) => {
                for line in lines {
                    let _ = writeln!(out, "    {line}");
                }
            }
            None => {
                let _ = writeln!(out, "    {}", haiku.haiku_id);
            }
        }
    }
    out
}

pub fn render_haiku(overview: &HaikuOverview) -> String {
    let h = &overview.haiku;
    let mut out = String::new();
    let _ = writeln!(out, "Haiku {} {}", h.haiku_id, status_badge(&h.status()));
    if h.status() == HaikuStatus::Failed && !h.error_message.is_empty() {
        let _ = writeln!(out, "Error: {}", h.error_message);
    }
    if let Some(lines) = h.english_lines() {
        out.push('\n');
        for line in lines {
            let _ = writeln!(out, "  {line}");
        }
    }
    if let Some(lines) = h.japanese_lines() {
        out.push('\n');
        for line in lines {
            let _ = writeln!(out, "  {line}");
        }
    }
    let images = [
        (&h.image_description_1, &h.image_link_1),
        (&h.image_description_2, &h.image_link_2),
        (&h.image_description_3, &h.image_link_3),
    ];
    if images.iter().any(|(_, link)| !link.is_empty()) {
        out.push_str("\nImages\n");
        for (desc, link) in images.iter().filter(|(_, l)| !l.is_empty()) {
            let _ = writeln!(out, "  {link}  {}", truncate(desc, 60));
        }
    }
    let audio: Vec<&str> = h.audio_links().collect();
    if !audio.is_empty() {
        out.push_str("\nAudio\n");
        for link in audio {
            let _ = writeln!(out, "  {link}");
        }
    }
    if !overview.chats.is_empty() {
        out.push_str("\nChat\n");
        for chat in &overview.chats {
            let _ = writeln!(out, "  {}: {}", chat.role, chat.message);
        }
    }
    out
}

pub fn render_notification(n: &Notification) -> String {
    match n.variant {
        Variant::Success => format!("[ok] {}", n.description),
        Variant::Error => format!("[error] {}", n.description),
    }
}

// ═══════════════════════════════════════
// AUDIO
// ═══════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Playback {
    #[default]
    Paused,
    Playing,
}

/// Play/pause bookkeeping for one audio clip. No sound is produced here.
#[derive(Debug, Clone, Default)]
pub struct AudioToggle {
    src: String,
    state: Playback,
}

impl AudioToggle {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            state: Playback::Paused,
        }
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn toggle(&mut self) -> Playback {
        self.state = match self.state {
            Playback::Paused => Playback::Playing,
            Playback::Playing => Playback::Paused,
        };
        self.state
    }

    /// The clip finished on its own
    pub fn ended(&mut self) {
        self.state = Playback::Paused;
    }

    pub fn state(&self) -> Playback {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == Playback::Playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_types::Page;

    fn word(japanese: &str, english: &str) -> Word {
        Word {
            id: Some(1),
            japanese: japanese.into(),
            romaji: "r".into(),
            english: english.into(),
            correct_count: 2,
            wrong_count: 1,
        }
    }

    fn pagination(current: u32, total: u32) -> Pagination {
        Pagination {
            current_page: current,
            total_pages: total,
            total_items: 0,
            items_per_page: 10,
        }
    }

    // ============================================================================
    // List rendering tests
    // ============================================================================

    #[test]
    fn test_first_page_next_enabled() {
        let items = vec![word("猫", "cat"), word("犬", "dog")];
        let state = LoadState::Loaded;
        let view = ListView {
            items: &items,
            pagination: Some(pagination(1, 3)),
            state: &state,
        };
        let out = render_list(ListFrame::new("Words", "words"), &view, &word_columns());
        assert!(out.contains("cat"));
        assert!(out.contains("dog"));
        assert!(out.contains("Page 1 of 3"));
        assert!(out.contains("[Next >]"));
        assert!(!out.contains("[< Previous]"));
    }

    #[test]
    fn test_last_page_next_disabled() {
        let items = vec![word("猫", "cat")];
        let state = LoadState::Loaded;
        let view = ListView {
            items: &items,
            pagination: Some(pagination(3, 3)),
            state: &state,
        };
        let out = render_list(ListFrame::new("Words", "words"), &view, &word_columns());
        assert!(!out.contains("[Next >]"));
        assert!(out.ends_with("[< Previous]  Page 3 of 3  (-)\n"));
    }

    #[test]
    fn test_empty_state_has_no_table() {
        let items: Vec<Word> = vec![];
        let state = LoadState::Loaded;
        let view = ListView {
            items: &items,
            pagination: Some(pagination(1, 0)),
            state: &state,
        };
        let frame = ListFrame::new("Words", "words").with_hint(WORDS_EMPTY_HINT);
        let out = render_list(frame, &view, &word_columns());
        assert!(out.contains("No words found."));
        assert!(out.contains("load_initial_data"));
        assert!(!out.contains("Japanese"));
    }

    #[test]
    fn test_error_banner_keeps_stale_rows() {
        let items = vec![word("猫", "cat")];
        let state = LoadState::Errored("HTTP error! status: 500".into());
        let view = ListView {
            items: &items,
            pagination: Some(pagination(1, 2)),
            state: &state,
        };
        let out = render_list(ListFrame::new("Words", "words"), &view, &word_columns());
        assert!(out.contains("Error: HTTP error! status: 500"));
        assert!(out.contains("cat"));
    }

    #[test]
    fn test_loading_state() {
        let items: Vec<Word> = vec![];
        let state = LoadState::Loading;
        let view = ListView {
            items: &items,
            pagination: None,
            state: &state,
        };
        let out = render_list(ListFrame::new("Words", "words"), &view, &word_columns());
        assert!(out.contains("Loading..."));
    }

    #[test]
    fn test_columns_align_multibyte() {
        let items = vec![word("ありがとう", "thanks"), word("猫", "cat")];
        let table = render_table(&items, &word_columns());
        let lines: Vec<&str> = table.lines().collect();
        let col = |line: &str| line.chars().position(|c| c == 'r').unwrap_or(0);
        assert_eq!(col(lines[2]), col(lines[3]));
    }

    // ============================================================================
    // Detail and formatting tests
    // ============================================================================

    #[test]
    fn test_render_detail_states() {
        let render = |n: &i32| format!("value {n}\n");
        assert_eq!(render_detail(&DetailState::Loading, render), "Loading...\n");
        assert_eq!(render_detail(&DetailState::<i32>::NotFound, render), "Not found\n");
        assert_eq!(
            render_detail(&DetailState::<i32>::Failed("boom".into()), render),
            "Error: boom\n"
        );
        assert_eq!(render_detail(&DetailState::Loaded(4), render), "value 4\n");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp("2025-02-08T17:20:23.123456"), "2025-02-08 17:20");
        assert_eq!(format_timestamp("2025-02-08T17:20:23+00:00"), "2025-02-08 17:20");
        assert_eq!(format_timestamp("2025-02-08 09:05:00"), "2025-02-08 09:05");
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 5), "hello...");
        assert_eq!(truncate("ありがとう", 2), "あり...");
    }

    #[test]
    fn test_dashboard_without_last_session() {
        let dashboard = Dashboard {
            stats: portal_types::QuickStats {
                success_rate: 80.0,
                total_study_sessions: 4,
                total_active_groups: 2,
                study_streak_days: 3,
            },
            progress: portal_types::StudyProgress {
                total_words_studied: 3,
                total_available_words: 124,
            },
            last_session: None,
        };
        let out = render_dashboard(&dashboard);
        assert!(out.contains("none yet"));
        assert!(out.contains("3 / 124 (2%)"));
        assert!(out.contains("80.0%"));
        assert!(out.contains("3 days"));
    }

    #[test]
    fn test_group_overview_embeds_pages() {
        let overview = GroupOverview {
            group: portal_types::GroupDetail {
                id: 1,
                name: "Core Verbs".into(),
                stats: portal_types::GroupStats {
                    total_word_count: 1,
                },
            },
            words: Page {
                items: vec![word("食べる", "to eat")],
                pagination: pagination(1, 1),
            },
            sessions: Page {
                items: vec![],
                pagination: pagination(1, 0),
            },
        };
        let out = render_group(&overview);
        assert!(out.contains("Core Verbs (1 words)"));
        assert!(out.contains("to eat"));
        assert!(out.contains("No study sessions found."));
    }

    // ============================================================================
    // Haiku tests
    // ============================================================================

    #[test]
    fn test_haiku_list_falls_back_to_id() {
        let items = vec![Haiku {
            haiku_id: "abc-123".into(),
            status: "new".into(),
            ..Default::default()
        }];
        let state = LoadState::Loaded;
        let view = ListView {
            items: &items,
            pagination: None,
            state: &state,
        };
        let out = render_haiku_list(&view);
        assert!(out.contains("[new] abc-123"));
        assert!(out.contains("    abc-123"));
    }

    #[test]
    fn test_audio_toggle() {
        let mut audio = AudioToggle::new("https://cdn.example/1.mp3");
        assert!(!audio.is_playing());
        assert_eq!(audio.toggle(), Playback::Playing);
        assert_eq!(audio.toggle(), Playback::Paused);
        audio.toggle();
        audio.ended();
        assert_eq!(audio.state(), Playback::Paused);
    }
}
