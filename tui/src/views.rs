//! View rendering for each phase.
//!
//! Each view takes state plus a width and produces `Vec<String>` lines.
//! Views do not own data or perform I/O — the runner styles and draws the
//! lines, and the layout constants here double as the hit-testing grid for
//! pointer input.

use dossier_core::archive::Archive;
use dossier_core::format::{format_dt, format_training, linkify_chapter};
use dossier_core::types::{Record, Skill};
use serde_json::Value;

use crate::app::{App, Focus};
use crate::boot::BootSequence;
use crate::login::{LoginField, LoginForm, LoginMode};
use crate::menu;
use crate::render::{self, pad_right, rule, wrap};


// ---------------------------------------------------------------------------
// Browser layout grid
// ---------------------------------------------------------------------------

/// Character width of the menu column, marker included.
pub const MENU_COL_WIDTH: usize = 20;
/// Characters between the menu and list columns (" │ ").
pub const COLUMN_GAP: usize = 3;
/// Rows above the first menu/list row (header + rule).
pub const ROW_OFFSET: usize = 2;

/// A pointer position resolved against the browser grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Menu(usize),
    List(usize),
}

/// Map browser-area coordinates to the entry under the pointer.
pub fn hit_test(x: u16, y: u16, menu_len: usize, list_len: usize) -> Option<Hit> {
    let row = y as usize;
    if row < ROW_OFFSET {
        return None;
    }
    let index = row - ROW_OFFSET;
    let col = x as usize;
    if col < MENU_COL_WIDTH {
        if index < menu_len {
            return Some(Hit::Menu(index));
        }
    } else if col >= MENU_COL_WIDTH + COLUMN_GAP && index < list_len {
        return Some(Hit::List(index));
    }
    None
}


// ---------------------------------------------------------------------------
// BootView
// ---------------------------------------------------------------------------

/// Renders the boot screen: the revealed lines plus a skip hint.
pub struct BootView;

impl BootView {
    pub fn render(boot: &BootSequence, width: usize) -> Vec<String> {
        let mut lines: Vec<String> = boot
            .lines()
            .iter()
            .map(|l| render::truncate_chars(l, width))
            .collect();
        if !boot.is_complete() {
            lines.push("█".to_string());
            lines.push(String::new());
            lines.push("[ENTER] skip".to_string());
        }
        lines
    }
}


// ---------------------------------------------------------------------------
// LoginView
// ---------------------------------------------------------------------------

/// Row of the agent field within the login view.
pub const LOGIN_AGENT_ROW: u16 = 3;
/// Row of the password field within the login view.
pub const LOGIN_PASSWORD_ROW: u16 = 4;
/// Column where field values start.
pub const LOGIN_VALUE_COL: u16 = 13;

/// Renders the login form.
pub struct LoginView;

impl LoginView {
    pub fn render(form: &LoginForm, width: usize) -> Vec<String> {
        let mut lines = Vec::new();
        lines.push(form.mode().title().to_string());
        lines.push(rule(width.min(40)));
        lines.push(String::new());

        let agent_marker = marker(form.focused_field() == LoginField::Agent);
        lines.push(format!("{} Agent    : {}", agent_marker, form.agent_text()));

        if form.mode() == LoginMode::Reset {
            lines.push(String::new());
        } else {
            let pw_marker = marker(form.focused_field() == LoginField::Password);
            lines.push(format!("{} Password : {}", pw_marker, form.password_masked()));
        }

        lines.push(String::new());
        if form.is_in_flight() {
            lines.push("VERIFYING...".to_string());
        } else if let Some(message) = form.message() {
            lines.push(render::truncate_chars(message, width));
        } else {
            lines.push(String::new());
        }

        lines.push(String::new());
        lines.push("[Enter] submit   [Ctrl+N] register   [Ctrl+R] reset password".to_string());
        lines.push("[Ctrl+G] provider sign-in   [F2] sound   [Ctrl+Q] quit".to_string());
        lines
    }

    /// Cursor position (x, y) within the login view.
    pub fn cursor(form: &LoginForm) -> (u16, u16) {
        let row = match form.focused_field() {
            LoginField::Agent => LOGIN_AGENT_ROW,
            LoginField::Password => LOGIN_PASSWORD_ROW,
        };
        (LOGIN_VALUE_COL + form.cursor_pos() as u16, row)
    }
}

fn marker(focused: bool) -> char {
    if focused {
        '▸'
    } else {
        ' '
    }
}


// ---------------------------------------------------------------------------
// BrowserView
// ---------------------------------------------------------------------------

/// Renders the authenticated two-column browser plus the detail panel.
pub struct BrowserView;

impl BrowserView {
    pub fn render(app: &App, archive: &Archive, width: usize) -> Vec<String> {
        let mut lines = Vec::new();
        lines.push(header_line(app));
        lines.push(rule(width));

        let list = app.current_list(archive);
        let label_width = MENU_COL_WIDTH - 2;
        let rows = menu::TOP_MENU.len().max(list.len());
        for row in 0..rows {
            let left = match menu::TOP_MENU.get(row) {
                Some(entry) => {
                    let cursor = row == app.menu_cursor;
                    let focused = cursor && app.focus == Focus::MenuColumn;
                    format!(
                        "{} {}",
                        marker(focused),
                        pad_right(entry.label, label_width)
                    )
                }
                None => " ".repeat(MENU_COL_WIDTH),
            };
            let right = match list.get(row) {
                Some(entry) => {
                    let cursor = row == app.list_cursor;
                    let focused = cursor && app.focus == Focus::ListColumn;
                    format!("{} {}", marker(focused), entry.label)
                }
                None => String::new(),
            };
            lines.push(render::truncate_chars(
                &format!("{} {} {}", left, render::BOX_V, right),
                width,
            ));
        }

        lines.push(String::new());
        lines.extend(DetailPanel::render(app, archive, width));
        lines
    }
}

fn header_line(app: &App) -> String {
    let mut path = String::from("DOSSIER ARCHIVE");
    if let Some(menu_key) = app.selected_menu.as_deref() {
        if let Some(entry) = menu::TOP_MENU.iter().find(|e| e.key == menu_key) {
            path.push_str(" / ");
            path.push_str(&entry.label.to_uppercase());
        }
    }
    if let Some(category) = app.selected_category.as_deref() {
        if let Some(entry) = menu::FILE_CATEGORIES.iter().find(|e| e.key == category) {
            path.push_str(" / ");
            path.push_str(&entry.label.to_uppercase());
        }
    }
    path
}


// ---------------------------------------------------------------------------
// DetailPanel
// ---------------------------------------------------------------------------

/// Renders the selected record, or a placeholder when nothing resolves.
pub struct DetailPanel;

impl DetailPanel {
    pub fn render(app: &App, archive: &Archive, width: usize) -> Vec<String> {
        let inner = width.saturating_sub(4);
        match app.selected_detail(archive) {
            None => render::panel(
                Some("DETAIL"),
                &["Nothing selected.".to_string()],
                width,
            ),
            Some(record) => {
                let body = if app.selected_category.as_deref() == Some("skills") {
                    match Skill::from_record(record) {
                        Some(skill) => skill_lines(&skill, archive, inner),
                        None => record_lines(record, inner),
                    }
                } else {
                    record_lines(record, inner)
                };
                render::panel(Some(&record.name), &body, width)
            }
        }
    }
}

/// Lines for a skill record, mirroring the reference panel: attribute,
/// badges, DT, description, tests, source.
fn skill_lines(skill: &Skill, archive: &Archive, width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(attr) = skill.attribute.as_deref().and_then(|id| archive.attribute(id)) {
        lines.push(format!("Attribute: {}", attr.name));
    }

    let mut badges = Vec::new();
    if skill.load_penalty {
        badges.push("[LOAD]");
    }
    if skill.kit_required {
        badges.push("[KIT]");
    }
    if skill.under_construction() {
        badges.push("[UNDER CONSTRUCTION]");
    }
    if !badges.is_empty() {
        lines.push(badges.join(" "));
    }

    if !skill.dt.is_empty() {
        lines.push(format!("DT: {}", format_dt(&skill.dt)));
    }

    if let Some(description) = skill.description.as_deref() {
        lines.push(String::new());
        lines.extend(wrap(&linkify_chapter(description), width));
    }

    if !skill.tests.is_empty() {
        lines.push(String::new());
        lines.push("Tests".to_string());
        for test in &skill.tests {
            let mut head = format!("▪ {}", test.name);
            let mut meta = Vec::new();
            if test.training.is_some() {
                meta.push(format!(
                    "Requires: {}",
                    format_training(test.training.as_deref())
                ));
            }
            if !test.dt.official.is_empty() {
                meta.push(format!("DT: {}", format_dt(&test.dt)));
            }
            if !meta.is_empty() {
                head.push_str(" — ");
                head.push_str(&meta.join(" • "));
            }
            lines.push(render::truncate_chars(&head, width));

            let mut test_badges = Vec::new();
            if test.load_penalty || skill.load_penalty {
                test_badges.push("[LOAD]");
            }
            if test.kit_required || skill.kit_required {
                test_badges.push("[KIT]");
            }
            if !test_badges.is_empty() {
                lines.push(format!("  {}", test_badges.join(" ")));
            }

            if let Some(description) = test.description.as_deref() {
                for line in wrap(&linkify_chapter(description), width.saturating_sub(2)) {
                    lines.push(format!("  {}", line));
                }
            }
        }
    }

    if let Some(source) = skill.source.as_deref() {
        lines.push(String::new());
        lines.push(format!("Source: {}", source));
    }

    lines
}

/// Generic field listing for records without a dedicated panel.
fn record_lines(record: &Record, width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(description) = record.text_field("description") {
        lines.extend(wrap(&linkify_chapter(description), width));
    }

    let mut listed_any = false;
    for (key, value) in &record.fields {
        if key == "description" {
            continue;
        }
        let rendered = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Array(items) => {
                let parts: Vec<&str> = items.iter().filter_map(|v| v.as_str()).collect();
                if parts.is_empty() {
                    continue;
                }
                parts.join(", ")
            }
            _ => continue,
        };
        if !listed_any {
            lines.push(String::new());
            listed_any = true;
        }
        lines.push(render::truncate_chars(
            &format!("{}: {}", key.replace('_', " "), rendered),
            width,
        ));
    }

    lines
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
