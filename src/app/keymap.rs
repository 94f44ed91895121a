//! Keybinding configuration: parse `keybinds.conf`, provide defaults, and map keys to actions.
//!
//! This module manages keyboard shortcuts for the list screen. It supports:
//! - Loading custom keybindings from a config file (`keybinds.conf`)
//! - Falling back to defaults if no config is present
//! - Resolving key presses (with modifiers) to semantic actions
//! - Exporting the current keymap back to a file for reference or customization

use std::collections::HashMap;
use std::path::Path;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Semantic keyboard actions that can be bound to key combinations.
///
/// Several keys may map to the same action (both `j` and Down move down).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Focus the search box.
    StartSearch,
    /// Ask to delete the selected user.
    DeleteSelection,
    /// Switch between card and row layouts.
    ToggleView,
    /// Step through the page-size options.
    CyclePageSize,
    /// Display the help dialog.
    OpenHelp,
    /// Move the selection up within the page.
    MoveUp,
    /// Move the selection down within the page.
    MoveDown,
    /// Go to the previous page.
    PrevPage,
    /// Go to the next page.
    NextPage,
    /// Jump to page 1.
    FirstPage,
    /// Jump to the last page.
    LastPage,
    /// Bound but does nothing.
    Ignore,
}

const ALL_ACTIONS: [KeyAction; 13] = [
    KeyAction::Quit,
    KeyAction::StartSearch,
    KeyAction::DeleteSelection,
    KeyAction::ToggleView,
    KeyAction::CyclePageSize,
    KeyAction::OpenHelp,
    KeyAction::MoveUp,
    KeyAction::MoveDown,
    KeyAction::PrevPage,
    KeyAction::NextPage,
    KeyAction::FirstPage,
    KeyAction::LastPage,
    KeyAction::Ignore,
];

/// Maps `(KeyModifiers, KeyCode)` pairs to [`KeyAction`]s.
#[derive(Clone, Debug)]
pub struct Keymap {
    bindings: HashMap<(KeyModifiers, KeyCode), KeyAction>,
}

impl Keymap {
    /// Default bindings: arrows and hjkl for navigation, single letters for commands.
    pub fn new_defaults() -> Self {
        use KeyCode::*;
        use KeyModifiers as M;
        let mut bindings = HashMap::new();
        bindings.insert((M::NONE, Char('q')), KeyAction::Quit);
        bindings.insert((M::CONTROL, Char('c')), KeyAction::Quit);
        bindings.insert((M::NONE, Esc), KeyAction::Ignore);
        bindings.insert((M::NONE, Char('/')), KeyAction::StartSearch);
        bindings.insert((M::NONE, Delete), KeyAction::DeleteSelection);
        bindings.insert((M::NONE, Char('d')), KeyAction::DeleteSelection);
        bindings.insert((M::NONE, Char('v')), KeyAction::ToggleView);
        bindings.insert((M::NONE, Char('s')), KeyAction::CyclePageSize);
        bindings.insert((M::NONE, Char('?')), KeyAction::OpenHelp);
        // Navigation
        bindings.insert((M::NONE, Up), KeyAction::MoveUp);
        bindings.insert((M::NONE, Down), KeyAction::MoveDown);
        bindings.insert((M::NONE, Left), KeyAction::PrevPage);
        bindings.insert((M::NONE, Right), KeyAction::NextPage);
        bindings.insert((M::NONE, Char('k')), KeyAction::MoveUp);
        bindings.insert((M::NONE, Char('j')), KeyAction::MoveDown);
        bindings.insert((M::NONE, Char('h')), KeyAction::PrevPage);
        bindings.insert((M::NONE, Char('l')), KeyAction::NextPage);
        bindings.insert((M::NONE, PageUp), KeyAction::PrevPage);
        bindings.insert((M::NONE, PageDown), KeyAction::NextPage);
        bindings.insert((M::NONE, Home), KeyAction::FirstPage);
        bindings.insert((M::NONE, End), KeyAction::LastPage);

        Self { bindings }
    }

    /// Load a keymap from `path`, or write the defaults there if it does not exist.
    pub fn load_or_init(path: &Path) -> Self {
        if path.exists() {
            return Self::from_file(path).unwrap_or_default();
        }
        let km = Self::default();
        if let Err(e) = km.write_file(path) {
            tracing::warn!(path = %path.display(), error = %e, "could not write default keybindings");
        }
        km
    }

    /// Load a keymap from a configuration file.
    ///
    /// Lines use `<Action> = <KeySpec>`; the reversed `<KeySpec> = <Action>` is
    /// accepted too. Entries override the defaults.
    pub fn from_file(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        Some(Self::parse(&contents))
    }

    /// Apply config text on top of the defaults.
    pub fn parse(contents: &str) -> Self {
        let mut map = Self::default();
        for raw in contents.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((lhs, rhs)) = line.split_once('=') else {
                continue;
            };
            let (lhs, rhs) = (lhs.trim(), rhs.trim());
            if lhs.is_empty() || rhs.is_empty() {
                continue;
            }
            if let (Some(action), Some(key)) = (parse_action(lhs), parse_key(rhs)) {
                map.bindings.insert(key, action);
            } else if let (Some(key), Some(action)) = (parse_key(lhs), parse_action(rhs)) {
                map.bindings.insert(key, action);
            } else {
                tracing::debug!(line, "ignoring unrecognised keybinding");
            }
        }
        map
    }

    /// Write every binding, grouped by action, in `<Action> = <KeySpec>` form.
    pub fn write_file(&self, path: &Path) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# usrlist-manager keybindings\n");
        buf.push_str("# Format: <Action> = <KeySpec>\n");
        buf.push_str("# KeySpec examples: q, Ctrl+c, Enter, Esc, Up, Down, Left, Right, PageUp, PageDown, Home, End, Delete, /\n");
        let _ = writeln!(
            &mut buf,
            "# Actions: {}\n",
            ALL_ACTIONS.map(format_action).join(", ")
        );

        for action in ALL_ACTIONS {
            for k in self.keys_for(action) {
                let _ = writeln!(&mut buf, "{} = {}", format_action(action), k);
            }
        }

        std::fs::write(path, buf)
    }

    /// Resolve a key event to its action, if bound.
    pub fn resolve(&self, key: &KeyEvent) -> Option<KeyAction> {
        if let Some(a) = self.bindings.get(&(key.modifiers, key.code)) {
            return Some(*a);
        }
        // Terminals report '?' and capitals with SHIFT held.
        if key.modifiers == KeyModifiers::SHIFT {
            if let KeyCode::Char(_) = key.code {
                return self.bindings.get(&(KeyModifiers::NONE, key.code)).copied();
            }
        }
        None
    }

    /// Snapshot of all bindings.
    pub fn all_bindings(&self) -> Vec<((KeyModifiers, KeyCode), KeyAction)> {
        self.bindings.iter().map(|(k, v)| (*k, *v)).collect()
    }

    /// Keys bound to `action`, formatted and sorted.
    pub fn keys_for(&self, action: KeyAction) -> Vec<String> {
        let mut keys: Vec<String> = self
            .bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|((m, c), _)| Self::format_key(*m, *c))
            .collect();
        keys.sort();
        keys
    }

    /// Format a key (modifiers + code) into a spec like "Ctrl+c" or "PageUp".
    pub fn format_key(mods: KeyModifiers, code: KeyCode) -> String {
        use KeyCode::*;
        let base = match code {
            Enter => "Enter".to_string(),
            Delete => "Delete".to_string(),
            Esc => "Esc".to_string(),
            Tab => "Tab".to_string(),
            BackTab => "BackTab".to_string(),
            Up => "Up".to_string(),
            Down => "Down".to_string(),
            Left => "Left".to_string(),
            Right => "Right".to_string(),
            PageUp => "PageUp".to_string(),
            PageDown => "PageDown".to_string(),
            Home => "Home".to_string(),
            End => "End".to_string(),
            Char(c) => c.to_string(),
            _ => format!("{:?}", code),
        };
        if mods.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{}", base)
        } else {
            base
        }
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new_defaults()
    }
}

fn parse_key(spec: &str) -> Option<(KeyModifiers, KeyCode)> {
    use KeyCode::*;
    let s = spec.trim();
    let (mods, rest) = match s.strip_prefix("Ctrl+") {
        Some(after) => (KeyModifiers::CONTROL, after),
        None => (KeyModifiers::NONE, s),
    };
    let code = match rest {
        "Enter" => Enter,
        "Delete" => Delete,
        "Esc" | "Escape" => Esc,
        "Tab" => Tab,
        "BackTab" => BackTab,
        "Up" => Up,
        "Down" => Down,
        "Left" => Left,
        "Right" => Right,
        "PageUp" => PageUp,
        "PageDown" => PageDown,
        "Home" => Home,
        "End" => End,
        _ => {
            let mut chars = rest.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Char(c),
                _ => return None,
            }
        }
    };
    Some((mods, code))
}

fn parse_action(s: &str) -> Option<KeyAction> {
    ALL_ACTIONS
        .into_iter()
        .find(|a| format_action(*a) == s.trim())
}

pub fn format_action(a: KeyAction) -> &'static str {
    match a {
        KeyAction::Quit => "Quit",
        KeyAction::StartSearch => "StartSearch",
        KeyAction::DeleteSelection => "DeleteSelection",
        KeyAction::ToggleView => "ToggleView",
        KeyAction::CyclePageSize => "CyclePageSize",
        KeyAction::OpenHelp => "OpenHelp",
        KeyAction::MoveUp => "MoveUp",
        KeyAction::MoveDown => "MoveDown",
        KeyAction::PrevPage => "PrevPage",
        KeyAction::NextPage => "NextPage",
        KeyAction::FirstPage => "FirstPage",
        KeyAction::LastPage => "LastPage",
        KeyAction::Ignore => "Ignore",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn defaults_resolve_core_keys() {
        let km = Keymap::default();
        assert_eq!(km.resolve(&key(KeyCode::Char('q'))), Some(KeyAction::Quit));
        assert_eq!(km.resolve(&key(KeyCode::Char('v'))), Some(KeyAction::ToggleView));
        assert_eq!(km.resolve(&key(KeyCode::Right)), Some(KeyAction::NextPage));
        assert_eq!(km.resolve(&key(KeyCode::Delete)), Some(KeyAction::DeleteSelection));
        assert_eq!(km.resolve(&key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn shifted_question_mark_opens_help() {
        let km = Keymap::default();
        let ev = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT);
        assert_eq!(km.resolve(&ev), Some(KeyAction::OpenHelp));
    }

    #[test]
    fn parse_accepts_both_orders_and_overrides_defaults() {
        let km = Keymap::parse("# comment\nToggleView = t\nx = Quit\nnonsense\nFoo = q\n");
        assert_eq!(km.resolve(&key(KeyCode::Char('t'))), Some(KeyAction::ToggleView));
        assert_eq!(km.resolve(&key(KeyCode::Char('x'))), Some(KeyAction::Quit));
        assert_eq!(km.resolve(&key(KeyCode::Char('q'))), Some(KeyAction::Quit));
    }

    #[test]
    fn parse_key_handles_ctrl_and_names() {
        assert_eq!(
            parse_key("Ctrl+c"),
            Some((KeyModifiers::CONTROL, KeyCode::Char('c')))
        );
        assert_eq!(parse_key("Home"), Some((KeyModifiers::NONE, KeyCode::Home)));
        assert_eq!(parse_key("nope"), None);
    }

    #[test]
    fn format_and_parse_action_agree() {
        for a in ALL_ACTIONS {
            assert_eq!(parse_action(format_action(a)), Some(a));
        }
    }
}
