//! Line command input
//!
//! Each stdin line stands for one user action in the popup. Row numbers refer
//! to the line numbers of the last printed list and are resolved through the
//! sink's [`RowMap`], never by reading the printed text.

use tablist::keymap::{body_key_msg, KeyCode};
use tablist::messages::{FilterMsg, Msg, NavMsg, RowMsg};
use tablist::render::{RowKind, RowMap};

pub const HELP: &str = "\
commands:
  down | up | enter        move the highlight / open the highlighted tab
  type <text>              append text to the filter box
  key <KeyName> [text]     release a key in the filter box (text = box contents after)
  clear                    remove the filter
  move                     pointer moved over the list (hides the highlight)
  click <row>              click a tab row or group header
  mute <row>               toggle the speaker of a tab row
  close <row>              close button of a tab row
  middle <row>             middle click on a tab row
  group <row>              collapse or expand a group
  reload                   fetch a fresh snapshot
  help | quit";

/// A parsed input line
#[derive(Debug, Clone)]
pub enum Input {
    /// Messages to feed to `update`, in order
    Msgs(Vec<Msg>),
    Help,
    Quit,
}

fn row_arg(arg: Option<&str>) -> Result<usize, String> {
    let arg = arg.ok_or_else(|| "missing row number".to_string())?;
    arg.trim()
        .parse()
        .map_err(|_| format!("not a row number: '{}'", arg))
}

fn tab_row(rows: &RowMap, line: usize) -> Result<tablist::render::RowTarget, String> {
    rows.tab_at(line)
        .ok_or_else(|| format!("row {} is not a tab", line))
}

/// Parse one command line against the current filter text and row map
pub fn parse_line(line: &str, query: &str, rows: &RowMap) -> Result<Input, String> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (command, arg) = match line.trim_start().split_once(' ') {
        Some((command, arg)) => (command, Some(arg)),
        None => (line.trim(), None),
    };

    let msgs = match command {
        "" => vec![],
        "help" | "?" => return Ok(Input::Help),
        "quit" | "exit" | "q" => return Ok(Input::Quit),

        "down" => body_key_msg(KeyCode::ArrowDown).into_iter().collect(),
        "up" => body_key_msg(KeyCode::ArrowUp).into_iter().collect(),
        "enter" => body_key_msg(KeyCode::Enter).into_iter().collect(),

        "type" => {
            let text = arg.unwrap_or_default();
            let Some(last) = text.chars().last() else {
                return Err("nothing to type".to_string());
            };
            vec![Msg::key_up(KeyCode::Char(last), format!("{}{}", query, text))]
        }
        "key" => {
            let arg = arg.ok_or_else(|| "missing key name".to_string())?;
            let (name, text) = match arg.split_once(' ') {
                Some((name, text)) => (name, Some(text)),
                None => (arg, None),
            };
            let key = KeyCode::from_name(name);
            let value = match (text, key) {
                (Some(text), _) => text.to_string(),
                (None, KeyCode::Backspace) => {
                    let mut value = query.to_string();
                    value.pop();
                    value
                }
                (None, _) => query.to_string(),
            };
            // Both the filter box and the popup body see the key
            let mut msgs = vec![Msg::key_up(key, value)];
            msgs.extend(body_key_msg(key));
            msgs
        }
        "clear" => vec![Msg::Filter(FilterMsg::Clear)],
        "move" => vec![Msg::Nav(NavMsg::ClearHighlight)],
        "reload" => vec![Msg::Reload],

        "click" => {
            let line = row_arg(arg)?;
            match rows.get(line) {
                Some(RowKind::Tab(target)) => vec![Msg::Row(RowMsg::Activate(target))],
                Some(RowKind::GroupHeader(group_id)) => {
                    vec![Msg::Row(RowMsg::ToggleGroup(group_id))]
                }
                Some(RowKind::WindowHeader(_)) => vec![],
                None => return Err(format!("no row {}", line)),
            }
        }
        "mute" => {
            let target = tab_row(rows, row_arg(arg)?)?;
            vec![Msg::Row(RowMsg::ToggleMute(target.tab_id))]
        }
        "close" | "middle" => {
            let target = tab_row(rows, row_arg(arg)?)?;
            vec![Msg::Row(RowMsg::Close(target.tab_id))]
        }
        "group" => {
            let line = row_arg(arg)?;
            let group_id = rows
                .group_at(line)
                .ok_or_else(|| format!("row {} is not a group header", line))?;
            vec![Msg::Row(RowMsg::ToggleGroup(group_id))]
        }

        other => return Err(format!("unknown command '{}' (try 'help')", other)),
    };
    Ok(Input::Msgs(msgs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablist::model::{
        Group, GroupColor, GroupId, GroupListing, SessionMode, Snapshot, Tab, TabDirectory, TabId,
        Window, WindowId,
    };
    use tablist::project;

    fn rows() -> RowMap {
        let tab = |id: i64, index: usize, group: Option<i64>| Tab {
            id: TabId(id),
            window_id: WindowId(1),
            group_id: group.map(GroupId),
            index,
            title: format!("Tab {}", id),
            url: format!("https://example.com/{}", id),
            favicon: None,
            active: false,
            audible: false,
            muted: false,
        };
        let mut dir = TabDirectory::new(SessionMode::CurrentWindow);
        dir.ingest(Snapshot {
            current_window_id: Some(WindowId(1)),
            windows: vec![Window {
                id: WindowId(1),
                incognito: false,
                tabs: vec![tab(1, 0, None), tab(2, 1, Some(9))],
            }],
            groups: GroupListing::Supported(vec![Group {
                id: GroupId(9),
                window_id: Some(WindowId(1)),
                title: "Work".to_string(),
                color: GroupColor::Blue,
                collapsed: false,
            }]),
        });
        RowMap::build(&project(&dir, None))
    }

    fn msgs(input: Result<Input, String>) -> Vec<Msg> {
        match input {
            Ok(Input::Msgs(msgs)) => msgs,
            other => panic!("expected messages, got {:?}", other),
        }
    }

    #[test]
    fn test_type_appends_to_query() {
        let parsed = msgs(parse_line("type il", "ma", &rows()));
        assert!(matches!(
            parsed.as_slice(),
            [Msg::Filter(FilterMsg::KeyUp { key: KeyCode::Char('l'), value })] if value == "mail"
        ));
    }

    #[test]
    fn test_arrow_key_reaches_filter_and_body() {
        let parsed = msgs(parse_line("key ArrowDown", "go", &rows()));
        assert_eq!(parsed.len(), 2);
        assert!(matches!(parsed[1], Msg::Nav(NavMsg::Next)));
    }

    #[test]
    fn test_backspace_drops_last_char() {
        let parsed = msgs(parse_line("key Backspace", "goo", &rows()));
        assert!(matches!(
            parsed.as_slice(),
            [Msg::Filter(FilterMsg::KeyUp { value, .. })] if value == "go"
        ));
    }

    #[test]
    fn test_rows_resolve_through_row_map() {
        // Line 0 is tab 1, line 1 the "Work" header, line 2 tab 2
        let rows = rows();
        assert!(matches!(
            msgs(parse_line("click 1", "", &rows)).as_slice(),
            [Msg::Row(RowMsg::ToggleGroup(GroupId(9)))]
        ));
        assert!(matches!(
            msgs(parse_line("middle 2", "", &rows)).as_slice(),
            [Msg::Row(RowMsg::Close(TabId(2)))]
        ));
        assert!(parse_line("mute 1", "", &rows).is_err());
        assert!(parse_line("close 7", "", &rows).is_err());
    }

    #[test]
    fn test_quit_and_unknown() {
        assert!(matches!(parse_line("quit", "", &rows()), Ok(Input::Quit)));
        assert!(parse_line("frobnicate", "", &rows()).is_err());
    }
}
