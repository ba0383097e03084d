//! Line-driven search session: each stdin line is either new query text or a
//! `:command` standing in for a key press or pointer event.

use std::time::Duration;

use subfind_core::highlight::match_segments;
use subfind_core::{Autocomplete, Key, KeyOutcome, SearchView, SuggestionSource};
use tokio::io::{AsyncBufReadExt, BufReader};

pub const HELP: &str = "\
Type text to replace the query. Commands:
  :focus  :blur  :outside     focus handling
  :down   :up    :enter       move / choose highlight
  :back                       delete a character (dismisses the scope chip when empty)
  :esc    :clear              close list / clear input
  :show   :wait               print state / wait for pending fetches
  :quit";

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Text(String),
    Focus,
    Blur,
    Outside,
    Key(Key),
    Back,
    Clear,
    Show,
    Wait,
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    let Some(cmd) = line.strip_prefix(':') else {
        return Command::Text(line.to_string());
    };
    match cmd.trim() {
        "focus" => Command::Focus,
        "blur" => Command::Blur,
        "outside" => Command::Outside,
        "down" => Command::Key(Key::ArrowDown),
        "up" => Command::Key(Key::ArrowUp),
        "enter" => Command::Key(Key::Enter),
        "esc" => Command::Key(Key::Escape),
        "back" => Command::Back,
        "clear" => Command::Clear,
        "show" => Command::Show,
        "wait" => Command::Wait,
        "help" | "?" => Command::Help,
        "quit" | "q" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    }
}

pub fn render(view: &SearchView) -> String {
    let mut out = String::new();
    let chip = view.scope.as_deref().map(|s| format!("[r/{s}] ")).unwrap_or_default();
    out.push_str(&format!("> {chip}{}", view.query));
    if view.pending {
        out.push_str("  (loading)");
    }
    if !view.list_visible() {
        return out;
    }
    for (i, s) in view.suggestions.iter().enumerate() {
        let marker = if view.highlighted == Some(i) { '>' } else { ' ' };
        let text: String = match_segments(&s.text, &view.suggestions_for)
            .iter()
            .map(|seg| if seg.matched { format!("*{}*", seg.text) } else { seg.text.to_string() })
            .collect();
        out.push_str(&format!("\n  {marker} {:<10} {text}", s.kind.as_str()));
    }
    out
}

pub async fn run<S: SuggestionSource>(
    ac: Autocomplete<S>,
    settle: Duration,
) -> std::io::Result<()> {
    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    ac.focus();

    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Command::Text(text) => {
                ac.input(&text);
            }
            Command::Focus => ac.focus(),
            Command::Blur => ac.blur(),
            Command::Outside => ac.click_outside(),
            Command::Key(key) => report(ac.key(key)),
            Command::Back => {
                let mut query = ac.snapshot().query;
                if query.pop().is_some() {
                    ac.input(&query);
                } else {
                    report(ac.key(Key::Backspace));
                }
            }
            Command::Clear => ac.clear(),
            Command::Show => {}
            Command::Wait => tokio::time::sleep(settle).await,
            Command::Help => {
                println!("{HELP}");
                continue;
            }
            Command::Quit => break,
            Command::Unknown(cmd) => {
                eprintln!("Unknown command ':{cmd}' (try :help)");
                continue;
            }
        }
        println!("{}", render(&ac.snapshot()));
    }
    Ok(())
}

fn report(outcome: KeyOutcome) {
    match outcome {
        KeyOutcome::Navigate(route) => println!("navigate {route}"),
        KeyOutcome::ScopeCleared => println!("scope cleared"),
        KeyOutcome::Closed | KeyOutcome::Highlighted(_) | KeyOutcome::Ignored => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use subfind_core::{Suggestion, SuggestionKind};

    #[test]
    fn parses_text_and_commands() {
        assert_eq!(parse_command("hello world"), Command::Text("hello world".into()));
        assert_eq!(parse_command(":down"), Command::Key(Key::ArrowDown));
        assert_eq!(parse_command(":back"), Command::Back);
        assert_eq!(parse_command(":q"), Command::Quit);
        assert_eq!(parse_command(":nope"), Command::Unknown("nope".into()));
        assert_eq!(parse_command(""), Command::Text(String::new()));
    }

    #[test]
    fn render_shows_chip_and_highlight() {
        let view = SearchView {
            query: "pin".into(),
            scope: Some("rust".into()),
            highlighted: Some(1),
            focused: true,
            open: true,
            suggestions: vec![
                Suggestion::new("1", "pinning", SuggestionKind::Query, ""),
                Suggestion::new("2", "Pin explained", SuggestionKind::Post, "/r/rust/comments/2"),
            ],
            suggestions_for: "pin".into(),
            pending: false,
        };
        let out = render(&view);
        assert!(out.starts_with("> [r/rust] pin"));
        assert!(out.contains("  query      *pin*ning"));
        assert!(out.contains("> post       *Pin* explained"));
    }

    #[test]
    fn render_hides_list_when_closed() {
        let view = SearchView {
            query: "x".into(),
            suggestions: vec![Suggestion::new("1", "x", SuggestionKind::Query, "")],
            ..SearchView::default()
        };
        assert_eq!(render(&view), "> x");
    }
}
