//! Line-driven lookup session.
//!
//! Plain lines replace the query text. Lines starting with `:` are commands
//! that map onto widget events.

use std::sync::Arc;

use deso_arcgis::ArcgisClient;
use deso_core::AppConfig;
use deso_widget::{Applied, Event, FormState, Key, ResultView, Widget};
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
type an address to search; commands:
  :down :up :enter :esc   navigate the suggestion panel
  :focus :blur            focus or leave the input
  :pick N                 choose suggestion N
  :submit                 look up the current text
  :init                   initialize the widget
  :quit                   exit";

/// One parsed input line.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Event(Event),
    Init,
    Help,
    Quit,
}

/// Parse one input line. Returns a user-facing message for unknown or
/// malformed commands.
pub(crate) fn parse_line(line: &str) -> Result<Command, String> {
    let Some(rest) = line.strip_prefix(':') else {
        return Ok(Command::Event(Event::Input(line.to_owned())));
    };

    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let command = match name {
        "down" => Command::Event(Event::Key(Key::ArrowDown)),
        "up" => Command::Event(Event::Key(Key::ArrowUp)),
        "enter" => Command::Event(Event::Key(Key::Enter)),
        "esc" => Command::Event(Event::Key(Key::Escape)),
        "focus" => Command::Event(Event::Focus),
        "blur" => Command::Event(Event::Blur),
        "submit" => Command::Event(Event::Submit),
        "pick" => {
            let n: usize = parts
                .next()
                .and_then(|raw| raw.parse().ok())
                .filter(|&n| n > 0)
                .ok_or_else(|| "usage: :pick N (N starts at 1)".to_owned())?;
            Command::Event(Event::ClickSuggestion(n - 1))
        }
        "init" => Command::Init,
        "help" => Command::Help,
        "quit" | "q" => Command::Quit,
        other => return Err(format!("unknown command :{other} (try :help)")),
    };
    Ok(command)
}

/// Render the form as text.
pub(crate) fn render(state: &FormState) -> String {
    let mut out = format!("> {}  [{}]", state.query, state.submit_label());
    if state.panel_visible() {
        for (i, suggestion) in state.suggestions.iter().enumerate() {
            let marker = if state.highlight == Some(i) { '*' } else { ' ' };
            out.push_str(&format!("\n {marker}{:>2}. {}", i + 1, suggestion.display_text));
        }
    }
    if let Some(error) = state.error() {
        out.push_str(&format!("\nerror: {error}"));
    }
    if let Some(result) = state.result() {
        out.push('\n');
        out.push_str(&ResultView::from_result(result).to_string());
    }
    out
}

fn print_state(widget: &Widget<ArcgisClient>) {
    match widget.session() {
        Some(session) => println!("{}", render(session.state())),
        None => println!("widget `{}` not initialized; use :init", widget.config().container_id),
    }
}

/// Run the session until `:quit` or end of input.
///
/// # Errors
///
/// Returns an error if reading stdin fails.
pub(crate) async fn run_interactive(config: &AppConfig, client: ArcgisClient) -> anyhow::Result<()> {
    let mut widget = Widget::from_app_config(config, Arc::new(client));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("{HELP}");
    print_state(&widget);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_line(&line) {
                    Ok(Command::Quit) => break,
                    Ok(Command::Help) => {
                        println!("{HELP}");
                        continue;
                    }
                    Ok(Command::Init) => {
                        widget.init();
                    }
                    Ok(Command::Event(event)) => {
                        if let Err(e) = widget.handle(event) {
                            println!("{e}");
                            continue;
                        }
                    }
                    Err(message) => {
                        println!("{message}");
                        continue;
                    }
                }
                print_state(&widget);
            }
            applied = widget.next_completion() => {
                if applied != Applied::Discarded {
                    print_state(&widget);
                }
            }
        }
    }

    Ok(())
}
