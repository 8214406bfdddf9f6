//! Line-based front end for the asset browser.
//!
//! Each line is parsed into a [`ReplCommand`]; query-changing commands
//! wait for the controller to settle and then reprint the page, so a
//! multi-field `filter` line still collapses into a single fetch.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};

use inv_core::capability::Capabilities;

use crate::browse::controller::{BrowseController, BrowseSnapshot, ListFetcher, ServiceFetcher};
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::assets::{asset_rows, download, history};
use crate::commands::shared::session::require_identity;
use crate::context::AppContext;
use crate::output;

const FILTER_FIELDS: &str =
    "name, serial_number, type_id, description, location_id, status, responsible_id, cost";

#[derive(Debug, PartialEq)]
enum ReplCommand {
    Filter(Vec<(String, String)>),
    Clear,
    Page(u32),
    Next,
    Prev,
    Show,
    History(i64),
    Export,
    Reload,
    Help,
    Quit,
}

/// Run the interactive browser until `quit` or end of input.
///
/// # Errors
///
/// Returns an error when no session is active or stdin fails; command
/// failures inside the loop are printed and the browser keeps running.
pub async fn run(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let identity = require_identity(ctx)?;
    let capabilities = Capabilities::for_role(identity.role);

    let controller = BrowseController::new(ServiceFetcher::new(ctx.service.clone()));
    let pump = controller.spawn_pump();

    eprintln!("inventory browser; type 'help' for commands, 'quit' to leave");
    controller.reload();
    controller.settled().await;
    print_page(&controller.snapshot());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    print_prompt(&controller.snapshot());
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if input.is_empty() {
            print_prompt(&controller.snapshot());
            continue;
        }
        match parse_command(input) {
            Err(message) => eprintln!("{message}"),
            Ok(ReplCommand::Quit) => break,
            Ok(ReplCommand::Help) => print_help(capabilities),
            Ok(ReplCommand::Show) => print_page(&controller.snapshot()),
            Ok(ReplCommand::Filter(pairs)) => {
                apply_filters(&controller, &pairs);
                controller.settled().await;
                print_page(&controller.snapshot());
            }
            Ok(ReplCommand::Clear) => {
                controller.clear_filters();
                controller.settled().await;
                print_page(&controller.snapshot());
            }
            Ok(ReplCommand::Page(page)) => {
                controller.set_page(page);
                controller.settled().await;
                print_page(&controller.snapshot());
            }
            Ok(ReplCommand::Next) => {
                if controller.next_page() {
                    controller.settled().await;
                    print_page(&controller.snapshot());
                } else {
                    eprintln!("already on the last page");
                }
            }
            Ok(ReplCommand::Prev) => {
                if controller.prev_page() {
                    controller.settled().await;
                    print_page(&controller.snapshot());
                } else {
                    eprintln!("already on the first page");
                }
            }
            Ok(ReplCommand::Reload) => {
                controller.reload();
                controller.settled().await;
                print_page(&controller.snapshot());
            }
            Ok(ReplCommand::History(id)) => {
                if capabilities.can_view_history {
                    if let Err(error) = history::run(id, ctx, flags).await {
                        eprintln!("error: {error:#}");
                    }
                } else {
                    eprintln!("viewing asset history requires the admin role");
                }
            }
            Ok(ReplCommand::Export) => {
                // The typed command is the confirmation; prompting again
                // would fight the async stdin reader for input.
                let filter = controller.snapshot().query.filter;
                if let Err(error) = download(&filter, None, true, ctx, flags).await {
                    eprintln!("error: {error:#}");
                }
            }
        }
        print_prompt(&controller.snapshot());
    }

    pump.abort();
    Ok(())
}

fn parse_command(input: &str) -> Result<ReplCommand, String> {
    let mut words = input.split_whitespace();
    let Some(head) = words.next() else {
        return Err("empty command; type 'help'".to_owned());
    };
    let rest: Vec<&str> = words.collect();
    match head {
        "filter" => {
            if rest.is_empty() {
                return Err(format!("usage: filter <field>=<value> ...; fields: {FILTER_FIELDS}"));
            }
            Ok(ReplCommand::Filter(parse_filter_pairs(&rest)?))
        }
        "clear" => Ok(ReplCommand::Clear),
        "page" => {
            let raw = rest.first().ok_or_else(|| "usage: page <number>".to_owned())?;
            let page = raw
                .parse()
                .map_err(|_| format!("not a page number: '{raw}'"))?;
            Ok(ReplCommand::Page(page))
        }
        "next" | "n" => Ok(ReplCommand::Next),
        "prev" => Ok(ReplCommand::Prev),
        "show" => Ok(ReplCommand::Show),
        "history" => {
            let raw = rest
                .first()
                .ok_or_else(|| "usage: history <asset id>".to_owned())?;
            let id = raw
                .parse()
                .map_err(|_| format!("not an asset id: '{raw}'"))?;
            Ok(ReplCommand::History(id))
        }
        "export" => Ok(ReplCommand::Export),
        "reload" => Ok(ReplCommand::Reload),
        "help" | "?" => Ok(ReplCommand::Help),
        "quit" | "q" | "exit" => Ok(ReplCommand::Quit),
        other => Err(format!("unknown command '{other}'; type 'help'")),
    }
}

/// Split `field=value` tokens. A bare token extends the previous value,
/// so `filter name=rack server` filters on "rack server".
fn parse_filter_pairs(tokens: &[&str]) -> Result<Vec<(String, String)>, String> {
    let mut pairs: Vec<(String, String)> = Vec::new();
    for token in tokens {
        if let Some((field, value)) = token.split_once('=') {
            pairs.push((field.to_owned(), value.to_owned()));
        } else if let Some(last) = pairs.last_mut() {
            last.1.push(' ');
            last.1.push_str(token);
        } else {
            return Err(format!("expected <field>=<value>, got '{token}'"));
        }
    }
    Ok(pairs)
}

fn apply_filters<F: ListFetcher>(controller: &BrowseController<F>, pairs: &[(String, String)]) {
    for (field, value) in pairs {
        if let Err(error) = controller.set_filter(field, value) {
            eprintln!("{error}");
        }
    }
}

fn print_page(snapshot: &BrowseSnapshot) {
    match output::render(&asset_rows(&snapshot.page), OutputFormat::Table) {
        Ok(table) => println!("{table}"),
        Err(error) => eprintln!("error: {error:#}"),
    }
    if let Some(error) = &snapshot.error {
        eprintln!("last fetch failed: {error}");
    }
    println!("{}", summary_line(snapshot));
}

fn summary_line(snapshot: &BrowseSnapshot) -> String {
    let mut line = format!(
        "page {}/{}, {} assets",
        snapshot.query.page,
        snapshot.total_pages().max(1),
        snapshot.page.total,
    );
    if snapshot.query.filter.has_active() {
        line.push_str(", filters active");
    }
    line
}

fn print_prompt(snapshot: &BrowseSnapshot) {
    let mut markers = String::new();
    if snapshot.query.filter.has_active() {
        markers.push_str(" [filtered]");
    }
    if snapshot.loading {
        markers.push_str(" [loading]");
    }
    print!(
        "assets {}/{}{markers} > ",
        snapshot.query.page,
        snapshot.total_pages().max(1),
    );
    let _ = std::io::stdout().flush();
}

fn print_help(capabilities: Capabilities) {
    eprintln!("commands:");
    eprintln!("  filter <field>=<value> ...   set filters; fields: {FILTER_FIELDS}");
    eprintln!("                               an empty value, 0, or 'no_filter' resets a field");
    eprintln!("  clear                        drop every filter");
    eprintln!("  page <n> | next | prev       move through pages");
    eprintln!("  show                         reprint the current page");
    eprintln!("  reload                       refetch the current page");
    if capabilities.can_view_history {
        eprintln!("  history <asset id>           show an asset's change history");
    }
    eprintln!("  export                       download the matching inventory as a spreadsheet");
    eprintln!("  help | quit");
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_filter_pairs() {
        let command = parse_command("filter name=latitude status=active").unwrap();
        let ReplCommand::Filter(pairs) = command else {
            panic!("expected a filter command");
        };
        assert_eq!(
            pairs,
            vec![
                ("name".to_owned(), "latitude".to_owned()),
                ("status".to_owned(), "active".to_owned()),
            ]
        );
    }

    #[test]
    fn bare_words_extend_the_previous_value() {
        let command = parse_command("filter name=rack server").unwrap();
        let ReplCommand::Filter(pairs) = command else {
            panic!("expected a filter command");
        };
        assert_eq!(pairs, vec![("name".to_owned(), "rack server".to_owned())]);
    }

    #[test]
    fn leading_bare_words_are_rejected() {
        assert!(parse_command("filter latitude").is_err());
        assert!(parse_command("filter").is_err());
    }

    #[test]
    fn parses_paging_commands() {
        assert_eq!(parse_command("page 4").unwrap(), ReplCommand::Page(4));
        assert_eq!(parse_command("next").unwrap(), ReplCommand::Next);
        assert_eq!(parse_command("n").unwrap(), ReplCommand::Next);
        assert_eq!(parse_command("prev").unwrap(), ReplCommand::Prev);
        assert!(parse_command("page four").is_err());
        assert!(parse_command("page").is_err());
    }

    #[test]
    fn parses_history_with_an_id() {
        assert_eq!(parse_command("history 7").unwrap(), ReplCommand::History(7));
        assert!(parse_command("history").is_err());
    }

    #[test]
    fn quit_has_aliases() {
        for input in ["quit", "q", "exit"] {
            assert_eq!(parse_command(input).unwrap(), ReplCommand::Quit);
        }
    }

    #[test]
    fn unknown_commands_are_reported() {
        let message = parse_command("wibble").unwrap_err();
        assert!(message.contains("unknown command 'wibble'"));
    }
}
