use std::io::BufRead;
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};
use tokio_util::sync::CancellationToken;

use voicenav_application::{
    CatalogOptions, MapCatalog, NavigationDispatcher, event_channel, spawn_rescan_loop,
};
use voicenav_core::{NavConfig, NavEvent, NavStatus};

/// One line of stdin.
#[derive(Debug, PartialEq)]
enum Input<'a> {
    Empty,
    Use(&'a str),
    Latest,
    Rescan,
    Maps,
    Unknown(&'a str),
    Phrase(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    let line = line.trim();
    if line.is_empty() {
        return Input::Empty;
    }
    let Some(command) = line.strip_prefix(':') else {
        return Input::Phrase(line);
    };

    let (name, arg) = command
        .split_once(char::is_whitespace)
        .map(|(name, arg)| (name, arg.trim()))
        .unwrap_or((command, ""));
    match (name, arg) {
        ("use", id) if !id.is_empty() => Input::Use(id),
        ("latest", "") => Input::Latest,
        ("rescan", "") => Input::Rescan,
        ("maps", "") => Input::Maps,
        _ => Input::Unknown(line),
    }
}

/// Reads `reader` line by line on a detached thread.
///
/// The thread is never joined, so a read still blocked on stdin does not
/// hold up shutdown. The channel closes at end of input or on the first read
/// error.
fn spawn_line_reader<R>(reader: R) -> UnboundedReceiver<String>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = unbounded_channel();
    std::thread::spawn(move || {
        for line in reader.lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    tracing::warn!(error = %e, "stdin read failed");
                    break;
                }
            };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Runs the phrase loop until stdin closes or Ctrl-C.
///
/// Each stdin line is either a recognized phrase or a catalog command
/// (`:use <id>`, `:latest`, `:rescan`, `:maps`). Events are printed on
/// stdout as they are published.
pub async fn run(config: &NavConfig, json: bool) -> Result<()> {
    let source = Arc::new(super::generation_source(config)?);
    tracing::info!(maps = %source.base_dir().display(), "starting voice navigation");

    let (sink, mut events) = event_channel();
    let sink = Arc::new(sink);
    let catalog = Arc::new(MapCatalog::new(
        source,
        sink.clone(),
        CatalogOptions::from(&config.catalog),
    ));
    let dispatcher = NavigationDispatcher::from_config(config, catalog.clone(), sink);

    let printer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            print_event(&event, json);
        }
    });

    if let Err(e) = catalog.refresh().await {
        tracing::warn!(error = %e, "initial scan failed");
    }

    let cancel = CancellationToken::new();
    let rescan = config
        .catalog
        .discovery_interval()
        .map(|period| spawn_rescan_loop(catalog.clone(), period, cancel.clone()));

    let mut lines = spawn_line_reader(std::io::BufReader::new(std::io::stdin()));
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupted");
                break;
            }
            line = lines.recv() => {
                let Some(line) = line else {
                    break;
                };
                handle_input(parse_input(&line), &catalog, &dispatcher, config).await;
            }
        }
    }

    cancel.cancel();
    if let Some(handle) = rescan
        && let Err(e) = handle.await
    {
        tracing::warn!(error = %e, "rescan task ended abnormally");
    }

    // The printer finishes once every sink handle is gone.
    drop(dispatcher);
    drop(catalog);
    printer.await?;

    tracing::info!("voice navigation stopped");
    Ok(())
}

async fn handle_input(
    input: Input<'_>,
    catalog: &MapCatalog,
    dispatcher: &NavigationDispatcher,
    config: &NavConfig,
) {
    match input {
        Input::Empty => {}
        Input::Phrase(phrase) => {
            dispatcher.dispatch(phrase).await;
        }
        Input::Use(id) => {
            if !catalog.select_active(id).await {
                eprintln!("{}", format!("Unknown map generation: {}", id).red());
            }
        }
        Input::Latest => {
            if catalog.select_latest().await.is_none() {
                eprintln!("{}", "No map generations available".yellow());
            }
        }
        Input::Rescan => match catalog.refresh().await {
            Ok(_) => {}
            Err(e) => eprintln!("{}", format!("Rescan failed: {}", e).red()),
        },
        Input::Maps => {
            let snapshot = catalog.snapshot().await;
            if snapshot.is_empty() {
                eprintln!("{}", "No map generations available".yellow());
            } else {
                println!("{}", snapshot.summary(config.catalog.summary_limit));
                match snapshot.active_id() {
                    Some(id) => println!("active: {}", id.bright_cyan()),
                    None => println!("active: {}", "none".bright_black()),
                }
            }
        }
        Input::Unknown(line) => {
            eprintln!(
                "{}",
                format!("Unknown command {} (try :use <id>, :latest, :rescan, :maps)", line)
                    .bright_black()
            );
        }
    }
}

fn print_event(event: &NavEvent, json: bool) {
    if json {
        match serde_json::to_string(event) {
            Ok(line) => println!("{}", line),
            Err(e) => tracing::error!(error = %e, "failed to encode event"),
        }
        return;
    }

    let line = event.to_string();
    let line = match event {
        NavEvent::Room { .. } => line.bright_magenta(),
        NavEvent::Status {
            status: NavStatus::Error { .. },
        } => line.red(),
        NavEvent::Status { .. } => line.bright_blue(),
        NavEvent::Goal { .. } => line.green(),
        NavEvent::AvailableMaps { .. } => line.bright_black(),
    };
    println!("{}", line);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phrases_pass_through_trimmed() {
        assert_eq!(parse_input("  去客厅 "), Input::Phrase("去客厅"));
        assert_eq!(parse_input("   "), Input::Empty);
    }

    #[test]
    fn test_catalog_commands() {
        assert_eq!(
            parse_input(":use map_20250213_120000"),
            Input::Use("map_20250213_120000")
        );
        assert_eq!(parse_input(":latest"), Input::Latest);
        assert_eq!(parse_input(":rescan"), Input::Rescan);
        assert_eq!(parse_input(" :maps "), Input::Maps);
    }

    #[tokio::test]
    async fn test_line_reader_forwards_until_eof() {
        let input = std::io::Cursor::new("去客厅\n:maps\r\n\nlast");
        let mut lines = spawn_line_reader(input);

        let mut seen = Vec::new();
        while let Some(line) = lines.recv().await {
            seen.push(line);
        }
        assert_eq!(seen, vec!["去客厅", ":maps", "", "last"]);
    }

    #[tokio::test]
    async fn test_line_reader_stops_on_invalid_utf8() {
        let input = std::io::Cursor::new(b"kitchen\n\xff\xfe\nstudy\n".to_vec());
        let mut lines = spawn_line_reader(input);

        assert_eq!(lines.recv().await.as_deref(), Some("kitchen"));
        assert_eq!(lines.recv().await, None);
    }

    #[test]
    fn test_malformed_commands() {
        assert_eq!(parse_input(":use"), Input::Unknown(":use"));
        assert_eq!(parse_input(":latest now"), Input::Unknown(":latest now"));
        assert_eq!(parse_input(":goto kitchen"), Input::Unknown(":goto kitchen"));
    }
}
