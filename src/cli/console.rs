//! Interactive console: prints notifications as they arrive and accepts
//! commands on stdin.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

use crate::app::Result;
use crate::domain::Program;
use crate::watcher::{Watcher, WatcherEvent};

fn describe(p: &Program) -> String {
    format!(
        "{} :: {} / {}, {}",
        p.title,
        p.stream_url(),
        p.start_time,
        p.dj
    )
}

/// Snapshot in a stable order, so `list` indices stay valid for `play`.
fn sorted_programs(watcher: &Watcher) -> Vec<Program> {
    let mut programs: Vec<Program> = watcher.programs().into_iter().collect();
    programs.sort_by(|a, b| {
        a.start_time
            .cmp(&b.start_time)
            .then_with(|| a.detail_url.cmp(&b.detail_url))
    });
    programs
}

fn nth_program(watcher: &Watcher, arg: &str) -> Option<Program> {
    let index: usize = match arg.parse() {
        Ok(n) => n,
        Err(_) => {
            println!("not a program number: {arg}");
            return None;
        }
    };
    let programs = sorted_programs(watcher);
    match index.checked_sub(1).and_then(|i| programs.into_iter().nth(i)) {
        Some(p) => Some(p),
        None => {
            println!("no such program: {index} (see list)");
            None
        }
    }
}

fn print_help() {
    println!("commands:");
    println!("  start     begin watching");
    println!("  stop      halt watching");
    println!("  list      show programs currently on the air");
    println!("  json      dump the current snapshot as JSON");
    println!("  play <n>  open the stream playlist of program n");
    println!("  open <n>  open the detail page of program n");
    println!("  exit      quit");
}

/// Run the console until `exit` or end of input.
pub async fn run(watcher: Arc<Watcher>) -> Result<()> {
    let mut events = watcher.subscribe();
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(WatcherEvent::Begun(p)) => println!("Begun: {}", describe(&p)),
                Ok(WatcherEvent::Finished(p)) => println!("Finished: {}", describe(&p)),
                Ok(WatcherEvent::Error(e)) => {
                    println!("Error: {e} (watcher stopped; type start to retry)");
                }
                Err(RecvError::Lagged(skipped)) => {
                    println!("({skipped} notifications dropped)");
                }
                Err(RecvError::Closed) => break,
            },
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let line = line.trim();
                let (command, arg) = match line.split_once(' ') {
                    Some((c, a)) => (c, a.trim()),
                    None => (line, ""),
                };

                match command.to_lowercase().as_str() {
                    "start" => match watcher.start() {
                        Ok(()) => println!("watcher started"),
                        Err(e) => println!("{e}"),
                    },
                    "stop" => {
                        watcher.stop();
                        println!("watcher stopped");
                    }
                    "list" => {
                        let programs = sorted_programs(&watcher);
                        if programs.is_empty() {
                            println!("no programs on the air");
                        }
                        for (i, p) in programs.iter().enumerate() {
                            println!("{:3} {}", i + 1, describe(p));
                        }
                    }
                    "json" => {
                        let programs = sorted_programs(&watcher);
                        match serde_json::to_string_pretty(&programs) {
                            Ok(json) => println!("{json}"),
                            Err(e) => println!("JSON error: {e}"),
                        }
                    }
                    "play" => {
                        if let Some(p) = nth_program(&watcher, arg) {
                            let url = p.stream_url();
                            match open::that(&url) {
                                Ok(()) => println!("opening {url}"),
                                Err(e) => println!("failed to open {url}: {e}"),
                            }
                        }
                    }
                    "open" => {
                        if let Some(p) = nth_program(&watcher, arg) {
                            match open::that(&p.detail_url) {
                                Ok(()) => println!("opening {}", p.detail_url),
                                Err(e) => println!("failed to open {}: {e}", p.detail_url),
                            }
                        }
                    }
                    "help" | "?" => print_help(),
                    "exit" | "quit" => break,
                    "" => {}
                    other => println!("unknown command: {other} (try help)"),
                }
            }
        }
    }

    watcher.stop();
    Ok(())
}
