//! # Mechanical Calculator CLI
//!
//! Line-oriented front end over `calc_core::session::Session`. Each line
//! is one UI event, so a session can be scripted from a file:
//!
//! ```text
//! $ printf 'go flange-calculations\nset flange-bolts 4\nset flange-dimension 100\nshow\n' | calc_cli
//! ```
//!
//! Usage: `calc_cli [settings.json]`

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Duration;

use calc_core::asset_cache::{AssetCache, DirFetcher};
use calc_core::clipboard::MemoryClipboard;
use calc_core::file_io::load_settings_or_default;
use calc_core::logging::{init_default_logging, DEFAULT_FILTER};
use calc_core::session::{CopyOutcome, Session};
use calc_core::{CalcResult, Calculation, FieldId, Section};

const HELP: &str = "\
Commands:
  set <field> <value>    type a value into a field (empty value clears it)
  commit <field>         commit a field (recompute its calculation)
  run <calculation>      run a calculation by name
  go <section>           show a section
  esc                    Escape key: back to the main menu
  wait <ms>              let time pass
  copy <calculation>     copy a result
  show                   print the visible section
  json                   print the session as JSON
  precache <dir>         install the offline cache from a directory
  help                   this text
  quit                   exit";

fn main() {
    init_default_logging(DEFAULT_FILTER);

    let settings_path = std::env::args().nth(1);
    let settings = match load_settings_or_default(settings_path.as_deref().map(Path::new)) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            std::process::exit(1);
        }
    };

    println!("Mechanical Engineering Calculator");
    println!("=================================");
    println!("Type 'help' for commands.");
    println!();

    let mut session = Session::new(settings);
    let mut clipboard = MemoryClipboard::new();
    print_section(&session);

    let stdin = io::stdin();
    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }

        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let args: Vec<&str> = words.collect();

        let outcome = match command {
            "quit" | "exit" => break,
            "help" => {
                println!("{}", HELP);
                Ok(())
            }
            "set" => cmd_set(&mut session, &args),
            "commit" => cmd_commit(&mut session, &args),
            "run" => cmd_run(&mut session, &args),
            "go" => cmd_go(&mut session, &args),
            "esc" => {
                if session.handle_escape() {
                    print_section(&session);
                }
                Ok(())
            }
            "wait" => cmd_wait(&mut session, &args),
            "copy" => cmd_copy(&mut session, &mut clipboard, &args),
            "show" => {
                print_section(&session);
                Ok(())
            }
            "json" => {
                match serde_json::to_string_pretty(&session.snapshot()) {
                    Ok(json) => println!("{}", json),
                    Err(e) => eprintln!("Error: {}", e),
                }
                Ok(())
            }
            "precache" => cmd_precache(&session, &args),
            other => {
                println!("Unknown command '{}'. Type 'help'.", other);
                Ok(())
            }
        };

        if let Err(e) = outcome {
            println!("Error: {}", e);
        }
    }
}

fn usage(text: &str) -> CalcResult<()> {
    println!("Usage: {}", text);
    Ok(())
}

fn cmd_set(session: &mut Session, args: &[&str]) -> CalcResult<()> {
    let Some(id) = args.first() else {
        return usage("set <field> <value>");
    };
    let field: FieldId = id.parse()?;
    let value = args.get(1).copied().unwrap_or("");
    let result = session.input_changed(field, value)?;
    println!(
        "  {} = {}   {}: {}",
        field,
        value,
        field.calculation().display_name(),
        result.text
    );
    Ok(())
}

fn cmd_commit(session: &mut Session, args: &[&str]) -> CalcResult<()> {
    let Some(id) = args.first() else {
        return usage("commit <field>");
    };
    let field: FieldId = id.parse()?;
    let result = session.commit(field)?;
    println!("  {}: {}", field.calculation().display_name(), result.text);
    Ok(())
}

fn cmd_run(session: &mut Session, args: &[&str]) -> CalcResult<()> {
    let Some(name) = args.first() else {
        return usage("run <calculation>");
    };
    let result = session.run_by_name(name)?;
    println!("  {}", result.text);
    Ok(())
}

fn cmd_go(session: &mut Session, args: &[&str]) -> CalcResult<()> {
    let Some(id) = args.first() else {
        return usage("go <section>");
    };
    session.navigate(id)?;
    print_section(session);
    Ok(())
}

fn cmd_wait(session: &mut Session, args: &[&str]) -> CalcResult<()> {
    let Some(ms) = args.first().and_then(|a| a.parse::<u64>().ok()) else {
        return usage("wait <ms>");
    };
    let fired = session.advance(Duration::from_millis(ms));
    tracing::debug!(fired, "timers fired");
    Ok(())
}

fn cmd_copy(session: &mut Session, clipboard: &mut MemoryClipboard, args: &[&str]) -> CalcResult<()> {
    let Some(name) = args.first() else {
        return usage("copy <calculation>");
    };
    let calculation: Calculation = name.parse()?;
    match session.copy_result(calculation, clipboard) {
        CopyOutcome::Copied | CopyOutcome::CopiedWithFallback => {
            println!("  Copied: {}", clipboard.contents.as_deref().unwrap_or(""));
        }
        CopyOutcome::NothingToCopy => println!("  Nothing to copy"),
        CopyOutcome::Failed => println!("  Copy failed"),
    }
    Ok(())
}

fn cmd_precache(session: &Session, args: &[&str]) -> CalcResult<()> {
    let Some(dir) = args.first() else {
        return usage("precache <dir>");
    };
    let cache_settings = &session.settings().cache;
    let mut fetcher = DirFetcher::new(*dir);
    let mut cache = AssetCache::new();
    cache.install(&cache_settings.name, &cache_settings.precache_urls, &mut fetcher)?;

    println!("  Cache '{}':", cache_settings.name);
    for asset in cache.entries() {
        println!("    {:<14} {:>8} bytes", asset.path, asset.body.len());
    }
    Ok(())
}

fn print_section(session: &Session) {
    let section = session.current_section();
    println!("═══════════════════════════════════════");
    println!("  {}", section.title().to_uppercase());
    println!("═══════════════════════════════════════");

    if section == Section::MainMenu {
        println!("  go gear-calculations");
        println!("  go flange-calculations");
        return;
    }

    for calculation in section.calculations() {
        let result = session.result(calculation);
        println!();
        println!("  {} [{}]", calculation.display_name(), calculation.name());
        for field in calculation.inputs() {
            let value = session.field_value(field).unwrap_or("");
            let flag = if session.is_field_errored(field) { "  (!)" } else { "" };
            println!("    {:<22} {:<12}{}", field.label(), value, flag);
        }
        println!(
            "    => {} {}",
            result.text,
            status_icon(result.success)
        );
    }
}

fn status_icon(success: bool) -> &'static str {
    if success { "[OK]" } else { "" }
}
