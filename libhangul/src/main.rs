use anyhow::Context as _;
use clap::{Parser, Subcommand};
use libhangul::{create_ime_engine, ByteSink, HangulConfig, KeyEvent, OutputSink, RecordingSink, SinkOp};
use std::io::{self, BufRead};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "libhangul")]
#[command(about = "Compose Hangul jamo into syllables the way a remote console receives them")]
#[command(version)]
struct Cli {
    /// HangulConfig TOML file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,

    /// Single key string for quick testing
    input: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive mode: each line is typed, then flushed
    Repl,
    /// Type a key string and show the corrections sent to the peer.
    /// `<` is backspace, space and tab pass through.
    Compose {
        keys: String,
    },
}

fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("libhangul=info,warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(true))
        .with(filter)
        .init();
}

/// Map a typed string onto key events. `<` stands for backspace.
fn parse_keys(input: &str) -> Vec<KeyEvent> {
    input
        .chars()
        .map(|ch| match ch {
            '<' => KeyEvent::Backspace,
            ' ' => KeyEvent::Space,
            '\t' => KeyEvent::Tab,
            '\n' | '\r' => KeyEvent::Enter,
            _ => KeyEvent::Char(ch),
        })
        .collect()
}

fn escape_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .flat_map(|b| std::ascii::escape_default(*b))
        .map(char::from)
        .collect()
}

fn compose(config: &HangulConfig, keys: &str) {
    let mut ime = create_ime_engine(config.clone());
    let mut sink = RecordingSink::new();

    for key in parse_keys(keys) {
        ime.feed(key, &mut sink);
    }
    ime.feed(KeyEvent::FocusLost, &mut sink);

    let mut bytes = config.base().byte_sink();
    replay(sink.ops(), &mut bytes);

    println!("keys:   {}", keys);
    println!("screen: {}", sink.screen().text());
    println!("corrections:");
    for (i, c) in sink.corrections().iter().enumerate() {
        println!("  {}. erase {} then {:?}", i + 1, c.erase, c.text);
    }
    println!("bytes:  {}", escape_bytes(bytes.bytes()));
}

fn replay(ops: &[SinkOp], sink: &mut ByteSink) {
    for op in ops {
        match op {
            SinkOp::Erase => sink.erase_one(),
            SinkOp::Append(text) => sink.append_text(text),
        }
    }
}

fn run_repl(config: &HangulConfig) -> anyhow::Result<()> {
    println!("libhangul composer: type jamo (ㅎㅏㄴㄱㅡㄹ) and press Enter, `<` is backspace");
    println!("Ctrl-D to exit.");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let raw = line.context("read stdin")?;
        let keys = raw.trim_end();
        if keys.is_empty() {
            continue;
        }
        compose(config, keys);
        println!();
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            let config = HangulConfig::load_toml(path)?;
            info!(path = %path.display(), "loaded config");
            config
        }
        None => HangulConfig::default(),
    };

    match cli.command {
        Some(Commands::Repl) => run_repl(&config)?,
        Some(Commands::Compose { keys }) => compose(&config, &keys),
        None => match cli.input {
            Some(keys) => compose(&config, &keys),
            None => run_repl(&config)?,
        },
    }
    Ok(())
}
