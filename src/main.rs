use std::io;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use damson_chess::uci::console::{run_console, ConsoleConfig};
use damson_chess::uci::uci_top::run_stdio_loop;

#[derive(Parser, Debug)]
#[command(name = "damson-chess", about = "King-capture chess engine speaking UCI")]
struct Args {
    /// Play against the engine in the terminal instead of speaking UCI
    #[arg(short, long)]
    interactive: bool,

    /// Deepest iteration per reply in interactive mode
    #[arg(long, default_value_t = 8)]
    depth: i32,

    /// Stop deepening after this many milliseconds in interactive mode
    #[arg(long)]
    movetime: Option<u64>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // stdout carries the protocol; diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let result = if args.interactive {
        let config = ConsoleConfig {
            max_depth: args.depth.max(1),
            move_time: args.movetime.map(Duration::from_millis),
            ..ConsoleConfig::default()
        };
        run_console(io::stdin().lock(), &mut io::stdout(), config)
    } else {
        run_stdio_loop()
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "engine stopped");
            ExitCode::FAILURE
        }
    }
}
