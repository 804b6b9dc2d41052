use std::process;

use binlogq::binlog::Binlog;
use binlogq::error::Result;
use binlogq::render::{DisplayEvent, Verbosity};

struct Options {
    logfile: String,
    target_time: Option<u32>,
    starting_offset: u64,
    show_all: bool,
    num_to_show: usize,
    verbosity: Verbosity,
}

fn usage() {
    eprintln!("Usage: binlogq [mode] logfile [mode-args]");
    eprintln!();
    eprintln!("binlogq supports several different modes:");
    eprintln!("\t-o Find the first event after the given offset");
    eprintln!("\t\tbinlogq -o offset logfile");
    eprintln!("\t-t Find the event closest to the given unix time");
    eprintln!("\t\tbinlogq -t timestamp logfile");
    eprintln!("\t-a When used with one of the above, print N items after the first one");
    eprintln!("\t\tAccepts either an integer or the text 'all'");
    eprintln!("\t\tbinlogq -a N -t timestamp logfile");
    eprintln!("\t-q Be slightly quieter when printing (don't print statement contents)");
    eprintln!("\t-Q Be much quieter (only print offset, timestamp, and type code)");
}

fn parse_args() -> Option<Options> {
    let mut opts = Options {
        logfile: String::new(),
        target_time: None,
        starting_offset: 0,
        show_all: false,
        num_to_show: 1,
        verbosity: Verbosity::Full,
    };

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-t" => {
                opts.target_time = Some(args.next()?.parse().ok()?);
            }
            "-o" => {
                opts.starting_offset = args.next()?.parse().ok()?;
                opts.target_time = None;
            }
            "-a" => {
                let n = args.next()?;
                if n == "all" {
                    opts.show_all = true;
                } else {
                    opts.num_to_show = n.parse::<usize>().ok()?.max(1);
                }
            }
            "-q" => opts.verbosity = Verbosity::NoStatement,
            "-Q" => opts.verbosity = Verbosity::Brief,
            _ if arg.starts_with('-') => {
                eprintln!("Unknown argument {arg}");
                return None;
            }
            _ => opts.logfile = arg,
        }
    }
    if opts.logfile.is_empty() {
        return None;
    }
    Some(opts)
}

fn run(opts: &Options) -> Result<bool> {
    let mut log = Binlog::open(&opts.logfile)?;

    let start = match opts.target_time {
        Some(target) => log.locate_by_time(target)?,
        None => log.locate_by_offset(opts.starting_offset)?,
    };
    let Some(start) = start else {
        return Ok(false);
    };

    let mut cursor = log.cursor_from(start)?;
    let mut shown = 0;
    while !cursor.is_end() && (opts.show_all || shown < opts.num_to_show) {
        println!("{}", DisplayEvent::new(cursor.current(), opts.verbosity));
        shown += 1;
        cursor.advance()?;
    }
    Ok(true)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let Some(opts) = parse_args() else {
        usage();
        process::exit(1);
    };

    match run(&opts) {
        Ok(true) => {}
        Ok(false) => println!("no matching record"),
        Err(err) => {
            eprintln!("binlogq: {err}");
            process::exit(1);
        }
    }
}
