use crate::{Options, Strictness};
use std::env;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};

fn print_help(program: &str) {
    eprintln!(
        "Usage: {prog} [OPTIONS] [INPUT]\n\
         \n\
         INPUT: optional input file. When omitted, reads from stdin.\n\
         \n\
         Options:\n\
           -o, --output FILE        Write output to FILE (default stdout)\n\
               --in-place           Overwrite INPUT file\n\
               --pretty             Pretty-print the repaired JSON\n\
               --log                Print the repair action log to stderr\n\
               --strictness MODE    strict|lenient|permissive (default lenient)\n\
               --no-early-exit      Run every stage even after an early Ok\n\
               --no-fast-path       Skip the raw-input fast-path decode attempt\n\
               --no-multiple-json   Disable concatenated-value aggregation\n\
               --no-object-merging  Disable top-level sibling merging in L2\n\
               --no-hardcoded-patterns  Disable the L3 hardcoded pre-pass\n\
               --escape-normalization   Expand \\u/\\x escapes outside strings\n\
               --max-size-mb N      Input size ceiling in MiB (default 10)\n\
               --timeout-ms N       Wall-clock ceiling in milliseconds (default 5000)\n\
               --max-nesting-depth N  Container nesting ceiling (default 50)\n\
           -h, --help               Show this help\n",
        prog = program
    );
}

struct CliMode {
    input: Option<String>,
    output: Option<String>,
    in_place: bool,
    pretty: bool,
    log: bool,
}

fn parse_args() -> (Options, CliMode) {
    let mut args: Vec<String> = env::args().collect();
    let program = args
        .first()
        .cloned()
        .unwrap_or_else(|| "jsonmend".to_string());
    args.remove(0);

    let mut opts = Options::default();
    let mut input: Option<String> = None;
    let mut output: Option<String> = None;
    let mut in_place = false;
    let mut pretty = false;
    let mut log = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help(&program);
                std::process::exit(0);
            }
            "-o" | "--output" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Missing FILE for --output");
                    std::process::exit(2);
                }
                output = Some(args[i].clone());
            }
            "--in-place" => in_place = true,
            "--pretty" => pretty = true,
            "--log" => {
                log = true;
                opts.logging = true;
            }
            "--strictness" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Missing MODE for --strictness");
                    std::process::exit(2);
                }
                opts.strictness = match args[i].to_lowercase().as_str() {
                    "strict" => Strictness::Strict,
                    "lenient" => Strictness::Lenient,
                    "permissive" => Strictness::Permissive,
                    other => {
                        eprintln!("Unknown strictness: {other}");
                        std::process::exit(2);
                    }
                };
            }
            "--no-early-exit" => opts.early_exit = false,
            "--no-fast-path" => opts.fast_path_optimization = false,
            "--no-multiple-json" => opts.enable_multiple_json_aggregation = false,
            "--no-object-merging" => opts.enable_object_merging = false,
            "--no-hardcoded-patterns" => opts.enable_early_hardcoded_patterns = false,
            "--escape-normalization" => opts.enable_escape_normalization = true,
            "--max-size-mb" => {
                i += 1;
                opts.max_size_mb = args
                    .get(i)
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(opts.max_size_mb);
            }
            "--timeout-ms" => {
                i += 1;
                opts.timeout_ms = args
                    .get(i)
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(opts.timeout_ms);
            }
            "--max-nesting-depth" => {
                i += 1;
                opts.max_nesting_depth = args
                    .get(i)
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(opts.max_nesting_depth);
            }
            s if s.starts_with('-') => {
                eprintln!("Unknown option: {s}");
                std::process::exit(2);
            }
            path => input = Some(path.to_string()),
        }
        i += 1;
    }

    if in_place && input.is_none() {
        eprintln!("--in-place requires an INPUT file");
        std::process::exit(2);
    }

    (
        opts,
        CliMode {
            input,
            output,
            in_place,
            pretty,
            log,
        },
    )
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (opts, mode) = parse_args();

    let raw: Vec<u8> = match &mode.input {
        Some(path) => fs::read(path)?,
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            buf
        }
    };

    #[cfg(feature = "serde")]
    let rendered = {
        let outcome = crate::repair(&raw, &opts)?;
        if mode.log {
            if let Some(actions) = &outcome.actions {
                for action in actions {
                    eprintln!(
                        "[{}] {}{}",
                        action.stage.name(),
                        action.action,
                        action
                            .position
                            .map(|p| format!(" @ {p}"))
                            .unwrap_or_default()
                    );
                }
            }
        }
        if mode.pretty {
            serde_json::to_string_pretty(&outcome.value)?
        } else {
            serde_json::to_string(&outcome.value)?
        }
    };

    #[cfg(not(feature = "serde"))]
    let rendered = {
        let _ = mode.log;
        let _ = mode.pretty;
        crate::repair_to_string(&raw, &opts)?
    };

    if mode.in_place {
        let path = mode.input.as_ref().expect("checked above");
        fs::write(path, rendered)?;
        return Ok(());
    }

    let mut out: Box<dyn Write> = match &mode.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout())),
    };
    out.write_all(rendered.as_bytes())?;
    out.write_all(b"\n")?;
    Ok(())
}
