//! mergequery CLI - merge extracts, look them up and filter the result

use std::path::{Path, PathBuf};
use std::process;

use chrono::Local;
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};

use mergequery::{
    default_merged_file_name, load_table, spawn_merge, AppConfig, Combinator, DataFrame, Error,
    Result, Session,
};

/// Merge, lookup and query tool for CSV extracts
#[derive(Parser, Debug)]
#[command(name = "mergequery")]
#[command(version = mergequery::VERSION)]
#[command(about = "Merge gzipped CSV extracts, look them up against a reference table and filter the result")]
#[command(
    long_about = "Merge gzipped CSV extracts, look them up against a reference table and filter the result.\n\n\
CONDITIONS:\n\
  Each -c/--condition is \"[AND|OR] <column> <operator> <value>\".\n\
  Quote a column name that contains spaces: -c '\"Full Name\" == Ann'.\n\
  Conditions are combined strictly left to right, without precedence.\n\
  All columns:  ==, !=, >, <, >=, <= (text columns compare lexicographically)\n\
  Text columns: contains, not contains, startswith, endswith\n\n\
EXAMPLES:\n\
  mergequery merge jan.gz feb.gz\n\
  mergequery lookup merged.gz scores.xlsx -o joined.csv\n\
  mergequery query merged.gz scores.csv -c \"score >= 50\" -c \"AND name == X\" -o result.csv"
)]
struct Args {
    /// Configuration file (YAML or TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Merge gzipped CSV files with identical columns into one gzipped CSV
    Merge {
        /// Input files, merged in the given order
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output file (defaults to <prefix>_YYYYMMDD_HHMMSS.gz)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Join a merged file against a lookup file on their first columns
    Lookup {
        merged: PathBuf,
        lookup: PathBuf,

        /// Save the joined table
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Maximum number of rows to print
        #[arg(short, long, default_value_t = 50)]
        limit: usize,
    },
    /// Join, then filter the joined rows with conditions
    Query {
        merged: PathBuf,
        lookup: PathBuf,

        /// Condition, e.g. "score >= 50" or "OR name contains Sm"
        #[arg(short, long = "condition", required = true)]
        conditions: Vec<String>,

        /// Save the matching rows as CSV
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Maximum number of rows to print
        #[arg(short, long, default_value_t = 50)]
        limit: usize,
    },
    /// List the operators available for a column of a file
    Operators { file: PathBuf, column: String },
}

fn main() {
    let args = Args::parse();

    let config = match AppConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(2);
        }
    };

    env_logger::Builder::new()
        .parse_filters(&config.logging.level)
        .init();

    let mut session = Session::new(config);
    if let Err(e) = run(&mut session, args.command) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(session: &mut Session, command: Command) -> Result<()> {
    match command {
        Command::Merge { inputs, output } => {
            let handle = spawn_merge(inputs, session.csv_options())?;
            let merged = handle.wait(|completed, total, path| {
                println!("[{}/{}] {}", completed, total, display_name(path));
            })?;
            let rows = merged.row_count();
            session.set_merged(merged);

            let output = output.unwrap_or_else(|| {
                PathBuf::from(default_merged_file_name(
                    &session.config().io.merged_prefix,
                    &Local::now(),
                ))
            });
            session.save_merged(&output)?;
            println!("Merged file saved: {} ({} rows)", output.display(), rows);
        }
        Command::Lookup {
            merged,
            lookup,
            output,
            limit,
        } => {
            let options = session.csv_options();
            let joined = prepare(session, &merged, &lookup)?;
            print_table(joined, limit);
            if let Some(output) = output {
                mergequery::save_table(joined, &output, &options)?;
                println!("Joined table saved: {}", output.display());
            }
        }
        Command::Query {
            merged,
            lookup,
            conditions,
            output,
            limit,
        } => {
            prepare(session, &merged, &lookup)?;
            for raw in &conditions {
                let (combinator, column, operator, value) = parse_condition(raw)?;
                session.add_condition(&column, &operator, &value, combinator)?;
            }
            println!("{}", session.conditions().render());

            let outcome = session.execute()?;
            println!("Total Matching Rows: {}", outcome.match_count);
            if let Some(notice) = outcome.notice() {
                println!("Warning: {}!", notice);
                return Ok(());
            }
            print_table(&outcome.frame, limit);

            if let Some(output) = output {
                session.save_result(&output)?;
                println!("Results saved to {}", output.display());
            }
        }
        Command::Operators { file, column } => {
            let df = load_table(&file, &session.csv_options())?;
            session.set_merged(df.clone());
            session.set_joined(df);
            let labels: Vec<&str> = session
                .operators_for(&column)?
                .iter()
                .map(|op| op.label())
                .collect();
            println!("{}", labels.join("\n"));
        }
    }
    Ok(())
}

/// Load both files, merge the first and join it against the second
fn prepare<'a>(session: &'a mut Session, merged: &Path, lookup: &Path) -> Result<&'a DataFrame> {
    let options = session.csv_options();
    let merged = load_table(merged, &options)?;
    let lookup = load_table(lookup, &options)?;
    session.set_merged(merged);
    session.lookup(&lookup)
}

/// Split "[AND|OR] <column> <operator> <value>" into its parts
///
/// The column may be double-quoted when it contains spaces. The value is
/// everything after the operator, kept as written apart from one pair of
/// enclosing quotes.
fn parse_condition(raw: &str) -> Result<(Option<Combinator>, String, String, String)> {
    let incomplete = || {
        Error::ConditionIncomplete(format!(
            "'{}' must look like \"<column> <operator> <value>\"",
            raw
        ))
    };

    let mut rest = raw;
    let mut combinator = None;
    if let Some((word, tail)) = split_word(rest) {
        if let Ok(parsed) = word.parse::<Combinator>() {
            combinator = Some(parsed);
            rest = tail;
        }
    }

    let (column, rest) = split_column(rest).ok_or_else(incomplete)?;
    let (operator, rest) = split_word(rest).ok_or_else(incomplete)?;
    let (operator, rest) = match (operator, split_word(rest)) {
        ("not", Some(("contains", tail))) => ("not contains", tail),
        _ => (operator, rest),
    };

    let value = unquote(rest.trim());
    if column.trim().is_empty() || value.is_empty() {
        return Err(incomplete());
    }

    Ok((
        combinator,
        column.to_string(),
        operator.to_string(),
        value.to_string(),
    ))
}

/// Next whitespace-delimited word and the text following it
fn split_word(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    let end = s.find(char::is_whitespace).unwrap_or(s.len());
    Some((&s[..end], &s[end..]))
}

/// Column name, bare or enclosed in double quotes
fn split_column(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    match s.strip_prefix('"') {
        Some(quoted) => {
            let end = quoted.find('"')?;
            Some((&quoted[..end], &quoted[end + 1..]))
        }
        None => split_word(s),
    }
}

fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(s)
}

fn print_table(df: &DataFrame, limit: usize) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(df.column_names().iter().map(Cell::new));

    for row in df.rows().iter().take(limit) {
        table.add_row(row.iter().map(|v| Cell::new(v.to_string())));
    }
    println!("{table}");

    if df.row_count() > limit {
        println!("... {} more row(s)", df.row_count() - limit);
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
