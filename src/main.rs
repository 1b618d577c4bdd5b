//! CLI entry point for hefty

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use hefty::{
    BlockRenderer, MarkupRenderer, Pager, PathFilter, Report, Scale, ScanConfig, Scanner,
    StreamSink, TextRenderer, print_json, write_report,
};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            // Respect FORCE_COLOR environment variable
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            // Respect TERM=dumb
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            // Check if stdout is a TTY
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "hefty")]
#[command(about = "Summarize disk usage, reporting only entries above a size threshold")]
#[command(version)]
struct Args {
    /// Directories to scan
    #[arg(default_value = ".")]
    paths: Vec<PathBuf>,

    /// Minimum reportable size in kilobytes
    #[arg(
        short = 't',
        long = "threshold",
        default_value = "10240",
        value_name = "KB"
    )]
    threshold: u64,

    /// Descend onto filesystems other than each root's
    #[arg(short = 'x', long = "cross-filesystems")]
    cross_filesystems: bool,

    /// Follow symlinks instead of counting the links themselves
    #[arg(short = 'f', long = "follow-symlinks")]
    follow_symlinks: bool,

    /// Only scan paths matching at least one regex (comma-separated)
    #[arg(
        short = 'I',
        long = "include",
        value_delimiter = ',',
        value_name = "PATTERNS"
    )]
    include: Vec<String>,

    /// Never scan paths matching any regex (comma-separated)
    #[arg(
        short = 'X',
        long = "exclude",
        value_delimiter = ',',
        value_name = "PATTERNS"
    )]
    exclude: Vec<String>,

    /// Emit HTML table rows instead of plain text
    #[arg(short = 'm', long = "markup", conflicts_with = "json")]
    markup: bool,

    /// Wrap each page of markup output in <table> tags
    #[arg(long = "table-tags", requires = "markup")]
    table_tags: bool,

    /// Split output into files of at most N report rows
    #[arg(long = "page-rows", value_name = "N")]
    page_rows: Option<usize>,

    /// Filename prefix for paginated output
    #[arg(long = "page-prefix", default_value = "report", value_name = "NAME")]
    page_prefix: String,

    /// Force the name column to a fixed width
    #[arg(short = 'w', long = "width", value_name = "COLS")]
    width: Option<usize>,

    /// Output the report as JSON
    #[arg(long = "json", conflicts_with = "page_rows")]
    json: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,
}

fn main() {
    let args = Args::parse();

    let filter = match PathFilter::from_patterns(&args.include, &args.exclude) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("hefty: invalid pattern: {}", e);
            process::exit(1);
        }
    };

    let config = ScanConfig {
        threshold_kb: args.threshold,
        cross_filesystems: args.cross_filesystems,
        follow_symlinks: args.follow_symlinks,
    };
    let threshold_units = config.threshold_units();

    let mut scanner = Scanner::new(config, filter);
    for root in &args.paths {
        if let Err(e) = scanner.scan_root(root) {
            eprintln!("hefty: cannot access '{}': {}", root.display(), e);
            process::exit(1);
        }
    }

    let report = Report::from_registry(scanner.registry());

    let result = if args.json {
        print_json(&report)
    } else {
        let scale = Scale::for_threshold(threshold_units);
        if args.markup {
            let renderer = MarkupRenderer::new(scale, args.table_tags);
            emit(&report, &renderer, &args)
        } else {
            let width = args.width.unwrap_or_else(|| report.widest_name.max(1));
            let renderer = TextRenderer::new(width, scale);
            emit(&report, &renderer, &args)
        }
    };

    if let Err(e) = result {
        eprintln!("hefty: error writing output: {}", e);
        process::exit(1);
    }
}

/// Send the report to stdout, or to page files when pagination is set.
fn emit<R: BlockRenderer>(report: &Report, renderer: &R, args: &Args) -> std::io::Result<()> {
    match args.page_rows {
        Some(max_rows) => {
            let ext = if args.markup { "html" } else { "txt" };
            let mut sink = Pager::new(
                args.page_prefix.clone(),
                ext,
                max_rows,
                renderer.page_header(),
                renderer.page_footer(),
            );
            write_report(report, renderer, &mut sink)
        }
        None => {
            let use_color = !args.markup && should_use_color(args.color);
            let mut sink = StreamSink::new(use_color, renderer.page_header(), renderer.page_footer());
            write_report(report, renderer, &mut sink)
        }
    }
}
