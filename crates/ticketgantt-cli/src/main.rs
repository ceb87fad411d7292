//! ticketgantt CLI - Ticket hierarchy and calendar Gantt layouts
//!
//! Command-line interface for creating tickets from templates, editing their
//! status and rendering Gantt layouts as text, JSON or Excel.

mod config;
mod store;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ticketgantt_core::{DateSpan, TicketId};
use ticketgantt_planner::{NewTicket, ParentSpec, TicketService, TicketUpdate};
use ticketgantt_render::{ExcelRenderer, GanttLayoutBuilder, LayoutRenderer, TextRenderer};

use crate::config::{Config, CONFIG_FILE, DEFAULT_CONFIG};
use crate::store::Workbook;

#[derive(Parser)]
#[command(name = "ticketgantt")]
#[command(author, version, about = "Ticket hierarchy and calendar Gantt layouts", long_about = None)]
struct Cli {
    /// Directory holding tickets.json and ticketgantt.toml
    #[arg(short, long, global = true, default_value = ".", env = "TICKETGANTT_DIR")]
    dir: PathBuf,

    /// Verbose output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create tickets.json and ticketgantt.toml
    Init {
        /// Seed the roster with an assignee (repeatable)
        #[arg(short, long = "assignee", value_name = "NAME")]
        assignees: Vec<String>,
    },

    /// Create a parent ticket and its children from the templates
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        assignee: String,

        /// Parent start date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        start: NaiveDate,

        /// Parent end date; required unless the latest-child policy is configured
        #[arg(long, value_parser = parse_date)]
        end: Option<NaiveDate>,

        #[arg(long, default_value = "")]
        description: String,
    },

    /// Create a single parent or child ticket
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        assignee: String,

        #[arg(long, value_parser = parse_date)]
        start: NaiveDate,

        #[arg(long, value_parser = parse_date)]
        end: NaiveDate,

        /// Parent ticket id; omit to create a parent
        #[arg(long, value_name = "ID")]
        parent: Option<String>,

        #[arg(long, default_value = "")]
        description: String,
    },

    /// Set a ticket's status by display label
    Status {
        #[arg(value_name = "ID")]
        id: String,

        /// Status label, e.g. "In Progress"
        #[arg(value_name = "LABEL")]
        label: String,
    },

    /// Print parents and their children
    List,

    /// Preview the next ticket ids
    NextIds {
        #[arg(value_name = "COUNT", default_value_t = 1)]
        count: usize,
    },

    /// Build and render the Gantt layout for a period
    Gantt {
        #[arg(long, value_parser = parse_date)]
        from: NaiveDate,

        #[arg(long, value_parser = parse_date)]
        to: NaiveDate,

        /// Reference date for overdue/today highlighting (defaults to the local date)
        #[arg(long, value_parser = parse_date)]
        today: Option<NaiveDate>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Output file (stdout if not specified; required for xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Xlsx,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y/%m/%d"))
        .map_err(|_| format!("invalid date '{s}', expected YYYY-MM-DD"))
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Init { assignees } => cmd_init(&cli.dir, &assignees),
        Commands::Create {
            name,
            assignee,
            start,
            end,
            description,
        } => {
            let mut spec = ParentSpec::new(name, assignee, start).description(description);
            spec.end = end;
            cmd_create(&cli.dir, &spec)
        }
        Commands::Add {
            name,
            assignee,
            start,
            end,
            parent,
            description,
        } => {
            let mut input = NewTicket::new(name, assignee, start, end).description(description);
            input.parent_id = parent.map(TicketId::from);
            cmd_add(&cli.dir, input)
        }
        Commands::Status { id, label } => cmd_status(&cli.dir, &id, &label),
        Commands::List => cmd_list(&cli.dir),
        Commands::NextIds { count } => cmd_next_ids(&cli.dir, count),
        Commands::Gantt {
            from,
            to,
            today,
            format,
            output,
        } => cmd_gantt(&cli.dir, from, to, today, format, output.as_deref()),
    }
}

fn cmd_init(dir: &Path, assignees: &[String]) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE);
    if config_path.exists() {
        bail!("{} already exists", config_path.display());
    }
    std::fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let workbook = Workbook::create(dir, Workbook::starter(assignees))?;
    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write {}", config_path.display()))?;

    println!("Created: {}", workbook.path().display());
    println!("Created: {}", config_path.display());
    Ok(())
}

fn load(dir: &Path) -> Result<(Config, Workbook)> {
    let config = Config::load(&dir.join(CONFIG_FILE))?;
    let workbook = Workbook::open(dir)?;
    Ok((config, workbook))
}

fn cmd_create(dir: &Path, spec: &ParentSpec) -> Result<()> {
    let (config, mut workbook) = load(dir)?;
    let expansion = TicketService::new(&mut workbook.data)
        .statuses(config.status_table())
        .end_date_policy(config.end_date_policy())
        .create_from_templates(spec, Local::now().naive_local())?;
    workbook.save()?;

    println!(
        "Created {} ({} - {})",
        expansion.parent.id, expansion.parent.start, expansion.parent.end
    );
    for child in &expansion.children {
        println!("  {} {} ({} - {})", child.id, child.name, child.start, child.end);
    }
    Ok(())
}

fn cmd_add(dir: &Path, input: NewTicket) -> Result<()> {
    let (config, mut workbook) = load(dir)?;
    let ticket = TicketService::new(&mut workbook.data)
        .statuses(config.status_table())
        .create_ticket(input, Local::now().naive_local())?;
    workbook.save()?;

    println!("Created {} {}", ticket.id, ticket.name);
    Ok(())
}

fn cmd_status(dir: &Path, id: &str, label: &str) -> Result<()> {
    let (config, mut workbook) = load(dir)?;
    let statuses = config.status_table();
    let Some(status) = statuses.parse(label) else {
        let known: Vec<&str> = statuses.entries().iter().map(|e| e.label.as_str()).collect();
        bail!("unknown status '{label}' (expected one of: {})", known.join(", "));
    };

    let ticket = TicketService::new(&mut workbook.data)
        .statuses(statuses.clone())
        .update_ticket(TicketUpdate::new(id).status(status))?;
    workbook.save()?;

    println!("{} -> {}", ticket.id, statuses.label(&ticket.status));
    Ok(())
}

fn cmd_list(dir: &Path) -> Result<()> {
    let (config, mut workbook) = load(dir)?;
    let statuses = config.status_table();
    let service = TicketService::new(&mut workbook.data);

    for (parent, children) in service.hierarchy() {
        println!(
            "{}  {}  [{}]  {}  {} - {}",
            parent.id,
            parent.name,
            statuses.label(&parent.status),
            parent.assignee,
            parent.start,
            parent.end
        );
        for child in children {
            println!(
                "  {}  {}  [{}]  {}  {} - {}",
                child.id,
                child.name,
                statuses.label(&child.status),
                child.assignee,
                child.start,
                child.end
            );
        }
    }
    Ok(())
}

fn cmd_next_ids(dir: &Path, count: usize) -> Result<()> {
    let mut workbook = Workbook::open(dir)?;
    for id in TicketService::new(&mut workbook.data).next_ids(count)? {
        println!("{id}");
    }
    Ok(())
}

fn cmd_gantt(
    dir: &Path,
    from: NaiveDate,
    to: NaiveDate,
    today: Option<NaiveDate>,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let (config, workbook) = load(dir)?;
    let query = DateSpan::new(from, to)?;
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    let layout = GanttLayoutBuilder::new(today)
        .statuses(config.status_table())
        .detail_column(config.gantt.detail_column)
        .highlight(config.gantt.highlight)
        .build(query, &workbook.data, &config.colors, &workbook.data)?;

    if layout.is_empty() {
        bail!("no tickets in period {from} - {to}");
    }
    info!(rows = layout.rows.len(), days = layout.date_range.len(), "layout ready");

    let bytes = match format {
        OutputFormat::Text => TextRenderer::new().render(&layout)?.into_bytes(),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&layout)?;
            json.push('\n');
            json.into_bytes()
        }
        OutputFormat::Xlsx => {
            if output.is_none() {
                bail!("--output is required for xlsx");
            }
            ExcelRenderer::new().render(&layout)?
        }
    };

    match output {
        Some(path) => {
            std::fs::write(path, &bytes)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => {
            use std::io::Write;
            std::io::stdout().write_all(&bytes)?;
        }
    }
    Ok(())
}
