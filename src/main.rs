use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use clap::Parser;
use env_logger::{Builder, Env};
use log::{error, info};
use mem_sqlite::{
    PAGE_SIZE, TABLE_MAX_PAGES, Table, TableConfig,
    statement::{ExecuteError, InputType, MetaCommand},
};

/// In-memory single-table record store with a line-oriented prompt
#[derive(Parser, Debug)]
#[command(name = "mem-sqlite", version, about)]
struct Cli {
    /// Page size in bytes
    #[arg(long, default_value_t = PAGE_SIZE)]
    page_size: usize,
    /// Maximum number of pages the table may allocate
    #[arg(long, default_value_t = TABLE_MAX_PAGES)]
    max_pages: usize,
}

struct InputBuffer {
    buffer: String,
}

impl InputBuffer {
    fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    /// Returns `false` once input is exhausted.
    fn read_input<R: BufRead>(&mut self, reader: &mut R) -> Result<bool> {
        self.buffer.clear();
        let bytes_read = reader
            .read_line(&mut self.buffer)
            .context("Failed to read line")?;
        self.buffer = self.buffer.trim().to_string();
        Ok(bytes_read > 0)
    }
}

fn print_prompt<W: Write>(out: &mut W) -> Result<()> {
    write!(out, "db > ")?;
    out.flush()?;
    Ok(())
}

fn init_logger() {
    // RUST_LOG=debug mem-sqlite
    Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut table = Table::with_config(TableConfig {
        page_size: cli.page_size,
        max_pages: cli.max_pages,
    })?;
    info!(
        "table ready: {} rows per page, {} rows max",
        table.rows_per_page(),
        table.max_rows()
    );

    let mut reader = io::stdin().lock();
    let mut out = io::stdout().lock();
    let mut input_buffer = InputBuffer::new();

    loop {
        print_prompt(&mut out)?;
        if !input_buffer.read_input(&mut reader)? {
            bail!("Error reading input");
        }

        match InputType::parse(&input_buffer.buffer) {
            InputType::Empty => {}
            InputType::Meta(MetaCommand::Exit) => break,
            InputType::Meta(MetaCommand::Unrecognized(command)) => {
                writeln!(out, "Unrecognized meta-command: {command}")?;
            }
            InputType::Statement(Err(err)) => writeln!(out, "{err}")?,
            InputType::Statement(Ok(statement)) => {
                match statement.execute(&mut table, &mut out) {
                    Ok(()) => writeln!(out, "Executed.")?,
                    Err(ExecuteError::Io(err)) => return Err(err.into()),
                    Err(err) => writeln!(out, "{err}")?,
                }
            }
        }
    }

    Ok(())
}

fn main() {
    init_logger();

    if let Err(e) = run(Cli::parse()) {
        error!("{e:#}");
        std::process::exit(1);
    }
}
