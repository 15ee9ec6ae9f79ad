//! Output formatters
//!
//! Models implement [`Tabler`] to describe their table columns; the
//! functions here render them as a borderless table, JSON or YAML.

pub mod common;

use comfy_table::{presets::NOTHING, Table};
use serde::Serialize;

use crate::cli::OutputFormat;

/// Column layout of a model when printed as a table
pub trait Tabler {
    fn headers() -> Vec<&'static str>;
    fn row(&self) -> Vec<String>;
}

/// Output settings shared by every command
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub format: OutputFormat,
    pub no_header: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            no_header: false,
        }
    }
}

/// Print a list of models
pub fn output_list<T>(items: &[T], opts: &OutputOptions)
where
    T: Tabler + Serialize,
{
    match opts.format {
        OutputFormat::Table => {
            let rows = items.iter().map(T::row).collect();
            print_table(&T::headers(), rows, opts.no_header);
        }
        OutputFormat::Json | OutputFormat::Yaml => output_structured(&items, opts.format),
    }
}

/// Print a single model
pub fn output_one<T>(item: &T, opts: &OutputOptions)
where
    T: Tabler + Serialize,
{
    match opts.format {
        OutputFormat::Table => print_table(&T::headers(), vec![item.row()], opts.no_header),
        OutputFormat::Json | OutputFormat::Yaml => output_structured(item, opts.format),
    }
}

/// Print any serializable value as JSON or YAML
pub fn output_structured<T: Serialize + ?Sized>(value: &T, format: OutputFormat) {
    let rendered = match format {
        OutputFormat::Yaml => serde_yml::to_string(value).map_err(|e| e.to_string()),
        _ => serde_json::to_string_pretty(value).map_err(|e| e.to_string()),
    };
    match rendered {
        Ok(text) => println!("{}", text.trim_end()),
        Err(e) => eprintln!("Failed to serialize output: {}", e),
    }
}

/// Render rows as a borderless table
pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>, no_header: bool) {
    println!("{}", render_table(headers, rows, no_header));
}

fn render_table(headers: &[&str], rows: Vec<Vec<String>>, no_header: bool) -> String {
    let mut table = Table::new();
    table.load_preset(NOTHING);

    if !no_header {
        table.set_header(headers.to_vec());
    }
    for row in rows {
        table.add_row(row);
    }

    table.to_string()
}
