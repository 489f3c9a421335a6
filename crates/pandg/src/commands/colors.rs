//! Tag color table.

use serde::Serialize;
use tabled::Tabled;

use pandg_core::TagColor;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Serialize, Tabled)]
struct ColorRow {
    #[tabled(rename = "Code")]
    code: &'static str,
    #[tabled(rename = "Label")]
    label: &'static str,
}

pub fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let rows: Vec<ColorRow> = TagColor::all()
        .map(|color| ColorRow {
            code: color.code(),
            label: color.label(),
        })
        .collect();

    let rendered = output::render_list(
        &global.output,
        &rows,
        |r| ColorRow {
            code: r.code,
            label: r.label,
        },
        |r| format!("{}\t{}", r.code, r.label),
    )?;
    output::print_output(&rendered, global.quiet);
    Ok(())
}
