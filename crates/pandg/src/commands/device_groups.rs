//! Device-group query handler.

use tabled::Tabled;

use pandg_core::{
    DeviceGroupFacts, PanoramaSource, QueryOutcome, SelectionCriterion, SnapshotSource, query,
};

use crate::cli::{DeviceGroupsArgs, DeviceGroupsCommand, GlobalOpts, QueryArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceGroupRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Tags")]
    tags: String,
    #[tabled(rename = "Description")]
    description: String,
}

fn to_row(facts: &DeviceGroupFacts, color: bool) -> DeviceGroupRow {
    let placeholder = || output::muted("-", color);
    match facts {
        DeviceGroupFacts::Summary(summary) => DeviceGroupRow {
            name: output::ident(&summary.name, color),
            tags: join_or(summary.tag.iter().flatten().cloned(), placeholder),
            description: placeholder(),
        },
        DeviceGroupFacts::Detail(detail) => DeviceGroupRow {
            name: output::ident(&detail.name, color),
            tags: join_or(
                detail.tag.iter().flatten().map(|tag| match tag.color {
                    Some(ref label) => {
                        format!("{} {}", tag.name, output::muted(&format!("({label})"), color))
                    }
                    None => tag.name.clone(),
                }),
                placeholder,
            ),
            description: detail
                .description
                .clone()
                .filter(|d| !d.is_empty())
                .unwrap_or_else(placeholder),
        },
    }
}

fn join_or(items: impl Iterator<Item = String>, empty: impl Fn() -> String) -> String {
    let joined = items.collect::<Vec<_>>().join(", ");
    if joined.is_empty() { empty() } else { joined }
}

fn render_table(outcome: &QueryOutcome, color: bool) -> String {
    if outcome.objects.is_empty() {
        return output::muted("No matching device groups.", color);
    }
    let rows: Vec<DeviceGroupRow> = outcome
        .objects
        .iter()
        .map(|facts| to_row(facts, color))
        .collect();
    output::render_table(&rows)
}

fn render_names(outcome: &QueryOutcome) -> String {
    outcome
        .objects
        .iter()
        .map(DeviceGroupFacts::name)
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: DeviceGroupsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        DeviceGroupsCommand::Query(query_args) => {
            let outcome = run_query(query_args, global).await?;
            let color = output::should_color(&global.color);
            let rendered = output::render_single(
                &global.output,
                &outcome,
                |o| render_table(o, color),
                render_names,
            )?;
            output::print_output(&rendered, global.quiet);
            Ok(())
        }
    }
}

async fn run_query(args: QueryArgs, global: &GlobalOpts) -> Result<QueryOutcome, CliError> {
    let criterion =
        SelectionCriterion::from_options(args.name, args.name_regex, args.tag, args.tag_regex)?;

    let outcome = match args.from_file {
        Some(path) => query(&SnapshotSource::new(path), &criterion).await?,
        None => {
            let panorama = config::build_panorama_config(global)?;
            let source = PanoramaSource::new(panorama)?;
            query(&source, &criterion).await?
        }
    };
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use pandg_core::{DeviceGroupRecord, TagRef, select};

    use super::*;

    fn outcome(criterion: &SelectionCriterion) -> QueryOutcome {
        let prod = DeviceGroupRecord {
            tags: Some(vec![TagRef::colored("Prod-Services", "color3")]),
            ..DeviceGroupRecord::new("Prod", Vec::<String>::new())
        };
        let records = vec![prod, DeviceGroupRecord::new("Dev", ["Dev-Only"])];
        let objects = select(&records, criterion).expect("valid criterion");
        QueryOutcome::new(criterion, objects)
    }

    #[test]
    fn summary_rows_list_tag_names() {
        let out = outcome(&SelectionCriterion::ExactTag("Dev-Only".into()));
        let table = render_table(&out, false);
        assert!(table.contains("Dev-Only"), "{table}");
        assert!(!table.contains("Prod"), "{table}");
    }

    #[test]
    fn detail_rows_show_color_labels() {
        let out = outcome(&SelectionCriterion::NamePattern("Prod".into()));
        let table = render_table(&out, false);
        assert!(table.contains("Prod-Services (blue)"), "{table}");
    }

    #[test]
    fn empty_outcome_prints_a_notice() {
        let out = outcome(&SelectionCriterion::ExactName("Staging".into()));
        assert_eq!(render_table(&out, false), "No matching device groups.");
        assert_eq!(render_names(&out), "");
    }

    #[test]
    fn plain_output_lists_names_in_order() {
        let out = outcome(&SelectionCriterion::TagPattern("-".into()));
        assert_eq!(render_names(&out), "Prod\nDev");
    }
}
