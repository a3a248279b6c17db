//! Output formatting: table or JSON.
//!
//! Table rendering uses `tabled`; JSON serializes the domain snapshot
//! directly. Presence cells get a splash of color on terminals.

use std::io::{self, IsTerminal};

use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use portwatch_core::{FetchHealth, MacAddress, Person, Snapshot};

use crate::cli::OutputFormat;

fn use_color() -> bool {
    io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err()
}

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct PersonRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Presence")]
    presence: String,
    #[tabled(rename = "Phone MAC")]
    phone_mac: String,
    #[tabled(rename = "Phones")]
    phone_count: i64,
}

impl From<&Person> for PersonRow {
    fn from(p: &Person) -> Self {
        let presence = if p.online {
            if use_color() {
                "online".green().to_string()
            } else {
                "online".into()
            }
        } else if use_color() {
            "offline".red().to_string()
        } else {
            "offline".into()
        };

        Self {
            id: p.id.as_ref().map(ToString::to_string).unwrap_or_default(),
            name: p.name.clone(),
            presence,
            phone_mac: p
                .phone_mac
                .as_ref()
                .map(MacAddress::as_str)
                .unwrap_or("-")
                .to_owned(),
            phone_count: p.phone_count,
        }
    }
}

// ── Renderers ───────────────────────────────────────────────────────

/// Render a full snapshot in the chosen format.
pub fn render_snapshot(format: OutputFormat, snapshot: &Snapshot) -> String {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(snapshot).unwrap_or_else(|e| format!("<json error: {e}>"))
        }
        OutputFormat::Table => {
            let mut out = String::new();
            out.push_str(&format!(
                "approval_pending: {}  pending: {}  approved: {}  tracked: {}  people: {}\n\n",
                snapshot.approval_pending,
                snapshot.pending_count,
                snapshot.approved_count,
                snapshot.tracked_count,
                snapshot.people_count,
            ));

            if snapshot.people.is_empty() {
                out.push_str("no people reported\n");
            } else {
                let rows: Vec<PersonRow> = snapshot.people.iter().map(PersonRow::from).collect();
                let mut table = Table::new(rows);
                table.with(Style::sharp());
                out.push_str(&table.to_string());
                out.push('\n');
            }
            out
        }
    }
}

/// One-line health summary for the watch loop.
pub fn render_health(health: &FetchHealth) -> String {
    match health {
        FetchHealth::Idle => "no fetch completed yet".into(),
        FetchHealth::Ok => "last fetch ok".into(),
        FetchHealth::Failed { reason } => format!("last fetch FAILED: {reason}"),
    }
}
