//! Terminal rendering of hub responses.
//!
//! The hub returns raw values; labels, local dates and placeholders for
//! missing fields are applied here.

use chrono::Local;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tb_core::time::parse_timestamp;
use tb_core::{Priority, TicketDetail, TicketPage, TicketStats, TicketSummary};

const SUMMARY_WIDTH: usize = 48;

#[derive(Tabled)]
struct TicketRow {
    #[tabled(rename = "#")]
    number: String,
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Priority")]
    priority: &'static str,
    #[tabled(rename = "Summary")]
    summary: String,
    #[tabled(rename = "Assigned")]
    assigned: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Comments")]
    comments: usize,
}

impl From<&TicketSummary> for TicketRow {
    fn from(entry: &TicketSummary) -> Self {
        let t = &entry.ticket;
        Self {
            number: ticket_number(t.ticket_number),
            id: t.import_id,
            status: status(t.status.as_deref()).to_string(),
            priority: Priority::from_code(t.priority).label(),
            summary: truncate(t.summary.as_deref().unwrap_or("No summary"), SUMMARY_WIDTH),
            assigned: entry.assigned_user.clone(),
            created: format_date(t.created_at.as_deref()),
            comments: entry.comment_count,
        }
    }
}

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Bucket")]
    bucket: &'static str,
    #[tabled(rename = "Tickets")]
    count: usize,
}

pub fn render_page(page: &TicketPage) -> String {
    if page.tickets.is_empty() {
        return "No tickets found\nTry adjusting your search or filters".to_string();
    }
    let rows: Vec<TicketRow> = page.tickets.iter().map(TicketRow::from).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());

    let p = &page.pagination;
    format!(
        "{}\nPage {} of {} (total {} tickets)",
        table,
        p.page,
        p.total_pages.max(1),
        p.total
    )
}

pub fn render_detail(detail: &TicketDetail) -> String {
    let t = &detail.ticket;
    let mut out = String::new();

    out.push_str(&format!(
        "Ticket #{}  [{}]\n",
        ticket_number(t.ticket_number),
        status(t.status.as_deref())
    ));
    out.push_str(&format!("{}\n\n", t.summary.as_deref().unwrap_or("No summary")));

    let mut meta = vec![
        ("Status", t.status.clone().unwrap_or_else(|| "Unknown".into())),
        ("Priority", Priority::from_code(t.priority).to_string()),
        ("Assigned To", detail.assigned_user.clone()),
        ("Created By", detail.created_user.clone()),
        ("Created At", format_date(t.created_at.as_deref())),
        ("Updated At", format_date(t.updated_at.as_deref())),
    ];
    if t.closed_at.is_some() {
        meta.push(("Closed At", format_date(t.closed_at.as_deref())));
    }
    for (label, value) in meta {
        out.push_str(&format!("  {:<12} {}\n", label, value));
    }

    out.push_str("\nDescription\n");
    out.push_str(t.description.as_deref().unwrap_or("No description provided"));
    out.push('\n');

    out.push_str(&format!("\nComments ({})\n", detail.comments.len()));
    if detail.comments.is_empty() {
        out.push_str("No comments yet\n");
    }
    for view in &detail.comments {
        let c = &view.comment;
        out.push_str(&format!(
            "- {} ({})\n",
            view.user_name,
            format_date(c.created_at.as_deref())
        ));
        if let Some(body) = c.body.as_deref().filter(|b| !b.is_empty()) {
            for line in body.lines() {
                out.push_str(&format!("    {}\n", line));
            }
        }
        if let Some(action) = c.action.as_deref().filter(|a| !a.is_empty()) {
            out.push_str(&format!("    Action: {}\n", action));
        }
    }
    out
}

pub fn render_stats(stats: &TicketStats) -> String {
    let rows = vec![
        StatRow { bucket: "Total", count: stats.total },
        StatRow { bucket: "Open", count: stats.open },
        StatRow { bucket: "Closed", count: stats.closed },
        StatRow { bucket: "Pending", count: stats.pending },
    ];
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

/// Local-time rendering. Unparsable text is shown as-is.
pub fn format_date(raw: Option<&str>) -> String {
    match raw {
        None | Some("") => "N/A".to_string(),
        Some(value) => parse_timestamp(value)
            .map(|ts| ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| value.to_string()),
    }
}

fn ticket_number(number: Option<i64>) -> String {
    number.map_or_else(|| "N/A".to_string(), |n| n.to_string())
}

fn status(status: Option<&str>) -> &str {
    status.filter(|s| !s.is_empty()).unwrap_or("unknown")
}

fn truncate(text: &str, width: usize) -> String {
    let line = text.lines().next().unwrap_or("");
    if line.chars().count() <= width {
        return line.to_string();
    }
    let mut cut: String = line.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
