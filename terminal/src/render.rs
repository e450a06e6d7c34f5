//! Plain-text rendering of the wizard's view data.

use booking_widget_backend::{BookingFormatter, BookingWizard, SlotMode};
use shared::{BookingConfirmation, BookingSummary, CalendarMonth, DayCell, GridCell, IntervalTab, TimeSlot, WizardStep};

const SLOTS_PER_ROW: usize = 6;

/// Full screen for the current step
pub fn render_screen(wizard: &BookingWizard) -> String {
    let mut sections = vec![
        wizard.clock_display(),
        render_progress(wizard.step()),
    ];

    match wizard.summary() {
        Some(summary) => sections.push(render_summary(&summary)),
        None => {
            sections.push(render_calendar(wizard.calendar_month(), wizard.formatter()));
            sections.push(render_slot_panel(wizard));
        }
    }

    sections.join("\n\n")
}

/// Step indicator: reached steps are filled
pub fn render_progress(step: WizardStep) -> String {
    [WizardStep::DateSelection, WizardStep::TimeSelection, WizardStep::BookingDetails]
        .iter()
        .map(|s| {
            let mark = if *s <= step { '●' } else { '○' };
            format!("{} {}", mark, s.number())
        })
        .collect::<Vec<_>>()
        .join(" ── ")
}

pub fn render_calendar(month: &CalendarMonth, formatter: &dyn BookingFormatter) -> String {
    let mut lines = vec![format!("  ‹ {} ›", formatter.month_year(month.cursor()))];

    let headers: String = formatter.weekday_headers().iter().map(|h| format!(" {:>2} ", h)).collect();
    lines.push(headers.trim_end().to_string());

    for week in month.cells.chunks(7) {
        let row: String = week
            .iter()
            .map(|cell| match cell {
                GridCell::Padding => "    ".to_string(),
                GridCell::Day(day) => day_cell(day),
            })
            .collect();
        lines.push(row.trim_end().to_string());
    }

    lines.push("[n] selected   n* today   ·n unavailable".to_string());
    lines.join("\n")
}

fn day_cell(cell: &DayCell) -> String {
    let today = if cell.is_today { '*' } else { ' ' };
    if cell.is_selected {
        format!("[{:>2}]", cell.day)
    } else if cell.is_clickable() {
        format!(" {:>2}{}", cell.day, today)
    } else {
        format!("·{:>2}{}", cell.day, today)
    }
}

/// Selected date, duration, optional tab bar and the slot list (or its placeholder message)
pub fn render_slot_panel(wizard: &BookingWizard) -> String {
    let mut lines = vec![format!("📅 {}", wizard.selected_date_label())];

    let duration = wizard.selection().duration_minutes;
    let presets: Vec<String> = wizard
        .duration_presets()
        .iter()
        .map(|&minutes| {
            let label = wizard.formatter().duration(minutes);
            if minutes == duration {
                format!("[{}]", label)
            } else {
                label
            }
        })
        .collect();
    lines.push(format!("⏱️ {}", presets.join("  ")));

    if wizard.slot_mode() == SlotMode::Tabbed {
        lines.push(render_tabs(wizard.active_tab()));
    }

    match wizard.slot_panel_message() {
        Some(message) => lines.push(message),
        None => lines.extend(render_slots(&wizard.time_slots())),
    }

    lines.join("\n")
}

pub fn render_tabs(active: IntervalTab) -> String {
    IntervalTab::all()
        .map(|tab| {
            let label = format!("{}: {}", tab.index() + 1, tab);
            if tab == active {
                format!("[{}]", label)
            } else {
                format!(" {} ", label)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end()
        .to_string()
}

pub fn render_slots(slots: &[TimeSlot]) -> Vec<String> {
    slots
        .chunks(SLOTS_PER_ROW)
        .map(|row| {
            let row: String = row
                .iter()
                .map(|slot| {
                    if slot.is_selected {
                        format!("[{}]", slot.time)
                    } else {
                        format!(" {} ", slot.time)
                    }
                })
                .collect::<Vec<_>>()
                .join(" ");
            row.trim_end().to_string()
        })
        .collect()
}

pub fn render_summary(summary: &BookingSummary) -> String {
    format!(
        "📅 {}\n🕒 {}\n⏱️ {}\n\nconfirm <name> | <email>",
        summary.formatted_date, summary.time, summary.formatted_duration
    )
}

/// Confirmation text followed by the assembled booking payload
pub fn render_confirmation(confirmation: &BookingConfirmation) -> String {
    let payload = serde_json::to_string_pretty(confirmation)
        .unwrap_or_else(|e| format!("<payload unavailable: {}>", e));
    format!("✅ {}\n\n{}", confirmation.message, payload)
}
