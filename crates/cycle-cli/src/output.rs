//! Plain-text renderings of engine results for the terminal.

use std::fmt::Write as _;

use chrono::{Datelike, NaiveDate};
use cycle_core::{
  Phase, PhaseResult, calendar::CalendarMonth, insights::Insights,
};
use cycle_reminders::ScheduledReminder;

pub fn phase(result: &PhaseResult, cycle_length: u32) -> String {
  let mut out = format!(
    "{}: {} (day {} of {})",
    result.date,
    result.phase.display_name(),
    result.day_of_cycle,
    cycle_length,
  );
  if result.is_fertile {
    out.push_str(", fertile");
  }
  if result.is_ovulation {
    out.push_str(", ovulation day");
  }
  out
}

pub fn predictions(dates: &[NaiveDate]) -> String {
  dates
    .iter()
    .enumerate()
    .map(|(i, d)| format!("{}. {} ({})\n", i + 1, d, d.format("%a %-d %b")))
    .collect()
}

/// One-letter marker for a phase in the calendar grid.
fn marker(phase: Phase) -> char {
  match phase {
    Phase::Period => 'M',
    Phase::Follicular => 'F',
    Phase::Ovulation => 'O',
    Phase::Luteal => 'L',
    Phase::Pms => 'P',
    Phase::Unknown => '?',
  }
}

/// Six rows of seven cells. Each cell is the day number and phase marker;
/// `*` marks a logged entry and brackets mark today.
pub fn calendar(month: &CalendarMonth) -> String {
  let mut out = format!("{:^42}\n", month.title);
  for name in ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"] {
    let _ = write!(out, " {name}   ");
  }
  out.push('\n');

  for week in month.weeks() {
    for day in week {
      if !day.is_current_month {
        out.push_str("      ");
        continue;
      }
      let (open, close) = if day.is_today { ('[', ']') } else { (' ', ' ') };
      let flag = if day.entry.is_some() { '*' } else { ' ' };
      let _ = write!(
        out,
        "{open}{:>2}{}{flag}{close}",
        day.date.day(),
        marker(day.info.phase)
      );
    }
    out.push('\n');
  }
  out.push_str(
    "M menstrual  F follicular  O ovulation  L luteal  P pms  * logged\n",
  );
  out
}

pub fn insights(i: &Insights) -> String {
  let mut out = String::new();
  let _ = writeln!(
    out,
    "Phase:          {} (day {})",
    i.current_phase.display_name(),
    i.day_of_cycle
  );
  let _ = writeln!(out, "Progress:       {:.0}%", i.cycle_progress);
  let _ = if i.days_until_next_period >= 0 {
    writeln!(out, "Next period in: {} days", i.days_until_next_period)
  } else {
    writeln!(out, "Next period:    {} days late", -i.days_until_next_period)
  };
  let k = &i.key_dates;
  let _ = writeln!(out, "Ovulation:      {}", k.ovulation);
  let _ = writeln!(
    out,
    "Fertile window: {} to {}",
    k.fertile_start, k.fertile_end
  );
  let _ = writeln!(out, "PMS from:       {}", k.pms_start);
  let _ = writeln!(out, "Entries logged: {}", i.total_entries);
  if !i.top_symptoms.is_empty() {
    let top: Vec<_> = i
      .top_symptoms
      .iter()
      .map(|s| format!("{} ({})", s.symptom, s.count))
      .collect();
    let _ = writeln!(out, "Top symptoms:   {}", top.join(", "));
  }
  out
}

pub fn reminders(plan: &[ScheduledReminder]) -> String {
  if plan.is_empty() {
    return "No reminders planned.\n".to_string();
  }
  plan
    .iter()
    .map(|r| {
      format!(
        "{}  [{}] {}: {}\n",
        r.scheduled_for.format("%Y-%m-%d %H:%M"),
        r.priority,
        r.title,
        r.message
      )
    })
    .collect()
}
