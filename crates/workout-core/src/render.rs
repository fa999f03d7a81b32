//! Plain-text rendering of plans, sessions, and the exercise editor.

use chrono::NaiveDate;

use workout_api::models::{
    SessionExerciseInput, SessionStatus, WorkoutPlan, WorkoutSession, iso_date,
};

use crate::catalog::ExerciseCatalog;

/// `Sat, Jan 20, 2024`
pub fn format_date_short(date: NaiveDate) -> String {
    date.format("%a, %b %-d, %Y").to_string()
}

/// `Saturday, January 20, 2024`
pub fn format_date_long(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

pub fn status_badge(status: SessionStatus) -> String {
    format!("[{}]", status.label())
}

fn measure(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Newline-terminate each line and concatenate.
fn lines(rows: Vec<String>) -> String {
    rows.into_iter().map(|line| line + "\n").collect()
}

/// One card per plan.
pub fn plan_card(plan: &WorkoutPlan) -> String {
    let mut out = vec![
        format!("#{} {}", plan.id, plan.name),
        format!(
            "    {}",
            plan.description.as_deref().unwrap_or("No description")
        ),
    ];
    let created = iso_date::parse(&plan.created_at)
        .map(format_date_short)
        .unwrap_or_else(|_| plan.created_at.clone());
    if !created.is_empty() {
        out.push(format!("    Created {created}"));
    }
    lines(out)
}

/// The plan list, or an empty-state hint.
pub fn plan_list(plans: &[WorkoutPlan]) -> String {
    if plans.is_empty() {
        return "No workout plans yet. Create your first plan to get started.\n".to_string();
    }
    plans.iter().map(plan_card).collect::<Vec<_>>().join("\n")
}

/// Table of a plan's sessions.
pub fn session_table(sessions: &[WorkoutSession]) -> String {
    if sessions.is_empty() {
        return "No sessions yet. Create your first workout session to start tracking your exercises.\n"
            .to_string();
    }

    let id_w = sessions
        .iter()
        .map(|s| s.id.to_string().len())
        .max()
        .unwrap_or(2)
        .max(2);
    let date_w = 17;
    let name_w = sessions
        .iter()
        .map(|s| s.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);
    let status_w = 11;

    let header = format!(
        "{:<id_w$}  {:<date_w$}  {:<name_w$}  {:<status_w$}  {:>9}  NOTES",
        "ID", "DATE", "NAME", "STATUS", "EXERCISES",
    );
    let rows = sessions.iter().map(|s| {
        format!(
            "{:<id_w$}  {:<date_w$}  {:<name_w$}  {:<status_w$}  {:>9}  {}",
            s.id,
            format_date_short(s.workout_date),
            s.name,
            status_badge(s.status),
            s.session_exercises.len(),
            s.notes.as_deref().filter(|n| !n.is_empty()).unwrap_or("-"),
        )
    });
    lines(std::iter::once(header).chain(rows).collect())
}

/// Header of the exercises page.
pub fn session_header(session: &WorkoutSession, plan: Option<&WorkoutPlan>) -> String {
    let mut out = vec![
        format!("{} {}", session.name, status_badge(session.status)),
        format!(
            "{} \u{2022} {}",
            plan.map(|p| p.name.as_str()).unwrap_or(""),
            format_date_long(session.workout_date)
        ),
    ];
    if let Some(notes) = session.notes.as_deref().filter(|n| !n.is_empty()) {
        out.push(format!("Notes: {notes}"));
    }
    lines(out)
}

/// The editor view: loading indicator, empty state, or numbered cards.
pub fn exercise_editor(items: &[SessionExerciseInput], catalog: &ExerciseCatalog) -> String {
    if catalog.is_loading() {
        return "Loading exercises...\n".to_string();
    }
    if items.is_empty() {
        return "No exercises added yet\n".to_string();
    }

    let mut out = Vec::with_capacity(items.len() * 2);
    for (i, item) in items.iter().enumerate() {
        let name = catalog.name(item.exercise_id);
        out.push(match catalog.category(item.exercise_id) {
            Some(category) => format!("{:>2}. {name} ({category})", i + 1),
            None => format!("{:>2}. {name}", i + 1),
        });
        out.push(format!(
            "    sets {}  reps {}  weight {} kg  duration {} min",
            measure(item.sets),
            measure(item.reps),
            measure(item.weight),
            measure(item.duration),
        ));
    }
    lines(out)
}

/// The selectable catalog, one `id  name (category)` line each.
pub fn catalog_list(catalog: &ExerciseCatalog) -> String {
    lines(
        catalog
            .exercises()
            .iter()
            .map(|e| format!("{:>3}  {} ({})", e.id, e.name, e.category))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use workout_api::models::Exercise;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 20).unwrap()
    }

    fn catalog() -> ExerciseCatalog {
        ExerciseCatalog::from_exercises(vec![Exercise {
            id: 1,
            name: "Bench Press".to_string(),
            category: "Chest".to_string(),
        }])
    }

    #[test]
    fn date_formats() {
        assert_eq!(format_date_short(date()), "Sat, Jan 20, 2024");
        assert_eq!(format_date_long(date()), "Saturday, January 20, 2024");
    }

    #[test]
    fn editor_shows_loading_then_empty_state() {
        assert_eq!(
            exercise_editor(&[], &ExerciseCatalog::pending()),
            "Loading exercises...\n"
        );
        assert_eq!(exercise_editor(&[], &catalog()), "No exercises added yet\n");
    }

    #[test]
    fn editor_cards_use_placeholder_for_unselected() {
        let items = vec![
            SessionExerciseInput {
                exercise_id: 1,
                sets: Some(4),
                reps: Some(8),
                weight: Some(135),
                duration: None,
                order_index: 0,
            },
            SessionExerciseInput::blank(1),
        ];
        let text = exercise_editor(&items, &catalog());
        assert!(text.contains(" 1. Bench Press (Chest)"));
        assert!(text.contains("sets 4  reps 8  weight 135 kg  duration - min"));
        assert!(text.contains(" 2. Select exercise\n"));
    }

    #[test]
    fn plan_card_without_description() {
        let plan = WorkoutPlan {
            id: 2,
            name: "Pull Day".to_string(),
            description: None,
            user_id: 1,
            created_at: "2024-01-16T10:00:00Z".to_string(),
            updated_at: String::new(),
        };
        let card = plan_card(&plan);
        assert!(card.contains("No description"));
        assert!(card.contains("Created Tue, Jan 16, 2024"));
    }

    #[test]
    fn session_table_lists_status_and_notes() {
        let session = WorkoutSession {
            id: 1,
            name: "Morning Push".to_string(),
            notes: None,
            workout_date: date(),
            status: SessionStatus::Completed,
            workout_plan_id: 1,
            session_exercises: Vec::new(),
        };
        let table = session_table(&[session]);
        assert!(table.contains("[Completed]"));
        assert!(table.contains("Sat, Jan 20, 2024"));
        assert!(table.trim_end().ends_with('-'));
        assert_eq!(table.lines().count(), 2);
        assert!(table.ends_with("-\n"));
    }

    #[test]
    fn session_header_lines_are_newline_terminated() {
        let session = WorkoutSession {
            id: 1,
            name: "Morning Push".to_string(),
            notes: Some("Felt strong".to_string()),
            workout_date: date(),
            status: SessionStatus::Completed,
            workout_plan_id: 1,
            session_exercises: Vec::new(),
        };
        assert_eq!(
            session_header(&session, None),
            "Morning Push [Completed]\n \u{2022} Saturday, January 20, 2024\nNotes: Felt strong\n"
        );
    }

    #[test]
    fn catalog_list_is_one_line_per_exercise() {
        assert_eq!(catalog_list(&catalog()), "  1  Bench Press (Chest)\n");
        assert_eq!(catalog_list(&ExerciseCatalog::pending()), "");
    }
}
