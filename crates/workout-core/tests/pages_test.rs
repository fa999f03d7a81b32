//! Page controllers driven against the seeded in-memory backend.

use std::sync::Arc;

use chrono::NaiveDate;

use workout_core::editor::{Direction, ExerciseField};
use workout_core::forms::{PlanForm, SessionForm};
use workout_core::pages::{
    DashboardPage, PlanDialog, PlanSessionsPage, SessionDialog, SessionExercisesPage,
};
use workout_core::catalog::PLACEHOLDER_NAME;
use workout_core::Route;
use workout_test_utils::{CatalogOutageApi, Fixture};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[tokio::test]
async fn dashboard_lists_seeded_plans() {
    let (fx, _api) = Fixture::seeded();
    let mut page = DashboardPage::new(fx.ctx.clone());
    assert!(page.is_loading());

    assert!(page.mount().await);

    assert!(!page.is_loading());
    assert_eq!(page.plans().len(), 3);
    assert!(page.can_delete_all());
}

#[tokio::test]
async fn dashboard_create_then_edit_plan() {
    let (fx, api) = Fixture::seeded();
    let mut page = DashboardPage::new(fx.ctx.clone());
    page.mount().await;

    page.open_create();
    assert_eq!(page.form(), PlanForm::default());
    let created = page.submit(&PlanForm::new("Full Body", "")).await.unwrap();
    assert_eq!(page.dialog(), &PlanDialog::Closed);
    assert_eq!(page.plans().len(), 4);

    assert_eq!(created.id, 4);
    assert_eq!(created.name, "Full Body");
    assert_eq!(created.description, None);
    assert_eq!(page.plans()[3], created);

    page.open_edit(created.clone());
    let mut form = page.form();
    assert_eq!(form.name, "Full Body");
    form.description = "Everything at once".to_string();
    let updated = page.submit(&form).await.unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.description.as_deref(), Some("Everything at once"));

    let stored = api.plans_snapshot();
    let updated = stored.iter().find(|p| p.id == created.id).unwrap();
    assert_eq!(updated.description.as_deref(), Some("Everything at once"));
    assert_eq!(
        fx.notifier.successes(),
        vec![
            "Created successfully".to_string(),
            "Updated successfully".to_string()
        ]
    );
}

#[tokio::test]
async fn dashboard_invalid_plan_is_not_sent() {
    let (fx, api) = Fixture::seeded();
    let mut page = DashboardPage::new(fx.ctx.clone());
    page.mount().await;
    let calls = api.call_count();

    page.open_create();
    assert_eq!(page.submit(&PlanForm::new("   ", "")).await, None);

    assert_eq!(api.call_count(), calls);
    assert_eq!(page.dialog(), &PlanDialog::Create);
    assert_eq!(fx.notifier.errors(), vec!["Plan name is required".to_string()]);
}

#[tokio::test]
async fn dashboard_delete_plan_cascades_sessions() {
    let (fx, api) = Fixture::seeded();
    let mut page = DashboardPage::new(fx.ctx.clone());
    page.mount().await;

    assert!(!page.confirm_delete().await);

    let push = page.plans()[0].clone();
    page.request_delete(push.clone());
    assert_eq!(page.pending_delete(), Some(&push));
    assert!(page.confirm_delete().await);

    assert_eq!(page.pending_delete(), None);
    assert!(!page.is_deleting());
    assert_eq!(page.plans().len(), 2);
    assert!(api.sessions_snapshot().iter().all(|s| s.workout_plan_id != push.id));
    assert_eq!(fx.notifier.successes(), vec!["Deleted successfully".to_string()]);
}

#[tokio::test]
async fn dashboard_delete_all() {
    let (fx, api) = Fixture::seeded();
    let mut page = DashboardPage::new(fx.ctx.clone());
    page.mount().await;

    assert!(!page.confirm_delete_all().await);
    page.open_delete_all();
    assert!(page.is_delete_all_open());
    assert!(page.confirm_delete_all().await);

    assert!(page.plans().is_empty());
    assert!(!page.can_delete_all());
    assert!(api.sessions_snapshot().is_empty());
    assert_eq!(
        fx.notifier.successes(),
        vec!["All plans deleted successfully".to_string()]
    );

    page.open_delete_all();
    assert!(!page.is_delete_all_open());
}

// ---------------------------------------------------------------------------
// Plan sessions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn plan_sessions_loads_plan_and_sessions() {
    let (fx, _api) = Fixture::seeded();
    let mut page = PlanSessionsPage::new(fx.ctx.clone(), 1);

    assert!(page.mount().await);

    assert_eq!(page.plan().map(|p| p.name.as_str()), Some("Push Day"));
    assert_eq!(page.sessions().len(), 2);
    assert!(page.find_session(1).is_some());
    assert!(fx.navigator.history().is_empty());
}

#[tokio::test]
async fn plan_sessions_missing_plan_redirects_to_dashboard() {
    let (fx, _api) = Fixture::seeded();
    let mut page = PlanSessionsPage::new(fx.ctx.clone(), 99);

    assert!(!page.mount().await);

    assert_eq!(fx.navigator.last(), Some(Route::Dashboard));
    assert_eq!(fx.notifier.errors(), vec!["Plan not found".to_string()]);
}

#[tokio::test]
async fn plan_sessions_create_edit_and_delete() {
    let (fx, api) = Fixture::seeded();
    let mut page = PlanSessionsPage::new(fx.ctx.clone(), 2);
    page.mount().await;
    assert_eq!(page.sessions().len(), 1);

    page.open_create();
    let mut form = page.form(today());
    assert_eq!(form.workout_date, today());
    form.name = "Heavy Pulls".to_string();
    assert!(page.submit(&form).await);
    assert_eq!(page.dialog(), &SessionDialog::Closed);
    assert_eq!(page.sessions().len(), 2);

    // Editing metadata keeps the session's line items.
    let back = page.find_session(3).unwrap().clone();
    page.open_edit(back.clone());
    let mut form = page.form(today());
    form.notes = "Deload week".to_string();
    assert!(page.submit(&form).await);
    let stored = api
        .sessions_snapshot()
        .into_iter()
        .find(|s| s.id == 3)
        .unwrap();
    assert_eq!(stored.notes.as_deref(), Some("Deload week"));
    assert_eq!(stored.session_exercises.len(), back.session_exercises.len());

    page.request_delete(back);
    assert!(page.confirm_delete().await);
    assert_eq!(page.sessions().len(), 1);

    assert_eq!(
        fx.notifier.successes(),
        vec![
            "Session created successfully".to_string(),
            "Session updated successfully".to_string(),
            "Session deleted successfully".to_string(),
        ]
    );
}

#[tokio::test]
async fn plan_sessions_navigation() {
    let (fx, _api) = Fixture::seeded();
    let page = PlanSessionsPage::new(fx.ctx.clone(), 1);

    page.open_exercises(2);
    page.back();

    assert_eq!(
        fx.navigator.history(),
        vec![
            Route::SessionExercises {
                plan_id: 1,
                session_id: 2
            },
            Route::Dashboard,
        ]
    );
}

#[tokio::test]
async fn plan_sessions_blank_name_is_rejected() {
    let (fx, api) = Fixture::seeded();
    let mut page = PlanSessionsPage::new(fx.ctx.clone(), 1);
    page.mount().await;
    let calls = api.call_count();

    page.open_create();
    assert!(!page.submit(&SessionForm::new(today())).await);

    assert_eq!(api.call_count(), calls);
    assert_eq!(fx.notifier.errors(), vec!["Session name is required".to_string()]);
}

// ---------------------------------------------------------------------------
// Session exercises
// ---------------------------------------------------------------------------

#[tokio::test]
async fn session_exercises_loads_items_and_catalog() {
    let (fx, _api) = Fixture::seeded();
    let mut page = SessionExercisesPage::new(fx.ctx.clone(), 1, 1);
    assert!(page.catalog().is_loading());

    assert!(page.mount().await);

    assert!(!page.is_loading());
    assert!(!page.catalog().is_loading());
    assert_eq!(page.catalog().exercises().len(), 12);
    assert_eq!(page.exercises().len(), 2);
    assert_eq!(page.exercises()[1].exercise_id, 4);
    assert_eq!(page.session().map(|s| s.name.as_str()), Some("Morning Push"));
}

#[tokio::test]
async fn session_exercises_open_with_empty_catalog_when_catalog_fails() {
    let fx = Fixture::with_backend(Arc::new(CatalogOutageApi::new(500, "boom")));
    let mut page = SessionExercisesPage::new(fx.ctx.clone(), 1, 1);

    assert!(page.mount().await);

    assert!(!page.catalog().is_loading());
    assert!(page.catalog().exercises().is_empty());
    assert_eq!(page.catalog().name(0), PLACEHOLDER_NAME);
    assert_eq!(page.catalog().name(page.exercises()[0].exercise_id), PLACEHOLDER_NAME);
    assert_eq!(page.exercises().len(), 2);
    assert_eq!(fx.notifier.errors(), vec!["boom".to_string()]);
    assert!(fx.navigator.history().is_empty());
}

#[tokio::test]
async fn session_exercises_unselected_item_blocks_save() {
    let (fx, api) = Fixture::seeded();
    let mut page = SessionExercisesPage::new(fx.ctx.clone(), 1, 1);
    page.mount().await;

    page.editor().add();
    page.editor().add();
    let calls = api.call_count();

    assert!(!page.save().await);

    assert_eq!(api.call_count(), calls);
    assert_eq!(
        fx.notifier.errors(),
        vec!["Please select an exercise for all items".to_string()]
    );
    assert!(!page.is_saving());
}

#[tokio::test]
async fn session_exercises_save_persists_edits_in_order() {
    let (fx, api) = Fixture::seeded();
    let mut page = SessionExercisesPage::new(fx.ctx.clone(), 1, 2);
    page.mount().await;
    assert!(page.exercises().is_empty());

    {
        let mut editor = page.editor();
        let first = editor.add();
        editor.update(first, ExerciseField::ExerciseId, Some(2));
        editor.update_from_input(first, ExerciseField::Sets, "5");
        let second = editor.add();
        editor.update(second, ExerciseField::ExerciseId, Some(10));
        editor.update_from_input(second, ExerciseField::Duration, "2");
        assert!(editor.move_item(second, Direction::Up));
    }

    assert!(page.save().await);

    let stored = api
        .sessions_snapshot()
        .into_iter()
        .find(|s| s.id == 2)
        .unwrap();
    let ids: Vec<i64> = stored.session_exercises.iter().map(|e| e.exercise_id).collect();
    assert_eq!(ids, vec![10, 2]);
    assert_eq!(stored.session_exercises[0].exercise.name, "Plank");
    assert_eq!(stored.session_exercises[1].sets, Some(5));
    assert_eq!(stored.session_exercises[1].order_index, 1);
    assert_eq!(stored.name, "Evening Push");

    assert_eq!(page.exercises().len(), 2);
    assert_eq!(
        fx.notifier.successes(),
        vec!["Exercises saved successfully".to_string()]
    );
}

#[tokio::test]
async fn session_exercises_removing_all_items_saves_empty_list() {
    let (fx, api) = Fixture::seeded();
    let mut page = SessionExercisesPage::new(fx.ctx.clone(), 1, 1);
    page.mount().await;

    assert!(page.editor().remove(0));
    assert!(page.editor().remove(0));
    assert!(!page.editor().remove(0));
    assert!(page.save().await);

    let stored = api
        .sessions_snapshot()
        .into_iter()
        .find(|s| s.id == 1)
        .unwrap();
    assert!(stored.session_exercises.is_empty());
}

#[tokio::test]
async fn session_exercises_foreign_session_redirects_to_plan() {
    let (fx, _api) = Fixture::seeded();
    // Session 3 belongs to plan 2.
    let mut page = SessionExercisesPage::new(fx.ctx.clone(), 1, 3);

    assert!(!page.mount().await);

    assert_eq!(fx.navigator.last(), Some(Route::PlanSessions { plan_id: 1 }));
    assert!(page.catalog().is_loading());
}

#[tokio::test]
async fn session_exercises_missing_plan_redirects_to_dashboard() {
    let (fx, _api) = Fixture::seeded();
    let mut page = SessionExercisesPage::new(fx.ctx.clone(), 42, 1);

    assert!(!page.mount().await);

    assert_eq!(fx.navigator.last(), Some(Route::Dashboard));
}
