//! Client-side behavior of the workout tracker.
//!
//! - [`editor`] -- the ordered exercise list editor.
//! - [`catalog`] -- the selectable exercise catalog.
//! - [`interceptor`] -- error notification and 401 handling around any
//!   [`workout_api::WorkoutApi`].
//! - [`pages`] -- the dashboard, plan sessions, and session exercises
//!   controllers.
//! - [`render`] -- plain-text views.

pub mod catalog;
pub mod editor;
pub mod forms;
pub mod interceptor;
pub mod navigation;
pub mod notify;
pub mod pages;
pub mod render;
pub mod validation;

pub use catalog::ExerciseCatalog;
pub use editor::{Direction, ExerciseField, ExerciseListEditor};
pub use interceptor::Intercepted;
pub use navigation::{Navigator, RecordingNavigator, Route};
pub use notify::{Level, Notification, Notifier, RecordingNotifier};
pub use pages::PageContext;
pub use validation::ValidationError;
