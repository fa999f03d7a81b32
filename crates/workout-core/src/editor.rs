//! Ordered exercise-list editor.
//!
//! The parent page owns the `Vec<SessionExerciseInput>`; the editor borrows
//! it mutably for the duration of one edit. After every structural change
//! (add, remove, move) the `order_index` of each item equals its position
//! in the vector, counting from zero.
//!
//! None of the operations fail. Out-of-range indices and moves past either
//! end leave the list untouched, and numeric input that does not parse as a
//! non-negative integer becomes "unset".

use std::fmt;
use std::str::FromStr;

use workout_api::models::{SessionExerciseInput, UNSELECTED_EXERCISE};

/// Direction for [`ExerciseListEditor::move_item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards index 0.
    Up,
    /// Towards the end of the list.
    Down,
}

/// The scalar fields of a line item that can be edited in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseField {
    ExerciseId,
    Sets,
    Reps,
    Weight,
    Duration,
}

impl ExerciseField {
    pub const MEASURES: [ExerciseField; 4] = [Self::Sets, Self::Reps, Self::Weight, Self::Duration];
}

impl fmt::Display for ExerciseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ExerciseId => "exercise",
            Self::Sets => "sets",
            Self::Reps => "reps",
            Self::Weight => "weight",
            Self::Duration => "duration",
        };
        f.write_str(s)
    }
}

impl FromStr for ExerciseField {
    type Err = ExerciseFieldParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exercise" | "exercise_id" | "exerciseid" => Ok(Self::ExerciseId),
            "sets" => Ok(Self::Sets),
            "reps" => Ok(Self::Reps),
            "weight" => Ok(Self::Weight),
            "duration" => Ok(Self::Duration),
            _ => Err(ExerciseFieldParseError(s.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`ExerciseField`] string.
#[derive(Debug, Clone)]
pub struct ExerciseFieldParseError(pub String);

impl fmt::Display for ExerciseFieldParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid field: {:?} (expected exercise, sets, reps, weight, or duration)",
            self.0
        )
    }
}

impl std::error::Error for ExerciseFieldParseError {}

/// Parse user input for a numeric measure.
///
/// Empty, non-numeric, partially numeric (`"12abc"`), negative, or
/// out-of-range input yields `None` ("unset"), never zero and never an error.
pub fn parse_measure(raw: &str) -> Option<u32> {
    if raw.is_empty() || raw.starts_with('-') {
        return None;
    }
    raw.parse::<u32>().ok()
}

/// Parse user input for a catalog exercise id.
///
/// Anything that is not a non-negative `i64` selects nothing.
pub fn parse_exercise_id(raw: &str) -> i64 {
    if raw.starts_with('-') {
        return UNSELECTED_EXERCISE;
    }
    raw.parse::<i64>().unwrap_or(UNSELECTED_EXERCISE)
}

/// Rewrite every `order_index` to match its position.
pub fn reindex(items: &mut [SessionExerciseInput]) {
    for (i, item) in items.iter_mut().enumerate() {
        item.order_index = i;
    }
}

/// Whether `order_index` runs `0..n` in storage order.
pub fn is_contiguous(items: &[SessionExerciseInput]) -> bool {
    items.iter().enumerate().all(|(i, item)| item.order_index == i)
}

/// Mutating view over a parent-owned list of line items.
#[derive(Debug)]
pub struct ExerciseListEditor<'a> {
    items: &'a mut Vec<SessionExerciseInput>,
}

impl<'a> ExerciseListEditor<'a> {
    pub fn new(items: &'a mut Vec<SessionExerciseInput>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[SessionExerciseInput] {
        self.items.as_slice()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append a blank item (no exercise, measures unset). Returns its index.
    pub fn add(&mut self) -> usize {
        let index = self.items.len();
        self.items.push(SessionExerciseInput::blank(index));
        index
    }

    /// Delete the item at `index` and close the gap in `order_index`.
    ///
    /// Returns `false` (and changes nothing) if `index` is out of range.
    pub fn remove(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            return false;
        }
        self.items.remove(index);
        reindex(self.items.as_mut_slice());
        true
    }

    /// Point the item at `index` at a catalog exercise.
    ///
    /// [`UNSELECTED_EXERCISE`] clears the choice. Returns `false` if `index`
    /// is out of range.
    pub fn select_exercise(&mut self, index: usize, exercise_id: i64) -> bool {
        let Some(item) = self.items.get_mut(index) else {
            return false;
        };
        item.exercise_id = exercise_id;
        true
    }

    /// Replace one field of the item at `index`.
    ///
    /// For [`ExerciseField::ExerciseId`], `None` restores the "no exercise"
    /// sentinel; ids beyond `u32` go through [`Self::select_exercise`].
    /// Returns `false` if `index` is out of range.
    pub fn update(&mut self, index: usize, field: ExerciseField, value: Option<u32>) -> bool {
        if field == ExerciseField::ExerciseId {
            let id = value.map(i64::from).unwrap_or(UNSELECTED_EXERCISE);
            return self.select_exercise(index, id);
        }
        let Some(item) = self.items.get_mut(index) else {
            return false;
        };
        match field {
            ExerciseField::ExerciseId => {}
            ExerciseField::Sets => item.sets = value,
            ExerciseField::Reps => item.reps = value,
            ExerciseField::Weight => item.weight = value,
            ExerciseField::Duration => item.duration = value,
        }
        true
    }

    /// [`Self::update`] with raw text input. Measures are coerced by
    /// [`parse_measure`], exercise ids by [`parse_exercise_id`].
    pub fn update_from_input(&mut self, index: usize, field: ExerciseField, raw: &str) -> bool {
        match field {
            ExerciseField::ExerciseId => self.select_exercise(index, parse_exercise_id(raw)),
            _ => self.update(index, field, parse_measure(raw)),
        }
    }

    /// Swap the item at `index` with its neighbour in `direction`.
    ///
    /// Moving the first item up or the last item down is rejected: the list
    /// is left exactly as it was and `false` is returned.
    pub fn move_item(&mut self, index: usize, direction: Direction) -> bool {
        let len = self.items.len();
        if index >= len {
            return false;
        }
        let target = match direction {
            Direction::Up if index == 0 => return false,
            Direction::Up => index - 1,
            Direction::Down if index + 1 == len => return false,
            Direction::Down => index + 1,
        };
        self.items.swap(index, target);
        reindex(self.items.as_mut_slice());
        true
    }
}
