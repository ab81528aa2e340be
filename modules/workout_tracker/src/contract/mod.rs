pub mod client;
pub mod error;
pub mod model;

pub use client::WorkoutTrackerApi;
pub use error::WorkoutTrackerError;
pub use model::{
    AuthToken, Exercise, NewUser, PaginatedResult, Pagination, PlanExerciseInput, PlanFilter,
    PlanInput, ScheduleFilter, ScheduledWorkout, User, WorkoutPlan, WorkoutPlanExercise,
};
