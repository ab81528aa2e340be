pub mod exercises;
pub mod scheduled_workouts;
pub mod users;
pub mod workout_plan_exercises;
pub mod workout_plans;
