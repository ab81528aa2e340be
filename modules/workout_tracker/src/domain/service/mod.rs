//! Domain services. They depend only on the ports in `domain::repo` and
//! `domain::ports`, never on storage or transport types.

mod auth;
mod exercises;
mod plans;
mod schedules;

pub use auth::{AuthService, DEFAULT_MIN_PASSWORD_LEN};
pub use exercises::ExerciseService;
pub use plans::PlanService;
pub use schedules::ScheduleService;

/// Everything the transport layers need, wired once at module init.
#[derive(Clone)]
pub struct Services {
    pub auth: AuthService,
    pub exercises: ExerciseService,
    pub plans: PlanService,
    pub schedules: ScheduleService,
}
