//! SeaORM-backed implementations of the domain repository ports.
//!
//! Each repository is generic over `C: ConnectionTrait`, so it can be built
//! from a `DatabaseConnection` or from a transaction. Multi-row writes open
//! their own transaction on `C`; dropping the future before commit rolls it
//! back.

mod exercises;
mod plans;
mod schedules;
mod users;

pub use exercises::SeaOrmExercisesRepository;
pub use plans::SeaOrmPlansRepository;
pub use schedules::SeaOrmSchedulesRepository;
pub use users::SeaOrmUsersRepository;
