//! This file serves as the root for all SeaORM entity modules.
//! We define the data models for the project budget tracking application
//! here: projects own tasks, budget lines and hourly rates; users book time
//! entries on tasks; currency rates convert foreign rates to the base
//! currency.

pub mod budget_line;
pub mod currency_rate;
pub mod hourly_rate;
pub mod project;
pub mod task;
pub mod time_entry;
pub mod user;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::budget_line::Entity as BudgetLine;
    pub use super::currency_rate::Entity as CurrencyRate;
    pub use super::hourly_rate::Entity as HourlyRate;
    pub use super::project::Entity as Project;
    pub use super::task::Entity as Task;
    pub use super::time_entry::Entity as TimeEntry;
    pub use super::user::Entity as User;
}
