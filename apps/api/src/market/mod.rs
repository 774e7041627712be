// Market analysis: role health, outlook projection, salary trends.
// Keyed only by job title; independent of any candidate profile.

pub mod handlers;
pub mod health;
pub mod outlook;
pub mod salary;
