pub mod add;
pub mod delete;
pub mod edit;
pub mod list;
pub mod menu;
pub mod practice;
pub mod reset;
pub mod stats;
