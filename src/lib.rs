pub mod carousel;
pub mod config;
pub mod error;
pub mod events;
pub mod forms;
pub mod page;
pub mod script;
pub mod tasks {
    pub mod carousel;
    pub mod page;
}
