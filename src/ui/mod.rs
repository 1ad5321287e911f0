pub mod components;
pub mod forms;
pub mod pages;
pub mod shell;
pub mod theme;
