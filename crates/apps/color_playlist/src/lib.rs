pub mod cli;
pub mod run;
pub mod terminal_view;
