pub mod alias;
pub mod commands;
pub mod history;
pub mod redirect;
pub mod tokenize;
