pub mod parse;
pub mod run;
pub mod version;

#[cfg(test)]
#[path = "../commands_test.rs"]
mod commands_test;
