//! `lispc interpret <file>`: evaluate and print the result.

use super::{read_file, report_problem};
use crate::interpret_source;

pub fn interpret_file(path: &str) {
    let source = read_file(path);
    match interpret_source(&source) {
        Ok(value) => println!("{value}"),
        Err(problem) => {
            report_problem(path, &source, &problem);
            std::process::exit(1);
        }
    }
}
