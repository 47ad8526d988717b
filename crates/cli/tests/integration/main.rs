mod common;
mod generate_tests;
mod graph_tests;
