mod common;
mod generation_tests;
mod scenario_tests;
