mod definitions_tests;
mod expressions_tests;
mod recovery_tests;
mod statements_tests;
mod units_tests;
