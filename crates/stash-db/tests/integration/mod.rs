mod common;
mod item_tests;
