
mod search_test;
