mod test_utils;

mod middleware_test;
mod timetable_test;
