pub mod auth;
pub mod class;
pub mod day;
pub mod notification;
pub mod response;
pub mod special_class;
pub mod subject;
pub mod substitution;
pub mod target;
pub mod timetable;
pub mod user;
