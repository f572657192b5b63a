pub mod auth;
pub mod class;
pub mod notification;
pub mod special_class;
pub mod subject;
pub mod substitution;
pub mod timetable;
pub mod user;
