use mockall::mock;
use uuid::Uuid;

use timetable_core::models::day::Day;
use timetable_core::models::timetable::NewTimeSlot;
use timetable_core::models::user::Role;

use crate::models::{DbClass, DbTimetable, DbUser};
use crate::repositories::timetable::{SlotUpdate, TimetableFilter};

// Mock repositories for testing
mock! {
    pub TimetableRepo {
        pub async fn list_timetables(
            &self,
            filter: TimetableFilter,
            page: u32,
            limit: u32,
        ) -> eyre::Result<(Vec<DbTimetable>, usize)>;

        pub async fn get_timetable_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbTimetable>>;

        pub async fn find_by_class_and_day(
            &self,
            class_id: Uuid,
            day: Day,
        ) -> eyre::Result<Option<DbTimetable>>;

        pub async fn create_timetable(
            &self,
            class_id: Uuid,
            day: Day,
            slots: Vec<NewTimeSlot>,
        ) -> eyre::Result<DbTimetable>;

        pub async fn append_slot(
            &self,
            timetable_id: Uuid,
            slot: NewTimeSlot,
        ) -> eyre::Result<Option<DbTimetable>>;

        pub async fn remove_slot(
            &self,
            timetable_id: Uuid,
            slot_id: Uuid,
        ) -> eyre::Result<Option<DbTimetable>>;

        pub async fn update_slot_fields(
            &self,
            timetable_id: Uuid,
            slot_id: Uuid,
            update: SlotUpdate,
        ) -> eyre::Result<Option<DbTimetable>>;

        pub async fn delete_timetable_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<bool>;
    }
}

mock! {
    pub ClassRepo {
        pub async fn get_class_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbClass>>;

        pub async fn classes_by_ids(
            &self,
            ids: Vec<Uuid>,
        ) -> eyre::Result<Vec<DbClass>>;
    }
}

mock! {
    pub UserRepo {
        pub async fn get_user_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbUser>>;

        pub async fn find_user_by_email(
            &self,
            email: &'static str,
        ) -> eyre::Result<Option<DbUser>>;

        pub async fn find_user_by_token(
            &self,
            token: Uuid,
        ) -> eyre::Result<Option<DbUser>>;

        pub async fn list_users(
            &self,
            role: Option<Role>,
            page: u32,
            limit: u32,
        ) -> eyre::Result<(Vec<DbUser>, usize)>;
    }
}
