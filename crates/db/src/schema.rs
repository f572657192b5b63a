use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create users table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL UNIQUE,
            password_hash VARCHAR(255) NOT NULL,
            role VARCHAR(32) NOT NULL CHECK (role IN ('admin', 'faculty', 'student')),
            department VARCHAR(255) NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create auth_tokens table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS auth_tokens (
            token UUID PRIMARY KEY,
            user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            expires_at TIMESTAMP WITH TIME ZONE NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create classes table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS classes (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            class_name VARCHAR(255) NOT NULL,
            course_code VARCHAR(64) NOT NULL,
            department VARCHAR(255) NOT NULL,
            semester INTEGER NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create subjects table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS subjects (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            subject_name VARCHAR(255) NOT NULL,
            subject_code VARCHAR(64) NOT NULL,
            credits INTEGER NOT NULL,
            department VARCHAR(255) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create timetables table. Slots are embedded in the document row; the
    // unique constraint backs the one-document-per-(class, day) invariant
    // that create_slot_entry relies on.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS timetables (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            class_id UUID NOT NULL REFERENCES classes(id),
            day VARCHAR(16) NOT NULL CHECK (day IN ('Monday', 'Tuesday', 'Wednesday', 'Thursday', 'Friday', 'Saturday')),
            time_slots JSONB NOT NULL DEFAULT '[]'::jsonb,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT uq_timetables_class_day UNIQUE (class_id, day)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create substitutions table. Timetable/slot ids are plain columns,
    // not foreign keys: a substitution outlives its slot when the parent
    // document is deleted.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS substitutions (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            timetable_id UUID NOT NULL,
            slot_id UUID NOT NULL,
            date DATE NOT NULL,
            original_faculty_id UUID NOT NULL REFERENCES users(id),
            substitute_faculty_id UUID NOT NULL REFERENCES users(id),
            reason TEXT NOT NULL,
            status VARCHAR(16) NOT NULL DEFAULT 'pending' CHECK (status IN ('pending', 'approved', 'rejected')),
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create special_classes table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS special_classes (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            class_id UUID NOT NULL REFERENCES classes(id),
            subject_id UUID NOT NULL REFERENCES subjects(id),
            faculty_id UUID NOT NULL REFERENCES users(id),
            date DATE NOT NULL,
            start_time VARCHAR(5) NOT NULL,
            end_time VARCHAR(5) NOT NULL,
            room VARCHAR(64) NOT NULL,
            description TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create notifications table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS notifications (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            title VARCHAR(255) NOT NULL,
            message TEXT NOT NULL,
            is_read BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_users_role ON users(role);
        CREATE INDEX IF NOT EXISTS idx_auth_tokens_user_id ON auth_tokens(user_id);
        CREATE INDEX IF NOT EXISTS idx_classes_department ON classes(department);
        CREATE INDEX IF NOT EXISTS idx_timetables_class_id ON timetables(class_id);
        CREATE INDEX IF NOT EXISTS idx_timetables_day ON timetables(day);
        CREATE INDEX IF NOT EXISTS idx_timetables_time_slots ON timetables USING GIN (time_slots jsonb_path_ops);
        CREATE INDEX IF NOT EXISTS idx_substitutions_status ON substitutions(status);
        CREATE INDEX IF NOT EXISTS idx_substitutions_original_faculty_id ON substitutions(original_faculty_id);
        CREATE INDEX IF NOT EXISTS idx_special_classes_class_id ON special_classes(class_id);
        CREATE INDEX IF NOT EXISTS idx_notifications_user_id ON notifications(user_id);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
