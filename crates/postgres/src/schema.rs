/// Idempotent DDL for every table the backend uses, in dependency order.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS admins (
        id UUID PRIMARY KEY,
        username TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        otp TEXT,
        otp_expires_at TIMESTAMPTZ,
        otp_attempts INTEGER NOT NULL DEFAULT 0,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS bookings (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT,
        mobile TEXT NOT NULL,
        checkin DATE NOT NULL,
        checkout DATE NOT NULL,
        adults INTEGER NOT NULL,
        children INTEGER NOT NULL,
        duration TEXT NOT NULL,
        requests TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS feedbacks (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT,
        feedback TEXT,
        flag BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS contacts (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT,
        mobile TEXT NOT NULL,
        message TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_statement_is_idempotent() {
        for statement in SCHEMA_STATEMENTS {
            assert!(statement.contains("CREATE TABLE IF NOT EXISTS"));
        }
    }

    #[test]
    fn test_admin_table_keeps_reset_fields_nullable() {
        let admins = SCHEMA_STATEMENTS[0];
        assert!(admins.contains("username TEXT NOT NULL UNIQUE"));
        assert!(admins.contains("otp TEXT,"));
        assert!(admins.contains("otp_expires_at TIMESTAMPTZ,"));
    }
}
