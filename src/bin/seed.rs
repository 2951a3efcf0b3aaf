//! Seeds the database with canned departments, subjects, classrooms and
//! accounts for local development. Safe to re-run.

use sqlx::SqlitePool;

use timetable_server::auth::hash_password;
use timetable_server::config::Config;
use timetable_server::db;
use timetable_server::models::Role;

const DEPARTMENTS: &[(&str, &str)] = &[
    ("MCA COMPUTER APPLICATIONS", "MCA"),
    ("MCA GENERATIVE AI", "MCA-GENAI"),
    ("BCA", "BCA"),
    ("BCA DATASCIENCE", "BCA-DS"),
    ("B.SC CS", "BSC-CS"),
    ("B.SC CYBER SECURITY", "BSC-CYBER"),
    ("BCA GEN AI", "BCA-GENAI"),
    ("M.SC APPLIED DS", "MSC-ADS"),
    ("B.SC AIML", "BSC-AIML"),
];

// Subjects and classrooms for the MCA department (id 1).
const MCA_SUBJECTS: &[(&str, &str)] = &[
    ("Python for AI", "AI101"),
    ("Deep Learning", "AI102"),
    ("Generative Models", "AI103"),
    ("Prompt Engineering", "AI104"),
];

const MCA_CLASSROOMS: &[(&str, i64)] = &[
    ("Lab MCA101", 30),
    ("Room MCA102", 40),
    ("Seminar Hall MCA", 100),
];

struct SeedUser {
    name: &'static str,
    email: &'static str,
    password: &'static str,
    role: Role,
    department_id: Option<i64>,
    staff_role: Option<&'static str>,
    subjects_selected: Option<&'static str>,
    subjects_locked: bool,
}

const USERS: &[SeedUser] = &[
    SeedUser {
        name: "Main Admin",
        email: "admin@srmist.edu.in",
        password: "admin123",
        role: Role::MainAdmin,
        department_id: None,
        staff_role: None,
        subjects_selected: None,
        subjects_locked: false,
    },
    SeedUser {
        name: "MCA Admin",
        email: "mca.admin@srmist.edu.in",
        password: "mcaadmin123",
        role: Role::DeptAdmin,
        department_id: Some(1),
        staff_role: None,
        subjects_selected: None,
        subjects_locked: false,
    },
    SeedUser {
        name: "Dr. Alpha",
        email: "alpha@srmist.edu.in",
        password: "staff123",
        role: Role::Staff,
        department_id: Some(1),
        staff_role: Some("professor"),
        subjects_selected: Some("1,2"),
        subjects_locked: true,
    },
    SeedUser {
        name: "Dr. Beta",
        email: "beta@srmist.edu.in",
        password: "staff123",
        role: Role::Staff,
        department_id: Some(1),
        staff_role: Some("assistant_professor"),
        subjects_selected: Some("3"),
        subjects_locked: true,
    },
    SeedUser {
        name: "Dr. Gamma",
        email: "gamma@srmist.edu.in",
        password: "staff123",
        role: Role::Staff,
        department_id: Some(1),
        staff_role: Some("hod"),
        subjects_selected: Some("4"),
        subjects_locked: true,
    },
];

async fn table_is_empty(pool: &SqlitePool, table: &str) -> anyhow::Result<bool> {
    let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await?;
    Ok(count.0 == 0)
}

pub async fn seed_database(pool: &SqlitePool) -> anyhow::Result<()> {
    db::run_migrations(pool).await?;

    for (name, code) in DEPARTMENTS {
        sqlx::query("INSERT OR IGNORE INTO departments (name, code) VALUES (?, ?)")
            .bind(name)
            .bind(code)
            .execute(pool)
            .await?;
    }

    // Subjects and classrooms carry no unique key, so only seed them into
    // an empty table.
    if table_is_empty(pool, "subjects").await? {
        for (name, code) in MCA_SUBJECTS {
            sqlx::query("INSERT INTO subjects (name, code, department_id) VALUES (?, ?, 1)")
                .bind(name)
                .bind(code)
                .execute(pool)
                .await?;
        }
    }

    if table_is_empty(pool, "classrooms").await? {
        for (name, capacity) in MCA_CLASSROOMS {
            sqlx::query("INSERT INTO classrooms (name, capacity, department_id) VALUES (?, ?, 1)")
                .bind(name)
                .bind(capacity)
                .execute(pool)
                .await?;
        }
    }

    for user in USERS {
        let password_hash =
            hash_password(user.password).map_err(|e| anyhow::anyhow!("hashing failed: {}", e))?;
        sqlx::query(
            "INSERT OR IGNORE INTO users \
             (name, email, password_hash, role, department_id, staff_role, subjects_selected, subjects_locked) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(user.name)
        .bind(user.email)
        .bind(&password_hash)
        .bind(user.role)
        .bind(user.department_id)
        .bind(user.staff_role)
        .bind(user.subjects_selected)
        .bind(user.subjects_locked)
        .execute(pool)
        .await?;
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cfg = Config::from_env()?;
    let pool = db::init_pool(&cfg.database_path).await?;
    seed_database(&pool).await?;

    println!("Database seeded successfully!");
    Ok(())
}
