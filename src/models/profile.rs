//! User profile model
//!
//! Body metrics saved per username, along with the calorie goal derived from them.

use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

use crate::calories::CalorieInputs;
use crate::db::{DbError, DbResult};

/// A saved user profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub weight_kg: f64,
    pub height_ft: f64,
    pub age: i64,
    pub sex: String,
    pub activity_level: String,
    pub daily_calorie_goal: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

/// Data for saving (creating or replacing) a profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfileSave {
    pub username: String,
    pub weight_kg: f64,
    pub height_ft: f64,
    pub age: i64,
    pub sex: String,
    pub activity_level: String,
}

impl UserProfileSave {
    pub fn calorie_inputs(&self) -> CalorieInputs {
        CalorieInputs::from_labels(
            self.weight_kg,
            self.height_ft,
            self.age,
            &self.sex,
            &self.activity_level,
        )
    }
}

impl UserProfile {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            username: row.get("username")?,
            weight_kg: row.get("weight_kg")?,
            height_ft: row.get("height_ft")?,
            age: row.get("age")?,
            sex: row.get("sex")?,
            activity_level: row.get("activity_level")?,
            daily_calorie_goal: row.get("daily_calorie_goal")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Rebuild estimator inputs from the stored labels
    pub fn calorie_inputs(&self) -> CalorieInputs {
        CalorieInputs::from_labels(
            self.weight_kg,
            self.height_ft,
            self.age,
            &self.sex,
            &self.activity_level,
        )
    }

    /// Upsert by username. The calorie goal is recomputed on every save.
    pub fn save(conn: &Connection, data: &UserProfileSave) -> DbResult<Self> {
        let goal = data.calorie_inputs().estimate().round() as i64;

        conn.execute(
            r#"
            INSERT INTO user_profiles (
                username, weight_kg, height_ft, age, sex, activity_level, daily_calorie_goal
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(username) DO UPDATE SET
                weight_kg = excluded.weight_kg,
                height_ft = excluded.height_ft,
                age = excluded.age,
                sex = excluded.sex,
                activity_level = excluded.activity_level,
                daily_calorie_goal = excluded.daily_calorie_goal,
                updated_at = datetime('now')
            "#,
            params![
                data.username,
                data.weight_kg,
                data.height_ft,
                data.age,
                data.sex,
                data.activity_level,
                goal,
            ],
        )?;

        Self::get_by_username(conn, &data.username)?
            .ok_or_else(|| DbError::NotFound(format!("user profile '{}'", data.username)))
    }

    pub fn get_by_username(conn: &Connection, username: &str) -> DbResult<Option<Self>> {
        let profile = conn
            .query_row(
                "SELECT * FROM user_profiles WHERE username = ?1",
                params![username],
                Self::from_row,
            )
            .optional()?;
        Ok(profile)
    }

    /// All profiles ordered by username
    pub fn list(conn: &Connection) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM user_profiles ORDER BY username")?;
        let profiles = stmt
            .query_map([], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(profiles)
    }

    /// Returns false when no profile had that username
    pub fn delete(conn: &Connection, username: &str) -> DbResult<bool> {
        let rows = conn.execute(
            "DELETE FROM user_profiles WHERE username = ?1",
            params![username],
        )?;
        Ok(rows > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{migrations, Database};

    fn test_db() -> Database {
        let db = Database::in_memory().unwrap();
        db.with_conn(migrations::run_migrations).unwrap();
        db
    }

    fn sample(username: &str) -> UserProfileSave {
        UserProfileSave {
            username: username.to_string(),
            weight_kg: 70.0,
            height_ft: 5.9,
            age: 30,
            sex: "Male".to_string(),
            activity_level: "Sedentary".to_string(),
        }
    }

    #[test]
    fn test_save_and_get() {
        let db = test_db();
        let conn = db.get_conn().unwrap();

        let saved = UserProfile::save(&conn, &sample("alice")).unwrap();
        assert_eq!(saved.username, "alice");
        assert_eq!(saved.sex, "Male");
        assert_eq!(saved.daily_calorie_goal, Some(2063));

        let loaded = UserProfile::get_by_username(&conn, "alice").unwrap().unwrap();
        assert_eq!(loaded.id, saved.id);
        assert_eq!(loaded.activity_level, "Sedentary");
    }

    #[test]
    fn test_save_replaces_existing_profile() {
        let db = test_db();
        let conn = db.get_conn().unwrap();

        let first = UserProfile::save(&conn, &sample("bob")).unwrap();
        let mut update = sample("bob");
        update.weight_kg = 60.0;
        update.height_ft = 5.5;
        update.age = 25;
        update.sex = "Female".to_string();
        update.activity_level = "Very Active".to_string();
        let second = UserProfile::save(&conn, &update).unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.weight_kg, 60.0);
        assert_eq!(second.daily_calorie_goal, Some(2438));
        assert_eq!(UserProfile::list(&conn).unwrap().len(), 1);
    }

    #[test]
    fn test_missing_profile() {
        let db = test_db();
        let conn = db.get_conn().unwrap();
        assert!(UserProfile::get_by_username(&conn, "nobody").unwrap().is_none());
        assert!(!UserProfile::delete(&conn, "nobody").unwrap());
    }

    #[test]
    fn test_list_and_delete() {
        let db = test_db();
        let conn = db.get_conn().unwrap();
        UserProfile::save(&conn, &sample("zoe")).unwrap();
        UserProfile::save(&conn, &sample("adam")).unwrap();

        let names: Vec<String> = UserProfile::list(&conn)
            .unwrap()
            .into_iter()
            .map(|p| p.username)
            .collect();
        assert_eq!(names, vec!["adam", "zoe"]);

        assert!(UserProfile::delete(&conn, "zoe").unwrap());
        assert_eq!(UserProfile::list(&conn).unwrap().len(), 1);
    }

    #[test]
    fn test_calorie_inputs_round_trip_labels() {
        let db = test_db();
        let conn = db.get_conn().unwrap();
        let saved = UserProfile::save(&conn, &sample("carol")).unwrap();
        let inputs = saved.calorie_inputs();
        assert_eq!(inputs.estimate(), sample("carol").calorie_inputs().estimate());
    }
}
