//! User Profile MCP Tools
//!
//! Save, look up and remove user profiles, and estimate calories for a saved profile.

use serde::Serialize;

use crate::db::Database;
use crate::models::{UserProfile, UserProfileSave};
use crate::tools::calories::{calculate_calories, CalorieEstimateResponse};

/// Response for delete_profile
#[derive(Debug, Serialize)]
pub struct DeleteProfileResponse {
    pub username: String,
    pub deleted: bool,
}

/// Response for list_profiles
#[derive(Debug, Serialize)]
pub struct ListProfilesResponse {
    pub profiles: Vec<UserProfile>,
    pub total: usize,
}

/// Response for profile_calories
#[derive(Debug, Serialize)]
pub struct ProfileCaloriesResponse {
    pub username: String,
    pub estimate: CalorieEstimateResponse,
}

fn normalize_username(username: &str) -> Result<&str, String> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err("Username must not be empty".to_string());
    }
    Ok(trimmed)
}

/// Validate the form bounds, then create or replace the profile
pub fn save_profile(db: &Database, data: UserProfileSave) -> Result<UserProfile, String> {
    let username = normalize_username(&data.username)?.to_string();
    let data = UserProfileSave { username, ..data };

    data.calorie_inputs()
        .validate()
        .map_err(|e| format!("Invalid profile: {}", e))?;

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let profile =
        UserProfile::save(&conn, &data).map_err(|e| format!("Failed to save profile: {}", e))?;

    tracing::info!(
        "Saved profile '{}' (goal {:?} kcal/day)",
        profile.username,
        profile.daily_calorie_goal
    );
    Ok(profile)
}

pub fn get_profile(db: &Database, username: &str) -> Result<Option<UserProfile>, String> {
    let username = normalize_username(username)?;
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    UserProfile::get_by_username(&conn, username)
        .map_err(|e| format!("Failed to get profile: {}", e))
}

pub fn list_profiles(db: &Database) -> Result<ListProfilesResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let profiles =
        UserProfile::list(&conn).map_err(|e| format!("Failed to list profiles: {}", e))?;
    Ok(ListProfilesResponse {
        total: profiles.len(),
        profiles,
    })
}

pub fn delete_profile(db: &Database, username: &str) -> Result<DeleteProfileResponse, String> {
    let username = normalize_username(username)?;
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let deleted = UserProfile::delete(&conn, username)
        .map_err(|e| format!("Failed to delete profile: {}", e))?;

    if deleted {
        tracing::info!("Deleted profile '{}'", username);
    }
    Ok(DeleteProfileResponse {
        username: username.to_string(),
        deleted,
    })
}

/// Estimate from a saved profile's current values
pub fn profile_calories(
    db: &Database,
    username: &str,
) -> Result<Option<ProfileCaloriesResponse>, String> {
    let profile = match get_profile(db, username)? {
        Some(profile) => profile,
        None => return Ok(None),
    };

    let estimate = calculate_calories(
        profile.weight_kg,
        profile.height_ft,
        profile.age,
        &profile.sex,
        &profile.activity_level,
    );

    Ok(Some(ProfileCaloriesResponse {
        username: profile.username,
        estimate,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations;

    fn test_db() -> Database {
        let db = Database::in_memory().unwrap();
        db.with_conn(migrations::run_migrations).unwrap();
        db
    }

    fn form(username: &str) -> UserProfileSave {
        UserProfileSave {
            username: username.to_string(),
            weight_kg: 60.0,
            height_ft: 5.5,
            age: 25,
            sex: "Female".to_string(),
            activity_level: "Very Active".to_string(),
        }
    }

    #[test]
    fn test_save_trims_username() {
        let db = test_db();
        let profile = save_profile(&db, form("  dana ")).unwrap();
        assert_eq!(profile.username, "dana");
        assert!(get_profile(&db, "dana").unwrap().is_some());
    }

    #[test]
    fn test_save_rejects_empty_username() {
        let db = test_db();
        assert!(save_profile(&db, form("   ")).is_err());
        assert!(get_profile(&db, "").is_err());
    }

    #[test]
    fn test_save_rejects_out_of_range_values() {
        let db = test_db();
        let mut data = form("eve");
        data.age = 0;
        let err = save_profile(&db, data).unwrap_err();
        assert!(err.contains("age"));
        assert_eq!(list_profiles(&db).unwrap().total, 0);
    }

    #[test]
    fn test_profile_calories() {
        let db = test_db();
        save_profile(&db, form("frank")).unwrap();

        let response = profile_calories(&db, "frank").unwrap().unwrap();
        assert_eq!(response.username, "frank");
        assert!((response.estimate.breakdown.kcal_per_day - 2438.17).abs() < 0.5);
        assert!(profile_calories(&db, "ghost").unwrap().is_none());
    }

    #[test]
    fn test_delete_profile() {
        let db = test_db();
        save_profile(&db, form("gina")).unwrap();

        assert!(delete_profile(&db, "gina").unwrap().deleted);
        assert!(!delete_profile(&db, "gina").unwrap().deleted);
    }
}
