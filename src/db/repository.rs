//! Database repository for CRUD operations.
//!
//! Uses prepared statements and transactions for data integrity.

use chrono::{SecondsFormat, Utc};
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{
    CreatePersonRequest, CreateRelationshipRequest, EditRequest, EditRequestStatus, Gender, Person,
    Profile, Relationship, RelationshipType, UpdatePersonRequest, UpdateProfileRequest,
    UserComment, UserRole, UserRootNode,
};
use crate::tree::ReplyPlacement;

const PERSON_COLUMNS: &str = "id, full_name, gender, birth_year, birth_month, birth_day, \
    death_year, death_month, death_day, is_deceased, is_in_law, avatar_url, note, phone_number, \
    occupation, current_residence, is_default_root_node, created_at, updated_at";

const PROFILE_COLUMNS: &str = "id, role, is_active, full_name, avatar_url, created_at, updated_at";

/// Comments joined with the author's and the addressee's profile.
const COMMENT_SELECT: &str = r#"
    SELECT c.id, c.member_id, c.user_id, c.content, c.parent_id, c.reply_to_user_id, c.created_at,
           author.full_name AS author_name, author.avatar_url AS author_avatar_url,
           addressee.full_name AS reply_to_name
    FROM user_comments c
    LEFT JOIN profiles author ON author.id = c.user_id
    LEFT JOIN profiles addressee ON addressee.id = c.reply_to_user_id
"#;

const EDIT_REQUEST_SELECT: &str = r#"
    SELECT r.id, r.person_id, r.user_id, r.content, r.status, r.admin_note, r.created_at,
           r.updated_at, p.full_name AS person_name, u.full_name AS user_name
    FROM edit_requests r
    LEFT JOIN persons p ON p.id = r.person_id
    LEFT JOIN profiles u ON u.id = r.user_id
"#;

/// Timestamps share one fixed-width format so they sort as text.
fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn nullable_text(field: &Option<Option<String>>) -> Option<&str> {
    field.as_ref().and_then(|value| value.as_deref())
}

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== PERSON OPERATIONS ====================

    /// List all persons, oldest birth year first and unknown years last.
    pub async fn list_persons(&self) -> Result<Vec<Person>, AppError> {
        let sql = format!(
            "SELECT {} FROM persons ORDER BY birth_year IS NULL, birth_year, full_name",
            PERSON_COLUMNS
        );
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        Ok(rows.iter().map(person_from_row).collect())
    }

    /// Get a person by ID.
    pub async fn get_person(&self, id: &str) -> Result<Option<Person>, AppError> {
        let sql = format!("SELECT {} FROM persons WHERE id = ?", PERSON_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(person_from_row))
    }

    /// Get a person by ID or fail with `NotFound`.
    pub async fn require_person(&self, id: &str) -> Result<Person, AppError> {
        self.get_person(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Person {} not found", id)))
    }

    /// Create a new person.
    pub async fn create_person(&self, request: &CreatePersonRequest) -> Result<Person, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = now();

        sqlx::query(
            r#"INSERT INTO persons (
                id, full_name, gender, birth_year, birth_month, birth_day,
                death_year, death_month, death_day, is_deceased, is_in_law, avatar_url, note,
                phone_number, occupation, current_residence, is_default_root_node,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, NULL, ?, ?)"#,
        )
        .bind(&id)
        .bind(request.full_name.trim())
        .bind(request.gender.as_str())
        .bind(request.birth_year)
        .bind(request.birth_month)
        .bind(request.birth_day)
        .bind(request.death_year)
        .bind(request.death_month)
        .bind(request.death_day)
        .bind(request.is_deceased as i32)
        .bind(request.is_in_law as i32)
        .bind(&request.avatar_url)
        .bind(&request.note)
        .bind(&request.phone_number)
        .bind(&request.occupation)
        .bind(&request.current_residence)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        tracing::info!(person_id = %id, "person created");
        self.require_person(&id).await
    }

    /// Update a person in one statement.
    ///
    /// Only the columns present in the request are written. A nullable
    /// column is set, possibly to NULL, when its flag binds true.
    pub async fn update_person(
        &self,
        id: &str,
        request: &UpdatePersonRequest,
    ) -> Result<Person, AppError> {
        let result = sqlx::query(
            r#"UPDATE persons SET
                full_name = COALESCE(?, full_name),
                gender = COALESCE(?, gender),
                birth_year = CASE WHEN ? THEN ? ELSE birth_year END,
                birth_month = CASE WHEN ? THEN ? ELSE birth_month END,
                birth_day = CASE WHEN ? THEN ? ELSE birth_day END,
                death_year = CASE WHEN ? THEN ? ELSE death_year END,
                death_month = CASE WHEN ? THEN ? ELSE death_month END,
                death_day = CASE WHEN ? THEN ? ELSE death_day END,
                is_deceased = COALESCE(?, is_deceased),
                is_in_law = COALESCE(?, is_in_law),
                avatar_url = CASE WHEN ? THEN ? ELSE avatar_url END,
                note = CASE WHEN ? THEN ? ELSE note END,
                phone_number = CASE WHEN ? THEN ? ELSE phone_number END,
                occupation = CASE WHEN ? THEN ? ELSE occupation END,
                current_residence = CASE WHEN ? THEN ? ELSE current_residence END,
                updated_at = ?
            WHERE id = ?"#,
        )
        .bind(request.full_name.as_deref().map(str::trim))
        .bind(request.gender.map(|g| g.as_str()))
        .bind(request.birth_year.is_some())
        .bind(request.birth_year.flatten())
        .bind(request.birth_month.is_some())
        .bind(request.birth_month.flatten())
        .bind(request.birth_day.is_some())
        .bind(request.birth_day.flatten())
        .bind(request.death_year.is_some())
        .bind(request.death_year.flatten())
        .bind(request.death_month.is_some())
        .bind(request.death_month.flatten())
        .bind(request.death_day.is_some())
        .bind(request.death_day.flatten())
        .bind(request.is_deceased.map(|b| b as i32))
        .bind(request.is_in_law.map(|b| b as i32))
        .bind(request.avatar_url.is_some())
        .bind(nullable_text(&request.avatar_url))
        .bind(request.note.is_some())
        .bind(nullable_text(&request.note))
        .bind(request.phone_number.is_some())
        .bind(nullable_text(&request.phone_number))
        .bind(request.occupation.is_some())
        .bind(nullable_text(&request.occupation))
        .bind(request.current_residence.is_some())
        .bind(nullable_text(&request.current_residence))
        .bind(now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Person {} not found", id)));
        }

        self.require_person(id).await
    }

    /// Replace the free-text note of a person. `None` clears it.
    pub async fn update_note(&self, id: &str, note: Option<&str>) -> Result<Person, AppError> {
        let result = sqlx::query("UPDATE persons SET note = ?, updated_at = ? WHERE id = ?")
            .bind(note)
            .bind(now())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Person {} not found", id)));
        }

        self.require_person(id).await
    }

    /// Delete a person that no relationship refers to.
    pub async fn delete_person(&self, id: &str) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let linked: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM relationships WHERE person_a = ? OR person_b = ?",
        )
        .bind(id)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        if linked > 0 {
            return Err(AppError::Conflict(format!(
                "Person {} still has {} relationship(s); remove them first",
                id, linked
            )));
        }

        let result = sqlx::query("DELETE FROM persons WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Person {} not found", id)));
        }

        tx.commit().await?;
        tracing::info!(person_id = %id, "person deleted");
        Ok(())
    }

    /// Make `id` the only person flagged as the default tree root.
    pub async fn set_default_root(&self, id: &str) -> Result<Person, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE persons SET is_default_root_node = NULL WHERE is_default_root_node IS NOT NULL")
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("UPDATE persons SET is_default_root_node = 1 WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            // Dropping the transaction rolls the reset back.
            return Err(AppError::NotFound(format!("Person {} not found", id)));
        }

        tx.commit().await?;
        self.require_person(id).await
    }

    // ==================== RELATIONSHIP OPERATIONS ====================

    /// List all relationships.
    pub async fn list_relationships(&self) -> Result<Vec<Relationship>, AppError> {
        let rows = sqlx::query(
            "SELECT id, type, person_a, person_b, note, sort_order, created_at FROM relationships ORDER BY sort_order IS NULL, sort_order, created_at",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(relationship_from_row).collect())
    }

    /// Create a relationship between two existing, distinct persons.
    pub async fn create_relationship(
        &self,
        request: &CreateRelationshipRequest,
    ) -> Result<Relationship, AppError> {
        if request.person_a == request.person_b {
            return Err(AppError::Validation(
                "A relationship needs two different persons".to_string(),
            ));
        }
        self.require_person(&request.person_a).await?;
        self.require_person(&request.person_b).await?;

        let id = uuid::Uuid::new_v4().to_string();
        let now = now();

        sqlx::query(
            "INSERT INTO relationships (id, type, person_a, person_b, note, sort_order, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(request.kind.as_str())
        .bind(&request.person_a)
        .bind(&request.person_b)
        .bind(&request.note)
        .bind(request.sort_order)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        tracing::info!(relationship_id = %id, kind = request.kind.as_str(), "relationship created");

        Ok(Relationship {
            id,
            kind: request.kind,
            person_a: request.person_a.clone(),
            person_b: request.person_b.clone(),
            note: request.note.clone(),
            sort_order: request.sort_order,
            created_at: now,
        })
    }

    /// Delete a relationship.
    pub async fn delete_relationship(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM relationships WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Relationship {} not found", id)));
        }

        Ok(())
    }

    // ==================== PROFILE OPERATIONS ====================

    /// Create the profile on first sight and fill in missing name or avatar.
    pub async fn ensure_profile(
        &self,
        id: &str,
        full_name: Option<&str>,
        avatar_url: Option<&str>,
    ) -> Result<Profile, AppError> {
        let now = now();

        sqlx::query(
            r#"INSERT INTO profiles (id, role, is_active, full_name, avatar_url, created_at, updated_at)
            VALUES (?, 'member', 0, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                full_name = COALESCE(profiles.full_name, excluded.full_name),
                avatar_url = COALESCE(profiles.avatar_url, excluded.avatar_url),
                updated_at = CASE
                    WHEN (profiles.full_name IS NULL AND excluded.full_name IS NOT NULL)
                      OR (profiles.avatar_url IS NULL AND excluded.avatar_url IS NOT NULL)
                    THEN excluded.updated_at
                    ELSE profiles.updated_at
                END"#,
        )
        .bind(id)
        .bind(full_name)
        .bind(avatar_url)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.require_profile(id).await
    }

    /// Get a profile by user ID.
    pub async fn get_profile(&self, id: &str) -> Result<Option<Profile>, AppError> {
        let sql = format!("SELECT {} FROM profiles WHERE id = ?", PROFILE_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(profile_from_row))
    }

    async fn require_profile(&self, id: &str) -> Result<Profile, AppError> {
        self.get_profile(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", id)))
    }

    /// List all profiles, newest first.
    pub async fn list_profiles(&self) -> Result<Vec<Profile>, AppError> {
        let sql = format!(
            "SELECT {} FROM profiles ORDER BY created_at DESC",
            PROFILE_COLUMNS
        );
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        Ok(rows.iter().map(profile_from_row).collect())
    }

    /// Change the display name of a profile.
    pub async fn rename_profile(&self, id: &str, full_name: &str) -> Result<Profile, AppError> {
        let result = sqlx::query("UPDATE profiles SET full_name = ?, updated_at = ? WHERE id = ?")
            .bind(full_name)
            .bind(now())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Profile {} not found", id)));
        }

        self.require_profile(id).await
    }

    /// Change the role or activation of a profile.
    pub async fn update_profile(
        &self,
        id: &str,
        request: &UpdateProfileRequest,
    ) -> Result<Profile, AppError> {
        let existing = self.require_profile(id).await?;
        let role = request.role.unwrap_or(existing.role);
        let is_active = request.is_active.unwrap_or(existing.is_active);

        sqlx::query("UPDATE profiles SET role = ?, is_active = ?, updated_at = ? WHERE id = ?")
            .bind(role.as_str())
            .bind(is_active as i32)
            .bind(now())
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::info!(user_id = %id, role = role.as_str(), is_active, "profile access changed");
        self.require_profile(id).await
    }

    // ==================== USER ROOT NODE OPERATIONS ====================

    /// Get the personal tree root of a user.
    pub async fn get_user_root(&self, user_id: &str) -> Result<Option<UserRootNode>, AppError> {
        let row = sqlx::query(
            "SELECT user_id, root_node_id, created_at, updated_at FROM user_root_node WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(user_root_from_row))
    }

    /// Set the personal tree root of a user, replacing any previous one.
    pub async fn set_user_root(
        &self,
        user_id: &str,
        person_id: &str,
    ) -> Result<UserRootNode, AppError> {
        self.require_person(person_id).await?;
        let now = now();

        sqlx::query(
            r#"INSERT INTO user_root_node (user_id, root_node_id, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(user_id) DO UPDATE SET
                root_node_id = excluded.root_node_id,
                updated_at = excluded.updated_at"#,
        )
        .bind(user_id)
        .bind(person_id)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.get_user_root(user_id)
            .await?
            .ok_or_else(|| AppError::Internal("Personal root vanished after upsert".to_string()))
    }

    /// Forget the personal tree root of a user.
    pub async fn clear_user_root(&self, user_id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM user_root_node WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    // ==================== COMMENT OPERATIONS ====================

    /// List comments about a person, oldest first.
    pub async fn list_comments(&self, member_id: &str) -> Result<Vec<UserComment>, AppError> {
        let sql = format!(
            "{} WHERE c.member_id = ? ORDER BY c.created_at, c.rowid",
            COMMENT_SELECT
        );
        let rows = sqlx::query(&sql)
            .bind(member_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(comment_from_row).collect())
    }

    /// Get a comment by ID.
    pub async fn get_comment(&self, id: &str) -> Result<Option<UserComment>, AppError> {
        let sql = format!("{} WHERE c.id = ?", COMMENT_SELECT);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(comment_from_row))
    }

    /// Store a comment at an already decided place in its thread.
    pub async fn create_comment(
        &self,
        member_id: &str,
        user_id: &str,
        content: &str,
        placement: &ReplyPlacement,
    ) -> Result<UserComment, AppError> {
        let id = uuid::Uuid::new_v4().to_string();

        sqlx::query(
            "INSERT INTO user_comments (id, member_id, user_id, content, parent_id, reply_to_user_id, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(member_id)
        .bind(user_id)
        .bind(content)
        .bind(&placement.parent_id)
        .bind(&placement.reply_to_user_id)
        .bind(now())
        .execute(&self.pool)
        .await?;

        self.get_comment(&id)
            .await?
            .ok_or_else(|| AppError::Internal("Comment vanished after insert".to_string()))
    }

    /// Delete a comment.
    pub async fn delete_comment(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM user_comments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Comment {} not found", id)));
        }

        Ok(())
    }

    // ==================== EDIT REQUEST OPERATIONS ====================

    /// Record a pending edit request.
    pub async fn create_edit_request(
        &self,
        person_id: &str,
        user_id: &str,
        content: &str,
    ) -> Result<EditRequest, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = now();

        sqlx::query(
            "INSERT INTO edit_requests (id, person_id, user_id, content, status, admin_note, created_at, updated_at) VALUES (?, ?, ?, ?, 'pending', NULL, ?, ?)",
        )
        .bind(&id)
        .bind(person_id)
        .bind(user_id)
        .bind(content)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        tracing::info!(request_id = %id, person_id = %person_id, "edit request submitted");
        self.require_edit_request(&id).await
    }

    /// Get an edit request by ID.
    pub async fn get_edit_request(&self, id: &str) -> Result<Option<EditRequest>, AppError> {
        let sql = format!("{} WHERE r.id = ?", EDIT_REQUEST_SELECT);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(edit_request_from_row))
    }

    async fn require_edit_request(&self, id: &str) -> Result<EditRequest, AppError> {
        self.get_edit_request(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Edit request {} not found", id)))
    }

    /// List edit requests submitted by one user, newest first.
    pub async fn list_edit_requests_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<EditRequest>, AppError> {
        let sql = format!(
            "{} WHERE r.user_id = ? ORDER BY r.created_at DESC",
            EDIT_REQUEST_SELECT
        );
        let rows = sqlx::query(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(edit_request_from_row).collect())
    }

    /// List all edit requests, optionally only those in `status`, newest first.
    pub async fn list_edit_requests(
        &self,
        status: Option<EditRequestStatus>,
    ) -> Result<Vec<EditRequest>, AppError> {
        let rows = match status {
            Some(status) => {
                let sql = format!(
                    "{} WHERE r.status = ? ORDER BY r.created_at DESC",
                    EDIT_REQUEST_SELECT
                );
                sqlx::query(&sql)
                    .bind(status.as_str())
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql = format!("{} ORDER BY r.created_at DESC", EDIT_REQUEST_SELECT);
                sqlx::query(&sql).fetch_all(&self.pool).await?
            }
        };

        Ok(rows.iter().map(edit_request_from_row).collect())
    }

    /// Move a pending edit request to `status`. A request is reviewed once.
    pub async fn review_edit_request(
        &self,
        id: &str,
        status: EditRequestStatus,
        admin_note: Option<&str>,
    ) -> Result<EditRequest, AppError> {
        let result = sqlx::query(
            "UPDATE edit_requests SET status = ?, admin_note = ?, updated_at = ? WHERE id = ? AND status = 'pending'",
        )
        .bind(status.as_str())
        .bind(admin_note)
        .bind(now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            let current = self.require_edit_request(id).await?;
            return Err(AppError::Conflict(format!(
                "Edit request {} was already {}",
                id,
                current.status.as_str()
            )));
        }

        self.require_edit_request(id).await
    }
}

// Helper functions for row conversion

fn person_from_row(row: &sqlx::sqlite::SqliteRow) -> Person {
    let gender: String = row.get("gender");
    let is_deceased: i32 = row.get("is_deceased");
    let is_in_law: i32 = row.get("is_in_law");
    let is_default_root_node: Option<i32> = row.get("is_default_root_node");
    Person {
        id: row.get("id"),
        full_name: row.get("full_name"),
        gender: Gender::parse(&gender).unwrap_or(Gender::Other),
        birth_year: row.get("birth_year"),
        birth_month: row.get("birth_month"),
        birth_day: row.get("birth_day"),
        death_year: row.get("death_year"),
        death_month: row.get("death_month"),
        death_day: row.get("death_day"),
        is_deceased: is_deceased != 0,
        is_in_law: is_in_law != 0,
        avatar_url: row.get("avatar_url"),
        note: row.get("note"),
        phone_number: row.get("phone_number"),
        occupation: row.get("occupation"),
        current_residence: row.get("current_residence"),
        is_default_root_node: is_default_root_node.map(|v| v != 0),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn relationship_from_row(row: &sqlx::sqlite::SqliteRow) -> Relationship {
    let kind: String = row.get("type");
    Relationship {
        id: row.get("id"),
        // Unknown kinds are treated as non-hierarchical.
        kind: RelationshipType::parse(&kind).unwrap_or(RelationshipType::Marriage),
        person_a: row.get("person_a"),
        person_b: row.get("person_b"),
        note: row.get("note"),
        sort_order: row.get("sort_order"),
        created_at: row.get("created_at"),
    }
}

fn profile_from_row(row: &sqlx::sqlite::SqliteRow) -> Profile {
    let role: String = row.get("role");
    let is_active: i32 = row.get("is_active");
    Profile {
        id: row.get("id"),
        role: UserRole::parse(&role).unwrap_or(UserRole::Member),
        is_active: is_active != 0,
        full_name: row.get("full_name"),
        avatar_url: row.get("avatar_url"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn user_root_from_row(row: &sqlx::sqlite::SqliteRow) -> UserRootNode {
    UserRootNode {
        user_id: row.get("user_id"),
        root_node_id: row.get("root_node_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn comment_from_row(row: &sqlx::sqlite::SqliteRow) -> UserComment {
    UserComment {
        id: row.get("id"),
        member_id: row.get("member_id"),
        user_id: row.get("user_id"),
        content: row.get("content"),
        parent_id: row.get("parent_id"),
        reply_to_user_id: row.get("reply_to_user_id"),
        created_at: row.get("created_at"),
        author_name: row.get("author_name"),
        author_avatar_url: row.get("author_avatar_url"),
        reply_to_name: row.get("reply_to_name"),
    }
}

fn edit_request_from_row(row: &sqlx::sqlite::SqliteRow) -> EditRequest {
    let status: String = row.get("status");
    EditRequest {
        id: row.get("id"),
        person_id: row.get("person_id"),
        user_id: row.get("user_id"),
        content: row.get("content"),
        status: EditRequestStatus::parse(&status).unwrap_or(EditRequestStatus::Pending),
        admin_note: row.get("admin_note"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        person_name: row.get("person_name"),
        user_name: row.get("user_name"),
    }
}
