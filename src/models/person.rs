//! Person model: one individual in the family tree.

use serde::{Deserialize, Deserializer, Serialize};

/// Recorded gender of a person.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            "other" => Some(Gender::Other),
            _ => None,
        }
    }
}

/// A person in the family tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: String,
    pub full_name: String,
    pub gender: Gender,
    pub birth_year: Option<i32>,
    pub birth_month: Option<i32>,
    pub birth_day: Option<i32>,
    pub death_year: Option<i32>,
    pub death_month: Option<i32>,
    pub death_day: Option<i32>,
    pub is_deceased: bool,
    pub is_in_law: bool,
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_residence: Option<String>,
    /// At most one person should carry `Some(true)`.
    #[serde(default)]
    pub is_default_root_node: Option<bool>,
    pub created_at: String,
    pub updated_at: String,
}

impl Person {
    /// Drop the fields only signed-in members may see.
    pub fn into_public(self) -> Self {
        Self {
            note: None,
            phone_number: None,
            occupation: None,
            current_residence: None,
            ..self
        }
    }
}

/// Request body for creating a person.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePersonRequest {
    pub full_name: String,
    pub gender: Gender,
    #[serde(default)]
    pub birth_year: Option<i32>,
    #[serde(default)]
    pub birth_month: Option<i32>,
    #[serde(default)]
    pub birth_day: Option<i32>,
    #[serde(default)]
    pub death_year: Option<i32>,
    #[serde(default)]
    pub death_month: Option<i32>,
    #[serde(default)]
    pub death_day: Option<i32>,
    #[serde(default)]
    pub is_deceased: bool,
    #[serde(default)]
    pub is_in_law: bool,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub current_residence: Option<String>,
}

/// Request body for updating a person.
///
/// An absent field keeps its stored value. For the nullable columns an
/// explicit `null` clears the value, so those fields are `Option<Option<T>>`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePersonRequest {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default, deserialize_with = "double_option")]
    pub birth_year: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub birth_month: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub birth_day: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub death_year: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub death_month: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub death_day: Option<Option<i32>>,
    #[serde(default)]
    pub is_deceased: Option<bool>,
    #[serde(default)]
    pub is_in_law: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub avatar_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub note: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub phone_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub occupation: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub current_residence: Option<Option<String>>,
}

/// Deserialize a present field, `null` included, as `Some`.
/// Combined with `#[serde(default)]` a missing field stays `None`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Request body for editing the free-text note of a person.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoteRequest {
    pub note: String,
}

/// Query parameters for listing persons.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonListQuery {
    #[serde(default)]
    pub search: Option<String>,
}
