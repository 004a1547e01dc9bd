use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::serde::{deserialize_optional_string, deserialize_optional_timestamp};

/// A user account as represented by the remote API.
///
/// No attribute is guaranteed to be present. The identifier is assigned by
/// the service on registration and never changes afterwards. It is read
/// from `_id`, or from `id` when `_id` is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "UserRecord")]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_username: Option<String>,
    /// Profile page URI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    /// Picture URI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    /// Website URI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
}

/// Wire shape of a user record. Records may carry `_id`, `id`, or both.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserRecord {
    #[serde(rename = "_id", default, deserialize_with = "deserialize_optional_string")]
    id: Option<String>,
    #[serde(rename = "id", default, deserialize_with = "deserialize_optional_string")]
    plain_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    given_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    middle_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    family_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    nickname: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    preferred_username: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    profile: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    picture: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    website: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    created: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    modified: Option<DateTime<Utc>>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id.or(record.plain_id),
            name: record.name,
            given_name: record.given_name,
            middle_name: record.middle_name,
            family_name: record.family_name,
            nickname: record.nickname,
            preferred_username: record.preferred_username,
            profile: record.profile,
            picture: record.picture,
            website: record.website,
            email: record.email,
            created: record.created,
            modified: record.modified,
        }
    }
}

impl User {
    /// Creates a user with the given identifier and no other attributes.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Returns the identifier, or an empty string when the service omitted it.
    pub fn id_str(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }

    /// Name shown in listings.
    ///
    /// Falls back to `givenName + " " + familyName` only when `name` is absent.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!(
                "{} {}",
                self.given_name.as_deref().unwrap_or_default(),
                self.family_name.as_deref().unwrap_or_default()
            ),
        }
    }

    /// Current value of an editable attribute. Password is write-only and
    /// always yields None.
    pub fn field(&self, field: UserField) -> Option<&str> {
        match field {
            UserField::Name => self.name.as_deref(),
            UserField::GivenName => self.given_name.as_deref(),
            UserField::MiddleName => self.middle_name.as_deref(),
            UserField::FamilyName => self.family_name.as_deref(),
            UserField::Nickname => self.nickname.as_deref(),
            UserField::PreferredUsername => self.preferred_username.as_deref(),
            UserField::Profile => self.profile.as_deref(),
            UserField::Picture => self.picture.as_deref(),
            UserField::Website => self.website.as_deref(),
            UserField::Email => self.email.as_deref(),
            UserField::Password => None,
        }
    }
}

/// Attributes an operator can supply when registering or updating a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UserField {
    Name,
    GivenName,
    MiddleName,
    FamilyName,
    Nickname,
    PreferredUsername,
    Profile,
    Picture,
    Website,
    Email,
    Password,
}

impl UserField {
    /// Profile attributes in prompt order. Password is excluded.
    pub const PROFILE: [UserField; 10] = [
        UserField::Name,
        UserField::GivenName,
        UserField::MiddleName,
        UserField::FamilyName,
        UserField::Nickname,
        UserField::PreferredUsername,
        UserField::Profile,
        UserField::Picture,
        UserField::Website,
        UserField::Email,
    ];

    /// Attribute key used by the remote API.
    pub fn key(self) -> &'static str {
        match self {
            UserField::Name => "name",
            UserField::GivenName => "givenName",
            UserField::MiddleName => "middleName",
            UserField::FamilyName => "familyName",
            UserField::Nickname => "nickname",
            UserField::PreferredUsername => "preferredUsername",
            UserField::Profile => "profile",
            UserField::Picture => "picture",
            UserField::Website => "website",
            UserField::Email => "email",
            UserField::Password => "password",
        }
    }

    /// Whether the attribute holds a URI.
    pub fn is_uri(self) -> bool {
        matches!(
            self,
            UserField::Profile | UserField::Picture | UserField::Website
        )
    }
}

/// Attributes collected from the operator, sent as a create or update body.
///
/// Unset attributes are left out of the payload entirely.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UserDraft {
    fn slot(&mut self, field: UserField) -> &mut Option<String> {
        match field {
            UserField::Name => &mut self.name,
            UserField::GivenName => &mut self.given_name,
            UserField::MiddleName => &mut self.middle_name,
            UserField::FamilyName => &mut self.family_name,
            UserField::Nickname => &mut self.nickname,
            UserField::PreferredUsername => &mut self.preferred_username,
            UserField::Profile => &mut self.profile,
            UserField::Picture => &mut self.picture,
            UserField::Website => &mut self.website,
            UserField::Email => &mut self.email,
            UserField::Password => &mut self.password,
        }
    }

    /// Sets an attribute.
    pub fn set(&mut self, field: UserField, value: impl Into<String>) {
        *self.slot(field) = Some(value.into());
    }

    /// Returns an attribute if it was set.
    pub fn get(&self, field: UserField) -> Option<&str> {
        match field {
            UserField::Name => self.name.as_deref(),
            UserField::GivenName => self.given_name.as_deref(),
            UserField::MiddleName => self.middle_name.as_deref(),
            UserField::FamilyName => self.family_name.as_deref(),
            UserField::Nickname => self.nickname.as_deref(),
            UserField::PreferredUsername => self.preferred_username.as_deref(),
            UserField::Profile => self.profile.as_deref(),
            UserField::Picture => self.picture.as_deref(),
            UserField::Website => self.website.as_deref(),
            UserField::Email => self.email.as_deref(),
            UserField::Password => self.password.as_deref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl FromIterator<(UserField, String)> for UserDraft {
    fn from_iter<I: IntoIterator<Item = (UserField, String)>>(iter: I) -> Self {
        let mut draft = UserDraft::default();
        for (field, value) in iter {
            draft.set(field, value);
        }
        draft
    }
}

// Password never reaches logs.
impl std::fmt::Debug for UserDraft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserDraft")
            .field("name", &self.name)
            .field("given_name", &self.given_name)
            .field("middle_name", &self.middle_name)
            .field("family_name", &self.family_name)
            .field("nickname", &self.nickname)
            .field("preferred_username", &self.preferred_username)
            .field("profile", &self.profile)
            .field("picture", &self.picture)
            .field("website", &self.website)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "********"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_api_record() {
        let json = r#"{
            "_id": "u123",
            "name": "Ada Lovelace",
            "givenName": "Ada",
            "familyName": "Lovelace",
            "email": "a@x.com",
            "created": 1700000000000,
            "modified": 0
        }"#;
        let user: User = serde_json::from_str(json).unwrap();

        assert_eq!(user.id.as_deref(), Some("u123"));
        assert_eq!(user.given_name.as_deref(), Some("Ada"));
        assert_eq!(user.middle_name, None);
        assert!(user.created.is_some());
        assert_eq!(user.modified, None);
    }

    #[test]
    fn test_deserialize_accepts_plain_id() {
        let user: User = serde_json::from_str(r#"{"id": "u9"}"#).unwrap();
        assert_eq!(user.id_str(), "u9");
    }

    #[test]
    fn test_deserialize_record_with_both_id_keys() {
        let user: User =
            serde_json::from_str(r#"{"_id": "u1", "id": "legacy", "name": "Ada"}"#).unwrap();

        assert_eq!(user.id_str(), "u1");
        assert_eq!(user.name.as_deref(), Some("Ada"));
    }

    #[test]
    fn test_serialize_writes_only_underscore_id() {
        let user: User = serde_json::from_str(r#"{"id": "u9", "name": "Ada"}"#).unwrap();

        assert_eq!(
            serde_json::to_value(&user).unwrap(),
            serde_json::json!({ "_id": "u9", "name": "Ada" })
        );
    }

    #[test]
    fn test_deserialize_ignores_unknown_attributes() {
        let user: User =
            serde_json::from_str(r#"{"_id": "u1", "roles": ["admin"], "emailVerified": true}"#)
                .unwrap();
        assert_eq!(user, User::new("u1"));
    }

    #[test]
    fn test_display_name_prefers_name() {
        let mut user = User::new("u1").with_name("Grace Hopper");
        user.given_name = Some("Grace".to_string());
        user.family_name = Some("Murray".to_string());

        assert_eq!(user.display_name(), "Grace Hopper");
    }

    #[test]
    fn test_display_name_falls_back_to_given_and_family() {
        let mut user = User::new("u1");
        user.given_name = Some("Grace".to_string());
        user.family_name = Some("Hopper".to_string());

        assert_eq!(user.display_name(), "Grace Hopper");
    }

    #[test]
    fn test_display_name_fallback_with_missing_parts() {
        let mut user = User::new("u1");
        user.given_name = Some("Grace".to_string());

        assert_eq!(user.display_name(), "Grace ");
    }

    #[test]
    fn test_field_lookup_covers_profile_attributes() {
        let mut user = User::new("u1").with_email("g@navy.mil");
        user.website = Some("https://example.com".to_string());

        assert_eq!(user.field(UserField::Email), Some("g@navy.mil"));
        assert_eq!(user.field(UserField::Website), Some("https://example.com"));
        assert_eq!(user.field(UserField::Nickname), None);
        assert_eq!(user.field(UserField::Password), None);
    }

    #[test]
    fn test_draft_serializes_only_set_fields() {
        let draft: UserDraft = [
            (UserField::GivenName, "Ada".to_string()),
            (UserField::Password, "s3cret".to_string()),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "givenName": "Ada", "password": "s3cret" })
        );
    }

    #[test]
    fn test_draft_debug_masks_password() {
        let mut draft = UserDraft::default();
        draft.set(UserField::Password, "s3cret");

        let debug = format!("{:?}", draft);
        assert!(!debug.contains("s3cret"));
        assert!(debug.contains("********"));
    }

    #[test]
    fn test_field_keys_match_api_attributes() {
        let keys: Vec<&str> = UserField::PROFILE.iter().map(|f| f.key()).collect();
        assert_eq!(
            keys,
            vec![
                "name",
                "givenName",
                "middleName",
                "familyName",
                "nickname",
                "preferredUsername",
                "profile",
                "picture",
                "website",
                "email",
            ]
        );
    }
}
