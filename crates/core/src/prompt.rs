//! Prompt field descriptors for the register and update flows.

use crate::user::{User, UserDraft, UserField};

/// Input format hint for a prompted field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFormat {
    /// Absolute URL.
    Url,
}

/// Describes one value to collect from the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub field: UserField,
    /// Prompt text.
    pub message: &'static str,
    /// Value supplied on the command line. When present the field is not
    /// prompted for.
    pub value: Option<String>,
    /// Value offered as the default answer.
    pub default: Option<String>,
    pub format: Option<FieldFormat>,
    /// Strip surrounding whitespace from the answer.
    pub trim: bool,
    /// Hide input while typing.
    pub masked: bool,
}

impl FieldDescriptor {
    fn input(field: UserField, supplied: &UserDraft) -> Self {
        Self {
            field,
            message: message_for(field),
            value: supplied.get(field).map(str::to_string),
            default: None,
            format: field.is_uri().then_some(FieldFormat::Url),
            trim: true,
            masked: false,
        }
    }

    fn password() -> Self {
        Self {
            field: UserField::Password,
            message: message_for(UserField::Password),
            value: None,
            default: None,
            format: None,
            trim: false,
            masked: true,
        }
    }

    /// API attribute name this descriptor fills.
    pub fn name(&self) -> &'static str {
        self.field.key()
    }
}

fn message_for(field: UserField) -> &'static str {
    match field {
        UserField::Name => "Name",
        UserField::GivenName => "Given name",
        UserField::MiddleName => "Middle name",
        UserField::FamilyName => "Family name",
        UserField::Nickname => "Nickname",
        UserField::PreferredUsername => "Preferred username",
        UserField::Profile => "Profile URI",
        UserField::Picture => "Picture URI",
        UserField::Website => "Website",
        UserField::Email => "Email",
        UserField::Password => "Password",
    }
}

/// Fields asked for on registration: the ten profile attributes followed
/// by a masked password. The password is never taken from `supplied`.
pub fn register_fields(supplied: &UserDraft) -> Vec<FieldDescriptor> {
    UserField::PROFILE
        .iter()
        .map(|field| FieldDescriptor::input(*field, supplied))
        .chain(std::iter::once(FieldDescriptor::password()))
        .collect()
}

/// Fields asked for on update, each defaulting to the current record's value.
pub fn update_fields(supplied: &UserDraft, current: &User) -> Vec<FieldDescriptor> {
    UserField::PROFILE
        .iter()
        .map(|field| FieldDescriptor {
            default: current.field(*field).map(str::to_string),
            ..FieldDescriptor::input(*field, supplied)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_fields_order_and_password() {
        let fields = register_fields(&UserDraft::default());
        let names: Vec<&str> = fields.iter().map(|f| f.name()).collect();

        assert_eq!(fields.len(), 11);
        assert_eq!(names[0], "name");
        assert_eq!(names[9], "email");

        let password = fields.last().unwrap();
        assert_eq!(password.field, UserField::Password);
        assert!(password.masked);
        assert!(!password.trim);
    }

    #[test]
    fn test_register_password_ignores_supplied_value() {
        let mut supplied = UserDraft::default();
        supplied.set(UserField::Password, "from-flags");
        supplied.set(UserField::Email, "a@x.com");

        let fields = register_fields(&supplied);
        let email = fields.iter().find(|f| f.field == UserField::Email).unwrap();
        let password = fields
            .iter()
            .find(|f| f.field == UserField::Password)
            .unwrap();

        assert_eq!(email.value.as_deref(), Some("a@x.com"));
        assert_eq!(password.value, None);
    }

    #[test]
    fn test_uri_fields_carry_url_format() {
        let fields = register_fields(&UserDraft::default());
        let url_fields: Vec<UserField> = fields
            .iter()
            .filter(|f| f.format == Some(FieldFormat::Url))
            .map(|f| f.field)
            .collect();

        assert_eq!(
            url_fields,
            vec![UserField::Profile, UserField::Picture, UserField::Website]
        );
    }

    #[test]
    fn test_update_fields_default_from_current_record() {
        let mut current = User::new("u1").with_name("Ada").with_email("a@x.com");
        current.nickname = Some("countess".to_string());

        let fields = update_fields(&UserDraft::default(), &current);

        assert_eq!(fields.len(), 10);
        assert!(fields.iter().all(|f| f.field != UserField::Password));
        for field in &fields {
            assert_eq!(
                field.default.as_deref(),
                current.field(field.field),
                "{}",
                field.name()
            );
        }
    }

    #[test]
    fn test_update_fields_keep_supplied_values() {
        let mut supplied = UserDraft::default();
        supplied.set(UserField::Name, "Ada King");
        let current = User::new("u1").with_name("Ada");

        let fields = update_fields(&supplied, &current);
        let name = &fields[0];

        assert_eq!(name.value.as_deref(), Some("Ada King"));
        assert_eq!(name.default.as_deref(), Some("Ada"));
    }
}
