mod memory;
mod repository;
mod work_experience;

pub use memory::*;
pub use repository::*;
pub use work_experience::*;

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// User as saved in the store.
///
/// Optional fields that were never set are left out of the JSON body.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    // Basic information.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pincode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domicile_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domicile_country: Option<String>,
    // Education and skills.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_of_completion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<String>,
    // Experience.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_experience: Option<WorkHistory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_in: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume: Option<String>,
}

/// Fields accepted when creating a [`User`].
///
/// Required fields are optional at decode time so that missing and `null`
/// values reach validation and get reported together with the others.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    #[validate(
        required(message = "First name is required"),
        length(min = 1, message = "First name is required")
    )]
    pub first_name: Option<String>,
    #[validate(
        required(message = "Last name is required"),
        length(min = 1, message = "Last name is required")
    )]
    pub last_name: Option<String>,
    #[validate(
        required(message = "Invalid email address"),
        email(message = "Invalid email address")
    )]
    pub email: Option<String>,
    pub year_of_birth: Option<String>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub alternate_phone: Option<String>,
    pub address: Option<String>,
    pub pincode: Option<String>,
    pub domicile_state: Option<String>,
    pub domicile_country: Option<String>,
    pub school: Option<String>,
    pub degree: Option<String>,
    pub course: Option<String>,
    pub year_of_completion: Option<String>,
    pub grade: Option<String>,
    pub skills: Option<String>,
    pub projects: Option<String>,
    #[validate(custom(
        function = "crate::user::validate_history",
        message = "At most two work experience entries are allowed"
    ))]
    pub work_experience: Option<WorkHistory>,
    pub linked_in: Option<String>,
    pub resume: Option<String>,
}

impl NewUser {
    /// Attach an identifier and turn the payload into a stored [`User`].
    ///
    /// Expects a validated payload; absent required fields become empty.
    pub fn into_user(self, id: String) -> User {
        User {
            id,
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            year_of_birth: self.year_of_birth,
            gender: self.gender,
            phone: self.phone,
            alternate_phone: self.alternate_phone,
            address: self.address,
            pincode: self.pincode,
            domicile_state: self.domicile_state,
            domicile_country: self.domicile_country,
            school: self.school,
            degree: self.degree,
            course: self.course,
            year_of_completion: self.year_of_completion,
            grade: self.grade,
            skills: self.skills,
            projects: self.projects,
            work_experience: self.work_experience,
            linked_in: self.linked_in,
            resume: self.resume,
        }
    }
}

/// Partial update of a [`User`].
///
/// Required fields are `None` when not supplied. Optional fields have three
/// states: `None` keeps the stored value, `Some(None)` clears it and
/// `Some(Some(_))` replaces it, empty string included.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub year_of_birth: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub gender: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub alternate_phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub address: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub pincode: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub domicile_state: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub domicile_country: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub school: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub degree: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub course: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub year_of_completion: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub grade: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub skills: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub projects: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[validate(custom(
        function = "crate::user::validate_history",
        message = "At most two work experience entries are allowed"
    ))]
    pub work_experience: Option<Option<WorkHistory>>,
    #[serde(default, deserialize_with = "nullable")]
    pub linked_in: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub resume: Option<Option<String>>,
}

impl UserPatch {
    /// Shallow-merge supplied fields onto `user`. `id` is never touched.
    pub fn apply(self, user: &mut User) {
        let Self {
            first_name,
            last_name,
            email,
            year_of_birth,
            gender,
            phone,
            alternate_phone,
            address,
            pincode,
            domicile_state,
            domicile_country,
            school,
            degree,
            course,
            year_of_completion,
            grade,
            skills,
            projects,
            work_experience,
            linked_in,
            resume,
        } = self;

        macro_rules! merge {
            ($target:ident; $($field:ident),+ $(,)?) => {
                $(
                    if let Some(value) = $field {
                        $target.$field = value;
                    }
                )+
            };
        }

        merge!(
            user;
            first_name,
            last_name,
            email,
            year_of_birth,
            gender,
            phone,
            alternate_phone,
            address,
            pincode,
            domicile_state,
            domicile_country,
            school,
            degree,
            course,
            year_of_completion,
            grade,
            skills,
            projects,
            work_experience,
            linked_in,
            resume,
        );
    }
}

/// Keep explicit `null` apart from a missing key.
fn nullable<'de, D, T>(
    deserializer: D,
) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
