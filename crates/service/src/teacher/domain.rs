use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

/// A stored teacher record. `id` is assigned by the store.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Teacher {
    pub id: i64,
    pub full_name: String,
    pub age: i64,
    pub dob: String,
    pub num_classes: i64,
}

/// Add/update payload. Every field is optional at the type level so missing
/// keys can be reported by name instead of failing deserialization; `null`
/// counts as missing. An `id` key in the payload is ignored.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeacherInput {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub dob: Option<String>,
    #[serde(default)]
    pub num_classes: Option<i64>,
}

/// A payload that passed the presence check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTeacher {
    pub full_name: String,
    pub age: i64,
    pub dob: String,
    pub num_classes: i64,
}

impl NewTeacher {
    pub fn into_teacher(self, id: i64) -> Teacher {
        Teacher {
            id,
            full_name: self.full_name,
            age: self.age,
            dob: self.dob,
            num_classes: self.num_classes,
        }
    }
}

impl TeacherInput {
    /// Check that all four fields are present, naming every missing one.
    pub fn validate(self) -> Result<NewTeacher, ServiceError> {
        let mut missing = Vec::new();
        if self.full_name.is_none() { missing.push("full_name"); }
        if self.age.is_none() { missing.push("age"); }
        if self.dob.is_none() { missing.push("dob"); }
        if self.num_classes.is_none() { missing.push("num_classes"); }

        match (self.full_name, self.age, self.dob, self.num_classes) {
            (Some(full_name), Some(age), Some(dob), Some(num_classes)) => {
                Ok(NewTeacher { full_name, age, dob, num_classes })
            }
            _ => Err(ServiceError::Validation(format!(
                "Expected keys i.e., full_name, age, dob, num_classes in the JSON Data (missing: {})",
                missing.join(", ")
            ))),
        }
    }
}

/// Exact-match filter over age and/or class count, combined with AND.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TeacherFilter {
    pub age: Option<i64>,
    pub num_classes: Option<i64>,
}

impl TeacherFilter {
    pub fn is_empty(&self) -> bool {
        self.age.is_none() && self.num_classes.is_none()
    }

    pub fn matches(&self, t: &Teacher) -> bool {
        self.age.map_or(true, |age| t.age == age)
            && self.num_classes.map_or(true, |n| t.num_classes == n)
    }
}
