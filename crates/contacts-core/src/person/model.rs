//! Person domain model.

use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A single contact record.
///
/// This is exactly what gets persisted: field names are stable and there is
/// no identity or version field.
///
/// Reading is forgiving so hand-edited files survive a load/save cycle:
/// keys match ignoring ASCII case (`"Name"`, `"AGE"`), missing or `null`
/// fields keep their zero value, unknown keys are ignored and the last of
/// duplicate keys wins.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Person {
    pub name: String,
    pub age: i64,
    pub phone: String,
}

impl Person {
    pub fn new(name: impl Into<String>, age: i64, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age,
            phone: phone.into(),
        }
    }

    /// Case-insensitive exact comparison against the name field, using
    /// simple case folding per character.
    pub fn name_matches(&self, query: &str) -> bool {
        self.name.chars().map(fold).eq(query.chars().map(fold))
    }
}

/// Simple case fold of one character: lowercase of the uppercase form, so
/// `ς`, `σ` and `Σ` (or `ſ`, `s` and `S`) all fold together. Characters whose
/// case mapping expands to several characters are left unchanged.
fn fold(c: char) -> char {
    let upper = single(c.to_uppercase()).unwrap_or(c);
    single(upper.to_lowercase()).unwrap_or(upper)
}

fn single(mut chars: impl Iterator<Item = char>) -> Option<char> {
    let first = chars.next()?;
    chars.next().is_none().then_some(first)
}

impl<'de> Deserialize<'de> for Person {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(PersonVisitor)
    }
}

struct PersonVisitor;

impl<'de> Visitor<'de> for PersonVisitor {
    type Value = Person;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a person object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Person, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut person = Person::default();
        while let Some(key) = map.next_key::<String>()? {
            if key.eq_ignore_ascii_case("name") {
                if let Some(name) = map.next_value::<Option<String>>()? {
                    person.name = name;
                }
            } else if key.eq_ignore_ascii_case("age") {
                if let Some(age) = map.next_value::<Option<i64>>()? {
                    person.age = age;
                }
            } else if key.eq_ignore_ascii_case("phone") {
                if let Some(phone) = map.next_value::<Option<String>>()? {
                    person.phone = phone;
                }
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(person)
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) - {}", self.name, self.age, self.phone)
    }
}

/// Identity assigned to a record when it enters a session.
///
/// Never written to disk; a reload assigns fresh identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PersonId(Uuid);

impl PersonId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PersonId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_matches_ignores_case() {
        let person = Person::new("Ali", 30, "111");
        assert!(person.name_matches("ali"));
        assert!(person.name_matches("ALI"));
        assert!(!person.name_matches("al"));
        assert!(!person.name_matches("Alice"));
    }

    #[test]
    fn test_name_matches_non_ascii() {
        let person = Person::new("Ayşe", 25, "222");
        assert!(person.name_matches("AYŞE"));
    }

    #[test]
    fn test_display() {
        let person = Person::new("Ali", 30, "111");
        assert_eq!(person.to_string(), "Ali (30) - 111");
    }

    #[test]
    fn test_missing_fields_default_to_zero_values() {
        let person: Person = serde_json::from_str(r#"{"name":"Ali","extra":true}"#).unwrap();
        assert_eq!(person, Person::new("Ali", 0, ""));
    }

    #[test]
    fn test_name_matches_folds_sigma_forms() {
        let person = Person::new("ΟΔΥΣΣΕΥΣ", 40, "333");
        assert!(person.name_matches("οδυσσευς"));
        assert!(person.name_matches("οδυσσευσ"));
        assert!(Person::new("Σ", 1, "").name_matches("ς"));
    }

    #[test]
    fn test_keys_match_ignoring_case() {
        let person: Person =
            serde_json::from_str(r#"{"Name":"Ali","AGE":30,"Phone":"111"}"#).unwrap();
        assert_eq!(person, Person::new("Ali", 30, "111"));
    }

    #[test]
    fn test_null_fields_keep_zero_values_and_last_duplicate_wins() {
        let person: Person =
            serde_json::from_str(r#"{"name":null,"age":3,"age":4,"phone":"1","PHONE":"2"}"#)
                .unwrap();
        assert_eq!(person, Person::new("", 4, "2"));
    }

    #[test]
    fn test_wrong_value_type_is_an_error() {
        assert!(serde_json::from_str::<Person>(r#"{"age":"thirty"}"#).is_err());
        assert!(serde_json::from_str::<Person>(r#"["Ali", 30]"#).is_err());
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(PersonId::new(), PersonId::new());
    }
}
