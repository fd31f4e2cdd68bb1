//! Family records stored as a TOML document.
//!
//! ```toml
//! [[person]]
//! id = 1
//! given_name = "Grandparent"
//! born = 1901
//!
//! [[person]]
//! id = 2
//! given_name = "Parent1"
//!
//! [[link]]
//! parent = 1
//! child = 2
//! ```
//!
//! Children of a person are returned in the order their links appear.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{FamilySource, ParentLink, Person, PersonId};

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawFamilyFile {
    #[serde(rename = "person")]
    persons: Vec<Person>,
    #[serde(rename = "link")]
    links: Vec<ParentLink>,
}

/// In-memory family records with an id index.
#[derive(Debug, Clone, Default)]
pub struct FamilyFile {
    path: PathBuf,
    persons: Vec<Person>,
    index: HashMap<PersonId, usize>,
    links: Vec<ParentLink>,
}

impl FamilyFile {
    #[instrument(level = "debug")]
    pub fn load(path: &Path) -> ApplicationResult<Self> {
        let content = std::fs::read_to_string(path).with_path_context("read family file", path)?;
        Self::from_toml_str(&content, path)
    }

    /// Parses TOML content; `path` is only used in error messages.
    pub fn from_toml_str(content: &str, path: &Path) -> ApplicationResult<Self> {
        let raw: RawFamilyFile = toml::from_str(content).map_err(|e| ApplicationError::FamilyFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_records(raw.persons, raw.links, path)
    }

    /// Builds and validates the record set.
    ///
    /// Rejects duplicate person ids, links naming unknown people, self links
    /// and repeated links.
    pub fn from_records(
        persons: Vec<Person>,
        links: Vec<ParentLink>,
        path: &Path,
    ) -> ApplicationResult<Self> {
        let invalid = |message: String| ApplicationError::FamilyFile {
            path: path.to_path_buf(),
            message,
        };

        let mut index = HashMap::with_capacity(persons.len());
        for (pos, person) in persons.iter().enumerate() {
            if index.insert(person.id, pos).is_some() {
                return Err(invalid(format!("duplicate person id {}", person.id)));
            }
        }

        for (pos, link) in links.iter().enumerate() {
            for id in [link.parent, link.child] {
                if !index.contains_key(&id) {
                    return Err(invalid(format!("link {} refers to unknown person {}", pos + 1, id)));
                }
            }
            if link.parent == link.child {
                return Err(invalid(format!("person {} is linked as their own child", link.child)));
            }
            if links[..pos].contains(link) {
                return Err(invalid(format!(
                    "link {} -> {} is listed twice",
                    link.parent, link.child
                )));
            }
        }

        debug!(persons = persons.len(), links = links.len(), "loaded family records");
        Ok(Self {
            path: path.to_path_buf(),
            persons,
            index,
            links,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn links(&self) -> &[ParentLink] {
        &self.links
    }

    /// People that have no recorded parent, in file order.
    pub fn progenitors(&self) -> Vec<&Person> {
        self.persons
            .iter()
            .filter(|p| !self.links.iter().any(|l| l.child == p.id))
            .collect()
    }
}

impl FamilySource for FamilyFile {
    fn person(&self, id: PersonId) -> Option<Person> {
        self.index.get(&id).map(|&pos| self.persons[pos].clone())
    }

    fn children(&self, id: PersonId) -> Vec<Person> {
        self.links
            .iter()
            .filter(|l| l.parent == id)
            .filter_map(|l| self.person(l.child))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[[person]]
id = 1
given_name = "Ada"
family_name = "Byron"
born = 1815

[[person]]
id = 2
given_name = "Byron"

[[person]]
id = 3
given_name = "Anne"

[[link]]
parent = 1
child = 3

[[link]]
parent = 1
child = 2
"#;

    #[test]
    fn given_valid_toml_then_children_follow_link_order() {
        let family = FamilyFile::from_toml_str(SAMPLE, Path::new("sample.toml")).unwrap();
        let names: Vec<_> = family
            .children(PersonId(1))
            .into_iter()
            .map(|p| p.given_name)
            .collect();
        assert_eq!(names, vec!["Anne", "Byron"]);
        assert_eq!(family.person(PersonId(1)).unwrap().born, Some(1815));
        assert!(family.children(PersonId(3)).is_empty());
        assert_eq!(family.progenitors().len(), 1);
    }

    #[test]
    fn given_duplicate_id_then_rejects() {
        let content = "[[person]]\nid = 1\ngiven_name = \"a\"\n[[person]]\nid = 1\ngiven_name = \"b\"\n";
        let err = FamilyFile::from_toml_str(content, Path::new("dup.toml")).unwrap_err();
        assert!(err.to_string().contains("duplicate person id 1"), "{err}");
    }

    #[test]
    fn given_link_to_unknown_person_then_rejects() {
        let content = "[[person]]\nid = 1\ngiven_name = \"a\"\n[[link]]\nparent = 1\nchild = 9\n";
        let err = FamilyFile::from_toml_str(content, Path::new("bad.toml")).unwrap_err();
        assert!(err.to_string().contains("unknown person 9"), "{err}");
    }

    #[test]
    fn given_malformed_toml_then_reports_family_file_error() {
        let err = FamilyFile::from_toml_str("[[person]\nid=", Path::new("broken.toml")).unwrap_err();
        assert!(matches!(err, ApplicationError::FamilyFile { .. }));
    }
}
