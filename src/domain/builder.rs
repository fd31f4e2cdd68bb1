//! Builds descendant trees from a family data source.

use std::collections::HashSet;

use tracing::{debug, instrument};

use crate::domain::arena::{NodeId, TreeArena};
use crate::domain::entities::{Person, PersonId};
use crate::domain::error::{DomainError, DomainResult};

/// Read access to stored people and their children.
pub trait FamilySource {
    fn person(&self, id: PersonId) -> Option<Person>;

    /// Children of `id` in their stored order.
    fn children(&self, id: PersonId) -> Vec<Person>;
}

/// Constructs a [`TreeArena`] of descendants rooted at one person.
///
/// A person reachable through two lines of descent appears once per line.
/// A person that turns up among their own descendants is reported as
/// [`DomainError::AncestryCycle`].
#[derive(Debug, Default)]
pub struct TreeBuilder {
    lineage: HashSet<PersonId>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[instrument(level = "debug", skip(self, source))]
    pub fn build_descendants<S>(
        &mut self,
        source: &S,
        root: PersonId,
    ) -> DomainResult<(TreeArena<Person>, NodeId)>
    where
        S: FamilySource + ?Sized,
    {
        // Reset state for a fresh build
        self.lineage.clear();

        let person = source
            .person(root)
            .ok_or(DomainError::PersonNotFound(root))?;
        let mut tree = TreeArena::new();
        let mut root_idx = None;

        let mut stack = vec![Step::Enter {
            person,
            parent: None,
        }];
        while let Some(step) = stack.pop() {
            let (person, parent) = match step {
                Step::Leave(id) => {
                    self.lineage.remove(&id);
                    continue;
                }
                Step::Enter { person, parent } => (person, parent),
            };

            let id = person.id;
            if !self.lineage.insert(id) {
                return Err(DomainError::AncestryCycle(id));
            }
            let node = tree.insert(person);
            match parent {
                Some(parent) => tree.add_child(parent, node)?,
                None => root_idx = Some(node),
            }

            stack.push(Step::Leave(id));
            for child in source.children(id).into_iter().rev() {
                stack.push(Step::Enter {
                    person: child,
                    parent: Some(node),
                });
            }
        }

        let root_idx = root_idx.ok_or(DomainError::PersonNotFound(root))?;
        debug!(nodes = tree.len(), "built descendant tree");
        Ok((tree, root_idx))
    }
}

/// Work item of the depth-first build. `Leave` pops a person off the
/// current line of descent once all their descendants are placed.
enum Step {
    Enter {
        person: Person,
        parent: Option<NodeId>,
    },
    Leave(PersonId),
}
