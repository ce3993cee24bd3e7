//! Record registry and parent linking
//!
//! Linking happens in two phases. [`Registry::insert`] attaches a record to
//! its parent right away when the parent is already registered and defers it
//! otherwise. [`Registry::finalize`] resolves the deferred records once every
//! batch has been parsed, so a child may appear before its parent.

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use crate::record::DocumentRecord;
use crate::tree::{DocumentTree, Node, RecordId};

/// A record reused an identity key that is already registered
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{origin}: record with identity {key:?} already exists (first defined in {existing_origin})")]
pub struct IdentityError {
    /// The contested identity key
    pub key: String,
    /// Where the rejected record came from
    pub origin: String,
    /// Where the registered record came from
    pub existing_origin: String,
}

/// Errors raised while linking the tree
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    #[error("{origin}: unable to locate parent {parent:?} referenced by {referenced_by:?}")]
    ParentNotFound {
        parent: String,
        referenced_by: String,
        origin: String,
    },

    #[error("{origin}: {key:?} is part of a parent cycle and never reaches root")]
    Cycle { key: String, origin: String },
}

/// Records registered in one parse session, keyed by identity
#[derive(Debug, Clone)]
pub struct Registry {
    nodes: Vec<Node>,
    index: HashMap<String, RecordId>,
    /// Records whose parent was not registered yet at insertion
    deferred: usize,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create a registry holding only the root record
    #[must_use]
    pub fn new() -> Self {
        let root = DocumentRecord::root();
        let mut index = HashMap::new();
        index.insert(root.identity_key.clone(), RecordId::ROOT);
        Self {
            nodes: vec![Node::new(root)],
            index,
            deferred: 0,
        }
    }

    /// Register a record under its identity key
    ///
    /// On error the registry is unchanged.
    pub fn insert(&mut self, record: DocumentRecord) -> Result<RecordId, IdentityError> {
        if let Some(&existing) = self.index.get(&record.identity_key) {
            return Err(IdentityError {
                key: record.identity_key,
                origin: record.origin,
                existing_origin: self.nodes[existing.0].record.origin.clone(),
            });
        }

        // Looked up before the record itself is indexed, so a self-parent stays deferred
        let parent = record
            .parent_key
            .as_deref()
            .and_then(|key| self.index.get(key).copied());

        let id = RecordId(self.nodes.len());
        self.index.insert(record.identity_key.clone(), id);
        self.nodes.push(Node::new(record));

        match parent {
            Some(parent) => {
                self.attach(id, parent);
                debug!(key = %self.key(id), parent = %self.key(parent), "record linked");
            }
            None => {
                self.deferred += 1;
                debug!(key = %self.key(id), "record registered, parent deferred");
            }
        }
        Ok(id)
    }

    /// Look up a registered record by identity key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&DocumentRecord> {
        self.index.get(key).map(|id| &self.nodes[id.0].record)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Number of registered records, root included
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root is registered on creation
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of records still waiting for their parent
    #[must_use]
    pub fn unresolved(&self) -> usize {
        self.deferred
    }

    /// Registered records in registration order, root first
    pub fn records(&self) -> impl Iterator<Item = &DocumentRecord> {
        self.nodes.iter().map(|node| &node.record)
    }

    /// Link every deferred record and return the finished tree
    ///
    /// Deferred records are resolved in registration order; the first one
    /// whose parent is still unknown is reported.
    pub fn finalize(mut self) -> Result<DocumentTree, LinkError> {
        for i in 1..self.nodes.len() {
            let id = RecordId(i);
            if self.nodes[i].parent.is_some() {
                continue;
            }
            let record = &self.nodes[i].record;
            let parent_key = record.parent_key.as_deref().unwrap_or_default();
            let Some(&parent) = self.index.get(parent_key) else {
                return Err(LinkError::ParentNotFound {
                    parent: parent_key.to_string(),
                    referenced_by: record.identity_key.clone(),
                    origin: record.origin.clone(),
                });
            };
            self.attach(id, parent);
            debug!(key = %self.key(id), parent = %self.key(parent), "deferred record linked");
        }

        self.check_reaches_root()?;
        debug!(records = self.nodes.len(), deferred = self.deferred, "tree linked");
        Ok(DocumentTree::new(self.nodes, self.index))
    }

    fn attach(&mut self, child: RecordId, parent: RecordId) {
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    fn key(&self, id: RecordId) -> &str {
        &self.nodes[id.0].record.identity_key
    }

    /// Every parent chain must end at the root
    fn check_reaches_root(&self) -> Result<(), LinkError> {
        let mut reaches = vec![false; self.nodes.len()];
        reaches[RecordId::ROOT.0] = true;

        for start in 1..self.nodes.len() {
            let mut chain = Vec::new();
            let mut current = start;
            while !reaches[current] {
                if chain.len() > self.nodes.len() {
                    let record = &self.nodes[start].record;
                    return Err(LinkError::Cycle {
                        key: record.identity_key.clone(),
                        origin: record.origin.clone(),
                    });
                }
                chain.push(current);
                match self.nodes[current].parent {
                    Some(parent) => current = parent.0,
                    None => break,
                }
            }
            if reaches[current] {
                for id in chain {
                    reaches[id] = true;
                }
            }
        }
        Ok(())
    }
}
