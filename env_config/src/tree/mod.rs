//! The load tree built over a record.
//!
//! [`build`] walks a [`Record`] once, resolving every annotated field to a
//! fully prefixed key. Nested records become [`BranchNode`]s and everything
//! else becomes a [`LeafNode`] holding a write-through [`FieldHandle`].
//! Loading consumes the tree.

use std::any::{Any, TypeId};

use crate::env::Environment;
use crate::error::{LoadError, LoadResult};
use crate::field::{FieldHandle, Kind, Record, Shape};
use crate::strategy::{Input, ListPolicy, registry};
use crate::tag::{TagOption, split_annotation};

/// Joins a prefix and a key.
pub const KEY_SEPARATOR: &str = "_";

/// Join `prefix` and `key` with [`KEY_SEPARATOR`].
///
/// The separator is not doubled when `prefix` already ends with it, and an
/// empty prefix yields `key` unchanged.
///
/// ```
/// use env_config::combine_key_prefix;
///
/// assert_eq!(combine_key_prefix("", "HOST"), "HOST");
/// assert_eq!(combine_key_prefix("APP_", "DB"), "APP_DB");
/// assert_eq!(combine_key_prefix("APP", "DB"), "APP_DB");
/// ```
#[must_use]
pub fn combine_key_prefix(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_owned()
    } else if prefix.ends_with(KEY_SEPARATOR) {
        format!("{prefix}{key}")
    } else {
        format!("{prefix}{KEY_SEPARATOR}{key}")
    }
}

/// A node of the load tree.
#[derive(Debug)]
pub enum Node<'a> {
    /// A terminal field.
    Leaf(LeafNode<'a>),
    /// A nested record.
    Branch(BranchNode<'a>),
}

impl Node<'_> {
    fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Branch(branch) => branch.leaf_count(),
        }
    }

    fn load(self, env: &dyn Environment, policy: ListPolicy) -> LoadResult<()> {
        match self {
            Self::Leaf(leaf) => leaf.load(env, policy),
            Self::Branch(branch) => branch.load(env, policy),
        }
    }
}

/// A terminal field with its resolved key and option chain.
#[derive(Debug)]
pub struct LeafNode<'a> {
    field: &'static str,
    key: String,
    handle: FieldHandle<'a>,
    options: Option<TagOption>,
}

impl<'a> LeafNode<'a> {
    fn new(
        field: &'static str,
        key: String,
        handle: FieldHandle<'a>,
        options: Option<TagOption>,
    ) -> Self {
        let options = if handle.kind() == Kind::List {
            Some(TagOption::ensure_delimiter(options))
        } else {
            options
        };
        Self {
            field,
            key,
            handle,
            options,
        }
    }

    /// Rust name of the field.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        self.field
    }

    /// Fully resolved environment key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Option chain, including the implicit delimiter of list fields.
    #[must_use]
    pub const fn options(&self) -> Option<&TagOption> {
        self.options.as_ref()
    }

    /// Structural kind of the field.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        self.handle.kind()
    }

    /// Name of the field type.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.handle.type_name()
    }

    /// Read the key from `env` and write the coerced value.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Unsettable`] when no strategy covers the field
    /// type, or the strategy's failure tagged with this leaf's key.
    pub fn load(mut self, env: &dyn Environment, policy: ListPolicy) -> LoadResult<()> {
        let Some(strategy) = registry::lookup(&self.handle) else {
            return Err(LoadError::Unsettable {
                type_name: self.handle.type_name(),
                key: self.key,
            });
        };
        let raw = env.get(&self.key);
        tracing::trace!(key = %self.key, field = self.field, "loading field");
        let input = Input::new(&raw, self.options.as_ref()).with_policy(policy);
        strategy
            .set_value(&mut self.handle, &input)
            .map_err(|err| err.at_key(&self.key))
    }
}

/// A nested record and its children in declaration order.
#[derive(Debug)]
pub struct BranchNode<'a> {
    prefix: String,
    record_name: &'static str,
    children: Vec<Node<'a>>,
}

impl<'a> BranchNode<'a> {
    /// Key prefix applied to the children.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Name of the record type.
    #[must_use]
    pub const fn record_name(&self) -> &'static str {
        self.record_name
    }

    /// Child nodes in field declaration order.
    #[must_use]
    pub fn children(&self) -> &[Node<'a>] {
        &self.children
    }

    /// Number of leaves under this branch.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.children.iter().map(Node::leaf_count).sum()
    }

    /// Load every child depth first, stopping at the first error.
    ///
    /// # Errors
    ///
    /// Returns the first child failure. Fields loaded before it keep their
    /// new values.
    pub fn load(self, env: &dyn Environment, policy: ListPolicy) -> LoadResult<()> {
        for child in self.children {
            child.load(env, policy)?;
        }
        Ok(())
    }
}

fn record_type_id(record: &dyn Record) -> TypeId {
    let value: &dyn Any = record;
    value.type_id()
}

/// Build the load tree for `record`, prefixing every key with `prefix`.
///
/// Fields whose annotation has an empty key are skipped. Empty optional
/// fields are populated with their default so the load has somewhere to
/// write. A nested record whose exact type has a registered strategy is
/// loaded as a single value instead of being walked.
///
/// # Errors
///
/// Currently infallible for derived records; the result leaves room for
/// hand-written [`Record`] implementations to fail.
pub fn build<'a>(record: &'a mut dyn Record, prefix: &str) -> LoadResult<BranchNode<'a>> {
    let record_name = record.record_name();
    let mut children = Vec::new();
    for entry in record.fields() {
        let field = entry.name();
        let (key, options) = split_annotation(entry.annotation());
        if key.is_empty() {
            tracing::trace!(record = record_name, field, "skipping field without key");
            continue;
        }
        let key = combine_key_prefix(prefix, key);
        let node = match entry.into_shape() {
            Shape::Record(nested) if registry::contains_type(record_type_id(&*nested)) => {
                Node::Leaf(LeafNode::new(field, key, FieldHandle::record(nested), options))
            }
            Shape::Record(nested) => Node::Branch(build(nested, &key)?),
            Shape::Value(handle) => Node::Leaf(LeafNode::new(field, key, handle, options)),
        };
        children.push(node);
    }
    Ok(BranchNode {
        prefix: prefix.to_owned(),
        record_name,
        children,
    })
}
